//! # 策略名 -> 文件名
//!
//! 已知策略名走静态映射表；其余策略名把空格和 `/` 换成 `_`，其他字符原样保留。

use std::collections::HashMap;
use std::sync::LazyLock;

/// 已知策略名与输出文件名的对照表
///
/// 带前导空格的 ` 🎯 全球直连` 在部分订阅转换结果里出现，需要单独列出。
static NAME_MAP: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("📲 电报消息", "telegram"),
        ("📹 油管视频", "youtube"),
        ("🎥 奈飞视频", "netflix"),
        ("🎥 迪士尼+", "disney"),
        ("📺 巴哈姆特", "bahamut"),
        ("📺 哔哩哔哩", "bilibili"),
        ("📢 谷歌FCM", "google_fcm"),
        ("Ⓜ️ 微软云盘", "microsoft_onedrive"),
        ("Ⓜ️ 微软服务", "microsoft"),
        ("🍎 苹果服务", "apple"),
        ("🎮 游戏平台", "game"),
        ("🎶 网易音乐", "netease_music"),
        ("☁️ CloudFlare", "cloudflare"),
        ("🤖 ChatGPT", "chatgpt"),
        ("📹 TikTok", "tiktok"),
        ("🤖 Claude", "claude"),
        ("🤖 Gemini", "gemini"),
        ("🎮 Steam下载", "steam_download"),
        ("🎮 Steam网页", "steam_web"),
        ("🤖 Copilot", "copilot"),
        ("🎯 全球直连", "direct"),
        (" 🎯 全球直连", "direct"),
        ("🐟 漏网之鱼", "final"),
        ("🚀 节点选择", "proxy"),
        ("REJECT", "reject"),
    ])
});

/// 把策略名转换为文件名（不含扩展名）
///
/// 返回空字符串表示该策略没有可用的文件名，调用方应跳过。
pub fn category_to_filename(category: &str) -> String {
    match NAME_MAP.get(category) {
        Some(name) => name.to_string(),
        None => category.replace([' ', '/'], "_"),
    }
}
