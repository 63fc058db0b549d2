//! # 规则格式化器
//!
//! 定义规则数据结构，以及 Surge `.list` 规则集文件的输出格式。

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// 规则类型（规则行的第一个字段）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RuleKind {
    /// 精确域名规则
    Domain,
    /// 域名后缀规则
    DomainSuffix,
    /// 域名关键字规则
    DomainKeyword,
    /// IPv4 CIDR 规则
    IpCidr,
    /// IPv6 CIDR 规则
    IpCidr6,
    /// GeoIP 国家规则
    GeoIp,
    /// 兜底规则
    Final,
}

impl RuleKind {
    /// 规则行中的类型标记
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Domain => "DOMAIN",
            RuleKind::DomainSuffix => "DOMAIN-SUFFIX",
            RuleKind::DomainKeyword => "DOMAIN-KEYWORD",
            RuleKind::IpCidr => "IP-CIDR",
            RuleKind::IpCidr6 => "IP-CIDR6",
            RuleKind::GeoIp => "GEOIP",
            RuleKind::Final => "FINAL",
        }
    }

    /// 解析该类型规则所需的最少字段数（含类型本身和策略字段）
    pub fn min_fields(&self) -> usize {
        match self {
            RuleKind::Final => 2,
            _ => 3,
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 未识别的规则类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRuleKind(pub String);

impl fmt::Display for UnknownRuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown rule type: {}", self.0)
    }
}

impl std::error::Error for UnknownRuleKind {}

impl FromStr for RuleKind {
    type Err = UnknownRuleKind;

    // 大小写敏感：Surge 配置里类型总是大写
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DOMAIN" => Ok(RuleKind::Domain),
            "DOMAIN-SUFFIX" => Ok(RuleKind::DomainSuffix),
            "DOMAIN-KEYWORD" => Ok(RuleKind::DomainKeyword),
            "IP-CIDR" => Ok(RuleKind::IpCidr),
            "IP-CIDR6" => Ok(RuleKind::IpCidr6),
            "GEOIP" => Ok(RuleKind::GeoIp),
            "FINAL" => Ok(RuleKind::Final),
            other => Err(UnknownRuleKind(other.to_string())),
        }
    }
}

/// 单条分流规则（已去掉策略字段）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    /// 规则类型
    pub kind: RuleKind,
    /// 规则值 (域名、CIDR 或国家代码)，FINAL 没有值
    pub value: Option<String>,
    /// 策略之后的附加字段，如 `no-resolve`
    pub modifiers: Vec<String>,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.as_str())?;
        if let Some(value) = &self.value {
            write!(f, ",{}", value)?;
        }
        if !self.modifiers.is_empty() {
            write!(f, ",{}", self.modifiers.join(","))?;
        }
        Ok(())
    }
}

/// 生成规则集文件内容（包含文件头）
///
/// ```text
/// # <策略名>
/// # Total rules: <N>
///
/// <规则>
/// ```
pub fn generate_list_content(category: &str, rules: &[Rule]) -> String {
    let mut content = format!("# {}\n# Total rules: {}\n\n", category, rules.len());
    for rule in rules {
        content.push_str(&rule.to_string());
        content.push('\n');
    }
    content
}

// ========================================
// 测试模块
// ========================================
#[cfg(test)]
mod tests {
    use super::*;

    fn rule(kind: RuleKind, value: Option<&str>, modifiers: &[&str]) -> Rule {
        Rule {
            kind,
            value: value.map(String::from),
            modifiers: modifiers.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_rule_kind_round_trip() {
        for kind in [
            RuleKind::Domain,
            RuleKind::DomainSuffix,
            RuleKind::DomainKeyword,
            RuleKind::IpCidr,
            RuleKind::IpCidr6,
            RuleKind::GeoIp,
            RuleKind::Final,
        ] {
            assert_eq!(kind.as_str().parse::<RuleKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_rule_kind_is_case_sensitive() {
        assert!("domain".parse::<RuleKind>().is_err());
        assert!("USER-AGENT".parse::<RuleKind>().is_err());
    }

    #[test]
    fn test_display_rule() {
        assert_eq!(
            rule(RuleKind::DomainSuffix, Some("example.com"), &[]).to_string(),
            "DOMAIN-SUFFIX,example.com"
        );
        assert_eq!(
            rule(RuleKind::IpCidr, Some("10.0.0.0/8"), &["no-resolve"]).to_string(),
            "IP-CIDR,10.0.0.0/8,no-resolve"
        );
        assert_eq!(rule(RuleKind::Final, None, &[]).to_string(), "FINAL");
    }

    #[test]
    fn test_generate_list_content() {
        let rules = vec![
            rule(RuleKind::Domain, Some("a.com"), &[]),
            rule(RuleKind::GeoIp, Some("CN"), &[]),
        ];
        let content = generate_list_content("🎯 全球直连", &rules);
        assert_eq!(
            content,
            "# 🎯 全球直连\n# Total rules: 2\n\nDOMAIN,a.com\nGEOIP,CN\n"
        );
    }
}
