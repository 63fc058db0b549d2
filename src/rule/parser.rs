//! # 规则提取器
//!
//! 从 Surge 配置文本中截取 `[Rule]` 段，把每条规则按策略（category）分组。
//!
//! ## 处理规则
//! - 只处理段头之后、下一个 `[` 开头的行之前的内容
//! - 跳过空行和 `#` 注释
//! - 格式不对或类型未知的行直接丢弃，不算错误

use std::collections::HashMap;

use tracing::debug;

use super::formatter::{Rule, RuleKind};

/// 默认的规则段段头
pub const DEFAULT_SECTION: &str = "[Rule]";

// ========================================
// 按策略分组的规则集合
// ========================================

/// 策略名 -> 规则列表，按策略首次出现的顺序迭代
#[derive(Debug, Default)]
pub struct RuleSet {
    groups: Vec<(String, Vec<Rule>)>,
    index: HashMap<String, usize>,
    skipped: usize,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条规则到对应策略，不存在则新建分组
    pub fn push(&mut self, category: &str, rule: Rule) {
        let idx = match self.index.get(category) {
            Some(&idx) => idx,
            None => {
                self.groups.push((category.to_string(), Vec::new()));
                self.index.insert(category.to_string(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        self.groups[idx].1.push(rule);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Rule])> {
        self.groups
            .iter()
            .map(|(category, rules)| (category.as_str(), rules.as_slice()))
    }

    /// 策略数量
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// 被丢弃的规则行数
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// 所有策略的规则总数
    pub fn total_rules(&self) -> usize {
        self.groups.iter().map(|(_, rules)| rules.len()).sum()
    }
}

// ========================================
// 解析
// ========================================

/// 解析单条规则行，返回 (策略名, 规则)
///
/// 行格式为 `TYPE,VALUE,POLICY[,MODIFIER...]`，FINAL 为 `FINAL,POLICY`。
/// 字段不做 trim，与 Surge 自身的写法保持一致。
pub fn parse_rule_line(line: &str) -> Option<(&str, Rule)> {
    let parts: Vec<&str> = line.split(',').collect();
    let kind: RuleKind = parts[0].parse().ok()?;
    if parts.len() < kind.min_fields() {
        return None;
    }

    let (category, rule) = match kind {
        RuleKind::Final => (
            parts[1],
            Rule {
                kind,
                value: None,
                modifiers: Vec::new(),
            },
        ),
        // GEOIP 的附加字段不保留
        RuleKind::GeoIp => (
            parts[2],
            Rule {
                kind,
                value: Some(parts[1].to_string()),
                modifiers: Vec::new(),
            },
        ),
        _ => (
            parts[2],
            Rule {
                kind,
                value: Some(parts[1].to_string()),
                modifiers: parts[3..].iter().map(|s| s.to_string()).collect(),
            },
        ),
    };

    Some((category, rule))
}

/// 从配置全文中提取指定段的规则
pub fn extract_rules(content: &str, section: &str) -> RuleSet {
    let mut rules = RuleSet::new();
    let mut in_section = false;

    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();

        // 段内再次出现同名段头不会结束扫描
        if line == section {
            in_section = true;
            continue;
        }

        if !in_section {
            continue;
        }

        // 遇到下一个段头即结束
        if line.starts_with('[') {
            break;
        }

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match parse_rule_line(line) {
            Some((category, rule)) => rules.push(category, rule),
            None => {
                debug!(line = lineno + 1, content = line, "skipping rule line");
                rules.skipped += 1;
            }
        }
    }

    rules
}
