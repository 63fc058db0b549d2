//! # 规则拆分模块
//!
//! 此模块负责：
//! 1. 从 Surge 配置的 `[Rule]` 段提取规则并按策略分组
//! 2. 把策略名映射为安全的文件名
//! 3. 把每个策略的规则写成独立的 `.list` 规则集文件

pub mod formatter;
pub mod naming;
pub mod parser;
mod writer;

pub use parser::{extract_rules, RuleSet, DEFAULT_SECTION};
pub use writer::{RuleFileWriter, WrittenFile};
