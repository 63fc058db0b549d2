//! # 规则文件写出
//!
//! 把每个策略的规则写成独立的 `<name>.list` 文件，已存在的同名文件整体覆盖。

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use super::formatter::{generate_list_content, Rule};
use super::naming::category_to_filename;
use super::parser::RuleSet;

/// 规则集文件扩展名
pub const LIST_EXTENSION: &str = "list";

/// 已写出的单个规则文件
#[derive(Debug, Clone, Serialize)]
pub struct WrittenFile {
    /// 原始策略名
    pub category: String,
    /// 输出路径
    pub path: PathBuf,
    /// 规则条数
    pub rules: usize,
}

/// 待写出的文件
struct Pending<'a> {
    category: &'a str,
    rules: &'a [Rule],
    path: PathBuf,
}

/// 规则文件写出器
pub struct RuleFileWriter {
    /// 输出目录
    output_dir: PathBuf,
}

impl RuleFileWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// 获取策略对应的规则文件路径，策略名无法转换为文件名时返回 None
    pub fn get_rule_file_path(&self, category: &str) -> Option<PathBuf> {
        let name = category_to_filename(category);
        if name.is_empty() {
            return None;
        }
        Some(self.output_dir.join(format!("{}.{}", name, LIST_EXTENSION)))
    }

    /// 写出所有策略的规则文件
    ///
    /// 返回的列表与 `RuleSet` 的迭代顺序一致。
    pub fn save(&self, rules: &RuleSet) -> Result<Vec<WrittenFile>> {
        // 确保输出目录存在
        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "Failed to create output directory: {}",
                self.output_dir.display()
            )
        })?;

        let pending = self.plan(rules);

        // 各文件路径互不相同，可以并行写
        pending
            .into_par_iter()
            .map(|p| -> Result<WrittenFile> {
                let content = generate_list_content(p.category, p.rules);
                fs::write(&p.path, content)
                    .with_context(|| format!("Failed to write rule file: {}", p.path.display()))?;
                debug!(path = %p.path.display(), rules = p.rules.len(), "wrote rule file");
                Ok(WrittenFile {
                    category: p.category.to_string(),
                    path: p.path,
                    rules: p.rules.len(),
                })
            })
            .collect()
    }

    /// 计算每个策略的目标路径
    ///
    /// 多个策略落到同一路径时，后出现的策略覆盖先出现的。
    fn plan<'a>(&self, rules: &'a RuleSet) -> Vec<Pending<'a>> {
        let mut slots: Vec<Option<Pending<'a>>> = Vec::new();
        let mut by_path: HashMap<PathBuf, usize> = HashMap::new();

        for (category, group) in rules.iter() {
            if group.is_empty() {
                continue;
            }

            let Some(path) = self.get_rule_file_path(category) else {
                debug!(category, "no file name for category, skipping");
                continue;
            };

            if let Some(&prev) = by_path.get(&path) {
                if let Some(old) = slots[prev].take() {
                    warn!(
                        path = %path.display(),
                        replaced = old.category,
                        by = category,
                        "categories share a rule file, keeping the later one"
                    );
                }
            }

            by_path.insert(path.clone(), slots.len());
            slots.push(Some(Pending {
                category,
                rules: group,
                path,
            }));
        }

        slots.into_iter().flatten().collect()
    }
}
