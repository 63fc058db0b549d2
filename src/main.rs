//! # surge-rule-split
//!
//! 把 Surge 配置文件 `[Rule]` 段里的规则按策略拆分成独立的 `.list` 规则集文件。
//!
//! ## 功能
//! - 提取 `[Rule]` 段中的 DOMAIN / DOMAIN-SUFFIX / DOMAIN-KEYWORD /
//!   IP-CIDR / IP-CIDR6 / GEOIP / FINAL 规则
//! - 去掉策略字段，按策略分组
//! - 每个策略写出一个 `<name>.list`，带策略名和规则数的文件头
//!
//! ## 使用
//! ```bash
//! # 默认读取当前目录下的 surge.conf，输出到 surge_rule/
//! surge-rule-split
//!
//! # 指定输入输出
//! surge-rule-split --input ~/surge/main.conf --output ./rules
//!
//! # JSON 格式输出报告
//! surge-rule-split --json
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};

mod logging;
mod rule;

use rule::{RuleFileWriter, WrittenFile};

/// 默认输入文件（相对项目目录）
const DEFAULT_INPUT: &str = "surge.conf";

/// 默认输出目录（相对项目目录）
const DEFAULT_OUTPUT_DIR: &str = "surge_rule";

// ========================================
// CLI 参数定义
// ========================================

/// Surge 规则拆分工具
#[derive(Parser)]
#[command(name = "surge-rule-split")]
#[command(version)]
#[command(about = "Split the [Rule] section of a Surge config into per-policy .list files")]
struct Cli {
    /// Surge 配置文件路径
    #[arg(long, short = 'i', value_name = "PATH")]
    input: Option<PathBuf>,

    /// 规则文件输出目录
    #[arg(long, short = 'o', value_name = "DIR")]
    output: Option<PathBuf>,

    /// 规则段段头
    #[arg(long, default_value = rule::DEFAULT_SECTION)]
    section: String,

    /// JSON 格式输出报告
    #[arg(long)]
    json: bool,

    /// 日志详细程度 (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// 只输出错误日志
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    quiet: bool,
}

// ========================================
// 报告
// ========================================

/// `--json` 输出的报告
#[derive(Serialize)]
struct SplitReport<'a> {
    input: &'a Path,
    output_dir: &'a Path,
    categories: Vec<CategoryCount<'a>>,
    skipped_lines: usize,
    files: Vec<WrittenFile>,
}

#[derive(Serialize)]
struct CategoryCount<'a> {
    category: &'a str,
    rules: usize,
}

// ========================================
// 主函数
// ========================================

fn main() {
    // 解析命令行参数
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.quiet);

    // 路径默认相对当前目录（项目目录）
    let input = cli.input.unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));
    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    let result = run_split(&input, &output, &cli.section, cli.json);

    // 处理错误
    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// 执行拆分：读取 → 提取 → 写出 → 报告
fn run_split(input: &Path, output: &Path, section: &str, json_output: bool) -> Result<()> {
    if !json_output {
        println!("Parsing {}...", input.display());
    }

    // 1. 读取配置，失败即终止，不产生任何输出
    let content = fs::read_to_string(input)
        .with_context(|| format!("Failed to read config file: {}", input.display()))?;

    // 2. 提取规则
    let rules = rule::extract_rules(&content, section);
    info!(
        categories = rules.len(),
        rules = rules.total_rules(),
        skipped = rules.skipped(),
        "extracted rules"
    );
    if rules.is_empty() {
        warn!(section, "no rules found");
    }

    // 策略列表按名称排序展示
    let mut categories: Vec<CategoryCount> = rules
        .iter()
        .map(|(category, group)| CategoryCount {
            category,
            rules: group.len(),
        })
        .collect();
    categories.sort_by(|a, b| a.category.cmp(b.category));

    if !json_output {
        println!("\nFound {} categories:", categories.len());
        for c in &categories {
            println!("  - {}: {} rules", c.category, c.rules);
        }
    }

    // 3. 写出规则文件
    let writer = RuleFileWriter::new(output);
    if !json_output {
        println!("\nSaving rules to {}...", writer.output_dir().display());
    }
    let files = writer.save(&rules)?;

    // 4. 输出结果
    if json_output {
        let report = SplitReport {
            input,
            output_dir: output,
            categories,
            skipped_lines: rules.skipped(),
            files,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for file in &files {
            println!("Created {} with {} rules", file.path.display(), file.rules);
        }
        println!("\nDone!");
    }

    Ok(())
}
