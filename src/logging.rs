//! # 日志初始化
//!
//! 诊断日志统一写到 stderr，stdout 只输出进度和报告。

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// 根据 `-v` / `-q` 初始化日志，`RUST_LOG` 可以覆盖默认级别
pub fn init(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose >= 2),
        )
        .init();
}
