//! 日志系统模块
//!
//! 基于 `tracing` 提供结构化的日志记录功能。
//!
//! - 结构化日志：支持键值对
//! - 灵活输出：支持控制台和文件输出
//! - `RUST_LOG` 环境变量优先于配置文件中的日志级别
//!
//! # 使用示例
//!
//! ```no_run
//! use tree_sample::core::{config::LoggingConfig, log};
//!
//! log::init_logger(&LoggingConfig::default())?;
//! tracing::info!(width = 800, height = 600, "Window created");
//! # Ok::<(), tree_sample::core::SampleError>(())
//! ```

use std::path::Path;

use tracing::Level;
use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};
use tracing_appender::rolling::{RollingFileAppender, Rotation};

use super::config::{LogLevel, LoggingConfig};
use super::error::{Result, SampleError};

/// 初始化日志系统
///
/// 必须在程序开始时调用一次，重复调用返回 `SampleError::Log`。
pub fn init_logger(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(config.level);

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true);

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer);

    let result = if config.file_output {
        let file_appender = build_file_appender(&config.log_file)?;

        let file_layer = fmt::layer()
            .with_target(true)
            .with_ansi(false)  // 文件不需要 ANSI 颜色
            .with_writer(file_appender);

        registry.with(file_layer).try_init()
    } else {
        registry.try_init()
    };

    result.map_err(|e| SampleError::Log(e.to_string()))
}

/// 构建日志过滤器，`RUST_LOG` 存在时优先使用
fn build_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::default().add_directive(LevelFilter::from_level(level.into()).into())
    })
}

/// 创建按天滚动的日志文件写入器
///
/// 日志目录无法创建时返回 `SampleError::Log`。
fn build_file_appender(log_file: &str) -> Result<RollingFileAppender> {
    let (directory, filename) = split_log_path(log_file);

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(filename)
        .build(directory)
        .map_err(|e| SampleError::Log(format!("Failed to open log file '{}': {}", log_file, e)))
}

/// 将日志文件路径拆分为目录和文件名
fn split_log_path(log_file: &str) -> (&Path, &str) {
    let path = Path::new(log_file);
    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let filename = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("tree_sample.log");
    (directory, filename)
}

/// 日志级别转换
impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}
