//! tree_sample - 树模型渲染示例
//!
//! # 使用方法
//!
//! ```bash
//! # 使用配置文件
//! cargo run
//!
//! # 命令行覆盖
//! cargo run -- --width 1280 --height 720 --manual-gamma
//! ```

use anyhow::Context;
use tracing::info;

use tree_sample::app;
use tree_sample::core::{log, Config, ConfigError, SampleError};
use tree_sample::sample::{Sample, TreeSample};

const CONFIG_PATH: &str = "config.toml";

/// 应用程序入口点
///
/// # 初始化流程
///
/// 1. 加载配置文件（config.toml），文件不存在时使用默认配置
/// 2. 应用命令行参数覆盖
/// 3. 验证配置
/// 4. 初始化日志系统
/// 5. 运行示例
fn main() -> anyhow::Result<()> {
    // 1. 加载配置（在初始化日志之前）
    let mut config = match Config::from_file(CONFIG_PATH) {
        Ok(config) => config,
        Err(SampleError::Config(ConfigError::FileNotFound(_))) => Config::default(),
        Err(e) => return Err(e).context(format!("Failed to load {}", CONFIG_PATH)),
    };

    // 2. 应用命令行参数
    config.apply_args(std::env::args().skip(1));

    // 3. 验证配置
    config.validate().context("Invalid configuration")?;

    // 4. 初始化日志系统
    log::init_logger(&config.logging).context("Failed to initialize logger")?;
    info!(version = env!("CARGO_PKG_VERSION"), "tree_sample starting...");

    info!(
        width = config.window.width,
        height = config.window.height,
        vsync = config.graphics.vsync,
        gamma = ?config.graphics.gamma,
        pre_transform = ?config.graphics.pre_transform,
        "Graphics configuration"
    );

    // 5. 运行示例
    let sample = TreeSample::new();
    let name = sample.name().to_string();
    app::run(&config, sample).with_context(|| format!("{} failed", name))?;

    info!("Shutdown complete");
    Ok(())
}
