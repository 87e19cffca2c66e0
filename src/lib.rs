//! tree_sample - 树模型渲染示例
//!
//! 使用 wgpu 渲染一棵由分层圆环几何体组成的风格化树：
//! 初始化管线和静态顶点/索引缓冲，每帧根据时间更新世界-观察-投影矩阵，
//! 然后发出一次索引绘制。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（数学、日志、配置、错误处理、计时）
//! - `geometry`: 顶点格式与树模型数据
//! - `gfx`: wgpu 图形后端（设备、交换链、着色器、管线、缓冲）
//! - `sample`: 示例生命周期与树模型示例
//! - `app`: 窗口与主循环
//!
//! # 使用示例
//!
//! ```no_run
//! use tree_sample::core::Config;
//! use tree_sample::sample::TreeSample;
//!
//! let config = Config::default();
//! tree_sample::app::run(&config, TreeSample::new())?;
//! # Ok::<(), tree_sample::core::SampleError>(())
//! ```

pub mod core;
pub mod geometry;
pub mod gfx;
pub mod sample;
pub mod app;
