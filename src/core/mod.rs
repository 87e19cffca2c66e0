//! 核心功能模块
//!
//! 提供与具体图形 API 无关的基础功能。
//!
//! - `math`：矩阵、颜色等数学工具
//! - `log`：日志系统
//! - `config`：配置管理
//! - `error`：统一错误类型
//! - `timer`：帧计时

pub mod math;
pub mod log;
pub mod config;
pub mod error;
pub mod timer;

pub use math::{Color, Matrix4, Vector3};
pub use error::{Result, SampleError, GraphicsError, ConfigError};
pub use config::{Config, SurfaceTransform};
pub use timer::{FrameTimer, FrameTime};
