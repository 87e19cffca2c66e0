//! 图形后端模块
//!
//! 封装图形 API 的底层实现。目前只有 wgpu 后端，它通过统一的
//! `GraphicsBackend` trait 向上层提供窗口和交换链信息。

pub mod backend;
pub mod wgpu;

pub use backend::{GraphicsBackend, SwapChainDesc};
pub use self::wgpu::WgpuBackend;
