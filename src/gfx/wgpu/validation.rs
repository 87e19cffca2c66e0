//! wgpu 验证错误捕获
//!
//! wgpu 默认把验证错误交给未捕获错误处理器（直接 panic）。
//! 创建着色器和管线时用错误作用域包裹，把错误转换为 `GraphicsError`。

use crate::core::error::{GraphicsError, Result};

/// 在验证错误作用域中执行 `f`
///
/// `make_error` 负责把 wgpu 报告的错误描述包装成具体的 `GraphicsError` 变体。
pub fn capture_validation<T>(
    device: &wgpu::Device,
    make_error: impl FnOnce(String) -> GraphicsError,
    f: impl FnOnce() -> T,
) -> Result<T> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = f();
    match pollster::block_on(device.pop_error_scope()) {
        Some(err) => Err(make_error(err.to_string()).into()),
        None => Ok(value),
    }
}
