//! GPU 缓冲区
//!
//! - `ImmutableBuffer`：创建时一次性上传，之后不可写（顶点/索引缓冲）
//! - `DynamicUniformBuffer`：每帧整体覆盖写入的常量缓冲

use std::marker::PhantomData;

use bytemuck::Pod;
use tracing::debug;
use wgpu::util::DeviceExt;

use crate::core::error::{GraphicsError, Result};

/// 不可变缓冲区
pub struct ImmutableBuffer {
    buffer: wgpu::Buffer,
    element_count: u32,
    element_size: u64,
}

impl ImmutableBuffer {
    /// 用 `data` 创建缓冲区，`usage` 中不包含 `COPY_DST`，创建后内容无法修改
    pub fn new<T: Pod>(
        device: &wgpu::Device,
        label: &str,
        usage: wgpu::BufferUsages,
        data: &[T],
    ) -> Result<Self> {
        if data.is_empty() {
            return Err(GraphicsError::ResourceCreation(format!(
                "Buffer '{}' has no initial data",
                label
            ))
            .into());
        }

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(data),
            usage,
        });

        debug!(label, elements = data.len(), bytes = buffer.size(), "Created immutable buffer");

        Ok(Self {
            buffer,
            element_count: data.len() as u32,
            element_size: std::mem::size_of::<T>() as u64,
        })
    }

    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(..)
    }

    pub fn element_count(&self) -> u32 {
        self.element_count
    }

    pub fn element_size(&self) -> u64 {
        self.element_size
    }
}

/// 动态常量缓冲
///
/// 每次写入都覆盖全部内容（overwrite-discard），不读取旧数据，
/// 因此单线程帧循环中不需要任何同步。
pub struct DynamicUniformBuffer<T: Pod> {
    buffer: wgpu::Buffer,
    _marker: PhantomData<T>,
}

impl<T: Pod> DynamicUniformBuffer<T> {
    pub fn new(device: &wgpu::Device, label: &str) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: std::mem::size_of::<T>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            buffer,
            _marker: PhantomData,
        }
    }

    /// 用 `value` 覆盖整个缓冲区
    pub fn write_discard(&self, queue: &wgpu::Queue, value: &T) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(value));
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }
}
