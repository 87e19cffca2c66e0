//! 索引绘制

use super::buffer::ImmutableBuffer;
use crate::core::error::{GraphicsError, Result};

/// 索引绘制参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawIndexedAttribs {
    pub num_indices: u32,
    pub index_type: wgpu::IndexFormat,
    /// 提交前检查参数与绑定的索引缓冲是否匹配
    pub verify: bool,
}

impl DrawIndexedAttribs {
    pub fn triangle_count(&self) -> u32 {
        self.num_indices / 3
    }

    /// 检查索引类型与缓冲元素大小一致，且索引数量不超过缓冲容量
    pub fn verify_against(&self, index_capacity: u32, index_size: u64) -> Result<()> {
        let expected_size = match self.index_type {
            wgpu::IndexFormat::Uint16 => 2,
            wgpu::IndexFormat::Uint32 => 4,
        };

        if index_size != expected_size {
            return Err(GraphicsError::CommandExecution(format!(
                "Index type {:?} does not match index buffer element size {}",
                self.index_type, index_size
            ))
            .into());
        }

        if self.num_indices > index_capacity {
            return Err(GraphicsError::CommandExecution(format!(
                "Draw requests {} indices but index buffer holds {}",
                self.num_indices, index_capacity
            ))
            .into());
        }

        Ok(())
    }
}

/// 绑定索引缓冲并发出一次索引绘制
pub fn draw_indexed<'a>(
    pass: &mut wgpu::RenderPass<'a>,
    attribs: &DrawIndexedAttribs,
    index_buffer: &'a ImmutableBuffer,
) -> Result<()> {
    if attribs.verify {
        attribs.verify_against(index_buffer.element_count(), index_buffer.element_size())?;
    }

    pass.set_index_buffer(index_buffer.slice(), attribs.index_type);
    pass.draw_indexed(0..attribs.num_indices, 0, 0..1);
    Ok(())
}
