/// 顶点定义模块
///
/// 定义树模型使用的顶点结构：位置 + 颜色。

use bytemuck::{Pod, Zeroable};

use crate::core::math::Color;

/// 带颜色的 3D 顶点
///
/// 内存布局与管线输入布局一致，使用 `#[repr(C)]` 保证顺序。
///
/// # 内存布局
///
/// - position: 12 bytes (3 * f32)
/// - color: 16 bytes (4 * f32)
/// - **总计**: 28 bytes
#[repr(C)]
#[derive(Default, Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// 顶点位置 (x, y, z)
    pub position: [f32; 3],

    /// 顶点颜色 (r, g, b, a)
    pub color: [f32; 4],
}

impl Vertex {
    /// 每个顶点包含的 f32 数量
    pub const FLOATS: usize = 3 + 4;

    #[inline]
    pub const fn new(position: [f32; 3], color: Color) -> Self {
        Self {
            position,
            color: [color.r, color.g, color.b, color.a],
        }
    }
}
