/// 树模型几何数据
///
/// 手工编写的低多边形树：三层锥形树冠、一段三棱柱树干以及树干底部的几根小树根。
/// 顶点和索引表即模型本身，不从其他数据推导。

use super::mesh::{MeshData, Subset};
use super::vertex::Vertex;
use crate::core::math::Color;

/// 调色板
pub mod palette {
    use crate::core::math::Color;

    pub const FOREST: Color = Color::new(0.043137254901960784, 0.4, 0.13725490196078433, 1.0);
    pub const DARK: Color = Color::new(0.18823529411764706, 0.47843137254901963, 0.054901960784313725, 1.0);
    pub const KELLY: Color = Color::new(0.2980392156862745, 0.7333333333333333, 0.09019607843137255, 1.0);
    pub const BROWN: Color = Color::new(0.549, 0.275, 0.031, 1.0);
    pub const DARK_BROWN: Color = Color::new(0.22, 0.098, 0.051, 1.0);
}

pub const VERTEX_COUNT: usize = 54;
pub const INDEX_COUNT: usize = 144;
pub const TRIANGLE_COUNT: usize = INDEX_COUNT / 3;

const fn v(x: f32, y: f32, z: f32, color: Color) -> Vertex {
    Vertex::new([x, y, z], color)
}

use palette::{BROWN, DARK, DARK_BROWN, FOREST, KELLY};

#[rustfmt::skip]
pub const TREE_VERTICES: [Vertex; VERTEX_COUNT] = [
    // 第一层树冠
    v(0.0, 1.25, 0.0, KELLY), // 顶点

    v(0.0, 0.5, 0.5, KELLY),               // 外圈
    v(0.125, 0.5, 0.21650635, FOREST),     // 内圈
    v(0.4330127, 0.5, 0.25, KELLY),
    v(0.25, 0.5, 0.0, FOREST),
    v(0.4330127, 0.5, -0.25, KELLY),
    v(0.125, 0.5, -0.21650635, FOREST),
    v(0.0, 0.5, -0.5, KELLY),
    v(-0.125, 0.5, -0.21650635, FOREST),
    v(-0.4330127, 0.5, -0.25, KELLY),
    v(-0.25, 0.5, 0.0, FOREST),
    v(-0.4330127, 0.5, 0.25, KELLY),
    v(-0.125, 0.5, 0.21650635, FOREST),

    // 第二层树冠
    v(0.0, 0.75, 0.0, DARK), // 顶点

    v(0.0, 0.0, 0.375, FOREST), // 内圈
    v(0.375, 0.0, 0.64951905, KELLY),
    v(0.32475953, 0.0, 0.1875, FOREST),
    v(0.75, 0.0, 0.0, KELLY),
    v(0.32475953, 0.0, -0.1875, FOREST),
    v(0.375, 0.0, -0.64951905, KELLY),
    v(0.0, 0.0, -0.375, FOREST),
    v(-0.375, 0.0, -0.64951905, KELLY),
    v(-0.32475953, 0.0, -0.1875, FOREST),
    v(-0.75, 0.0, 0.0, KELLY),
    v(-0.32475953, 0.0, 0.1875, FOREST),
    v(-0.375, 0.0, 0.64951905, KELLY),

    // 第三层树冠
    v(0.0, 0.25, 0.0, DARK), // 顶点

    v(0.0, -0.5, 0.9, KELLY),              // 外圈
    v(0.225, -0.5, 0.38971143, FOREST),    // 内圈
    v(0.779423, -0.5, 0.45, KELLY),
    v(0.45, -0.5, 0.0, FOREST),
    v(0.779423, -0.5, -0.45, KELLY),
    v(0.225, -0.5, -0.38971143, FOREST),
    v(0.0, -0.5, -0.9, KELLY),
    v(-0.225, -0.5, -0.38971143, FOREST),
    v(-0.779423, -0.5, -0.45, KELLY),
    v(-0.45, -0.5, 0.0, FOREST),
    v(-0.779423, -0.5, 0.45, KELLY),
    v(-0.225, -0.5, 0.38971143, FOREST),

    // 树干
    v(0.0, -0.5, 0.1, BROWN),
    v(-0.0866025403784, -0.5, -0.05, BROWN),
    v(0.0866025403784, -0.5, -0.05, BROWN),
    v(0.0, -1.0, 0.1, BROWN),
    v(-0.0866025403784, -1.0, -0.05, BROWN),
    v(0.0866025403784, -1.0, -0.05, BROWN),

    // 树根
    v(0.0433012701892, -1.0, 0.025, BROWN),
    v(-0.0433012701892, -1.0, 0.025, BROWN),
    v(0.0, -1.0, -0.05, BROWN),

    v(0.0, -1.0, 0.3, DARK_BROWN),
    v(-0.259808, -1.0, -0.15, DARK_BROWN),
    v(0.259808, -1.0, -0.15, DARK_BROWN),

    v(0.0, -0.8, 0.1, BROWN),
    v(-0.0866025403784, -0.8, -0.05, BROWN),
    v(0.0866025403784, -0.8, -0.05, BROWN),
];

#[rustfmt::skip]
pub const TREE_INDICES: [u32; INDEX_COUNT] = [
    // 第一层树冠：以 0 为顶点的扇形
    0,1,2,    0,2,3,    0,3,4,    0,4,5,
    0,5,6,    0,6,7,    0,7,8,    0,8,9,
    0,9,10,   0,10,11,  0,11,12,  0,12,1,

    // 第二层树冠
    13,14,15, 13,15,16, 13,16,17, 13,17,18,
    13,18,19, 13,19,20, 13,20,21, 13,21,22,
    13,22,23, 13,23,24, 13,24,25, 13,25,14,

    // 第三层树冠
    26,27,28, 26,28,29, 26,29,30, 26,30,31,
    26,31,32, 26,32,33, 26,33,34, 26,34,35,
    26,35,36, 26,36,37, 26,37,38, 26,38,27,

    // 树干
    39,40,42,
    42,40,43,
    41,39,42,
    41,42,44,
    41,44,40,
    40,44,43,

    // 树根
    51,46,48,
    51,48,45,
    52,49,46,
    52,47,49,
    53,45,50,
    53,50,47,
];

/// 构建树模型的网格数据
pub fn tree_mesh() -> MeshData {
    let mut mesh = MeshData::with_name("Tree");
    mesh.vertices = TREE_VERTICES.to_vec();
    mesh.indices = TREE_INDICES.to_vec();
    mesh.subsets = vec![
        Subset::new("canopy_top", 0, 12),
        Subset::new("canopy_middle", 12, 12),
        Subset::new("canopy_bottom", 24, 12),
        Subset::new("trunk", 36, 6),
        Subset::new("roots", 42, 6),
    ];
    mesh
}
