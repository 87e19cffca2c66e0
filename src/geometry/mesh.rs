/// 网格数据结构模块
///
/// 定义CPU侧的网格数据容器，在上传到GPU之前保存并校验几何数据。

use super::vertex::Vertex;

/// 子网格描述符
///
/// 描述网格的一段连续三角形，例如树冠的某一层或树干。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subset {
    /// 子网格名称（用于日志和调试）
    pub name: &'static str,

    /// 起始面索引（以三角形为单位）
    pub face_start: u32,

    /// 面数量（三角形数量）
    pub face_count: u32,
}

impl Subset {
    #[inline]
    pub const fn new(name: &'static str, face_start: u32, face_count: u32) -> Self {
        Self {
            name,
            face_start,
            face_count,
        }
    }

    /// 获取索引起始位置（以索引数量计，非三角形数）
    #[inline]
    pub fn index_start(&self) -> u32 {
        self.face_start * 3
    }

    /// 获取索引数量（非三角形数）
    #[inline]
    pub fn index_count(&self) -> u32 {
        self.face_count * 3
    }
}

/// CPU侧网格数据
///
/// 简单的数据持有者，不包含GPU资源。渲染器将其上传到不可变缓冲区。
#[derive(Debug, Clone)]
pub struct MeshData {
    /// 顶点数组
    pub vertices: Vec<Vertex>,

    /// 索引数组，每3个索引定义一个三角形
    pub indices: Vec<u32>,

    /// 子网格列表
    pub subsets: Vec<Subset>,

    /// 网格名称
    pub name: Option<String>,
}

impl MeshData {
    /// 创建一个指定名称的空网格数据
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            subsets: Vec::new(),
            name: Some(name.into()),
        }
    }

    /// 获取顶点数量
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// 获取索引数量
    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// 获取三角形数量
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// 验证网格数据的有效性
    ///
    /// 检查：
    /// - 索引数量是3的倍数
    /// - 所有索引都在有效范围内
    /// - 子网格描述符的范围有效
    pub fn validate(&self) -> Result<(), String> {
        if self.indices.len() % 3 != 0 {
            return Err(format!(
                "Index count ({}) is not a multiple of 3",
                self.indices.len()
            ));
        }

        let vertex_count = self.vertices.len() as u32;
        if let Some((pos, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|&(_, &index)| index >= vertex_count)
        {
            return Err(format!(
                "Index {} at position {} out of range (vertex count: {})",
                index, pos, vertex_count
            ));
        }

        let triangle_count = self.triangle_count() as u32;
        for subset in &self.subsets {
            if subset.face_start + subset.face_count > triangle_count {
                return Err(format!(
                    "Subset '{}' exceeds triangle count ({} + {} > {})",
                    subset.name, subset.face_start, subset.face_count, triangle_count
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::Color;

    fn triangle() -> MeshData {
        let white = Color::new(1.0, 1.0, 1.0, 1.0);
        let mut mesh = MeshData::with_name("Triangle");
        mesh.vertices = vec![
            Vertex::new([0.0, 0.0, 0.0], white),
            Vertex::new([1.0, 0.0, 0.0], white),
            Vertex::new([0.0, 1.0, 0.0], white),
        ];
        mesh.indices = vec![0, 1, 2];
        mesh.subsets = vec![Subset::new("all", 0, 1)];
        mesh
    }

    #[test]
    fn test_valid_mesh() {
        let mesh = triangle();
        assert!(mesh.validate().is_ok());
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.subsets[0].index_count(), 3);
    }

    #[test]
    fn test_index_out_of_range() {
        let mut mesh = triangle();
        mesh.indices[2] = 3;
        let err = mesh.validate().unwrap_err();
        assert!(err.contains("out of range"));
    }

    #[test]
    fn test_partial_triangle() {
        let mut mesh = triangle();
        mesh.indices.push(0);
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn test_subset_out_of_bounds() {
        let mut mesh = triangle();
        mesh.subsets.push(Subset::new("extra", 1, 1));
        let err = mesh.validate().unwrap_err();
        assert!(err.contains("extra"));
    }
}
