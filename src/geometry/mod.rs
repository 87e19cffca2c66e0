//! 几何数据模块
//!
//! - `vertex`: 顶点结构定义
//! - `mesh`: 网格数据和子网格结构
//! - `tree`: 手工编写的树模型顶点/索引表
//!
//! ```text
//! 顶点/索引表 (tree)
//!     ↓
//! MeshData (CPU侧数据，校验)
//!     ↓
//! 不可变 GPU 缓冲区
//! ```

pub mod vertex;
pub mod mesh;
pub mod tree;

pub use vertex::Vertex;
pub use mesh::{MeshData, Subset};
