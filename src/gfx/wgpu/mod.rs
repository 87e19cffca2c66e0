//! wgpu 图形后端实现
//!
//! wgpu 是一个跨平台的图形 API，可以在 Vulkan、Metal、DirectX 12、OpenGL 等后端上运行。
//!
//! # 模块结构
//!
//! - `backend` - 设备、表面和深度缓冲（交换链）
//! - `shader` - 着色器源文件加载与宏注入
//! - `pipeline` - 管线状态对象与资源绑定
//! - `buffer` - 不可变缓冲与动态常量缓冲
//! - `draw` - 索引绘制及参数校验

mod backend;
mod validation;
pub mod shader;
pub mod pipeline;
pub mod buffer;
pub mod draw;

pub use backend::{select_surface_format, WgpuBackend, DEPTH_FORMAT};
pub use shader::{create_shader, ShaderSourceFactory, ShaderMacro, ShaderCreateInfo, ShaderType, Shader};
pub use pipeline::{GraphicsPipelineDesc, LayoutElement, ValueType, PipelineState, ShaderResourceBinding};
pub use buffer::{ImmutableBuffer, DynamicUniformBuffer};
pub use draw::{DrawIndexedAttribs, draw_indexed};
