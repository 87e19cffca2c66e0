//! 示例生命周期
//!
//! 每个示例实现 `Sample` trait，由 `app::run` 驱动：
//!
//! ```text
//! Uninitialized --initialize--> Initialized --(update -> render)*-->
//! ```
//!
//! `initialize` 只调用一次；之后每帧在同一线程上严格交替调用 `update` 和 `render`。

pub mod surface;
pub mod tree;

pub use tree::TreeSample;

use crate::core::error::Result;
use crate::gfx::wgpu::ShaderSourceFactory;
use crate::gfx::SwapChainDesc;

/// 初始化参数
pub struct SampleInitInfo<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub swap_chain: SwapChainDesc,
    pub shader_factory: &'a ShaderSourceFactory,
    /// 交换链不做 gamma 转换时，像素着色器需要手动转换
    pub convert_ps_output_to_gamma: bool,
}

/// 单帧渲染上下文
pub struct FrameContext<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub encoder: &'a mut wgpu::CommandEncoder,
    /// 当前后台缓冲
    pub color_view: &'a wgpu::TextureView,
    pub depth_view: &'a wgpu::TextureView,
}

/// 可渲染的帧源
pub trait Sample {
    fn name(&self) -> &str;

    /// 创建所有 GPU 资源，失败即启动失败
    fn initialize(&mut self, init: &SampleInitInfo<'_>) -> Result<()>;

    /// 根据时间更新每帧状态，`current_time` 和 `elapsed_time` 的单位都是秒
    fn update(&mut self, current_time: f64, elapsed_time: f64);

    /// 把一帧的绘制命令记录到 `frame.encoder`
    fn render(&mut self, frame: &mut FrameContext<'_>) -> Result<()>;

    /// 交换链尺寸变化
    fn window_resize(&mut self, _width: u32, _height: u32) {}
}
