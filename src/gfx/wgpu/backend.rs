//! wgpu 后端设备管理
//!
//! 本模块负责 wgpu 图形设备的初始化和管理，包括：
//! - 创建 wgpu 实例
//! - 创建窗口表面
//! - 选择和创建图形适配器
//! - 创建逻辑设备和命令队列
//! - 配置交换链（颜色表面 + 深度缓冲）

use std::sync::Arc;
use tracing::{info, debug, warn};
use winit::event_loop::EventLoop;
use winit::window::{Window, WindowBuilder};

use crate::gfx::{GraphicsBackend, SwapChainDesc};
use crate::core::config::{Config, GammaMode};
use crate::core::SurfaceTransform;
use crate::core::error::{Result, GraphicsError};

/// 深度缓冲格式
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// wgpu 图形后端
///
/// 封装了 wgpu 的核心设备和表面管理，同时承担交换链的职责。
pub struct WgpuBackend {
    /// wgpu 实例（入口点）
    pub instance: wgpu::Instance,
    /// 窗口表面
    pub surface: wgpu::Surface<'static>,
    /// 图形适配器（GPU）
    pub adapter: wgpu::Adapter,
    /// 逻辑设备
    pub device: wgpu::Device,
    /// 命令队列
    pub queue: wgpu::Queue,
    /// 表面配置
    pub surface_config: wgpu::SurfaceConfiguration,
    depth_texture: wgpu::Texture,
    depth_view: wgpu::TextureView,
    pre_transform: SurfaceTransform,
    window: Arc<Window>,
}

impl WgpuBackend {
    /// 创建 wgpu 后端实例
    ///
    /// # 参数
    ///
    /// * `event_loop` - winit 事件循环引用
    /// * `config` - 示例配置
    pub fn new(event_loop: &EventLoop<()>, config: &Config) -> Result<Self> {
        info!("Initializing wgpu backend");

        // 1. 创建 wgpu 实例
        debug!("Creating wgpu instance");
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            dx12_shader_compiler: Default::default(),
            flags: wgpu::InstanceFlags::default(),
            gles_minor_version: wgpu::Gles3MinorVersion::Automatic,
        });

        // 2. 创建窗口
        debug!("Creating window");
        let window = WindowBuilder::new()
            .with_title(config.window.title.as_str())
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.window.width,
                config.window.height,
            ))
            .with_resizable(config.window.resizable)
            .build(event_loop)
            .map_err(|e| GraphicsError::DeviceCreation(format!("Failed to create window: {}", e)))?;

        let window = Arc::new(window);

        // 3. 创建表面
        debug!("Creating surface");
        let surface = instance.create_surface(window.clone())
            .map_err(|e| GraphicsError::DeviceCreation(format!("Failed to create surface: {}", e)))?;

        // 4. 请求适配器
        debug!("Requesting adapter");
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| GraphicsError::DeviceCreation("Failed to find suitable adapter".to_string()))?;

        info!("Selected adapter: {:?}", adapter.get_info());

        // 5. 请求设备和队列
        debug!("Requesting device and queue");
        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Main Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
            },
            None,
        ))
        .map_err(|e| GraphicsError::DeviceCreation(format!("Failed to create device: {}", e)))?;

        // 6. 配置表面
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = select_surface_format(&surface_caps.formats, config.graphics.gamma)
            .ok_or_else(|| GraphicsError::SwapchainError("Surface reports no supported formats".to_string()))?;

        if config.graphics.gamma == GammaMode::Manual && surface_format.is_srgb() {
            warn!(?surface_format, "No linear surface format available, falling back to hardware gamma");
        }
        debug!("Surface format: {:?}", surface_format);

        let present_mode = if config.graphics.vsync {
            wgpu::PresentMode::Fifo
        } else {
            wgpu::PresentMode::AutoNoVsync
        };

        let size = window.inner_size();
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &surface_config);

        let (depth_texture, depth_view) =
            create_depth_target(&device, surface_config.width, surface_config.height);

        if config.graphics.pre_transform != SurfaceTransform::Identity {
            info!(pre_transform = ?config.graphics.pre_transform, "Emulating rotated surface");
        }

        info!("wgpu backend initialized successfully");

        Ok(Self {
            instance,
            surface,
            adapter,
            device,
            queue,
            surface_config,
            depth_texture,
            depth_view,
            pre_transform: config.graphics.pre_transform,
            window,
        })
    }

    /// 获取窗口引用
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// 当前帧的深度缓冲视图
    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth_view
    }

    /// 获取下一帧的后台缓冲
    pub fn acquire_back_buffer(&self) -> std::result::Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }

    /// 窗口尺寸变化时重建交换链
    ///
    /// 尺寸为 0（例如窗口最小化）时不做任何事并返回 `false`。
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }

        debug!("Resizing to {}x{}", width, height);
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.reconfigure();
        true
    }

    /// 以当前配置重新配置表面（用于表面丢失或过期）
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.surface_config);

        let (texture, view) =
            create_depth_target(&self.device, self.surface_config.width, self.surface_config.height);
        self.depth_texture = texture;
        self.depth_view = view;
    }
}

impl GraphicsBackend for WgpuBackend {
    fn window(&self) -> &Window {
        self.window()
    }

    fn backend_name(&self) -> &str {
        "wgpu"
    }

    fn swap_chain_desc(&self) -> SwapChainDesc {
        SwapChainDesc {
            width: self.surface_config.width,
            height: self.surface_config.height,
            color_format: self.surface_config.format,
            depth_format: self.depth_texture.format(),
            pre_transform: self.pre_transform,
        }
    }
}

/// 根据 gamma 模式选择表面格式
///
/// `Auto` 优先 sRGB 格式，`Manual` 优先线性格式；都没有时使用第一个格式。
pub fn select_surface_format(
    formats: &[wgpu::TextureFormat],
    gamma: GammaMode,
) -> Option<wgpu::TextureFormat> {
    let first = *formats.first()?;
    let preferred = match gamma {
        GammaMode::Auto => formats.iter().copied().find(|f| f.is_srgb()),
        GammaMode::Manual => formats.iter().copied().find(|f| !f.is_srgb()),
    };
    Some(preferred.unwrap_or(first))
}

fn create_depth_target(
    device: &wgpu::Device,
    width: u32,
    height: u32,
) -> (wgpu::Texture, wgpu::TextureView) {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    (texture, view)
}
