//! 应用程序主循环
//!
//! 创建窗口和 wgpu 后端，初始化示例，然后在 winit 事件循环中
//! 逐帧调用 `update` 和 `render`。

use tracing::{debug, error, info, warn};
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};

use crate::core::error::{GraphicsError, Result, SampleError};
use crate::core::{Config, FrameTimer};
use crate::gfx::wgpu::ShaderSourceFactory;
use crate::gfx::{GraphicsBackend, WgpuBackend};
use crate::sample::{FrameContext, Sample, SampleInitInfo};

/// 运行示例直到窗口关闭
///
/// 初始化失败直接返回错误；帧循环中除表面丢失以外的错误会结束循环并返回。
pub fn run<S: Sample>(config: &Config, mut sample: S) -> Result<()> {
    let event_loop = EventLoop::new()
        .map_err(|e| SampleError::Initialization(format!("Failed to create event loop: {}", e)))?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut backend = WgpuBackend::new(&event_loop, config)?;

    let shader_factory = ShaderSourceFactory::from_config(&config.graphics);
    debug!(dirs = ?shader_factory.search_dirs(), "Shader search directories");

    {
        let swap_chain = backend.swap_chain_desc();
        let init = SampleInitInfo {
            device: &backend.device,
            queue: &backend.queue,
            swap_chain,
            shader_factory: &shader_factory,
            convert_ps_output_to_gamma: swap_chain.requires_manual_gamma(),
        };
        sample.initialize(&init)?;
    }

    info!(
        sample = sample.name(),
        backend = backend.backend_name(),
        "Entering main loop..."
    );

    let mut timer = FrameTimer::new();
    let mut failure: Option<SampleError> = None;

    event_loop
        .run(|event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("Close requested, shutting down...");
                    elwt.exit();
                }
                WindowEvent::Resized(size) => {
                    debug!(width = size.width, height = size.height, "Window resized");
                    if backend.resize(size.width, size.height) {
                        sample.window_resize(size.width, size.height);
                    }
                }
                WindowEvent::RedrawRequested => {
                    let time = timer.tick();
                    if let Some(fps) = time.fps {
                        debug!(fps, "Frame rate");
                    }

                    sample.update(time.current, time.elapsed);

                    if let Err(e) = render_frame(&mut backend, &mut sample) {
                        error!("Frame failed: {}", e);
                        failure = Some(e);
                        elwt.exit();
                    }
                }
                _ => (),
            },
            Event::AboutToWait => backend.window().request_redraw(),
            _ => (),
        })
        .map_err(|e| SampleError::Runtime(format!("Event loop error: {}", e)))?;

    match failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// 获取后台缓冲、录制并提交一帧
///
/// 表面丢失或过期时重新配置并跳过本帧。
fn render_frame<S: Sample>(backend: &mut WgpuBackend, sample: &mut S) -> Result<()> {
    let frame = match backend.acquire_back_buffer() {
        Ok(frame) => frame,
        Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
            warn!("Surface lost or outdated, reconfiguring");
            backend.reconfigure();
            return Ok(());
        }
        Err(wgpu::SurfaceError::Timeout) => {
            warn!("Surface acquire timed out, skipping frame");
            return Ok(());
        }
        Err(e) => {
            return Err(GraphicsError::SwapchainError(format!("Failed to acquire back buffer: {}", e)).into())
        }
    };

    let color_view = frame
        .texture
        .create_view(&wgpu::TextureViewDescriptor::default());
    let mut encoder = backend
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Frame Encoder"),
        });

    {
        let mut ctx = FrameContext {
            device: &backend.device,
            queue: &backend.queue,
            encoder: &mut encoder,
            color_view: &color_view,
            depth_view: backend.depth_view(),
        };
        sample.render(&mut ctx)?;
    }

    backend.queue.submit(std::iter::once(encoder.finish()));
    frame.present();
    Ok(())
}
