//! 树模型示例
//!
//! 初始化时创建管线、常量缓冲、顶点缓冲和索引缓冲；
//! 每帧根据时间计算世界-观察-投影矩阵，清屏后发出一次索引绘制。

use bytemuck::{Pod, Zeroable};
use tracing::{debug, info};

use super::surface::{adjusted_projection_matrix, surface_pretransform_matrix};
use super::{FrameContext, Sample, SampleInitInfo};
use crate::core::error::{Result, SampleError};
use crate::core::math::{constants::PI, matrix, Color, Matrix4, Vector3};
use crate::geometry::tree::tree_mesh;
use crate::gfx::wgpu::{
    create_shader, draw_indexed, DrawIndexedAttribs, DynamicUniformBuffer, GraphicsPipelineDesc,
    ImmutableBuffer, LayoutElement, PipelineState, ShaderCreateInfo, ShaderMacro,
    ShaderResourceBinding, ShaderType, ValueType,
};
use crate::gfx::SwapChainDesc;

const VS_FILE: &str = "tree_vs.wgsl";
const PS_FILE: &str = "tree_ps.wgsl";
const ENTRY_POINT: &str = "main";

/// 像素着色器的 gamma 开关
pub const GAMMA_MACRO: &str = "CONVERT_PS_OUTPUT_TO_GAMMA";

const CLEAR_COLOR: Color = Color::new(0.35, 0.35, 0.35, 1.0);

const FOV: f32 = PI / 4.0;
const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 100.0;

/// 顶点着色器常量，对应 WGSL 中的 `VSConstants`
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct VsConstants {
    pub world_view_proj: [[f32; 4]; 4],
}

impl From<&Matrix4> for VsConstants {
    fn from(m: &Matrix4) -> Self {
        // nalgebra 按列存储，与 WGSL 的 mat4x4 布局一致
        Self {
            world_view_proj: *m.as_ref(),
        }
    }
}

/// 初始化后持有的 GPU 资源
struct TreeResources {
    pso: PipelineState,
    srb: ShaderResourceBinding,
    vs_constants: DynamicUniformBuffer<VsConstants>,
    vertex_buffer: ImmutableBuffer,
    index_buffer: ImmutableBuffer,
}

pub struct TreeSample {
    swap_chain: SwapChainDesc,
    convert_ps_output_to_gamma: bool,
    world_view_proj: Matrix4,
    resources: Option<TreeResources>,
}

impl TreeSample {
    pub fn new() -> Self {
        Self {
            swap_chain: SwapChainDesc::default(),
            convert_ps_output_to_gamma: false,
            world_view_proj: Matrix4::identity(),
            resources: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.resources.is_some()
    }

    /// 最近一次 `update` 计算出的矩阵
    pub fn world_view_proj(&self) -> &Matrix4 {
        &self.world_view_proj
    }

    /// 资源只创建一次，重复初始化返回错误
    fn ensure_uninitialized(&self) -> Result<()> {
        if self.is_initialized() {
            return Err(SampleError::Initialization(format!(
                "{} is already initialized",
                self.name()
            )));
        }
        Ok(())
    }

    fn resources(&self) -> Result<&TreeResources> {
        self.resources
            .as_ref()
            .ok_or_else(|| SampleError::Runtime(format!("{} rendered before initialize", self.name())))
    }

    fn create_pipeline(
        &self,
        init: &SampleInitInfo<'_>,
        vs_constants: &DynamicUniformBuffer<VsConstants>,
    ) -> Result<(PipelineState, ShaderResourceBinding)> {
        let macros = shader_macros(init.convert_ps_output_to_gamma);

        let vs = create_shader(
            init.device,
            init.shader_factory,
            &ShaderCreateInfo {
                name: "Tree VS",
                file_path: VS_FILE,
                entry_point: ENTRY_POINT,
                shader_type: ShaderType::Vertex,
                macros: &macros,
            },
        )?;
        let ps = create_shader(
            init.device,
            init.shader_factory,
            &ShaderCreateInfo {
                name: "Tree PS",
                file_path: PS_FILE,
                entry_point: ENTRY_POINT,
                shader_type: ShaderType::Pixel,
                macros: &macros,
            },
        )?;

        let desc = tree_pipeline_desc(&init.swap_chain);
        let pso = PipelineState::new(init.device, &desc, &vs, &ps)?;
        let srb = pso.create_shader_resource_binding(init.device, vs_constants.buffer());
        Ok((pso, srb))
    }
}

impl Default for TreeSample {
    fn default() -> Self {
        Self::new()
    }
}

impl Sample for TreeSample {
    fn name(&self) -> &str {
        "Tree Sample"
    }

    fn initialize(&mut self, init: &SampleInitInfo<'_>) -> Result<()> {
        self.ensure_uninitialized()?;

        self.swap_chain = init.swap_chain;
        self.convert_ps_output_to_gamma = init.convert_ps_output_to_gamma;

        let vs_constants = DynamicUniformBuffer::new(init.device, "VS constants CB");
        let (pso, srb) = self.create_pipeline(init, &vs_constants)?;

        let mesh = tree_mesh();
        let mesh_name = mesh.name.as_deref().unwrap_or("unnamed");
        mesh.validate()
            .map_err(|e| SampleError::Initialization(format!("Mesh '{}': {}", mesh_name, e)))?;

        let vertex_buffer = ImmutableBuffer::new(
            init.device,
            "Tree vertex buffer",
            wgpu::BufferUsages::VERTEX,
            &mesh.vertices,
        )?;
        let index_buffer = ImmutableBuffer::new(
            init.device,
            "Tree index buffer",
            wgpu::BufferUsages::INDEX,
            &mesh.indices,
        )?;

        info!(
            mesh = mesh_name,
            pso = pso.name(),
            vertices = mesh.vertex_count(),
            indices = mesh.index_count(),
            manual_gamma = self.convert_ps_output_to_gamma,
            "Tree sample initialized"
        );

        self.resources = Some(TreeResources {
            pso,
            srb,
            vs_constants,
            vertex_buffer,
            index_buffer,
        });
        Ok(())
    }

    fn update(&mut self, current_time: f64, _elapsed_time: f64) {
        self.world_view_proj = world_view_proj(current_time as f32, &self.swap_chain);
    }

    fn render(&mut self, frame: &mut FrameContext<'_>) -> Result<()> {
        let res = self.resources()?;

        let clear = clear_color(self.convert_ps_output_to_gamma);

        // 整体覆盖，不读取上一帧内容
        res.vs_constants
            .write_discard(frame.queue, &VsConstants::from(&self.world_view_proj));

        let mut pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Tree Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: frame.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: clear.r as f64,
                        g: clear.g as f64,
                        b: clear.b as f64,
                        a: clear.a as f64,
                    }),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: frame.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        pass.set_pipeline(res.pso.raw());
        res.srb.commit(&mut pass);
        pass.set_vertex_buffer(0, res.vertex_buffer.slice());

        let attribs = tree_draw_attribs(res.index_buffer.element_count());
        draw_indexed(&mut pass, &attribs, &res.index_buffer)?;

        debug!(triangles = attribs.triangle_count(), "Tree drawn");
        Ok(())
    }

    fn window_resize(&mut self, width: u32, height: u32) {
        self.swap_chain.width = width;
        self.swap_chain.height = height;
    }
}

/// 树模型的管线描述
pub fn tree_pipeline_desc(swap_chain: &SwapChainDesc) -> GraphicsPipelineDesc {
    GraphicsPipelineDesc {
        name: "Tree PSO".to_string(),
        rtv_format: swap_chain.color_format,
        dsv_format: swap_chain.depth_format,
        topology: wgpu::PrimitiveTopology::TriangleList,
        cull_mode: Some(wgpu::Face::Back),
        front_face: wgpu::FrontFace::Cw,
        depth_enable: true,
        input_layout: vec![
            // 位置
            LayoutElement::new(0, 0, 3, ValueType::Float32),
            // 颜色
            LayoutElement::new(1, 0, 4, ValueType::Float32),
        ],
    }
}

/// 绘制全部索引，提交前校验索引缓冲
pub fn tree_draw_attribs(num_indices: u32) -> DrawIndexedAttribs {
    DrawIndexedAttribs {
        num_indices,
        index_type: wgpu::IndexFormat::Uint32,
        verify: true,
    }
}

pub fn shader_macros(convert_ps_output_to_gamma: bool) -> Vec<ShaderMacro> {
    let value = if convert_ps_output_to_gamma { "1" } else { "0" };
    vec![ShaderMacro::new(GAMMA_MACRO, value)]
}

/// 模型矩阵：绕 Y 轴旋转 `0.5 * t`，再绕 X 轴固定倾斜
pub fn model_transform(current_time: f32) -> Matrix4 {
    matrix::rotation_x(-PI * 0.1) * matrix::rotation_y(current_time * 0.5)
}

pub fn world_view_proj(current_time: f32, swap_chain: &SwapChainDesc) -> Matrix4 {
    let view = matrix::translation(0.0, 0.25, 5.0);
    let pretransform = surface_pretransform_matrix(swap_chain.pre_transform, &Vector3::new(0.0, 0.0, 1.0));
    let proj = adjusted_projection_matrix(swap_chain, FOV, NEAR_PLANE, FAR_PLANE);

    proj * pretransform * view * model_transform(current_time)
}

pub fn clear_color(convert_ps_output_to_gamma: bool) -> Color {
    if convert_ps_output_to_gamma {
        CLEAR_COLOR.linear_to_srgb()
    } else {
        CLEAR_COLOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GraphicsConfig;
    use crate::core::math::constants::EPSILON;
    use crate::core::SurfaceTransform;
    use crate::geometry::tree::{INDEX_COUNT, VERTEX_COUNT};
    use crate::gfx::wgpu::ShaderSourceFactory;

    #[test]
    fn test_wvp_at_time_zero() {
        let desc = SwapChainDesc::default();
        let expected = adjusted_projection_matrix(&desc, FOV, NEAR_PLANE, FAR_PLANE)
            * matrix::translation(0.0, 0.25, 5.0)
            * matrix::rotation_x(-PI * 0.1);

        assert!(matrix::approx_eq(&world_view_proj(0.0, &desc), &expected, EPSILON));
    }

    #[test]
    fn test_update_ignores_elapsed_time() {
        let mut a = TreeSample::new();
        let mut b = TreeSample::new();
        a.update(3.0, 0.016);
        b.update(3.0, 1.5);
        assert_eq!(a.world_view_proj(), b.world_view_proj());
    }

    #[test]
    fn test_rotation_speed() {
        // t = 4π 时转过 2π，回到初始姿态
        let m = model_transform(4.0 * PI);
        assert!(matrix::approx_eq(&m, &model_transform(0.0), 1e-4));

        let half = model_transform(2.0 * PI);
        assert!(!matrix::approx_eq(&half, &model_transform(0.0), 1e-4));
    }

    #[test]
    fn test_pretransform_enters_wvp() {
        let identity = SwapChainDesc::default();
        let rotated = SwapChainDesc {
            pre_transform: SurfaceTransform::Rotate180,
            ..identity
        };
        assert!(!matrix::approx_eq(
            &world_view_proj(1.0, &identity),
            &world_view_proj(1.0, &rotated),
            EPSILON
        ));
    }

    #[test]
    fn test_clear_color_gamma() {
        assert_eq!(clear_color(false), Color::new(0.35, 0.35, 0.35, 1.0));

        let converted = clear_color(true);
        assert!(converted.r > 0.35);
        assert!((converted.r - converted.g).abs() < EPSILON);
        assert_eq!(converted.a, 1.0);
    }

    #[test]
    fn test_shader_macros() {
        let on = shader_macros(true);
        assert_eq!(on, vec![ShaderMacro::new(GAMMA_MACRO, "1")]);
        let off = shader_macros(false);
        assert_eq!(off[0].definition, "0");
    }

    #[test]
    fn test_pipeline_desc() {
        let desc = tree_pipeline_desc(&SwapChainDesc::default());
        assert_eq!(desc.name, "Tree PSO");
        assert_eq!(desc.rtv_format, wgpu::TextureFormat::Bgra8UnormSrgb);
        assert_eq!(desc.dsv_format, wgpu::TextureFormat::Depth32Float);
        assert_eq!(desc.topology, wgpu::PrimitiveTopology::TriangleList);
        assert_eq!(desc.cull_mode, Some(wgpu::Face::Back));
        assert_eq!(desc.front_face, wgpu::FrontFace::Cw);
        assert!(desc.depth_enable);
        assert_eq!(desc.input_layout.len(), 2);
        assert_eq!(desc.input_layout[1].num_components, 4);
    }

    #[test]
    fn test_constants_layout() {
        assert_eq!(std::mem::size_of::<VsConstants>(), 64);

        let m = matrix::translation(1.0, 2.0, 3.0);
        let c = VsConstants::from(&m);
        // 第四列是平移
        assert_eq!(c.world_view_proj[3], [1.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn test_resize_updates_swap_chain() {
        let mut sample = TreeSample::new();
        assert!(!sample.is_initialized());

        sample.window_resize(1024, 256);
        sample.update(0.0, 0.0);
        let proj = adjusted_projection_matrix(&sample.swap_chain, FOV, NEAR_PLANE, FAR_PLANE);
        assert!((proj[(1, 1)] / proj[(0, 0)] - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_guards_before_initialize() {
        let sample = TreeSample::new();
        assert!(sample.ensure_uninitialized().is_ok());
        assert!(matches!(sample.resources(), Err(SampleError::Runtime(_))));
    }

    #[test]
    fn test_draw_attribs() {
        let attribs = tree_draw_attribs(INDEX_COUNT as u32);
        assert_eq!(attribs.triangle_count(), 48);
        assert_eq!(attribs.index_type, wgpu::IndexFormat::Uint32);
        assert!(attribs.verify);
        assert!(attribs.verify_against(INDEX_COUNT as u32, 4).is_ok());
    }

    /// 无窗口的设备，没有可用适配器时返回 `None`
    fn headless_device() -> Option<(wgpu::Device, wgpu::Queue)> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: None,
            force_fallback_adapter: false,
        }))?;
        pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor::default(), None)).ok()
    }

    fn render_target(device: &wgpu::Device, format: wgpu::TextureFormat) -> wgpu::TextureView {
        device
            .create_texture(&wgpu::TextureDescriptor {
                label: Some("Test Target"),
                size: wgpu::Extent3d {
                    width: 64,
                    height: 64,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            })
            .create_view(&wgpu::TextureViewDescriptor::default())
    }

    #[test]
    fn test_lifecycle_on_headless_device() {
        let Some((device, queue)) = headless_device() else {
            eprintln!("no wgpu adapter available, skipping");
            return;
        };

        let factory = ShaderSourceFactory::from_config(&GraphicsConfig::default());
        let swap_chain = SwapChainDesc::default();
        let init = SampleInitInfo {
            device: &device,
            queue: &queue,
            swap_chain,
            shader_factory: &factory,
            convert_ps_output_to_gamma: swap_chain.requires_manual_gamma(),
        };

        let color_view = render_target(&device, swap_chain.color_format);
        let depth_view = render_target(&device, swap_chain.depth_format);
        let mut sample = TreeSample::new();

        // 初始化之前渲染
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });
        let result = sample.render(&mut FrameContext {
            device: &device,
            queue: &queue,
            encoder: &mut encoder,
            color_view: &color_view,
            depth_view: &depth_view,
        });
        assert!(matches!(result, Err(SampleError::Runtime(_))));

        sample.initialize(&init).unwrap();
        assert!(sample.is_initialized());
        let res = sample.resources().unwrap();
        assert_eq!(res.index_buffer.element_count(), INDEX_COUNT as u32);
        assert_eq!(res.vertex_buffer.element_count(), VERTEX_COUNT as u32);
        assert_eq!(res.pso.name(), "Tree PSO");

        let second = sample.initialize(&init);
        assert!(matches!(second, Err(SampleError::Initialization(_))));

        sample.update(1.0, 0.016);
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });
        sample
            .render(&mut FrameContext {
                device: &device,
                queue: &queue,
                encoder: &mut encoder,
                color_view: &color_view,
                depth_view: &depth_view,
            })
            .unwrap();
        queue.submit(std::iter::once(encoder.finish()));
    }
}
