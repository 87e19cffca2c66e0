//! 管线状态对象
//!
//! 先用与设备无关的 `GraphicsPipelineDesc` 描述管线，再由 `PipelineState::new`
//! 创建 wgpu 渲染管线。描述本身可以在没有 GPU 的情况下构造和检查。

use tracing::debug;

use super::shader::Shader;
use super::validation::capture_validation;
use crate::core::error::{GraphicsError, Result};

/// 顶点属性的分量类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Float32,
}

impl ValueType {
    fn size(&self) -> u64 {
        match self {
            ValueType::Float32 => 4,
        }
    }
}

/// 输入布局中的一个属性
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutElement {
    /// 着色器中的 `@location`
    pub input_index: u32,
    /// 顶点缓冲槽位
    pub buffer_slot: u32,
    /// 分量数（1-4）
    pub num_components: u32,
    pub value_type: ValueType,
}

impl LayoutElement {
    pub const fn new(input_index: u32, buffer_slot: u32, num_components: u32, value_type: ValueType) -> Self {
        Self {
            input_index,
            buffer_slot,
            num_components,
            value_type,
        }
    }

    /// 属性占用的字节数
    pub fn size(&self) -> u64 {
        self.value_type.size() * self.num_components as u64
    }

    fn vertex_format(&self) -> Result<wgpu::VertexFormat> {
        let format = match (self.value_type, self.num_components) {
            (ValueType::Float32, 1) => wgpu::VertexFormat::Float32,
            (ValueType::Float32, 2) => wgpu::VertexFormat::Float32x2,
            (ValueType::Float32, 3) => wgpu::VertexFormat::Float32x3,
            (ValueType::Float32, 4) => wgpu::VertexFormat::Float32x4,
            (ty, n) => {
                return Err(GraphicsError::ResourceCreation(format!(
                    "Unsupported layout element: {} x {:?} at location {}",
                    n, ty, self.input_index
                ))
                .into())
            }
        };
        Ok(format)
    }
}

/// 某个顶点缓冲槽位的布局
#[derive(Debug, Clone, PartialEq)]
pub struct VertexBufferLayoutDesc {
    pub stride: u64,
    pub attributes: Vec<wgpu::VertexAttribute>,
}

/// 按槽位计算属性偏移和步长，属性在槽位内紧密排列
pub fn vertex_buffer_layouts(elements: &[LayoutElement]) -> Result<Vec<VertexBufferLayoutDesc>> {
    let slot_count = elements
        .iter()
        .map(|e| e.buffer_slot as usize + 1)
        .max()
        .unwrap_or(0);

    let mut layouts = vec![
        VertexBufferLayoutDesc {
            stride: 0,
            attributes: Vec::new(),
        };
        slot_count
    ];

    for element in elements {
        let layout = &mut layouts[element.buffer_slot as usize];
        layout.attributes.push(wgpu::VertexAttribute {
            format: element.vertex_format()?,
            offset: layout.stride,
            shader_location: element.input_index,
        });
        layout.stride += element.size();
    }

    Ok(layouts)
}

/// 图形管线描述
#[derive(Debug, Clone)]
pub struct GraphicsPipelineDesc {
    pub name: String,
    /// 渲染目标格式
    pub rtv_format: wgpu::TextureFormat,
    /// 深度缓冲格式
    pub dsv_format: wgpu::TextureFormat,
    pub topology: wgpu::PrimitiveTopology,
    pub cull_mode: Option<wgpu::Face>,
    pub front_face: wgpu::FrontFace,
    pub depth_enable: bool,
    pub input_layout: Vec<LayoutElement>,
}

impl GraphicsPipelineDesc {
    fn depth_stencil_state(&self) -> wgpu::DepthStencilState {
        let (depth_write_enabled, depth_compare) = if self.depth_enable {
            (true, wgpu::CompareFunction::Less)
        } else {
            (false, wgpu::CompareFunction::Always)
        };

        wgpu::DepthStencilState {
            format: self.dsv_format,
            depth_write_enabled,
            depth_compare,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }
    }
}

/// 管线状态对象
///
/// 持有渲染管线以及顶点着色器常量缓冲（`Constants`，group 0 binding 0）的布局。
pub struct PipelineState {
    name: String,
    pipeline: wgpu::RenderPipeline,
    constants_layout: wgpu::BindGroupLayout,
}

impl PipelineState {
    pub fn new(
        device: &wgpu::Device,
        desc: &GraphicsPipelineDesc,
        vs: &Shader,
        ps: &Shader,
    ) -> Result<Self> {
        debug!(name = %desc.name, "Creating pipeline state");

        let constants_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("VS Constants Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(desc.name.as_str()),
            bind_group_layouts: &[&constants_layout],
            push_constant_ranges: &[],
        });

        let layouts = vertex_buffer_layouts(&desc.input_layout)?;
        let buffers: Vec<wgpu::VertexBufferLayout<'_>> = layouts
            .iter()
            .map(|l| wgpu::VertexBufferLayout {
                array_stride: l.stride,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &l.attributes,
            })
            .collect();

        let pipeline = capture_validation(
            device,
            |msg| GraphicsError::ResourceCreation(format!("Pipeline '{}': {}", desc.name, msg)),
            || {
                device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                    label: Some(desc.name.as_str()),
                    layout: Some(&pipeline_layout),
                    vertex: wgpu::VertexState {
                        module: &vs.module,
                        entry_point: &vs.entry_point,
                        buffers: &buffers,
                    },
                    fragment: Some(wgpu::FragmentState {
                        module: &ps.module,
                        entry_point: &ps.entry_point,
                        targets: &[Some(wgpu::ColorTargetState {
                            format: desc.rtv_format,
                            blend: Some(wgpu::BlendState::REPLACE),
                            write_mask: wgpu::ColorWrites::ALL,
                        })],
                    }),
                    primitive: wgpu::PrimitiveState {
                        topology: desc.topology,
                        strip_index_format: None,
                        front_face: desc.front_face,
                        cull_mode: desc.cull_mode,
                        polygon_mode: wgpu::PolygonMode::Fill,
                        unclipped_depth: false,
                        conservative: false,
                    },
                    depth_stencil: Some(desc.depth_stencil_state()),
                    multisample: wgpu::MultisampleState::default(),
                    multiview: None,
                })
            },
        )?;

        Ok(Self {
            name: desc.name.clone(),
            pipeline,
            constants_layout,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn raw(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    /// 创建资源绑定，把常量缓冲绑定到 `Constants`
    pub fn create_shader_resource_binding(
        &self,
        device: &wgpu::Device,
        constants: &wgpu::Buffer,
    ) -> ShaderResourceBinding {
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("VS Constants Binding"),
            layout: &self.constants_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: constants.as_entire_binding(),
            }],
        });
        ShaderResourceBinding { bind_group }
    }
}

/// 着色器资源绑定
pub struct ShaderResourceBinding {
    bind_group: wgpu::BindGroup,
}

impl ShaderResourceBinding {
    /// 将绑定提交到渲染通道
    pub fn commit<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>) {
        pass.set_bind_group(0, &self.bind_group, &[]);
    }
}
