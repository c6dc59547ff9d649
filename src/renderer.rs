//! GPU rendering of the painted cube.
//!
//! The scene arrives as a triangle list that is already in paint order, so the
//! pipeline has no depth buffer and no culling: later triangles simply cover
//! earlier ones.

use iced::widget::shader::wgpu::{self, CommandEncoder, Device, Queue, TextureFormat, TextureView};
use iced::Rectangle;
use log::trace;
use wgpu::util::DeviceExt;

use crate::camera::Viewport;
use crate::paint::Vertex;

/// Vertices the buffer starts out with: a background quad plus 26 cubies of
/// 12 edges and 6 faces, two triangles each.
const INITIAL_VERTEX_CAPACITY: usize = 6 + 26 * (12 + 6) * 6;

/// Viewport size in logical pixels, used to map vertices to clip space.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ViewportUniform {
    size: [f32; 2],
    /// Padding for uniform alignment
    _padding: [f32; 2],
}

impl ViewportUniform {
    pub(crate) fn new(viewport: &Viewport) -> Self {
        Self {
            size: [viewport.width, viewport.height],
            _padding: [0.0; 2],
        }
    }
}

/// GPU renderer for the cube viewport.
#[derive(Debug)]
pub(crate) struct Renderer {
    /// Widget bounds in physical pixels
    bounds: Rectangle<f32>,
    /// Pipeline drawing colored screen-space triangles
    render_pipeline: wgpu::RenderPipeline,
    /// Buffer holding the painted triangle list
    vertex_buffer: wgpu::Buffer,
    /// Number of vertices the buffer can hold
    vertex_capacity: usize,
    /// Number of vertices written for the current frame
    num_vertices: u32,
    /// GPU buffer containing the viewport size
    viewport_buffer: wgpu::Buffer,
    /// Bind group for the viewport uniform
    viewport_bind_group: wgpu::BindGroup,
}

impl Renderer {
    /// Creates the pipeline and buffers for the given target format.
    pub(crate) async fn new(device: &Device, format: TextureFormat) -> Self {
        let viewport_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Viewport Buffer"),
            contents: bytemuck::cast_slice(&[ViewportUniform::new(&Viewport::new(1.0, 1.0))]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let viewport_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
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
                label: Some("Viewport Bind Group Layout"),
            });

        let viewport_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &viewport_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_buffer.as_entire_binding(),
            }],
            label: Some("Viewport Bind Group"),
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Render Pipeline Layout"),
                bind_group_layouts: &[&viewport_bind_group_layout],
                push_constant_ranges: &[],
            });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Render Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        let vertex_buffer = create_vertex_buffer(device, INITIAL_VERTEX_CAPACITY);

        Self {
            bounds: Rectangle::default(),
            render_pipeline,
            vertex_buffer,
            vertex_capacity: INITIAL_VERTEX_CAPACITY,
            num_vertices: 0,
            viewport_buffer,
            viewport_bind_group,
        }
    }

    /// Tracks the widget bounds, converting them to physical pixels.
    pub(crate) fn resize(&mut self, bounds: Rectangle, scale_factor: f32) {
        self.bounds = bounds * scale_factor;
    }

    pub(crate) fn update_viewport(&mut self, queue: &Queue, viewport: &Viewport) {
        queue.write_buffer(
            &self.viewport_buffer,
            0,
            bytemuck::cast_slice(&[ViewportUniform::new(viewport)]),
        );
    }

    /// Uploads this frame's triangles, growing the buffer when needed.
    pub(crate) fn update_vertices(&mut self, device: &Device, queue: &Queue, vertices: &[Vertex]) {
        if vertices.len() > self.vertex_capacity {
            let capacity = vertices.len().next_power_of_two();
            trace!("Growing vertex buffer to {capacity} vertices");
            self.vertex_buffer = create_vertex_buffer(device, capacity);
            self.vertex_capacity = capacity;
        }
        queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(vertices));
        self.num_vertices = vertices.len() as u32;
    }

    /// Draws the uploaded triangles into the widget bounds.
    pub(crate) fn render(
        &self,
        encoder: &mut CommandEncoder,
        target: &TextureView,
        clip_bounds: &Rectangle<u32>,
    ) {
        if self.num_vertices == 0 || clip_bounds.width == 0 || clip_bounds.height == 0 {
            return;
        }

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load, // The rest of the UI is already drawn
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_viewport(
            self.bounds.x,
            self.bounds.y,
            self.bounds.width,
            self.bounds.height,
            0.0,
            1.0,
        );
        render_pass.set_scissor_rect(
            clip_bounds.x,
            clip_bounds.y,
            clip_bounds.width,
            clip_bounds.height,
        );
        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_bind_group(0, &self.viewport_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.draw(0..self.num_vertices, 0..1);
    }
}

fn create_vertex_buffer(device: &Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Vertex Buffer"),
        size: (capacity * std::mem::size_of::<Vertex>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
