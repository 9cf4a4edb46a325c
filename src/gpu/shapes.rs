//! Instanced discs and line segments.
//!
//! [`ShapeBatch`] is the frame's draw list: a [`DrawSurface`] that turns each
//! call into a GPU instance. [`ShapeRenderer`] uploads the instances and draws
//! them as quads (six vertices per instance, expanded in the vertex shader),
//! circles first and lines on top, matching the order the scene issues them.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::surface::{Color, DrawSurface};

/// One filled disc. Fields are ordered so the struct has no implicit padding.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct CircleInstance {
    pub color: [f32; 4],
    pub center: [f32; 2],
    pub radius: f32,
    pub _pad: f32,
}

/// One line segment.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct LineInstance {
    pub color: [f32; 4],
    pub from: [f32; 2],
    pub to: [f32; 2],
    pub width: f32,
    pub _pad: [f32; 3],
}

const CIRCLE_ATTRIBUTES: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x2, 2 => Float32];

const LINE_ATTRIBUTES: [wgpu::VertexAttribute; 4] =
    wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x2, 2 => Float32x2, 3 => Float32];

/// Smallest instance buffer ever allocated, in instances.
const MIN_CAPACITY: usize = 64;

/// Draw list for one frame.
#[derive(Debug, Default)]
pub struct ShapeBatch {
    pub circles: Vec<CircleInstance>,
    pub lines: Vec<LineInstance>,
}

impl ShapeBatch {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DrawSurface for ShapeBatch {
    fn clear(&mut self) {
        self.circles.clear();
        self.lines.clear();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if color.a <= 0.0 {
            return;
        }
        self.circles.push(CircleInstance {
            color: color.to_array(),
            center: center.to_array(),
            radius,
            _pad: 0.0,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        // Far links under a large threshold fade to zero; nothing to rasterize.
        if color.a <= 0.0 {
            return;
        }
        self.lines.push(LineInstance {
            color: color.to_array(),
            from: from.to_array(),
            to: to.to_array(),
            width,
            _pad: [0.0; 3],
        });
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct ViewportUniform {
    size: [f32; 2],
    _pad: [f32; 2],
}

/// A vertex buffer that grows to the next power of two when it runs out.
struct InstanceBuffer {
    label: &'static str,
    buffer: wgpu::Buffer,
    capacity: usize,
    stride: usize,
    len: u32,
}

impl InstanceBuffer {
    fn new(device: &wgpu::Device, label: &'static str, stride: usize) -> Self {
        Self {
            label,
            buffer: create_instance_buffer(device, label, MIN_CAPACITY * stride),
            capacity: MIN_CAPACITY,
            stride,
            len: 0,
        }
    }

    fn write<T: Pod>(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, items: &[T]) {
        if items.len() > self.capacity {
            let capacity = items.len().next_power_of_two().max(MIN_CAPACITY);
            log::debug!("Growing {} from {} to {} instances", self.label, self.capacity, capacity);
            self.buffer = create_instance_buffer(device, self.label, capacity * self.stride);
            self.capacity = capacity;
        }
        if !items.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(items));
        }
        self.len = items.len() as u32;
    }
}

fn create_instance_buffer(device: &wgpu::Device, label: &str, size: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: size as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// GPU resources for drawing a [`ShapeBatch`].
pub struct ShapeRenderer {
    circle_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    viewport_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    circles: InstanceBuffer,
    lines: InstanceBuffer,
}

impl ShapeRenderer {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let viewport_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Viewport Uniform Buffer"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Shape Bind Group Layout"),
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

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Shape Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_buffer.as_entire_binding(),
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shape Shader"),
            source: wgpu::ShaderSource::Wgsl(SHAPE_SHADER.into()),
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Shape Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let circle_pipeline = create_pipeline(
            device,
            &layout,
            &shader,
            surface_format,
            "Circle Pipeline",
            ("vs_circle", "fs_circle"),
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<CircleInstance>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &CIRCLE_ATTRIBUTES,
            },
        );

        let line_pipeline = create_pipeline(
            device,
            &layout,
            &shader,
            surface_format,
            "Line Pipeline",
            ("vs_line", "fs_line"),
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<LineInstance>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &LINE_ATTRIBUTES,
            },
        );

        Self {
            circle_pipeline,
            line_pipeline,
            viewport_buffer,
            bind_group,
            circles: InstanceBuffer::new(device, "Circle Instance Buffer", std::mem::size_of::<CircleInstance>()),
            lines: InstanceBuffer::new(device, "Line Instance Buffer", std::mem::size_of::<LineInstance>()),
        }
    }

    /// Upload the viewport and this frame's instances.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        batch: &ShapeBatch,
        viewport: [f32; 2],
    ) {
        let uniform = ViewportUniform {
            size: viewport,
            _pad: [0.0; 2],
        };
        queue.write_buffer(&self.viewport_buffer, 0, bytemuck::bytes_of(&uniform));
        self.circles.write(device, queue, &batch.circles);
        self.lines.write(device, queue, &batch.lines);
    }

    /// Record the draws for the last prepared batch.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_bind_group(0, &self.bind_group, &[]);

        if self.circles.len > 0 {
            pass.set_pipeline(&self.circle_pipeline);
            pass.set_vertex_buffer(0, self.circles.buffer.slice(..));
            pass.draw(0..6, 0..self.circles.len);
        }

        if self.lines.len > 0 {
            pass.set_pipeline(&self.line_pipeline);
            pass.set_vertex_buffer(0, self.lines.buffer.slice(..));
            pass.draw(0..6, 0..self.lines.len);
        }
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    surface_format: wgpu::TextureFormat,
    label: &str,
    (vs_entry, fs_entry): (&str, &str),
    instances: wgpu::VertexBufferLayout<'_>,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(vs_entry),
            buffers: &[instances],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(fs_entry),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
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
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

/// Pixel-space shapes. `viewport.size` maps pixels (origin top-left, y down)
/// to clip space. Coverage is a one-pixel ramp at the shape edge.
pub const SHAPE_SHADER: &str = r#"
struct Viewport {
    size: vec2<f32>,
    _pad: vec2<f32>,
};

@group(0) @binding(0) var<uniform> viewport: Viewport;

struct ShapeOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
    @location(1) shape_pos: vec2<f32>,
    @location(2) half_extent: f32,
};

fn quad_corner(index: u32) -> vec2<f32> {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, -1.0),
        vec2<f32>(-1.0, 1.0),
        vec2<f32>(-1.0, 1.0),
        vec2<f32>(1.0, -1.0),
        vec2<f32>(1.0, 1.0),
    );
    return corners[index];
}

fn pixel_to_clip(pixel: vec2<f32>) -> vec4<f32> {
    let ndc = pixel / viewport.size * 2.0 - vec2<f32>(1.0, 1.0);
    return vec4<f32>(ndc.x, -ndc.y, 0.0, 1.0);
}

@vertex
fn vs_circle(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) color: vec4<f32>,
    @location(1) circle_center: vec2<f32>,
    @location(2) radius: f32,
) -> ShapeOutput {
    let shape_pos = quad_corner(vertex_index) * (radius + 1.0);

    var out: ShapeOutput;
    out.clip_position = pixel_to_clip(circle_center + shape_pos);
    out.color = color;
    out.shape_pos = shape_pos;
    out.half_extent = radius;
    return out;
}

@fragment
fn fs_circle(in: ShapeOutput) -> @location(0) vec4<f32> {
    let coverage = clamp(in.half_extent - length(in.shape_pos) + 0.5, 0.0, 1.0);
    return vec4<f32>(in.color.rgb, in.color.a * coverage);
}

@vertex
fn vs_line(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) color: vec4<f32>,
    @location(1) point_a: vec2<f32>,
    @location(2) point_b: vec2<f32>,
    @location(3) line_width: f32,
) -> ShapeOutput {
    let delta = point_b - point_a;
    let len = length(delta);
    let dir = select(vec2<f32>(1.0, 0.0), delta / max(len, 0.0001), len > 0.0001);
    let normal = vec2<f32>(-dir.y, dir.x);
    let half_width = line_width * 0.5;

    // corner.x picks the end (-1 = a, 1 = b), corner.y the side
    let corner = quad_corner(vertex_index);
    let along = (corner.x * 0.5 + 0.5) * len;
    let across = corner.y * (half_width + 1.0);

    var out: ShapeOutput;
    out.clip_position = pixel_to_clip(point_a + dir * along + normal * across);
    out.color = color;
    out.shape_pos = vec2<f32>(along, across);
    out.half_extent = half_width;
    return out;
}

@fragment
fn fs_line(in: ShapeOutput) -> @location(0) vec4<f32> {
    let coverage = clamp(in.half_extent - abs(in.shape_pos.y) + 0.5, 0.0, 1.0);
    return vec4<f32>(in.color.rgb, in.color.a * coverage);
}
"#;
