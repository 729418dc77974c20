/// WGPU renderer: owns the surface, device, pipelines, and cube buffers
use std::iter;
use std::mem;
use std::sync::Arc;

use nalgebra::Matrix4;
use spin3d_core::{Camera, Color, CubeGeometry};
use wgpu::util::DeviceExt;
use winit::window::Window;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Per-vertex data handed to the shader.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
struct Vertex {
    position: [f32; 3],
    color: [f32; 3],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
    face_pipeline: wgpu::RenderPipeline,
    edge_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    face_vertex_buffer: wgpu::Buffer,
    face_index_buffer: wgpu::Buffer,
    face_index_count: u32,
    edge_vertex_buffer: wgpu::Buffer,
    edge_index_buffer: wgpu::Buffer,
    edge_index_count: u32,
    camera: Camera,
}

impl Renderer {
    /// Set up the GPU and upload the cube once; the geometry never changes
    /// after startup. Initialization failures terminate the process, there
    /// is no recovery path for a display demo.
    pub fn new(window: Arc<Window>, geometry: &CubeGeometry, colors: &[Color]) -> Self {
        let size = window.inner_size();

        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window)
            .expect("Failed to create the window surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("No suitable graphics adapter found");
        log::debug!("adapter: {:?}", adapter.get_info());

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("spin3d device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
            },
            None,
        ))
        .expect("Failed to acquire a graphics device");

        let config = surface
            .get_default_config(&adapter, size.width.max(1), size.height.max(1))
            .expect("Surface is incompatible with the adapter");
        surface.configure(&device, &config);
        log::debug!("surface format: {:?}", config.format);

        let depth_view = create_depth_view(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("cube shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("mvp layout"),
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

        let identity: [[f32; 4]; 4] = Matrix4::identity().into();
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mvp"),
            contents: value_bytes(&identity),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("mvp"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("cube layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let face_pipeline = create_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            config.format,
            wgpu::PrimitiveTopology::TriangleList,
            0,
            "faces",
        );
        // Edges are drawn after the faces; the negative bias lets the
        // outlines win the depth test along shared boundaries.
        let edge_pipeline = create_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            config.format,
            wgpu::PrimitiveTopology::LineList,
            -2,
            "edges",
        );

        let (face_vertices, face_indices) = face_mesh(geometry, colors);
        let (edge_vertices, edge_indices) = edge_mesh(geometry);

        let face_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("face vertices"),
            contents: slice_bytes(&face_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let face_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("face indices"),
            contents: slice_bytes(&face_indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let edge_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("edge vertices"),
            contents: slice_bytes(&edge_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let edge_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("edge indices"),
            contents: slice_bytes(&edge_indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let camera = Camera::new(config.width, config.height);

        Self {
            surface,
            device,
            queue,
            config,
            depth_view,
            face_pipeline,
            edge_pipeline,
            uniform_buffer,
            uniform_bind_group,
            face_vertex_buffer,
            face_index_buffer,
            face_index_count: face_indices.len() as u32,
            edge_vertex_buffer,
            edge_index_buffer,
            edge_index_count: edge_indices.len() as u32,
            camera,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.camera.aspect = width as f32 / height as f32;
        self.reconfigure();
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, &self.config);
    }

    /// Draw one frame: clear color and depth, faces first, edges on top,
    /// then present.
    pub fn render(&mut self, model: &Matrix4<f32>) -> Result<(), wgpu::SurfaceError> {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.reconfigure();
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        let mvp: [[f32; 4]; 4] =
            (depth_correction() * self.camera.view_projection() * model).into();
        self.queue
            .write_buffer(&self.uniform_buffer, 0, value_bytes(&mvp));

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("cube"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_bind_group(0, &self.uniform_bind_group, &[]);

            pass.set_pipeline(&self.face_pipeline);
            pass.set_vertex_buffer(0, self.face_vertex_buffer.slice(..));
            pass.set_index_buffer(self.face_index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            pass.draw_indexed(0..self.face_index_count, 0, 0..1);

            pass.set_pipeline(&self.edge_pipeline);
            pass.set_vertex_buffer(0, self.edge_vertex_buffer.slice(..));
            pass.set_index_buffer(self.edge_index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            pass.draw_indexed(0..self.edge_index_count, 0, 0..1);
        }

        self.queue.submit(iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}

/// Expand the quad faces into a triangle-list mesh. Vertices are duplicated
/// per face; the color of the i-th corner of every face comes from the color
/// list at `i % len`, preserving the list-based lookup contract.
fn face_mesh(geometry: &CubeGeometry, colors: &[Color]) -> (Vec<Vertex>, Vec<u16>) {
    let mut vertices = Vec::with_capacity(geometry.faces.len() * 4);
    let mut indices = Vec::with_capacity(geometry.faces.len() * 6);

    for face in &geometry.faces {
        let base = vertices.len() as u16;
        for (i, &vertex_index) in face.iter().enumerate() {
            vertices.push(Vertex {
                position: geometry.vertices[vertex_index as usize].coords.into(),
                color: colors[i % colors.len()].channels(),
            });
        }
        for offset in [0u16, 1, 2, 0, 2, 3] {
            indices.push(base + offset);
        }
    }

    (vertices, indices)
}

/// The twelve edges as a black line-list wireframe over the raw vertices.
fn edge_mesh(geometry: &CubeGeometry) -> (Vec<Vertex>, Vec<u16>) {
    let vertices = geometry
        .vertices
        .iter()
        .map(|p| Vertex {
            position: p.coords.into(),
            color: Color::BLACK.channels(),
        })
        .collect();
    let indices = geometry.edges.iter().flatten().copied().collect();
    (vertices, indices)
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    topology: wgpu::PrimitiveTopology,
    depth_bias: i32,
    label: &str,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: "vs_main",
            buffers: &[Vertex::layout()],
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: "fs_main",
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState {
                constant: depth_bias,
                slope_scale: 0.0,
                clamp: 0.0,
            },
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
    })
}

fn create_depth_view(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth"),
        size: wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

/// nalgebra's perspective targets OpenGL clip space (z in [-1, 1]); WGPU
/// expects z in [0, 1].
fn depth_correction() -> Matrix4<f32> {
    #[rustfmt::skip]
    let m = Matrix4::new(
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 0.5, 0.5,
        0.0, 0.0, 0.0, 1.0,
    );
    m
}

// The uniform and vertex types are plain #[repr(C)] data, so their in-memory
// layout is exactly what the GPU buffer expects.
fn value_bytes<T>(value: &T) -> &[u8] {
    unsafe { std::slice::from_raw_parts(value as *const T as *const u8, mem::size_of::<T>()) }
}

fn slice_bytes<T>(data: &[T]) -> &[u8] {
    unsafe { std::slice::from_raw_parts(data.as_ptr() as *const u8, mem::size_of_val(data)) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spin3d_core::face_colors;

    #[test]
    fn face_mesh_expands_quads_to_triangles() {
        let cube = CubeGeometry::new(4.0);
        let colors = face_colors(Color::new(1.0, 0.0, 0.0));
        let (vertices, indices) = face_mesh(&cube, &colors);

        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), 36);
        assert!(vertices.iter().all(|v| v.color == [1.0, 0.0, 0.0]));
        assert!(vertices
            .iter()
            .all(|v| v.position.iter().all(|c| (c.abs() - 2.0).abs() < 1e-6)));
    }

    #[test]
    fn face_colors_are_looked_up_modulo_list_length() {
        let cube = CubeGeometry::new(2.0);
        let palette = vec![Color::new(1.0, 0.0, 0.0), Color::new(0.0, 1.0, 0.0)];
        let (vertices, _) = face_mesh(&cube, &palette);

        for (i, vertex) in vertices.iter().enumerate() {
            let corner = i % 4;
            let expected = palette[corner % palette.len()];
            assert_eq!(vertex.color, expected.channels());
        }
    }

    #[test]
    fn edge_mesh_is_a_black_wireframe() {
        let cube = CubeGeometry::new(2.0);
        let (vertices, indices) = edge_mesh(&cube);

        assert_eq!(vertices.len(), 8);
        assert_eq!(indices.len(), 24);
        assert!(vertices.iter().all(|v| v.color == [0.0, 0.0, 0.0]));
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    }

    #[test]
    fn depth_correction_halves_the_z_range() {
        let correction = depth_correction();
        let near = correction.transform_point(&nalgebra::Point3::new(0.0, 0.0, -1.0));
        let far = correction.transform_point(&nalgebra::Point3::new(0.0, 0.0, 1.0));
        assert!((near.z - 0.0).abs() < 1e-6);
        assert!((far.z - 1.0).abs() < 1e-6);
    }
}
