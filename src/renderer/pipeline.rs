//! WebGPU render pipeline setup

use wgpu::util::DeviceExt;

use super::shapes::scene_vertices;
use super::vertex::{Vertex, colors};
use crate::config::Arena;
use crate::sim::BodyStore;

/// Main render state
pub struct RenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    /// Filled fans (bodies)
    fill_pipeline: wgpu::RenderPipeline,
    /// Line strips (arena outline)
    outline_pipeline: wgpu::RenderPipeline,
    fill_buffer: wgpu::Buffer,
    outline_buffer: wgpu::Buffer,
    fill_count: u32,
    outline_count: u32,
    /// Viewport size in pixels
    pub size: (u32, u32),
    /// Arena for outline geometry and coordinate mapping
    arena: Arena,
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
        arena: Arena,
    ) -> Self {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("ball-pit-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await
            .expect("Failed to create device");

        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let fill_pipeline = Self::make_pipeline(
            &device,
            &shader,
            &pipeline_layout,
            config.format,
            wgpu::PrimitiveTopology::TriangleList,
            "fill_pipeline",
        );
        let outline_pipeline = Self::make_pipeline(
            &device,
            &shader,
            &pipeline_layout,
            config.format,
            wgpu::PrimitiveTopology::LineStrip,
            "outline_pipeline",
        );

        // Initial one-vertex buffers, replaced on the first frame
        let fill_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("fill_buffer"),
            contents: bytemuck::cast_slice(&[Vertex::new(0.0, 0.0, [1.0; 4])]),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        let outline_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("outline_buffer"),
            contents: bytemuck::cast_slice(&[Vertex::new(0.0, 0.0, [1.0; 4])]),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        Self {
            surface,
            device,
            queue,
            config,
            fill_pipeline,
            outline_pipeline,
            fill_buffer,
            outline_buffer,
            fill_count: 0,
            outline_count: 0,
            size: (width, height),
            arena,
        }
    }

    fn make_pipeline(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        layout: &wgpu::PipelineLayout,
        format: wgpu::TextureFormat,
        topology: wgpu::PrimitiveTopology,
        label: &str,
    ) -> wgpu::RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
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
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Convert world coordinates to normalized device coordinates.
    ///
    /// The arena center maps to the origin; the longer arena extent fills
    /// the viewport with a 5% margin, aspect-corrected. This is the only
    /// place world space and screen space meet.
    pub fn world_to_ndc(&self, x: f32, y: f32) -> (f32, f32) {
        let (w, h) = self.size;
        let aspect = w as f32 / h as f32;
        let center = self.arena.center();
        let half_extent = (self.arena.width.max(self.arena.height) / 2.0) * 1.05;
        let scale = 1.0 / half_extent;

        let x = (x - center.x) * scale;
        let y = (y - center.y) * scale;

        if aspect > 1.0 {
            // Wider than tall
            (x / aspect, y)
        } else {
            // Taller than wide
            (x, y * aspect)
        }
    }

    fn to_ndc_vertices(&self, vertices: &[Vertex]) -> Vec<Vertex> {
        vertices
            .iter()
            .map(|v| {
                let (x, y) = self.world_to_ndc(v.position[0], v.position[1]);
                Vertex::new(x, y, v.color)
            })
            .collect()
    }

    /// Build the frame's geometry from the store and draw it.
    ///
    /// Read-only over the store; body state is never touched here.
    pub fn render(&mut self, store: &BodyStore) -> Result<(), wgpu::SurfaceError> {
        let (fills, outline) = scene_vertices(store, &self.arena);

        let fills = self.to_ndc_vertices(&fills);
        let outline = self.to_ndc_vertices(&outline);

        // Recreate buffers each frame (simple approach; could optimize)
        if !fills.is_empty() {
            self.fill_buffer = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("fill_buffer"),
                    contents: bytemuck::cast_slice(&fills),
                    usage: wgpu::BufferUsages::VERTEX,
                });
        }
        self.fill_count = fills.len() as u32;

        self.outline_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("outline_buffer"),
                contents: bytemuck::cast_slice(&outline),
                usage: wgpu::BufferUsages::VERTEX,
            });
        self.outline_count = outline.len() as u32;

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        {
            let [r, g, b, a] = colors::BACKGROUND;
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            render_pass.set_pipeline(&self.outline_pipeline);
            render_pass.set_vertex_buffer(0, self.outline_buffer.slice(..));
            render_pass.draw(0..self.outline_count, 0..1);

            if self.fill_count > 0 {
                render_pass.set_pipeline(&self.fill_pipeline);
                render_pass.set_vertex_buffer(0, self.fill_buffer.slice(..));
                render_pass.draw(0..self.fill_count, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
