use std::collections::HashMap;
use std::mem::size_of;
use std::sync::Arc;

use anyhow::{Context, Result};
use glam::Vec3;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::draw::DrawList;
use crate::frame::ProgramState;
use crate::geometry::{Shape, ShapeKind, ShapeLibrary, Topology};
use crate::material::ShaderKind;
use crate::types::{ColoredVertex, DrawUniform, LitVertex, VertexData};

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const INITIAL_DRAW_CAPACITY: usize = 64;
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// Which of the three pipelines a draw call goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineSlot {
    LitTriangles,
    LitStrip,
    ColoredLines,
}

impl PipelineSlot {
    pub fn select(shader: ShaderKind, primitive: Topology) -> Option<Self> {
        match (shader, primitive) {
            (ShaderKind::Phong, Topology::TriangleList) => Some(PipelineSlot::LitTriangles),
            (ShaderKind::Phong, Topology::TriangleStrip) => Some(PipelineSlot::LitStrip),
            (ShaderKind::Basic, Topology::LineList) => Some(PipelineSlot::ColoredLines),
            _ => None,
        }
    }

    /// Lit pipelines read normals, the line pipeline reads vertex colors
    pub fn wants_lit_vertices(self) -> bool {
        !matches!(self, PipelineSlot::ColoredLines)
    }
}

/// Rounds `size` up to the next multiple of `alignment`
pub fn align_to(size: u64, alignment: u64) -> u64 {
    if alignment == 0 {
        return size;
    }
    size.div_ceil(alignment) * alignment
}

/// Everything the control panel shows for one frame
pub struct PanelView<'a> {
    pub title: &'a str,
    pub captions: &'a [String],
    pub readouts: &'a [(&'static str, String)],
    pub fps: f32,
    pub camera_position: Vec3,
}

struct GpuShape {
    vertex_buffer: wgpu::Buffer,
    index_buffer: Option<wgpu::Buffer>,
    element_count: u32,
    lit: bool,
}

struct Pipelines {
    lit_triangles: wgpu::RenderPipeline,
    lit_strip: wgpu::RenderPipeline,
    colored_lines: wgpu::RenderPipeline,
}

impl Pipelines {
    fn get(&self, slot: PipelineSlot) -> &wgpu::RenderPipeline {
        match slot {
            PipelineSlot::LitTriangles => &self.lit_triangles,
            PipelineSlot::LitStrip => &self.lit_strip,
            PipelineSlot::ColoredLines => &self.colored_lines,
        }
    }
}

pub struct Renderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    depth_view: wgpu::TextureView,
    pipelines: Pipelines,
    shapes: HashMap<ShapeKind, GpuShape>,
    uniform_layout: wgpu::BindGroupLayout,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    uniform_stride: u64,
    uniform_capacity: usize,
    egui_renderer: egui_wgpu::Renderer,
    egui_state: egui_winit::State,
    egui_ctx: egui::Context,
    show_ui: bool,
}

impl Renderer {
    pub async fn new(window: Arc<Window>, library: &ShapeLibrary, show_ui: bool) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("Failed to create surface")?;
        let adapter = Self::request_adapter(&instance, &surface).await?;
        let (device, queue) = Self::request_device(&adapter).await?;

        let surface_config = Self::create_surface_config(&surface, &adapter, size)?;
        surface.configure(&device, &surface_config);
        let depth_view = Self::create_depth_view(&device, &surface_config);

        let alignment = device.limits().min_uniform_buffer_offset_alignment as u64;
        let uniform_stride = align_to(size_of::<DrawUniform>() as u64, alignment);
        let uniform_layout = Self::create_uniform_layout(&device);
        let (uniform_buffer, uniform_bind_group) =
            Self::create_uniform_buffer(&device, &uniform_layout, uniform_stride, INITIAL_DRAW_CAPACITY);

        let pipelines = Self::create_pipelines(&device, &uniform_layout, surface_config.format);

        let shapes = library
            .iter()
            .map(|(kind, shape)| (kind, Self::upload_shape(&device, shape)))
            .collect::<HashMap<_, _>>();
        log::info!("Uploaded {} shapes", shapes.len());

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &device,
            surface_config.format,
            egui_wgpu::RendererOptions::default(),
        );

        log::info!(
            "Renderer initialized: {}x{}, {:?}, uniform stride {}",
            size.width,
            size.height,
            surface_config.format,
            uniform_stride
        );

        Ok(Self {
            device,
            queue,
            surface,
            surface_config,
            size,
            depth_view,
            pipelines,
            shapes,
            uniform_layout,
            uniform_buffer,
            uniform_bind_group,
            uniform_stride,
            uniform_capacity: INITIAL_DRAW_CAPACITY,
            egui_renderer,
            egui_state,
            egui_ctx,
            show_ui,
        })
    }

    async fn request_adapter(
        instance: &wgpu::Instance,
        surface: &wgpu::Surface<'_>,
    ) -> Result<wgpu::Adapter> {
        instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(surface),
                force_fallback_adapter: false,
            })
            .await
            .context("Failed to find appropriate adapter")
    }

    async fn request_device(adapter: &wgpu::Adapter) -> Result<(wgpu::Device, wgpu::Queue)> {
        adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: Default::default(),
            })
            .await
            .context("Failed to create device")
    }

    fn create_surface_config(
        surface: &wgpu::Surface,
        adapter: &wgpu::Adapter,
        size: winit::dpi::PhysicalSize<u32>,
    ) -> Result<wgpu::SurfaceConfiguration> {
        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("Surface reports no supported formats")?;

        Ok(wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps
                .present_modes
                .first()
                .copied()
                .unwrap_or(wgpu::PresentMode::Fifo),
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        })
    }

    fn create_depth_view(device: &wgpu::Device, config: &wgpu::SurfaceConfiguration) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
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

    fn create_uniform_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(size_of::<DrawUniform>() as u64),
                },
                count: None,
            }],
            label: Some("draw_uniform_layout"),
        })
    }

    fn create_uniform_buffer(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        stride: u64,
        capacity: usize,
    ) -> (wgpu::Buffer, wgpu::BindGroup) {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Draw Uniforms"),
            size: stride * capacity as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(size_of::<DrawUniform>() as u64),
                }),
            }],
            label: Some("draw_uniform_bind_group"),
        });

        (buffer, bind_group)
    }

    fn create_pipelines(
        device: &wgpu::Device,
        uniform_layout: &wgpu::BindGroupLayout,
        surface_format: wgpu::TextureFormat,
    ) -> Pipelines {
        let phong = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Phong Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/phong.wgsl").into()),
        });
        let basic = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Basic Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/basic.wgsl").into()),
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[uniform_layout],
            push_constant_ranges: &[],
        });

        let build = |label: &str,
                     module: &wgpu::ShaderModule,
                     vertex_layout: wgpu::VertexBufferLayout<'static>,
                     topology: wgpu::PrimitiveTopology| {
            let strip_index_format = match topology {
                wgpu::PrimitiveTopology::TriangleStrip => Some(wgpu::IndexFormat::Uint32),
                _ => None,
            };
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module,
                    entry_point: Some("vs_main"),
                    buffers: &[vertex_layout],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: surface_format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology,
                    strip_index_format,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState {
                    count: 1,
                    mask: !0,
                    alpha_to_coverage_enabled: false,
                },
                multiview: None,
                cache: None,
            })
        };

        Pipelines {
            lit_triangles: build(
                "Phong Triangle Pipeline",
                &phong,
                LitVertex::desc(),
                wgpu::PrimitiveTopology::TriangleList,
            ),
            lit_strip: build(
                "Phong Strip Pipeline",
                &phong,
                LitVertex::desc(),
                wgpu::PrimitiveTopology::TriangleStrip,
            ),
            colored_lines: build(
                "Basic Line Pipeline",
                &basic,
                ColoredVertex::desc(),
                wgpu::PrimitiveTopology::LineList,
            ),
        }
    }

    fn upload_shape(device: &wgpu::Device, shape: &Shape) -> GpuShape {
        let vertices = VertexData::from_shape(shape);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(shape.name()),
            contents: vertices.as_bytes(),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = shape.indices().map(|indices| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(shape.name()),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            })
        });
        log::debug!(
            "Uploaded {}: {} vertices, {} elements",
            shape.name(),
            shape.vertex_count(),
            shape.element_count()
        );

        GpuShape {
            vertex_buffer,
            index_buffer,
            element_count: shape.element_count() as u32,
            lit: vertices.is_lit(),
        }
    }

    fn ensure_uniform_capacity(&mut self, draws: usize) {
        if draws <= self.uniform_capacity {
            return;
        }
        let capacity = draws.next_power_of_two();
        let (buffer, bind_group) =
            Self::create_uniform_buffer(&self.device, &self.uniform_layout, self.uniform_stride, capacity);
        self.uniform_buffer = buffer;
        self.uniform_bind_group = bind_group;
        self.uniform_capacity = capacity;
        log::debug!("Draw uniform buffer grown to {} slots", capacity);
    }

    fn write_uniforms(&mut self, draws: &DrawList, state: &ProgramState) {
        if draws.is_empty() {
            return;
        }
        let stride = self.uniform_stride as usize;
        let mut bytes = vec![0u8; stride * draws.len()];
        for (i, call) in draws.iter().enumerate() {
            let uniform = DrawUniform::new(call, state);
            bytes[i * stride..i * stride + size_of::<DrawUniform>()]
                .copy_from_slice(bytemuck::bytes_of(&uniform));
        }
        self.queue.write_buffer(&self.uniform_buffer, 0, &bytes);
    }

    /// Draws one frame. Returns the indices of control panel buttons clicked this frame.
    pub fn render(
        &mut self,
        window: &Window,
        draws: &DrawList,
        state: &ProgramState,
        panel: &PanelView<'_>,
    ) -> std::result::Result<Vec<usize>, wgpu::SurfaceError> {
        self.ensure_uniform_capacity(draws.len());
        self.write_uniforms(draws, state);

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            for (i, call) in draws.iter().enumerate() {
                let Some(slot) = PipelineSlot::select(call.material.shader, call.primitive) else {
                    log::warn!("No pipeline for {:?} as {:?}", call.material.shader, call.primitive);
                    continue;
                };
                let Some(shape) = self.shapes.get(&call.shape) else {
                    continue;
                };
                if shape.lit != slot.wants_lit_vertices() {
                    log::warn!("{:?} has the wrong vertex layout for {:?}", call.shape, slot);
                    continue;
                }

                render_pass.set_pipeline(self.pipelines.get(slot));
                render_pass.set_bind_group(0, &self.uniform_bind_group, &[(i as u64 * self.uniform_stride) as u32]);
                render_pass.set_vertex_buffer(0, shape.vertex_buffer.slice(..));
                match &shape.index_buffer {
                    Some(indices) => {
                        render_pass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint32);
                        render_pass.draw_indexed(0..shape.element_count, 0, 0..1);
                    }
                    None => render_pass.draw(0..shape.element_count, 0..1),
                }
            }
        }

        let clicked = if self.show_ui {
            self.draw_panel(window, &mut encoder, &view, panel)
        } else {
            Vec::new()
        };

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(clicked)
    }

    fn draw_panel(
        &mut self,
        window: &Window,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        panel: &PanelView<'_>,
    ) -> Vec<usize> {
        let raw_input = self.egui_state.take_egui_input(window);
        let mut clicked = Vec::new();

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            egui::Window::new("Controls")
                .title_bar(true)
                .resizable(false)
                .fixed_pos(egui::pos2(10.0, 10.0))
                .default_width(220.0)
                .show(ctx, |ui| {
                    ui.heading(
                        egui::RichText::new(panel.title)
                            .size(20.0)
                            .color(egui::Color32::from_rgb(74, 158, 255)),
                    );
                    ui.label(
                        egui::RichText::new(format!("{:.0} FPS", panel.fps))
                            .size(14.0)
                            .color(egui::Color32::GRAY),
                    );

                    ui.add_space(5.0);
                    ui.separator();
                    ui.add_space(5.0);

                    for (index, caption) in panel.captions.iter().enumerate() {
                        if ui.button(caption.as_str()).clicked() {
                            clicked.push(index);
                        }
                    }

                    if !panel.readouts.is_empty() {
                        ui.add_space(5.0);
                        ui.separator();
                        ui.add_space(5.0);
                        for (label, value) in panel.readouts {
                            ui.monospace(format!("{}: {}", label, value));
                        }
                    }

                    ui.add_space(5.0);
                    ui.separator();
                    ui.monospace(format!(
                        "Camera: ({:.2}, {:.2}, {:.2})",
                        panel.camera_position.x, panel.camera_position.y, panel.camera_position.z
                    ));
                });
        });

        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let tris = self
            .egui_ctx
            .tessellate(full_output.shapes, self.egui_ctx.pixels_per_point());
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.surface_config.width, self.surface_config.height],
            pixels_per_point: window.scale_factor() as f32,
        };

        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            encoder,
            &tris,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    occlusion_query_set: None,
                    timestamp_writes: None,
                })
                .forget_lifetime();

            self.egui_renderer
                .render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        clicked
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.size = new_size;
        self.surface_config.width = new_size.width;
        self.surface_config.height = new_size.height;
        self.surface.configure(&self.device, &self.surface_config);
        self.depth_view = Self::create_depth_view(&self.device, &self.surface_config);
        log::debug!("Resized to {}x{}", new_size.width, new_size.height);
    }

    /// Reconfigures the surface at its current size, after it was lost or went stale
    pub fn reconfigure(&mut self) {
        self.resize(self.size);
    }

    pub fn size(&self) -> winit::dpi::PhysicalSize<u32> {
        self.size
    }

    pub fn aspect(&self) -> f32 {
        self.size.width as f32 / self.size.height.max(1) as f32
    }

    /// Forwards a window event to the panel. Returns true when the panel consumed it.
    pub fn handle_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        if !self.show_ui {
            return false;
        }
        self.egui_state.on_window_event(window, event).consumed
    }
}
