use crate::config::EffectConfig;
use crate::error::EffectError;
use crate::projection;
use glam::{Mat3, UVec2, Vec2};
use web_sys as web;

mod quad;
mod surface;
mod textures;
mod uniforms;

use quad::{QuadMesh, QuadVertex};
use textures::TexturePair;
use uniforms::EffectUniforms;

pub static TING_WGSL: &str = include_str!("../shaders/ting.wgsl");

/// Compiled pipeline plus the layout its bind group is built against.
struct Program {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    quad: QuadMesh,
    _textures: TexturePair,
    uniforms: EffectUniforms,
    image_size: UVec2,
}

impl GpuState {
    /// Acquire the context, build the program and mesh, and load both
    /// textures. Texture failures are logged, not returned.
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        settings: &EffectConfig,
        device_pixel_ratio: f64,
    ) -> Result<Self, EffectError> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        // Falls back to WebGL2 when `navigator.gpu` exists but yields no adapter
        let instance =
            wgpu::util::new_instance_with_webgpu_detection(&wgpu::InstanceDescriptor::default())
                .await;
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| EffectError::ContextUnavailable(e.to_string()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| EffectError::ContextUnavailable("no adapter".to_string()))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    // WebGL2 fallback cannot satisfy the WebGPU defaults
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::Performance,
                },
                None,
            )
            .await
            .map_err(|e| EffectError::ContextUnavailable(format!("request_device: {:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| EffectError::ContextUnavailable("surface has no formats".to_string()))?;
        let alpha_mode = surface::surface_alpha_mode(adapter.get_info().backend, &caps.alpha_modes);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!(
            "[gpu] {:?} surface {}x{} {:?} {:?}",
            adapter.get_info().backend,
            width,
            height,
            format,
            alpha_mode
        );

        let program = create_program(&device, format).await?;
        let quad = QuadMesh::new(&device);
        let textures = textures::load_pair(&device, &queue, settings).await;
        if textures.dark.size.is_none() {
            log::warn!("[gpu] dark image unavailable; assuming nominal size");
        }
        let image_size = projection::reference_size(textures.dark.size);

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("image_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("effect_uniforms"),
            size: std::mem::size_of::<EffectUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("effect_bg"),
            layout: &program.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&textures.dark.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&textures.light.view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let mut uniforms = EffectUniforms::new(settings.ranges(device_pixel_ratio));
        uniforms.set_resolution(UVec2::new(width, height));
        queue.write_buffer(&uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline: program.pipeline,
            bind_group,
            uniform_buffer,
            quad,
            _textures: textures,
            uniforms,
            image_size,
        })
    }

    /// Pixel size of the reference (dark) image.
    pub fn image_size(&self) -> UVec2 {
        self.image_size
    }

    pub fn resize_if_needed(&mut self, size: UVec2) {
        if size.x == 0 || size.y == 0 {
            return;
        }
        if size.x != self.config.width || size.y != self.config.height {
            self.config.width = size.x;
            self.config.height = size.y;
            self.surface.configure(&self.device, &self.config);
        }
        self.uniforms.set_resolution(size);
    }

    pub fn set_projection(&mut self, matrix: Mat3) {
        self.uniforms.set_matrix(matrix);
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&self.uniforms));
    }

    /// Reconfigure after the surface reports `Lost`/`Outdated`.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Clear the surface to transparent without drawing.
    pub fn clear(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.pass(false)
    }

    pub fn render(&mut self, mouse: Vec2, time_sec: f32) -> Result<(), wgpu::SurfaceError> {
        self.uniforms.set_frame(mouse, time_sec);
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&self.uniforms));
        self.pass(true)
    }

    fn pass(&mut self, draw: bool) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("effect_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if draw {
                rpass.set_pipeline(&self.pipeline);
                rpass.set_bind_group(0, &self.bind_group, &[]);
                self.quad.draw(&mut rpass);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

/// Build the effect pipeline inside a validation scope so WGSL errors come
/// back as `ShaderCompile` instead of an uncaptured device error.
async fn create_program(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
) -> Result<Program, EffectError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);

    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("ting_shader"),
        source: wgpu::ShaderSource::Wgsl(TING_WGSL.into()),
    });
    let texture_entry = |binding: u32| wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    };
    let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("effect_bgl"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
            texture_entry(1),
            texture_entry(2),
            wgpu::BindGroupLayoutEntry {
                binding: 3,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("effect_pl"),
        bind_group_layouts: &[&bind_group_layout],
        push_constant_ranges: &[],
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("effect_pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[QuadVertex::layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });

    if let Some(err) = device.pop_error_scope().await {
        return Err(EffectError::ShaderCompile(err.to_string()));
    }
    Ok(Program {
        pipeline,
        bind_group_layout,
    })
}
