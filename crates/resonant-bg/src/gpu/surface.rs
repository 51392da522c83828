use crate::error::{RendererError, RendererResult};
use crate::host::{GpuSurface, ProgramId, ShaderId, ShaderStage, SurfaceSize};
use crate::uniforms::Uniforms;

use super::init::*;
use super::render::render_fullscreen_pass;

/// WebGL2 drawing surface bound to a canvas element
pub struct WgpuSurface {
    canvas: web_sys::HtmlCanvasElement,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    errors: ErrorSink,
    shaders: Vec<wgpu::ShaderModule>,
    programs: Vec<wgpu::RenderPipeline>,
}

impl WgpuSurface {
    /// Acquire a WebGL2 context on `canvas`
    ///
    /// Any failure here means the page has no usable WebGL2 and should fall
    /// back to the static background.
    pub async fn new(canvas: web_sys::HtmlCanvasElement) -> RendererResult<Self> {
        let width = canvas.width();
        let height = canvas.height();
        let (instance, surface) = Self::create_surface(canvas.clone())?;

        let (device, queue, adapter) = create_device(&instance, &surface).await?;
        let errors = capture_errors(&device);
        let surface_config = configure_surface(&surface, &adapter, &device, width, height)?;
        let (uniform_buffer, bind_group_layout, bind_group) =
            create_uniform_resources(&device, width, height);

        Ok(Self {
            canvas,
            device,
            queue,
            surface,
            surface_config,
            bind_group_layout,
            bind_group,
            uniform_buffer,
            errors,
            shaders: Vec::new(),
            programs: Vec::new(),
        })
    }

    /// Create the wgpu instance and surface from canvas
    #[cfg(target_arch = "wasm32")]
    fn create_surface(
        canvas: web_sys::HtmlCanvasElement,
    ) -> RendererResult<(wgpu::Instance, wgpu::Surface<'static>)> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(|e| RendererError::context_unavailable(format!("no WebGL2 context: {e}")))?;

        Ok((instance, surface))
    }

    /// Create the wgpu instance and surface from canvas (non-WASM stub)
    #[cfg(not(target_arch = "wasm32"))]
    fn create_surface(
        _canvas: web_sys::HtmlCanvasElement,
    ) -> RendererResult<(wgpu::Instance, wgpu::Surface<'static>)> {
        Err(RendererError::context_unavailable(
            "WgpuSurface only supports WASM targets",
        ))
    }

    fn first_error(&self) -> Option<String> {
        drain_errors(&self.errors).into_iter().next()
    }

    /// Get surface texture, reconfiguring once if the surface went stale
    fn get_surface_texture(&mut self) -> RendererResult<wgpu::SurfaceTexture> {
        match self.surface.get_current_texture() {
            Ok(texture) => Ok(texture),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.surface_config);
                Err(RendererError::surface("surface reconfigured, skip frame"))
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                Err(RendererError::surface("out of GPU memory"))
            }
            Err(wgpu::SurfaceError::Timeout) => {
                Err(RendererError::surface("GPU timeout, skip frame"))
            }
        }
    }
}

impl GpuSurface for WgpuSurface {
    fn compile(&mut self, stage: ShaderStage, source: &str) -> RendererResult<ShaderId> {
        let label = format!("Background {stage} Shader");
        let module = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&label),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        if let Some(message) = self.first_error() {
            tracing::error!(%stage, %message, "shader compile error");
            return Err(RendererError::compile(stage, message));
        }

        self.shaders.push(module);
        Ok(ShaderId(self.shaders.len() as u32 - 1))
    }

    fn link(&mut self, vertex: ShaderId, fragment: ShaderId) -> RendererResult<ProgramId> {
        let (Some(vs), Some(fs)) = (
            self.shaders.get(vertex.0 as usize),
            self.shaders.get(fragment.0 as usize),
        ) else {
            return Err(RendererError::link("unknown shader handle"));
        };

        let pipeline = create_pipeline(
            &self.device,
            &self.bind_group_layout,
            vs,
            fs,
            self.surface_config.format,
        );

        if let Some(message) = self.first_error() {
            tracing::error!(%message, "program link error");
            return Err(RendererError::link(message));
        }

        self.programs.push(pipeline);
        Ok(ProgramId(self.programs.len() as u32 - 1))
    }

    fn resize(&mut self, size: SurfaceSize) {
        if size.is_empty() {
            return;
        }

        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);

        self.surface_config.width = size.width;
        self.surface_config.height = size.height;
        self.surface.configure(&self.device, &self.surface_config);
    }

    fn set_uniforms(&mut self, _program: ProgramId, uniforms: &Uniforms) {
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[*uniforms]));
    }

    fn draw(&mut self, program: ProgramId) -> RendererResult<()> {
        let output = self.get_surface_texture()?;
        let Some(pipeline) = self.programs.get(program.0 as usize) else {
            return Err(RendererError::surface("unknown program handle"));
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Background Encoder"),
            });

        render_fullscreen_pass(&mut encoder, pipeline, &self.bind_group, &view);

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
