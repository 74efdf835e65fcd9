mod pointer;

use anyhow::{Context as _, Result, anyhow};
use clap::Parser;
use egui::Context as EguiContext;
use showroom_assets::{AssetLoader, LoadEvent, TextureManifest};
use showroom_common::ShowroomConfig;
use showroom_render_wgpu::{GpuFrame, WgpuRenderer};
use showroom_runtime::{FrameScheduler, Showroom, SystemClock};
use showroom_scene::StandardMaterial;
use showroom_tools::{ParamPanel, SceneInspector, material_panel};
use showroom_viewport::{DoubleClickDetector, FullscreenError, FullscreenShell, ResizeEvent};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use pointer::{DragMode, PointerState};
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Fullscreen, Window, WindowId};

#[derive(Parser)]
#[command(name = "showroom-desktop", about = "PBR material showroom")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the texture set
    #[arg(long)]
    textures_dir: Option<PathBuf>,

    /// Upper bound for the render pixel ratio
    #[arg(long)]
    pixel_ratio_cap: Option<f64>,
}

impl Cli {
    fn showroom_config(&self) -> Result<ShowroomConfig> {
        let mut config = ShowroomConfig::load_or_default(self.config.as_deref())?;
        if let Some(dir) = &self.textures_dir {
            config.textures_dir = dir.clone();
        }
        if let Some(cap) = self.pixel_ratio_cap {
            config.pixel_ratio_cap = cap;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Re-arms the loop through winit's redraw requests.
struct WindowScheduler {
    window: Arc<Window>,
}

impl FrameScheduler for WindowScheduler {
    fn request_frame(&mut self) {
        self.window.request_redraw();
    }
}

/// Borderless fullscreen on the window's current monitor.
struct WindowShell<'a> {
    window: &'a Window,
}

impl FullscreenShell for WindowShell<'_> {
    fn is_fullscreen(&self) -> bool {
        self.window.fullscreen().is_some()
    }

    fn request_fullscreen(&mut self) -> Result<(), FullscreenError> {
        self.window.set_fullscreen(Some(Fullscreen::Borderless(None)));
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<(), FullscreenError> {
        self.window.set_fullscreen(None);
        Ok(())
    }
}

/// Application state.
struct AppState {
    config: ShowroomConfig,
    showroom: Option<Showroom<SystemClock, WindowScheduler>>,
    loader: Option<AssetLoader>,
    panel: ParamPanel<StandardMaterial>,
    show_panel: bool,
    // Pointer state
    clicks: DoubleClickDetector,
    pointer: PointerState,
}

impl AppState {
    fn new(config: ShowroomConfig) -> Self {
        Self {
            config,
            showroom: None,
            loader: None,
            panel: material_panel(),
            show_panel: true,
            clicks: DoubleClickDetector::default(),
            pointer: PointerState::default(),
        }
    }

    fn poll_textures(&mut self) {
        let Some(loader) = &mut self.loader else {
            return;
        };
        for event in loader.poll() {
            match event {
                LoadEvent::Started { total } => tracing::info!(total, "loading started"),
                LoadEvent::Progress { url, loaded, total } => {
                    tracing::info!(%url, loaded, total, "loading progress");
                }
                LoadEvent::Failed { url, error } => {
                    tracing::error!(%url, %error, "loading failed");
                }
                LoadEvent::Completed { loaded, failed } => {
                    tracing::info!(loaded, failed, "loading finished");
                }
            }
        }
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        if !self.show_panel {
            return;
        }
        let Some(showroom) = &mut self.showroom else {
            return;
        };

        let summary = SceneInspector::summary(
            showroom.scene(),
            showroom.viewport().state(),
            showroom.render_loop().frames(),
            showroom.render_loop().last_elapsed(),
        );
        let (loaded, total) = self
            .loader
            .as_ref()
            .map(AssetLoader::progress)
            .unwrap_or_default();
        let panel = &self.panel;

        egui::Window::new(panel.title())
            .default_width(260.0)
            .show(ctx, |ui| {
                let material = &mut showroom.scene_mut().material;
                for field in panel.fields() {
                    let mut value = field.value(material);
                    let slider = egui::Slider::new(&mut value, field.min..=field.max)
                        .step_by(field.step as f64)
                        .text(field.name);
                    if ui.add(slider).changed() {
                        if let Err(e) = panel.set(material, field.name, value) {
                            tracing::warn!("{e}");
                        }
                    }
                }

                ui.separator();
                ui.label(format!(
                    "Frames: {}  FPS: {:.1}",
                    summary.frames, summary.average_fps
                ));
                ui.label(format!(
                    "Viewport: {}x{} @ {}",
                    summary.viewport.0, summary.viewport.1, summary.pixel_ratio
                ));
                ui.label(format!("Camera distance: {:.2}", summary.camera_distance));
                ui.label(format!("Textures: {loaded}/{total}"));
                ui.separator();
                ui.small("Double-click: Fullscreen | Drag: Orbit | Wheel: Zoom | F1: Panel");
            });
    }
}

struct GpuApp {
    state: AppState,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    surface_config: Option<wgpu::SurfaceConfiguration>,
    renderer: Option<WgpuRenderer>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
}

impl GpuApp {
    fn new(config: ShowroomConfig) -> Self {
        Self {
            state: AppState::new(config),
            window: None,
            surface: None,
            device: None,
            queue: None,
            surface_config: None,
            renderer: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_config = &self.state.config.window;
        let attrs = Window::default_attributes()
            .with_title(window_config.title.clone())
            .with_inner_size(LogicalSize::new(window_config.width, window_config.height));
        let window = Arc::new(event_loop.create_window(attrs)?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window.clone())?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| anyhow!("no compatible GPU adapter"))?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("showroom_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or(surface_caps.formats.first())
            .copied()
            .ok_or_else(|| anyhow!("surface reports no texture formats"))?;

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        let mut loader = AssetLoader::new(self.state.config.textures_dir.clone())?;
        let handles = TextureManifest::showcase().queue(&mut loader);

        let mut showroom = Showroom::new(
            &self.state.config,
            Some(handles.environment),
            SystemClock::new(),
            WindowScheduler {
                window: window.clone(),
            },
        );
        let mut renderer = WgpuRenderer::new(&device, &queue, surface_format, showroom.scene());
        showroom.resize(
            ResizeEvent::from_physical(size.width, size.height, window.scale_factor()),
            &mut renderer,
        );
        showroom.start()?;

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            backend = adapter.get_info().backend.to_str(),
            format = ?surface_format,
            "GPU initialized"
        );

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.surface_config = Some(surface_config);
        self.renderer = Some(renderer);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);
        self.state.loader = Some(loader);
        self.state.showroom = Some(showroom);
        Ok(())
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        let (Some(window), Some(surface), Some(device), Some(config)) = (
            &self.window,
            &self.surface,
            &self.device,
            &mut self.surface_config,
        ) else {
            return;
        };
        config.width = size.width.max(1);
        config.height = size.height.max(1);
        surface.configure(device, config);

        if let (Some(showroom), Some(renderer)) = (&mut self.state.showroom, &mut self.renderer) {
            showroom.resize(
                ResizeEvent::from_physical(size.width, size.height, window.scale_factor()),
                renderer,
            );
        }
    }

    fn redraw(&mut self) {
        self.state.poll_textures();

        let (Some(window), Some(surface), Some(device), Some(queue), Some(surface_config)) = (
            &self.window,
            &self.surface,
            &self.device,
            &self.queue,
            &self.surface_config,
        ) else {
            return;
        };
        let (Some(renderer), Some(showroom)) = (&mut self.renderer, &mut self.state.showroom)
        else {
            return;
        };

        if let Some(loader) = &self.state.loader {
            renderer.sync_textures(device, queue, showroom.scene(), loader.store());
        }

        let output = match surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                surface.configure(device, surface_config);
                window.request_redraw();
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                window.request_redraw();
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        showroom.frame(&mut GpuFrame {
            renderer,
            device,
            queue,
            view: &view,
        });

        let (Some(egui_winit), Some(egui_renderer)) =
            (&mut self.egui_winit, &mut self.egui_renderer)
        else {
            output.present();
            return;
        };

        let raw_input = egui_winit.take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            self.state.draw_ui(ctx);
        });
        egui_winit.handle_platform_output(window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [surface_config.width, surface_config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            egui_renderer.update_texture(device, queue, *id, image_delta);
        }
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("egui_encoder"),
        });
        egui_renderer.update_buffers(device, queue, &mut encoder, &paint_jobs, &screen_descriptor);
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            egui_renderer.free_texture(id);
        }

        output.present();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            tracing::error!("failed to initialize: {e:#}");
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // A release ends any drag even when the panel takes the event
        if let WindowEvent::MouseInput {
            state: ElementState::Released,
            button,
            ..
        } = &event
        {
            self.state.pointer.on_button(*button, false);
        }
        if let (Some(egui_winit), Some(window)) = (&mut self.egui_winit, &self.window) {
            if egui_winit.on_window_event(window, &event).consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                if let Some(showroom) = &mut self.state.showroom {
                    showroom.teardown();
                }
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.resize(new_size);
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(size) = self.window.as_ref().map(|w| w.inner_size()) {
                    self.resize(size);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::F1),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                self.state.show_panel = !self.state.show_panel;
            }
            WindowEvent::MouseInput {
                button,
                state: ElementState::Pressed,
                ..
            } => {
                self.state.pointer.on_button(button, true);
                if button == MouseButton::Left && self.state.clicks.press(Instant::now()) {
                    if let (Some(window), Some(showroom)) = (&self.window, &self.state.showroom) {
                        showroom.toggle_fullscreen(&mut WindowShell {
                            window: window.as_ref(),
                        });
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let (Some((mode, dx, dy)), Some(showroom)) = (
                    self.state.pointer.on_move(position),
                    &mut self.state.showroom,
                ) {
                    // Cursor positions are physical pixels
                    let height = self.surface_config.as_ref().map_or(1, |c| c.height) as f32;
                    let scene = showroom.scene_mut();
                    match mode {
                        DragMode::Orbit => scene.controls.rotate(dx, dy, height),
                        DragMode::Pan => scene.controls.pan(dx, dy, height, &scene.camera),
                    }
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32,
                };
                if let Some(showroom) = &mut self.state.showroom {
                    // winit reports scrolling away from the user as positive
                    showroom.scene_mut().controls.zoom(-dy);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = cli.showroom_config().context("loading configuration")?;
    tracing::info!(
        textures = %config.textures_dir.display(),
        pixel_ratio_cap = config.pixel_ratio_cap,
        "showroom-desktop starting"
    );

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = GpuApp::new(config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
