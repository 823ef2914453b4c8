use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use box_scenes::camera::FlyCamera;
use box_scenes::cli::Cli;
use box_scenes::config::AppConfig;
use box_scenes::core::{Button, ControlPanel, WinitController};
use box_scenes::draw::DrawList;
use box_scenes::frame::{FrameIterator, ProgramState};
use box_scenes::geometry::ShapeLibrary;
use box_scenes::renderer::{PanelView, Renderer};
use box_scenes::scenes::{create_scene, initial_camera, prepare_frame, Action, Scene};

const FPS_UPDATE_INTERVAL: f32 = 1.0;

struct App {
    config: AppConfig,
    show_ui: bool,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    library: ShapeLibrary,
    scene: Box<dyn Scene>,
    panel: ControlPanel<Action>,
    captions: Vec<String>,
    controller: WinitController,
    camera: FlyCamera,
    state: ProgramState,
    frames: FrameIterator,
    draws: DrawList,
    frame_count: u32,
    fps: f32,
    fps_update_timer: f32,
}

impl App {
    fn new(config: AppConfig, show_ui: bool, library: ShapeLibrary, scene: Box<dyn Scene>) -> Self {
        let panel = ControlPanel::new(scene.bindings());
        let captions = panel.captions();
        let camera = initial_camera();
        let mut state = ProgramState::new();
        state.set_camera(camera.view_matrix());

        Self {
            config,
            show_ui,
            window: None,
            renderer: None,
            library,
            scene,
            panel,
            captions,
            controller: WinitController::new(),
            camera,
            state,
            frames: FrameIterator::new(),
            draws: DrawList::new(),
            frame_count: 0,
            fps: 0.0,
            fps_update_timer: 0.0,
        }
    }

    fn update_fps(&mut self, delta: f32) {
        self.frame_count += 1;
        self.fps_update_timer += delta;

        if self.fps_update_timer >= FPS_UPDATE_INTERVAL {
            self.fps = self.frame_count as f32 / self.fps_update_timer;
            log::trace!("FPS: {:.1}", self.fps);
            self.frame_count = 0;
            self.fps_update_timer = 0.0;
        }
    }

    fn trigger(&mut self, action: Action) {
        log::debug!("{}: {:?}", self.scene.name(), action);
        self.scene.trigger(action);
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(frame) = self.frames.next() else {
            return;
        };
        self.update_fps(frame.delta);
        self.state.advance(&frame);

        if !self.scene.drives_camera() {
            self.camera.update(&self.controller);
            self.state.set_camera(self.camera.view_matrix());
        }

        let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) else {
            return;
        };

        prepare_frame(&mut self.state, &self.config, renderer.aspect());
        self.draws.clear();
        self.scene.display(&mut self.state, &mut self.draws);

        let readouts = self.scene.readouts();
        let panel = PanelView {
            title: self.scene.name(),
            captions: &self.captions,
            readouts: &readouts,
            fps: self.fps,
            camera_position: self.state.camera_position(),
        };

        match renderer.render(window, &self.draws, &self.state, &panel) {
            Ok(clicked) => {
                let actions: Vec<Action> = clicked
                    .into_iter()
                    .filter_map(|index| self.panel.action_at(index))
                    .collect();
                for action in actions {
                    self.trigger(action);
                }
            }
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                renderer.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of GPU memory");
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title(format!("{} - {}", self.config.window.title, self.scene.name()))
                .with_inner_size(winit::dpi::LogicalSize::new(
                    self.config.window.width,
                    self.config.window.height,
                )),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let renderer = match pollster::block_on(Renderer::new(window.clone(), &self.library, self.show_ui)) {
            Ok(r) => r,
            Err(e) => {
                log::error!("Failed to initialize renderer: {:#}", e);
                event_loop.exit();
                return;
            }
        };

        self.window = Some(window);
        self.renderer = Some(renderer);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle the event first
        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            if renderer.handle_event(window, &event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            event => {
                let Some(combo) = self.controller.process_event(&event) else {
                    return;
                };
                if combo.button == Button::Escape {
                    event_loop.exit();
                } else if let Some(action) = self.panel.dispatch(combo) {
                    self.trigger(action);
                }
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let library = ShapeLibrary::new().context("Failed to build shapes")?;
    let scene = create_scene(cli.scene, &config).context("Failed to build scene")?;
    log::info!("Loading scene: {}", scene.name());

    let app_controls = scene
        .bindings()
        .iter()
        .map(|binding| format!("{} {}", binding.combo, binding.label))
        .collect::<Vec<_>>()
        .join(", ");
    log::info!("Controls: {}, Escape to quit", app_controls);

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    let mut app = App::new(config, !cli.no_ui, library, scene);
    event_loop.run_app(&mut app)?;

    Ok(())
}
