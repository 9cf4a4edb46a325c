//! Native window frontend.
//!
//! Redraw requests are the frame clock: every `RedrawRequested` animates one
//! frame and immediately asks for the next, for as long as the window lives.
//! The scene is sized and driven in logical pixels; only the GPU surface
//! sees physical ones.

use std::sync::Arc;
use std::time::Instant;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::PlexusConfig;
use crate::error::AppError;
use crate::gpu::{GpuState, ShapeBatch};
use crate::input::{logical_size, translate, Signal};
use crate::scene::Scene;
use crate::typewriter::Typewriter;

/// Open a window and animate until it is closed.
pub fn run(config: PlexusConfig) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

pub struct App {
    config: PlexusConfig,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    scene: Option<Scene>,
    batch: ShapeBatch,
    typewriter: Option<Typewriter>,
    shown_fps: f32,
    error: Option<AppError>,
}

impl App {
    pub fn new(config: PlexusConfig) -> Self {
        Self {
            config,
            window: None,
            gpu_state: None,
            scene: None,
            batch: ShapeBatch::new(),
            typewriter: None,
            shown_fps: 0.0,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let gpu_state = pollster::block_on(GpuState::new(
            window.clone(),
            self.config.window.background_color(),
        ))?;

        let now = Instant::now();
        let size = logical_size(window.inner_size(), window.scale_factor());
        log::debug!(
            "Window {}x{} logical at scale {}",
            size.x,
            size.y,
            window.scale_factor()
        );
        self.scene = Some(Scene::new(size.x, size.y, &self.config, now));
        if self.config.typing.enabled {
            self.typewriter = Some(Typewriter::new(&self.config.typing, now));
        }

        window.request_redraw();
        self.window = Some(window);
        self.gpu_state = Some(gpu_state);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        log::error!("{}", err);
        self.error = Some(err);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();

        if let Some(scene) = &mut self.scene {
            scene.animate(&mut self.batch, now);
        }

        if let Some(gpu_state) = &mut self.gpu_state {
            match gpu_state.render(&self.batch) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    log::warn!("Surface lost, reconfiguring");
                    gpu_state.reconfigure();
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("GPU out of memory, exiting");
                    event_loop.exit();
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        let typed = self.typewriter.as_mut().is_some_and(|t| t.poll(now));
        let fps = self.scene.as_ref().map_or(0.0, |s| s.clock().fps());
        if typed || fps != self.shown_fps {
            self.shown_fps = fps;
            self.update_title();
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn update_title(&self) {
        let Some(window) = &self.window else {
            return;
        };
        let base = &self.config.window.title;
        let title = match &self.typewriter {
            Some(typewriter) => format!("{}: {}| ({:.0} fps)", base, typewriter.text(), self.shown_fps),
            None => format!("{} ({:.0} fps)", base, self.shown_fps),
        };
        window.set_title(&title);
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(err) = self.init(event_loop) {
                self.fail(event_loop, err);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let WindowEvent::RedrawRequested = event {
            self.redraw(event_loop);
            return;
        }

        let scale_factor = self.window.as_ref().map_or(1.0, |w| w.scale_factor());
        match translate(&event, scale_factor) {
            Some(Signal::Quit) => event_loop.exit(),
            Some(Signal::PointerMoved(position)) => {
                if let Some(scene) = &mut self.scene {
                    scene.set_pointer(Some(position));
                }
            }
            Some(Signal::PointerLeft) => {
                if let Some(scene) = &mut self.scene {
                    scene.set_pointer(None);
                }
            }
            Some(Signal::Resized { physical, logical }) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical);
                }
                if physical.width > 0 && physical.height > 0 {
                    if let Some(scene) = &mut self.scene {
                        scene.request_resize(Instant::now(), logical.x, logical.y);
                    }
                }
            }
            Some(Signal::Rescaled(scale_factor)) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.set_scale_factor(scale_factor);
                }
            }
            None => {}
        }
    }
}
