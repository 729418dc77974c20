/// Windowed front end for the rotating cube demo
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use spin3d_core::{face_colors, CubeGeometry, Orientation, RotationSettings, Spin};
use winit::{
    dpi::PhysicalSize,
    error::EventLoopError,
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

pub mod config;
pub mod renderer;

pub use config::CubeConfig;
use renderer::Renderer;

pub const WINDOW_TITLE: &str = "spin3d";
pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;

/// End-of-frame delay; an approximate frame-rate cap, not a precise timer.
const FRAME_DELAY: Duration = Duration::from_millis(10);

/// Owns the cube state and drives the per-frame cycle.
struct CubeApp {
    renderer: Renderer,
    settings: RotationSettings,
    spin: Spin,
    orientation: Orientation,
    frame_count: u32,
    last_second: Instant,
}

impl CubeApp {
    fn new(renderer: Renderer, settings: RotationSettings) -> Self {
        Self {
            renderer,
            settings,
            spin: Spin::default(),
            orientation: Orientation::identity(),
            frame_count: 0,
            last_second: Instant::now(),
        }
    }

    fn toggle_spin(&mut self) {
        self.spin.toggle();
        log::info!(
            "rotation {}",
            if self.spin.is_rotating() {
                "started"
            } else {
                "paused"
            }
        );
    }

    /// Compose one increment onto the orientation while rotating; a paused
    /// cube keeps redrawing at its last-reached orientation.
    fn update(&mut self) {
        if self.spin.is_rotating() {
            self.orientation
                .rotate(self.settings.axis, self.settings.step_degrees());
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.renderer.render(self.orientation.matrix())?;

        self.frame_count += 1;
        let elapsed = self.last_second.elapsed();
        if elapsed.as_secs() >= 1 {
            log::debug!("fps: {:.1}", self.frame_count as f32 / elapsed.as_secs_f32());
            self.frame_count = 0;
            self.last_second = Instant::now();
        }
        Ok(())
    }
}

/// Open the window and run the event loop until Escape or window close.
pub fn run(config: CubeConfig) -> Result<(), EventLoopError> {
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
            .with_resizable(false)
            .build(&event_loop)
            .expect("Failed to create the window"),
    );

    let geometry = CubeGeometry::new(config.size);
    let colors = face_colors(config.color);
    let renderer = Renderer::new(window.clone(), &geometry, &colors);
    let mut app = CubeApp::new(renderer, RotationSettings::new(config.angle, config.speed));

    event_loop.run(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => elwt.exit(),

                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            physical_key: PhysicalKey::Code(code),
                            state: ElementState::Pressed,
                            repeat: false,
                            ..
                        },
                    ..
                } => match code {
                    KeyCode::Escape => elwt.exit(),
                    KeyCode::Space => app.toggle_spin(),
                    _ => {}
                },

                WindowEvent::Resized(size) => app.renderer.resize(size.width, size.height),

                WindowEvent::RedrawRequested => {
                    app.update();
                    match app.render() {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("out of GPU memory, exiting");
                            elwt.exit();
                        }
                        Err(err) => log::warn!("dropped frame: {:?}", err),
                    }
                    thread::sleep(FRAME_DELAY);
                }

                _ => {}
            },

            Event::AboutToWait => window.request_redraw(),

            _ => {}
        }
    })
}
