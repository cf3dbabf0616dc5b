use std::num::NonZeroU32;

use glow::HasContext;
use glutin::config::{Config, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use nalgebra_glm as glm;
use raw_window_handle::HasWindowHandle;
use winit::event::{MouseScrollDelta, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window};

use crate::camera::{CameraController, CameraState, HeldKeys, InputEvent};
use crate::error::AppError;
use crate::frame_timing::FrameClock;
use crate::settings::Settings;

/// Pixel scroll deltas (trackpads) are converted to wheel lines with this factor.
const PIXELS_PER_LINE: f32 = 20.0;

pub struct EventResponse {
    pub repaint: bool,
    pub exit: bool,
}

impl EventResponse {
    const NONE: EventResponse = EventResponse {
        repaint: false,
        exit: false,
    };
    const EXIT: EventResponse = EventResponse {
        repaint: false,
        exit: true,
    };
}

pub struct App {
    // Field order matters: GL state must drop before the window.
    gl: glow::Context,
    gl_surface: Surface<WindowSurface>,
    gl_context: PossiblyCurrentContext,
    pub window: Window,
    camera_controller: CameraController,
    held_keys: HeldKeys,
    pending_events: Vec<InputEvent>,
    /// Unbounded cursor position built from raw motion while the cursor is captured.
    virtual_cursor: (f64, f64),
    cursor_captured: bool,
    clock: FrameClock,
    settings: Settings,
}

impl App {
    pub fn new(event_loop: &ActiveEventLoop, settings: Settings) -> Result<Self, AppError> {
        let window_attrs = Window::default_attributes()
            .with_title(settings.window.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                settings.window.width as f64,
                settings.window.height as f64,
            ));

        let template = ConfigTemplateBuilder::new().with_depth_size(24);
        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(window_attrs))
            .build(event_loop, template, pick_config)
            .map_err(|e| AppError::new("display-build").with_arg("msg", e))?;
        let window = window.ok_or_else(|| AppError::new("window-missing"))?;

        let raw_window_handle = window.window_handle()?.as_raw();
        let gl_display = gl_config.display();
        let context_attrs = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .build(Some(raw_window_handle));
        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attrs)? };

        let surface_attrs =
            window.build_surface_attributes(SurfaceAttributesBuilder::<WindowSurface>::new())?;
        let gl_surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attrs)? };
        let gl_context = not_current.make_current(&gl_surface)?;

        if settings.window.vsync {
            if let Err(e) =
                gl_surface.set_swap_interval(&gl_context, SwapInterval::Wait(NonZeroU32::MIN))
            {
                log::warn!("Failed to enable vsync: {e}");
            }
        }

        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|name| gl_display.get_proc_address(name))
        };

        let size = window.inner_size();
        unsafe {
            log::info!("OpenGL {}", gl.get_parameter_string(glow::VERSION));
            gl.enable(glow::DEPTH_TEST);
            gl.viewport(0, 0, size.width as i32, size.height as i32);
        }

        let camera_controller =
            CameraController::with_settings(CameraState::default(), settings.camera.clone());

        let mut app = Self {
            gl,
            gl_surface,
            gl_context,
            window,
            camera_controller,
            held_keys: HeldKeys::new(),
            pending_events: Vec::new(),
            virtual_cursor: (size.width as f64 / 2.0, size.height as f64 / 2.0),
            cursor_captured: false,
            clock: FrameClock::new(),
            settings,
        };

        if app.settings.window.capture_cursor {
            app.capture_cursor();
        }

        Ok(app)
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera_controller
    }

    fn capture_cursor(&mut self) {
        let grabbed = self
            .window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined));
        match grabbed {
            Ok(()) => {
                self.window.set_cursor_visible(false);
                self.cursor_captured = true;
            }
            Err(e) => log::warn!("Cursor capture unavailable, using cursor position: {e}"),
        }
    }

    pub fn handle_event(&mut self, event: &WindowEvent) -> EventResponse {
        match event {
            WindowEvent::CloseRequested => return EventResponse::EXIT,
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    if code == KeyCode::Escape && event.state.is_pressed() {
                        return EventResponse::EXIT;
                    }
                    self.held_keys.on_key(code, event.state.is_pressed());
                }
            }
            WindowEvent::Focused(false) => self.held_keys.clear(),
            WindowEvent::CursorMoved { position, .. } => {
                if !self.cursor_captured {
                    self.pending_events.push(InputEvent::MouseMoved(position.x, position.y));
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
                };
                self.pending_events.push(InputEvent::Scrolled(lines));
            }
            WindowEvent::Resized(size) => {
                self.resize(size.width, size.height);
                return EventResponse {
                    repaint: true,
                    exit: false,
                };
            }
            _ => {}
        }

        EventResponse::NONE
    }

    /// Raw mouse motion. Only used while the cursor is captured, where window
    /// cursor positions stop changing.
    pub fn on_mouse_motion(&mut self, delta: (f64, f64)) {
        if !self.cursor_captured {
            return;
        }
        self.virtual_cursor.0 += delta.0;
        self.virtual_cursor.1 += delta.1;
        self.pending_events
            .push(InputEvent::MouseMoved(self.virtual_cursor.0, self.virtual_cursor.1));
    }

    fn resize(&mut self, width: u32, height: u32) {
        let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            return;
        };
        self.gl_surface.resize(&self.gl_context, w, h);
        unsafe {
            self.gl.viewport(0, 0, width as i32, height as i32);
        }
        self.settings.window.width = width;
        self.settings.window.height = height;
        log::debug!("Resized to {width}x{height}");
    }

    /// View and projection for the current pose, or `None` while the
    /// viewport has no height.
    pub fn frame_matrices(&self) -> Option<(glm::Mat4, glm::Mat4)> {
        let aspect = self.settings.window.aspect_ratio()?;
        Some((
            self.camera_controller.view_matrix(),
            self.camera_controller.projection_matrix(aspect),
        ))
    }

    pub fn render(&mut self) -> Result<(), AppError> {
        let dt = self.clock.tick();

        // Events from the last pump first, then the keys held this frame.
        self.camera_controller.apply_all(self.pending_events.drain(..));
        self.camera_controller.apply_all(self.held_keys.frame_events(dt));

        // Nothing draws geometry yet, so the matrices are only traced.
        let Some((view, projection)) = self.frame_matrices() else {
            return Ok(());
        };
        log::trace!("view={view:?} projection={projection:?}");

        let [r, g, b, a] = self.settings.window.clear_color;
        unsafe {
            self.gl.clear_color(r, g, b, a);
            self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        self.gl_surface.swap_buffers(&self.gl_context)?;
        Ok(())
    }

    /// Remember the last window size for the next run.
    pub fn shutdown(&self) {
        self.settings.window.save();
    }

    /// Seconds since the first frame.
    pub fn session_seconds(&self) -> f32 {
        self.clock.total()
    }
}

fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs
        .reduce(|a, b| if b.num_samples() > a.num_samples() { b } else { a })
        .expect("no GL config")
}
