use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

use crate::app::app::App;
use crate::error::AppError;
use crate::settings::Settings;

pub struct AppHandler {
    pub app: Option<App>,
    settings: Settings,
    /// Set when startup fails; the event loop is asked to exit right after.
    init_error: Option<AppError>,
}

impl AppHandler {
    pub fn new(settings: Settings) -> Self {
        Self {
            app: None,
            settings,
            init_error: None,
        }
    }

    /// Startup outcome once the event loop has returned.
    pub fn finish(self) -> Result<(), AppError> {
        match self.init_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl ApplicationHandler for AppHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_some() || self.init_error.is_some() {
            return;
        }

        match App::new(event_loop, self.settings.clone()) {
            Ok(app) => {
                log::info!(
                    "Window created, capture cursor={}",
                    self.settings.window.capture_cursor
                );
                self.app = Some(app);
            }
            Err(e) => {
                self.init_error = Some(AppError::new("app-init").push_app(e));
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(app) = &mut self.app {
            let response = app.handle_event(&event);
            if response.repaint {
                app.window.request_redraw();
            }
            if response.exit {
                let state = app.camera().state();
                let (yaw, pitch) = state.get_orientation();
                log::debug!(
                    "Exiting after {:.1}s with camera at {:?}, yaw={yaw:.1} pitch={pitch:.1} fov={:.1}",
                    app.session_seconds(),
                    state.position,
                    state.field_of_view
                );
                app.shutdown();
                event_loop.exit();
            }
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let (Some(app), DeviceEvent::MouseMotion { delta }) = (&mut self.app, event) {
            app.on_mouse_motion(delta);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(app) = &mut self.app {
            if let Err(e) = app.render() {
                log::error!("Render error: {e}");
            }
            app.window.request_redraw();
        }
    }
}
