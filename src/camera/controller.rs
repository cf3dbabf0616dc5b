use nalgebra_glm as glm;

use super::input::{Direction, InputEvent};
use super::state::{CameraState, front_from_angles};
use crate::settings::CameraSettings;

/// First-person free-fly camera driven by held keys, cursor motion and scroll.
pub struct CameraController {
    state: CameraState,
    settings: CameraSettings,
}

impl CameraController {
    pub fn new(state: CameraState) -> Self {
        Self::with_settings(state, CameraSettings::default())
    }

    /// Out-of-range tuning is replaced by the defaults.
    pub fn with_settings(state: CameraState, settings: CameraSettings) -> Self {
        Self {
            state,
            settings: settings.or_default_if_invalid(),
        }
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    /// `true` once the first cursor sample has been seen.
    pub fn is_tracking(&self) -> bool {
        self.state.last_cursor_position.is_some()
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyHeld(direction, dt) => self.handle_key_held(direction, dt),
            InputEvent::MouseMoved(x, y) => self.handle_mouse_move(x, y),
            InputEvent::Scrolled(dy) => self.handle_scroll(dy),
        }
    }

    pub fn apply_all(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        for event in events {
            self.apply(event);
        }
    }

    /// Translate along the view direction or the strafe axis.
    pub fn handle_key_held(&mut self, direction: Direction, elapsed_seconds: f32) {
        let speed = self.settings.movement_speed * elapsed_seconds;
        let state = &mut self.state;
        match direction {
            Direction::Forward => state.position += state.front * speed,
            Direction::Backward => state.position -= state.front * speed,
            Direction::Left => {
                state.position -= glm::normalize(&glm::cross(&state.front, &state.up)) * speed
            }
            Direction::Right => {
                state.position += glm::normalize(&glm::cross(&state.front, &state.up)) * speed
            }
        }
    }

    /// Turn the camera by the cursor delta since the previous sample.
    pub fn handle_mouse_move(&mut self, cursor_x: f64, cursor_y: f64) {
        let Some((last_x, last_y)) = self.state.last_cursor_position else {
            // First sample only seeds the position, otherwise the view jumps.
            self.state.last_cursor_position = Some((cursor_x, cursor_y));
            return;
        };

        let delta_x = (cursor_x - last_x) as f32;
        // Screen y grows downwards, pitch grows upwards
        let delta_y = (last_y - cursor_y) as f32;
        self.state.last_cursor_position = Some((cursor_x, cursor_y));

        let sensitivity = self.settings.mouse_sensitivity;
        let limit = self.settings.pitch_limit;
        self.state.yaw += delta_x * sensitivity;
        self.state.pitch = (self.state.pitch + delta_y * sensitivity).clamp(-limit, limit);
        self.state.front = front_from_angles(self.state.yaw, self.state.pitch);

        log::trace!(
            "camera yaw={:.2} pitch={:.2} front={:?}",
            self.state.yaw,
            self.state.pitch,
            self.state.front
        );
    }

    /// Zoom: positive deltas narrow the field of view.
    pub fn handle_scroll(&mut self, delta_y: f32) {
        self.state.field_of_view = (self.state.field_of_view - delta_y)
            .clamp(self.settings.min_fov, self.settings.max_fov);
    }

    pub fn view_matrix(&self) -> glm::Mat4 {
        let target = self.state.position + self.state.front;
        glm::look_at(&self.state.position, &target, &self.state.up)
    }

    /// Perspective projection; `aspect_ratio` must be positive.
    pub fn projection_matrix(&self, aspect_ratio: f32) -> glm::Mat4 {
        glm::perspective(
            aspect_ratio,
            self.state.field_of_view.to_radians(),
            self.settings.near_plane,
            self.settings.far_plane,
        )
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(CameraState::default())
    }
}
