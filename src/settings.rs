use crate::CONFY_APP_NAME;

use serde::{Deserialize, Serialize};

/// Tuning constants for the free-fly camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Translation speed in world units per second.
    pub movement_speed: f32,
    /// Degrees of rotation per unit of cursor movement.
    pub mouse_sensitivity: f32,
    /// Pitch is kept within `[-pitch_limit, pitch_limit]` degrees.
    pub pitch_limit: f32,
    pub min_fov: f32,
    pub max_fov: f32,
    pub near_plane: f32,
    pub far_plane: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            movement_speed: 2.5,
            mouse_sensitivity: 0.1,
            pitch_limit: 89.0,
            min_fov: 1.0,
            max_fov: 45.0,
            near_plane: 0.1,
            far_plane: 100.0,
        }
    }
}

/// Largest usable pitch; at 90 degrees `front` becomes parallel to world up.
const MAX_PITCH_LIMIT: f32 = 89.0;
const MIN_FOV: f32 = 1.0;
const MAX_FOV: f32 = 45.0;

impl CameraSettings {
    pub fn load() -> Self {
        let settings: Self = confy::load(CONFY_APP_NAME, "camera").unwrap_or_default();
        settings.or_default_if_invalid()
    }

    /// Limits must stay inside the camera's fixed pitch and zoom ranges,
    /// with ordered bounds.
    pub fn is_valid(&self) -> bool {
        self.pitch_limit > 0.0
            && self.pitch_limit <= MAX_PITCH_LIMIT
            && MIN_FOV <= self.min_fov
            && self.min_fov <= self.max_fov
            && self.max_fov <= MAX_FOV
            && self.near_plane > 0.0
            && self.near_plane < self.far_plane
            && self.movement_speed.is_finite()
            && self.mouse_sensitivity.is_finite()
    }

    pub fn or_default_if_invalid(self) -> Self {
        if self.is_valid() {
            self
        } else {
            log::warn!("Ignoring out-of-range camera settings {self:?}, using defaults");
            Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub clear_color: [f32; 4],
    pub capture_cursor: bool,
    pub vsync: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "LearnOpenGL".to_string(),
            width: 800,
            height: 600,
            clear_color: [0.2, 0.3, 0.3, 1.0],
            capture_cursor: true,
            vsync: true,
        }
    }
}

impl WindowSettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "window").unwrap_or_default()
    }

    pub fn save(&self) {
        if let Err(e) = confy::store(CONFY_APP_NAME, "window", self) {
            log::warn!("Failed to store window settings: {e}");
        }
    }

    /// Width over height, or `None` for a degenerate size.
    pub fn aspect_ratio(&self) -> Option<f32> {
        (self.width > 0 && self.height > 0).then(|| self.width as f32 / self.height as f32)
    }
}

// Aggregate struct for convenience
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub camera: CameraSettings,
    pub window: WindowSettings,
}

impl Settings {
    pub fn load() -> Self {
        Self {
            camera: CameraSettings::load(),
            window: WindowSettings::load(),
        }
    }
}
