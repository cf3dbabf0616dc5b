use nalgebra_glm as glm;

/// Camera pose with the field of view and the last cursor sample
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    pub position: glm::Vec3,
    /// Always unit length; derived from `yaw` and `pitch`.
    pub front: glm::Vec3,
    pub up: glm::Vec3,
    /// Degrees.
    pub yaw: f32,
    /// Degrees.
    pub pitch: f32,
    /// Vertical field of view in degrees.
    pub field_of_view: f32,
    /// `None` until the first cursor sample arrives.
    pub last_cursor_position: Option<(f64, f64)>,
}

impl CameraState {
    pub fn new(position: glm::Vec3, yaw: f32, pitch: f32, field_of_view: f32) -> Self {
        Self {
            position,
            front: front_from_angles(yaw, pitch),
            up: glm::vec3(0.0, 1.0, 0.0),
            yaw,
            pitch,
            field_of_view,
            last_cursor_position: None,
        }
    }

    pub fn get_orientation(&self) -> (f32, f32) {
        (self.yaw, self.pitch)
    }
}

impl Default for CameraState {
    fn default() -> Self {
        // yaw = -90 looks down -Z
        Self::new(glm::vec3(0.0, 0.0, 3.0), -90.0, 0.0, 45.0)
    }
}

/// Spherical to Cartesian: yaw turns about world up, pitch tilts off the
/// horizontal plane. Angles in degrees.
pub fn front_from_angles(yaw: f32, pitch: f32) -> glm::Vec3 {
    let (yaw, pitch) = (yaw.to_radians(), pitch.to_radians());
    glm::normalize(&glm::vec3(
        yaw.cos() * pitch.cos(),
        pitch.sin(),
        yaw.sin() * pitch.cos(),
    ))
}
