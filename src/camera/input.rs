use winit::keyboard::KeyCode;

/// Movement direction relative to the camera's view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Forward,
        Direction::Backward,
        Direction::Left,
        Direction::Right,
    ];

    /// WASD mapping on physical key positions.
    pub fn from_key_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::KeyW => Some(Direction::Forward),
            KeyCode::KeyS => Some(Direction::Backward),
            KeyCode::KeyA => Some(Direction::Left),
            KeyCode::KeyD => Some(Direction::Right),
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            Direction::Forward => 0,
            Direction::Backward => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

/// A single input sample for the camera controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Direction held for `elapsed_seconds` of the current frame.
    KeyHeld(Direction, f32),
    /// Absolute cursor position in screen space.
    MouseMoved(f64, f64),
    /// Vertical scroll amount, in lines.
    Scrolled(f32),
}

/// Tracks which movement keys are down between frames.
#[derive(Debug, Default, Clone)]
pub struct HeldKeys {
    held: [bool; 4],
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key transition. Returns `true` if the key maps to a direction.
    pub fn on_key(&mut self, code: KeyCode, pressed: bool) -> bool {
        match Direction::from_key_code(code) {
            Some(direction) => {
                self.held[direction.index()] = pressed;
                true
            }
            None => false,
        }
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        self.held[direction.index()]
    }

    /// Drop all held keys, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.held = [false; 4];
    }

    /// One `KeyHeld` event per held direction for this frame.
    pub fn frame_events(&self, elapsed_seconds: f32) -> impl Iterator<Item = InputEvent> + '_ {
        Direction::ALL
            .into_iter()
            .filter(|d| self.is_held(*d))
            .map(move |d| InputEvent::KeyHeld(d, elapsed_seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasd_maps_to_directions() {
        assert_eq!(Direction::from_key_code(KeyCode::KeyW), Some(Direction::Forward));
        assert_eq!(Direction::from_key_code(KeyCode::KeyS), Some(Direction::Backward));
        assert_eq!(Direction::from_key_code(KeyCode::KeyA), Some(Direction::Left));
        assert_eq!(Direction::from_key_code(KeyCode::KeyD), Some(Direction::Right));
        assert_eq!(Direction::from_key_code(KeyCode::KeyQ), None);
    }

    #[test]
    fn held_keys_emit_one_event_per_direction() {
        let mut keys = HeldKeys::new();
        assert!(keys.on_key(KeyCode::KeyW, true));
        assert!(keys.on_key(KeyCode::KeyD, true));
        assert!(!keys.on_key(KeyCode::Space, true));

        let events: Vec<_> = keys.frame_events(0.5).collect();
        assert_eq!(
            events,
            vec![
                InputEvent::KeyHeld(Direction::Forward, 0.5),
                InputEvent::KeyHeld(Direction::Right, 0.5),
            ]
        );

        keys.on_key(KeyCode::KeyW, false);
        assert_eq!(keys.frame_events(0.1).count(), 1);
    }

    #[test]
    fn clear_releases_everything() {
        let mut keys = HeldKeys::new();
        keys.on_key(KeyCode::KeyA, true);
        keys.on_key(KeyCode::KeyS, true);
        keys.clear();
        assert_eq!(keys.frame_events(1.0).count(), 0);
    }
}
