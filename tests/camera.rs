use std::time::{Duration, Instant};

use learngl::camera::{CameraController, Direction, HeldKeys, InputEvent};
use learngl::frame_timing::FrameClock;
use learngl::settings::CameraSettings;
use nalgebra_glm as glm;
use winit::keyboard::KeyCode;

/// Drives the controller the way the host does: queued pointer events
/// first, then one `KeyHeld` per held key with the frame's elapsed time.
fn run_frame(
    camera: &mut CameraController,
    queued: &mut Vec<InputEvent>,
    keys: &HeldKeys,
    dt: f32,
) {
    camera.apply_all(queued.drain(..));
    camera.apply_all(keys.frame_events(dt));
}

#[test]
fn look_right_then_walk_forward() {
    let mut camera = CameraController::default();
    let mut keys = HeldKeys::new();
    let mut queued = vec![
        InputEvent::MouseMoved(400.0, 300.0),
        // 900 px at 0.1 deg/px is a quarter turn: yaw -90 -> 0, looking down +X
        InputEvent::MouseMoved(1300.0, 300.0),
    ];

    run_frame(&mut camera, &mut queued, &keys, 0.0);
    let front = camera.state().front;
    assert!((front - glm::vec3(1.0, 0.0, 0.0)).norm() < 1e-4);

    keys.on_key(KeyCode::KeyW, true);
    run_frame(&mut camera, &mut queued, &keys, 2.0);
    let position = camera.state().position;
    assert!((position - glm::vec3(5.0, 0.0, 3.0)).norm() < 1e-4);
}

#[test]
fn opposite_keys_cancel_out() {
    let mut camera = CameraController::default();
    let mut keys = HeldKeys::new();
    keys.on_key(KeyCode::KeyA, true);
    keys.on_key(KeyCode::KeyD, true);
    keys.on_key(KeyCode::KeyW, true);
    keys.on_key(KeyCode::KeyS, true);

    run_frame(&mut camera, &mut Vec::new(), &keys, 0.3);
    assert!((camera.state().position - glm::vec3(0.0, 0.0, 3.0)).norm() < 1e-5);
}

#[test]
fn invariants_hold_over_a_long_session() {
    let mut camera = CameraController::default();
    let mut x = 0.0_f64;
    let mut y = 0.0_f64;
    for i in 0..500 {
        // deterministic zig-zag across large ranges
        x += ((i * 37) % 211) as f64 - 105.0;
        y += ((i * 53) % 173) as f64 - 80.0;
        camera.apply(InputEvent::MouseMoved(x, y));
        camera.apply(InputEvent::Scrolled(((i % 7) as f32) - 3.0));
        camera.apply(InputEvent::KeyHeld(Direction::ALL[i % 4], 0.016));

        let state = camera.state();
        assert!((-89.0..=89.0).contains(&state.pitch));
        assert!((1.0..=45.0).contains(&state.field_of_view));
        assert!((state.front.norm() - 1.0).abs() < 1e-5);
        assert!(camera.is_tracking());
    }
}

#[test]
fn view_matrix_stays_rigid_at_pitch_limit() {
    let mut camera = CameraController::default();
    camera.handle_mouse_move(0.0, 0.0);
    camera.handle_mouse_move(250.0, -5000.0);
    assert_eq!(camera.state().pitch, 89.0);

    let rotation = glm::mat4_to_mat3(&camera.view_matrix());
    for c in 0..3 {
        assert!((rotation.column(c).norm() - 1.0).abs() < 1e-4);
    }
    assert!(rotation.column(0).dot(&rotation.column(1)).abs() < 1e-4);
    assert!(rotation.column(0).dot(&rotation.column(2)).abs() < 1e-4);
    assert!(rotation.column(1).dot(&rotation.column(2)).abs() < 1e-4);
}

#[test]
fn frame_clock_feeds_translation() {
    let start = Instant::now();
    let mut clock = FrameClock::starting_at(start);
    let dt = clock.tick_at(start + Duration::from_millis(400));

    let mut camera = CameraController::default();
    camera.handle_key_held(Direction::Forward, dt);
    let travelled = 3.0 - camera.state().position.z;
    assert!((travelled - CameraSettings::default().movement_speed * 0.4).abs() < 1e-4);
}
