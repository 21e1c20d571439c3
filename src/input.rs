//! Maps winit events onto the camera controller and scene controls.

use tracing::warn;
use winit::event::{DeviceEvent, ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window};

use voxisle_camera::MoveKey;

use crate::game::{Game, RESIZE_STEP};

/// Movement bindings: WASD plus arrows, Space to rise, Shift to sink.
pub fn move_key(code: KeyCode) -> Option<MoveKey> {
    match code {
        KeyCode::KeyW | KeyCode::ArrowUp => Some(MoveKey::Forward),
        KeyCode::KeyS | KeyCode::ArrowDown => Some(MoveKey::Backward),
        KeyCode::KeyA | KeyCode::ArrowLeft => Some(MoveKey::Left),
        KeyCode::KeyD | KeyCode::ArrowRight => Some(MoveKey::Right),
        KeyCode::Space => Some(MoveKey::Up),
        KeyCode::ShiftLeft | KeyCode::ShiftRight => Some(MoveKey::Down),
        _ => None,
    }
}

/// Route a keyboard event to movement or scene controls.
pub fn handle_key(game: &mut Game, window: &Window, event: &KeyEvent) {
    let PhysicalKey::Code(code) = event.physical_key else {
        return;
    };
    let pressed = event.state == ElementState::Pressed;

    if let Some(key) = move_key(code) {
        game.controller().on_key(key, pressed);
        return;
    }
    if !pressed || event.repeat {
        return;
    }
    match code {
        KeyCode::Escape => release_cursor(game, window),
        KeyCode::BracketLeft => game.resize_island(-RESIZE_STEP),
        KeyCode::BracketRight => game.resize_island(RESIZE_STEP),
        _ => {}
    }
}

/// Left click on the surface requests pointer lock.
pub fn handle_click(game: &mut Game, window: &Window) {
    if !game.controller().on_click() {
        return;
    }
    let granted = grab_cursor(window);
    game.controller().on_pointer_lock_change(granted);
}

/// Raw mouse motion drives the camera while locked.
pub fn handle_device_event(game: &mut Game, event: &DeviceEvent) {
    if let DeviceEvent::MouseMotion { delta } = event {
        game.controller()
            .on_mouse_move(delta.0 as f32, delta.1 as f32);
    }
}

/// Release the cursor grab and tell the controller the lock is gone.
pub fn release_cursor(game: &mut Game, window: &Window) {
    if let Err(err) = window.set_cursor_grab(CursorGrabMode::None) {
        warn!("Failed to release cursor grab: {err}");
    }
    window.set_cursor_visible(true);
    game.controller().on_pointer_lock_change(false);
}

fn grab_cursor(window: &Window) -> bool {
    // On Linux, Locked mode breaks DeviceEvent delivery under some
    // compositors; Confined keeps raw motion flowing.
    #[cfg(target_os = "linux")]
    let result = window.set_cursor_grab(CursorGrabMode::Confined);

    #[cfg(not(target_os = "linux"))]
    let result = window
        .set_cursor_grab(CursorGrabMode::Locked)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));

    match result {
        Ok(()) => {
            window.set_cursor_visible(false);
            true
        }
        Err(err) => {
            // A denied grab is tolerated; the next click retries.
            warn!("Failed to capture cursor: {err}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasd_and_arrows_map_to_the_same_directions() {
        assert_eq!(move_key(KeyCode::KeyW), Some(MoveKey::Forward));
        assert_eq!(move_key(KeyCode::ArrowUp), Some(MoveKey::Forward));
        assert_eq!(move_key(KeyCode::KeyA), Some(MoveKey::Left));
        assert_eq!(move_key(KeyCode::ArrowRight), Some(MoveKey::Right));
        assert_eq!(move_key(KeyCode::Space), Some(MoveKey::Up));
        assert_eq!(move_key(KeyCode::ShiftLeft), Some(MoveKey::Down));
    }

    #[test]
    fn unbound_keys_are_ignored() {
        assert_eq!(move_key(KeyCode::KeyQ), None);
        assert_eq!(move_key(KeyCode::Tab), None);
    }
}
