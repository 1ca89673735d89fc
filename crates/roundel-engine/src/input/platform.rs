//! winit → engine input translation.

use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::coords::{Vec2, Viewport};

use super::{ButtonState, InputEvent, Key, MouseButton};

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// Cursor positions are rescaled from the drawable size to `canvas`, matching
/// how the fixed projection stretches the canvas over the window. Returns
/// `None` for events the input subsystem does not represent.
pub fn translate_window_event(
    event: &WindowEvent,
    surface_size: PhysicalSize<u32>,
    canvas: Viewport,
) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft),

        WindowEvent::CursorMoved { position, .. } => {
            to_canvas(*position, surface_size, canvas).map(InputEvent::PointerMoved)
        }

        WindowEvent::MouseInput { state, button, .. } => Some(InputEvent::PointerButton {
            button: map_mouse_button(*button),
            state: map_state(*state),
        }),

        WindowEvent::KeyboardInput { event, .. } => Some(InputEvent::Key {
            key: map_key(event.physical_key),
            state: map_state(event.state),
            repeat: event.repeat,
        }),

        _ => None,
    }
}

/// Maps a physical cursor position onto the logical canvas.
///
/// `None` while the surface has no area (minimized).
pub fn to_canvas(
    pos: PhysicalPosition<f64>,
    surface_size: PhysicalSize<u32>,
    canvas: Viewport,
) -> Option<Vec2> {
    if surface_size.width == 0 || surface_size.height == 0 {
        return None;
    }
    let sx = canvas.width as f64 / surface_size.width as f64;
    let sy = canvas.height as f64 / surface_size.height as f64;
    Some(Vec2::new((pos.x * sx) as f32, (pos.y * sy) as f32))
}

fn map_state(s: ElementState) -> ButtonState {
    match s {
        ElementState::Pressed => ButtonState::Pressed,
        ElementState::Released => ButtonState::Released,
    }
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Other(3),
        WinitMouseButton::Forward => MouseButton::Other(4),
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(KeyCode::Escape) => Key::Escape,
        PhysicalKey::Code(KeyCode::Digit1 | KeyCode::Numpad1) => Key::Digit1,
        PhysicalKey::Code(KeyCode::Digit2 | KeyCode::Numpad2) => Key::Digit2,
        PhysicalKey::Code(KeyCode::Digit3 | KeyCode::Numpad3) => Key::Digit3,
        PhysicalKey::Code(KeyCode::Digit4 | KeyCode::Numpad4) => Key::Digit4,
        PhysicalKey::Code(other) => Key::Unknown(other as u32),
        // NativeKeyCode carries no stable numeric.
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}
