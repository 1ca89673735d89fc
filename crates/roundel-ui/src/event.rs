use roundel_engine::coords::Vec2;
use roundel_engine::input::{InputFrame, InputState, Key, MouseButton};

/// Snapshot of input state for one UI frame, in logical canvas pixels.
#[derive(Debug, Clone, Default)]
pub struct UiInput {
    /// Cursor position, `None` while outside the window.
    pub pointer_pos: Option<Vec2>,
    /// `true` while the primary button is held down.
    pub pointer_down: bool,
    /// `true` for exactly one frame when the primary button goes down.
    pub pointer_pressed: bool,
    /// `true` for exactly one frame when the primary button is released.
    pub pointer_released: bool,
    /// Keys pressed this frame.
    pub keys_pressed: Vec<Key>,
}

impl UiInput {
    pub fn from_engine(state: &InputState, frame: &InputFrame) -> Self {
        Self {
            pointer_pos: state.pointer_pos,
            pointer_down: state.button_down(MouseButton::Left),
            pointer_pressed: frame.button_pressed(MouseButton::Left),
            pointer_released: frame.button_released(MouseButton::Left),
            keys_pressed: frame.keys_pressed.iter().copied().collect(),
        }
    }

    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }
}

/// Pointer events routed to widgets.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UiEvent {
    /// Primary button went down at `pos`.
    Press { pos: Vec2 },
    /// Pointer moved while the primary button is held.
    /// `start` is where the press began.
    Drag { pos: Vec2, start: Vec2 },
    /// Primary button released after a press at `start`.
    ///
    /// Fires even when `pos` is outside the widget; use
    /// `rect.contains(start)` to check ownership of the drag.
    DragEnd { pos: Vec2, start: Vec2 },
}

/// Result returned by widget event handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was handled; stop routing.
    Consumed,
    Ignored,
}

impl EventResult {
    #[inline]
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }
}

/// Turns per-frame button/pointer snapshots into press/drag/release events.
#[derive(Debug, Default)]
pub struct DragTracker {
    start: Option<Vec2>,
    last_pos: Option<Vec2>,
}

impl DragTracker {
    /// Events for this frame, in order.
    pub fn events(&mut self, input: &UiInput) -> Vec<UiEvent> {
        let mut out = Vec::new();
        let pos = input.pointer_pos.or(self.last_pos);
        self.last_pos = pos;
        let Some(pos) = pos else {
            self.start = None;
            return out;
        };

        if input.pointer_pressed {
            self.start = Some(pos);
            out.push(UiEvent::Press { pos });
        }

        if let Some(start) = self.start {
            if input.pointer_down {
                out.push(UiEvent::Drag { pos, start });
            }
            if input.pointer_released || !input.pointer_down {
                out.push(UiEvent::DragEnd { pos, start });
                self.start = None;
            }
        }

        out
    }

    pub fn is_dragging(&self) -> bool {
        self.start.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(pos: (f32, f32), down: bool, pressed: bool, released: bool) -> UiInput {
        UiInput {
            pointer_pos: Some(Vec2::new(pos.0, pos.1)),
            pointer_down: down,
            pointer_pressed: pressed,
            pointer_released: released,
            keys_pressed: Vec::new(),
        }
    }

    #[test]
    fn press_drag_release_sequence() {
        let mut t = DragTracker::default();

        let ev = t.events(&input((10.0, 10.0), true, true, false));
        assert_eq!(ev[0], UiEvent::Press { pos: Vec2::new(10.0, 10.0) });
        assert!(t.is_dragging());

        let ev = t.events(&input((30.0, 12.0), true, false, false));
        assert_eq!(
            ev,
            vec![UiEvent::Drag { pos: Vec2::new(30.0, 12.0), start: Vec2::new(10.0, 10.0) }]
        );

        let ev = t.events(&input((40.0, 12.0), false, false, true));
        assert_eq!(
            ev,
            vec![UiEvent::DragEnd { pos: Vec2::new(40.0, 12.0), start: Vec2::new(10.0, 10.0) }]
        );
        assert!(!t.is_dragging());
    }

    #[test]
    fn hover_without_press_emits_nothing() {
        let mut t = DragTracker::default();
        assert!(t.events(&input((5.0, 5.0), false, false, false)).is_empty());
    }

    #[test]
    fn pointer_leaving_keeps_last_position() {
        let mut t = DragTracker::default();
        t.events(&input((10.0, 10.0), true, true, false));
        let ev = t.events(&UiInput { pointer_pos: None, pointer_down: true, ..UiInput::default() });
        assert_eq!(ev, vec![UiEvent::Drag { pos: Vec2::new(10.0, 10.0), start: Vec2::new(10.0, 10.0) }]);
    }
}
