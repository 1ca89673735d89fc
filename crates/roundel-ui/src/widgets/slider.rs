use roundel_engine::coords::{ColorRgba, Rect, Vec2};
use roundel_engine::render::PanelQuad;

use crate::event::{EventResult, UiEvent};

/// A horizontal slider for selecting a value in a range.
///
/// Press anywhere on the track, or drag, to set the value at that position.
///
/// # Example
/// ```rust,ignore
/// let mut s = Slider::new("radius").min(0.0).max(100.0).value(30.0);
/// if s.on_event(&event, rect).is_consumed() {
///     state.style.radius = s.current();
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Slider {
    label: &'static str,
    /// Current value (clamped to [min, max]).
    value: f32,
    min: f32,
    max: f32,
    track_height: f32,
    thumb_radius: f32,
    track_color: ColorRgba,
    fill_color: ColorRgba,
    thumb_color: ColorRgba,
    thumb_border_color: ColorRgba,
}

impl Slider {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            value: 0.0,
            min: 0.0,
            max: 1.0,
            track_height: 4.0,
            thumb_radius: 6.0,
            track_color: ColorRgba::new(0.15, 0.2, 0.3, 1.0),
            fill_color: ColorRgba::new(0.2, 0.6, 1.0, 1.0),
            thumb_color: ColorRgba::white(),
            thumb_border_color: ColorRgba::new(0.4, 0.6, 0.9, 1.0),
        }
    }

    pub fn value(mut self, v: f32) -> Self {
        self.set(v);
        self
    }
    pub fn min(mut self, v: f32) -> Self { self.min = v; self }
    pub fn max(mut self, v: f32) -> Self { self.max = v; self }
    pub fn fill_color(mut self, v: ColorRgba) -> Self { self.fill_color = v; self }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn current(&self) -> f32 {
        self.value
    }

    pub fn range(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    /// Sets the value without emitting anything; used to mirror external state.
    pub fn set(&mut self, v: f32) {
        self.value = if v.is_finite() { v.clamp(self.min, self.max) } else { self.min };
    }

    /// Normalized value in [0, 1].
    pub fn normalized(&self) -> f32 {
        if (self.max - self.min).abs() < f32::EPSILON {
            0.0
        } else {
            ((self.value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
        }
    }

    /// Value under pointer x within `rect`.
    pub fn value_at(&self, rect: Rect, x: f32) -> f32 {
        if rect.size.x <= 0.0 {
            return self.min;
        }
        let t = ((x - rect.origin.x) / rect.size.x).clamp(0.0, 1.0);
        self.min + t * (self.max - self.min)
    }

    pub fn on_event(&mut self, event: &UiEvent, rect: Rect) -> EventResult {
        match *event {
            UiEvent::Press { pos } if rect.contains(pos) => {
                self.value = self.value_at(rect, pos.x);
                EventResult::Consumed
            }
            UiEvent::Drag { pos, start } | UiEvent::DragEnd { pos, start }
                if rect.contains(start) =>
            {
                self.value = self.value_at(rect, pos.x);
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    /// Track, fill and thumb quads for `rect`.
    pub fn paint(&self, rect: Rect, hovered: bool, out: &mut Vec<PanelQuad>) {
        let cy = rect.origin.y + rect.size.y * 0.5;
        let corner = self.track_height * 0.5;

        let track = Rect::new(rect.origin.x, cy - corner, rect.size.x, self.track_height);
        out.push(PanelQuad::new(track, corner, self.track_color));

        let thumb_cx = track.origin.x + self.normalized() * track.size.x;
        let fill_w = (thumb_cx - track.origin.x).max(0.0);
        if fill_w > 0.0 {
            let fill = Rect::new(track.origin.x, track.origin.y, fill_w, track.size.y);
            out.push(PanelQuad::new(fill, corner, self.fill_color));
        }

        let r = if hovered { self.thumb_radius + 1.5 } else { self.thumb_radius };
        let thumb = Rect::new(thumb_cx - r, cy - r, 2.0 * r, 2.0 * r);
        out.push(
            PanelQuad::new(thumb, r, self.thumb_color).with_border(2.0, self.thumb_border_color),
        );
    }
}
