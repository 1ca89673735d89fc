use roundel_engine::coords::{ColorRgba, Rect, Vec2};
use roundel_engine::core::AppControl;
use roundel_engine::input::Key;
use roundel_engine::render::PanelQuad;
use roundel_engine::render::projection::LOGICAL_CANVAS;
use roundel_engine::scene::{Corner, RenderState};

use crate::event::{DragTracker, UiEvent, UiInput};
use crate::widgets::slider::Slider;

/// Geometry of the debug panel in logical canvas pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PanelLayout {
    /// Top-left corner of the panel background.
    pub origin: Vec2,
    pub width: f32,
    pub row_height: f32,
    pub padding: f32,
}

impl PanelLayout {
    #[inline]
    fn inner_x(&self) -> f32 {
        self.origin.x + self.padding
    }

    #[inline]
    fn inner_width(&self) -> f32 {
        (self.width - 2.0 * self.padding).max(0.0)
    }

    /// Full-width rect of row `index`.
    pub fn row_rect(&self, index: usize) -> Rect {
        Rect::new(
            self.inner_x(),
            self.origin.y + self.padding + index as f32 * self.row_height,
            self.inner_width(),
            self.row_height,
        )
    }

    pub fn background(&self, rows: usize) -> Rect {
        Rect::new(
            self.origin.x,
            self.origin.y,
            self.width,
            rows as f32 * self.row_height + 2.0 * self.padding,
        )
    }
}

impl Default for PanelLayout {
    /// Right-hand column of the canvas, clear of the default quad bounds.
    fn default() -> Self {
        let width = 180.0;
        Self {
            origin: Vec2::new(LOGICAL_CANVAS.width - width - 8.0, 8.0),
            width,
            row_height: 24.0,
            padding: 8.0,
        }
    }
}

/// What a slider row edits.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SliderTarget {
    Radius,
    BorderThickness,
    Left,
    Top,
    Right,
    Bottom,
    /// Channel `0..4` (R, G, B, A) of the selected corner.
    Channel(usize),
}

impl SliderTarget {
    pub fn read(self, state: &RenderState, corner: Corner) -> f32 {
        match self {
            SliderTarget::Radius => state.style.radius,
            SliderTarget::BorderThickness => state.style.border_thickness,
            SliderTarget::Left => state.bounds.left,
            SliderTarget::Top => state.bounds.top,
            SliderTarget::Right => state.bounds.right,
            SliderTarget::Bottom => state.bounds.bottom,
            SliderTarget::Channel(i) => state.colors.get(corner).channel(i),
        }
    }

    pub fn write(self, state: &mut RenderState, corner: Corner, v: f32) {
        match self {
            SliderTarget::Radius => state.style.radius = v,
            SliderTarget::BorderThickness => state.style.border_thickness = v,
            SliderTarget::Left => state.bounds.left = v,
            SliderTarget::Top => state.bounds.top = v,
            SliderTarget::Right => state.bounds.right = v,
            SliderTarget::Bottom => state.bounds.bottom = v,
            SliderTarget::Channel(i) => state.colors.get_mut(corner).set_channel(i, v),
        }
    }
}

const CHANNEL_TINTS: [ColorRgba; 4] = [
    ColorRgba::new(0.9, 0.25, 0.25, 1.0),
    ColorRgba::new(0.25, 0.8, 0.3, 1.0),
    ColorRgba::new(0.3, 0.45, 0.95, 1.0),
    ColorRgba::new(0.75, 0.75, 0.75, 1.0),
];
const CHANNEL_LABELS: [&str; 4] = ["red", "green", "blue", "alpha"];

/// Row that holds the four corner swatches.
const SWATCH_ROW: usize = 6;

/// Slider column that edits a [`RenderState`] in place.
///
/// Rows top to bottom: radius, border, left, top, right, bottom, corner
/// swatches, then R/G/B/A of the selected corner. Keys `1`-`4` select a
/// corner, `Escape` asks the app to exit.
pub struct DebugPanel {
    layout: PanelLayout,
    rows: Vec<(SliderTarget, Slider)>,
    selected: Corner,
    drag: DragTracker,
    hover: Option<Vec2>,
}

impl DebugPanel {
    pub fn new(layout: PanelLayout, state: &RenderState) -> Self {
        let w = LOGICAL_CANVAS.width;
        let h = LOGICAL_CANVAS.height;

        let mut rows = vec![
            (SliderTarget::Radius, Slider::new("radius").max(100.0)),
            (SliderTarget::BorderThickness, Slider::new("border").max(30.0)),
            (SliderTarget::Left, Slider::new("left").max(w)),
            (SliderTarget::Top, Slider::new("top").max(h)),
            (SliderTarget::Right, Slider::new("right").max(w)),
            (SliderTarget::Bottom, Slider::new("bottom").max(h)),
        ];
        for (i, label) in CHANNEL_LABELS.into_iter().enumerate() {
            rows.push((
                SliderTarget::Channel(i),
                Slider::new(label).max(1.0).fill_color(CHANNEL_TINTS[i]),
            ));
        }

        let mut panel = Self {
            layout,
            rows,
            selected: Corner::UpperLeft,
            drag: DragTracker::default(),
            hover: None,
        };
        panel.sync_from(state);
        panel
    }

    pub fn selected(&self) -> Corner {
        self.selected
    }

    pub fn layout(&self) -> &PanelLayout {
        &self.layout
    }

    /// Selects the corner whose color the channel sliders edit.
    pub fn select(&mut self, corner: Corner, state: &RenderState) {
        if self.selected != corner {
            self.selected = corner;
            log::info!("selected corner {} ({})", corner.index() + 1, corner.label());
        }
        self.sync_from(state);
    }

    /// Pulls slider positions from `state`.
    pub fn sync_from(&mut self, state: &RenderState) {
        for (target, slider) in &mut self.rows {
            slider.set(target.read(state, self.selected));
        }
    }

    /// Canvas rect of the slider bound to `target`.
    pub fn slider_rect(&self, target: SliderTarget) -> Option<Rect> {
        self.rows
            .iter()
            .position(|(t, _)| *t == target)
            .map(|i| self.layout.row_rect(Self::row_index(i)))
    }

    fn row_index(slider_index: usize) -> usize {
        if slider_index >= SWATCH_ROW { slider_index + 1 } else { slider_index }
    }

    fn swatch_rect(&self, corner: Corner) -> Rect {
        let row = self.layout.row_rect(SWATCH_ROW);
        let gap = 6.0;
        let side = ((row.size.x - 3.0 * gap) / 4.0).min(row.size.y - 4.0).max(0.0);
        let x = row.origin.x + corner.index() as f32 * (side + gap);
        Rect::new(x, row.origin.y + (row.size.y - side) * 0.5, side, side)
    }

    /// Applies this frame's input to the panel and to `state`.
    pub fn update(&mut self, input: &UiInput, state: &mut RenderState) -> AppControl {
        if input.key_pressed(Key::Escape) {
            return AppControl::Exit;
        }
        for key in &input.keys_pressed {
            if let Some(i) = key.digit_index() {
                self.select(Corner::ALL[i], state);
            }
        }

        self.hover = input.pointer_pos;
        self.sync_from(state);

        for event in self.drag.events(input) {
            if let UiEvent::Press { pos } = event {
                if let Some(corner) = Corner::ALL.into_iter().find(|c| self.swatch_rect(*c).contains(pos)) {
                    self.select(corner, state);
                    continue;
                }
            }
            self.route(&event, state);
        }

        AppControl::Continue
    }

    fn route(&mut self, event: &UiEvent, state: &mut RenderState) {
        let corner = self.selected;
        for (i, (target, slider)) in self.rows.iter_mut().enumerate() {
            let rect = self.layout.row_rect(Self::row_index(i));
            let before = slider.current();
            if !slider.on_event(event, rect).is_consumed() {
                continue;
            }
            let v = slider.current();
            if v != before {
                target.write(state, corner, v);
                log::debug!("{} = {v:.3}", slider.label());
            }
            return;
        }
    }

    /// Panel background, swatches and sliders as flat rounded rects.
    pub fn quads(&self, state: &RenderState) -> Vec<PanelQuad> {
        let rows = self.rows.len() + 1;
        let mut out = Vec::with_capacity(rows * 3 + 5);

        out.push(
            PanelQuad::new(self.layout.background(rows), 8.0, ColorRgba::new(0.08, 0.09, 0.12, 0.85))
                .with_border(1.0, ColorRgba::new(0.3, 0.35, 0.45, 1.0)),
        );

        for corner in Corner::ALL {
            let mut q = PanelQuad::new(self.swatch_rect(corner), 3.0, state.colors.get(corner));
            if corner == self.selected {
                q = q.with_border(2.0, ColorRgba::white());
            }
            out.push(q);
        }

        for (i, (_, slider)) in self.rows.iter().enumerate() {
            let rect = self.layout.row_rect(Self::row_index(i));
            let hovered = self.hover.is_some_and(|p| rect.contains(p));
            slider.paint(rect, hovered, &mut out);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press_at(pos: Vec2) -> UiInput {
        UiInput {
            pointer_pos: Some(pos),
            pointer_down: true,
            pointer_pressed: true,
            ..UiInput::default()
        }
    }

    fn release_at(pos: Vec2) -> UiInput {
        UiInput {
            pointer_pos: Some(pos),
            pointer_released: true,
            ..UiInput::default()
        }
    }

    fn keys(k: &[Key]) -> UiInput {
        UiInput { keys_pressed: k.to_vec(), ..UiInput::default() }
    }

    // ── sliders ───────────────────────────────────────────────────────────

    #[test]
    fn radius_slider_midpoint_sets_fifty() {
        let mut state = RenderState::default();
        let mut panel = DebugPanel::new(PanelLayout::default(), &state);
        let r = panel.slider_rect(SliderTarget::Radius).unwrap();
        let mid = r.center();

        panel.update(&press_at(mid), &mut state);
        panel.update(&release_at(mid), &mut state);

        assert!((state.style.radius - 50.0).abs() < 1e-4);
    }

    #[test]
    fn drag_beyond_track_clamps_border() {
        let mut state = RenderState::default();
        let mut panel = DebugPanel::new(PanelLayout::default(), &state);
        let r = panel.slider_rect(SliderTarget::BorderThickness).unwrap();

        panel.update(&press_at(r.center()), &mut state);
        let far = Vec2::new(r.max().x + 500.0, r.center().y + 80.0);
        panel.update(&UiInput { pointer_pos: Some(far), pointer_down: true, ..UiInput::default() }, &mut state);

        assert_eq!(state.style.border_thickness, 30.0);
    }

    #[test]
    fn selected_corner_channel_edits_only_that_corner() {
        let mut state = RenderState::default();
        let before = state.colors;
        let mut panel = DebugPanel::new(PanelLayout::default(), &state);

        panel.update(&keys(&[Key::Digit2]), &mut state);
        assert_eq!(panel.selected(), Corner::UpperRight);

        let r = panel.slider_rect(SliderTarget::Channel(0)).unwrap();
        let right_end = Vec2::new(r.max().x - 0.001, r.center().y);
        panel.update(&press_at(right_end), &mut state);

        assert!(state.colors.upper_right.r > 0.99);
        assert_eq!(state.colors.upper_left, before.upper_left);
        assert_eq!(state.colors.lower_right, before.lower_right);
        assert_eq!(state.colors.lower_left, before.lower_left);
        assert_eq!(state.colors.upper_right.g, before.upper_right.g);
    }

    #[test]
    fn press_outside_panel_changes_nothing() {
        let mut state = RenderState::default();
        let before = state;
        let mut panel = DebugPanel::new(PanelLayout::default(), &state);
        panel.update(&press_at(Vec2::new(20.0, 400.0)), &mut state);
        assert_eq!(state, before);
    }

    // ── keys & swatches ───────────────────────────────────────────────────

    #[test]
    fn escape_requests_exit() {
        let mut state = RenderState::default();
        let mut panel = DebugPanel::new(PanelLayout::default(), &state);
        assert_eq!(panel.update(&keys(&[Key::Escape]), &mut state), AppControl::Exit);
    }

    #[test]
    fn swatch_press_selects_corner() {
        let mut state = RenderState::default();
        let mut panel = DebugPanel::new(PanelLayout::default(), &state);
        let swatch = panel.swatch_rect(Corner::LowerLeft);
        panel.update(&press_at(swatch.center()), &mut state);
        assert_eq!(panel.selected(), Corner::LowerLeft);
    }

    #[test]
    fn channel_sliders_follow_selection() {
        let mut state = RenderState::default();
        let mut panel = DebugPanel::new(PanelLayout::default(), &state);
        panel.update(&keys(&[Key::Digit3]), &mut state);
        let blue = panel
            .rows
            .iter()
            .find(|(t, _)| *t == SliderTarget::Channel(2))
            .map(|(_, s)| s.current());
        assert_eq!(blue, Some(1.0));
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn panel_fits_canvas_and_clears_default_quad() {
        let state = RenderState::default();
        let panel = DebugPanel::new(PanelLayout::default(), &state);
        let bg = panel.layout().background(panel.rows.len() + 1);
        assert!(bg.origin.x > state.bounds.right);
        assert!(bg.max().x <= LOGICAL_CANVAS.width);
        assert!(bg.max().y <= LOGICAL_CANVAS.height);
    }

    #[test]
    fn quads_cover_background_swatches_and_sliders() {
        let state = RenderState::default();
        let panel = DebugPanel::new(PanelLayout::default(), &state);
        let quads = panel.quads(&state);
        // background + 4 swatches + 10 sliders × (track, thumb) at least
        assert!(quads.len() >= 1 + 4 + 20);
        assert_eq!(quads[1].color, state.colors.upper_left);
    }
}
