use crate::coords::{ColorRgba, Rect, Vec2};

/// Below this thickness the fragment shader takes the borderless branch.
pub const BORDER_EPSILON: f32 = 0.01;

/// Quad extent in logical pixels, stored as edges.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct QuadBounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl QuadBounds {
    #[inline]
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    /// `(right - left, bottom - top)`; uploaded as `rect_size`.
    #[inline]
    pub fn size(self) -> Vec2 {
        Vec2::new(self.right - self.left, self.bottom - self.top)
    }

    #[inline]
    pub fn to_rect(self) -> Rect {
        Rect::from_ltrb(self.left, self.top, self.right, self.bottom)
    }

    /// True when the bounds span a positive area.
    #[inline]
    pub fn is_drawable(self) -> bool {
        self.right > self.left && self.bottom > self.top
    }
}

impl Default for QuadBounds {
    fn default() -> Self {
        Self::new(50.0, 50.0, 350.0, 250.0)
    }
}

/// Quad corner, in vertex order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Corner {
    UpperLeft,
    UpperRight,
    LowerRight,
    LowerLeft,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::UpperLeft,
        Corner::UpperRight,
        Corner::LowerRight,
        Corner::LowerLeft,
    ];

    /// Vertex index of this corner.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Corner::UpperLeft => 0,
            Corner::UpperRight => 1,
            Corner::LowerRight => 2,
            Corner::LowerLeft => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Corner::UpperLeft => "upper-left",
            Corner::UpperRight => "upper-right",
            Corner::LowerRight => "lower-right",
            Corner::LowerLeft => "lower-left",
        }
    }
}

/// One RGBA color per quad corner.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CornerColors {
    pub upper_left: ColorRgba,
    pub upper_right: ColorRgba,
    pub lower_right: ColorRgba,
    pub lower_left: ColorRgba,
}

impl CornerColors {
    #[inline]
    pub const fn uniform(c: ColorRgba) -> Self {
        Self { upper_left: c, upper_right: c, lower_right: c, lower_left: c }
    }

    #[inline]
    pub fn get(&self, corner: Corner) -> ColorRgba {
        match corner {
            Corner::UpperLeft => self.upper_left,
            Corner::UpperRight => self.upper_right,
            Corner::LowerRight => self.lower_right,
            Corner::LowerLeft => self.lower_left,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, corner: Corner) -> &mut ColorRgba {
        match corner {
            Corner::UpperLeft => &mut self.upper_left,
            Corner::UpperRight => &mut self.upper_right,
            Corner::LowerRight => &mut self.lower_right,
            Corner::LowerLeft => &mut self.lower_left,
        }
    }
}

impl Default for CornerColors {
    fn default() -> Self {
        Self {
            upper_left: ColorRgba::red(),
            upper_right: ColorRgba::new(0.0, 1.0, 0.0, 1.0),
            lower_right: ColorRgba::new(0.0, 0.0, 1.0, 1.0),
            lower_left: ColorRgba::white(),
        }
    }
}

/// Shape styling pushed to the fragment shader every frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StyleParams {
    /// Corner radius in logical pixels (>= 0).
    pub radius: f32,
    /// Border band width in logical pixels (>= 0).
    pub border_thickness: f32,
    pub border_color: ColorRgba,
}

impl StyleParams {
    #[inline]
    pub fn has_border(self) -> bool {
        self.border_thickness.abs() >= BORDER_EPSILON
    }

    /// Clamps radius/thickness to be non-negative.
    #[inline]
    pub fn sanitized(self) -> Self {
        Self {
            radius: self.radius.max(0.0),
            border_thickness: self.border_thickness.max(0.0),
            border_color: self.border_color.clamped(),
        }
    }
}

impl Default for StyleParams {
    fn default() -> Self {
        Self {
            radius: 30.0,
            border_thickness: 10.0,
            border_color: ColorRgba::yellow(),
        }
    }
}

/// Everything the frame reads to draw the quad.
///
/// Owned by the application and handed out by reference: the debug panel
/// writes it, the geometry updater and uniform binder read it, all on the
/// event-loop thread within the same frame.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct RenderState {
    pub bounds: QuadBounds,
    pub colors: CornerColors,
    pub style: StyleParams,
}

impl RenderState {
    /// Fixed scene: red fill, yellow 10px border, radius 30.
    pub fn static_scene() -> Self {
        Self {
            bounds: QuadBounds::default(),
            colors: CornerColors::uniform(ColorRgba::red()),
            style: StyleParams::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_size_is_edge_difference() {
        let b = QuadBounds::new(50.0, 50.0, 350.0, 250.0);
        assert_eq!(b.size(), Vec2::new(300.0, 200.0));
        assert!(b.is_drawable());
        assert!(!QuadBounds::new(10.0, 0.0, 10.0, 5.0).is_drawable());
    }

    #[test]
    fn corner_indices_follow_vertex_order() {
        let idx: Vec<usize> = Corner::ALL.iter().map(|c| c.index()).collect();
        assert_eq!(idx, vec![0, 1, 2, 3]);
    }

    #[test]
    fn corner_colors_get_mut_touches_one_corner() {
        let mut colors = CornerColors::uniform(ColorRgba::white());
        colors.get_mut(Corner::LowerRight).r = 0.0;
        assert_eq!(colors.get(Corner::LowerRight).r, 0.0);
        assert_eq!(colors.get(Corner::UpperLeft), ColorRgba::white());
        assert_eq!(colors.get(Corner::UpperRight), ColorRgba::white());
        assert_eq!(colors.get(Corner::LowerLeft), ColorRgba::white());
    }

    #[test]
    fn border_threshold() {
        let mut s = StyleParams::default();
        s.border_thickness = 0.009;
        assert!(!s.has_border());
        s.border_thickness = 0.01;
        assert!(s.has_border());
    }

    #[test]
    fn sanitized_rejects_negative_style() {
        let s = StyleParams { radius: -3.0, border_thickness: -1.0, border_color: ColorRgba::yellow() };
        let s = s.sanitized();
        assert_eq!(s.radius, 0.0);
        assert_eq!(s.border_thickness, 0.0);
    }

    #[test]
    fn static_scene_is_red_with_yellow_border() {
        let s = RenderState::static_scene();
        assert_eq!(s.colors, CornerColors::uniform(ColorRgba::red()));
        assert_eq!(s.style.border_color, ColorRgba::yellow());
        assert_eq!(s.style.radius, 30.0);
        assert_eq!(s.style.border_thickness, 10.0);
    }
}
