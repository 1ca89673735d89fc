/// Viewport size in logical pixels.
///
/// Renderers treat this as the coordinate basis for the projection matrix.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }
}

/// Rasterization viewport in physical pixels: `(x, y, width, height)`.
///
/// Follows the drawable size of the window; updated on every resize.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct PixelViewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelViewport {
    /// Full-surface viewport anchored at the origin.
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self { x: 0, y: 0, width, height }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_viewport_covers_whole_surface() {
        let vp = PixelViewport::from_size(800, 600);
        assert_eq!(vp, PixelViewport { x: 0, y: 0, width: 800, height: 600 });
        assert!(!vp.is_empty());
    }

    #[test]
    fn minimized_window_viewport_is_empty() {
        assert!(PixelViewport::from_size(0, 600).is_empty());
    }

    #[test]
    fn logical_viewport_validity() {
        assert!(Viewport::new(640.0, 480.0).is_valid());
        assert!(!Viewport::new(0.0, 480.0).is_valid());
        assert!(!Viewport::new(f32::INFINITY, 480.0).is_valid());
    }
}
