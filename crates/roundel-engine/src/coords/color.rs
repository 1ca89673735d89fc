/// Straight-alpha RGBA color, components in `[0, 1]`.
///
/// The SDF pipeline blends with `src_alpha / one_minus_src_alpha`, so colors
/// travel to the GPU unpremultiplied.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ColorRgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorRgba {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn transparent() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    #[inline]
    pub const fn black() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    #[inline]
    pub const fn white() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }

    #[inline]
    pub const fn red() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0)
    }

    #[inline]
    pub const fn yellow() -> Self {
        Self::new(1.0, 1.0, 0.0, 1.0)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    /// Clamps every channel to `[0, 1]`.
    #[inline]
    pub fn clamped(self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
            self.a.clamp(0.0, 1.0),
        )
    }

    /// Linear interpolation, same as WGSL `mix(self, to, t)`.
    #[inline]
    pub fn mix(self, to: ColorRgba, t: f32) -> Self {
        Self::new(
            self.r + (to.r - self.r) * t,
            self.g + (to.g - self.g) * t,
            self.b + (to.b - self.b) * t,
            self.a + (to.a - self.a) * t,
        )
    }

    /// Largest per-channel absolute difference.
    #[inline]
    pub fn max_diff(self, other: ColorRgba) -> f32 {
        (self.r - other.r)
            .abs()
            .max((self.g - other.g).abs())
            .max((self.b - other.b).abs())
            .max((self.a - other.a).abs())
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Returns channel `i` (0 = r … 3 = a).
    pub fn channel(self, i: usize) -> f32 {
        match i {
            0 => self.r,
            1 => self.g,
            2 => self.b,
            _ => self.a,
        }
    }

    /// Sets channel `i` (0 = r … 3 = a), clamped to `[0, 1]`.
    pub fn set_channel(&mut self, i: usize, v: f32) {
        let v = v.clamp(0.0, 1.0);
        match i {
            0 => self.r = v,
            1 => self.g = v,
            2 => self.b = v,
            _ => self.a = v,
        }
    }
}

impl From<ColorRgba> for wgpu::Color {
    fn from(c: ColorRgba) -> Self {
        wgpu::Color {
            r: c.r as f64,
            g: c.g as f64,
            b: c.b as f64,
            a: c.a as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mix_endpoints() {
        let a = ColorRgba::red();
        let b = ColorRgba::transparent();
        assert_eq!(a.mix(b, 0.0), a);
        assert_eq!(a.mix(b, 1.0), b);
    }

    #[test]
    fn mix_midpoint() {
        let m = ColorRgba::white().mix(ColorRgba::black(), 0.5);
        assert_eq!(m, ColorRgba::new(0.5, 0.5, 0.5, 1.0));
    }

    #[test]
    fn set_channel_clamps() {
        let mut c = ColorRgba::black();
        c.set_channel(1, 3.0);
        c.set_channel(3, -1.0);
        assert_eq!(c, ColorRgba::new(0.0, 1.0, 0.0, 0.0));
        assert_eq!(c.channel(1), 1.0);
    }
}
