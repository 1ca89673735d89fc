//! CPU mirror of the SDF fragment stage in `render/shaders/sdf_quad.wgsl`.
//!
//! Every formula here has a line-for-line counterpart in the shader. Keep the
//! two in sync; the tests in this module are the only executable check of the
//! shading rules.

use crate::coords::{ColorRgba, Vec2};
use crate::scene::{CornerColors, QuadBounds, RenderState, StyleParams};

/// Signed distance from `p` to a rounded rectangle centred at the origin.
///
/// `half` is the half-extent, `r` the corner radius. Negative inside,
/// positive outside, zero on the boundary.
#[inline]
pub fn rounded_rect_sdf(p: Vec2, half: Vec2, r: f32) -> f32 {
    let d = p.abs() - half + Vec2::splat(r);
    d.x.max(d.y).min(0.0) + d.max(Vec2::zero()).length() - r
}

/// Hermite step with WGSL semantics.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Which fragment branch a style selects.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShadeMode {
    Fill,
    Bordered,
}

impl ShadeMode {
    #[inline]
    pub fn for_style(style: &StyleParams) -> Self {
        if style.has_border() { ShadeMode::Bordered } else { ShadeMode::Fill }
    }
}

/// Shades one fragment.
///
/// `tex_coord` is the interpolated quad coordinate (v flipped), `fill` the
/// interpolated vertex color. The style is sanitized the same way as the
/// uploaded uniforms.
pub fn shade(style: &StyleParams, rect_size: Vec2, tex_coord: Vec2, fill: ColorRgba) -> ColorRgba {
    let style = &style.sanitized();
    let half = rect_size * 0.5;
    let p = rect_size.mul_elem(tex_coord) - half;
    let transparent = ColorRgba::transparent();

    match ShadeMode::for_style(style) {
        ShadeMode::Fill => {
            let dist = rounded_rect_sdf(p, half, style.radius);
            let blend = smoothstep(-1.0, 1.0, dist.abs());
            let to = if dist < 0.0 { fill } else { transparent };
            transparent.mix(to, blend)
        }
        ShadeMode::Bordered => {
            let t = style.border_thickness;
            let inset = half - Vec2::splat(t / 2.0 + 1.0);
            let dist = rounded_rect_sdf(p, inset, style.radius);
            let blend = smoothstep(-1.0, 1.0, dist.abs() - t / 2.0);
            let to = if dist < 0.0 { fill } else { transparent };
            style.border_color.mix(to, blend)
        }
    }
}

/// Maps a logical pixel to the quad's texture coordinate space.
pub fn pixel_tex_coord(bounds: QuadBounds, pixel: Vec2) -> Vec2 {
    let size = bounds.size();
    Vec2::new(
        (pixel.x - bounds.left) / size.x,
        1.0 - (pixel.y - bounds.top) / size.y,
    )
}

/// Vertex-color interpolation as the rasterizer performs it over the
/// triangles `(0,1,2)` and `(0,2,3)`.
pub fn interpolate_fill(colors: &CornerColors, tex: Vec2) -> ColorRgba {
    let (u, v) = (tex.x, tex.y);
    let weighted = |ws: [(ColorRgba, f32); 3]| {
        ws.iter().fold(ColorRgba::transparent(), |acc, (c, w)| {
            ColorRgba::new(acc.r + c.r * w, acc.g + c.g * w, acc.b + c.b * w, acc.a + c.a * w)
        })
    };

    if u + v >= 1.0 {
        weighted([
            (colors.upper_left, 1.0 - u),
            (colors.upper_right, u + v - 1.0),
            (colors.lower_right, 1.0 - v),
        ])
    } else {
        weighted([
            (colors.upper_left, v),
            (colors.lower_right, u),
            (colors.lower_left, 1.0 - u - v),
        ])
    }
}

/// Shades the fragment covering `pixel`, or `None` when the pixel lies
/// outside the quad and no fragment is generated.
pub fn shade_pixel(state: &RenderState, pixel: Vec2) -> Option<ColorRgba> {
    if !state.bounds.to_rect().contains(pixel) {
        return None;
    }
    let tex = pixel_tex_coord(state.bounds, pixel);
    let fill = interpolate_fill(&state.colors, tex);
    Some(shade(&state.style, state.bounds.size(), tex, fill))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{CornerColors, QuadBounds};

    const EPS: f32 = 1e-4;

    fn style(radius: f32, border_thickness: f32) -> StyleParams {
        StyleParams { radius, border_thickness, ..StyleParams::default() }
    }

    fn state(bounds: QuadBounds, colors: CornerColors, style: StyleParams) -> RenderState {
        RenderState { bounds, colors, style }
    }

    // ── distance function ─────────────────────────────────────────────────

    #[test]
    fn sharp_rect_centre_is_inside_and_far_point_outside() {
        for &(w, h) in &[(300.0f32, 200.0f32), (10.0, 40.0), (1.0, 1.0)] {
            let half = Vec2::new(w, h) * 0.5;
            assert!(rounded_rect_sdf(Vec2::zero(), half, 0.0) < 0.0);
            assert!(rounded_rect_sdf(Vec2::new(w * 4.0, 0.0), half, 0.0) > 0.0);
            assert!(rounded_rect_sdf(Vec2::new(0.0, -h * 4.0), half, 0.0) > 0.0);
        }
    }

    #[test]
    fn edge_midpoint_is_on_boundary() {
        let half = Vec2::new(150.0, 100.0);
        assert!(rounded_rect_sdf(Vec2::new(150.0, 0.0), half, 0.0).abs() < EPS);
        assert!(rounded_rect_sdf(Vec2::new(0.0, -100.0), half, 25.0).abs() < EPS);
    }

    #[test]
    fn corner_arc_on_bisector_is_on_boundary() {
        let half = Vec2::new(150.0, 100.0);
        for &r in &[0.0f32, 1.0, 12.5, 30.0, 99.0, 100.0] {
            let centre = half - Vec2::splat(r);
            let arc = centre + Vec2::splat(r * std::f32::consts::FRAC_1_SQRT_2);
            let d = rounded_rect_sdf(arc, half, r);
            assert!(d.abs() < 1e-3, "radius {r}: dist {d}");
        }
    }

    #[test]
    fn rounded_corner_cuts_off_the_bounding_corner() {
        let half = Vec2::new(150.0, 100.0);
        assert!(rounded_rect_sdf(half, half, 0.0).abs() < EPS);
        assert!(rounded_rect_sdf(half, half, 30.0) > 0.0);
    }

    // ── smoothstep ────────────────────────────────────────────────────────

    #[test]
    fn smoothstep_edges() {
        assert_eq!(smoothstep(-1.0, 1.0, -2.0), 0.0);
        assert_eq!(smoothstep(-1.0, 1.0, 2.0), 1.0);
        assert!((smoothstep(-1.0, 1.0, 0.0) - 0.5).abs() < EPS);
    }

    // ── shading ───────────────────────────────────────────────────────────

    #[test]
    fn mode_switches_at_threshold() {
        assert_eq!(ShadeMode::for_style(&style(0.0, 0.0)), ShadeMode::Fill);
        assert_eq!(ShadeMode::for_style(&style(0.0, 0.005)), ShadeMode::Fill);
        assert_eq!(ShadeMode::for_style(&style(0.0, 0.01)), ShadeMode::Bordered);
    }

    #[test]
    fn out_of_range_style_shades_like_uploaded_uniforms() {
        let size = Vec2::new(300.0, 200.0);
        let fill = ColorRgba::white();
        let raw = StyleParams {
            border_color: ColorRgba::new(2.0, -1.0, 0.5, 1.5),
            ..style(0.0, 10.0)
        };
        let uploaded = raw.sanitized();

        // Middle of the border band on the left edge.
        let tc = Vec2::new(6.0 / 300.0, 0.5);
        let c = shade(&raw, size, tc, fill);
        assert!(c.max_diff(uploaded.border_color) < EPS, "{c:?}");
        assert!(c.max_diff(shade(&uploaded, size, tc, fill)) < EPS);

        let negative = StyleParams { border_thickness: -4.0, ..raw };
        assert!(shade(&negative, size, Vec2::new(0.5, 0.5), fill).max_diff(fill) < EPS);
    }

    #[test]
    fn white_quad_with_ten_pixel_border() {
        let s = state(
            QuadBounds::new(50.0, 50.0, 350.0, 250.0),
            CornerColors::uniform(ColorRgba::white()),
            style(0.0, 10.0),
        );
        let yellow = ColorRgba::yellow();

        // Band centred 6px inside the quad edge, ~10px wide.
        for x in [52.0f32, 56.0, 60.0] {
            let c = shade_pixel(&s, Vec2::new(x, 150.0)).unwrap();
            assert!(c.max_diff(yellow) < EPS, "x={x}: {c:?}");
        }
        let c = shade_pixel(&s, Vec2::new(200.0, 246.0)).unwrap();
        assert!(c.max_diff(yellow) < EPS);

        let centre = shade_pixel(&s, Vec2::new(200.0, 150.0)).unwrap();
        assert!(centre.max_diff(ColorRgba::white()) < EPS);

        let inner = shade_pixel(&s, Vec2::new(70.0, 150.0)).unwrap();
        assert!(inner.max_diff(ColorRgba::white()) < EPS);

        // Outermost quad pixel blends to transparent.
        let edge = shade_pixel(&s, Vec2::new(50.0, 150.0)).unwrap();
        assert!(edge.max_diff(ColorRgba::transparent()) < EPS);

        assert!(shade_pixel(&s, Vec2::new(10.0, 10.0)).is_none());
    }

    #[test]
    fn rounded_fill_without_border_never_shows_border_color() {
        let s = state(
            QuadBounds::new(50.0, 50.0, 350.0, 250.0),
            CornerColors::uniform(ColorRgba::red()),
            style(30.0, 0.0),
        );

        let mut y = 50.5;
        while y < 250.0 {
            let mut x = 50.5;
            while x < 350.0 {
                let c = shade_pixel(&s, Vec2::new(x, y)).unwrap();
                assert!(c.g.abs() < EPS && c.b.abs() < EPS, "({x},{y}): {c:?}");
                x += 3.0;
            }
            y += 3.0;
        }

        let corner = shade_pixel(&s, Vec2::new(52.0, 52.0)).unwrap();
        assert!(corner.a.abs() < EPS);
        let centre = shade_pixel(&s, Vec2::new(200.0, 150.0)).unwrap();
        assert!(centre.max_diff(ColorRgba::red()) < EPS);
    }

    #[test]
    fn fill_uses_interpolated_vertex_color() {
        let colors = CornerColors {
            upper_left: ColorRgba::new(1.0, 0.0, 0.0, 1.0),
            upper_right: ColorRgba::new(0.0, 1.0, 0.0, 1.0),
            lower_right: ColorRgba::new(0.0, 0.0, 1.0, 1.0),
            lower_left: ColorRgba::new(1.0, 1.0, 1.0, 1.0),
        };
        let s = state(QuadBounds::new(0.0, 0.0, 100.0, 100.0), colors, style(0.0, 0.0));

        // On the shared diagonal both triangles agree: average of UL and LR.
        let c = shade_pixel(&s, Vec2::new(50.0, 50.0)).unwrap();
        assert!(c.max_diff(ColorRgba::new(0.5, 0.0, 0.5, 1.0)) < EPS);

        let near_ur = interpolate_fill(&colors, Vec2::new(1.0, 1.0));
        assert!(near_ur.max_diff(colors.upper_right) < EPS);
        let near_ll = interpolate_fill(&colors, Vec2::new(0.0, 0.0));
        assert!(near_ll.max_diff(colors.lower_left) < EPS);
    }

    #[test]
    fn border_output_converges_as_thickness_shrinks() {
        let size = Vec2::new(300.0, 200.0);
        let fill = ColorRgba::white();
        let samples = [
            Vec2::new(0.5, 0.5),
            Vec2::new(0.002, 0.5),
            Vec2::new(0.004, 0.5),
            Vec2::new(0.01, 0.01),
            Vec2::new(0.3, 0.99),
        ];

        for tex in samples {
            let a = shade(&style(8.0, 0.02), size, tex, fill);
            let b = shade(&style(8.0, 0.011), size, tex, fill);
            let c = shade(&style(8.0, 0.0101), size, tex, fill);
            assert!(a.max_diff(b) < 0.02, "{tex:?}: {a:?} vs {b:?}");
            assert!(b.max_diff(c) < 0.002, "{tex:?}: {b:?} vs {c:?}");
        }
    }

    #[test]
    fn modes_agree_far_from_the_edge() {
        let size = Vec2::new(300.0, 200.0);
        let fill = ColorRgba::new(0.2, 0.4, 0.6, 1.0);
        let centre = Vec2::new(0.5, 0.5);
        let bordered = shade(&style(10.0, 0.011), size, centre, fill);
        let plain = shade(&style(10.0, 0.0), size, centre, fill);
        assert!(bordered.max_diff(plain) < EPS);
        assert!(plain.max_diff(fill) < EPS);
    }
}
