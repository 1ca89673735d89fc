//! Pure surface configuration helpers.

use wgpu::{CompositeAlphaMode, TextureFormat};

/// Picks an 8-bit format with the requested sRGB-ness when available, else
/// the first one.
pub(crate) fn choose_surface_format(
    formats: &[TextureFormat],
    prefer_srgb: bool,
) -> Option<TextureFormat> {
    let preferred = if prefer_srgb {
        [TextureFormat::Bgra8UnormSrgb, TextureFormat::Rgba8UnormSrgb]
    } else {
        [TextureFormat::Bgra8Unorm, TextureFormat::Rgba8Unorm]
    };
    preferred
        .into_iter()
        .find(|f| formats.contains(f))
        .or_else(|| formats.first().copied())
}

pub(crate) fn choose_alpha_mode(
    supported: &[CompositeAlphaMode],
    requested: Option<CompositeAlphaMode>,
) -> CompositeAlphaMode {
    requested
        .filter(|m| supported.contains(m))
        .or_else(|| supported.first().copied())
        .unwrap_or(CompositeAlphaMode::Auto)
}

/// wgpu rejects 0×0 surfaces; a minimized window keeps its last configuration.
#[inline]
pub(crate) fn is_configurable(width: u32, height: u32) -> bool {
    width > 0 && height > 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::GpuInit;

    #[test]
    fn srgb_is_preferred_when_present() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Bgra8UnormSrgb];
        assert_eq!(choose_surface_format(&formats, true), Some(TextureFormat::Bgra8UnormSrgb));
        assert_eq!(choose_surface_format(&formats, false), Some(TextureFormat::Bgra8Unorm));
    }

    #[test]
    fn default_init_writes_unencoded_colors() {
        let init = GpuInit::default();
        // Surfaces commonly list the sRGB variant first.
        let formats = [TextureFormat::Bgra8UnormSrgb, TextureFormat::Bgra8Unorm];
        let chosen = choose_surface_format(&formats, init.prefer_srgb);
        assert_eq!(chosen, Some(TextureFormat::Bgra8Unorm));
        assert!(!chosen.is_some_and(|f| f.is_srgb()));
    }

    #[test]
    fn no_formats_means_no_surface() {
        assert_eq!(choose_surface_format(&[], true), None);
    }

    #[test]
    fn unsupported_alpha_mode_falls_back() {
        let supported = [CompositeAlphaMode::Opaque];
        assert_eq!(
            choose_alpha_mode(&supported, Some(CompositeAlphaMode::PreMultiplied)),
            CompositeAlphaMode::Opaque
        );
        assert_eq!(choose_alpha_mode(&[], None), CompositeAlphaMode::Auto);
    }

    #[test]
    fn zero_extent_is_not_configurable() {
        assert!(!is_configurable(0, 480));
        assert!(is_configurable(800, 600));
    }
}
