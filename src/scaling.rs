//! Pure dimension math: the scaling policy and dimension resolution.
//!
//! All functions here are pure and testable without any I/O or images. The
//! policy is downscale-only: a request that would enlarge the source is
//! passed through unchanged unless upscaling was explicitly allowed, so the
//! caller never pays re-encode quality loss for a no-op.

/// Uniform scale factor that fully covers the destination box.
///
/// `max(dst_w / src_w, dst_h / src_h)` — cover-fit semantics, not
/// fit-within. A zero destination dimension contributes a factor of zero and
/// therefore never drives the result.
///
/// ```
/// # use imagemill::scaling::scale_factor;
/// assert_eq!(scale_factor(100, 50, 50, 50), 1.0);
/// assert_eq!(scale_factor(200, 100, 100, 25), 0.5);
/// ```
pub fn scale_factor(src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) -> f64 {
    (dst_w as f64 / src_w as f64).max(dst_h as f64 / src_h as f64)
}

/// Whether the pipeline should transform at all.
///
/// True only for a genuine downscale (`factor < 1`) or when upscaling was
/// explicitly requested. False means "return the original encoded bytes
/// verbatim, without re-encoding".
pub fn should_transform(factor: f64, upscale: bool) -> bool {
    factor < 1.0 || upscale
}

/// Resolve requested dimensions against a source size.
///
/// A zero dimension is derived from the source aspect ratio, rounded
/// half-up (`floor(x + 0.5)`) and floored at 1 pixel. When both are zero the
/// width resolves first and the height derives from it. Returns a new pair;
/// caller-supplied options are never mutated.
pub fn resolve_dimensions(src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) -> (u32, u32) {
    let mut width = dst_w;
    let mut height = dst_h;

    if width == 0 {
        width = round_half_up(height as f64 * src_w as f64 / src_h as f64);
    }
    if height == 0 {
        height = round_half_up(width as f64 * src_h as f64 / src_w as f64);
    }

    (width, height)
}

fn round_half_up(value: f64) -> u32 {
    (value + 0.5).floor().max(1.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // scale_factor tests
    // =========================================================================

    #[test]
    fn factor_is_cover_fit() {
        // 100x50 → 50x50: height must not shrink, so the factor is 1.0
        assert_eq!(scale_factor(100, 50, 50, 50), 1.0);
    }

    #[test]
    fn factor_downscale() {
        assert_eq!(scale_factor(800, 600, 400, 300), 0.5);
    }

    #[test]
    fn factor_upscale() {
        assert_eq!(scale_factor(100, 100, 200, 50), 2.0);
    }

    #[test]
    fn factor_zero_dimension_never_drives() {
        assert_eq!(scale_factor(800, 600, 400, 0), 0.5);
        assert_eq!(scale_factor(800, 600, 0, 300), 0.5);
    }

    #[test]
    fn factor_monotonic_in_destination() {
        let base = scale_factor(1000, 800, 300, 200);
        assert!(scale_factor(1000, 800, 600, 200) >= base);
        assert!(scale_factor(1000, 800, 300, 400) >= base);
    }

    // =========================================================================
    // should_transform tests
    // =========================================================================

    #[test]
    fn transform_requires_strict_downscale() {
        assert!(should_transform(0.5, false));
        assert!(!should_transform(1.0, false));
        assert!(!should_transform(2.0, false));
    }

    #[test]
    fn upscale_flag_always_transforms() {
        assert!(should_transform(0.5, true));
        assert!(should_transform(1.0, true));
        assert!(should_transform(2.0, true));
    }

    #[test]
    fn cover_scenario_passes_through() {
        // 100x50 source, 50x50 destination, no upscale consent
        let factor = scale_factor(100, 50, 50, 50);
        assert_eq!(factor, 1.0);
        assert!(!should_transform(factor, false));
    }

    // =========================================================================
    // resolve_dimensions tests
    // =========================================================================

    #[test]
    fn resolve_keeps_explicit_dimensions() {
        assert_eq!(resolve_dimensions(800, 600, 400, 300), (400, 300));
    }

    #[test]
    fn resolve_derives_width_from_aspect() {
        // 200x100 source, height 50 → width 100
        assert_eq!(resolve_dimensions(200, 100, 0, 50), (100, 50));
    }

    #[test]
    fn resolve_derives_height_from_aspect() {
        assert_eq!(resolve_dimensions(200, 100, 100, 0), (100, 50));
    }

    #[test]
    fn resolve_rounds_half_up() {
        // 3:2 source, height 33 → width 49.5 → 50
        assert_eq!(resolve_dimensions(300, 200, 0, 33), (50, 33));
        // height 31 → width 46.5 → 47
        assert_eq!(resolve_dimensions(300, 200, 0, 31), (47, 31));
    }

    #[test]
    fn resolve_floors_at_one_pixel() {
        // 1x1000 source, height 1 → derived width 0.001 floors to 1
        assert_eq!(resolve_dimensions(1, 1000, 0, 1), (1, 1));
    }

    #[test]
    fn resolve_second_derivation_uses_first() {
        // both zero: width floors to 1 first, height derives from that width
        assert_eq!(resolve_dimensions(200, 100, 0, 0), (1, 1));
    }
}
