//! HSL color transform used by the grid mapper.
//!
//! Mapped lightness and hue routinely leave [0, 1] (lightness starts at -0.7
//! for silent bins), so the transform normalizes its inputs first: hue wraps
//! with a Euclidean modulo, saturation and lightness clamp. The result is
//! always a finite RGB triple in [0, 1].

/// Euclidean modulo; result is in `[0, m)` for positive `m`.
#[inline]
pub fn euclidean_modulo(n: f32, m: f32) -> f32 {
    ((n % m) + m) % m
}

#[inline]
fn hue_to_rgb(p: f32, q: f32, t: f32) -> f32 {
    let t = euclidean_modulo(t, 1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

/// Convert hue/saturation/lightness to RGB.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    let h = if h.is_finite() { euclidean_modulo(h, 1.0) } else { 0.0 };
    let s = if s.is_finite() { s.clamp(0.0, 1.0) } else { 0.0 };
    let l = if l.is_finite() { l.clamp(0.0, 1.0) } else { 0.0 };

    if s == 0.0 {
        return [l, l, l];
    }
    let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    [
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f32; 3], b: [f32; 3]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-5)
    }

    #[test]
    fn primary_hues() {
        assert!(close(hsl_to_rgb(0.0, 1.0, 0.5), [1.0, 0.0, 0.0]));
        assert!(close(hsl_to_rgb(1.0 / 3.0, 1.0, 0.5), [0.0, 1.0, 0.0]));
        assert!(close(hsl_to_rgb(2.0 / 3.0, 1.0, 0.5), [0.0, 0.0, 1.0]));
    }

    #[test]
    fn hue_wraps_and_lightness_clamps() {
        assert!(close(hsl_to_rgb(-0.2, 0.8, 0.4), hsl_to_rgb(0.8, 0.8, 0.4)));
        assert!(close(hsl_to_rgb(1.65, 1.0, 0.5), hsl_to_rgb(0.65, 1.0, 0.5)));
        assert_eq!(hsl_to_rgb(0.65, 1.0, -0.7), [0.0, 0.0, 0.0]);
        assert_eq!(hsl_to_rgb(0.65, 1.0, 1.29), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn non_finite_inputs_stay_finite() {
        let rgb = hsl_to_rgb(f32::NAN, f32::INFINITY, f32::NEG_INFINITY);
        assert!(rgb.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn euclidean_modulo_is_non_negative() {
        assert!((euclidean_modulo(-0.25, 1.0) - 0.75).abs() < 1e-6);
        assert!((euclidean_modulo(2.5, 1.0) - 0.5).abs() < 1e-6);
    }
}
