//! Color math — direct conversions without external dependencies.
//! Channel inputs are sRGB bytes; intermediate values are f64 in 0.0–1.0.

/// Linear interpolation between two bytes, rounded half-up.
///
/// `t` is expected to be already clamped to 0.0–1.0.
pub(crate) fn lerp_channel(a: u8, b: u8, t: f64) -> u8 {
    let a = a as f64;
    let b = b as f64;
    (a + (b - a) * t + 0.5).floor().clamp(0.0, 255.0) as u8
}

/// sRGB byte → linear light (WCAG 2.x transfer function).
pub(crate) fn srgb_to_linear(channel: u8) -> f64 {
    let c = channel as f64 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// RGB → HSL. All values 0.0–1.0. Returns (h, s, l).
pub(crate) fn rgb_to_hsl(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return (0.0, 0.0, l);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    (h / 6.0, s, l)
}

/// Round half-up like the stylesheet tooling downstream expects.
pub(crate) fn round_half_up(v: f64) -> i32 {
    (v + 0.5).floor() as i32
}
