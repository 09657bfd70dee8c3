//! Spherical-harmonics DC term to display RGB conversion.

use glam::DVec3;

/// Zeroth-order real spherical-harmonic basis constant, `1 / (2 * sqrt(pi))`.
pub const SH_C0: f64 = 0.28209479177387814;

/// Color written for vertices that carry no SH coefficients.
pub const FALLBACK_GRAY: [u8; 3] = [128, 128, 128];

/// Base color of one channel in `[0, 1]` display space, before clamping.
pub fn sh_dc_to_channel(f_dc: f64) -> f64 {
    0.5 + SH_C0 * f_dc
}

/// Scale a display-space channel to a byte.
///
/// Rounds half up (`127.5 -> 128`) and saturates anything outside `[0, 255]`.
/// NaN maps to 0.
pub fn channel_to_byte(channel: f64) -> u8 {
    (channel * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Display RGB of a splat from its three DC coefficients.
pub fn sh_dc_to_rgb(sh_dc: DVec3) -> [u8; 3] {
    [
        channel_to_byte(sh_dc_to_channel(sh_dc.x)),
        channel_to_byte(sh_dc_to_channel(sh_dc.y)),
        channel_to_byte(sh_dc_to_channel(sh_dc.z)),
    ]
}
