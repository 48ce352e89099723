//! sRGB transfer functions for averaging colors in linear light.
use crate::pixel::{premultiply, unpremultiply};

// https://www.w3.org/Graphics/Color/srgb
pub fn srgb_to_linear(x: f32) -> f32 {
    if x <= 0.04045 {
        x / 12.92
    } else {
        ((x + 0.055) / 1.055).powf(2.4)
    }
}

pub fn linear_to_srgb(x: f32) -> f32 {
    if x <= 0.0031308 {
        x * 12.92
    } else {
        1.055 * x.powf(1.0 / 2.4) - 0.055
    }
}

/// Convert the color channels of a premultiplied sRGB color to linear.
pub(crate) fn premultiplied_to_linear(color: [f32; 4]) -> [f32; 4] {
    let [r, g, b, a] = unpremultiply(color);
    premultiply([srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b), a])
}

/// Convert the color channels of a premultiplied linear color to sRGB.
pub(crate) fn premultiplied_to_srgb(color: [f32; 4]) -> [f32; 4] {
    let [r, g, b, a] = unpremultiply(color);
    premultiply([linear_to_srgb(r), linear_to_srgb(g), linear_to_srgb(b), a])
}
