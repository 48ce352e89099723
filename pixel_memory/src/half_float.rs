//! Conversions between IEEE 754 binary16 bit patterns and `f32`.
//!
//! Finite values, subnormals, and infinities are preserved exactly when widening.
//! Narrowing rounds to the nearest even value and saturates to infinity.
use half::f16;
use half::slice::HalfFloatSliceExt;

pub fn half_to_float(h: u16) -> f32 {
    f16::from_bits(h).to_f32()
}

pub fn float_to_half(f: f32) -> u16 {
    f16::from_f32(f).to_bits()
}

/// Widen each value in `halves` into `floats`.
///
/// # Panics
/// Panics if the slices have different lengths.
pub fn halves_to_floats(halves: &[u16], floats: &mut [f32]) {
    let halves: &[f16] = bytemuck::cast_slice(halves);
    halves.convert_to_f32_slice(floats);
}

/// Narrow each value in `floats` into `halves`.
///
/// # Panics
/// Panics if the slices have different lengths.
pub fn floats_to_halves(floats: &[f32], halves: &mut [u16]) {
    let halves: &mut [f16] = bytemuck::cast_slice_mut(halves);
    halves.convert_from_f32_slice(floats);
}
