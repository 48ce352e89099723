use bytemuck::Pod;
use half::f16;

/// A single stored channel value.
pub(crate) trait Channel: Pod {
    /// The value written to ignored `X` channels.
    const OPAQUE: Self;

    fn to_f32(self) -> f32;
    fn from_f32(f: f32) -> Self;

    /// Compare with the tolerance for this channel type.
    ///
    /// The `accurate` tolerance allows quantization error from a single conversion,
    /// while the approximate tolerance allows errors from 8 bit intermediate targets.
    fn approx_eq(self, other: Self, accurate: bool) -> bool;

    fn format(self) -> String;

    fn read(pixel: &[u8], index: usize) -> Self {
        let size = std::mem::size_of::<Self>();
        bytemuck::pod_read_unaligned(&pixel[index * size..index * size + size])
    }

    fn write(self, pixel: &mut [u8], index: usize) {
        let size = std::mem::size_of::<Self>();
        pixel[index * size..index * size + size].copy_from_slice(bytemuck::bytes_of(&self));
    }
}

impl Channel for u8 {
    const OPAQUE: Self = u8::MAX;

    fn to_f32(self) -> f32 {
        self as f32 / 255.0
    }

    fn from_f32(f: f32) -> Self {
        (f * 255.0 + 0.5).clamp(0.0, 255.0) as u8
    }

    fn approx_eq(self, other: Self, _accurate: bool) -> bool {
        // 8 bit values already have the lowest precision of any target.
        self == other
    }

    fn format(self) -> String {
        format!("{self:02X}")
    }
}

impl Channel for u16 {
    const OPAQUE: Self = u16::MAX;

    fn to_f32(self) -> f32 {
        self as f32 / 65535.0
    }

    fn from_f32(f: f32) -> Self {
        (f * 65535.0 + 0.5).clamp(0.0, 65535.0) as u16
    }

    fn approx_eq(self, other: Self, accurate: bool) -> bool {
        let tolerance = if accurate { 1 } else { 256 };
        self.abs_diff(other) <= tolerance
    }

    fn format(self) -> String {
        format!("{self:04X}")
    }
}

impl Channel for f16 {
    const OPAQUE: Self = f16::ONE;

    fn to_f32(self) -> f32 {
        f16::to_f32(self)
    }

    fn from_f32(f: f32) -> Self {
        f16::from_f32(f)
    }

    fn approx_eq(self, other: Self, accurate: bool) -> bool {
        float_approx_eq(self.to_f32(), other.to_f32(), accurate)
    }

    fn format(self) -> String {
        format!("{:.6}", self.to_f32())
    }
}

impl Channel for f32 {
    const OPAQUE: Self = 1.0;

    fn to_f32(self) -> f32 {
        self
    }

    fn from_f32(f: f32) -> Self {
        f
    }

    fn approx_eq(self, other: Self, accurate: bool) -> bool {
        float_approx_eq(self, other, accurate)
    }

    fn format(self) -> String {
        format!("{self:.6}")
    }
}

fn float_approx_eq(a: f32, b: f32, accurate: bool) -> bool {
    let tolerance = if accurate { 1.0 / 65535.0 } else { 1.0 / 255.0 };
    (a - b).abs() <= tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u8_from_f32_rounds() {
        assert_eq!(0, u8::from_f32(0.0));
        assert_eq!(128, u8::from_f32(0.5));
        assert_eq!(255, u8::from_f32(1.0));
        assert_eq!(0, u8::from_f32(-1.0));
        assert_eq!(255, u8::from_f32(2.0));
    }

    #[test]
    fn u8_round_trip() {
        for i in 0..=255u8 {
            assert_eq!(i, u8::from_f32(Channel::to_f32(i)));
        }
    }

    #[test]
    fn u16_round_trip() {
        for i in 0..=u16::MAX {
            assert_eq!(i, u16::from_f32(Channel::to_f32(i)));
        }
    }

    #[test]
    fn u16_from_f32_rounds() {
        assert_eq!(32768, u16::from_f32(0.5));
        assert_eq!(65535, u16::from_f32(1.5));
    }

    #[test]
    fn u16_tolerance() {
        assert!(0x8000u16.approx_eq(0x8001, true));
        assert!(!0x8000u16.approx_eq(0x8002, true));
        assert!(0x8000u16.approx_eq(0x8001, false));
        assert!(0x8000u16.approx_eq(0x8100, false));
        assert!(!0x8000u16.approx_eq(0x8101, false));
    }

    #[test]
    fn u8_is_exact() {
        assert!(!1u8.approx_eq(2, false));
        assert!(2u8.approx_eq(2, true));
    }

    #[test]
    fn float_tolerance() {
        assert!(0.5f32.approx_eq(0.5 + 1.0 / 70000.0, true));
        assert!(!0.5f32.approx_eq(0.5 + 1.0 / 1000.0, true));
        assert!(0.5f32.approx_eq(0.5 + 1.0 / 1000.0, false));
        assert!(!0.5f32.approx_eq(0.52, false));
        assert!(!f32::NAN.approx_eq(f32::NAN, false));
    }

    #[test]
    fn f16_tolerance() {
        // Adjacent halves near 0.5 differ by 2^-11.
        let a = f16::from_bits(0x3800);
        let b = f16::from_bits(0x3801);
        assert!(!a.approx_eq(b, true));
        assert!(a.approx_eq(b, false));
    }

    #[test]
    fn f16_opaque_is_one() {
        assert_eq!(0x3C00, <f16 as Channel>::OPAQUE.to_bits());
    }

    #[test]
    fn read_write_unaligned() {
        let mut pixel = [0u8; 9];
        0x1234u16.write(&mut pixel[1..], 2);
        assert_eq!(0x1234u16, u16::read(&pixel[1..], 2));
        0.25f32.write(&mut pixel[1..], 1);
        assert_eq!(0.25f32, f32::read(&pixel[1..], 1));
        f16::from_f32(0.75).write(&mut pixel[1..], 3);
        assert_eq!(0.75f32, f16::read(&pixel[1..], 3).to_f32());
    }

    #[test]
    fn format_values() {
        assert_eq!("0A", 10u8.format());
        assert_eq!("00FF", 255u16.format());
        assert_eq!("0.500000", f16::from_bits(0x3800).format());
        assert_eq!("0.250000", 0.25f32.format());
    }
}
