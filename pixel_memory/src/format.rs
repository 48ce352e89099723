use strum::{EnumCount, EnumIter, FromRepr};

use crate::FormatError;

/// The number of planes a layout can describe.
pub const MAX_PLANES: usize = 4;

/// The memory representation of a single pixel.
///
/// Names list the stored channels in memory order.
/// 16 and 32 bit channels use native endianness.
/// `X` channels are padding and ignored when reading.
/// Formats without alpha or with `X` padding are opaque.
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, EnumIter, EnumCount, FromRepr)]
#[repr(u32)]
pub enum MemoryFormat {
    B8G8R8A8Premultiplied,
    A8R8G8B8Premultiplied,
    R8G8B8A8Premultiplied,
    B8G8R8A8,
    A8R8G8B8,
    R8G8B8A8,
    A8B8G8R8,
    R8G8B8,
    B8G8R8,
    R16G16B16,
    R16G16B16A16Premultiplied,
    R16G16B16A16,
    R16G16B16Float,
    R16G16B16A16FloatPremultiplied,
    R16G16B16A16Float,
    R32G32B32Float,
    R32G32B32A32FloatPremultiplied,
    R32G32B32A32Float,
    G8A8Premultiplied,
    G8A8,
    G8,
    G16A16Premultiplied,
    G16A16,
    G16,
    A8,
    A16,
    A16Float,
    A32Float,
    A8B8G8R8Premultiplied,
    B8G8R8X8,
    X8R8G8B8,
    R8G8B8X8,
    X8B8G8R8,
}

/// The numeric type of each stored channel.
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, EnumIter)]
pub enum ChannelType {
    /// Unsigned normalized 8 bit integer.
    U8,
    /// Unsigned normalized 16 bit integer.
    U16,
    /// IEEE 754 binary16 half precision float.
    F16,
    /// IEEE 754 binary32 single precision float.
    F32,
}

impl ChannelType {
    pub fn size_in_bytes(&self) -> usize {
        match self {
            ChannelType::U8 => 1,
            ChannelType::U16 => 2,
            ChannelType::F16 => 2,
            ChannelType::F32 => 4,
        }
    }
}

/// How the color channels relate to the alpha channel.
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Alpha {
    /// Color channels are already multiplied by alpha.
    Premultiplied,
    /// Color channels are stored independently of alpha.
    Straight,
    /// There is no alpha channel or only an ignored `X` channel.
    Opaque,
}

/// Storage indices of the red, green, blue, and alpha channels within a pixel.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) struct ChannelIndices {
    /// Gray formats use the same index for all color channels.
    pub colors: Option<[usize; 3]>,
    pub alpha: Option<usize>,
    /// The ignored channel of `X` formats.
    pub padding: Option<usize>,
}

impl MemoryFormat {
    pub fn channel_type(&self) -> ChannelType {
        use MemoryFormat as F;
        match self {
            F::R8G8B8
            | F::B8G8R8
            | F::B8G8R8A8Premultiplied
            | F::A8R8G8B8Premultiplied
            | F::R8G8B8A8Premultiplied
            | F::A8B8G8R8Premultiplied
            | F::B8G8R8A8
            | F::A8R8G8B8
            | F::R8G8B8A8
            | F::A8B8G8R8
            | F::B8G8R8X8
            | F::X8R8G8B8
            | F::R8G8B8X8
            | F::X8B8G8R8
            | F::G8
            | F::G8A8
            | F::G8A8Premultiplied
            | F::A8 => ChannelType::U8,
            F::R16G16B16
            | F::R16G16B16A16Premultiplied
            | F::R16G16B16A16
            | F::G16
            | F::G16A16
            | F::G16A16Premultiplied
            | F::A16 => ChannelType::U16,
            F::R16G16B16Float
            | F::R16G16B16A16FloatPremultiplied
            | F::R16G16B16A16Float
            | F::A16Float => ChannelType::F16,
            F::R32G32B32Float
            | F::R32G32B32A32FloatPremultiplied
            | F::R32G32B32A32Float
            | F::A32Float => ChannelType::F32,
        }
    }

    /// The number of color channels ignoring alpha.
    ///
    /// This is `3` for RGB, `1` for gray, and `0` for alpha only formats.
    pub fn n_colors(&self) -> usize {
        use MemoryFormat as F;
        match self {
            F::R8G8B8
            | F::B8G8R8
            | F::R16G16B16
            | F::R16G16B16Float
            | F::R32G32B32Float
            | F::B8G8R8A8Premultiplied
            | F::A8R8G8B8Premultiplied
            | F::R8G8B8A8Premultiplied
            | F::A8B8G8R8Premultiplied
            | F::B8G8R8A8
            | F::A8R8G8B8
            | F::R8G8B8A8
            | F::A8B8G8R8
            | F::B8G8R8X8
            | F::X8R8G8B8
            | F::R8G8B8X8
            | F::X8B8G8R8
            | F::R16G16B16A16Premultiplied
            | F::R16G16B16A16
            | F::R16G16B16A16FloatPremultiplied
            | F::R16G16B16A16Float
            | F::R32G32B32A32FloatPremultiplied
            | F::R32G32B32A32Float => 3,
            F::G8 | F::G16 | F::G8A8Premultiplied | F::G8A8 | F::G16A16Premultiplied | F::G16A16 => {
                1
            }
            F::A8 | F::A16 | F::A16Float | F::A32Float => 0,
        }
    }

    pub fn alpha(&self) -> Alpha {
        use MemoryFormat as F;
        match self {
            F::B8G8R8A8Premultiplied
            | F::A8R8G8B8Premultiplied
            | F::R8G8B8A8Premultiplied
            | F::A8B8G8R8Premultiplied
            | F::R16G16B16A16Premultiplied
            | F::R16G16B16A16FloatPremultiplied
            | F::R32G32B32A32FloatPremultiplied
            | F::G8A8Premultiplied
            | F::G16A16Premultiplied => Alpha::Premultiplied,
            // Alpha only formats have nothing to premultiply.
            F::A8 | F::A16 | F::A16Float | F::A32Float => Alpha::Premultiplied,
            F::B8G8R8A8
            | F::A8R8G8B8
            | F::R8G8B8A8
            | F::A8B8G8R8
            | F::R16G16B16A16
            | F::R16G16B16A16Float
            | F::R32G32B32A32Float
            | F::G8A8
            | F::G16A16 => Alpha::Straight,
            F::R8G8B8
            | F::B8G8R8
            | F::R16G16B16
            | F::R16G16B16Float
            | F::R32G32B32Float
            | F::B8G8R8X8
            | F::X8R8G8B8
            | F::R8G8B8X8
            | F::X8B8G8R8
            | F::G8
            | F::G16 => Alpha::Opaque,
        }
    }

    /// Returns `true` if the color channels are stored multiplied by alpha.
    pub fn is_premultiplied(&self) -> bool {
        self.alpha() == Alpha::Premultiplied
    }

    /// Returns `true` if the format stores a meaningful alpha channel.
    pub fn has_alpha(&self) -> bool {
        self.alpha() != Alpha::Opaque
    }

    /// The number of stored channels per pixel including alpha and padding.
    pub fn n_channels(&self) -> usize {
        self.plane_block_bytes(0) / self.channel_type().size_in_bytes()
    }

    /// The number of independently strided planes.
    pub fn n_planes(&self) -> usize {
        // Every supported format is packed into a single plane.
        1
    }

    /// The width in pixels of a block in `plane`.
    pub fn plane_block_width(&self, plane: usize) -> usize {
        self.assert_plane(plane);
        1
    }

    /// The height in pixels of a block in `plane`.
    pub fn plane_block_height(&self, plane: usize) -> usize {
        self.assert_plane(plane);
        1
    }

    /// The size in bytes of a block in `plane`.
    pub fn plane_block_bytes(&self, plane: usize) -> usize {
        self.assert_plane(plane);
        use MemoryFormat as F;
        match self {
            F::A8 => 1,
            F::G8 => 1,
            F::G8A8Premultiplied | F::G8A8 => 2,
            F::A16 | F::A16Float => 2,
            F::G16 => 2,
            F::R8G8B8 | F::B8G8R8 => 3,
            F::B8G8R8A8Premultiplied
            | F::A8R8G8B8Premultiplied
            | F::R8G8B8A8Premultiplied
            | F::A8B8G8R8Premultiplied
            | F::B8G8R8A8
            | F::A8R8G8B8
            | F::R8G8B8A8
            | F::A8B8G8R8
            | F::B8G8R8X8
            | F::X8R8G8B8
            | F::R8G8B8X8
            | F::X8B8G8R8 => 4,
            F::G16A16Premultiplied | F::G16A16 => 4,
            F::A32Float => 4,
            F::R16G16B16 | F::R16G16B16Float => 6,
            F::R16G16B16A16Premultiplied
            | F::R16G16B16A16
            | F::R16G16B16A16FloatPremultiplied
            | F::R16G16B16A16Float => 8,
            F::R32G32B32Float => 12,
            F::R32G32B32A32FloatPremultiplied | F::R32G32B32A32Float => 16,
        }
    }

    fn assert_plane(&self, plane: usize) {
        assert!(
            plane < self.n_planes(),
            "plane {plane} is out of range for {self:?} with {} planes",
            self.n_planes()
        );
    }

    /// The format used to store downsampled mip levels of this format.
    ///
    /// Formats with alpha are averaged in premultiplied space,
    /// so they map to the premultiplied RGBA variant of the same channel type.
    /// Opaque formats stay opaque and gray formats stay gray.
    pub fn mipmap_format(&self) -> MemoryFormat {
        use MemoryFormat as F;
        match self {
            F::B8G8R8A8Premultiplied
            | F::A8R8G8B8Premultiplied
            | F::R8G8B8A8Premultiplied
            | F::A8B8G8R8Premultiplied
            | F::B8G8R8A8
            | F::A8R8G8B8
            | F::R8G8B8A8
            | F::A8B8G8R8 => F::R8G8B8A8Premultiplied,
            F::B8G8R8X8 | F::X8R8G8B8 | F::R8G8B8X8 | F::X8B8G8R8 => F::R8G8B8X8,
            F::R8G8B8 | F::B8G8R8 => F::R8G8B8,
            F::R16G16B16 => F::R16G16B16,
            F::R16G16B16A16Premultiplied | F::R16G16B16A16 => F::R16G16B16A16Premultiplied,
            F::R16G16B16Float => F::R16G16B16Float,
            F::R16G16B16A16FloatPremultiplied | F::R16G16B16A16Float => {
                F::R16G16B16A16FloatPremultiplied
            }
            F::R32G32B32Float => F::R32G32B32Float,
            F::R32G32B32A32FloatPremultiplied | F::R32G32B32A32Float => {
                F::R32G32B32A32FloatPremultiplied
            }
            F::G8A8Premultiplied | F::G8A8 => F::G8A8Premultiplied,
            F::G8 => F::G8,
            F::G16A16Premultiplied | F::G16A16 => F::G16A16Premultiplied,
            F::G16 => F::G16,
            F::A8 => F::A8,
            F::A16 => F::A16,
            F::A16Float => F::A16Float,
            F::A32Float => F::A32Float,
        }
    }

    pub(crate) fn channel_indices(&self) -> ChannelIndices {
        use MemoryFormat as F;
        let (colors, alpha, padding) = match self {
            F::R8G8B8A8Premultiplied
            | F::R8G8B8A8
            | F::R16G16B16A16Premultiplied
            | F::R16G16B16A16
            | F::R16G16B16A16FloatPremultiplied
            | F::R16G16B16A16Float
            | F::R32G32B32A32FloatPremultiplied
            | F::R32G32B32A32Float => (Some([0, 1, 2]), Some(3), None),
            F::B8G8R8A8Premultiplied | F::B8G8R8A8 => (Some([2, 1, 0]), Some(3), None),
            F::A8R8G8B8Premultiplied | F::A8R8G8B8 => (Some([1, 2, 3]), Some(0), None),
            F::A8B8G8R8Premultiplied | F::A8B8G8R8 => (Some([3, 2, 1]), Some(0), None),
            F::R8G8B8 | F::R16G16B16 | F::R16G16B16Float | F::R32G32B32Float => {
                (Some([0, 1, 2]), None, None)
            }
            F::B8G8R8 => (Some([2, 1, 0]), None, None),
            F::R8G8B8X8 => (Some([0, 1, 2]), None, Some(3)),
            F::B8G8R8X8 => (Some([2, 1, 0]), None, Some(3)),
            F::X8R8G8B8 => (Some([1, 2, 3]), None, Some(0)),
            F::X8B8G8R8 => (Some([3, 2, 1]), None, Some(0)),
            F::G8A8Premultiplied | F::G8A8 | F::G16A16Premultiplied | F::G16A16 => {
                (Some([0, 0, 0]), Some(1), None)
            }
            F::G8 | F::G16 => (Some([0, 0, 0]), None, None),
            F::A8 | F::A16 | F::A16Float | F::A32Float => (None, Some(0), None),
        };
        ChannelIndices {
            colors,
            alpha,
            padding,
        }
    }
}

impl TryFrom<u32> for MemoryFormat {
    type Error = FormatError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::from_repr(value).ok_or(FormatError::InvalidFormat(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use strum::IntoEnumIterator;

    #[test]
    fn block_bytes_match_channels() {
        for format in MemoryFormat::iter() {
            let indices = format.channel_indices();
            // Gray formats store one channel for all three colors.
            let expected = format.n_colors().min(1) + 2 * usize::from(format.n_colors() == 3)
                + usize::from(indices.alpha.is_some())
                + usize::from(indices.padding.is_some());
            assert!((1..=4).contains(&expected), "{format:?}");
            assert_eq!(
                expected * format.channel_type().size_in_bytes(),
                format.plane_block_bytes(0),
                "{format:?}"
            );
            assert_eq!(expected, format.n_channels(), "{format:?}");
        }
    }

    #[test]
    fn channel_indices_in_range() {
        for format in MemoryFormat::iter() {
            let n = format.n_channels();
            let indices = format.channel_indices();
            for i in indices
                .colors
                .into_iter()
                .flatten()
                .chain(indices.alpha)
                .chain(indices.padding)
            {
                assert!(i < n, "{format:?}");
            }
            assert_eq!(format.n_colors() == 0, indices.colors.is_none(), "{format:?}");
        }
    }

    #[test]
    fn alpha_matches_channels() {
        for format in MemoryFormat::iter() {
            let indices = format.channel_indices();
            match format.alpha() {
                Alpha::Opaque => assert!(indices.alpha.is_none(), "{format:?}"),
                Alpha::Premultiplied | Alpha::Straight => {
                    assert!(indices.alpha.is_some(), "{format:?}")
                }
            }
            // Only opaque formats have padding.
            if indices.padding.is_some() {
                assert_eq!(Alpha::Opaque, format.alpha(), "{format:?}");
            }
        }
    }

    #[test]
    fn single_plane_blocks() {
        for format in MemoryFormat::iter() {
            assert_eq!(1, format.n_planes());
            assert_eq!(1, format.plane_block_width(0));
            assert_eq!(1, format.plane_block_height(0));
        }
    }

    #[test]
    #[should_panic]
    fn plane_block_bytes_invalid_plane() {
        MemoryFormat::R8G8B8A8.plane_block_bytes(1);
    }

    #[test]
    fn mipmap_format_preserves_channels() {
        for format in MemoryFormat::iter() {
            let mipmap = format.mipmap_format();
            assert_eq!(format.channel_type(), mipmap.channel_type(), "{format:?}");
            assert_eq!(format.n_colors(), mipmap.n_colors(), "{format:?}");
            assert_eq!(format.has_alpha(), mipmap.has_alpha(), "{format:?}");
            if mipmap.has_alpha() {
                assert!(mipmap.is_premultiplied(), "{format:?}");
            }
            // Mapping twice doesn't change the format.
            assert_eq!(mipmap, mipmap.mipmap_format(), "{format:?}");
        }
    }

    #[test]
    fn try_from_u32() {
        for (i, format) in MemoryFormat::iter().enumerate() {
            assert_eq!(Ok(format), MemoryFormat::try_from(i as u32));
        }
        assert_eq!(
            Err(FormatError::InvalidFormat(MemoryFormat::COUNT as u32)),
            MemoryFormat::try_from(MemoryFormat::COUNT as u32)
        );
        assert_eq!(33, MemoryFormat::COUNT);
    }

    #[test]
    fn channel_types() {
        assert_eq!(ChannelType::U8, MemoryFormat::X8B8G8R8.channel_type());
        assert_eq!(ChannelType::U16, MemoryFormat::G16A16.channel_type());
        assert_eq!(ChannelType::F16, MemoryFormat::A16Float.channel_type());
        assert_eq!(
            ChannelType::F32,
            MemoryFormat::R32G32B32Float.channel_type()
        );
    }
}
