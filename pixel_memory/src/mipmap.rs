use log::debug;

use crate::{
    color::{premultiplied_to_linear, premultiplied_to_srgb},
    convert::convert_unchecked,
    pixel::{get_pixel_premultiplied, set_pixel_premultiplied},
    MemoryLayout, MipmapError,
};

/// The largest supported `lod_level` for [mipmap].
pub const MAX_LOD_LEVEL: u32 = 15;

/// The size of `dimension` at mip level `level` without going below `1`.
pub fn mip_dimension(dimension: usize, level: u32) -> usize {
    dimension.checked_shr(level).unwrap_or(0).max(1)
}

/// Downsample `src` into `dest` by averaging blocks of `2^lod_level` x `2^lod_level` pixels.
///
/// Samples are averaged with premultiplied alpha.
/// If `linear` is `true`, samples are converted from sRGB to linear before averaging
/// and the result is converted back to sRGB.
/// The destination format is usually [MemoryFormat::mipmap_format](crate::MemoryFormat::mipmap_format)
/// of the source format, but any format is supported.
///
/// The source dimensions must be exactly the destination dimensions scaled by `2^lod_level`.
pub fn mipmap(
    dest: &mut [u8],
    dest_layout: &MemoryLayout,
    src: &[u8],
    src_layout: &MemoryLayout,
    lod_level: u32,
    linear: bool,
) -> Result<(), MipmapError> {
    if lod_level > MAX_LOD_LEVEL {
        return Err(MipmapError::LodTooLarge {
            lod_level,
            max_lod_level: MAX_LOD_LEVEL,
        });
    }

    dest_layout.validate_buffer(dest)?;
    src_layout.validate_buffer(src)?;

    let n = 1usize << lod_level;
    if dest_layout.width.checked_mul(n) != Some(src_layout.width)
        || dest_layout.height.checked_mul(n) != Some(src_layout.height)
    {
        return Err(MipmapError::DimensionMismatch {
            src_width: src_layout.width,
            src_height: src_layout.height,
            dest_width: dest_layout.width,
            dest_height: dest_layout.height,
            lod_level,
        });
    }

    debug!(
        "mipmap {:?} {}x{} to {:?} {}x{} at lod {lod_level}",
        src_layout.format,
        src_layout.width,
        src_layout.height,
        dest_layout.format,
        dest_layout.width,
        dest_layout.height
    );

    // A single sample doesn't need averaging.
    if lod_level == 0 && !linear {
        convert_unchecked(dest, dest_layout, src, src_layout);
        return Ok(());
    }

    let scale = 1.0 / (n * n) as f32;
    for y in 0..dest_layout.height {
        for x in 0..dest_layout.width {
            let mut sum = [0.0f32; 4];
            for j in 0..n {
                for i in 0..n {
                    let mut color = get_pixel_premultiplied(src, src_layout, x * n + i, y * n + j);
                    if linear {
                        color = premultiplied_to_linear(color);
                    }
                    for (s, c) in sum.iter_mut().zip(color) {
                        *s += c;
                    }
                }
            }

            let mut average = sum.map(|s| s * scale);
            if linear {
                average = premultiplied_to_srgb(average);
            }
            set_pixel_premultiplied(dest, dest_layout, x, y, average);
        }
    }

    Ok(())
}

/// Downsample `src` into a new tightly packed buffer using [MemoryLayout::mipmap_layout].
pub fn mipmap_to_vec(
    src: &[u8],
    src_layout: &MemoryLayout,
    lod_level: u32,
    linear: bool,
) -> Result<(Vec<u8>, MemoryLayout), MipmapError> {
    src_layout.validate_buffer(src)?;

    let layout = src_layout.mipmap_layout(lod_level);
    let mut data = vec![0u8; layout.size];
    mipmap(&mut data, &layout, src, src_layout, lod_level, linear)?;
    Ok((data, layout))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{
        pixel::{get_pixel, pixels_equal, set_pixel},
        LayoutError, MemoryFormat, PlaneLayout,
    };

    #[test]
    fn mip_dimension_clamps() {
        assert_eq!(8, mip_dimension(8, 0));
        assert_eq!(2, mip_dimension(8, 2));
        assert_eq!(1, mip_dimension(8, 5));
        assert_eq!(1, mip_dimension(8, 200));
    }

    #[test]
    fn mipmap_rgba8_checkerboard() {
        // Test that a checkerboard is averaged.
        let src_layout = MemoryLayout::new(MemoryFormat::R8G8B8A8, 4, 4);
        let src: Vec<_> = std::iter::repeat([0u8, 0u8, 0u8, 255u8, 255u8, 255u8, 255u8, 255u8])
            .take(4 * 4 / 2)
            .flatten()
            .collect();

        let (data, layout) = mipmap_to_vec(&src, &src_layout, 1, false).unwrap();
        assert_eq!(MemoryFormat::R8G8B8A8Premultiplied, layout.format);
        assert_eq!(vec![128u8, 128u8, 128u8, 255u8].repeat(4), data);
    }

    #[test]
    fn mipmap_premultiplies_before_averaging() {
        // Fully transparent pixels shouldn't contribute any color.
        let src_layout = MemoryLayout::new(MemoryFormat::R8G8B8A8, 2, 1);
        let src = [255, 0, 0, 255, 0, 255, 0, 0];
        let dest_layout = MemoryLayout::new(MemoryFormat::R8G8B8A8, 1, 1);
        let mut dest = [0u8; 4];

        let result = mipmap(&mut dest, &dest_layout, &src, &src_layout, 1, false);
        // The height isn't a multiple of 2.
        assert!(matches!(result, Err(MipmapError::DimensionMismatch { .. })));

        let src_layout = MemoryLayout::new(MemoryFormat::R8G8B8A8, 2, 2);
        let src = [src, src].concat();
        mipmap(&mut dest, &dest_layout, &src, &src_layout, 1, false).unwrap();
        assert_eq!([255, 0, 0, 128], dest);
    }

    #[test]
    fn mipmap_lod_0_copies() {
        let layout = MemoryLayout::new(MemoryFormat::R32G32B32A32Float, 2, 2);
        let src: Vec<u8> = bytemuck::cast_slice(&[0.1f32; 16]).to_vec();
        let mut dest = vec![0u8; layout.size];
        mipmap(&mut dest, &layout, &src, &layout, 0, false).unwrap();
        assert_eq!(src, dest);
    }

    #[test]
    fn mipmap_uniform_color_all_lods() {
        let color = [0.0, 1.0, 1.0, 0.5];
        for lod_level in 0..4 {
            let size = 1 << lod_level;
            let src_layout = MemoryLayout::new(MemoryFormat::B8G8R8A8, size * 2, size);
            let mut src = vec![0u8; src_layout.size];
            for y in 0..src_layout.height {
                for x in 0..src_layout.width {
                    set_pixel(&mut src, &src_layout, x, y, color);
                }
            }

            let (data, layout) = mipmap_to_vec(&src, &src_layout, lod_level, false).unwrap();
            assert_eq!(2, layout.width);
            assert_eq!(1, layout.height);

            let mut expected = vec![0u8; layout.size];
            for x in 0..2 {
                set_pixel(&mut expected, &layout, x, 0, color);
            }
            for x in 0..2 {
                assert!(pixels_equal(&expected, &layout, &data, &layout, x, 0, true));
            }
        }
    }

    #[test]
    fn mipmap_linear() {
        // Black and white average to a brighter gray in linear space.
        let src_layout = MemoryLayout::new(MemoryFormat::G8, 2, 2);
        let src = [0u8, 255, 0, 255];
        let dest_layout = MemoryLayout::new(MemoryFormat::G8, 1, 1);

        let mut dest = [0u8; 1];
        mipmap(&mut dest, &dest_layout, &src, &src_layout, 1, false).unwrap();
        assert_eq!([128], dest);

        mipmap(&mut dest, &dest_layout, &src, &src_layout, 1, true).unwrap();
        assert_eq!([188], dest);
    }

    #[test]
    fn mipmap_linear_uniform() {
        let color = [0.25, 0.5, 0.75, 1.0];
        let src_layout = MemoryLayout::new(MemoryFormat::R16G16B16A16Float, 4, 4);
        let mut src = vec![0u8; src_layout.size];
        for y in 0..4 {
            for x in 0..4 {
                set_pixel(&mut src, &src_layout, x, y, color);
            }
        }

        let (data, layout) = mipmap_to_vec(&src, &src_layout, 2, true).unwrap();
        let actual = get_pixel(&data, &layout, 0, 0);
        for (expected, actual) in color.into_iter().zip(actual) {
            assert!((expected - actual).abs() < 1.0 / 255.0);
        }
    }

    #[test]
    fn mipmap_padded_source() {
        let src_layout = MemoryLayout::from_planes(
            MemoryFormat::A8,
            2,
            2,
            20,
            &[PlaneLayout {
                offset: 7,
                stride: 9,
            }],
        )
        .unwrap();
        let mut src = vec![0u8; 20];
        set_pixel(&mut src, &src_layout, 0, 0, [0.0, 0.0, 0.0, 1.0]);
        set_pixel(&mut src, &src_layout, 1, 1, [0.0, 0.0, 0.0, 1.0]);

        let (data, _) = mipmap_to_vec(&src, &src_layout, 1, false).unwrap();
        assert_eq!(vec![128], data);
    }

    #[test]
    fn mipmap_not_enough_data() {
        let src_layout = MemoryLayout::new(MemoryFormat::A8, 2, 2);
        let result = mipmap_to_vec(&[0u8; 3], &src_layout, 1, false);
        assert_eq!(
            Err(MipmapError::Layout(LayoutError::NotEnoughData {
                expected: 4,
                actual: 3
            })),
            result
        );
    }

    #[test]
    fn mipmap_lod_too_large() {
        let src_layout = MemoryLayout::new(MemoryFormat::A8, 2, 2);
        let result = mipmap_to_vec(&[0u8; 4], &src_layout, 16, false);
        assert_eq!(
            Err(MipmapError::LodTooLarge {
                lod_level: 16,
                max_lod_level: MAX_LOD_LEVEL
            }),
            result
        );
    }

    #[test]
    fn mipmap_non_integral_ratio() {
        let src_layout = MemoryLayout::new(MemoryFormat::A8, 5, 4);
        let result = mipmap_to_vec(&[0u8; 20], &src_layout, 1, false);
        assert_eq!(
            Err(MipmapError::DimensionMismatch {
                src_width: 5,
                src_height: 4,
                dest_width: 2,
                dest_height: 2,
                lod_level: 1
            }),
            result
        );
    }
}
