use log::trace;

use crate::{
    pixel::{get_pixel_premultiplied, set_pixel_premultiplied},
    LayoutError, MemoryLayout,
};

/// Convert `src` to the format of `dest_layout`.
///
/// Pixels are converted through premultiplied alpha.
/// Identical formats are copied without decoding.
pub fn convert(
    dest: &mut [u8],
    dest_layout: &MemoryLayout,
    src: &[u8],
    src_layout: &MemoryLayout,
) -> Result<(), LayoutError> {
    validate_dimensions(dest, dest_layout, src, src_layout)?;
    convert_unchecked(dest, dest_layout, src, src_layout);
    Ok(())
}

/// Copy `src` to `dest` one row at a time.
///
/// Combine with [MemoryLayout::sublayout] to copy a region of a larger image.
pub fn copy(
    dest: &mut [u8],
    dest_layout: &MemoryLayout,
    src: &[u8],
    src_layout: &MemoryLayout,
) -> Result<(), LayoutError> {
    validate_dimensions(dest, dest_layout, src, src_layout)?;
    if dest_layout.format != src_layout.format {
        return Err(LayoutError::FormatMismatch {
            expected: dest_layout.format,
            actual: src_layout.format,
        });
    }

    copy_rows(dest, dest_layout, src, src_layout);
    Ok(())
}

fn validate_dimensions(
    dest: &[u8],
    dest_layout: &MemoryLayout,
    src: &[u8],
    src_layout: &MemoryLayout,
) -> Result<(), LayoutError> {
    dest_layout.validate_buffer(dest)?;
    src_layout.validate_buffer(src)?;

    if dest_layout.width != src_layout.width || dest_layout.height != src_layout.height {
        Err(LayoutError::DimensionMismatch {
            width: src_layout.width,
            height: src_layout.height,
            expected_width: dest_layout.width,
            expected_height: dest_layout.height,
        })
    } else {
        Ok(())
    }
}

// Both layouts must already be validated with equal dimensions.
pub(crate) fn convert_unchecked(
    dest: &mut [u8],
    dest_layout: &MemoryLayout,
    src: &[u8],
    src_layout: &MemoryLayout,
) {
    trace!(
        "convert {:?} to {:?} {}x{}",
        src_layout.format,
        dest_layout.format,
        src_layout.width,
        src_layout.height
    );

    if dest_layout.format == src_layout.format {
        copy_rows(dest, dest_layout, src, src_layout);
        return;
    }

    for y in 0..src_layout.height {
        for x in 0..src_layout.width {
            let color = get_pixel_premultiplied(src, src_layout, x, y);
            set_pixel_premultiplied(dest, dest_layout, x, y, color);
        }
    }
}

pub(crate) fn copy_rows(dest: &mut [u8], dest_layout: &MemoryLayout, src: &[u8], src_layout: &MemoryLayout) {
    for plane in 0..src_layout.format.n_planes() {
        let row_bytes = src_layout.plane_row_bytes(plane);
        let src_plane = src_layout.planes[plane];
        let dest_plane = dest_layout.planes[plane];

        for row in 0..src_layout.plane_rows(plane) {
            let src_start = src_plane.offset + row * src_plane.stride;
            let dest_start = dest_plane.offset + row * dest_plane.stride;
            dest[dest_start..dest_start + row_bytes]
                .copy_from_slice(&src[src_start..src_start + row_bytes]);
        }
    }
}
