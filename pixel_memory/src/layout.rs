use crate::{mip_dimension, LayoutError, MemoryFormat, MAX_PLANES};

/// The position of a single plane within a buffer.
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct PlaneLayout {
    /// The byte offset of the first row.
    pub offset: usize,
    /// The byte distance between the start of consecutive rows.
    pub stride: usize,
}

/// A rectangle in pixels.
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// The byte geometry of a pixel buffer.
///
/// Only the first [MemoryFormat::n_planes] entries of [planes](#structfield.planes) are used.
/// Layouts built from external data should be checked with [MemoryLayout::validate]
/// before accessing any pixels.
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct MemoryLayout {
    pub format: MemoryFormat,
    /// The width in pixels.
    pub width: usize,
    /// The height in pixels.
    pub height: usize,
    /// The number of bytes needed to hold every plane.
    pub size: usize,
    pub planes: [PlaneLayout; MAX_PLANES],
}

impl MemoryLayout {
    /// Create a tightly packed layout with planes stored one after another.
    pub fn new(format: MemoryFormat, width: usize, height: usize) -> Self {
        Self::new_aligned(format, width, height, 1)
    }

    /// Create a packed layout where each stride and plane offset is a multiple of `align`.
    ///
    /// An `align` of `1` is identical to [MemoryLayout::new].
    ///
    /// # Panics
    /// Panics if `align` is zero.
    pub fn new_aligned(format: MemoryFormat, width: usize, height: usize, align: usize) -> Self {
        assert!(align > 0, "alignment must be at least 1");

        let mut planes = [PlaneLayout::default(); MAX_PLANES];
        let mut size = 0;
        for (plane, plane_layout) in planes.iter_mut().enumerate().take(format.n_planes()) {
            let offset = round_up(size, align);
            let stride = round_up(min_stride(format, plane, width), align);
            *plane_layout = PlaneLayout { offset, stride };
            size = offset + stride * div_round_up(height, format.plane_block_height(plane));
        }

        Self {
            format,
            width,
            height,
            size,
            planes,
        }
    }

    /// Create a layout from plane geometry supplied by another API like a dmabuf import.
    ///
    /// Unlike the other constructors, the result is validated
    /// since the geometry can't be trusted.
    pub fn from_planes(
        format: MemoryFormat,
        width: usize,
        height: usize,
        size: usize,
        planes: &[PlaneLayout],
    ) -> Result<Self, LayoutError> {
        if planes.len() != format.n_planes() {
            return Err(LayoutError::TooManyPlanes {
                format,
                expected: format.n_planes(),
                actual: planes.len(),
            });
        }

        let mut layout = Self {
            format,
            width,
            height,
            size,
            planes: [PlaneLayout::default(); MAX_PLANES],
        };
        layout.planes[..planes.len()].copy_from_slice(planes);

        layout.validate()?;
        Ok(layout)
    }

    /// The tightly packed layout for mip level `lod_level` using [MemoryFormat::mipmap_format].
    pub fn mipmap_layout(&self, lod_level: u32) -> Self {
        Self::new(
            self.format.mipmap_format(),
            mip_dimension(self.width, lod_level),
            mip_dimension(self.height, lod_level),
        )
    }

    /// The byte offset of the block containing pixel (`x`, `y`) in `plane`.
    ///
    /// # Panics
    /// Panics if `plane`, `x`, or `y` are out of range.
    pub fn offset(&self, plane: usize, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) is outside the {} x {} layout",
            self.width,
            self.height
        );
        let plane_layout = &self.planes[plane];
        plane_layout.offset
            + y / self.format.plane_block_height(plane) * plane_layout.stride
            + x / self.format.plane_block_width(plane) * self.format.plane_block_bytes(plane)
    }

    /// The number of bytes used by the pixels in a single row of `plane`.
    pub fn plane_row_bytes(&self, plane: usize) -> usize {
        min_stride(self.format, plane, self.width)
    }

    /// The number of rows of blocks in `plane`.
    pub fn plane_rows(&self, plane: usize) -> usize {
        div_round_up(self.height, self.format.plane_block_height(plane))
    }

    /// A view of the region `area` that indexes into the same buffer.
    ///
    /// # Panics
    /// Panics if `area` is not contained in the layout or not aligned to the block size.
    pub fn sublayout(&self, area: &Rect) -> Self {
        assert!(
            area.x + area.width <= self.width && area.y + area.height <= self.height,
            "{area:?} is outside the {} x {} layout",
            self.width,
            self.height
        );

        let mut planes = self.planes;
        for (plane, plane_layout) in planes.iter_mut().enumerate().take(self.format.n_planes()) {
            let block_width = self.format.plane_block_width(plane);
            let block_height = self.format.plane_block_height(plane);
            assert!(
                area.x % block_width == 0 && area.y % block_height == 0,
                "{area:?} is not aligned to {block_width} x {block_height} blocks"
            );

            plane_layout.offset += area.y / block_height * plane_layout.stride
                + area.x / block_width * self.format.plane_block_bytes(plane);
        }

        Self {
            format: self.format,
            width: area.width,
            height: area.height,
            size: self.size,
            planes,
        }
    }

    /// Returns `true` if [MemoryLayout::validate] succeeds.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Check that every plane fits within [size](#structfield.size).
    ///
    /// Strides may be larger than the row size and offsets may be arbitrary.
    /// The last row only needs the bytes of its pixels, so a plane ends at
    /// `offset + (rows - 1) * stride + row_bytes` rather than `offset + rows * stride`.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.width == 0 || self.height == 0 {
            return Err(LayoutError::ZeroSized {
                width: self.width,
                height: self.height,
            });
        }

        for plane in 0..self.format.n_planes() {
            let block_width = self.format.plane_block_width(plane);
            let block_height = self.format.plane_block_height(plane);
            if self.width % block_width != 0 || self.height % block_height != 0 {
                return Err(LayoutError::NonIntegralDimensionsInBlocks {
                    plane,
                    width: self.width,
                    height: self.height,
                    block_width,
                    block_height,
                });
            }

            let PlaneLayout { offset, stride } = self.planes[plane];
            let row_bytes = (self.width / block_width)
                .checked_mul(self.format.plane_block_bytes(plane))
                .ok_or(LayoutError::SizeWouldOverflow { plane })?;
            if stride < row_bytes {
                return Err(LayoutError::StrideTooSmall {
                    plane,
                    stride,
                    min_stride: row_bytes,
                });
            }

            // The last row doesn't need padding up to the full stride.
            let end = (self.height / block_height - 1)
                .checked_mul(stride)
                .and_then(|bytes| bytes.checked_add(row_bytes))
                .and_then(|bytes| bytes.checked_add(offset))
                .ok_or(LayoutError::SizeWouldOverflow { plane })?;
            if end > self.size {
                return Err(LayoutError::PlaneOutOfBounds {
                    plane,
                    end,
                    size: self.size,
                });
            }
        }

        Ok(())
    }

    /// Validate the layout and check that `data` is large enough to hold it.
    pub fn validate_buffer(&self, data: &[u8]) -> Result<(), LayoutError> {
        self.validate()?;
        if data.len() < self.size {
            Err(LayoutError::NotEnoughData {
                expected: self.size,
                actual: data.len(),
            })
        } else {
            Ok(())
        }
    }
}

fn min_stride(format: MemoryFormat, plane: usize, width: usize) -> usize {
    div_round_up(width, format.plane_block_width(plane)) * format.plane_block_bytes(plane)
}

fn div_round_up(x: usize, d: usize) -> usize {
    x.div_ceil(d)
}

fn round_up(x: usize, n: usize) -> usize {
    div_round_up(x, n) * n
}
