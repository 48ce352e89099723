//! Owned pixel buffers and pixel-by-pixel comparisons for testing renderers.
use std::borrow::Cow;

use log::warn;

use crate::{
    convert::copy_rows,
    pixel::{format_pixel, pixels_equal, set_pixel},
    CompareError, LayoutError, MemoryFormat, MemoryLayout, PlaneLayout,
};

/// An image whose pixels can be read back into memory.
pub trait Download {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn format(&self) -> MemoryFormat;

    /// The pixel data and the layout describing it.
    fn download(&self) -> (Cow<'_, [u8]>, MemoryLayout);
}

/// Pixel data in memory described by a [MemoryLayout].
#[derive(Debug, PartialEq, Clone)]
pub struct MemoryTexture {
    data: Vec<u8>,
    layout: MemoryLayout,
}

impl MemoryTexture {
    /// Create a texture after checking that `data` matches `layout`.
    pub fn new(data: Vec<u8>, layout: MemoryLayout) -> Result<Self, LayoutError> {
        layout.validate_buffer(&data)?;
        Ok(Self { data, layout })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn layout(&self) -> &MemoryLayout {
        &self.layout
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

impl Download for MemoryTexture {
    fn width(&self) -> usize {
        self.layout.width
    }

    fn height(&self) -> usize {
        self.layout.height
    }

    fn format(&self) -> MemoryFormat {
        self.layout.format
    }

    fn download(&self) -> (Cow<'_, [u8]>, MemoryLayout) {
        (Cow::Borrowed(&self.data), self.layout)
    }
}

/// Build a [MemoryTexture] one pixel at a time.
///
/// Pixels start out zeroed.
///
/// # Examples
/// ```rust
/// use pixel_memory::{texture::TextureBuilder, MemoryFormat};
///
/// let texture = TextureBuilder::new(MemoryFormat::R8G8B8A8, 2, 2)
///     .with_padding(3, 5)
///     .fill([1.0, 0.0, 0.0, 1.0])
///     .finish();
/// assert_eq!(11, texture.layout().planes[0].stride);
/// ```
#[derive(Debug, Clone)]
pub struct TextureBuilder {
    data: Vec<u8>,
    layout: MemoryLayout,
}

impl TextureBuilder {
    pub fn new(format: MemoryFormat, width: usize, height: usize) -> Self {
        let layout = MemoryLayout::new(format, width, height);
        Self {
            data: vec![0u8; layout.size],
            layout,
        }
    }

    /// Add `extra_stride` unused bytes to each row and `offset` unused bytes before each plane.
    ///
    /// Existing pixels are preserved.
    pub fn with_padding(self, extra_stride: usize, offset: usize) -> Self {
        let format = self.layout.format;
        let mut layout = self.layout;
        layout.size = 0;
        for plane in 0..format.n_planes() {
            let stride = self.layout.plane_row_bytes(plane) + extra_stride;
            let plane_offset = layout.size + offset;
            layout.planes[plane] = PlaneLayout {
                offset: plane_offset,
                stride,
            };
            layout.size = plane_offset + stride * self.layout.plane_rows(plane);
        }

        let mut data = vec![0u8; layout.size];
        copy_rows(&mut data, &layout, &self.data, &self.layout);
        Self { data, layout }
    }

    /// # Panics
    /// Panics if (`x`, `y`) is outside the texture.
    pub fn set_pixel(mut self, x: usize, y: usize, color: [f32; 4]) -> Self {
        set_pixel(&mut self.data, &self.layout, x, y, color);
        self
    }

    /// Set every pixel to the straight alpha `color`.
    pub fn fill(mut self, color: [f32; 4]) -> Self {
        for y in 0..self.layout.height {
            for x in 0..self.layout.width {
                set_pixel(&mut self.data, &self.layout, x, y, color);
            }
        }
        self
    }

    pub fn layout(&self) -> &MemoryLayout {
        &self.layout
    }

    pub fn finish(self) -> MemoryTexture {
        MemoryTexture {
            data: self.data,
            layout: self.layout,
        }
    }
}

/// Check that every pixel of `texture1` matches `texture2` using [pixels_equal].
///
/// Each mismatch is logged as a warning and returned in [CompareError::PixelMismatch].
pub fn compare_textures<T1: Download, T2: Download>(
    texture1: &T1,
    texture2: &T2,
    accurate: bool,
) -> Result<(), CompareError> {
    if texture1.width() != texture2.width() || texture1.height() != texture2.height() {
        return Err(CompareError::DimensionMismatch {
            width1: texture1.width(),
            height1: texture1.height(),
            width2: texture2.width(),
            height2: texture2.height(),
        });
    }

    let format = texture1.format();
    if format != texture2.format() {
        return Err(CompareError::FormatMismatch {
            format1: format,
            format2: texture2.format(),
        });
    }

    let (data1, layout1) = download(texture1)?;
    let (data2, layout2) = download(texture2)?;

    let mut mismatches = Vec::new();
    for y in 0..layout1.height {
        for x in 0..layout1.width {
            if !pixels_equal(&data1, &layout1, &data2, &layout2, x, y, accurate) {
                let mismatch = format!(
                    "{format:?} ({x} {y}): {} != {}",
                    format_pixel(&data1, &layout1, x, y),
                    format_pixel(&data2, &layout2, x, y)
                );
                warn!("{mismatch}");
                mismatches.push(mismatch);
            }
        }
    }

    if mismatches.is_empty() {
        Ok(())
    } else {
        Err(CompareError::PixelMismatch { mismatches })
    }
}

fn download<T: Download>(texture: &T) -> Result<(Cow<'_, [u8]>, MemoryLayout), LayoutError> {
    let (data, layout) = texture.download();
    layout.validate_buffer(&data)?;

    if layout.width != texture.width() || layout.height != texture.height() {
        return Err(LayoutError::DimensionMismatch {
            width: layout.width,
            height: layout.height,
            expected_width: texture.width(),
            expected_height: texture.height(),
        });
    }
    if layout.format != texture.format() {
        return Err(LayoutError::FormatMismatch {
            expected: texture.format(),
            actual: layout.format,
        });
    }

    Ok((data, layout))
}
