//! Reading, writing, and comparing individual pixels.
//!
//! Colors are RGBA `[f32; 4]` with channels normalized to the range `0.0` to `1.0`.
//! Every function panics if the coordinates are outside the layout
//! or the buffer is too small for the layout.
use crate::{Alpha, ChannelType, MemoryFormat, MemoryLayout};

mod channel;

use channel::Channel;
use half::f16;

/// Encode the straight alpha `color` at pixel (`x`, `y`).
///
/// Opaque formats store the color composited onto black.
/// Gray formats store the average of the red, green, and blue channels.
pub fn set_pixel(data: &mut [u8], layout: &MemoryLayout, x: usize, y: usize, color: [f32; 4]) {
    let stored = match layout.format.alpha() {
        Alpha::Straight => color,
        Alpha::Premultiplied | Alpha::Opaque => premultiply(color),
    };
    write_stored(data, layout, x, y, stored);
}

/// Encode the premultiplied alpha `color` at pixel (`x`, `y`).
pub fn set_pixel_premultiplied(
    data: &mut [u8],
    layout: &MemoryLayout,
    x: usize,
    y: usize,
    color: [f32; 4],
) {
    let stored = match layout.format.alpha() {
        Alpha::Straight => unpremultiply(color),
        Alpha::Premultiplied | Alpha::Opaque => color,
    };
    write_stored(data, layout, x, y, stored);
}

/// Decode the pixel at (`x`, `y`) to a straight alpha color.
///
/// Alpha only formats decode to white.
pub fn get_pixel(data: &[u8], layout: &MemoryLayout, x: usize, y: usize) -> [f32; 4] {
    let stored = read_stored(data, layout, x, y);
    match layout.format.alpha() {
        Alpha::Premultiplied => unpremultiply(stored),
        Alpha::Straight | Alpha::Opaque => stored,
    }
}

/// Decode the pixel at (`x`, `y`) to a premultiplied alpha color.
pub fn get_pixel_premultiplied(data: &[u8], layout: &MemoryLayout, x: usize, y: usize) -> [f32; 4] {
    let stored = read_stored(data, layout, x, y);
    match layout.format.alpha() {
        Alpha::Straight => premultiply(stored),
        Alpha::Premultiplied | Alpha::Opaque => stored,
    }
}

/// Compare the pixel at (`x`, `y`) in two buffers with the same format.
///
/// 8 bit formats must match exactly.
/// 16 bit integer formats allow a difference of 1 when `accurate` is `true` and 256 otherwise.
/// Float formats allow a difference of `1.0 / 65535.0` when `accurate` is `true`
/// and `1.0 / 255.0` otherwise.
/// The padding channel of `X` formats is ignored.
///
/// # Panics
/// Panics if the layouts have different formats.
pub fn pixels_equal(
    data1: &[u8],
    layout1: &MemoryLayout,
    data2: &[u8],
    layout2: &MemoryLayout,
    x: usize,
    y: usize,
    accurate: bool,
) -> bool {
    assert_eq!(
        layout1.format, layout2.format,
        "can only compare pixels with the same format"
    );

    let format = layout1.format;
    let pixel1 = pixel(data1, layout1, x, y);
    let pixel2 = pixel(data2, layout2, x, y);
    match format.channel_type() {
        ChannelType::U8 => channels_equal::<u8>(format, pixel1, pixel2, accurate),
        ChannelType::U16 => channels_equal::<u16>(format, pixel1, pixel2, accurate),
        ChannelType::F16 => channels_equal::<f16>(format, pixel1, pixel2, accurate),
        ChannelType::F32 => channels_equal::<f32>(format, pixel1, pixel2, accurate),
    }
}

/// The stored channel values of the pixel at (`x`, `y`) for diagnostic messages.
///
/// Integer channels are hexadecimal and float channels are decimal.
/// The padding channel of `X` formats is skipped.
pub fn format_pixel(data: &[u8], layout: &MemoryLayout, x: usize, y: usize) -> String {
    let format = layout.format;
    let pixel = pixel(data, layout, x, y);
    match format.channel_type() {
        ChannelType::U8 => format_channels::<u8>(format, pixel),
        ChannelType::U16 => format_channels::<u16>(format, pixel),
        ChannelType::F16 => format_channels::<f16>(format, pixel),
        ChannelType::F32 => format_channels::<f32>(format, pixel),
    }
}

pub(crate) fn premultiply([r, g, b, a]: [f32; 4]) -> [f32; 4] {
    [r * a, g * a, b * a, a]
}

pub(crate) fn unpremultiply([r, g, b, a]: [f32; 4]) -> [f32; 4] {
    if a > 0.0 {
        [r / a, g / a, b / a, a]
    } else {
        [0.0; 4]
    }
}

fn pixel<'a>(data: &'a [u8], layout: &MemoryLayout, x: usize, y: usize) -> &'a [u8] {
    let offset = layout.offset(0, x, y);
    &data[offset..offset + layout.format.plane_block_bytes(0)]
}

fn pixel_mut<'a>(data: &'a mut [u8], layout: &MemoryLayout, x: usize, y: usize) -> &'a mut [u8] {
    let offset = layout.offset(0, x, y);
    &mut data[offset..offset + layout.format.plane_block_bytes(0)]
}

// "Stored" colors use the alpha mode of the format.
// Opaque formats read an alpha of 1.0 and alpha only formats read colors equal to alpha.
fn read_stored(data: &[u8], layout: &MemoryLayout, x: usize, y: usize) -> [f32; 4] {
    let format = layout.format;
    let pixel = pixel(data, layout, x, y);
    match format.channel_type() {
        ChannelType::U8 => read_channels::<u8>(format, pixel),
        ChannelType::U16 => read_channels::<u16>(format, pixel),
        ChannelType::F16 => read_channels::<f16>(format, pixel),
        ChannelType::F32 => read_channels::<f32>(format, pixel),
    }
}

fn write_stored(data: &mut [u8], layout: &MemoryLayout, x: usize, y: usize, color: [f32; 4]) {
    let format = layout.format;
    let pixel = pixel_mut(data, layout, x, y);
    match format.channel_type() {
        ChannelType::U8 => write_channels::<u8>(format, pixel, color),
        ChannelType::U16 => write_channels::<u16>(format, pixel, color),
        ChannelType::F16 => write_channels::<f16>(format, pixel, color),
        ChannelType::F32 => write_channels::<f32>(format, pixel, color),
    }
}

fn read_channels<C: Channel>(format: MemoryFormat, pixel: &[u8]) -> [f32; 4] {
    let indices = format.channel_indices();
    let channel = |i| C::read(pixel, i).to_f32();

    let alpha = indices.alpha.map(channel).unwrap_or(1.0);
    let [r, g, b] = indices.colors.map(|c| c.map(channel)).unwrap_or([alpha; 3]);
    [r, g, b, alpha]
}

fn write_channels<C: Channel>(format: MemoryFormat, pixel: &mut [u8], color: [f32; 4]) {
    let indices = format.channel_indices();
    let [r, g, b, a] = color;

    if let Some(colors) = indices.colors {
        if format.n_colors() == 1 {
            let gray = (r + g + b) / 3.0;
            C::from_f32(gray).write(pixel, colors[0]);
        } else {
            for (i, value) in colors.into_iter().zip([r, g, b]) {
                C::from_f32(value).write(pixel, i);
            }
        }
    }
    if let Some(i) = indices.alpha {
        C::from_f32(a).write(pixel, i);
    }
    if let Some(i) = indices.padding {
        C::OPAQUE.write(pixel, i);
    }
}

fn channels_equal<C: Channel>(
    format: MemoryFormat,
    pixel1: &[u8],
    pixel2: &[u8],
    accurate: bool,
) -> bool {
    let padding = format.channel_indices().padding;
    (0..format.n_channels())
        .filter(|i| Some(*i) != padding)
        .all(|i| C::read(pixel1, i).approx_eq(C::read(pixel2, i), accurate))
}

fn format_channels<C: Channel>(format: MemoryFormat, pixel: &[u8]) -> String {
    let padding = format.channel_indices().padding;
    (0..format.n_channels())
        .filter(|i| Some(*i) != padding)
        .map(|i| C::read(pixel, i).format())
        .collect::<Vec<_>>()
        .join(" ")
}
