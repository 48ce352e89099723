//! # pixel_memory
//! pixel_memory describes uncompressed pixel data in memory and converts between formats.
//!
//! A [MemoryFormat] determines the channel order, channel type, and alpha mode of each pixel.
//! A [MemoryLayout] locates each row of pixels within a byte buffer.
//! Pixels can be read and written as normalized RGBA colors with the functions in [pixel].
//!
//! # Examples
//! Downsample an image to half its size.
//! ```rust
//! use pixel_memory::{mipmap_to_vec, pixel::set_pixel, MemoryFormat, MemoryLayout};
//!
//! let layout = MemoryLayout::new(MemoryFormat::R8G8B8A8, 4, 4);
//! let mut data = vec![0u8; layout.size];
//! set_pixel(&mut data, &layout, 0, 0, [1.0, 1.0, 1.0, 1.0]);
//!
//! let (mipmap, mipmap_layout) = mipmap_to_vec(&data, &layout, 1, false)?;
//! assert_eq!(MemoryFormat::R8G8B8A8Premultiplied, mipmap_layout.format);
//! assert_eq!(2, mipmap_layout.width);
//! assert_eq!(&[64, 64, 64, 64], &mipmap[..4]);
//! # Ok::<(), pixel_memory::MipmapError>(())
//! ```
//!
//! Every buffer is validated against its layout before any pixels are accessed.
//! Functions that take a single pixel coordinate panic instead of returning errors
//! since they are intended to be called in tight loops after validation.
mod error;
pub use error::*;

mod format;
pub use format::*;

mod layout;
pub use layout::*;

mod convert;
pub use convert::{convert, copy};

mod mipmap;
pub use mipmap::{mip_dimension, mipmap, mipmap_to_vec, MAX_LOD_LEVEL};

pub mod color;
pub mod half_float;
pub mod pixel;
pub mod texture;
