use thiserror::Error;

use crate::MemoryFormat;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("{0} is not a valid memory format")]
    InvalidFormat(u32),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("layout dimensions {width} x {height} contain no pixels")]
    ZeroSized { width: usize, height: usize },

    #[error("layout dimensions {width} x {height} are not divisible by the block dimensions {block_width} x {block_height} of plane {plane}")]
    NonIntegralDimensionsInBlocks {
        plane: usize,
        width: usize,
        height: usize,
        block_width: usize,
        block_height: usize,
    },

    #[error("expected {expected} planes for {format:?} but found {actual}")]
    TooManyPlanes {
        format: MemoryFormat,
        expected: usize,
        actual: usize,
    },

    #[error("stride {stride} of plane {plane} is smaller than the row size of {min_stride} bytes")]
    StrideTooSmall {
        plane: usize,
        stride: usize,
        min_stride: usize,
    },

    #[error("plane {plane} ends at byte {end} but the layout size is {size}")]
    PlaneOutOfBounds { plane: usize, end: usize, size: usize },

    #[error("size of plane {plane} would overflow")]
    SizeWouldOverflow { plane: usize },

    #[error("expected buffer to have at least {expected} bytes but found {actual}")]
    NotEnoughData { expected: usize, actual: usize },

    #[error("layout dimensions {width} x {height} do not match {expected_width} x {expected_height}")]
    DimensionMismatch {
        width: usize,
        height: usize,
        expected_width: usize,
        expected_height: usize,
    },

    #[error("format {actual:?} does not match {expected:?}")]
    FormatMismatch {
        expected: MemoryFormat,
        actual: MemoryFormat,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MipmapError {
    #[error("invalid mipmap layout: {0}")]
    Layout(#[from] LayoutError),

    #[error("lod level {lod_level} exceeds the maximum value of {max_lod_level}")]
    LodTooLarge { lod_level: u32, max_lod_level: u32 },

    #[error("source dimensions {src_width} x {src_height} are not {dest_width} x {dest_height} scaled by 2^{lod_level}")]
    DimensionMismatch {
        src_width: usize,
        src_height: usize,
        dest_width: usize,
        dest_height: usize,
        lod_level: u32,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompareError {
    #[error("texture dimensions {width1} x {height1} do not match {width2} x {height2}")]
    DimensionMismatch {
        width1: usize,
        height1: usize,
        width2: usize,
        height2: usize,
    },

    #[error("texture format {format1:?} does not match {format2:?}")]
    FormatMismatch {
        format1: MemoryFormat,
        format2: MemoryFormat,
    },

    #[error("downloaded layout is invalid: {0}")]
    Layout(#[from] LayoutError),

    #[error("{} pixels differ, first mismatch: {}", .mismatches.len(), .mismatches.first().map(String::as_str).unwrap_or(""))]
    PixelMismatch { mismatches: Vec<String> },
}
