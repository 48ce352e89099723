#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pixel_memory::{MemoryFormat, MemoryLayout, PlaneLayout};

#[derive(Debug, Arbitrary)]
struct Input {
    format: MemoryFormat,
    width: u8,
    height: u8,
    plane: PlaneLayout,
    lod_level: u32,
    linear: bool,
    data: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let Ok(layout) = MemoryLayout::from_planes(
        input.format,
        input.width as usize,
        input.height as usize,
        input.data.len(),
        &[input.plane],
    ) else {
        return;
    };
    let _result = pixel_memory::mipmap_to_vec(&input.data, &layout, input.lod_level, input.linear);
});
