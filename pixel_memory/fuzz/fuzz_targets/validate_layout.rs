#![no_main]

use libfuzzer_sys::fuzz_target;
use pixel_memory::{pixel::get_pixel, MemoryLayout};

fuzz_target!(|input: (MemoryLayout, Vec<u8>)| {
    let (layout, data) = input;
    if layout.validate_buffer(&data).is_ok() {
        // Every pixel of a valid layout must be in bounds.
        for y in 0..layout.height {
            for x in 0..layout.width {
                get_pixel(&data, &layout, x, y);
            }
        }
    }
});
