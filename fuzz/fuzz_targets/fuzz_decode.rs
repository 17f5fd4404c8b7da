#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decode and header inspection must never panic
    let _ = zentga::ImageInfo::from_bytes(data);
    if let Ok(mut image) = zentga::decode(data, enough::Unstoppable) {
        // Transforms on any decoded image must never panic either
        image.flip_horizontally();
        image.flip_vertically();
        let (w, h) = (image.width(), image.height());
        image.scale(w.div_ceil(2), h + 1);
    }
});
