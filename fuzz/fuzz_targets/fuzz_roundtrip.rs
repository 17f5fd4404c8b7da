#![no_main]
use libfuzzer_sys::fuzz_target;
use zentga::*;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding and decoding again must produce identical pixels
    let Ok(decoded) = decode(data, enough::Unstoppable) else {
        return;
    };

    for compress in [false, true] {
        let Ok(reencoded) = encode(&decoded, compress, enough::Unstoppable) else {
            return;
        };
        let Ok(decoded2) = decode(&reencoded, enough::Unstoppable) else {
            panic!("re-encoded data failed to decode");
        };

        assert_eq!(decoded.as_bytes(), decoded2.as_bytes(), "roundtrip pixel mismatch");
        assert_eq!(decoded.width(), decoded2.width());
        assert_eq!(decoded.height(), decoded2.height());
        assert_eq!(decoded.depth(), decoded2.depth());
    }
});
