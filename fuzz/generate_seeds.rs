#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn header(image_type: u8, width: u16, height: u16, bits: u8, descriptor: u8) -> Vec<u8> {
    let mut h = vec![0u8; 18];
    h[2] = image_type;
    h[12..14].copy_from_slice(&width.to_le_bytes());
    h[14..16].copy_from_slice(&height.to_le_bytes());
    h[16] = bits;
    h[17] = descriptor;
    h
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // Raw RGB 2x2, bottom-left origin
    let mut raw = header(2, 2, 2, 24, 0x00);
    raw.extend_from_slice(&[0xff, 0, 0, 0, 0xff, 0, 0, 0, 0xff, 0x80, 0x80, 0x80]);
    fs::write(format!("{dir}/raw_rgb_2x2.tga"), raw).unwrap();

    // Raw gray 3x2, top-left origin
    let mut gray = header(3, 3, 2, 8, 0x20);
    gray.extend_from_slice(&[0x00, 0x40, 0x80, 0xc0, 0xff, 0x64]);
    fs::write(format!("{dir}/raw_gray_3x2.tga"), gray).unwrap();

    // RLE RGBA 4x1: raw packet of 1, run of 3
    let mut rle = header(10, 4, 1, 32, 0x28);
    rle.extend_from_slice(&[0x00, 1, 2, 3, 4, 0x82, 9, 9, 9, 255]);
    rle.extend_from_slice(&[0; 8]);
    rle.extend_from_slice(b"TRUEVISION-XFILE.\0");
    fs::write(format!("{dir}/rle_rgba_4x1.tga"), rle).unwrap();

    // RLE gray 2x2, right origin
    let mut rle_gray = header(11, 2, 2, 8, 0x30);
    rle_gray.extend_from_slice(&[0x83, 0x11]);
    fs::write(format!("{dir}/rle_gray_2x2.tga"), rle_gray).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/short_header.bin"), &header(2, 1, 1, 24, 0)[..10]).unwrap();
    fs::write(format!("{dir}/zero_width.bin"), header(2, 0, 1, 24, 0)).unwrap();
    let mut overrun = header(11, 1, 1, 8, 0x20);
    overrun.extend_from_slice(&[0xff, 0x00]);
    fs::write(format!("{dir}/rle_overrun.bin"), overrun).unwrap();

    println!("Generated seed corpus in {dir}/");
}
