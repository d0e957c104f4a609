#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn header(bmp: &mut [u8], file_size: u32, offset: u32, width: i32, height: i32, bpp: u16) {
    bmp[0] = b'B';
    bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&file_size.to_le_bytes());
    bmp[10..14].copy_from_slice(&offset.to_le_bytes());
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    bmp[18..22].copy_from_slice(&width.to_le_bytes());
    bmp[22..26].copy_from_slice(&height.to_le_bytes());
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&bpp.to_le_bytes());
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // Minimal BMP 1x1 24-bit
    let mut bmp = vec![0u8; 58]; // 54 header + 4 pixel (3 + 1 padding)
    header(&mut bmp, 58, 54, 1, 1, 24);
    bmp[54] = 0xff; bmp[55] = 0x00; bmp[56] = 0x00; // BGR
    fs::write(format!("{dir}/bmp24_1x1.bmp"), bmp).unwrap();

    // 3x2 24-bit, 3 padding bytes per row
    let mut bmp = vec![0u8; 54 + 24];
    header(&mut bmp, 78, 54, 3, 2, 24);
    for (i, b) in bmp[54..].iter_mut().enumerate() {
        *b = (i * 17) as u8;
    }
    fs::write(format!("{dir}/bmp24_3x2.bmp"), bmp).unwrap();

    // 5x2 8-bit with grayscale palette
    let mut bmp = vec![0u8; 1078 + 16];
    header(&mut bmp, 1094, 1078, 5, 2, 8);
    for i in 0..256 {
        let e = 54 + i * 4;
        bmp[e] = i as u8; bmp[e + 1] = i as u8; bmp[e + 2] = i as u8;
    }
    for (i, b) in bmp[1078..].iter_mut().enumerate() {
        *b = (i * 31) as u8;
    }
    fs::write(format!("{dir}/bmp8_5x2.bmp"), bmp).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    let mut bmp = vec![0u8; 54 + 100];
    header(&mut bmp, 154, 54, 1, 1, 8); // palette cut short
    fs::write(format!("{dir}/bmp8_no_palette.bin"), bmp).unwrap();
    let mut bmp = vec![0u8; 58];
    header(&mut bmp, 58, 54, 1, -1, 24); // top-down
    fs::write(format!("{dir}/bmp24_topdown.bin"), bmp).unwrap();

    println!("Generated seed corpus in {dir}/");
}
