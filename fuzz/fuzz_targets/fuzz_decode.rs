#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Auto-detect and each depth explicitly — must never panic
    let _ = zenbmpfx::decode_bmp(data, enough::Unstoppable);
    let _ = zenbmpfx::decode_gray8(data, enough::Unstoppable);
    let _ = zenbmpfx::decode_rgb24(data, enough::Unstoppable);
    let _ = zenbmpfx::ImageInfo::from_bytes(data);
});
