#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmpfx::*;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding and decoding again must produce an identical raster
    let Ok(decoded) = decode_bmp(data, enough::Unstoppable) else {
        return;
    };

    let Ok(reencoded) = encode_bmp(&decoded, enough::Unstoppable) else {
        return;
    };
    let Ok(decoded2) = decode_bmp(&reencoded, enough::Unstoppable) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(decoded.width(), decoded2.width());
    assert_eq!(decoded.height(), decoded2.height());
    match (&decoded, &decoded2) {
        (Raster::Gray8(a), Raster::Gray8(b)) => {
            assert_eq!(a.data(), b.data(), "roundtrip pixel mismatch");
            assert_eq!(a.palette(), b.palette());
        }
        (Raster::Rgb24(a), Raster::Rgb24(b)) => {
            assert_eq!(a.pixels().buf(), b.pixels().buf(), "roundtrip pixel mismatch");
        }
        _ => panic!("bit depth changed on roundtrip"),
    }

    // A second encode is a fixed point
    let Ok(reencoded2) = encode_bmp(&decoded2, enough::Unstoppable) else {
        panic!("second encode failed");
    };
    assert_eq!(reencoded, reencoded2);
});
