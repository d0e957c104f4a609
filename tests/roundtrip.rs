use enough::Unstoppable;
use zenbmpfx::*;

/// Hand-assembled 8-bit BMP; `rows` are given top row first.
fn gray8_file(width: u32, rows: &[&[u8]]) -> Vec<u8> {
    let height = rows.len() as u32;
    let stride = (width as usize + 3) & !3;
    let data_size = stride * height as usize;
    let mut out = Vec::new();
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&((1078 + data_size) as u32).to_le_bytes());
    out.extend_from_slice(&[0u8; 4]);
    out.extend_from_slice(&1078u32.to_le_bytes());
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&(height as i32).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&8u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&(data_size as u32).to_le_bytes());
    out.extend_from_slice(&3780u32.to_le_bytes());
    out.extend_from_slice(&3780u32.to_le_bytes());
    out.extend_from_slice(&256u32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    for i in 0..=255u8 {
        out.extend_from_slice(&[i, i, i, 0]);
    }
    for row in rows.iter().rev() {
        out.extend_from_slice(row);
        out.extend(std::iter::repeat_n(0u8, stride - row.len()));
    }
    out
}

/// Hand-assembled 24-bit BMP; `rows` are (r, g, b) triples, top row first.
fn rgb24_file(width: u32, rows: &[&[(u8, u8, u8)]]) -> Vec<u8> {
    let height = rows.len() as u32;
    let stride = (width as usize * 3 + 3) & !3;
    let data_size = stride * height as usize;
    let mut out = Vec::new();
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&((54 + data_size) as u32).to_le_bytes());
    out.extend_from_slice(&[0u8; 4]);
    out.extend_from_slice(&54u32.to_le_bytes());
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&(height as i32).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&24u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&(data_size as u32).to_le_bytes());
    out.extend_from_slice(&2835u32.to_le_bytes());
    out.extend_from_slice(&2835u32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    for row in rows.iter().rev() {
        for &(r, g, b) in row.iter() {
            out.extend_from_slice(&[b, g, r]);
        }
        out.extend(std::iter::repeat_n(0u8, stride - row.len() * 3));
    }
    out
}

#[test]
fn gray8_roundtrip_is_byte_identical() {
    let file = gray8_file(5, &[&[1, 2, 3, 4, 5], &[6, 7, 8, 9, 10], &[11, 12, 13, 14, 15]]);
    let img = decode_gray8(&file, Unstoppable).unwrap();
    assert_eq!(img.width(), 5);
    assert_eq!(img.height(), 3);
    assert_eq!(img.stride(), 8);
    assert_eq!(img.row(0), &[1, 2, 3, 4, 5]);
    assert_eq!(img.row(2), &[11, 12, 13, 14, 15]);
    assert_eq!(&img.header_bytes()[..], &file[..54]);
    assert_eq!(&img.palette()[..], &file[54..1078]);

    let encoded = encode_gray8(&img, Unstoppable).unwrap();
    assert_eq!(encoded, file);
}

#[test]
fn rgb24_roundtrip_is_byte_identical() {
    // Width 3 => 9 pixel bytes + 3 padding bytes per row.
    let file = rgb24_file(
        3,
        &[
            &[(255, 0, 0), (0, 255, 0), (0, 0, 255)],
            &[(128, 128, 128), (64, 64, 64), (0, 0, 0)],
        ],
    );
    let img = decode_rgb24(&file, Unstoppable).unwrap();
    assert_eq!(img.get(0, 0), Pixel::new(255, 0, 0));
    assert_eq!(img.get(2, 0), Pixel::new(0, 0, 255));
    assert_eq!(img.get(1, 1), Pixel::new(64, 64, 64));

    let encoded = encode_rgb24(&img, Unstoppable).unwrap();
    assert_eq!(encoded, file);
}

#[test]
fn rgb24_width_multiple_of_four_has_no_padding() {
    let row: &[(u8, u8, u8)] = &[(1, 2, 3), (4, 5, 6), (7, 8, 9), (10, 11, 12)];
    let file = rgb24_file(4, &[row, row]);
    assert_eq!(file.len(), 54 + 2 * 12);
    let img = decode_rgb24(&file, Unstoppable).unwrap();
    assert_eq!(img.get(3, 1), Pixel::new(10, 11, 12));
    assert_eq!(encode_rgb24(&img, Unstoppable).unwrap(), file);
}

#[test]
fn extra_header_bytes_survive_roundtrip() {
    // A larger DIB header (V4-style tail) pushes the pixel data offset out.
    let mut file = rgb24_file(2, &[&[(9, 8, 7), (6, 5, 4)]]);
    let tail = [0xAAu8; 68];
    let data = file.split_off(54);
    file.extend_from_slice(&tail);
    file.extend_from_slice(&data);
    let offset = 54u32 + tail.len() as u32;
    file[10..14].copy_from_slice(&offset.to_le_bytes());
    let size = file.len() as u32;
    file[2..6].copy_from_slice(&size.to_le_bytes());

    let img = decode_rgb24(&file, Unstoppable).unwrap();
    assert_eq!(img.get(0, 0), Pixel::new(9, 8, 7));
    assert_eq!(encode_rgb24(&img, Unstoppable).unwrap(), file);
}

#[test]
fn trailing_bytes_keep_header_identical() {
    let mut file = rgb24_file(2, &[&[(1, 2, 3), (4, 5, 6)], &[(7, 8, 9), (10, 11, 12)]]);
    let image_len = file.len();
    file.extend_from_slice(&[0xCC, 0xDD]);
    let size = file.len() as u32;
    file[2..6].copy_from_slice(&size.to_le_bytes());

    let img = decode_rgb24(&file, Unstoppable).unwrap();
    let out = encode_rgb24(&img, Unstoppable).unwrap();
    assert_eq!(&out[..54], &file[..54]);
    assert_eq!(&out[..], &file[..image_len]);
}

#[test]
fn zero_file_size_field_is_kept() {
    let mut file = gray8_file(3, &[&[1, 2, 3], &[4, 5, 6]]);
    file[2..6].copy_from_slice(&0u32.to_le_bytes());
    let img = decode_gray8(&file, Unstoppable).unwrap();
    assert_eq!(encode_gray8(&img, Unstoppable).unwrap(), file);
}

#[test]
fn generic_decode_dispatches_on_bit_count() {
    let gray = gray8_file(2, &[&[1, 2]]);
    let rgb = rgb24_file(1, &[&[(1, 2, 3)]]);
    assert_eq!(decode_bmp(&gray, Unstoppable).unwrap().bit_depth(), BitDepth::Gray8);
    assert_eq!(decode_bmp(&rgb, Unstoppable).unwrap().bit_depth(), BitDepth::Rgb24);

    let raster = decode_bmp(&gray, Unstoppable).unwrap();
    assert_eq!(encode_bmp(&raster, Unstoppable).unwrap(), gray);
}

#[test]
fn wrong_depth_is_a_format_error() {
    let gray = gray8_file(2, &[&[1, 2]]);
    let rgb = rgb24_file(1, &[&[(1, 2, 3)]]);
    let err = decode_rgb24(&gray, Unstoppable).unwrap_err();
    assert!(err.is_format_error());
    assert!(matches!(
        err,
        BitmapError::UnsupportedBitDepth {
            expected: 24,
            found: 8
        }
    ));
    let err = decode_gray8(&rgb, Unstoppable).unwrap_err();
    assert!(matches!(
        err,
        BitmapError::UnsupportedBitDepth {
            expected: 8,
            found: 24
        }
    ));
}

#[test]
fn truncated_inputs_fail_cleanly() {
    let file = gray8_file(4, &[&[1, 2, 3, 4], &[5, 6, 7, 8]]);
    // Header only, palette cut, pixel data cut.
    for len in [10, 54, 500, 1078, file.len() - 1] {
        let err = decode_gray8(&file[..len], Unstoppable).unwrap_err();
        assert!(
            matches!(err, BitmapError::UnexpectedEof),
            "len {len}: {err:?}"
        );
    }
}

#[test]
fn image_info_probe() {
    let file = gray8_file(6, &[&[0; 6], &[0; 6]]);
    let info = ImageInfo::from_bytes(&file).unwrap();
    assert_eq!(info.width, 6);
    assert_eq!(info.height, 2);
    assert_eq!(info.bit_depth, BitDepth::Gray8);
    assert_eq!(info.data_size, 16);
    assert!(info.to_string().contains("Color Depth: 8-bit"));
}

#[test]
fn limits_reject_large() {
    let file = rgb24_file(2, &[&[(0, 0, 0), (0, 0, 0)], &[(0, 0, 0), (0, 0, 0)]]);
    let limits = Limits {
        max_pixels: Some(3),
        ..Default::default()
    };
    let result = DecodeRequest::new(&file)
        .with_limits(&limits)
        .decode(Unstoppable);
    match result.unwrap_err() {
        BitmapError::LimitExceeded(_) => {}
        other => panic!("expected LimitExceeded, got {other:?}"),
    }

    let limits = Limits {
        max_memory_bytes: Some(8),
        ..Default::default()
    };
    let result = DecodeRequest::new(&file)
        .with_limits(&limits)
        .decode_rgb24(Unstoppable);
    assert!(matches!(result, Err(BitmapError::LimitExceeded(_))));
}

#[test]
fn file_roundtrip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("in.bmp");
    let dst = dir.path().join("out.bmp");
    let file = rgb24_file(2, &[&[(10, 20, 30), (40, 50, 60)], &[(70, 80, 90), (100, 110, 120)]]);
    std::fs::write(&src, &file).unwrap();

    let img = load_image(&src).unwrap();
    save_image(&img, &dst).unwrap();
    assert_eq!(std::fs::read(&dst).unwrap(), file);

    let gray = Raster8::new(3, 3).unwrap();
    save_gray8(&gray, &dst).unwrap();
    assert_eq!(load_gray8(&dst).unwrap(), gray);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_image(dir.path().join("nope.bmp")).unwrap_err();
    assert!(matches!(err, BitmapError::Io(_)));

    // Writing into a directory that does not exist.
    let img = Raster24::new(1, 1).unwrap();
    let err = save_rgb24(&img, dir.path().join("missing").join("out.bmp")).unwrap_err();
    assert!(matches!(err, BitmapError::Io(_)));
}
