//! BMP encoder: writes rasters back out with their captured headers.

use enough::Stop;

use super::header::{FileHeader, HEADER_LEN, PALETTE_LEN};
use crate::error::BitmapError;
use crate::raster::{Raster8, Raster24};

/// Points `data_offset` at where the pixel data is actually written.
///
/// Only an offset that overlapped the headers on decode can disagree. The
/// declared file size is kept as read: readers ignore it, and files with
/// trailing bytes or a zero size must keep their header unchanged.
fn reconcile_file_header(
    mut file: FileHeader,
    data_offset: usize,
    width: u32,
    height: u32,
) -> Result<FileHeader, BitmapError> {
    let data_offset = u32::try_from(data_offset)
        .map_err(|_| BitmapError::DimensionsTooLarge { width, height })?;
    if file.data_offset != data_offset {
        log::warn!(
            "rewriting BMP pixel data offset {} -> {data_offset}",
            file.data_offset
        );
        file.data_offset = data_offset;
    }
    Ok(file)
}

fn reserve(len: usize) -> Result<Vec<u8>, BitmapError> {
    let mut out = Vec::new();
    out.try_reserve_exact(len)
        .map_err(|_| BitmapError::OutOfMemory { bytes: len })?;
    Ok(out)
}

/// Encode an 8-bit raster: headers, palette, then padded rows bottom-up.
pub(crate) fn encode_gray8(img: &Raster8, stop: &dyn Stop) -> Result<Vec<u8>, BitmapError> {
    let (width, height) = (img.width, img.height);
    let data_offset = HEADER_LEN + PALETTE_LEN + img.extra.len();
    let file_size = data_offset
        .checked_add(img.data.len())
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    let file = reconcile_file_header(img.file_header, data_offset, width, height)?;

    stop.check()?;
    let mut out = reserve(file_size)?;
    file.write_to(&mut out);
    img.info_header.write_to(&mut out);
    out.extend_from_slice(&img.palette[..]);
    out.extend_from_slice(&img.extra);

    for (i, row) in img.data.chunks_exact(img.stride).rev().enumerate() {
        if i % 16 == 0 {
            stop.check()?;
        }
        out.extend_from_slice(row);
    }

    log::debug!("encoded 8-bit BMP {width}x{height}, {} bytes", out.len());
    Ok(out)
}

/// Encode a 24-bit raster: headers, then BGR rows bottom-up with zero padding.
pub(crate) fn encode_rgb24(img: &Raster24, stop: &dyn Stop) -> Result<Vec<u8>, BitmapError> {
    let (width, height) = (img.width(), img.height());
    let w = width as usize;
    let row_stride = w
        .checked_mul(3)
        .and_then(|r| r.checked_add(3))
        .map(|r| r & !3)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    let pixel_data_size = row_stride
        .checked_mul(height as usize)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    let data_offset = HEADER_LEN + img.extra.len();
    let file_size = data_offset
        .checked_add(pixel_data_size)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    let file = reconcile_file_header(img.file_header, data_offset, width, height)?;

    stop.check()?;
    let mut out = reserve(file_size)?;
    file.write_to(&mut out);
    img.info_header.write_to(&mut out);
    out.extend_from_slice(&img.extra);

    let pad_bytes = row_stride - w * 3;
    for (i, row) in img.pixels.buf().chunks_exact(w).rev().enumerate() {
        if i % 16 == 0 {
            stop.check()?;
        }
        for px in row {
            out.push(px.b);
            out.push(px.g);
            out.push(px.r);
        }
        out.extend(core::iter::repeat_n(0u8, pad_bytes));
    }

    log::debug!("encoded 24-bit BMP {width}x{height}, {} bytes", out.len());
    Ok(out)
}
