//! BMP decoder for uncompressed 8-bit paletted and 24-bit BGR images.
//!
//! Rows are stored bottom-up in the file; the decoded rasters are top-down.

use enough::Stop;

use super::header::{HEADER_LEN, Headers, PALETTE_LEN, parse_headers};
use crate::error::BitmapError;
use crate::limits::Limits;
use crate::pixel::{BitDepth, Pixel, try_alloc};
use crate::raster::{Raster, Raster8, Raster24};

// ── Cursor for reading from &[u8] ───────────────────────────────────

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn set_position(&mut self, pos: usize) -> Result<(), BitmapError> {
        if pos > self.data.len() {
            return Err(BitmapError::UnexpectedEof);
        }
        self.pos = pos;
        Ok(())
    }

    fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], BitmapError> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.read_slice(N)?);
        Ok(buf)
    }

    fn read_slice(&mut self, n: usize) -> Result<&'a [u8], BitmapError> {
        let end = self.pos.checked_add(n).ok_or(BitmapError::UnexpectedEof)?;
        let slice = self
            .data
            .get(self.pos..end)
            .ok_or(BitmapError::UnexpectedEof)?;
        self.pos = end;
        Ok(slice)
    }
}

// ── Shared validation ───────────────────────────────────────────────

struct Layout {
    stride: usize,
    payload_len: usize,
}

fn check_layout(
    headers: &Headers,
    depth: BitDepth,
    limits: Option<&Limits>,
    out_bytes_per_pixel: usize,
) -> Result<Layout, BitmapError> {
    let (width, height) = (headers.width, headers.height);
    if let Some(limits) = limits {
        limits.check(width, height)?;
    }
    let stride = depth
        .row_stride(width)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    let payload_len = stride
        .checked_mul(height as usize)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    let out_bytes = (width as usize)
        .checked_mul(height as usize)
        .and_then(|px| px.checked_mul(out_bytes_per_pixel))
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    if let Some(limits) = limits {
        limits.check_memory(out_bytes.max(payload_len))?;
    }
    Ok(Layout {
        stride,
        payload_len,
    })
}

fn warn_on_size_mismatch(headers: &Headers, actual: usize) {
    let declared = headers.file.file_size as usize;
    if declared != 0 && declared != actual {
        log::warn!("BMP file size field ({declared}) doesn't match actual size ({actual})");
    }
}

/// Bytes between `start` and the declared pixel data offset, kept for re-encoding.
fn read_extra(cursor: &mut Cursor<'_>, data_offset: usize) -> Result<Vec<u8>, BitmapError> {
    let start = cursor.position();
    if data_offset < start {
        log::warn!("BMP pixel data offset {data_offset} overlaps headers ending at {start}");
        return Ok(Vec::new());
    }
    Ok(cursor.read_slice(data_offset - start)?.to_vec())
}

// ── 8-bit ───────────────────────────────────────────────────────────

/// Decode an 8-bit paletted BMP.
pub(crate) fn decode_gray8(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Raster8, BitmapError> {
    let headers = parse_headers(data)?;
    headers.require_depth(BitDepth::Gray8)?;
    decode_gray8_with(data, headers, limits, stop)
}

fn decode_gray8_with(
    data: &[u8],
    headers: Headers,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Raster8, BitmapError> {
    let layout = check_layout(&headers, BitDepth::Gray8, limits, 1)?;
    stop.check()?;
    warn_on_size_mismatch(&headers, data.len());

    let mut cursor = Cursor::new(data);
    cursor.set_position(HEADER_LEN)?;
    let palette: Box<[u8; PALETTE_LEN]> = Box::new(cursor.read_fixed_bytes()?);

    let data_offset = headers.file.data_offset as usize;
    if data_offset < HEADER_LEN {
        return Err(BitmapError::InvalidHeader(format!(
            "pixel data offset {data_offset} lies inside the headers"
        )));
    }
    let extra = read_extra(&mut cursor, data_offset)?;
    cursor.set_position(data_offset)?;
    let payload = cursor.read_slice(layout.payload_len)?;

    let mut pixels = try_alloc(layout.payload_len, 0u8)?;
    let rows = headers.height as usize;
    for (file_row, src) in payload.chunks_exact(layout.stride).enumerate() {
        if file_row % 16 == 0 {
            stop.check()?;
        }
        let y = rows - 1 - file_row;
        pixels[y * layout.stride..(y + 1) * layout.stride].copy_from_slice(src);
    }

    log::debug!(
        "decoded 8-bit BMP {}x{} (stride {})",
        headers.width,
        headers.height,
        layout.stride
    );
    Ok(Raster8::from_parts(
        headers,
        palette,
        extra,
        layout.stride,
        pixels,
    ))
}

// ── 24-bit ──────────────────────────────────────────────────────────

/// Decode a 24-bit BMP, skipping the per-row alignment padding.
pub(crate) fn decode_rgb24(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Raster24, BitmapError> {
    let headers = parse_headers(data)?;
    headers.require_depth(BitDepth::Rgb24)?;
    decode_rgb24_with(data, headers, limits, stop)
}

fn decode_rgb24_with(
    data: &[u8],
    headers: Headers,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Raster24, BitmapError> {
    let layout = check_layout(
        &headers,
        BitDepth::Rgb24,
        limits,
        core::mem::size_of::<Pixel>(),
    )?;
    stop.check()?;
    warn_on_size_mismatch(&headers, data.len());

    let mut cursor = Cursor::new(data);
    cursor.set_position(HEADER_LEN)?;
    let data_offset = headers.file.data_offset as usize;
    if data_offset < HEADER_LEN {
        return Err(BitmapError::InvalidHeader(format!(
            "pixel data offset {data_offset} lies inside the headers"
        )));
    }
    let extra = read_extra(&mut cursor, data_offset)?;
    cursor.set_position(data_offset)?;
    let payload = cursor.read_slice(layout.payload_len)?;

    let w = headers.width as usize;
    let h = headers.height as usize;
    let mut buf = try_alloc(w * h, Pixel::new(0, 0, 0))?;
    for (file_row, src) in payload.chunks_exact(layout.stride).enumerate() {
        if file_row % 16 == 0 {
            stop.check()?;
        }
        let y = h - 1 - file_row;
        let dst = &mut buf[y * w..(y + 1) * w];
        for (px, bgr) in dst.iter_mut().zip(src[..w * 3].chunks_exact(3)) {
            *px = Pixel::new(bgr[2], bgr[1], bgr[0]);
        }
    }

    log::debug!("decoded 24-bit BMP {}x{}", headers.width, headers.height);
    Ok(Raster24::from_parts(headers, extra, buf))
}

// ── Either depth ────────────────────────────────────────────────────

/// Decode an 8-bit or 24-bit BMP, whichever the header declares.
pub(crate) fn decode_any(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Raster, BitmapError> {
    let headers = parse_headers(data)?;
    match headers.depth()? {
        BitDepth::Gray8 => decode_gray8_with(data, headers, limits, stop).map(Raster::Gray8),
        BitDepth::Rgb24 => decode_rgb24_with(data, headers, limits, stop).map(Raster::Rgb24),
    }
}
