//! # zenbmpfx
//!
//! Uncompressed BMP decoding, editing, and re-encoding for 8-bit paletted
//! grayscale and 24-bit true-color images.
//!
//! ## Round-trip fidelity
//!
//! Decoded rasters keep the file header, info header, palette (8-bit), and any
//! bytes between the headers and the pixel data. Encoding an unmodified raster
//! reproduces the input byte-for-byte, provided the input's row padding bytes
//! are zero (24-bit padding is always written as zero).
//!
//! ## Operations
//!
//! - Pointwise: [`Raster8::negative`], [`Raster8::brightness`],
//!   [`Raster8::threshold`], [`Raster24::negative`], [`Raster24::brightness`],
//!   [`Raster24::grayscale`]
//! - Histogram equalization (8-bit): [`Raster8::histogram`],
//!   [`Histogram::equalization_table`], [`Raster8::equalize`]
//! - Convolution: [`Raster8::apply_filter`], [`Raster24::apply_filter`] with a
//!   [`Kernel`]. The 24-bit path zero-pads past the border; the 8-bit path
//!   leaves a border of `kernel.offset()` pixels unfiltered.
//!
//! ## Non-Goals
//!
//! - Compressed BMP (RLE, bitfields), top-down BMP, other bit depths
//! - Resizing or depth conversion
//!
//! ## Usage
//!
//! ```no_run
//! use zenbmpfx::{Kernel, Unstoppable, load_image, save_image};
//!
//! let mut img = load_image("flowers.bmp")?;
//! println!("{}", img.info());
//! img.negative();
//! img.apply_filter(&Kernel::box_blur(3)?, Unstoppable)?;
//! save_image(&img, "flowers_out.bmp")?;
//! # Ok::<(), zenbmpfx::BitmapError>(())
//! ```

#![forbid(unsafe_code)]

mod bmp;
mod convolve;
mod decode;
mod error;
mod histogram;
mod info;
mod kernel;
mod limits;
mod pixel;
mod raster;
mod transform;

use std::path::Path;

// Re-exports
pub use bmp::header::{FileHeader, InfoHeader};
pub use decode::DecodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::BitmapError;
pub use histogram::{EqualizationTable, Histogram};
pub use info::ImageInfo;
pub use kernel::Kernel;
pub use limits::Limits;
pub use pixel::{BitDepth, Pixel};
pub use raster::{Raster, Raster8, Raster24};

// ── In-memory codec ─────────────────────────────────────────────────

/// Decode an 8-bit or 24-bit BMP.
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> Result<Raster, BitmapError> {
    bmp::decode(data, None, &stop)
}

/// Decode an 8-bit paletted BMP.
pub fn decode_gray8(data: &[u8], stop: impl Stop) -> Result<Raster8, BitmapError> {
    bmp::decode_gray8(data, None, &stop)
}

/// Decode a 24-bit BMP.
pub fn decode_rgb24(data: &[u8], stop: impl Stop) -> Result<Raster24, BitmapError> {
    bmp::decode_rgb24(data, None, &stop)
}

/// Encode a raster of either depth.
pub fn encode_bmp(raster: &Raster, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
    bmp::encode(raster, &stop)
}

/// Encode an 8-bit raster with its header and palette.
pub fn encode_gray8(img: &Raster8, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
    bmp::encode_gray8(img, &stop)
}

/// Encode a 24-bit raster with its headers.
pub fn encode_rgb24(img: &Raster24, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
    bmp::encode_rgb24(img, &stop)
}

// ── Files ───────────────────────────────────────────────────────────

/// Read and decode a BMP file of either supported depth.
pub fn load_image(path: impl AsRef<Path>) -> Result<Raster, BitmapError> {
    let data = std::fs::read(path.as_ref())?;
    decode_bmp(&data, Unstoppable)
}

/// Read and decode an 8-bit BMP file.
pub fn load_gray8(path: impl AsRef<Path>) -> Result<Raster8, BitmapError> {
    let data = std::fs::read(path.as_ref())?;
    decode_gray8(&data, Unstoppable)
}

/// Read and decode a 24-bit BMP file.
pub fn load_rgb24(path: impl AsRef<Path>) -> Result<Raster24, BitmapError> {
    let data = std::fs::read(path.as_ref())?;
    decode_rgb24(&data, Unstoppable)
}

/// Encode and write `raster` to `path`.
///
/// The file is written directly; a failure part-way may leave a partial file.
pub fn save_image(raster: &Raster, path: impl AsRef<Path>) -> Result<(), BitmapError> {
    let bytes = encode_bmp(raster, Unstoppable)?;
    std::fs::write(path.as_ref(), bytes)?;
    Ok(())
}

/// Encode and write an 8-bit raster to `path`.
pub fn save_gray8(img: &Raster8, path: impl AsRef<Path>) -> Result<(), BitmapError> {
    let bytes = encode_gray8(img, Unstoppable)?;
    std::fs::write(path.as_ref(), bytes)?;
    Ok(())
}

/// Encode and write a 24-bit raster to `path`.
pub fn save_rgb24(img: &Raster24, path: impl AsRef<Path>) -> Result<(), BitmapError> {
    let bytes = encode_rgb24(img, Unstoppable)?;
    std::fs::write(path.as_ref(), bytes)?;
    Ok(())
}
