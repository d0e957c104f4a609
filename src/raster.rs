//! In-memory rasters for the two supported bit depths.
//!
//! Both keep the headers captured at decode time so that an unmodified image
//! re-encodes byte-for-byte. Row 0 is always the visual top row; the bottom-up
//! file order is handled by the codec.

use imgref::ImgVec;

use crate::bmp::header::{
    FileHeader, HEADER_LEN, Headers, InfoHeader, PALETTE_LEN, synthesize,
};
use crate::error::BitmapError;
use crate::info::ImageInfo;
use crate::pixel::{BitDepth, Pixel, try_alloc};

/// 8-bit paletted grayscale image.
///
/// Pixel bytes are stored row-major with the file's 4-byte row stride, so
/// each row carries `stride - width` trailing padding bytes exactly as read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster8 {
    pub(crate) file_header: FileHeader,
    pub(crate) info_header: InfoHeader,
    pub(crate) palette: Box<[u8; PALETTE_LEN]>,
    /// Bytes between the palette and the pixel data offset.
    pub(crate) extra: Vec<u8>,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) stride: usize,
    pub(crate) data: Vec<u8>,
}

/// 24-bit true-color image.
#[derive(Clone, Debug)]
pub struct Raster24 {
    pub(crate) file_header: FileHeader,
    pub(crate) info_header: InfoHeader,
    /// Bytes between the info header and the pixel data offset.
    pub(crate) extra: Vec<u8>,
    pub(crate) pixels: ImgVec<Pixel>,
}

/// A decoded image of either supported depth.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Raster {
    Gray8(Raster8),
    Rgb24(Raster24),
}

fn linear_gray_palette() -> Box<[u8; PALETTE_LEN]> {
    let mut palette = Box::new([0u8; PALETTE_LEN]);
    for (i, entry) in palette.chunks_exact_mut(4).enumerate() {
        entry[0] = i as u8;
        entry[1] = i as u8;
        entry[2] = i as u8;
    }
    palette
}

impl Raster8 {
    /// Allocate a black image with a synthesized header and a linear grayscale palette.
    pub fn new(width: u32, height: u32) -> Result<Self, BitmapError> {
        let headers = synthesize(width, height, BitDepth::Gray8)?;
        let stride = BitDepth::Gray8
            .row_stride(width)
            .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
        let data = try_alloc(stride * height as usize, 0u8)?;
        Ok(Self::from_parts(
            headers,
            linear_gray_palette(),
            Vec::new(),
            stride,
            data,
        ))
    }

    pub(crate) fn from_parts(
        headers: Headers,
        palette: Box<[u8; PALETTE_LEN]>,
        extra: Vec<u8>,
        stride: usize,
        data: Vec<u8>,
    ) -> Self {
        debug_assert_eq!(data.len(), stride * headers.height as usize);
        Self {
            file_header: headers.file,
            info_header: headers.info,
            palette,
            extra,
            width: headers.width,
            height: headers.height,
            stride,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row including padding.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Padded pixel buffer, `stride * height` bytes, top row first.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Pixel values of row `y` (0 = top), without padding.
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.width as usize]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.stride;
        let end = start + self.width as usize;
        &mut self.data[start..end]
    }

    /// Iterate rows (without padding), top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        let w = self.width as usize;
        self.data.chunks_exact(self.stride).map(move |r| &r[..w])
    }

    pub(crate) fn rows_mut(&mut self) -> impl Iterator<Item = &mut [u8]> {
        let w = self.width as usize;
        self.data.chunks_exact_mut(self.stride).map(move |r| &mut r[..w])
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.stride + x]
    }

    pub fn set(&mut self, x: usize, y: usize, v: u8) {
        self.data[y * self.stride + x] = v;
    }

    /// The 1024-byte palette (256 BGRX entries), retained verbatim.
    pub fn palette(&self) -> &[u8; PALETTE_LEN] {
        &self.palette
    }

    pub fn file_header(&self) -> &FileHeader {
        &self.file_header
    }

    pub fn info_header(&self) -> &InfoHeader {
        &self.info_header
    }

    /// The 54 header bytes as they will be written.
    pub fn header_bytes(&self) -> [u8; HEADER_LEN] {
        header_bytes(&self.file_header, &self.info_header)
    }

    pub fn info(&self) -> ImageInfo {
        ImageInfo {
            width: self.width,
            height: self.height,
            bit_depth: BitDepth::Gray8,
            data_size: self.data.len(),
        }
    }
}

impl Raster24 {
    /// Allocate a black image with a synthesized header.
    pub fn new(width: u32, height: u32) -> Result<Self, BitmapError> {
        let headers = synthesize(width, height, BitDepth::Rgb24)?;
        let count = (width as usize)
            .checked_mul(height as usize)
            .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
        let buf = try_alloc(count, Pixel::new(0, 0, 0))?;
        Ok(Self::from_parts(headers, Vec::new(), buf))
    }

    pub(crate) fn from_parts(headers: Headers, extra: Vec<u8>, buf: Vec<Pixel>) -> Self {
        Self {
            file_header: headers.file,
            info_header: headers.info,
            extra,
            pixels: ImgVec::new(buf, headers.width as usize, headers.height as usize),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width() as u32
    }

    pub fn height(&self) -> u32 {
        self.pixels.height() as u32
    }

    /// Pixel grid, row 0 = top.
    pub fn pixels(&self) -> &ImgVec<Pixel> {
        &self.pixels
    }

    /// Mutable pixel storage, `width * height` entries, top row first.
    pub fn buf_mut(&mut self) -> &mut [Pixel] {
        self.pixels.buf_mut().as_mut_slice()
    }

    pub fn get(&self, x: usize, y: usize) -> Pixel {
        self.pixels[(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, px: Pixel) {
        self.pixels[(x, y)] = px;
    }

    pub fn file_header(&self) -> &FileHeader {
        &self.file_header
    }

    pub fn info_header(&self) -> &InfoHeader {
        &self.info_header
    }

    /// The 54 header bytes as they will be written.
    pub fn header_bytes(&self) -> [u8; HEADER_LEN] {
        header_bytes(&self.file_header, &self.info_header)
    }

    pub fn info(&self) -> ImageInfo {
        let stride = BitDepth::Rgb24.row_stride(self.width()).unwrap_or(0);
        ImageInfo {
            width: self.width(),
            height: self.height(),
            bit_depth: BitDepth::Rgb24,
            data_size: stride * self.height() as usize,
        }
    }
}

impl PartialEq for Raster24 {
    fn eq(&self, other: &Self) -> bool {
        self.file_header == other.file_header
            && self.info_header == other.info_header
            && self.extra == other.extra
            && self.pixels.width() == other.pixels.width()
            && self.pixels.height() == other.pixels.height()
            && self.pixels.buf() == other.pixels.buf()
    }
}

impl Eq for Raster24 {}

impl Raster {
    pub fn bit_depth(&self) -> BitDepth {
        match self {
            Self::Gray8(_) => BitDepth::Gray8,
            Self::Rgb24(_) => BitDepth::Rgb24,
        }
    }

    pub fn width(&self) -> u32 {
        match self {
            Self::Gray8(r) => r.width(),
            Self::Rgb24(r) => r.width(),
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            Self::Gray8(r) => r.height(),
            Self::Rgb24(r) => r.height(),
        }
    }

    pub fn info(&self) -> ImageInfo {
        match self {
            Self::Gray8(r) => r.info(),
            Self::Rgb24(r) => r.info(),
        }
    }

    pub fn as_gray8(&self) -> Option<&Raster8> {
        match self {
            Self::Gray8(r) => Some(r),
            Self::Rgb24(_) => None,
        }
    }

    pub fn as_rgb24(&self) -> Option<&Raster24> {
        match self {
            Self::Rgb24(r) => Some(r),
            Self::Gray8(_) => None,
        }
    }
}

impl From<Raster8> for Raster {
    fn from(r: Raster8) -> Self {
        Self::Gray8(r)
    }
}

impl From<Raster24> for Raster {
    fn from(r: Raster24) -> Self {
        Self::Rgb24(r)
    }
}

fn header_bytes(file: &FileHeader, info: &InfoHeader) -> [u8; HEADER_LEN] {
    let mut out = Vec::with_capacity(HEADER_LEN);
    file.write_to(&mut out);
    info.write_to(&mut out);
    let mut bytes = [0u8; HEADER_LEN];
    bytes.copy_from_slice(&out);
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_gray8_has_padded_rows() {
        let img = Raster8::new(5, 3).unwrap();
        assert_eq!(img.stride(), 8);
        assert_eq!(img.data().len(), 24);
        assert_eq!(img.rows().count(), 3);
        assert!(img.rows().all(|r| r.len() == 5));
        assert_eq!(img.palette()[4 * 200], 200);
        assert_eq!(img.palette()[4 * 200 + 3], 0);
        assert_eq!(img.file_header().data_offset, 1078);
    }

    #[test]
    fn new_rgb24_is_black() {
        let img = Raster24::new(3, 2).unwrap();
        assert_eq!(img.width(), 3);
        assert_eq!(img.height(), 2);
        assert!(img.pixels().buf().iter().all(|&p| p == Pixel::new(0, 0, 0)));
        assert_eq!(img.info().data_size, 12 * 2);
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert!(Raster8::new(0, 4).is_err());
        assert!(Raster24::new(4, 0).is_err());
    }

    #[test]
    fn set_and_get_address_same_pixel() {
        let mut img = Raster8::new(6, 4).unwrap();
        img.set(5, 3, 77);
        assert_eq!(img.get(5, 3), 77);
        assert_eq!(img.row(3)[5], 77);
        assert_eq!(img.data()[3 * 8 + 5], 77);

        let mut img = Raster24::new(2, 2).unwrap();
        img.set(1, 0, Pixel::new(1, 2, 3));
        assert_eq!(img.get(1, 0), Pixel::new(1, 2, 3));
        assert_eq!(img.pixels().buf()[1], Pixel::new(1, 2, 3));
    }

    #[test]
    fn header_bytes_start_with_signature() {
        let img = Raster24::new(2, 2).unwrap();
        let bytes = img.header_bytes();
        assert_eq!(&bytes[0..2], b"BM");
        assert_eq!(u16::from_le_bytes([bytes[28], bytes[29]]), 24);
    }
}
