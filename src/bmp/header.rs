//! Fixed-layout BMP headers: 14-byte file header and 40-byte BITMAPINFOHEADER.

use crate::error::BitmapError;
use crate::pixel::BitDepth;

/// Size of the BITMAPFILEHEADER.
pub const FILE_HEADER_LEN: usize = 14;
/// Size of the BITMAPINFOHEADER.
pub const INFO_HEADER_LEN: usize = 40;
/// Combined size of both fixed headers.
pub const HEADER_LEN: usize = FILE_HEADER_LEN + INFO_HEADER_LEN;
/// Size of the 256-entry BGRX palette that follows the headers in 8-bit files.
pub const PALETTE_LEN: usize = 256 * 4;

/// BMP file header (BITMAPFILEHEADER).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileHeader {
    pub signature: [u8; 2],
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    pub data_offset: u32,
}

/// DIB info header (BITMAPINFOHEADER).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InfoHeader {
    pub header_size: u32,
    pub width: i32,
    /// Positive = bottom-up rows.
    pub height: i32,
    pub planes: u16,
    pub bit_count: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_resolution: i32,
    pub y_resolution: i32,
    pub colors_used: u32,
    pub important_colors: u32,
}

fn u16_at(b: &[u8], off: usize) -> u16 {
    u16::from_le_bytes([b[off], b[off + 1]])
}

fn u32_at(b: &[u8], off: usize) -> u32 {
    u32::from_le_bytes([b[off], b[off + 1], b[off + 2], b[off + 3]])
}

fn i32_at(b: &[u8], off: usize) -> i32 {
    u32_at(b, off) as i32
}

impl FileHeader {
    pub fn parse(bytes: &[u8; FILE_HEADER_LEN]) -> Self {
        Self {
            signature: [bytes[0], bytes[1]],
            file_size: u32_at(bytes, 2),
            reserved1: u16_at(bytes, 6),
            reserved2: u16_at(bytes, 8),
            data_offset: u32_at(bytes, 10),
        }
    }

    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.signature);
        out.extend_from_slice(&self.file_size.to_le_bytes());
        out.extend_from_slice(&self.reserved1.to_le_bytes());
        out.extend_from_slice(&self.reserved2.to_le_bytes());
        out.extend_from_slice(&self.data_offset.to_le_bytes());
    }
}

impl InfoHeader {
    pub fn parse(bytes: &[u8; INFO_HEADER_LEN]) -> Self {
        Self {
            header_size: u32_at(bytes, 0),
            width: i32_at(bytes, 4),
            height: i32_at(bytes, 8),
            planes: u16_at(bytes, 12),
            bit_count: u16_at(bytes, 14),
            compression: u32_at(bytes, 16),
            image_size: u32_at(bytes, 20),
            x_resolution: i32_at(bytes, 24),
            y_resolution: i32_at(bytes, 28),
            colors_used: u32_at(bytes, 32),
            important_colors: u32_at(bytes, 36),
        }
    }

    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.header_size.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&self.planes.to_le_bytes());
        out.extend_from_slice(&self.bit_count.to_le_bytes());
        out.extend_from_slice(&self.compression.to_le_bytes());
        out.extend_from_slice(&self.image_size.to_le_bytes());
        out.extend_from_slice(&self.x_resolution.to_le_bytes());
        out.extend_from_slice(&self.y_resolution.to_le_bytes());
        out.extend_from_slice(&self.colors_used.to_le_bytes());
        out.extend_from_slice(&self.important_colors.to_le_bytes());
    }
}

/// Parsed pair of fixed headers plus the validated geometry they describe.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Headers {
    pub file: FileHeader,
    pub info: InfoHeader,
    pub width: u32,
    pub height: u32,
}

impl Headers {
    /// Supported depth for the header's bit count.
    pub fn depth(&self) -> Result<BitDepth, BitmapError> {
        BitDepth::from_bits(self.info.bit_count).ok_or_else(|| {
            BitmapError::UnsupportedVariant(format!("{}-bit BMP", self.info.bit_count))
        })
    }

    /// Fail unless the header declares exactly `expected`.
    pub fn require_depth(&self, expected: BitDepth) -> Result<(), BitmapError> {
        if self.info.bit_count != expected.bits() {
            return Err(BitmapError::UnsupportedBitDepth {
                expected: expected.bits(),
                found: self.info.bit_count,
            });
        }
        Ok(())
    }
}

/// Parse and validate the 54 header bytes at the start of `data`.
pub(crate) fn parse_headers(data: &[u8]) -> Result<Headers, BitmapError> {
    let fixed: &[u8; HEADER_LEN] = data
        .get(..HEADER_LEN)
        .and_then(|s| s.try_into().ok())
        .ok_or(BitmapError::UnexpectedEof)?;
    if &fixed[0..2] != b"BM" {
        return Err(BitmapError::UnrecognizedFormat);
    }

    let mut file_bytes = [0u8; FILE_HEADER_LEN];
    file_bytes.copy_from_slice(&fixed[..FILE_HEADER_LEN]);
    let mut info_bytes = [0u8; INFO_HEADER_LEN];
    info_bytes.copy_from_slice(&fixed[FILE_HEADER_LEN..]);
    let file = FileHeader::parse(&file_bytes);
    let info = InfoHeader::parse(&info_bytes);

    if (info.header_size as usize) < INFO_HEADER_LEN {
        return Err(BitmapError::UnsupportedVariant(format!(
            "DIB header size {} (only BITMAPINFOHEADER and later are supported)",
            info.header_size
        )));
    }
    if info.width <= 0 {
        return Err(BitmapError::InvalidHeader(format!(
            "width must be positive, got {}",
            info.width
        )));
    }
    if info.height == 0 {
        return Err(BitmapError::InvalidHeader("height is zero".into()));
    }
    if info.height < 0 {
        return Err(BitmapError::UnsupportedVariant(
            "top-down BMP (negative height)".into(),
        ));
    }
    if info.compression != 0 {
        return Err(BitmapError::UnsupportedVariant(format!(
            "compressed BMP (compression = {})",
            info.compression
        )));
    }

    Ok(Headers {
        file,
        info,
        width: info.width as u32,
        height: info.height as u32,
    })
}

/// Build headers for a freshly allocated image with no source file.
pub(crate) fn synthesize(
    width: u32,
    height: u32,
    depth: BitDepth,
) -> Result<Headers, BitmapError> {
    if width == 0 || height == 0 {
        return Err(BitmapError::InvalidHeader(format!(
            "dimensions must be non-zero, got {width}x{height}"
        )));
    }
    if width > i32::MAX as u32 || height > i32::MAX as u32 {
        return Err(BitmapError::DimensionsTooLarge { width, height });
    }
    let stride = depth
        .row_stride(width)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    let image_size = stride
        .checked_mul(height as usize)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    let (data_offset, colors_used) = match depth {
        BitDepth::Gray8 => (HEADER_LEN + PALETTE_LEN, 256),
        BitDepth::Rgb24 => (HEADER_LEN, 0),
    };
    let file_size = image_size
        .checked_add(data_offset)
        .filter(|&s| s <= u32::MAX as usize)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;

    let file = FileHeader {
        signature: *b"BM",
        file_size: file_size as u32,
        reserved1: 0,
        reserved2: 0,
        data_offset: data_offset as u32,
    };
    let info = InfoHeader {
        header_size: INFO_HEADER_LEN as u32,
        width: width as i32,
        height: height as i32, // positive = bottom-up
        planes: 1,
        bit_count: depth.bits(),
        compression: 0,
        image_size: image_size as u32,
        x_resolution: 2835, // 72 DPI
        y_resolution: 2835,
        colors_used,
        important_colors: 0,
    };
    Ok(Headers {
        file,
        info,
        width,
        height,
    })
}
