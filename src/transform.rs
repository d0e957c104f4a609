//! Per-pixel transforms, applied in place.
//!
//! 8-bit transforms only touch the `width` pixels of each row; row padding
//! bytes keep whatever the file contained.

use crate::pixel::Pixel;
use crate::raster::{Raster, Raster8, Raster24};

#[inline]
fn brighten(v: u8, delta: i32) -> u8 {
    (i64::from(v) + i64::from(delta)).clamp(0, 255) as u8
}

#[inline]
fn invert(v: u8) -> u8 {
    255 - v
}

impl Raster8 {
    /// Replace every value `v` with `255 - v`.
    pub fn negative(&mut self) {
        self.map_pixels(invert);
    }

    /// Add `delta` to every value, saturating at 0 and 255.
    pub fn brightness(&mut self, delta: i32) {
        self.map_pixels(|v| brighten(v, delta));
    }

    /// Binarize: values strictly greater than `threshold` become 255, the rest 0.
    pub fn threshold(&mut self, threshold: i32) {
        self.map_pixels(|v| if i32::from(v) > threshold { 255 } else { 0 });
    }

    /// Apply `f` to every pixel value (padding excluded).
    pub fn map_pixels(&mut self, mut f: impl FnMut(u8) -> u8) {
        for row in self.rows_mut() {
            for v in row {
                *v = f(*v);
            }
        }
    }
}

impl Raster24 {
    /// Invert all three channels.
    pub fn negative(&mut self) {
        self.map_pixels(|p| Pixel::new(invert(p.r), invert(p.g), invert(p.b)));
    }

    /// Add `delta` to every channel, saturating at 0 and 255.
    pub fn brightness(&mut self, delta: i32) {
        self.map_pixels(|p| {
            Pixel::new(
                brighten(p.r, delta),
                brighten(p.g, delta),
                brighten(p.b, delta),
            )
        });
    }

    /// Collapse each pixel to the truncated mean `(r + g + b) / 3` on all channels.
    pub fn grayscale(&mut self) {
        self.map_pixels(|p| {
            let avg = ((u16::from(p.r) + u16::from(p.g) + u16::from(p.b)) / 3) as u8;
            Pixel::new(avg, avg, avg)
        });
    }

    pub fn map_pixels(&mut self, mut f: impl FnMut(Pixel) -> Pixel) {
        for px in self.buf_mut() {
            *px = f(*px);
        }
    }
}

impl Raster {
    /// Depth-independent negative.
    pub fn negative(&mut self) {
        match self {
            Self::Gray8(img) => img.negative(),
            Self::Rgb24(img) => img.negative(),
        }
    }

    /// Depth-independent brightness adjustment.
    pub fn brightness(&mut self, delta: i32) {
        match self {
            Self::Gray8(img) => img.brightness(delta),
            Self::Rgb24(img) => img.brightness(delta),
        }
    }
}
