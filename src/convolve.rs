//! 2D convolution with a square odd-sized [`Kernel`].
//!
//! Every pass reads from the unmodified image and writes into a scratch
//! buffer, which replaces the pixel storage only once the pass completes. A
//! cancelled pass leaves the image untouched.
//!
//! The two depths handle borders differently:
//! - 24-bit: samples outside the image contribute zero, every pixel is filtered.
//! - 8-bit: only pixels at least `kernel.offset()` away from every edge are
//!   filtered; the border keeps its original values.

use enough::Stop;

use crate::error::BitmapError;
use crate::kernel::Kernel;
use crate::pixel::{Pixel, try_alloc, try_copy};
use crate::raster::{Raster, Raster8, Raster24};

#[inline]
fn clamp_round(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

impl Raster24 {
    /// Filtered value of the pixel at (`row`, `col`), reading from the current image.
    ///
    /// Out-of-bounds samples are skipped (zero padding).
    pub fn convolve_at(&self, row: usize, col: usize, kernel: &Kernel) -> Pixel {
        let w = self.width() as usize;
        let h = self.height() as usize;
        let off = kernel.offset();
        let buf = self.pixels.buf();

        let (mut r, mut g, mut b) = (0f32, 0f32, 0f32);
        for ki in 0..kernel.size() {
            let Some(y) = (row + ki).checked_sub(off).filter(|&y| y < h) else {
                continue;
            };
            for kj in 0..kernel.size() {
                let Some(x) = (col + kj).checked_sub(off).filter(|&x| x < w) else {
                    continue;
                };
                let coeff = kernel.at(ki, kj);
                let px = buf[y * w + x];
                r += coeff * f32::from(px.r);
                g += coeff * f32::from(px.g);
                b += coeff * f32::from(px.b);
            }
        }
        Pixel::new(clamp_round(r), clamp_round(g), clamp_round(b))
    }

    /// Convolve every pixel with `kernel`, zero-padding beyond the border.
    pub fn apply_filter(&mut self, kernel: &Kernel, stop: impl Stop) -> Result<(), BitmapError> {
        let w = self.width() as usize;
        let h = self.height() as usize;
        let mut scratch = try_alloc(w * h, Pixel::new(0, 0, 0))?;
        for y in 0..h {
            if y % 16 == 0 {
                stop.check()?;
            }
            for x in 0..w {
                scratch[y * w + x] = self.convolve_at(y, x, kernel);
            }
        }
        core::mem::swap(self.pixels.buf_mut(), &mut scratch);
        log::debug!("applied {0}x{0} filter to {w}x{h} 24-bit image", kernel.size());
        Ok(())
    }
}

impl Raster8 {
    /// Convolve interior pixels with `kernel`; a border `kernel.offset()` wide is left as is.
    pub fn apply_filter(&mut self, kernel: &Kernel, stop: impl Stop) -> Result<(), BitmapError> {
        let w = self.width() as usize;
        let h = self.height() as usize;
        let stride = self.stride();
        let off = kernel.offset();

        let mut scratch = try_copy(&self.data)?;

        let src = &self.data;
        for (i, y) in (off..h.saturating_sub(off)).enumerate() {
            if i % 16 == 0 {
                stop.check()?;
            }
            for x in off..w.saturating_sub(off) {
                let mut sum = 0f32;
                for ki in 0..kernel.size() {
                    let row = &src[(y + ki - off) * stride..];
                    for kj in 0..kernel.size() {
                        sum += kernel.at(ki, kj) * f32::from(row[x + kj - off]);
                    }
                }
                scratch[y * stride + x] = clamp_round(sum);
            }
        }
        self.data = scratch;
        log::debug!("applied {0}x{0} filter to {w}x{h} 8-bit image", kernel.size());
        Ok(())
    }
}

impl Raster {
    /// Depth-specific convolution; see the module docs for border handling.
    pub fn apply_filter(&mut self, kernel: &Kernel, stop: impl Stop) -> Result<(), BitmapError> {
        match self {
            Self::Gray8(img) => img.apply_filter(kernel, stop),
            Self::Rgb24(img) => img.apply_filter(kernel, stop),
        }
    }
}
