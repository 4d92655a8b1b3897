//! Typed pixel buffers.
//!
//! Uses `imgref::ImgVec` for 2D pixel data with typed pixels from the `rgb` crate.

pub use imgref::{Img, ImgRef, ImgVec};
pub use rgb::{RGB8, RGBA8};

/// Decoded pixels in one of the layouts the built-in codecs produce.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum PixelData {
    Rgb8(ImgVec<RGB8>),
    Rgba8(ImgVec<RGBA8>),
}

impl PixelData {
    /// Build an RGB8 buffer from packed `RGBRGB…` bytes.
    ///
    /// Returns `None` if `bytes` doesn't hold exactly `width * height` pixels.
    pub fn from_rgb_bytes(bytes: &[u8], width: usize, height: usize) -> Option<Self> {
        if bytes.len() != width.checked_mul(height)?.checked_mul(3)? {
            return None;
        }
        let rgb: &[RGB8] = bytemuck::cast_slice(bytes);
        Some(PixelData::Rgb8(ImgVec::new(rgb.to_vec(), width, height)))
    }

    /// Build an RGBA8 buffer from packed `RGBARGBA…` bytes.
    ///
    /// Returns `None` if `bytes` doesn't hold exactly `width * height` pixels.
    pub fn from_rgba_bytes(bytes: &[u8], width: usize, height: usize) -> Option<Self> {
        if bytes.len() != width.checked_mul(height)?.checked_mul(4)? {
            return None;
        }
        let rgba: &[RGBA8] = bytemuck::cast_slice(bytes);
        Some(PixelData::Rgba8(ImgVec::new(rgba.to_vec(), width, height)))
    }

    pub fn width(&self) -> u32 {
        match self {
            PixelData::Rgb8(img) => img.width() as u32,
            PixelData::Rgba8(img) => img.width() as u32,
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            PixelData::Rgb8(img) => img.height() as u32,
            PixelData::Rgba8(img) => img.height() as u32,
        }
    }

    pub fn has_alpha(&self) -> bool {
        matches!(self, PixelData::Rgba8(_))
    }

    /// Pixel at `(x, y)` widened to RGBA (opaque for RGB buffers).
    pub fn pixel_rgba(&self, x: usize, y: usize) -> Option<RGBA8> {
        match self {
            PixelData::Rgb8(img) => img
                .rows()
                .nth(y)
                .and_then(|row| row.get(x))
                .map(|p| RGBA8::new(p.r, p.g, p.b, 255)),
            PixelData::Rgba8(img) => img.rows().nth(y).and_then(|row| row.get(x)).copied(),
        }
    }
}

impl PartialEq for PixelData {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PixelData::Rgb8(a), PixelData::Rgb8(b)) => {
                a.width() == b.width() && a.height() == b.height() && a.rows().eq(b.rows())
            }
            (PixelData::Rgba8(a), PixelData::Rgba8(b)) => {
                a.width() == b.width() && a.height() == b.height() && a.rows().eq(b.rows())
            }
            _ => false,
        }
    }
}

impl Eq for PixelData {}

/// Expand packed grayscale (`G` or `GA`) bytes to RGB/RGBA.
pub(crate) fn expand_gray(bytes: &[u8], with_alpha: bool) -> Vec<u8> {
    if with_alpha {
        bytes
            .chunks_exact(2)
            .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
            .collect()
    } else {
        bytes.iter().flat_map(|&g| [g, g, g]).collect()
    }
}
