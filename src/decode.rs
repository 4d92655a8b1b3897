//! Decoded image output.

use crate::{ImageFormat, ImageInfo, PixelData};

/// A fully decoded image.
///
/// Owned by the caller; nothing in it borrows from the source stream.
/// Loader entry points return `Option<DecodedImage>`, with `None` standing for
/// "no image".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    /// Decoded pixel data in a typed buffer.
    pub pixels: PixelData,
    /// Image metadata.
    pub info: ImageInfo,
}

impl DecodedImage {
    /// Image width in pixels (convenience accessor).
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Image height in pixels (convenience accessor).
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Built-in format the image was decoded from.
    pub fn format(&self) -> Option<ImageFormat> {
        self.info.format
    }
}
