//! Resource limits for decode operations.

use crate::CodecError;

/// Caps applied by the built-in codecs.
///
/// Every field is optional. A codec reads the header, then calls
/// [`Limits::validate`] before it allocates the output pixel buffer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Limits {
    /// Maximum image width in pixels.
    pub max_width: Option<u64>,
    /// Maximum image height in pixels.
    pub max_height: Option<u64>,
    /// Maximum total pixels (width × height).
    pub max_pixels: Option<u64>,
    /// Maximum size of the decoded output buffer in bytes.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// No caps at all; what the default registry uses.
    pub fn none() -> Self {
        Self::default()
    }

    /// Check header dimensions against the width, height and pixel caps.
    pub fn check_dimensions(&self, width: u64, height: u64) -> Result<(), &'static str> {
        if let Some(max_width) = self.max_width {
            if width > max_width {
                return Err("width exceeds limit");
            }
        }

        if let Some(max_height) = self.max_height {
            if height > max_height {
                return Err("height exceeds limit");
            }
        }

        if let Some(max_pixels) = self.max_pixels {
            let pixels = width.saturating_mul(height);
            if pixels > max_pixels {
                return Err("pixel count exceeds limit");
            }
        }

        Ok(())
    }

    /// Check an output buffer size against `max_memory_bytes`.
    pub fn check_memory(&self, bytes: u64) -> Result<(), &'static str> {
        if let Some(max_memory) = self.max_memory_bytes {
            if bytes > max_memory {
                return Err("output buffer exceeds limit");
            }
        }
        Ok(())
    }

    /// Check a header's dimensions and the RGB/RGBA buffer they imply.
    pub fn validate(&self, width: u32, height: u32, bytes_per_pixel: u32) -> Result<(), CodecError> {
        let (width, height) = (u64::from(width), u64::from(height));
        self.check_dimensions(width, height)
            .map_err(|msg| CodecError::LimitExceeded(format!("{msg} ({width}x{height})")))?;

        let bytes = width
            .saturating_mul(height)
            .saturating_mul(u64::from(bytes_per_pixel));
        self.check_memory(bytes)
            .map_err(|msg| CodecError::LimitExceeded(format!("{msg} ({bytes} bytes)")))
    }
}
