//! The codec contract and the built-in codec adapters.
//!
//! Each built-in module provides a thin adapter between the [`ImageCodec`]
//! contract and a format-specific decoder crate.

use crate::stream::{ImageStream, read_prefix};
use crate::{CodecError, DecodedImage, ImageFormat};

#[cfg(feature = "png")]
pub(crate) mod png;

#[cfg(feature = "jpeg")]
pub(crate) mod jpeg;

#[cfg(feature = "gif")]
pub(crate) mod gif;

#[cfg(feature = "png")]
pub use self::png::PngCodec;

#[cfg(feature = "jpeg")]
pub use self::jpeg::JpegCodec;

#[cfg(feature = "gif")]
pub use self::gif::GifCodec;

/// A pluggable decoder for one binary image format.
///
/// Codecs are shared between threads and must not keep per-call state.
pub trait ImageCodec: Send + Sync {
    /// Short name used in logs and diagnostics.
    fn name(&self) -> &str;

    /// The built-in format this codec implements, if any.
    fn format(&self) -> Option<ImageFormat> {
        None
    }

    /// Check the leading bytes of `input` for this codec's signature.
    ///
    /// Reads only what the signature needs. Must return `false` for any
    /// input it does not recognize, including empty and truncated streams or
    /// read errors. The caller restores the stream position afterwards.
    fn can_understand(&self, input: &mut dyn ImageStream) -> bool;

    /// Decode a whole image from `input`, positioned where the probe started.
    fn decode(&self, input: &mut dyn ImageStream) -> Result<DecodedImage, CodecError>;
}

/// Probe helper for codecs identified by a fixed signature.
pub(crate) fn matches_signature(input: &mut dyn ImageStream, format: ImageFormat) -> bool {
    let mut header = [0u8; 8];
    let wanted = &mut header[..format.signature_len()];
    let n = read_prefix(input, wanted);
    format.matches_signature(&wanted[..n])
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn signature_probe_handles_short_input() {
        assert!(!matches_signature(&mut Cursor::new(&[0u8; 0][..]), ImageFormat::Png));
        assert!(!matches_signature(&mut Cursor::new(&b"GIF8"[..]), ImageFormat::Gif));
        assert!(matches_signature(&mut Cursor::new(&b"GIF89a"[..]), ImageFormat::Gif));
    }

    #[test]
    fn signature_probe_reads_only_the_signature() {
        let mut input = Cursor::new(&[0xFFu8, 0xD8, 0xFF, 0xE0, 0x00][..]);
        assert!(matches_signature(&mut input, ImageFormat::Jpeg));
        assert_eq!(input.position(), 3);
    }
}
