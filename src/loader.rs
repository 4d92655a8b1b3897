//! Loader entry points: stream, path and in-memory bytes.

use std::fs::File;
use std::io::Cursor;
use std::path::Path;

use crate::codecs::ImageCodec;
use crate::stream::{ImageStream, READ_AHEAD_CAPACITY, ReadAhead, RewindGuard, read_prefix};
use crate::{CodecError, CodecRegistry, DecodedImage, ImageFormat};

/// Buffers shorter than this can't hold any supported signature.
pub const MIN_SIGNATURE_LEN: usize = 4;

/// Detects the format of an input and decodes it with the matching codec.
///
/// Every entry point funnels into "find the first codec that recognizes the
/// stream, then decode from the position probing started at". The `load_*`
/// functions report every failure as `None`; the `try_load_*` functions
/// return the reason instead.
///
/// # Example
///
/// ```no_run
/// use imgload::ImageLoader;
///
/// let loader = ImageLoader::new();
/// if let Some(image) = loader.load_from_path("photo.png") {
///     println!("{}x{}", image.width(), image.height());
/// }
/// ```
#[derive(Debug)]
pub struct ImageLoader {
    registry: CodecRegistry,
    read_ahead: usize,
}

impl ImageLoader {
    /// Loader over all compiled-in codecs.
    pub fn new() -> Self {
        Self::with_registry(CodecRegistry::all())
    }

    /// Loader over a caller-built registry.
    pub fn with_registry(registry: CodecRegistry) -> Self {
        Self {
            registry,
            read_ahead: READ_AHEAD_CAPACITY,
        }
    }

    /// Override the read-ahead window used by [`load_from_path`](Self::load_from_path).
    pub fn with_read_ahead(mut self, capacity: usize) -> Self {
        self.read_ahead = capacity.max(1);
        self
    }

    pub fn registry(&self) -> &CodecRegistry {
        &self.registry
    }

    /// First registered codec that recognizes `input`; the stream is left
    /// at its entry position.
    pub fn find_format(&self, input: &mut dyn ImageStream) -> Option<&dyn ImageCodec> {
        self.registry.find_format(input)
    }

    /// Decode from the stream's current position.
    ///
    /// Returns `None` if no codec recognizes the data or if the selected codec
    /// fails to decode it. No other codec is tried after a decode failure.
    pub fn load_from_stream(&self, input: &mut dyn ImageStream) -> Option<DecodedImage> {
        self.try_load_from_stream(input).ok()
    }

    /// Open `path` and decode it through a read-ahead window.
    ///
    /// Returns `None` without probing if the file can't be opened. The file
    /// is closed before this returns, whatever the outcome.
    pub fn load_from_path(&self, path: impl AsRef<Path>) -> Option<DecodedImage> {
        self.try_load_from_path(path).ok()
    }

    /// Decode an in-memory buffer without copying it.
    ///
    /// Buffers shorter than [`MIN_SIGNATURE_LEN`] return `None` without
    /// probing.
    pub fn load_from_bytes(&self, data: &[u8]) -> Option<DecodedImage> {
        self.try_load_from_bytes(data).ok()
    }

    pub fn try_load_from_stream(
        &self,
        input: &mut dyn ImageStream,
    ) -> Result<DecodedImage, CodecError> {
        let Some(codec) = self.find_format(input) else {
            return Err(match self.missing_codec(input) {
                Some(format) => CodecError::UnsupportedFormat(format),
                None => CodecError::UnrecognizedFormat,
            });
        };

        codec.decode(input).inspect_err(|e| {
            log::warn!("{} codec recognized the stream but failed to decode it: {e}", codec.name());
        })
    }

    pub fn try_load_from_path(&self, path: impl AsRef<Path>) -> Result<DecodedImage, CodecError> {
        let path = path.as_ref();
        let file = File::open(path)
            .inspect_err(|e| log::debug!("cannot open {}: {e}", path.display()))?;

        let mut input = ReadAhead::with_capacity(self.read_ahead, file)?;
        self.try_load_from_stream(&mut input)
    }

    pub fn try_load_from_bytes(&self, data: &[u8]) -> Result<DecodedImage, CodecError> {
        if data.len() < MIN_SIGNATURE_LEN {
            log::debug!("{} byte buffer is too short for any signature", data.len());
            return Err(CodecError::UnrecognizedFormat);
        }

        self.try_load_from_stream(&mut Cursor::new(data))
    }
}

impl ImageLoader {
    /// Built-in format whose signature `input` carries although no codec for
    /// it is registered. Only consulted after every probe has failed.
    fn missing_codec(&self, input: &mut dyn ImageStream) -> Option<ImageFormat> {
        let mut guard = RewindGuard::new(&mut *input).ok()?;
        let mut header = [0u8; 8];
        let n = read_prefix(&mut *guard, &mut header);

        let format = ImageFormat::detect(&header[..n])?;
        if self.registry.can_decode(format) {
            return None;
        }
        log::debug!("{format} signature found but no {format} codec is registered");
        Some(format)
    }
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_ahead_has_a_floor() {
        let loader = ImageLoader::new().with_read_ahead(0);
        assert_eq!(loader.read_ahead, 1);
        assert_eq!(ImageLoader::default().read_ahead, READ_AHEAD_CAPACITY);
    }

    #[test]
    fn short_buffers_are_unrecognized() {
        let loader = ImageLoader::new();
        assert!(loader.load_from_bytes(&[]).is_none());
        assert!(matches!(
            loader.try_load_from_bytes(&[0x89, 0x50, 0x4E]),
            Err(CodecError::UnrecognizedFormat)
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let loader = ImageLoader::new();
        let result = loader.try_load_from_path("/definitely/not/here.png");
        assert!(matches!(result, Err(CodecError::Io(_))));
    }

    #[test]
    fn known_signature_without_codec_is_unsupported() {
        let loader = ImageLoader::with_registry(CodecRegistry::none());
        let mut input = Cursor::new(&b"xxGIF89a\x01\x00\x01\x00"[..]);
        input.set_position(2);

        assert!(matches!(
            loader.try_load_from_stream(&mut input),
            Err(CodecError::UnsupportedFormat(ImageFormat::Gif))
        ));
        assert_eq!(input.position(), 2);
    }

    #[test]
    fn text_is_unrecognized() {
        let loader = ImageLoader::new();
        assert!(matches!(
            loader.try_load_from_bytes(b"not an image"),
            Err(CodecError::UnrecognizedFormat)
        ));
    }
}
