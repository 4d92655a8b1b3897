//! Unified error type for probing and decoding.

use crate::format::ImageFormat;

/// Unified error type for codec operations.
///
/// The `load_*` entry points of [`ImageLoader`](crate::ImageLoader) collapse
/// every variant into `None`; the `try_load_*` variants surface it.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CodecError {
    /// No registered codec recognized the stream.
    #[error("unrecognized image format")]
    UnrecognizedFormat,
    /// A built-in signature matched, but no codec for it is registered.
    #[error("format {0} not supported (no codec registered)")]
    UnsupportedFormat(ImageFormat),
    /// Input validation failed.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Resource limit exceeded.
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),
    /// Reading, seeking or opening the source failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Underlying codec error.
    #[error("codec error ({format}): {source}")]
    Codec {
        format: ImageFormat,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl CodecError {
    /// Wrap a codec-specific error.
    pub fn from_codec<E>(format: ImageFormat, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        CodecError::Codec {
            format,
            source: Box::new(error),
        }
    }
}
