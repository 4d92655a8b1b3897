//! # imgload
//!
//! Image format auto-detection and decoding over an ordered set of pluggable
//! codecs.
//!
//! Each built-in codec is feature-gated. Enable only what you need:
//!
//! ```toml
//! [dependencies]
//! imgload = { version = "0.1", default-features = false, features = ["png"] }
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use imgload::{CodecRegistry, ImageFormat, ImageLoader};
//!
//! // All compiled-in codecs, probed as PNG, JPEG, GIF
//! let loader = ImageLoader::new();
//!
//! let data: &[u8] = &[]; // your image bytes
//! match loader.load_from_bytes(data) {
//!     Some(image) => println!("{}x{}", image.width(), image.height()),
//!     None => println!("could not load"),
//! }
//!
//! // A private registry without GIF support
//! let loader = ImageLoader::with_registry(CodecRegistry::all().without_format(ImageFormat::Gif));
//! let image = loader.try_load_from_path("photo.png")?;
//! # Ok::<(), imgload::CodecError>(())
//! ```
//!
//! ## Custom codecs
//!
//! Implement [`ImageCodec`] and append it with [`CodecRegistry::with_codec`].
//! Probes only need to read their signature; the registry rewinds the
//! stream after each one.

#![forbid(unsafe_code)]

pub mod codecs;
mod decode;
mod error;
mod format;
mod info;
mod limits;
mod loader;
pub mod pixel;
mod registry;
pub mod stream;

pub use codecs::ImageCodec;
#[cfg(feature = "gif")]
pub use codecs::GifCodec;
#[cfg(feature = "jpeg")]
pub use codecs::JpegCodec;
#[cfg(feature = "png")]
pub use codecs::PngCodec;
pub use decode::DecodedImage;
pub use error::CodecError;
pub use format::ImageFormat;
pub use info::ImageInfo;
pub use limits::Limits;
pub use loader::{ImageLoader, MIN_SIGNATURE_LEN};
pub use pixel::PixelData;
pub use registry::CodecRegistry;
pub use stream::{ImageStream, READ_AHEAD_CAPACITY, ReadAhead, RewindGuard};
