//! Ordered codec registry and format dispatch.

use crate::codecs::ImageCodec;
use crate::stream::{ImageStream, RewindGuard};
use crate::{ImageFormat, Limits};

/// An ordered list of codecs, probed first to last.
///
/// Order is part of the contract: when two codecs accept the same input, the
/// one registered first wins. Built-in codecs are registered as PNG, JPEG,
/// GIF (subject to compiled-in features). A registry is immutable once built
/// and can be shared across threads.
pub struct CodecRegistry {
    codecs: Vec<Box<dyn ImageCodec>>,
}

impl CodecRegistry {
    /// All compiled-in codecs, no limits.
    pub fn all() -> Self {
        Self::all_with_limits(&Limits::none())
    }

    /// All compiled-in codecs, each enforcing `limits`.
    #[allow(unused_mut, unused_variables)]
    pub fn all_with_limits(limits: &Limits) -> Self {
        let mut registry = Self::none();

        #[cfg(feature = "png")]
        {
            registry = registry.with_codec(crate::codecs::PngCodec::with_limits(limits.clone()));
        }
        #[cfg(feature = "jpeg")]
        {
            registry = registry.with_codec(crate::codecs::JpegCodec::with_limits(limits.clone()));
        }
        #[cfg(feature = "gif")]
        {
            registry = registry.with_codec(crate::codecs::GifCodec::with_limits(limits.clone()));
        }

        registry
    }

    /// Nothing registered; the caller opts in codec by codec.
    pub fn none() -> Self {
        Self { codecs: Vec::new() }
    }

    /// Append a codec; it is probed after every codec already registered.
    pub fn with_codec<C: ImageCodec + 'static>(self, codec: C) -> Self {
        self.with_boxed_codec(Box::new(codec))
    }

    /// Append an already boxed codec.
    pub fn with_boxed_codec(mut self, codec: Box<dyn ImageCodec>) -> Self {
        self.codecs.push(codec);
        self
    }

    /// Drop every codec implementing `format`.
    pub fn without_format(mut self, format: ImageFormat) -> Self {
        self.codecs.retain(|codec| codec.format() != Some(format));
        self
    }

    /// Is a codec for this built-in format registered?
    pub fn can_decode(&self, format: ImageFormat) -> bool {
        self.codecs.iter().any(|codec| codec.format() == Some(format))
    }

    /// Built-in formats with a registered codec, in probing order.
    pub fn decodable_formats(&self) -> impl Iterator<Item = ImageFormat> + '_ {
        self.codecs.iter().filter_map(|codec| codec.format())
    }

    /// Registered codecs in probing order.
    pub fn codecs(&self) -> impl Iterator<Item = &dyn ImageCodec> + '_ {
        self.codecs.iter().map(|codec| codec.as_ref())
    }

    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }

    /// Find the first codec that recognizes `input`.
    ///
    /// Every probe runs behind a [`RewindGuard`], so whatever the outcome the
    /// stream is back at its entry position when this returns. Returns `None`
    /// when nothing matches, or when the stream cannot report its position.
    pub fn find_format(&self, input: &mut dyn ImageStream) -> Option<&dyn ImageCodec> {
        let start = match input.stream_position() {
            Ok(pos) => pos,
            Err(e) => {
                log::debug!("cannot probe a stream without a position: {e}");
                return None;
            }
        };

        for codec in &self.codecs {
            let found = {
                let mut guard = RewindGuard::at(&mut *input, start);
                codec.can_understand(&mut *guard)
            };
            log::trace!("{} probe at offset {start}: {found}", codec.name());

            if found {
                log::debug!("selected {} codec", codec.name());
                return Some(codec.as_ref());
            }
        }

        log::debug!("no codec recognized the stream at offset {start}");
        None
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::all()
    }
}

impl core::fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries(self.codecs.iter().map(|codec| codec.name()))
            .finish()
    }
}
