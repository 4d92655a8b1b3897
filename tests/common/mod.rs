#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use imgload::stream::read_prefix;
use imgload::{CodecError, DecodedImage, ImageCodec, ImageInfo, ImageStream, PixelData};

/// Codec that accepts streams starting with `magic` and counts its calls.
#[derive(Clone)]
pub struct StubCodec {
    name: &'static str,
    magic: &'static [u8],
    output: Option<DecodedImage>,
    pub probes: Arc<AtomicUsize>,
    pub decodes: Arc<AtomicUsize>,
}

impl StubCodec {
    /// Accepts `magic` and decodes to `output`.
    pub fn new(name: &'static str, magic: &'static [u8], output: DecodedImage) -> Self {
        Self {
            name,
            magic,
            output: Some(output),
            probes: Arc::default(),
            decodes: Arc::default(),
        }
    }

    /// Accepts `magic` but always fails to decode, like a corrupt body.
    pub fn corrupt(name: &'static str, magic: &'static [u8]) -> Self {
        Self {
            name,
            magic,
            output: None,
            probes: Arc::default(),
            decodes: Arc::default(),
        }
    }

    pub fn probe_count(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }

    pub fn decode_count(&self) -> usize {
        self.decodes.load(Ordering::SeqCst)
    }

    fn starts_with_magic(&self, input: &mut dyn ImageStream) -> bool {
        let mut header = vec![0u8; self.magic.len()];
        let n = read_prefix(input, &mut header);
        n == self.magic.len() && header == self.magic
    }
}

impl ImageCodec for StubCodec {
    fn name(&self) -> &str {
        self.name
    }

    fn can_understand(&self, input: &mut dyn ImageStream) -> bool {
        self.probes.fetch_add(1, Ordering::SeqCst);
        self.starts_with_magic(input)
    }

    fn decode(&self, input: &mut dyn ImageStream) -> Result<DecodedImage, CodecError> {
        self.decodes.fetch_add(1, Ordering::SeqCst);
        // The loader must hand over the stream at the probed position.
        if !self.starts_with_magic(input) {
            return Err(CodecError::InvalidInput("stream not at signature".into()));
        }
        self.output
            .clone()
            .ok_or_else(|| CodecError::InvalidInput("corrupt body".into()))
    }
}

/// A recognizable 1x1 image for stub codecs to return.
pub fn marker_image(r: u8, g: u8, b: u8) -> DecodedImage {
    DecodedImage {
        pixels: PixelData::from_rgb_bytes(&[r, g, b], 1, 1).expect("1x1 RGB"),
        info: ImageInfo::new(1, 1, None),
    }
}
