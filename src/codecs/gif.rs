//! GIF codec adapter using the image crate.

use std::io::BufReader;

use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, ImageDecoder};

use super::{ImageCodec, matches_signature};
use crate::stream::ImageStream;
use crate::{CodecError, DecodedImage, ImageFormat, ImageInfo, Limits, PixelData};

/// GIF decoder.
///
/// For animated GIFs, this returns only the first frame, as RGBA8. The
/// remaining frames are decoded one at a time so they can be counted.
#[derive(Clone, Debug, Default)]
pub struct GifCodec {
    limits: Limits,
}

impl GifCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject images whose header exceeds `limits` before allocating pixels.
    pub fn with_limits(limits: Limits) -> Self {
        Self { limits }
    }
}

impl ImageCodec for GifCodec {
    fn name(&self) -> &str {
        "gif"
    }

    fn format(&self) -> Option<ImageFormat> {
        Some(ImageFormat::Gif)
    }

    fn can_understand(&self, input: &mut dyn ImageStream) -> bool {
        matches_signature(input, ImageFormat::Gif)
    }

    fn decode(&self, input: &mut dyn ImageStream) -> Result<DecodedImage, CodecError> {
        let decoder = GifDecoder::new(BufReader::new(input))
            .map_err(|e| CodecError::from_codec(ImageFormat::Gif, e))?;

        let (width, height) = decoder.dimensions();
        self.limits.validate(width, height, 4)?;

        let mut frames = decoder.into_frames();
        let first = frames
            .next()
            .ok_or_else(|| CodecError::InvalidInput("GIF has no frames".into()))?
            .map_err(|e| CodecError::from_codec(ImageFormat::Gif, e))?
            .into_buffer();

        let pixels = PixelData::from_rgba_bytes(first.as_raw(), width as usize, height as usize)
            .ok_or_else(|| CodecError::InvalidInput("GIF frame size doesn't match screen".into()))?;

        let mut frame_count = 1u32;
        for frame in frames {
            if let Err(e) = frame {
                // The first frame is intact; a damaged tail only stops the count.
                log::debug!("GIF frame {} unreadable, counting stops: {e}", frame_count + 1);
                break;
            }
            frame_count += 1;
        }

        let info = ImageInfo::new(width, height, Some(ImageFormat::Gif))
            .with_alpha(true)
            .with_frame_count(Some(frame_count));

        Ok(DecodedImage { pixels, info })
    }
}
