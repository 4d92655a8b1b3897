//! PNG codec adapter using the png crate.

use std::io::BufReader;

use super::{ImageCodec, matches_signature};
use crate::pixel::expand_gray;
use crate::stream::ImageStream;
use crate::{CodecError, DecodedImage, ImageFormat, ImageInfo, Limits, PixelData};

/// PNG decoder. Output is RGB8 or RGBA8 depending on the source's alpha.
#[derive(Clone, Debug, Default)]
pub struct PngCodec {
    limits: Limits,
}

impl PngCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject images whose header exceeds `limits` before allocating pixels.
    pub fn with_limits(limits: Limits) -> Self {
        Self { limits }
    }
}

impl ImageCodec for PngCodec {
    fn name(&self) -> &str {
        "png"
    }

    fn format(&self) -> Option<ImageFormat> {
        Some(ImageFormat::Png)
    }

    fn can_understand(&self, input: &mut dyn ImageStream) -> bool {
        matches_signature(input, ImageFormat::Png)
    }

    fn decode(&self, input: &mut dyn ImageStream) -> Result<DecodedImage, CodecError> {
        let mut decoder = ::png::Decoder::new(BufReader::new(input));
        // Palette expanded, 16-bit stripped: output is always 8 bits per channel.
        decoder.set_transformations(::png::Transformations::normalize_to_color8());

        let mut reader = decoder
            .read_info()
            .map_err(|e| CodecError::from_codec(ImageFormat::Png, e))?;

        let info = reader.info();
        let width = info.width;
        let height = info.height;
        let frame_count = info
            .animation_control
            .as_ref()
            .map_or(1, |actl| actl.num_frames);

        self.limits.validate(width, height, 4)?;

        let buffer_size = reader
            .output_buffer_size()
            .ok_or_else(|| CodecError::InvalidInput("cannot determine PNG output buffer size".into()))?;
        let mut raw_pixels = vec![0u8; buffer_size];

        let output_info = reader
            .next_frame(&mut raw_pixels)
            .map_err(|e| CodecError::from_codec(ImageFormat::Png, e))?;
        raw_pixels.truncate(output_info.buffer_size());

        let (decoded_color_type, _bit_depth) = reader.output_color_type();
        let w = width as usize;
        let h = height as usize;

        let pixels = match decoded_color_type {
            ::png::ColorType::Rgba => PixelData::from_rgba_bytes(&raw_pixels, w, h),
            ::png::ColorType::Rgb => PixelData::from_rgb_bytes(&raw_pixels, w, h),
            ::png::ColorType::GrayscaleAlpha => {
                PixelData::from_rgba_bytes(&expand_gray(&raw_pixels, true), w, h)
            }
            ::png::ColorType::Grayscale => {
                PixelData::from_rgb_bytes(&expand_gray(&raw_pixels, false), w, h)
            }
            ::png::ColorType::Indexed => {
                return Err(CodecError::InvalidInput(
                    "PNG palette was not expanded".into(),
                ));
            }
        }
        .ok_or_else(|| CodecError::InvalidInput("PNG frame size doesn't match header".into()))?;

        let info = ImageInfo::new(width, height, Some(ImageFormat::Png))
            .with_alpha(pixels.has_alpha())
            .with_frame_count(Some(frame_count));

        Ok(DecodedImage { pixels, info })
    }
}
