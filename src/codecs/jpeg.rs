//! JPEG codec adapter using the image crate's baseline/progressive decoder.

use std::io::BufReader;

use image::codecs::jpeg::JpegDecoder;
use image::{DynamicImage, ImageDecoder};

use super::{ImageCodec, matches_signature};
use crate::stream::ImageStream;
use crate::{CodecError, DecodedImage, ImageFormat, ImageInfo, Limits, PixelData};

/// JPEG decoder. Output is always RGB8; grayscale and CMYK are converted.
#[derive(Clone, Debug, Default)]
pub struct JpegCodec {
    limits: Limits,
}

impl JpegCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject images whose header exceeds `limits` before allocating pixels.
    pub fn with_limits(limits: Limits) -> Self {
        Self { limits }
    }
}

impl ImageCodec for JpegCodec {
    fn name(&self) -> &str {
        "jpeg"
    }

    fn format(&self) -> Option<ImageFormat> {
        Some(ImageFormat::Jpeg)
    }

    fn can_understand(&self, input: &mut dyn ImageStream) -> bool {
        matches_signature(input, ImageFormat::Jpeg)
    }

    fn decode(&self, input: &mut dyn ImageStream) -> Result<DecodedImage, CodecError> {
        let decoder = JpegDecoder::new(BufReader::new(input))
            .map_err(|e| CodecError::from_codec(ImageFormat::Jpeg, e))?;

        let (width, height) = decoder.dimensions();
        self.limits.validate(width, height, 3)?;

        let rgb = DynamicImage::from_decoder(decoder)
            .map_err(|e| CodecError::from_codec(ImageFormat::Jpeg, e))?
            .into_rgb8();

        let pixels = PixelData::from_rgb_bytes(rgb.as_raw(), width as usize, height as usize)
            .ok_or_else(|| CodecError::InvalidInput("no pixel data in decoded image".into()))?;

        Ok(DecodedImage {
            pixels,
            info: ImageInfo::new(width, height, Some(ImageFormat::Jpeg)),
        })
    }
}
