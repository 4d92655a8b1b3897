//! Image metadata reported alongside decoded pixels.

use crate::ImageFormat;

/// Header-level facts about a decoded image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Built-in format, or `None` when a custom codec produced the image.
    pub format: Option<ImageFormat>,
    /// Whether the decoded pixels carry alpha.
    pub has_alpha: bool,
    /// Whether the source holds more than one frame.
    pub has_animation: bool,
    /// Number of frames, when known without a full parse.
    pub frame_count: Option<u32>,
}

impl ImageInfo {
    /// Info for a single-frame image.
    pub fn new(width: u32, height: u32, format: Option<ImageFormat>) -> Self {
        Self {
            width,
            height,
            format,
            has_alpha: false,
            has_animation: false,
            frame_count: Some(1),
        }
    }

    pub fn with_alpha(mut self, has_alpha: bool) -> Self {
        self.has_alpha = has_alpha;
        self
    }

    /// Set the frame count; more than one frame marks the image animated.
    pub fn with_frame_count(mut self, frame_count: Option<u32>) -> Self {
        self.frame_count = frame_count;
        self.has_animation = frame_count.is_some_and(|n| n > 1);
        self
    }
}
