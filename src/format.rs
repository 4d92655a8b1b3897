//! Image format signatures and metadata.

/// Image formats with a built-in codec.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
}

/// PNG: 89 50 4E 47 0D 0A 1A 0A
const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// JPEG: FF D8 FF (SOI marker followed by the start of the next marker)
const JPEG_SIGNATURE: [u8; 3] = [0xFF, 0xD8, 0xFF];

impl ImageFormat {
    /// Built-in formats in probing order.
    pub const ALL: [ImageFormat; 3] = [ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::Gif];

    /// Number of leading bytes needed to recognize this format.
    pub fn signature_len(self) -> usize {
        match self {
            ImageFormat::Png => PNG_SIGNATURE.len(),
            ImageFormat::Jpeg => JPEG_SIGNATURE.len(),
            ImageFormat::Gif => 6,
        }
    }

    /// Whether `header` starts with this format's signature.
    ///
    /// Returns false when `header` is shorter than [`signature_len`](Self::signature_len).
    pub fn matches_signature(self, header: &[u8]) -> bool {
        match self {
            ImageFormat::Png => header.starts_with(&PNG_SIGNATURE),
            ImageFormat::Jpeg => header.starts_with(&JPEG_SIGNATURE),
            // GIF: "GIF87a" or "GIF89a"
            ImageFormat::Gif => {
                header.len() >= 6
                    && &header[..4] == b"GIF8"
                    && (header[4] == b'7' || header[4] == b'9')
                    && header[5] == b'a'
            }
        }
    }

    /// Detect format from magic bytes. Returns None if unrecognized.
    ///
    /// Formats are checked in [`ImageFormat::ALL`] order.
    pub fn detect(data: &[u8]) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.matches_signature(data))
    }

    /// Detect format from file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" | "jpe" | "jfif" => Some(ImageFormat::Jpeg),
            "gif" => Some(ImageFormat::Gif),
            _ => None,
        }
    }

    /// MIME type string.
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
        }
    }

    /// Common file extensions.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            ImageFormat::Png => &["png"],
            ImageFormat::Jpeg => &["jpg", "jpeg", "jpe", "jfif"],
            ImageFormat::Gif => &["gif"],
        }
    }

    /// Whether this format can carry an alpha channel.
    pub fn supports_alpha(self) -> bool {
        match self {
            ImageFormat::Png => true,
            ImageFormat::Jpeg => false,
            ImageFormat::Gif => true,
        }
    }

    /// Whether this format can carry more than one frame.
    pub fn supports_animation(self) -> bool {
        match self {
            ImageFormat::Png => true, // APNG; only the default image is decoded
            ImageFormat::Jpeg => false,
            ImageFormat::Gif => true,
        }
    }
}

impl core::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            ImageFormat::Png => "PNG",
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::Gif => "GIF",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_jpeg() {
        let data = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        assert_eq!(ImageFormat::detect(&data), Some(ImageFormat::Jpeg));
    }

    #[test]
    fn detect_png() {
        let data = [
            0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D,
        ];
        assert_eq!(ImageFormat::detect(&data), Some(ImageFormat::Png));
    }

    #[test]
    fn detect_gif() {
        assert_eq!(ImageFormat::detect(b"GIF89a\x01\x00"), Some(ImageFormat::Gif));
        assert_eq!(ImageFormat::detect(b"GIF87a\x01\x00"), Some(ImageFormat::Gif));
        assert_eq!(ImageFormat::detect(b"GIF88a\x01\x00"), None);
    }

    #[test]
    fn detect_too_short() {
        let data = [0xFF, 0xD8];
        assert_eq!(ImageFormat::detect(&data), None);
        assert_eq!(ImageFormat::detect(&[]), None);
        assert!(!ImageFormat::Png.matches_signature(&PNG_SIGNATURE[..7]));
    }

    #[test]
    fn signature_len_covers_signature() {
        for format in ImageFormat::ALL {
            assert!(format.signature_len() >= 3);
        }
        assert_eq!(ImageFormat::Png.signature_len(), 8);
    }

    #[test]
    fn from_extension_case_insensitive() {
        assert_eq!(ImageFormat::from_extension("JPG"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("Png"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_extension("webp"), None);
    }

    #[test]
    fn mime_types() {
        assert_eq!(ImageFormat::Png.mime_type(), "image/png");
        assert_eq!(ImageFormat::Jpeg.mime_type(), "image/jpeg");
        assert_eq!(ImageFormat::Gif.mime_type(), "image/gif");
    }

    #[test]
    fn capabilities() {
        assert!(ImageFormat::Png.supports_alpha());
        assert!(!ImageFormat::Jpeg.supports_alpha());
        assert!(ImageFormat::Gif.supports_alpha());

        assert!(ImageFormat::Png.supports_animation());
        assert!(!ImageFormat::Jpeg.supports_animation());
        assert!(ImageFormat::Gif.supports_animation());
    }

    #[test]
    fn extensions_round_trip() {
        for format in ImageFormat::ALL {
            for ext in format.extensions() {
                assert_eq!(ImageFormat::from_extension(ext), Some(format));
            }
        }
    }
}
