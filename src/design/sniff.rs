const PNG_SIGNATURE: [u8; 4] = [0x89, 0x50, 0x4E, 0x47];

/// Classify raw image bytes into a media-type label by magic prefix.
/// The JPEG signature (`FF D8`) and anything unrecognized, empty input
/// included, fall through to the lenient `image/jpeg` default.
pub fn classify_image(data: &[u8]) -> &'static str {
    if data.starts_with(&PNG_SIGNATURE) {
        "image/png"
    } else if data.starts_with(b"GIF") {
        "image/gif"
    } else {
        "image/jpeg"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_png_signature() {
        let bytes = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00];
        assert_eq!(classify_image(&bytes), "image/png");
    }

    #[test]
    fn recognizes_gif_prefix() {
        assert_eq!(classify_image(b"GIF89a......"), "image/gif");
        assert_eq!(classify_image(b"GIF87a"), "image/gif");
    }

    #[test]
    fn recognizes_jpeg_signature() {
        let bytes = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        assert_eq!(classify_image(&bytes), "image/jpeg");
    }

    #[test]
    fn defaults_unknown_bytes_to_jpeg() {
        assert_eq!(classify_image(b"RIFF....WEBP"), "image/jpeg");
        assert_eq!(classify_image(b"not an image at all"), "image/jpeg");
    }

    #[test]
    fn defaults_empty_input_to_jpeg() {
        assert_eq!(classify_image(&[]), "image/jpeg");
    }

    #[test]
    fn truncated_png_prefix_is_not_png() {
        assert_eq!(classify_image(&[0x89, 0x50]), "image/jpeg");
    }
}
