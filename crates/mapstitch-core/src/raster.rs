//! Encoded map images and format sniffing.
//!
//! Battlemap documents embed their raster as an opaque byte payload with
//! no declared content type. The format is recovered from the leading
//! magic bytes instead, defaulting to PNG when nothing matches.

/// Raster encodings recognized in battlemap payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterFormat {
    Png,
    Webp,
    Jpeg,
}

impl RasterFormat {
    /// Detects the encoding from the leading bytes of a payload.
    ///
    /// Payloads shorter than four bytes, and payloads with an unknown
    /// signature, are treated as PNG.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mapstitch_core::raster::RasterFormat;
    /// assert_eq!(RasterFormat::sniff(b"RIFF\x00\x00WEBP"), RasterFormat::Webp);
    /// assert_eq!(RasterFormat::sniff(b"bogus"), RasterFormat::Png);
    /// ```
    pub fn sniff(bytes: &[u8]) -> Self {
        match bytes {
            [0x89, b'P', b'N', b'G', ..] => Self::Png,
            [b'R', b'I', b'F', b'F', ..] => Self::Webp,
            [0xFF, 0xD8, 0xFF, 0xE0, ..] => Self::Jpeg,
            _ => Self::Png,
        }
    }

    /// Returns the file extension for this format
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Webp => "webp",
            Self::Jpeg => "jpeg",
        }
    }
}

/// An encoded raster payload together with its sniffed format.
#[derive(Debug, Clone)]
pub struct RasterData {
    bytes: Vec<u8>,
    format: RasterFormat,
}

impl RasterData {
    /// Wraps raw image bytes, sniffing the format from their prefix.
    pub fn new(bytes: Vec<u8>) -> Self {
        let format = RasterFormat::sniff(&bytes);
        Self { bytes, format }
    }

    /// Returns the encoded image bytes
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the payload and returns the encoded bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Returns the sniffed encoding
    pub fn format(&self) -> RasterFormat {
        self.format
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_png() {
        let bytes = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(RasterFormat::sniff(&bytes), RasterFormat::Png);
    }

    #[test]
    fn test_sniff_webp() {
        assert_eq!(RasterFormat::sniff(b"RIFF0000WEBPVP8 "), RasterFormat::Webp);
    }

    #[test]
    fn test_sniff_jpeg() {
        let bytes = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        assert_eq!(RasterFormat::sniff(&bytes), RasterFormat::Jpeg);
    }

    #[test]
    fn test_sniff_defaults_to_png() {
        assert_eq!(RasterFormat::sniff(b"GIF89a"), RasterFormat::Png);
        assert_eq!(RasterFormat::sniff(b""), RasterFormat::Png);
        assert_eq!(RasterFormat::sniff(&[0x89, b'P']), RasterFormat::Png);
    }

    #[test]
    fn test_jpeg_requires_jfif_marker() {
        // An Exif-style JPEG header does not match the sniffer and falls
        // back to PNG, mirroring how these payloads have always been read.
        let exif = [0xFF, 0xD8, 0xFF, 0xE1, 0x00, 0x10];
        assert_eq!(RasterFormat::sniff(&exif), RasterFormat::Png);
    }

    #[test]
    fn test_extensions() {
        assert_eq!(RasterFormat::Png.extension(), "png");
        assert_eq!(RasterFormat::Webp.extension(), "webp");
        assert_eq!(RasterFormat::Jpeg.extension(), "jpeg");
    }

    #[test]
    fn test_raster_data_sniffs_on_construction() {
        let data = RasterData::new(vec![0xFF, 0xD8, 0xFF, 0xE0, 0x01]);
        assert_eq!(data.format(), RasterFormat::Jpeg);
        assert_eq!(data.bytes().len(), 5);
    }
}
