//! Base64 decoding for embedded map images.
//!
//! Battlemap exporters differ in how they emit the image payload: some
//! pad, some do not, and some wrap the text across lines. The decoder
//! here accepts all of those shapes.

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

/// Standard alphabet, padding optional.
const PAYLOAD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decodes a base64 image payload into raw bytes.
///
/// ASCII whitespace is stripped before decoding so that line-wrapped
/// payloads survive.
pub(crate) fn decode_image(payload: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let cleaned: Vec<u8> = payload
        .bytes()
        .filter(|byte| !byte.is_ascii_whitespace())
        .collect();
    PAYLOAD.decode(cleaned)
}
