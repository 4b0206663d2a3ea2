//! Single-digit base-36 fields (`0`-`9`, `a`-`z`)

use crate::core::error::CodecError;

pub const RADIX: u32 = 36;

/// Encode one field as a single lower-case digit
pub fn encode_digit(field: &'static str, value: i64) -> Result<char, CodecError> {
    u32::try_from(value)
        .ok()
        .and_then(|v| char::from_digit(v, RADIX))
        .ok_or(CodecError::FieldOutOfRange { field, value })
}

/// Decode one digit; upper-case letters are accepted
pub fn decode_digit(section: &'static str, ch: char) -> Result<u32, CodecError> {
    ch.to_digit(RADIX).ok_or(CodecError::InvalidDigit { section, ch })
}
