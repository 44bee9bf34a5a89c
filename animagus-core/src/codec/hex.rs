//! Hex string <-> binary conversion.
//!
//! Input accepts an optional `0x` prefix and digits of either case. Output is always
//! lowercase and `0x`-prefixed.
use super::FormatError;
use ::hex::FromHexError;

pub const HEX_PREFIX: &str = "0x";

/// Decodes a hex string into raw bytes.
///
/// `"0x"` and `""` both decode to an empty buffer. The reported character index is
/// relative to the original input, prefix included.
pub fn hex_to_bin(input: &str) -> Result<Vec<u8>, FormatError> {
    let (offset, digits) = match input.strip_prefix(HEX_PREFIX) {
        Some(rest) => (HEX_PREFIX.len(), rest),
        None => (0, input),
    };

    ::hex::decode(digits).map_err(|e| match e {
        FromHexError::InvalidHexCharacter { c, index } => FormatError::InvalidHexCharacter {
            character: c,
            index: index + offset,
        },
        FromHexError::OddLength | FromHexError::InvalidStringLength => {
            FormatError::OddLength(digits.len())
        }
    })
}

/// Encodes raw bytes as a lowercase, `0x`-prefixed hex string.
pub fn bin_to_hex(bytes: &[u8]) -> String {
    format!("{HEX_PREFIX}{}", ::hex::encode(bytes))
}
