//! # Domain Codecs
//!
//! Pure conversions every caller of the generic service has to reproduce exactly:
//!
//! * **[`hex`]**: `0x`-prefixed hex strings <-> raw bytes, the format used for every
//!   script argument and hash on the command line.
//! * **[`amount`]**: 128-bit token amounts packed into 16 raw bytes
//!   (two little-endian 64-bit words, low word first).
//!
//! The functions here do not allocate shared state and fail fast: a malformed input
//! never yields a partial result.
pub mod amount;
pub mod hex;

use std::num::{IntErrorKind, ParseIntError};
use std::str::FromStr;

/// The input is syntactically malformed for the requested conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("Hex string must have an even number of digits, got {0}")]
    OddLength(usize),
    #[error("Invalid hex character '{character}' at position {index}")]
    InvalidHexCharacter { character: char, index: usize },
    #[error("A 128-bit amount must be exactly 16 bytes long, got {0} bytes")]
    InvalidAmountLength(usize),
    #[error("Invalid decimal number '{0}'")]
    InvalidDecimal(String),
}

/// The input is well formed but cannot be represented in the target width.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("Negative value '{0}' cannot be represented as an unsigned integer")]
    Negative(String),
    #[error("Value '{input}' does not fit in {bits} bits")]
    Overflow { input: String, bits: u32 },
}

/// Errors produced when parsing a decimal string into an unsigned integer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseNumberError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Range(#[from] RangeError),
}

/// Parses a decimal string into an unsigned integer `bits` wide.
///
/// A leading `-` followed by digits is reported as [`RangeError::Negative`] rather than
/// as a syntax error, since the number itself is meaningful, only out of range.
pub(crate) fn parse_unsigned<T>(input: &str, bits: u32) -> Result<T, ParseNumberError>
where
    T: FromStr<Err = ParseIntError>,
{
    let trimmed = input.trim();

    if let Some(digits) = trimmed.strip_prefix('-')
        && !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(RangeError::Negative(trimmed.to_string()).into());
    }

    trimmed.parse::<T>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => RangeError::Overflow {
            input: trimmed.to_string(),
            bits,
        }
        .into(),
        _ => FormatError::InvalidDecimal(trimmed.to_string()).into(),
    })
}
