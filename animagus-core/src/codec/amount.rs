//! 128-bit amount packing.
//!
//! Token amounts travel as a `BYTES` value of exactly 16 bytes: the low 64-bit word
//! little-endian, followed by the high 64-bit word little-endian. Nothing on the wire
//! marks such a payload as an amount; the query name is the only hint.
use super::{FormatError, ParseNumberError, parse_unsigned};
use crate::value::{Value, ValueError};
use std::fmt;
use std::str::FromStr;

/// Length in bytes of a packed amount.
pub const AMOUNT128_LEN: usize = 16;

const WORD_LEN: usize = 8;

/// Packs `value` as two little-endian 64-bit words, low word first.
pub fn pack_amount128(value: u128) -> [u8; AMOUNT128_LEN] {
    let low = value as u64;
    let high = (value >> 64) as u64;

    let mut out = [0u8; AMOUNT128_LEN];
    out[..WORD_LEN].copy_from_slice(&low.to_le_bytes());
    out[WORD_LEN..].copy_from_slice(&high.to_le_bytes());
    out
}

/// Reads a packed amount back. Any length other than 16 is rejected.
pub fn unpack_amount128(bytes: &[u8]) -> Result<u128, FormatError> {
    if bytes.len() != AMOUNT128_LEN {
        return Err(FormatError::InvalidAmountLength(bytes.len()));
    }

    let mut low = [0u8; WORD_LEN];
    let mut high = [0u8; WORD_LEN];
    low.copy_from_slice(&bytes[..WORD_LEN]);
    high.copy_from_slice(&bytes[WORD_LEN..]);

    Ok(u128::from(u64::from_le_bytes(low)) | (u128::from(u64::from_le_bytes(high)) << 64))
}

/// Parses a decimal amount, rejecting negatives and anything `>= 2^128`.
pub fn parse_amount128(input: &str) -> Result<u128, ParseNumberError> {
    parse_unsigned::<u128>(input, 128)
}

/// A 128-bit unsigned token amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount128(pub u128);

impl Amount128 {
    /// Packs the amount into a 16-byte `BYTES` value.
    pub fn to_value(self) -> Value {
        Value::bytes(pack_amount128(self.0).to_vec())
    }

    /// Reads an amount out of a `BYTES` value.
    pub fn from_value(value: &Value) -> Result<Self, ValueError> {
        let raw = value.as_bytes()?;
        Ok(Self(unpack_amount128(raw)?))
    }
}

impl From<u128> for Amount128 {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl From<Amount128> for u128 {
    fn from(amount: Amount128) -> Self {
        amount.0
    }
}

impl FromStr for Amount128 {
    type Err = ParseNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_amount128(s).map(Self)
    }
}

impl fmt::Display for Amount128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::RangeError;

    const TWO_POW_128: &str = "340282366920938463463374607431768211456";

    #[test]
    fn packs_one_into_the_low_word() {
        assert_eq!(
            pack_amount128(1),
            [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn packs_two_pow_64_into_the_high_word() {
        assert_eq!(
            pack_amount128(1u128 << 64),
            [0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn round_trips_boundary_values() {
        for v in [
            0,
            1,
            u64::MAX as u128,
            1u128 << 64,
            (1u128 << 64) + 1,
            0x0123_4567_89ab_cdef_fedc_ba98_7654_3210,
            u128::MAX,
        ] {
            assert_eq!(unpack_amount128(&pack_amount128(v)), Ok(v));
        }
    }

    #[test]
    fn rejects_wrong_lengths() {
        assert_eq!(
            unpack_amount128(&[0u8; 15]),
            Err(FormatError::InvalidAmountLength(15))
        );
        assert_eq!(
            unpack_amount128(&[0u8; 17]),
            Err(FormatError::InvalidAmountLength(17))
        );
        assert_eq!(
            unpack_amount128(&[]),
            Err(FormatError::InvalidAmountLength(0))
        );
    }

    #[test]
    fn parse_rejects_out_of_range_values() {
        assert!(matches!(
            parse_amount128(TWO_POW_128),
            Err(ParseNumberError::Range(RangeError::Overflow { bits: 128, .. }))
        ));
        assert_eq!(
            parse_amount128("-1"),
            Err(ParseNumberError::Range(RangeError::Negative("-1".into())))
        );
    }

    #[test]
    fn parse_accepts_the_full_range() {
        assert_eq!(parse_amount128("0"), Ok(0));
        assert_eq!(
            parse_amount128("340282366920938463463374607431768211455"),
            Ok(u128::MAX)
        );
    }

    #[test]
    fn amount_value_round_trip() {
        let amount: Amount128 = "18446744073709551616".parse().unwrap();
        let value = amount.to_value();

        assert_eq!(value.as_bytes().unwrap().len(), AMOUNT128_LEN);
        assert_eq!(Amount128::from_value(&value), Ok(amount));
    }

    #[test]
    fn amount_from_non_bytes_value_fails() {
        assert!(Amount128::from_value(&Value::uint64(5)).is_err());
        assert!(matches!(
            Amount128::from_value(&Value::bytes(vec![1, 2, 3])),
            Err(ValueError::Format(FormatError::InvalidAmountLength(3)))
        ));
    }
}
