//! Conversion between register hex strings and 8-bit binary strings.
//!
//! `i2cget` prints register contents as hex (`0x2c`); pin states are read off
//! the zero-padded binary form (`00101100`), most significant bit first.

use crate::error::{CodecError, CodecResult};

/// Width of an MCP23x17 register in bits.
pub const REGISTER_BITS: usize = 8;

/// Strip surrounding whitespace and an optional `0x`/`0X` prefix.
pub(crate) fn strip_hex_prefix(s: &str) -> &str {
    let s = s.trim();
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Parse a hex string into a byte, rejecting values wider than 8 bits.
///
/// Leading zeros are allowed (`"00ff"` is `0xff`).
pub fn parse_hex_u8(hex: &str) -> CodecResult<u8> {
    let digits = strip_hex_prefix(hex);

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CodecError::InvalidHex(hex.to_string()));
    }

    let significant = digits.trim_start_matches('0');
    if significant.len() > 2 {
        return Err(CodecError::OutOfRange(hex.to_string()));
    }
    if significant.is_empty() {
        return Ok(0);
    }

    u8::from_str_radix(significant, 16).map_err(|_| CodecError::InvalidHex(hex.to_string()))
}

/// Convert a hex string to an exactly 8 character binary string.
///
/// ```
/// use mcp23x17::codec::hex_to_binary8;
///
/// assert_eq!(hex_to_binary8("A").unwrap(), "00001010");
/// assert_eq!(hex_to_binary8("0").unwrap(), "00000000");
/// ```
pub fn hex_to_binary8(hex: &str) -> CodecResult<String> {
    let value = parse_hex_u8(hex)?;
    Ok(format!("{:08b}", value))
}

/// Convert an 8 character binary string (MSB first) back into a byte.
pub fn binary8_to_value(binary: &str) -> CodecResult<u8> {
    if binary.len() != REGISTER_BITS || !binary.chars().all(|c| c == '0' || c == '1') {
        return Err(CodecError::InvalidBinary(binary.to_string()));
    }

    u8::from_str_radix(binary, 2).map_err(|_| CodecError::InvalidBinary(binary.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_padded() {
        assert_eq!(hex_to_binary8("0").unwrap(), "00000000");
        assert_eq!(hex_to_binary8("00").unwrap(), "00000000");
    }

    #[test]
    fn test_known_values() {
        assert_eq!(hex_to_binary8("FF").unwrap(), "11111111");
        assert_eq!(hex_to_binary8("ff").unwrap(), "11111111");
        assert_eq!(hex_to_binary8("A").unwrap(), "00001010");
        assert_eq!(hex_to_binary8("80").unwrap(), "10000000");
        assert_eq!(hex_to_binary8("1").unwrap(), "00000001");
    }

    #[test]
    fn test_i2cget_output_form() {
        assert_eq!(hex_to_binary8("0x0a").unwrap(), "00001010");
        assert_eq!(hex_to_binary8(" 0X2C\n").unwrap(), "00101100");
    }

    #[test]
    fn test_every_byte_is_eight_bits() {
        for value in 0..=255u8 {
            let hex = format!("{:x}", value);
            let binary = hex_to_binary8(&hex).unwrap();
            assert_eq!(binary.len(), 8, "width for {}", hex);
            assert_eq!(binary8_to_value(&binary).unwrap(), value);
        }
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            hex_to_binary8("100"),
            Err(CodecError::OutOfRange("100".to_string()))
        );
        assert!(matches!(
            hex_to_binary8("0x1ff"),
            Err(CodecError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_leading_zeros_are_not_out_of_range() {
        assert_eq!(hex_to_binary8("000f").unwrap(), "00001111");
    }

    #[test]
    fn test_invalid_hex() {
        assert!(matches!(hex_to_binary8(""), Err(CodecError::InvalidHex(_))));
        assert!(matches!(hex_to_binary8("0x"), Err(CodecError::InvalidHex(_))));
        assert!(matches!(hex_to_binary8("zz"), Err(CodecError::InvalidHex(_))));
        assert!(matches!(hex_to_binary8("-1"), Err(CodecError::InvalidHex(_))));
    }

    #[test]
    fn test_binary_to_value() {
        assert_eq!(binary8_to_value("01101001").unwrap(), 0x69);
        assert!(binary8_to_value("0110100").is_err());
        assert!(binary8_to_value("0110100x").is_err());
    }
}
