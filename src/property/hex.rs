//! Fixed-width zero-padded hexadecimal encoding used throughout the
//! property catalog (spec section 3: "widths 2/4/8/10/16 per catalog").

use crate::error::ParseError;

pub fn encode(value: u64, width: usize) -> String {
    format!("{value:0width$x}", width = width)
}

/// Decode a hex token, requiring it be exactly `width` characters so a
/// truncated or overlong field is rejected rather than silently accepted.
pub fn decode(token: &str, width: usize, field: &'static str) -> Result<u64, ParseError> {
    if token.len() != width || !token.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ParseError::Property {
            name: field.to_string(),
            value: token.to_string(),
        });
    }
    u64::from_str_radix(token, 16).map_err(|_| ParseError::Property {
        name: field.to_string(),
        value: token.to_string(),
    })
}

pub fn decode_u8(token: &str, field: &'static str) -> Result<u8, ParseError> {
    decode(token, 2, field).map(|v| v as u8)
}

pub fn decode_u16(token: &str, field: &'static str) -> Result<u16, ParseError> {
    decode(token, 4, field).map(|v| v as u16)
}

pub fn decode_u32(token: &str, field: &'static str) -> Result<u32, ParseError> {
    decode(token, 8, field).map(|v| v as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_pads_zeroes() {
        assert_eq!(encode(0x40, 2), "40");
        assert_eq!(encode(0x3, 4), "0003");
    }

    #[test]
    fn decode_rejects_wrong_width() {
        assert!(decode_u8("4", "x").is_err());
        assert!(decode_u8("400", "x").is_err());
        assert_eq!(decode_u8("40", "x").unwrap(), 0x40);
    }

    #[test]
    fn decode_rejects_non_hex() {
        assert!(decode_u16("zzzz", "x").is_err());
    }
}
