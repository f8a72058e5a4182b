//! Integer arguments.

use std::num::ParseIntError;

/// Parses an unsigned integer, honouring `0x`, `0o` and `0b` prefixes.
///
/// Anything without a prefix is decimal.
pub fn parse_u64(text: &str) -> Result<u64, ParseIntError> {
    let (digits, radix) = match text.get(..2) {
        Some("0x" | "0X") => (&text[2..], 16),
        Some("0o" | "0O") => (&text[2..], 8),
        Some("0b" | "0B") => (&text[2..], 2),
        _ => (text, 10),
    };
    u64::from_str_radix(digits, radix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal() {
        assert_eq!(parse_u64("0"), Ok(0));
        assert_eq!(parse_u64("65"), Ok(65));
        assert_eq!(parse_u64("18446744073709551615"), Ok(u64::MAX));
    }

    #[test]
    fn test_prefixes() {
        assert_eq!(parse_u64("0x4E2D"), Ok(0x4E2D));
        assert_eq!(parse_u64("0X4e2d"), Ok(0x4E2D));
        assert_eq!(parse_u64("0o17"), Ok(15));
        assert_eq!(parse_u64("0b101"), Ok(5));
    }

    #[test]
    fn test_rejects() {
        assert!(parse_u64("").is_err());
        assert!(parse_u64("0x").is_err());
        assert!(parse_u64("-1").is_err());
        assert!(parse_u64("12abc").is_err());
        assert!(parse_u64("18446744073709551616").is_err());
    }
}
