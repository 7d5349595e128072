//! Tag identifier encoding.
//!
//! Identifiers travel as uppercase hex, two characters per byte, in array
//! order, with no separators or prefix: `[0x04, 0x0A, 0xF2]` becomes
//! `"040AF2"`.

/// Encode raw identifier bytes.
pub fn encode_tag_id(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}

/// Decode an encoded identifier back into bytes.
///
/// Accepts either case. Fails on odd length or non-hex characters.
pub fn decode_tag_id(tag_id: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(tag_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_padded_uppercase() {
        assert_eq!(encode_tag_id(&[0x0A]), "0A");
        assert_eq!(encode_tag_id(&[0x00, 0xFF, 0x0b]), "00FF0B");
        assert_eq!(encode_tag_id(&[0x04, 0xA3, 0xF2]), "04A3F2");
    }

    #[test]
    fn test_empty_identifier() {
        assert_eq!(encode_tag_id(&[]), "");
    }

    #[test]
    fn test_every_byte_value() {
        let bytes: Vec<u8> = (0..=255).collect();
        let encoded = encode_tag_id(&bytes);

        assert_eq!(encoded.len(), bytes.len() * 2);
        assert!(!encoded.chars().any(|c| c.is_ascii_lowercase()));
        assert_eq!(decode_tag_id(&encoded).unwrap(), bytes);
    }

    #[test]
    fn test_typical_uid_lengths() {
        for len in [4usize, 7, 10] {
            let bytes: Vec<u8> = (0..len as u8).map(|b| b.wrapping_mul(37)).collect();
            let encoded = encode_tag_id(&bytes);
            assert_eq!(encoded.len(), 2 * len);
            assert_eq!(decode_tag_id(&encoded).unwrap(), bytes);
        }
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(decode_tag_id("ABC").is_err());
        assert!(decode_tag_id("ZZ").is_err());
    }
}
