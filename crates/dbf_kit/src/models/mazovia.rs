//! Mazovia code page remapping
//!
//! Legacy Polish DBF tables store accented letters in the Mazovia code
//! page (sometimes called CP790). Only the accented letters differ from
//! Latin-1; every other byte decodes as its Latin-1 character, so the
//! remap is a small fixed table layered over the ISO-8859-1 codec.

use std::collections::HashMap;

use encoding::all::ISO_8859_1;
use encoding::{DecoderTrap, EncoderTrap, Encoding};
use once_cell::sync::Lazy;

use crate::errors::{DbfKitError, DbfKitResult};

/// Mazovia byte -> Unicode character, accented Polish letters only.
const MAZOVIA_TABLE: [(u8, char); 18] = [
    (0x8F, 'Ą'),
    (0x86, 'ą'),
    (0x95, 'Ć'),
    (0x8D, 'ć'),
    (0x90, 'Ę'),
    (0x91, 'ę'),
    (0x9C, 'Ł'),
    (0x92, 'ł'),
    (0xA5, 'Ń'),
    (0xA4, 'ń'),
    (0xA3, 'Ó'),
    (0xA2, 'ó'),
    (0x98, 'Ś'),
    (0x9E, 'ś'),
    (0xA1, 'Ż'),
    (0xA7, 'ż'),
    (0xA0, 'Ź'),
    (0xA6, 'ź'),
];

static MAZOVIA_TO_UNICODE: Lazy<HashMap<u8, char>> =
    Lazy::new(|| MAZOVIA_TABLE.iter().copied().collect());

// Inverted at startup; must stay a bijection over the table's domain.
static UNICODE_TO_MAZOVIA: Lazy<HashMap<char, u8>> =
    Lazy::new(|| MAZOVIA_TABLE.iter().map(|&(b, c)| (c, b)).collect());

/// Decode Mazovia bytes to UTF-8 text.
///
/// Table hits become the mapped character, everything else the byte's
/// Latin-1 character. One output character per input byte; never fails.
pub fn decode(bytes: &[u8]) -> String {
    let latin1 = ISO_8859_1
        .decode(bytes, DecoderTrap::Replace)
        .unwrap_or_else(|_| bytes.iter().map(|&b| char::from(b)).collect());
    decode_str(&latin1)
}

/// Remap an already Latin-1-decoded string.
///
/// The DBF collaborator hands fields over as `String`s where each char's
/// code point equals the legacy byte value, so this is the form the
/// record pipeline uses.
pub fn decode_str(text: &str) -> String {
    text.chars()
        .map(|c| match u8::try_from(u32::from(c)) {
            Ok(b) => MAZOVIA_TO_UNICODE.get(&b).copied().unwrap_or(c),
            Err(_) => c,
        })
        .collect()
}

/// Encode UTF-8 text back to Mazovia bytes.
///
/// Characters outside the table and above U+00FF are rejected.
pub fn encode(text: &str) -> DbfKitResult<Vec<u8>> {
    let latin1: String = text.chars().map(demap_char).collect();
    ISO_8859_1
        .encode(&latin1, EncoderTrap::Strict)
        .map_err(|e| DbfKitError::Encoding(e.to_string()))
}

/// Encode with `?` substituted for characters Mazovia cannot represent.
pub fn encode_lossy(text: &str) -> Vec<u8> {
    let latin1: String = text.chars().map(demap_char).collect();
    ISO_8859_1
        .encode(&latin1, EncoderTrap::Replace)
        .unwrap_or_else(|_| latin1.bytes().collect())
}

fn demap_char(c: char) -> char {
    UNICODE_TO_MAZOVIA
        .get(&c)
        .map(|&b| char::from(b))
        .unwrap_or(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_a_bijection() {
        assert_eq!(MAZOVIA_TO_UNICODE.len(), MAZOVIA_TABLE.len());
        assert_eq!(UNICODE_TO_MAZOVIA.len(), MAZOVIA_TABLE.len());
    }

    #[test]
    fn test_every_entry_round_trips() {
        for &(byte, ch) in MAZOVIA_TABLE.iter() {
            assert_eq!(decode(&[byte]), ch.to_string());
            assert_eq!(encode(&ch.to_string()).unwrap(), vec![byte]);
        }
    }

    #[test]
    fn test_unmapped_bytes_decode_as_latin1() {
        for b in 0u8..=255 {
            if MAZOVIA_TO_UNICODE.contains_key(&b) {
                continue;
            }
            assert_eq!(decode(&[b]), char::from(b).to_string());
        }
    }

    #[test]
    fn test_ascii_passes_through() {
        assert_eq!(decode(b"Hello World"), "Hello World");
        assert_eq!(encode("Hello World").unwrap(), b"Hello World".to_vec());
    }

    #[test]
    fn test_decode_polish_word() {
        // "Łódź" in Mazovia bytes
        assert_eq!(decode(&[0x9C, 0xA2, 0x64, 0xA6]), "Łódź");
    }

    #[test]
    fn test_decode_str_remaps_latin1_chars() {
        assert_eq!(decode_str("krak\u{00A2}w"), "kraków");
        assert_eq!(decode_str("g\u{0091}\u{009E}"), "gęś");
    }

    #[test]
    fn test_encode_decode_round_trip_on_mapped_and_ascii_bytes() {
        let original = vec![0x8F, 0x41, 0x42, 0xA6, 0x20, 0x92, 0x7A];
        let text = decode(&original);
        assert_eq!(encode(&text).unwrap(), original);
    }

    #[test]
    fn test_encode_rejects_unmappable_characters() {
        assert!(encode("price: €10").is_err());
        assert!(matches!(
            encode("\u{1F30D}"),
            Err(DbfKitError::Encoding(_))
        ));
    }

    #[test]
    fn test_encode_lossy_substitutes_unmappable_characters() {
        assert_eq!(encode_lossy("a€b"), b"a?b".to_vec());
        // Mapped characters still encode exactly
        assert_eq!(encode_lossy("ża"), vec![0xA7, b'a']);
    }
}
