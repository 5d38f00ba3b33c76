//! Byte decoding and encoding repair for report files
//!
//! Reports reach the importer as UTF-8, as UTF-16 with a byte order mark,
//! or in the Turkish single-byte code page used by older Windows exporters.
//! Some exports are also double-encoded: UTF-8 bytes that were read as
//! Windows-1252 and saved again, turning "ü" into "Ã¼".

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use serde::Serialize;
use tracing::{debug, warn};

use crate::constants::MOJIBAKE_MARKERS;
use crate::{Error, Result};

/// Decoded report text with the encoding that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedText {
    pub text: String,

    /// Canonical name of the source encoding
    pub encoding: String,

    /// True when double-encoded text was repaired
    pub repaired: bool,
}

impl DecodedText {
    /// Apply [`repair_mojibake`], keeping the text unchanged when no repair applies
    pub fn with_mojibake_repair(self) -> Self {
        match repair_mojibake(&self.text) {
            Some(text) => Self {
                text,
                repaired: true,
                ..self
            },
            None => self,
        }
    }
}

/// Decode raw report bytes
///
/// A byte order mark decides the encoding when present. Otherwise valid
/// UTF-8 is taken as is and anything else is decoded with the fallback
/// encoding named by `fallback_label` (a WHATWG label such as
/// `windows-1254`).
pub fn decode_report_bytes(bytes: &[u8], fallback_label: &str) -> Result<DecodedText> {
    let fallback = Encoding::for_label(fallback_label.trim().as_bytes())
        .ok_or_else(|| Error::unsupported_encoding(fallback_label))?;

    if let Some((encoding, bom_length)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_length..]);
        debug!("Decoded {} bytes using BOM ({})", bytes.len(), encoding.name());
        return Ok(decoded(text.into_owned(), encoding));
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(decoded(text.to_string(), UTF_8));
    }

    let (text, had_errors) = fallback.decode_without_bom_handling(bytes);
    if had_errors {
        warn!(
            "Some bytes are not valid {} and were replaced",
            fallback.name()
        );
    }
    debug!("Input is not UTF-8, decoded as {}", fallback.name());

    Ok(decoded(text.into_owned(), fallback))
}

fn decoded(text: String, encoding: &'static Encoding) -> DecodedText {
    DecodedText {
        text,
        encoding: encoding.name().to_string(),
        repaired: false,
    }
}

/// Count double-encoding artifacts in text
pub fn mojibake_score(text: &str) -> usize {
    MOJIBAKE_MARKERS
        .iter()
        .map(|marker| text.matches(marker).count())
        .sum()
}

/// Undo UTF-8 text that was mis-decoded as Windows-1252
///
/// Returns `None` when the text shows no artifacts or the round trip does
/// not produce valid UTF-8 with fewer artifacts.
pub fn repair_mojibake(text: &str) -> Option<String> {
    let before = mojibake_score(text);
    if before == 0 {
        return None;
    }

    let (bytes, _, unmappable) = WINDOWS_1252.encode(text);
    if unmappable {
        debug!("Mojibake repair skipped: text is not representable in windows-1252");
        return None;
    }

    let repaired = String::from_utf8(bytes.into_owned()).ok()?;
    if mojibake_score(&repaired) < before {
        debug!("Repaired {} double-encoded sequences", before);
        Some(repaired)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::WINDOWS_1254;

    #[test]
    fn test_utf8_is_kept() {
        let decoded = decode_report_bytes("Öğrenci No\tAdı".as_bytes(), "windows-1254").unwrap();
        assert_eq!(decoded.text, "Öğrenci No\tAdı");
        assert_eq!(decoded.encoding, "UTF-8");
        assert!(!decoded.repaired);
    }

    #[test]
    fn test_turkish_code_page_fallback() {
        let (bytes, _, _) = WINDOWS_1254.encode("Şükrü Işık");
        assert!(std::str::from_utf8(&bytes).is_err());

        let decoded = decode_report_bytes(&bytes, "windows-1254").unwrap();
        assert_eq!(decoded.text, "Şükrü Işık");
        assert_eq!(decoded.encoding, "windows-1254");
    }

    #[test]
    fn test_utf16_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "No\tAd".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }

        let decoded = decode_report_bytes(&bytes, "windows-1254").unwrap();
        assert_eq!(decoded.text, "No\tAd");
        assert_eq!(decoded.encoding, "UTF-16LE");
    }

    #[test]
    fn test_utf8_bom_is_consumed() {
        let decoded = decode_report_bytes(b"\xEF\xBB\xBFNo", "windows-1254").unwrap();
        assert_eq!(decoded.text, "No");
        assert_eq!(decoded.encoding, "UTF-8");
    }

    #[test]
    fn test_unknown_fallback_label() {
        let error = decode_report_bytes(b"abc", "klingon").unwrap_err();
        assert!(matches!(error, Error::UnsupportedEncoding { .. }));
    }

    #[test]
    fn test_repair_double_encoded_text() {
        assert_eq!(repair_mojibake("Ã–ÄŸrenci AdÄ±").as_deref(), Some("Öğrenci Adı"));
        assert_eq!(repair_mojibake("TÃ¼rkÃ§e").as_deref(), Some("Türkçe"));
    }

    #[test]
    fn test_clean_text_is_not_repaired() {
        assert_eq!(repair_mojibake("Öğrenci Adı"), None);
        assert_eq!(repair_mojibake("plain ascii"), None);
    }

    #[test]
    fn test_with_mojibake_repair() {
        let decoded = decode_report_bytes("TÃ¼rkÃ§e Net".as_bytes(), "windows-1254")
            .unwrap()
            .with_mojibake_repair();

        assert_eq!(decoded.text, "Türkçe Net");
        assert!(decoded.repaired);
        assert_eq!(decoded.encoding, "UTF-8");
    }
}
