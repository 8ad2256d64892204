//! Charset detection for XML-like documents.
//!
//! Activity definitions and layout documents come from tooling that writes
//! UTF-8, UTF-16 or legacy single-byte charsets, with or without a byte
//! order mark. This module picks the charset for a byte buffer and decodes
//! it, and writes text back with the BOM the charset calls for.
//!
//! Detection order:
//!
//! 1. `FE FF` → UTF-16BE
//! 2. `FF FE` → UTF-16LE
//! 3. `EF BB BF` → UTF-8
//! 4. the `encoding="..."` declaration found in the first
//!    [`PROLOG_SCAN_LEN`] bytes, when it names a known charset
//! 5. UTF-8
//!
//! # Example
//!
//! ```
//! use flowpath_core::encoding;
//!
//! let bytes = b"<?xml version=\"1.0\" encoding=\"windows-1251\"?><Root/>";
//! assert_eq!(encoding::detect(bytes).name(), "windows-1251");
//! ```

use std::{fs, io, path::Path, sync::LazyLock};

pub use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE};
use log::{trace, warn};
use regex::Regex;

/// Number of leading bytes searched for an `encoding=` declaration.
pub const PROLOG_SCAN_LEN: usize = 200;

const BOM_UTF16_BE: [u8; 2] = [0xFE, 0xFF];
const BOM_UTF16_LE: [u8; 2] = [0xFF, 0xFE];
const BOM_UTF8: [u8; 3] = [0xEF, 0xBB, 0xBF];

static ENCODING_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)encoding=["']([A-Za-z0-9_\-]+)["']"#).expect("encoding pattern is valid")
});

/// Text decoded from a byte buffer, together with the charset it was read in.
///
/// Keeping the charset next to the text lets an editor save the document
/// back in the charset it was opened with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    text: String,
    encoding: &'static Encoding,
}

impl DecodedText {
    /// The decoded text, without a leading BOM character.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The charset the text was decoded from.
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Consumes the value and returns the text.
    pub fn into_text(self) -> String {
        self.text
    }
}

/// Detects the charset of `bytes`.
///
/// Never fails: a declaration naming an unknown charset falls back to UTF-8.
pub fn detect(bytes: &[u8]) -> &'static Encoding {
    if bytes.starts_with(&BOM_UTF16_BE) {
        return UTF_16BE;
    }
    if bytes.starts_with(&BOM_UTF16_LE) {
        return UTF_16LE;
    }
    if bytes.starts_with(&BOM_UTF8) {
        return UTF_8;
    }

    let prolog = String::from_utf8_lossy(&bytes[..bytes.len().min(PROLOG_SCAN_LEN)]);
    let Some(label) = ENCODING_DECL
        .captures(&prolog)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
    else {
        return UTF_8;
    };

    match Encoding::for_label(label.as_bytes()) {
        Some(encoding) => {
            trace!(label, encoding = encoding.name(); "Charset resolved from prolog");
            encoding
        }
        None => {
            warn!(label; "Unknown charset in XML declaration, using UTF-8");
            UTF_8
        }
    }
}

/// Decodes `bytes` in the detected charset and strips a leading BOM.
pub fn decode(bytes: &[u8]) -> DecodedText {
    let encoding = detect(bytes);
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        warn!(encoding = encoding.name(); "Malformed byte sequences replaced while decoding");
    }

    let text = match text.strip_prefix('\u{FEFF}') {
        Some(stripped) => stripped.to_owned(),
        None => text.into_owned(),
    };

    DecodedText { text, encoding }
}

/// Decodes `bytes` to text, see [`decode`].
pub fn read_text(bytes: &[u8]) -> String {
    decode(bytes).into_text()
}

/// Reads and decodes the file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn read_file(path: impl AsRef<Path>) -> io::Result<DecodedText> {
    let bytes = fs::read(path)?;
    Ok(decode(&bytes))
}

/// Returns the byte order mark written ahead of text in `encoding`.
///
/// Only UTF-16BE, UTF-16LE and UTF-8 have one.
pub fn bom(encoding: &'static Encoding) -> &'static [u8] {
    if encoding == UTF_16BE {
        &BOM_UTF16_BE
    } else if encoding == UTF_16LE {
        &BOM_UTF16_LE
    } else if encoding == UTF_8 {
        &BOM_UTF8
    } else {
        &[]
    }
}

/// Encodes `text` in `encoding`, prefixed with the charset's BOM.
///
/// Characters the charset cannot represent are written as numeric
/// character references.
pub fn encode_with_bom(text: &str, encoding: &'static Encoding) -> Vec<u8> {
    let mut out = bom(encoding).to_vec();

    if encoding == UTF_16BE {
        out.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
    } else if encoding == UTF_16LE {
        out.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
    } else {
        let (bytes, _, had_errors) = encoding.encode(text);
        if had_errors {
            warn!(encoding = encoding.name(); "Unmappable characters written as character references");
        }
        out.extend_from_slice(&bytes);
    }

    out
}

/// Writes `text` to `path` in `encoding`, with the charset's BOM.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_text(path: impl AsRef<Path>, text: &str, encoding: &'static Encoding) -> io::Result<()> {
    fs::write(path, encode_with_bom(text, encoding))
}

#[cfg(test)]
mod tests {
    use encoding_rs::WINDOWS_1251;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_detect_boms() {
        assert_eq!(detect(&[0xEF, 0xBB, 0xBF, b'<']), UTF_8);
        assert_eq!(detect(&[0xFE, 0xFF, 0x00, b'<']), UTF_16BE);
        assert_eq!(detect(&[0xFF, 0xFE, b'<', 0x00]), UTF_16LE);
    }

    #[test]
    fn test_detect_prolog_declaration() {
        let bytes = br#"<?xml version="1.0" encoding="windows-1251"?><Root/>"#;
        assert_eq!(detect(bytes), WINDOWS_1251);
    }

    #[test]
    fn test_detect_prolog_single_quotes_and_case() {
        let bytes = b"<?xml version='1.0' ENCODING='Windows-1251'?><Root/>";
        assert_eq!(detect(bytes), WINDOWS_1251);
    }

    #[test]
    fn test_detect_unknown_charset_falls_back() {
        let bytes = br#"<?xml version="1.0" encoding="no-such-charset"?><Root/>"#;
        assert_eq!(detect(bytes), UTF_8);
    }

    #[test]
    fn test_detect_declaration_beyond_prolog_window() {
        let mut bytes = vec![b' '; PROLOG_SCAN_LEN];
        bytes.extend_from_slice(br#"encoding="windows-1251""#);
        assert_eq!(detect(&bytes), UTF_8);
    }

    #[test]
    fn test_detect_empty() {
        assert_eq!(detect(&[]), UTF_8);
    }

    #[test]
    fn test_read_text_strips_bom() {
        let mut bytes = BOM_UTF8.to_vec();
        bytes.extend_from_slice(b"<Root/>");
        assert_eq!(read_text(&bytes), "<Root/>");

        let mut utf16 = BOM_UTF16_LE.to_vec();
        utf16.extend("<Root/>".encode_utf16().flat_map(u16::to_le_bytes));
        assert_eq!(read_text(&utf16), "<Root/>");
    }

    #[test]
    fn test_read_text_legacy_charset() {
        let mut bytes = br#"<?xml version="1.0" encoding="windows-1251"?><A>"#.to_vec();
        // "При" in windows-1251
        bytes.extend_from_slice(&[0xCF, 0xF0, 0xE8]);
        bytes.extend_from_slice(b"</A>");

        let decoded = decode(&bytes);
        assert_eq!(decoded.encoding(), WINDOWS_1251);
        assert!(decoded.text().ends_with("<A>При</A>"));
    }

    #[test]
    fn test_encode_with_bom() {
        assert_eq!(encode_with_bom("a", UTF_8), vec![0xEF, 0xBB, 0xBF, b'a']);
        assert_eq!(encode_with_bom("a", UTF_16BE), vec![0xFE, 0xFF, 0x00, b'a']);
        assert_eq!(encode_with_bom("a", UTF_16LE), vec![0xFF, 0xFE, b'a', 0x00]);
        assert_eq!(encode_with_bom("П", WINDOWS_1251), vec![0xCF]);
    }

    #[test]
    fn test_write_text_round_trip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("doc.xml");

        write_text(&path, "<Root>Привет</Root>", UTF_16BE).expect("write");
        let decoded = read_file(&path).expect("read");

        assert_eq!(decoded.encoding(), UTF_16BE);
        assert_eq!(decoded.text(), "<Root>Привет</Root>");
    }

    // ===================
    // Property Checks
    // ===================

    /// A BOM decides the charset whatever follows it.
    fn check_bom_wins_over_declaration(tail: &[u8]) -> Result<(), TestCaseError> {
        for (bom, expected) in [
            (&BOM_UTF16_BE[..], UTF_16BE),
            (&BOM_UTF16_LE[..], UTF_16LE),
            (&BOM_UTF8[..], UTF_8),
        ] {
            let mut bytes = bom.to_vec();
            bytes.extend_from_slice(br#"<?xml encoding="windows-1251"?>"#);
            bytes.extend_from_slice(tail);
            prop_assert_eq!(detect(&bytes), expected);
        }
        Ok(())
    }

    /// Text written with its BOM reads back unchanged.
    fn check_utf_round_trip(text: &str) -> Result<(), TestCaseError> {
        for encoding in [UTF_8, UTF_16BE, UTF_16LE] {
            let decoded = decode(&encode_with_bom(text, encoding));
            prop_assert_eq!(decoded.encoding(), encoding);
            prop_assert_eq!(decoded.text(), text);
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn bom_wins_over_declaration(tail in proptest::collection::vec(any::<u8>(), 0..64)) {
            check_bom_wins_over_declaration(&tail)?;
        }

        #[test]
        fn utf_round_trip(text in "[^\u{FEFF}]{0,40}") {
            check_utf_round_trip(&text)?;
        }
    }
}
