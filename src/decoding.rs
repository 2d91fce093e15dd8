use encoding_rs::{Encoding, UTF_16BE, UTF_16LE};

const BOM_BE: [u8; 2] = [0xFE, 0xFF];
const BOM_LE: [u8; 2] = [0xFF, 0xFE];

/// Turn the raw bytes of a string literal into text.
///
/// Backslash escapes are removed first. A leading `FE FF` / `FF FE`
/// byte-order mark selects UTF-16 big / little endian (lossy, the mark itself
/// is dropped); otherwise the bytes must be valid UTF-8. Returns `None` when
/// neither applies or when nothing is left after [`clean`].
///
/// ```
/// use pdfmetascan::decode;
///
/// assert_eq!(decode(br"Nested \(parens\) here", false).as_deref(), Some("Nested (parens) here"));
/// assert_eq!(decode(b"\xFE\xFF\x00H\x00i", false).as_deref(), Some("Hi"));
/// assert_eq!(decode(b"\xE9t\xE9", false), None);
/// ```
pub fn decode(raw: &[u8], decode_octal_escapes: bool) -> Option<String> {
    let bytes = unescape(raw, decode_octal_escapes);

    let text = if bytes.starts_with(&BOM_BE) {
        decode_utf16(UTF_16BE, &bytes)
    } else if bytes.starts_with(&BOM_LE) {
        decode_utf16(UTF_16LE, &bytes)
    } else {
        String::from_utf8(bytes).ok()?
    };

    let cleaned = clean(&text);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

fn decode_utf16(encoding: &'static Encoding, bytes: &[u8]) -> String {
    let (text, had_errors) = encoding.decode_with_bom_removal(bytes);
    if had_errors {
        log::debug!("{} value contained malformed code units", encoding.name());
    }
    text.into_owned()
}

/// Remove string-literal backslash escapes.
///
/// Without `decode_octal_escapes`, every `\X` pair becomes `X`, so `\(`,
/// `\)` and `\\` come out right but `\101` comes out as `101`. With it,
/// `\ddd` (one to three octal digits) becomes the byte it encodes, `\n \r \t
/// \b \f` become control bytes and a backslash before an end of line is
/// dropped together with the line break.
///
/// A lone trailing backslash is kept.
pub fn unescape(raw: &[u8], decode_octal_escapes: bool) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len());
    let mut i = 0;

    while i < raw.len() {
        let b = raw[i];
        if b != b'\\' || i + 1 == raw.len() {
            out.push(b);
            i += 1;
            continue;
        }

        let next = raw[i + 1];
        if !decode_octal_escapes {
            out.push(next);
            i += 2;
            continue;
        }

        i += 1;
        match next {
            b'0'..=b'7' => {
                let mut value: u32 = 0;
                let mut digits = 0;
                while digits < 3 && i < raw.len() && matches!(raw[i], b'0'..=b'7') {
                    value = value * 8 + u32::from(raw[i] - b'0');
                    i += 1;
                    digits += 1;
                }
                // \400 and above overflow a byte; high bits are ignored
                out.push((value & 0xFF) as u8);
            }
            b'n' => {
                out.push(b'\n');
                i += 1;
            }
            b'r' => {
                out.push(b'\r');
                i += 1;
            }
            b't' => {
                out.push(b'\t');
                i += 1;
            }
            b'b' => {
                out.push(0x08);
                i += 1;
            }
            b'f' => {
                out.push(0x0C);
                i += 1;
            }
            b'\r' => {
                i += 1;
                if raw.get(i) == Some(&b'\n') {
                    i += 1;
                }
            }
            b'\n' => i += 1,
            other => {
                out.push(other);
                i += 1;
            }
        }
    }

    out
}

/// Strip NUL characters and stray byte-order marks left behind by decoding.
pub fn clean(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '\0' | '\u{FEFF}' | '\u{FFFE}'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16be(s: &str) -> Vec<u8> {
        let mut out = BOM_BE.to_vec();
        for unit in s.encode_utf16() {
            out.extend_from_slice(&unit.to_be_bytes());
        }
        out
    }

    fn utf16le(s: &str) -> Vec<u8> {
        let mut out = BOM_LE.to_vec();
        for unit in s.encode_utf16() {
            out.extend_from_slice(&unit.to_le_bytes());
        }
        out
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(decode(b"Hello World", false).as_deref(), Some("Hello World"));
        let text = "Gödel, Escher, Bach";
        assert_eq!(decode(text.as_bytes(), false).as_deref(), Some(text));
    }

    #[test]
    fn utf16_both_endians_agree() {
        assert_eq!(decode(&utf16be("Café"), false).as_deref(), Some("Café"));
        assert_eq!(decode(&utf16le("Café"), false).as_deref(), Some("Café"));
    }

    #[test]
    fn utf16_with_escaped_paren_byte() {
        // U+0028 in big endian is 00 28, written escaped as 00 5C 28
        let raw = [0xFE, 0xFF, 0x00, b'a', 0x00, b'\\', b'(', 0x00, b'b'];
        assert_eq!(decode(&raw, false).as_deref(), Some("a(b"));
    }

    #[test]
    fn utf16_odd_length_is_lossy_not_fatal() {
        let mut raw = utf16be("Hi");
        raw.push(0x00);
        let text = decode(&raw, false).unwrap();
        assert!(text.starts_with("Hi"));
    }

    #[test]
    fn non_utf8_without_bom_is_rejected() {
        assert_eq!(decode(&[0xC3, 0x28, 0xA0], false), None);
    }

    #[test]
    fn empty_after_cleaning_is_none() {
        assert_eq!(decode(b"", false), None);
        assert_eq!(decode(b"\x00\x00", false), None);
        assert_eq!(decode(&BOM_BE, false), None);
    }

    #[test]
    fn clean_strips_nul_and_bom_characters() {
        assert_eq!(clean("a\0b\u{FEFF}c\u{FFFE}"), "abc");
        assert_eq!(clean("þÿ stay"), "þÿ stay");
    }

    #[test]
    fn legacy_unescape_keeps_octal_digits() {
        assert_eq!(unescape(br"\101\(x\)\\", false), br"101(x)\".to_vec());
        assert_eq!(unescape(br"trailing\", false), br"trailing\".to_vec());
    }

    #[test]
    fn octal_unescape() {
        assert_eq!(unescape(br"\101\102C", true), b"ABC".to_vec());
        assert_eq!(unescape(br"\0053", true), b"\x053".to_vec());
        assert_eq!(unescape(br"a\nb\tc", true), b"a\nb\tc".to_vec());
        assert_eq!(unescape(b"line\\\r\ncontinued", true), b"linecontinued".to_vec());
        assert_eq!(unescape(br"\q", true), b"q".to_vec());
    }

    #[test]
    fn octal_escaped_bom_selects_utf16() {
        let raw = br"\376\377\000C\000a\000f\000\351";
        assert_eq!(decode(raw, true).as_deref(), Some("Café"));
        assert_eq!(decode(raw, false), Some(String::from("376377000C000a000f000351")));
    }
}
