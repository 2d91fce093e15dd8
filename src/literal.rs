use std::ops::Range;

/// Byte span of a string literal's contents inside a scan window, excluding
/// the surrounding parentheses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Literal {
    /// Index of the first content byte (just after the opening `(`).
    pub start: usize,
    /// Index of the matching closing `)`.
    pub end: usize,
}

impl Literal {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Borrow the literal's raw bytes from the window it was found in.
    pub fn bytes<'w>(&self, window: &'w [u8]) -> &'w [u8] {
        &window[self.range()]
    }
}

/// Locate the string literal that follows the first occurrence of `marker`.
///
/// Returns `None` when the marker is absent, when no unescaped `(` follows
/// it, or when the literal is still open at the end of the window.
///
/// ```
/// use pdfmetascan::find_field;
///
/// let window = b"<< /Title (A (nested) title) >>";
/// let lit = find_field(window, b"/Title").unwrap();
/// assert_eq!(lit.bytes(window), b"A (nested) title");
/// ```
pub fn find_field(window: &[u8], marker: &[u8]) -> Option<Literal> {
    let marker_at = find_subslice(window, marker)?;
    let after_marker = marker_at + marker.len();

    let open = after_marker + find_opening(&window[after_marker..])?;
    let start = open + 1;
    let end = start + find_literal_end(&window[start..])?;

    Some(Literal { start, end })
}

/// Position of the first occurrence of `needle` in `haystack`.
pub(crate) fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|candidate| candidate == needle)
}

/// Position of the first `(` not preceded by an escaping backslash.
fn find_opening(bytes: &[u8]) -> Option<usize> {
    let mut escaped = false;
    for (i, &b) in bytes.iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' => escaped = true,
            b'(' => return Some(i),
            _ => {}
        }
    }
    None
}

/// Position of the `)` that closes a literal whose `(` sits just before
/// `bytes`. Nested unescaped parentheses must balance; `\` hides the next
/// byte.
fn find_literal_end(bytes: &[u8]) -> Option<usize> {
    let mut depth = 1usize;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' => escaped = true,
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract<'a>(window: &'a [u8], marker: &[u8]) -> Option<&'a [u8]> {
        find_field(window, marker).map(|lit| lit.bytes(window))
    }

    #[test]
    fn simple_literal() {
        assert_eq!(
            extract(b"/Title (Hello World)/Author (Me)", b"/Title"),
            Some(&b"Hello World"[..])
        );
        assert_eq!(
            extract(b"/Title (Hello World)/Author (Me)", b"/Author"),
            Some(&b"Me"[..])
        );
    }

    #[test]
    fn escaped_parens_do_not_change_depth() {
        let window = br"/Title (Nested \(parens\) here) >>";
        assert_eq!(extract(window, b"/Title"), Some(&br"Nested \(parens\) here"[..]));
    }

    #[test]
    fn escaped_backslash_before_closing_paren() {
        let window = br"/Title (ends with \\) trailing)";
        assert_eq!(extract(window, b"/Title"), Some(&br"ends with \\"[..]));
    }

    #[test]
    fn balanced_nesting() {
        let window = b"/Title (a (b (c)) d) (e)";
        assert_eq!(extract(window, b"/Title"), Some(&b"a (b (c)) d"[..]));
    }

    #[test]
    fn empty_literal() {
        let lit = find_field(b"/Author ()", b"/Author").unwrap();
        assert!(lit.is_empty());
        assert_eq!(lit.len(), 0);
    }

    #[test]
    fn escaped_opening_paren_is_skipped() {
        let window = br"/Title \( (real)";
        assert_eq!(extract(window, b"/Title"), Some(&b"real"[..]));
    }

    #[test]
    fn unterminated_literal_is_not_found() {
        assert_eq!(find_field(b"/Title (never closed", b"/Title"), None);
        assert_eq!(find_field(br"/Title (closed only by escape\)", b"/Title"), None);
    }

    #[test]
    fn reference_value_without_literal_is_not_found() {
        assert_eq!(find_field(b"/Title 12 0 R /Author", b"/Title"), None);
    }

    #[test]
    fn missing_or_empty_marker() {
        assert_eq!(find_field(b"/Producer (x)", b"/Title"), None);
        assert_eq!(find_field(b"(x)", b""), None);
        assert_eq!(find_field(b"", b"/Title"), None);
    }

    #[test]
    fn offsets_point_into_the_window() {
        let lit = find_field(b"xx/Title(ab)", b"/Title").unwrap();
        assert_eq!(lit, Literal { start: 9, end: 11 });
    }
}
