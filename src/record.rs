use std::fmt;

// ── Field ────────────────────────────────────────────────────────────────────

/// A document-information entry the scanner knows how to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Author,
    Subject,
    Keywords,
}

impl Field {
    /// Every supported field, in reporting order.
    pub const ALL: [Field; 4] = [Field::Title, Field::Author, Field::Subject, Field::Keywords];

    /// The byte sequence that introduces this field in a PDF.
    pub fn marker(self) -> &'static [u8] {
        match self {
            Field::Title => b"/Title",
            Field::Author => b"/Author",
            Field::Subject => b"/Subject",
            Field::Keywords => b"/Keywords",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Author => "Author",
            Field::Subject => "Subject",
            Field::Keywords => "Keywords",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── MetadataRecord ───────────────────────────────────────────────────────────

/// The fields recovered from one source.
///
/// Each field is written at most once: the first non-empty value wins.
/// Returned by [`crate::MetadataScanner::scan`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataRecord {
    /// Document title, or a name derived from the source when none was found.
    pub title: String,

    /// Document author; empty means unknown.
    pub author: String,

    /// Only filled when [`Field::Subject`] is tracked.
    pub subject: String,

    /// Only filled when [`Field::Keywords`] is tracked.
    pub keywords: String,
}

impl MetadataRecord {
    /// Current value of `field`.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Author => &self.author,
            Field::Subject => &self.subject,
            Field::Keywords => &self.keywords,
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Title => &mut self.title,
            Field::Author => &mut self.author,
            Field::Subject => &mut self.subject,
            Field::Keywords => &mut self.keywords,
        }
    }

    pub fn has(&self, field: Field) -> bool {
        !self.get(field).is_empty()
    }

    /// Store `value` unless `field` already holds something. Returns whether
    /// the value was kept.
    pub fn set_once(&mut self, field: Field, value: String) -> bool {
        let slot = self.slot(field);
        if !slot.is_empty() || value.is_empty() {
            return false;
        }
        *slot = value;
        true
    }

    /// `true` when every field in `fields` is non-empty.
    pub fn is_complete(&self, fields: &[Field]) -> bool {
        fields.iter().all(|&f| self.has(f))
    }

    /// The author, or `"unknown"` when none was found.
    pub fn author_or_unknown(&self) -> &str {
        if self.author.is_empty() {
            "unknown"
        } else {
            &self.author
        }
    }
}

/// Derive a title from a source name: the last path segment up to its first
/// `.`.
///
/// ```
/// use pdfmetascan::title_from_name;
///
/// assert_eq!(title_from_name("/tmp/report.final.pdf"), "report");
/// assert_eq!(title_from_name(r"C:\books\Dune.pdf"), "Dune");
/// assert_eq!(title_from_name("/tmp/.hidden"), ".hidden");
/// ```
pub fn title_from_name(name: &str) -> String {
    let segment = name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(name);
    match segment.split('.').next() {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => segment.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_value_wins() {
        let mut record = MetadataRecord::default();
        assert!(record.set_once(Field::Title, "First".into()));
        assert!(!record.set_once(Field::Title, "Second".into()));
        assert_eq!(record.title, "First");
    }

    #[test]
    fn empty_value_does_not_fill_a_field() {
        let mut record = MetadataRecord::default();
        assert!(!record.set_once(Field::Author, String::new()));
        assert!(!record.has(Field::Author));
        assert!(record.set_once(Field::Author, "Ann".into()));
    }

    #[test]
    fn completeness_only_counts_tracked_fields() {
        let mut record = MetadataRecord::default();
        record.set_once(Field::Title, "T".into());
        record.set_once(Field::Author, "A".into());
        assert!(record.is_complete(&[Field::Title, Field::Author]));
        assert!(!record.is_complete(&Field::ALL));
        assert!(record.is_complete(&[]));
    }

    #[test]
    fn markers_and_labels() {
        assert_eq!(Field::Title.marker(), b"/Title");
        assert_eq!(Field::Keywords.marker(), b"/Keywords");
        assert_eq!(Field::Subject.to_string(), "Subject");
    }

    #[test]
    fn fallback_title_edge_cases() {
        assert_eq!(title_from_name("report"), "report");
        assert_eq!(title_from_name("dir/archive.tar.gz"), "archive");
        assert_eq!(title_from_name(""), "");
        assert_eq!(title_from_name("trailing/"), "");
    }

    #[test]
    fn unknown_author() {
        let record = MetadataRecord::default();
        assert_eq!(record.author_or_unknown(), "unknown");
    }
}
