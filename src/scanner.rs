use crate::chunk_reader::{ChunkReader, ScanWindow};
use crate::literal::{find_field, find_subslice};
use crate::record::{title_from_name, Field, MetadataRecord};
use crate::{decoding, Result, ScanConfig};
use std::fs::File;
use std::io::Read;
use std::path::Path;

// ── MetadataScanner ──────────────────────────────────────────────────────────

/// Entry point for pulling metadata out of one PDF byte source.
///
/// # Creating a scanner
///
/// ```no_run
/// use pdfmetascan::{Field, MetadataScanner, ScanConfig};
///
/// // From a file path
/// let s = MetadataScanner::from_path("book.pdf").unwrap();
///
/// // From any reader plus a name used for the fallback title
/// let bytes = std::fs::read("book.pdf").unwrap();
/// let s = MetadataScanner::new(&bytes[..], "book.pdf");
///
/// // With custom configuration
/// let cfg = ScanConfig::default()
///     .with_chunk_size(16 * 1024)
///     .with_fields(Field::ALL);
/// let s = MetadataScanner::with_config(std::io::empty(), "book.pdf", cfg);
/// ```
///
/// A scanner is consumed by [`scan`](MetadataScanner::scan); scanning the
/// same bytes again needs a fresh scanner.
#[derive(Debug)]
pub struct MetadataScanner<R> {
    reader: R,
    name: String,
    config: ScanConfig,
}

impl MetadataScanner<File> {
    /// Open a PDF from the file system. The path doubles as the source name.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_path_with_config(path, ScanConfig::default())
    }

    /// Open a PDF from the file system with a custom [`ScanConfig`].
    pub fn from_path_with_config<P: AsRef<Path>>(path: P, config: ScanConfig) -> Result<Self> {
        let path = path.as_ref();
        Ok(Self {
            reader: File::open(path)?,
            name: path.to_string_lossy().into_owned(),
            config,
        })
    }
}

impl<R: Read> MetadataScanner<R> {
    /// Scan `reader`, using `name` for the fallback title.
    pub fn new(reader: R, name: impl Into<String>) -> Self {
        Self::with_config(reader, name, ScanConfig::default())
    }

    pub fn with_config(reader: R, name: impl Into<String>, config: ScanConfig) -> Self {
        Self {
            reader,
            name: name.into(),
            config,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// The identifying name of the source.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a reference to the active [`ScanConfig`].
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    // ── Scanning ──────────────────────────────────────────────────────────────

    /// Read the source window by window until every tracked field is filled
    /// or the input ends, then apply the title fallback.
    ///
    /// Only read failures are errors; no partial record is returned for them.
    /// Fields that are absent, unterminated or undecodable stay empty.
    pub fn scan(self) -> Result<MetadataRecord> {
        let Self {
            reader,
            name,
            config,
        } = self;
        config.validate()?;

        let mut record = MetadataRecord::default();
        let windows = ChunkReader::new(reader, config.chunk_size, config.tail_size);

        for window in windows {
            let window = window?;
            log::trace!("{name}: window at offset {} ({} bytes)", window.offset(), window.len());

            search_window(&window, &config, &mut record);

            if record.is_complete(&config.fields) {
                log::debug!("{name}: all tracked fields found, stopping early");
                break;
            }
        }

        if config.filename_fallback && record.title.is_empty() {
            record.title = title_from_name(&name);
            log::debug!("{name}: no title literal, using '{}'", record.title);
        }

        Ok(record)
    }
}

/// Try every tracked, still-empty field against one window.
fn search_window(window: &ScanWindow, config: &ScanConfig, record: &mut MetadataRecord) {
    for &field in &config.fields {
        if record.has(field) {
            continue;
        }
        if let Some(value) = extract_field(window.bytes(), field, config.decode_octal_escapes) {
            log::debug!("found {field} near offset {}", window.offset());
            record.set_once(field, value);
        }
    }
}

/// Find the literal for `field` in `bytes` and decode it.
fn extract_field(bytes: &[u8], field: Field, decode_octal_escapes: bool) -> Option<String> {
    let marker = field.marker();

    let Some(literal) = find_field(bytes, marker) else {
        if find_subslice(bytes, marker).is_some() {
            log::debug!("{field} marker without a complete literal");
        }
        return None;
    };

    let value = decoding::decode(literal.bytes(bytes), decode_octal_escapes);
    if value.is_none() {
        log::debug!("{field} literal of {} bytes could not be decoded", literal.len());
    }
    value
}

/// Scan the PDF at `path` with the default configuration.
///
/// ```no_run
/// let record = pdfmetascan::extract_metadata("/library/dune.pdf").unwrap();
/// println!("{} by {}", record.title, record.author_or_unknown());
/// ```
pub fn extract_metadata<P: AsRef<Path>>(path: P) -> Result<MetadataRecord> {
    MetadataScanner::from_path(path)?.scan()
}
