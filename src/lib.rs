//! # pdfmetascan
//!
//! A streaming scanner that finds the `/Title` and `/Author` entries of a PDF
//! by grepping its raw bytes, without building a document model.
//!
//! ## What this crate does
//!
//! 1. **Read in chunks** — the source is consumed in fixed-size blocks, each
//!    prefixed with a short tail of the previous block so a marker straddling
//!    a boundary is still seen.
//! 2. **Locate literals** — finds a marker such as `/Title` and the balanced
//!    `( … )` string literal that follows it, honouring backslash escapes.
//! 3. **Decode values** — accepts plain UTF-8 text and byte-order-marked
//!    UTF-16 (big- or little-endian).
//! 4. **Fall back** — when no title literal exists, the title is derived from
//!    the source name (`/tmp/report.final.pdf` → `report`).
//!
//! ## Quick example
//!
//! ```no_run
//! use pdfmetascan::MetadataScanner;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let record = MetadataScanner::from_path("book.pdf")?.scan()?;
//!
//! println!("Title  : {}", record.title);
//! println!("Author : {}", record.author_or_unknown());
//! # Ok(())
//! # }
//! ```
//!
//! ## Coverage
//!
//! Any field whose marker and literal fit together inside one window of
//! `tail_size + chunk_size` bytes, with the marker starting inside the last
//! `tail_size` bytes of a chunk or later, is found. Longer literals that cross
//! a chunk boundary may be missed; this is a best-effort scanner.

use thiserror::Error;

mod chunk_reader;
mod decoding;
mod literal;
mod record;
mod scanner;

pub use chunk_reader::{ChunkReader, ScanWindow};
pub use decoding::{clean, decode, unescape};
pub use literal::{find_field, Literal};
pub use record::{title_from_name, Field, MetadataRecord};
pub use scanner::{extract_metadata, MetadataScanner};

// ── Configuration ────────────────────────────────────────────────────────────

/// Default number of bytes pulled from the source per read.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Default number of bytes carried over from one chunk into the next window.
pub const DEFAULT_TAIL_SIZE: usize = 1024;

/// Runtime configuration for [`MetadataScanner`].
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Bytes read from the source per iteration. Must be non-zero.
    pub chunk_size: usize,

    /// Bytes of the previous chunk prepended to the next window. Zero disables
    /// boundary bridging.
    pub tail_size: usize,

    /// Fields searched for. The scan stops early once all of them are filled.
    pub fields: Vec<Field>,

    /// When `true`, `\ddd` octal escapes and the `\n \r \t \b \f` escapes are
    /// turned into the bytes they stand for. When `false` every `\X` simply
    /// becomes `X`.
    pub decode_octal_escapes: bool,

    /// When `true`, an empty title is replaced by one derived from the source
    /// name once the scan ends.
    pub filename_fallback: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            tail_size: DEFAULT_TAIL_SIZE,
            fields: vec![Field::Title, Field::Author],
            decode_octal_escapes: false,
            filename_fallback: true,
        }
    }
}

impl ScanConfig {
    /// Replace the chunk size.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Replace the tail size.
    pub fn with_tail_size(mut self, tail_size: usize) -> Self {
        self.tail_size = tail_size;
        self
    }

    /// Replace the tracked fields.
    pub fn with_fields(mut self, fields: impl Into<Vec<Field>>) -> Self {
        self.fields = fields.into();
        self
    }

    /// Check the configuration before any byte is read.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(ScanError::InvalidConfig("chunk size must be non-zero".into()));
        }
        Ok(())
    }
}

// ── Error type ───────────────────────────────────────────────────────────────

/// Every error that this crate can produce.
///
/// Missing or undecodable fields are not errors; they simply leave the
/// corresponding [`MetadataRecord`] field empty.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The source could not be read (anything other than end of input).
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The [`ScanConfig`] was rejected.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience alias used throughout this crate.
pub type Result<T> = std::result::Result<T, ScanError>;
