//! Scans an in-memory PDF fragment instead of a file, showing the title
//! fallback and UTF-16 decoding.
//!
//! Usage:
//!   cargo run --example scan_bytes

use pdfmetascan::{MetadataScanner, Result};

fn main() -> Result<()> {
    // Author stored as UTF-16BE with a byte-order mark
    let mut pdf = b"%PDF-1.4\n1 0 obj\n<< /Author (".to_vec();
    pdf.extend_from_slice(&[0xFE, 0xFF]);
    for unit in "Zoë Ångström".encode_utf16() {
        pdf.extend_from_slice(&unit.to_be_bytes());
    }
    pdf.extend_from_slice(b") >>\nendobj\n%%EOF\n");

    let record = MetadataScanner::new(&pdf[..], "/downloads/field-notes.v2.pdf").scan()?;

    println!("Title  : {}", record.title);
    println!("Author : {}", record.author_or_unknown());
    Ok(())
}
