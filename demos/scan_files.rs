//! Minimal CLI that prints every tracked field of one PDF, using a small
//! chunk size so the windowing is visible with `RUST_LOG=trace`.
//!
//! Usage:
//!   cargo run --example scan_files -- book.pdf
//!   RUST_LOG=trace cargo run --example scan_files -- book.pdf 4096

use pdfmetascan::{Field, MetadataScanner, ScanConfig};
use std::{env, process};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <pdf_file> [chunk_size]", args[0]);
        process::exit(1);
    }

    let pdf_path = &args[1];
    let chunk_size = args
        .get(2)
        .map(|s| {
            s.parse().unwrap_or_else(|_| {
                eprintln!("chunk_size must be a number, got '{s}'");
                process::exit(1);
            })
        })
        .unwrap_or(pdfmetascan::DEFAULT_CHUNK_SIZE);

    let config = ScanConfig {
        chunk_size,
        fields: Field::ALL.to_vec(),
        ..Default::default()
    };

    println!("Scanning: {pdf_path}");

    let scanner = MetadataScanner::from_path_with_config(pdf_path, config).unwrap_or_else(|e| {
        eprintln!("Error opening PDF: {e}");
        process::exit(1);
    });

    let record = scanner.scan().unwrap_or_else(|e| {
        eprintln!("Scan error: {e}");
        process::exit(1);
    });

    for field in Field::ALL {
        let value = record.get(field);
        if value.is_empty() {
            println!("  {:<9}: (not found)", field.label());
        } else {
            println!("  {:<9}: {value}", field.label());
        }
    }
}
