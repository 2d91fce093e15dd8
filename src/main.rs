//! CLI tool that prints the title and author of PDF files.
//!
//! Every path given on the command line is either scanned directly (files) or
//! walked recursively for `*.pdf` files (directories).

use pdfmetascan::{Field, MetadataRecord, MetadataScanner, Result, ScanConfig};
use std::path::{Path, PathBuf};
use std::{env, process};
use walkdir::WalkDir;

struct Options {
    config: ScanConfig,
    paths: Vec<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("pdfmetascan");

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage(program);
        process::exit(0);
    }

    let options = match parse_args(args.get(1..).unwrap_or(&[])) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("❌ {message}");
            eprintln!();
            print_usage(program);
            process::exit(1);
        }
    };

    let files = collect_pdf_files(&options.paths);
    if files.is_empty() {
        eprintln!("ℹ️  No PDF files found");
        process::exit(1);
    }

    let mut failures = 0;
    for path in &files {
        match scan_file(path, &options.config) {
            Ok(record) => print_record(path, &record, &options.config.fields),
            Err(e) => {
                log::warn!("skipping '{}': {}", path.display(), e);
                failures += 1;
            }
        }
    }

    println!("\n{}", "─".repeat(60));
    println!("📊 {} file(s) scanned, {} failed", files.len() - failures, failures);

    if failures == files.len() {
        process::exit(1);
    }
}

fn print_usage(program_name: &str) {
    println!("📄 pdfmetascan - PDF title & author scanner");
    println!();
    println!("USAGE:");
    println!("    {} [OPTIONS] <PATH>...", program_name);
    println!();
    println!("ARGUMENTS:");
    println!("    <PATH>...              PDF files, or directories to search recursively");
    println!();
    println!("OPTIONS:");
    println!("    --chunk-size <BYTES>   Bytes read per step (default: 65536)");
    println!("    --tail-size <BYTES>    Bytes carried across chunk boundaries (default: 1024)");
    println!("    --all-fields           Also look for /Subject and /Keywords");
    println!("    --octal                Decode \\ddd octal escapes in literals");
    println!("    -h, --help             Show this help message");
    println!();
    println!("EXAMPLES:");
    println!("    {} book.pdf", program_name);
    println!("    {} --all-fields ~/library", program_name);
    println!();
    println!("Set RUST_LOG=debug to see what the scanner finds in each window.");
}

fn parse_args(args: &[String]) -> std::result::Result<Options, String> {
    let mut config = ScanConfig::default();
    let mut paths = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--chunk-size" => config.chunk_size = parse_size(arg, iter.next())?,
            "--tail-size" => config.tail_size = parse_size(arg, iter.next())?,
            "--all-fields" => config.fields = Field::ALL.to_vec(),
            "--octal" => config.decode_octal_escapes = true,
            flag if flag.starts_with("--") => return Err(format!("unknown option '{flag}'")),
            path => paths.push(PathBuf::from(path)),
        }
    }

    if paths.is_empty() {
        return Err("no input paths given".into());
    }
    config.validate().map_err(|e| e.to_string())?;

    Ok(Options { config, paths })
}

fn parse_size(flag: &str, value: Option<&String>) -> std::result::Result<usize, String> {
    let value = value.ok_or_else(|| format!("{flag} needs a value"))?;
    value
        .parse()
        .map_err(|_| format!("{flag}: '{value}' is not a byte count"))
}

/// Expand directories into the PDF files below them, in sorted order.
fn collect_pdf_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            files.extend(pdf_files_under(path));
        } else {
            files.push(path.clone());
        }
    }
    files
}

fn pdf_files_under(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("cannot read directory entry: {e}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && has_pdf_extension(entry.path()))
        .map(|entry| entry.into_path())
        .collect()
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

fn scan_file(path: &Path, config: &ScanConfig) -> Result<MetadataRecord> {
    MetadataScanner::from_path_with_config(path, config.clone())?.scan()
}

fn print_record(path: &Path, record: &MetadataRecord, fields: &[Field]) {
    println!("\n📄 {}", path.display());
    println!("   Title    : {}", record.title);
    println!("   Author   : {}", record.author_or_unknown());
    for &field in fields {
        if matches!(field, Field::Subject | Field::Keywords) && record.has(field) {
            println!("   {:<9}: {}", field.label(), record.get(field));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn directories_expand_to_sorted_pdf_files() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("b-shelf");
        fs::create_dir(&nested).unwrap();
        fs::write(dir.path().join("c.pdf"), b"").unwrap();
        fs::write(dir.path().join("a.PDF"), b"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();
        fs::write(nested.join("inner.pdf"), b"").unwrap();

        let files = collect_pdf_files(&[dir.path().to_path_buf()]);
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            names,
            vec![
                PathBuf::from("a.PDF"),
                PathBuf::from("b-shelf").join("inner.pdf"),
                PathBuf::from("c.pdf"),
            ]
        );
    }

    #[test]
    fn plain_file_arguments_are_kept_as_given() {
        let files = collect_pdf_files(&[PathBuf::from("missing/report.txt")]);
        assert_eq!(files, vec![PathBuf::from("missing/report.txt")]);
    }

    #[test]
    fn option_parsing() {
        let args: Vec<String> = ["--chunk-size", "4096", "--all-fields", "book.pdf"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let options = parse_args(&args).unwrap();
        assert_eq!(options.config.chunk_size, 4096);
        assert_eq!(options.config.fields, Field::ALL.to_vec());
        assert_eq!(options.paths, vec![PathBuf::from("book.pdf")]);

        assert!(parse_args(&["--chunk-size".to_string(), "0".into(), "x.pdf".into()]).is_err());
        assert!(parse_args(&["--bogus".to_string()]).is_err());
        assert!(parse_args(&[]).is_err());
    }
}
