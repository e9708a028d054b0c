//! Parsers for the Stacks catalog exports and per-locus read collections.
//!
//! - **Catalog tags** (`batch_N.catalog.tags.tsv`): one consensus sequence per locus
//! - **Catalog SNPs** (`batch_N.catalog.snps.tsv`): SNP calls per locus
//! - **Read collections** (`<locus id>.fa`): pseudo-FASTA reads grouped by sample
//!
//! Every input may be gzip or bgzip compressed; compression is detected from
//! the `.gz`/`.bgz` suffix.
//!
//! ## Field Layout
//!
//! The catalog files are split on runs of whitespace, so empty columns in
//! the Stacks export collapse. Column indices below are 0-based positions after
//! that split.
//!
//! | File | Column | Field |
//! |------|--------|-------|
//! | tags | 2 | Locus id |
//! | tags | 8 | Consensus sequence |
//! | snps | 2 | Locus id |
//! | snps | 3 | Position (1-based) |
//! | snps | 6 | Reference nucleotide |
//! | snps | 7 | First alternate |
//! | snps | 8, 9 | Further alternates, `-` when absent |

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use thiserror::Error;

pub mod catalog;
pub mod reads;
pub mod snps;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Line {line} is missing the {name} field (column {column}, found {found} fields)")]
    MissingField {
        line: usize,
        column: usize,
        name: &'static str,
        found: usize,
    },

    #[error("Line {0} holds a read before any sample header")]
    ReadBeforeHeader(usize),
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
pub fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Open a text input, transparently decompressing gzip/bgzip files
///
/// # Errors
///
/// Returns the underlying IO error if the file cannot be opened.
pub fn open_input(path: &Path) -> std::io::Result<Box<dyn BufRead + Send>> {
    let file = File::open(path)?;
    if is_gzipped(path) {
        // bgzip is a series of gzip members
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Fetch a whitespace-split field, failing with its name and position when absent
pub(crate) fn required_field<'a>(
    fields: &[&'a str],
    column: usize,
    name: &'static str,
    line: usize,
) -> Result<&'a str, ParseError> {
    fields.get(column).copied().ok_or(ParseError::MissingField {
        line,
        column,
        name,
        found: fields.len(),
    })
}

/// Parse a field that must hold exactly one character
pub(crate) fn single_char(field: &str, name: &str, line: usize) -> Result<char, ParseError> {
    let mut chars = field.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ParseError::InvalidFormat(format!(
            "Line {line}: {name} must be a single nucleotide, found '{field}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::{Read, Write};
    use tempfile::NamedTempFile;

    #[test]
    fn test_is_gzipped() {
        assert!(is_gzipped(Path::new("batch_1.catalog.tags.tsv.gz")));
        assert!(is_gzipped(Path::new("12.fa.BGZ")));
        assert!(!is_gzipped(Path::new("batch_1.catalog.tags.tsv")));
    }

    #[test]
    fn test_open_input_gzipped() {
        let mut temp = NamedTempFile::with_suffix(".tsv.gz").unwrap();
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"header\nrow\n").unwrap();
        temp.write_all(&encoder.finish().unwrap()).unwrap();
        temp.flush().unwrap();

        let mut text = String::new();
        open_input(temp.path())
            .unwrap()
            .read_to_string(&mut text)
            .unwrap();
        assert_eq!(text, "header\nrow\n");
    }

    #[test]
    fn test_required_field() {
        let fields = vec!["a", "b"];
        assert_eq!(required_field(&fields, 1, "second", 4).unwrap(), "b");
        match required_field(&fields, 5, "sixth", 4) {
            Err(ParseError::MissingField {
                line,
                column,
                found,
                ..
            }) => {
                assert_eq!((line, column, found), (4, 5, 2));
            }
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn test_single_char() {
        assert_eq!(single_char("A", "reference", 2).unwrap(), 'A');
        assert!(single_char("AC", "reference", 2).is_err());
        assert!(single_char("", "reference", 2).is_err());
    }
}
