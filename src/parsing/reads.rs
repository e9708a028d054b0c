//! Parser for per-locus read collections.
//!
//! Each file holds the reads of one catalog locus, named `<locus id>.<ext>`.
//! Header lines start with `>` and carry the sample id in their second
//! `|`-separated field; every other line is one read of the most recent sample:
//!
//! ```text
//! >CLocus_12_Sample_3_Locus_7_Read_1|sample_03|...
//! TGCAGGACTACGTA
//! TGCAGGACTTCGTA
//! >CLocus_12_Sample_5_Locus_2_Read_1|sample_05|...
//! TGCAGGACTACGTA
//! ```
//!
//! Supported extensions:
//! - `.fa`, `.fasta`, `.fna` (uncompressed)
//! - `.fa.gz`, `.fasta.gz`, `.fna.gz` (gzip compressed)
//! - `.fa.bgz`, `.fasta.bgz`, `.fna.bgz` (bgzip compressed)

use std::ffi::OsStr;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::parsing::ParseError;

/// Leading character of a sample header line
pub const HEADER_MARKER: char = '>';

/// Separator between header fields
pub const HEADER_DELIMITER: char = '|';

/// Header field holding the sample id
pub const SAMPLE_FIELD: usize = 1;

/// A read collection on disk and the locus it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadFile {
    pub locus_id: String,
    pub path: PathBuf,
}

/// Check if the path has a read-collection extension
pub fn is_read_file(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();

    // Check for compressed collections
    if path_str.ends_with(".fa.gz")
        || path_str.ends_with(".fasta.gz")
        || path_str.ends_with(".fna.gz")
        || path_str.ends_with(".fa.bgz")
        || path_str.ends_with(".fasta.bgz")
        || path_str.ends_with(".fna.bgz")
    {
        return true;
    }

    matches!(
        path.extension()
            .and_then(OsStr::to_str)
            .map(str::to_lowercase)
            .as_deref(),
        Some("fa" | "fasta" | "fna")
    )
}

/// Locus id encoded in a read file name: everything before the first `.`
pub fn locus_id_from_path(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    let id = name.split('.').next()?;
    (!id.is_empty()).then_some(id)
}

/// List the read collections in `dir`, sorted by path.
///
/// Entries that are not files or do not carry a read-collection extension are
/// ignored.
///
/// # Errors
///
/// Returns the underlying IO error if the directory cannot be listed, or
/// `ParseError::InvalidFormat` if a read file name carries no locus id.
pub fn discover_read_files(dir: &Path) -> Result<Vec<ReadFile>, ParseError> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || !is_read_file(&path) {
            continue;
        }

        let locus_id = locus_id_from_path(&path).ok_or_else(|| {
            ParseError::InvalidFormat(format!(
                "Cannot derive a locus id from read file name '{}'",
                path.display()
            ))
        })?;

        files.push(ReadFile {
            locus_id: locus_id.to_string(),
            path,
        });
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

/// Sample id carried by a header line
pub fn sample_from_header(line: &str) -> Option<&str> {
    line.split(HEADER_DELIMITER).nth(SAMPLE_FIELD)
}

/// Stream a read collection, calling `on_read(sample, read)` for every read
/// in file order. Returns the number of reads visited.
///
/// Empty lines are passed through as zero-length reads.
///
/// # Errors
///
/// Returns `ParseError::Io` on read failure, `ParseError::InvalidFormat` for a
/// header without a sample field, or `ParseError::ReadBeforeHeader` for a read
/// that precedes every header.
pub fn for_each_read<R, F>(reader: R, mut on_read: F) -> Result<usize, ParseError>
where
    R: BufRead,
    F: FnMut(&str, &str),
{
    let mut sample: Option<String> = None;
    let mut reads = 0;

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_num = i + 1;

        if line.starts_with(HEADER_MARKER) {
            let id = sample_from_header(&line).ok_or_else(|| {
                ParseError::InvalidFormat(format!(
                    "Header on line {line_num} has no sample field: '{line}'"
                ))
            })?;
            if sample.as_deref() != Some(id) {
                sample = Some(id.to_string());
            }
            continue;
        }

        let current = sample
            .as_deref()
            .ok_or(ParseError::ReadBeforeHeader(line_num))?;
        on_read(current, &line);
        reads += 1;
    }

    Ok(reads)
}
