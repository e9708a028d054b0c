use std::io::BufRead;
use std::path::Path;

use tracing::debug;

use crate::catalog::store::LocusRegistry;
use crate::core::locus::Locus;
use crate::parsing::{open_input, required_field, ParseError};

/// Column holding the catalog locus id
pub const LOCUS_ID_COLUMN: usize = 2;

/// Column holding the consensus sequence
pub const CONSENSUS_COLUMN: usize = 8;

/// Load a catalog tags file into a new registry
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read or
/// `ParseError::MissingField` if a row is too short.
pub fn parse_catalog_file(path: &Path) -> Result<LocusRegistry, ParseError> {
    let reader = open_input(path)?;
    let registry = parse_catalog_reader(reader)?;
    debug!(
        path = %path.display(),
        loci = registry.len(),
        "Loaded catalog tags"
    );
    Ok(registry)
}

/// Load catalog tags text into a new registry
///
/// # Errors
///
/// Returns `ParseError::MissingField` if a row is too short.
pub fn parse_catalog_text(text: &str) -> Result<LocusRegistry, ParseError> {
    parse_catalog_reader(text.as_bytes())
}

/// Stream catalog tags rows into a new registry. The first line is a header.
///
/// # Errors
///
/// Returns `ParseError::Io` on read failure or `ParseError::MissingField`
/// if a row is too short.
pub fn parse_catalog_reader<R: BufRead>(reader: R) -> Result<LocusRegistry, ParseError> {
    let mut registry = LocusRegistry::new();

    for (i, line) in reader.lines().enumerate().skip(1) {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();

        let id = required_field(&fields, LOCUS_ID_COLUMN, "locus id", line_num)?;
        let consensus = required_field(&fields, CONSENSUS_COLUMN, "consensus sequence", line_num)?;

        registry.insert(Locus::new(id, consensus));
    }

    Ok(registry)
}
