use std::io::BufRead;
use std::path::Path;

use tracing::debug;

use crate::catalog::store::{CatalogError, LocusRegistry};
use crate::core::variant::{Alternates, Variant, MAX_OPTIONAL_ALTERNATES};
use crate::parsing::{open_input, required_field, single_char, ParseError};

/// Column holding the catalog locus id
pub const LOCUS_ID_COLUMN: usize = 2;

/// Column holding the 1-based SNP position
pub const POSITION_COLUMN: usize = 3;

/// Column holding the reference nucleotide
pub const REFERENCE_COLUMN: usize = 6;

/// Column holding the first (mandatory) alternate nucleotide
pub const FIRST_ALTERNATE_COLUMN: usize = 7;

/// Columns holding further alternates, consulted in order
pub const OPTIONAL_ALTERNATE_COLUMNS: [usize; MAX_OPTIONAL_ALTERNATES] = [8, 9];

/// Marks an absent alternate and ends alternate collection for the row
pub const NO_ALTERNATE: &str = "-";

/// One parsed row of the catalog SNP file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnpRecord {
    pub locus_id: String,
    pub variant: Variant,
}

/// Attach the variants of a catalog SNP file to their loci.
///
/// Returns the number of variants attached.
///
/// # Errors
///
/// Returns `CatalogError::Parse` for unreadable or malformed rows and
/// `CatalogError::UnknownLocus` when a row names a locus missing from the registry.
pub fn annotate_from_file(registry: &mut LocusRegistry, path: &Path) -> Result<usize, CatalogError> {
    let reader = open_input(path).map_err(ParseError::from)?;
    let origin = path.display().to_string();
    let attached = annotate_from_reader(registry, reader, &origin)?;
    debug!(path = %origin, variants = attached, "Attached catalog SNPs");
    Ok(attached)
}

/// Attach the variants read from `reader`. The first line is a header.
///
/// # Errors
///
/// See [`annotate_from_file`].
pub fn annotate_from_reader<R: BufRead>(
    registry: &mut LocusRegistry,
    reader: R,
    origin: &str,
) -> Result<usize, CatalogError> {
    let mut attached = 0;

    for (i, line) in reader.lines().enumerate().skip(1) {
        let line = line.map_err(ParseError::from)?;
        let Some(record) = parse_snp_line(&line, i + 1)? else {
            continue;
        };

        let line_origin = format!("{origin} line {}", i + 1);
        registry.attach_variant(&record.locus_id, record.variant, &line_origin)?;
        attached += 1;
    }

    Ok(attached)
}

/// Parse a single SNP row. Blank lines yield `None`.
///
/// # Errors
///
/// Returns `ParseError::MissingField` for short rows and
/// `ParseError::InvalidFormat` for a bad position or nucleotide.
pub fn parse_snp_line(line: &str, line_num: usize) -> Result<Option<SnpRecord>, ParseError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.is_empty() {
        return Ok(None);
    }

    let locus_id = required_field(&fields, LOCUS_ID_COLUMN, "locus id", line_num)?;
    let position_field = required_field(&fields, POSITION_COLUMN, "position", line_num)?;
    let position: usize = position_field.parse().map_err(|_| {
        ParseError::InvalidFormat(format!(
            "Invalid position on line {line_num}: '{position_field}'"
        ))
    })?;

    let reference = single_char(
        required_field(&fields, REFERENCE_COLUMN, "reference", line_num)?,
        "reference",
        line_num,
    )?;

    let first = required_field(&fields, FIRST_ALTERNATE_COLUMN, "alternate", line_num)?;
    let mut alternates = Alternates::new(single_char(first, "alternate", line_num)?);

    for column in OPTIONAL_ALTERNATE_COLUMNS {
        let field = required_field(&fields, column, "alternate", line_num)?;
        if field == NO_ALTERNATE {
            break;
        }
        alternates.push(single_char(field, "alternate", line_num)?);
    }

    Ok(Some(SnpRecord {
        locus_id: locus_id.to_string(),
        variant: Variant::new(reference, position, alternates),
    }))
}
