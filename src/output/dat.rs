use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::catalog::store::LocusRegistry;
use crate::core::locus::Locus;
use crate::core::variant::{Alternates, SampleCounts, Variant};
use crate::output::OutputError;
use crate::utils::validation::{validate_name_component, MAX_FILENAME_LENGTH};

/// File name prefix of every record
pub const DAT_PREFIX: &str = "outfile_";

/// File name suffix of every record
pub const DAT_SUFFIX: &str = ".mod.dat";

/// One SNP as written to a `.dat` record
#[derive(Debug, Serialize)]
pub struct DatRecord<'a> {
    #[serde(rename = "alts")]
    pub alternates: &'a Alternates,

    pub counts: &'a SampleCounts,

    #[serde(rename = "ref")]
    pub reference: char,

    #[serde(rename = "pos")]
    pub position: usize,
}

impl<'a> From<&'a Variant> for DatRecord<'a> {
    fn from(variant: &'a Variant) -> Self {
        Self {
            alternates: &variant.alternates,
            counts: &variant.counts,
            reference: variant.reference,
            position: variant.position,
        }
    }
}

/// Records for every variant of `locus`, in attachment order
pub fn locus_records(locus: &Locus) -> Vec<DatRecord<'_>> {
    locus.variants.iter().map(DatRecord::from).collect()
}

/// Serialize the records of `locus` as a JSON list
///
/// # Errors
///
/// Returns `OutputError::Json` if serialization fails.
pub fn locus_to_json(locus: &Locus) -> Result<String, OutputError> {
    Ok(serde_json::to_string(&locus_records(locus))?)
}

/// Record file name for a locus id
///
/// # Errors
///
/// Returns `OutputError::InvalidLocusId` if the id cannot safely be part of a
/// file name.
pub fn dat_file_name(locus_id: &str) -> Result<String, OutputError> {
    let max_len = MAX_FILENAME_LENGTH - DAT_PREFIX.len() - DAT_SUFFIX.len();
    let id = validate_name_component(locus_id, max_len).map_err(|source| {
        OutputError::InvalidLocusId {
            id: locus_id.to_string(),
            source,
        }
    })?;
    Ok(format!("{DAT_PREFIX}{id}{DAT_SUFFIX}"))
}

/// What an emission pass wrote
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmitSummary {
    /// Records written, one per locus with variants
    pub written: usize,

    /// Loci skipped because no variant was attached
    pub skipped_without_variants: usize,
}

/// Writes one `.dat` record per variable locus into an output directory
#[derive(Debug)]
pub struct DatWriter {
    out_dir: PathBuf,
}

impl DatWriter {
    /// Check that `out_dir` may be written to.
    ///
    /// Nothing is created on disk here; the directory is made on the first
    /// write. An existing directory is only accepted when `overwrite` is set,
    /// and records already in it are replaced.
    ///
    /// # Errors
    ///
    /// Returns `OutputError::OutputExists` for an existing directory without
    /// `overwrite`.
    pub fn create(out_dir: &Path, overwrite: bool) -> Result<Self, OutputError> {
        if out_dir.exists() && !overwrite {
            return Err(OutputError::OutputExists(out_dir.to_path_buf()));
        }
        Ok(Self {
            out_dir: out_dir.to_path_buf(),
        })
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Write the record for `locus`. Loci without variants are skipped and
    /// yield `None`.
    ///
    /// The record is written to a temporary file in the output directory and
    /// then moved into place, so a record is either complete or absent.
    ///
    /// # Errors
    ///
    /// Returns `OutputError::InvalidLocusId`, `OutputError::Json` or
    /// `OutputError::Io`.
    pub fn write_locus(&self, locus: &Locus) -> Result<Option<PathBuf>, OutputError> {
        if !locus.has_variants() {
            return Ok(None);
        }

        let path = self.out_dir.join(dat_file_name(&locus.id)?);
        let json = locus_to_json(locus)?;

        std::fs::create_dir_all(&self.out_dir)?;
        let mut temp = NamedTempFile::new_in(&self.out_dir)?;
        temp.write_all(json.as_bytes())?;
        temp.flush()?;
        temp.persist(&path).map_err(|e| OutputError::Io(e.error))?;

        debug!(locus = %locus.id, path = %path.display(), "Wrote record");
        Ok(Some(path))
    }

    /// Write records for every locus in the registry
    ///
    /// # Errors
    ///
    /// Stops at the first failing locus; see [`DatWriter::write_locus`].
    pub fn write_all(&self, registry: &LocusRegistry) -> Result<EmitSummary, OutputError> {
        std::fs::create_dir_all(&self.out_dir)?;

        let mut summary = EmitSummary::default();
        for locus in registry.iter() {
            match self.write_locus(locus)? {
                Some(_) => summary.written += 1,
                None => summary.skipped_without_variants += 1,
            }
        }

        info!(
            out_dir = %self.out_dir.display(),
            written = summary.written,
            skipped = summary.skipped_without_variants,
            "Wrote locus records"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn variable_locus() -> Locus {
        let mut locus = Locus::new("L2", "AAAAAAAAAA");
        let mut alts = Alternates::new('G');
        alts.push('T');
        let mut variant = Variant::new('A', 3, alts);
        variant.observe("S1", "AAGAAAAAAA").unwrap();
        variant.observe("S1", "AAAAAAAAAA").unwrap();
        locus.add_variant(variant);
        locus
    }

    #[test]
    fn test_locus_to_json_layout() {
        let json = locus_to_json(&variable_locus()).unwrap();
        assert_eq!(
            json,
            r#"[{"alts":["G","T"],"counts":{"S1":{"A":1,"G":1}},"ref":"A","pos":3}]"#
        );
    }

    #[test]
    fn test_variant_without_reads_has_empty_counts() {
        let mut locus = Locus::new("L3", "ACGT");
        locus.add_variant(Variant::new('C', 2, Alternates::new('A')));
        let json = locus_to_json(&locus).unwrap();
        assert_eq!(json, r#"[{"alts":["A"],"counts":{},"ref":"C","pos":2}]"#);
    }

    #[test]
    fn test_dat_file_name() {
        assert_eq!(dat_file_name("123").unwrap(), "outfile_123.mod.dat");
        assert!(matches!(
            dat_file_name("../123"),
            Err(OutputError::InvalidLocusId { .. })
        ));
        assert!(dat_file_name(&"9".repeat(MAX_FILENAME_LENGTH)).is_err());
    }

    #[test]
    fn test_create_leaves_disk_untouched() {
        let dir = TempDir::new().unwrap();
        let out_dir = dir.path().join("stack_dat");

        let writer = DatWriter::create(&out_dir, false).unwrap();
        assert!(!out_dir.exists());

        // A second check still passes while nothing has been written
        assert!(DatWriter::create(&out_dir, false).is_ok());

        writer.write_all(&LocusRegistry::new()).unwrap();
        assert!(out_dir.is_dir());
        assert!(matches!(
            DatWriter::create(&out_dir, false),
            Err(OutputError::OutputExists(_))
        ));
    }

    #[test]
    fn test_write_all_filters_loci_without_variants() {
        let dir = TempDir::new().unwrap();
        let out_dir = dir.path().join("stack_dat");

        let mut registry = LocusRegistry::new();
        registry.insert(Locus::new("L1", "AAAAAAAAAA"));
        registry.insert(variable_locus());

        let writer = DatWriter::create(&out_dir, false).unwrap();
        let summary = writer.write_all(&registry).unwrap();
        assert_eq!(summary.written, 1);
        assert_eq!(summary.skipped_without_variants, 1);

        assert!(!out_dir.join("outfile_L1.mod.dat").exists());
        let content = std::fs::read_to_string(out_dir.join("outfile_L2.mod.dat")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value[0]["counts"]["S1"]["G"], 1);
        assert_eq!(value[0]["counts"]["S1"]["A"], 1);

        // Only the record remains; the temporary file was moved into place
        assert_eq!(std::fs::read_dir(&out_dir).unwrap().count(), 1);
    }

    #[test]
    fn test_existing_output_dir_requires_overwrite() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            DatWriter::create(dir.path(), false),
            Err(OutputError::OutputExists(_))
        ));

        let writer = DatWriter::create(dir.path(), true).unwrap();
        let first = writer.write_locus(&variable_locus()).unwrap().unwrap();
        let second = writer.write_locus(&variable_locus()).unwrap().unwrap();
        assert_eq!(first, second);
    }
}
