//! End-to-end conversion of a Stacks catalog and paired reads to `.dat` records.
//!
//! Stages run strictly in order on one [`LocusRegistry`]:
//!
//! 1. load catalog tags (loci and consensus sequences)
//! 2. attach catalog SNPs to their loci
//! 3. count reads per sample at every SNP
//! 4. write one record per locus that has SNPs

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::catalog::store::{CatalogError, LocusRegistry};
use crate::counting::engine::{CountError, CountingConfig, CountingEngine};
use crate::counting::tally::ReadTally;
use crate::output::dat::{DatWriter, EmitSummary};
use crate::output::OutputError;
use crate::parsing::catalog::parse_catalog_file;
use crate::parsing::reads::discover_read_files;
use crate::parsing::snps::annotate_from_file;
use crate::parsing::ParseError;

/// Default catalog tags path of a Stacks batch
pub const DEFAULT_CATALOG: &str = "stacks_zip/batch_1.catalog.tags.tsv";

/// Default catalog SNPs path of a Stacks batch
pub const DEFAULT_SNPS: &str = "stacks_zip/batch_1.catalog.snps.tsv";

/// Default directory of per-locus read collections
pub const DEFAULT_READS_DIR: &str = "paired";

/// Default record output directory
pub const DEFAULT_OUT_DIR: &str = "stack_dat";

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to load catalog {path}: {source}")]
    Catalog {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("Failed to attach SNPs from {path}: {source}")]
    Snps {
        path: PathBuf,
        #[source]
        source: CatalogError,
    },

    #[error("Failed to list read files in {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error(transparent)]
    Count(#[from] CountError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Inputs and options for one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub catalog: PathBuf,
    pub snps: PathBuf,
    pub reads_dir: PathBuf,
    pub out_dir: PathBuf,
    pub threads: usize,
    /// Write into an existing output directory
    pub overwrite: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            catalog: PathBuf::from(DEFAULT_CATALOG),
            snps: PathBuf::from(DEFAULT_SNPS),
            reads_dir: PathBuf::from(DEFAULT_READS_DIR),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            threads: 1,
            overwrite: false,
        }
    }
}

/// Totals reported by a pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineSummary {
    pub loci: usize,
    pub variants: usize,
    pub variable_loci: usize,
    pub counting: ReadTally,
    pub output: EmitSummary,
    pub out_dir: PathBuf,
}

/// Run the catalog, SNP, and counting stages and return the populated registry
///
/// # Errors
///
/// Returns the first fatal error of any stage.
pub fn build_registry(
    catalog: &Path,
    snps: &Path,
    reads_dir: &Path,
    threads: usize,
) -> Result<(LocusRegistry, ReadTally), PipelineError> {
    let mut registry = parse_catalog_file(catalog).map_err(|source| PipelineError::Catalog {
        path: catalog.to_path_buf(),
        source,
    })?;
    info!(loci = registry.len(), "Loaded catalog loci");

    let attached =
        annotate_from_file(&mut registry, snps).map_err(|source| PipelineError::Snps {
            path: snps.to_path_buf(),
            source,
        })?;
    info!(
        variants = attached,
        variable_loci = registry.variable_locus_count(),
        "Attached catalog SNPs"
    );

    let files = discover_read_files(reads_dir).map_err(|source| PipelineError::ReadDir {
        path: reads_dir.to_path_buf(),
        source,
    })?;
    info!(files = files.len(), "Found read collections");

    let tally = CountingEngine::new(CountingConfig { threads }).count(&mut registry, &files)?;

    Ok((registry, tally))
}

/// Run every stage and write the records
///
/// # Errors
///
/// Returns the first fatal error of any stage. The output directory is
/// checked before any input is read but only created once every input has
/// loaded, so a failed run leaves nothing behind.
pub fn run(config: &PipelineConfig) -> Result<PipelineSummary, PipelineError> {
    let writer = DatWriter::create(&config.out_dir, config.overwrite)?;

    let (registry, counting) = build_registry(
        &config.catalog,
        &config.snps,
        &config.reads_dir,
        config.threads,
    )?;

    let output = writer.write_all(&registry)?;

    Ok(PipelineSummary {
        loci: registry.len(),
        variants: registry.variant_count(),
        variable_loci: registry.variable_locus_count(),
        counting,
        output,
        out_dir: writer.out_dir().to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_mirrors_stacks_layout() {
        let config = PipelineConfig::default();
        assert_eq!(config.catalog, Path::new(DEFAULT_CATALOG));
        assert_eq!(config.out_dir, Path::new("stack_dat"));
        assert_eq!(config.threads, 1);
        assert!(!config.overwrite);
    }

    #[test]
    fn test_missing_catalog_names_path() {
        let dir = TempDir::new().unwrap();
        let config = PipelineConfig {
            catalog: dir.path().join("missing.tags.tsv"),
            snps: dir.path().join("missing.snps.tsv"),
            reads_dir: dir.path().join("paired"),
            out_dir: dir.path().join("out"),
            ..PipelineConfig::default()
        };

        match run(&config) {
            Err(PipelineError::Catalog { path, .. }) => assert_eq!(path, config.catalog),
            other => panic!("expected Catalog error, got {other:?}"),
        }
    }

    #[test]
    fn test_existing_output_checked_first() {
        let dir = TempDir::new().unwrap();
        let out_dir = dir.path().join("out");
        fs::create_dir(&out_dir).unwrap();

        let config = PipelineConfig {
            out_dir,
            ..PipelineConfig::default()
        };
        assert!(matches!(
            run(&config),
            Err(PipelineError::Output(OutputError::OutputExists(_)))
        ));
    }
}
