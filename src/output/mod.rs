//! Per-locus `.dat` records.
//!
//! Each locus with at least one SNP is written as `outfile_<locus id>.mod.dat`,
//! a JSON list with one object per SNP in catalog order:
//!
//! ```json
//! [{"alts":["G"],"counts":{"S1":{"A":1,"G":1}},"ref":"A","pos":3}]
//! ```
//!
//! Loci without SNPs produce no file at all.

use std::path::PathBuf;

use thiserror::Error;

use crate::utils::validation::ValidationError;

pub mod dat;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Output directory {0} already exists (use --force to write into it)")]
    OutputExists(PathBuf),

    #[error("Locus id '{id}' cannot be used in a file name: {source}")]
    InvalidLocusId {
        id: String,
        #[source]
        source: ValidationError,
    },
}
