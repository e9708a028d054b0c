//! # stacks-dat
//!
//! A library for tallying, per sample, the nucleotides observed at Stacks
//! catalog SNPs.
//!
//! Stacks writes its catalog as a tags file (one consensus sequence per locus)
//! and a SNPs file (reference and alternate alleles per locus position), and
//! its paired reads as one pseudo-FASTA file per locus with reads grouped by
//! sample. `stacks-dat` joins the three and produces, for every locus with at
//! least one SNP, a JSON record listing each SNP with the per-sample counts of
//! every nucleotide seen at its position.
//!
//! ## Features
//!
//! - **Strict joins**: SNPs or read files naming an unknown locus abort the run
//! - **Soft read failures**: reads too short for a SNP are logged and skipped
//! - **Compressed inputs**: gzip and bgzip for every input file
//! - **Parallel counting**: loci are counted independently on a rayon pool
//! - **Atomic output**: each record is either fully written or absent
//!
//! ## Example
//!
//! ```rust,no_run
//! use stacks_dat::pipeline::{run, PipelineConfig};
//!
//! let summary = run(&PipelineConfig::default()).unwrap();
//! println!(
//!     "{} records for {} loci",
//!     summary.output.written, summary.loci
//! );
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: The locus registry shared by all stages
//! - [`core`]: Loci, variants and per-sample counts
//! - [`parsing`]: Parsers for catalog tags, catalog SNPs and read collections
//! - [`counting`]: Read counting at SNP positions
//! - [`output`]: Per-locus `.dat` records
//! - [`pipeline`]: The end-to-end run
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod core;
pub mod counting;
pub mod output;
pub mod parsing;
pub mod pipeline;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::store::LocusRegistry;
pub use core::locus::Locus;
pub use core::variant::{Alternates, SampleCounts, Variant};
pub use counting::engine::{CountingConfig, CountingEngine};
pub use counting::tally::ReadTally;
pub use pipeline::{PipelineConfig, PipelineSummary};
