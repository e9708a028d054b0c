//! Command-line interface for stacks-dat.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **convert**: Count reads at catalog SNPs and write one `.dat` record per locus
//! - **inspect**: Count reads and print per-locus statistics without writing records
//!
//! ## Usage
//!
//! ```text
//! # Run on a Stacks batch laid out in the current directory
//! stacks-dat convert
//!
//! # Explicit inputs, four worker threads, replace an earlier run
//! stacks-dat convert --catalog batch_2.catalog.tags.tsv.gz \
//!     --snps batch_2.catalog.snps.tsv.gz --reads paired --output stack_dat \
//!     --threads 4 --force
//!
//! # Per-locus statistics as TSV
//! stacks-dat inspect --format tsv
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::pipeline::{DEFAULT_CATALOG, DEFAULT_READS_DIR, DEFAULT_SNPS};

pub mod convert;
pub mod inspect;

#[derive(Parser)]
#[command(name = "stacks-dat")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Tally per-sample nucleotides at Stacks catalog SNPs")]
#[command(
    long_about = "stacks-dat joins a Stacks catalog (tags and SNPs) with the per-locus paired read collections and counts, for every SNP, which nucleotide each sample's reads carry at that position.\n\nOne JSON .dat record is written per locus that has at least one SNP."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format of the summary printed to stdout
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Count reads at catalog SNPs and write per-locus .dat records
    Convert(convert::ConvertArgs),

    /// Count reads at catalog SNPs and print per-locus statistics
    Inspect(inspect::InspectArgs),
}

/// Input locations shared by every command
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Stacks catalog tags file (optionally gzipped)
    #[arg(long, default_value = DEFAULT_CATALOG)]
    pub catalog: PathBuf,

    /// Stacks catalog SNPs file (optionally gzipped)
    #[arg(long, default_value = DEFAULT_SNPS)]
    pub snps: PathBuf,

    /// Directory of per-locus read collections named <locus id>.fa
    #[arg(long, default_value = DEFAULT_READS_DIR)]
    pub reads: PathBuf,

    /// Worker threads for read counting
    #[arg(short = 't', long, default_value = "1", value_parser = clap::value_parser!(u16).range(1..))]
    pub threads: u16,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
