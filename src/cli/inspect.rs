use anyhow::Context;
use clap::Args;
use serde::Serialize;

use crate::catalog::store::LocusRegistry;
use crate::cli::{InputArgs, OutputFormat};
use crate::core::locus::Locus;
use crate::pipeline::build_registry;

#[derive(Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Also list loci without SNPs
    #[arg(long)]
    pub all: bool,
}

/// Per-locus statistics after counting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocusStats {
    pub id: String,
    pub consensus_length: usize,
    pub snps: usize,
    pub samples: usize,
    pub observations: u64,
}

impl From<&Locus> for LocusStats {
    fn from(locus: &Locus) -> Self {
        Self {
            id: locus.id.clone(),
            consensus_length: locus.consensus_len(),
            snps: locus.variants.len(),
            samples: locus.sample_count(),
            observations: locus.observation_count(),
        }
    }
}

/// Statistics for the loci of `registry`, in id order
pub fn collect_stats(registry: &LocusRegistry, include_invariant: bool) -> Vec<LocusStats> {
    registry
        .iter()
        .filter(|locus| include_invariant || locus.has_variants())
        .map(LocusStats::from)
        .collect()
}

/// Execute inspect subcommand
///
/// # Errors
///
/// Returns an error if any input cannot be parsed or joined.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: InspectArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let (registry, tally) = build_registry(
        &args.input.catalog,
        &args.input.snps,
        &args.input.reads,
        usize::from(args.input.threads),
    )
    .context("Inspection failed")?;

    if verbose {
        eprintln!(
            "Counted {} reads from {} files ({} observations skipped)",
            tally.reads, tally.files, tally.skipped
        );
    }

    let stats = collect_stats(&registry, args.all);

    match format {
        OutputFormat::Text => print_text_stats(&stats),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Tsv => print_tsv_stats(&stats),
    }

    Ok(())
}

fn print_text_stats(stats: &[LocusStats]) {
    if stats.is_empty() {
        println!("No loci to report.");
        return;
    }

    println!(
        "{:<12} {:>8} {:>6} {:>8} {:>12}",
        "Locus", "Length", "SNPs", "Samples", "Observations"
    );
    println!("{}", "-".repeat(50));
    for s in stats {
        println!(
            "{:<12} {:>8} {:>6} {:>8} {:>12}",
            s.id, s.consensus_length, s.snps, s.samples, s.observations
        );
    }
}

fn print_tsv_stats(stats: &[LocusStats]) {
    println!("locus\tconsensus_length\tsnps\tsamples\tobservations");
    for s in stats {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            s.id, s.consensus_length, s.snps, s.samples, s.observations
        );
    }
}
