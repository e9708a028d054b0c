use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::{InputArgs, OutputFormat};
use crate::pipeline::{self, PipelineConfig, PipelineSummary, DEFAULT_OUT_DIR};

#[derive(Args)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Directory receiving one outfile_<locus id>.mod.dat per locus
    #[arg(short, long, default_value = DEFAULT_OUT_DIR)]
    pub output: PathBuf,

    /// Write into the output directory even if it already exists
    #[arg(long)]
    pub force: bool,
}

impl ConvertArgs {
    fn to_config(&self) -> PipelineConfig {
        PipelineConfig {
            catalog: self.input.catalog.clone(),
            snps: self.input.snps.clone(),
            reads_dir: self.input.reads.clone(),
            out_dir: self.output.clone(),
            threads: usize::from(self.input.threads),
            overwrite: self.force,
        }
    }
}

/// Execute convert subcommand
///
/// # Errors
///
/// Returns an error if any input cannot be parsed or joined, or if the
/// records cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ConvertArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.to_config();

    if verbose {
        eprintln!(
            "Converting {} + {} with reads from {} using {} thread(s)",
            config.catalog.display(),
            config.snps.display(),
            config.reads_dir.display(),
            config.threads,
        );
    }

    let summary = pipeline::run(&config).context("Conversion failed")?;

    match format {
        OutputFormat::Text => print_text_summary(&summary),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Tsv => print_tsv_summary(&summary),
    }

    Ok(())
}

fn print_text_summary(summary: &PipelineSummary) {
    println!(
        "Loci:            {} ({} with SNPs)",
        summary.loci, summary.variable_loci
    );
    println!("SNPs:            {}", summary.variants);
    println!("Read files:      {}", summary.counting.files);
    println!("Reads:           {}", summary.counting.reads);
    println!("Observations:    {}", summary.counting.observations);
    if summary.counting.skipped > 0 {
        println!(
            "Skipped:         {} (reads shorter than SNP position)",
            summary.counting.skipped
        );
    }
    println!(
        "Records written: {} to {}",
        summary.output.written,
        summary.out_dir.display()
    );
}

fn print_tsv_summary(summary: &PipelineSummary) {
    println!("loci\tvariable_loci\tsnps\tread_files\treads\tobservations\tskipped\trecords");
    println!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
        summary.loci,
        summary.variable_loci,
        summary.variants,
        summary.counting.files,
        summary.counting.reads,
        summary.counting.observations,
        summary.counting.skipped,
        summary.output.written,
    );
}
