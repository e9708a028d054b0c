//! Per-sample nucleotide tallies at catalog SNP positions.
//!
//! - [`CountingEngine`](engine::CountingEngine): joins read files to loci and
//!   counts them, sequentially or on a rayon pool
//! - [`count_reads`](tally::count_reads): counts one read collection into one locus
//! - [`ReadTally`](tally::ReadTally): totals reported by a counting pass
//!
//! ## Soft Failures
//!
//! A read shorter than a SNP position cannot be counted at that SNP. The
//! observation is skipped and a warning naming the locus, position and read
//! length is logged. Other SNPs of the same read, other reads, and other loci
//! are unaffected.

pub mod engine;
pub mod tally;
