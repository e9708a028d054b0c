//! Core data types for SNP read tallies.
//!
//! - [`Locus`](locus::Locus): a catalog locus with its consensus sequence and owned variants
//! - [`Variant`](variant::Variant): a catalog SNP with reference, position, alternates and counts
//! - [`SampleCounts`](variant::SampleCounts): per-sample nucleotide tallies
//! - [`Alternates`](variant::Alternates): the bounded alternate allele list
//!
//! ## Positions
//!
//! Variant positions are **1-based**. The nucleotide for a variant at position
//! `p` is the byte at offset `p - 1` of a read; anything outside the read is an
//! [`ExtractError`](variant::ExtractError), which callers log and skip.

pub mod locus;
pub mod variant;
