use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

/// Number of optional alternate columns after the mandatory first alternate
pub const MAX_OPTIONAL_ALTERNATES: usize = 2;

/// Upper bound on alternates stored for one variant
pub const MAX_ALTERNATES: usize = 1 + MAX_OPTIONAL_ALTERNATES;

/// Failure to read the nucleotide at a variant position from a single read
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractError {
    #[error("position {position} is outside read of length {read_len}")]
    OutOfRange { position: usize, read_len: usize },
}

/// Ordered, bounded list of alternate nucleotides.
///
/// The first alternate is always present; at most [`MAX_OPTIONAL_ALTERNATES`]
/// more can follow it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Alternates(Vec<char>);

impl Alternates {
    pub fn new(first: char) -> Self {
        let mut alts = Vec::with_capacity(MAX_ALTERNATES);
        alts.push(first);
        Self(alts)
    }

    /// Append an alternate. Returns `false` (and stores nothing) when full.
    pub fn push(&mut self, alt: char) -> bool {
        if self.0.len() >= MAX_ALTERNATES {
            return false;
        }
        self.0.push(alt);
        true
    }

    pub fn as_slice(&self) -> &[char] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Per-sample nucleotide tallies for one variant.
///
/// Samples and nucleotides only appear after their first observation;
/// lookups of anything never observed return `None` rather than zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SampleCounts(BTreeMap<String, BTreeMap<char, u64>>);

impl SampleCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observation of `nucleotide` for `sample`
    pub fn increment(&mut self, sample: &str, nucleotide: char) {
        self.add(sample, nucleotide, 1);
    }

    fn add(&mut self, sample: &str, nucleotide: char, count: u64) {
        if let Some(per_sample) = self.0.get_mut(sample) {
            *per_sample.entry(nucleotide).or_insert(0) += count;
            return;
        }
        self.0
            .entry(sample.to_owned())
            .or_default()
            .insert(nucleotide, count);
    }

    pub fn get(&self, sample: &str, nucleotide: char) -> Option<u64> {
        self.0.get(sample)?.get(&nucleotide).copied()
    }

    pub fn sample(&self, sample: &str) -> Option<&BTreeMap<char, u64>> {
        self.0.get(sample)
    }

    pub fn samples(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Total observations across all samples and nucleotides
    pub fn total(&self) -> u64 {
        self.0.values().flat_map(BTreeMap::values).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fold another tally into this one
    pub fn merge(&mut self, other: &SampleCounts) {
        for (sample, nucleotides) in &other.0 {
            for (&nucleotide, &count) in nucleotides {
                self.add(sample, nucleotide, count);
            }
        }
    }
}

/// A catalog SNP within a locus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    /// Reference nucleotide
    pub reference: char,

    /// 1-based position within the locus consensus
    pub position: usize,

    pub alternates: Alternates,

    pub counts: SampleCounts,
}

impl Variant {
    pub fn new(reference: char, position: usize, alternates: Alternates) -> Self {
        Self {
            reference,
            position,
            alternates,
            counts: SampleCounts::new(),
        }
    }

    /// Nucleotide of `read` at this variant's position.
    ///
    /// Positions and the reported read length count characters, not bytes.
    /// Position 0 and positions past the end of the read are both out of range.
    pub fn extract(&self, read: &str) -> Result<char, ExtractError> {
        self.position
            .checked_sub(1)
            .and_then(|offset| read.chars().nth(offset))
            .ok_or_else(|| ExtractError::OutOfRange {
                position: self.position,
                read_len: read.chars().count(),
            })
    }

    /// Extract and, on success, count the nucleotide for `sample`
    pub fn observe(&mut self, sample: &str, read: &str) -> Result<char, ExtractError> {
        let nucleotide = self.extract(read)?;
        self.counts.increment(sample, nucleotide);
        Ok(nucleotide)
    }
}
