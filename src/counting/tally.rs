use std::io::BufRead;
use std::ops::{Add, AddAssign};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::core::locus::Locus;
use crate::core::variant::ExtractError;
use crate::parsing::reads::for_each_read;
use crate::parsing::{open_input, ParseError};

/// What counting a set of read collections did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReadTally {
    /// Read collection files consumed
    pub files: usize,

    /// Reads visited
    pub reads: usize,

    /// (read, variant) pairs that produced a count
    pub observations: u64,

    /// (read, variant) pairs skipped because the read was too short
    pub skipped: u64,
}

impl Add for ReadTally {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            files: self.files + other.files,
            reads: self.reads + other.reads,
            observations: self.observations + other.observations,
            skipped: self.skipped + other.skipped,
        }
    }
}

impl AddAssign for ReadTally {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

/// Count one read collection file into `locus`
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or the structural
/// errors of [`count_reads`].
pub fn count_file(locus: &mut Locus, path: &Path) -> Result<ReadTally, ParseError> {
    let reader = open_input(path)?;
    let tally = count_reads(locus, reader)?;
    debug!(
        locus = %locus.id,
        path = %path.display(),
        reads = tally.reads,
        skipped = tally.skipped,
        "Counted read collection"
    );
    Ok(tally)
}

/// Tally, for every read and every variant of `locus`, the nucleotide at the
/// variant position under the read's sample.
///
/// Reads too short for a variant position are skipped for that variant and
/// logged; they never fail the call.
///
/// # Errors
///
/// Returns `ParseError::Io` on read failure, `ParseError::InvalidFormat` for a
/// header without a sample field, or `ParseError::ReadBeforeHeader`.
pub fn count_reads<R: BufRead>(locus: &mut Locus, reader: R) -> Result<ReadTally, ParseError> {
    let Locus { id, variants, .. } = locus;
    let mut observations = 0;
    let mut skipped = 0;

    let reads = for_each_read(reader, |sample, read| {
        for variant in variants.iter_mut() {
            match variant.observe(sample, read) {
                Ok(_) => observations += 1,
                Err(ExtractError::OutOfRange { position, read_len }) => {
                    warn!(
                        locus = %id,
                        sample,
                        position,
                        read_len,
                        "Read does not cover SNP position, skipping observation"
                    );
                    skipped += 1;
                }
            }
        }
    })?;

    Ok(ReadTally {
        files: 1,
        reads,
        observations,
        skipped,
    })
}
