use std::collections::BTreeMap;
use std::path::PathBuf;

use rayon::prelude::*;
use thiserror::Error;
use tracing::info;

use crate::catalog::store::{CatalogError, LocusRegistry};
use crate::core::locus::Locus;
use crate::counting::tally::{count_file, ReadTally};
use crate::parsing::reads::ReadFile;
use crate::parsing::ParseError;

#[derive(Error, Debug)]
pub enum CountError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Failed to count reads in {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Configuration for the counting engine
#[derive(Debug, Clone)]
pub struct CountingConfig {
    /// Worker threads; 1 counts loci sequentially on the calling thread
    pub threads: usize,
}

impl Default for CountingConfig {
    fn default() -> Self {
        Self { threads: 1 }
    }
}

/// Joins read collection files to registry loci and tallies their reads
pub struct CountingEngine {
    config: CountingConfig,
}

impl CountingEngine {
    pub fn new(config: CountingConfig) -> Self {
        Self { config }
    }

    /// Count every read file into the locus it names.
    ///
    /// All files are joined to loci before any counting starts, so an unknown
    /// locus fails the call with the registry untouched. Loci are independent;
    /// with more than one thread each locus (and every file naming it) is
    /// handled by a single worker.
    ///
    /// # Errors
    ///
    /// Returns `CountError::Catalog` for a file naming an unknown locus,
    /// `CountError::Read` for an unreadable or malformed file, or
    /// `CountError::ThreadPool` if the worker pool cannot be created.
    pub fn count(
        &self,
        registry: &mut LocusRegistry,
        files: &[ReadFile],
    ) -> Result<ReadTally, CountError> {
        let by_locus = group_by_locus(registry, files)?;

        let tally = if self.config.threads <= 1 {
            registry
                .iter_mut()
                .try_fold(ReadTally::default(), |acc, locus| {
                    Ok::<_, CountError>(acc + count_locus(locus, &by_locus)?)
                })?
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.threads)
                .build()?;
            pool.install(|| {
                registry
                    .par_iter_mut()
                    .map(|locus| count_locus(locus, &by_locus))
                    .try_reduce(ReadTally::default, |a, b| Ok(a + b))
            })?
        };

        info!(
            files = tally.files,
            reads = tally.reads,
            observations = tally.observations,
            skipped = tally.skipped,
            "Counted reads at catalog SNPs"
        );
        Ok(tally)
    }
}

/// Group file paths by locus id, failing on any id missing from the registry
fn group_by_locus(
    registry: &LocusRegistry,
    files: &[ReadFile],
) -> Result<BTreeMap<String, Vec<PathBuf>>, CatalogError> {
    let mut by_locus: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    for file in files {
        if !registry.contains(&file.locus_id) {
            return Err(CatalogError::UnknownLocus {
                id: file.locus_id.clone(),
                origin: file.path.display().to_string(),
            });
        }
        by_locus
            .entry(file.locus_id.clone())
            .or_default()
            .push(file.path.clone());
    }
    Ok(by_locus)
}

fn count_locus(
    locus: &mut Locus,
    by_locus: &BTreeMap<String, Vec<PathBuf>>,
) -> Result<ReadTally, CountError> {
    let Some(paths) = by_locus.get(&locus.id) else {
        return Ok(ReadTally::default());
    };

    let mut tally = ReadTally::default();
    for path in paths {
        tally += count_file(locus, path).map_err(|source| CountError::Read {
            path: path.clone(),
            source,
        })?;
    }
    Ok(tally)
}
