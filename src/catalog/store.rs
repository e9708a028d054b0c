use std::collections::BTreeMap;

use rayon::prelude::*;
use thiserror::Error;
use tracing::warn;

use crate::core::locus::Locus;
use crate::core::variant::Variant;
use crate::parsing::ParseError;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Locus '{id}' referenced by {origin} is not in the catalog")]
    UnknownLocus { id: String, origin: String },

    #[error("Failed to parse catalog data: {0}")]
    Parse(#[from] ParseError),
}

/// Registry of catalog loci keyed by locus id.
///
/// The registry is the sole owner of every [`Locus`] and, through them, of
/// every [`Variant`]. Iteration is ordered by locus id.
#[derive(Debug, Default, Clone)]
pub struct LocusRegistry {
    loci: BTreeMap<String, Locus>,
}

impl LocusRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a locus, replacing any existing locus with the same id.
    ///
    /// Duplicate ids are not rejected: the last one wins and the replaced locus
    /// (with any variants already attached) is returned and logged.
    pub fn insert(&mut self, locus: Locus) -> Option<Locus> {
        let replaced = self.loci.insert(locus.id.clone(), locus);
        if let Some(old) = &replaced {
            warn!(
                locus = %old.id,
                "Duplicate locus id in catalog, keeping the later entry"
            );
        }
        replaced
    }

    /// Attach a variant to the locus with the given id
    pub fn attach_variant(
        &mut self,
        locus_id: &str,
        variant: Variant,
        origin: &str,
    ) -> Result<(), CatalogError> {
        let locus = self.get_mut_or_err(locus_id, origin)?;
        locus.add_variant(variant);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Locus> {
        self.loci.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Locus> {
        self.loci.get_mut(id)
    }

    /// Mutable lookup that treats a missing id as a join failure
    pub fn get_mut_or_err(&mut self, id: &str, origin: &str) -> Result<&mut Locus, CatalogError> {
        self.loci
            .get_mut(id)
            .ok_or_else(|| CatalogError::UnknownLocus {
                id: id.to_string(),
                origin: origin.to_string(),
            })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.loci.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Locus> {
        self.loci.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Locus> {
        self.loci.values_mut()
    }

    /// Parallel mutable iteration; each locus is handed to exactly one worker
    pub fn par_iter_mut(&mut self) -> impl ParallelIterator<Item = &mut Locus> {
        self.loci.par_iter_mut().map(|(_, locus)| locus)
    }

    /// Number of loci in the registry
    pub fn len(&self) -> usize {
        self.loci.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.loci.is_empty()
    }

    /// Total number of variants across all loci
    pub fn variant_count(&self) -> usize {
        self.loci.values().map(|l| l.variants.len()).sum()
    }

    /// Number of loci with at least one variant
    pub fn variable_locus_count(&self) -> usize {
        self.loci.values().filter(|l| l.has_variants()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::variant::Alternates;

    #[test]
    fn test_insert_and_get() {
        let mut registry = LocusRegistry::new();
        assert!(registry.is_empty());

        registry.insert(Locus::new("1", "ACGT"));
        registry.insert(Locus::new("2", "TTTT"));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("2").unwrap().consensus, "TTTT");
        assert!(registry.get("3").is_none());
    }

    #[test]
    fn test_duplicate_id_last_write_wins() {
        let mut registry = LocusRegistry::new();
        assert!(registry.insert(Locus::new("1", "AAAA")).is_none());

        let replaced = registry.insert(Locus::new("1", "CCCC"));
        assert_eq!(replaced.unwrap().consensus, "AAAA");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("1").unwrap().consensus, "CCCC");
    }

    #[test]
    fn test_attach_variant_to_unknown_locus_fails() {
        let mut registry = LocusRegistry::new();
        registry.insert(Locus::new("1", "ACGT"));

        let result =
            registry.attach_variant("9", Variant::new('A', 1, Alternates::new('C')), "snps.tsv");
        match result {
            Err(CatalogError::UnknownLocus { id, origin }) => {
                assert_eq!(id, "9");
                assert_eq!(origin, "snps.tsv");
            }
            other => panic!("expected UnknownLocus, got {other:?}"),
        }
    }

    #[test]
    fn test_variant_counts() {
        let mut registry = LocusRegistry::new();
        registry.insert(Locus::new("1", "ACGT"));
        registry.insert(Locus::new("2", "ACGT"));
        registry
            .attach_variant("2", Variant::new('A', 1, Alternates::new('C')), "test")
            .unwrap();
        registry
            .attach_variant("2", Variant::new('C', 2, Alternates::new('T')), "test")
            .unwrap();

        assert_eq!(registry.variant_count(), 2);
        assert_eq!(registry.variable_locus_count(), 1);
    }

    #[test]
    fn test_iteration_ordered_by_id() {
        let mut registry = LocusRegistry::new();
        registry.insert(Locus::new("b", "A"));
        registry.insert(Locus::new("a", "A"));
        registry.insert(Locus::new("c", "A"));

        let ids: Vec<&str> = registry.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
