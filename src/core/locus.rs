use crate::core::variant::Variant;

/// A catalog locus: id, consensus sequence, and the SNPs found in it.
///
/// Variants are kept in the order they were attached, which is the order of
/// the variant catalog, not necessarily position order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locus {
    pub id: String,
    pub consensus: String,
    pub variants: Vec<Variant>,
}

impl Locus {
    pub fn new(id: impl Into<String>, consensus: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            consensus: consensus.into(),
            variants: Vec::new(),
        }
    }

    pub fn add_variant(&mut self, variant: Variant) {
        self.variants.push(variant);
    }

    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }

    pub fn consensus_len(&self) -> usize {
        self.consensus.len()
    }

    /// Distinct samples observed at any variant of this locus
    pub fn sample_count(&self) -> usize {
        let mut samples: Vec<&str> = self
            .variants
            .iter()
            .flat_map(|v| v.counts.samples())
            .collect();
        samples.sort_unstable();
        samples.dedup();
        samples.len()
    }

    /// Total counted observations across all variants
    pub fn observation_count(&self) -> u64 {
        self.variants.iter().map(|v| v.counts.total()).sum()
    }
}
