//! In-memory locus registry shared by every pipeline stage.
//!
//! The [`LocusRegistry`](store::LocusRegistry) is created from the catalog tags
//! file, gains variants from the catalog SNP file, has its counts filled in by
//! the read counter, and is finally read by the record emitter.
//!
//! ## Example
//!
//! ```rust
//! use stacks_dat::catalog::store::LocusRegistry;
//! use stacks_dat::core::locus::Locus;
//! use stacks_dat::core::variant::{Alternates, Variant};
//!
//! let mut registry = LocusRegistry::new();
//! registry.insert(Locus::new("12", "TGCAGGAC"));
//! registry
//!     .attach_variant("12", Variant::new('G', 4, Alternates::new('A')), "example")
//!     .unwrap();
//!
//! assert_eq!(registry.variant_count(), 1);
//! ```

pub mod store;
