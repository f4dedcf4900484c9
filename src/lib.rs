//! # cgr-kernel
//!
//! Deterministic condensed-graph-of-reaction featurization.
//!
//! The CGR kernel answers one question:
//!
//! > Given a mapped reaction, what single graph encodes **what changed**
//! > between reactant and product?
//!
//! ## Core Contract
//!
//! 1. Align atoms across the two sides by atom-mapping number
//! 2. Produce fixed-shape node and half-edge feature matrices under one of
//!    six encoding modes
//! 3. Produce the adjacency bookkeeping (`b2a`, `b2revb`, `a2b`) a
//!    message-passing network consumes
//!
//! ## Architecture
//!
//! ```text
//! (Reactant, Product) → AtomAlignment → CgrFeaturizer → RxnMolGraph
//!                            ↓               ↓
//!                        RxnMode    Atom/Bond Featurizers
//! ```
//!
//! ## Determinism Guarantees
//!
//! - Same molecule pair + same mode + same featurizers → bit-identical
//!   arrays and identical graph fingerprint
//! - Node row ordering is canonical (reactant atoms in reactant order,
//!   then product-only atoms)
//! - Half-edges come in consecutive reverse pairs in pair-scan order
//!
//! Featurization is pure: no caching, no locking, no shared mutable state.
//! Distinct reactions may be featurized concurrently.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod align;
pub mod batch;
pub mod canonical;
pub mod cgr;
pub mod featurize;
pub mod molecule;
pub mod types;

// Re-exports
pub use align::AtomAlignment;
pub use batch::{BatchFeaturizer, BatchResult, BatchRxnGraph, GraphRegistry, GraphRegistryEntry};
pub use cgr::CgrFeaturizer;
pub use featurize::{AtomFeaturizer, BondFeaturizer, ElementAtomFeaturizer, OrderBondFeaturizer};
pub use molecule::{AtomInfo, BondInfo, BondOrder, InMemoryMol, Molecule};
pub use types::{GraphFingerprint, RxnMode, RxnModeError, RxnMolGraph};
pub use canonical::{canonical_hash, canonical_hash_hex, to_canonical_bytes};

/// Schema version for all featurization output types.
/// Increment on breaking changes to any output layout.
pub const CGR_SCHEMA_VERSION: &str = "1.0.0";

/// Default encoding mode when none is specified.
pub const DEFAULT_RXN_MODE: RxnMode = RxnMode::ReacDiff;
