//! Atom and bond featurizer contracts.
//!
//! Featurizers are strategy objects: a single encode method plus a
//! queryable output dimension, so encoders can be swapped without touching
//! graph-assembly logic. Encoders are pure functions of their input; the
//! same atom or bond always yields the same vector.

pub mod atom;
pub mod bond;

use crate::molecule::{AtomInfo, BondInfo};

/// Encoder from an atom to a fixed-length feature vector.
pub trait AtomFeaturizer {
    /// Output vector length. Constant for the featurizer's lifetime.
    fn dim(&self) -> usize;

    /// Encode one atom. The returned vector has length [`dim`](Self::dim).
    fn featurize(&self, atom: &AtomInfo) -> Vec<f32>;
}

/// Encoder from a bond-or-none to a fixed-length feature vector.
///
/// The `None` case encodes "no bond on this side of the reaction" and
/// returns a fixed sentinel vector of the same dimension.
pub trait BondFeaturizer {
    /// Output vector length. Constant for the featurizer's lifetime.
    fn dim(&self) -> usize;

    /// Encode one bond, or the absent-bond sentinel for `None`. The
    /// returned vector has length [`dim`](Self::dim).
    fn featurize(&self, bond: Option<&BondInfo>) -> Vec<f32>;
}

pub use atom::ElementAtomFeaturizer;
pub use bond::OrderBondFeaturizer;
