//! Default bond featurizer.

use serde::{Deserialize, Serialize};

use super::BondFeaturizer;
use crate::molecule::{BondInfo, BondOrder};

/// absent flag + 4 order slots + conjugated + in-ring.
const BOND_FDIM: usize = 7;

/// Bond featurizer over order and topology flags.
///
/// Encodes, in order: an absent-bond flag, a bond-order one-hot
/// (single/double/triple/aromatic), a conjugation flag, and a
/// ring-membership flag. The absent-bond sentinel is the fixed vector with
/// only the leading flag set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderBondFeaturizer;

impl OrderBondFeaturizer {
    /// Create the featurizer.
    pub fn new() -> Self {
        Self
    }
}

impl BondFeaturizer for OrderBondFeaturizer {
    fn dim(&self) -> usize {
        BOND_FDIM
    }

    fn featurize(&self, bond: Option<&BondInfo>) -> Vec<f32> {
        let mut v = vec![0.0; BOND_FDIM];
        match bond {
            None => v[0] = 1.0,
            Some(bond) => {
                let slot = match bond.order {
                    BondOrder::Single => 1,
                    BondOrder::Double => 2,
                    BondOrder::Triple => 3,
                    BondOrder::Aromatic => 4,
                };
                v[slot] = 1.0;
                v[5] = if bond.is_conjugated { 1.0 } else { 0.0 };
                v[6] = if bond.is_in_ring { 1.0 } else { 0.0 };
            }
        }
        v
    }
}
