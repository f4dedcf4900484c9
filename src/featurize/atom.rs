//! Default atom featurizer.

use serde::{Deserialize, Serialize};

use super::AtomFeaturizer;
use crate::molecule::AtomInfo;

/// Degree one-hot covers 0..=5 bonds plus an overflow slot.
const DEGREE_SLOTS: usize = 7;
/// Formal charge one-hot covers -2..=2 plus an overflow slot.
const CHARGE_SLOTS: usize = 6;
/// Hydrogen-count one-hot covers 0..=4 plus an overflow slot.
const NUM_HS_SLOTS: usize = 6;
/// Mass is scaled so common elements land near 1.
const MASS_SCALE: f32 = 0.01;

/// One-hot atom featurizer over element and valence metadata.
///
/// Encodes, in order: atomic-number one-hot (`max_atomic_num` slots plus
/// overflow), degree one-hot, formal-charge one-hot, hydrogen-count
/// one-hot, an aromaticity flag, and the scaled atomic mass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementAtomFeaturizer {
    /// Highest atomic number with a dedicated one-hot slot.
    max_atomic_num: u8,
}

impl ElementAtomFeaturizer {
    /// Create a featurizer with a dedicated slot per atomic number up to
    /// `max_atomic_num`; heavier elements share the overflow slot.
    pub fn new(max_atomic_num: u8) -> Self {
        Self { max_atomic_num }
    }

    /// Highest atomic number with a dedicated one-hot slot.
    pub fn max_atomic_num(&self) -> u8 {
        self.max_atomic_num
    }

    fn atomic_num_slots(&self) -> usize {
        self.max_atomic_num as usize + 1
    }
}

impl Default for ElementAtomFeaturizer {
    fn default() -> Self {
        Self::new(100)
    }
}

impl AtomFeaturizer for ElementAtomFeaturizer {
    fn dim(&self) -> usize {
        self.atomic_num_slots() + DEGREE_SLOTS + CHARGE_SLOTS + NUM_HS_SLOTS + 2
    }

    fn featurize(&self, atom: &AtomInfo) -> Vec<f32> {
        let mut v = vec![0.0; self.dim()];
        let mut offset = 0;

        // Atomic number: slot (n - 1), overflow in the last slot.
        let n = atom.atomic_num as usize;
        let slot = if n >= 1 && n <= self.max_atomic_num as usize {
            n - 1
        } else {
            self.max_atomic_num as usize
        };
        v[offset + slot] = 1.0;
        offset += self.atomic_num_slots();

        let degree = (atom.degree as usize).min(DEGREE_SLOTS - 1);
        v[offset + degree] = 1.0;
        offset += DEGREE_SLOTS;

        // Charge slots: -2..=2 at 0..=4, overflow at 5.
        let charge = match atom.formal_charge {
            c @ -2..=2 => (c + 2) as usize,
            _ => CHARGE_SLOTS - 1,
        };
        v[offset + charge] = 1.0;
        offset += CHARGE_SLOTS;

        let hs = (atom.total_hs as usize).min(NUM_HS_SLOTS - 1);
        v[offset + hs] = 1.0;
        offset += NUM_HS_SLOTS;

        v[offset] = if atom.is_aromatic { 1.0 } else { 0.0 };
        v[offset + 1] = atom.mass * MASS_SCALE;

        v
    }
}
