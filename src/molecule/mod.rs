//! Molecule collaborator contract.
//!
//! Reaction featurization does not parse chemical structures itself; it
//! consumes already-parsed molecules through the [`Molecule`] trait. Any
//! backend (a SMILES parser, an FFI toolkit wrapper) can plug in, provided
//! it satisfies the ordering contract below.
//!
//! ## Contract
//!
//! - Atoms and bonds are exposed in a stable, zero-based index order.
//! - `bond_between(a, b)` is symmetric and returns `None` for non-adjacent
//!   pairs and out-of-range indices.
//! - Atom-mapping numbers are non-negative; `0` means unmapped.

pub mod memory;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-atom metadata exposed by a molecule backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtomInfo {
    /// Atomic number (1 = H, 6 = C, ...).
    pub atomic_num: u8,
    /// Atom-mapping number from the reaction encoding; 0 = unmapped.
    pub map_number: u32,
    /// Formal charge.
    pub formal_charge: i8,
    /// Number of explicit bonds at this atom.
    pub degree: u8,
    /// Total attached hydrogens (implicit + explicit).
    pub total_hs: u8,
    /// Whether the atom is aromatic.
    pub is_aromatic: bool,
    /// Atomic mass in Daltons.
    pub mass: f32,
}

impl AtomInfo {
    /// Create an atom with the given atomic number and mapping number,
    /// all other metadata zeroed.
    pub fn new(atomic_num: u8, map_number: u32) -> Self {
        Self {
            atomic_num,
            map_number,
            formal_charge: 0,
            degree: 0,
            total_hs: 0,
            is_aromatic: false,
            mass: 0.0,
        }
    }

    /// Set the total hydrogen count.
    pub fn with_total_hs(mut self, total_hs: u8) -> Self {
        self.total_hs = total_hs;
        self
    }

    /// Set the formal charge.
    pub fn with_formal_charge(mut self, formal_charge: i8) -> Self {
        self.formal_charge = formal_charge;
        self
    }

    /// Set the aromaticity flag.
    pub fn with_aromatic(mut self, is_aromatic: bool) -> Self {
        self.is_aromatic = is_aromatic;
        self
    }

    /// Set the atomic mass.
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }
}

/// Bond order of a chemical bond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BondOrder {
    /// Single bond.
    Single,
    /// Double bond.
    Double,
    /// Triple bond.
    Triple,
    /// Aromatic bond.
    Aromatic,
}

impl Default for BondOrder {
    fn default() -> Self {
        Self::Single
    }
}

impl fmt::Display for BondOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "single"),
            Self::Double => write!(f, "double"),
            Self::Triple => write!(f, "triple"),
            Self::Aromatic => write!(f, "aromatic"),
        }
    }
}

/// Per-bond metadata exposed by a molecule backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BondInfo {
    /// Bond order.
    pub order: BondOrder,
    /// Whether the bond is part of a conjugated system.
    pub is_conjugated: bool,
    /// Whether the bond is in a ring.
    pub is_in_ring: bool,
}

impl BondInfo {
    /// Create a bond with the given order, all flags cleared.
    pub fn new(order: BondOrder) -> Self {
        Self {
            order,
            is_conjugated: false,
            is_in_ring: false,
        }
    }

    /// Set the conjugation flag.
    pub fn with_conjugated(mut self, is_conjugated: bool) -> Self {
        self.is_conjugated = is_conjugated;
        self
    }

    /// Set the ring-membership flag.
    pub fn with_in_ring(mut self, is_in_ring: bool) -> Self {
        self.is_in_ring = is_in_ring;
        self
    }
}

/// Trait for molecule backends.
///
/// Implementations must expose atoms and bonds in a stable index order;
/// featurization output is only as deterministic as the backend's ordering.
pub trait Molecule {
    /// Number of atoms.
    fn num_atoms(&self) -> usize;

    /// Atom metadata by zero-based index.
    ///
    /// # Panics
    /// May panic if `idx >= num_atoms()`; callers index within bounds.
    fn atom(&self, idx: usize) -> &AtomInfo;

    /// Ordered atom list.
    fn atoms(&self) -> &[AtomInfo];

    /// Number of bonds.
    fn num_bonds(&self) -> usize;

    /// Ordered bond list as `(atom_a, atom_b, bond)` triples.
    fn bonds(&self) -> &[(usize, usize, BondInfo)];

    /// Bond between two atoms, if adjacent. Symmetric in its arguments;
    /// `None` for non-adjacent pairs and out-of-range indices.
    fn bond_between(&self, a: usize, b: usize) -> Option<&BondInfo>;
}

pub use memory::InMemoryMol;
