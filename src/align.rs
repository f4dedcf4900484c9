//! Atom alignment between reactant and product.
//!
//! Alignment matches atoms across the two sides of a reaction by their
//! atom-mapping numbers, partitioning every atom into exactly one of three
//! sets: matched (present on both sides), product-only, reactant-only.
//!
//! ## Determinism Guarantees
//!
//! - The matched map iterates in reactant-index order (BTreeMap).
//! - Product-only indices are in product atom order.
//! - Reactant-only indices are in reactant atom order.
//!
//! Indices are molecule-local zero-based positions, never mapping numbers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::molecule::Molecule;

/// Correspondence between reactant and product atoms.
///
/// The three parts cover every distinct atom across both molecules exactly
/// once, counting a matched atom once:
/// `matched + product_only + reactant_only
///  == reactant atoms + product atoms − matched`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtomAlignment {
    /// Reactant atom index -> product atom index for matched atoms.
    pub reac_to_prod: BTreeMap<usize, usize>,
    /// Product atom indices with no reactant counterpart, in product order.
    pub product_only: Vec<usize>,
    /// Reactant atom indices with no product counterpart, in reactant order.
    pub reactant_only: Vec<usize>,
}

impl AtomAlignment {
    /// Align a reactant and a product molecule by atom-mapping number.
    ///
    /// A mapping-number table is built over the product's mapped atoms
    /// (a number repeated within the product keeps the last atom seen);
    /// each mapped reactant atom then claims its number from the table,
    /// removing it, so a number repeated within the reactant matches only
    /// the first reactant atom carrying it. Unmapped atoms (number 0)
    /// never match. Total over all inputs: zero matches and fully disjoint
    /// atom sets are ordinary outcomes, not errors.
    pub fn align<R: Molecule, P: Molecule>(reactant: &R, product: &P) -> Self {
        // Mapping number -> product atom index. Last write wins.
        let mut prod_by_mapno: BTreeMap<u32, usize> = BTreeMap::new();
        for (pi, atom) in product.atoms().iter().enumerate() {
            if atom.map_number > 0 {
                prod_by_mapno.insert(atom.map_number, pi);
            }
        }

        let mut reac_to_prod = BTreeMap::new();
        let mut reactant_only = Vec::new();
        let mut claimed = vec![false; product.num_atoms()];
        for (ri, atom) in reactant.atoms().iter().enumerate() {
            match atom.map_number {
                0 => reactant_only.push(ri),
                mapno => match prod_by_mapno.remove(&mapno) {
                    Some(pi) => {
                        reac_to_prod.insert(ri, pi);
                        claimed[pi] = true;
                    }
                    None => reactant_only.push(ri),
                },
            }
        }

        // Every unclaimed product atom is product-only, in product order.
        let product_only = (0..product.num_atoms()).filter(|&pi| !claimed[pi]).collect();

        Self {
            reac_to_prod,
            product_only,
            reactant_only,
        }
    }

    /// Number of matched atom pairs.
    pub fn num_matched(&self) -> usize {
        self.reac_to_prod.len()
    }

    /// Total node count of the unified graph:
    /// matched + product-only + reactant-only.
    pub fn num_nodes(&self) -> usize {
        self.reac_to_prod.len() + self.product_only.len() + self.reactant_only.len()
    }
}
