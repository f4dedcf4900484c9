//! In-memory molecule for testing.

use std::collections::BTreeMap;

use super::{AtomInfo, BondInfo, BondOrder, Molecule};

/// In-memory molecule backend for testing.
///
/// Uses a BTreeMap pair index for deterministic lookup. Atoms and bonds are
/// stored in insertion order, which is the exposed index order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMol {
    /// Atoms in index order.
    atoms: Vec<AtomInfo>,
    /// Bonds in insertion order.
    bonds: Vec<(usize, usize, BondInfo)>,
    /// Normalized (low, high) pair -> index into `bonds`.
    pair_index: BTreeMap<(usize, usize), usize>,
}

impl InMemoryMol {
    /// Create a new empty molecule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an atom, returning its index.
    pub fn add_atom(&mut self, atom: AtomInfo) -> usize {
        self.atoms.push(atom);
        self.atoms.len() - 1
    }

    /// Add a bond between two existing atoms.
    ///
    /// Updates the degree of both endpoints. Re-adding a pair replaces the
    /// bond reached by lookup but keeps list order stable.
    pub fn add_bond(&mut self, a: usize, b: usize, bond: BondInfo) {
        assert!(a < self.atoms.len() && b < self.atoms.len(), "bond endpoint out of range");
        assert_ne!(a, b, "self-bond");

        self.atoms[a].degree += 1;
        self.atoms[b].degree += 1;

        let key = if a < b { (a, b) } else { (b, a) };
        self.bonds.push((a, b, bond));
        self.pair_index.insert(key, self.bonds.len() - 1);
    }

    /// Convenience: add a single bond between two atoms.
    pub fn add_single_bond(&mut self, a: usize, b: usize) {
        self.add_bond(a, b, BondInfo::new(BondOrder::Single));
    }
}

impl Molecule for InMemoryMol {
    fn num_atoms(&self) -> usize {
        self.atoms.len()
    }

    fn atom(&self, idx: usize) -> &AtomInfo {
        &self.atoms[idx]
    }

    fn atoms(&self) -> &[AtomInfo] {
        &self.atoms
    }

    fn num_bonds(&self) -> usize {
        self.bonds.len()
    }

    fn bonds(&self) -> &[(usize, usize, BondInfo)] {
        &self.bonds
    }

    fn bond_between(&self, a: usize, b: usize) -> Option<&BondInfo> {
        if a == b {
            return None;
        }
        let key = if a < b { (a, b) } else { (b, a) };
        self.pair_index.get(&key).map(|&i| &self.bonds[i].2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn methane_h() -> InMemoryMol {
        // [CH3:1][H:2]
        let mut mol = InMemoryMol::new();
        mol.add_atom(AtomInfo::new(6, 1).with_total_hs(3));
        mol.add_atom(AtomInfo::new(1, 2));
        mol.add_single_bond(0, 1);
        mol
    }

    #[test]
    fn test_add_and_count() {
        let mol = methane_h();
        assert_eq!(mol.num_atoms(), 2);
        assert_eq!(mol.num_bonds(), 1);
        assert_eq!(mol.atom(0).atomic_num, 6);
        assert_eq!(mol.atom(1).map_number, 2);
    }

    #[test]
    fn test_bond_lookup_symmetric() {
        let mol = methane_h();
        assert!(mol.bond_between(0, 1).is_some());
        assert!(mol.bond_between(1, 0).is_some());
        assert!(mol.bond_between(0, 0).is_none());
    }

    #[test]
    fn test_bond_lookup_out_of_range() {
        let mol = methane_h();
        assert!(mol.bond_between(0, 7).is_none());
        assert!(mol.bond_between(7, 8).is_none());
    }

    #[test]
    fn test_degree_tracking() {
        let mol = methane_h();
        assert_eq!(mol.atom(0).degree, 1);
        assert_eq!(mol.atom(1).degree, 1);
    }

    #[test]
    fn test_disconnected_atoms() {
        let mut mol = InMemoryMol::new();
        mol.add_atom(AtomInfo::new(6, 1));
        mol.add_atom(AtomInfo::new(8, 2));
        assert_eq!(mol.num_bonds(), 0);
        assert!(mol.bond_between(0, 1).is_none());
    }
}
