//! Property tests for alignment and featurization invariants.
//!
//! Random molecule pairs (arbitrary atom counts, mapping numbers with
//! collisions, arbitrary bond subsets) must uphold the structural
//! invariants of the produced graphs for every mode.

use proptest::prelude::*;
use std::collections::BTreeSet;

use cgr_kernel::{
    AtomAlignment, AtomInfo, CgrFeaturizer, ElementAtomFeaturizer, InMemoryMol, Molecule,
    OrderBondFeaturizer, RxnMode,
};

/// Random molecule: up to 6 atoms with colliding mapping numbers, and an
/// arbitrary subset of atom pairs bonded.
fn arb_mol() -> impl Strategy<Value = InMemoryMol> {
    prop::collection::vec((1u8..=20, 0u32..=4), 0..=6)
        .prop_flat_map(|atoms| {
            let n = atoms.len();
            let pairs: Vec<(usize, usize)> = (0..n)
                .flat_map(|a| ((a + 1)..n).map(move |b| (a, b)))
                .collect();
            let n_pairs = pairs.len();
            (
                Just(atoms),
                Just(pairs),
                prop::collection::vec(any::<bool>(), n_pairs..=n_pairs),
            )
        })
        .prop_map(|(atoms, pairs, mask)| {
            let mut mol = InMemoryMol::new();
            for &(num, mapno) in &atoms {
                mol.add_atom(AtomInfo::new(num, mapno));
            }
            for (&(a, b), keep) in pairs.iter().zip(mask) {
                if keep {
                    mol.add_single_bond(a, b);
                }
            }
            mol
        })
}

fn arb_mode() -> impl Strategy<Value = RxnMode> {
    (0..RxnMode::COUNT).prop_map(|i| RxnMode::ALL[i])
}

fn featurizer(mode: RxnMode) -> CgrFeaturizer<ElementAtomFeaturizer, OrderBondFeaturizer> {
    CgrFeaturizer::new(
        mode,
        ElementAtomFeaturizer::new(20),
        OrderBondFeaturizer::new(),
    )
}

proptest! {
    /// The three alignment partitions cover every atom exactly once:
    /// matched + product-only + reactant-only = |R| + |P| − matched.
    #[test]
    fn prop_alignment_partition_coverage(reac in arb_mol(), prod in arb_mol()) {
        let align = AtomAlignment::align(&reac, &prod);

        prop_assert_eq!(
            align.num_nodes(),
            reac.num_atoms() + prod.num_atoms() - align.num_matched()
        );

        // Reactant indices: matched keys and reactant-only are disjoint
        // and together cover 0..num_atoms.
        let mut reac_seen: BTreeSet<usize> = align.reac_to_prod.keys().copied().collect();
        for &ri in &align.reactant_only {
            prop_assert!(reac_seen.insert(ri), "reactant index {} double-counted", ri);
        }
        prop_assert_eq!(reac_seen.len(), reac.num_atoms());

        // Product indices: matched values and product-only are disjoint
        // and together cover 0..num_atoms.
        let mut prod_seen: BTreeSet<usize> = align.reac_to_prod.values().copied().collect();
        prop_assert_eq!(prod_seen.len(), align.num_matched());
        for &pi in &align.product_only {
            prop_assert!(prod_seen.insert(pi), "product index {} double-counted", pi);
        }
        prop_assert_eq!(prod_seen.len(), prod.num_atoms());
    }

    /// Node and edge matrices have the mode-independent widths 2d and 2e,
    /// and the node row count equals the unified atom count.
    #[test]
    fn prop_graph_shapes(reac in arb_mol(), prod in arb_mol(), mode in arb_mode()) {
        let f = featurizer(mode);
        let align = AtomAlignment::align(&reac, &prod);
        let graph = f.featurize(&reac, &prod);

        prop_assert_eq!(graph.n_atoms(), align.num_nodes());
        prop_assert_eq!(graph.node_features().nrows(), graph.n_atoms());
        prop_assert_eq!(graph.node_features().ncols(), f.atom_fdim());
        prop_assert_eq!(graph.edge_features().nrows(), graph.n_bonds());
        prop_assert_eq!(graph.edge_features().ncols(), f.bond_fdim());
        prop_assert_eq!(graph.n_bonds() % 2, 0);
    }

    /// Half-edge pairing: `b2revb` is an involution pairing consecutive
    /// indices, and forward/reverse rows carry identical features.
    #[test]
    fn prop_half_edge_pairing(reac in arb_mol(), prod in arb_mol(), mode in arb_mode()) {
        let graph = featurizer(mode).featurize(&reac, &prod);

        for e in 0..graph.n_bonds() {
            prop_assert_eq!(graph.b2revb()[e], e ^ 1);
            prop_assert_eq!(graph.b2revb()[graph.b2revb()[e]], e);
            prop_assert_eq!(
                graph.edge_features().row(e),
                graph.edge_features().row(e ^ 1)
            );
        }

        // Kept pairs appear in ascending scan order.
        for k in 0..graph.n_bonds() / 2 {
            prop_assert!(graph.b2a()[2 * k] < graph.b2a()[2 * k + 1]);
        }
    }

    /// `a2b` regrouped from `(b2a, b2revb)` equals the stored `a2b`.
    #[test]
    fn prop_a2b_reconstruction(reac in arb_mol(), prod in arb_mol(), mode in arb_mode()) {
        let graph = featurizer(mode).featurize(&reac, &prod);

        let mut rebuilt: Vec<Vec<usize>> = vec![Vec::new(); graph.n_atoms()];
        for (&src, &rev) in graph.b2a().iter().zip(graph.b2revb()) {
            rebuilt[src].push(rev);
        }
        prop_assert_eq!(graph.a2b(), &rebuilt[..]);
    }

    /// Featurizing twice yields bit-identical graphs and fingerprints.
    #[test]
    fn prop_idempotent(reac in arb_mol(), prod in arb_mol(), mode in arb_mode()) {
        let f = featurizer(mode);
        let g1 = f.featurize(&reac, &prod);
        let g2 = f.featurize(&reac, &prod);
        prop_assert_eq!(&g1, &g2);
        prop_assert_eq!(g1.fingerprint(), g2.fingerprint());
    }

    /// Mode lookup is total over any casing of the canonical names.
    #[test]
    fn prop_mode_lookup_case_insensitive(mode in arb_mode(), flips in prop::collection::vec(any::<bool>(), 20)) {
        let mixed: String = mode
            .name()
            .chars()
            .zip(flips.iter().cycle())
            .map(|(c, &flip)| {
                if flip {
                    c.to_ascii_lowercase()
                } else {
                    c.to_ascii_uppercase()
                }
            })
            .collect();
        prop_assert_eq!(RxnMode::get(&mixed).unwrap(), mode);
    }
}
