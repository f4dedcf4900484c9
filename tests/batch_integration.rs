//! Integration tests for batch featurization: Reproducible batch graphs.
//!
//! These tests validate the end-to-end batch pipeline:
//! 1. Per-reaction featurization in input order
//! 2. Registry fingerprints
//! 3. Batch graph concatenation with shifted indices
//! 4. Scope bookkeeping

use cgr_kernel::{
    AtomInfo, BatchFeaturizer, BatchRxnGraph, BondInfo, BondOrder, CgrFeaturizer,
    ElementAtomFeaturizer, InMemoryMol, OrderBondFeaturizer, RxnMode,
};

// ─────────────────────────────────────────────────────────────────────────────
// Test Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Linear alkane-like chain of `n` mapped carbons.
fn chain(n: usize) -> InMemoryMol {
    let mut mol = InMemoryMol::new();
    for i in 0..n {
        mol.add_atom(AtomInfo::new(6, (i + 1) as u32).with_total_hs(2).with_mass(12.011));
    }
    for i in 1..n {
        mol.add_bond(i - 1, i, BondInfo::new(BondOrder::Single));
    }
    mol
}

/// Same chain with its last bond broken: a bond-scission reaction.
fn broken_chain(n: usize) -> InMemoryMol {
    let mut mol = InMemoryMol::new();
    for i in 0..n {
        mol.add_atom(AtomInfo::new(6, (i + 1) as u32).with_total_hs(2).with_mass(12.011));
    }
    for i in 1..n.saturating_sub(1) {
        mol.add_bond(i - 1, i, BondInfo::new(BondOrder::Single));
    }
    mol
}

fn scission_batch(sizes: &[usize]) -> Vec<(InMemoryMol, InMemoryMol)> {
    sizes.iter().map(|&n| (chain(n), broken_chain(n))).collect()
}

fn make_batch_featurizer(
    mode: RxnMode,
) -> BatchFeaturizer<ElementAtomFeaturizer, OrderBondFeaturizer> {
    BatchFeaturizer::new(CgrFeaturizer::new(
        mode,
        ElementAtomFeaturizer::default(),
        OrderBondFeaturizer::new(),
    ))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("cgr_kernel=debug")
        .with_test_writer()
        .try_init();
}

// ─────────────────────────────────────────────────────────────────────────────
// Batch Pipeline Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_batch_end_to_end() {
    init_tracing();

    let reactions = scission_batch(&[2, 3, 4, 5]);
    let driver = make_batch_featurizer(RxnMode::ReacDiff);
    let result = driver.featurize_all(&reactions);

    assert_eq!(result.graphs.len(), 4);
    for (i, graph) in result.graphs.iter().enumerate() {
        let n = i + 2;
        assert_eq!(graph.n_atoms(), n, "chain of {n} atoms");
        // Every chain bond survives as a kept pair, broken or not.
        assert_eq!(graph.n_bonds(), 2 * (n - 1), "chain of {n} atoms");
    }

    let batch = BatchRxnGraph::from_graphs(&result.graphs);
    assert_eq!(batch.n_graphs(), 4);
    assert_eq!(batch.n_atoms(), 2 + 3 + 4 + 5);
    assert_eq!(batch.n_bonds(), 2 * (1 + 2 + 3 + 4));
}

#[test]
fn test_batch_scopes_partition_the_index_spaces() {
    let reactions = scission_batch(&[2, 4, 3]);
    let result = make_batch_featurizer(RxnMode::ReacProd).featurize_all(&reactions);
    let batch = BatchRxnGraph::from_graphs(&result.graphs);

    // Scopes tile the atom space with no gaps or overlaps.
    let mut next_atom = 0;
    for &(offset, len) in batch.a_scope() {
        assert_eq!(offset, next_atom);
        next_atom += len;
    }
    assert_eq!(next_atom, batch.n_atoms());

    let mut next_bond = 0;
    for &(offset, len) in batch.b_scope() {
        assert_eq!(offset, next_bond);
        next_bond += len;
    }
    assert_eq!(next_bond, batch.n_bonds());
}

#[test]
fn test_batch_indices_stay_in_scope() {
    let reactions = scission_batch(&[3, 3, 3]);
    let result = make_batch_featurizer(RxnMode::ReacDiffBalance).featurize_all(&reactions);
    let batch = BatchRxnGraph::from_graphs(&result.graphs);

    for (g, (&(a_off, a_len), &(b_off, b_len))) in
        batch.a_scope().iter().zip(batch.b_scope()).enumerate()
    {
        for e in b_off..b_off + b_len {
            let src = batch.b2a()[e];
            assert!(
                src >= a_off && src < a_off + a_len,
                "graph {g}: half-edge {e} escapes its atom scope"
            );
            let rev = batch.b2revb()[e];
            assert!(
                rev >= b_off && rev < b_off + b_len,
                "graph {g}: reverse of {e} escapes its half-edge scope"
            );
        }
    }

    // Reverse pairing holds across the whole batch.
    for e in 0..batch.n_bonds() {
        assert_eq!(batch.b2revb()[batch.b2revb()[e]], e);
    }
}

#[test]
fn test_batch_reproducible_across_runs() {
    let reactions = scission_batch(&[2, 3, 4]);

    let r1 = make_batch_featurizer(RxnMode::ProdDiff).featurize_all(&reactions);
    let r2 = make_batch_featurizer(RxnMode::ProdDiff).featurize_all(&reactions);

    assert_eq!(r1.registry.registry_hash, r2.registry.registry_hash);
    assert_eq!(
        BatchRxnGraph::from_graphs(&r1.graphs),
        BatchRxnGraph::from_graphs(&r2.graphs)
    );
}

#[test]
fn test_batch_registry_lookup() {
    let reactions = scission_batch(&[2, 3]);
    let result = make_batch_featurizer(RxnMode::ReacDiff).featurize_all(&reactions);

    let entry = result.registry.get(1).expect("entry for index 1");
    assert_eq!(entry.n_atoms, 3);
    assert!(result.registry.get(7).is_none());

    // Different chain lengths produce different fingerprints.
    assert_ne!(
        result.registry.entries[0].fingerprint,
        result.registry.entries[1].fingerprint
    );
}

#[test]
fn test_single_reaction_batch_matches_direct_featurization() {
    let reactions = scission_batch(&[4]);
    let driver = make_batch_featurizer(RxnMode::ReacDiff);
    let result = driver.featurize_all(&reactions);

    let direct = driver.featurizer().featurize(&reactions[0].0, &reactions[0].1);
    assert_eq!(result.graphs[0], direct);

    let batch = BatchRxnGraph::from_graphs(&result.graphs);
    assert_eq!(batch.n_atoms(), direct.n_atoms());
    assert_eq!(batch.n_bonds(), direct.n_bonds());
    assert_eq!(batch.b2a(), direct.b2a());
    assert_eq!(batch.b2revb(), direct.b2revb());
}
