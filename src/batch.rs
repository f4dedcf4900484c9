//! Batch featurization and batch graph assembly.
//!
//! Featurizing a dataset produces one graph per reaction, in input order,
//! plus a registry of per-graph fingerprints. The graphs can then be
//! concatenated into a single [`BatchRxnGraph`] whose atom and half-edge
//! indices are shifted so a trainer can message-pass over the whole batch
//! at once.
//!
//! Featurization of distinct reactions shares no state; a caller may fan
//! the reactions out across threads and concatenate the results in input
//! order without changing the output.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::canonical::canonical_hash_hex;
use crate::cgr::CgrFeaturizer;
use crate::featurize::{AtomFeaturizer, BondFeaturizer};
use crate::molecule::Molecule;
use crate::types::RxnMolGraph;

/// Metadata for a single graph in a batch registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphRegistryEntry {
    /// Position of the reaction in the input batch.
    pub index: usize,
    /// Content fingerprint of the produced graph.
    pub fingerprint: String,
    /// Number of atoms in the graph.
    pub n_atoms: usize,
    /// Number of half-edges in the graph.
    pub n_bonds: usize,
}

/// Registry of all graphs produced by a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphRegistry {
    /// Per-graph entries, in input order.
    pub entries: Vec<GraphRegistryEntry>,
    /// Hash of the registry for integrity comparison across runs.
    pub registry_hash: String,
}

impl GraphRegistry {
    /// Create a registry from entries.
    pub fn new(entries: Vec<GraphRegistryEntry>) -> Self {
        let registry_hash = canonical_hash_hex(&entries);
        Self {
            entries,
            registry_hash,
        }
    }

    /// Get an entry by batch index.
    pub fn get(&self, index: usize) -> Option<&GraphRegistryEntry> {
        self.entries.iter().find(|e| e.index == index)
    }
}

/// Result of featurizing a batch of reactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    /// One graph per reaction, in input order.
    pub graphs: Vec<RxnMolGraph>,
    /// Registry of graph fingerprints.
    pub registry: GraphRegistry,
}

/// Batch driver around a [`CgrFeaturizer`].
pub struct BatchFeaturizer<A, B> {
    featurizer: CgrFeaturizer<A, B>,
}

impl<A: AtomFeaturizer, B: BondFeaturizer> BatchFeaturizer<A, B> {
    /// Create a batch driver.
    pub fn new(featurizer: CgrFeaturizer<A, B>) -> Self {
        Self { featurizer }
    }

    /// Featurize all reactions, in input order.
    pub fn featurize_all<R: Molecule, P: Molecule>(&self, reactions: &[(R, P)]) -> BatchResult {
        let mut graphs = Vec::with_capacity(reactions.len());
        let mut entries = Vec::with_capacity(reactions.len());

        for (index, (reactant, product)) in reactions.iter().enumerate() {
            let graph = self.featurizer.featurize(reactant, product);

            entries.push(GraphRegistryEntry {
                index,
                fingerprint: graph.fingerprint().as_str().to_string(),
                n_atoms: graph.n_atoms(),
                n_bonds: graph.n_bonds(),
            });

            graphs.push(graph);
        }

        tracing::debug!(
            mode = %self.featurizer.mode(),
            count = graphs.len(),
            "featurized reaction batch"
        );

        BatchResult {
            graphs,
            registry: GraphRegistry::new(entries),
        }
    }

    /// The wrapped featurizer.
    pub fn featurizer(&self) -> &CgrFeaturizer<A, B> {
        &self.featurizer
    }
}

/// Many reaction graphs concatenated into one.
///
/// Atom indices in `b2a` are shifted by each graph's atom offset, half-edge
/// indices in `b2revb` and `a2b` by its half-edge offset. `a_scope` and
/// `b_scope` record each source graph's `(offset, length)` in the
/// concatenated atom and half-edge spaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRxnGraph {
    n_graphs: usize,
    n_atoms: usize,
    n_bonds: usize,
    node_features: Array2<f32>,
    edge_features: Array2<f32>,
    b2a: Vec<usize>,
    b2revb: Vec<usize>,
    a2b: Vec<Vec<usize>>,
    a_scope: Vec<(usize, usize)>,
    b_scope: Vec<(usize, usize)>,
}

impl BatchRxnGraph {
    /// Concatenate graphs into one batch graph.
    ///
    /// All graphs must come from featurizers with the same feature widths.
    ///
    /// # Panics
    /// Panics if the graphs disagree on node or edge feature width.
    pub fn from_graphs(graphs: &[RxnMolGraph]) -> Self {
        let atom_fdim = graphs.first().map_or(0, |g| g.node_features().ncols());
        let bond_fdim = graphs.first().map_or(0, |g| g.edge_features().ncols());

        let mut n_atoms = 0;
        let mut n_bonds = 0;
        let mut node_rows: Vec<f32> = Vec::new();
        let mut edge_rows: Vec<f32> = Vec::new();
        let mut b2a: Vec<usize> = Vec::new();
        let mut b2revb: Vec<usize> = Vec::new();
        let mut a2b: Vec<Vec<usize>> = Vec::new();
        let mut a_scope = Vec::with_capacity(graphs.len());
        let mut b_scope = Vec::with_capacity(graphs.len());

        for graph in graphs {
            assert_eq!(graph.node_features().ncols(), atom_fdim, "node width mismatch");
            assert_eq!(graph.edge_features().ncols(), bond_fdim, "edge width mismatch");

            a_scope.push((n_atoms, graph.n_atoms()));
            b_scope.push((n_bonds, graph.n_bonds()));

            node_rows.extend(graph.node_features().iter());
            edge_rows.extend(graph.edge_features().iter());
            b2a.extend(graph.b2a().iter().map(|&a| a + n_atoms));
            b2revb.extend(graph.b2revb().iter().map(|&e| e + n_bonds));
            a2b.extend(
                graph
                    .a2b()
                    .iter()
                    .map(|edges| edges.iter().map(|&e| e + n_bonds).collect()),
            );

            n_atoms += graph.n_atoms();
            n_bonds += graph.n_bonds();
        }

        let node_features = Array2::from_shape_vec((n_atoms, atom_fdim), node_rows)
            .expect("node rows match total atom count and width");
        let edge_features = Array2::from_shape_vec((n_bonds, bond_fdim), edge_rows)
            .expect("edge rows match total half-edge count and width");

        Self {
            n_graphs: graphs.len(),
            n_atoms,
            n_bonds,
            node_features,
            edge_features,
            b2a,
            b2revb,
            a2b,
            a_scope,
            b_scope,
        }
    }

    /// Number of source graphs.
    pub fn n_graphs(&self) -> usize {
        self.n_graphs
    }

    /// Total atom count across the batch.
    pub fn n_atoms(&self) -> usize {
        self.n_atoms
    }

    /// Total half-edge count across the batch.
    pub fn n_bonds(&self) -> usize {
        self.n_bonds
    }

    /// Concatenated node feature matrix.
    pub fn node_features(&self) -> &Array2<f32> {
        &self.node_features
    }

    /// Concatenated half-edge feature matrix.
    pub fn edge_features(&self) -> &Array2<f32> {
        &self.edge_features
    }

    /// Shifted source atom per half-edge.
    pub fn b2a(&self) -> &[usize] {
        &self.b2a
    }

    /// Shifted paired reverse half-edge per half-edge.
    pub fn b2revb(&self) -> &[usize] {
        &self.b2revb
    }

    /// Shifted incoming half-edges per atom.
    pub fn a2b(&self) -> &[Vec<usize>] {
        &self.a2b
    }

    /// Per-graph `(offset, length)` in the concatenated atom space.
    pub fn a_scope(&self) -> &[(usize, usize)] {
        &self.a_scope
    }

    /// Per-graph `(offset, length)` in the concatenated half-edge space.
    pub fn b_scope(&self) -> &[(usize, usize)] {
        &self.b_scope
    }
}
