//! Featurized reaction graph types.
//!
//! ## Production Invariants
//!
//! 1. **Row ordering**: node row `i` is unified atom `i` (reactant atoms in
//!    reactant order, then product-only atoms); bond indices depend on it
//! 2. **Half-edge pairing**: half-edges come in consecutive reverse pairs,
//!    `reverse_of(i) = i ^ 1`, and `b2revb[b2revb[i]] == i`
//! 3. **Adjacency consistency**: `a2b` regrouped from `(b2a, b2revb)` by
//!    atom equals the stored `a2b`
//! 4. **Immutability**: a graph is never modified after construction

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::canonical::{canonical_hash_hex, quantize_float};

/// Fingerprint of a featurized graph for provenance tracking.
///
/// Content-derived hash that is identical for bit-identical feature
/// matrices and bookkeeping arrays, and different otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphFingerprint(String);

impl GraphFingerprint {
    /// Create a fingerprint from a hash string.
    pub fn new(hash: String) -> Self {
        Self(hash)
    }

    /// Get the fingerprint as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GraphFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Quantized view of a graph for deterministic hashing.
///
/// All floats are quantized to i64 to ensure cross-platform consistency.
#[derive(Serialize)]
struct QuantizedGraph<'a> {
    n_atoms: usize,
    n_bonds: usize,
    node_features: Vec<i64>,
    edge_features: Vec<i64>,
    b2a: &'a [usize],
    b2revb: &'a [usize],
    schema_version: &'static str,
}

/// Featurized condensed graph of a reaction.
///
/// Packages the node feature matrix, the directed half-edge feature matrix,
/// and the adjacency bookkeeping a message-passing network consumes:
///
/// - `b2a[e]` — the atom half-edge `e` leaves from (its reverse partner
///   carries the destination)
/// - `b2revb[e]` — the paired reverse half-edge of `e`
/// - `a2b[a]` — half-edges incoming to atom `a`, in creation order
///
/// Constructed by the featurizer; immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RxnMolGraph {
    n_atoms: usize,
    n_bonds: usize,
    node_features: Array2<f32>,
    edge_features: Array2<f32>,
    b2a: Vec<usize>,
    b2revb: Vec<usize>,
    a2b: Vec<Vec<usize>>,
}

impl RxnMolGraph {
    /// Package a featurized graph.
    ///
    /// Debug builds check the pairing and adjacency invariants; the
    /// featurizer is the only constructor in practice and upholds them by
    /// construction.
    pub(crate) fn new(
        node_features: Array2<f32>,
        edge_features: Array2<f32>,
        b2a: Vec<usize>,
        b2revb: Vec<usize>,
        a2b: Vec<Vec<usize>>,
    ) -> Self {
        let n_atoms = node_features.nrows();
        let n_bonds = edge_features.nrows();

        debug_assert_eq!(b2a.len(), n_bonds);
        debug_assert_eq!(b2revb.len(), n_bonds);
        debug_assert_eq!(a2b.len(), n_atoms);
        debug_assert!(n_bonds % 2 == 0, "half-edges must come in reverse pairs");
        debug_assert!((0..n_bonds).all(|i| b2revb[b2revb[i]] == i));

        Self {
            n_atoms,
            n_bonds,
            node_features,
            edge_features,
            b2a,
            b2revb,
            a2b,
        }
    }

    /// Number of atoms (nodes).
    pub fn n_atoms(&self) -> usize {
        self.n_atoms
    }

    /// Number of half-edges. Always even.
    pub fn n_bonds(&self) -> usize {
        self.n_bonds
    }

    /// Node feature matrix, shape `(n_atoms, atom_fdim)`.
    pub fn node_features(&self) -> &Array2<f32> {
        &self.node_features
    }

    /// Half-edge feature matrix, shape `(n_bonds, bond_fdim)`.
    pub fn edge_features(&self) -> &Array2<f32> {
        &self.edge_features
    }

    /// Source atom per half-edge.
    pub fn b2a(&self) -> &[usize] {
        &self.b2a
    }

    /// Paired reverse half-edge per half-edge.
    pub fn b2revb(&self) -> &[usize] {
        &self.b2revb
    }

    /// Incoming half-edges per atom, in creation order.
    pub fn a2b(&self) -> &[Vec<usize>] {
        &self.a2b
    }

    /// Content-derived fingerprint of this graph.
    ///
    /// Feature values are quantized (1e6) before hashing, so two graphs
    /// fingerprint equal exactly when their arrays are bit-identical at
    /// that resolution. Computed on demand; the graph stores no state.
    pub fn fingerprint(&self) -> GraphFingerprint {
        let quantized = QuantizedGraph {
            n_atoms: self.n_atoms,
            n_bonds: self.n_bonds,
            node_features: self.node_features.iter().map(|&x| quantize_float(x)).collect(),
            edge_features: self.edge_features.iter().map(|&x| quantize_float(x)).collect(),
            b2a: &self.b2a,
            b2revb: &self.b2revb,
            schema_version: crate::CGR_SCHEMA_VERSION,
        };
        GraphFingerprint::new(canonical_hash_hex(&quantized))
    }
}
