//! Condensed-graph-of-reaction featurizer.
//!
//! The featurizer turns a (reactant, product) molecule pair into a single
//! unified graph whose node and edge features encode what changed between
//! the two sides, ready for a message-passing neural network.
//!
//! ## Algorithm
//!
//! 1. Align atoms across the two sides by atom-mapping number
//! 2. Assemble node features: reactant atoms in reactant order, then
//!    product-only atoms; the missing side of an unmatched atom mirrors the
//!    present side, so difference modes see a zero delta
//! 3. For every unordered atom pair, resolve the reactant-side and
//!    product-side bonds; a pair bonded on neither side is skipped
//! 4. Emit two half-edges per kept pair, at consecutive indices, with
//!    identical feature vectors and reverse bookkeeping
//!
//! ## Determinism Guarantees
//!
//! - Same molecule pair + same mode + same featurizers → bit-identical
//!   output arrays and an identical graph fingerprint
//! - Node row ordering and half-edge ordering are canonical

use ndarray::Array2;

use crate::align::AtomAlignment;
use crate::featurize::{AtomFeaturizer, BondFeaturizer, ElementAtomFeaturizer, OrderBondFeaturizer};
use crate::molecule::{BondInfo, Molecule};
use crate::types::{RxnMode, RxnModeError, RxnMolGraph};

/// Condensed-graph-of-reaction featurizer.
///
/// Pairs a [`RxnMode`] with atom and bond featurizers. All featurization is
/// a pure function of the inputs: no caching, no shared state, safe to use
/// from many threads at once over distinct reactions.
#[derive(Debug, Clone)]
pub struct CgrFeaturizer<A, B> {
    mode: RxnMode,
    atom_featurizer: A,
    bond_featurizer: B,
}

impl Default for CgrFeaturizer<ElementAtomFeaturizer, OrderBondFeaturizer> {
    /// The default featurizer uses `reac_diff` mode with the default
    /// element and bond-order encoders.
    fn default() -> Self {
        Self::new(
            RxnMode::default(),
            ElementAtomFeaturizer::default(),
            OrderBondFeaturizer::default(),
        )
    }
}

impl<A: AtomFeaturizer, B: BondFeaturizer> CgrFeaturizer<A, B> {
    /// Create a featurizer for a mode.
    pub fn new(mode: RxnMode, atom_featurizer: A, bond_featurizer: B) -> Self {
        Self {
            mode,
            atom_featurizer,
            bond_featurizer,
        }
    }

    /// Create a featurizer from a mode identifier string.
    ///
    /// The identifier is matched case-insensitively against the canonical
    /// mode names; an unrecognized identifier fails with
    /// [`RxnModeError::InvalidMode`] and nothing is constructed.
    pub fn with_mode_name(
        name: &str,
        atom_featurizer: A,
        bond_featurizer: B,
    ) -> Result<Self, RxnModeError> {
        Ok(Self::new(RxnMode::get(name)?, atom_featurizer, bond_featurizer))
    }

    /// The encoding mode.
    pub fn mode(&self) -> RxnMode {
        self.mode
    }

    /// The atom featurizer.
    pub fn atom_featurizer(&self) -> &A {
        &self.atom_featurizer
    }

    /// The bond featurizer.
    pub fn bond_featurizer(&self) -> &B {
        &self.bond_featurizer
    }

    /// Node feature width: twice the atom featurizer dimension, for every
    /// mode (difference modes emit the unchanged base plus a delta block).
    pub fn atom_fdim(&self) -> usize {
        2 * self.atom_featurizer.dim()
    }

    /// Edge feature width: twice the bond featurizer dimension.
    pub fn bond_fdim(&self) -> usize {
        2 * self.bond_featurizer.dim()
    }

    /// Featurize one reaction into an immutable graph.
    ///
    /// Total over well-formed molecules: zero matched atoms, fully
    /// disjoint atom sets, and bondless molecules all produce ordinary
    /// graphs, never errors.
    pub fn featurize<R: Molecule, P: Molecule>(&self, reactant: &R, product: &P) -> RxnMolGraph {
        let align = AtomAlignment::align(reactant, product);
        let n_reac = reactant.num_atoms();
        let n_atoms = n_reac + align.product_only.len();

        tracing::debug!(
            mode = %self.mode,
            n_atoms,
            matched = align.num_matched(),
            product_only = align.product_only.len(),
            reactant_only = align.reactant_only.len(),
            "featurizing reaction"
        );

        let node_features = self.node_feature_matrix(reactant, product, &align);

        let mut edge_rows: Vec<f32> = Vec::new();
        let mut b2a: Vec<usize> = Vec::new();
        let mut b2revb: Vec<usize> = Vec::new();
        let mut a2b: Vec<Vec<usize>> = vec![Vec::new(); n_atoms];

        for a in 0..n_atoms {
            for b in (a + 1)..n_atoms {
                let (reac_bond, prod_bond) = self.resolve_bonds(reactant, product, &align, a, b);
                if reac_bond.is_none() && prod_bond.is_none() {
                    continue;
                }

                let feature = self.edge_feature(reac_bond, prod_bond);
                let b1 = b2a.len();
                let b2 = b1 + 1;

                // Forward and reverse half-edges carry identical features;
                // direction exists only for message-passing bookkeeping.
                edge_rows.extend_from_slice(&feature);
                edge_rows.extend_from_slice(&feature);

                b2a.push(a);
                a2b[b].push(b1);
                b2a.push(b);
                a2b[a].push(b2);
                b2revb.push(b2);
                b2revb.push(b1);
            }
        }

        let n_bonds = b2a.len();
        let edge_features = Array2::from_shape_vec((n_bonds, self.bond_fdim()), edge_rows)
            .expect("edge rows match half-edge count and bond width");

        RxnMolGraph::new(node_features, edge_features, b2a, b2revb, a2b)
    }

    /// Assemble the node feature matrix.
    ///
    /// Rows `0..n_reac` are reactant atoms in reactant order (matched and
    /// reactant-only alike); the remaining rows are product-only atoms in
    /// product order. The unmatched side mirrors the present side's
    /// features, never a featurization of a nonexistent atom.
    fn node_feature_matrix<R: Molecule, P: Molecule>(
        &self,
        reactant: &R,
        product: &P,
        align: &AtomAlignment,
    ) -> Array2<f32> {
        let n_reac = reactant.num_atoms();
        let n_rows = n_reac + align.product_only.len();
        let width = self.atom_fdim();

        let mut rows: Vec<f32> = Vec::with_capacity(n_rows * width);

        for ri in 0..n_reac {
            let x_r = self.atom_featurizer.featurize(reactant.atom(ri));
            let x_p = match align.reac_to_prod.get(&ri) {
                Some(&pi) => self.atom_featurizer.featurize(product.atom(pi)),
                // Vanished atom: the product side mirrors the reactant side.
                None => x_r.clone(),
            };
            rows.extend(self.combine(&x_r, &x_p));
        }

        for &pi in &align.product_only {
            // Newly formed atom: the reactant side mirrors the product side.
            let x_p = self.atom_featurizer.featurize(product.atom(pi));
            rows.extend(self.combine(&x_p, &x_p));
        }

        Array2::from_shape_vec((n_rows, width), rows)
            .expect("node rows match unified atom count and atom width")
    }

    /// Resolve the reactant-side and product-side bonds for a pair of
    /// unified atom indices.
    ///
    /// Indices below the reactant atom count are reactant-space (matched or
    /// reactant-only); the rest address product-only atoms. A side on which
    /// either endpoint has no index resolves to no bond, never an error.
    /// Balanced modes mirror the present side's bond when *both* endpoints
    /// are absent from the other side.
    fn resolve_bonds<'m, R: Molecule, P: Molecule>(
        &self,
        reactant: &'m R,
        product: &'m P,
        align: &AtomAlignment,
        a: usize,
        b: usize,
    ) -> (Option<&'m BondInfo>, Option<&'m BondInfo>) {
        let n_reac = reactant.num_atoms();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let balanced = self.mode.balanced();

        if lo >= n_reac {
            // Both atoms only in the product.
            let prod_bond = product.bond_between(
                align.product_only[lo - n_reac],
                align.product_only[hi - n_reac],
            );
            let reac_bond = if balanced { prod_bond } else { None };
            (reac_bond, prod_bond)
        } else if hi >= n_reac {
            // One reactant-space atom, one product-only atom.
            let prod_bond = match align.reac_to_prod.get(&lo) {
                Some(&pj) => product.bond_between(pj, align.product_only[hi - n_reac]),
                // Reactant-only endpoint: the two atoms share no side.
                None => None,
            };
            (None, prod_bond)
        } else {
            // Both atoms in reactant space.
            let reac_bond = reactant.bond_between(lo, hi);
            let prod_bond = match (align.reac_to_prod.get(&lo), align.reac_to_prod.get(&hi)) {
                (Some(&pa), Some(&pb)) => product.bond_between(pa, pb),
                (None, None) if balanced => reac_bond,
                _ => None,
            };
            (reac_bond, prod_bond)
        }
    }

    /// Feature vector for one physical bond, from its two sides.
    fn edge_feature(
        &self,
        reac_bond: Option<&BondInfo>,
        prod_bond: Option<&BondInfo>,
    ) -> Vec<f32> {
        let g_r = self.bond_featurizer.featurize(reac_bond);
        let g_p = self.bond_featurizer.featurize(prod_bond);
        self.combine(&g_r, &g_p)
    }

    /// Combine reactant-side and product-side vectors per the mode.
    ///
    /// REAC_PROD: `r ++ p`. REAC_DIFF: `r ++ (p − r)`.
    /// PROD_DIFF: `p ++ (p − r)`. Balance never changes combination.
    fn combine(&self, reac: &[f32], prod: &[f32]) -> Vec<f32> {
        debug_assert_eq!(reac.len(), prod.len());
        let mut out = Vec::with_capacity(reac.len() * 2);

        if self.mode.product_based() {
            out.extend_from_slice(prod);
        } else {
            out.extend_from_slice(reac);
        }

        if self.mode.uses_diff() {
            out.extend(prod.iter().zip(reac).map(|(p, r)| p - r));
        } else {
            out.extend_from_slice(prod);
        }

        out
    }
}
