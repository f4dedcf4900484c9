//! Reaction encoding modes.
//!
//! A [`RxnMode`] selects how reactant-side and product-side features are
//! combined into a single condensed-graph-of-reaction encoding. The set is
//! closed: exactly six variants, each with a canonical lowercase string
//! value, grouped by combination strategy (concatenation vs. difference)
//! and balance behavior (strict vs. permissive handling of atom-count
//! mismatches).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error type for reaction-mode lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RxnModeError {
    /// Identifier matched no mode during construction-time lookup.
    #[error("Invalid reaction mode: {0:?}")]
    InvalidMode(String),
    /// Exact-name indexing failed. Narrower than [`RxnModeError::InvalidMode`]:
    /// indexing requires the declared (uppercase) name, not any spelling.
    #[error("Unknown reaction mode key: {0:?}")]
    UnknownKey(String),
}

/// How reactant and product features are combined per atom and per bond.
///
/// Six variants: three base/combination strategies crossed with two balance
/// behaviors. The canonical string value of each variant is its lowercase
/// name (`RxnMode::ReacDiff` ⇔ `"reac_diff"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RxnMode {
    /// Concatenate reactant and product features.
    ReacProd,
    /// Concatenate reactant and product features, balanced.
    ReacProdBalance,
    /// Concatenate reactant features and the product − reactant difference.
    ReacDiff,
    /// Concatenate reactant features and the difference, balanced.
    ReacDiffBalance,
    /// Concatenate product features and the product − reactant difference.
    ProdDiff,
    /// Concatenate product features and the difference, balanced.
    ProdDiffBalance,
}

impl RxnMode {
    /// All modes in declaration order.
    pub const ALL: [RxnMode; 6] = [
        Self::ReacProd,
        Self::ReacProdBalance,
        Self::ReacDiff,
        Self::ReacDiffBalance,
        Self::ProdDiff,
        Self::ProdDiffBalance,
    ];

    /// Number of modes.
    pub const COUNT: usize = Self::ALL.len();

    /// Canonical lowercase string value of this mode.
    pub fn value(&self) -> &'static str {
        match self {
            Self::ReacProd => "reac_prod",
            Self::ReacProdBalance => "reac_prod_balance",
            Self::ReacDiff => "reac_diff",
            Self::ReacDiffBalance => "reac_diff_balance",
            Self::ProdDiff => "prod_diff",
            Self::ProdDiffBalance => "prod_diff_balance",
        }
    }

    /// Declared (uppercase) name of this mode.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ReacProd => "REAC_PROD",
            Self::ReacProdBalance => "REAC_PROD_BALANCE",
            Self::ReacDiff => "REAC_DIFF",
            Self::ReacDiffBalance => "REAC_DIFF_BALANCE",
            Self::ProdDiff => "PROD_DIFF",
            Self::ProdDiffBalance => "PROD_DIFF_BALANCE",
        }
    }

    /// Look up a mode by identifier, case-insensitively.
    ///
    /// Accepts any casing of the canonical name (`"reac_diff"`,
    /// `"REAC_DIFF"`, `"Reac_Diff"`). Fails with
    /// [`RxnModeError::InvalidMode`] for anything else. This is the
    /// construction-time lookup: eager and total over the closed set.
    pub fn get(identifier: &str) -> Result<Self, RxnModeError> {
        let lowered = identifier.to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.value() == lowered)
            .ok_or_else(|| RxnModeError::InvalidMode(identifier.to_string()))
    }

    /// Index a mode by its declared name, exactly.
    ///
    /// Unlike [`RxnMode::get`], this requires the uppercase declared name
    /// and fails with the narrower [`RxnModeError::UnknownKey`].
    pub fn by_name(name: &str) -> Result<Self, RxnModeError> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.name() == name)
            .ok_or_else(|| RxnModeError::UnknownKey(name.to_string()))
    }

    /// Canonical lowercase identifiers of all modes, in declaration order.
    pub fn keys() -> [&'static str; 6] {
        [
            Self::ReacProd.value(),
            Self::ReacProdBalance.value(),
            Self::ReacDiff.value(),
            Self::ReacDiffBalance.value(),
            Self::ProdDiff.value(),
            Self::ProdDiffBalance.value(),
        ]
    }

    /// Iterate modes in declaration order.
    pub fn iter() -> impl Iterator<Item = RxnMode> {
        Self::ALL.iter().copied()
    }

    /// Whether this mode tolerates atom-count imbalance by mirroring the
    /// present side when both endpoints of a pair are absent from the other.
    pub fn balanced(&self) -> bool {
        matches!(
            self,
            Self::ReacProdBalance | Self::ReacDiffBalance | Self::ProdDiffBalance
        )
    }

    /// Whether this mode combines by subtraction (delta encoding) rather
    /// than by raw concatenation of both sides.
    pub fn uses_diff(&self) -> bool {
        matches!(
            self,
            Self::ReacDiff | Self::ReacDiffBalance | Self::ProdDiff | Self::ProdDiffBalance
        )
    }

    /// Whether the first half of a combined feature vector comes from the
    /// product side (PROD_DIFF family) rather than the reactant side.
    pub fn product_based(&self) -> bool {
        matches!(self, Self::ProdDiff | Self::ProdDiffBalance)
    }
}

impl Default for RxnMode {
    fn default() -> Self {
        Self::ReacDiff
    }
}

impl fmt::Display for RxnMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl std::str::FromStr for RxnMode {
    type Err = RxnModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::get(s)
    }
}
