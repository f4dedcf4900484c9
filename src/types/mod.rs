//! Core types for the featurization kernel.

pub mod graph;
pub mod mode;

pub use graph::{GraphFingerprint, RxnMolGraph};
pub use mode::{RxnMode, RxnModeError};
