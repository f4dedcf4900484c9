//! Canonical serialization for deterministic fingerprinting.
//!
//! This module provides functions to serialize data in a canonical,
//! deterministic format suitable for hashing and replay comparison of
//! featurized graphs.
//!
//! ## Determinism Guarantees
//!
//! - Stable field order: Struct fields serialize in declaration order
//! - Stable Vec order: Vectors serialize in index order
//! - No HashMap allowed: Use BTreeMap for maps in hashed data
//! - Floats are quantized to integers before hashing
//!
//! ## Float Normalization
//!
//! Feature values are quantized to integers before hashing to avoid
//! cross-platform float serialization differences. The quantization factor
//! is 1e6 (multiply by 1,000,000 and round to i64).

use serde::Serialize;
use xxhash_rust::xxh64::xxh64;

/// Quantization factor for float normalization.
/// Floats are multiplied by this value and rounded to i64.
const FLOAT_QUANTIZATION_FACTOR: f64 = 1_000_000.0;

/// Quantize a float to an i64 for deterministic hashing.
pub fn quantize_float(value: f32) -> i64 {
    ((value as f64) * FLOAT_QUANTIZATION_FACTOR).round() as i64
}

/// Serialize a value to canonical JSON bytes for hashing.
///
/// This function produces deterministic output for the same input,
/// suitable for hash computation and replay comparison.
pub fn to_canonical_bytes<T: Serialize>(value: &T) -> Vec<u8> {
    serde_json::to_vec(value).expect("Canonical serialization failed")
}

/// Compute canonical hash of a serializable value.
pub fn canonical_hash<T: Serialize>(value: &T) -> u64 {
    let bytes = to_canonical_bytes(value);
    xxh64(&bytes, 0)
}

/// Compute canonical hash and return as hex string.
pub fn canonical_hash_hex<T: Serialize>(value: &T) -> String {
    format!("{:016x}", canonical_hash(value))
}
