//! Structural identity for criteria and operand trees.
//!
//! Both encoders walk the same tagged, length-prefixed byte stream, so two
//! structurally equal trees always produce the same fingerprint and the same
//! structural hash.

mod hash_parts;

use crate::{
    chain::{NameValue, OrderBy},
    criteria::CriteriaExpression,
    operation::OperationExpression,
};
use hash_parts::{HashStream, hash_criteria, hash_name_value, hash_operation, hash_order_by};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use xxhash_rust::xxh3::Xxh3;

/// Seed for structural hashes; part of the cache-key contract.
pub const STRUCTURAL_HASH_SEED: u64 = 0;

///
/// CriteriaFingerprint
///
/// Stable SHA-256 fingerprint of one tree. Suitable as a cache key across
/// processes: it depends only on tree structure, never on addresses.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct CriteriaFingerprint([u8; 32]);

impl CriteriaFingerprint {
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    #[must_use]
    pub fn as_hex(&self) -> String {
        let mut out = String::with_capacity(64);
        for byte in self.0 {
            use std::fmt::Write as _;
            let _ = write!(out, "{byte:02x}");
        }
        out
    }
}

impl fmt::Display for CriteriaFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_hex())
    }
}

fn fingerprint_with(domain: &[u8], encode: impl FnOnce(&mut Sha256)) -> CriteriaFingerprint {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    encode(&mut hasher);

    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);

    CriteriaFingerprint(out)
}

fn structural_with(domain: &[u8], encode: impl FnOnce(&mut Xxh3)) -> u64 {
    let mut hasher = Xxh3::with_seed(STRUCTURAL_HASH_SEED);
    hasher.feed(domain);
    encode(&mut hasher);

    hasher.digest()
}

impl CriteriaExpression {
    /// Stable fingerprint of this predicate tree.
    #[must_use]
    pub fn fingerprint(&self) -> CriteriaFingerprint {
        fingerprint_with(b"criteria:v1", |h| hash_criteria(h, self))
    }

    /// Order-sensitive 64-bit structural hash.
    #[must_use]
    pub fn structural_hash(&self) -> u64 {
        structural_with(b"criteria:v1", |h| hash_criteria(h, self))
    }
}

impl OperationExpression {
    #[must_use]
    pub fn fingerprint(&self) -> CriteriaFingerprint {
        fingerprint_with(b"operation:v1", |h| hash_operation(h, self))
    }

    #[must_use]
    pub fn structural_hash(&self) -> u64 {
        structural_with(b"operation:v1", |h| hash_operation(h, self))
    }
}

impl NameValue {
    #[must_use]
    pub fn fingerprint(&self) -> CriteriaFingerprint {
        fingerprint_with(b"name_value:v1", |h| hash_name_value(h, self))
    }
}

impl OrderBy {
    #[must_use]
    pub fn fingerprint(&self) -> CriteriaFingerprint {
        fingerprint_with(b"order_by:v1", |h| hash_order_by(h, self))
    }
}

///
/// TESTS
///
