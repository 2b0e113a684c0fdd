//! Cache Key Module
//!
//! Derives deterministic cache keys from an operation name and its
//! normalized parameters.

use std::collections::BTreeMap;

// == Key Generator ==
/// Builds a cache key by joining the operation name and its parts with `-`.
///
/// Pure and deterministic: identical inputs always produce the same key.
/// Inputs are caller-controlled identifiers, so plain delimiter-joined
/// concatenation is collision-safe enough here.
pub fn make_key<I, S>(operation: &str, parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut key = String::from(operation);
    for part in parts {
        key.push('-');
        key.push_str(part.as_ref());
    }
    key
}

/// Normalizes a parameter map into `key=value` parts in canonical order.
///
/// `BTreeMap` iteration is sorted by key, so semantically identical
/// parameter sets yield the same parts no matter how they were assembled.
pub fn params_to_parts(params: &BTreeMap<String, String>) -> Vec<String> {
    params
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect()
}
