//! Fingerprints - stable SHA-256 digests of slides, images and export reports
//!
//! A fingerprint is taken over the canonical JSON form of a record: object
//! keys sorted at every depth, no whitespace. Composing the same session
//! twice gives the same slide fingerprints, and a report's fingerprint only
//! moves when its per-slide results do.

use std::fmt::Write;

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of raw bytes (PNG output, background images).
pub fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes).iter().fold(String::with_capacity(64), |mut out, b| {
        let _ = write!(out, "{b:02x}");
        out
    })
}

/// Canonical JSON form of a record.
pub fn canonical_json<T: Serialize>(record: &T) -> Result<String, serde_json::Error> {
    let mut value = serde_json::to_value(record)?;
    sort_keys(&mut value);
    serde_json::to_string(&value)
}

/// Re-inserts object keys in sorted order, depth first. Array order is kept.
fn sort_keys(value: &mut Value) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = std::mem::take(map).into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            for (key, mut child) in entries {
                sort_keys(&mut child);
                map.insert(key, child);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(sort_keys),
        _ => {}
    }
}

/// Fingerprint of a composed slide or of an export report's results.
pub fn fingerprint<T: Serialize>(record: &T) -> Result<String, serde_json::Error> {
    canonical_json(record).map(|json| sha256_hex(json.as_bytes()))
}
