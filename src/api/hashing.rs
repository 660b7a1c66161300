//! Content hashes for change detection.
//!
//! Digests are SHA-256 over a canonical representation of the payload with the
//! volatile `ComputationTime` field removed, so two responses that differ only
//! in server timing hash identically.

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::constants::envelope::COMPUTATION_TIME_FIELD;
use crate::models::XmlDocument;

/// Hex-encoded SHA-256 of raw bytes
pub fn hash_bytes(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Hashes a parsed JSON payload.
///
/// The top-level `ComputationTime` member is dropped and the remainder is
/// serialized as RFC 8785 canonical JSON, which fixes member order and number
/// formatting before hashing.
pub fn hash_json_payload(raw: &Value) -> Result<String, serde_json::Error> {
    let stripped = match raw {
        Value::Object(map) => {
            let mut map = map.clone();
            map.remove(COMPUTATION_TIME_FIELD);
            Value::Object(map)
        }
        other => other.clone(),
    };
    let canonical = serde_jcs::to_vec(&stripped)?;
    Ok(hash_bytes(&canonical))
}

/// Hashes an XML document serialized without its `ComputationTime` children
pub fn hash_xml_payload(doc: &XmlDocument) -> Result<String, xmltree::Error> {
    let serialized = doc.without_children(COMPUTATION_TIME_FIELD).to_xml_string()?;
    Ok(hash_bytes(serialized.as_bytes()))
}
