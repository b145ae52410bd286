//! Content digests for records.
//!
//! The digest is the MD5 of the compact JSON form of a [`RecordContent`].
//! Field order comes from the struct declarations (`error`,
//! `numberOfPages`, `metadata`, `pages`) and pages keep reading order, so
//! equal content always serializes, and hashes, identically. MD5 is used
//! for identity and grouping only.

use md5::{Digest, Md5};

use crate::error::Result;
use crate::model::RecordContent;

/// Canonical serialized form the digest is computed over.
pub fn canonical_json(content: &RecordContent) -> Result<String> {
    Ok(serde_json::to_string(content)?)
}

/// Digest a record's content fields as 32 lowercase hex characters.
pub fn digest(content: &RecordContent) -> Result<String> {
    let canonical = canonical_json(content)?;
    Ok(digest_str(&canonical))
}

/// MD5 of a string, lowercase hex.
pub fn digest_str(data: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(data.as_bytes());
    format!("{:x}", hasher.finalize())
}
