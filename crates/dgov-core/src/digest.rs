//! # Digests
//!
//! Two hash functions are used in the stack, each for exactly one purpose:
//!
//! - **MD5** seeds the per-company score variance. The seed is part of the
//!   cross-implementation contract: MD5 over the UTF-8 bytes of the company
//!   name, first 8 hex digits read as a base-16 integer. Those 8 hex digits
//!   are the first 4 digest bytes, so the seed is their big-endian `u32`.
//!   MD5 is not used for anything that needs collision resistance.
//!
//! - **SHA-256** produces [`ContentDigest`]s of [`CanonicalBytes`], used to key
//!   the score cache on filing content rather than filing count.

use md5::Md5;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;

/// The hash algorithm used to produce a digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigestAlgorithm {
    /// MD5, used only for the variance seed.
    Md5,
    /// SHA-256, used for content addressing.
    Sha256,
}

impl DigestAlgorithm {
    /// Returns the algorithm identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha256 => "sha256",
        }
    }
}

impl std::fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A SHA-256 content digest with its algorithm tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentDigest {
    /// The hash algorithm that produced this digest.
    pub algorithm: DigestAlgorithm,
    /// The raw 32-byte digest value.
    pub bytes: [u8; 32],
}

impl ContentDigest {
    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        to_hex(&self.bytes)
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.to_hex())
    }
}

/// Compute a SHA-256 content digest from canonical bytes.
pub fn sha256_digest(data: &CanonicalBytes) -> ContentDigest {
    let hash = Sha256::digest(data.as_bytes());
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    ContentDigest {
        algorithm: DigestAlgorithm::Sha256,
        bytes,
    }
}

/// Compute a SHA-256 hex string from canonical bytes.
pub fn sha256_hex(data: &CanonicalBytes) -> String {
    sha256_digest(data).to_hex()
}

/// MD5 hex digest of a string's UTF-8 bytes.
pub fn md5_hex(text: &str) -> String {
    to_hex(&Md5::digest(text.as_bytes()))
}

/// Variance seed for a company name.
///
/// Equal to `int(hashlib.md5(name.encode()).hexdigest()[:8], 16)`.
pub fn name_seed(name: &str) -> u32 {
    let hash = Md5::digest(name.as_bytes());
    u32::from_be_bytes([hash[0], hash[1], hash[2], hash[3]])
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
