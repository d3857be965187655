//! # Canonical Serialization
//!
//! `CanonicalBytes` is the only input accepted by [`sha256_digest()`](crate::digest::sha256_digest).
//! Two values that are equal as JSON always produce identical bytes: keys are
//! sorted and separators are compact (RFC 8785, via `serde_jcs`).
//!
//! Floats are rejected. Company and filing records carry only strings,
//! integers and dates, so a float reaching this path means the wrong value is
//! being digested.
//!
//! Filing histories are compared as sets: [`CanonicalBytes::from_unordered()`]
//! canonicalizes each element, sorts the encodings and emits them as one JSON
//! array, so reordering filings never changes the digest.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by JCS canonicalization.
///
/// # Invariants
///
/// - Constructed only through [`CanonicalBytes::new()`] or
///   [`CanonicalBytes::from_unordered()`].
/// - Contains no float numbers.
/// - Object keys are sorted, separators compact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Canonicalize any serializable value.
    ///
    /// # Errors
    ///
    /// `FloatRejected` if the value contains a non-integer number;
    /// `SerializationFailed` if the value cannot be represented as JSON.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        reject_floats(&value)?;
        Ok(Self(serde_jcs::to_string(&value)?.into_bytes()))
    }

    /// Canonicalize a collection as a set: element order does not matter.
    pub fn from_unordered<T: Serialize>(items: &[T]) -> Result<Self, CanonicalizationError> {
        let mut encoded = items
            .iter()
            .map(|item| Self::new(item).map(|cb| cb.0))
            .collect::<Result<Vec<_>, _>>()?;
        encoded.sort_unstable();

        let mut bytes = Vec::with_capacity(encoded.iter().map(|e| e.len() + 1).sum::<usize>() + 1);
        bytes.push(b'[');
        for (i, element) in encoded.iter().enumerate() {
            if i > 0 {
                bytes.push(b',');
            }
            bytes.extend_from_slice(element);
        }
        bytes.push(b']');
        Ok(Self(bytes))
    }

    /// Access the canonical bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

fn reject_floats(value: &Value) -> Result<(), CanonicalizationError> {
    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => Ok(()),
        Value::Number(n) => match n.as_f64() {
            Some(f) if !n.is_i64() && !n.is_u64() => Err(CanonicalizationError::FloatRejected(f)),
            _ => Ok(()),
        },
        Value::Array(items) => items.iter().try_for_each(reject_floats),
        Value::Object(map) => map.values().try_for_each(reject_floats),
    }
}
