use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::StorageError;

const MAX_KEY_LEN: usize = 512;

/// A validated object key such as `menu/3f0c2a4e-...`.
///
/// Keys are relative, slash-separated and restricted to `a-zA-Z0-9-_.`
/// segments, so they map onto filesystem paths and URLs without escaping.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BlobKey(String);

impl BlobKey {
    /// Parse and validate a key.
    pub fn parse(raw: &str) -> Result<Self, StorageError> {
        validate_key(raw)
            .map(|k| Self(k.to_string()))
            .map_err(|msg| StorageError::InvalidKey(msg.into()))
    }

    /// Fresh key under `prefix` with a random v4 UUID as the final segment.
    pub fn random_under(prefix: &str) -> Result<Self, StorageError> {
        Self::parse(&format!("{prefix}/{}", uuid::Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the `/`-separated segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }
}

fn validate_key(raw: &str) -> Result<&str, &'static str> {
    if raw.is_empty() {
        return Err("Key cannot be empty");
    }

    if raw.len() > MAX_KEY_LEN {
        return Err("Key exceeds maximum length of 512 characters");
    }

    if raw.starts_with('/') || raw.ends_with('/') {
        return Err("Key must not start or end with '/'");
    }

    for segment in raw.split('/') {
        if segment.is_empty() {
            return Err("Key must not contain empty segments");
        }
        if segment.starts_with('.') {
            return Err("Key segments must not start with '.'");
        }
    }

    if !raw
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '-' | '_' | '.'))
    {
        return Err("Key contains invalid characters (allowed: a-zA-Z0-9, /, -, _, .)");
    }

    Ok(raw)
}

impl fmt::Debug for BlobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlobKey({})", self.0)
    }
}

impl fmt::Display for BlobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for BlobKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for BlobKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
