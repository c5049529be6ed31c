// src/core/name.rs
//! Credential names — a slash-delimited path namespace
//!
//! Every credential lives at a normalized path such as `/prod/db/password`.
//! A missing leading slash is prepended on construction; everything else
//! about the name is validated, never repaired.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::consts::MAX_NAME_LENGTH;
use crate::core::Result;
use crate::error::VaultError;

/// A validated, normalized credential name.
///
/// Construction via [`CredentialName::new`] is the only path that accepts
/// raw input. Names read back from the index were validated at write time
/// and skip re-validation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CredentialName(String);

impl CredentialName {
    pub fn new(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(VaultError::InvalidName("name is required"));
        }

        let name = if raw.starts_with('/') {
            raw.to_string()
        } else {
            format!("/{raw}")
        };

        // "/" or any run of nothing but slashes carries no name at all
        if name.chars().all(|c| c == '/') {
            return Err(VaultError::InvalidName("name is required"));
        }
        if name.len() > MAX_NAME_LENGTH {
            return Err(VaultError::InvalidName("name exceeds 1024 characters"));
        }
        if name.contains(' ') || name.contains('\\') || name.contains('*') {
            return Err(VaultError::InvalidName(
                "name must not contain spaces, backslashes or asterisks",
            ));
        }
        if name.contains("//") {
            return Err(VaultError::InvalidName("name must not contain a double slash"));
        }
        if name.ends_with('/') {
            return Err(VaultError::InvalidName("name must not end with a slash"));
        }

        Ok(Self(name))
    }

    /// Wrap a name that already passed validation (index reads).
    pub(crate) fn from_stored(name: String) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CredentialName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CredentialName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for CredentialName {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CredentialName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        CredentialName::new(&raw).map_err(serde::de::Error::custom)
    }
}
