// src/enums.rs
//! Public enum types used throughout the crate
//!
//! Central location for all #[derive(...)] enums that represent
//! user-visible choices: credential types, write modes, export formats.

use serde::{Deserialize, Serialize};

/// The six credential types the vault stores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialType {
    Value,
    Json,
    Password,
    User,
    Ssh,
    Certificate,
}

impl CredentialType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialType::Value => "value",
            CredentialType::Json => "json",
            CredentialType::Password => "password",
            CredentialType::User => "user",
            CredentialType::Ssh => "ssh",
            CredentialType::Certificate => "certificate",
        }
    }

    /// Only these types have a generator; value and json can only be set
    pub fn is_generatable(&self) -> bool {
        matches!(
            self,
            CredentialType::Password
                | CredentialType::User
                | CredentialType::Ssh
                | CredentialType::Certificate
        )
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "value" => Some(CredentialType::Value),
            "json" => Some(CredentialType::Json),
            "password" => Some(CredentialType::Password),
            "user" => Some(CredentialType::User),
            "ssh" => Some(CredentialType::Ssh),
            "certificate" => Some(CredentialType::Certificate),
            _ => None,
        }
    }
}

impl std::fmt::Display for CredentialType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a generate request treats an existing credential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum WriteMode {
    /// Return the existing credential untouched if one exists
    NoOverwrite,
    /// Write a new version only when type or generation parameters changed
    #[default]
    Converge,
    /// Always write a new version
    Overwrite,
}

/// Export formats (JSON today, encrypted backup later)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[non_exhaustive]
pub enum ExportFormat {
    #[default]
    JsonV1,
    // EncryptedBackupV1,
}
