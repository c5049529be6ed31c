// src/core/value.rs
//! Typed credential values
//!
//! The serde shape matches the wire format of a set request:
//! `{"type": "password", "value": "..."}` with structured values for
//! user, ssh and certificate credentials. Only `secret_payload` ever
//! reaches the encryptor; the rest of each value is public metadata
//! and lands in the index.

use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::enums::CredentialType;
use crate::error::VaultError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub password: String,
    /// Base64 argon2 salt; filled in by the store on write, never client-supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SshValue {
    #[serde(default)]
    pub public_key: String,
    #[serde(default)]
    pub private_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_name: Option<String>,
    #[serde(default)]
    pub certificate: String,
    #[serde(default)]
    pub private_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum CredentialValue {
    Value(String),
    Json(serde_json::Value),
    Password(String),
    User(UserValue),
    Ssh(SshValue),
    Certificate(CertificateValue),
}

impl CredentialValue {
    pub fn credential_type(&self) -> CredentialType {
        match self {
            CredentialValue::Value(_) => CredentialType::Value,
            CredentialValue::Json(_) => CredentialType::Json,
            CredentialValue::Password(_) => CredentialType::Password,
            CredentialValue::User(_) => CredentialType::User,
            CredentialValue::Ssh(_) => CredentialType::Ssh,
            CredentialValue::Certificate(_) => CredentialType::Certificate,
        }
    }

    /// The secret part of the value — the only part that touches the vault.
    pub(crate) fn secret_payload(&self) -> Result<String> {
        match self {
            CredentialValue::Value(s) | CredentialValue::Password(s) => Ok(s.clone()),
            CredentialValue::Json(v) => Ok(serde_json::to_string(v)?),
            CredentialValue::User(u) => Ok(u.password.clone()),
            CredentialValue::Ssh(s) => Ok(s.private_key.clone()),
            CredentialValue::Certificate(c) => Ok(c.private_key.clone()),
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        match self {
            CredentialValue::Value(s) if s.is_empty() => {
                Err(VaultError::Validation("value is required".into()))
            }
            CredentialValue::Password(s) if s.is_empty() => {
                Err(VaultError::Validation("password is required".into()))
            }
            CredentialValue::Json(v) if !v.as_object().is_some_and(|m| !m.is_empty()) => Err(
                VaultError::Validation("json credentials require a non-empty object".into()),
            ),
            CredentialValue::User(u) if u.password.is_empty() => {
                Err(VaultError::Validation("password is required".into()))
            }
            CredentialValue::Ssh(s) if s.public_key.is_empty() && s.private_key.is_empty() => Err(
                VaultError::Validation("ssh credentials require a public or private key".into()),
            ),
            CredentialValue::Certificate(c)
                if c.ca.is_none() && c.certificate.is_empty() && c.private_key.is_empty() =>
            {
                Err(VaultError::Validation(
                    "certificate credentials require a ca, certificate or private key".into(),
                ))
            }
            _ => Ok(()),
        }
    }
}
