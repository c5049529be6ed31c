// src/views.rs
//! Response shapes — what callers see after the secrets are decrypted
//!
//! Views are built from a decrypted version, never stored. Derived
//! fields (argon2 password hash, ssh fingerprint) are computed here so
//! the databases only ever hold the primary material.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::generators::{ssh, user};
use crate::core::store::CredentialVersion;
use crate::core::value::CredentialValue;
use crate::core::Result;
use crate::enums::CredentialType;
use crate::error::VaultError;

/// One credential version, ready to serialize.
#[derive(Debug, Clone, Serialize)]
pub struct CredentialView {
    #[serde(rename = "type")]
    pub credential_type: CredentialType,
    pub version_created_at: DateTime<Utc>,
    pub id: String,
    pub name: String,
    pub value: CredentialValueView,
}

/// The value half of a view. Untagged: the variant shape alone carries
/// the type, `CredentialView.type` names it.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CredentialValueView {
    Value(String),
    Json(serde_json::Value),
    User {
        username: Option<String>,
        password: String,
        password_hash: String,
    },
    Ssh {
        public_key: String,
        private_key: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        public_key_fingerprint: Option<String>,
    },
    Certificate {
        ca: Option<String>,
        certificate: String,
        private_key: String,
    },
}

impl CredentialView {
    pub fn from_version(version: &CredentialVersion) -> Result<Self> {
        let value = match &version.value {
            CredentialValue::Value(s) | CredentialValue::Password(s) => {
                CredentialValueView::Value(s.clone())
            }
            CredentialValue::Json(v) => CredentialValueView::Json(v.clone()),
            CredentialValue::User(u) => {
                let salt = u.salt.as_deref().ok_or_else(|| {
                    VaultError::Validation("user credential is missing its salt".into())
                })?;
                CredentialValueView::User {
                    username: u.username.clone(),
                    password: u.password.clone(),
                    password_hash: user::password_hash(&u.password, salt)?,
                }
            }
            CredentialValue::Ssh(s) => CredentialValueView::Ssh {
                public_key: s.public_key.clone(),
                private_key: s.private_key.clone(),
                public_key_fingerprint: ssh::fingerprint(&s.public_key),
            },
            CredentialValue::Certificate(c) => CredentialValueView::Certificate {
                ca: c.ca.clone(),
                certificate: c.certificate.clone(),
                private_key: c.private_key.clone(),
            },
        };

        Ok(Self {
            credential_type: version.credential_type,
            version_created_at: version.version_created_at,
            id: version.uuid.clone(),
            name: version.name.to_string(),
            value,
        })
    }
}

/// One row of a find result: when the latest version was written, and where.
#[derive(Debug, Clone, Serialize)]
pub struct FindResult {
    pub version_created_at: DateTime<Utc>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FindResults {
    pub credentials: Vec<FindResult>,
}

/// Names rewritten by a bulk regeneration, deduplicated and sorted.
#[derive(Debug, Clone, Serialize)]
pub struct BulkRegenerateResults {
    pub regenerated_credentials: BTreeSet<String>,
}
