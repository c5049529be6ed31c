// src/core/store.rs
//! The credential store — vault, index and encryptor behind one API
//!
//! Write path: secret payload → encryptor → vault row(s); public metadata
//! plus ciphertext references → index row. Read path reverses it. Vault
//! rows commit first, so an index failure leaves only unreferenced
//! ciphertext behind, never a version that points at nothing.

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use tracing::debug;

use crate::core::crypto::EncryptionKeySet;
use crate::core::encryptor::{DefaultEncryptor, Encryptor};
use crate::core::generators::{certificate, password, ssh, user};
use crate::core::index_db_ops::{self as index_ops, VersionRow};
use crate::core::name::CredentialName;
use crate::core::request::{
    version_checksum, CertificateGenerationParameters, GenerateRequest, GenerationParameters,
    SetRequest,
};
use crate::core::util::rfc3339_micros;
use crate::core::value::{CertificateValue, CredentialValue, SshValue, UserValue};
use crate::core::vault_db_ops as vault_ops;
use crate::core::Result;
use crate::enums::{CredentialType, WriteMode};
use crate::error::VaultError;
use crate::views::{CredentialView, FindResult, FindResults};

/// One fully decrypted version of a credential.
#[derive(Debug, Clone)]
pub struct CredentialVersion {
    pub uuid: String,
    pub name: CredentialName,
    pub credential_type: CredentialType,
    pub value: CredentialValue,
    pub generation_parameters: Option<GenerationParameters>,
    pub checksum: String,
    pub version_created_at: DateTime<Utc>,
    pub is_ca: bool,
    pub self_signed: bool,
    pub expiry_date: Option<DateTime<Utc>>,
}

pub struct CredentialStore {
    vault: Connection,
    index: Connection,
    encryptor: Box<dyn Encryptor>,
}

impl CredentialStore {
    pub fn new(vault: Connection, index: Connection, encryptor: Box<dyn Encryptor>) -> Self {
        Self {
            vault,
            index,
            encryptor,
        }
    }

    /// Config-driven constructor: open both databases and build the
    /// AES-GCM encryptor from the configured key set.
    pub fn open() -> Result<Self> {
        let config = crate::config::load();
        let keys = EncryptionKeySet::from_config(&config.encryption)?;
        let vault = crate::vault::open_vault_db()?;
        let index = crate::index::open_index_db()?;
        Ok(Self::new(vault, index, Box::new(DefaultEncryptor::new(keys))))
    }

    /// Store a caller-supplied value as a new version.
    pub fn set(&mut self, request: SetRequest) -> Result<CredentialView> {
        request.validate()?;
        let value = prepare_set_value(request.value)?;
        let version = self.write_version(&request.name, value, None)?;
        CredentialView::from_version(&version)
    }

    /// Generate a value server-side, honoring the request's write mode.
    pub fn generate(&mut self, request: GenerateRequest) -> Result<CredentialView> {
        request.validate()?;
        let parameters = request.effective_parameters()?;

        if let Some(existing) = self.latest_version(&request.name)? {
            match request.mode {
                WriteMode::NoOverwrite => {
                    debug!(name = %request.name, "no-overwrite: returning existing credential");
                    return CredentialView::from_version(&existing);
                }
                WriteMode::Converge
                    if existing.credential_type == request.credential_type
                        && existing.checksum
                            == version_checksum(request.credential_type, Some(&parameters))? =>
                {
                    debug!(name = %request.name, "converged: parameters unchanged");
                    return CredentialView::from_version(&existing);
                }
                _ => {}
            }
        }

        let (value, keep_parameters) = self.generate_value(&parameters)?;
        let stored_parameters = keep_parameters.then_some(&parameters);
        let version = self.write_version(&request.name, value, stored_parameters)?;
        CredentialView::from_version(&version)
    }

    /// Latest version, decrypted. `None` when the name was never stored.
    pub fn latest_version(&self, name: &CredentialName) -> Result<Option<CredentialVersion>> {
        match index_ops::find_latest_version(&self.index, name.as_str())? {
            Some(row) => Ok(Some(self.load_version(row)?)),
            None => Ok(None),
        }
    }

    /// All versions (or the newest `limit`), newest first. Errors when the
    /// credential does not exist at all.
    pub fn versions(
        &self,
        name: &CredentialName,
        limit: Option<usize>,
    ) -> Result<Vec<CredentialVersion>> {
        let rows = index_ops::find_versions_by_name(&self.index, name.as_str(), limit)?;
        if rows.is_empty() {
            return Err(VaultError::NotFound(name.to_string()));
        }
        rows.into_iter().map(|row| self.load_version(row)).collect()
    }

    pub fn version_by_uuid(&self, uuid: &str) -> Result<CredentialVersion> {
        let row = index_ops::find_version_by_uuid(&self.index, uuid)?
            .ok_or_else(|| VaultError::NotFound(uuid.to_string()))?;
        self.load_version(row)
    }

    /// Delete a credential and every version of it. `false` when absent.
    pub fn delete(&mut self, name: &CredentialName) -> Result<bool> {
        match index_ops::delete_credential(&mut self.index, name.as_str())? {
            Some(uuids) => {
                vault_ops::delete_encrypted_values(&self.vault, &uuids)?;
                debug!(name = %name, "deleted credential");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Credentials strictly below a path, matching whole `/`-separated
    /// segments case-insensitively from the start of the name.
    pub fn find_by_path(&self, path: &str) -> Result<FindResults> {
        let needle = normalize_path(path);
        let mut credentials = Vec::new();
        for (name, created_at) in index_ops::credential_summaries(&self.index)? {
            let matched = match needle.as_str() {
                "/" => true,
                prefix => name.to_lowercase().starts_with(&format!("{prefix}/")),
            };
            if matched {
                credentials.push(FindResult {
                    version_created_at: parse_timestamp(&created_at)?,
                    name,
                });
            }
        }
        Ok(FindResults { credentials })
    }

    /// Credentials whose name contains the term, case-insensitively.
    pub fn find_by_name_like(&self, term: &str) -> Result<FindResults> {
        let needle = term.to_lowercase();
        let mut credentials = Vec::new();
        for (name, created_at) in index_ops::credential_summaries(&self.index)? {
            if name.to_lowercase().contains(&needle) {
                credentials.push(FindResult {
                    version_created_at: parse_timestamp(&created_at)?,
                    name,
                });
            }
        }
        Ok(FindResults { credentials })
    }

    /// Certificate credentials whose latest version was signed by `signer`,
    /// in ascending name order.
    pub fn names_signed_by(&self, signer: &CredentialName) -> Result<Vec<CredentialName>> {
        let names = index_ops::find_names_signed_by(&self.index, signer.as_str())?;
        Ok(names.into_iter().map(CredentialName::from_stored).collect())
    }

    pub fn credential_names(&self) -> Result<Vec<CredentialName>> {
        let names = index_ops::all_credential_names(&self.index)?;
        Ok(names.into_iter().map(CredentialName::from_stored).collect())
    }

    pub fn count_credentials(&self) -> Result<u64> {
        index_ops::count_credentials(&self.index)
    }

    pub fn count_versions(&self) -> Result<u64> {
        index_ops::count_versions(&self.index)
    }

    fn generate_value(
        &self,
        parameters: &GenerationParameters,
    ) -> Result<(CredentialValue, bool)> {
        // Password and user versions keep their parameters (encrypted) so
        // regeneration can replay them; ssh and certificate re-derive theirs.
        Ok(match parameters {
            GenerationParameters::Password(p) => {
                (CredentialValue::Password(password::generate_password(p)), true)
            }
            GenerationParameters::User(p) => (CredentialValue::User(user::generate_user(p)), true),
            GenerationParameters::Ssh(p) => (CredentialValue::Ssh(ssh::generate_ssh(p)), false),
            GenerationParameters::Certificate(p) => {
                (CredentialValue::Certificate(self.issue_certificate(p)?), false)
            }
        })
    }

    fn issue_certificate(
        &self,
        params: &CertificateGenerationParameters,
    ) -> Result<CertificateValue> {
        if params.is_self_issued() {
            let material = certificate::issue_self_signed(params)?;
            return Ok(CertificateValue {
                ca: Some(material.certificate.clone()),
                ca_name: None,
                certificate: material.certificate,
                private_key: material.private_key,
            });
        }

        // validate() guarantees ca_name is present on this path
        let ca_name = match &params.ca_name {
            Some(raw) => CredentialName::new(raw)?,
            None => {
                return Err(VaultError::Validation(
                    "certificate must name a ca, be self-signed, or be a ca itself".into(),
                ))
            }
        };

        let ca_version = self
            .latest_version(&ca_name)?
            .ok_or_else(|| VaultError::NotFound(ca_name.to_string()))?;
        let ca_value = match &ca_version.value {
            CredentialValue::Certificate(c) => c,
            _ => {
                return Err(VaultError::Validation(format!(
                    "{ca_name} is not a certificate credential"
                )))
            }
        };
        if !ca_version.is_ca {
            return Err(VaultError::Validation(format!(
                "{ca_name} is not a certificate authority"
            )));
        }

        let signed = certificate::parse_certificate(&ca_value.certificate)?;
        let material = certificate::issue_signed_by(
            params,
            &certificate::CaMaterial {
                certificate_pem: ca_value.certificate.clone(),
                private_key_pem: ca_value.private_key.clone(),
                subject: signed.document.subject,
            },
        )?;

        Ok(CertificateValue {
            ca: Some(ca_value.certificate.clone()),
            ca_name: Some(ca_name.to_string()),
            certificate: material.certificate,
            private_key: material.private_key,
        })
    }

    fn write_version(
        &mut self,
        name: &CredentialName,
        value: CredentialValue,
        parameters: Option<&GenerationParameters>,
    ) -> Result<CredentialVersion> {
        let credential_type = value.credential_type();

        let secret = value.secret_payload()?;
        let encrypted = self.encryptor.encrypt(Some(&secret))?;
        vault_ops::insert_encrypted_value(&self.vault, &encrypted)?;

        let params_uuid = match parameters {
            Some(p) => {
                let clear = serde_json::to_string(p)?;
                let encrypted_params = self.encryptor.encrypt(Some(&clear))?;
                vault_ops::insert_encrypted_value(&self.vault, &encrypted_params)?;
                Some(encrypted_params.uuid)
            }
            None => None,
        };

        let checksum = version_checksum(credential_type, parameters)?;
        let created_at = Utc::now();

        let (username, salt) = match &value {
            CredentialValue::User(u) => (u.username.clone(), u.salt.clone()),
            _ => (None, None),
        };
        let public_key = match &value {
            CredentialValue::Ssh(s) if !s.public_key.is_empty() => Some(s.public_key.clone()),
            _ => None,
        };
        let (certificate_pem, ca, ca_name, is_ca, self_signed, expiry_date) = match &value {
            CredentialValue::Certificate(c) => {
                let (is_ca, self_signed, expiry_date) = certificate_flags(c);
                (
                    (!c.certificate.is_empty()).then(|| c.certificate.clone()),
                    c.ca.clone(),
                    c.ca_name.clone(),
                    is_ca,
                    self_signed,
                    expiry_date,
                )
            }
            _ => (None, None, None, false, false, None),
        };

        let row = VersionRow {
            uuid: uuid::Uuid::new_v4().to_string(),
            credential_name: name.as_str().to_string(),
            credential_type: credential_type.as_str().to_string(),
            value_uuid: encrypted.uuid.clone(),
            params_uuid,
            checksum: checksum.clone(),
            version_created_at: rfc3339_micros(created_at),
            username,
            salt,
            public_key,
            certificate: certificate_pem,
            ca,
            ca_name,
            is_ca,
            self_signed,
            expiry_date: expiry_date.map(rfc3339_micros),
        };
        index_ops::insert_version(&mut self.index, &row)?;
        debug!(name = %name, version = %row.uuid, "wrote credential version");

        Ok(CredentialVersion {
            uuid: row.uuid,
            name: name.clone(),
            credential_type,
            value,
            generation_parameters: parameters.cloned(),
            checksum,
            version_created_at: created_at,
            is_ca,
            self_signed,
            expiry_date,
        })
    }

    fn load_version(&self, row: VersionRow) -> Result<CredentialVersion> {
        let encrypted = vault_ops::find_encrypted_value(&self.vault, &row.value_uuid)?
            .ok_or_else(|| VaultError::NotFound(format!("encrypted value {}", row.value_uuid)))?;
        // Versions always store a present payload; absent here means corruption
        let secret = self
            .encryptor
            .decrypt(Some(&encrypted))?
            .ok_or(VaultError::Decrypt)?;

        let generation_parameters = match &row.params_uuid {
            Some(uuid) => {
                let encrypted_params = vault_ops::find_encrypted_value(&self.vault, uuid)?
                    .ok_or_else(|| VaultError::NotFound(format!("encrypted value {uuid}")))?;
                match self.encryptor.decrypt(Some(&encrypted_params))? {
                    Some(clear) => Some(serde_json::from_str(&clear)?),
                    None => None,
                }
            }
            None => None,
        };

        let credential_type = CredentialType::parse(&row.credential_type).ok_or_else(|| {
            VaultError::Validation(format!("unknown credential type {}", row.credential_type))
        })?;
        let value = assemble_value(credential_type, &row, secret)?;
        let version_created_at = parse_timestamp(&row.version_created_at)?;
        let expiry_date = match &row.expiry_date {
            Some(raw) => Some(parse_timestamp(raw)?),
            None => None,
        };

        Ok(CredentialVersion {
            uuid: row.uuid,
            name: CredentialName::from_stored(row.credential_name),
            credential_type,
            value,
            generation_parameters,
            checksum: row.checksum,
            version_created_at,
            is_ca: row.is_ca,
            self_signed: row.self_signed,
            expiry_date,
        })
    }
}

fn prepare_set_value(value: CredentialValue) -> Result<CredentialValue> {
    Ok(match value {
        CredentialValue::User(mut u) => {
            if u.salt.is_none() {
                u.salt = Some(user::new_salt());
            }
            CredentialValue::User(u)
        }
        CredentialValue::Certificate(mut c) => {
            if let Some(raw) = c.ca_name.take() {
                c.ca_name = Some(CredentialName::new(&raw)?.to_string());
            }
            CredentialValue::Certificate(c)
        }
        other => other,
    })
}

fn assemble_value(
    credential_type: CredentialType,
    row: &VersionRow,
    secret: String,
) -> Result<CredentialValue> {
    Ok(match credential_type {
        CredentialType::Value => CredentialValue::Value(secret),
        CredentialType::Json => CredentialValue::Json(serde_json::from_str(&secret)?),
        CredentialType::Password => CredentialValue::Password(secret),
        CredentialType::User => CredentialValue::User(UserValue {
            username: row.username.clone(),
            password: secret,
            salt: row.salt.clone(),
        }),
        CredentialType::Ssh => CredentialValue::Ssh(SshValue {
            public_key: row.public_key.clone().unwrap_or_default(),
            private_key: secret,
        }),
        CredentialType::Certificate => CredentialValue::Certificate(CertificateValue {
            ca: row.ca.clone(),
            ca_name: row.ca_name.clone(),
            certificate: row.certificate.clone().unwrap_or_default(),
            private_key: secret,
        }),
    })
}

// Imported foreign PEMs parse as (false, false, None); vault-issued
// certificates derive their flags from the signed document.
fn certificate_flags(value: &CertificateValue) -> (bool, bool, Option<DateTime<Utc>>) {
    match certificate::parse_certificate(&value.certificate) {
        Ok(signed) => {
            let document = signed.document;
            let expiry = DateTime::parse_from_rfc3339(&document.not_after)
                .ok()
                .map(|t| t.with_timezone(&Utc));
            (document.is_ca, document.issuer == document.subject, expiry)
        }
        Err(_) => (false, false, None),
    }
}

fn normalize_path(path: &str) -> String {
    let mut p = path.trim().to_lowercase();
    if !p.starts_with('/') {
        p.insert(0, '/');
    }
    while p.len() > 1 && p.ends_with('/') {
        p.pop();
    }
    p
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| VaultError::Validation(format!("malformed timestamp {raw}")))
}
