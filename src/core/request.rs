// src/core/request.rs
//! Set and generate requests, plus per-type generation parameters
//!
//! Requests validate themselves before any handler touches the store.
//! Generation parameters double as stored metadata: password and user
//! versions keep them (encrypted) so regeneration can replay them later.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::consts::{
    DEFAULT_CERTIFICATE_DURATION_DAYS, DEFAULT_PASSWORD_LENGTH, MAX_CERTIFICATE_DURATION_DAYS,
    MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH,
};
use crate::core::name::CredentialName;
use crate::core::util::blake3_hex;
use crate::core::value::CredentialValue;
use crate::core::Result;
use crate::enums::{CredentialType, WriteMode};
use crate::error::VaultError;

/// Store a caller-supplied value. Always appends a new version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetRequest {
    pub name: CredentialName,
    #[serde(flatten)]
    pub value: CredentialValue,
}

impl SetRequest {
    pub fn new(name: CredentialName, value: CredentialValue) -> Self {
        Self { name, value }
    }

    pub fn credential_type(&self) -> CredentialType {
        self.value.credential_type()
    }

    pub fn validate(&self) -> Result<()> {
        self.value.validate()
    }
}

/// Character-class controls for generated passwords and usernames.
///
/// All four classes default to on except special characters; a length
/// outside the supported range silently falls back to the default
/// instead of failing the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StringGenerationParameters {
    pub length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub exclude_lower: bool,
    pub exclude_upper: bool,
    pub exclude_number: bool,
    pub include_special: bool,
}

impl Default for StringGenerationParameters {
    fn default() -> Self {
        Self {
            length: DEFAULT_PASSWORD_LENGTH,
            username: None,
            exclude_lower: false,
            exclude_upper: false,
            exclude_number: false,
            include_special: false,
        }
    }
}

impl StringGenerationParameters {
    pub fn effective_length(&self) -> usize {
        if (MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&self.length) {
            self.length
        } else {
            DEFAULT_PASSWORD_LENGTH
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.exclude_lower && self.exclude_upper && self.exclude_number && !self.include_special
        {
            return Err(VaultError::Validation(
                "cannot exclude all character sets".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SshGenerationParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificateGenerationParameters {
    pub common_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternative_names: Vec<String>,
    /// Validity in days
    pub duration: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_name: Option<String>,
    pub is_ca: bool,
    pub self_signed: bool,
}

impl Default for CertificateGenerationParameters {
    fn default() -> Self {
        Self {
            common_name: String::new(),
            organization: None,
            alternative_names: Vec::new(),
            duration: DEFAULT_CERTIFICATE_DURATION_DAYS,
            ca_name: None,
            is_ca: false,
            self_signed: false,
        }
    }
}

impl CertificateGenerationParameters {
    pub fn validate(&self) -> Result<()> {
        if self.common_name.is_empty() {
            return Err(VaultError::Validation("common_name is required".into()));
        }
        if !(1..=MAX_CERTIFICATE_DURATION_DAYS).contains(&self.duration) {
            return Err(VaultError::Validation(format!(
                "duration must be between 1 and {MAX_CERTIFICATE_DURATION_DAYS} days"
            )));
        }
        if self.self_signed && self.ca_name.is_some() {
            return Err(VaultError::Validation(
                "a self-signed certificate cannot also name a ca".into(),
            ));
        }
        if !self.self_signed && self.ca_name.is_none() && !self.is_ca {
            return Err(VaultError::Validation(
                "certificate must name a ca, be self-signed, or be a ca itself".into(),
            ));
        }
        Ok(())
    }

    /// True when the certificate signs itself (explicitly, or a root CA).
    pub(crate) fn is_self_issued(&self) -> bool {
        self.self_signed || (self.is_ca && self.ca_name.is_none())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GenerationParameters {
    Password(StringGenerationParameters),
    User(StringGenerationParameters),
    Ssh(SshGenerationParameters),
    Certificate(CertificateGenerationParameters),
}

impl GenerationParameters {
    pub fn credential_type(&self) -> CredentialType {
        match self {
            GenerationParameters::Password(_) => CredentialType::Password,
            GenerationParameters::User(_) => CredentialType::User,
            GenerationParameters::Ssh(_) => CredentialType::Ssh,
            GenerationParameters::Certificate(_) => CredentialType::Certificate,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            GenerationParameters::Password(p) | GenerationParameters::User(p) => p.validate(),
            GenerationParameters::Ssh(_) => Ok(()),
            GenerationParameters::Certificate(p) => p.validate(),
        }
    }
}

/// Generate a new value server-side. Honors [`WriteMode`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub name: CredentialName,
    #[serde(rename = "type")]
    pub credential_type: CredentialType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<GenerationParameters>,
    #[serde(default)]
    pub mode: WriteMode,
}

impl GenerateRequest {
    pub fn new(name: CredentialName, credential_type: CredentialType) -> Self {
        Self {
            name,
            credential_type,
            parameters: None,
            mode: WriteMode::default(),
        }
    }

    pub fn with_parameters(mut self, parameters: GenerationParameters) -> Self {
        self.parameters = Some(parameters);
        self
    }

    pub fn with_mode(mut self, mode: WriteMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.credential_type.is_generatable() {
            return Err(VaultError::CannotGenerate(self.credential_type.as_str()));
        }
        match &self.parameters {
            Some(p) => {
                if p.credential_type() != self.credential_type {
                    return Err(VaultError::Validation(format!(
                        "{} parameters do not fit a {} credential",
                        p.credential_type(),
                        self.credential_type
                    )));
                }
                p.validate()
            }
            // Certificates have no usable defaults: a common name is mandatory
            None if self.credential_type == CredentialType::Certificate => Err(
                VaultError::Validation("certificate generation requires parameters".into()),
            ),
            None => Ok(()),
        }
    }

    /// Parameters with defaults filled in. Call after `validate`.
    pub fn effective_parameters(&self) -> Result<GenerationParameters> {
        if let Some(p) = &self.parameters {
            return Ok(p.clone());
        }
        match self.credential_type {
            CredentialType::Password => {
                Ok(GenerationParameters::Password(Default::default()))
            }
            CredentialType::User => Ok(GenerationParameters::User(Default::default())),
            CredentialType::Ssh => Ok(GenerationParameters::Ssh(Default::default())),
            CredentialType::Certificate => Err(VaultError::Validation(
                "certificate generation requires parameters".into(),
            )),
            CredentialType::Value | CredentialType::Json => {
                Err(VaultError::CannotGenerate(self.credential_type.as_str()))
            }
        }
    }
}

/// Canonical fingerprint of what produced a version: type plus generation
/// parameters. Converge mode compares these across writes; set requests
/// hash with `parameters: null`.
pub fn version_checksum(
    credential_type: CredentialType,
    parameters: Option<&GenerationParameters>,
) -> Result<String> {
    let canonical = serde_json::to_vec(&json!({
        "type": credential_type.as_str(),
        "parameters": parameters,
    }))?;
    Ok(blake3_hex(&canonical))
}
