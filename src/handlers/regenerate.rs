// src/handlers/regenerate.rs
//! Regenerate handler — rotate credential material in place
//!
//! A regeneration is a generate request reconstructed from the latest
//! stored version: password and user replay their stored parameters,
//! ssh and certificate re-derive theirs from the stored artifacts.
//! Regeneration always overwrites.

use tracing::info;

use crate::core::generators::{certificate, ssh};
use crate::core::name::CredentialName;
use crate::core::request::{
    CertificateGenerationParameters, GenerateRequest, GenerationParameters,
    SshGenerationParameters,
};
use crate::core::store::{CredentialStore, CredentialVersion};
use crate::core::value::CredentialValue;
use crate::core::Result;
use crate::enums::{CredentialType, WriteMode};
use crate::error::VaultError;
use crate::views::{BulkRegenerateResults, CredentialView};

pub trait RegenerateHandler {
    fn handle_regenerate(&mut self, name: &str) -> Result<CredentialView>;

    /// Regenerate every certificate whose latest version was signed by
    /// `signer_name`, in ascending name order. Fails on the first error
    /// rather than reporting a partial batch.
    fn handle_bulk_regenerate(&mut self, signer_name: &str) -> Result<BulkRegenerateResults>;
}

pub struct DefaultRegenerateHandler<'a> {
    store: &'a mut CredentialStore,
}

impl<'a> DefaultRegenerateHandler<'a> {
    pub fn new(store: &'a mut CredentialStore) -> Self {
        Self { store }
    }

    fn regenerate(&mut self, name: &CredentialName) -> Result<CredentialView> {
        let version = self
            .store
            .latest_version(name)?
            .ok_or_else(|| VaultError::NotFound(name.to_string()))?;
        let request = regeneration_request(&version)?;
        self.store.generate(request)
    }
}

impl RegenerateHandler for DefaultRegenerateHandler<'_> {
    fn handle_regenerate(&mut self, name: &str) -> Result<CredentialView> {
        let name = CredentialName::new(name)?;
        let view = self.regenerate(&name)?;
        info!(name = %view.name, credential_type = %view.credential_type, "regenerated credential");
        Ok(view)
    }

    fn handle_bulk_regenerate(&mut self, signer_name: &str) -> Result<BulkRegenerateResults> {
        let signer = CredentialName::new(signer_name)?;
        let names = self.store.names_signed_by(&signer)?;

        let mut regenerated_credentials = std::collections::BTreeSet::new();
        for name in names {
            self.regenerate(&name)?;
            regenerated_credentials.insert(name.to_string());
        }

        info!(
            signer = %signer,
            count = regenerated_credentials.len(),
            "bulk regenerated signed certificates"
        );
        Ok(BulkRegenerateResults {
            regenerated_credentials,
        })
    }
}

/// Rebuild the generate request that would produce a fresh version of
/// this credential.
fn regeneration_request(version: &CredentialVersion) -> Result<GenerateRequest> {
    let cannot = |reason: &'static str| VaultError::CannotRegenerate {
        name: version.name.to_string(),
        reason,
    };

    let parameters = match version.credential_type {
        CredentialType::Value | CredentialType::Json => {
            return Err(cannot("only generated credential types can be regenerated"))
        }
        CredentialType::Password => match &version.generation_parameters {
            Some(p @ GenerationParameters::Password(_)) => p.clone(),
            _ => return Err(cannot("the password was set, not generated")),
        },
        CredentialType::User => match &version.generation_parameters {
            Some(GenerationParameters::User(p)) => {
                let mut p = p.clone();
                // A regenerated user keeps its username, only the password rolls
                if let CredentialValue::User(u) = &version.value {
                    p.username = u.username.clone();
                }
                GenerationParameters::User(p)
            }
            _ => return Err(cannot("the user was set, not generated")),
        },
        CredentialType::Ssh => {
            let ssh_comment = match &version.value {
                CredentialValue::Ssh(s) => ssh::comment(&s.public_key),
                _ => None,
            };
            GenerationParameters::Ssh(SshGenerationParameters { ssh_comment })
        }
        CredentialType::Certificate => {
            let value = match &version.value {
                CredentialValue::Certificate(c) => c,
                _ => return Err(cannot("stored value is not a certificate")),
            };
            let signed = certificate::parse_certificate(&value.certificate)
                .map_err(|_| cannot("the certificate was not issued by this vault"))?;
            let document = signed.document;
            GenerationParameters::Certificate(CertificateGenerationParameters {
                common_name: document.subject.clone(),
                organization: document.organization.clone(),
                alternative_names: document.alternative_names.clone(),
                duration: certificate::duration_days(&document)?,
                ca_name: value.ca_name.clone(),
                is_ca: document.is_ca,
                self_signed: version.self_signed,
            })
        }
    };

    Ok(GenerateRequest::new(version.name.clone(), version.credential_type)
        .with_parameters(parameters)
        .with_mode(WriteMode::Overwrite))
}
