// src/core/generators/certificate.rs
//! Vault-issued certificates
//!
//! Not X.509: a certificate here is a deterministic JSON document signed
//! with Ed25519 and PEM-framed under a VAULT CERTIFICATE label. Enough
//! structure for chains (leaf → ca), expiry and regeneration without an
//! ASN.1 stack.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::aliases::{SecureRandomExt, SigningSeed32};
use crate::core::pem::{pem_decode, pem_encode, CERTIFICATE_LABEL, PRIVATE_KEY_LABEL};
use crate::core::request::CertificateGenerationParameters;
use crate::core::Result;
use crate::error::VaultError;

/// The signed payload. Field order is the canonical byte order — changing
/// it invalidates every signature ever produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateDocument {
    pub serial: String,
    pub subject: String,
    pub issuer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternative_names: Vec<String>,
    pub not_before: String,
    pub not_after: String,
    pub is_ca: bool,
    /// Hex Ed25519 verifying key of the subject
    pub public_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedCertificate {
    pub document: CertificateDocument,
    /// Hex Ed25519 signature over the canonical document JSON
    pub signature: String,
}

pub struct CertificateMaterial {
    pub certificate: String,
    pub private_key: String,
}

/// CA material the store resolves before issuing a leaf.
pub struct CaMaterial {
    pub certificate_pem: String,
    pub private_key_pem: String,
    pub subject: String,
}

pub fn issue_self_signed(params: &CertificateGenerationParameters) -> Result<CertificateMaterial> {
    let seed = SigningSeed32::random();
    let signing = SigningKey::from_bytes(seed.expose_secret());
    let document = build_document(params, &params.common_name, &signing.verifying_key());
    let certificate = sign_document(&document, &signing)?;
    Ok(CertificateMaterial {
        certificate,
        private_key: pem_encode(PRIVATE_KEY_LABEL, seed.expose_secret()),
    })
}

pub fn issue_signed_by(
    params: &CertificateGenerationParameters,
    ca: &CaMaterial,
) -> Result<CertificateMaterial> {
    let ca_signing = signing_key_from_pem(&ca.private_key_pem)?;
    let seed = SigningSeed32::random();
    let signing = SigningKey::from_bytes(seed.expose_secret());
    let document = build_document(params, &ca.subject, &signing.verifying_key());
    let certificate = sign_document(&document, &ca_signing)?;
    Ok(CertificateMaterial {
        certificate,
        private_key: pem_encode(PRIVATE_KEY_LABEL, seed.expose_secret()),
    })
}

fn build_document(
    params: &CertificateGenerationParameters,
    issuer: &str,
    public: &VerifyingKey,
) -> CertificateDocument {
    let now = Utc::now();
    let mut serial = [0u8; 16];
    rand::rng().fill_bytes(&mut serial);

    CertificateDocument {
        serial: hex::encode(serial),
        subject: params.common_name.clone(),
        issuer: issuer.to_string(),
        organization: params.organization.clone(),
        alternative_names: params.alternative_names.clone(),
        not_before: now.to_rfc3339_opts(SecondsFormat::Secs, true),
        not_after: (now + Duration::days(i64::from(params.duration)))
            .to_rfc3339_opts(SecondsFormat::Secs, true),
        is_ca: params.is_ca,
        public_key: hex::encode(public.to_bytes()),
    }
}

fn sign_document(document: &CertificateDocument, signer: &SigningKey) -> Result<String> {
    let canonical = serde_json::to_vec(document)?;
    let signature = signer.sign(&canonical);
    let signed = SignedCertificate {
        document: document.clone(),
        signature: hex::encode(signature.to_bytes()),
    };
    Ok(pem_encode(CERTIFICATE_LABEL, &serde_json::to_vec(&signed)?))
}

/// Parse a vault certificate PEM back into its signed form.
pub fn parse_certificate(pem: &str) -> Result<SignedCertificate> {
    let raw = pem_decode(CERTIFICATE_LABEL, pem)?;
    Ok(serde_json::from_slice(&raw)?)
}

/// Verify a certificate against the issuer's public key (hex).
pub fn verify_certificate(cert: &SignedCertificate, issuer_public_key_hex: &str) -> Result<()> {
    let key_bytes: [u8; 32] = hex::decode(issuer_public_key_hex)
        .map_err(|_| VaultError::Signature)?
        .try_into()
        .map_err(|_| VaultError::Signature)?;
    let verifying = VerifyingKey::from_bytes(&key_bytes)?;

    let sig_bytes: [u8; 64] = hex::decode(&cert.signature)
        .map_err(|_| VaultError::Signature)?
        .try_into()
        .map_err(|_| VaultError::Signature)?;
    let signature = Signature::from_bytes(&sig_bytes);

    let canonical = serde_json::to_vec(&cert.document)?;
    verifying.verify(&canonical, &signature)?;
    Ok(())
}

/// Recover a signing key from a vault private-key PEM.
pub fn signing_key_from_pem(pem: &str) -> Result<SigningKey> {
    let raw = pem_decode(PRIVATE_KEY_LABEL, pem)?;
    let seed: [u8; 32] = raw.try_into().map_err(|_| {
        VaultError::Validation("private key must be a 32-byte Ed25519 seed".into())
    })?;
    Ok(SigningKey::from_bytes(&seed))
}

/// Days between not_before and not_after — replayed on regeneration.
pub fn duration_days(document: &CertificateDocument) -> Result<u32> {
    let not_before = DateTime::parse_from_rfc3339(&document.not_before)
        .map_err(|_| VaultError::Validation("certificate has malformed timestamps".into()))?;
    let not_after = DateTime::parse_from_rfc3339(&document.not_after)
        .map_err(|_| VaultError::Validation("certificate has malformed timestamps".into()))?;
    Ok((not_after - not_before).num_days().max(0) as u32)
}
