// src/export/json.rs
use chrono::Utc;
use serde_json::json;
use tracing::info;

use crate::core::store::CredentialStore;
use crate::core::Result;
use crate::error::VaultError;
use crate::views::CredentialView;

/// Export the latest version of every credential, decrypted, to a
/// portable JSON file. Returns the number of credentials written.
///
/// SECURITY WARNING: the file contains every secret in cleartext.
/// Refuses to run unless `features.allow_insecure_export` is enabled.
pub fn export_to_json(store: &CredentialStore, path: &str) -> Result<u64> {
    let config = crate::config::load();
    if !config.features.allow_insecure_export {
        return Err(VaultError::Config(
            "insecure export is disabled (features.allow_insecure_export)".into(),
        ));
    }

    let mut credentials = Vec::new();
    for name in store.credential_names()? {
        // Names come from the index, so the latest version must exist
        let version = store
            .latest_version(&name)?
            .ok_or_else(|| VaultError::NotFound(name.to_string()))?;
        let view = CredentialView::from_version(&version)?;
        credentials.push(serde_json::to_value(&view)?);
    }

    let total = credentials.len() as u64;
    let export = json!({
        "export_format": "credential-vault-v1",
        "exported_at": Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        "exporter_version": env!("CARGO_PKG_VERSION"),
        "total_credentials": total,
        "warning": "THIS FILE CONTAINS ALL CREDENTIALS IN PLAINTEXT. ENCRYPT OR DELETE IMMEDIATELY AFTER USE.",
        "credentials": credentials
    });

    std::fs::write(path, serde_json::to_string_pretty(&export)?)?;
    info!(total, path, "exported decrypted credentials");

    Ok(total)
}
