// src/bin/rotate_keys.rs
//! Re-key every stored secret under the active encryption key
//!
//! Run after adding a new active key to `[[encryption.keys]]` while the
//! old keys are still listed. Safe to interrupt and re-run: finished
//! batches stay rotated.

use anyhow::{Context, Result};
use credential_vault::config;
use credential_vault::core::crypto::EncryptionKeySet;
use credential_vault::core::encryptor::DefaultEncryptor;
use credential_vault::core::index_db_ops;
use credential_vault::index::open_index_db;
use credential_vault::rotation::{rotate_encrypted_values, DecryptableDataDetector};
use credential_vault::vault::open_vault_db;
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    info!("Credential Vault — encryption key rotation");

    let config = config::load();
    let keys = EncryptionKeySet::from_config(&config.encryption)
        .context("invalid [encryption] key configuration")?;
    info!(
        "Loaded {} encryption key(s), active key {}",
        keys.len(),
        keys.active().uuid()
    );

    let mut vault =
        open_vault_db().context("Failed to open vault database — is CVAULT_VAULT_KEY set?")?;
    let index =
        open_index_db().context("Failed to open index database — is CVAULT_INDEX_KEY set?")?;

    DecryptableDataDetector::check(&index, &vault, &keys)
        .context("stored credentials are not decryptable with the configured keys")?;

    let encryptor = DefaultEncryptor::new(keys);
    let report = rotate_encrypted_values(&mut vault, &encryptor)?;

    let versions = index_db_ops::count_versions(&index)?;
    println!("\n=== ROTATION COMPLETE ===");
    println!("Candidates: {}", report.candidates);
    println!("Rotated:    {}", report.rotated);
    println!("Batches:    {}", report.batches);
    println!("Credential versions on file: {versions}");

    Ok(())
}
