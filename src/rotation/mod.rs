// src/rotation/mod.rs
//! Encryption-key rotation — re-key ciphertext rows under the active key
//!
//! Rotation walks the vault in fixed-size batches, decrypting each row
//! with the key that wrote it and re-encrypting under the active key.
//! Row uuids never change, so index references stay valid throughout.
//! Each batch commits in its own transaction; an interrupted run leaves
//! a smaller candidate set for the next one.

use rusqlite::Connection;
use tracing::{debug, info};

use crate::consts::ROTATION_BATCH_SIZE;
use crate::core::crypto::EncryptionKeySet;
use crate::core::encryptor::{DefaultEncryptor, Encryptor};
use crate::core::index_db_ops;
use crate::core::vault_db_ops;
use crate::core::Result;
use crate::error::VaultError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationReport {
    /// Rows encrypted under a non-active key when the run started.
    pub candidates: u64,
    pub rotated: u64,
    pub batches: u64,
}

/// Re-encrypt every row written under a non-active key. Returns counts;
/// a vault already on the active key yields an all-zero report.
pub fn rotate_encrypted_values(
    vault: &mut Connection,
    encryptor: &DefaultEncryptor,
) -> Result<RotationReport> {
    let stale_keys = encryptor.key_set().inactive_uuids();
    if stale_keys.is_empty() {
        return Ok(RotationReport {
            candidates: 0,
            rotated: 0,
            batches: 0,
        });
    }

    let candidates = vault_db_ops::count_encrypted_by_keys(vault, &stale_keys)?;
    let mut rotated = 0u64;
    let mut batches = 0u64;

    loop {
        let batch = vault_db_ops::find_encrypted_by_keys(vault, &stale_keys, ROTATION_BATCH_SIZE)?;
        if batch.is_empty() {
            break;
        }

        let tx = vault.transaction()?;
        for row in &batch {
            let clear = encryptor.decrypt(Some(row))?;
            let fresh = encryptor.encrypt(clear.as_deref())?;
            vault_db_ops::replace_ciphertext(&tx, &row.uuid, &fresh)?;
        }
        tx.commit()?;

        rotated += batch.len() as u64;
        batches += 1;
        debug!(batch = batches, rotated, "rotated ciphertext batch");
    }

    info!(candidates, rotated, batches, "key rotation finished");
    Ok(RotationReport {
        candidates,
        rotated,
        batches,
    })
}

/// Sanity gate run before rotation: a vault with versions but no row
/// decryptable by any configured key means the key material is wrong,
/// and rotating would only fail row by row.
pub struct DecryptableDataDetector;

impl DecryptableDataDetector {
    pub fn check(
        index: &Connection,
        vault: &Connection,
        keys: &EncryptionKeySet,
    ) -> Result<()> {
        let versions = index_db_ops::count_versions(index)?;
        if versions == 0 {
            return Ok(());
        }
        let known = keys.uuids();
        let decryptable = vault_db_ops::count_encrypted_by_keys(vault, &known)?;
        if decryptable == 0 {
            return Err(VaultError::NoDecryptableKeys(versions));
        }
        Ok(())
    }
}
