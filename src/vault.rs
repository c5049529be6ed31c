// src/vault.rs
use std::{env, fs, path::Path};

use rusqlite::Connection;

use crate::consts::{DB_KDF_ITERATIONS, FAST_DB_KDF_ITERATIONS};
use crate::core::Result;
use crate::error::VaultError;

/// Open the encrypted value store, creating the schema on first use.
pub fn open_vault_db() -> Result<Connection> {
    let config = crate::config::load();
    let db_path = env::var("CVAULT_VAULT_DB").unwrap_or_else(|_| config.paths.vault_db.clone());

    if let Some(parent) = Path::new(&db_path).parent() {
        let _ = fs::create_dir_all(parent);
    }

    let conn = Connection::open(&db_path)?;

    let key = if config.features.use_dev_keys {
        config.keys.vault_key.clone()
    } else {
        env::var("CVAULT_VAULT_KEY").map_err(|_| {
            VaultError::Config("CVAULT_VAULT_KEY required when dev keys are disabled".into())
        })?
    };

    let kdf_iter = if config.features.skip_kdf_slowdown {
        FAST_DB_KDF_ITERATIONS
    } else {
        DB_KDF_ITERATIONS
    };

    conn.execute_batch(&format!(
        r#"
        PRAGMA key = '{key}';
        PRAGMA cipher_page_size = 4096;
        PRAGMA kdf_iter = {kdf_iter};
        PRAGMA cipher_hmac_algorithm = HMAC_SHA512;
        PRAGMA cipher_kdf_algorithm = PBKDF2_HMAC_SHA512;
        PRAGMA cipher_plaintext_header_size = 0;

        CREATE TABLE IF NOT EXISTS encrypted_values (
            uuid       TEXT PRIMARY KEY,
            key_uuid   TEXT NOT NULL,
            ciphertext BLOB NOT NULL,
            nonce      BLOB NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_encrypted_values_key_uuid
            ON encrypted_values(key_uuid);
        "#
    ))?;

    Ok(conn)
}
