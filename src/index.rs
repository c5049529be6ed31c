// src/index.rs
use crate::consts::{DB_KDF_ITERATIONS, FAST_DB_KDF_ITERATIONS};
use crate::core::Result;
use crate::error::VaultError;
use rusqlite::Connection;
use std::{env, fs, path::Path};

/// Open the credential metadata index, creating the schema on first use.
///
/// The index holds only public material (names, types, public keys,
/// certificates). Everything secret lives in the vault DB as ciphertext,
/// referenced by `value_uuid` / `params_uuid`.
pub fn open_index_db() -> Result<Connection> {
    let config = crate::config::load();

    let db_path = env::var("CVAULT_INDEX_DB").unwrap_or_else(|_| config.paths.index_db.clone());

    if let Some(parent) = Path::new(&db_path).parent() {
        let _ = fs::create_dir_all(parent);
    }

    let conn = Connection::open(&db_path)?;

    let key = if config.features.use_dev_keys {
        config.keys.index_key.clone()
    } else {
        env::var("CVAULT_INDEX_KEY").map_err(|_| {
            VaultError::Config("CVAULT_INDEX_KEY required when dev keys are disabled".into())
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
        "#
    ))?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS credentials (
            name TEXT PRIMARY KEY,
            uuid TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS credential_versions (
            uuid TEXT PRIMARY KEY,
            credential_name TEXT NOT NULL,
            credential_type TEXT NOT NULL,
            value_uuid TEXT NOT NULL,
            params_uuid TEXT,
            checksum TEXT NOT NULL,
            version_created_at TEXT NOT NULL,
            username TEXT,
            salt TEXT,
            public_key TEXT,
            certificate TEXT,
            ca TEXT,
            ca_name TEXT,
            is_ca INTEGER NOT NULL DEFAULT 0,
            self_signed INTEGER NOT NULL DEFAULT 0,
            expiry_date TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_versions_name ON credential_versions(credential_name);
        CREATE INDEX IF NOT EXISTS idx_versions_ca_name ON credential_versions(ca_name);
        CREATE INDEX IF NOT EXISTS idx_versions_created ON credential_versions(version_created_at);
        "#,
    )?;

    Ok(conn)
}
