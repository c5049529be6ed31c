// tests/common.rs
//! Test utilities — tempdir-backed database pairs and loaded stores

#![allow(dead_code)] // each integration crate uses a different slice of this

use credential_vault::config::{Encryption, EncryptionKeyEntry};
use credential_vault::core::crypto::EncryptionKeySet;
use credential_vault::core::encryptor::DefaultEncryptor;
use credential_vault::core::store::CredentialStore;
use credential_vault::index::open_index_db;
use credential_vault::vault::open_vault_db;
use rusqlite::Connection;
use std::env;
use tempfile::TempDir;

pub const TEST_KEY_UUID: &str = "11111111-1111-4111-8111-111111111111";
pub const TEST_KEY_HEX: &str = "00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff";
pub const SECOND_KEY_UUID: &str = "22222222-2222-4222-8222-222222222222";
pub const SECOND_KEY_HEX: &str = "ffeeddccbbaa99887766554433221100ffeeddccbbaa99887766554433221100";

pub struct TestDbPair {
    pub vault: Connection,
    pub index: Connection,
    pub dir: TempDir,
}

impl TestDbPair {
    /// Point the CVAULT_* env vars at a fresh tempdir and open both
    /// databases. The env is process-wide, so callers run under #[serial].
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let vault_path = dir.path().join("vault.db");
        let index_path = dir.path().join("index.db");

        env::set_var("CVAULT_TEST_MODE", "1");
        env::set_var("CVAULT_VAULT_DB", vault_path.to_str().expect("utf8 path"));
        env::set_var("CVAULT_INDEX_DB", index_path.to_str().expect("utf8 path"));
        env::set_var("CVAULT_VAULT_KEY", "test-vault-secret-2025");
        env::set_var("CVAULT_INDEX_KEY", "test-index-secret-2025");

        let vault = open_vault_db().expect("open vault db");
        let index = open_index_db().expect("open index db");

        Self { vault, index, dir }
    }

    /// Reopen both databases at the paths the env still points to.
    /// Used after dropping a store to inspect what actually hit disk.
    pub fn reopen() -> (Connection, Connection) {
        let vault = open_vault_db().expect("reopen vault db");
        let index = open_index_db().expect("reopen index db");
        (vault, index)
    }
}

impl Default for TestDbPair {
    fn default() -> Self {
        Self::new()
    }
}

pub fn single_key_encryption() -> Encryption {
    Encryption {
        keys: vec![EncryptionKeyEntry {
            uuid: TEST_KEY_UUID.into(),
            key_hex: TEST_KEY_HEX.into(),
            active: true,
        }],
    }
}

/// Two configured keys; `second_active` picks which one encrypts new data.
pub fn two_key_encryption(second_active: bool) -> Encryption {
    Encryption {
        keys: vec![
            EncryptionKeyEntry {
                uuid: TEST_KEY_UUID.into(),
                key_hex: TEST_KEY_HEX.into(),
                active: !second_active,
            },
            EncryptionKeyEntry {
                uuid: SECOND_KEY_UUID.into(),
                key_hex: SECOND_KEY_HEX.into(),
                active: second_active,
            },
        ],
    }
}

pub fn test_keyset() -> EncryptionKeySet {
    keyset_from(&single_key_encryption())
}

pub fn keyset_from(encryption: &Encryption) -> EncryptionKeySet {
    EncryptionKeySet::from_config(encryption).expect("build key set")
}

pub struct TestVault {
    pub store: CredentialStore,
    pub dir: TempDir,
}

/// Fresh store over a tempdir database pair with the standard test key.
pub fn test_vault() -> TestVault {
    test_vault_with(test_keyset())
}

pub fn test_vault_with(keys: EncryptionKeySet) -> TestVault {
    let TestDbPair { vault, index, dir } = TestDbPair::new();
    TestVault {
        store: CredentialStore::new(vault, index, Box::new(DefaultEncryptor::new(keys))),
        dir,
    }
}
