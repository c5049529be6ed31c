// src/config/defaults.rs
use crate::config::app::{Encryption, EncryptionKeyEntry, Features, Keys, Paths};

pub const DEFAULT_VAULT_KEY: &str = "dev-vault-db-password-2025";
pub const DEFAULT_INDEX_KEY: &str = "dev-index-db-password-2025";

/// Dev-only data-encryption key — never ship a vault keyed with this
pub const DEV_ENCRYPTION_KEY_UUID: &str = "00000000-0000-4000-8000-000000000001";
pub const DEV_ENCRYPTION_KEY_HEX: &str =
    "a6e17f8f9c0b4d2e8a51c3b7d9e0f24368b1a5c7d3e9f0a2b4c6d8e0f1a3b5c7";

pub fn default_keys() -> Keys {
    Keys {
        vault_key: DEFAULT_VAULT_KEY.into(),
        index_key: DEFAULT_INDEX_KEY.into(),
    }
}

pub fn default_paths() -> Paths {
    Paths {
        vault_db: "tests/data/vault.db".into(),
        index_db: "tests/data/index.db".into(),
    }
}

pub fn default_features() -> Features {
    Features {
        use_dev_keys: true,
        skip_kdf_slowdown: true,
        allow_insecure_export: true,
    }
}

pub fn default_encryption() -> Encryption {
    Encryption {
        keys: vec![EncryptionKeyEntry {
            uuid: DEV_ENCRYPTION_KEY_UUID.into(),
            key_hex: DEV_ENCRYPTION_KEY_HEX.into(),
            active: true,
        }],
    }
}
