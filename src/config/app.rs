// src/config/app.rs
use super::defaults::*;
use serde::Deserialize;
use std::sync::OnceLock;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub keys: Keys,
    pub paths: Paths,
    pub features: Features,
    pub encryption: Encryption,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Keys {
    pub vault_key: String,
    pub index_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Paths {
    pub vault_db: String,
    pub index_db: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Features {
    pub use_dev_keys: bool,
    pub skip_kdf_slowdown: bool,
    pub allow_insecure_export: bool,
}

/// The data-encryption key set: every key ever used, exactly one active
#[derive(Debug, Clone, Deserialize)]
pub struct Encryption {
    pub keys: Vec<EncryptionKeyEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EncryptionKeyEntry {
    pub uuid: String,
    pub key_hex: String,
    #[serde(default)]
    pub active: bool,
}

static CONFIG: OnceLock<Config> = OnceLock::new();

pub fn load() -> &'static Config {
    CONFIG.get_or_init(|| {
        let config_path =
            std::env::var("CVAULT_CONFIG").unwrap_or_else(|_| "dev-config.toml".to_string());

        let mut conf: Config = if std::path::Path::new(&config_path).exists() {
            let content =
                std::fs::read_to_string(&config_path).expect("Failed to read dev-config.toml");
            toml::from_str(&content).expect("Invalid TOML in dev-config.toml")
        } else {
            eprintln!("Warning: dev-config.toml not found — using built-in defaults");
            Config {
                keys: default_keys(),
                paths: default_paths(),
                features: default_features(),
                encryption: default_encryption(),
            }
        };

        // Critical for tests: force real env-var keys instead of dev keys
        if std::env::var("CVAULT_TEST_MODE").is_ok() {
            conf.features.use_dev_keys = false;
        }

        // Operators can inject the active key material without a config file
        if let Ok(key_hex) = std::env::var("CVAULT_ENCRYPTION_KEY") {
            for entry in conf.encryption.keys.iter_mut().filter(|e| e.active) {
                entry.key_hex = key_hex.clone();
            }
        }

        conf
    })
}
