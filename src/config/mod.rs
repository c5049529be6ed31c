// src/config/mod.rs
//! Configuration system for credential-vault
//!
//! Central, lazy-loaded global config with TOML + env overrides.

pub use app::{load, Config, Encryption, EncryptionKeyEntry, Features, Keys, Paths};

mod app;
pub mod defaults;
