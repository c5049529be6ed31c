// src/lib.rs
//! credential-vault — encrypted, versioned credential storage
//!
//! Features:
//! - AES-256-GCM value encryption with multi-key rotation
//! - Generated passwords, users, Ed25519 ssh keys and certificates
//! - Split vault + index SQLCipher databases
//! - Full secure-gate v0.5.8 integration

pub mod aliases;
pub mod config;
pub mod consts;
pub mod core;
pub mod enums;
pub mod export;
pub mod handlers;
pub mod index;
pub mod rotation;
pub mod vault;
pub mod views;

pub mod error;

// Re-export everything users need at the crate root
pub use aliases::{AesKey32, SecureConversionsExt, SecureRandomExt};
pub use config::load as load_config;
pub use crate::core::store::{CredentialStore, CredentialVersion};
pub use crate::core::{CredentialName, DefaultEncryptor, EncryptedValue, Encryptor, Result};
pub use enums::{CredentialType, WriteMode};
pub use error::VaultError;
pub use export::export_to_json;
pub use handlers::{
    DefaultGenerateHandler, DefaultRegenerateHandler, DefaultSetHandler, GenerateHandler,
    RegenerateHandler, SetHandler,
};
pub use views::{BulkRegenerateResults, CredentialView, FindResults};
