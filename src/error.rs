// src/error.rs
//! Public error type for the entire crate

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VaultError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("encryption failed")]
    Encrypt,

    #[error("decryption failed: ciphertext rejected")]
    Decrypt,

    #[error("no encryption key with uuid {0} in the configured key set")]
    KeyNotKnown(String),

    #[error("invalid credential name: {0}")]
    InvalidName(&'static str),

    #[error("invalid request: {0}")]
    Validation(String),

    #[error("credential not found: {0}")]
    NotFound(String),

    #[error("credential type {0} cannot be generated")]
    CannotGenerate(&'static str),

    #[error("cannot regenerate {name}: {reason}")]
    CannotRegenerate { name: String, reason: &'static str },

    #[error("signature verification failed")]
    Signature,

    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0} stored value(s), none decryptable with the configured keys")]
    NoDecryptableKeys(u64),
}

// aes_gcm::Error is deliberately opaque — never leak cipher internals
impl From<aes_gcm::Error> for VaultError {
    fn from(_: aes_gcm::Error) -> Self {
        VaultError::Decrypt
    }
}

impl From<ed25519_dalek::SignatureError> for VaultError {
    fn from(_: ed25519_dalek::SignatureError) -> Self {
        VaultError::Signature
    }
}

impl From<argon2::password_hash::Error> for VaultError {
    fn from(err: argon2::password_hash::Error) -> Self {
        VaultError::Hash(err.to_string())
    }
}
