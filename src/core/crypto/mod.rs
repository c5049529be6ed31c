// src/core/crypto/mod.rs
//! Pure cryptographic operations — no I/O, no database
//!
//! All functions work exclusively on in-memory buffers.
//! Designed for maximum clarity, testability, and future algorithm support.
mod decrypt;
mod encrypt;
mod keyset;

pub use decrypt::decrypt_bytes;
pub use encrypt::encrypt_bytes;
pub use keyset::{EncryptionKey, EncryptionKeySet};
