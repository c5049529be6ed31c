// src/core/crypto/encrypt.rs
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};

use crate::aliases::{AesKey32, GcmNonce12, SecureRandomExt};
use crate::core::Result;
use crate::error::VaultError;

/// Encrypt a buffer under a fresh random nonce → (nonce, ciphertext + tag)
pub fn encrypt_bytes(key: &AesKey32, plaintext: &[u8]) -> Result<(GcmNonce12, Vec<u8>)> {
    let nonce = GcmNonce12::random();
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.expose_secret()));
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(nonce.expose_secret()), plaintext)
        .map_err(|_| VaultError::Encrypt)?;
    Ok((nonce, ciphertext))
}
