// src/core/crypto/decrypt.rs
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};

use crate::aliases::AesKey32;
use crate::consts::AES_GCM_NONCE_LEN;
use crate::core::Result;
use crate::error::VaultError;

/// Decrypt a buffer. The GCM tag covers the whole ciphertext, so any
/// tampering — including a swapped nonce — surfaces as `Decrypt`.
pub fn decrypt_bytes(key: &AesKey32, nonce: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    if nonce.len() != AES_GCM_NONCE_LEN {
        return Err(VaultError::Decrypt);
    }
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.expose_secret()));
    let plaintext = cipher.decrypt(Nonce::from_slice(nonce), ciphertext)?;
    Ok(plaintext)
}
