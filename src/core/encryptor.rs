// src/core/encryptor.rs
//! The seam between credential material and ciphertext at rest
//!
//! Handlers and the store only ever see [`Encryptor`]; the AES-256-GCM
//! implementation behind it is swappable in tests. Absent values are a
//! first-class input: `encrypt(None)` produces real ciphertext that
//! decrypts back to `None`, so the vault never needs a NULL row to
//! represent "nothing stored".

use uuid::Uuid;

use crate::core::crypto::{decrypt_bytes, encrypt_bytes, EncryptionKeySet};
use crate::core::Result;
use crate::error::VaultError;

/// One encrypted value at rest.
///
/// `key_uuid` names the data-encryption key that produced the ciphertext,
/// which is what lets rotation find rows encrypted under retired keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedValue {
    pub uuid: String,
    pub key_uuid: String,
    pub ciphertext: Vec<u8>,
    pub nonce: Vec<u8>,
}

pub trait Encryptor {
    /// Encrypt `clear_text` under the active key. `None` is encryptable.
    fn encrypt(&self, clear_text: Option<&str>) -> Result<EncryptedValue>;

    /// Decrypt with whichever configured key produced the value.
    ///
    /// `None` in, `None` out. Unknown `key_uuid` → [`VaultError::KeyNotKnown`];
    /// tampered ciphertext → [`VaultError::Decrypt`].
    fn decrypt(&self, encryption: Option<&EncryptedValue>) -> Result<Option<String>>;
}

// Frame byte ahead of the plaintext: present values carry UTF-8 after it,
// absent values carry nothing. Keeps Some("") and None distinct at rest.
const FRAME_PRESENT: u8 = 1;
const FRAME_ABSENT: u8 = 0;

pub struct DefaultEncryptor {
    keys: EncryptionKeySet,
}

impl DefaultEncryptor {
    pub fn new(keys: EncryptionKeySet) -> Self {
        Self { keys }
    }

    pub fn key_set(&self) -> &EncryptionKeySet {
        &self.keys
    }
}

impl Encryptor for DefaultEncryptor {
    fn encrypt(&self, clear_text: Option<&str>) -> Result<EncryptedValue> {
        let mut framed = Vec::with_capacity(1 + clear_text.map_or(0, str::len));
        match clear_text {
            Some(text) => {
                framed.push(FRAME_PRESENT);
                framed.extend_from_slice(text.as_bytes());
            }
            None => framed.push(FRAME_ABSENT),
        }

        let active = self.keys.active();
        let (nonce, ciphertext) = encrypt_bytes(active.key(), &framed)?;

        Ok(EncryptedValue {
            uuid: Uuid::new_v4().to_string(),
            key_uuid: active.uuid().to_string(),
            ciphertext,
            nonce: nonce.expose_secret().to_vec(),
        })
    }

    fn decrypt(&self, encryption: Option<&EncryptedValue>) -> Result<Option<String>> {
        let Some(value) = encryption else {
            return Ok(None);
        };

        let key = self
            .keys
            .get(&value.key_uuid)
            .ok_or_else(|| VaultError::KeyNotKnown(value.key_uuid.clone()))?;

        let framed = decrypt_bytes(key.key(), &value.nonce, &value.ciphertext)?;
        match framed.split_first() {
            Some((&FRAME_PRESENT, rest)) => {
                let text = String::from_utf8(rest.to_vec()).map_err(|_| VaultError::Decrypt)?;
                Ok(Some(text))
            }
            Some((&FRAME_ABSENT, [])) => Ok(None),
            _ => Err(VaultError::Decrypt),
        }
    }
}
