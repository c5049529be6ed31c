// src/core/crypto/keyset.rs
//! The configured set of data-encryption keys
//!
//! Ciphertext in the vault references the key that produced it by uuid,
//! so decryption works across rotations as long as the old key stays in
//! the set. Exactly one key is active; only it encrypts new values.

use std::collections::HashSet;

use crate::aliases::AesKey32;
use crate::config::Encryption;
use crate::core::Result;
use crate::error::VaultError;

pub struct EncryptionKey {
    uuid: String,
    key: AesKey32,
}

impl EncryptionKey {
    pub fn from_hex(uuid: &str, key_hex: &str) -> Result<Self> {
        let bytes = hex::decode(key_hex)
            .map_err(|_| VaultError::Config(format!("encryption key {uuid} is not valid hex")))?;
        let raw: [u8; 32] = bytes
            .try_into()
            .map_err(|_| VaultError::Config(format!("encryption key {uuid} must be 32 bytes")))?;
        Ok(Self {
            uuid: uuid.to_string(),
            key: AesKey32::new(raw),
        })
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub(crate) fn key(&self) -> &AesKey32 {
        &self.key
    }
}

impl std::fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptionKey")
            .field("uuid", &self.uuid)
            .field("key", &"[redacted]")
            .finish()
    }
}

pub struct EncryptionKeySet {
    keys: Vec<EncryptionKey>,
    active: usize,
}

impl EncryptionKeySet {
    /// Build the key set from the `[encryption]` config section.
    ///
    /// Rejects empty sets, duplicate uuids, malformed key material, and
    /// anything other than exactly one active key.
    pub fn from_config(encryption: &Encryption) -> Result<Self> {
        if encryption.keys.is_empty() {
            return Err(VaultError::Config(
                "at least one encryption key must be configured".into(),
            ));
        }

        let mut seen = HashSet::new();
        for entry in &encryption.keys {
            if !seen.insert(entry.uuid.as_str()) {
                return Err(VaultError::Config(format!(
                    "duplicate encryption key uuid {}",
                    entry.uuid
                )));
            }
        }

        let active_count = encryption.keys.iter().filter(|e| e.active).count();
        if active_count != 1 {
            return Err(VaultError::Config(format!(
                "exactly one encryption key must be active, found {active_count}"
            )));
        }

        let mut keys = Vec::with_capacity(encryption.keys.len());
        let mut active = 0;
        for (i, entry) in encryption.keys.iter().enumerate() {
            if entry.active {
                active = i;
            }
            keys.push(EncryptionKey::from_hex(&entry.uuid, &entry.key_hex)?);
        }

        Ok(Self { keys, active })
    }

    pub fn active(&self) -> &EncryptionKey {
        &self.keys[self.active]
    }

    pub fn get(&self, uuid: &str) -> Option<&EncryptionKey> {
        self.keys.iter().find(|k| k.uuid == uuid)
    }

    /// All configured key uuids, active first.
    pub fn uuids(&self) -> Vec<String> {
        let mut out = vec![self.active().uuid.clone()];
        out.extend(self.inactive_uuids());
        out
    }

    /// Key uuids eligible for rotation away from.
    pub fn inactive_uuids(&self) -> Vec<String> {
        self.keys
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != self.active)
            .map(|(_, k)| k.uuid.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl std::fmt::Debug for EncryptionKeySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptionKeySet")
            .field("keys", &self.uuids())
            .field("active", &self.active().uuid())
            .finish()
    }
}
