// src/core/generators/ssh.rs
//! Ed25519 SSH keypairs with OpenSSH public-key formatting

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use base64::Engine as _;
use ed25519_dalek::SigningKey;
use sha2::{Digest, Sha256};

use crate::aliases::{SecureRandomExt, SigningSeed32};
use crate::core::pem::{pem_encode, PRIVATE_KEY_LABEL};
use crate::core::request::SshGenerationParameters;
use crate::core::value::SshValue;

const KEY_TYPE: &str = "ssh-ed25519";

/// Generate a fresh keypair. The public key is a standard OpenSSH
/// `ssh-ed25519` line (with the requested comment appended); the private
/// key is the seed, PEM-framed.
pub fn generate_ssh(params: &SshGenerationParameters) -> SshValue {
    let seed = SigningSeed32::random();
    let signing = SigningKey::from_bytes(seed.expose_secret());
    let blob = public_key_blob(&signing.verifying_key().to_bytes());

    let mut public_key = format!("{KEY_TYPE} {}", STANDARD.encode(&blob));
    if let Some(comment) = params.ssh_comment.as_deref() {
        if !comment.is_empty() {
            public_key.push(' ');
            public_key.push_str(comment);
        }
    }

    SshValue {
        public_key,
        private_key: pem_encode(PRIVATE_KEY_LABEL, seed.expose_secret()),
    }
}

// RFC 4253 wire encoding: length-prefixed key type, then the raw key
fn public_key_blob(key: &[u8; 32]) -> Vec<u8> {
    let mut blob = Vec::with_capacity(4 + KEY_TYPE.len() + 4 + key.len());
    blob.extend_from_slice(&(KEY_TYPE.len() as u32).to_be_bytes());
    blob.extend_from_slice(KEY_TYPE.as_bytes());
    blob.extend_from_slice(&(key.len() as u32).to_be_bytes());
    blob.extend_from_slice(key);
    blob
}

/// `SHA256:` fingerprint of an OpenSSH public-key line, matching what
/// `ssh-keygen -lf` prints. `None` for lines we cannot parse.
pub fn fingerprint(public_key: &str) -> Option<String> {
    let b64 = public_key.split_whitespace().nth(1)?;
    let blob = STANDARD.decode(b64).ok()?;
    let digest = Sha256::digest(&blob);
    Some(format!("SHA256:{}", STANDARD_NO_PAD.encode(digest)))
}

/// The comment trailing an OpenSSH public-key line, if any.
pub fn comment(public_key: &str) -> Option<String> {
    let mut parts = public_key.splitn(3, ' ');
    parts.next()?;
    parts.next()?;
    parts
        .next()
        .map(str::to_string)
        .filter(|c| !c.is_empty())
}
