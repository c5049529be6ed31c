// src/core/pem.rs
//! Minimal PEM framing for vault-issued key and certificate material

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::core::Result;
use crate::error::VaultError;

pub const CERTIFICATE_LABEL: &str = "VAULT CERTIFICATE";
pub const PRIVATE_KEY_LABEL: &str = "VAULT ED25519 PRIVATE KEY";

pub fn pem_encode(label: &str, der: &[u8]) -> String {
    let b64 = STANDARD.encode(der);
    let mut out = format!("-----BEGIN {label}-----\n");
    for chunk in b64.as_bytes().chunks(64) {
        // base64 output is pure ASCII, chunking bytes is safe
        out.push_str(&String::from_utf8_lossy(chunk));
        out.push('\n');
    }
    out.push_str(&format!("-----END {label}-----\n"));
    out
}

pub fn pem_decode(label: &str, pem: &str) -> Result<Vec<u8>> {
    let begin = format!("-----BEGIN {label}-----");
    let end = format!("-----END {label}-----");

    let body: String = pem
        .lines()
        .map(str::trim)
        .skip_while(|line| *line != begin)
        .skip(1)
        .take_while(|line| *line != end)
        .collect();

    if body.is_empty() {
        return Err(VaultError::Validation(format!("not a {label} PEM")));
    }
    STANDARD
        .decode(body)
        .map_err(|_| VaultError::Validation(format!("invalid base64 in {label} PEM")))
}
