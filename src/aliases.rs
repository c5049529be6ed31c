// src/aliases.rs
//! Re-exports secure-gate's ergonomic secret types
//!
//! These are the canonical types used throughout credential-vault.

pub use secure_gate::{dynamic_alias, fixed_alias, SecureConversionsExt, SecureRandomExt};

// Fixed-size secrets
fixed_alias!(AesKey32, 32); // 256-bit AES-GCM data-encryption key
fixed_alias!(GcmNonce12, 12); // per-value random GCM nonce
fixed_alias!(SigningSeed32, 32); // Ed25519 seed for ssh / certificate material

// Dynamic secrets
dynamic_alias!(ClearText, String); // decrypted credential material in transit
