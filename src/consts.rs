// src/consts.rs
//! Shared constants — security parameters and generation defaults

/// Recommended KDF iterations for SQLCipher databases (2025+)
// ~0.1–0.2s on modern hardware — good default
pub const DB_KDF_ITERATIONS: u32 = 256_000;

/// Reduced KDF iterations when `features.skip_kdf_slowdown` is set (dev/test only)
pub const FAST_DB_KDF_ITERATIONS: u32 = 4_000;

/// AES-256-GCM nonce length in bytes
pub const AES_GCM_NONCE_LEN: usize = 12;

/// AES-256-GCM authentication tag length in bytes
pub const AES_GCM_TAG_LEN: usize = 16;

/// Rows re-encrypted per transaction during key rotation
pub const ROTATION_BATCH_SIZE: usize = 50;

/// Maximum length of a credential name, including the leading slash
pub const MAX_NAME_LENGTH: usize = 1024;

/// Generated password length when the request does not specify one
pub const DEFAULT_PASSWORD_LENGTH: usize = 30;

/// Requested lengths outside this range fall back to the default
pub const MIN_PASSWORD_LENGTH: usize = 4;
pub const MAX_PASSWORD_LENGTH: usize = 200;

/// Special characters available to password generation
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*";

/// Length of generated usernames
pub const GENERATED_USERNAME_LENGTH: usize = 20;

/// Certificate validity in days when the request does not specify one
pub const DEFAULT_CERTIFICATE_DURATION_DAYS: u32 = 365;

/// Upper bound on certificate validity
pub const MAX_CERTIFICATE_DURATION_DAYS: u32 = 3650;
