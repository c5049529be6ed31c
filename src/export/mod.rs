// src/export/mod.rs
//! Export — decrypted snapshots of the vault, for backup or migration
//!
//! Every export is plaintext by definition. The JSON exporter refuses
//! to run unless `features.allow_insecure_export` is set.

pub use json::export_to_json;

pub mod json;
