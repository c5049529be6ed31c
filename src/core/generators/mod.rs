// src/core/generators/mod.rs
//! Server-side credential generation — one module per generatable type
pub mod certificate;
pub mod password;
pub mod ssh;
pub mod user;
