// src/handlers/mod.rs
//! Operation handlers — the request-facing layer over the store
//!
//! Each handler owns one operation family behind an object-safe trait,
//! so callers can inject storage without caring which implementation
//! sits behind it. The defaults log at operation boundaries; the store
//! underneath logs at debug level.

mod generate;
mod regenerate;
mod set;

pub use generate::{DefaultGenerateHandler, GenerateHandler};
pub use regenerate::{DefaultRegenerateHandler, RegenerateHandler};
pub use set::{DefaultSetHandler, SetHandler};
