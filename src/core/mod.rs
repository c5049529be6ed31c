// src/core/mod.rs
pub mod crypto;
pub mod encryptor;
pub mod generators;
pub mod index_db_ops;
pub mod name;
pub mod pem;
pub mod request;
pub mod store;
pub mod util;
pub mod value;
pub mod vault_db_ops;

pub use crypto::*;
pub use encryptor::*;
pub use index_db_ops::*;
pub use name::*;
pub use request::*;
pub use store::*;
pub use util::*;
pub use value::*;
pub use vault_db_ops::*;

// Keep only the absolute top-level public API here if needed
pub type Result<T> = std::result::Result<T, crate::error::VaultError>;
