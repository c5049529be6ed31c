// src/core/generators/user.rs
//! User credential generation — username, password, argon2 salt

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::Argon2;

use crate::consts::GENERATED_USERNAME_LENGTH;
use crate::core::generators::password::generate_password;
use crate::core::request::StringGenerationParameters;
use crate::core::value::UserValue;
use crate::core::Result;

/// Generate a user credential. The username comes from the parameters
/// when present, otherwise it is generated (lowercase + digits).
pub fn generate_user(params: &StringGenerationParameters) -> UserValue {
    let username = params.username.clone().unwrap_or_else(generate_username);
    let password = generate_password(params);
    UserValue {
        username: Some(username),
        password,
        salt: Some(new_salt()),
    }
}

fn generate_username() -> String {
    let params = StringGenerationParameters {
        length: GENERATED_USERNAME_LENGTH,
        exclude_upper: true,
        ..Default::default()
    };
    generate_password(&params)
}

/// Fresh argon2 salt in the PHC base64 alphabet
pub fn new_salt() -> String {
    SaltString::generate(&mut OsRng).as_str().to_string()
}

/// Argon2id hash shown in user views. Deterministic for a given
/// password + salt, so repeated reads of a version agree.
pub fn password_hash(password: &str, salt: &str) -> Result<String> {
    let salt = SaltString::from_b64(salt)?;
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}
