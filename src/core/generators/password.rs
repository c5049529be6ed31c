// src/core/generators/password.rs
//! Random string generation with guaranteed character-class coverage

use rand::seq::SliceRandom;
use rand::Rng;

use crate::consts::SPECIAL_CHARACTERS;
use crate::core::request::StringGenerationParameters;

const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";

// Assembly order is fixed: special, digits, upper, lower
fn character_classes(params: &StringGenerationParameters) -> Vec<&'static str> {
    let mut classes = Vec::new();
    if params.include_special {
        classes.push(SPECIAL_CHARACTERS);
    }
    if !params.exclude_number {
        classes.push(DIGITS);
    }
    if !params.exclude_upper {
        classes.push(UPPER);
    }
    if !params.exclude_lower {
        classes.push(LOWER);
    }
    classes
}

/// Generate a random string honoring the parameters.
///
/// Every active character class contributes at least one character when
/// the length allows it, then the rest is drawn from the union and the
/// whole string shuffled. Callers validate the parameters first; an
/// all-excluded parameter set never reaches this function.
pub fn generate_password(params: &StringGenerationParameters) -> String {
    let classes = character_classes(params);
    debug_assert!(!classes.is_empty());
    if classes.is_empty() {
        return String::new();
    }

    let length = params.effective_length();
    let mut rng = rand::rng();
    let mut chars: Vec<char> = Vec::with_capacity(length);

    for class in classes.iter().take(length) {
        let bytes = class.as_bytes();
        chars.push(bytes[rng.random_range(0..bytes.len())] as char);
    }

    let union = classes.concat().into_bytes();
    while chars.len() < length {
        chars.push(union[rng.random_range(0..union.len())] as char);
    }

    chars.shuffle(&mut rng);
    chars.into_iter().collect()
}
