//! Random verification text.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::vocabulary::SPOKEN_LETTERS;

const DIGITS: &str = "0123456789";

/// Character set a captcha is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Charset {
    /// `0-9` only. Clearest when spoken.
    #[default]
    Digits,
    /// Digits plus every letter with a spoken form.
    Alphanumeric,
}

impl Charset {
    /// Characters in this set.
    pub fn chars(self) -> Vec<char> {
        match self {
            Charset::Digits => DIGITS.chars().collect(),
            Charset::Alphanumeric => DIGITS.chars().chain(SPOKEN_LETTERS.chars()).collect(),
        }
    }
}

/// Draws `length` characters uniformly, with replacement.
pub fn generate_text<R: Rng + ?Sized>(length: usize, charset: Charset, rng: &mut R) -> String {
    let chars = charset.chars();
    (0..length)
        .filter_map(|_| chars.choose(rng).copied())
        .collect()
}
