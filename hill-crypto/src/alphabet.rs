//! Letter <-> symbol tables for the cipher.
//!
//! The classic Hill convention is A=1, B=2, ..., Y=25, Z=0: the last letter
//! wraps to symbol 0 and doubles as the padding letter. An [`Alphabet`] is an
//! immutable value built once and passed explicitly to the codec operations.

use crate::errors::HillCryptoError;
use crate::ring::Vector;

use lazy_static::lazy_static;

use std::collections::HashMap;

lazy_static! {
    /// The classic A-Z alphabet over Z_26, shared by callers that don't need
    /// a custom letter set.
    pub static ref CLASSIC: Alphabet = Alphabet::classic();
}

/// A bidirectional mapping between letters and ring symbols.
///
/// The i-th letter maps to symbol `(i + 1) mod len`, so the final letter
/// takes symbol 0 and serves as the wrap (padding) letter.
#[derive(Debug, Clone)]
pub struct Alphabet {
    symbol_by_letter: HashMap<char, i64>,
    letter_by_symbol: HashMap<i64, char>,
    wrap_letter: char,
}

impl Alphabet {
    /// Builds an alphabet from a sequence of distinct letters.
    ///
    /// # Errors
    ///
    /// Returns `HillCryptoError::InvalidModulus` when fewer than two distinct
    /// letters are given (the ring needs a modulus of at least 2).
    pub fn try_with(letters: &str) -> Result<Self, HillCryptoError> {
        let letters: Vec<char> = letters.chars().collect();
        let len = letters.len() as i64;
        if len < 2 {
            return Err(HillCryptoError::InvalidModulus(format!(
                "Alphabet needs at least 2 letters, got {}",
                len
            )));
        }

        let mut symbol_by_letter = HashMap::new();
        let mut letter_by_symbol = HashMap::new();
        for (i, &letter) in letters.iter().enumerate() {
            let symbol = (i as i64 + 1) % len;
            if symbol_by_letter.insert(letter, symbol).is_some() {
                return Err(HillCryptoError::InvalidCharacter(format!(
                    "Duplicate letter '{}' in alphabet",
                    letter
                )));
            }
            letter_by_symbol.insert(symbol, letter);
        }

        Ok(Alphabet {
            symbol_by_letter,
            letter_by_symbol,
            wrap_letter: letters[letters.len() - 1],
        })
    }

    /// The classic Hill alphabet: A=1, ..., Y=25, Z=0, modulus 26.
    pub fn classic() -> Self {
        let letters: String = ('A'..='Z').collect();
        Self::try_with(&letters).expect("A-Z is a valid alphabet")
    }

    /// Number of letters, which is also the ring modulus this alphabet
    /// pairs with.
    pub fn modulus(&self) -> u64 {
        self.symbol_by_letter.len() as u64
    }

    /// The symbol used for padding, always 0.
    pub fn wrap_symbol(&self) -> i64 {
        0
    }

    /// The letter carrying symbol 0 ('Z' in the classic alphabet).
    pub fn wrap_letter(&self) -> char {
        self.wrap_letter
    }

    /// Whether `letter` belongs to this alphabet.
    pub fn contains(&self, letter: char) -> bool {
        self.symbol_by_letter.contains_key(&letter)
    }

    /// Maps text to the flat symbol sequence.
    ///
    /// # Errors
    ///
    /// Returns `HillCryptoError::InvalidCharacter` on the first character
    /// outside the alphabet. Filtering (spaces, punctuation, case) is the
    /// caller's job, done before this boundary.
    pub fn text_to_symbols(&self, text: &str) -> Result<Vector, HillCryptoError> {
        text.chars()
            .map(|letter| {
                self.symbol_by_letter.get(&letter).copied().ok_or_else(|| {
                    HillCryptoError::InvalidCharacter(format!(
                        "Character '{}' is not in the cipher alphabet",
                        letter
                    ))
                })
            })
            .collect()
    }

    /// Maps a symbol sequence back to text.
    ///
    /// # Errors
    ///
    /// Returns `HillCryptoError::InvalidCharacter` on a symbol outside
    /// `[0, modulus)`.
    pub fn symbols_to_text(&self, symbols: &[i64]) -> Result<String, HillCryptoError> {
        symbols
            .iter()
            .map(|&symbol| {
                self.letter_by_symbol.get(&symbol).copied().ok_or_else(|| {
                    HillCryptoError::InvalidCharacter(format!(
                        "Symbol {} has no letter in an alphabet of {} symbols",
                        symbol,
                        self.modulus()
                    ))
                })
            })
            .collect()
    }
}
