//! The Hill block cipher over Z_m.
//!
//! A [`HillKey`] couples a square key matrix with its precomputed modular
//! inverse. Encryption splits the symbol stream into blocks of the matrix
//! order and multiplies each block by the key; decryption multiplies by the
//! inverse. Blocks are independent, with no inter-block chaining: this is the
//! textbook ECB-like mode of the Hill cipher, kept on purpose, weakness and
//! all.

use crate::alphabet::Alphabet;
use crate::errors::HillCryptoError;
use crate::ring::matrix_ops::{determinant_mod, matrix_inverse, matrix_vector_mul};
use crate::ring::{Matrix, Ring, Vector, gcd};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use std::fmt;

/// A validated Hill cipher key: the matrix, its ring, and its inverse.
///
/// Construction is the invertibility gate. Once a `HillKey` exists, the
/// inverse is already computed and `A · A⁻¹ ≡ I (mod m)` holds, so block
/// decoding can never fail for arithmetic reasons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HillKey {
    ring: Ring,
    matrix: Matrix,
    inverse: Matrix,
}

impl HillKey {
    /// Validates `matrix` as a Hill key over `ring` and precomputes its
    /// inverse.
    ///
    /// Entries may be arbitrary signed integers; they are normalized into
    /// `[0, m)` first.
    ///
    /// # Errors
    ///
    /// * [`HillCryptoError::DimensionMismatch`] — not square, or empty.
    /// * [`HillCryptoError::UnsupportedOrder`] — order above the
    ///   cofactor-expansion ceiling.
    /// * [`HillCryptoError::NoInverse`] — `gcd(det(matrix) mod m, m) != 1`.
    ///   Recoverable: try another matrix or modulus.
    pub fn try_with(matrix: Matrix, ring: Ring) -> Result<Self, HillCryptoError> {
        let matrix: Matrix = matrix
            .iter()
            .map(|row| row.iter().map(|&v| ring.normalize(v)).collect())
            .collect();

        let det = determinant_mod(&matrix, &ring)?;
        log::debug!(
            "key setup: order {}, det {} (mod {}), gcd(det, m) = {}",
            matrix.len(),
            det,
            ring.modulus(),
            gcd(det, ring.modulus() as i64)
        );

        let inverse = matrix_inverse(&matrix, &ring)?;
        log::debug!("key inverse: {:?}", inverse);

        Ok(Self {
            ring,
            matrix,
            inverse,
        })
    }

    /// The block size n.
    pub fn order(&self) -> usize {
        self.matrix.len()
    }

    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    /// The key matrix, entries in `[0, m)`.
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// The modular inverse of the key matrix.
    pub fn inverse(&self) -> &Matrix {
        &self.inverse
    }

    /// Applies the key matrix to every block independently, preserving
    /// block order.
    ///
    /// # Errors
    ///
    /// Returns `HillCryptoError::DimensionMismatch` if any block's length
    /// differs from the key order. That means the caller chunked wrongly.
    pub fn encode_blocks(&self, blocks: &[Vector]) -> Result<Vec<Vector>, HillCryptoError> {
        blocks
            .iter()
            .map(|block| matrix_vector_mul(&self.matrix, block, &self.ring))
            .collect()
    }

    /// Applies the inverse matrix to every block independently. Exact
    /// inverse of [`HillKey::encode_blocks`].
    pub fn decode_blocks(&self, blocks: &[Vector]) -> Result<Vec<Vector>, HillCryptoError> {
        blocks
            .iter()
            .map(|block| matrix_vector_mul(&self.inverse, block, &self.ring))
            .collect()
    }

    /// Encrypts letters-only text: symbols, pad, blocks, transform, text.
    ///
    /// The input must already be reduced to alphabet letters (uppercased,
    /// spaces and punctuation removed); anything else is rejected as
    /// [`HillCryptoError::InvalidCharacter`]. When the message length is not
    /// a multiple of the key order, the tail is padded with the alphabet's
    /// wrap letter, so the returned ciphertext can be longer than the input.
    pub fn encrypt(&self, text: &str, alphabet: &Alphabet) -> Result<String, HillCryptoError> {
        self.check_alphabet(alphabet)?;

        let symbols = alphabet.text_to_symbols(text)?;
        let blocks = symbols_to_blocks(&symbols, self.order(), alphabet.wrap_symbol());
        log::debug!("encrypting {} symbols in {} blocks", symbols.len(), blocks.len());

        let encoded = self.encode_blocks(&blocks)?;
        alphabet.symbols_to_text(&blocks_to_symbols(&encoded))
    }

    /// Decrypts ciphertext produced by [`HillKey::encrypt`].
    ///
    /// Returns the padded plaintext: trailing wrap letters added as padding
    /// are indistinguishable from genuine trailing wrap letters, so they are
    /// left in place. This lossy margin is inherent to the textbook
    /// algorithm.
    ///
    /// # Errors
    ///
    /// Besides codec errors, returns `HillCryptoError::DimensionMismatch`
    /// when the ciphertext length is not a multiple of the key order, since
    /// genuine ciphertext always is.
    pub fn decrypt(&self, text: &str, alphabet: &Alphabet) -> Result<String, HillCryptoError> {
        self.check_alphabet(alphabet)?;

        let symbols = alphabet.text_to_symbols(text)?;
        let n = self.order();
        if symbols.len() % n != 0 {
            return Err(HillCryptoError::DimensionMismatch(format!(
                "Ciphertext length {} is not a multiple of the key order {}",
                symbols.len(),
                n
            )));
        }

        let blocks: Vec<Vector> = symbols.chunks(n).map(|chunk| chunk.to_vec()).collect();
        let decoded = self.decode_blocks(&blocks)?;
        alphabet.symbols_to_text(&blocks_to_symbols(&decoded))
    }

    fn check_alphabet(&self, alphabet: &Alphabet) -> Result<(), HillCryptoError> {
        if alphabet.modulus() != self.ring.modulus() {
            return Err(HillCryptoError::InvalidModulus(format!(
                "Alphabet has {} symbols but the key ring modulus is {}",
                alphabet.modulus(),
                self.ring.modulus()
            )));
        }
        Ok(())
    }
}

impl fmt::Display for HillKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self
            .matrix
            .iter()
            .map(|row| format!("[{}]", row.iter().join(", ")))
            .join("\n");
        write!(f, "{}", rows)
    }
}

/// Pads `symbols` with `pad` until its length is a multiple of `block_size`.
///
/// An already-aligned sequence is left untouched. The padding is not
/// reversible: after decoding, trailing pad symbols cannot be told apart
/// from genuine trailing occurrences of the wrap letter.
pub fn pad_symbols(symbols: &mut Vector, block_size: usize, pad: i64) {
    let remainder = symbols.len() % block_size;
    if remainder != 0 {
        let missing = block_size - remainder;
        for _ in 0..missing {
            symbols.push(pad);
        }
    }
}

/// Splits a flat symbol sequence into contiguous blocks of exactly
/// `block_size`, padding the tail with `pad`. `block_size` must be non-zero.
pub fn symbols_to_blocks(symbols: &[i64], block_size: usize, pad: i64) -> Vec<Vector> {
    let mut padded = symbols.to_vec();
    pad_symbols(&mut padded, block_size, pad);
    padded
        .chunks(block_size)
        .map(|chunk| chunk.to_vec())
        .collect()
}

/// Flattens blocks back into one symbol sequence, preserving order.
pub fn blocks_to_symbols(blocks: &[Vector]) -> Vector {
    blocks.iter().flatten().copied().collect()
}
