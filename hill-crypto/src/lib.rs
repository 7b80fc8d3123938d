//! # hill-crypto
//!
//! A generalized Hill cipher: plaintext letters are mapped to symbols of a
//! finite ring Z_m, grouped into blocks of the key matrix order, and
//! transformed by matrix-vector multiplication mod m. Decryption applies the
//! modular inverse of the key matrix, computed from its exact determinant and
//! adjugate.
//!
//! The Hill cipher is a teaching algorithm. It is linear and therefore broken
//! by a handful of known plaintext blocks; do not use it to protect anything.

pub mod alphabet;
pub mod cipher;
pub mod errors;
pub mod ring;

pub use alphabet::Alphabet;
pub use cipher::HillKey;
pub use errors::HillCryptoError;
pub use ring::Ring;
