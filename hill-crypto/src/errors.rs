#[derive(thiserror::Error, Debug)]
pub enum HillCryptoError {
    /// Error when trying to find a modular inverse that doesn't exist (gcd(a, m) != 1).
    #[error("NoInverse: {0}")]
    NoInverse(String),
    /// Error when creating a ring with an invalid modulus (m <= 1).
    #[error("InvalidModulus: {0}")]
    InvalidModulus(String),
    /// A key matrix that is not square, a ragged row, or a block whose length
    /// does not match the key order. Always a caller bug, never data-dependent.
    #[error("DimensionMismatch: {0}")]
    DimensionMismatch(String),
    /// A character outside the cipher alphabet, or a symbol with no letter.
    #[error("InvalidCharacter: {0}")]
    InvalidCharacter(String),
    /// Matrix order above the cofactor-expansion ceiling.
    #[error("UnsupportedOrder: {0}")]
    UnsupportedOrder(String),
    #[error("Internal error: Overflow during calculation")]
    CalculationOverflow,
}
