//! Error types for the symmetric cipher core

use thiserror::Error;

/// Main error type for cipher, padding and PBE operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Key length is not accepted by the selected block cipher
    #[error("Invalid key size for {algorithm}: {len} bytes")]
    InvalidKeySize { algorithm: &'static str, len: usize },

    /// IV length does not equal the cipher block size
    #[error("Invalid IV length: expected {expected} bytes, got {actual}")]
    InvalidIvLength { expected: usize, actual: usize },

    /// Ciphertext is empty or not a multiple of the block size
    #[error("Invalid ciphertext length {len} for block size {block_size}")]
    InvalidCiphertextLength { len: usize, block_size: usize },

    /// PKCS7 padding could not be removed
    #[error("Invalid padding")]
    InvalidPadding,

    /// Base64 framing could not be decoded
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// Padding block size outside 1..=255
    #[error("Invalid block size: {0}")]
    InvalidBlockSize(usize),

    /// Key derivation requested with zero rounds
    #[error("Iteration count must be at least 1")]
    InvalidIterationCount,

    /// More derived bytes requested than a single digest provides
    #[error("Derived key too long: requested {requested} bytes, digest provides {available}")]
    DerivedKeyTooLong { requested: usize, available: usize },

    /// Decrypted bytes are not valid UTF-8
    #[error("Decrypted data is not valid UTF-8")]
    InvalidUtf8,

    /// The OS random source failed while generating a salt
    #[error("Random source error: {0}")]
    RandomSource(String),

    /// Generic decryption failure with no detail about the failing check
    #[error("Decryption failed")]
    DecryptionFailed,
}

impl CryptoError {
    /// True for errors caused by malformed or mismatched ciphertext.
    pub fn is_decryption_failure(&self) -> bool {
        matches!(
            self,
            CryptoError::InvalidCiphertextLength { .. }
                | CryptoError::InvalidPadding
                | CryptoError::InvalidEncoding(_)
                | CryptoError::InvalidUtf8
                | CryptoError::DecryptionFailed
        )
    }

    /// Collapse decryption failures into [`CryptoError::DecryptionFailed`].
    ///
    /// Callers exposing errors to untrusted parties should use this so that a
    /// padding failure cannot be told apart from a framing failure.
    pub fn into_opaque(self) -> Self {
        if self.is_decryption_failure() {
            CryptoError::DecryptionFailed
        } else {
            self
        }
    }
}

/// Result type alias for crypto operations
pub type Result<T> = std::result::Result<T, CryptoError>;
