//! Keyed block ciphers
//!
//! A closed set of algorithms (AES-128/192/256 and single DES) behind one
//! block-at-a-time interface that the CBC codec is written against.

use std::fmt;

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::{Aes128, Aes192, Aes256};
use des::Des;
use serde::{Deserialize, Serialize};

use crate::error::{CryptoError, Result};
use crate::{AES_BLOCK_SIZE, DES_BLOCK_SIZE};

/// A keyed cipher that transforms exactly one block at a time.
///
/// Implementations may assume `block.len() == self.block_size()`; the CBC
/// codec only ever hands out whole blocks.
pub trait BlockCipher {
    /// Block size in bytes
    fn block_size(&self) -> usize;

    /// Encrypt one block in place
    fn encrypt_block(&self, block: &mut [u8]);

    /// Decrypt one block in place
    fn decrypt_block(&self, block: &mut [u8]);
}

/// Supported block cipher algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Aes128,
    Aes192,
    Aes256,
    Des,
}

impl Algorithm {
    /// Required key length in bytes
    pub const fn key_len(self) -> usize {
        match self {
            Algorithm::Aes128 => 16,
            Algorithm::Aes192 => 24,
            Algorithm::Aes256 => 32,
            Algorithm::Des => 8,
        }
    }

    /// Block size in bytes
    pub const fn block_size(self) -> usize {
        match self {
            Algorithm::Aes128 | Algorithm::Aes192 | Algorithm::Aes256 => AES_BLOCK_SIZE,
            Algorithm::Des => DES_BLOCK_SIZE,
        }
    }

    /// Display name used in error messages
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Aes128 | Algorithm::Aes192 | Algorithm::Aes256 => "AES",
            Algorithm::Des => "DES",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Algorithm::Aes128 => "AES-128",
            Algorithm::Aes192 => "AES-192",
            Algorithm::Aes256 => "AES-256",
            Algorithm::Des => "DES",
        };
        f.write_str(s)
    }
}

/// A block cipher instance keyed for one of the supported algorithms
pub enum Cipher {
    Aes128(Aes128),
    Aes192(Aes192),
    Aes256(Aes256),
    Des(Des),
}

impl Cipher {
    /// Construct a cipher for an explicit algorithm.
    ///
    /// Fails with [`CryptoError::InvalidKeySize`] if `key` does not have the
    /// exact length the algorithm requires.
    pub fn new(algorithm: Algorithm, key: &[u8]) -> Result<Self> {
        let invalid = || CryptoError::InvalidKeySize {
            algorithm: algorithm.name(),
            len: key.len(),
        };

        let cipher = match algorithm {
            Algorithm::Aes128 => Cipher::Aes128(Aes128::new_from_slice(key).map_err(|_| invalid())?),
            Algorithm::Aes192 => Cipher::Aes192(Aes192::new_from_slice(key).map_err(|_| invalid())?),
            Algorithm::Aes256 => Cipher::Aes256(Aes256::new_from_slice(key).map_err(|_| invalid())?),
            Algorithm::Des => Cipher::Des(Des::new_from_slice(key).map_err(|_| invalid())?),
        };
        Ok(cipher)
    }

    /// Construct an AES cipher, picking the variant from the key length (16/24/32)
    pub fn aes(key: &[u8]) -> Result<Self> {
        let algorithm = match key.len() {
            16 => Algorithm::Aes128,
            24 => Algorithm::Aes192,
            32 => Algorithm::Aes256,
            len => return Err(CryptoError::InvalidKeySize { algorithm: "AES", len }),
        };
        Self::new(algorithm, key)
    }

    /// Construct a single-DES cipher from an 8-byte key
    pub fn des(key: &[u8]) -> Result<Self> {
        Self::new(Algorithm::Des, key)
    }

    /// Algorithm this cipher was keyed for
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Cipher::Aes128(_) => Algorithm::Aes128,
            Cipher::Aes192(_) => Algorithm::Aes192,
            Cipher::Aes256(_) => Algorithm::Aes256,
            Cipher::Des(_) => Algorithm::Des,
        }
    }
}

impl fmt::Debug for Cipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Key schedules stay out of debug output
        f.debug_tuple("Cipher").field(&self.algorithm()).finish()
    }
}

impl BlockCipher for Cipher {
    fn block_size(&self) -> usize {
        self.algorithm().block_size()
    }

    fn encrypt_block(&self, block: &mut [u8]) {
        match self {
            Cipher::Aes128(c) => c.encrypt_block(GenericArray::from_mut_slice(block)),
            Cipher::Aes192(c) => c.encrypt_block(GenericArray::from_mut_slice(block)),
            Cipher::Aes256(c) => c.encrypt_block(GenericArray::from_mut_slice(block)),
            Cipher::Des(c) => c.encrypt_block(GenericArray::from_mut_slice(block)),
        }
    }

    fn decrypt_block(&self, block: &mut [u8]) {
        match self {
            Cipher::Aes128(c) => c.decrypt_block(GenericArray::from_mut_slice(block)),
            Cipher::Aes192(c) => c.decrypt_block(GenericArray::from_mut_slice(block)),
            Cipher::Aes256(c) => c.decrypt_block(GenericArray::from_mut_slice(block)),
            Cipher::Des(c) => c.decrypt_block(GenericArray::from_mut_slice(block)),
        }
    }
}
