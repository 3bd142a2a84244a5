//! Iterated-digest key derivation
//!
//! Implements the derivation used by PBEWithMD5AndDES:
//! 1. `d0 = H(password || salt)`
//! 2. `d(i+1) = H(d(i))`, for `iterations - 1` further rounds
//! 3. Output the first `output_len` bytes of the final digest
//!
//! Only a single digest of output is ever produced. Asking for more fails
//! instead of being stretched, because no legacy producer defines how that
//! would work.

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::error::{CryptoError, Result};

/// Digest used by the iterated derivation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KdfDigest {
    /// MD5, required for legacy payloads
    #[default]
    Md5,
    Sha256,
}

impl KdfDigest {
    /// Digest output size in bytes
    pub const fn output_size(self) -> usize {
        match self {
            KdfDigest::Md5 => 16,
            KdfDigest::Sha256 => 32,
        }
    }
}

/// Derived key followed by its IV
#[derive(Clone, PartialEq, Eq)]
pub struct DerivedKeyMaterial {
    bytes: Vec<u8>,
    key_len: usize,
}

impl DerivedKeyMaterial {
    /// Split `bytes` into a `key_len`-byte key and an IV made of the rest
    pub fn new(bytes: Vec<u8>, key_len: usize) -> Self {
        let key_len = key_len.min(bytes.len());
        Self { bytes, key_len }
    }

    pub fn key(&self) -> &[u8] {
        &self.bytes[..self.key_len]
    }

    pub fn iv(&self) -> &[u8] {
        &self.bytes[self.key_len..]
    }
}

impl std::fmt::Debug for DerivedKeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKeyMaterial")
            .field("key_len", &self.key_len)
            .field("iv_len", &(self.bytes.len() - self.key_len))
            .finish()
    }
}

/// Derive key material with the legacy MD5 iteration
///
/// # Arguments
///
/// * `password` - Password bytes
/// * `salt` - Salt bytes, appended to the password before the first round
/// * `iterations` - Total number of digest operations (legacy payloads use 1000)
/// * `output_len` - Number of bytes to return, at most 16
pub fn derive_key(password: &[u8], salt: &[u8], iterations: u32, output_len: usize) -> Result<Vec<u8>> {
    derive_key_with(KdfDigest::Md5, password, salt, iterations, output_len)
}

/// Derive key material with an explicit digest
pub fn derive_key_with(
    digest: KdfDigest,
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    output_len: usize,
) -> Result<Vec<u8>> {
    if iterations == 0 {
        return Err(CryptoError::InvalidIterationCount);
    }

    let available = digest.output_size();
    if output_len > available {
        return Err(CryptoError::DerivedKeyTooLong {
            requested: output_len,
            available,
        });
    }

    let mut derived = match digest {
        KdfDigest::Md5 => iterate::<Md5>(password, salt, iterations),
        KdfDigest::Sha256 => iterate::<Sha256>(password, salt, iterations),
    };
    derived.truncate(output_len);
    Ok(derived)
}

fn iterate<D: Digest>(password: &[u8], salt: &[u8], iterations: u32) -> Vec<u8> {
    let mut hasher = D::new();
    hasher.update(password);
    hasher.update(salt);
    let mut derived = hasher.finalize();

    for _ in 1..iterations {
        derived = D::digest(derived.as_slice());
    }

    derived.to_vec()
}
