//! Password-based encryption
//!
//! The wire format is `base64(salt || ciphertext)` using the standard padded
//! alphabet. The salt is one cipher block long and freshly random per
//! message. Key and IV come from [`derive_key_with`] over the password and
//! salt, split as `key_len` bytes of key followed by one block of IV.
//!
//! [`PbeScheme::legacy`] reproduces PBEWithMD5AndDES (MD5, 1000 rounds,
//! DES-CBC) so existing payloads keep decrypting. Other schemes reuse the
//! same framing; the parameters are not embedded in the output, so whoever
//! stores the payload also has to record the scheme it was sealed with.
//!
//! There is no integrity check. A wrong password shows up as a padding error
//! or as unrelated bytes.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use log::debug;
use rand::rngs::OsRng;
use rand::TryRngCore;
use serde::{Deserialize, Serialize};

use super::block::{Algorithm, Cipher};
use super::cbc;
use super::kdf::{derive_key_with, DerivedKeyMaterial, KdfDigest};
use super::padding::UnpadMode;
use crate::error::{CryptoError, Result};
use crate::LEGACY_PBE_ITERATIONS;

/// Parameters of a password-based encryption scheme
///
/// Deserializes from application configuration; missing fields fall back to
/// the legacy PBEWithMD5AndDES values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PbeScheme {
    /// Digest iterated by the key derivation
    pub digest: KdfDigest,
    /// Block cipher run in CBC mode
    pub cipher: Algorithm,
    /// Total digest rounds
    pub iterations: u32,
    /// Padding validation on decrypt
    pub unpad: UnpadMode,
}

impl Default for PbeScheme {
    fn default() -> Self {
        Self::legacy()
    }
}

impl PbeScheme {
    /// PBEWithMD5AndDES: MD5, 1000 rounds, DES-CBC, strict unpadding
    pub const fn legacy() -> Self {
        Self {
            digest: KdfDigest::Md5,
            cipher: Algorithm::Des,
            iterations: LEGACY_PBE_ITERATIONS,
            unpad: UnpadMode::Strict,
        }
    }

    /// Salt length in bytes, one cipher block
    pub const fn salt_len(&self) -> usize {
        self.cipher.block_size()
    }

    /// Number of derived bytes: key plus one block of IV
    pub const fn derived_len(&self) -> usize {
        self.cipher.key_len() + self.cipher.block_size()
    }

    /// Check that the parameters can be used for derivation
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(CryptoError::InvalidIterationCount);
        }
        if self.derived_len() > self.digest.output_size() {
            return Err(CryptoError::DerivedKeyTooLong {
                requested: self.derived_len(),
                available: self.digest.output_size(),
            });
        }
        Ok(())
    }

    /// Derive the key and IV for `password` and `salt`
    pub fn derive(&self, password: &str, salt: &[u8]) -> Result<DerivedKeyMaterial> {
        let bytes = derive_key_with(
            self.digest,
            password.as_bytes(),
            salt,
            self.iterations,
            self.derived_len(),
        )?;
        Ok(DerivedKeyMaterial::new(bytes, self.cipher.key_len()))
    }

    /// Encrypt `message` under `password` with a fresh random salt
    pub fn encrypt(&self, message: &[u8], password: &str) -> Result<String> {
        self.validate()?;

        let mut salt = vec![0u8; self.salt_len()];
        OsRng
            .try_fill_bytes(&mut salt)
            .map_err(|e| CryptoError::RandomSource(e.to_string()))?;

        self.seal(message, password, &salt)
    }

    fn seal(&self, message: &[u8], password: &str, salt: &[u8]) -> Result<String> {
        let material = self.derive(password, salt)?;
        let cipher = Cipher::new(self.cipher, material.key())?;
        let ciphertext = cbc::encrypt(&cipher, message, material.iv())?;

        let mut framed = Vec::with_capacity(salt.len() + ciphertext.len());
        framed.extend_from_slice(salt);
        framed.extend_from_slice(&ciphertext);

        debug!(
            "PBE encrypt: cipher={} digest={:?} iterations={} plaintext_len={} framed_len={}",
            self.cipher,
            self.digest,
            self.iterations,
            message.len(),
            framed.len()
        );

        Ok(STANDARD.encode(framed))
    }

    /// Decrypt a base64 `salt || ciphertext` payload
    ///
    /// # Errors
    ///
    /// * [`CryptoError::InvalidEncoding`] if the input is not base64 or is shorter than the salt
    /// * [`CryptoError::InvalidCiphertextLength`] if nothing block aligned follows the salt
    /// * [`CryptoError::InvalidPadding`] if the padding is wrong, usually a wrong password
    pub fn decrypt(&self, encoded: &str, password: &str) -> Result<Vec<u8>> {
        self.validate()?;

        let framed = STANDARD
            .decode(encoded)
            .map_err(|e| CryptoError::InvalidEncoding(e.to_string()))?;

        let salt_len = self.salt_len();
        if framed.len() < salt_len {
            return Err(CryptoError::InvalidEncoding(format!(
                "payload is {} bytes, shorter than the {}-byte salt",
                framed.len(),
                salt_len
            )));
        }

        let (salt, ciphertext) = framed.split_at(salt_len);
        debug!(
            "PBE decrypt: cipher={} digest={:?} iterations={} ciphertext_len={}",
            self.cipher,
            self.digest,
            self.iterations,
            ciphertext.len()
        );

        let material = self.derive(password, salt)?;
        let cipher = Cipher::new(self.cipher, material.key())?;
        cbc::decrypt_with(&cipher, ciphertext, material.iv(), self.unpad)
    }

    /// Decrypt and interpret the recovered bytes as UTF-8
    pub fn decrypt_to_string(&self, encoded: &str, password: &str) -> Result<String> {
        let bytes = self.decrypt(encoded, password)?;
        String::from_utf8(bytes).map_err(|_| CryptoError::InvalidUtf8)
    }
}

/// Encrypt a message the way PBEWithMD5AndDES does
///
/// # Example
///
/// ```
/// use legacy_cbc::crypto::{pbe_with_md5_and_des_decrypt, pbe_with_md5_and_des_encrypt};
///
/// let sealed = pbe_with_md5_and_des_encrypt("hello world", "s3cr3t").unwrap();
/// assert_eq!(pbe_with_md5_and_des_decrypt(&sealed, "s3cr3t").unwrap(), "hello world");
/// ```
pub fn pbe_with_md5_and_des_encrypt(message: &str, password: &str) -> Result<String> {
    PbeScheme::legacy().encrypt(message.as_bytes(), password)
}

/// Decrypt a PBEWithMD5AndDES payload back into a string
pub fn pbe_with_md5_and_des_decrypt(encoded: &str, password: &str) -> Result<String> {
    PbeScheme::legacy().decrypt_to_string(encoded, password)
}
