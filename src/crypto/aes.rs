//! AES-CBC with PKCS7 padding
//!
//! The AES variant is selected by key length:
//! - 16 bytes: AES-128
//! - 24 bytes: AES-192
//! - 32 bytes: AES-256
//!
//! The IV must be 16 bytes. Reusing an IV with the same key leaks plaintext
//! structure; choosing a fresh IV is the caller's job.

use super::block::Cipher;
use super::cbc;
use crate::error::Result;

/// Encrypt plaintext using AES-CBC
///
/// # Arguments
///
/// * `plaintext` - The bytes to encrypt
/// * `key` - 16, 24 or 32 byte key
/// * `iv` - 16 byte initialization vector
///
/// # Returns
///
/// Ciphertext whose length is the padded plaintext length
pub fn aes_cbc_encrypt(plaintext: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    let cipher = Cipher::aes(key)?;
    cbc::encrypt(&cipher, plaintext, iv)
}

/// Decrypt ciphertext using AES-CBC
///
/// # Arguments
///
/// * `ciphertext` - The encrypted bytes, a non-empty multiple of 16
/// * `key` - 16, 24 or 32 byte key
/// * `iv` - 16 byte initialization vector
///
/// # Returns
///
/// The unpadded plaintext
pub fn aes_cbc_decrypt(ciphertext: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    let cipher = Cipher::aes(key)?;
    cbc::decrypt(&cipher, ciphertext, iv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CryptoError;

    const IV: [u8; 16] = [0x24; 16];

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let key = b"0123456789abcdef0123456789abcdef";
        let plaintext = b"Hello, World! This is a test message.";

        let encrypted = aes_cbc_encrypt(plaintext, key, &IV).unwrap();
        assert_eq!(encrypted.len(), 48);

        let decrypted = aes_cbc_decrypt(&encrypted, key, &IV).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_all_key_sizes() {
        for len in [16usize, 24, 32] {
            let key = vec![0x5au8; len];
            let encrypted = aes_cbc_encrypt(b"key size check", &key, &IV).unwrap();
            assert_eq!(aes_cbc_decrypt(&encrypted, &key, &IV).unwrap(), b"key size check");
        }
    }

    #[test]
    fn test_encrypt_decrypt_utf8() {
        let key = [1u8; 16];
        let plaintext = "Привет мир! 你好世界! مرحبا بالعالم";

        let encrypted = aes_cbc_encrypt(plaintext.as_bytes(), &key, &IV).unwrap();
        let decrypted = aes_cbc_decrypt(&encrypted, &key, &IV).unwrap();

        assert_eq!(String::from_utf8(decrypted).unwrap(), plaintext);
    }

    #[test]
    fn test_invalid_key_size() {
        assert_eq!(
            aes_cbc_encrypt(b"data", &[0u8; 15], &IV),
            Err(CryptoError::InvalidKeySize { algorithm: "AES", len: 15 })
        );
        assert!(matches!(
            aes_cbc_decrypt(&[0u8; 16], &[0u8; 33], &IV),
            Err(CryptoError::InvalidKeySize { len: 33, .. })
        ));
    }

    #[test]
    fn test_wrong_key_does_not_recover_plaintext() {
        let plaintext = b"Secret message";
        let encrypted = aes_cbc_encrypt(plaintext, &[1u8; 32], &IV).unwrap();

        match aes_cbc_decrypt(&encrypted, &[2u8; 32], &IV) {
            Ok(bytes) => assert_ne!(bytes, plaintext),
            Err(err) => assert_eq!(err, CryptoError::InvalidPadding),
        }
    }
}
