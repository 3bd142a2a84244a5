//! DES-CBC with PKCS7 padding
//!
//! Single DES is broken and only kept for payloads produced by legacy
//! systems. Keys and IVs are both 8 bytes.

use super::block::Cipher;
use super::cbc;
use crate::error::Result;

/// Encrypt plaintext using DES-CBC with an 8-byte key and IV
pub fn des_cbc_encrypt(plaintext: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    let cipher = Cipher::des(key)?;
    cbc::encrypt(&cipher, plaintext, iv)
}

/// Decrypt DES-CBC ciphertext with an 8-byte key and IV
pub fn des_cbc_decrypt(ciphertext: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    let cipher = Cipher::des(key)?;
    cbc::decrypt(&cipher, ciphertext, iv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CryptoError;

    #[test]
    fn test_roundtrip() {
        let key = b"8bytekey";
        let iv = b"initvect";

        for len in 0..33 {
            let plaintext: Vec<u8> = (0..len as u8).collect();
            let encrypted = des_cbc_encrypt(&plaintext, key, iv).unwrap();
            assert_eq!(encrypted.len(), (len / 8 + 1) * 8);
            assert_eq!(des_cbc_decrypt(&encrypted, key, iv).unwrap(), plaintext);
        }
    }

    #[test]
    fn test_invalid_key_size() {
        assert_eq!(
            des_cbc_encrypt(b"data", b"7bytes!", b"initvect"),
            Err(CryptoError::InvalidKeySize { algorithm: "DES", len: 7 })
        );
        // A 16-byte key is not accepted as two-key triple DES
        assert!(des_cbc_decrypt(&[0u8; 8], &[0u8; 16], b"initvect").is_err());
    }

    #[test]
    fn test_invalid_iv() {
        assert_eq!(
            des_cbc_encrypt(b"data", b"8bytekey", &[0u8; 16]),
            Err(CryptoError::InvalidIvLength { expected: 8, actual: 16 })
        );
    }
}
