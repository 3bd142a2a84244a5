//! Generic CBC mode over any [`BlockCipher`]
//!
//! Encryption pads with PKCS7 and chains each block with the previous
//! ciphertext block (the IV for the first block). Decryption reverses the
//! chain and removes the padding.

use log::warn;

use super::block::BlockCipher;
use super::padding::{pkcs7_pad, pkcs7_unpad, UnpadMode};
use crate::error::{CryptoError, Result};

fn check_iv(iv: &[u8], block_size: usize) -> Result<()> {
    if iv.len() != block_size {
        return Err(CryptoError::InvalidIvLength {
            expected: block_size,
            actual: iv.len(),
        });
    }
    Ok(())
}

fn xor_in_place(block: &mut [u8], other: &[u8]) {
    for (b, o) in block.iter_mut().zip(other) {
        *b ^= o;
    }
}

/// Encrypt `plaintext` in CBC mode with PKCS7 padding.
///
/// The result is always a non-empty multiple of the block size.
pub fn encrypt<C: BlockCipher + ?Sized>(cipher: &C, plaintext: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    let block_size = cipher.block_size();
    check_iv(iv, block_size)?;

    let mut buffer = pkcs7_pad(plaintext, block_size)?;

    for offset in (0..buffer.len()).step_by(block_size) {
        let (done, rest) = buffer.split_at_mut(offset);
        let previous = if offset == 0 { iv } else { &done[offset - block_size..] };
        let block = &mut rest[..block_size];

        xor_in_place(block, previous);
        cipher.encrypt_block(block);
    }

    Ok(buffer)
}

/// Decrypt CBC `ciphertext` and strip PKCS7 padding with strict validation.
pub fn decrypt<C: BlockCipher + ?Sized>(cipher: &C, ciphertext: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    decrypt_with(cipher, ciphertext, iv, UnpadMode::Strict)
}

/// Decrypt CBC `ciphertext`, choosing how padding is validated.
///
/// # Errors
///
/// * [`CryptoError::InvalidIvLength`] if `iv` is not one block long
/// * [`CryptoError::InvalidCiphertextLength`] if `ciphertext` is empty or not block aligned
/// * [`CryptoError::InvalidPadding`] if the padding cannot be removed
pub fn decrypt_with<C: BlockCipher + ?Sized>(
    cipher: &C,
    ciphertext: &[u8],
    iv: &[u8],
    mode: UnpadMode,
) -> Result<Vec<u8>> {
    let block_size = cipher.block_size();
    check_iv(iv, block_size)?;

    if ciphertext.is_empty() || ciphertext.len() % block_size != 0 {
        return Err(CryptoError::InvalidCiphertextLength {
            len: ciphertext.len(),
            block_size,
        });
    }

    if mode == UnpadMode::Legacy {
        warn!("CBC decrypt using legacy unpadding; padding bytes are not verified");
    }

    let mut buffer = ciphertext.to_vec();
    let chain = std::iter::once(iv).chain(ciphertext.chunks_exact(block_size));

    for (block, previous) in buffer.chunks_exact_mut(block_size).zip(chain) {
        cipher.decrypt_block(block);
        xor_in_place(block, previous);
    }

    let plain_len = pkcs7_unpad(&buffer, mode)?.len();
    buffer.truncate(plain_len);
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::block::Cipher;

    /// NIST SP 800-38A F.2.1, first block (plus our padding block)
    #[test]
    fn test_aes128_cbc_vector() {
        let key = hex::decode("2b7e151628aed2a6abf7158809cf4f3c").unwrap();
        let iv: Vec<u8> = (0u8..16).collect();
        let plaintext = hex::decode("6bc1bee22e409f96e93d7e117393172a").unwrap();

        let cipher = Cipher::aes(&key).unwrap();
        let ciphertext = encrypt(&cipher, &plaintext, &iv).unwrap();

        assert_eq!(
            hex::encode(&ciphertext),
            "7649abac8119b246cee98e9b12e9197d8964e0b149c10b7b682e6e39aaeb731c"
        );
        assert_eq!(decrypt(&cipher, &ciphertext, &iv).unwrap(), plaintext);
    }

    /// FIPS 81 DES-CBC sample
    #[test]
    fn test_des_cbc_vector() {
        let key = hex::decode("0123456789abcdef").unwrap();
        let iv = hex::decode("1234567890abcdef").unwrap();

        let cipher = Cipher::des(&key).unwrap();
        let ciphertext = encrypt(&cipher, b"Now is the time for all ", &iv).unwrap();

        assert_eq!(
            hex::encode(&ciphertext),
            "e5c7cdde872bf27c43e934008c389c0f683788499a7c05f662c16a27e4fcf277"
        );
    }

    #[test]
    fn test_empty_plaintext_is_one_block() {
        let cipher = Cipher::aes(&[0u8; 32]).unwrap();
        let ciphertext = encrypt(&cipher, b"", &[0u8; 16]).unwrap();

        assert_eq!(hex::encode(&ciphertext), "1f788fe6d86c317549697fbf0c07fa43");
        assert_eq!(decrypt(&cipher, &ciphertext, &[0u8; 16]).unwrap(), b"");
    }

    #[test]
    fn test_iv_length_checked() {
        let cipher = Cipher::des(&[7u8; 8]).unwrap();

        assert_eq!(
            encrypt(&cipher, b"data", &[0u8; 16]),
            Err(CryptoError::InvalidIvLength { expected: 8, actual: 16 })
        );
        assert_eq!(
            decrypt(&cipher, &[0u8; 8], &[0u8; 4]),
            Err(CryptoError::InvalidIvLength { expected: 8, actual: 4 })
        );
    }

    #[test]
    fn test_ciphertext_length_checked() {
        let cipher = Cipher::aes(&[7u8; 16]).unwrap();

        assert_eq!(
            decrypt(&cipher, b"", &[0u8; 16]),
            Err(CryptoError::InvalidCiphertextLength { len: 0, block_size: 16 })
        );
        assert_eq!(
            decrypt(&cipher, &[0u8; 17], &[0u8; 16]),
            Err(CryptoError::InvalidCiphertextLength { len: 17, block_size: 16 })
        );
    }

    #[test]
    fn test_iv_changes_ciphertext() {
        let cipher = Cipher::aes(&[3u8; 24]).unwrap();
        let a = encrypt(&cipher, b"same message", &[0u8; 16]).unwrap();
        let b = encrypt(&cipher, b"same message", &[1u8; 16]).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_chaining_hides_repeated_blocks() {
        let cipher = Cipher::des(&[9u8; 8]).unwrap();
        let ciphertext = encrypt(&cipher, &[0x41u8; 16], &[0u8; 8]).unwrap();
        assert_ne!(ciphertext[..8], ciphertext[8..16]);
    }

    #[test]
    fn test_legacy_mode_accepts_what_strict_rejects() {
        let cipher = Cipher::des(&[5u8; 8]).unwrap();
        let iv = [0u8; 8];

        // Hand-craft a final block whose padding is "\x01\x02"
        let mut forged = b"abcdef\x01\x02".to_vec();
        for (b, i) in forged.iter_mut().zip(iv.iter()) {
            *b ^= i;
        }
        cipher.encrypt_block(&mut forged);

        assert_eq!(decrypt(&cipher, &forged, &iv), Err(CryptoError::InvalidPadding));
        assert_eq!(
            decrypt_with(&cipher, &forged, &iv, UnpadMode::Legacy).unwrap(),
            b"abcdef"
        );
    }
}
