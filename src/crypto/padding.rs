//! PKCS7 padding
//!
//! Padding always appends between 1 and `block_size` bytes, each holding the
//! pad length, so a full block is added when the input is already aligned.
//!
//! Unpadding runs in one of two modes. [`UnpadMode::Strict`] checks every
//! padding byte. [`UnpadMode::Legacy`] only reads the final byte as the pad
//! length, which is what older producers of this format accepted; it lets a
//! tampered ciphertext through and should only be used for compatibility.

use serde::{Deserialize, Serialize};

use crate::error::{CryptoError, Result};
use crate::DES_BLOCK_SIZE;

/// How padding is validated when it is removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnpadMode {
    /// Every padding byte must equal the pad length
    #[default]
    Strict,
    /// Only the final byte is read; the rest of the padding is not checked
    Legacy,
}

/// Append PKCS7 padding for the given block size.
///
/// Fails with [`CryptoError::InvalidBlockSize`] unless `1 <= block_size <= 255`.
pub fn pkcs7_pad(data: &[u8], block_size: usize) -> Result<Vec<u8>> {
    if block_size == 0 || block_size > u8::MAX as usize {
        return Err(CryptoError::InvalidBlockSize(block_size));
    }

    let pad_len = block_size - data.len() % block_size;
    let mut padded = Vec::with_capacity(data.len() + pad_len);
    padded.extend_from_slice(data);
    padded.resize(data.len() + pad_len, pad_len as u8);
    Ok(padded)
}

/// Strip PKCS7 padding, returning the unpadded prefix of `data`.
///
/// Fails with [`CryptoError::InvalidPadding`] when `data` is empty, the pad
/// length is zero or larger than `data`, or (strict mode only) any padding
/// byte differs from the pad length.
pub fn pkcs7_unpad(data: &[u8], mode: UnpadMode) -> Result<&[u8]> {
    let &last = data.last().ok_or(CryptoError::InvalidPadding)?;
    let pad_len = last as usize;

    if pad_len == 0 || pad_len > data.len() {
        return Err(CryptoError::InvalidPadding);
    }

    let (content, padding) = data.split_at(data.len() - pad_len);

    if mode == UnpadMode::Strict && padding.iter().any(|&b| b != last) {
        return Err(CryptoError::InvalidPadding);
    }

    Ok(content)
}

/// PKCS5 padding: PKCS7 over 8-byte blocks
pub fn pkcs5_pad(data: &[u8]) -> Vec<u8> {
    let pad_len = DES_BLOCK_SIZE - data.len() % DES_BLOCK_SIZE;
    let mut padded = data.to_vec();
    padded.resize(data.len() + pad_len, pad_len as u8);
    padded
}

/// Strip PKCS5 padding, additionally rejecting pad lengths above 8
pub fn pkcs5_unpad(data: &[u8], mode: UnpadMode) -> Result<&[u8]> {
    match data.last() {
        Some(&last) if last as usize > DES_BLOCK_SIZE => Err(CryptoError::InvalidPadding),
        _ => pkcs7_unpad(data, mode),
    }
}
