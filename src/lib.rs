//! # legacy-cbc
//!
//! Symmetric encryption primitives for systems that exchange data with
//! legacy producers.
//!
//! ## Features
//!
//! - Generic CBC mode over AES (128/192/256) and DES
//! - PKCS7 padding with strict or legacy unpadding
//! - PBEWithMD5AndDES-compatible password encryption (`base64(salt || ciphertext)`)
//! - Parameterized PBE schemes (SHA-256, AES) using the same framing
//!
//! No authentication is performed. Decryption under a wrong key or password
//! yields a padding error or garbage, never a dedicated error.
//!
//! ## Example
//!
//! ```
//! use legacy_cbc::crypto::{aes_cbc_decrypt, aes_cbc_encrypt};
//!
//! let key = [0x11u8; 32];
//! let iv = [0x22u8; 16];
//!
//! let ciphertext = aes_cbc_encrypt(b"attack at dawn", &key, &iv).unwrap();
//! assert_eq!(ciphertext.len(), 16);
//! assert_eq!(aes_cbc_decrypt(&ciphertext, &key, &iv).unwrap(), b"attack at dawn");
//! ```

pub mod crypto;
pub mod error;

// Re-export main types
pub use error::{CryptoError, Result};
pub use crypto::{
    pbe_with_md5_and_des_decrypt, pbe_with_md5_and_des_encrypt, Algorithm, BlockCipher, Cipher,
    PbeScheme, UnpadMode,
};

/// Digest rounds used by PBEWithMD5AndDES
pub const LEGACY_PBE_ITERATIONS: u32 = 1000;

/// DES block size, also the legacy PBE salt length
pub const DES_BLOCK_SIZE: usize = 8;

/// AES block size
pub const AES_BLOCK_SIZE: usize = 16;
