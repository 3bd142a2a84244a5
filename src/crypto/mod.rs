//! Symmetric cipher operations
//!
//! This module implements a block-cipher-agnostic CBC codec with PKCS7
//! padding, AES-CBC and DES-CBC helpers, and password-based encryption
//! byte-compatible with PBEWithMD5AndDES.

mod aes;
mod des;
pub mod block;
pub mod cbc;
pub mod kdf;
pub mod padding;
pub mod pbe;

pub use self::aes::{aes_cbc_encrypt, aes_cbc_decrypt};
pub use self::des::{des_cbc_encrypt, des_cbc_decrypt};
pub use block::{Algorithm, BlockCipher, Cipher};
pub use kdf::{derive_key, derive_key_with, DerivedKeyMaterial, KdfDigest};
pub use padding::{pkcs5_pad, pkcs5_unpad, pkcs7_pad, pkcs7_unpad, UnpadMode};
pub use pbe::{pbe_with_md5_and_des_decrypt, pbe_with_md5_and_des_encrypt, PbeScheme};
