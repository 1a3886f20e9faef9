//! One-time encryption and path hashing.
//!
//! The encryption step is irrecoverability insurance rather than
//! confidentiality: a fresh 256-bit key and IV are drawn from the OS RNG for
//! every call, the content is run through a stream cipher, and the key is
//! zeroized before the call returns. No authentication tag is produced since
//! the ciphertext is about to be overwritten.
//!
//! License: MIT OR Apache-2.0

use std::fmt;

use aes::Aes256;
use chacha20::ChaCha20;
use ctr::cipher::{KeyIvInit, StreamCipher};
use rand::rngs::OsRng;
use rand::TryRngCore;
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::config::CipherChoice;
use crate::errors::{SrmError, SrmResult};

type Aes256Ctr = ctr::Ctr128BE<Aes256>;

pub const KEY_LEN: usize = 32;
pub const AES_CTR_IV_LEN: usize = 16;
pub const CHACHA20_NONCE_LEN: usize = 12;

/// A 256-bit one-time key. Not `Clone`; wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct EphemeralKey([u8; KEY_LEN]);

impl EphemeralKey {
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for EphemeralKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EphemeralKey([REDACTED])")
    }
}

/// Stateless entry point for the cryptographic leaf operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct CryptoEngine;

impl CryptoEngine {
    /// Draws a fresh key from the operating system RNG.
    pub fn generate_key() -> SrmResult<EphemeralKey> {
        let mut key = EphemeralKey([0u8; KEY_LEN]);
        OsRng
            .try_fill_bytes(&mut key.0)
            .map_err(|e| SrmError::EncryptionFailure(format!("OS random source unavailable: {}", e)))?;
        Ok(key)
    }

    /// Encrypts a copy of `data` under a throwaway key and returns ciphertext
    /// of the same length.
    pub fn encrypt_once(data: &[u8], cipher: CipherChoice) -> SrmResult<Vec<u8>> {
        let mut buf = Zeroizing::new(data.to_vec());
        Self::encrypt_in_place(&mut buf, cipher)?;
        Ok(std::mem::take(&mut *buf))
    }

    /// Encrypts `data` in place under a throwaway key. On error the buffer
    /// may still hold plaintext; callers own its disposal.
    pub fn encrypt_in_place(data: &mut [u8], cipher: CipherChoice) -> SrmResult<()> {
        let key = Self::generate_key()?;
        match cipher {
            CipherChoice::Aes256Ctr => {
                let mut iv = [0u8; AES_CTR_IV_LEN];
                fill_nonce(&mut iv)?;
                let mut stream = Aes256Ctr::new_from_slices(key.as_bytes(), &iv)
                    .map_err(|e| SrmError::EncryptionFailure(format!("AES-256-CTR init: {}", e)))?;
                stream
                    .try_apply_keystream(data)
                    .map_err(|e| SrmError::EncryptionFailure(format!("AES-256-CTR keystream: {}", e)))?;
            }
            CipherChoice::ChaCha20 => {
                let mut nonce = [0u8; CHACHA20_NONCE_LEN];
                fill_nonce(&mut nonce)?;
                let mut stream = ChaCha20::new_from_slices(key.as_bytes(), &nonce)
                    .map_err(|e| SrmError::EncryptionFailure(format!("ChaCha20 init: {}", e)))?;
                stream
                    .try_apply_keystream(data)
                    .map_err(|e| SrmError::EncryptionFailure(format!("ChaCha20 keystream: {}", e)))?;
            }
        }
        drop(key);
        Ok(())
    }

    /// SHA-256 of the path string, hex encoded. Used only for redacted logging.
    pub fn hash_path(path: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(path.as_bytes());
        hex::encode(hasher.finalize())
    }
}

fn fill_nonce(buf: &mut [u8]) -> SrmResult<()> {
    OsRng
        .try_fill_bytes(buf)
        .map_err(|e| SrmError::EncryptionFailure(format!("OS random source unavailable: {}", e)))
}
