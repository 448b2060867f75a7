//! AES-256-CBC cipher helper for wallet export payloads.
//!
//! The record format is fixed: payload serialized to compact JSON, PKCS7
//! padded, encrypted in CBC mode under the server key, base64-encoded; the
//! iv is 16 random bytes, hex-encoded, generated fresh per record and
//! **never reused** across records. A fresh iv per record is what keeps two
//! users' identical payloads from producing identical ciphertexts under the
//! shared key.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rand::rngs::OsRng;
use rand::RngCore;
use serde_json::Value;
use wbot_core::CipherError;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

const BLOCK_SIZE: usize = 16;
const KEY_LEN: usize = 32;

// ---------------------------------------------------------------------------
// Iv
// ---------------------------------------------------------------------------

/// 128-bit CBC initialization vector, persisted hex-encoded alongside the
/// ciphertext.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Iv([u8; BLOCK_SIZE]);

impl Iv {
    /// Fixed byte length of an AES-CBC iv.
    pub const LEN: usize = BLOCK_SIZE;

    /// Generates a fresh random iv from OS entropy. One per encryption.
    pub fn generate() -> Self {
        let mut bytes = [0u8; BLOCK_SIZE];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Parses a persisted hex iv (32 hex chars).
    pub fn from_hex(s: &str) -> Result<Self, CipherError> {
        let bytes = hex::decode(s).map_err(|e| CipherError::Iv(format!("not hex: {}", e)))?;
        let bytes: [u8; BLOCK_SIZE] = bytes
            .try_into()
            .map_err(|_| CipherError::Iv(format!("expected {} bytes", BLOCK_SIZE)))?;
        Ok(Self(bytes))
    }

    /// Hex encoding for persistence.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Returns the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; BLOCK_SIZE] {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Cipher
// ---------------------------------------------------------------------------

/// AES-256-CBC cipher under a process-wide key. The key is externally
/// supplied (hex-encoded environment value), never derived from user input.
#[derive(Clone)]
pub struct Cipher {
    key: [u8; KEY_LEN],
}

impl Cipher {
    /// Builds a cipher from a hex-encoded 256-bit key. An empty or
    /// malformed value is a configuration error and aborts the call.
    pub fn from_hex_key(hex_key: &str) -> Result<Self, CipherError> {
        if hex_key.trim().is_empty() {
            return Err(CipherError::Key("ENCRYPTION_KEY is not set".to_string()));
        }
        let bytes =
            hex::decode(hex_key.trim()).map_err(|e| CipherError::Key(format!("not hex: {}", e)))?;
        let key: [u8; KEY_LEN] = bytes
            .try_into()
            .map_err(|_| CipherError::Key(format!("expected {} bytes", KEY_LEN)))?;
        Ok(Self { key })
    }

    /// Serializes `payload` to compact JSON, pads, encrypts with the given
    /// iv, and returns the base64 ciphertext.
    pub fn encrypt(&self, payload: &Value, iv: &Iv) -> Result<String, CipherError> {
        let plaintext = serde_json::to_vec(payload)
            .map_err(|e| CipherError::Decode(format!("payload not serializable: {}", e)))?;
        let ciphertext = Aes256CbcEnc::new(&self.key.into(), iv.as_bytes().into())
            .encrypt_padded_vec_mut::<Pkcs7>(&plaintext);
        Ok(BASE64.encode(ciphertext))
    }

    /// Inverse of [`encrypt`](Self::encrypt): base64-decode, decrypt, strip
    /// padding, parse JSON. A wrong key, corrupted record, or iv mismatch
    /// surfaces as [`CipherError::Decode`].
    pub fn decrypt(&self, ciphertext_b64: &str, iv: &Iv) -> Result<Value, CipherError> {
        let ciphertext = BASE64
            .decode(ciphertext_b64)
            .map_err(|e| CipherError::Decode(format!("not base64: {}", e)))?;
        if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
            return Err(CipherError::Decode(format!(
                "ciphertext length {} is not a multiple of the block size",
                ciphertext.len()
            )));
        }
        let plaintext = Aes256CbcDec::new(&self.key.into(), iv.as_bytes().into())
            .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
            .map_err(|_| {
                CipherError::Decode(
                    "bad padding (wrong key, corrupted record, or iv mismatch)".to_string(),
                )
            })?;
        serde_json::from_slice(&plaintext)
            .map_err(|e| CipherError::Decode(format!("plaintext is not valid JSON: {}", e)))
    }
}
