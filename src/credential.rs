//! Sealed access credential and passphrase unsealing.
//!
//! The bearer token for the hosting API is not stored in the clear: it ships
//! as a symmetric-cipher descriptor carrying the IV, PBKDF2 parameters, salt,
//! and ciphertext in a single JSON value. The token only ever exists in
//! memory, for the duration of one push.

use aes::{Aes128, Aes256};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use ccm::aead::generic_array::GenericArray;
use ccm::aead::{Aead, KeyInit, Payload};
use ccm::consts::{U13, U8};
use ccm::Ccm;
use pbkdf2::pbkdf2_hmac;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

/// Embedded production descriptor sealing the upload token.
pub const SEALED_TOKEN: &str = r#"{"iv":"wwZja1kyc6vnKMP+sXaRdg==","v":1,"iter":10000,"ks":128,"ts":64,"mode":"ccm","adata":"","cipher":"aes","salt":"MfCsdtUbCOQ=","ct":"ZMgE9geLS8jfirkqE4pK6R1K6slvcLwC2Vo2zYeKGW0Yq9sOY6ez5Utnte9MDQSl"}"#;

/// Authentication tag size in bits supported by the descriptor format.
const TAG_BITS: u32 = 64;
/// Authentication tag size in bytes, appended to the ciphertext.
const TAG_LEN: usize = 8;
/// Nonce length in bytes; 13 leaves two CCM length octets.
const NONCE_LEN: usize = 13;

/// A symmetric-cipher-sealed credential descriptor.
///
/// Field names and units follow the descriptor as emitted by the original
/// sealing tool: sizes (`ks`, `ts`) are in bits, `iv`/`salt`/`ct` are
/// standard base64, and the authentication tag is appended to `ct`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedCredential {
    /// Base64 initialization vector; the leading 13 bytes form the nonce.
    pub iv: String,
    /// Descriptor format version.
    pub v: u32,
    /// PBKDF2 iteration count.
    pub iter: u32,
    /// Key size in bits.
    pub ks: u32,
    /// Authentication tag size in bits.
    pub ts: u32,
    /// Cipher mode; only `ccm` is supported.
    pub mode: String,
    /// Base64 additional authenticated data (usually empty).
    pub adata: String,
    /// Cipher; only `aes` is supported.
    pub cipher: String,
    /// Base64 PBKDF2 salt.
    pub salt: String,
    /// Base64 ciphertext with the tag appended.
    pub ct: String,
}

impl SealedCredential {
    /// Parses a descriptor from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not match the descriptor shape.
    pub fn from_json(json: &str) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        serde_json::from_str(json)
            .map_err(|e| format!("invalid credential descriptor: {e}").into())
    }

    /// Parses the embedded production descriptor.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded constant is malformed.
    pub fn embedded() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        Self::from_json(SEALED_TOKEN)
    }

    /// Recovers the bearer token by decrypting the descriptor.
    ///
    /// The key is derived with PBKDF2-HMAC-SHA256 over the passphrase and
    /// salt, then the ciphertext is opened with AES-CCM. A wrong passphrase
    /// fails tag authentication.
    ///
    /// # Errors
    ///
    /// Returns an error for unsupported descriptor parameters, malformed
    /// base64 fields, failed authentication, or non-UTF-8 plaintext.
    pub fn unseal(
        &self,
        passphrase: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        if self.v != 1 {
            return Err(format!("unsupported descriptor version: {}", self.v).into());
        }
        if self.cipher != "aes" {
            return Err(format!("unsupported cipher: {}", self.cipher).into());
        }
        if self.mode != "ccm" {
            return Err(format!("unsupported cipher mode: {}", self.mode).into());
        }
        if self.ts != TAG_BITS {
            return Err(format!("unsupported tag size: {} bits", self.ts).into());
        }
        if self.iter == 0 {
            return Err("iteration count must be positive".into());
        }

        let iv = BASE64.decode(&self.iv).map_err(|e| format!("invalid base64 in iv: {e}"))?;
        let salt = BASE64.decode(&self.salt).map_err(|e| format!("invalid base64 in salt: {e}"))?;
        let ct = BASE64.decode(&self.ct).map_err(|e| format!("invalid base64 in ct: {e}"))?;
        let aad =
            BASE64.decode(&self.adata).map_err(|e| format!("invalid base64 in adata: {e}"))?;

        if iv.len() < NONCE_LEN {
            return Err(format!("IV too short: {} bytes", iv.len()).into());
        }
        if ct.len() <= TAG_LEN {
            return Err("ciphertext too short".into());
        }
        // A 13-byte nonce leaves two CCM length octets, capping the payload
        // at 64 KiB.
        if ct.len() - TAG_LEN >= 1 << 16 {
            return Err("ciphertext too large for a 13-byte nonce".into());
        }

        let nonce = GenericArray::from_slice(&iv[..NONCE_LEN]);
        let payload = Payload { msg: &ct, aad: &aad };
        let plaintext = match self.ks {
            128 => {
                let mut key = [0u8; 16];
                pbkdf2_hmac::<Sha256>(passphrase.as_bytes(), &salt, self.iter, &mut key);
                Ccm::<Aes128, U8, U13>::new(GenericArray::from_slice(&key))
                    .decrypt(nonce, payload)
            }
            256 => {
                let mut key = [0u8; 32];
                pbkdf2_hmac::<Sha256>(passphrase.as_bytes(), &salt, self.iter, &mut key);
                Ccm::<Aes256, U8, U13>::new(GenericArray::from_slice(&key))
                    .decrypt(nonce, payload)
            }
            other => return Err(format!("unsupported key size: {other} bits").into()),
        }
        .map_err(|_| "decryption failed: wrong passphrase or corrupted ciphertext")?;

        String::from_utf8(plaintext)
            .map_err(|e| format!("decrypted credential is not valid UTF-8: {e}").into())
    }
}

/// Seals a token under a passphrase with fixed test parameters.
#[cfg(test)]
pub(crate) fn seal_for_tests(passphrase: &str, token: &str) -> SealedCredential {
    let iv = [0x42u8; 16];
    let salt = b"picpush-test";
    let iter = 1_000;

    let mut key = [0u8; 16];
    pbkdf2_hmac::<Sha256>(passphrase.as_bytes(), salt, iter, &mut key);
    let ct = Ccm::<Aes128, U8, U13>::new(GenericArray::from_slice(&key))
        .encrypt(GenericArray::from_slice(&iv[..NONCE_LEN]), token.as_bytes())
        .expect("sealing test credential");

    SealedCredential {
        iv: BASE64.encode(iv),
        v: 1,
        iter,
        ks: 128,
        ts: 64,
        mode: "ccm".to_string(),
        adata: String::new(),
        cipher: "aes".to_string(),
        salt: BASE64.encode(salt),
        ct: BASE64.encode(ct),
    }
}
