use aes_gcm::{
    aead::{Aead, AeadCore, OsRng},
    Aes256Gcm, KeyInit, Nonce,
};
use base64::{engine::general_purpose, Engine};

pub const KEY_LENGTH: usize = 32;
const NONCE_LENGTH: usize = 12;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum EncryptionError {
    #[error("Encryption key must be {KEY_LENGTH} bytes, got {0}")]
    InvalidKeyLength(usize),
    #[error("Error encrypting text")]
    Encrypt,
    #[error("Error base64-decoding cipher_text: {0}")]
    Decode(String),
    #[error("Error decrypting cipher_text")]
    Decrypt,
    #[error("Error utf8-encoding decrypted text: {0}")]
    Utf8(String),
}

/// AES-256-GCM over short strings. Every call draws a fresh nonce which is
/// prepended to the cipher text before URL safe base64 encoding.
#[derive(Clone)]
pub struct Encryptor {
    cipher: Aes256Gcm,
}

impl Encryptor {
    pub fn new(key: &[u8]) -> Result<Self, EncryptionError> {
        if key.len() != KEY_LENGTH {
            return Err(EncryptionError::InvalidKeyLength(key.len()));
        }
        let cipher = Aes256Gcm::new_from_slice(key)
            .map_err(|_| EncryptionError::InvalidKeyLength(key.len()))?;
        Ok(Self { cipher })
    }

    pub fn encrypt(&self, text: &str) -> Result<String, EncryptionError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let cipher_text = self
            .cipher
            .encrypt(&nonce, text.as_bytes())
            .map_err(|_| EncryptionError::Encrypt)?;
        let mut buff = nonce.to_vec();
        buff.extend_from_slice(&cipher_text);
        Ok(general_purpose::URL_SAFE.encode(buff))
    }

    pub fn decrypt(&self, encoded: &str) -> Result<String, EncryptionError> {
        let decoded = general_purpose::URL_SAFE
            .decode(encoded)
            .map_err(|e| EncryptionError::Decode(e.to_string()))?;
        if decoded.len() < NONCE_LENGTH {
            return Err(EncryptionError::Decrypt);
        }
        let (nonce, cipher_text) = decoded.split_at(NONCE_LENGTH);
        let plain_text = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), cipher_text)
            .map_err(|_| EncryptionError::Decrypt)?;
        String::from_utf8(plain_text).map_err(|e| EncryptionError::Utf8(e.utf8_error().to_string()))
    }
}
