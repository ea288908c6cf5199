mod encryptor;
mod url_signer;

use aes_gcm::aead::{rand_core::RngCore, OsRng};

pub use encryptor::{EncryptionError, Encryptor, KEY_LENGTH};
pub use url_signer::UrlSigner;

/// Hex encoded random bytes from the OS generator.
pub fn random_token(byte_length: usize) -> String {
    let mut buff = vec![0_u8; byte_length];
    OsRng.fill_bytes(&mut buff);
    hex::encode(buff)
}
