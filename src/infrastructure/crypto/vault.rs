use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::{Aead, OsRng};
use aes_gcm::{Aes256Gcm, Key, KeyInit, Nonce};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use scrypt::{Params, scrypt};

use crate::application::ports::{SecretVault, VaultError};

const SALT_LEN: usize = 16;
const NONCE_LEN: usize = 12;
const KEY_LEN: usize = 32;
const TAG_LEN: usize = 16;

// scrypt cost parameters: N = 2^14, r = 8, p = 1.
const SCRYPT_LOG_N: u8 = 14;
const SCRYPT_R: u32 = 8;
const SCRYPT_P: u32 = 1;

/// AES-256-GCM credential vault.
///
/// Every encryption draws a fresh random salt and nonce; the AES key is
/// derived per record from the process master secret and that salt via
/// scrypt. The opaque output is base64(salt || nonce || ciphertext+tag).
/// Decryption re-derives the key from the embedded salt and fails closed if
/// the authentication tag does not verify: tampering or corruption is an
/// error, never garbage plaintext.
pub struct CredentialVault {
    master_secret: Vec<u8>,
}

impl CredentialVault {
    pub fn new(master_secret: &str) -> Self {
        Self {
            master_secret: master_secret.as_bytes().to_vec(),
        }
    }

    fn derive_key(&self, salt: &[u8]) -> Result<[u8; KEY_LEN], VaultError> {
        let params = Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, KEY_LEN)
            .map_err(|e| VaultError::KeyDerivation(e.to_string()))?;

        let mut key = [0u8; KEY_LEN];
        scrypt(&self.master_secret, salt, &params, &mut key)
            .map_err(|e| VaultError::KeyDerivation(e.to_string()))?;
        Ok(key)
    }
}

impl SecretVault for CredentialVault {
    fn encrypt(&self, plaintext: &str) -> Result<String, VaultError> {
        let mut salt = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);

        let key = self.derive_key(&salt)?;
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key));

        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_bytes())
            .map_err(|_| VaultError::EncryptionFailed("AEAD seal failed".to_string()))?;

        let mut out = Vec::with_capacity(SALT_LEN + NONCE_LEN + ciphertext.len());
        out.extend_from_slice(&salt);
        out.extend_from_slice(&nonce_bytes);
        out.extend_from_slice(&ciphertext);

        Ok(BASE64.encode(out))
    }

    fn decrypt(&self, opaque: &str) -> Result<String, VaultError> {
        let raw = BASE64
            .decode(opaque)
            .map_err(|e| VaultError::EncodingError(e.to_string()))?;

        if raw.len() < SALT_LEN + NONCE_LEN + TAG_LEN {
            return Err(VaultError::EncodingError(
                "ciphertext too short".to_string(),
            ));
        }

        let (salt, rest) = raw.split_at(SALT_LEN);
        let (nonce_bytes, ciphertext) = rest.split_at(NONCE_LEN);

        let key = self.derive_key(salt)?;
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key));

        let plaintext = cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|_| {
                VaultError::DecryptionFailed(
                    "authentication tag mismatch, ciphertext rejected".to_string(),
                )
            })?;

        String::from_utf8(plaintext)
            .map_err(|e| VaultError::DecryptionFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vault() -> CredentialVault {
        CredentialVault::new("a-sufficiently-long-master-secret")
    }

    #[test]
    fn test_round_trip() {
        let vault = vault();
        for plaintext in ["sk-test-1234", "", "ünïcode käy", "a".repeat(500).as_str()] {
            let opaque = vault.encrypt(plaintext).unwrap();
            assert_eq!(vault.decrypt(&opaque).unwrap(), plaintext);
        }
    }

    #[test]
    fn test_fresh_salt_and_nonce_per_call() {
        let vault = vault();
        let first = vault.encrypt("same plaintext").unwrap();
        let second = vault.encrypt("same plaintext").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_tampered_tag_fails_closed() {
        let vault = vault();
        let opaque = vault.encrypt("sk-test-1234").unwrap();

        let mut raw = BASE64.decode(&opaque).unwrap();
        // Flip one bit inside the trailing authentication tag.
        let last = raw.len() - 1;
        raw[last] ^= 0x01;
        let tampered = BASE64.encode(raw);

        assert!(matches!(
            vault.decrypt(&tampered),
            Err(VaultError::DecryptionFailed(_))
        ));
    }

    #[test]
    fn test_tampered_ciphertext_fails_closed() {
        let vault = vault();
        let opaque = vault.encrypt("sk-test-1234").unwrap();

        let mut raw = BASE64.decode(&opaque).unwrap();
        // Flip a bit in the ciphertext body, past salt and nonce.
        raw[SALT_LEN + NONCE_LEN] ^= 0x80;
        let tampered = BASE64.encode(raw);

        assert!(vault.decrypt(&tampered).is_err());
    }

    #[test]
    fn test_wrong_master_secret_fails_closed() {
        let opaque = vault().encrypt("sk-test-1234").unwrap();
        let other = CredentialVault::new("a-different-master-secret");

        assert!(other.decrypt(&opaque).is_err());
    }

    #[test]
    fn test_garbage_input_is_an_encoding_error() {
        let vault = vault();

        assert!(matches!(
            vault.decrypt("not base64 !!!"),
            Err(VaultError::EncodingError(_))
        ));
        assert!(matches!(
            vault.decrypt(&BASE64.encode(b"short")),
            Err(VaultError::EncodingError(_))
        ));
    }
}
