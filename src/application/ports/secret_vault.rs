#[derive(Debug)]
pub enum VaultError {
    KeyDerivation(String),
    EncryptionFailed(String),
    DecryptionFailed(String),
    EncodingError(String),
}

impl std::fmt::Display for VaultError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VaultError::KeyDerivation(msg) => write!(f, "Key derivation failed: {}", msg),
            VaultError::EncryptionFailed(msg) => write!(f, "Encryption failed: {}", msg),
            VaultError::DecryptionFailed(msg) => write!(f, "Decryption failed: {}", msg),
            VaultError::EncodingError(msg) => write!(f, "Encoding error: {}", msg),
        }
    }
}

impl std::error::Error for VaultError {}

/// Authenticated encryption for credentials at rest. `decrypt` fails closed:
/// a ciphertext that does not authenticate is an error, never garbage
/// plaintext.
pub trait SecretVault: Send + Sync {
    fn encrypt(&self, plaintext: &str) -> Result<String, VaultError>;

    fn decrypt(&self, opaque: &str) -> Result<String, VaultError>;
}
