use thiserror::Error;

/// Closed error-kind enum for the wallet bots. Handlers decide presentation
/// per kind instead of stringifying arbitrary errors: SDK messages are shown
/// verbatim, everything else gets a fixed operator-facing reply.
#[derive(Error, Debug)]
pub enum WalletBotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error("Store error: {0}")]
    Store(String),

    #[error("{0}")]
    Sdk(String),

    #[error("{0}")]
    Social(String),

    #[error("Bot error: {0}")]
    Bot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Cipher failures, split so callers can tell a misconfigured key from a
/// record that no longer decrypts.
#[derive(Error, Debug)]
pub enum CipherError {
    /// Encryption key absent or malformed (configuration error, fail fast).
    #[error("Encryption key error: {0}")]
    Key(String),

    /// Initialization vector malformed (not 16 hex-encoded bytes).
    #[error("Invalid iv: {0}")]
    Iv(String),

    /// Ciphertext did not decode: bad base64, bad padding, or plaintext
    /// that is not the expected JSON (wrong key, corrupted record, or iv
    /// mismatch all land here).
    #[error("Decode error: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, WalletBotError>;
