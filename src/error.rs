// src/error.rs

use thiserror::Error;

/// Errors produced while decoding keys or deriving addresses.
///
/// All variants describe untrusted-input failures except [`KeyError::Encoding`],
/// which signals a fault in the caller's transport (bad hex) rather than in
/// the key data itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// The buffer is shorter than its prefix byte requires.
    #[error("bad binary size ({actual} bytes, expected {expected})")]
    BadLength { expected: usize, actual: usize },

    /// Unrecognized prefix byte, or a payload that does not describe a curve point.
    #[error("bad key format: {0}")]
    BadFormat(String),

    /// The coordinates do not lie on the curve (or `x` is outside `[0, p)`).
    #[error("invalid curve point")]
    InvalidPoint,

    #[error("encoding error: {0}")]
    Encoding(String),

    /// A key-interchange document names a key type this crate cannot represent.
    #[error("unsupported key: {0}")]
    UnsupportedKey(String),

    #[error("malformed SubjectPublicKeyInfo: {0}")]
    Spki(#[from] spki::Error),
}

impl From<hex::FromHexError> for KeyError {
    fn from(err: hex::FromHexError) -> Self {
        KeyError::Encoding(err.to_string())
    }
}

pub type Result<T> = core::result::Result<T, KeyError>;
