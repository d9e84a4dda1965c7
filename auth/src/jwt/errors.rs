use thiserror::Error;

/// Error type for token operations.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("token is expired")]
    TokenExpired,

    #[error("token is invalid: {0}")]
    InvalidToken(String),
}
