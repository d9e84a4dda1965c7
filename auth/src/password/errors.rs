use thiserror::Error;

/// Error type for password operations.
///
/// A mismatched password is not an error; [`verify`] reports it as
/// `Ok(false)`.
///
/// [`verify`]: super::PasswordHasher::verify
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    HashingFailed(String),

    #[error("password verification failed: {0}")]
    VerificationFailed(String),
}
