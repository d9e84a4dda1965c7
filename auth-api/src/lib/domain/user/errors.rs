use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("invalid user id: {0}")]
    InvalidFormat(String),
}

/// Error for name validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserNameError {
    #[error("the name is required")]
    Empty,
}

/// Error for email validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("the email is required")]
    Empty,
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error(transparent)]
    InvalidUserId(#[from] UserIdError),

    #[error(transparent)]
    InvalidName(#[from] UserNameError),

    #[error(transparent)]
    InvalidEmail(#[from] EmailError),

    // Domain-level errors; the id or email is carried for logging, the
    // wire message stays fixed.
    #[error("user not found")]
    NotFound(String),

    #[error("user not found")]
    NotFoundByEmail(String),

    #[error("email already in use")]
    EmailAlreadyInUse(String),

    #[error("invalid password")]
    InvalidPassword,

    // Infrastructure errors
    #[error("password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("database error: {0}")]
    Database(String),
}
