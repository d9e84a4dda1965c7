use async_trait::async_trait;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for the authentication flow's user operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user with validated fields.
    ///
    /// Checks email uniqueness, hashes the password, and persists the
    /// user. The caller never sees the stored hash.
    ///
    /// # Errors
    /// * `EmailAlreadyInUse` - another user holds this email
    /// * `Password` - hashing failed
    /// * `Database` - persistence failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError>;

    /// Retrieve a user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - user does not exist
    /// * `Database` - lookup failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Retrieve a user by email address (case-sensitive exact match).
    ///
    /// # Errors
    /// * `NotFoundByEmail` - no user with this email
    /// * `Database` - lookup failed
    async fn get_user_by_email(&self, email: &EmailAddress) -> Result<User, UserError>;
}

/// Persistence operations for the user aggregate.
///
/// Injected into the service so tests can substitute an in-memory
/// implementation for the Postgres adapter.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// Implementations must enforce email uniqueness so that two
    /// registrations racing past the service's pre-check cannot both
    /// succeed.
    ///
    /// # Errors
    /// * `EmailAlreadyInUse` - unique-email constraint violated
    /// * `Database` - persistence failed
    async fn insert(&self, user: User) -> Result<User, UserError>;

    /// Retrieve a user by identifier.
    ///
    /// # Errors
    /// * `Database` - lookup failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve a user by email address.
    ///
    /// # Errors
    /// * `Database` - lookup failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;
}
