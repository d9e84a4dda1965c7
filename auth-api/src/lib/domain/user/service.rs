use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementing the registration and lookup flows.
///
/// Owns the credential hasher; the repository is injected.
pub struct UserService<R>
where
    R: UserRepository,
{
    repository: Arc<R>,
    password_hasher: auth::PasswordHasher,
}

impl<R> UserService<R>
where
    R: UserRepository,
{
    /// Create a new user service with an injected repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<R> UserServicePort for UserService<R>
where
    R: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        // Uniqueness pre-check; the repository's unique index closes the
        // find-then-insert race window.
        if let Some(existing) = self.repository.find_by_email(&command.email).await? {
            return Err(UserError::EmailAlreadyInUse(existing.email.to_string()));
        }

        let password_hash = self.password_hasher.hash(&command.password)?;

        let user = User {
            id: UserId::new(),
            name: command.name,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        self.repository.insert(user).await
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }

    async fn get_user_by_email(&self, email: &EmailAddress) -> Result<User, UserError> {
        self.repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| UserError::NotFoundByEmail(email.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::user::models::UserName;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn insert(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;
        }
    }

    fn register_command(name: &str, email: &str, password: &str) -> RegisterUserCommand {
        RegisterUserCommand::new(
            UserName::new(name.to_string()).unwrap(),
            EmailAddress::new(email.to_string()).unwrap(),
            password.to_string(),
        )
    }

    fn stored_user(email: &str) -> User {
        User {
            id: UserId::new(),
            name: UserName::new("Ana".to_string()).unwrap(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        repository
            .expect_insert()
            .withf(|user| {
                user.name.as_str() == "Ana"
                    && user.email.as_str() == "a@x.com"
                    // The digest, never the plaintext, reaches the store.
                    && user.password_hash.starts_with("$argon2")
                    && user.password_hash != "secret12"
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository));

        let result = service
            .register(register_command("Ana", "a@x.com", "secret12"))
            .await;
        assert!(result.is_ok());

        let user = result.unwrap();
        assert_eq!(user.name.as_str(), "Ana");
        assert_eq!(user.email.as_str(), "a@x.com");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(stored_user("a@x.com"))));

        repository.expect_insert().times(0);

        let service = UserService::new(Arc::new(repository));

        let result = service
            .register(register_command("Ana", "a@x.com", "secret12"))
            .await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::EmailAlreadyInUse(_)
        ));
    }

    #[tokio::test]
    async fn test_register_duplicate_email_race() {
        let mut repository = MockTestUserRepository::new();

        // Pre-check passes, but a concurrent registration wins the insert.
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        repository.expect_insert().times(1).returning(|user| {
            Err(UserError::EmailAlreadyInUse(user.email.to_string()))
        });

        let service = UserService::new(Arc::new(repository));

        let result = service
            .register(register_command("Ana", "a@x.com", "secret12"))
            .await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::EmailAlreadyInUse(_)
        ));
    }

    #[tokio::test]
    async fn test_get_user_success() {
        let mut repository = MockTestUserRepository::new();

        let expected = stored_user("a@x.com");
        let user_id = expected.id;

        let returned = expected.clone();
        repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        let service = UserService::new(Arc::new(repository));

        let user = service.get_user(&user_id).await.unwrap();
        assert_eq!(user.id, user_id);
        assert_eq!(user.email.as_str(), "a@x.com");
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository));

        let result = service.get_user(&UserId::new()).await;
        assert!(matches!(result.unwrap_err(), UserError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_user_by_email_success() {
        let mut repository = MockTestUserRepository::new();

        let expected = stored_user("a@x.com");
        let returned = expected.clone();
        repository
            .expect_find_by_email()
            .withf(|email| email.as_str() == "a@x.com")
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        let service = UserService::new(Arc::new(repository));

        let email = EmailAddress::new("a@x.com".to_string()).unwrap();
        let user = service.get_user_by_email(&email).await.unwrap();
        assert_eq!(user.id, expected.id);
    }

    #[tokio::test]
    async fn test_get_user_by_email_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository));

        let email = EmailAddress::new("nobody@x.com".to_string()).unwrap();
        let result = service.get_user_by_email(&email).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::NotFoundByEmail(_)
        ));
    }
}
