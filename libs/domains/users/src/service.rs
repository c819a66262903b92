//! User Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, User, UserResponse};
use crate::repository::UserRepository;

/// Blank means absent, empty, or whitespace-only.
fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// User service providing the create and fetch workflows
///
/// The service layer handles credential validation, uniqueness checks,
/// and mapping between transport and storage representations.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new UserService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new user.
    ///
    /// At least one of username and email must be non-blank. Each non-blank
    /// credential is checked against the store before the write; the
    /// username check runs first and a hit skips the email check. The two
    /// lookups and the insert are not atomic - the unique indexes are the
    /// authoritative guard against racing creates.
    ///
    /// Exactly one document is written on success, none on any failure.
    #[instrument(skip(self, input), fields(user_name = ?input.user_name))]
    pub async fn create_user(&self, input: CreateUser) -> UserResult<()> {
        let user_name = input.user_name.as_deref();
        let email = input.email.as_deref();

        if is_blank(user_name) && is_blank(email) {
            return Err(UserError::MissingCredentials);
        }

        if !is_blank(user_name)
            && self
                .repository
                .find_by_user_name(user_name.unwrap_or_default())
                .await?
                .is_some()
        {
            return Err(UserError::DuplicateUserName);
        }

        if !is_blank(email)
            && self
                .repository
                .find_by_email(email.unwrap_or_default())
                .await?
                .is_some()
        {
            return Err(UserError::DuplicateEmail);
        }

        self.repository.save(User::from(input)).await?;
        Ok(())
    }

    /// Fetch a user by exact username match.
    #[instrument(skip(self))]
    pub async fn get_user_by_user_name(&self, user_name: &str) -> UserResult<UserResponse> {
        let user = self
            .repository
            .find_by_user_name(user_name)
            .await?
            .ok_or_else(|| UserError::NotFound(user_name.to_string()))?;

        Ok(user.into())
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use mongodb::bson::oid::ObjectId;

    fn dummy_user() -> User {
        User {
            id: Some(ObjectId::new()),
            user_name: Some("dummyUser".to_string()),
            email: Some("dummy@dummy.com".to_string()),
            first_name: Some("Dummy".to_string()),
            last_name: Some("Dummy".to_string()),
            phone_number: Some("054328712".to_string()),
        }
    }

    fn full_request() -> CreateUser {
        CreateUser {
            user_name: Some("dummyUser".to_string()),
            email: Some("dummy@dummy.com".to_string()),
            first_name: Some("Dummy".to_string()),
            last_name: Some("Dummy".to_string()),
            phone_number: Some("054328712".to_string()),
        }
    }

    #[tokio::test]
    async fn test_get_user_by_user_name() {
        let mut mock_repo = MockUserRepository::new();
        let user = dummy_user();
        let expected = user.clone();

        mock_repo
            .expect_find_by_user_name()
            .withf(|user_name| user_name == "dummyUser")
            .returning(move |_| Ok(Some(user.clone())));

        let service = UserService::new(mock_repo);
        let response = service.get_user_by_user_name("dummyUser").await.unwrap();

        assert_eq!(response, UserResponse::from(expected));
    }

    #[tokio::test]
    async fn test_get_user_by_user_name_does_not_exist() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_user_name()
            .returning(|_| Ok(None));

        let service = UserService::new(mock_repo);
        let result = service.get_user_by_user_name("dummy").await;

        match result {
            Err(UserError::NotFound(name)) => assert_eq!(name, "dummy"),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_user_with_valid_credentials() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_user_name()
            .withf(|user_name| user_name == "dummyUser")
            .returning(|_| Ok(None));
        mock_repo
            .expect_find_by_email()
            .withf(|email| email == "dummy@dummy.com")
            .returning(|_| Ok(None));
        mock_repo
            .expect_save()
            .times(1)
            .returning(|mut user| {
                user.id = Some(ObjectId::new());
                Ok(user)
            });

        let service = UserService::new(mock_repo);
        assert!(service.create_user(full_request()).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_user_without_user_name_and_email() {
        // No expectations set: neither lookup nor save may run
        let mock_repo = MockUserRepository::new();

        let input = CreateUser {
            first_name: Some("Dummy".to_string()),
            last_name: Some("Dummy".to_string()),
            phone_number: Some("054328712".to_string()),
            ..Default::default()
        };

        let service = UserService::new(mock_repo);
        let result = service.create_user(input).await;

        assert!(matches!(result, Err(UserError::MissingCredentials)));
    }

    #[tokio::test]
    async fn test_create_user_with_blank_credentials() {
        // Whitespace-only counts as blank
        let mock_repo = MockUserRepository::new();

        let input = CreateUser {
            user_name: Some("   ".to_string()),
            email: Some("".to_string()),
            ..Default::default()
        };

        let service = UserService::new(mock_repo);
        let result = service.create_user(input).await;

        assert!(matches!(result, Err(UserError::MissingCredentials)));
    }

    #[tokio::test]
    async fn test_create_user_with_already_existing_email() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_email()
            .withf(|email| email == "already.exists@gmail.com")
            .returning(|_| Ok(Some(dummy_user())));
        mock_repo.expect_save().never();

        let input = CreateUser {
            email: Some("already.exists@gmail.com".to_string()),
            first_name: Some("Dummy".to_string()),
            ..Default::default()
        };

        let service = UserService::new(mock_repo);
        let result = service.create_user(input).await;

        assert!(matches!(result, Err(UserError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_create_user_with_already_existing_user_name() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_user_name()
            .withf(|user_name| user_name == "already.exists")
            .returning(|_| Ok(Some(dummy_user())));
        // A username hit must short-circuit the email lookup and the write
        mock_repo.expect_find_by_email().never();
        mock_repo.expect_save().never();

        let input = CreateUser {
            user_name: Some("already.exists".to_string()),
            email: Some("fresh@gmail.com".to_string()),
            first_name: Some("Dummy".to_string()),
            ..Default::default()
        };

        let service = UserService::new(mock_repo);
        let result = service.create_user(input).await;

        assert!(matches!(result, Err(UserError::DuplicateUserName)));
    }

    #[tokio::test]
    async fn test_create_user_username_check_runs_before_email_check() {
        let mut mock_repo = MockUserRepository::new();

        // Both credentials collide; the username conflict must win
        mock_repo
            .expect_find_by_user_name()
            .returning(|_| Ok(Some(dummy_user())));
        mock_repo.expect_find_by_email().never();
        mock_repo.expect_save().never();

        let service = UserService::new(mock_repo);
        let result = service.create_user(full_request()).await;

        assert!(matches!(result, Err(UserError::DuplicateUserName)));
    }

    #[tokio::test]
    async fn test_create_user_skips_username_check_when_blank() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo.expect_find_by_user_name().never();
        mock_repo
            .expect_find_by_email()
            .withf(|email| email == "dummy@dummy.com")
            .returning(|_| Ok(None));
        mock_repo.expect_save().times(1).returning(Ok);

        let input = CreateUser {
            email: Some("dummy@dummy.com".to_string()),
            ..Default::default()
        };

        let service = UserService::new(mock_repo);
        assert!(service.create_user(input).await.is_ok());
    }
}
