use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::User;

/// Repository trait for User persistence
///
/// This trait defines the data access interface for users.
/// Implementations can use different storage backends (MongoDB, in-memory).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Look up a user by exact username match (case-sensitive as stored)
    async fn find_by_user_name(&self, user_name: &str) -> UserResult<Option<User>>;

    /// Look up a user by exact email match
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// Persist a new user and return it with the store-assigned id
    async fn save(&self, user: User) -> UserResult<User>;
}

/// In-memory implementation of UserRepository (for development/testing)
///
/// Mirrors the store's unique index behavior: saving a duplicate non-empty
/// username or email fails with a store-level error.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_user_name(&self, user_name: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| u.user_name.as_deref() == Some(user_name))
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| u.email.as_deref() == Some(email))
            .cloned())
    }

    async fn save(&self, mut user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        if let Some(ref user_name) = user.user_name {
            if users.iter().any(|u| u.user_name.as_ref() == Some(user_name)) {
                return Err(UserError::Store(format!(
                    "duplicate key error: userName '{}'",
                    user_name
                )));
            }
        }

        if let Some(ref email) = user.email {
            if users.iter().any(|u| u.email.as_ref() == Some(email)) {
                return Err(UserError::Store(format!(
                    "duplicate key error: email '{}'",
                    email
                )));
            }
        }

        user.id = Some(ObjectId::new());
        users.push(user.clone());

        tracing::info!(user_id = ?user.id, "Created user");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_user(user_name: &str, email: &str) -> User {
        User {
            id: None,
            user_name: Some(user_name.to_string()),
            email: Some(email.to_string()),
            first_name: Some("Dummy".to_string()),
            last_name: Some("Dummy".to_string()),
            phone_number: Some("054328712".to_string()),
        }
    }

    #[tokio::test]
    async fn test_save_assigns_id() {
        let repo = InMemoryUserRepository::new();

        let saved = repo
            .save(dummy_user("dummyUser", "dummy@dummy.com"))
            .await
            .unwrap();

        assert!(saved.id.is_some());
        assert_eq!(repo.count().await, 1);
    }

    #[tokio::test]
    async fn test_find_by_user_name_exact_match() {
        let repo = InMemoryUserRepository::new();
        repo.save(dummy_user("dummyUser", "dummy@dummy.com"))
            .await
            .unwrap();

        let found = repo.find_by_user_name("dummyUser").await.unwrap();
        assert!(found.is_some());

        // Lookups are case-sensitive as stored
        let found = repo.find_by_user_name("DUMMYUSER").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let repo = InMemoryUserRepository::new();
        repo.save(dummy_user("dummyUser", "dummy@dummy.com"))
            .await
            .unwrap();

        assert!(repo.find_by_email("dummy@dummy.com").await.unwrap().is_some());
        assert!(repo.find_by_email("other@dummy.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_rejects_duplicate_user_name() {
        let repo = InMemoryUserRepository::new();
        repo.save(dummy_user("dummyUser", "first@dummy.com"))
            .await
            .unwrap();

        let result = repo.save(dummy_user("dummyUser", "second@dummy.com")).await;
        assert!(matches!(result, Err(UserError::Store(_))));
        assert_eq!(repo.count().await, 1);
    }

    #[tokio::test]
    async fn test_save_allows_multiple_users_without_credentials() {
        let repo = InMemoryUserRepository::new();

        // Sparse index behavior: absent userName/email never conflict
        let no_credentials = User {
            id: None,
            user_name: None,
            email: None,
            first_name: Some("Dummy".to_string()),
            last_name: None,
            phone_number: None,
        };

        repo.save(no_credentials.clone()).await.unwrap();
        repo.save(no_credentials).await.unwrap();
        assert_eq!(repo.count().await, 2);
    }
}
