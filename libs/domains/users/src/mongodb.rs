//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use mongodb::{
    bson::doc,
    options::IndexOptions,
    Collection, Database, IndexModel,
};
use tracing::instrument;

use crate::error::UserResult;
use crate::models::User;
use crate::repository::UserRepository;

/// MongoDB implementation of the UserRepository
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    /// Create a new MongoUserRepository over the "users" collection
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let db = client.database("mydb");
    /// let repo = MongoUserRepository::new(&db);
    /// ```
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<User>("users"),
        }
    }

    /// Create a new MongoUserRepository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<User>(collection_name),
        }
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<User> {
        &self.collection
    }

    /// Create the unique sparse indexes on `userName` and `email`.
    ///
    /// These indexes are the authoritative uniqueness guarantee; the
    /// service-level lookups exist to produce a friendly conflict response
    /// in the common non-racing case. Sparse, because either field may be
    /// absent.
    pub async fn create_indexes(&self) -> UserResult<()> {
        let unique_sparse = || IndexOptions::builder().unique(true).sparse(true).build();

        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "userName": 1 })
                .options(unique_sparse())
                .build(),
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(unique_sparse())
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self))]
    async fn find_by_user_name(&self, user_name: &str) -> UserResult<Option<User>> {
        let user = self
            .collection
            .find_one(doc! { "userName": user_name })
            .await?;
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let user = self.collection.find_one(doc! { "email": email }).await?;
        Ok(user)
    }

    #[instrument(skip(self, user), fields(user_name = ?user.user_name))]
    async fn save(&self, mut user: User) -> UserResult<User> {
        let result = self.collection.insert_one(&user).await?;
        user.id = result.inserted_id.as_object_id();

        tracing::info!(user_id = ?user.id, "User created successfully");
        Ok(user)
    }
}
