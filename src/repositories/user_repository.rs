use async_trait::async_trait;
use bson::doc;
use mongodb::{options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::User};

const USERS_COLLECTION: &str = "users";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Single atomic insert; a unique-index violation surfaces as
    /// `AlreadyExists` so a concurrent first sign-in can recover.
    async fn insert(&self, user: User) -> AppResult<User>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoUserRepository {
    db: Database,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        Self { db: db.clone() }
    }

    async fn collection(&self) -> AppResult<Collection<User>> {
        self.db.collection(USERS_COLLECTION).await
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn insert(&self, user: User) -> AppResult<User> {
        self.collection().await?.insert_one(&user).await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = self
            .collection()
            .await?
            .find_one(doc! { "email": email })
            .await?;
        Ok(user)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let options = IndexOptions::builder()
            .unique(true)
            .name("email_unique".to_string())
            .build();
        let model = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(options)
            .build();

        self.collection().await?.create_index(model).await?;
        log::info!("Created unique index on email field");

        Ok(())
    }
}
