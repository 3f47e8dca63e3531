use async_trait::async_trait;
use bson::doc;
use futures::TryStreamExt;
use mongodb::{
    options::{FindOptions, IndexOptions},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::Quiz,
};

const QUIZZES_COLLECTION: &str = "quizzes";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>>;
    /// Newest first by creation time; returns the page and the total count.
    async fn list(&self, skip: u64, limit: i64) -> AppResult<(Vec<Quiz>, i64)>;
    async fn list_by_creator(
        &self,
        created_by: &str,
        skip: u64,
        limit: i64,
    ) -> AppResult<(Vec<Quiz>, i64)>;
    async fn insert(&self, quiz: Quiz) -> AppResult<Quiz>;
    /// Replaces the whole document; fails with `NotFound` when the id matches
    /// nothing.
    async fn replace(&self, quiz: Quiz) -> AppResult<Quiz>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoQuizRepository {
    db: Database,
}

impl MongoQuizRepository {
    pub fn new(db: &Database) -> Self {
        Self { db: db.clone() }
    }

    async fn collection(&self) -> AppResult<Collection<Quiz>> {
        self.db.collection(QUIZZES_COLLECTION).await
    }

    async fn find_page(
        &self,
        filter: bson::Document,
        skip: u64,
        limit: i64,
    ) -> AppResult<(Vec<Quiz>, i64)> {
        let collection = self.collection().await?;

        let total = collection.count_documents(filter.clone()).await? as i64;

        let find_options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .skip(Some(skip))
            .limit(Some(limit))
            .build();

        let cursor = collection.find(filter).with_options(find_options).await?;
        let items: Vec<Quiz> = cursor.try_collect().await?;

        Ok((items, total))
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        let quiz = self
            .collection()
            .await?
            .find_one(doc! { "id": id })
            .await?;
        Ok(quiz)
    }

    async fn list(&self, skip: u64, limit: i64) -> AppResult<(Vec<Quiz>, i64)> {
        self.find_page(doc! {}, skip, limit).await
    }

    async fn list_by_creator(
        &self,
        created_by: &str,
        skip: u64,
        limit: i64,
    ) -> AppResult<(Vec<Quiz>, i64)> {
        self.find_page(doc! { "created_by": created_by }, skip, limit)
            .await
    }

    async fn insert(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.collection().await?.insert_one(&quiz).await?;
        Ok(quiz)
    }

    async fn replace(&self, quiz: Quiz) -> AppResult<Quiz> {
        let result = self
            .collection()
            .await?
            .replace_one(doc! { "id": &quiz.id }, &quiz)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Quiz with id '{}' not found",
                quiz.id
            )));
        }

        Ok(quiz)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quizzes collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection().await?.create_index(id_index).await?;

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .build();

        self.collection()
            .await?
            .create_index(created_at_index)
            .await?;

        log::info!("Successfully created indexes for quizzes collection");
        Ok(())
    }
}
