#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use bson::oid::ObjectId;
use secrecy::SecretString;
use tokio::sync::RwLock;

use quizdeck_server::{
    app_state::AppState,
    auth::JwtService,
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{Quiz, QuizQuestion, User, UserRole},
    repositories::{QuizRepository, UserRepository},
    services::{QuizService, UserService},
};

pub struct InMemoryQuizRepository {
    quizzes: Arc<RwLock<HashMap<String, Quiz>>>,
}

impl InMemoryQuizRepository {
    pub fn new() -> Self {
        Self {
            quizzes: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn len(&self) -> usize {
        self.quizzes.read().await.len()
    }

    pub async fn seed(&self, quizzes: Vec<Quiz>) {
        let mut map = self.quizzes.write().await;
        for quiz in quizzes {
            map.insert(quiz.id.clone(), quiz);
        }
    }
}

fn page_of(mut items: Vec<Quiz>, skip: u64, limit: i64) -> (Vec<Quiz>, i64) {
    // Same ordering contract as the Mongo implementation: newest first.
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let total = items.len() as i64;
    let start = (skip as usize).min(items.len());
    let end = (start + limit.max(0) as usize).min(items.len());

    (items[start..end].to_vec(), total)
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes.get(id).cloned())
    }

    async fn list(&self, skip: u64, limit: i64) -> AppResult<(Vec<Quiz>, i64)> {
        let quizzes = self.quizzes.read().await;
        Ok(page_of(quizzes.values().cloned().collect(), skip, limit))
    }

    async fn list_by_creator(
        &self,
        created_by: &str,
        skip: u64,
        limit: i64,
    ) -> AppResult<(Vec<Quiz>, i64)> {
        let quizzes = self.quizzes.read().await;
        let items: Vec<_> = quizzes
            .values()
            .filter(|quiz| quiz.created_by == created_by)
            .cloned()
            .collect();
        Ok(page_of(items, skip, limit))
    }

    async fn insert(&self, quiz: Quiz) -> AppResult<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        if quizzes.contains_key(&quiz.id) {
            return Err(AppError::AlreadyExists(format!(
                "Quiz with id '{}' already exists",
                quiz.id
            )));
        }

        quizzes.insert(quiz.id.clone(), quiz.clone());
        Ok(quiz)
    }

    async fn replace(&self, quiz: Quiz) -> AppResult<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        if !quizzes.contains_key(&quiz.id) {
            return Err(AppError::NotFound(format!(
                "Quiz with id '{}' not found",
                quiz.id
            )));
        }

        quizzes.insert(quiz.id.clone(), quiz.clone());
        Ok(quiz)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

pub struct InMemoryUserRepository {
    users_by_email: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users_by_email: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn len(&self) -> usize {
        self.users_by_email.read().await.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: User) -> AppResult<User> {
        let mut users = self.users_by_email.write().await;

        if users.contains_key(&user.email) {
            return Err(AppError::AlreadyExists(format!(
                "User with email '{}' already exists",
                user.email
            )));
        }

        users.insert(user.email.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users_by_email.read().await;
        Ok(users.get(email).cloned())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

pub fn test_config() -> Config {
    Config {
        mongo_conn_string: "mongodb://localhost:27017".to_string(),
        mongo_db_name: "quizdeck-test".to_string(),
        google_client_id: "id string".to_string(),
        google_client_secret: SecretString::from("secret string".to_string()),
        google_redirect_uri: "http://localhost:8080/auth/google/callback".to_string(),
        frontend_origin: "http://localhost:5173".to_string(),
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 8080,
        jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
        jwt_expiration_hours: 1,
    }
}

pub fn make_user(email: &str) -> User {
    User {
        id: Some(ObjectId::new()),
        email: email.to_string(),
        name: "Test User".to_string(),
        profile_photo: None,
        role: UserRole::Admin,
        created_at: bson::DateTime::now(),
    }
}

pub fn make_question(text: &str, options: &[&str], correct: &str) -> QuizQuestion {
    QuizQuestion {
        question_text: text.to_string(),
        options: options.iter().map(|s| s.to_string()).collect(),
        correct_answer: correct.to_string(),
    }
}

/// Quiz pinned to an explicit creation instant so ordering tests are
/// deterministic.
pub fn make_quiz_at(id: &str, title: &str, created_by: &str, millis: i64) -> Quiz {
    Quiz {
        id: id.to_string(),
        title: title.to_string(),
        description: None,
        questions: vec![make_question(
            "Capital of France?",
            &["Paris", "Lyon"],
            "Paris",
        )],
        created_by: created_by.to_string(),
        created_at: bson::DateTime::from_millis(millis),
        updated_at: bson::DateTime::from_millis(millis),
    }
}

pub struct TestHarness {
    pub state: AppState,
    pub quiz_repo: Arc<InMemoryQuizRepository>,
    pub user_repo: Arc<InMemoryUserRepository>,
}

pub fn build_harness() -> TestHarness {
    let config = Arc::new(test_config());
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt_secret,
        config.jwt_expiration_hours,
    ));

    let quiz_repo = Arc::new(InMemoryQuizRepository::new());
    let user_repo = Arc::new(InMemoryUserRepository::new());

    let state = AppState::from_parts(
        Arc::new(UserService::new(user_repo.clone())),
        Arc::new(QuizService::new(quiz_repo.clone())),
        jwt_service,
        config,
    );

    TestHarness {
        state,
        quiz_repo,
        user_repo,
    }
}

impl TestHarness {
    /// Mints a signed session token for the given user.
    pub fn token_for(&self, user: &User) -> String {
        self.state
            .jwt_service
            .create_token(user)
            .expect("token should mint")
    }
}
