use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{MongoQuizRepository, MongoUserRepository, QuizRepository, UserRepository},
    services::{QuizService, UserService},
};

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub quiz_service: Arc<QuizService>,
    pub jwt_service: Arc<JwtService>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Builds the production wiring. The store connection is established here,
    /// before the server accepts traffic; failure is unrecoverable by design.
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::new(&config);
        db.connect().await?;

        let user_repository = Arc::new(MongoUserRepository::new(&db));
        user_repository.ensure_indexes().await?;
        let user_service = Arc::new(UserService::new(user_repository));

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db));
        quiz_repository.ensure_indexes().await?;
        let quiz_service = Arc::new(QuizService::new(quiz_repository));

        let jwt_service = Arc::new(JwtService::new(
            &config.jwt_secret,
            config.jwt_expiration_hours,
        ));

        Ok(Self {
            user_service,
            quiz_service,
            jwt_service,
            config: Arc::new(config),
        })
    }

    /// Assembles state from already-built parts; lets tests inject in-memory
    /// repositories instead of a live store.
    pub fn from_parts(
        user_service: Arc<UserService>,
        quiz_service: Arc<QuizService>,
        jwt_service: Arc<JwtService>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            user_service,
            quiz_service,
            jwt_service,
            config,
        }
    }
}
