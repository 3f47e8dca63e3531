use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::{require_admin, Claims},
    errors::{AppError, AppResult},
    models::dto::{
        CreateQuizResponse, QuizDto, QuizInput, QuizListParams, QuizListResponse, QuizSummaryDto,
    },
    repositories::QuizRepository,
};

pub struct QuizService {
    repository: Arc<dyn QuizRepository>,
}

impl QuizService {
    pub fn new(repository: Arc<dyn QuizRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_quizzes(
        &self,
        claims: &Claims,
        params: &QuizListParams,
    ) -> AppResult<QuizListResponse> {
        require_admin(claims)?;

        let (items, total) = if params.mine {
            self.repository
                .list_by_creator(&claims.sub, params.skip(), params.limit())
                .await?
        } else {
            self.repository.list(params.skip(), params.limit()).await?
        };

        Ok(QuizListResponse {
            items: items.into_iter().map(QuizSummaryDto::from).collect(),
            total,
        })
    }

    pub async fn get_quiz(&self, claims: &Claims, id: &str) -> AppResult<QuizDto> {
        require_admin(claims)?;

        let quiz = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))?;

        Ok(quiz.into())
    }

    pub async fn create_quiz(
        &self,
        claims: &Claims,
        input: QuizInput,
    ) -> AppResult<CreateQuizResponse> {
        require_admin(claims)?;
        input.validate()?;
        input.validate_content()?;

        let quiz = input.into_quiz(&claims.sub);
        let created = self.repository.insert(quiz).await?;

        log::info!("Quiz created: {} by {}", created.id, claims.sub);
        Ok(CreateQuizResponse { id: created.id })
    }

    /// Any authenticated admin may update any quiz; ownership only scopes the
    /// list view. Last write wins on concurrent updates to one id.
    pub async fn update_quiz(
        &self,
        claims: &Claims,
        id: &str,
        input: QuizInput,
    ) -> AppResult<QuizDto> {
        require_admin(claims)?;
        input.validate()?;
        input.validate_content()?;

        let existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))?;

        let updated = input.apply_to(&existing);
        let saved = self.repository.replace(updated).await?;

        Ok(saved.into())
    }
}
