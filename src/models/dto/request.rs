use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::errors::{AppError, AppResult};
use crate::models::domain::{Quiz, QuizQuestion};

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct QuizInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    #[validate(length(min = 1))]
    pub questions: Vec<QuizQuestionInput>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuizQuestionInput {
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl QuizInput {
    /// Semantic checks beyond the derive-level bounds. Reports the first
    /// offending field by name so callers can surface it verbatim.
    pub fn validate_content(&self) -> AppResult<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::ValidationError(
                "title: must not be empty".to_string(),
            ));
        }

        if self.questions.is_empty() {
            return Err(AppError::ValidationError(
                "questions: at least one question is required".to_string(),
            ));
        }

        for (index, question) in self.questions.iter().enumerate() {
            if question.question_text.trim().is_empty() {
                return Err(AppError::ValidationError(format!(
                    "questions[{}].question_text: must not be empty",
                    index
                )));
            }

            if question.options.len() < 2 {
                return Err(AppError::ValidationError(format!(
                    "questions[{}].options: at least two options are required",
                    index
                )));
            }

            let mut seen = HashSet::new();
            for option in &question.options {
                if !seen.insert(option.as_str()) {
                    return Err(AppError::ValidationError(format!(
                        "questions[{}].options: options must be distinct",
                        index
                    )));
                }
            }

            if !question
                .options
                .iter()
                .any(|option| option == &question.correct_answer)
            {
                return Err(AppError::ValidationError(format!(
                    "questions[{}].correct_answer: must match one of the question's options",
                    index
                )));
            }
        }

        Ok(())
    }

    pub fn into_quiz(self, created_by: &str) -> Quiz {
        let now = bson::DateTime::now();
        Quiz {
            id: Uuid::new_v4().to_string(),
            title: self.title,
            description: self.description,
            questions: self
                .questions
                .into_iter()
                .map(QuizQuestion::from)
                .collect(),
            created_by: created_by.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Full-document update: everything but the identity and provenance
    /// fields comes from the input.
    pub fn apply_to(self, existing: &Quiz) -> Quiz {
        Quiz {
            id: existing.id.clone(),
            title: self.title,
            description: self.description,
            questions: self
                .questions
                .into_iter()
                .map(QuizQuestion::from)
                .collect(),
            created_by: existing.created_by.clone(),
            created_at: existing.created_at,
            updated_at: bson::DateTime::now(),
        }
    }
}

impl From<QuizQuestionInput> for QuizQuestion {
    fn from(input: QuizQuestionInput) -> Self {
        QuizQuestion {
            question_text: input.question_text,
            options: input.options,
            correct_answer: input.correct_answer,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizListParams {
    pub limit: Option<i64>,
    pub skip: Option<i64>,
    #[serde(default)]
    pub mine: bool,
}

impl QuizListParams {
    pub const DEFAULT_LIMIT: i64 = 50;
    pub const MAX_LIMIT: i64 = 100;

    // The upper bound keeps a single request from scanning the collection.
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }

    pub fn skip(&self) -> u64 {
        self.skip.unwrap_or(0).max(0) as u64
    }
}
