use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::{Quiz, QuizQuestion};

/// Projection used by list views (sidebar navigation); question bodies are
/// deliberately left out.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuizSummaryDto {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Quiz> for QuizSummaryDto {
    fn from(quiz: Quiz) -> Self {
        QuizSummaryDto {
            id: quiz.id,
            title: quiz.title,
            description: quiz.description,
            created_at: quiz.created_at.to_chrono(),
            updated_at: quiz.updated_at.to_chrono(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuizListResponse {
    pub items: Vec<QuizSummaryDto>,
    pub total: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuizQuestionDto {
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl From<QuizQuestion> for QuizQuestionDto {
    fn from(question: QuizQuestion) -> Self {
        QuizQuestionDto {
            question_text: question.question_text,
            options: question.options,
            correct_answer: question.correct_answer,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuizDto {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub questions: Vec<QuizQuestionDto>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Quiz> for QuizDto {
    fn from(quiz: Quiz) -> Self {
        QuizDto {
            id: quiz.id,
            title: quiz.title,
            description: quiz.description,
            questions: quiz
                .questions
                .into_iter()
                .map(QuizQuestionDto::from)
                .collect(),
            created_by: quiz.created_by,
            created_at: quiz.created_at.to_chrono(),
            updated_at: quiz.updated_at.to_chrono(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateQuizResponse {
    pub id: String,
}
