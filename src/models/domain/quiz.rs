use serde::{Deserialize, Serialize};

use crate::models::domain::quiz_question::QuizQuestion;

/// The persisted quiz document. Question order is meaningful: it is the order
/// a quiz taker walks through.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub questions: Vec<QuizQuestion>,
    // Weak reference to the creating user; ownership only, not a lifecycle tie.
    pub created_by: String,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}
