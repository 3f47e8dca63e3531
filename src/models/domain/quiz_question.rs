use serde::{Deserialize, Serialize};

/// A single multiple-choice question embedded in a quiz. `correct_answer`
/// refers to an option by value, which is why `options` must stay pairwise
/// distinct.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizQuestion {
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl QuizQuestion {
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }
}
