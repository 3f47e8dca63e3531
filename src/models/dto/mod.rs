pub mod request;
pub mod response;

pub use request::{QuizInput, QuizListParams, QuizQuestionInput};
pub use response::{CreateQuizResponse, QuizDto, QuizListResponse, QuizQuestionDto, QuizSummaryDto};
