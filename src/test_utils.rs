use crate::models::domain::{IdentityProfile, User};
use crate::models::dto::{QuizInput, QuizQuestionInput};
