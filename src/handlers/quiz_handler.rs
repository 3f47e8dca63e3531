use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{QuizInput, QuizListParams},
};

/// Mounted under `/api`; the auth middleware has already validated the
/// session, the service re-checks the admin role before the store is touched.
#[get("/quizzes")]
async fn list_quizzes(
    state: web::Data<AppState>,
    params: web::Query<QuizListParams>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = state.quiz_service.list_quizzes(&auth.0, &params).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/quizzes/{id}")]
async fn get_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_quiz(&auth.0, &id).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[post("/quizzes")]
async fn create_quiz(
    state: web::Data<AppState>,
    input: web::Json<QuizInput>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = state
        .quiz_service
        .create_quiz(&auth.0, input.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(response))
}

#[post("/quizzes/{id}")]
async fn update_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    input: web::Json<QuizInput>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state
        .quiz_service
        .update_quiz(&auth.0, &id, input.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(quiz))
}

pub fn configure(config: &mut web::ServiceConfig) {
    config
        .service(list_quizzes)
        .service(get_quiz)
        .service(create_quiz)
        .service(update_quiz);
}
