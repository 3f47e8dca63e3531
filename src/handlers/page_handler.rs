use actix_web::{get, HttpResponse};

// The frontend owns the real pages; these bodies exist so the route guard's
// redirect rules have concrete endpoints to protect.

#[get("/")]
pub async fn landing() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "page": "landing",
        "message": "Sign in with Google to manage quizzes",
    }))
}

#[get("/admin")]
pub async fn admin_dashboard() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "page": "dashboard",
    }))
}
