use actix_web::{
    cookie::{Cookie, SameSite},
    get, post, web, HttpResponse,
};
use secrecy::ExposeSecret as _;
use serde::{Deserialize, Serialize};

use crate::{
    app_state::AppState,
    auth::SESSION_COOKIE,
    errors::AppError,
    models::domain::{IdentityProfile, UserRole},
};

const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    code: String,
    #[serde(default)]
    redirect_uri: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
}

/// Consumes the authorization code minted by Google's consent screen. The
/// OAuth handshake itself stays on Google's side; this endpoint only redeems
/// the code, reads the identity claims, and issues the local session token.
#[get("/auth/google/callback")]
pub async fn google_callback(
    state: web::Data<AppState>,
    web::Query(params): web::Query<CallbackParams>,
) -> Result<HttpResponse, AppError> {
    let config = &state.config;

    // Must match the redirect_uri used in the authorization request.
    let redirect_uri = params
        .redirect_uri
        .as_deref()
        .unwrap_or(&config.google_redirect_uri);

    let client = reqwest::Client::new();

    let token_response = client
        .post(GOOGLE_TOKEN_URL)
        .form(&[
            ("code", params.code.as_str()),
            ("client_id", config.google_client_id.as_str()),
            ("client_secret", config.google_client_secret.expose_secret()),
            ("redirect_uri", redirect_uri),
            ("grant_type", "authorization_code"),
        ])
        .send()
        .await
        .map_err(|e| {
            log::error!("Failed to reach token endpoint: {}", e);
            AppError::InternalError(format!("Failed to exchange OAuth code: {}", e))
        })?;

    let oauth: serde_json::Value = token_response.json().await.map_err(|e| {
        AppError::InternalError(format!("Failed to parse token response: {}", e))
    })?;

    if let Some(error) = oauth.get("error").and_then(|v| v.as_str()) {
        let description = oauth
            .get("error_description")
            .and_then(|v| v.as_str())
            .unwrap_or("Unknown error");
        log::error!("OAuth exchange rejected: {} - {}", error, description);
        return Err(AppError::Unauthorized(format!(
            "Identity provider rejected the sign-in: {}",
            error
        )));
    }

    let access_token = oauth
        .get("access_token")
        .and_then(|v| v.as_str())
        .ok_or_else(|| {
            AppError::InternalError("No access_token in provider response".to_string())
        })?;

    let profile: IdentityProfile = client
        .get(GOOGLE_USERINFO_URL)
        .bearer_auth(access_token)
        .send()
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to fetch user info: {}", e)))?
        .json()
        .await
        .map_err(|e| {
            // The assertion is unusable without an email; fail the sign-in.
            AppError::Unauthorized(format!("Identity assertion was incomplete: {}", e))
        })?;

    let user = state.user_service.sign_in(profile).await?;
    let token = state.jwt_service.create_token(&user)?;

    let cookie = Cookie::build(SESSION_COOKIE, token.clone())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish();

    log::info!("Session issued for {}", user.email);

    Ok(HttpResponse::Ok().cookie(cookie).json(AuthResponse {
        token,
        email: user.email,
        name: user.name,
        role: user.role,
    }))
}

/// Sessions live only in the client-held token; signing out is discarding it.
#[post("/auth/logout")]
pub async fn logout() -> HttpResponse {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookie.make_removal();

    HttpResponse::Ok()
        .cookie(cookie)
        .json(serde_json::json!({ "message": "Signed out" }))
}
