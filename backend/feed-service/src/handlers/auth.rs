/// Signup and login endpoints
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use validator::Validate;

use crate::app_state::AppState;
use crate::error::Result;

#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "email is invalid"))]
    pub email: String,

    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,

    #[validate(length(min = 5, message = "password too short"))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// PUT /api/v1/auth/signup
pub async fn signup(
    state: web::Data<AppState>,
    req: web::Json<SignupRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let user = state
        .auth
        .signup(&req.email, &req.name, &req.password)
        .await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "user created",
        "userId": user.id,
    })))
}

/// POST /api/v1/auth/login
pub async fn login(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let response = state.auth.login(&req.email, &req.password).await?;
    Ok(HttpResponse::Ok().json(response))
}
