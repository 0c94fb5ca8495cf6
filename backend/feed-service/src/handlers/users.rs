/// User status endpoints; both require an authenticated caller
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::app_state::AppState;
use crate::error::Result;
use crate::models::Identity;

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

/// GET /api/v1/users/status
pub async fn get_status(state: web::Data<AppState>, identity: Identity) -> Result<HttpResponse> {
    let status = state.auth.get_status(&identity).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "status": status })))
}

/// PUT /api/v1/users/status
pub async fn put_status(
    state: web::Data<AppState>,
    identity: Identity,
    req: web::Json<StatusRequest>,
) -> Result<HttpResponse> {
    state.auth.set_status(&identity, &req.status).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "status updated",
    })))
}
