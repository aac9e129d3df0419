use axum::{http::StatusCode, Extension, Json};
use contracts::system::auth::{CurrentUser, LoginRequest, LoginResponse};

use crate::system::auth::service;

/// POST /api/system/auth/login
pub async fn login(
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, StatusCode> {
    match service::login(request).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::warn!("Login failed: {}", e);
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}

/// GET /api/system/auth/me
pub async fn current_user(
    Extension(user): Extension<CurrentUser>,
) -> Json<CurrentUser> {
    Json(user)
}
