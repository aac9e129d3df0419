use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::partners::{Partner, PartnerDraft, PartnerListQuery, PartnerRole};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::partners::service;

/// GET /api/partners
pub async fn list(
    Query(query): Query<PartnerListQuery>,
) -> Result<Json<Vec<Partner>>, StatusCode> {
    match service::list(query).await {
        Ok(partners) => Ok(Json(partners)),
        Err(e) => {
            tracing::error!("Failed to list partners: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/partners/active — selection list for comboboxes.
pub async fn list_active() -> Result<Json<Vec<Partner>>, StatusCode> {
    match service::list_active().await {
        Ok(partners) => Ok(Json(partners)),
        Err(e) => {
            tracing::error!("Failed to list active partners: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/partners/roles
pub async fn roles() -> Result<Json<Vec<PartnerRole>>, StatusCode> {
    match service::roles().await {
        Ok(roles) => Ok(Json(roles)),
        Err(e) => {
            tracing::error!("Failed to list roles: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/partners
pub async fn create(Json(draft): Json<PartnerDraft>) -> Result<Json<serde_json::Value>, StatusCode> {
    match service::create(draft).await {
        Ok(id) => Ok(Json(serde_json::json!({ "id": id }))),
        Err(e) => {
            tracing::error!("Failed to register partner: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// PATCH /api/partners/:id
pub async fn update(
    Path(id): Path<Uuid>,
    Json(draft): Json<PartnerDraft>,
) -> StatusCode {
    match service::update(id, draft).await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::error!("Failed to update partner {}: {}", id, e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct IdSelection {
    pub ids: Vec<Uuid>,
}

/// POST /api/partners/delete
pub async fn delete_selected(Json(body): Json<IdSelection>) -> StatusCode {
    match service::soft_delete(&body.ids).await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::error!("Failed to delete partners: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
