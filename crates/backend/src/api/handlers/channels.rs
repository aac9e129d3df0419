use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::channels::{Channel, ChannelDraft, ChannelListQuery};
use serde::Deserialize;

use crate::domain::channels::service;

/// GET /api/channels
pub async fn list(
    Query(query): Query<ChannelListQuery>,
) -> Result<Json<Vec<Channel>>, StatusCode> {
    match service::list(query).await {
        Ok(channels) => Ok(Json(channels)),
        Err(e) => {
            tracing::error!("Failed to list channels: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/channels/active — selection list for comboboxes.
pub async fn list_active() -> Result<Json<Vec<Channel>>, StatusCode> {
    match service::list_active().await {
        Ok(channels) => Ok(Json(channels)),
        Err(e) => {
            tracing::error!("Failed to list active channels: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/channels
pub async fn create(Json(draft): Json<ChannelDraft>) -> Result<Json<serde_json::Value>, StatusCode> {
    match service::create(draft).await {
        Ok(id) => Ok(Json(serde_json::json!({ "id": id }))),
        Err(e) => {
            tracing::error!("Failed to register channel: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// PATCH /api/channels/:id
pub async fn update(Path(id): Path<i64>, Json(draft): Json<ChannelDraft>) -> StatusCode {
    match service::update(id, draft).await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::error!("Failed to update channel {}: {}", id, e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct IdSelection {
    pub ids: Vec<i64>,
}

/// POST /api/channels/delete
pub async fn delete_selected(Json(body): Json<IdSelection>) -> StatusCode {
    match service::soft_delete(&body.ids).await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::error!("Failed to delete channels: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
