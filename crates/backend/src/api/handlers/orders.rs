use axum::extract::{Path, Query};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use contracts::domain::orders::{
    Order, OrderDraft, OrderListQuery, OrderPage, StatusChoice,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::orders::{service, transfer};
use crate::shared::config;

/// GET /api/orders
pub async fn list(Query(query): Query<OrderListQuery>) -> Result<Json<OrderPage>, StatusCode> {
    match service::list(query).await {
        Ok(page) => Ok(Json(page)),
        Err(e) => {
            tracing::error!("Failed to list orders: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/orders/statuses
pub async fn statuses() -> Json<Vec<StatusChoice>> {
    Json(service::status_choices().await)
}

/// GET /api/orders/:id
pub async fn get_by_id(Path(id): Path<i64>) -> Result<Json<Order>, StatusCode> {
    match service::get_by_id(id).await {
        Ok(order) => Ok(Json(order)),
        Err(e) => {
            tracing::error!("Failed to load order {}: {}", id, e);
            Err(StatusCode::NOT_FOUND)
        }
    }
}

/// POST /api/orders
pub async fn create(Json(draft): Json<OrderDraft>) -> Result<Json<serde_json::Value>, StatusCode> {
    match service::create(draft).await {
        Ok(id) => Ok(Json(serde_json::json!({ "id": id }))),
        Err(e) => {
            tracing::error!("Failed to register order: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// PATCH /api/orders/:id
pub async fn update(
    Path(id): Path<i64>,
    Json(draft): Json<OrderDraft>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    match service::update(id, draft).await {
        Ok(changed) => Ok(Json(serde_json::json!({ "updated": changed }))),
        Err(e) => {
            tracing::error!("Failed to update order {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct IdSelection {
    pub ids: Vec<i64>,
}

/// POST /api/orders/delete
pub async fn delete_selected(Json(body): Json<IdSelection>) -> StatusCode {
    match service::soft_delete(&body.ids).await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::error!("Failed to delete orders: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PartnerAssignment {
    pub ids: Vec<i64>,
    pub partner: Uuid,
}

/// POST /api/orders/assign-partner
pub async fn assign_partner(Json(body): Json<PartnerAssignment>) -> StatusCode {
    match service::assign_partner(&body.ids, body.partner).await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::error!("Failed to reassign partner: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChannelAssignment {
    pub ids: Vec<i64>,
    pub channel: i64,
}

/// POST /api/orders/assign-channel
pub async fn assign_channel(Json(body): Json<ChannelAssignment>) -> StatusCode {
    match service::assign_channel(&body.ids, body.channel).await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::error!("Failed to reassign channel: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// GET /api/orders/export — the current list filter as a CSV download.
pub async fn export_csv(
    Query(query): Query<OrderListQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let page = service::list(query).await.map_err(|e| {
        tracing::error!("Failed to load orders for export: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let csv_text = transfer::export_rows(&page.rows, &page.totals).map_err(|e| {
        tracing::error!("Failed to render order export: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"orders.csv\"",
            ),
        ],
        csv_text,
    ))
}

/// POST /api/orders/import — CSV rows become new orders.
pub async fn import_csv(body: String) -> Result<Json<serde_json::Value>, StatusCode> {
    let sentinel = config::get().record_store.unassigned_partner;
    let drafts = transfer::parse_import(&body, sentinel).map_err(|e| {
        tracing::warn!("Rejected order import: {}", e);
        StatusCode::BAD_REQUEST
    })?;
    if drafts.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    match transfer::import(drafts).await {
        Ok(created) => Ok(Json(serde_json::json!({ "created": created }))),
        Err(e) => {
            tracing::error!("Order import failed: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
