use axum::http::StatusCode;
use axum::Json;
use contracts::dashboards::{DashboardSummary, PartnerRankRow, UpcomingOrder, WeeklyLoadPoint};

use crate::dashboards::service;

/// GET /api/dashboard/summary
pub async fn summary() -> Result<Json<DashboardSummary>, StatusCode> {
    match service::summary().await {
        Ok(summary) => Ok(Json(summary)),
        Err(e) => {
            tracing::error!("Failed to build dashboard summary: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/dashboard/weekly
pub async fn weekly() -> Result<Json<Vec<WeeklyLoadPoint>>, StatusCode> {
    match service::weekly_load().await {
        Ok(points) => Ok(Json(points)),
        Err(e) => {
            tracing::error!("Failed to build weekly load: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/dashboard/upcoming
pub async fn upcoming() -> Result<Json<Vec<UpcomingOrder>>, StatusCode> {
    match service::upcoming(6).await {
        Ok(orders) => Ok(Json(orders)),
        Err(e) => {
            tracing::error!("Failed to list upcoming orders: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/dashboard/top-partners
pub async fn top_partners() -> Result<Json<Vec<PartnerRankRow>>, StatusCode> {
    match service::top_partners_today(5).await {
        Ok(rows) => Ok(Json(rows)),
        Err(e) => {
            tracing::error!("Failed to rank partners: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
