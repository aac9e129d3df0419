use axum::extract::Query;
use axum::http::StatusCode;
use axum::Json;
use contracts::statistics::{StatisticsQuery, StatisticsReport};

use crate::statistics::service;

/// GET /api/statistics?date_from=2025-07-01&date_to=2025-07-31
///
/// Returns 204 when the request was superseded by a newer one before its
/// fetch resolved; the caller keeps the fresher report it already has.
pub async fn report(
    Query(query): Query<StatisticsQuery>,
) -> Result<Json<StatisticsReport>, StatusCode> {
    match service::build_report(query).await {
        Ok(Some(report)) => {
            tracing::info!(
                "Statistics: returning {} partner buckets over {} orders",
                report.partners.len(),
                report.totals.orders
            );
            Ok(Json(report))
        }
        Ok(None) => Err(StatusCode::NO_CONTENT),
        Err(e) => {
            tracing::error!("Failed to build statistics report: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
