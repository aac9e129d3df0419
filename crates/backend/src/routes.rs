use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

use crate::{api::handlers, system};

/// Route table for the whole application. Everything except the health
/// probe and the login endpoint sits behind the administrator gate.
pub fn configure_routes() -> Router {
    let protected = Router::new()
        // System auth
        .route(
            "/api/system/auth/me",
            get(handlers::auth::current_user),
        )
        // Orders
        .route(
            "/api/orders",
            get(handlers::orders::list).post(handlers::orders::create),
        )
        .route("/api/orders/statuses", get(handlers::orders::statuses))
        .route("/api/orders/export", get(handlers::orders::export_csv))
        .route("/api/orders/import", post(handlers::orders::import_csv))
        .route("/api/orders/delete", post(handlers::orders::delete_selected))
        .route(
            "/api/orders/assign-partner",
            post(handlers::orders::assign_partner),
        )
        .route(
            "/api/orders/assign-channel",
            post(handlers::orders::assign_channel),
        )
        .route(
            "/api/orders/:id",
            get(handlers::orders::get_by_id).patch(handlers::orders::update),
        )
        // Partners
        .route(
            "/api/partners",
            get(handlers::partners::list).post(handlers::partners::create),
        )
        .route("/api/partners/active", get(handlers::partners::list_active))
        .route("/api/partners/roles", get(handlers::partners::roles))
        .route(
            "/api/partners/delete",
            post(handlers::partners::delete_selected),
        )
        .route("/api/partners/:id", patch(handlers::partners::update))
        // Channels
        .route(
            "/api/channels",
            get(handlers::channels::list).post(handlers::channels::create),
        )
        .route("/api/channels/active", get(handlers::channels::list_active))
        .route(
            "/api/channels/delete",
            post(handlers::channels::delete_selected),
        )
        .route("/api/channels/:id", patch(handlers::channels::update))
        // Statistics
        .route("/api/statistics", get(handlers::statistics::report))
        // Dashboard
        .route("/api/dashboard/summary", get(handlers::dashboard::summary))
        .route("/api/dashboard/weekly", get(handlers::dashboard::weekly))
        .route("/api/dashboard/upcoming", get(handlers::dashboard::upcoming))
        .route(
            "/api/dashboard/top-partners",
            get(handlers::dashboard::top_partners),
        )
        .layer(middleware::from_fn(
            system::auth::middleware::require_admin,
        ));

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/system/auth/login", post(handlers::auth::login))
        .merge(protected)
}
