use axum::{body::Body, extract::Request, http::StatusCode, middleware::Next, response::Response};

use super::service;

/// Middleware that requires an administrator session.
///
/// The bearer token is validated against the Identity Provider on every
/// request; the resolved operator lands in the request extensions.
pub async fn require_admin(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let user = service::current_user(token)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    if !user.is_admin() {
        return Err(StatusCode::FORBIDDEN);
    }

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
