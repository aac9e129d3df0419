use anyhow::Result;
use contracts::system::auth::{CurrentUser, LoginRequest, LoginResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::shared::data::store::store;

#[derive(Debug, Deserialize)]
struct MeRow {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    role: Option<RoleRef>,
}

#[derive(Debug, Deserialize)]
struct RoleRef {
    #[serde(default)]
    name: Option<String>,
}

/// Resolves the operator behind a bearer token via the Identity Provider.
pub async fn current_user(bearer: &str) -> Result<CurrentUser> {
    let me = store()
        .me(bearer, &["id", "email", "first_name", "last_name", "role.name"])
        .await?;
    let row: MeRow = serde_json::from_value(me)?;
    Ok(CurrentUser {
        id: row.id,
        email: row.email,
        first_name: row.first_name,
        last_name: row.last_name,
        role_name: row.role.and_then(|r| r.name),
    })
}

/// Logs an operator in and gates on the administrator role. Tokens come
/// from the Identity Provider and pass through untouched.
pub async fn login(request: LoginRequest) -> Result<LoginResponse> {
    let tokens = store().login(&request.email, &request.password).await?;
    let response: LoginResponse = serde_json::from_value(tokens)?;

    let user = current_user(&response.access_token).await?;
    if !user.is_admin() {
        tracing::warn!("Login rejected for {}: not an administrator", request.email);
        anyhow::bail!("관리자 권한이 없습니다.");
    }

    tracing::info!("Operator {} logged in", request.email);
    Ok(response)
}
