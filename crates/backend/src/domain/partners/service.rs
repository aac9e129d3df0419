use std::collections::HashMap;

use anyhow::Result;
use contracts::domain::common::Collection;
use contracts::domain::partners::{Partner, PartnerDraft, PartnerListQuery, PartnerRole, UserDetail};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::shared::data::directus::ItemsQuery;
use crate::shared::data::filter::Filter;
use crate::shared::data::store::store;

/// User row as the Record Store returns it, with the role expanded.
#[derive(Debug, Deserialize)]
struct UserRow {
    id: Uuid,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    role: Option<RoleRef>,
}

#[derive(Debug, Deserialize)]
struct RoleRef {
    #[serde(default)]
    name: Option<String>,
}

/// Active-region texts keyed by user id, from `usr_dtl`.
async fn region_map(user_ids: &[Uuid]) -> Result<HashMap<Uuid, String>> {
    if user_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let ids: Vec<Value> = user_ids.iter().map(|id| Value::from(id.to_string())).collect();
    let details = store()
        .list_items::<UserDetail>(
            UserDetail::NAME,
            &ItemsQuery::new()
                .fields(&["id", "user_id", "actv_rgon"])
                .filter(Filter::new().is_in("user_id", ids))
                .limit(-1),
        )
        .await?;
    Ok(details
        .into_iter()
        .filter_map(|d| d.actv_rgon.map(|region| (d.user_id, region)))
        .collect())
}

fn merge(users: Vec<UserRow>, mut regions: HashMap<Uuid, String>) -> Vec<Partner> {
    users
        .into_iter()
        .map(|user| Partner {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            status: user.status,
            role_name: user.role.and_then(|r| r.name),
            actv_rgon: regions.remove(&user.id),
        })
        .collect()
}

/// Active partners for selection lists, sorted by company name.
pub async fn list_active() -> Result<Vec<Partner>> {
    let users = store()
        .list_users::<UserRow>(
            &ItemsQuery::new()
                .fields(&["id", "first_name", "last_name", "email"])
                .filter(Filter::new().eq("status", "active"))
                .sort(&["first_name"])
                .limit(-1),
        )
        .await?;
    let ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();
    let regions = region_map(&ids).await?;
    Ok(merge(users, regions))
}

/// Filtered directory listing with the active region merged in.
pub async fn list(query: PartnerListQuery) -> Result<Vec<Partner>> {
    let mut filter = Filter::not_deleted();
    if let Some(company) = query.first_name.as_deref().filter(|s| !s.trim().is_empty()) {
        filter = filter.icontains("first_name", company);
    }
    if let Some(leader) = query.last_name.as_deref().filter(|s| !s.trim().is_empty()) {
        filter = filter.icontains("last_name", leader);
    }
    if let Some(email) = query.email.as_deref().filter(|s| !s.trim().is_empty()) {
        filter = filter.icontains("email", email);
    }
    if let Some(role) = query.role {
        filter = filter.eq("role", role.to_string());
    }

    let users = store()
        .list_users::<UserRow>(
            &ItemsQuery::new()
                .fields(&["id", "first_name", "last_name", "email", "status", "role.id", "role.name"])
                .filter(filter)
                .sort(&["first_name"])
                .limit(-1),
        )
        .await?;
    let ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();
    let regions = region_map(&ids).await?;
    Ok(merge(users, regions))
}

pub async fn roles() -> Result<Vec<PartnerRole>> {
    let roles = store().list_roles::<PartnerRole>().await?;
    Ok(roles)
}

/// Registers a partner: a store user plus its `usr_dtl` companion row.
pub async fn create(draft: PartnerDraft) -> Result<Uuid> {
    draft
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    if draft.password.as_deref().unwrap_or("").is_empty() {
        anyhow::bail!("Validation failed: 비밀번호를 입력해주세요.");
    }
    let payload = serde_json::json!({
        "email": draft.email,
        "password": draft.password,
        "first_name": draft.first_name,
        "last_name": draft.last_name,
        "role": draft.role.to_string(),
    });
    let created = store().create_user(&payload).await?;
    let id = created
        .get("id")
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| anyhow::anyhow!("user create returned no id"))?;

    let detail = serde_json::json!({ "user_id": id.to_string(), "actv_rgon": draft.actv_rgon });
    store().create_item(UserDetail::NAME, &detail).await?;
    tracing::info!("Registered partner {}", id);
    Ok(id)
}

/// Edits a partner and upserts its detail row.
pub async fn update(id: Uuid, draft: PartnerDraft) -> Result<()> {
    draft
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    let mut payload = serde_json::json!({
        "email": draft.email,
        "first_name": draft.first_name,
        "last_name": draft.last_name,
        "role": draft.role.to_string(),
    });
    if let Some(password) = draft.password.as_deref().filter(|p| !p.is_empty()) {
        payload["password"] = Value::from(password);
    }
    store().update_user(&id.to_string(), &payload).await?;

    let existing = store()
        .list_items::<UserDetail>(
            UserDetail::NAME,
            &ItemsQuery::new()
                .fields(&["id", "user_id", "actv_rgon"])
                .filter(Filter::new().eq("user_id", id.to_string()))
                .limit(1),
        )
        .await?;
    let detail = serde_json::json!({ "actv_rgon": draft.actv_rgon });
    match existing.first() {
        Some(row) => {
            store()
                .update_item(UserDetail::NAME, row.id, &detail)
                .await?
        }
        None => {
            let full = serde_json::json!({ "user_id": id.to_string(), "actv_rgon": draft.actv_rgon });
            store().create_item(UserDetail::NAME, &full).await?;
        }
    }
    tracing::info!("Updated partner {}", id);
    Ok(())
}

/// Soft delete: flags both the user rows and their detail rows.
pub async fn soft_delete(ids: &[Uuid]) -> Result<()> {
    for id in ids {
        store()
            .update_user(&id.to_string(), &serde_json::json!({ "del_yn": "Y" }))
            .await?;
    }

    let id_values: Vec<Value> = ids.iter().map(|id| Value::from(id.to_string())).collect();
    let details = store()
        .list_items::<UserDetail>(
            UserDetail::NAME,
            &ItemsQuery::new()
                .fields(&["id", "user_id"])
                .filter(Filter::new().is_in("user_id", id_values))
                .limit(-1),
        )
        .await?;
    if !details.is_empty() {
        let keys: Vec<Value> = details.iter().map(|d| Value::from(d.id)).collect();
        store()
            .update_items(
                UserDetail::NAME,
                &keys,
                &serde_json::json!({ "del_yn": "Y" }),
            )
            .await?;
    }
    tracing::info!("Soft-deleted {} partners", ids.len());
    Ok(())
}
