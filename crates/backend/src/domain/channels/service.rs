use anyhow::Result;
use contracts::domain::channels::{Channel, ChannelDraft, ChannelListQuery, CHANNEL_STATUS_ACTIVE};
use contracts::domain::common::Collection;
use serde_json::Value;

use crate::shared::data::directus::ItemsQuery;
use crate::shared::data::filter::Filter;
use crate::shared::data::store::store;

/// Filtered directory listing, newest first.
pub async fn list(query: ChannelListQuery) -> Result<Vec<Channel>> {
    let mut filter = Filter::not_deleted();
    if let Some(name) = query.channel_name.as_deref().filter(|s| !s.trim().is_empty()) {
        filter = filter.icontains("channel_name", name);
    }
    if let Some(status) = query.status.as_deref().filter(|s| !s.is_empty() && *s != "all") {
        filter = filter.eq("status", status);
    }

    let channels = store()
        .list_items::<Channel>(
            Channel::NAME,
            &ItemsQuery::new()
                .fields(&["*", "user_created.first_name", "user_created.last_name"])
                .filter(filter)
                .sort(&["-date_created"])
                .limit(-1),
        )
        .await?;
    Ok(channels)
}

/// Non-deleted channels for selection lists, sorted by name.
pub async fn list_active() -> Result<Vec<Channel>> {
    let channels = store()
        .list_items::<Channel>(
            Channel::NAME,
            &ItemsQuery::new()
                .fields(&["id", "channel_name"])
                .filter(Filter::not_deleted())
                .sort(&["channel_name"])
                .limit(-1),
        )
        .await?;
    Ok(channels)
}

pub async fn create(mut draft: ChannelDraft) -> Result<i64> {
    draft
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    if draft.status.trim().is_empty() {
        draft.status = CHANNEL_STATUS_ACTIVE.to_string();
    }
    let created = store().create_item(Channel::NAME, &draft).await?;
    let id = created.get("id").and_then(Value::as_i64).unwrap_or(0);
    tracing::info!("Registered channel {} ({})", draft.channel_name, id);
    Ok(id)
}

pub async fn update(id: i64, draft: ChannelDraft) -> Result<()> {
    draft
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    store().update_item(Channel::NAME, id, &draft).await?;
    tracing::info!("Updated channel {}", id);
    Ok(())
}

pub async fn soft_delete(ids: &[i64]) -> Result<()> {
    let keys: Vec<Value> = ids.iter().map(|id| Value::from(*id)).collect();
    store()
        .update_items(Channel::NAME, &keys, &serde_json::json!({ "del_yn": "Y" }))
        .await?;
    tracing::info!("Soft-deleted {} channels", ids.len());
    Ok(())
}
