use anyhow::Result;
use contracts::domain::common::Collection;
use contracts::domain::orders::{
    CommissionMode, Order, OrderDraft, OrderListQuery, OrderPage, OrderTotals, SortDirection,
    StatusChoice, DEFAULT_ORDER_STATUSES, STATUS_RECEIVED,
};
use serde_json::Value;
use uuid::Uuid;

use crate::shared::data::directus::{AggregateSpec, ItemsQuery};
use crate::shared::data::filter::Filter;
use crate::shared::data::store::store;

use super::finance;

/// Field list for the order table: the record plus display expansions.
const LIST_FIELDS: [&str; 7] = [
    "*",
    "channel_name.id",
    "channel_name.channel_name",
    "partner.id",
    "partner.first_name",
    "partner.last_name",
    "user_created.first_name",
];

/// Field list for the detail form, with full relation expansion.
const DETAIL_FIELDS: [&str; 5] = [
    "*",
    "partner.*",
    "user_created.*",
    "user_updated.*",
    "channel_name.*",
];

/// Composite list filter; every screen condition AND-combines.
fn list_filter(query: &OrderListQuery) -> Filter {
    let mut filter = Filter::not_deleted();
    if let Some(status) = query.status.as_deref().filter(|s| !s.is_empty() && *s != "all") {
        filter = filter.eq("status", status);
    }
    if let Some(from) = query.date_from.as_deref().filter(|s| !s.is_empty()) {
        filter = filter.gte("order_date", from);
    }
    if let Some(to) = query.date_to.as_deref().filter(|s| !s.is_empty()) {
        filter = filter.lte("order_date", to);
    }
    if let Some(partner_id) = query.partner_id {
        filter = filter.eq("partner.id", partner_id.to_string());
    } else if let Some(name) = query.partner_name.as_deref().filter(|s| !s.trim().is_empty()) {
        filter = filter.icontains("partner.first_name", name);
    }
    if let Some(address) = query.address.as_deref().filter(|s| !s.trim().is_empty()) {
        filter = filter.icontains("address", address);
    }
    if let Some(customer) = query.customer_name.as_deref().filter(|s| !s.trim().is_empty()) {
        filter = filter.icontains("customer_name", customer);
    }
    if let Some(phone) = query.phone.as_deref().filter(|s| !s.trim().is_empty()) {
        filter = filter.icontains("phone", phone);
    }
    filter
}

/// Sort keys with a `date_created` descending tiebreak.
fn sort_keys(query: &OrderListQuery) -> Vec<String> {
    let prefix = match query.sort_dir {
        SortDirection::Desc => "-",
        SortDirection::Asc => "",
    };
    let mut keys = vec![format!("{}{}", prefix, query.sort_by)];
    if query.sort_by != "date_created" {
        keys.push("-date_created".to_string());
    }
    keys
}

/// Aggregate cells come back as numbers or numeric strings.
fn value_as_i64(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n.as_i64().unwrap_or_else(|| n.as_f64().unwrap_or(0.0) as i64),
        Value::String(s) => s.parse::<f64>().map(|f| f as i64).unwrap_or(0),
        _ => 0,
    }
}

/// One page of the order list with the whole-filter count and sums. The
/// page fetch and the aggregate run concurrently.
pub async fn list(query: OrderListQuery) -> Result<OrderPage> {
    let sort: Vec<String> = sort_keys(&query);
    let sort_refs: Vec<&str> = sort.iter().map(String::as_str).collect();
    let items_query = ItemsQuery::new()
        .fields(&LIST_FIELDS)
        .filter(list_filter(&query))
        .sort(&sort_refs)
        .limit(query.limit as i64)
        .page(query.page);

    let spec = AggregateSpec::count_distinct("id").sum(&[
        "order_price",
        "rel_settlement_amount",
        "rel_commission_amount",
    ]);

    let (rows, aggregate) = tokio::join!(
        store().list_items::<Order>(Order::NAME, &items_query),
        store().aggregate(Order::NAME, &spec, list_filter(&query)),
    );
    let rows = rows?;
    let aggregate = aggregate?;

    let first = aggregate.first().cloned().unwrap_or(Value::Null);
    let total_count = first
        .pointer("/countDistinct/id")
        .map(value_as_i64)
        .unwrap_or(0) as u64;
    let totals = OrderTotals {
        order_price: first.pointer("/sum/order_price").map(value_as_i64).unwrap_or(0),
        rel_settlement_amount: first
            .pointer("/sum/rel_settlement_amount")
            .map(value_as_i64)
            .unwrap_or(0),
        rel_commission_amount: first
            .pointer("/sum/rel_commission_amount")
            .map(value_as_i64)
            .unwrap_or(0),
    };

    Ok(OrderPage {
        rows,
        total_count,
        totals,
    })
}

pub async fn get_by_id(id: i64) -> Result<Order> {
    let order = store().get_item::<Order>(Order::NAME, id, &DETAIL_FIELDS).await?;
    Ok(order)
}

/// Registers a new order. Defaults are applied and the settlement and
/// commission amounts are derived before the write unless the commission
/// mode is manual.
pub async fn create(mut draft: OrderDraft) -> Result<i64> {
    draft
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    if draft.status.is_none() {
        draft.status = Some(STATUS_RECEIVED.to_string());
    }
    if draft.commission_type.is_none() {
        draft.commission_type = Some(CommissionMode::default());
    }
    let mode = draft.commission_type.unwrap_or_default();
    if let Some(derived) = finance::derive_amounts(
        draft.order_price.unwrap_or(0),
        mode,
        draft.commission.unwrap_or(0),
    ) {
        draft.rel_settlement_amount = Some(derived.settlement_amount);
        draft.rel_commission_amount = Some(derived.commission_amount);
    }

    let created = store().create_item(Order::NAME, &draft).await?;
    let id = created.get("id").map(value_as_i64).unwrap_or(0);
    tracing::info!("Registered order {}", id);
    Ok(id)
}

/// Changed-fields-only patch against the stored record, with the derived
/// amounts kept consistent. In manual mode the operator-entered amounts
/// pass through untouched; recalculation never overwrites them.
pub fn build_patch(existing: &Order, draft: &OrderDraft) -> OrderDraft {
    fn diff<T: PartialEq + Clone>(new: &Option<T>, old: &Option<T>) -> Option<T> {
        match new {
            Some(value) if old.as_ref() != Some(value) => Some(value.clone()),
            _ => None,
        }
    }

    let mut patch = OrderDraft {
        customer_name: diff(&draft.customer_name, &existing.customer_name),
        phone: diff(&draft.phone, &existing.phone),
        address: diff(&draft.address, &existing.address),
        service_type: diff(&draft.service_type, &existing.service_type),
        status: diff(&draft.status, &existing.status),
        order_date: diff(&draft.order_date, &existing.order_date),
        commission_type: diff(&draft.commission_type, &existing.commission_type),
        order_price: diff(&draft.order_price, &existing.order_price),
        commission: diff(&draft.commission, &existing.commission),
        cstm_memo: diff(&draft.cstm_memo, &existing.cstm_memo),
        memo: diff(&draft.memo, &existing.memo),
        ..OrderDraft::default()
    };

    let existing_partner = existing.partner.as_ref().and_then(|p| p.id);
    if let Some(partner) = draft.partner {
        if existing_partner != Some(partner) {
            patch.partner = Some(partner);
        }
    }
    let existing_channel = existing.channel_name.as_ref().and_then(|c| c.id);
    if let Some(channel) = draft.channel_name {
        if existing_channel != Some(channel) {
            patch.channel_name = Some(channel);
        }
    }

    // Recompute on the effective post-edit values. A derivation whose
    // result equals the stored pair produces no write at all.
    let price = draft.order_price.or(existing.order_price).unwrap_or(0);
    let mode = draft
        .commission_type
        .or(existing.commission_type)
        .unwrap_or_default();
    let commission = draft.commission.or(existing.commission).unwrap_or(0);
    match finance::derive_amounts(price, mode, commission) {
        Some(derived) => {
            if existing.rel_settlement_amount != Some(derived.settlement_amount) {
                patch.rel_settlement_amount = Some(derived.settlement_amount);
            }
            if existing.rel_commission_amount != Some(derived.commission_amount) {
                patch.rel_commission_amount = Some(derived.commission_amount);
            }
        }
        None => {
            patch.rel_settlement_amount =
                diff(&draft.rel_settlement_amount, &existing.rel_settlement_amount);
            patch.rel_commission_amount =
                diff(&draft.rel_commission_amount, &existing.rel_commission_amount);
        }
    }

    patch
}

/// Applies an edit. Returns `false` when nothing actually changed and no
/// write was issued.
pub async fn update(id: i64, draft: OrderDraft) -> Result<bool> {
    let existing = get_by_id(id).await?;
    let patch = build_patch(&existing, &draft);
    if patch.is_empty() {
        tracing::debug!("Order {} update skipped, no field changed", id);
        return Ok(false);
    }
    store().update_item(Order::NAME, id, &patch).await?;
    tracing::info!("Updated order {}", id);
    Ok(true)
}

pub async fn soft_delete(ids: &[i64]) -> Result<()> {
    let keys: Vec<Value> = ids.iter().map(|id| Value::from(*id)).collect();
    store()
        .update_items(Order::NAME, &keys, &serde_json::json!({ "del_yn": "Y" }))
        .await?;
    tracing::info!("Soft-deleted {} orders", ids.len());
    Ok(())
}

pub async fn assign_partner(ids: &[i64], partner: Uuid) -> Result<()> {
    let keys: Vec<Value> = ids.iter().map(|id| Value::from(*id)).collect();
    store()
        .update_items(
            Order::NAME,
            &keys,
            &serde_json::json!({ "partner": partner.to_string() }),
        )
        .await?;
    tracing::info!("Reassigned {} orders to partner {}", ids.len(), partner);
    Ok(())
}

pub async fn assign_channel(ids: &[i64], channel: i64) -> Result<()> {
    let keys: Vec<Value> = ids.iter().map(|id| Value::from(*id)).collect();
    store()
        .update_items(
            Order::NAME,
            &keys,
            &serde_json::json!({ "channel_name": channel }),
        )
        .await?;
    tracing::info!("Reassigned {} orders to channel {}", ids.len(), channel);
    Ok(())
}

/// Status choices from the Record Store field metadata, with the static
/// fallback when the metadata cannot be read.
pub async fn status_choices() -> Vec<StatusChoice> {
    match store().field_meta(Order::NAME, "status").await {
        Ok(meta) => {
            let choices = meta
                .pointer("/meta/options/choices")
                .and_then(Value::as_array)
                .map(|rows| {
                    rows.iter()
                        .filter_map(|row| {
                            Some(StatusChoice {
                                text: row.get("text")?.as_str()?.to_string(),
                                value: row.get("value")?.as_str()?.to_string(),
                            })
                        })
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default();
            if !choices.is_empty() {
                return choices;
            }
            tracing::warn!("Status field metadata carried no choices, using fallback");
            fallback_statuses()
        }
        Err(e) => {
            tracing::warn!("Failed to fetch status choices: {}", e);
            fallback_statuses()
        }
    }
}

fn fallback_statuses() -> Vec<StatusChoice> {
    DEFAULT_ORDER_STATUSES
        .iter()
        .map(|s| StatusChoice {
            text: s.to_string(),
            value: s.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::UserRef;

    fn stored_order() -> Order {
        Order {
            id: 7,
            customer_name: Some("홍길동".into()),
            phone: Some("010-1234-5678".into()),
            address: Some("서울 강남구".into()),
            service_type: Some("입주청소".into()),
            status: Some("접수".into()),
            order_date: Some("2025-07-10T09:00".into()),
            commission_type: Some(CommissionMode::Ratio),
            order_price: Some(100_000),
            commission: Some(10),
            rel_settlement_amount: Some(90_000),
            rel_commission_amount: Some(10_000),
            partner: Some(UserRef {
                id: Some(Uuid::nil()),
                first_name: Some("클린업".into()),
                last_name: Some("김팀장".into()),
                email: None,
            }),
            channel_name: None,
            cstm_memo: None,
            memo: None,
            del_yn: None,
            user_created: None,
            user_updated: None,
            date_created: None,
            date_updated: None,
        }
    }

    fn full_draft(existing: &Order) -> OrderDraft {
        OrderDraft {
            customer_name: existing.customer_name.clone(),
            phone: existing.phone.clone(),
            address: existing.address.clone(),
            service_type: existing.service_type.clone(),
            status: existing.status.clone(),
            order_date: existing.order_date.clone(),
            commission_type: existing.commission_type,
            order_price: existing.order_price,
            commission: existing.commission,
            rel_settlement_amount: existing.rel_settlement_amount,
            rel_commission_amount: existing.rel_commission_amount,
            partner: existing.partner.as_ref().and_then(|p| p.id),
            channel_name: existing.channel_name.as_ref().and_then(|c| c.id),
            cstm_memo: existing.cstm_memo.clone(),
            memo: existing.memo.clone(),
        }
    }

    #[test]
    fn test_unchanged_form_produces_empty_patch() {
        let existing = stored_order();
        let patch = build_patch(&existing, &full_draft(&existing));
        assert!(patch.is_empty());
    }

    #[test]
    fn test_price_change_rederives_amounts() {
        let existing = stored_order();
        let mut draft = full_draft(&existing);
        draft.order_price = Some(200_000);
        let patch = build_patch(&existing, &draft);
        assert_eq!(patch.order_price, Some(200_000));
        assert_eq!(patch.rel_commission_amount, Some(20_000));
        assert_eq!(patch.rel_settlement_amount, Some(180_000));
    }

    #[test]
    fn test_manual_mode_keeps_entered_amounts() {
        let mut existing = stored_order();
        existing.commission_type = Some(CommissionMode::Manual);
        existing.rel_settlement_amount = Some(77_777);
        existing.rel_commission_amount = Some(1_234);

        // An unrelated edit must not touch the entered amounts.
        let mut draft = full_draft(&existing);
        draft.customer_name = Some("김철수".into());
        let patch = build_patch(&existing, &draft);
        assert_eq!(patch.customer_name, Some("김철수".into()));
        assert_eq!(patch.rel_settlement_amount, None);
        assert_eq!(patch.rel_commission_amount, None);

        // Direct entry still goes through.
        let mut draft = full_draft(&existing);
        draft.rel_settlement_amount = Some(80_000);
        let patch = build_patch(&existing, &draft);
        assert_eq!(patch.rel_settlement_amount, Some(80_000));
    }

    #[test]
    fn test_sort_keys_tiebreak() {
        let mut query = OrderListQuery::default();
        assert_eq!(sort_keys(&query), vec!["-date_created".to_string()]);
        query.sort_by = "order_date".into();
        query.sort_dir = SortDirection::Asc;
        assert_eq!(
            sort_keys(&query),
            vec!["order_date".to_string(), "-date_created".to_string()]
        );
    }

    #[test]
    fn test_value_as_i64_forms() {
        assert_eq!(value_as_i64(&Value::from(42)), 42);
        assert_eq!(value_as_i64(&Value::from("1250000")), 1_250_000);
        assert_eq!(value_as_i64(&Value::from("125.0")), 125);
        assert_eq!(value_as_i64(&Value::Null), 0);
    }
}
