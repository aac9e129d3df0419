use std::collections::HashMap;

use anyhow::Result;
use chrono::{Duration, Local, NaiveDate};
use contracts::dashboards::{DashboardSummary, PartnerRankRow, UpcomingOrder, WeeklyLoadPoint};
use contracts::domain::common::Collection;
use contracts::domain::orders::Order;
use serde_json::Value;
use uuid::Uuid;

use crate::shared::config;
use crate::shared::data::directus::{AggregateSpec, ItemsQuery};
use crate::shared::data::filter::Filter;
use crate::shared::data::store::store;

fn day(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn count_of(rows: Result<Vec<Value>, crate::shared::data::directus::StoreError>, what: &str) -> u64 {
    match rows {
        Ok(rows) => rows
            .first()
            .and_then(|row| row.get("count"))
            .map(|v| match v {
                Value::Number(n) => n.as_u64().unwrap_or(0),
                Value::String(s) => s.parse().unwrap_or(0),
                _ => 0,
            })
            .unwrap_or(0),
        Err(e) => {
            // One failed tile must not take the dashboard down.
            tracing::warn!("Dashboard count '{}' failed: {}", what, e);
            0
        }
    }
}

/// KPI tile counts; the five aggregate queries run concurrently and fail
/// independently.
pub async fn summary() -> Result<DashboardSummary> {
    let today = Local::now().date_naive();
    let tomorrow = today + Duration::days(1);
    let day_after = today + Duration::days(2);
    let unassigned = config::get().record_store.unassigned_partner;

    let spec = AggregateSpec::count();
    let (today_res, tomorrow_res, overdue_res, unassigned_res, after_service_res) = tokio::join!(
        store().aggregate(
            Order::NAME,
            &spec,
            Filter::not_deleted()
                .gte("order_date", day(today))
                .lt("order_date", day(tomorrow)),
        ),
        store().aggregate(
            Order::NAME,
            &spec,
            Filter::not_deleted()
                .gte("order_date", day(tomorrow))
                .lt("order_date", day(day_after)),
        ),
        store().aggregate(
            Order::NAME,
            &spec,
            Filter::not_deleted()
                .lt("order_date", day(today))
                .not_in("status", vec![Value::from("입금완료")]),
        ),
        store().aggregate(
            Order::NAME,
            &spec,
            Filter::not_deleted().eq("partner", unassigned.to_string()),
        ),
        store().aggregate(
            Order::NAME,
            &spec,
            Filter::not_deleted().eq("status", "AS접수"),
        ),
    );

    Ok(DashboardSummary {
        today_count: count_of(today_res, "today"),
        tomorrow_count: count_of(tomorrow_res, "tomorrow"),
        overdue_count: count_of(overdue_res, "overdue"),
        unassigned_count: count_of(unassigned_res, "unassigned"),
        after_service_count: count_of(after_service_res, "after-service"),
    })
}

const WEEKDAYS_KR: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];

/// Zero-fills seven consecutive days from the grouped counts, so the
/// histogram always shows a full week.
fn fill_week(start: NaiveDate, counts: &HashMap<String, u64>) -> Vec<WeeklyLoadPoint> {
    (0..7)
        .map(|offset| {
            let date = start + Duration::days(offset);
            let key = day(date);
            let weekday = WEEKDAYS_KR[date.format("%w").to_string().parse::<usize>().unwrap_or(0)];
            WeeklyLoadPoint {
                label: format!("{} ({})", date.format("%m-%d"), weekday),
                count: counts.get(&key).copied().unwrap_or(0),
                date: key,
            }
        })
        .collect()
}

/// Order counts per day for the next seven days.
pub async fn weekly_load() -> Result<Vec<WeeklyLoadPoint>> {
    let today = Local::now().date_naive();
    let end = today + Duration::days(7);

    let rows = store()
        .aggregate(
            Order::NAME,
            &AggregateSpec::count().group_by(&["order_date"]),
            Filter::not_deleted()
                .gte("order_date", day(today))
                .lt("order_date", day(end)),
        )
        .await?;

    let mut counts: HashMap<String, u64> = HashMap::new();
    for row in rows {
        let Some(date_raw) = row.get("order_date").and_then(Value::as_str) else {
            continue;
        };
        let key = date_raw.split('T').next().unwrap_or(date_raw).to_string();
        let count = row
            .get("count")
            .map(|v| match v {
                Value::Number(n) => n.as_u64().unwrap_or(0),
                Value::String(s) => s.parse().unwrap_or(0),
                _ => 0,
            })
            .unwrap_or(0);
        *counts.entry(key).or_insert(0) += count;
    }

    Ok(fill_week(today, &counts))
}

/// The next scheduled orders, soonest first.
pub async fn upcoming(limit: i64) -> Result<Vec<UpcomingOrder>> {
    let today = Local::now().date_naive();
    let orders = store()
        .list_items::<Order>(
            Order::NAME,
            &ItemsQuery::new()
                .fields(&[
                    "id",
                    "customer_name",
                    "order_date",
                    "address",
                    "service_type",
                    "status",
                    "partner.first_name",
                    "partner.last_name",
                ])
                .filter(Filter::not_deleted().gte("order_date", day(today)))
                .sort(&["order_date"])
                .limit(limit),
        )
        .await?;

    Ok(orders
        .into_iter()
        .map(|order| UpcomingOrder {
            id: order.id,
            customer_name: order.customer_name.clone(),
            order_date: order.order_date.clone(),
            address: order.address.clone(),
            service_type: order.service_type.clone(),
            status: order.status.clone(),
            partner_company: order
                .partner
                .as_ref()
                .and_then(|p| p.first_name.clone()),
            partner_leader: order.partner.as_ref().and_then(|p| p.last_name.clone()),
        })
        .collect())
}

/// Today's top partners by assigned order count. Unassigned rows are
/// dropped from the ranking.
pub async fn top_partners_today(top: usize) -> Result<Vec<PartnerRankRow>> {
    let today = Local::now().date_naive();
    let tomorrow = today + Duration::days(1);

    let rows = store()
        .aggregate(
            Order::NAME,
            &AggregateSpec::count().group_by(&["partner"]),
            Filter::not_deleted()
                .gte("order_date", day(today))
                .lt("order_date", day(tomorrow)),
        )
        .await?;

    let mut ranked: Vec<(Uuid, u64)> = rows
        .iter()
        .filter_map(|row| {
            let id = row.get("partner").and_then(Value::as_str)?;
            let id = Uuid::parse_str(id).ok()?;
            let count = row.get("count").map(|v| match v {
                Value::Number(n) => n.as_u64().unwrap_or(0),
                Value::String(s) => s.parse().unwrap_or(0),
                _ => 0,
            })?;
            Some((id, count))
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(top);

    if ranked.is_empty() {
        return Ok(Vec::new());
    }

    #[derive(serde::Deserialize)]
    struct NameRow {
        id: Uuid,
        #[serde(default)]
        first_name: Option<String>,
        #[serde(default)]
        last_name: Option<String>,
    }

    let ids: Vec<Value> = ranked
        .iter()
        .map(|(id, _)| Value::from(id.to_string()))
        .collect();
    let names = store()
        .list_users::<NameRow>(
            &ItemsQuery::new()
                .fields(&["id", "first_name", "last_name"])
                .filter(Filter::new().is_in("id", ids))
                .limit(-1),
        )
        .await?;
    let name_map: HashMap<Uuid, String> = names
        .into_iter()
        .map(|row| {
            let name = format!(
                "{} {}",
                row.first_name.unwrap_or_default(),
                row.last_name.unwrap_or_default()
            );
            (row.id, name.trim().to_string())
        })
        .collect();

    let unassigned = config::get().record_store.unassigned_partner;
    Ok(ranked
        .into_iter()
        .filter(|(id, _)| *id != unassigned)
        .filter_map(|(id, count)| {
            let name = name_map.get(&id).cloned().filter(|n| !n.is_empty())?;
            Some(PartnerRankRow {
                partner_id: id,
                name,
                count,
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_week_zero_fills() {
        let start = NaiveDate::from_ymd_opt(2025, 7, 6).unwrap(); // a Sunday
        let mut counts = HashMap::new();
        counts.insert("2025-07-06".to_string(), 3u64);
        counts.insert("2025-07-09".to_string(), 1u64);

        let week = fill_week(start, &counts);
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].date, "2025-07-06");
        assert_eq!(week[0].count, 3);
        assert_eq!(week[0].label, "07-06 (일)");
        assert_eq!(week[1].count, 0);
        assert_eq!(week[3].count, 1);
        assert_eq!(week[6].date, "2025-07-12");
        assert_eq!(week[6].label, "07-12 (토)");
    }
}
