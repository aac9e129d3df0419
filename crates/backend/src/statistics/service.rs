use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use contracts::domain::common::Collection;
use contracts::domain::orders::Order;
use contracts::statistics::{PeriodGranularity, StatisticsQuery, StatisticsReport};

use crate::shared::data::directus::ItemsQuery;
use crate::shared::data::filter::Filter;
use crate::shared::data::store::store;

use super::aggregate;

/// Issuance counter for report requests. A report whose ticket has been
/// superseded before its fetch resolves is discarded, so the newest
/// request wins regardless of response arrival order.
static TICKET: AtomicU64 = AtomicU64::new(0);

fn issue_ticket() -> u64 {
    TICKET.fetch_add(1, Ordering::SeqCst) + 1
}

fn is_current(ticket: u64) -> bool {
    TICKET.load(Ordering::SeqCst) == ticket
}

/// Field subset the aggregation needs; the store returns nothing else.
const REPORT_FIELDS: [&str; 9] = [
    "id",
    "order_price",
    "rel_settlement_amount",
    "rel_commission_amount",
    "channel_name.channel_name",
    "partner.first_name",
    "partner.last_name",
    "address",
    "order_date",
];

async fn fetch_orders(query: &StatisticsQuery) -> Result<Vec<Order>> {
    let filter = Filter::not_deleted()
        .gte("order_date", query.date_from.as_str())
        .lte("order_date", query.date_to.as_str());
    let items = store()
        .list_items::<Order>(
            Order::NAME,
            &ItemsQuery::new()
                .fields(&REPORT_FIELDS)
                .filter(filter)
                .limit(-1),
        )
        .await?;
    Ok(items)
}

/// Case-insensitive search across partner company, team leader, address
/// and channel name, applied to the fetched snapshot.
fn apply_search(orders: Vec<Order>, term: Option<&str>) -> Vec<Order> {
    let Some(term) = term.map(str::trim).filter(|t| !t.is_empty()) else {
        return orders;
    };
    let needle = term.to_lowercase();
    orders
        .into_iter()
        .filter(|order| {
            let partner = order.partner.as_ref();
            let haystacks = [
                partner.and_then(|p| p.first_name.as_deref()),
                partner.and_then(|p| p.last_name.as_deref()),
                order.address.as_deref(),
                order
                    .channel_name
                    .as_ref()
                    .and_then(|c| c.channel_name.as_deref()),
            ];
            haystacks
                .into_iter()
                .flatten()
                .any(|value| value.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Builds the full statistics report for one query.
///
/// Returns `Ok(None)` when a newer request was issued while this one was
/// still fetching; the caller drops the result instead of rendering stale
/// data over a fresher report.
pub async fn build_report(query: StatisticsQuery) -> Result<Option<StatisticsReport>> {
    let ticket = issue_ticket();
    let fetched = fetch_orders(&query).await?;

    if !is_current(ticket) {
        tracing::debug!(
            "Dropping superseded statistics request for {}..{}",
            query.date_from,
            query.date_to
        );
        return Ok(None);
    }

    let orders = apply_search(fetched, query.search.as_deref());
    tracing::info!(
        "Statistics: {} orders in range {}..{} after search filter",
        orders.len(),
        query.date_from,
        query.date_to
    );

    let report = compute_report(&orders, query.granularity);
    Ok(Some(report))
}

/// Pure assembly of every dimension from one order snapshot.
fn compute_report(orders: &[Order], granularity: PeriodGranularity) -> StatisticsReport {
    StatisticsReport {
        totals: aggregate::totals(orders),
        partners: aggregate::by_partner(orders),
        regions: aggregate::by_region(orders),
        region_partners: aggregate::by_region_partner(orders),
        channel_share: aggregate::channel_share(orders),
        channel_partners: aggregate::by_channel_partner(orders),
        periods: aggregate::by_period(orders, granularity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::UserRef;

    fn order_with(company: &str, address: &str) -> Order {
        Order {
            id: 1,
            customer_name: None,
            phone: None,
            address: Some(address.to_string()),
            service_type: None,
            status: None,
            order_date: Some("2025-07-01T09:00:00".into()),
            commission_type: None,
            order_price: Some(10_000),
            commission: None,
            rel_settlement_amount: Some(9_000),
            rel_commission_amount: Some(1_000),
            partner: Some(UserRef {
                id: None,
                first_name: Some(company.to_string()),
                last_name: Some("팀장".to_string()),
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

    #[test]
    fn test_search_matches_any_field() {
        let orders = vec![
            order_with("클린업", "서울 강남구"),
            order_with("홈마스터", "부산 해운대구"),
        ];
        let hits = apply_search(orders.clone(), Some("해운대"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].partner.as_ref().unwrap().first_name.as_deref(), Some("홈마스터"));

        // Blank terms leave the snapshot untouched.
        assert_eq!(apply_search(orders.clone(), Some("  ")).len(), 2);
        assert_eq!(apply_search(orders, None).len(), 2);
    }

    #[test]
    fn test_superseded_ticket_is_stale() {
        let first = issue_ticket();
        let second = issue_ticket();
        assert!(!is_current(first));
        assert!(is_current(second));
    }

    #[test]
    fn test_report_dimensions_share_snapshot() {
        let orders = vec![
            order_with("클린업", "서울 강남구"),
            order_with("클린업", "서울 송파구"),
        ];
        let report = compute_report(&orders, PeriodGranularity::Daily);
        assert_eq!(report.totals.orders, 2);
        assert_eq!(report.partners.len(), 1);
        assert_eq!(report.regions.len(), 2);
        assert_eq!(report.periods.len(), 1);
        assert_eq!(report.periods[0].count, 2);
    }
}
