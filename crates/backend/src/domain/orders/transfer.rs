use anyhow::Result;
use contracts::domain::common::Collection;
use contracts::domain::orders::{CommissionMode, Order, OrderDraft, OrderTotals, STATUS_RECEIVED};
use serde::Deserialize;
use uuid::Uuid;

use crate::shared::data::store::store;
use crate::shared::format::{format_amount, parse_amount};

const EXPORT_HEADERS: [&str; 13] = [
    "No.",
    "고객명",
    "요청날짜",
    "서비스항목",
    "작업상태",
    "파트너",
    "팀장명",
    "수수료구분",
    "판매금액",
    "수수료",
    "정산금액",
    "수수료금액",
    "작성일시",
];

fn date_part(value: Option<&str>) -> String {
    value
        .map(|v| v.split('T').next().unwrap_or(v).to_string())
        .unwrap_or_default()
}

/// Renders the order list as CSV, one row per order plus a totals row.
/// Amounts stay raw so spreadsheet number formats still apply; a ratio
/// commission is rendered as `N%`.
pub fn export_rows(orders: &[Order], totals: &OrderTotals) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_HEADERS)?;

    for (index, order) in orders.iter().enumerate() {
        let commission = match order.commission_type {
            Some(CommissionMode::Ratio) => format!("{}%", order.commission.unwrap_or(0)),
            _ => order.commission.unwrap_or(0).to_string(),
        };
        writer.write_record([
            (index + 1).to_string(),
            order.customer_name.clone().unwrap_or_default(),
            date_part(order.order_date.as_deref()),
            order.service_type.clone().unwrap_or_default(),
            order.status.clone().unwrap_or_default(),
            order.partner_company().to_string(),
            order.partner_leader().to_string(),
            order
                .commission_type
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| "-".to_string()),
            order.order_price.unwrap_or(0).to_string(),
            commission,
            order.rel_settlement_amount.unwrap_or(0).to_string(),
            order.rel_commission_amount.unwrap_or(0).to_string(),
            order.date_created.clone().unwrap_or_default(),
        ])?;
    }

    writer.write_record([
        "합계".to_string(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        totals.order_price.to_string(),
        String::new(),
        totals.rel_settlement_amount.to_string(),
        totals.rel_commission_amount.to_string(),
        String::new(),
    ])?;

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush order export: {}", e))?;
    tracing::info!(
        "Exported {} orders, 판매금액 {}",
        orders.len(),
        format_amount(totals.order_price)
    );
    Ok(String::from_utf8(bytes)?)
}

/// One row of an uploaded order file.
#[derive(Debug, Deserialize)]
struct ImportRow {
    #[serde(default)]
    customer_name: Option<String>,
    #[serde(default)]
    order_date: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    service_type: Option<String>,
    #[serde(default)]
    partner: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    order_price: Option<String>,
    #[serde(default)]
    commission: Option<String>,
    #[serde(default)]
    rel_settlement_amount: Option<String>,
    #[serde(default)]
    rel_commission_amount: Option<String>,
    #[serde(default)]
    cstm_memo: Option<String>,
}

/// Normalizes an imported date cell to the store's `YYYY-MM-DD HH:MM:SS`
/// form, falling back to the current time when the cell is missing or
/// unparseable.
fn normalize_order_date(raw: Option<&str>) -> String {
    let now = || chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return now();
    };

    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return dt.format("%Y-%m-%d %H:%M:%S").to_string();
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return dt.format("%Y-%m-%d %H:%M:%S").to_string();
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return format!("{} 00:00:00", date.format("%Y-%m-%d"));
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(raw, "%Y/%m/%d") {
        return format!("{} 00:00:00", date.format("%Y-%m-%d"));
    }
    tracing::warn!("Unparseable order_date in import: {}", raw);
    now()
}

/// Parses an uploaded CSV into order drafts. Amount cells may carry
/// thousands separators; rows without a partner fall back to the given
/// sentinel user, rows without a status start in `접수`. The settlement
/// and commission amounts are taken from the file as-is, not re-derived.
pub fn parse_import(data: &str, default_partner: Uuid) -> Result<Vec<OrderDraft>> {
    let mut reader = csv::Reader::from_reader(data.as_bytes());
    let mut drafts = Vec::new();

    for row in reader.deserialize::<ImportRow>() {
        let row = row?;
        let partner = row
            .partner
            .as_deref()
            .and_then(|p| Uuid::parse_str(p.trim()).ok())
            .unwrap_or(default_partner);

        drafts.push(OrderDraft {
            customer_name: Some(row.customer_name.unwrap_or_default()),
            order_date: Some(normalize_order_date(row.order_date.as_deref())),
            phone: Some(row.phone.unwrap_or_default()),
            address: Some(row.address.unwrap_or_default()),
            service_type: Some(row.service_type.unwrap_or_default()),
            partner: Some(partner),
            status: Some(
                row.status
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| STATUS_RECEIVED.to_string()),
            ),
            order_price: Some(parse_amount(row.order_price.as_deref().unwrap_or(""))),
            commission: Some(parse_amount(row.commission.as_deref().unwrap_or(""))),
            rel_settlement_amount: Some(parse_amount(
                row.rel_settlement_amount.as_deref().unwrap_or(""),
            )),
            rel_commission_amount: Some(parse_amount(
                row.rel_commission_amount.as_deref().unwrap_or(""),
            )),
            cstm_memo: Some(row.cstm_memo.unwrap_or_default()),
            ..OrderDraft::default()
        });
    }

    Ok(drafts)
}

/// Writes imported drafts to the store one by one. A failed row is logged
/// and skipped so one bad line does not abort the whole batch.
pub async fn import(drafts: Vec<OrderDraft>) -> Result<usize> {
    let total = drafts.len();
    let mut created = 0usize;
    for draft in drafts {
        match store().create_item(Order::NAME, &draft).await {
            Ok(_) => created += 1,
            Err(e) => tracing::warn!("Order import row failed: {}", e),
        }
    }
    tracing::info!("Imported {}/{} orders", created, total);
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_import_mapping() {
        let data = "\
customer_name,order_date,phone,address,service_type,partner,status,order_price,commission,rel_settlement_amount,rel_commission_amount,cstm_memo
홍길동,2026-02-15 00:00:00,010-1111-2222,서울 강남구 역삼로,입주청소,,,\"1,000,000\",10,\"900,000\",\"100,000\",빠른 배정 요청
김철수,2026-03-01,,부산 해운대구,,d6e6568c-48f0-4951-89e5-1c88421de160,처리완료,50000,5000,45000,5000,
";
        let sentinel = Uuid::nil();
        let drafts = parse_import(data, sentinel).unwrap();
        assert_eq!(drafts.len(), 2);

        assert_eq!(drafts[0].customer_name.as_deref(), Some("홍길동"));
        assert_eq!(drafts[0].order_date.as_deref(), Some("2026-02-15 00:00:00"));
        assert_eq!(drafts[0].order_price, Some(1_000_000));
        assert_eq!(drafts[0].status.as_deref(), Some(STATUS_RECEIVED));
        assert_eq!(drafts[0].partner, Some(sentinel));

        assert_eq!(drafts[1].order_date.as_deref(), Some("2026-03-01 00:00:00"));
        assert_eq!(drafts[1].status.as_deref(), Some("처리완료"));
        assert_eq!(
            drafts[1].partner.map(|p| p.to_string()).as_deref(),
            Some("d6e6568c-48f0-4951-89e5-1c88421de160")
        );
    }

    #[test]
    fn test_export_has_totals_row() {
        let totals = OrderTotals {
            order_price: 150_000,
            rel_settlement_amount: 135_000,
            rel_commission_amount: 15_000,
        };
        let csv_text = export_rows(&[], &totals).unwrap();
        let lines: Vec<&str> = csv_text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("No.,고객명"));
        assert!(lines[1].starts_with("합계"));
        assert!(lines[1].contains("150000"));
    }
}
