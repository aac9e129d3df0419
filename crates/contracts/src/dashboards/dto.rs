use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// KPI tile counts. Each count comes from its own aggregate query; the
/// queries run concurrently and independently.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DashboardSummary {
    /// Orders scheduled today.
    pub today_count: u64,
    /// Orders scheduled tomorrow.
    pub tomorrow_count: u64,
    /// Past-date orders whose status is not `입금완료`.
    pub overdue_count: u64,
    /// Orders still on the sentinel "unassigned" partner.
    pub unassigned_count: u64,
    /// Orders in `AS접수`.
    pub after_service_count: u64,
}

/// One bar of the 7-day schedule histogram.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeeklyLoadPoint {
    /// `YYYY-MM-DD`.
    pub date: String,
    /// `MM-DD (요일)` axis label.
    pub label: String,
    pub count: u64,
}

/// Row of the upcoming schedule list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpcomingOrder {
    pub id: i64,
    pub customer_name: Option<String>,
    pub order_date: Option<String>,
    pub address: Option<String>,
    pub service_type: Option<String>,
    pub status: Option<String>,
    pub partner_company: Option<String>,
    pub partner_leader: Option<String>,
}

/// Today's top partners by assigned order count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnerRankRow {
    pub partner_id: Uuid,
    pub name: String,
    pub count: u64,
}
