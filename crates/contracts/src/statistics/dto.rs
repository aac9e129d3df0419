use serde::{Deserialize, Serialize};

/// Bucket width for the period dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PeriodGranularity {
    /// `YYYY-MM-DD` keys.
    #[default]
    Daily,
    /// `YYYY-MM` keys.
    Monthly,
}

/// GET /api/statistics?date_from=2025-07-01&date_to=2025-07-31&search=강남
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsQuery {
    /// Inclusive lower bound on `order_date`, `YYYY-MM-DD`.
    pub date_from: String,
    /// Inclusive upper bound on `order_date`, `YYYY-MM-DD`.
    pub date_to: String,
    /// Case-insensitive term matched against partner company, team leader,
    /// address and channel name.
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub granularity: PeriodGranularity,
}

impl StatisticsQuery {
    /// The screen's initial range: first day of the current month through
    /// today.
    pub fn current_month() -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            date_from: today.format("%Y-%m-01").to_string(),
            date_to: today.format("%Y-%m-%d").to_string(),
            search: None,
            granularity: PeriodGranularity::default(),
        }
    }
}

/// Rollup keyed by partner company + team leader.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PartnerBucket {
    pub company: String,
    pub team_leader: String,
    /// De-duplicated normalized regions observed in this partner's orders,
    /// joined for display.
    pub regions: String,
    pub count: u64,
    /// Σ order_price.
    pub amount: i64,
    pub settlement_amount: i64,
    pub commission_amount: i64,
}

/// Region-only rollup for the bar chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionBucket {
    pub region: String,
    pub count: u64,
    pub amount: i64,
}

/// Region + partner rollup for the detail table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionPartnerBucket {
    pub region: String,
    pub company: String,
    pub team_leader: String,
    pub count: u64,
    pub amount: i64,
    pub settlement_amount: i64,
    pub commission_amount: i64,
}

/// Channel-only counts for the pie chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChannelShareBucket {
    pub channel: String,
    pub count: u64,
}

/// Channel + partner rollup for the detail table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChannelPartnerBucket {
    pub channel: String,
    pub company: String,
    pub team_leader: String,
    pub count: u64,
    pub amount: i64,
    pub settlement_amount: i64,
    pub commission_amount: i64,
}

/// Rollup keyed by day or month, chronologically ascending for charts.
/// A latest-first table view is a reversal of the same rows, not a second
/// aggregation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeriodBucket {
    pub period: String,
    pub count: u64,
    pub amount: i64,
    pub settlement_amount: i64,
    pub commission_amount: i64,
}

/// Whole-filter totals shown above the tabs.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StatisticsTotals {
    pub orders: u64,
    pub amount: i64,
    pub settlement_amount: i64,
    pub commission_amount: i64,
}

/// Every dimension computed from one snapshot of the filtered order set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsReport {
    pub totals: StatisticsTotals,
    pub partners: Vec<PartnerBucket>,
    pub regions: Vec<RegionBucket>,
    pub region_partners: Vec<RegionPartnerBucket>,
    pub channel_share: Vec<ChannelShareBucket>,
    pub channel_partners: Vec<ChannelPartnerBucket>,
    pub periods: Vec<PeriodBucket>,
}
