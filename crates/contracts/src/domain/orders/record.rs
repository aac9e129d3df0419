use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Collection, UserRef, YnFlag};

/// Status a freshly registered order starts in.
pub const STATUS_RECEIVED: &str = "접수";

/// Fallback status list, used when the Record Store field metadata cannot
/// be read. The authoritative list is the `status` field's option choices.
pub const DEFAULT_ORDER_STATUSES: [&str; 6] =
    ["접수", "작업보류", "예약진행", "처리완료", "AS접수", "접수취소"];

/// How the commission on an order is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CommissionMode {
    /// `commission` is a percentage of the order price.
    #[default]
    #[serde(rename = "비율")]
    Ratio,
    /// `commission` is a fixed currency amount.
    #[serde(rename = "금액")]
    Amount,
    /// Settlement and commission amounts are entered by the operator.
    #[serde(rename = "수동")]
    Manual,
}

impl CommissionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommissionMode::Ratio => "비율",
            CommissionMode::Amount => "금액",
            CommissionMode::Manual => "수동",
        }
    }
}

/// Expanded many-to-one reference to a sales channel.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChannelRef {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub channel_name: Option<String>,
}

/// Order record as returned by the Record Store.
///
/// Every field except the id is optional: list and statistics queries ask
/// for narrow field subsets and the store only returns what was requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// Requested work date/time, `YYYY-MM-DDTHH:MM:SS` store format.
    #[serde(default)]
    pub order_date: Option<String>,
    #[serde(default)]
    pub commission_type: Option<CommissionMode>,
    #[serde(default)]
    pub order_price: Option<i64>,
    /// Percentage when mode is ratio, currency amount when mode is amount.
    #[serde(default)]
    pub commission: Option<i64>,
    #[serde(default)]
    pub rel_settlement_amount: Option<i64>,
    #[serde(default)]
    pub rel_commission_amount: Option<i64>,
    #[serde(default)]
    pub partner: Option<UserRef>,
    #[serde(default)]
    pub channel_name: Option<ChannelRef>,
    #[serde(default)]
    pub cstm_memo: Option<String>,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub del_yn: Option<YnFlag>,
    #[serde(default)]
    pub user_created: Option<UserRef>,
    #[serde(default)]
    pub user_updated: Option<UserRef>,
    #[serde(default)]
    pub date_created: Option<String>,
    #[serde(default)]
    pub date_updated: Option<String>,
}

impl Collection for Order {
    const NAME: &'static str = "ord_mstr";
}

impl Order {
    /// Partner company name with the unassigned sentinel applied.
    pub fn partner_company(&self) -> &str {
        self.partner
            .as_ref()
            .and_then(|p| p.first_name.as_deref())
            .filter(|s| !s.is_empty())
            .unwrap_or("미지정")
    }

    /// Team-leader name, empty when the partner reference is missing.
    pub fn partner_leader(&self) -> &str {
        self.partner
            .as_ref()
            .and_then(|p| p.last_name.as_deref())
            .unwrap_or("")
    }

    /// Channel name with the unassigned sentinel applied.
    pub fn channel_display(&self) -> &str {
        self.channel_name
            .as_ref()
            .and_then(|c| c.channel_name.as_deref())
            .filter(|s| !s.is_empty())
            .unwrap_or("미지정")
    }
}

/// Write payload for creating an order or patching individual fields.
///
/// `None` fields are left out of the request body, so the same shape
/// serves both full creates and changed-fields-only patches.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OrderDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commission_type: Option<CommissionMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commission: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rel_settlement_amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rel_commission_amount: Option<i64>,
    /// Partner user id; the write side references users by plain id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner: Option<Uuid>,
    /// Channel id; plain id on the write side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cstm_memo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl OrderDraft {
    pub fn is_empty(&self) -> bool {
        *self == OrderDraft::default()
    }

    /// Minimum requirement for registering a new order.
    pub fn validate(&self) -> Result<(), String> {
        let customer = self.customer_name.as_deref().unwrap_or("");
        if customer.trim().is_empty() {
            return Err("고객명을 입력해주세요.".into());
        }
        Ok(())
    }
}

/// Sort direction for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Composite search filter for the order list screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderListQuery {
    #[serde(default)]
    pub status: Option<String>,
    /// Inclusive lower bound on `order_date`, `YYYY-MM-DD`.
    #[serde(default)]
    pub date_from: Option<String>,
    /// Inclusive upper bound on `order_date`, `YYYY-MM-DD`.
    #[serde(default)]
    pub date_to: Option<String>,
    /// Exact partner match by user id; takes precedence over `partner_name`.
    #[serde(default)]
    pub partner_id: Option<Uuid>,
    /// Company-name substring match, used when no id filter is given.
    #[serde(default)]
    pub partner_name: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_sort_column")]
    pub sort_by: String,
    #[serde(default)]
    pub sort_dir: SortDirection,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

impl Default for OrderListQuery {
    fn default() -> Self {
        Self {
            status: None,
            date_from: None,
            date_to: None,
            partner_id: None,
            partner_name: None,
            customer_name: None,
            phone: None,
            address: None,
            sort_by: default_sort_column(),
            sort_dir: SortDirection::default(),
            page: default_page(),
            limit: default_limit(),
        }
    }
}

fn default_sort_column() -> String {
    "date_created".to_string()
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    20
}

/// Filtered sums shown in the order list footer.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OrderTotals {
    pub order_price: i64,
    pub rel_settlement_amount: i64,
    pub rel_commission_amount: i64,
}

/// One page of the order list plus whole-filter count and sums.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPage {
    pub rows: Vec<Order>,
    pub total_count: u64,
    pub totals: OrderTotals,
}

/// A selectable status option sourced from the Record Store field metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusChoice {
    pub text: String,
    pub value: String,
}
