//! Order domain module
//!
//! Orders live in the `ord_mstr` collection of the Record Store. Besides
//! the record itself this module carries the list-query/page DTOs and the
//! write payloads used by the order service.

pub mod record;

pub use record::{
    ChannelRef, CommissionMode, Order, OrderDraft, OrderListQuery, OrderPage, OrderTotals,
    SortDirection, StatusChoice, DEFAULT_ORDER_STATUSES, STATUS_RECEIVED,
};
