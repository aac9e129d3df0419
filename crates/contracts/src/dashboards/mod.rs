//! Dashboard DTOs: KPI tiles, the 7-day schedule histogram, the upcoming
//! order list and today's partner ranking.

pub mod dto;

pub use dto::{DashboardSummary, PartnerRankRow, UpcomingOrder, WeeklyLoadPoint};
