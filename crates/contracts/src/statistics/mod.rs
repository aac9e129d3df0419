//! Statistics DTOs
//!
//! Request and rollup-row types for the statistics screen. Buckets are
//! built fresh on every request from the filtered order set and are never
//! persisted.

pub mod dto;

pub use dto::{
    ChannelPartnerBucket, ChannelShareBucket, PartnerBucket, PeriodBucket, PeriodGranularity,
    RegionBucket, RegionPartnerBucket, StatisticsQuery, StatisticsReport, StatisticsTotals,
};
