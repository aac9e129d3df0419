//! Operations dashboard: KPI counts, the 7-day load histogram, upcoming
//! schedules and today's partner ranking.

pub mod service;
