//! Order service: list/CRUD/bulk operations over `ord_mstr`, the
//! settlement/commission derivation applied on every write, and CSV
//! transfer for the list screen.

pub mod finance;
pub mod service;
pub mod transfer;
