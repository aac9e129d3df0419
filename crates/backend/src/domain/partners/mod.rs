//! Partner directory service: Record Store users merged with the
//! `usr_dtl` companion rows.

pub mod service;
