//! Sales channel directory service (`chnnl_mstr`).

pub mod service;
