//! Operator authentication, delegated to the Identity Provider. Only
//! administrator roles are allowed into the back office.

pub mod middleware;
pub mod service;
