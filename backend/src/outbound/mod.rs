//! Outbound adapters implementing the driven ports.

pub mod notify;
pub mod persistence;
