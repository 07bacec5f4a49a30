//! Outbound adapters implementing the domain's driven ports.

pub mod availability;
pub mod dns;
pub mod persistence;
pub mod storage;
