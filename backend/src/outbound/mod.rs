//! Outbound adapters: provider client, counter stores, persistence.

pub mod counter;
pub mod persistence;
pub mod steam;
