//! PostgreSQL persistence adapters.

mod diesel_report_repository;
mod models;
mod pool;
pub mod schema;

pub use diesel_report_repository::DieselReportRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
