//! Actix middleware.

pub mod rate_limit;

pub use rate_limit::{ADMISSION_COOKIE, RateLimit};
