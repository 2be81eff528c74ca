//! HTTP adapters: handlers, DTOs, error envelope, health probes.

pub mod error;
pub mod health;
pub mod state;
pub mod trust;

pub use error::{ApiError, ApiResult};
pub use state::HttpState;
