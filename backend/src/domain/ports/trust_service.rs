//! Driving port for the trust-report use case.
//!
//! HTTP handlers depend on this trait only, so the whole pipeline can be
//! mocked in endpoint tests.

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::features::TrustReport;

/// Port for computing a trust report from a raw account reference.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrustReportService: Send + Sync {
    /// Resolve, aggregate, score, and persist a report for one reference.
    async fn report(&self, reference: &str) -> Result<TrustReport, Error>;
}
