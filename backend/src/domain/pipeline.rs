//! The end-to-end trust-report pipeline.
//!
//! Implements the driving port: resolve the reference, aggregate signals
//! under a request-level deadline, score, persist, respond. The deadline
//! wraps the whole aggregation so its expiry aborts every in-flight sibling
//! call for the request.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use super::aggregator::ProfileAggregator;
use super::features::TrustReport;
use super::ports::{ProfileProvider, ReportRepository, ReportRepositoryError, TrustReportService};
use super::resolver::IdentityResolver;
use super::score::trust_score;
use crate::domain::Error;

/// Default ceiling on one request's aggregation work.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(30);

/// Concrete trust-report use case over a provider and a report store.
#[derive(Clone)]
pub struct TrustReportPipeline<P> {
    resolver: IdentityResolver<P>,
    aggregator: ProfileAggregator<P>,
    repository: Arc<dyn ReportRepository>,
    deadline: Duration,
}

impl<P> TrustReportPipeline<P> {
    /// Create a pipeline over one provider handle and one report store.
    pub fn new(provider: Arc<P>, repository: Arc<dyn ReportRepository>) -> Self {
        Self {
            resolver: IdentityResolver::new(Arc::clone(&provider)),
            aggregator: ProfileAggregator::new(provider),
            repository,
            deadline: DEFAULT_DEADLINE,
        }
    }

    /// Override the aggregation deadline.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }
}

#[async_trait]
impl<P> TrustReportService for TrustReportPipeline<P>
where
    P: ProfileProvider + 'static,
{
    async fn report(&self, reference: &str) -> Result<TrustReport, Error> {
        let account_id = self.resolver.resolve(reference).await?;

        let features = tokio::time::timeout(self.deadline, self.aggregator.collect(&account_id))
            .await
            .map_err(|_| Error::upstream_unavailable("profile aggregation timed out"))??;

        let trust_score = trust_score(&features);
        let report = TrustReport {
            account_id,
            features,
            trust_score,
            generated_at: Utc::now(),
        };

        self.repository
            .upsert(&report)
            .await
            .map_err(map_repository_error)?;

        info!(account_id = %report.account_id, trust_score, "trust report computed");
        Ok(report)
    }
}

fn map_repository_error(error: ReportRepositoryError) -> Error {
    match error {
        ReportRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("report store unavailable: {message}"))
        }
        ReportRepositoryError::Query { message } => {
            Error::internal(format!("report store error: {message}"))
        }
        ReportRepositoryError::Serialization { message } => {
            Error::internal(format!("report serialisation failed: {message}"))
        }
    }
}
