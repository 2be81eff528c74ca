//! Driven port for persisting computed trust reports.

use async_trait::async_trait;

use crate::domain::features::TrustReport;

/// Errors surfaced by the report repository.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportRepositoryError {
    /// Could not reach the data store.
    #[error("report repository unavailable: {message}")]
    Connection {
        /// Failure description.
        message: String,
    },
    /// The store rejected the operation.
    #[error("report repository query failed: {message}")]
    Query {
        /// Failure description.
        message: String,
    },
    /// The report could not be serialised for storage.
    #[error("report serialisation failed: {message}")]
    Serialization {
        /// Failure description.
        message: String,
    },
}

impl ReportRepositoryError {
    /// Data store unreachable.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Operation rejected by the store.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Serialisation failure.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }
}

/// Port for the upsert-by-account report store.
///
/// Implementations must treat a duplicate key as an update, never a failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Insert or update the report for its account.
    async fn upsert(&self, report: &TrustReport) -> Result<(), ReportRepositoryError>;
}

/// Fixture repository that discards writes.
///
/// Used when the process runs without a database.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureReportRepository;

#[async_trait]
impl ReportRepository for FixtureReportRepository {
    async fn upsert(&self, _report: &TrustReport) -> Result<(), ReportRepositoryError> {
        Ok(())
    }
}
