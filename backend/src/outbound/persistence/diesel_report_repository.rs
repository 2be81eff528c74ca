//! PostgreSQL-backed `ReportRepository` implementation using Diesel.
//!
//! Upserts are expressed as `INSERT … ON CONFLICT (account_id) DO UPDATE`,
//! so a duplicate key is an update by construction and never surfaces as a
//! failure.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use super::models::UpsertTrustReportRow;
use super::pool::DbPool;
use super::schema::trust_reports;
use crate::domain::features::TrustReport;
use crate::domain::ports::{ReportRepository, ReportRepositoryError};

/// Diesel-backed implementation of the report store.
#[derive(Clone)]
pub struct DieselReportRepository {
    pool: DbPool,
}

impl DieselReportRepository {
    /// Create a repository over an already-connected pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_row(report: &TrustReport) -> Result<UpsertTrustReportRow, ReportRepositoryError> {
    let features = serde_json::to_value(&report.features)
        .map_err(|err| ReportRepositoryError::serialization(err.to_string()))?;
    Ok(UpsertTrustReportRow {
        account_id: report.account_id.to_string(),
        trust_score: report.trust_score,
        features,
        generated_at: report.generated_at,
        updated_at: chrono::Utc::now(),
    })
}

fn map_diesel_error(error: diesel::result::Error) -> ReportRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(kind, info) = &error {
        debug!(?kind, message = info.message(), "diesel operation failed");
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ReportRepositoryError::connection("database connection error")
        }
        _ => ReportRepositoryError::query("database error"),
    }
}

#[async_trait]
impl ReportRepository for DieselReportRepository {
    async fn upsert(&self, report: &TrustReport) -> Result<(), ReportRepositoryError> {
        let row = to_row(report)?;
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| ReportRepositoryError::connection(err.to_string()))?;

        diesel::insert_into(trust_reports::table)
            .values(&row)
            .on_conflict(trust_reports::account_id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}
