//! Row types mapping domain reports onto the `trust_reports` table.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::trust_reports;

/// Insert/update payload for one trust report.
///
/// Used both as the insert values and as the conflict-update changeset, so
/// an upsert writes the same data on either path.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = trust_reports)]
pub struct UpsertTrustReportRow {
    /// Canonical account identifier.
    pub account_id: String,
    /// Unclamped trust score.
    pub trust_score: i32,
    /// Serialised feature vector.
    pub features: serde_json::Value,
    /// Computation timestamp.
    pub generated_at: DateTime<Utc>,
    /// Row modification timestamp.
    pub updated_at: DateTime<Utc>,
}
