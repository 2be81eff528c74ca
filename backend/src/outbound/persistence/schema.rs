//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `migrations/` exactly;
//! `diesel print-schema` can regenerate them from a live database.

diesel::table! {
    /// Computed trust reports, one row per account.
    ///
    /// `account_id` is the primary key; recomputations update the row in
    /// place.
    trust_reports (account_id) {
        /// Canonical account identifier (17 digits).
        account_id -> Varchar,
        /// Unclamped trust score at computation time.
        trust_score -> Int4,
        /// Feature vector snapshot the score was derived from.
        features -> Jsonb,
        /// When the report was computed.
        generated_at -> Timestamptz,
        /// Last row modification timestamp.
        updated_at -> Timestamptz,
    }
}
