//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` and depend only on
//! driving ports, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::TrustReportService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// The trust-report use case.
    pub reports: Arc<dyn TrustReportService>,
}

impl HttpState {
    /// Bundle the given use-case implementation.
    pub fn new(reports: Arc<dyn TrustReportService>) -> Self {
        Self { reports }
    }
}
