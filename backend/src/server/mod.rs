//! Server assembly: configuration and route wiring.

pub mod config;

pub use config::{AppConfig, ConfigError};

use actix_web::web;

use crate::inbound::http::state::HttpState;
use crate::inbound::http::trust::trust_report;

/// Register the versioned API routes onto a scope.
///
/// The caller wraps the scope with the admission middleware; keeping the
/// wiring here means the binary and the integration tests assemble the same
/// surface.
pub fn api_routes(state: HttpState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::new(state)).service(trust_report);
    }
}
