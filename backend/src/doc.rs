//! OpenAPI document exposed through Swagger UI in debug builds.

use utoipa::OpenApi;

/// Public OpenAPI surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Trust score service",
        description = "Penalty-based trust scoring for game-platform accounts."
    ),
    paths(
        crate::inbound::http::trust::trust_report,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        crate::inbound::http::trust::TrustReportDto,
        crate::domain::FeatureVector,
        crate::domain::Error,
        crate::domain::ErrorCode,
    )),
    tags(
        (name = "trust", description = "Trust report computation"),
        (name = "health", description = "Probes"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_includes_the_trust_path() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/v1/trust"));
        assert!(doc.paths.paths.contains_key("/health/ready"));
    }
}
