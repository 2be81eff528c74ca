//! Trust report endpoint.
//!
//! ```text
//! GET /api/v1/trust?account=https://steamcommunity.com/id/someone/
//! GET /api/v1/trust?account=76561198030958226
//! ```

use actix_web::{get, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::features::{FeatureVector, TrustReport};
use crate::inbound::http::error::{ApiError, ApiResult};
use crate::inbound::http::state::HttpState;

/// Query parameters for the trust endpoint.
#[derive(Debug, Deserialize, IntoParams)]
pub struct TrustQuery {
    /// Account reference: profile URL (canonical or vanity) or raw id.
    pub account: String,
}

/// Response payload: the aggregated features and their score.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrustReportDto {
    /// Canonical account identifier.
    #[schema(example = "76561198030958226")]
    pub account_id: String,
    /// Aggregated feature vector.
    pub features: FeatureVector,
    /// Unclamped trust score.
    #[schema(example = 50)]
    pub trust_score: i32,
    /// When the report was computed.
    pub generated_at: DateTime<Utc>,
}

impl From<TrustReport> for TrustReportDto {
    fn from(report: TrustReport) -> Self {
        Self {
            account_id: report.account_id.to_string(),
            features: report.features,
            trust_score: report.trust_score,
            generated_at: report.generated_at,
        }
    }
}

/// Compute the trust report for one account reference.
#[utoipa::path(
    get,
    path = "/api/v1/trust",
    params(TrustQuery),
    responses(
        (status = 200, description = "Computed trust report", body = TrustReportDto),
        (status = 400, description = "Malformed account reference", body = crate::domain::Error),
        (status = 404, description = "No matching profile", body = crate::domain::Error),
        (status = 429, description = "Request quota exhausted", body = crate::domain::Error),
        (status = 502, description = "Upstream provider failure", body = crate::domain::Error),
        (status = 503, description = "Backing service unavailable", body = crate::domain::Error)
    ),
    tags = ["trust"],
    operation_id = "trustReport"
)]
#[get("/trust")]
pub async fn trust_report(
    state: web::Data<HttpState>,
    query: web::Query<TrustQuery>,
) -> ApiResult<web::Json<TrustReportDto>> {
    let report = state
        .reports
        .report(&query.account)
        .await
        .map_err(ApiError::from)?;
    Ok(web::Json(report.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, test};

    use super::*;
    use crate::domain::Error;
    use crate::domain::account::AccountId;
    use crate::domain::features::{BanRecord, FeatureVector};
    use crate::domain::ports::MockTrustReportService;

    fn sample_report() -> TrustReport {
        let account_id = AccountId::new("76561198030958226").expect("valid id");
        TrustReport {
            account_id: account_id.clone(),
            features: FeatureVector::hidden(&BanRecord {
                account_id,
                vac_banned: false,
                vac_ban_count: 0,
            }),
            trust_score: 0,
            generated_at: Utc::now(),
        }
    }

    #[actix_web::test]
    async fn returns_the_report_as_json() {
        let mut service = MockTrustReportService::new();
        service
            .expect_report()
            .withf(|reference| reference == "76561198030958226")
            .returning(|_| Ok(sample_report()));

        let state = HttpState::new(Arc::new(service));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(web::scope("/api/v1").service(trust_report)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/trust?account=76561198030958226")
            .to_request();
        let dto: TrustReportDto = test::call_and_read_body_json(&app, req).await;
        assert_eq!(dto.account_id, "76561198030958226");
        assert_eq!(dto.trust_score, 0);
        assert!(!dto.features.visible);
    }

    #[actix_web::test]
    async fn domain_errors_map_to_their_status() {
        let mut service = MockTrustReportService::new();
        service
            .expect_report()
            .returning(|_| Err(Error::invalid_reference("unrecognised account reference")));

        let state = HttpState::new(Arc::new(service));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(web::scope("/api/v1").service(trust_report)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/trust?account=garbage")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }
}
