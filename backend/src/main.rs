//! Service entry-point: wires the scoring pipeline, the admission gate, and
//! the HTTP surface.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use backend::ApiDoc;
use backend::domain::ports::{CounterStore, FixtureReportRepository, ReportRepository};
use backend::domain::{RateLimiter, TrustReportPipeline};
use backend::inbound::http::HttpState;
use backend::inbound::http::health::{HealthState, live, ready};
use backend::middleware::RateLimit;
use backend::outbound::counter::{InMemoryCounterStore, RedisCounterStore};
use backend::outbound::persistence::{DieselReportRepository, PoolConfig};
use backend::outbound::steam::SteamHttpProvider;
use backend::server::{AppConfig, api_routes};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    let provider = Arc::new(
        SteamHttpProvider::new(config.provider.clone()).map_err(std::io::Error::other)?,
    );

    let store: Arc<dyn CounterStore> = match &config.redis_url {
        Some(url) => Arc::new(
            RedisCounterStore::connect(url)
                .await
                .map_err(std::io::Error::other)?,
        ),
        None => {
            warn!("REDIS_URL not set, rate-limit counters are process-local");
            Arc::new(InMemoryCounterStore::new())
        }
    };

    let repository: Arc<dyn ReportRepository> = match &config.database_url {
        Some(url) => {
            let pool = PoolConfig::new(url.clone())
                .build()
                .await
                .map_err(std::io::Error::other)?;
            Arc::new(DieselReportRepository::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set, trust reports will not be persisted");
            Arc::new(FixtureReportRepository)
        }
    };

    let pipeline =
        TrustReportPipeline::new(provider, repository).with_deadline(config.request_deadline);
    let state = HttpState::new(Arc::new(pipeline));
    let limiter = RateLimiter::new(store, config.rate_limit);

    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays accessible.
    let server_health_state = health_state.clone();
    let bind_addr = config.bind_addr;
    let cookie_secure = config.cookie_secure;

    let server = HttpServer::new(move || {
        let api = web::scope("/api/v1")
            .wrap(RateLimit::new(limiter.clone(), cookie_secure))
            .configure(api_routes(state.clone()));

        #[cfg_attr(
            not(debug_assertions),
            allow(unused_mut, reason = "only debug builds extend the app")
        )]
        let mut app = App::new()
            .app_data(server_health_state.clone())
            .service(api)
            .service(ready)
            .service(live);

        #[cfg(debug_assertions)]
        {
            app = app.service(
                SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
            );
        }

        app
    })
    .bind(bind_addr)?;

    info!(%bind_addr, "server listening");
    health_state.mark_ready();
    server.run().await
}
