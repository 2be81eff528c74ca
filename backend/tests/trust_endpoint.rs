//! End-to-end endpoint tests: admission gate, pipeline, and error envelope
//! assembled the same way the binary assembles them.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::Value;

use backend::domain::ports::{CounterStore, FixtureProfileProvider, FixtureReportRepository};
use backend::domain::{RateLimitConfig, RateLimiter, TrustReportPipeline};
use backend::inbound::http::HttpState;
use backend::middleware::{ADMISSION_COOKIE, RateLimit};
use backend::outbound::counter::InMemoryCounterStore;
use backend::server::api_routes;

const RAW_ID: &str = "76561198030958226";

fn fixture_state() -> HttpState {
    let pipeline = TrustReportPipeline::new(
        Arc::new(FixtureProfileProvider),
        Arc::new(FixtureReportRepository),
    );
    HttpState::new(Arc::new(pipeline))
}

fn limiter(store: Arc<InMemoryCounterStore>) -> RateLimiter {
    RateLimiter::new(store, RateLimitConfig::default())
}

macro_rules! fixture_app {
    ($store:expr) => {
        test::init_service(
            App::new().service(
                web::scope("/api/v1")
                    .wrap(RateLimit::new(limiter($store), false))
                    .configure(api_routes(fixture_state())),
            ),
        )
        .await
    };
}

#[actix_web::test]
async fn computes_a_report_for_a_raw_id() {
    let app = fixture_app!(Arc::new(InMemoryCounterStore::new()));

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/trust?account={RAW_ID}"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert!(res.status().is_success());

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["accountId"], RAW_ID);

    // The fixture profile is public with 1000 hours, no friends, no bans,
    // and an empty comment thread: -5 (few friends), -5 and -5 (empty
    // friend list forces the ratio sentinel through both ratio rules), -3
    // (no-signal sentiment).
    assert_eq!(body["trustScore"], 82);
    assert_eq!(body["features"]["visible"], true);
    assert_eq!(body["features"]["friendBanRatio"], 1.0);
    assert_eq!(body["features"]["sentiment"], -1.0);
    assert_eq!(body["features"]["totalHours"], 1000);
}

#[actix_web::test]
async fn accepts_profile_url_references() {
    let app = fixture_app!(Arc::new(InMemoryCounterStore::new()));

    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/v1/trust?account=https://steamcommunity.com/profiles/{RAW_ID}/"
        ))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert!(res.status().is_success());
}

#[actix_web::test]
async fn malformed_reference_is_a_bad_request() {
    let app = fixture_app!(Arc::new(InMemoryCounterStore::new()));

    let req = test::TestRequest::get()
        .uri("/api/v1/trust?account=garbage")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_reference");
}

#[actix_web::test]
async fn third_request_on_one_token_is_rejected_and_counter_stays_put() {
    let store = Arc::new(InMemoryCounterStore::new());
    let app = fixture_app!(Arc::clone(&store));

    let first = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/trust?account={RAW_ID}"))
            .to_request(),
    )
    .await;
    assert!(first.status().is_success());
    let cookie = first
        .response()
        .cookies()
        .find(|cookie| cookie.name() == ADMISSION_COOKIE)
        .expect("admission cookie")
        .into_owned();
    let token = cookie.value().to_owned();

    let second = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/trust?account={RAW_ID}"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert!(second.status().is_success());

    let third = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/trust?account={RAW_ID}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(third.status(), StatusCode::TOO_MANY_REQUESTS);
    let body: Value = test::read_body_json(third).await;
    assert_eq!(body["code"], "rate_limited");

    // Rejection must not advance the stored counter.
    let count = store.get(&token).await.expect("counter readable");
    assert_eq!(count, Some(2));
}

#[actix_web::test]
async fn fresh_tokens_are_minted_per_anonymous_request() {
    let app = fixture_app!(Arc::new(InMemoryCounterStore::new()));

    let first = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/trust?account={RAW_ID}"))
            .to_request(),
    )
    .await;
    let second = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/trust?account={RAW_ID}"))
            .to_request(),
    )
    .await;

    let token_of = |res: &actix_web::dev::ServiceResponse<_>| {
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == ADMISSION_COOKIE)
            .map(|cookie| cookie.value().to_owned())
    };
    let first_token = token_of(&first).expect("first token");
    let second_token = token_of(&second).expect("second token");
    assert_ne!(first_token, second_token);
}
