//! Admission middleware: per-caller request quotas in front of the pipeline.
//!
//! Each caller carries an opaque token in an HTTP-only cookie. The
//! middleware asks the [`RateLimiter`] for an admission decision before the
//! wrapped service runs; a rejection short-circuits with the domain error
//! envelope and the inner service is never called. Fresh tokens are set on
//! the outgoing response.

use std::rc::Rc;
use std::task::{Context, Poll};
use std::time::Duration;

use actix_web::Error;
use actix_web::body::EitherBody;
use actix_web::cookie::{Cookie, SameSite, time};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::ResponseError;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::error;

use crate::domain::RateLimiter;
use crate::inbound::http::ApiError;

/// Cookie carrying the caller's admission token.
pub const ADMISSION_COOKIE: &str = "rate_token";

/// Admission middleware factory.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
///
/// use actix_web::App;
/// use backend::domain::{RateLimitConfig, RateLimiter};
/// use backend::middleware::RateLimit;
/// use backend::outbound::counter::InMemoryCounterStore;
///
/// let limiter = RateLimiter::new(
///     Arc::new(InMemoryCounterStore::new()),
///     RateLimitConfig::default(),
/// );
/// let app = App::new().wrap(RateLimit::new(limiter, true));
/// ```
#[derive(Clone)]
pub struct RateLimit {
    limiter: RateLimiter,
    cookie_secure: bool,
}

impl RateLimit {
    /// Create the middleware over a limiter.
    pub fn new(limiter: RateLimiter, cookie_secure: bool) -> Self {
        Self {
            limiter,
            cookie_secure,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limiter: self.limiter.clone(),
            cookie_secure: self.cookie_secure,
        }))
    }
}

/// Service wrapper produced by [`RateLimit`].
pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limiter: RateLimiter,
    cookie_secure: bool,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let limiter = self.limiter.clone();
        let cookie_secure = self.cookie_secure;

        Box::pin(async move {
            let token = req
                .cookie(ADMISSION_COOKIE)
                .map(|cookie| cookie.value().to_owned());

            match limiter.admit(token.as_deref()).await {
                Ok(admission) => {
                    let mut res = service.call(req).await?.map_into_left_body();
                    if admission.fresh {
                        let cookie =
                            admission_cookie(&admission.token, limiter.ttl(), cookie_secure);
                        if let Err(err) = res.response_mut().add_cookie(&cookie) {
                            error!(error = %err, "failed to attach admission cookie");
                        }
                    }
                    Ok(res)
                }
                Err(rejection) => {
                    let response = ApiError::from(rejection)
                        .error_response()
                        .map_into_right_body();
                    Ok(req.into_response(response))
                }
            }
        })
    }
}

fn admission_cookie(token: &str, ttl: Duration, secure: bool) -> Cookie<'static> {
    Cookie::build(ADMISSION_COOKIE, token.to_owned())
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(
            i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX),
        ))
        .finish()
}
