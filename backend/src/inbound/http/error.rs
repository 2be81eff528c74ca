//! HTTP error envelope and mapping from domain errors.
//!
//! Keeps the domain free of transport concerns: [`crate::domain::Error`]
//! carries the taxonomy, this adapter decides status codes and the JSON
//! shape on the wire.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use crate::domain::{Error, ErrorCode};

/// Wrapper turning a domain error into an actix response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError(Error);

impl ApiError {
    /// The wrapped domain error.
    pub fn inner(&self) -> &Error {
        &self.0
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.0.code() {
            ErrorCode::InvalidReference => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ErrorCode::UpstreamUnavailable => StatusCode::BAD_GATEWAY,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.0.code(), ErrorCode::InternalError) {
            // Internal details stay in the logs, not on the wire.
            let redacted = Error::internal("internal server error");
            return HttpResponse::build(self.status_code()).json(redacted);
        }
        HttpResponse::build(self.status_code()).json(&self.0)
    }
}

/// Convenience alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn status_codes_follow_the_taxonomy() {
        let cases = [
            (Error::invalid_reference("x"), StatusCode::BAD_REQUEST),
            (Error::not_found("x"), StatusCode::NOT_FOUND),
            (Error::rate_limited("x"), StatusCode::TOO_MANY_REQUESTS),
            (Error::upstream_unavailable("x"), StatusCode::BAD_GATEWAY),
            (Error::service_unavailable("x"), StatusCode::SERVICE_UNAVAILABLE),
            (Error::internal("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, expected) in cases {
            assert_eq!(ApiError::from(error).status_code(), expected);
        }
    }

    #[tokio::test]
    async fn internal_errors_are_redacted_on_the_wire() {
        let response = ApiError::from(Error::internal("secret connection string")).error_response();
        let body = to_bytes(response.into_body()).await.expect("body");
        let text = std::str::from_utf8(&body).expect("utf8");
        assert!(!text.contains("secret"));
        assert!(text.contains("internal_error"));
    }

    #[tokio::test]
    async fn client_errors_keep_their_message() {
        let response = ApiError::from(Error::invalid_reference("unrecognised account reference"))
            .error_response();
        let body = to_bytes(response.into_body()).await.expect("body");
        let text = std::str::from_utf8(&body).expect("utf8");
        assert!(text.contains("unrecognised account reference"));
    }
}
