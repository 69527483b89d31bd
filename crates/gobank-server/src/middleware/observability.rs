//! Request ids, sensitive header redaction and request tracing.

use axum::Router;
use axum::http::{HeaderName, header};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::sensitive_headers::{
    SetSensitiveRequestHeadersLayer, SetSensitiveResponseHeadersLayer,
};
use tower_http::trace::TraceLayer;

use crate::extract::auth::SESSION_TOKEN_HEADER;

/// Header carrying the per-request id.
static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Extension trait for `axum::`[`Router`] to apply observability middleware.
pub trait RouterObservabilityExt<S> {
    /// Layers [`SetRequestIdLayer`], [`TraceLayer`] and [`PropagateRequestIdLayer`].
    ///
    /// `authorization`, `cookie` and `x-jwt-token` request headers are marked
    /// sensitive before [`TraceLayer`] sees the request, and `x-jwt-token`
    /// response headers before it sees the response.
    fn with_observability(self) -> Self;
}

impl<S> RouterObservabilityExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_observability(self) -> Self {
        self.layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER.clone()))
            .layer(SetSensitiveResponseHeadersLayer::new([
                SESSION_TOKEN_HEADER.clone(),
            ]))
            .layer(TraceLayer::new_for_http())
            .layer(SetSensitiveRequestHeadersLayer::new([
                header::AUTHORIZATION,
                header::COOKIE,
                SESSION_TOKEN_HEADER.clone(),
            ]))
            .layer(SetRequestIdLayer::new(
                REQUEST_ID_HEADER.clone(),
                MakeRequestUuid,
            ))
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{HeaderMap, Request};
    use axum::routing::get;
    use axum_test::TestServer;
    use tower::ServiceExt;

    use super::*;

    async fn echo_sensitivity(headers: HeaderMap) -> (HeaderMap, String) {
        let request_sensitive = headers
            .get(&SESSION_TOKEN_HEADER)
            .is_some_and(|value| value.is_sensitive());

        let mut response_headers = HeaderMap::new();
        response_headers.insert(
            SESSION_TOKEN_HEADER.clone(),
            axum::http::HeaderValue::from_static("issued-token"),
        );
        (response_headers, request_sensitive.to_string())
    }

    #[tokio::test]
    async fn session_token_headers_are_sensitive() -> anyhow::Result<()> {
        let app = Router::new()
            .route("/", get(echo_sensitivity))
            .with_observability();

        let request = Request::builder()
            .uri("/")
            .header(&SESSION_TOKEN_HEADER, "presented-token")
            .body(Body::empty())?;
        let response = app.oneshot(request).await?;

        let issued = response
            .headers()
            .get(&SESSION_TOKEN_HEADER)
            .ok_or_else(|| anyhow::anyhow!("missing x-jwt-token response header"))?;
        assert!(issued.is_sensitive());

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        assert_eq!(&body[..], b"true");
        Ok(())
    }

    #[tokio::test]
    async fn responses_carry_request_id() -> anyhow::Result<()> {
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .with_observability();
        let server = TestServer::new(app)?;

        let response = server.get("/").await;
        assert!(response.maybe_header("x-request-id").is_some());

        let response = server
            .get("/")
            .add_header("x-request-id", "fixed-request-id")
            .await;
        assert_eq!(response.header("x-request-id"), "fixed-request-id");
        Ok(())
    }
}
