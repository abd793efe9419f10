//! Request ID middleware.
//!
//! # Responsibilities
//! - Ensure every request carries an `x-request-id` (UUID v4)
//! - Echo the id on the response so callers can correlate
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - A client-supplied id is preserved, never overwritten

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::http::{HeaderValue, Request, Response};
use tower::{Layer, Service};
use uuid::Uuid;

/// Header carrying the request correlation id.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Layer that attaches [`RequestIdService`].
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestIdLayer;

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

/// Service that stamps requests and responses with `x-request-id`.
#[derive(Clone, Debug)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for RequestIdService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<S::Response, S::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), S::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let id = req
            .headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        if let Ok(value) = HeaderValue::from_str(&id) {
            req.headers_mut().insert(X_REQUEST_ID, value);
        }

        let future = self.inner.call(req);
        Box::pin(async move {
            let mut response = future.await?;
            if let Ok(value) = HeaderValue::from_str(&id) {
                response.headers_mut().insert(X_REQUEST_ID, value);
            }
            Ok(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use tower::ServiceExt;

    async fn echo(req: Request<Body>) -> Result<Response<Body>, std::convert::Infallible> {
        let id = req
            .headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("missing")
            .to_string();
        Ok(Response::new(Body::from(id)))
    }

    #[tokio::test]
    async fn test_generates_id_when_absent() {
        let service = RequestIdLayer.layer(tower::service_fn(echo));
        let response = service.oneshot(Request::new(Body::empty())).await.unwrap();

        let header = response.headers().get(X_REQUEST_ID).unwrap();
        assert!(Uuid::parse_str(header.to_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_preserves_client_id() {
        let service = RequestIdLayer.layer(tower::service_fn(echo));
        let mut req = Request::new(Body::empty());
        req.headers_mut()
            .insert(X_REQUEST_ID, HeaderValue::from_static("abc-123"));

        let response = service.oneshot(req).await.unwrap();
        assert_eq!(
            response.headers().get(X_REQUEST_ID).unwrap(),
            &HeaderValue::from_static("abc-123")
        );
    }
}
