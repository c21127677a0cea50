//! Request handling and transformation.
//!
//! # Responsibilities
//! - Generate unique request ID (UUID v4)
//! - Buffer the request body up to the configured limit
//! - Build the `MockRequest` view handed to responders
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Body limit enforced while buffering, so oversize calls still reach
//!   the dispatch path and are counted

use axum::body::Body;
use axum::http::{HeaderName, HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::handler::{HandlerError, MockRequest};

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Generates a UUID v4 request ID for every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Read the request ID set by the middleware, if any.
pub fn request_id<B>(request: &Request<B>) -> String {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

/// Buffer `request` into a [`MockRequest`].
pub async fn read_mock_request(request: Request<Body>, limit: usize) -> Result<MockRequest, HandlerError> {
    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, limit)
        .await
        .map_err(|e| HandlerError::BodyRead(e.to_string()))?;

    Ok(MockRequest::new(
        parts.method,
        parts.uri.path(),
        parts.uri.query(),
        parts.headers,
        bytes.to_vec(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Method;

    #[test]
    fn test_request_ids_are_unique_uuids() {
        let req = Request::new(());
        let mut make = MakeRequestUuidV4;
        let a = make.make_request_id(&req).unwrap();
        let b = make.make_request_id(&req).unwrap();

        let a = a.header_value().to_str().unwrap().to_string();
        let b = b.header_value().to_str().unwrap().to_string();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
    }

    #[test]
    fn test_request_id_fallback() {
        let req = Request::new(());
        assert_eq!(request_id(&req), "unknown");

        let req = Request::builder()
            .header("x-request-id", "abc")
            .body(())
            .unwrap();
        assert_eq!(request_id(&req), "abc");
    }

    #[tokio::test]
    async fn test_read_mock_request() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("http://localhost/send?data=54")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from("data=54"))
            .unwrap();

        let mock = read_mock_request(req, 1024).await.unwrap();
        assert_eq!(mock.method(), Method::POST);
        assert_eq!(mock.path(), "/send");
        assert_eq!(mock.param("data"), Some("54"));
        assert_eq!(mock.content(), "data=54");
        assert_eq!(mock.header("content-type"), Some("application/x-www-form-urlencoded"));
    }

    #[tokio::test]
    async fn test_read_mock_request_over_limit() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/send")
            .body(Body::from("0123456789"))
            .unwrap();

        assert!(matches!(
            read_mock_request(req, 4).await,
            Err(HandlerError::BodyRead(_))
        ));
    }
}
