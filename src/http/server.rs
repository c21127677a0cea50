//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create Axum Router with a single catch-all handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Look up the route for each request and record the call
//! - Run the responder behind a failure barrier
//! - Defer handler failures into the shared error slot

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    routing::any,
    Router,
};
use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::MockConfig;
use crate::expectations::ErrorSlot;
use crate::handler::{HandlerError, HandlerResult, MockRequest, RouteHandler};
use crate::http::request::{read_mock_request, request_id, MakeRequestUuidV4, X_REQUEST_ID};
use crate::http::response::{handler_response, not_found};
use crate::lifecycle::shutdown;
use crate::mock::types::MockError;

/// Immutable path → route lookup, preserving registration order.
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<RouteHandler>,
    by_path: HashMap<String, usize>,
}

impl RouteTable {
    /// Build the table, rejecting malformed and duplicate paths.
    pub fn new(routes: Vec<RouteHandler>) -> Result<Self, MockError> {
        let mut by_path = HashMap::with_capacity(routes.len());

        for (index, route) in routes.iter().enumerate() {
            if !route.path().starts_with('/') {
                return Err(MockError::InvalidRoutePath(route.path().to_string()));
            }
            if by_path.insert(route.path().to_string(), index).is_some() {
                return Err(MockError::DuplicateRoute(route.path().to_string()));
            }
        }

        Ok(Self { routes, by_path })
    }

    pub fn get(&self, path: &str) -> Option<&RouteHandler> {
        self.by_path.get(path).map(|&i| &self.routes[i])
    }

    /// Routes in registration order.
    pub fn routes(&self) -> &[RouteHandler] {
        &self.routes
    }
}

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub errors: Arc<ErrorSlot>,
    pub body_limit: usize,
}

/// HTTP server serving the registered routes.
pub struct MockHttpServer {
    router: Router,
}

impl MockHttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: &MockConfig, state: AppState) -> Self {
        Self {
            router: Self::build_router(config, state),
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &MockConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch_handler))
            .route("/", any(dispatch_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuidV4))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
                    .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs))),
            )
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: oneshot::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Mock HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait_for(shutdown))
            .await?;

        tracing::info!(address = %addr, "Mock HTTP server stopped");
        Ok(())
    }

    /// The configured router, for driving requests without a socket.
    pub fn into_router(self) -> Router {
        self.router
    }
}

/// Looks up the route, records the call and produces the response.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let request_id = request_id(&request);
    let path = request.uri().path().to_string();
    let method = request.method().clone();

    let Some(route) = state.routes.get(&path) else {
        tracing::warn!(request_id = %request_id, method = %method, path = %path, "No mock route matched");
        return not_found(&path);
    };

    let call_index = route.record_call();
    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        call_index,
        "Dispatching mock request"
    );

    // Oversize bodies fail here, after the call is recorded.
    let result = match read_mock_request(request, state.body_limit).await {
        Ok(mock_request) => run_guarded(route, &mock_request),
        Err(e) => {
            route.skip();
            Err(e)
        }
    };

    if let Err(e) = &result {
        tracing::warn!(
            request_id = %request_id,
            path = %path,
            call_index,
            error = %e,
            "Mock handler failed"
        );
        state.errors.store(e.clone());
    }

    handler_response(&result)
}

/// Run the responder, turning panics into handler errors.
fn run_guarded(route: &RouteHandler, request: &MockRequest) -> HandlerResult {
    panic::catch_unwind(AssertUnwindSafe(|| route.respond(request)))
        .unwrap_or_else(|payload| Err(HandlerError::Panicked(panic_message(payload))))
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::ValidatingHandler;
    use axum::http::{Method, StatusCode};
    use tower::ServiceExt;

    fn state(routes: Vec<RouteHandler>) -> AppState {
        state_with_limit(routes, 1024)
    }

    fn state_with_limit(routes: Vec<RouteHandler>, body_limit: usize) -> AppState {
        AppState {
            routes: Arc::new(RouteTable::new(routes).unwrap()),
            errors: Arc::new(ErrorSlot::new()),
            body_limit,
        }
    }

    fn router(state: AppState) -> Router {
        MockHttpServer::new(&MockConfig::default(), state).into_router()
    }

    async fn send(router: &Router, method: Method, uri: &str, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::from(body.to_string()))
            .unwrap();
        send_request(router, request).await
    }

    async fn send_request(router: &Router, request: Request<Body>) -> (StatusCode, String) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[test]
    fn test_route_table_rejects_duplicates() {
        let err = RouteTable::new(vec![RouteHandler::empty("/a"), RouteHandler::empty("/a")]).unwrap_err();
        assert!(matches!(err, MockError::DuplicateRoute(p) if p == "/a"));
    }

    #[test]
    fn test_route_table_rejects_relative_paths() {
        let err = RouteTable::new(vec![RouteHandler::empty("a")]).unwrap_err();
        assert!(matches!(err, MockError::InvalidRoutePath(p) if p == "a"));
    }

    #[tokio::test]
    async fn test_fixed_route() {
        let state = state(vec![RouteHandler::fixed("/custom/endpoint", "sample response")]);
        let router = router(state.clone());

        let (status, body) = send(&router, Method::GET, "/custom/endpoint", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "sample response");
        assert_eq!(state.routes.routes()[0].called(), 1);
    }

    #[tokio::test]
    async fn test_root_route() {
        let state = state(vec![RouteHandler::empty("/")]);
        let router = router(state.clone());

        let (status, body) = send(&router, Method::GET, "/", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "");
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_counted() {
        let state = state(vec![RouteHandler::empty("/known")]);
        let router = router(state.clone());

        let (status, body) = send(&router, Method::GET, "/unknown", "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "No mock handler registered for /unknown");
        assert_eq!(state.routes.routes()[0].called(), 0);
        assert!(state.errors.is_empty());
    }

    #[tokio::test]
    async fn test_failure_is_deferred_and_reported() {
        let state = state(vec![RouteHandler::validating("/send", "data=54", "we got 54")]);
        let router = router(state.clone());

        let (status, body) = send(&router, Method::POST, "/send", "data=56").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.starts_with("Exception in handler: Expected content to be equivalent to"));
        assert!(matches!(
            state.errors.take(),
            Some(HandlerError::ContentMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn test_sequence_exhaustion() {
        let route = RouteHandler::validating_sequence(
            "/send",
            vec![
                ValidatingHandler::new("data=54", "we got 54"),
                ValidatingHandler::new("data=56", "we got 56"),
            ],
        )
        .unwrap();
        let state = state(vec![route]);
        let router = router(state.clone());

        assert_eq!(send(&router, Method::POST, "/send", "data=54").await.1, "we got 54");
        assert_eq!(send(&router, Method::POST, "/send", "data=56").await.1, "we got 56");
        let (_, body) = send(&router, Method::POST, "/send", "data=56").await;
        assert!(body.starts_with("Exception in handler: No more handlers are available"));
        assert_eq!(state.routes.routes()[0].called(), 3);
    }

    #[tokio::test]
    async fn test_oversize_body_is_counted_and_deferred() {
        let state = state_with_limit(vec![RouteHandler::validating("/send", "data=54", "we got 54")], 4);
        let router = router(state.clone());

        let request = Request::builder()
            .method(Method::POST)
            .uri("/send")
            .header("content-length", "10")
            .body(Body::from("0123456789"))
            .unwrap();
        let (status, body) = send_request(&router, request).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.starts_with("Exception in handler: Failed to read request body"));
        assert_eq!(state.routes.routes()[0].called(), 1);
        assert!(matches!(state.errors.take(), Some(HandlerError::BodyRead(_))));
    }

    #[tokio::test]
    async fn test_unreadable_call_keeps_sequence_aligned() {
        let route = RouteHandler::responses("/seq", ["A", "B"]).unwrap();
        let state = state_with_limit(vec![route], 4);
        let router = router(state.clone());

        let chunks = futures_util::stream::iter(vec![
            Ok::<_, std::io::Error>("01234"),
            Ok("56789"),
        ]);
        let request = Request::builder()
            .method(Method::POST)
            .uri("/seq")
            .body(Body::from_stream(chunks))
            .unwrap();
        let (status, _) = send_request(&router, request).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        assert_eq!(send(&router, Method::GET, "/seq", "").await.1, "B");
        let (status, body) = send(&router, Method::GET, "/seq", "").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.starts_with("Exception in handler: No more handlers are available"));
        assert_eq!(state.routes.routes()[0].called(), 3);
        assert!(matches!(
            state.errors.take(),
            Some(HandlerError::NoMoreHandlers { index: 2, available: 2 })
        ));
    }

    #[tokio::test]
    async fn test_panicking_handler_is_caught() {
        let route = RouteHandler::from_fn("/panic", |_: &MockRequest| -> HandlerResult {
            panic!("assertion failed: payload");
        });
        let state = state(vec![route]);
        let router = router(state.clone());

        let (status, body) = send(&router, Method::GET, "/panic", "").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Exception in handler: Handler panicked: assertion failed: payload");
        assert_eq!(
            state.errors.take(),
            Some(HandlerError::Panicked("assertion failed: payload".into()))
        );

        // The server keeps serving after a panic.
        let (status, _) = send(&router, Method::GET, "/panic", "").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let router = router(state(vec![RouteHandler::empty("/")]));
        let response = router
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let id = response.headers().get("x-request-id").unwrap().to_str().unwrap();
        assert!(uuid::Uuid::parse_str(id).is_ok());
    }
}
