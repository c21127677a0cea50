//! Response construction.
//!
//! # Responsibilities
//! - Map a responder result to an HTTP response
//! - Serialize handler failures into a diagnostic body
//! - Answer unknown paths with 404
//!
//! # Design Decisions
//! - Handler failures use 500 so clients notice, but still carry a body
//! - The diagnostic prefix is stable so tests can match on it

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::handler::{HandlerError, HandlerResult};

/// Prefix of every diagnostic body produced for a failed handler.
pub const DIAGNOSTIC_PREFIX: &str = "Exception in handler: ";

/// Diagnostic body describing `error`.
pub fn diagnostic(error: &HandlerError) -> String {
    format!("{DIAGNOSTIC_PREFIX}{error}")
}

/// Turn a responder result into the response sent to the client.
pub fn handler_response(result: &HandlerResult) -> Response {
    match result {
        Ok(body) => (StatusCode::OK, body.clone()).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, diagnostic(e)).into_response(),
    }
}

/// Response for a path no route is registered for.
pub fn not_found(path: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        format!("No mock handler registered for {path}"),
    )
        .into_response()
}
