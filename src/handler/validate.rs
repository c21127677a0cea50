//! Responder that checks the request body before answering.

use crate::handler::types::{HandlerError, HandlerResult, MockRequest, Respond};

/// Compares the request body against an expected payload and answers with a
/// fixed response when they are equivalent.
///
/// Equivalence ignores letter case, so `"DATA=54"` satisfies `"data=54"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatingHandler {
    expected_content: String,
    response: String,
}

impl ValidatingHandler {
    pub fn new(expected_content: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            expected_content: expected_content.into(),
            response: response.into(),
        }
    }

    pub fn expected_content(&self) -> &str {
        &self.expected_content
    }

    pub fn response(&self) -> &str {
        &self.response
    }

    fn is_equivalent(&self, content: &str) -> bool {
        content.to_lowercase() == self.expected_content.to_lowercase()
    }
}

impl Respond for ValidatingHandler {
    fn respond(&self, request: &MockRequest) -> HandlerResult {
        let content = request.content();
        if !self.is_equivalent(&content) {
            return Err(HandlerError::ContentMismatch {
                expected: self.expected_content.clone(),
                actual: content.into_owned(),
            });
        }

        Ok(self.response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, Method};

    fn post(body: &str) -> MockRequest {
        MockRequest::new(Method::POST, "/send", None, HeaderMap::new(), body)
    }

    #[test]
    fn test_matching_content() {
        let handler = ValidatingHandler::new("data=54", "we got 54");
        assert_eq!(handler.respond(&post("data=54")).unwrap(), "we got 54");
    }

    #[test]
    fn test_case_is_ignored() {
        let handler = ValidatingHandler::new("data=54", "we got 54");
        assert_eq!(handler.respond(&post("DATA=54")).unwrap(), "we got 54");
    }

    #[test]
    fn test_mismatch() {
        let handler = ValidatingHandler::new("data=54", "we got 54");
        let err = handler.respond(&post("data=56")).unwrap_err();

        assert_eq!(
            err,
            HandlerError::ContentMismatch {
                expected: "data=54".into(),
                actual: "data=56".into(),
            }
        );
        assert!(err.to_string().starts_with("Expected content to be equivalent to"));
    }

    #[test]
    fn test_empty_body_mismatch() {
        let handler = ValidatingHandler::new("data=54", "we got 54");
        assert!(matches!(
            handler.respond(&post("")),
            Err(HandlerError::ContentMismatch { .. })
        ));
    }
}
