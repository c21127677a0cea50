//! Per-route call bookkeeping.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::expectations::types::{AssertionError, AssertionResult};

/// Counts the calls a route received against the number it expects.
#[derive(Debug)]
pub struct CallRecorder {
    called: AtomicUsize,
    expected: usize,
}

impl CallRecorder {
    pub fn new(expected: usize) -> Self {
        Self {
            called: AtomicUsize::new(0),
            expected,
        }
    }

    /// Record one call and return its 0-based index.
    pub fn record_call(&self) -> usize {
        self.called.fetch_add(1, Ordering::SeqCst)
    }

    /// Calls recorded so far.
    pub fn called(&self) -> usize {
        self.called.load(Ordering::SeqCst)
    }

    /// Calls the route is configured for.
    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Compare recorded calls with the expectation for the route at `url`.
    pub fn check(&self, url: &str) -> AssertionResult {
        let actual = self.called();
        let expected = self.expected;

        if actual == 0 {
            return Err(AssertionError::NotCalled { url: url.to_string() });
        }
        if actual > expected {
            return Err(AssertionError::CalledTooOften {
                url: url.to_string(),
                expected,
                actual,
            });
        }
        if actual < expected {
            return Err(AssertionError::CalledTooFew {
                url: url.to_string(),
                expected,
                actual,
            });
        }

        Ok(())
    }
}
