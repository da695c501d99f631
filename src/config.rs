//! Query configuration.

use std::time::Duration;

/// Bounds applied while pulling answers out of a query.
///
/// The proof search itself is unbounded; these limits are checked between
/// steps of the lazy answer stream, so a query that would run forever can
/// be cut off without changing which answers it produces or their order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryLimits {
    /// Maximum number of answers yielded (None for unlimited). Queries
    /// without variables always yield their single boolean.
    pub max_solutions: Option<usize>,
    /// Maximum number of search steps (None for unlimited)
    pub max_steps: Option<usize>,
    /// Wall-clock budget measured from the first pull (None for unlimited)
    pub timeout: Option<Duration>,
}

impl QueryLimits {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_max_solutions(mut self, n: usize) -> Self {
        self.max_solutions = Some(n);
        self
    }

    pub fn with_max_steps(mut self, n: usize) -> Self {
        self.max_steps = Some(n);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn is_unbounded(&self) -> bool {
        self.max_solutions.is_none() && self.max_steps.is_none() && self.timeout.is_none()
    }
}

/// Why an answer sequence stopped before the search was exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interruption {
    StepLimit,
    Timeout,
}
