//! Completion callback invoked after each validation cycle.

use std::fmt;
use std::sync::Arc;

use crate::engine::{Descriptive, EvaluationResult};
use crate::verdict::Verdict;

/// Everything a cycle produced, handed to the completion hook.
///
/// The report borrows the cycle's result; it is dropped once the hook returns.
#[derive(Debug, Clone, Copy)]
pub struct CycleReport<'a> {
    /// ID of the element that was validated.
    pub element: &'a str,
    /// Per-validator outcomes.
    pub result: &'a EvaluationResult,
    pub verdict: Verdict,
}

impl CycleReport<'_> {
    pub fn descriptive(&self) -> &Descriptive {
        self.result.descriptive()
    }

    pub fn is_valid(&self) -> bool {
        self.verdict.is_valid()
    }

    pub fn is_invalid(&self) -> bool {
        self.verdict.is_invalid()
    }
}

/// Shared completion callback.
#[derive(Clone)]
pub struct CompletionHook(Arc<dyn Fn(&CycleReport<'_>) + Send + Sync>);

impl CompletionHook {
    pub fn new<F>(hook: F) -> Self
    where
        F: Fn(&CycleReport<'_>) + Send + Sync + 'static,
    {
        Self(Arc::new(hook))
    }

    pub fn call(&self, report: &CycleReport<'_>) {
        (self.0)(report)
    }
}

impl fmt::Debug for CompletionHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CompletionHook(..)")
    }
}
