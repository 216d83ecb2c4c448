//! Reduces an evaluation to a verdict.

use crate::engine::EvaluationResult;

/// Valid/invalid verdict for a field at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Invalid,
}

impl Verdict {
    pub fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn is_invalid(self) -> bool {
        !self.is_valid()
    }
}

/// Invalid iff any validator failed. No validators means valid.
pub fn aggregate(result: &EvaluationResult) -> Verdict {
    if result.outcomes().values().all(|passed| *passed) {
        Verdict::Valid
    } else {
        Verdict::Invalid
    }
}

/// Visible state of a bound field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldState {
    /// No cycle has run yet.
    #[default]
    Unvalidated,
    Valid,
    Invalid,
}

impl From<Verdict> for FieldState {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Valid => FieldState::Valid,
            Verdict::Invalid => FieldState::Invalid,
        }
    }
}
