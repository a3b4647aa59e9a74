// src/engine/transition.rs

//! Pass/fail transition detection across consecutive results.

use crate::types::{TestResult, Transition};

/// Remembers the previous result of a watch session.
#[derive(Debug, Default)]
pub struct TransitionTracker {
    last_result: Option<TestResult>,
}

impl TransitionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_result(&self) -> Option<&TestResult> {
        self.last_result.as_ref()
    }

    /// Classify `current` against the previous result and store it as the
    /// new previous result.
    pub fn detect(&mut self, current: &TestResult) -> Transition {
        let previous = self.last_result.as_ref().map(|r| r.all_passed);
        let transition = classify(previous, current.all_passed);
        self.last_result = Some(current.clone());
        transition
    }
}

/// Pure classification of `(previous.all_passed?, current.all_passed)`.
pub fn classify(previous: Option<bool>, current: bool) -> Transition {
    match (previous, current) {
        (None, _) => Transition::FirstRun,
        (Some(false), true) => Transition::FailToPass,
        (Some(true), false) => Transition::PassToFail,
        (Some(_), _) => Transition::NoChange,
    }
}
