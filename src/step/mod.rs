//! The step model shared by every runner
//!
//! A runner turns one algorithm execution into a [`Trace`]: an append-only list
//! of [`Step`]s. Each step carries
//!
//! - a `kind` tag from the runner's own closed vocabulary (see [`step_kinds!`]),
//! - a [`Payload`] snapshot of everything a renderer needs at that instant,
//! - the pseudocode line being executed, and
//! - a one-line narration.
//!
//! # Snapshot ownership
//!
//! Payloads are built from owned clones of the runner's working state at the
//! moment of emission. Nothing in a pushed step borrows from, or is shared
//! with, the state that keeps mutating afterwards.

mod payload;

pub use payload::Payload;

use crate::runners::errors::RunnerError;
use serde::Serialize;

/// Step kinds that may end a trace
pub const TERMINAL_KINDS: [&str; 4] = ["complete", "found", "not-found", "negative-cycle-detected"];

/// A runner's step vocabulary.
///
/// Implemented by the kind enums declared with [`step_kinds!`].
pub trait StepKind: Copy {
    fn as_str(self) -> &'static str;
}

/// Declare a closed step-kind enum together with its wire tags.
///
/// ```ignore
/// step_kinds! {
///     pub enum HanoiKind {
///         Init => "init",
///         Move => "move",
///         Complete => "complete",
///     }
/// }
/// ```
macro_rules! step_kinds {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => $tag:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        $vis enum $name {
            $($variant),+
        }

        impl $crate::step::StepKind for $name {
            fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $tag),+
                }
            }
        }
    };
}

pub(crate) use step_kinds;

/// One immutable snapshot in a trace
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub kind: &'static str,
    pub payload: Payload,
    pub code_line: u32,
    pub description: String,
}

impl Step {
    /// Whether this step is allowed to end a trace
    pub fn is_terminal(&self) -> bool {
        TERMINAL_KINDS.contains(&self.kind)
    }
}

/// Ordered step log produced by a single runner invocation
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    steps: Vec<Step>,
    max_steps: usize,
}

impl Trace {
    pub fn new(max_steps: usize) -> Self {
        Trace {
            steps: Vec::new(),
            max_steps,
        }
    }

    /// Append a step.
    ///
    /// Fails once the trace already holds `max_steps` steps.
    pub fn push<K: StepKind>(
        &mut self,
        kind: K,
        payload: impl Into<Payload>,
        code_line: u32,
        description: impl Into<String>,
    ) -> Result<(), RunnerError> {
        if self.steps.len() >= self.max_steps {
            tracing::warn!(limit = self.max_steps, "trace step limit reached");
            return Err(RunnerError::StepLimitExceeded {
                limit: self.max_steps,
            });
        }

        self.steps.push(Step {
            kind: kind.as_str(),
            payload: payload.into(),
            code_line,
            description: description.into(),
        });
        Ok(())
    }

    /// Get a step by index
    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn first(&self) -> Option<&Step> {
        self.steps.first()
    }

    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    /// Number of steps with the given kind tag
    pub fn count_kind(&self, kind: &str) -> usize {
        self.steps.iter().filter(|s| s.kind == kind).count()
    }

    /// All kind tags in order
    pub fn kinds(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.kind).collect()
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }
}

impl IntoIterator for Trace {
    type Item = Step;
    type IntoIter = std::vec::IntoIter<Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runners::sorting::ArrayState;

    step_kinds! {
        enum TestKind {
            Init => "init",
            Complete => "complete",
        }
    }

    fn array_payload(values: &[i64]) -> ArrayState {
        ArrayState {
            array: values.to_vec(),
            ..ArrayState::default()
        }
    }

    #[test]
    fn test_push_records_kind_tag() {
        let mut trace = Trace::new(10);
        trace
            .push(TestKind::Init, array_payload(&[1]), 1, "start")
            .unwrap();
        trace
            .push(TestKind::Complete, array_payload(&[1]), 2, "done")
            .unwrap();

        assert_eq!(trace.kinds(), vec!["init", "complete"]);
        assert!(trace.last().unwrap().is_terminal());
        assert!(!trace.first().unwrap().is_terminal());
    }

    #[test]
    fn test_push_fails_at_limit() {
        let mut trace = Trace::new(1);
        trace
            .push(TestKind::Init, array_payload(&[]), 1, "start")
            .unwrap();
        let err = trace
            .push(TestKind::Complete, array_payload(&[]), 2, "done")
            .unwrap_err();

        assert!(matches!(err, RunnerError::StepLimitExceeded { limit: 1 }));
        assert_eq!(trace.len(), 1);
    }

    #[test]
    fn test_step_serializes_camel_case() {
        let mut trace = Trace::new(4);
        trace
            .push(TestKind::Init, array_payload(&[3, 1]), 7, "start")
            .unwrap();
        let json = serde_json::to_value(trace.first().unwrap()).unwrap();

        assert_eq!(json["kind"], "init");
        assert_eq!(json["codeLine"], 7);
        assert_eq!(json["payload"]["array"], serde_json::json!([3, 1]));
    }
}
