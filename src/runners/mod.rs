//! Per-algorithm step generators
//!
//! Each runner bundles three things for one algorithm:
//!
//! - a fixed default input ([`Runner::initial_input`]),
//! - a validator that rejects inputs outside the documented bounds
//!   ([`Runner::validate_input`]),
//! - the step generator itself ([`Runner::generate_steps`]).
//!
//! Generation is a pure function of the input. The runner copies the input
//! into a private working state, executes the algorithm against that copy, and
//! pushes a snapshot onto a [`Trace`] at every observable event.
//!
//! [`DynRunner`] erases the input type behind `serde_json::Value` so the
//! [`registry`](crate::registry) and the battle engine can hold every runner
//! in one map.

pub mod backtracking;
pub mod bellman_ford;
pub mod closest_pair;
pub mod dp;
pub mod errors;
pub mod graph;
pub mod greedy;
pub mod searching;
pub mod sorting;

use crate::config::Limits;
use crate::step::Trace;
use errors::{InvalidInput, RunnerError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Broad algorithm family, used for listings and battle compatibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Sorting,
    Searching,
    Graph,
    WeightedGraph,
    Backtracking,
    DynamicProgramming,
    Greedy,
    Geometry,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Sorting => "sorting",
            Category::Searching => "searching",
            Category::Graph => "graph",
            Category::WeightedGraph => "weighted graph",
            Category::Backtracking => "backtracking",
            Category::DynamicProgramming => "dynamic programming",
            Category::Greedy => "greedy",
            Category::Geometry => "geometry",
        }
    }
}

/// A single algorithm's visualizable behaviour
pub trait Runner {
    type Input: Clone + Serialize + DeserializeOwned;

    /// Stable registry key, e.g. `"quick-sort"`
    const ID: &'static str;
    const NAME: &'static str;
    const CATEGORY: Category;
    /// Pseudocode listing that `Step::code_line` points into (1-based)
    const PSEUDOCODE: &'static [&'static str];

    fn initial_input(&self) -> Self::Input;

    fn validate_input(&self, input: &Self::Input) -> Result<(), InvalidInput>;

    /// Generate the trace under explicit limits.
    ///
    /// Callers are expected to have validated `input` first.
    fn generate_steps_with(
        &self,
        input: &Self::Input,
        limits: &Limits,
    ) -> Result<Trace, RunnerError>;

    fn generate_steps(&self, input: &Self::Input) -> Result<Trace, RunnerError> {
        self.generate_steps_with(input, &Limits::default())
    }
}

/// Object-safe view of a [`Runner`] with JSON inputs
pub trait DynRunner {
    fn id(&self) -> &'static str;
    fn name(&self) -> &'static str;
    fn category(&self) -> Category;
    fn pseudocode(&self) -> &'static [&'static str];

    /// Default input as JSON
    fn default_input(&self) -> Value;

    /// Decode and validate a JSON input
    fn validate(&self, input: &Value) -> Result<(), RunnerError>;

    /// Decode, validate and generate
    fn generate(&self, input: &Value, limits: &Limits) -> Result<Trace, RunnerError>;
}

impl<R: Runner> DynRunner for R {
    fn id(&self) -> &'static str {
        R::ID
    }

    fn name(&self) -> &'static str {
        R::NAME
    }

    fn category(&self) -> Category {
        R::CATEGORY
    }

    fn pseudocode(&self) -> &'static [&'static str] {
        R::PSEUDOCODE
    }

    fn default_input(&self) -> Value {
        // Input types are plain structs with string keys; encoding cannot fail.
        serde_json::to_value(self.initial_input()).unwrap_or(Value::Null)
    }

    fn validate(&self, input: &Value) -> Result<(), RunnerError> {
        let decoded: R::Input = serde_json::from_value(input.clone())?;
        self.validate_input(&decoded)?;
        Ok(())
    }

    fn generate(&self, input: &Value, limits: &Limits) -> Result<Trace, RunnerError> {
        let decoded: R::Input = serde_json::from_value(input.clone())?;
        self.validate_input(&decoded)?;
        let trace = self.generate_steps_with(&decoded, limits)?;
        tracing::debug!(runner = R::ID, steps = trace.len(), "generated trace");
        Ok(trace)
    }
}
