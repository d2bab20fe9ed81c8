//! # Introduction
//!
//! algostep turns algorithm executions into replayable step traces.  Every
//! runner executes its algorithm once against a private copy of the input and
//! records an immutable snapshot at each observable event.  The resulting
//! [`step::Trace`] is then replayed forward and backward in a terminal UI built
//! with [ratatui](https://docs.rs/ratatui), dumped as JSON, or raced against
//! another trace in a battle.
//!
//! ## Pipeline
//!
//! ```text
//! JSON input → Runner (validate, generate) → Trace → Player / Battle / JSON
//! ```
//!
//! 1. [`runners`]: one generator per algorithm, grouped by family
//!    (sorting, searching, graph, backtracking, dynamic programming, greedy,
//!    geometry).
//! 2. [`step`]: the step model shared by all runners, with the per-runner
//!    [`step::Payload`] variants.
//! 3. [`registry`]: lookup of runners by their stable id.
//! 4. [`battle`]: lockstep replay of two traces and the seeded arena that
//!    produces them.
//! 5. [`decision`]: question tree recommending an algorithm.
//! 6. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! Generation is deterministic: the same runner and input always yield the
//! same trace.  A configurable step limit ([`config::Limits`]) bounds
//! pathological inputs.

pub mod battle;
pub mod config;
pub mod decision;
pub mod registry;
pub mod runners;
pub mod step;
pub mod ui;
