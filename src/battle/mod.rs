//! Lockstep replay of two traces
//!
//! [`BattleEngine`] owns two finished traces and a cursor into each. Every
//! tick moves each cursor one step forward until that side sits on its last
//! step, where it stays. The first side to get there wins; reaching the end on
//! the same tick is a [`Winner::Tie`].
//!
//! The engine never fails. If either trace is empty it simply refuses to move,
//! reports zero progress and never names a winner.
//!
//! Timing is the caller's business: a UI calls [`BattleEngine::tick`] from its
//! timer and [`BattleEngine::step`] for manual advances.

pub mod arena;

use crate::step::{Step, Trace};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionState {
    #[default]
    Idle,
    Running,
    Paused,
    Finished,
}

impl ExecutionState {
    pub fn label(self) -> &'static str {
        match self {
            ExecutionState::Idle => "idle",
            ExecutionState::Running => "running",
            ExecutionState::Paused => "paused",
            ExecutionState::Finished => "finished",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    A,
    B,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Winner {
    A,
    B,
    Tie,
}

impl From<Side> for Winner {
    fn from(side: Side) -> Self {
        match side {
            Side::A => Winner::A,
            Side::B => Winner::B,
        }
    }
}

/// Observable state of a battle at one instant
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleStatus<'a> {
    pub current_step_a: Option<&'a Step>,
    pub current_step_b: Option<&'a Step>,
    pub current_step_index_a: usize,
    pub current_step_index_b: usize,
    pub execution_state: ExecutionState,
    pub winner: Option<Winner>,
    pub progress_a: f64,
    pub progress_b: f64,
}

#[derive(Debug, Clone)]
pub struct BattleEngine {
    trace_a: Trace,
    trace_b: Trace,
    cursor_a: usize,
    cursor_b: usize,
    state: ExecutionState,
    winner: Option<Winner>,
    ticks: usize,
}

impl BattleEngine {
    pub fn new(trace_a: Trace, trace_b: Trace) -> Self {
        BattleEngine {
            trace_a,
            trace_b,
            cursor_a: 0,
            cursor_b: 0,
            state: ExecutionState::Idle,
            winner: None,
            ticks: 0,
        }
    }

    /// Replace both traces and reset
    pub fn load(&mut self, trace_a: Trace, trace_b: Trace) {
        self.trace_a = trace_a;
        self.trace_b = trace_b;
        self.reset();
    }

    /// Start or resume ticking
    pub fn run(&mut self) {
        if self.is_ready() && self.state != ExecutionState::Finished {
            self.state = ExecutionState::Running;
        }
    }

    pub fn pause(&mut self) {
        if self.state == ExecutionState::Running {
            self.state = ExecutionState::Paused;
        }
    }

    /// Flip between running and paused; used by the play/pause key
    pub fn toggle(&mut self) {
        match self.state {
            ExecutionState::Running => self.pause(),
            _ => self.run(),
        }
    }

    /// Cursors back to the first step, state back to idle
    pub fn reset(&mut self) {
        self.cursor_a = 0;
        self.cursor_b = 0;
        self.state = ExecutionState::Idle;
        self.winner = None;
        self.ticks = 0;
    }

    /// Timer callback. Only advances while running.
    ///
    /// Returns whether any cursor moved or the state changed.
    pub fn tick(&mut self) -> bool {
        if self.state != ExecutionState::Running {
            return false;
        }
        self.advance()
    }

    /// Single manual advance; stops autoplay
    pub fn step(&mut self) -> bool {
        if self.state == ExecutionState::Finished || !self.is_ready() {
            return false;
        }
        self.state = ExecutionState::Paused;
        self.advance()
    }

    /// Tick until both sides finish. Returns the winner, if any.
    pub fn run_to_end(&mut self) -> Option<Winner> {
        self.run();
        while self.tick() {}
        self.winner
    }

    fn advance(&mut self) -> bool {
        if !self.is_ready() || self.state == ExecutionState::Finished {
            return false;
        }

        self.ticks += 1;
        if !self.is_done(Side::A) {
            self.cursor_a += 1;
        }
        if !self.is_done(Side::B) {
            self.cursor_b += 1;
        }

        let (a_done, b_done) = (self.is_done(Side::A), self.is_done(Side::B));
        if self.winner.is_none() {
            self.winner = match (a_done, b_done) {
                (true, true) => Some(Winner::Tie),
                (true, false) => Some(Winner::A),
                (false, true) => Some(Winner::B),
                (false, false) => None,
            };
            if let Some(winner) = self.winner {
                tracing::info!(?winner, tick = self.ticks, "battle decided");
            }
        }
        if a_done && b_done {
            self.state = ExecutionState::Finished;
        }
        true
    }

    /// Both traces hold at least one step
    pub fn is_ready(&self) -> bool {
        !self.trace_a.is_empty() && !self.trace_b.is_empty()
    }

    /// Whether a side sits on its last step
    pub fn is_done(&self, side: Side) -> bool {
        let trace = self.trace(side);
        !trace.is_empty() && self.cursor(side) + 1 >= trace.len()
    }

    pub fn trace(&self, side: Side) -> &Trace {
        match side {
            Side::A => &self.trace_a,
            Side::B => &self.trace_b,
        }
    }

    pub fn cursor(&self, side: Side) -> usize {
        match side {
            Side::A => self.cursor_a,
            Side::B => self.cursor_b,
        }
    }

    pub fn current_step(&self, side: Side) -> Option<&Step> {
        self.trace(side).get(self.cursor(side))
    }

    /// Fraction of the trace replayed, `0.0..=1.0`
    pub fn progress(&self, side: Side) -> f64 {
        let len = self.trace(side).len();
        match len {
            0 => 0.0,
            1 => 1.0,
            _ => self.cursor(side) as f64 / (len - 1) as f64,
        }
    }

    pub fn state(&self) -> ExecutionState {
        self.state
    }

    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    /// Ticks taken since the last reset
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    pub fn status(&self) -> BattleStatus<'_> {
        BattleStatus {
            current_step_a: self.current_step(Side::A),
            current_step_b: self.current_step(Side::B),
            current_step_index_a: self.cursor_a,
            current_step_index_b: self.cursor_b,
            execution_state: self.state,
            winner: self.winner,
            progress_a: self.progress(Side::A),
            progress_b: self.progress(Side::B),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runners::sorting::ArrayState;
    use crate::step::step_kinds;

    step_kinds! {
        enum FixtureKind {
            Init => "init",
            Complete => "complete",
        }
    }

    fn trace_of(len: usize) -> Trace {
        let mut trace = Trace::new(len);
        for i in 0..len {
            let kind = if i + 1 == len { FixtureKind::Complete } else { FixtureKind::Init };
            trace
                .push(kind, ArrayState::default(), 1, format!("step {}", i))
                .unwrap();
        }
        trace
    }

    #[test]
    fn test_single_step_traces_tie_on_first_tick() {
        let mut engine = BattleEngine::new(trace_of(1), trace_of(1));
        assert!(engine.is_done(Side::A));
        assert_eq!(engine.progress(Side::A), 1.0);
        assert_eq!(engine.winner(), None);

        engine.run();
        assert!(engine.tick());
        assert_eq!(engine.winner(), Some(Winner::Tie));
        assert_eq!(engine.state(), ExecutionState::Finished);
        assert_eq!(engine.cursor(Side::A), 0);
        assert_eq!(engine.ticks(), 1);
    }

    #[test]
    fn test_single_step_side_wins_immediately() {
        let mut engine = BattleEngine::new(trace_of(3), trace_of(1));
        engine.step();
        assert_eq!(engine.winner(), Some(Winner::B));
        assert_eq!(engine.cursor(Side::A), 1);
        assert_eq!(engine.state(), ExecutionState::Paused);

        engine.step();
        assert_eq!(engine.state(), ExecutionState::Finished);
        assert_eq!(engine.winner(), Some(Winner::B));
    }

    #[test]
    fn test_progress_is_fractional() {
        let mut engine = BattleEngine::new(trace_of(5), trace_of(3));
        engine.step();
        assert_eq!(engine.progress(Side::A), 0.25);
        assert_eq!(engine.progress(Side::B), 0.5);
    }

    #[test]
    fn test_status_serializes_camel_case() {
        let engine = BattleEngine::new(trace_of(2), trace_of(2));
        let value = serde_json::to_value(engine.status()).unwrap();
        assert_eq!(value["executionState"], "idle");
        assert_eq!(value["currentStepIndexA"], 0);
        assert_eq!(value["currentStepA"]["kind"], "init");
        assert!(value["winner"].is_null());
    }
}
