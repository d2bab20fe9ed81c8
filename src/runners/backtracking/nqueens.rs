//! N-Queens, one queen per row, columns tried left to right

use crate::config::Limits;
use crate::runners::errors::{InvalidInput, RunnerError};
use crate::runners::{Category, Runner};
use crate::step::{step_kinds, Trace};
use serde::{Deserialize, Serialize};

pub const MAX_QUEENS: usize = 8;

step_kinds! {
    pub enum QueensKind {
        Init => "init",
        Try => "try",
        Place => "place",
        Backtrack => "backtrack",
        Complete => "complete",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueensInput {
    pub n: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueensState {
    pub n: usize,
    /// Column of the queen in each row
    pub queens: Vec<Option<usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub col: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
    /// Queen that attacks the candidate square, as (row, col)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflict: Option<(usize, usize)>,
    pub depth: usize,
    pub attempts: usize,
    pub solved: bool,
}

struct QueensTracer {
    trace: Trace,
    n: usize,
    queens: Vec<Option<usize>>,
    attempts: usize,
}

impl QueensTracer {
    fn snapshot(&self, depth: usize) -> QueensState {
        QueensState {
            n: self.n,
            queens: self.queens.clone(),
            depth,
            attempts: self.attempts,
            ..QueensState::default()
        }
    }

    /// First earlier queen attacking (row, col)
    fn conflict(&self, row: usize, col: usize) -> Option<(usize, usize)> {
        self.queens[..row].iter().enumerate().find_map(|(r, placed)| {
            let c = (*placed)?;
            let same_col = c == col;
            let same_diag = row - r == c.abs_diff(col);
            (same_col || same_diag).then_some((r, c))
        })
    }

    fn solve(&mut self, row: usize) -> Result<bool, RunnerError> {
        if row == self.n {
            return Ok(true);
        }

        for col in 0..self.n {
            self.attempts += 1;
            let conflict = self.conflict(row, col);
            let mut state = self.snapshot(row);
            state.row = Some(row);
            state.col = Some(col);
            state.valid = Some(conflict.is_none());
            state.conflict = conflict;
            let description = match conflict {
                None => format!("Try ({}, {}): safe", row, col),
                Some((r, c)) => {
                    format!("Try ({}, {}): attacked by queen at ({}, {})", row, col, r, c)
                }
            };
            self.trace.push(QueensKind::Try, state, 4, description)?;

            if conflict.is_some() {
                continue;
            }

            self.queens[row] = Some(col);
            let mut state = self.snapshot(row);
            state.row = Some(row);
            state.col = Some(col);
            state.valid = Some(true);
            self.trace.push(
                QueensKind::Place,
                state,
                5,
                format!("Place queen at ({}, {})", row, col),
            )?;

            if self.solve(row + 1)? {
                return Ok(true);
            }

            self.queens[row] = None;
            let mut state = self.snapshot(row);
            state.row = Some(row);
            state.col = Some(col);
            self.trace.push(
                QueensKind::Backtrack,
                state,
                7,
                format!("No solution below ({}, {}): remove queen", row, col),
            )?;
        }

        Ok(false)
    }
}

pub struct NQueens;

impl Runner for NQueens {
    type Input = QueensInput;

    const ID: &'static str = "n-queens";
    const NAME: &'static str = "N-Queens";
    const CATEGORY: Category = Category::Backtracking;
    const PSEUDOCODE: &'static [&'static str] = &[
        "procedure solve(row)",
        "  if row == n: return true",
        "  for col = 0 to n - 1",
        "    if safe(row, col)",
        "      place queen at (row, col)",
        "      if solve(row + 1): return true",
        "      remove queen (backtrack)",
        "  return false",
    ];

    fn initial_input(&self) -> QueensInput {
        QueensInput { n: 4 }
    }

    fn validate_input(&self, input: &QueensInput) -> Result<(), InvalidInput> {
        if input.n == 0 || input.n > MAX_QUEENS {
            return Err(InvalidInput::new(format!(
                "Board size must be between 1 and {}",
                MAX_QUEENS
            )));
        }
        Ok(())
    }

    fn generate_steps_with(
        &self,
        input: &QueensInput,
        limits: &Limits,
    ) -> Result<Trace, RunnerError> {
        let mut tracer = QueensTracer {
            trace: Trace::new(limits.max_steps),
            n: input.n,
            queens: vec![None; input.n],
            attempts: 0,
        };

        let state = tracer.snapshot(0);
        tracer.trace.push(
            QueensKind::Init,
            state,
            1,
            format!("Place {} queens on a {}x{} board", input.n, input.n, input.n),
        )?;

        let solved = tracer.solve(0)?;

        let mut state = tracer.snapshot(0);
        state.solved = solved;
        let description = if solved {
            format!(
                "Solved after {} attempts: columns {:?}",
                tracer.attempts,
                placed_columns(&tracer.queens)
            )
        } else {
            format!("No arrangement of {} queens exists", input.n)
        };
        tracer.trace.push(QueensKind::Complete, state, 2, description)?;
        Ok(tracer.trace)
    }
}

fn placed_columns(queens: &[Option<usize>]) -> Vec<usize> {
    queens.iter().flatten().copied().collect()
}
