//! Sudoku solver
//!
//! Fills the first empty cell in row-major order with digits 1-9 in ascending
//! order and backtracks on dead ends. Clues are never overwritten.

use crate::config::Limits;
use crate::runners::errors::{InvalidInput, RunnerError};
use crate::runners::{Category, Runner};
use crate::step::{step_kinds, Trace};
use serde::{Deserialize, Serialize};

pub const SIZE: usize = 9;
const BOX: usize = 3;

pub type Board = [[u8; SIZE]; SIZE];

step_kinds! {
    pub enum SudokuKind {
        Init => "init",
        FindEmpty => "find-empty",
        TryNumber => "try-number",
        Place => "place",
        Backtrack => "backtrack",
        Complete => "complete",
    }
}

/// Rows of digits, `0` for an empty cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SudokuInput {
    pub board: Vec<Vec<u8>>,
}

/// Where a candidate digit already appears
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Conflict {
    Row,
    Column,
    Box,
}

impl Conflict {
    pub fn label(self) -> &'static str {
        match self {
            Conflict::Row => "row",
            Conflict::Column => "column",
            Conflict::Box => "box",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SudokuState {
    pub board: Board,
    /// Cells that held a clue in the input
    pub given: [[bool; SIZE]; SIZE],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell: Option<(usize, usize)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digit: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflict: Option<Conflict>,
    pub depth: usize,
    pub solved: bool,
}

/// First rule `digit` would break at (row, col)
fn conflict_at(board: &Board, row: usize, col: usize, digit: u8) -> Option<Conflict> {
    if (0..SIZE).any(|c| c != col && board[row][c] == digit) {
        return Some(Conflict::Row);
    }
    if (0..SIZE).any(|r| r != row && board[r][col] == digit) {
        return Some(Conflict::Column);
    }
    let (top, left) = (row / BOX * BOX, col / BOX * BOX);
    for r in top..top + BOX {
        for c in left..left + BOX {
            if (r, c) != (row, col) && board[r][c] == digit {
                return Some(Conflict::Box);
            }
        }
    }
    None
}

fn first_empty(board: &Board) -> Option<(usize, usize)> {
    (0..SIZE)
        .flat_map(|r| (0..SIZE).map(move |c| (r, c)))
        .find(|&(r, c)| board[r][c] == 0)
}

/// Check that a board is complete and breaks no rule
pub fn is_solved(board: &Board) -> bool {
    (0..SIZE).all(|r| {
        (0..SIZE).all(|c| {
            let digit = board[r][c];
            (1..=9).contains(&digit) && conflict_at(board, r, c, digit).is_none()
        })
    })
}

fn to_board(rows: &[Vec<u8>]) -> Board {
    let mut board = [[0; SIZE]; SIZE];
    for (r, row) in rows.iter().enumerate().take(SIZE) {
        for (c, digit) in row.iter().enumerate().take(SIZE) {
            board[r][c] = *digit;
        }
    }
    board
}

struct SudokuTracer {
    trace: Trace,
    board: Board,
    given: [[bool; SIZE]; SIZE],
}

impl SudokuTracer {
    fn snapshot(&self, depth: usize) -> SudokuState {
        SudokuState {
            board: self.board,
            given: self.given,
            depth,
            ..SudokuState::default()
        }
    }

    fn solve(&mut self, depth: usize) -> Result<bool, RunnerError> {
        let Some((row, col)) = first_empty(&self.board) else {
            return Ok(true);
        };

        let mut state = self.snapshot(depth);
        state.cell = Some((row, col));
        self.trace.push(
            SudokuKind::FindEmpty,
            state,
            2,
            format!("Next empty cell is ({}, {})", row, col),
        )?;

        for digit in 1..=9u8 {
            let conflict = conflict_at(&self.board, row, col, digit);
            let mut state = self.snapshot(depth);
            state.cell = Some((row, col));
            state.digit = Some(digit);
            state.valid = Some(conflict.is_none());
            state.conflict = conflict;
            let description = match conflict {
                None => format!("Try {} at ({}, {}): allowed", digit, row, col),
                Some(rule) => format!(
                    "Try {} at ({}, {}): already in {}",
                    digit,
                    row,
                    col,
                    rule.label()
                ),
            };
            self.trace.push(SudokuKind::TryNumber, state, 4, description)?;

            if conflict.is_some() {
                continue;
            }

            self.board[row][col] = digit;
            let mut state = self.snapshot(depth);
            state.cell = Some((row, col));
            state.digit = Some(digit);
            state.valid = Some(true);
            self.trace.push(
                SudokuKind::Place,
                state,
                5,
                format!("Place {} at ({}, {})", digit, row, col),
            )?;

            if self.solve(depth + 1)? {
                return Ok(true);
            }

            self.board[row][col] = 0;
            let mut state = self.snapshot(depth);
            state.cell = Some((row, col));
            state.digit = Some(digit);
            self.trace.push(
                SudokuKind::Backtrack,
                state,
                7,
                format!("{} at ({}, {}) leads nowhere: clear it", digit, row, col),
            )?;
        }

        Ok(false)
    }
}

pub struct SudokuSolver;

impl Runner for SudokuSolver {
    type Input = SudokuInput;

    const ID: &'static str = "sudoku-solver";
    const NAME: &'static str = "Sudoku Solver";
    const CATEGORY: Category = Category::Backtracking;
    const PSEUDOCODE: &'static [&'static str] = &[
        "procedure solve(board)",
        "  find the first empty cell (r, c)",
        "  if none: return true",
        "  for d = 1 to 9: if d fits at (r, c)",
        "      board[r][c] = d",
        "      if solve(board): return true",
        "      board[r][c] = 0 (backtrack)",
        "  return false",
    ];

    fn initial_input(&self) -> SudokuInput {
        let rows: [[u8; SIZE]; SIZE] = [
            [5, 3, 0, 0, 0, 8, 0, 0, 0],
            [0, 7, 0, 0, 9, 0, 3, 4, 8],
            [1, 0, 8, 3, 4, 2, 5, 0, 7],
            [0, 5, 9, 0, 6, 1, 4, 2, 0],
            [0, 0, 6, 8, 0, 0, 7, 9, 1],
            [7, 0, 3, 9, 2, 0, 8, 0, 0],
            [9, 0, 0, 5, 0, 0, 0, 8, 0],
            [2, 0, 7, 0, 0, 0, 6, 0, 5],
            [0, 4, 5, 0, 8, 6, 1, 7, 9],
        ];
        SudokuInput {
            board: rows.iter().map(|row| row.to_vec()).collect(),
        }
    }

    fn validate_input(&self, input: &SudokuInput) -> Result<(), InvalidInput> {
        if input.board.len() != SIZE || input.board.iter().any(|row| row.len() != SIZE) {
            return Err(InvalidInput::new("Board must be 9x9"));
        }
        if input.board.iter().flatten().any(|d| *d > 9) {
            return Err(InvalidInput::new("Cells must hold digits 0-9"));
        }
        let board = to_board(&input.board);
        for r in 0..SIZE {
            for c in 0..SIZE {
                let digit = board[r][c];
                if digit == 0 {
                    continue;
                }
                if let Some(rule) = conflict_at(&board, r, c, digit) {
                    return Err(InvalidInput::new(format!(
                        "Clue {} at ({}, {}) repeats in its {}",
                        digit,
                        r,
                        c,
                        rule.label()
                    )));
                }
            }
        }
        Ok(())
    }

    fn generate_steps_with(
        &self,
        input: &SudokuInput,
        limits: &Limits,
    ) -> Result<Trace, RunnerError> {
        let board = to_board(&input.board);
        let mut given = [[false; SIZE]; SIZE];
        for r in 0..SIZE {
            for c in 0..SIZE {
                given[r][c] = board[r][c] != 0;
            }
        }
        let mut tracer = SudokuTracer {
            trace: Trace::new(limits.max_steps),
            board,
            given,
        };

        let empty = board.iter().flatten().filter(|d| **d == 0).count();
        let state = tracer.snapshot(0);
        tracer.trace.push(
            SudokuKind::Init,
            state,
            1,
            format!("Solve a board with {} empty cells", empty),
        )?;

        let solved = tracer.solve(0)?;

        let mut state = tracer.snapshot(0);
        state.solved = solved;
        let description = if solved {
            "Board solved".to_string()
        } else {
            "Board has no solution".to_string()
        };
        tracer.trace.push(SudokuKind::Complete, state, 3, description)?;
        Ok(tracer.trace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_reports_first_broken_rule() {
        let mut board = [[0; SIZE]; SIZE];
        board[0][8] = 4;
        board[8][0] = 5;
        board[1][1] = 6;
        assert_eq!(conflict_at(&board, 0, 0, 4), Some(Conflict::Row));
        assert_eq!(conflict_at(&board, 0, 0, 5), Some(Conflict::Column));
        assert_eq!(conflict_at(&board, 0, 0, 6), Some(Conflict::Box));
        assert_eq!(conflict_at(&board, 0, 0, 7), None);
    }

    #[test]
    fn first_empty_is_row_major() {
        let mut board = [[1; SIZE]; SIZE];
        board[4][2] = 0;
        board[3][7] = 0;
        assert_eq!(first_empty(&board), Some((3, 7)));
    }
}
