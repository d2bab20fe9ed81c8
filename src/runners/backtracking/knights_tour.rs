//! Knight's tour with Warnsdorff ordering
//!
//! From each square the in-bounds knight moves are tried in order of onward
//! degree (fewest unvisited exits first, ties in move-table order). Squares
//! already on the tour sort last and are rejected. A free candidate is also
//! rejected when jumping there would strand an unvisited square: one left with
//! no unvisited neighbours, or a second square that could only ever be the
//! last. Both checks only cut branches that cannot finish, so the search still
//! backtracks fully and finds a tour whenever one exists.

use crate::config::Limits;
use crate::runners::errors::{InvalidInput, RunnerError};
use crate::runners::{Category, Runner};
use crate::step::{step_kinds, Trace};
use serde::{Deserialize, Serialize};

pub const MIN_SIZE: usize = 5;
pub const MAX_SIZE: usize = 8;

const MOVES: [(isize, isize); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

step_kinds! {
    pub enum TourKind {
        Init => "init",
        TryMove => "try-move",
        Move => "move",
        Backtrack => "backtrack",
        Complete => "complete",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourInput {
    pub size: usize,
    pub start_row: usize,
    pub start_col: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TourState {
    pub size: usize,
    /// Move number at which each square was visited
    pub board: Vec<Vec<Option<usize>>>,
    pub position: (usize, usize),
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate: Option<(usize, usize)>,
    /// Unvisited exits from the candidate square
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
    /// Square the candidate jump would cut off
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stranded: Option<(usize, usize)>,
    pub move_number: usize,
    pub depth: usize,
    pub solved: bool,
}

struct TourTracer {
    trace: Trace,
    size: usize,
    board: Vec<Vec<Option<usize>>>,
}

impl TourTracer {
    fn snapshot(&self, position: (usize, usize), move_number: usize, depth: usize) -> TourState {
        TourState {
            size: self.size,
            board: self.board.clone(),
            position,
            move_number,
            depth,
            ..TourState::default()
        }
    }

    fn jumps(&self, (row, col): (usize, usize)) -> impl Iterator<Item = (usize, usize)> + '_ {
        MOVES.iter().filter_map(move |&(dr, dc)| {
            let r = row.checked_add_signed(dr)?;
            let c = col.checked_add_signed(dc)?;
            (r < self.size && c < self.size).then_some((r, c))
        })
    }

    fn is_free(&self, (row, col): (usize, usize)) -> bool {
        self.board[row][col].is_none()
    }

    fn degree(&self, square: (usize, usize)) -> usize {
        self.jumps(square).filter(|s| self.is_free(*s)).count()
    }

    /// Candidates with their degree, free squares first by ascending degree
    fn ordered_candidates(&self, from: (usize, usize)) -> Vec<((usize, usize), usize)> {
        let mut candidates: Vec<_> = self.jumps(from).map(|s| (s, self.degree(s))).collect();
        candidates.sort_by_key(|&(square, degree)| (!self.is_free(square), degree));
        candidates
    }

    /// With `next` just taken by move `move_number`, an unvisited square that
    /// can no longer fit into the tour
    fn stranded_square(&self, next: (usize, usize), move_number: usize) -> Option<(usize, usize)> {
        let remaining = self.size * self.size - move_number - 1;
        if remaining == 0 {
            return None;
        }

        let mut final_square = None;
        for row in 0..self.size {
            for col in 0..self.size {
                let square = (row, col);
                if !self.is_free(square) {
                    continue;
                }
                let touches_next = self.jumps(square).any(|s| s == next);
                match self.degree(square) {
                    0 if remaining == 1 && touches_next => {}
                    0 => return Some(square),
                    // Can be entered but never left, so it has to be the last square
                    1 if !touches_next => {
                        if final_square.is_some() {
                            return Some(square);
                        }
                        final_square = Some(square);
                    }
                    _ => {}
                }
            }
        }
        None
    }

    fn solve(
        &mut self,
        position: (usize, usize),
        move_number: usize,
        depth: usize,
    ) -> Result<bool, RunnerError> {
        if move_number == self.size * self.size {
            return Ok(true);
        }

        for (next, degree) in self.ordered_candidates(position) {
            let free = self.is_free(next);
            let stranded = if free {
                self.board[next.0][next.1] = Some(move_number);
                let stranded = self.stranded_square(next, move_number);
                self.board[next.0][next.1] = None;
                stranded
            } else {
                None
            };
            let valid = free && stranded.is_none();

            let mut state = self.snapshot(position, move_number, depth);
            state.candidate = Some(next);
            state.degree = Some(degree);
            state.valid = Some(valid);
            state.stranded = stranded;
            let description = match stranded {
                _ if !free => format!("Try {:?} -> {:?}: already visited", position, next),
                Some(cut_off) => {
                    format!("Try {:?} -> {:?}: would strand {:?}", position, next, cut_off)
                }
                None => format!("Try {:?} -> {:?} ({} onward moves)", position, next, degree),
            };
            self.trace.push(TourKind::TryMove, state, 4, description)?;

            if !valid {
                continue;
            }

            self.board[next.0][next.1] = Some(move_number);
            let state = self.snapshot(next, move_number, depth + 1);
            self.trace.push(
                TourKind::Move,
                state,
                5,
                format!("Move {}: jump to {:?}", move_number, next),
            )?;

            if self.solve(next, move_number + 1, depth + 1)? {
                return Ok(true);
            }

            self.board[next.0][next.1] = None;
            let mut state = self.snapshot(position, move_number, depth);
            state.candidate = Some(next);
            self.trace.push(
                TourKind::Backtrack,
                state,
                7,
                format!("No tour continues from {:?}: undo move {}", next, move_number),
            )?;
        }

        Ok(false)
    }
}

pub struct KnightsTour;

impl Runner for KnightsTour {
    type Input = TourInput;

    const ID: &'static str = "knights-tour";
    const NAME: &'static str = "Knight's Tour";
    const CATEGORY: Category = Category::Backtracking;
    const PSEUDOCODE: &'static [&'static str] = &[
        "procedure tour(square, k)",
        "  if k == n * n: return true",
        "  for next in moves(square) by fewest onward moves",
        "    if next is unvisited and strands no square",
        "      board[next] = k",
        "      if tour(next, k + 1): return true",
        "      board[next] = empty (backtrack)",
        "  return false",
    ];

    fn initial_input(&self) -> TourInput {
        TourInput {
            size: 5,
            start_row: 0,
            start_col: 0,
        }
    }

    fn validate_input(&self, input: &TourInput) -> Result<(), InvalidInput> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&input.size) {
            return Err(InvalidInput::new(format!(
                "Board size must be between {} and {}",
                MIN_SIZE, MAX_SIZE
            )));
        }
        if input.start_row >= input.size || input.start_col >= input.size {
            return Err(InvalidInput::new("Start square is off the board"));
        }
        // Odd boards have one more square of the start's colour than the other.
        if input.size % 2 == 1 && (input.start_row + input.start_col) % 2 == 1 {
            return Err(InvalidInput::new(
                "On an odd board the tour must start on a square where row + col is even",
            ));
        }
        Ok(())
    }

    fn generate_steps_with(
        &self,
        input: &TourInput,
        limits: &Limits,
    ) -> Result<Trace, RunnerError> {
        let size = input.size;
        let start = (input.start_row, input.start_col);
        let mut tracer = TourTracer {
            trace: Trace::new(limits.max_steps),
            size,
            board: vec![vec![None; size]; size],
        };

        tracer.board[start.0][start.1] = Some(0);
        let state = tracer.snapshot(start, 1, 0);
        tracer.trace.push(
            TourKind::Init,
            state,
            1,
            format!("Start a {}x{} tour at {:?}", size, size, start),
        )?;

        let solved = tracer.solve(start, 1, 0)?;

        let last = tracer
            .board
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().enumerate().map(move |(c, k)| (*k, (r, c))))
            .filter_map(|(k, square)| Some((k?, square)))
            .max()
            .map_or(start, |(_, square)| square);
        let mut state = tracer.snapshot(last, size * size, 0);
        state.solved = solved;
        let description = if solved {
            format!("Tour complete: all {} squares visited", size * size)
        } else {
            format!("No tour exists from {:?}", start)
        };
        tracer.trace.push(TourKind::Complete, state, 2, description)?;
        Ok(tracer.trace)
    }
}
