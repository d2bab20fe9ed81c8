//! Rat in a maze: find a path from the top-left to the bottom-right cell
//!
//! `1` is an open cell and `0` a wall.

use crate::config::Limits;
use crate::runners::errors::{InvalidInput, RunnerError};
use crate::runners::{Category, Runner};
use crate::step::{step_kinds, Trace};
use serde::{Deserialize, Serialize};

pub const MIN_SIZE: usize = 2;
pub const MAX_SIZE: usize = 10;

step_kinds! {
    pub enum MazeKind {
        Init => "init",
        TryMove => "try-move",
        Move => "move",
        Backtrack => "backtrack",
        Complete => "complete",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Down,
    Right,
    Up,
    Left,
}

impl Direction {
    /// Order in which moves are tried
    pub const ALL: [Direction; 4] = [
        Direction::Down,
        Direction::Right,
        Direction::Up,
        Direction::Left,
    ];

    fn apply(self, (row, col): (usize, usize), size: usize) -> Option<(usize, usize)> {
        let (row, col) = match self {
            Direction::Down => (row + 1, col),
            Direction::Right => (row, col + 1),
            Direction::Up => (row.checked_sub(1)?, col),
            Direction::Left => (row, col.checked_sub(1)?),
        };
        (row < size && col < size).then_some((row, col))
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Down => "down",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Left => "left",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeInput {
    pub maze: Vec<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MazeState {
    pub maze: Vec<Vec<u8>>,
    /// Cells on the current path, start first
    pub path: Vec<(usize, usize)>,
    pub position: (usize, usize),
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate: Option<(usize, usize)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
    pub depth: usize,
    pub solved: bool,
}

struct MazeTracer<'a> {
    trace: Trace,
    maze: &'a [Vec<u8>],
    size: usize,
    path: Vec<(usize, usize)>,
    on_path: Vec<Vec<bool>>,
}

impl MazeTracer<'_> {
    fn snapshot(&self, position: (usize, usize), depth: usize) -> MazeState {
        MazeState {
            maze: self.maze.to_vec(),
            path: self.path.clone(),
            position,
            depth,
            ..MazeState::default()
        }
    }

    fn is_open(&self, (row, col): (usize, usize)) -> bool {
        self.maze[row][col] == 1
    }

    fn enter(&mut self, cell: (usize, usize)) {
        self.path.push(cell);
        self.on_path[cell.0][cell.1] = true;
    }

    fn leave(&mut self, cell: (usize, usize)) {
        self.path.pop();
        self.on_path[cell.0][cell.1] = false;
    }

    fn solve(&mut self, position: (usize, usize), depth: usize) -> Result<bool, RunnerError> {
        if position == (self.size - 1, self.size - 1) {
            return Ok(true);
        }

        for direction in Direction::ALL {
            let Some(next) = direction.apply(position, self.size) else {
                continue;
            };
            let valid = self.is_open(next) && !self.on_path[next.0][next.1];
            let mut state = self.snapshot(position, depth);
            state.candidate = Some(next);
            state.direction = Some(direction);
            state.valid = Some(valid);
            let reason = if !self.is_open(next) {
                "wall"
            } else if !valid {
                "already on path"
            } else {
                "open"
            };
            self.trace.push(
                MazeKind::TryMove,
                state,
                4,
                format!(
                    "Try {} from {:?} to {:?}: {}",
                    direction.label(),
                    position,
                    next,
                    reason
                ),
            )?;

            if !valid {
                continue;
            }

            self.enter(next);
            let mut state = self.snapshot(next, depth + 1);
            state.direction = Some(direction);
            state.valid = Some(true);
            self.trace.push(
                MazeKind::Move,
                state,
                5,
                format!("Move {} to {:?}", direction.label(), next),
            )?;

            if self.solve(next, depth + 1)? {
                return Ok(true);
            }

            self.leave(next);
            let mut state = self.snapshot(position, depth);
            state.candidate = Some(next);
            state.direction = Some(direction);
            self.trace.push(
                MazeKind::Backtrack,
                state,
                7,
                format!("Dead end at {:?}: back to {:?}", next, position),
            )?;
        }

        Ok(false)
    }
}

pub struct RatMaze;

impl Runner for RatMaze {
    type Input = MazeInput;

    const ID: &'static str = "rat-maze";
    const NAME: &'static str = "Rat in a Maze";
    const CATEGORY: Category = Category::Backtracking;
    const PSEUDOCODE: &'static [&'static str] = &[
        "procedure solve(cell)",
        "  if cell is the exit: return true",
        "  for dir in [down, right, up, left]",
        "    if next is open and not on the path",
        "      add next to the path",
        "      if solve(next): return true",
        "      remove next from the path (backtrack)",
        "  return false",
    ];

    fn initial_input(&self) -> MazeInput {
        MazeInput {
            maze: vec![
                vec![1, 0, 0, 0, 0],
                vec![1, 1, 0, 1, 0],
                vec![0, 1, 0, 0, 0],
                vec![1, 1, 1, 1, 0],
                vec![0, 0, 0, 1, 1],
            ],
        }
    }

    fn validate_input(&self, input: &MazeInput) -> Result<(), InvalidInput> {
        let size = input.maze.len();
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(InvalidInput::new(format!(
                "Maze size must be between {} and {}",
                MIN_SIZE, MAX_SIZE
            )));
        }
        if input.maze.iter().any(|row| row.len() != size) {
            return Err(InvalidInput::new("Maze must be square"));
        }
        if input.maze.iter().flatten().any(|cell| *cell > 1) {
            return Err(InvalidInput::new("Maze cells must be 0 (wall) or 1 (open)"));
        }
        if input.maze[0][0] != 1 || input.maze[size - 1][size - 1] != 1 {
            return Err(InvalidInput::new("Start and exit cells must be open"));
        }
        Ok(())
    }

    fn generate_steps_with(
        &self,
        input: &MazeInput,
        limits: &Limits,
    ) -> Result<Trace, RunnerError> {
        let size = input.maze.len();
        let mut tracer = MazeTracer {
            trace: Trace::new(limits.max_steps),
            maze: &input.maze,
            size,
            path: Vec::new(),
            on_path: vec![vec![false; size]; size],
        };

        tracer.enter((0, 0));
        let state = tracer.snapshot((0, 0), 0);
        tracer.trace.push(
            MazeKind::Init,
            state,
            1,
            format!(
                "Find a path through a {}x{} maze from (0, 0) to ({}, {})",
                size,
                size,
                size - 1,
                size - 1
            ),
        )?;

        let solved = tracer.solve((0, 0), 0)?;
        let end = tracer.path.last().copied().unwrap_or((0, 0));

        let mut state = tracer.snapshot(end, 0);
        state.solved = solved;
        let description = if solved {
            format!("Exit reached in {} moves", tracer.path.len() - 1)
        } else {
            "No path to the exit".to_string()
        };
        tracer.trace.push(MazeKind::Complete, state, 2, description)?;
        Ok(tracer.trace)
    }
}
