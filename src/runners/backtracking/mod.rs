//! Recursive search runners
//!
//! Every runner here follows the same state machine:
//!
//! ```text
//! try candidate -> validate -> place and recurse
//!                           -> reject, try the next candidate
//!                           -> exhausted, backtrack
//! ```
//!
//! Recursion depth is threaded through the calls as an explicit counter and
//! recorded in each payload, so a trace shows the call structure without
//! relying on how the host language lays out its stack. [`hanoi`] is the pure
//! recursion case: it never rejects a candidate.
//!
//! Sudoku, N-Queens, the rat maze and the knight's tour all stop at the first
//! complete solution; an unsolvable input explores the whole candidate space
//! and ends with `complete` reporting `solved: false`.

pub mod hanoi;
pub mod knights_tour;
pub mod maze;
pub mod nqueens;
pub mod sudoku;
