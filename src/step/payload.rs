//! Per-runner payload variants
//!
//! Every runner family owns its own state struct. [`Payload`] wraps them so a
//! trace can hold steps from any runner, and serializes untagged: on the wire a
//! payload is just the state struct's camelCase map.

use crate::runners::backtracking::{
    hanoi::HanoiState, knights_tour::TourState, maze::MazeState, nqueens::QueensState,
    sudoku::SudokuState,
};
use crate::runners::bellman_ford::BellmanFordState;
use crate::runners::closest_pair::ClosestPairState;
use crate::runners::dp::{fibonacci::FibonacciState, knapsack::KnapsackState, lcs::LcsState};
use crate::runners::graph::GraphState;
use crate::runners::greedy::{FractionalState, MergeState};
use crate::runners::searching::SearchState;
use crate::runners::sorting::ArrayState;
use serde::Serialize;

macro_rules! payload_variants {
    ($($variant:ident($state:ty) => $accessor:ident),+ $(,)?) => {
        /// State snapshot carried by a [`Step`](super::Step)
        #[derive(Debug, Clone, PartialEq, Serialize)]
        #[serde(untagged)]
        pub enum Payload {
            $($variant($state)),+
        }

        impl Payload {
            $(
                pub fn $accessor(&self) -> Option<&$state> {
                    match self {
                        Payload::$variant(state) => Some(state),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }
            )+
        }

        $(
            impl From<$state> for Payload {
                fn from(state: $state) -> Self {
                    Payload::$variant(state)
                }
            }
        )+
    };
}

payload_variants! {
    Array(ArrayState) => as_array,
    Search(SearchState) => as_search,
    Graph(GraphState) => as_graph,
    BellmanFord(BellmanFordState) => as_bellman_ford,
    Hanoi(HanoiState) => as_hanoi,
    Queens(QueensState) => as_queens,
    Sudoku(SudokuState) => as_sudoku,
    Maze(MazeState) => as_maze,
    Tour(TourState) => as_tour,
    Knapsack(KnapsackState) => as_knapsack,
    Lcs(LcsState) => as_lcs,
    Fibonacci(FibonacciState) => as_fibonacci,
    Fractional(FractionalState) => as_fractional,
    Merge(MergeState) => as_merge,
    ClosestPair(ClosestPairState) => as_closest_pair,
}
