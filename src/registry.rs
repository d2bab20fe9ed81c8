//! Runner lookup by id

use crate::runners::backtracking::{
    hanoi::Hanoi, knights_tour::KnightsTour, maze::RatMaze, nqueens::NQueens,
    sudoku::SudokuSolver,
};
use crate::runners::bellman_ford::BellmanFord;
use crate::runners::closest_pair::ClosestPair;
use crate::runners::dp::{fibonacci::Fibonacci, knapsack::Knapsack01, lcs::LongestCommonSubsequence};
use crate::runners::errors::RegistryError;
use crate::runners::graph::{BreadthFirstSearch, DepthFirstSearch};
use crate::runners::greedy::{FractionalKnapsack, OptimalMerge};
use crate::runners::searching::{BinarySearch, LinearSearch};
use crate::runners::sorting::{BubbleSort, InsertionSort, MergeSort, QuickSort, SelectionSort};
use crate::runners::{Category, DynRunner};
use rustc_hash::FxHashMap;

/// Immutable map from runner id to runner.
///
/// Listing order is registration order, which groups runners by category.
pub struct Registry {
    runners: Vec<Box<dyn DynRunner>>,
    index: FxHashMap<&'static str, usize>,
}

impl Registry {
    /// Registry with every built-in runner
    pub fn standard() -> Self {
        let runners: Vec<Box<dyn DynRunner>> = vec![
            Box::new(BubbleSort),
            Box::new(SelectionSort),
            Box::new(InsertionSort),
            Box::new(MergeSort),
            Box::new(QuickSort),
            Box::new(LinearSearch),
            Box::new(BinarySearch),
            Box::new(BreadthFirstSearch),
            Box::new(DepthFirstSearch),
            Box::new(BellmanFord),
            Box::new(Hanoi),
            Box::new(NQueens),
            Box::new(SudokuSolver),
            Box::new(RatMaze),
            Box::new(KnightsTour),
            Box::new(Knapsack01),
            Box::new(LongestCommonSubsequence),
            Box::new(Fibonacci),
            Box::new(FractionalKnapsack),
            Box::new(OptimalMerge),
            Box::new(ClosestPair),
        ];
        Self::from_runners(runners)
    }

    /// Build a registry from an explicit runner list.
    ///
    /// A later runner with a duplicate id shadows the earlier one in lookups.
    pub fn from_runners(runners: Vec<Box<dyn DynRunner>>) -> Self {
        let index = runners
            .iter()
            .enumerate()
            .map(|(i, runner)| (runner.id(), i))
            .collect();
        Registry { runners, index }
    }

    pub fn get(&self, id: &str) -> Result<&dyn DynRunner, RegistryError> {
        match self.index.get(id) {
            Some(&i) => Ok(self.runners[i].as_ref()),
            None => {
                tracing::warn!(id, "unknown runner id");
                Err(RegistryError::NotFound(id.to_string()))
            }
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Every runner in registration order
    pub fn iter(&self) -> impl Iterator<Item = &dyn DynRunner> {
        self.runners.iter().map(|r| r.as_ref())
    }

    /// Runner ids in registration order
    pub fn ids(&self) -> Vec<&'static str> {
        self.iter().map(|r| r.id()).collect()
    }

    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &dyn DynRunner> {
        self.iter().filter(move |r| r.category() == category)
    }

    pub fn len(&self) -> usize {
        self.runners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runners.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}
