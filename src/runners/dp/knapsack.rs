//! 0/1 knapsack, bottom-up

use crate::config::Limits;
use crate::runners::errors::{InvalidInput, RunnerError};
use crate::runners::{Category, Runner};
use crate::step::{step_kinds, Trace};
use serde::{Deserialize, Serialize};

pub const MAX_ITEMS: usize = 8;
pub const MAX_CAPACITY: usize = 30;
pub const MAX_VALUE: u64 = 1_000_000;

step_kinds! {
    pub enum KnapsackKind {
        Init => "init",
        FillCell => "fill-cell",
        Traceback => "traceback",
        Complete => "complete",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub weight: usize,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnapsackInput {
    pub items: Vec<Item>,
    pub capacity: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KnapsackState {
    pub items: Vec<Item>,
    pub capacity: usize,
    /// `table[i][w]`: best value using the first `i` items within weight `w`
    pub table: Vec<Vec<Option<u64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell: Option<(usize, usize)>,
    /// Value of `table[i - 1][w]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<u64>,
    /// `value + table[i - 1][w - weight]` when the item fits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<u64>,
    /// Item indexes chosen so far by the traceback
    pub selected: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_value: Option<u64>,
}

pub struct Knapsack01;

impl Runner for Knapsack01 {
    type Input = KnapsackInput;

    const ID: &'static str = "knapsack-01";
    const NAME: &'static str = "0/1 Knapsack";
    const CATEGORY: Category = Category::DynamicProgramming;
    const PSEUDOCODE: &'static [&'static str] = &[
        "dp[0][w] = 0; dp[i][0] = 0",
        "for i = 1 to n",
        "  for w = 1 to W",
        "    dp[i][w] = dp[i-1][w]",
        "    if weight[i] <= w",
        "      dp[i][w] = max(dp[i][w], value[i] + dp[i-1][w-weight[i]])",
        "w = W",
        "for i = n down to 1",
        "  if dp[i][w] != dp[i-1][w]: take item i; w -= weight[i]",
        "return dp[n][W]",
    ];

    fn initial_input(&self) -> KnapsackInput {
        let item = |weight, value| Item { weight, value };
        KnapsackInput {
            items: vec![item(1, 1), item(3, 4), item(4, 5), item(5, 7)],
            capacity: 7,
        }
    }

    fn validate_input(&self, input: &KnapsackInput) -> Result<(), InvalidInput> {
        if input.items.is_empty() || input.items.len() > MAX_ITEMS {
            return Err(InvalidInput::new(format!(
                "Provide between 1 and {} items",
                MAX_ITEMS
            )));
        }
        if input.capacity == 0 || input.capacity > MAX_CAPACITY {
            return Err(InvalidInput::new(format!(
                "Capacity must be between 1 and {}",
                MAX_CAPACITY
            )));
        }
        if input.items.iter().any(|item| item.weight == 0) {
            return Err(InvalidInput::new("Item weights must be positive"));
        }
        if input.items.iter().any(|item| item.value > MAX_VALUE) {
            return Err(InvalidInput::new(format!(
                "Item values must be at most {}",
                MAX_VALUE
            )));
        }
        Ok(())
    }

    fn generate_steps_with(
        &self,
        input: &KnapsackInput,
        limits: &Limits,
    ) -> Result<Trace, RunnerError> {
        let mut trace = Trace::new(limits.max_steps);
        let n = input.items.len();
        let capacity = input.capacity;

        let mut table = vec![vec![None; capacity + 1]; n + 1];
        for (i, row) in table.iter_mut().enumerate() {
            for (w, cell) in row.iter_mut().enumerate() {
                if i == 0 || w == 0 {
                    *cell = Some(0);
                }
            }
        }
        let mut state = KnapsackState {
            items: input.items.clone(),
            capacity,
            table,
            ..KnapsackState::default()
        };
        trace.push(
            KnapsackKind::Init,
            state.clone(),
            1,
            format!("{} items, capacity {}: base row and column are 0", n, capacity),
        )?;

        let mut dp = vec![vec![0u64; capacity + 1]; n + 1];
        for i in 1..=n {
            let item = input.items[i - 1];
            for w in 1..=capacity {
                let exclude = dp[i - 1][w];
                let include = (item.weight <= w).then(|| item.value + dp[i - 1][w - item.weight]);
                let result = include.map_or(exclude, |inc| inc.max(exclude));
                dp[i][w] = result;

                state.table[i][w] = Some(result);
                state.cell = Some((i, w));
                state.exclude = Some(exclude);
                state.include = include;
                state.result = Some(result);
                let description = match include {
                    Some(inc) => format!(
                        "dp[{}][{}] = max({}, {} + dp[{}][{}] = {}) = {}",
                        i,
                        w,
                        exclude,
                        item.value,
                        i - 1,
                        w - item.weight,
                        inc,
                        result
                    ),
                    None => format!(
                        "Item {} (weight {}) does not fit in {}: dp[{}][{}] = {}",
                        i, item.weight, w, i, w, result
                    ),
                };
                let code_line = if include.is_some() { 6 } else { 4 };
                trace.push(KnapsackKind::FillCell, state.clone(), code_line, description)?;
            }
        }

        state.exclude = None;
        state.include = None;
        state.result = None;
        let mut w = capacity;
        for i in (1..=n).rev() {
            let item = input.items[i - 1];
            let taken = dp[i][w] != dp[i - 1][w];
            state.cell = Some((i, w));
            let description = if taken {
                state.selected.push(i - 1);
                let description = format!(
                    "dp[{}][{}] differs from the row above: take item {} (weight {}, value {})",
                    i, w, i, item.weight, item.value
                );
                w -= item.weight;
                description
            } else {
                format!("dp[{}][{}] equals the row above: skip item {}", i, w, i)
            };
            trace.push(KnapsackKind::Traceback, state.clone(), 9, description)?;
        }

        let best = dp[n][capacity];
        state.cell = None;
        state.selected.reverse();
        state.best_value = Some(best);
        let description = format!(
            "Best value {} using items {:?}",
            best,
            state.selected.iter().map(|i| i + 1).collect::<Vec<_>>()
        );
        trace.push(KnapsackKind::Complete, state, 10, description)?;
        Ok(trace)
    }
}
