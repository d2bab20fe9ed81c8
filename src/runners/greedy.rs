//! Greedy runners: fractional knapsack and optimal merge pattern

use super::errors::{InvalidInput, RunnerError};
use super::{Category, Runner};
use crate::config::Limits;
use crate::step::{step_kinds, Trace};
use serde::{Deserialize, Serialize};

pub const MAX_FRACTIONAL_ITEMS: usize = 10;
pub const MAX_FILES: usize = 12;
pub const MAX_FILE_SIZE: u64 = 1_000_000;

step_kinds! {
    pub enum FractionalKind {
        Init => "init",
        CalculateRatios => "calculate-ratios",
        Sort => "sort",
        Skip => "skip",
        Consider => "consider",
        TakeFull => "take-full",
        TakePartial => "take-partial",
        Complete => "complete",
    }
}

step_kinds! {
    pub enum MergeKind {
        Init => "init",
        Select => "select",
        Merge => "merge",
        Insert => "insert",
        Complete => "complete",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FractionalItem {
    pub weight: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FractionalInput {
    pub items: Vec<FractionalItem>,
    pub capacity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Pending,
    Full,
    Partial,
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    /// Position in the input
    pub index: usize,
    pub weight: f64,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio: Option<f64>,
    pub status: ItemStatus,
    pub fraction: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FractionalState {
    pub items: Vec<ItemView>,
    pub capacity: f64,
    pub remaining_capacity: f64,
    pub total_value: f64,
    /// Position in `items` of the item being handled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<usize>,
}

pub struct FractionalKnapsack;

impl Runner for FractionalKnapsack {
    type Input = FractionalInput;

    const ID: &'static str = "fractional-knapsack";
    const NAME: &'static str = "Fractional Knapsack";
    const CATEGORY: Category = Category::Greedy;
    const PSEUDOCODE: &'static [&'static str] = &[
        "procedure fractionalKnapsack(items, W)",
        "  for each item",
        "    ratio = value / weight",
        "  sort items by ratio, descending",
        "  remaining = W",
        "  for each item in sorted order",
        "    if remaining == 0: skip",
        "    if weight <= remaining",
        "      take all; remaining -= weight",
        "    else",
        "      take remaining / weight of it; remaining = 0",
        "  return total value",
    ];

    fn initial_input(&self) -> FractionalInput {
        let item = |weight, value| FractionalItem { weight, value };
        FractionalInput {
            items: vec![item(10.0, 60.0), item(20.0, 100.0), item(30.0, 120.0)],
            capacity: 50.0,
        }
    }

    fn validate_input(&self, input: &FractionalInput) -> Result<(), InvalidInput> {
        if input.items.is_empty() || input.items.len() > MAX_FRACTIONAL_ITEMS {
            return Err(InvalidInput::new(format!(
                "Provide between 1 and {} items",
                MAX_FRACTIONAL_ITEMS
            )));
        }
        if !input.capacity.is_finite() || input.capacity <= 0.0 {
            return Err(InvalidInput::new("Capacity must be a positive number"));
        }
        for (i, item) in input.items.iter().enumerate() {
            if !item.weight.is_finite() || item.weight <= 0.0 {
                return Err(InvalidInput::new(format!("Item {} needs a positive weight", i + 1)));
            }
            if !item.value.is_finite() || item.value < 0.0 {
                return Err(InvalidInput::new(format!(
                    "Item {} needs a non-negative value",
                    i + 1
                )));
            }
        }
        Ok(())
    }

    fn generate_steps_with(
        &self,
        input: &FractionalInput,
        limits: &Limits,
    ) -> Result<Trace, RunnerError> {
        let mut trace = Trace::new(limits.max_steps);
        let mut state = FractionalState {
            items: input
                .items
                .iter()
                .enumerate()
                .map(|(index, item)| ItemView {
                    index,
                    weight: item.weight,
                    value: item.value,
                    ..ItemView::default()
                })
                .collect(),
            capacity: input.capacity,
            remaining_capacity: input.capacity,
            ..FractionalState::default()
        };
        trace.push(
            FractionalKind::Init,
            state.clone(),
            1,
            format!("Fill a knapsack of capacity {}", input.capacity),
        )?;

        for item in &mut state.items {
            item.ratio = Some(item.value / item.weight);
        }
        trace.push(
            FractionalKind::CalculateRatios,
            state.clone(),
            3,
            "Compute the value-to-weight ratio of every item",
        )?;

        // Stable, so equal ratios keep their input order.
        state.items.sort_by(|a, b| {
            let (ra, rb) = (a.ratio.unwrap_or(0.0), b.ratio.unwrap_or(0.0));
            rb.total_cmp(&ra)
        });
        trace.push(
            FractionalKind::Sort,
            state.clone(),
            4,
            "Sort items by ratio, highest first",
        )?;

        for position in 0..state.items.len() {
            state.current = Some(position);
            let item = state.items[position].clone();

            if state.remaining_capacity == 0.0 {
                trace.push(
                    FractionalKind::Skip,
                    state.clone(),
                    7,
                    format!("Knapsack is full: skip item {}", item.index + 1),
                )?;
                state.items[position].status = ItemStatus::Skipped;
                continue;
            }

            trace.push(
                FractionalKind::Consider,
                state.clone(),
                6,
                format!(
                    "Consider item {}: weight {}, value {}, ratio {:.2}",
                    item.index + 1,
                    item.weight,
                    item.value,
                    item.ratio.unwrap_or(0.0)
                ),
            )?;

            if item.weight <= state.remaining_capacity {
                state.items[position].status = ItemStatus::Full;
                state.items[position].fraction = 1.0;
                state.total_value += item.value;
                state.remaining_capacity -= item.weight;
                trace.push(
                    FractionalKind::TakeFull,
                    state.clone(),
                    9,
                    format!(
                        "Take all of item {}: +{}, capacity left {}",
                        item.index + 1,
                        item.value,
                        state.remaining_capacity
                    ),
                )?;
            } else {
                let fraction = state.remaining_capacity / item.weight;
                let gain = item.value * state.remaining_capacity / item.weight;
                state.items[position].status = ItemStatus::Partial;
                state.items[position].fraction = fraction;
                state.total_value += gain;
                state.remaining_capacity = 0.0;
                trace.push(
                    FractionalKind::TakePartial,
                    state.clone(),
                    11,
                    format!(
                        "Take {:.1}% of item {}: +{:.2}",
                        fraction * 100.0,
                        item.index + 1,
                        gain
                    ),
                )?;
            }
        }

        state.current = None;
        for item in &mut state.items {
            if item.status == ItemStatus::Pending {
                item.status = ItemStatus::Skipped;
            }
        }
        let description = format!("Total value {:.2}", state.total_value);
        trace.push(FractionalKind::Complete, state, 12, description)?;
        Ok(trace)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeInput {
    pub file_sizes: Vec<u64>,
}

/// A file in the merge forest; merged files are replaced by their sum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MergeNode {
    pub id: usize,
    pub size: u64,
    pub merged: bool,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MergeRecord {
    pub first: u64,
    pub second: u64,
    pub result: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeState {
    /// Pending file sizes, ascending
    pub heap: Vec<u64>,
    pub nodes: Vec<MergeNode>,
    pub total_cost: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<(u64, u64)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_cost: Option<u64>,
    pub merge_history: Vec<MergeRecord>,
}

/// Sorted queue of (size, node id)
struct MergeQueue {
    entries: Vec<(u64, usize)>,
}

impl MergeQueue {
    fn sizes(&self) -> Vec<u64> {
        self.entries.iter().map(|(size, _)| *size).collect()
    }

    /// Insert before the first entry that is not smaller
    fn insert(&mut self, size: u64, id: usize) {
        let at = self
            .entries
            .iter()
            .position(|(existing, _)| *existing >= size)
            .unwrap_or(self.entries.len());
        self.entries.insert(at, (size, id));
    }
}

pub struct OptimalMerge;

impl Runner for OptimalMerge {
    type Input = MergeInput;

    const ID: &'static str = "optimal-merge";
    const NAME: &'static str = "Optimal Merge Pattern";
    const CATEGORY: Category = Category::Greedy;
    const PSEUDOCODE: &'static [&'static str] = &[
        "procedure optimalMerge(sizes)",
        "  if one file: return 0",
        "  queue = sorted(sizes)",
        "  cost = 0",
        "  while queue has more than one file",
        "    a, b = two smallest",
        "    merged = a + b",
        "    cost += merged",
        "    insert merged back in order",
        "  return cost",
    ];

    fn initial_input(&self) -> MergeInput {
        MergeInput {
            file_sizes: vec![2, 3, 4, 5, 6],
        }
    }

    fn validate_input(&self, input: &MergeInput) -> Result<(), InvalidInput> {
        if input.file_sizes.is_empty() || input.file_sizes.len() > MAX_FILES {
            return Err(InvalidInput::new(format!(
                "Provide between 1 and {} file sizes",
                MAX_FILES
            )));
        }
        if input.file_sizes.contains(&0) {
            return Err(InvalidInput::new("File sizes must be positive"));
        }
        if input.file_sizes.iter().any(|&size| size > MAX_FILE_SIZE) {
            return Err(InvalidInput::new(format!(
                "File sizes must be at most {}",
                MAX_FILE_SIZE
            )));
        }
        Ok(())
    }

    fn generate_steps_with(
        &self,
        input: &MergeInput,
        limits: &Limits,
    ) -> Result<Trace, RunnerError> {
        let mut trace = Trace::new(limits.max_steps);
        let mut sorted = input.file_sizes.clone();
        sorted.sort_unstable();

        let mut nodes: Vec<MergeNode> = sorted
            .iter()
            .enumerate()
            .map(|(id, &size)| MergeNode {
                id,
                size,
                merged: false,
                active: false,
            })
            .collect();
        let mut queue = MergeQueue {
            entries: nodes.iter().map(|node| (node.size, node.id)).collect(),
        };
        let mut state = MergeState {
            heap: queue.sizes(),
            nodes: nodes.clone(),
            ..MergeState::default()
        };

        if sorted.len() == 1 {
            trace.push(MergeKind::Init, state.clone(), 2, "Only one file")?;
            trace.push(MergeKind::Complete, state, 2, "Nothing to merge: total cost 0")?;
            return Ok(trace);
        }

        trace.push(
            MergeKind::Init,
            state.clone(),
            3,
            format!("Queue {} files by size", sorted.len()),
        )?;

        while queue.entries.len() > 1 {
            let (first, first_id) = queue.entries.remove(0);
            let (second, second_id) = queue.entries.remove(0);
            nodes[first_id].active = true;
            nodes[second_id].active = true;

            state.selected = Some((first, second));
            state.merge_cost = None;
            state.nodes = nodes.clone();
            state.heap = [first, second].into_iter().chain(queue.sizes()).collect();
            trace.push(
                MergeKind::Select,
                state.clone(),
                6,
                format!("Select the two smallest files: {} and {}", first, second),
            )?;

            let merged = first + second;
            state.total_cost += merged;
            for id in [first_id, second_id] {
                nodes[id].merged = true;
                nodes[id].active = false;
            }
            let merged_id = nodes.len();
            nodes.push(MergeNode {
                id: merged_id,
                size: merged,
                merged: false,
                active: true,
            });
            state.merge_history.push(MergeRecord {
                first,
                second,
                result: merged,
            });
            state.selected = None;
            state.merge_cost = Some(merged);
            state.nodes = nodes.clone();
            state.heap = queue.sizes();
            trace.push(
                MergeKind::Merge,
                state.clone(),
                8,
                format!(
                    "Merge {} + {} = {}, total cost {}",
                    first, second, merged, state.total_cost
                ),
            )?;

            queue.insert(merged, merged_id);
            nodes[merged_id].active = false;
            state.merge_cost = None;
            state.nodes = nodes.clone();
            state.heap = queue.sizes();
            trace.push(
                MergeKind::Insert,
                state.clone(),
                9,
                format!("Insert {} back into the queue", merged),
            )?;
        }

        let description = format!("Total merge cost {}", state.total_cost);
        trace.push(MergeKind::Complete, state, 10, description)?;
        Ok(trace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_queue_inserts_before_equal_sizes() {
        let mut queue = MergeQueue {
            entries: vec![(4, 0), (5, 1), (6, 2)],
        };
        queue.insert(5, 3);
        assert_eq!(queue.entries, vec![(4, 0), (5, 3), (5, 1), (6, 2)]);
    }
}
