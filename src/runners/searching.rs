//! Linear and binary search

use super::errors::{InvalidInput, RunnerError};
use super::sorting::MAX_ARRAY_LEN;
use super::{Category, Runner};
use crate::config::Limits;
use crate::step::{step_kinds, Trace};
use serde::{Deserialize, Serialize};

step_kinds! {
    pub enum SearchKind {
        Init => "init",
        Compare => "compare",
        Found => "found",
        NotFound => "not-found",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchInput {
    pub array: Vec<i64>,
    pub target: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchState {
    pub array: Vec<i64>,
    pub target: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mid: Option<usize>,
    /// Index under inspection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<usize>,
    /// Indices inspected so far, in order
    pub checked: Vec<usize>,
    pub found: Option<usize>,
}

impl SearchState {
    fn new(input: &SearchInput) -> Self {
        SearchState {
            array: input.array.clone(),
            target: input.target,
            ..SearchState::default()
        }
    }
}

fn validate_len(array: &[i64]) -> Result<(), InvalidInput> {
    if array.len() > MAX_ARRAY_LEN {
        return Err(InvalidInput::new(format!(
            "Array can hold at most {} elements",
            MAX_ARRAY_LEN
        )));
    }
    Ok(())
}

pub struct LinearSearch;

impl Runner for LinearSearch {
    type Input = SearchInput;

    const ID: &'static str = "linear-search";
    const NAME: &'static str = "Linear Search";
    const CATEGORY: Category = Category::Searching;
    const PSEUDOCODE: &'static [&'static str] = &[
        "procedure linearSearch(A, target)",
        "  for i = 0 to n - 1",
        "    if A[i] == target",
        "      return i",
        "  return -1",
    ];

    fn initial_input(&self) -> SearchInput {
        SearchInput {
            array: vec![15, 3, 42, 8, 23, 4, 16, 38],
            target: 23,
        }
    }

    fn validate_input(&self, input: &SearchInput) -> Result<(), InvalidInput> {
        validate_len(&input.array)
    }

    fn generate_steps_with(
        &self,
        input: &SearchInput,
        limits: &Limits,
    ) -> Result<Trace, RunnerError> {
        let mut trace = Trace::new(limits.max_steps);
        let mut state = SearchState::new(input);

        trace.push(
            SearchKind::Init,
            state.clone(),
            1,
            format!("Search for {} in {} elements", input.target, input.array.len()),
        )?;

        for (i, &value) in input.array.iter().enumerate() {
            state.current = Some(i);
            state.checked.push(i);
            trace.push(
                SearchKind::Compare,
                state.clone(),
                3,
                format!("Compare A[{}] = {} with target {}", i, value, input.target),
            )?;

            if value == input.target {
                state.found = Some(i);
                trace.push(
                    SearchKind::Found,
                    state,
                    4,
                    format!("Found {} at index {}", input.target, i),
                )?;
                return Ok(trace);
            }
        }

        state.current = None;
        trace.push(
            SearchKind::NotFound,
            state,
            5,
            format!("{} is not in the array", input.target),
        )?;
        Ok(trace)
    }
}

/// Binary search over a non-decreasing array
pub struct BinarySearch;

impl Runner for BinarySearch {
    type Input = SearchInput;

    const ID: &'static str = "binary-search";
    const NAME: &'static str = "Binary Search";
    const CATEGORY: Category = Category::Searching;
    const PSEUDOCODE: &'static [&'static str] = &[
        "procedure binarySearch(A, target)",
        "  low = 0, high = n - 1",
        "  while low <= high",
        "    mid = (low + high) / 2",
        "    if A[mid] == target: return mid",
        "    if A[mid] < target: low = mid + 1",
        "    else: high = mid - 1",
        "  return -1",
    ];

    fn initial_input(&self) -> SearchInput {
        SearchInput {
            array: vec![10, 20, 30, 40, 42, 50, 60, 70, 80, 90],
            target: 42,
        }
    }

    fn validate_input(&self, input: &SearchInput) -> Result<(), InvalidInput> {
        validate_len(&input.array)?;
        if input.array.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(InvalidInput::new(
                "Binary search requires the array to be sorted in ascending order",
            ));
        }
        Ok(())
    }

    fn generate_steps_with(
        &self,
        input: &SearchInput,
        limits: &Limits,
    ) -> Result<Trace, RunnerError> {
        let mut trace = Trace::new(limits.max_steps);
        let mut state = SearchState::new(input);
        let array = &input.array;

        // `high` is inclusive; None once the range is empty
        let mut low = 0usize;
        let mut high = array.len().checked_sub(1);
        state.low = Some(low);
        state.high = high;
        trace.push(
            SearchKind::Init,
            state.clone(),
            2,
            format!(
                "Search for {} in a sorted array of {} elements",
                input.target,
                array.len()
            ),
        )?;

        while let Some(hi) = high.filter(|&hi| low <= hi) {
            let mid = low + (hi - low) / 2;
            let value = array[mid];
            state.low = Some(low);
            state.high = Some(hi);
            state.mid = Some(mid);
            state.current = Some(mid);
            state.checked.push(mid);
            trace.push(
                SearchKind::Compare,
                state.clone(),
                4,
                format!(
                    "low = {}, high = {}, mid = {}: compare A[{}] = {} with {}",
                    low, hi, mid, mid, value, input.target
                ),
            )?;

            if value == input.target {
                state.found = Some(mid);
                trace.push(
                    SearchKind::Found,
                    state,
                    5,
                    format!("Found {} at index {}", input.target, mid),
                )?;
                return Ok(trace);
            }
            if value < input.target {
                low = mid + 1;
            } else {
                high = mid.checked_sub(1);
            }
        }

        state.low = Some(low);
        state.high = high;
        state.mid = None;
        state.current = None;
        trace.push(
            SearchKind::NotFound,
            state,
            8,
            format!("{} is not in the array", input.target),
        )?;
        Ok(trace)
    }
}
