//! Comparison and exchange sorts: bubble, selection, insertion, merge, quick
//!
//! All five runners share [`ArrayState`] as their payload and [`SortKind`] as
//! their vocabulary. The working array lives inside a [`SortTracer`], which
//! performs every comparison and mutation and records a step for each one, so
//! the algorithms below read like their textbook versions.

use super::errors::{InvalidInput, RunnerError};
use super::{Category, Runner};
use crate::config::Limits;
use crate::step::{step_kinds, Trace};
use serde::{Deserialize, Serialize};

/// Largest array the sorting and searching runners accept
pub const MAX_ARRAY_LEN: usize = 50;

step_kinds! {
    pub enum SortKind {
        Init => "init",
        Compare => "compare",
        Swap => "swap",
        Write => "write",
        Pivot => "pivot",
        Partition => "partition",
        Divide => "divide",
        Merge => "merge",
        MarkSorted => "mark-sorted",
        Complete => "complete",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayInput {
    pub array: Vec<i64>,
}

/// Merge in progress: untouched halves plus the partially filled output
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeView {
    pub lo: usize,
    pub mid: usize,
    pub hi: usize,
    pub left: Vec<i64>,
    pub right: Vec<i64>,
    pub output: Vec<i64>,
    pub left_cursor: usize,
    pub right_cursor: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayState {
    pub array: Vec<i64>,
    /// Indices involved in the current comparison
    pub compared: Vec<usize>,
    /// Values involved in the current comparison
    pub values: Vec<i64>,
    /// Indices written by the current step
    pub written: Vec<usize>,
    /// Indices known to hold their final value
    pub sorted: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pivot: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<i64>,
    /// Active inclusive sub-range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<(usize, usize)>,
    /// Partition boundary (quick sort) or divide point (merge sort)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boundary: Option<usize>,
    /// Inclusive sub-ranges left of and right of a settled pivot, when non-empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<(usize, usize)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<(usize, usize)>,
    pub depth: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge: Option<MergeView>,
}

/// Working array plus the trace it reports into
struct SortTracer {
    trace: Trace,
    array: Vec<i64>,
    sorted: Vec<bool>,
}

impl SortTracer {
    fn new(array: &[i64], limits: &Limits) -> Self {
        SortTracer {
            trace: Trace::new(limits.max_steps),
            array: array.to_vec(),
            sorted: vec![false; array.len()],
        }
    }

    fn snapshot(&self) -> ArrayState {
        ArrayState {
            array: self.array.clone(),
            sorted: self
                .sorted
                .iter()
                .enumerate()
                .filter_map(|(i, done)| done.then_some(i))
                .collect(),
            ..ArrayState::default()
        }
    }

    /// Push a step whose payload is the current snapshot, adjusted by `detail`
    fn emit(
        &mut self,
        kind: SortKind,
        code_line: u32,
        description: String,
        detail: impl FnOnce(&mut ArrayState),
    ) -> Result<(), RunnerError> {
        let mut state = self.snapshot();
        detail(&mut state);
        self.trace.push(kind, state, code_line, description)
    }

    fn init(&mut self, code_line: u32) -> Result<(), RunnerError> {
        let description = format!("Start with {} elements: {:?}", self.array.len(), self.array);
        self.emit(SortKind::Init, code_line, description, |_| {})
    }

    /// Compare `a[i]` with `a[j]`, returning `a[i] > a[j]`
    fn compare_greater(
        &mut self,
        i: usize,
        j: usize,
        depth: usize,
        code_line: u32,
    ) -> Result<bool, RunnerError> {
        let (x, y) = (self.array[i], self.array[j]);
        let description = format!("Compare A[{}] = {} with A[{}] = {}", i, x, j, y);
        self.emit(SortKind::Compare, code_line, description, |s| {
            s.compared = vec![i, j];
            s.values = vec![x, y];
            s.depth = depth;
        })?;
        Ok(x > y)
    }

    fn swap(
        &mut self,
        i: usize,
        j: usize,
        depth: usize,
        code_line: u32,
    ) -> Result<(), RunnerError> {
        self.array.swap(i, j);
        let description = format!(
            "Swap A[{}] and A[{}], now {} and {}",
            i, j, self.array[i], self.array[j]
        );
        self.emit(SortKind::Swap, code_line, description, |s| {
            s.written = vec![i, j];
            s.depth = depth;
        })
    }

    fn mark_sorted(&mut self, index: usize, code_line: u32) -> Result<(), RunnerError> {
        self.sorted[index] = true;
        let description = format!("A[{}] = {} is in its final position", index, self.array[index]);
        self.emit(SortKind::MarkSorted, code_line, description, |_| {})
    }

    fn complete(mut self, code_line: u32) -> Result<Trace, RunnerError> {
        self.sorted.iter_mut().for_each(|done| *done = true);
        let description = format!("Sorted: {:?}", self.array);
        self.emit(SortKind::Complete, code_line, description, |_| {})?;
        Ok(self.trace)
    }
}

fn validate_array(array: &[i64]) -> Result<(), InvalidInput> {
    if array.len() > MAX_ARRAY_LEN {
        return Err(InvalidInput::new(format!(
            "Array can hold at most {} elements",
            MAX_ARRAY_LEN
        )));
    }
    Ok(())
}

fn sample_array() -> ArrayInput {
    ArrayInput {
        array: vec![64, 34, 25, 12, 22, 11, 90, 5],
    }
}

/// Bubble sort with early exit on a swap-free pass
pub struct BubbleSort;

impl Runner for BubbleSort {
    type Input = ArrayInput;

    const ID: &'static str = "bubble-sort";
    const NAME: &'static str = "Bubble Sort";
    const CATEGORY: Category = Category::Sorting;
    const PSEUDOCODE: &'static [&'static str] = &[
        "procedure bubbleSort(A)",
        "  for i = 0 to n - 2",
        "    swapped = false",
        "    for j = 0 to n - i - 2",
        "      if A[j] > A[j + 1]",
        "        swap(A[j], A[j + 1])",
        "        swapped = true",
        "    if not swapped: break",
        "  return A",
    ];

    fn initial_input(&self) -> ArrayInput {
        sample_array()
    }

    fn validate_input(&self, input: &ArrayInput) -> Result<(), InvalidInput> {
        validate_array(&input.array)
    }

    fn generate_steps_with(
        &self,
        input: &ArrayInput,
        limits: &Limits,
    ) -> Result<Trace, RunnerError> {
        let mut t = SortTracer::new(&input.array, limits);
        let n = input.array.len();
        t.init(1)?;

        for i in 0..n.saturating_sub(1) {
            let mut swapped = false;
            for j in 0..n - 1 - i {
                if t.compare_greater(j, j + 1, 0, 5)? {
                    t.swap(j, j + 1, 0, 6)?;
                    swapped = true;
                }
            }
            t.mark_sorted(n - 1 - i, 4)?;
            if !swapped {
                break;
            }
        }

        t.complete(9)
    }
}

/// Selection sort: one swap per pass at most
pub struct SelectionSort;

impl Runner for SelectionSort {
    type Input = ArrayInput;

    const ID: &'static str = "selection-sort";
    const NAME: &'static str = "Selection Sort";
    const CATEGORY: Category = Category::Sorting;
    const PSEUDOCODE: &'static [&'static str] = &[
        "procedure selectionSort(A)",
        "  for i = 0 to n - 2",
        "    min = i",
        "    for j = i + 1 to n - 1",
        "      if A[j] < A[min]",
        "        min = j",
        "    if min != i",
        "      swap(A[i], A[min])",
        "  return A",
    ];

    fn initial_input(&self) -> ArrayInput {
        sample_array()
    }

    fn validate_input(&self, input: &ArrayInput) -> Result<(), InvalidInput> {
        validate_array(&input.array)
    }

    fn generate_steps_with(
        &self,
        input: &ArrayInput,
        limits: &Limits,
    ) -> Result<Trace, RunnerError> {
        let mut t = SortTracer::new(&input.array, limits);
        let n = input.array.len();
        t.init(1)?;

        for i in 0..n.saturating_sub(1) {
            let mut min = i;
            for j in i + 1..n {
                // A[j] < A[min] is A[min] > A[j]
                let (x, y) = (t.array[j], t.array[min]);
                let description = format!(
                    "Compare A[{}] = {} with current minimum A[{}] = {}",
                    j, x, min, y
                );
                t.emit(SortKind::Compare, 5, description, |s| {
                    s.compared = vec![j, min];
                    s.values = vec![x, y];
                    s.minimum = Some(min);
                })?;
                if x < y {
                    min = j;
                }
            }
            if min != i {
                t.swap(i, min, 0, 8)?;
            }
            t.mark_sorted(i, 2)?;
        }

        t.complete(9)
    }
}

/// Insertion sort by shifting; stable
pub struct InsertionSort;

impl Runner for InsertionSort {
    type Input = ArrayInput;

    const ID: &'static str = "insertion-sort";
    const NAME: &'static str = "Insertion Sort";
    const CATEGORY: Category = Category::Sorting;
    const PSEUDOCODE: &'static [&'static str] = &[
        "procedure insertionSort(A)",
        "  for i = 1 to n - 1",
        "    key = A[i]",
        "    j = i - 1",
        "    while j >= 0 and A[j] > key",
        "      A[j + 1] = A[j]",
        "      j = j - 1",
        "    A[j + 1] = key",
        "  return A",
    ];

    fn initial_input(&self) -> ArrayInput {
        sample_array()
    }

    fn validate_input(&self, input: &ArrayInput) -> Result<(), InvalidInput> {
        validate_array(&input.array)
    }

    fn generate_steps_with(
        &self,
        input: &ArrayInput,
        limits: &Limits,
    ) -> Result<Trace, RunnerError> {
        let mut t = SortTracer::new(&input.array, limits);
        let n = input.array.len();
        t.init(1)?;

        for i in 1..n {
            let key = t.array[i];
            let mut j = i;
            while j > 0 {
                let left = t.array[j - 1];
                let description = format!("Compare A[{}] = {} with key {}", j - 1, left, key);
                t.emit(SortKind::Compare, 5, description, |s| {
                    s.compared = vec![j - 1, j];
                    s.values = vec![left, key];
                    s.key = Some(key);
                })?;
                if left <= key {
                    break;
                }
                t.array[j] = left;
                let description = format!("Shift {} right into A[{}]", left, j);
                t.emit(SortKind::Write, 6, description, |s| {
                    s.written = vec![j];
                    s.key = Some(key);
                })?;
                j -= 1;
            }
            t.array[j] = key;
            let description = format!("Insert key {} at A[{}]", key, j);
            t.emit(SortKind::Write, 8, description, |s| {
                s.written = vec![j];
                s.key = Some(key);
            })?;
        }

        t.complete(9)
    }
}

/// Top-down merge sort; ties take from the left half
pub struct MergeSort;

impl MergeSort {
    fn sort(t: &mut SortTracer, lo: usize, hi: usize, depth: usize) -> Result<(), RunnerError> {
        if lo >= hi {
            return Ok(());
        }
        let mid = lo + (hi - lo) / 2;
        let description = format!(
            "Divide A[{}..{}] at {} into A[{}..{}] and A[{}..{}]",
            lo,
            hi,
            mid,
            lo,
            mid,
            mid + 1,
            hi
        );
        t.emit(SortKind::Divide, 3, description, |s| {
            s.range = Some((lo, hi));
            s.boundary = Some(mid);
            s.depth = depth;
        })?;

        Self::sort(t, lo, mid, depth + 1)?;
        Self::sort(t, mid + 1, hi, depth + 1)?;
        Self::merge(t, lo, mid, hi, depth)
    }

    fn merge(
        t: &mut SortTracer,
        lo: usize,
        mid: usize,
        hi: usize,
        depth: usize,
    ) -> Result<(), RunnerError> {
        let mut view = MergeView {
            lo,
            mid,
            hi,
            left: t.array[lo..=mid].to_vec(),
            right: t.array[mid + 1..=hi].to_vec(),
            ..MergeView::default()
        };

        let description = format!("Merge {:?} and {:?}", view.left, view.right);
        let snapshot = view.clone();
        t.emit(SortKind::Merge, 8, description, |s| {
            s.range = Some((lo, hi));
            s.boundary = Some(mid);
            s.depth = depth;
            s.merge = Some(snapshot);
        })?;

        let mut k = lo;
        while view.left_cursor < view.left.len() || view.right_cursor < view.right.len() {
            let (take_left, compared) =
                match (view.left.get(view.left_cursor), view.right.get(view.right_cursor)) {
                    (Some(&l), Some(&r)) => {
                        let description = format!("Compare left {} with right {}", l, r);
                        let snapshot = view.clone();
                        t.emit(SortKind::Compare, 10, description, |s| {
                            s.compared =
                                vec![lo + snapshot.left_cursor, mid + 1 + snapshot.right_cursor];
                            s.values = vec![l, r];
                            s.range = Some((lo, hi));
                            s.depth = depth;
                            s.merge = Some(snapshot);
                        })?;
                        (l <= r, true)
                    }
                    (Some(_), None) => (true, false),
                    _ => (false, false),
                };

            let value = if take_left {
                view.left_cursor += 1;
                view.left[view.left_cursor - 1]
            } else {
                view.right_cursor += 1;
                view.right[view.right_cursor - 1]
            };
            let code_line = match (compared, take_left) {
                (false, _) => 12,
                (true, true) => 10,
                (true, false) => 11,
            };
            view.output.push(value);
            t.array[k] = value;

            let side = if take_left { "left" } else { "right" };
            let description = format!("Write {} from the {} half into A[{}]", value, side, k);
            let snapshot = view.clone();
            t.emit(SortKind::Write, code_line, description, |s| {
                s.written = vec![k];
                s.range = Some((lo, hi));
                s.depth = depth;
                s.merge = Some(snapshot);
            })?;
            k += 1;
        }
        Ok(())
    }
}

impl Runner for MergeSort {
    type Input = ArrayInput;

    const ID: &'static str = "merge-sort";
    const NAME: &'static str = "Merge Sort";
    const CATEGORY: Category = Category::Sorting;
    const PSEUDOCODE: &'static [&'static str] = &[
        "procedure mergeSort(A, lo, hi)",
        "  if lo >= hi: return",
        "  mid = (lo + hi) / 2",
        "  mergeSort(A, lo, mid)",
        "  mergeSort(A, mid + 1, hi)",
        "  merge(A, lo, mid, hi)",
        "procedure merge(A, lo, mid, hi)",
        "  L = A[lo..mid], R = A[mid+1..hi]",
        "  while L and R are not exhausted",
        "    if L[i] <= R[j]: A[k] = L[i]",
        "    else: A[k] = R[j]",
        "  copy remaining elements into A",
    ];

    fn initial_input(&self) -> ArrayInput {
        sample_array()
    }

    fn validate_input(&self, input: &ArrayInput) -> Result<(), InvalidInput> {
        validate_array(&input.array)
    }

    fn generate_steps_with(
        &self,
        input: &ArrayInput,
        limits: &Limits,
    ) -> Result<Trace, RunnerError> {
        let mut t = SortTracer::new(&input.array, limits);
        t.init(1)?;
        if !input.array.is_empty() {
            Self::sort(&mut t, 0, input.array.len() - 1, 0)?;
        }
        t.complete(6)
    }
}

/// Quick sort with Lomuto partitioning around the last element
pub struct QuickSort;

impl QuickSort {
    /// Sort the half-open range `lo..hi`
    fn sort(t: &mut SortTracer, lo: usize, hi: usize, depth: usize) -> Result<(), RunnerError> {
        if hi <= lo {
            return Ok(());
        }
        if hi - lo == 1 {
            return t.mark_sorted(lo, 2);
        }

        let p = Self::partition(t, lo, hi, depth)?;
        Self::sort(t, lo, p, depth + 1)?;
        Self::sort(t, p + 1, hi, depth + 1)
    }

    fn partition(
        t: &mut SortTracer,
        lo: usize,
        hi: usize,
        depth: usize,
    ) -> Result<usize, RunnerError> {
        let last = hi - 1;
        let pivot = t.array[last];
        let description = format!("Choose pivot A[{}] = {} for A[{}..{}]", last, pivot, lo, last);
        t.emit(SortKind::Pivot, 7, description, |s| {
            s.pivot = Some(last);
            s.range = Some((lo, last));
            s.depth = depth;
        })?;

        let mut i = lo;
        for j in lo..last {
            let x = t.array[j];
            let description = format!("Compare A[{}] = {} with pivot {}", j, x, pivot);
            t.emit(SortKind::Compare, 10, description, |s| {
                s.compared = vec![j, last];
                s.values = vec![x, pivot];
                s.pivot = Some(last);
                s.range = Some((lo, last));
                s.boundary = Some(i);
                s.depth = depth;
            })?;
            if x < pivot {
                if i != j {
                    t.array.swap(i, j);
                    let description =
                        format!("Swap A[{}] and A[{}] to grow the smaller side", i, j);
                    let boundary = i + 1;
                    t.emit(SortKind::Swap, 11, description, |s| {
                        s.written = vec![i, j];
                        s.pivot = Some(last);
                        s.range = Some((lo, last));
                        s.boundary = Some(boundary);
                        s.depth = depth;
                    })?;
                }
                i += 1;
            }
        }

        if i != last {
            t.array.swap(i, last);
            let description = format!("Move pivot {} into A[{}]", pivot, i);
            t.emit(SortKind::Swap, 12, description, |s| {
                s.written = vec![i, last];
                s.pivot = Some(i);
                s.range = Some((lo, last));
                s.boundary = Some(i);
                s.depth = depth;
            })?;
        }

        t.sorted[i] = true;
        let left = (i > lo).then(|| (lo, i - 1));
        let right = (i < last).then(|| (i + 1, last));
        let describe = |side: Option<(usize, usize)>| {
            side.map_or_else(|| "nothing".to_string(), |(a, b)| format!("A[{}..{}]", a, b))
        };
        let description = format!(
            "Pivot {} settles at A[{}]; left {}, right {}",
            pivot,
            i,
            describe(left),
            describe(right)
        );
        t.emit(SortKind::Partition, 13, description, |s| {
            s.pivot = Some(i);
            s.range = Some((lo, last));
            s.boundary = Some(i);
            s.left = left;
            s.right = right;
            s.depth = depth;
        })?;
        Ok(i)
    }
}

impl Runner for QuickSort {
    type Input = ArrayInput;

    const ID: &'static str = "quick-sort";
    const NAME: &'static str = "Quick Sort";
    const CATEGORY: Category = Category::Sorting;
    const PSEUDOCODE: &'static [&'static str] = &[
        "procedure quickSort(A, lo, hi)",
        "  if lo < hi",
        "    p = partition(A, lo, hi)",
        "    quickSort(A, lo, p - 1)",
        "    quickSort(A, p + 1, hi)",
        "procedure partition(A, lo, hi)",
        "  pivot = A[hi]",
        "  i = lo",
        "  for j = lo to hi - 1",
        "    if A[j] < pivot",
        "      swap(A[i], A[j]); i = i + 1",
        "  swap(A[i], A[hi])",
        "  return i",
    ];

    fn initial_input(&self) -> ArrayInput {
        sample_array()
    }

    fn validate_input(&self, input: &ArrayInput) -> Result<(), InvalidInput> {
        validate_array(&input.array)
    }

    fn generate_steps_with(
        &self,
        input: &ArrayInput,
        limits: &Limits,
    ) -> Result<Trace, RunnerError> {
        let mut t = SortTracer::new(&input.array, limits);
        t.init(1)?;
        Self::sort(&mut t, 0, input.array.len(), 0)?;
        t.complete(1)
    }
}
