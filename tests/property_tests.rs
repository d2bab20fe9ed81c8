// Property tests over generated inputs

use algostep::config::Limits;
use algostep::registry::Registry;
use algostep::runners::errors::RunnerError;
use algostep::runners::searching::{BinarySearch, SearchInput};
use algostep::runners::sorting::{
    ArrayInput, BubbleSort, InsertionSort, MergeSort, QuickSort, SelectionSort, MAX_ARRAY_LEN,
};
use algostep::runners::Runner;
use algostep::step::Trace;
use proptest::prelude::*;
use serde_json::json;

const SORTING_IDS: [&str; 5] = [
    "bubble-sort",
    "selection-sort",
    "insertion-sort",
    "merge-sort",
    "quick-sort",
];

fn sort_all(array: &[i64]) -> Vec<Trace> {
    let input = ArrayInput {
        array: array.to_vec(),
    };
    vec![
        BubbleSort.generate_steps(&input).unwrap(),
        SelectionSort.generate_steps(&input).unwrap(),
        InsertionSort.generate_steps(&input).unwrap(),
        MergeSort.generate_steps(&input).unwrap(),
        QuickSort.generate_steps(&input).unwrap(),
    ]
}

fn arrays() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-100i64..100, 0..=MAX_ARRAY_LEN)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn sorting_result_is_sorted_permutation(array in arrays()) {
        let mut expected = array.clone();
        expected.sort_unstable();

        for (trace, id) in sort_all(&array).iter().zip(SORTING_IDS) {
            let last = trace.last().unwrap();
            prop_assert_eq!(last.kind, "complete", "{} did not complete", id);
            let state = last.payload.as_array().unwrap();
            prop_assert_eq!(&state.array, &expected, "{} result is wrong", id);
            prop_assert_eq!(state.sorted.len(), array.len());
        }
    }

    #[test]
    fn first_step_snapshot_is_never_mutated(array in arrays()) {
        for trace in sort_all(&array) {
            let first = trace.first().unwrap();
            prop_assert_eq!(first.kind, "init");
            prop_assert_eq!(&first.payload.as_array().unwrap().array, &array);
        }
    }

    #[test]
    fn swap_based_sorts_hold_a_permutation_at_every_step(
        array in prop::collection::vec(-20i64..20, 0..12),
    ) {
        let mut expected = array.clone();
        expected.sort_unstable();
        let input = ArrayInput { array: array.clone() };
        let traces = [
            BubbleSort.generate_steps(&input).unwrap(),
            SelectionSort.generate_steps(&input).unwrap(),
            QuickSort.generate_steps(&input).unwrap(),
        ];

        for trace in traces {
            for step in &trace {
                let mut values = step.payload.as_array().unwrap().array.clone();
                values.sort_unstable();
                prop_assert_eq!(&values, &expected);
            }
        }
    }

    #[test]
    fn generation_is_deterministic(array in arrays(), pick in 0usize..5) {
        let registry = Registry::standard();
        let runner = registry.get(SORTING_IDS[pick]).unwrap();
        let input = json!({ "array": array });
        let limits = Limits::default();

        let first = runner.generate(&input, &limits).unwrap();
        let second = runner.generate(&input, &limits).unwrap();
        prop_assert_eq!(&first, &second);

        let first_json = serde_json::to_string(first.steps()).unwrap();
        let second_json = serde_json::to_string(second.steps()).unwrap();
        prop_assert_eq!(first_json, second_json);
    }

    #[test]
    fn merge_sort_takes_ties_from_the_left(array in prop::collection::vec(0i64..4, 0..16)) {
        let trace = MergeSort.generate_steps(&ArrayInput { array }).unwrap();
        let steps = trace.steps();

        for (compare, write) in steps.iter().zip(&steps[1..]) {
            if compare.kind != "compare" {
                continue;
            }
            let values = &compare.payload.as_array().unwrap().values;
            if values[0] != values[1] {
                continue;
            }
            let before = compare.payload.as_array().unwrap().merge.clone().unwrap();
            let after = write.payload.as_array().unwrap().merge.clone().unwrap();
            prop_assert_eq!(write.kind, "write");
            prop_assert_eq!(after.left_cursor, before.left_cursor + 1);
            prop_assert_eq!(after.right_cursor, before.right_cursor);
        }
    }

    #[test]
    fn insertion_sort_never_shifts_past_an_equal_key(
        array in prop::collection::vec(0i64..4, 0..16),
    ) {
        let trace = InsertionSort.generate_steps(&ArrayInput { array }).unwrap();
        let steps = trace.steps();

        for (compare, next) in steps.iter().zip(&steps[1..]) {
            if compare.kind != "compare" {
                continue;
            }
            let state = compare.payload.as_array().unwrap();
            if state.values[0] != state.values[1] {
                continue;
            }
            // The key is inserted where it stands instead of shifting its equal left
            prop_assert_eq!(next.kind, "write");
            prop_assert_eq!(next.code_line, 8);
            prop_assert_eq!(&next.payload.as_array().unwrap().written, &vec![state.compared[1]]);
        }
    }

    #[test]
    fn binary_search_finds_or_rejects(
        mut array in prop::collection::vec(0i64..200, 1..=MAX_ARRAY_LEN),
        target in 0i64..200,
    ) {
        array.sort_unstable();
        let input = SearchInput { array: array.clone(), target };
        let trace = BinarySearch.generate_steps(&input).unwrap();

        let bound = (usize::BITS - array.len().leading_zeros()) as usize;
        prop_assert!(trace.count_kind("compare") <= bound);

        for step in trace.iter().filter(|s| s.kind == "compare") {
            let state = step.payload.as_search().unwrap();
            let (low, high) = (state.low.unwrap(), state.high.unwrap());
            prop_assert!(low <= high);
            prop_assert_eq!(state.mid, Some((low + high) / 2));
        }

        let last = trace.last().unwrap();
        match last.payload.as_search().unwrap().found {
            Some(index) => {
                prop_assert_eq!(last.kind, "found");
                prop_assert_eq!(array[index], target);
            }
            None => {
                prop_assert_eq!(last.kind, "not-found");
                prop_assert!(!array.contains(&target));
            }
        }
    }
}

#[test]
fn test_step_limit_stops_generation() {
    let registry = Registry::standard();
    let runner = registry.get("bubble-sort").unwrap();
    let input = json!({ "array": (0..30).rev().collect::<Vec<i64>>() });

    let err = runner.generate(&input, &Limits::new(50)).unwrap_err();
    assert!(matches!(err, RunnerError::StepLimitExceeded { limit: 50 }));
}
