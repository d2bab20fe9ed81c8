// Registry lookup and the JSON entry points

use algostep::config::Limits;
use algostep::registry::Registry;
use algostep::runners::errors::{RegistryError, RunnerError};
use algostep::runners::Category;
use serde_json::json;

const ALL_IDS: [&str; 21] = [
    "bubble-sort",
    "selection-sort",
    "insertion-sort",
    "merge-sort",
    "quick-sort",
    "linear-search",
    "binary-search",
    "bfs",
    "dfs",
    "bellman-ford",
    "hanoi",
    "n-queens",
    "sudoku-solver",
    "rat-maze",
    "knights-tour",
    "knapsack-01",
    "lcs",
    "fibonacci",
    "fractional-knapsack",
    "optimal-merge",
    "closest-pair",
];

#[test]
fn test_every_id_resolves() {
    let registry = Registry::standard();
    assert_eq!(registry.len(), ALL_IDS.len());
    assert_eq!(registry.ids(), ALL_IDS.to_vec());

    for id in ALL_IDS {
        let runner = registry.get(id).unwrap();
        assert_eq!(runner.id(), id);
        assert!(!runner.name().is_empty());
        assert!(!runner.pseudocode().is_empty(), "{} has no pseudocode", id);
    }
}

#[test]
fn test_unknown_id_is_not_found() {
    let registry = Registry::standard();
    let err = registry.get("bogo-sort").err().unwrap();
    assert_eq!(err, RegistryError::NotFound("bogo-sort".to_string()));
    assert_eq!(err.to_string(), "no runner found for 'bogo-sort'");
    assert!(!registry.contains("bogo-sort"));
}

#[test]
fn test_default_inputs_produce_complete_traces() {
    let registry = Registry::standard();
    let limits = Limits::default();

    for runner in registry.iter() {
        let input = runner.default_input();
        runner
            .validate(&input)
            .unwrap_or_else(|e| panic!("{} rejects its own default: {}", runner.id(), e));

        let trace = runner.generate(&input, &limits).unwrap();
        assert_eq!(trace.first().unwrap().kind, "init", "{}", runner.id());
        assert!(trace.last().unwrap().is_terminal(), "{}", runner.id());

        let terminal = trace.iter().filter(|step| step.is_terminal()).count();
        assert_eq!(terminal, 1, "{} has {} terminal steps", runner.id(), terminal);
    }
}

#[test]
fn test_default_traces_are_byte_identical_across_runs() {
    let registry = Registry::standard();
    let limits = Limits::default();

    for runner in registry.iter() {
        let input = runner.default_input();
        let first = runner.generate(&input, &limits).unwrap();
        let second = runner.generate(&input, &limits).unwrap();

        let first = serde_json::to_string(first.steps()).unwrap();
        let second = serde_json::to_string(second.steps()).unwrap();
        assert_eq!(first, second, "{} is not deterministic", runner.id());
    }
}

#[test]
fn test_steps_serialize_with_camel_case_keys() {
    let registry = Registry::standard();
    let runner = registry.get("bubble-sort").unwrap();
    let trace = runner
        .generate(&runner.default_input(), &Limits::default())
        .unwrap();

    let value = serde_json::to_value(trace.first().unwrap()).unwrap();
    assert_eq!(value["kind"], "init");
    assert!(value["codeLine"].is_u64());
    assert!(value["description"].is_string());
    assert_eq!(value["payload"]["array"], json!([64, 34, 25, 12, 22, 11, 90, 5]));
}

#[test]
fn test_malformed_input_is_rejected() {
    let registry = Registry::standard();
    let runner = registry.get("quick-sort").unwrap();

    let err = runner
        .generate(&json!({ "array": "not an array" }), &Limits::default())
        .unwrap_err();
    assert!(matches!(err, RunnerError::MalformedInput(_)));

    let err = runner.validate(&json!({ "values": [1, 2] })).unwrap_err();
    assert!(matches!(err, RunnerError::MalformedInput(_)));
}

#[test]
fn test_oversized_array_is_invalid() {
    let registry = Registry::standard();
    let runner = registry.get("merge-sort").unwrap();
    let input = json!({ "array": vec![1; 51] });

    match runner.generate(&input, &Limits::default()) {
        Err(RunnerError::InvalidInput(reason)) => {
            assert!(reason.reason().contains("50"), "{}", reason)
        }
        other => panic!("expected InvalidInput, got {:?}", other.map(|t| t.len())),
    }
}

#[test]
fn test_step_limit_is_reported() {
    let registry = Registry::standard();
    let runner = registry.get("bubble-sort").unwrap();

    let err = runner
        .generate(&runner.default_input(), &Limits::new(10))
        .unwrap_err();
    assert!(matches!(err, RunnerError::StepLimitExceeded { limit: 10 }));
    assert_eq!(err.to_string(), "step limit exceeded: trace reached 10 steps");
}

#[test]
fn test_by_category_groups_runners() {
    let registry = Registry::standard();

    let sorting: Vec<_> = registry.by_category(Category::Sorting).map(|r| r.id()).collect();
    assert_eq!(sorting, ALL_IDS[..5].to_vec());

    let dp: Vec<_> = registry
        .by_category(Category::DynamicProgramming)
        .map(|r| r.id())
        .collect();
    assert_eq!(dp, vec!["knapsack-01", "lcs", "fibonacci"]);

    assert_eq!(registry.by_category(Category::Backtracking).count(), 5);
    assert_eq!(registry.by_category(Category::WeightedGraph).count(), 1);
    assert_eq!(registry.by_category(Category::Geometry).count(), 1);
}
