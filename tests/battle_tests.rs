// Battle engine and arena tests

use algostep::battle::arena::{
    generate_pair, Arena, BattleError, BattleInputs, BattleSetup, DataShape,
};
use algostep::battle::{BattleEngine, ExecutionState, Side, Winner};
use algostep::config::Limits;
use algostep::registry::Registry;
use algostep::runners::backtracking::hanoi::{Hanoi, HanoiInput};
use algostep::runners::errors::RegistryError;
use algostep::runners::Runner;
use algostep::step::Trace;

/// Hanoi traces make convenient fixtures: 1, 2 and 3 disks give 4, 10 and 22 steps
fn hanoi(num_disks: usize) -> Trace {
    Hanoi
        .generate_steps(&HanoiInput { num_disks })
        .unwrap()
}

fn setup(algo_a: &str, algo_b: &str) -> BattleSetup {
    BattleSetup {
        algo_a: algo_a.to_string(),
        algo_b: algo_b.to_string(),
        ..BattleSetup::default()
    }
}

#[test]
fn test_fixture_lengths() {
    assert_eq!(hanoi(1).len(), 4);
    assert_eq!(hanoi(2).len(), 10);
    assert_eq!(hanoi(3).len(), 22);
}

#[test]
fn test_shorter_trace_wins() {
    let mut engine = BattleEngine::new(hanoi(1), hanoi(2));
    assert_eq!(engine.state(), ExecutionState::Idle);

    engine.run();
    assert_eq!(engine.state(), ExecutionState::Running);

    for _ in 0..2 {
        assert!(engine.tick());
    }
    assert_eq!(engine.winner(), None);

    assert!(engine.tick());
    assert_eq!(engine.winner(), Some(Winner::A));
    assert!(engine.is_done(Side::A));
    assert_eq!(engine.state(), ExecutionState::Running);

    while engine.tick() {}
    assert_eq!(engine.ticks(), 9);
    assert_eq!(engine.state(), ExecutionState::Finished);
    assert_eq!(engine.winner(), Some(Winner::A));
    assert_eq!(engine.cursor(Side::A), 3);
    assert_eq!(engine.cursor(Side::B), 9);
    assert_eq!(engine.progress(Side::B), 1.0);

    // Finished engines ignore further input
    assert!(!engine.tick());
    assert!(!engine.step());
    engine.run();
    assert_eq!(engine.state(), ExecutionState::Finished);
}

#[test]
fn test_side_b_can_win() {
    let mut engine = BattleEngine::new(hanoi(3), hanoi(2));
    assert_eq!(engine.run_to_end(), Some(Winner::B));
    assert_eq!(engine.ticks(), 21);
}

#[test]
fn test_equal_traces_tie() {
    let mut engine = BattleEngine::new(hanoi(2), hanoi(2));
    assert_eq!(engine.run_to_end(), Some(Winner::Tie));
    assert_eq!(engine.ticks(), 9);
    assert_eq!(engine.state(), ExecutionState::Finished);
}

#[test]
fn test_tick_only_moves_while_running() {
    let mut engine = BattleEngine::new(hanoi(1), hanoi(2));
    assert!(!engine.tick());
    assert_eq!(engine.cursor(Side::A), 0);

    engine.run();
    engine.tick();
    engine.pause();
    assert_eq!(engine.state(), ExecutionState::Paused);
    assert!(!engine.tick());
    assert_eq!(engine.cursor(Side::A), 1);

    engine.toggle();
    assert_eq!(engine.state(), ExecutionState::Running);
    engine.toggle();
    assert_eq!(engine.state(), ExecutionState::Paused);
}

#[test]
fn test_manual_step_pauses() {
    let mut engine = BattleEngine::new(hanoi(1), hanoi(2));
    engine.run();
    assert!(engine.step());
    assert_eq!(engine.state(), ExecutionState::Paused);
    assert_eq!(engine.cursor(Side::A), 1);
    assert_eq!(engine.cursor(Side::B), 1);
}

#[test]
fn test_reset_restores_start() {
    let mut engine = BattleEngine::new(hanoi(1), hanoi(2));
    engine.run_to_end();

    engine.reset();
    assert_eq!(engine.state(), ExecutionState::Idle);
    assert_eq!(engine.winner(), None);
    assert_eq!(engine.ticks(), 0);
    assert_eq!(engine.cursor(Side::A), 0);
    assert_eq!(engine.cursor(Side::B), 0);
    assert_eq!(engine.current_step(Side::A).unwrap().kind, "init");

    let status = engine.status();
    assert_eq!(status.current_step_index_a, 0);
    assert_eq!(status.progress_a, 0.0);
    assert_eq!(status.execution_state, ExecutionState::Idle);
}

#[test]
fn test_empty_trace_never_moves() {
    let mut engine = BattleEngine::new(Trace::new(10), hanoi(1));
    assert!(!engine.is_ready());

    engine.run();
    assert_eq!(engine.state(), ExecutionState::Idle);
    assert!(!engine.step());
    assert_eq!(engine.run_to_end(), None);
    assert_eq!(engine.progress(Side::A), 0.0);
    assert_eq!(engine.progress(Side::B), 0.0);
    assert!(engine.current_step(Side::A).is_none());
}

#[test]
fn test_load_replaces_traces() {
    let mut engine = BattleEngine::new(hanoi(1), hanoi(1));
    engine.run_to_end();

    engine.load(hanoi(2), hanoi(1));
    assert_eq!(engine.state(), ExecutionState::Idle);
    assert_eq!(engine.trace(Side::A).len(), 10);
    assert_eq!(engine.run_to_end(), Some(Winner::B));
}

#[test]
fn test_inputs_are_seeded() {
    let first = BattleInputs::generate(20, DataShape::Random, 7);
    let second = BattleInputs::generate(20, DataShape::Random, 7);
    assert_eq!(first, second);

    let other = BattleInputs::generate(20, DataShape::Random, 8);
    assert_ne!(first.array, other.array);
}

#[test]
fn test_data_shapes() {
    let sorted = BattleInputs::generate(15, DataShape::Sorted, 3).array.array;
    assert_eq!(sorted.len(), 15);
    assert!(sorted.windows(2).all(|w| w[0] <= w[1]));

    let reversed = BattleInputs::generate(15, DataShape::Reversed, 3).array.array;
    assert!(reversed.windows(2).all(|w| w[0] >= w[1]));

    let random = BattleInputs::generate(15, DataShape::Random, 3).array.array;
    assert!(random.iter().all(|v| (1..=100).contains(v)));
}

#[test]
fn test_search_target_is_in_sorted_array() {
    let inputs = BattleInputs::generate(25, DataShape::Random, 11);
    assert!(inputs.search.array.windows(2).all(|w| w[0] <= w[1]));
    assert!(inputs.search.array.contains(&inputs.search.target));

    let mut expected = inputs.array.array.clone();
    expected.sort_unstable();
    assert_eq!(inputs.search.array, expected);
}

#[test]
fn test_same_seed_gives_same_traces() {
    let registry = Registry::standard();
    let limits = Limits::default();
    let setup = setup("insertion-sort", "merge-sort");

    let first = generate_pair(&registry, &setup, &limits).unwrap();
    let second = generate_pair(&registry, &setup, &limits).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_mixed_categories_can_battle() {
    for (a, b) in [
        ("linear-search", "binary-search"),
        ("bfs", "dfs"),
        ("bellman-ford", "quick-sort"),
    ] {
        let mut arena = Arena::new(Registry::standard(), Limits::default(), setup(a, b)).unwrap();
        assert!(arena.engine_mut().run_to_end().is_some(), "{} vs {}", a, b);
    }
}

#[test]
fn test_unsupported_category_is_rejected() {
    let err = Arena::new(Registry::standard(), Limits::default(), setup("hanoi", "bubble-sort"))
        .err()
        .unwrap();
    match err {
        BattleError::Unsupported { id, category } => {
            assert_eq!(id, "hanoi");
            assert_eq!(category, "backtracking");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_size_out_of_range_is_rejected() {
    for size in [4, 51] {
        let battle = BattleSetup {
            size,
            ..BattleSetup::default()
        };
        let err = Arena::new(Registry::standard(), Limits::default(), battle)
            .err()
            .unwrap();
        assert!(matches!(err, BattleError::InvalidSize(s) if s == size));
    }
}

#[test]
fn test_unknown_runner_is_registry_error() {
    let err = Arena::new(Registry::standard(), Limits::default(), setup("bubble-sort", "nope"))
        .err()
        .unwrap();
    assert!(matches!(
        err,
        BattleError::Registry(RegistryError::NotFound(ref id)) if id == "nope"
    ));
}

#[test]
fn test_failed_reconfigure_keeps_previous_battle() {
    let mut arena =
        Arena::new(Registry::standard(), Limits::default(), BattleSetup::default()).unwrap();
    let before = arena.engine().trace(Side::A).clone();

    assert!(arena.reconfigure(setup("bubble-sort", "sudoku-solver")).is_err());
    assert_eq!(arena.setup(), &BattleSetup::default());
    assert_eq!(arena.engine().trace(Side::A), &before);

    let next = BattleSetup {
        seed: 5,
        ..BattleSetup::default()
    };
    arena.reconfigure(next.clone()).unwrap();
    assert_eq!(arena.setup(), &next);
    assert_eq!(arena.engine().state(), ExecutionState::Idle);
}
