// Behaviour of individual runners on fixed inputs

use algostep::runners::backtracking::hanoi::{Hanoi, HanoiInput};
use algostep::runners::backtracking::knights_tour::{KnightsTour, TourInput};
use algostep::runners::backtracking::maze::{MazeInput, RatMaze};
use algostep::runners::backtracking::nqueens::{NQueens, QueensInput};
use algostep::runners::backtracking::sudoku::{is_solved, SudokuSolver};
use algostep::runners::bellman_ford::{BellmanFord, BellmanFordInput, WeightedEdge};
use algostep::runners::closest_pair::{ClosestPair, ClosestPairInput, Point};
use algostep::runners::dp::fibonacci::{Fibonacci, FibonacciInput};
use algostep::runners::dp::knapsack::{Item, Knapsack01, KnapsackInput, MAX_VALUE};
use algostep::runners::dp::lcs::{LcsInput, LongestCommonSubsequence};
use algostep::runners::graph::{BreadthFirstSearch, DepthFirstSearch};
use algostep::runners::greedy::{
    FractionalKnapsack, ItemStatus, MergeInput, OptimalMerge, MAX_FILE_SIZE,
};
use algostep::runners::searching::{BinarySearch, LinearSearch, SearchInput};
use algostep::runners::sorting::{ArrayInput, QuickSort};
use algostep::runners::Runner;
use algostep::step::Trace;

fn run<R: Runner>(runner: R, input: &R::Input) -> Trace {
    runner
        .validate_input(input)
        .expect("input should validate");
    runner.generate_steps(input).expect("generation failed")
}

fn run_default<R: Runner>(runner: R) -> Trace {
    let input = runner.initial_input();
    run(runner, &input)
}

#[test]
fn test_closest_pair_three_points() {
    let point = |x, y, id| Point { x, y, id };
    let input = ClosestPairInput {
        points: vec![point(0.0, 0.0, 0), point(3.0, 4.0, 1), point(0.0, 1.0, 2)],
    };
    let trace = run(ClosestPair, &input);

    assert_eq!(trace.count_kind("compare"), 3);
    let last = trace.last().unwrap();
    assert_eq!(last.kind, "complete");
    let state = last.payload.as_closest_pair().unwrap();
    assert_eq!(state.min_distance, Some(1.0));
    let (a, b) = state.closest_pair.unwrap();
    assert_eq!((a.id, b.id), (0, 2));
    assert_eq!(state.checked_pairs, vec![(0, 1), (0, 2), (1, 2)]);
}

#[test]
fn test_closest_pair_keeps_first_of_equal_pairs() {
    let point = |x, y, id| Point { x, y, id };
    let input = ClosestPairInput {
        points: vec![point(0.0, 0.0, 0), point(1.0, 0.0, 1), point(2.0, 0.0, 2)],
    };
    let trace = run(ClosestPair, &input);
    let state = trace.last().unwrap().payload.as_closest_pair().unwrap();

    let (a, b) = state.closest_pair.unwrap();
    assert_eq!((a.id, b.id), (0, 1));
    assert_eq!(trace.count_kind("new-minimum"), 1);
}

#[test]
fn test_hanoi_three_disks() {
    let trace = run(Hanoi, &HanoiInput { num_disks: 3 });

    assert_eq!(trace.count_kind("move"), 7);
    assert_eq!(trace.len(), 22);
    let state = trace.last().unwrap().payload.as_hanoi().unwrap();
    assert!(state.rods[0].is_empty());
    assert!(state.rods[1].is_empty());
    assert_eq!(state.rods[2], vec![3, 2, 1]);
    assert!(state.call_stack.is_empty());
}

#[test]
fn test_hanoi_depth_follows_call_stack() {
    let trace = run(Hanoi, &HanoiInput { num_disks: 4 });

    assert_eq!(trace.count_kind("move"), 15);
    for step in &trace {
        let state = step.payload.as_hanoi().unwrap();
        if step.kind == "move" || step.kind == "base-case" {
            assert_eq!(state.call_stack.len(), state.recursion_depth + 1);
        }
        let disks: usize = state.rods.iter().map(Vec::len).sum();
        assert_eq!(disks, 4);
        for rod in &state.rods {
            assert!(rod.windows(2).all(|w| w[0] > w[1]), "larger disk on a smaller one");
        }
    }
}

#[test]
fn test_fractional_knapsack_sample() {
    let trace = run_default(FractionalKnapsack);

    let kinds = trace.kinds();
    assert_eq!(&kinds[..3], &["init", "calculate-ratios", "sort"]);
    assert_eq!(trace.count_kind("take-full"), 2);
    assert_eq!(trace.count_kind("take-partial"), 1);

    let state = trace.last().unwrap().payload.as_fractional().unwrap();
    assert!((state.total_value - 240.0).abs() < 1e-9);
    assert_eq!(state.remaining_capacity, 0.0);
    let partial = state
        .items
        .iter()
        .find(|item| item.status == ItemStatus::Partial)
        .unwrap();
    assert_eq!(partial.index, 2);
    assert!((partial.fraction - 2.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_optimal_merge_sample() {
    let trace = run_default(OptimalMerge);

    assert_eq!(trace.count_kind("merge"), 4);
    let state = trace.last().unwrap().payload.as_merge().unwrap();
    assert_eq!(state.total_cost, 45);
    assert_eq!(state.heap, vec![20]);
    let originals = &state.nodes[..5];
    assert!(originals.iter().all(|node| node.merged));
    let results: Vec<u64> = state.merge_history.iter().map(|m| m.result).collect();
    assert_eq!(results, vec![5, 9, 11, 20]);
}

#[test]
fn test_optimal_merge_single_file() {
    let trace = run(OptimalMerge, &MergeInput { file_sizes: vec![7] });

    assert_eq!(trace.kinds(), vec!["init", "complete"]);
    assert_eq!(trace.last().unwrap().payload.as_merge().unwrap().total_cost, 0);
}

#[test]
fn test_optimal_merge_rejects_huge_sizes() {
    let input = MergeInput {
        file_sizes: vec![u64::MAX, 1],
    };
    assert!(OptimalMerge.validate_input(&input).is_err());

    let trace = run(
        OptimalMerge,
        &MergeInput {
            file_sizes: vec![MAX_FILE_SIZE; 12],
        },
    );
    assert_eq!(trace.last().unwrap().kind, "complete");
}

#[test]
fn test_binary_search_sample() {
    let trace = run_default(BinarySearch);

    // ceil(log2(10)) = 4
    assert!(trace.count_kind("compare") <= 4);
    let last = trace.last().unwrap();
    assert_eq!(last.kind, "found");
    assert_eq!(last.payload.as_search().unwrap().found, Some(4));
}

#[test]
fn test_binary_search_missing_target() {
    let input = SearchInput {
        array: vec![1, 3, 5, 7],
        target: 4,
    };
    let trace = run(BinarySearch, &input);

    let last = trace.last().unwrap();
    assert_eq!(last.kind, "not-found");
    assert_eq!(last.payload.as_search().unwrap().found, None);
}

#[test]
fn test_binary_search_bounds_are_inclusive() {
    let input = SearchInput {
        array: vec![1, 3, 5, 7, 9, 11],
        target: 0,
    };
    let trace = run(BinarySearch, &input);

    let bounds: Vec<_> = trace
        .iter()
        .filter(|s| s.kind == "compare")
        .map(|s| {
            let state = s.payload.as_search().unwrap();
            (state.low.unwrap(), state.high.unwrap(), state.mid.unwrap())
        })
        .collect();
    assert_eq!(bounds, vec![(0, 5, 2), (0, 1, 0)]);

    let last = trace.last().unwrap().payload.as_search().unwrap();
    assert_eq!(last.low, Some(0));
    assert_eq!(last.high, None);
}

#[test]
fn test_binary_search_rejects_unsorted() {
    let input = SearchInput {
        array: vec![3, 1, 2],
        target: 1,
    };
    assert!(BinarySearch.validate_input(&input).is_err());
}

#[test]
fn test_linear_search_checks_in_order() {
    let trace = run_default(LinearSearch);

    let last = trace.last().unwrap();
    assert_eq!(last.kind, "found");
    let state = last.payload.as_search().unwrap();
    assert_eq!(state.found, Some(4));
    assert_eq!(state.checked, vec![0, 1, 2, 3, 4]);
    assert_eq!(trace.count_kind("compare"), 5);
}

#[test]
fn test_bfs_and_dfs_orders() {
    let bfs = run_default(BreadthFirstSearch);
    let dfs = run_default(DepthFirstSearch);

    let bfs_state = bfs.last().unwrap().payload.as_graph().unwrap();
    assert_eq!(bfs_state.order, vec![0, 1, 2, 3, 4, 5]);
    let dfs_state = dfs.last().unwrap().payload.as_graph().unwrap();
    assert_eq!(dfs_state.order, vec![0, 1, 3, 5, 4, 2]);
    assert_eq!(dfs.count_kind("visit"), 6);
    assert_eq!(dfs.count_kind("push"), 6);
    assert_eq!(dfs.count_kind("backtrack"), 6);
}

#[test]
fn test_bellman_ford_sample_distances() {
    let input = BellmanFord.initial_input();
    let trace = run(BellmanFord, &input);

    let relaxations = trace.count_kind("relax") + trace.count_kind("no-change");
    assert_eq!(relaxations, (input.vertices - 1) * input.edges.len());
    assert_eq!(trace.count_kind("pass-start"), input.vertices - 1);
    assert_eq!(trace.count_kind("check-edge"), input.edges.len());

    let last = trace.last().unwrap();
    assert_eq!(last.kind, "complete");
    let state = last.payload.as_bellman_ford().unwrap();
    assert_eq!(state.distances, vec![Some(0), Some(2), Some(7), Some(4), Some(-2)]);
    assert_eq!(state.negative_cycle_edge, None);
}

#[test]
fn test_bellman_ford_negative_cycle() {
    let edge = |u, v, weight| WeightedEdge { u, v, weight };
    let input = BellmanFordInput {
        vertices: 3,
        edges: vec![edge(0, 1, 1), edge(1, 2, -1), edge(2, 1, -1)],
        source: 0,
    };
    let trace = run(BellmanFord, &input);

    let last = trace.last().unwrap();
    assert_eq!(last.kind, "negative-cycle-detected");
    assert_eq!(trace.count_kind("complete"), 0);
    assert!(last.payload.as_bellman_ford().unwrap().negative_cycle_edge.is_some());
}

#[test]
fn test_bellman_ford_unreachable_vertex_stays_infinite() {
    let input = BellmanFordInput {
        vertices: 3,
        edges: vec![WeightedEdge { u: 0, v: 1, weight: 4 }],
        source: 0,
    };
    let trace = run(BellmanFord, &input);
    let state = trace.last().unwrap().payload.as_bellman_ford().unwrap();

    assert_eq!(state.distances, vec![Some(0), Some(4), None]);
}

#[test]
fn test_n_queens_four() {
    let trace = run(NQueens, &QueensInput { n: 4 });

    let state = trace.last().unwrap().payload.as_queens().unwrap();
    assert!(state.solved);
    assert_eq!(state.queens, vec![Some(1), Some(3), Some(0), Some(2)]);
    assert!(trace.count_kind("backtrack") > 0);
}

#[test]
fn test_n_queens_three_has_no_solution() {
    let trace = run(NQueens, &QueensInput { n: 3 });

    let last = trace.last().unwrap();
    assert_eq!(last.kind, "complete");
    let state = last.payload.as_queens().unwrap();
    assert!(!state.solved);
    assert!(state.queens.iter().all(Option::is_none));
}

#[test]
fn test_sudoku_default_board() {
    let input = SudokuSolver.initial_input();
    let trace = run(SudokuSolver, &input);

    let state = trace.last().unwrap().payload.as_sudoku().unwrap();
    assert!(state.solved);
    assert!(is_solved(&state.board));
    for (r, row) in input.board.iter().enumerate() {
        for (c, &clue) in row.iter().enumerate() {
            if clue != 0 {
                assert_eq!(state.board[r][c], clue, "clue at ({}, {}) changed", r, c);
                assert!(state.given[r][c]);
            }
        }
    }
}

#[test]
fn test_sudoku_rejects_conflicting_clues() {
    let mut input = SudokuSolver.initial_input();
    input.board[0][2] = 5; // row 0 already holds a 5
    assert!(SudokuSolver.validate_input(&input).is_err());

    let mut short = SudokuSolver.initial_input();
    short.board.pop();
    assert!(SudokuSolver.validate_input(&short).is_err());
}

#[test]
fn test_rat_maze_default_path() {
    let input = RatMaze.initial_input();
    let trace = run(RatMaze, &input);

    let state = trace.last().unwrap().payload.as_maze().unwrap();
    assert!(state.solved);
    assert_eq!(state.path.first(), Some(&(0, 0)));
    assert_eq!(state.path.last(), Some(&(4, 4)));
    for pair in state.path.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        assert_eq!(a.0.abs_diff(b.0) + a.1.abs_diff(b.1), 1);
    }
    assert!(state.path.iter().all(|&(r, c)| input.maze[r][c] == 1));
}

#[test]
fn test_rat_maze_blocked() {
    let input = MazeInput {
        maze: vec![vec![1, 0], vec![0, 1]],
    };
    let trace = run(RatMaze, &input);

    assert!(!trace.last().unwrap().payload.as_maze().unwrap().solved);
    assert_eq!(trace.count_kind("move"), 0);
}

#[test]
fn test_knights_tour_five_by_five() {
    let input = TourInput {
        size: 5,
        start_row: 0,
        start_col: 0,
    };
    let trace = run(KnightsTour, &input);

    let state = trace.last().unwrap().payload.as_tour().unwrap();
    assert!(state.solved);

    let mut squares = vec![(0, 0); 25];
    for (r, row) in state.board.iter().enumerate() {
        for (c, k) in row.iter().enumerate() {
            squares[k.expect("unvisited square")] = (r, c);
        }
    }
    assert_eq!(squares[0], (0, 0));
    for pair in squares.windows(2) {
        let dr = pair[0].0.abs_diff(pair[1].0);
        let dc = pair[0].1.abs_diff(pair[1].1);
        assert!((dr, dc) == (1, 2) || (dr, dc) == (2, 1));
    }
}

#[test]
fn test_knights_tour_every_valid_start_completes() {
    for size in 5..=8 {
        for start_row in 0..size {
            for start_col in 0..size {
                let input = TourInput {
                    size,
                    start_row,
                    start_col,
                };
                if KnightsTour.validate_input(&input).is_err() {
                    continue;
                }
                let trace = run(KnightsTour, &input);
                let last = trace.last().unwrap();
                let start = (start_row, start_col);
                assert_eq!(last.kind, "complete", "{}x{} from {:?}", size, size, start);
                assert!(last.payload.as_tour().unwrap().solved);
            }
        }
    }
}

#[test]
fn test_knights_tour_skips_stranding_jumps() {
    let input = TourInput {
        size: 7,
        start_row: 2,
        start_col: 2,
    };
    let trace = run(KnightsTour, &input);
    assert!(trace.last().unwrap().payload.as_tour().unwrap().solved);

    for step in trace.iter().filter(|s| s.kind == "try-move") {
        let state = step.payload.as_tour().unwrap();
        if state.stranded.is_some() {
            assert_eq!(state.valid, Some(false));
        }
    }
}

#[test]
fn test_knights_tour_rejects_odd_colour_start() {
    let input = TourInput {
        size: 5,
        start_row: 0,
        start_col: 1,
    };
    assert!(KnightsTour.validate_input(&input).is_err());
}

#[test]
fn test_fibonacci_ten() {
    let trace = run(Fibonacci, &FibonacciInput { n: 10 });

    let last = trace.last().unwrap();
    let state = last.payload.as_fibonacci().unwrap();
    assert_eq!(state.value, Some(55));
    assert!(trace.count_kind("memo-hit") > 0);
    for step in trace.iter().filter(|s| s.kind == "memo-hit") {
        assert!(step.payload.as_fibonacci().unwrap().from_memo);
    }
    for step in trace.iter().filter(|s| s.kind == "compute") {
        assert!(!step.payload.as_fibonacci().unwrap().from_memo);
    }
}

#[test]
fn test_fibonacci_base_cases() {
    for (n, expected) in [(0, 0), (1, 1)] {
        let trace = run(Fibonacci, &FibonacciInput { n });
        let state = trace.last().unwrap().payload.as_fibonacci().unwrap();
        assert_eq!(state.value, Some(expected));
        assert_eq!(trace.count_kind("memo-hit"), 0);
    }
}

#[test]
fn test_lcs_sample() {
    let trace = run_default(LongestCommonSubsequence);

    assert_eq!(trace.count_kind("match") + trace.count_kind("mismatch"), 7 * 6);
    let state = trace.last().unwrap().payload.as_lcs().unwrap();
    assert_eq!(state.subsequence.chars().count(), 4);
    assert!(is_subsequence(&state.subsequence, "ABCBDAB"));
    assert!(is_subsequence(&state.subsequence, "BDCABA"));
}

#[test]
fn test_lcs_with_empty_string() {
    let input = LcsInput {
        a: String::new(),
        b: "ABC".to_string(),
    };
    let trace = run(LongestCommonSubsequence, &input);

    assert_eq!(trace.first().unwrap().kind, "init");
    assert_eq!(trace.last().unwrap().kind, "complete");
    assert!(trace.last().unwrap().payload.as_lcs().unwrap().subsequence.is_empty());
}

fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let mut rest = haystack.chars();
    needle.chars().all(|c| rest.any(|h| h == c))
}

#[test]
fn test_knapsack_sample() {
    let trace = run_default(Knapsack01);

    assert_eq!(trace.count_kind("fill-cell"), 4 * 7);
    let state = trace.last().unwrap().payload.as_knapsack().unwrap();
    assert_eq!(state.best_value, Some(9));
    assert_eq!(state.selected, vec![1, 2]);
}

#[test]
fn test_knapsack_rejects_huge_values() {
    let input = KnapsackInput {
        items: vec![
            Item {
                weight: 1,
                value: u64::MAX,
            },
            Item {
                weight: 1,
                value: 1,
            },
        ],
        capacity: 2,
    };
    assert!(Knapsack01.validate_input(&input).is_err());

    let input = KnapsackInput {
        items: vec![
            Item {
                weight: 1,
                value: MAX_VALUE,
            };
            8
        ],
        capacity: 30,
    };
    let trace = run(Knapsack01, &input);
    let state = trace.last().unwrap().payload.as_knapsack().unwrap();
    assert_eq!(state.best_value, Some(8 * MAX_VALUE));
}

#[test]
fn test_quick_sort_partition_reports_sub_ranges() {
    let input = ArrayInput {
        array: vec![3, 7, 1, 5],
    };
    let trace = run(QuickSort, &input);

    let first = trace.iter().find(|s| s.kind == "partition").unwrap();
    let state = first.payload.as_array().unwrap();
    assert_eq!(state.array, vec![3, 1, 5, 7]);
    assert_eq!(state.pivot, Some(2));
    assert_eq!(state.left, Some((0, 1)));
    assert_eq!(state.right, Some((3, 3)));

    let value = serde_json::to_value(first).unwrap();
    assert_eq!(value["payload"]["left"], serde_json::json!([0, 1]));

    for step in trace.iter().filter(|s| s.kind == "partition") {
        let state = step.payload.as_array().unwrap();
        let (lo, hi) = state.range.unwrap();
        let pivot = state.pivot.unwrap();
        if let Some((a, b)) = state.left {
            assert_eq!((a, b + 1), (lo, pivot));
        }
        if let Some((a, b)) = state.right {
            assert_eq!((a - 1, b), (pivot, hi));
        }
    }
}
