//! Algorithm recommendation wizard
//!
//! A fixed DAG of yes/no style questions. Each answer names the next node;
//! leaves are [`Recommendation`]s, some of which point at a runner in the
//! [`Registry`](crate::registry::Registry).

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use thiserror::Error;

pub const ROOT: &str = "root";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionOption {
    pub label: &'static str,
    pub next: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub question: &'static str,
    pub options: Vec<DecisionOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: &'static str,
    pub algorithm: &'static str,
    pub description: &'static str,
    pub why: &'static str,
    pub why_not: Vec<&'static str>,
    /// Registry id of a runner that visualizes this recommendation
    pub runner: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DecisionNode {
    Question(Question),
    Result(Recommendation),
}

impl DecisionNode {
    pub fn id(&self) -> &'static str {
        match self {
            DecisionNode::Question(q) => q.id,
            DecisionNode::Result(r) => r.id,
        }
    }

    pub fn as_question(&self) -> Option<&Question> {
        match self {
            DecisionNode::Question(q) => Some(q),
            DecisionNode::Result(_) => None,
        }
    }

    pub fn as_result(&self) -> Option<&Recommendation> {
        match self {
            DecisionNode::Result(r) => Some(r),
            DecisionNode::Question(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecisionError {
    #[error("no decision node '{0}'")]
    UnknownNode(String),

    #[error("'{node}' has {available} options, option {option} does not exist")]
    InvalidOption {
        node: String,
        option: usize,
        available: usize,
    },

    #[error("'{0}' is a result and takes no further answers")]
    NotAQuestion(String),
}

pub struct DecisionTree {
    nodes: FxHashMap<&'static str, DecisionNode>,
}

fn question(
    id: &'static str,
    text: &'static str,
    options: &[(&'static str, &'static str)],
) -> DecisionNode {
    DecisionNode::Question(Question {
        id,
        question: text,
        options: options
            .iter()
            .map(|&(label, next)| DecisionOption { label, next })
            .collect(),
    })
}

fn result(
    id: &'static str,
    algorithm: &'static str,
    description: &'static str,
    why: &'static str,
    why_not: &[&'static str],
    runner: Option<&'static str>,
) -> DecisionNode {
    DecisionNode::Result(Recommendation {
        id,
        algorithm,
        description,
        why,
        why_not: why_not.to_vec(),
        runner,
    })
}

impl DecisionTree {
    /// The built-in recommendation tree
    pub fn standard() -> Self {
        let nodes = vec![
            question(ROOT, "What type of problem are you solving?", &[
                ("Sorting (ordering data)", "sorting-root"),
                ("Searching (finding data)", "searching-root"),
                ("Graph (networks, paths)", "graph-root"),
                ("Optimization (max/min)", "optimization-root"),
                ("Recursion (subproblems)", "recursion-root"),
            ]),
            // sorting
            question("sorting-root", "What is the size of your dataset?", &[
                ("Small (< 50 items)", "small-size"),
                ("Large (>= 50 items)", "large-size"),
            ]),
            question("small-size", "Is the data already mostly sorted?", &[
                ("Yes, mostly sorted", "insertion-sort"),
                ("No, random order", "memory-critical-small"),
            ]),
            question("memory-critical-small", "Is memory usage critical?", &[
                ("Yes, need O(1) space", "selection-sort"),
                ("No, speed is more important", "bubble-sort"),
            ]),
            question(
                "large-size",
                "Do you need a stable sort (equal elements keep their order)?",
                &[
                    ("Yes, stability is required", "merge-sort"),
                    ("No, stability does not matter", "memory-check-large"),
                ],
            ),
            question("memory-check-large", "Is memory usage a strict constraint?", &[
                ("Yes, O(1) extra space", "heap-sort"),
                ("No, standard memory available", "quick-sort"),
            ]),
            // searching
            question("searching-root", "Is your data collection sorted?", &[
                ("Yes, it is sorted", "binary-search"),
                ("No, it is unsorted", "searching-frequency"),
            ]),
            question("searching-frequency", "Will you perform many searches on this dataset?", &[
                ("Yes, many searches (preprocess)", "hash-table"),
                ("No, just a few searches", "linear-search"),
            ]),
            // graph
            question("graph-root", "What is your goal?", &[
                ("Find shortest path", "graph-weighted"),
                ("Traverse or visit all nodes", "graph-traversal"),
            ]),
            question("graph-weighted", "Is the graph weighted (edges have costs)?", &[
                ("Yes, weighted edges", "graph-negative"),
                ("No, unweighted edges", "bfs"),
            ]),
            question("graph-negative", "Are there negative edge weights?", &[
                ("Yes, negative weights exist", "bellman-ford"),
                ("No, all positive", "dijkstra"),
            ]),
            question("graph-traversal", "Do you need to explore deep paths or detect cycles?", &[
                ("Depth / cycle detection", "dfs"),
                ("Level by level", "bfs"),
            ]),
            // optimization
            question(
                "optimization-root",
                "Does the best local choice at each step lead to the best overall answer?",
                &[
                    ("Yes (greedy-choice property)", "greedy"),
                    ("No, combinations must be compared", "opt-subproblems"),
                ],
            ),
            question("opt-subproblems", "Does the problem have overlapping subproblems?", &[
                ("Yes, the same subproblems recur", "dynamic-programming"),
                ("No, subproblems are distinct", "backtracking"),
            ]),
            // recursion
            question(
                "recursion-root",
                "Can the problem be split into independent smaller subproblems?",
                &[
                    ("Yes (merge sort style)", "divide-and-conquer"),
                    ("No, each step depends on previous state", "standard-recursion"),
                ],
            ),
            result(
                "insertion-sort",
                "Insertion Sort",
                "Builds the sorted array one item at a time.",
                "Efficient for small or mostly sorted data.",
                &["Merge/Quick Sort: too much overhead for small data."],
                Some("insertion-sort"),
            ),
            result(
                "selection-sort",
                "Selection Sort",
                "Repeatedly selects the minimum of the unsorted part.",
                "Few writes and O(1) extra space.",
                &["Bubble Sort: more swaps."],
                Some("selection-sort"),
            ),
            result(
                "bubble-sort",
                "Bubble Sort",
                "Repeatedly swaps adjacent out-of-order elements.",
                "Simple to implement for very small datasets.",
                &["Insertion Sort: usually faster."],
                Some("bubble-sort"),
            ),
            result(
                "merge-sort",
                "Merge Sort",
                "Stable divide and conquer sort.",
                "Guaranteed O(n log n) and stable.",
                &["Quick Sort: not stable."],
                Some("merge-sort"),
            ),
            result(
                "heap-sort",
                "Heap Sort",
                "Comparison sort built on a binary heap.",
                "O(n log n) with O(1) extra space.",
                &["Merge Sort: needs O(n) extra space."],
                None,
            ),
            result(
                "quick-sort",
                "Quick Sort",
                "In-place divide and conquer sort.",
                "Usually the fastest O(n log n) sort in practice.",
                &["Merge Sort: uses more memory."],
                Some("quick-sort"),
            ),
            result(
                "binary-search",
                "Binary Search",
                "Halves the search range of a sorted array on every comparison.",
                "O(log n) is hard to beat on sorted data.",
                &["Linear Search: O(n) is much slower."],
                Some("binary-search"),
            ),
            result(
                "linear-search",
                "Linear Search",
                "Checks every element until the target turns up.",
                "Unsorted data searched only once does not repay preprocessing.",
                &["Binary Search: requires sorted data."],
                Some("linear-search"),
            ),
            result(
                "hash-table",
                "Hash Table (preprocessing)",
                "Maps keys to values for constant-time lookup.",
                "For repeated searches, O(1) average lookup pays for the O(n) build.",
                &["Linear Search: too slow for many queries."],
                None,
            ),
            result(
                "bfs",
                "Breadth-First Search",
                "Visits all neighbours of a node before going a level deeper.",
                "Finds shortest paths in unweighted graphs.",
                &["DFS: no shortest-path guarantee."],
                Some("bfs"),
            ),
            result(
                "dfs",
                "Depth-First Search",
                "Follows each branch as deep as possible before backtracking.",
                "Suits traversal, cycle detection and topological ordering.",
                &["BFS: more memory on wide graphs."],
                Some("dfs"),
            ),
            result(
                "dijkstra",
                "Dijkstra's Algorithm",
                "Single-source shortest paths with a priority queue.",
                "Correct and fast when every edge weight is non-negative.",
                &["BFS: ignores weights."],
                None,
            ),
            result(
                "bellman-ford",
                "Bellman-Ford",
                "Single-source shortest paths by repeated edge relaxation.",
                "Handles negative edge weights and detects negative cycles.",
                &["Dijkstra: wrong answers with negative edges."],
                Some("bellman-ford"),
            ),
            result(
                "greedy",
                "Greedy Algorithm",
                "Makes the locally best choice at every stage.",
                "The problem has the greedy-choice property (fractional knapsack, optimal merge).",
                &["Dynamic Programming: overkill when greedy is optimal."],
                Some("fractional-knapsack"),
            ),
            result(
                "dynamic-programming",
                "Dynamic Programming",
                "Solves each subproblem once and stores the answer.",
                "Subproblems overlap (0/1 knapsack, Fibonacci, LCS).",
                &["Divide & Conquer: recomputes shared subproblems."],
                Some("knapsack-01"),
            ),
            result(
                "backtracking",
                "Backtracking",
                "Builds candidates incrementally and abandons dead ends.",
                "Every combination may need checking (N-Queens, Sudoku).",
                &["Greedy: cannot look ahead."],
                Some("n-queens"),
            ),
            result(
                "divide-and-conquer",
                "Divide and Conquer",
                "Splits the problem into disjoint subproblems and combines the results.",
                "Subproblems are independent (merge sort).",
                &["Dynamic Programming: subproblems do not overlap, so caching buys nothing."],
                Some("merge-sort"),
            ),
            result(
                "standard-recursion",
                "Plain Recursion",
                "A function solves a problem by calling itself on smaller instances.",
                "Natural fit for hierarchical data or a defined recurrence (Tower of Hanoi).",
                &["Iteration: the code can get harder to follow."],
                Some("hanoi"),
            ),
        ];

        DecisionTree {
            nodes: nodes.into_iter().map(|node| (node.id(), node)).collect(),
        }
    }

    pub fn root(&self) -> Result<&DecisionNode, DecisionError> {
        self.node(ROOT)
    }

    pub fn node(&self, id: &str) -> Result<&DecisionNode, DecisionError> {
        self.nodes
            .get(id)
            .ok_or_else(|| DecisionError::UnknownNode(id.to_string()))
    }

    /// Follow option `option` (0-based) of question `id`
    pub fn answer(&self, id: &str, option: usize) -> Result<&DecisionNode, DecisionError> {
        let question = self
            .node(id)?
            .as_question()
            .ok_or_else(|| DecisionError::NotAQuestion(id.to_string()))?;
        let chosen = question
            .options
            .get(option)
            .ok_or_else(|| DecisionError::InvalidOption {
                node: id.to_string(),
                option,
                available: question.options.len(),
            })?;
        self.node(chosen.next)
    }

    /// Answer a sequence of questions starting at the root
    pub fn walk(&self, answers: &[usize]) -> Result<&DecisionNode, DecisionError> {
        answers
            .iter()
            .try_fold(self.root()?, |node, &option| self.answer(node.id(), option))
    }

    /// Node ids reachable from the root
    pub fn reachable(&self) -> FxHashSet<&'static str> {
        let mut seen = FxHashSet::default();
        let mut pending = vec![ROOT];
        while let Some(id) = pending.pop() {
            if !seen.insert(id) {
                continue;
            }
            if let Some(DecisionNode::Question(q)) = self.nodes.get(id) {
                pending.extend(q.options.iter().map(|o| o.next));
            }
        }
        seen
    }

    /// Option targets that name no node, as (from, to)
    pub fn dangling(&self) -> Vec<(&'static str, &'static str)> {
        let mut missing: Vec<_> = self
            .nodes
            .values()
            .filter_map(DecisionNode::as_question)
            .flat_map(|q| q.options.iter().map(move |o| (q.id, o.next)))
            .filter(|(_, next)| !self.nodes.contains_key(next))
            .collect();
        missing.sort_unstable();
        missing
    }

    pub fn recommendations(&self) -> impl Iterator<Item = &Recommendation> {
        self.nodes.values().filter_map(DecisionNode::as_result)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for DecisionTree {
    fn default() -> Self {
        Self::standard()
    }
}
