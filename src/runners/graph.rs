//! Breadth-first and depth-first traversal of an undirected graph
//!
//! Node ids are arbitrary `usize` labels. Internally every id is mapped to its
//! position in `nodes`, and neighbours are listed in edge-list order, so the
//! traversal order depends only on the input.

use super::errors::{InvalidInput, RunnerError};
use super::{Category, Runner};
use crate::config::Limits;
use crate::step::{step_kinds, Trace};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Largest graph the traversal runners accept
pub const MAX_NODES: usize = 20;

step_kinds! {
    pub enum BfsKind {
        Init => "init",
        Enqueue => "enqueue",
        Dequeue => "dequeue",
        ExamineEdge => "examine-edge",
        Skip => "skip",
        Complete => "complete",
    }
}

step_kinds! {
    pub enum DfsKind {
        Init => "init",
        Push => "push",
        Visit => "visit",
        ExamineEdge => "examine-edge",
        Skip => "skip",
        Backtrack => "backtrack",
        Complete => "complete",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphInput {
    pub nodes: Vec<usize>,
    pub edges: Vec<(usize, usize)>,
    pub start_node: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphState {
    pub nodes: Vec<usize>,
    pub edges: Vec<(usize, usize)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<usize>,
    /// Edge under examination
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge: Option<(usize, usize)>,
    /// Queue (BFS, front first) or stack (DFS, bottom first)
    pub frontier: Vec<usize>,
    /// Nodes marked visited, in marking order
    pub visited: Vec<usize>,
    /// Nodes in traversal order
    pub order: Vec<usize>,
}

fn sample_graph() -> GraphInput {
    GraphInput {
        nodes: vec![0, 1, 2, 3, 4, 5],
        edges: vec![(0, 1), (0, 2), (1, 3), (1, 4), (2, 4), (3, 5)],
        start_node: 0,
    }
}

fn validate_graph(input: &GraphInput) -> Result<(), InvalidInput> {
    if input.nodes.is_empty() {
        return Err(InvalidInput::new("Graph needs at least one node"));
    }
    if input.nodes.len() > MAX_NODES {
        return Err(InvalidInput::new(format!(
            "Graph can have at most {} nodes",
            MAX_NODES
        )));
    }
    let mut seen = FxHashSet::default();
    for node in &input.nodes {
        if !seen.insert(*node) {
            return Err(InvalidInput::new(format!("Node {} is listed twice", node)));
        }
    }
    for (a, b) in &input.edges {
        if !seen.contains(a) || !seen.contains(b) {
            return Err(InvalidInput::new(format!(
                "Edge ({}, {}) references an unknown node",
                a, b
            )));
        }
    }
    if !seen.contains(&input.start_node) {
        return Err(InvalidInput::new(format!(
            "Start node {} is not in the graph",
            input.start_node
        )));
    }
    Ok(())
}

/// Index-based adjacency lists in edge-list order
struct Adjacency {
    neighbours: Vec<Vec<usize>>,
    start: usize,
}

impl Adjacency {
    fn build(input: &GraphInput) -> Self {
        let index: FxHashMap<usize, usize> = input
            .nodes
            .iter()
            .enumerate()
            .map(|(i, id)| (*id, i))
            .collect();
        let mut neighbours = vec![Vec::new(); input.nodes.len()];
        for (a, b) in &input.edges {
            if let (Some(&ia), Some(&ib)) = (index.get(a), index.get(b)) {
                neighbours[ia].push(ib);
                if ia != ib {
                    neighbours[ib].push(ia);
                }
            }
        }
        Adjacency {
            neighbours,
            start: index.get(&input.start_node).copied().unwrap_or(0),
        }
    }
}

/// Shared traversal bookkeeping and snapshotting
struct Walk<'a> {
    input: &'a GraphInput,
    visited: Vec<bool>,
    visited_order: Vec<usize>,
    order: Vec<usize>,
}

impl<'a> Walk<'a> {
    fn new(input: &'a GraphInput) -> Self {
        Walk {
            input,
            visited: vec![false; input.nodes.len()],
            visited_order: Vec::new(),
            order: Vec::new(),
        }
    }

    fn id(&self, index: usize) -> usize {
        self.input.nodes[index]
    }

    fn mark(&mut self, index: usize) {
        let id = self.id(index);
        self.visited[index] = true;
        self.visited_order.push(id);
    }

    fn snapshot(
        &self,
        frontier: impl Iterator<Item = usize>,
        current: Option<usize>,
        edge: Option<(usize, usize)>,
    ) -> GraphState {
        GraphState {
            nodes: self.input.nodes.clone(),
            edges: self.input.edges.clone(),
            current: current.map(|i| self.id(i)),
            edge: edge.map(|(a, b)| (self.id(a), self.id(b))),
            frontier: frontier.map(|i| self.id(i)).collect(),
            visited: self.visited_order.clone(),
            order: self.order.clone(),
        }
    }
}

pub struct BreadthFirstSearch;

impl Runner for BreadthFirstSearch {
    type Input = GraphInput;

    const ID: &'static str = "bfs";
    const NAME: &'static str = "Breadth-First Search";
    const CATEGORY: Category = Category::Graph;
    const PSEUDOCODE: &'static [&'static str] = &[
        "procedure BFS(G, s)",
        "  visited = {s}; queue = [s]",
        "  while queue is not empty",
        "    u = queue.dequeue()",
        "    for each v in adj[u]",
        "      if v not in visited",
        "        visited.add(v); queue.enqueue(v)",
        "  return order",
    ];

    fn initial_input(&self) -> GraphInput {
        sample_graph()
    }

    fn validate_input(&self, input: &GraphInput) -> Result<(), InvalidInput> {
        validate_graph(input)
    }

    fn generate_steps_with(
        &self,
        input: &GraphInput,
        limits: &Limits,
    ) -> Result<Trace, RunnerError> {
        let mut trace = Trace::new(limits.max_steps);
        let adjacency = Adjacency::build(input);
        let mut walk = Walk::new(input);
        let mut queue: VecDeque<usize> = VecDeque::new();

        trace.push(
            BfsKind::Init,
            walk.snapshot(queue.iter().copied(), None, None),
            1,
            format!(
                "Graph with {} nodes and {} edges, starting at {}",
                input.nodes.len(),
                input.edges.len(),
                input.start_node
            ),
        )?;

        walk.mark(adjacency.start);
        queue.push_back(adjacency.start);
        trace.push(
            BfsKind::Enqueue,
            walk.snapshot(queue.iter().copied(), None, None),
            2,
            format!("Mark {} visited and enqueue it", input.start_node),
        )?;

        while let Some(u) = queue.pop_front() {
            let id = walk.id(u);
            walk.order.push(id);
            trace.push(
                BfsKind::Dequeue,
                walk.snapshot(queue.iter().copied(), Some(u), None),
                4,
                format!("Dequeue {}", walk.id(u)),
            )?;

            for &v in &adjacency.neighbours[u] {
                trace.push(
                    BfsKind::ExamineEdge,
                    walk.snapshot(queue.iter().copied(), Some(u), Some((u, v))),
                    5,
                    format!("Examine edge {} - {}", walk.id(u), walk.id(v)),
                )?;

                if walk.visited[v] {
                    trace.push(
                        BfsKind::Skip,
                        walk.snapshot(queue.iter().copied(), Some(u), Some((u, v))),
                        6,
                        format!("{} is already visited", walk.id(v)),
                    )?;
                } else {
                    walk.mark(v);
                    queue.push_back(v);
                    trace.push(
                        BfsKind::Enqueue,
                        walk.snapshot(queue.iter().copied(), Some(u), Some((u, v))),
                        7,
                        format!("Mark {} visited and enqueue it", walk.id(v)),
                    )?;
                }
            }
        }

        let description = format!("BFS order: {:?}", walk.order);
        trace.push(
            BfsKind::Complete,
            walk.snapshot(std::iter::empty(), None, None),
            8,
            description,
        )?;
        Ok(trace)
    }
}

/// Depth-first search over an explicit stack of frames
pub struct DepthFirstSearch;

impl Runner for DepthFirstSearch {
    type Input = GraphInput;

    const ID: &'static str = "dfs";
    const NAME: &'static str = "Depth-First Search";
    const CATEGORY: Category = Category::Graph;
    const PSEUDOCODE: &'static [&'static str] = &[
        "procedure DFS(G, s)",
        "  stack = [s]",
        "  while stack is not empty",
        "    u = top(stack)",
        "    if u not visited: visit(u)",
        "    if u has an unexamined neighbour v",
        "      if v not visited: push(v)",
        "    else: pop(u)",
        "  return order",
    ];

    fn initial_input(&self) -> GraphInput {
        sample_graph()
    }

    fn validate_input(&self, input: &GraphInput) -> Result<(), InvalidInput> {
        validate_graph(input)
    }

    fn generate_steps_with(
        &self,
        input: &GraphInput,
        limits: &Limits,
    ) -> Result<Trace, RunnerError> {
        let mut trace = Trace::new(limits.max_steps);
        let adjacency = Adjacency::build(input);
        let mut walk = Walk::new(input);
        // (node, index of the next neighbour to examine)
        let mut stack: Vec<(usize, usize)> = Vec::new();

        trace.push(
            DfsKind::Init,
            walk.snapshot(std::iter::empty(), None, None),
            1,
            format!(
                "Graph with {} nodes and {} edges, starting at {}",
                input.nodes.len(),
                input.edges.len(),
                input.start_node
            ),
        )?;

        stack.push((adjacency.start, 0));
        trace.push(
            DfsKind::Push,
            walk.snapshot(stack.iter().map(|f| f.0), None, None),
            2,
            format!("Push {}", input.start_node),
        )?;

        while let Some(&(u, cursor)) = stack.last() {
            if !walk.visited[u] {
                let id = walk.id(u);
                walk.mark(u);
                walk.order.push(id);
                trace.push(
                    DfsKind::Visit,
                    walk.snapshot(stack.iter().map(|f| f.0), Some(u), None),
                    5,
                    format!("Visit {}", walk.id(u)),
                )?;
            }

            match adjacency.neighbours[u].get(cursor) {
                Some(&v) => {
                    if let Some(frame) = stack.last_mut() {
                        frame.1 += 1;
                    }
                    trace.push(
                        DfsKind::ExamineEdge,
                        walk.snapshot(stack.iter().map(|f| f.0), Some(u), Some((u, v))),
                        6,
                        format!("Examine edge {} - {}", walk.id(u), walk.id(v)),
                    )?;

                    if walk.visited[v] {
                        trace.push(
                            DfsKind::Skip,
                            walk.snapshot(stack.iter().map(|f| f.0), Some(u), Some((u, v))),
                            7,
                            format!("{} is already visited", walk.id(v)),
                        )?;
                    } else {
                        stack.push((v, 0));
                        trace.push(
                            DfsKind::Push,
                            walk.snapshot(stack.iter().map(|f| f.0), Some(u), Some((u, v))),
                            7,
                            format!("Go deeper: push {}", walk.id(v)),
                        )?;
                    }
                }
                None => {
                    stack.pop();
                    let next = stack.last().map(|f| f.0);
                    let description = match next {
                        Some(parent) => format!(
                            "{} is exhausted, backtrack to {}",
                            walk.id(u),
                            walk.id(parent)
                        ),
                        None => format!("{} is exhausted, stack is empty", walk.id(u)),
                    };
                    trace.push(
                        DfsKind::Backtrack,
                        walk.snapshot(stack.iter().map(|f| f.0), next, None),
                        8,
                        description,
                    )?;
                }
            }
        }

        let description = format!("DFS order: {:?}", walk.order);
        trace.push(
            DfsKind::Complete,
            walk.snapshot(std::iter::empty(), None, None),
            9,
            description,
        )?;
        Ok(trace)
    }
}
