//! Bellman-Ford single-source shortest paths with negative-cycle detection
//!
//! The runner always performs exactly `|V| - 1` relaxation passes, even when a
//! pass changes nothing, followed by one detection pass. Distances are
//! `Option<i64>` where `None` stands for infinity (`null` on the wire).

use super::errors::{InvalidInput, RunnerError};
use super::{Category, Runner};
use crate::config::Limits;
use crate::step::{step_kinds, Trace};
use serde::{Deserialize, Serialize};

/// Largest vertex count accepted
pub const MAX_VERTICES: usize = 10;

step_kinds! {
    pub enum BellmanFordKind {
        Init => "init",
        PassStart => "pass-start",
        Relax => "relax",
        NoChange => "no-change",
        CheckEdge => "check-edge",
        NegativeCycleDetected => "negative-cycle-detected",
        Complete => "complete",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedEdge {
    pub u: usize,
    pub v: usize,
    pub weight: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BellmanFordInput {
    pub vertices: usize,
    pub edges: Vec<WeightedEdge>,
    pub source: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BellmanFordState {
    pub vertices: usize,
    pub edges: Vec<WeightedEdge>,
    pub source: usize,
    pub distances: Vec<Option<i64>>,
    pub predecessors: Vec<Option<usize>>,
    /// 1-based relaxation pass; `vertices` during the detection pass
    pub pass: usize,
    /// Index into `edges` of the edge being examined
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge: Option<usize>,
    /// Edge that still relaxes after `|V| - 1` passes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_cycle_edge: Option<usize>,
}

/// Candidate distance through `edge`, if it improves on the current one
fn improvement(distances: &[Option<i64>], edge: &WeightedEdge) -> Option<i64> {
    let through = distances[edge.u]?.checked_add(edge.weight)?;
    match distances[edge.v] {
        Some(current) if current <= through => None,
        _ => Some(through),
    }
}

fn format_distance(distance: Option<i64>) -> String {
    distance.map_or_else(|| "∞".to_string(), |d| d.to_string())
}

pub struct BellmanFord;

impl Runner for BellmanFord {
    type Input = BellmanFordInput;

    const ID: &'static str = "bellman-ford";
    const NAME: &'static str = "Bellman-Ford";
    const CATEGORY: Category = Category::WeightedGraph;
    const PSEUDOCODE: &'static [&'static str] = &[
        "procedure bellmanFord(G, s)",
        "  dist[v] = ∞ for all v; dist[s] = 0",
        "  repeat |V| - 1 times",
        "    for each edge (u, v, w)",
        "      if dist[u] + w < dist[v]",
        "        dist[v] = dist[u] + w; pred[v] = u",
        "  for each edge (u, v, w)",
        "    if dist[u] + w < dist[v]",
        "      report negative cycle",
        "  return dist",
    ];

    fn initial_input(&self) -> BellmanFordInput {
        let edge = |u, v, weight| WeightedEdge { u, v, weight };
        BellmanFordInput {
            vertices: 5,
            edges: vec![
                edge(0, 1, 6),
                edge(0, 2, 7),
                edge(1, 3, 5),
                edge(1, 2, 8),
                edge(1, 4, -4),
                edge(3, 1, -2),
                edge(2, 3, -3),
                edge(2, 4, 9),
                edge(4, 0, 2),
                edge(4, 3, 7),
            ],
            source: 0,
        }
    }

    fn validate_input(&self, input: &BellmanFordInput) -> Result<(), InvalidInput> {
        if input.vertices == 0 || input.vertices > MAX_VERTICES {
            return Err(InvalidInput::new(format!(
                "Vertex count must be between 1 and {}",
                MAX_VERTICES
            )));
        }
        if input.source >= input.vertices {
            return Err(InvalidInput::new(format!(
                "Source {} is not a vertex",
                input.source
            )));
        }
        if let Some(edge) = input
            .edges
            .iter()
            .find(|e| e.u >= input.vertices || e.v >= input.vertices)
        {
            return Err(InvalidInput::new(format!(
                "Edge ({}, {}) references an unknown vertex",
                edge.u, edge.v
            )));
        }
        Ok(())
    }

    fn generate_steps_with(
        &self,
        input: &BellmanFordInput,
        limits: &Limits,
    ) -> Result<Trace, RunnerError> {
        let mut trace = Trace::new(limits.max_steps);
        let mut state = BellmanFordState {
            vertices: input.vertices,
            edges: input.edges.clone(),
            source: input.source,
            distances: vec![None; input.vertices],
            predecessors: vec![None; input.vertices],
            ..BellmanFordState::default()
        };
        state.distances[input.source] = Some(0);

        trace.push(
            BellmanFordKind::Init,
            state.clone(),
            2,
            format!(
                "dist[{}] = 0, every other vertex starts at ∞",
                input.source
            ),
        )?;

        for pass in 1..input.vertices {
            state.pass = pass;
            state.edge = None;
            trace.push(
                BellmanFordKind::PassStart,
                state.clone(),
                3,
                format!("Pass {} of {}", pass, input.vertices - 1),
            )?;

            for (index, edge) in input.edges.iter().enumerate() {
                state.edge = Some(index);
                match improvement(&state.distances, edge) {
                    Some(distance) => {
                        let previous = state.distances[edge.v];
                        state.distances[edge.v] = Some(distance);
                        state.predecessors[edge.v] = Some(edge.u);
                        trace.push(
                            BellmanFordKind::Relax,
                            state.clone(),
                            6,
                            format!(
                                "Relax {} -> {} (w = {}): dist[{}] {} -> {}",
                                edge.u,
                                edge.v,
                                edge.weight,
                                edge.v,
                                format_distance(previous),
                                distance
                            ),
                        )?;
                    }
                    None => {
                        trace.push(
                            BellmanFordKind::NoChange,
                            state.clone(),
                            5,
                            format!(
                                "Edge {} -> {} (w = {}) does not improve dist[{}] = {}",
                                edge.u,
                                edge.v,
                                edge.weight,
                                edge.v,
                                format_distance(state.distances[edge.v])
                            ),
                        )?;
                    }
                }
            }
        }

        state.pass = input.vertices;
        for (index, edge) in input.edges.iter().enumerate() {
            state.edge = Some(index);
            trace.push(
                BellmanFordKind::CheckEdge,
                state.clone(),
                8,
                format!("Check edge {} -> {} for a further improvement", edge.u, edge.v),
            )?;

            if improvement(&state.distances, edge).is_some() {
                state.negative_cycle_edge = Some(index);
                trace.push(
                    BellmanFordKind::NegativeCycleDetected,
                    state,
                    9,
                    format!(
                        "Edge {} -> {} still relaxes: negative-weight cycle reachable from {}",
                        edge.u, edge.v, input.source
                    ),
                )?;
                return Ok(trace);
            }
        }

        state.edge = None;
        let summary = state
            .distances
            .iter()
            .map(|d| format_distance(*d))
            .collect::<Vec<_>>()
            .join(", ");
        trace.push(
            BellmanFordKind::Complete,
            state,
            10,
            format!("Shortest distances: [{}]", summary),
        )?;
        Ok(trace)
    }
}
