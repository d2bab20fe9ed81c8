//! Battle setup: shared, seeded inputs for two runners
//!
//! One [`BattleSetup`] fully determines a battle. All random data comes from a
//! `ChaCha8Rng` seeded with `setup.seed` and is drawn in a fixed order (array,
//! graph, weighted graph) whatever the chosen runners are, so both sides of a
//! battle race on the same data and a setup always reproduces the same pair of
//! traces.

use super::BattleEngine;
use crate::config::Limits;
use crate::registry::Registry;
use crate::runners::bellman_ford::{BellmanFordInput, WeightedEdge};
use crate::runners::errors::{RegistryError, RunnerError};
use crate::runners::graph::GraphInput;
use crate::runners::searching::SearchInput;
use crate::runners::sorting::ArrayInput;
use crate::runners::Category;
use crate::step::Trace;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const MIN_SIZE: usize = 5;
pub const MAX_SIZE: usize = 50;
pub const DEFAULT_SIZE: usize = 20;

/// Initial ordering of the battle array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DataShape {
    #[default]
    Random,
    Sorted,
    Reversed,
    NearlySorted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleSetup {
    pub algo_a: String,
    pub algo_b: String,
    pub size: usize,
    pub shape: DataShape,
    pub seed: u64,
}

impl Default for BattleSetup {
    fn default() -> Self {
        BattleSetup {
            algo_a: "bubble-sort".to_string(),
            algo_b: "quick-sort".to_string(),
            size: DEFAULT_SIZE,
            shape: DataShape::Random,
            seed: 0,
        }
    }
}

#[derive(Debug, Error)]
pub enum BattleError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("runner '{id}' failed: {source}")]
    Runner {
        id: String,
        #[source]
        source: RunnerError,
    },

    #[error("runner '{id}' ({category}) cannot battle; pick a sorting, searching or graph runner")]
    Unsupported { id: String, category: &'static str },

    #[error("battle size must be between {min} and {max}, got {0}", min = MIN_SIZE, max = MAX_SIZE)]
    InvalidSize(usize),
}

/// Inputs for every battle-capable category, generated together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleInputs {
    pub array: ArrayInput,
    pub search: SearchInput,
    pub graph: GraphInput,
    pub weighted: BellmanFordInput,
}

impl BattleInputs {
    pub fn generate(size: usize, shape: DataShape, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let array = shaped_array(&mut rng, size, shape);

        let mut sorted = array.clone();
        sorted.sort_unstable();
        let target = sorted.get(sorted.len() / 2).copied().unwrap_or(0);

        BattleInputs {
            array: ArrayInput { array },
            search: SearchInput {
                array: sorted,
                target,
            },
            graph: random_graph(&mut rng, size),
            weighted: random_weighted_graph(&mut rng, size),
        }
    }

    /// JSON input for a runner category, if that category can battle
    pub fn for_category(&self, category: Category) -> Option<Value> {
        let value = match category {
            Category::Sorting => serde_json::to_value(&self.array),
            Category::Searching => serde_json::to_value(&self.search),
            Category::Graph => serde_json::to_value(&self.graph),
            Category::WeightedGraph => serde_json::to_value(&self.weighted),
            _ => return None,
        };
        value.ok()
    }
}

fn shaped_array(rng: &mut ChaCha8Rng, size: usize, shape: DataShape) -> Vec<i64> {
    let mut array: Vec<i64> = (0..size).map(|_| rng.gen_range(1..=100)).collect();
    match shape {
        DataShape::Random => {}
        DataShape::Sorted => array.sort_unstable(),
        DataShape::Reversed => array.sort_unstable_by(|a, b| b.cmp(a)),
        DataShape::NearlySorted => {
            array.sort_unstable();
            if size > 1 {
                for _ in 0..(size / 10).max(1) {
                    let i = rng.gen_range(0..size);
                    let j = rng.gen_range(0..size);
                    array.swap(i, j);
                }
            }
        }
    }
    array
}

/// Random spanning tree on 3..=12 nodes plus a few extra undirected edges
fn random_graph(rng: &mut ChaCha8Rng, size: usize) -> GraphInput {
    let count = ((size + 2) / 4).clamp(3, 12);
    let mut edges: Vec<(usize, usize)> = (1..count).map(|i| (rng.gen_range(0..i), i)).collect();

    for _ in 0..count * 6 / 10 {
        let a = rng.gen_range(0..count);
        let b = rng.gen_range(0..count);
        let duplicate = edges
            .iter()
            .any(|&(x, y)| (x, y) == (a, b) || (x, y) == (b, a));
        if a != b && !duplicate {
            edges.push((a, b));
        }
    }

    GraphInput {
        nodes: (0..count).collect(),
        edges,
        start_node: 0,
    }
}

/// Random directed spanning tree on 3..=8 vertices plus extra edges, weights -3..=11
fn random_weighted_graph(rng: &mut ChaCha8Rng, size: usize) -> BellmanFordInput {
    let vertices = ((size + 2) / 5).clamp(3, 8);
    let mut edges: Vec<WeightedEdge> = (1..vertices)
        .map(|v| WeightedEdge {
            u: rng.gen_range(0..v),
            v,
            weight: rng.gen_range(-3..=11),
        })
        .collect();

    for _ in 0..vertices / 2 {
        let u = rng.gen_range(0..vertices);
        let v = rng.gen_range(0..vertices);
        let duplicate = edges.iter().any(|e| e.u == u && e.v == v);
        if u != v && !duplicate {
            let weight = rng.gen_range(-3..=11);
            edges.push(WeightedEdge { u, v, weight });
        }
    }

    BellmanFordInput {
        vertices,
        edges,
        source: 0,
    }
}

fn generate_side(
    registry: &Registry,
    inputs: &BattleInputs,
    id: &str,
    limits: &Limits,
) -> Result<Trace, BattleError> {
    let runner = registry.get(id)?;
    let category = runner.category();
    let input = inputs
        .for_category(category)
        .ok_or_else(|| BattleError::Unsupported {
            id: id.to_string(),
            category: category.label(),
        })?;
    runner
        .generate(&input, limits)
        .map_err(|source| BattleError::Runner {
            id: id.to_string(),
            source,
        })
}

/// Generate both traces for a setup
pub fn generate_pair(
    registry: &Registry,
    setup: &BattleSetup,
    limits: &Limits,
) -> Result<(Trace, Trace), BattleError> {
    if !(MIN_SIZE..=MAX_SIZE).contains(&setup.size) {
        return Err(BattleError::InvalidSize(setup.size));
    }
    let inputs = BattleInputs::generate(setup.size, setup.shape, setup.seed);
    let trace_a = generate_side(registry, &inputs, &setup.algo_a, limits)?;
    let trace_b = generate_side(registry, &inputs, &setup.algo_b, limits)?;
    tracing::debug!(
        a = %setup.algo_a,
        b = %setup.algo_b,
        size = setup.size,
        seed = setup.seed,
        steps_a = trace_a.len(),
        steps_b = trace_b.len(),
        "battle configured"
    );
    Ok((trace_a, trace_b))
}

/// A configured battle: setup, engine and the registry it draws runners from
pub struct Arena {
    registry: Registry,
    limits: Limits,
    setup: BattleSetup,
    engine: BattleEngine,
}

impl Arena {
    pub fn new(
        registry: Registry,
        limits: Limits,
        setup: BattleSetup,
    ) -> Result<Self, BattleError> {
        let (trace_a, trace_b) = generate_pair(&registry, &setup, &limits)?;
        Ok(Arena {
            registry,
            limits,
            setup,
            engine: BattleEngine::new(trace_a, trace_b),
        })
    }

    /// Apply a new setup. Both traces are regenerated and the engine reset.
    ///
    /// On error the previous setup and traces stay in place.
    pub fn reconfigure(&mut self, setup: BattleSetup) -> Result<(), BattleError> {
        let (trace_a, trace_b) = generate_pair(&self.registry, &setup, &self.limits)?;
        self.engine.load(trace_a, trace_b);
        self.setup = setup;
        Ok(())
    }

    pub fn setup(&self) -> &BattleSetup {
        &self.setup
    }

    pub fn engine(&self) -> &BattleEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut BattleEngine {
        &mut self.engine
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
