//! Brute-force closest pair of points

use super::errors::{InvalidInput, RunnerError};
use super::{Category, Runner};
use crate::config::Limits;
use crate::step::{step_kinds, Trace};
use serde::{Deserialize, Serialize};

pub const MIN_POINTS: usize = 2;
pub const MAX_POINTS: usize = 20;

step_kinds! {
    pub enum ClosestPairKind {
        Init => "init",
        StartLoop => "start-loop",
        Compare => "compare",
        CalculateDistance => "calculate-distance",
        NewMinimum => "new-minimum",
        PairChecked => "pair-checked",
        Complete => "complete",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub id: usize,
}

impl Point {
    pub fn distance(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosestPairInput {
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosestPairState {
    pub points: Vec<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_i: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_j: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_distance: Option<f64>,
    /// `None` until the first pair is measured
    pub min_distance: Option<f64>,
    pub closest_pair: Option<(Point, Point)>,
    pub checked_pairs: Vec<(usize, usize)>,
}

pub struct ClosestPair;

impl Runner for ClosestPair {
    type Input = ClosestPairInput;

    const ID: &'static str = "closest-pair";
    const NAME: &'static str = "Closest Pair (brute force)";
    const CATEGORY: Category = Category::Geometry;
    const PSEUDOCODE: &'static [&'static str] = &[
        "procedure closestPair(P)",
        "  best = ∞",
        "  for i = 0 to n - 1",
        "    for j = i + 1 to n - 1",
        "      compare P[i] and P[j]",
        "      d = dist(P[i], P[j])",
        "      if d < best",
        "        best = d; pair = (P[i], P[j])",
        "  return pair",
    ];

    fn initial_input(&self) -> ClosestPairInput {
        let point = |x, y, id| Point { x, y, id };
        ClosestPairInput {
            points: vec![
                point(50.0, 80.0, 0),
                point(150.0, 120.0, 1),
                point(200.0, 50.0, 2),
                point(100.0, 200.0, 3),
                point(250.0, 180.0, 4),
                point(300.0, 100.0, 5),
                point(80.0, 280.0, 6),
                point(180.0, 250.0, 7),
            ],
        }
    }

    fn validate_input(&self, input: &ClosestPairInput) -> Result<(), InvalidInput> {
        if input.points.len() < MIN_POINTS {
            return Err(InvalidInput::new("At least 2 points are required"));
        }
        if input.points.len() > MAX_POINTS {
            return Err(InvalidInput::new(format!(
                "At most {} points are allowed",
                MAX_POINTS
            )));
        }
        if input.points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(InvalidInput::new("Point coordinates must be finite"));
        }
        Ok(())
    }

    fn generate_steps_with(
        &self,
        input: &ClosestPairInput,
        limits: &Limits,
    ) -> Result<Trace, RunnerError> {
        let mut trace = Trace::new(limits.max_steps);
        let points = &input.points;
        let mut state = ClosestPairState {
            points: points.clone(),
            ..ClosestPairState::default()
        };

        trace.push(
            ClosestPairKind::Init,
            state.clone(),
            1,
            format!("Find the closest pair among {} points", points.len()),
        )?;
        state.current_i = Some(0);
        trace.push(
            ClosestPairKind::StartLoop,
            state.clone(),
            3,
            "Compare every pair of points",
        )?;

        for i in 0..points.len() {
            for j in i + 1..points.len() {
                state.current_i = Some(i);
                state.current_j = Some(j);
                state.current_distance = None;
                trace.push(
                    ClosestPairKind::Compare,
                    state.clone(),
                    5,
                    format!("Compare point {} and point {}", i, j),
                )?;

                let d = points[i].distance(&points[j]);
                state.current_distance = Some(d);
                trace.push(
                    ClosestPairKind::CalculateDistance,
                    state.clone(),
                    6,
                    format!("Distance between point {} and point {}: {:.2}", i, j, d),
                )?;

                if state.min_distance.map_or(true, |best| d < best) {
                    state.min_distance = Some(d);
                    state.closest_pair = Some((points[i], points[j]));
                    trace.push(
                        ClosestPairKind::NewMinimum,
                        state.clone(),
                        8,
                        format!("New closest pair: {:.2}", d),
                    )?;
                }

                state.checked_pairs.push((i, j));
                trace.push(
                    ClosestPairKind::PairChecked,
                    state.clone(),
                    7,
                    format!(
                        "Pair ({}, {}) checked, best so far {:.2}",
                        i,
                        j,
                        state.min_distance.unwrap_or(d)
                    ),
                )?;
            }
        }

        state.current_i = None;
        state.current_j = None;
        state.current_distance = None;
        let description = match state.closest_pair {
            Some((a, b)) => format!(
                "Closest pair: points {} and {} at distance {:.2}",
                a.id,
                b.id,
                state.min_distance.unwrap_or_default()
            ),
            None => "No pair found".to_string(),
        };
        trace.push(ClosestPairKind::Complete, state, 9, description)?;
        Ok(trace)
    }
}
