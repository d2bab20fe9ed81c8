//! Generation limits and playback speeds

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default cap on the number of steps a single trace may hold
pub const DEFAULT_MAX_STEPS: usize = 250_000;

/// Bounds applied while generating a trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Limits {
    pub max_steps: usize,
}

impl Limits {
    pub fn new(max_steps: usize) -> Self {
        Limits { max_steps }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

/// Playback speed for autoplay and battle ticking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Speed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl Speed {
    /// Time between two ticks
    pub fn tick_interval(self) -> Duration {
        match self {
            Speed::Slow => Duration::from_millis(500),
            Speed::Normal => Duration::from_millis(200),
            Speed::Fast => Duration::from_millis(50),
        }
    }

    /// Cycle slow -> normal -> fast -> slow
    pub fn next(self) -> Self {
        match self {
            Speed::Slow => Speed::Normal,
            Speed::Normal => Speed::Fast,
            Speed::Fast => Speed::Slow,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Speed::Slow => "slow",
            Speed::Normal => "normal",
            Speed::Fast => "fast",
        }
    }
}
