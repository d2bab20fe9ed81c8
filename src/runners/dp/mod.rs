//! Dynamic programming runners
//!
//! Tables are `Option` grids where `None` marks a cell not yet computed, so
//! every snapshot shows how far the fill has progressed.

pub mod fibonacci;
pub mod knapsack;
pub mod lcs;
