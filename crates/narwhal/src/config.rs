//! Layout configuration.
//!
//! `LayoutConfig` round-trips through serde with kebab-case keys, so it can be embedded in a
//! host application's JSON settings. Every field has a default.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layering {
    LongestPath,
    #[default]
    TopDown,
    CoffmanGraham,
    NetworkSimplex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CycleRemoval {
    #[default]
    Greedy,
    /// Insert edges in caller order, diverting the ones that would close a cycle.
    Constructive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CrossingMinimizer {
    /// Median sweeps over fully materialized synthetic chains, with optional transpose.
    #[default]
    Classic,
    /// Sweeps over container/segment lists; long edges stay compact until placement.
    Eiglsperger,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LayoutConfig {
    pub layering: Layering,
    pub cycle_removal: CycleRemoval,
    pub crossing_minimizer: CrossingMinimizer,
    /// Number of crossing-minimization sweeps.
    pub max_level_cross: usize,
    /// Adjacent-swap local search after each classic sweep.
    pub transpose: bool,
    /// Brandes–Köpf placement; when off each rank is simply centered.
    pub straighten_edges: bool,
    pub post_straighten: bool,
    /// Lay out weakly connected components separately and pack them side by side.
    pub multi_component: bool,
    pub horizontal_offset: f64,
    pub vertical_offset: f64,
    pub margin: f64,
    /// Maximum vertices per layer for Coffman–Graham layering.
    pub coffman_graham_width: usize,
    /// Move vertices with a single neighbor next to that neighbor's rank.
    pub tighten_leaves: bool,
    pub stop_at_zero_crossings: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            layering: Layering::TopDown,
            cycle_removal: CycleRemoval::Greedy,
            crossing_minimizer: CrossingMinimizer::Classic,
            max_level_cross: 23,
            transpose: true,
            straighten_edges: true,
            post_straighten: true,
            multi_component: true,
            horizontal_offset: 50.0,
            vertical_offset: 50.0,
            margin: 0.0,
            coffman_graham_width: 10,
            tighten_leaves: false,
            stop_at_zero_crossings: false,
        }
    }
}

impl LayoutConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("horizontal-offset", self.horizontal_offset),
            ("vertical-offset", self.vertical_offset),
            ("margin", self.margin),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig {
                    message: format!("{name} must be a finite, non-negative number (got {value})"),
                });
            }
        }
        if self.layering == Layering::CoffmanGraham && self.coffman_graham_width == 0 {
            return Err(Error::InvalidConfig {
                message: "coffman-graham-width must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
