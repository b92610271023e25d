//! Simulation configuration

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PhysicsError, Result};

/// How a trajectory is turned into keyframes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BakeStrategy {
    /// Piecewise-linear lookup at evenly spaced output times
    #[default]
    Resample,
    /// Keep every N-th simulation sample, `N = round(simulation rate / bake rate)`
    Decimate,
}

impl fmt::Display for BakeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BakeStrategy::Resample => f.write_str("resample"),
            BakeStrategy::Decimate => f.write_str("decimate"),
        }
    }
}

impl FromStr for BakeStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "resample" => Ok(BakeStrategy::Resample),
            "decimate" => Ok(BakeStrategy::Decimate),
            other => Err(format!(
                "unknown bake strategy '{other}', expected 'resample' or 'decimate'"
            )),
        }
    }
}

/// Simulation and baking configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fixed integration step in seconds (default: 1/1000)
    pub timestep: f64,

    /// Output keyframe rate in frames per second (default: 30)
    pub bake_rate: f64,

    /// Keyframe selection strategy (default: resample)
    pub bake_strategy: BakeStrategy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            timestep: 1.0 / 1000.0,
            bake_rate: 30.0,
            bake_strategy: BakeStrategy::Resample,
        }
    }
}

impl SimulationConfig {
    pub fn with_timestep(mut self, timestep: f64) -> Self {
        self.timestep = timestep;
        self
    }

    pub fn with_bake_rate(mut self, bake_rate: f64) -> Self {
        self.bake_rate = bake_rate;
        self
    }

    pub fn with_bake_strategy(mut self, strategy: BakeStrategy) -> Self {
        self.bake_strategy = strategy;
        self
    }

    /// Integration steps per second
    pub fn simulation_rate(&self) -> f64 {
        1.0 / self.timestep
    }

    pub fn validate(&self) -> Result<()> {
        if !self.timestep.is_finite() || self.timestep <= 0.0 {
            return Err(PhysicsError::InvalidTimestep(self.timestep));
        }
        if !self.bake_rate.is_finite() || self.bake_rate <= 0.0 {
            return Err(PhysicsError::InvalidBakeRate(self.bake_rate));
        }
        Ok(())
    }
}
