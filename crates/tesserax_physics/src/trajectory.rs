//! Recorded simulation output

use tesserax_core::TargetId;

use crate::body::{BodyId, BodyState};

/// One body's state at one simulation step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectorySample {
    /// Seconds since the start of the run
    pub time: f64,
    pub state: BodyState,
}

/// Every recorded sample of one body
#[derive(Debug, Clone, PartialEq)]
pub struct BodyTrajectory {
    pub body: BodyId,
    pub target: TargetId,
    pub samples: Vec<TrajectorySample>,
}

impl BodyTrajectory {
    /// Piecewise-linear state at `t`, clamped to the recorded range
    pub fn state_at(&self, t: f64) -> Option<BodyState> {
        let first = self.samples.first()?;
        if t.is_nan() || t <= first.time {
            return Some(first.state);
        }
        let i = self.samples.partition_point(|s| s.time <= t);
        if i >= self.samples.len() {
            return self.samples.last().map(|s| s.state);
        }
        let a = &self.samples[i - 1];
        let b = &self.samples[i];
        let u = (t - a.time) / (b.time - a.time);
        Some(a.state.lerp(&b.state, u))
    }
}

/// Output of [`World::run`](crate::World::run)
///
/// Samples are recorded at every step, including the initial state at
/// `t = 0`. Because the last step may overshoot the requested duration, use
/// [`Trajectory::duration`] for the trimmed length.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    /// Fixed step the run used
    pub dt: f64,
    /// World clock when the run began
    pub start: f64,
    /// Duration passed to `run`
    pub requested: f64,
    /// Steps needed to cover `requested`
    pub planned: u64,
    /// Steps actually taken (fewer than planned if the run was stopped)
    pub steps: u64,
    pub bodies: Vec<BodyTrajectory>,
}

impl Trajectory {
    /// Simulated time actually covered, before trimming
    pub fn completed(&self) -> f64 {
        self.steps as f64 * self.dt
    }

    /// Trimmed length: the requested duration, or what completed after an
    /// early stop
    pub fn duration(&self) -> f64 {
        if self.is_truncated() {
            self.requested.min(self.completed())
        } else {
            self.requested
        }
    }

    /// Whether the run stopped before taking every planned step
    pub fn is_truncated(&self) -> bool {
        self.steps < self.planned
    }

    pub fn body(&self, id: BodyId) -> Option<&BodyTrajectory> {
        self.bodies.iter().find(|b| b.body == id)
    }

    pub fn state_at(&self, id: BodyId, t: f64) -> Option<BodyState> {
        self.body(id)?.state_at(t)
    }

    /// Samples per body
    pub fn sample_count(&self) -> usize {
        self.bodies.first().map_or(0, |b| b.samples.len())
    }
}
