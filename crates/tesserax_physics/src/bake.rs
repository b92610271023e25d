//! Baking trajectories into clips
//!
//! The baker turns a fixed-`dt` trajectory into one `Position` track
//! (linear) and one `Rotation` track (angular, wrapped to `(-π, π]`) per
//! body. The resulting clip lasts exactly [`Trajectory::duration`]: samples
//! past the requested duration are trimmed and the last keyframe is
//! interpolated at the trimmed end.

use tesserax_animation::{Clip, Interpolation, Keyframe, KeyframeTrack, TrackKey};
use tesserax_core::{wrap_angle, Property};
use tracing::debug;

use crate::body::BodyState;
use crate::config::{BakeStrategy, SimulationConfig};
use crate::error::{PhysicsError, Result};
use crate::trajectory::{BodyTrajectory, Trajectory};

/// Grid times this close to the end are dropped in favour of the end itself
const END_TOLERANCE: f64 = 1e-9;

/// Converts trajectories to clips at a fixed output rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Baker {
    rate: f64,
    strategy: BakeStrategy,
}

impl Baker {
    pub fn new(rate: f64) -> Result<Self> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(PhysicsError::InvalidBakeRate(rate));
        }
        Ok(Self {
            rate,
            strategy: BakeStrategy::default(),
        })
    }

    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        Ok(Self::new(config.bake_rate)?.with_strategy(config.bake_strategy))
    }

    pub fn with_strategy(mut self, strategy: BakeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn strategy(&self) -> BakeStrategy {
        self.strategy
    }

    pub fn bake(&self, trajectory: &Trajectory) -> Result<Clip> {
        let duration = trajectory.duration();
        let mut tracks = Vec::with_capacity(trajectory.bodies.len() * 2);

        for body in &trajectory.bodies {
            check_finite(body, duration)?;

            let keys = match self.strategy {
                BakeStrategy::Resample => self.resample(body, duration),
                BakeStrategy::Decimate => self.decimate(body, trajectory.dt, duration),
            };

            let position = keys
                .iter()
                .map(|(t, state)| Keyframe::new(*t, state.position, Interpolation::Linear))
                .collect();
            let rotation = keys
                .iter()
                .map(|(t, state)| {
                    Keyframe::new(*t, wrap_angle(state.orientation), Interpolation::Angular)
                })
                .collect();

            tracks.push((
                TrackKey::new(body.target, Property::Position),
                KeyframeTrack::new(position)?,
            ));
            tracks.push((
                TrackKey::new(body.target, Property::Rotation),
                KeyframeTrack::new(rotation)?,
            ));

            debug!(
                body = %body.target,
                keyframes = keys.len(),
                strategy = %self.strategy,
                "baked body"
            );
        }

        debug!(
            bodies = trajectory.bodies.len(),
            duration,
            rate = self.rate,
            truncated = trajectory.is_truncated(),
            "bake complete"
        );
        Ok(Clip::new("baked", duration, tracks)?)
    }

    /// States at `k / rate` for every grid time before the end, then the end
    fn resample(&self, body: &BodyTrajectory, duration: f64) -> Vec<(f64, BodyState)> {
        let mut keys = Vec::new();
        let mut k = 0u64;
        loop {
            let t = k as f64 / self.rate;
            if t >= duration - END_TOLERANCE {
                break;
            }
            keys.extend(body.state_at(t).map(|s| (t, s)));
            k += 1;
        }
        keys.extend(body.state_at(duration).map(|s| (duration, s)));
        keys
    }

    /// Every N-th recorded sample before the end, then the end
    fn decimate(&self, body: &BodyTrajectory, dt: f64, duration: f64) -> Vec<(f64, BodyState)> {
        let stride = ((1.0 / dt) / self.rate).round().max(1.0) as usize;
        let mut keys: Vec<(f64, BodyState)> = body
            .samples
            .iter()
            .step_by(stride)
            .take_while(|s| s.time < duration - END_TOLERANCE)
            .map(|s| (s.time, s.state))
            .collect();
        keys.extend(body.state_at(duration).map(|s| (duration, s)));
        keys
    }
}

/// Bake with the default strategy
pub fn bake(trajectory: &Trajectory, rate: f64) -> Result<Clip> {
    Baker::new(rate)?.bake(trajectory)
}

/// Fail on the first non-finite sample inside the trimmed range
fn check_finite(body: &BodyTrajectory, duration: f64) -> Result<()> {
    let cutoff = body.samples.partition_point(|s| s.time < duration) + 1;
    match body
        .samples
        .iter()
        .take(cutoff)
        .find(|s| !s.state.is_finite())
    {
        Some(sample) => Err(PhysicsError::NonFinite {
            target: body.target,
            time: sample.time,
        }),
        None => Ok(()),
    }
}
