//! The simulation world
//!
//! A [`World`] owns its bodies, fields, springs and rods and a fixed timestep.
//! [`World::run`] advances every body with evaluate-then-commit semantics:
//! all forces are computed from the pre-step snapshot before any body moves,
//! so insertion order never changes the outcome and two runs of the same
//! world are bit-identical. Rods are projected after the commit, one after
//! another in the order they were added.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::body::{Body, BodyDesc, BodyId};
use crate::config::SimulationConfig;
use crate::error::{PhysicsError, Result};
use crate::field::{Field, Force};
use crate::integrator;
use crate::rod::Rod;
use crate::spring::Spring;
use crate::trajectory::{BodyTrajectory, Trajectory, TrajectorySample};

/// Requests a cooperative stop of a running simulation
///
/// The flag is checked between steps, never inside one. A stop requested
/// before [`World::run`] begins is discarded.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

/// Fixed-step rigid body simulation
///
/// Cloning a world copies its bodies and shares its fields; the clone gets
/// its own [`StopHandle`].
#[derive(Debug)]
pub struct World {
    dt: f64,
    steps_taken: u64,
    started: bool,
    bodies: Vec<Body>,
    fields: Vec<Arc<dyn Field>>,
    springs: Vec<Spring>,
    rods: Vec<Rod>,
    stop: StopHandle,
}

impl Clone for World {
    fn clone(&self) -> Self {
        Self {
            dt: self.dt,
            steps_taken: self.steps_taken,
            started: self.started,
            bodies: self.bodies.clone(),
            fields: self.fields.clone(),
            springs: self.springs.clone(),
            rods: self.rods.clone(),
            stop: StopHandle::new(),
        }
    }
}

impl World {
    /// Create an empty world stepping by `dt` seconds
    pub fn new(dt: f64) -> Result<Self> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(PhysicsError::InvalidTimestep(dt));
        }
        Ok(Self {
            dt,
            steps_taken: 0,
            started: false,
            bodies: Vec::new(),
            fields: Vec::new(),
            springs: Vec::new(),
            rods: Vec::new(),
            stop: StopHandle::new(),
        })
    }

    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.timestep)
    }

    pub fn add_body(&mut self, desc: BodyDesc) -> Result<BodyId> {
        self.ensure_not_started()?;
        if self.bodies.iter().any(|b| b.target() == desc.target) {
            return Err(PhysicsError::DuplicateTarget(desc.target));
        }
        let id = BodyId(self.bodies.len());
        self.bodies.push(Body::from_desc(id, desc)?);
        Ok(id)
    }

    pub fn add_field(&mut self, field: impl Field + 'static) -> Result<()> {
        self.add_shared_field(Arc::new(field))
    }

    /// Add a field that may also be shared with other worlds
    pub fn add_shared_field(&mut self, field: Arc<dyn Field>) -> Result<()> {
        self.ensure_not_started()?;
        self.fields.push(field);
        Ok(())
    }

    pub fn add_spring(&mut self, spring: Spring) -> Result<()> {
        self.ensure_not_started()?;
        for id in [spring.a, spring.b] {
            if self.body(id).is_none() {
                return Err(PhysicsError::UnknownBody(id));
            }
        }
        spring.validate()?;
        self.springs.push(spring);
        Ok(())
    }

    pub fn add_rod(&mut self, rod: Rod) -> Result<()> {
        self.ensure_not_started()?;
        for id in [rod.a, rod.b] {
            if self.body(id).is_none() {
                return Err(PhysicsError::UnknownBody(id));
            }
        }
        rod.validate()?;
        self.rods.push(rod);
        Ok(())
    }

    fn ensure_not_started(&self) -> Result<()> {
        if self.started {
            return Err(PhysicsError::SimulationStarted);
        }
        Ok(())
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Simulation clock in seconds
    pub fn time(&self) -> f64 {
        self.steps_taken as f64 * self.dt
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn has_started(&self) -> bool {
        self.started
    }

    /// Handle for stopping [`run`](Self::run) from a field or another thread
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Advance the simulation by at least `duration` seconds.
    ///
    /// Takes `ceil(duration / dt)` full steps and records every body after
    /// each one, plus the state at the start. The world keeps its state, so
    /// a later `run` continues from where this one ended.
    pub fn run(&mut self, duration: f64) -> Result<Trajectory> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(PhysicsError::InvalidDuration(duration));
        }

        self.started = true;
        self.stop.reset();

        // Absorb rounding in duration / dt so exact multiples take no extra step
        let planned = (duration / self.dt - 1e-9).ceil().max(0.0) as u64;
        let start_step = self.steps_taken;
        let start = self.time();

        let mut bodies: Vec<BodyTrajectory> = self
            .bodies
            .iter()
            .map(|body| {
                let mut samples = Vec::with_capacity(planned as usize + 1);
                samples.push(TrajectorySample {
                    time: 0.0,
                    state: *body.state(),
                });
                BodyTrajectory {
                    body: body.id(),
                    target: body.target(),
                    samples,
                }
            })
            .collect();

        let mut taken = 0;
        while taken < planned {
            if self.stop.is_stopped() {
                warn!(
                    steps = taken,
                    planned,
                    time = taken as f64 * self.dt,
                    "simulation stopped early"
                );
                break;
            }

            self.step();
            taken += 1;

            let time = taken as f64 * self.dt;
            for (track, body) in bodies.iter_mut().zip(&self.bodies) {
                track.samples.push(TrajectorySample {
                    time,
                    state: *body.state(),
                });
            }
            trace!(step = start_step + taken, time, "step");
        }

        debug!(
            bodies = self.bodies.len(),
            fields = self.fields.len(),
            springs = self.springs.len(),
            rods = self.rods.len(),
            steps = taken,
            dt = self.dt,
            "simulation run complete"
        );

        Ok(Trajectory {
            dt: self.dt,
            start,
            requested: duration,
            planned,
            steps: taken,
            bodies,
        })
    }

    /// One fixed step: evaluate every force on the snapshot, commit, then
    /// project rods
    fn step(&mut self) {
        let time = self.time();

        let mut forces: Vec<Force> = self
            .bodies
            .iter()
            .map(|body| {
                self.fields
                    .iter()
                    .fold(Force::ZERO, |acc, field| acc + field.force(body, time))
            })
            .collect();

        for spring in &self.springs {
            let (a, b) = (spring.a.0, spring.b.0);
            let force = spring.force(&self.bodies[a], &self.bodies[b]);
            forces[a] += force;
            forces[b] += -force;
        }

        let next: Vec<_> = self
            .bodies
            .iter()
            .zip(&forces)
            .map(|(body, force)| integrator::step(body, *force, self.dt))
            .collect();

        for (body, state) in self.bodies.iter_mut().zip(next) {
            body.state = state;
        }

        for rod in &self.rods {
            let (a, b) = (rod.a.0, rod.b.0);
            let (da, db) = rod.correction(&self.bodies[a], &self.bodies[b]);
            self.bodies[a].state.position += da;
            self.bodies[b].state.position += db;
        }
        self.steps_taken += 1;
    }
}
