//! Error types for the physics system

use tesserax_animation::AnimationError;
use tesserax_core::TargetId;
use thiserror::Error;

use crate::body::BodyId;

/// Physics system errors
///
/// Everything except [`PhysicsError::NonFinite`] is raised while a world is
/// being built. Non-finite state is detected when a trajectory is baked.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// Fixed step must be finite and positive
    #[error("timestep {0} must be finite and positive")]
    InvalidTimestep(f64),

    /// Bake rate must be finite and positive
    #[error("bake rate {0} must be finite and positive")]
    InvalidBakeRate(f64),

    /// Run duration must be finite and non-negative
    #[error("simulation duration {0} must be finite and non-negative")]
    InvalidDuration(f64),

    /// Body mass must be finite and positive
    #[error("body {target} has invalid mass {mass}")]
    InvalidMass { target: TargetId, mass: f64 },

    /// Body moment of inertia must be finite and positive
    #[error("body {target} has invalid moment of inertia {inertia}")]
    InvalidInertia { target: TargetId, inertia: f64 },

    /// Initial position, velocity, orientation or angular velocity is not finite
    #[error("body {0} has a non-finite initial state")]
    InvalidInitialState(TargetId),

    /// Two bodies drive the same target
    #[error("target {0} is already driven by another body")]
    DuplicateTarget(TargetId),

    /// Spring parameters are negative or not finite
    #[error("invalid spring: {0}")]
    InvalidSpring(&'static str),

    /// Rod joins a body to itself or has an unusable length
    #[error("invalid rod: {0}")]
    InvalidRod(&'static str),

    /// Body id does not belong to this world
    #[error("unknown body {0:?}")]
    UnknownBody(BodyId),

    /// Bodies, fields, springs and rods are fixed once the world has run
    #[error("cannot modify a world after its simulation has started")]
    SimulationStarted,

    /// The simulation produced NaN or infinity
    #[error("body {target} reached a non-finite state at t = {time}")]
    NonFinite { target: TargetId, time: f64 },

    /// Building the baked clip failed
    #[error(transparent)]
    Animation(#[from] AnimationError),
}

/// Result type for physics operations
pub type Result<T> = std::result::Result<T, PhysicsError>;
