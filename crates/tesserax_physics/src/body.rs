//! Simulated bodies

use tesserax_core::{TargetId, Vec2};

use crate::error::{PhysicsError, Result};

/// Handle to a body in a [`World`](crate::World), in insertion order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyId(pub(crate) usize);

impl BodyId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Kinematic state of a body at one instant
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BodyState {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Orientation in radians, accumulated (not wrapped)
    pub orientation: f64,
    /// Angular velocity in radians per second
    pub angular_velocity: f64,
}

impl BodyState {
    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.velocity.is_finite()
            && self.orientation.is_finite()
            && self.angular_velocity.is_finite()
    }

    /// Component-wise linear interpolation
    pub fn lerp(&self, other: &BodyState, t: f64) -> BodyState {
        BodyState {
            position: self.position.lerp(other.position, t),
            velocity: self.velocity.lerp(other.velocity, t),
            orientation: self.orientation + (other.orientation - self.orientation) * t,
            angular_velocity: self.angular_velocity
                + (other.angular_velocity - self.angular_velocity) * t,
        }
    }
}

/// Description of a body to add to a world
#[derive(Debug, Clone, PartialEq)]
pub struct BodyDesc {
    /// Entity driven by this body's baked tracks
    pub target: TargetId,
    /// Mass (must be > 0)
    pub mass: f64,
    /// Moment of inertia (must be > 0)
    pub inertia: f64,
    pub position: Vec2,
    pub velocity: Vec2,
    pub orientation: f64,
    pub angular_velocity: f64,
    /// Fixed bodies are never integrated
    pub fixed: bool,
}

impl BodyDesc {
    pub fn new(target: TargetId) -> Self {
        Self {
            target,
            mass: 1.0,
            inertia: 1.0,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            orientation: 0.0,
            angular_velocity: 0.0,
            fixed: false,
        }
    }

    pub fn at(mut self, position: impl Into<Vec2>) -> Self {
        self.position = position.into();
        self
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_inertia(mut self, inertia: f64) -> Self {
        self.inertia = inertia;
        self
    }

    pub fn with_velocity(mut self, velocity: impl Into<Vec2>) -> Self {
        self.velocity = velocity.into();
        self
    }

    pub fn with_orientation(mut self, orientation: f64) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_angular_velocity(mut self, angular_velocity: f64) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }
}

/// A body owned by a world
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    id: BodyId,
    target: TargetId,
    mass: f64,
    inertia: f64,
    fixed: bool,
    pub(crate) state: BodyState,
}

impl Body {
    pub(crate) fn from_desc(id: BodyId, desc: BodyDesc) -> Result<Self> {
        let target = desc.target;
        if !desc.mass.is_finite() || desc.mass <= 0.0 {
            return Err(PhysicsError::InvalidMass {
                target,
                mass: desc.mass,
            });
        }
        if !desc.inertia.is_finite() || desc.inertia <= 0.0 {
            return Err(PhysicsError::InvalidInertia {
                target,
                inertia: desc.inertia,
            });
        }

        let state = BodyState {
            position: desc.position,
            velocity: desc.velocity,
            orientation: desc.orientation,
            angular_velocity: desc.angular_velocity,
        };
        if !state.is_finite() {
            return Err(PhysicsError::InvalidInitialState(target));
        }

        Ok(Self {
            id,
            target,
            mass: desc.mass,
            inertia: desc.inertia,
            fixed: desc.fixed,
            state,
        })
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn target(&self) -> TargetId {
        self.target
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    /// Zero for fixed bodies
    pub fn inverse_mass(&self) -> f64 {
        if self.fixed {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    pub fn state(&self) -> &BodyState {
        &self.state
    }

    pub fn position(&self) -> Vec2 {
        self.state.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.state.velocity
    }
}
