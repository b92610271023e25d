//! Rigid rods that hold two bodies at a fixed distance
//!
//! Rods act on positions, not forces. After every step's commit the world
//! projects each rod in insertion order, moving both ends along the rod axis
//! in proportion to their inverse mass. Velocities are left untouched.

use tesserax_core::Vec2;

use crate::body::{Body, BodyId};
use crate::error::{PhysicsError, Result};

/// Distance constraint between two bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rod {
    pub a: BodyId,
    pub b: BodyId,
    pub length: f64,
}

impl Rod {
    pub fn new(a: BodyId, b: BodyId, length: f64) -> Self {
        Self { a, b, length }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.a == self.b {
            return Err(PhysicsError::InvalidRod("both ends attach to the same body"));
        }
        if !self.length.is_finite() || self.length < 0.0 {
            return Err(PhysicsError::InvalidRod("length must be finite and non-negative"));
        }
        Ok(())
    }

    /// Position offsets for `a` and `b` that restore the rod length.
    ///
    /// Coincident ends and pairs of fixed bodies get no correction.
    pub fn correction(&self, a: &Body, b: &Body) -> (Vec2, Vec2) {
        let delta = b.position() - a.position();
        let distance = delta.length();
        let total = a.inverse_mass() + b.inverse_mass();
        if distance == 0.0 || total == 0.0 {
            return (Vec2::ZERO, Vec2::ZERO);
        }
        let shift = delta / distance * ((distance - self.length) / total);
        (shift * a.inverse_mass(), -(shift * b.inverse_mass()))
    }
}
