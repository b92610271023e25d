//! Damped springs between pairs of bodies

use tesserax_core::Vec2;

use crate::body::{Body, BodyId};
use crate::error::{PhysicsError, Result};
use crate::field::Force;

/// Hooke spring with damping along the spring axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub a: BodyId,
    pub b: BodyId,
    pub rest_length: f64,
    pub stiffness: f64,
    pub damping: f64,
}

impl Spring {
    pub fn new(a: BodyId, b: BodyId, rest_length: f64, stiffness: f64) -> Self {
        Self {
            a,
            b,
            rest_length,
            stiffness,
            damping: 0.0,
        }
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.a == self.b {
            return Err(PhysicsError::InvalidSpring("both ends attach to the same body"));
        }
        let params = [self.rest_length, self.stiffness, self.damping];
        if params.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(PhysicsError::InvalidSpring(
                "rest length, stiffness and damping must be finite and non-negative",
            ));
        }
        Ok(())
    }

    /// Force on body `a`; body `b` receives the negation
    pub fn force(&self, a: &Body, b: &Body) -> Force {
        let delta = b.position() - a.position();
        let distance = delta.length();
        if distance == 0.0 {
            return Force::ZERO;
        }
        let normal: Vec2 = delta / distance;
        let stretch = (distance - self.rest_length) * self.stiffness;
        let closing = (b.velocity() - a.velocity()).dot(normal) * self.damping;
        Force::linear(normal * (stretch + closing))
    }
}
