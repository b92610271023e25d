//! Force fields
//!
//! A [`Field`] is a pure function of one body's pre-step state and the
//! simulation time. Fields never see other bodies, so the order bodies are
//! evaluated in cannot change the result.
//!
//! Coordinates follow screen space: `+y` points down, so [`Gravity::down`]
//! pulls toward larger `y`.

use std::fmt;
use std::ops::{Add, AddAssign, Neg};
use std::sync::Arc;

use tesserax_core::Vec2;

use crate::body::Body;

/// Linear force and torque acting on a body for one step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Force {
    pub linear: Vec2,
    pub torque: f64,
}

impl Force {
    pub const ZERO: Force = Force {
        linear: Vec2::ZERO,
        torque: 0.0,
    };

    pub const fn new(linear: Vec2, torque: f64) -> Self {
        Self { linear, torque }
    }

    pub const fn linear(linear: Vec2) -> Self {
        Self::new(linear, 0.0)
    }

    pub const fn torque(torque: f64) -> Self {
        Self::new(Vec2::ZERO, torque)
    }
}

impl Add for Force {
    type Output = Force;

    fn add(self, rhs: Force) -> Force {
        Force::new(self.linear + rhs.linear, self.torque + rhs.torque)
    }
}

impl AddAssign for Force {
    fn add_assign(&mut self, rhs: Force) {
        self.linear += rhs.linear;
        self.torque += rhs.torque;
    }
}

impl Neg for Force {
    type Output = Force;

    fn neg(self) -> Force {
        Force::new(-self.linear, -self.torque)
    }
}

/// A force generator evaluated once per body per step
pub trait Field: Send + Sync + fmt::Debug {
    /// Force on `body` at simulation time `time`
    fn force(&self, body: &Body, time: f64) -> Force;
}

/// Uniform gravitational acceleration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gravity {
    pub acceleration: Vec2,
}

impl Gravity {
    pub fn new(acceleration: impl Into<Vec2>) -> Self {
        Self {
            acceleration: acceleration.into(),
        }
    }

    /// Downward gravity of magnitude `g`
    pub fn down(g: f64) -> Self {
        Self::new(Vec2::new(0.0, g))
    }
}

impl Field for Gravity {
    fn force(&self, body: &Body, _time: f64) -> Force {
        Force::linear(self.acceleration * body.mass())
    }
}

/// How drag scales with speed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragModel {
    /// `-k·v`
    Linear,
    /// `-k·|v|·v`
    Quadratic,
}

/// Force opposing a body's velocity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    pub model: DragModel,
    pub coefficient: f64,
    /// Angular drag, torque `-k·ω`
    pub angular: f64,
}

impl Drag {
    pub fn linear(coefficient: f64) -> Self {
        Self {
            model: DragModel::Linear,
            coefficient,
            angular: 0.0,
        }
    }

    pub fn quadratic(coefficient: f64) -> Self {
        Self {
            model: DragModel::Quadratic,
            coefficient,
            angular: 0.0,
        }
    }

    pub fn with_angular(mut self, angular: f64) -> Self {
        self.angular = angular;
        self
    }
}

impl Field for Drag {
    fn force(&self, body: &Body, _time: f64) -> Force {
        let v = body.velocity();
        let linear = match self.model {
            DragModel::Linear => v * -self.coefficient,
            DragModel::Quadratic => v * (-self.coefficient * v.length()),
        };
        Force::new(linear, -self.angular * body.state().angular_velocity)
    }
}

/// Pull toward a point, falling off with distance
///
/// Force magnitude is `strength·m / max(d, min_distance)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attractor {
    pub center: Vec2,
    pub strength: f64,
    pub min_distance: f64,
}

impl Attractor {
    pub fn new(center: impl Into<Vec2>, strength: f64) -> Self {
        Self {
            center: center.into(),
            strength,
            min_distance: 1.0,
        }
    }

    pub fn with_min_distance(mut self, min_distance: f64) -> Self {
        self.min_distance = min_distance;
        self
    }
}

impl Field for Attractor {
    fn force(&self, body: &Body, _time: f64) -> Force {
        let offset = self.center - body.position();
        let distance = offset.length();
        if distance == 0.0 {
            return Force::ZERO;
        }
        let magnitude = self.strength * body.mass() / distance.max(self.min_distance);
        Force::linear(offset * (magnitude / distance))
    }
}

type ForceFn = dyn Fn(&Body, f64) -> Force + Send + Sync;

/// A field defined by a closure
///
/// ```
/// use tesserax_physics::{Force, FieldFn};
/// use tesserax_core::Vec2;
///
/// let wind = FieldFn::new("wind", |_body, t| Force::linear(Vec2::new(t.sin(), 0.0)));
/// ```
#[derive(Clone)]
pub struct FieldFn {
    name: String,
    f: Arc<ForceFn>,
}

impl FieldFn {
    pub fn new<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Body, f64) -> Force + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            f: Arc::new(f),
        }
    }
}

impl fmt::Debug for FieldFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldFn").field("name", &self.name).finish()
    }
}

impl Field for FieldFn {
    fn force(&self, body: &Body, time: f64) -> Force {
        (self.f)(body, time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{BodyDesc, BodyId};
    use tesserax_core::TargetId;

    fn body(desc: BodyDesc) -> Body {
        Body::from_desc(BodyId(0), desc).unwrap()
    }

    #[test]
    fn gravity_scales_with_mass() {
        let heavy = body(BodyDesc::new(TargetId(1)).with_mass(2.0));
        let force = Gravity::down(9.8).force(&heavy, 0.0);
        assert_eq!(force, Force::linear(Vec2::new(0.0, 19.6)));
    }

    #[test]
    fn drag_opposes_velocity() {
        let moving = body(
            BodyDesc::new(TargetId(1))
                .with_velocity((3.0, 4.0))
                .with_angular_velocity(2.0),
        );
        let linear = Drag::linear(0.5).with_angular(0.25).force(&moving, 0.0);
        assert_eq!(linear.linear, Vec2::new(-1.5, -2.0));
        assert_eq!(linear.torque, -0.5);

        let quadratic = Drag::quadratic(0.1).force(&moving, 0.0);
        assert!((quadratic.linear.x + 1.5).abs() < 1e-12);
        assert!((quadratic.linear.y + 2.0).abs() < 1e-12);
    }

    #[test]
    fn attractor_pulls_toward_center_with_clamp() {
        let near = body(BodyDesc::new(TargetId(1)).at((0.5, 0.0)));
        let far = body(BodyDesc::new(TargetId(2)).at((4.0, 0.0)));
        let field = Attractor::new(Vec2::ZERO, 8.0);

        assert_eq!(field.force(&near, 0.0).linear, Vec2::new(-8.0, 0.0));
        assert_eq!(field.force(&far, 0.0).linear, Vec2::new(-2.0, 0.0));

        let centered = body(BodyDesc::new(TargetId(3)));
        assert_eq!(field.force(&centered, 0.0), Force::ZERO);
    }

    #[test]
    fn field_fn_sees_time() {
        let ramp = FieldFn::new("ramp", |_, t| Force::torque(t));
        let b = body(BodyDesc::new(TargetId(1)));
        assert_eq!(ramp.force(&b, 0.5).torque, 0.5);
        assert_eq!(format!("{ramp:?}"), "FieldFn { name: \"ramp\" }");
    }

    #[test]
    fn forces_add() {
        let sum = Force::linear(Vec2::X) + Force::torque(1.0);
        assert_eq!(sum, Force::new(Vec2::X, 1.0));
        assert_eq!(-sum, Force::new(Vec2::new(-1.0, 0.0), -1.0));
    }
}
