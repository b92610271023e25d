//! Semi-implicit Euler integration
//!
//! Velocity is updated before position, and the new velocity moves the body.
//! Under a constant force this is stable for any step size and the velocity
//! after `N` steps is exactly `v0 + N·a·dt`.

use crate::body::{Body, BodyState};
use crate::field::Force;

/// Advance one state by `dt` under a constant force
#[inline]
pub fn integrate(state: &BodyState, mass: f64, inertia: f64, force: Force, dt: f64) -> BodyState {
    let velocity = state.velocity + force.linear * (dt / mass);
    let angular_velocity = state.angular_velocity + force.torque * (dt / inertia);
    BodyState {
        position: state.position + velocity * dt,
        velocity,
        orientation: state.orientation + angular_velocity * dt,
        angular_velocity,
    }
}

/// Advance a body by one step; fixed bodies do not move
pub fn step(body: &Body, force: Force, dt: f64) -> BodyState {
    if body.is_fixed() {
        return *body.state();
    }
    integrate(body.state(), body.mass(), body.inertia(), force, dt)
}
