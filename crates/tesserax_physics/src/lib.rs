//! Tesserax Physics
//!
//! Deterministic fixed-step simulation whose output is baked into animation
//! clips.
//!
//! # Features
//!
//! - **Fields**: gravity, drag, attractors and closures, evaluated per body
//! - **Springs**: damped springs between bodies, with fixed anchors
//! - **Rods**: fixed-distance links projected after each step
//! - **Integration**: semi-implicit Euler with evaluate-then-commit steps,
//!   bit-identical across runs
//! - **Baking**: resampled or decimated keyframe tracks trimmed to the
//!   requested duration
//! - **Cancellation**: cooperative stop between steps
//!
//! # Pipeline
//!
//! ```text
//! Fields + Bodies ──▶ World::run ──▶ Trajectory ──▶ Baker ──▶ Clip
//!                      (1000 Hz)                  (30 fps)
//! ```
//!
//! # Example
//!
//! ```
//! use tesserax_physics::prelude::*;
//! use tesserax_core::TargetId;
//!
//! let mut world = World::new(1.0 / 1000.0)?;
//! world.add_body(BodyDesc::new(TargetId(1)).with_velocity((2.0, -5.0)))?;
//! world.add_field(Gravity::down(9.8))?;
//!
//! let trajectory = world.run(1.0)?;
//! let clip = bake(&trajectory, 30.0)?;
//! assert_eq!(clip.duration(), 1.0);
//! # Ok::<(), tesserax_physics::PhysicsError>(())
//! ```

pub mod bake;
pub mod body;
pub mod config;
pub mod error;
pub mod field;
pub mod integrator;
pub mod rod;
pub mod spring;
pub mod trajectory;
pub mod world;

pub use bake::{bake, Baker};
pub use body::{Body, BodyDesc, BodyId, BodyState};
pub use config::{BakeStrategy, SimulationConfig};
pub use error::{PhysicsError, Result};
pub use field::{Attractor, Drag, DragModel, Field, FieldFn, Force, Gravity};
pub use rod::Rod;
pub use spring::Spring;
pub use trajectory::{BodyTrajectory, Trajectory, TrajectorySample};
pub use world::{StopHandle, World};

pub mod prelude {
    //! Common imports for simulating and baking
    pub use crate::bake::{bake, Baker};
    pub use crate::body::{BodyDesc, BodyId};
    pub use crate::config::{BakeStrategy, SimulationConfig};
    pub use crate::error::{PhysicsError, Result};
    pub use crate::field::{Attractor, Drag, FieldFn, Force, Gravity};
    pub use crate::rod::Rod;
    pub use crate::spring::Spring;
    pub use crate::world::{StopHandle, World};
}
