//! Tesserax Core Types
//!
//! Value types shared by the animation and physics crates, and the boundary
//! a geometry layer implements to be driven by sampled clips.
//!
//! - **Geometry**: [`Vec2`] / [`Point`] and angle helpers
//! - **Color**: linear RGBA [`Color`]
//! - **Properties**: the closed set of animatable [`Property`] kinds, each with
//!   a fixed [`ValueKind`]
//! - **Warps**: parametric geometry post-processing ([`Warp`])
//! - **Animatable**: the mutation interface a drivable entity exposes

pub mod animatable;
pub mod color;
pub mod geometry;
pub mod property;
pub mod warp;

pub use animatable::{Animatable, TargetId};
pub use color::Color;
pub use geometry::{wrap_angle, Point, Vec2};
pub use property::{Property, Value, ValueKind};
pub use warp::Warp;
