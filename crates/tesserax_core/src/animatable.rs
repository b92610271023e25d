//! Boundary with the geometry layer
//!
//! The core never constructs or serializes shapes. A drivable entity exposes
//! a stable [`TargetId`] and accepts `(property, value)` pairs; renderers feed
//! sampled frames through this trait.

use std::fmt;

use crate::property::{Property, Value};

/// Stable identifier of a drivable entity
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TargetId(pub u64);

impl TargetId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An entity whose properties can be driven by sampled clip values
pub trait Animatable {
    /// The identifier tracks use to address this entity
    fn target_id(&self) -> TargetId;

    /// Apply a sampled value. Properties the entity does not support are
    /// ignored.
    fn set_property(&mut self, property: Property, value: &Value);
}
