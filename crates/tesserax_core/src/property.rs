//! Animatable properties and their values
//!
//! The property set is closed: every [`Property`] has exactly one
//! [`ValueKind`], so a track's values can be checked against its property
//! when a clip is built instead of when it is sampled.

use std::fmt;

use crate::color::Color;
use crate::geometry::{Point, Vec2};
use crate::warp::Warp;

/// A property of a target entity that tracks can animate
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Property {
    /// Translation of the entity (Vector)
    Position,
    /// Rotation in radians (Scalar)
    Rotation,
    /// Uniform scale factor (Scalar)
    Scale,
    /// Opacity 0.0..=1.0 (Scalar)
    Opacity,
    /// Fill color (Color)
    Fill,
    /// Stroke color (Color)
    Stroke,
    /// Polyline vertices, the morph target (Vertices)
    Vertices,
    /// Geometry warp parameters (Warp)
    Warp,
}

impl Property {
    pub const ALL: [Property; 8] = [
        Property::Position,
        Property::Rotation,
        Property::Scale,
        Property::Opacity,
        Property::Fill,
        Property::Stroke,
        Property::Vertices,
        Property::Warp,
    ];

    /// The value kind every track of this property must carry
    pub const fn value_kind(self) -> ValueKind {
        match self {
            Property::Position => ValueKind::Vector,
            Property::Rotation | Property::Scale | Property::Opacity => ValueKind::Scalar,
            Property::Fill | Property::Stroke => ValueKind::Color,
            Property::Vertices => ValueKind::Vertices,
            Property::Warp => ValueKind::Warp,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Property::Position => "position",
            Property::Rotation => "rotation",
            Property::Scale => "scale",
            Property::Opacity => "opacity",
            Property::Fill => "fill",
            Property::Stroke => "stroke",
            Property::Vertices => "vertices",
            Property::Warp => "warp",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The shape of a property value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ValueKind {
    Scalar,
    Vector,
    Color,
    Vertices,
    Warp,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Scalar => "scalar",
            ValueKind::Vector => "vector",
            ValueKind::Color => "color",
            ValueKind::Vertices => "vertices",
            ValueKind::Warp => "warp",
        };
        f.write_str(name)
    }
}

/// A property value
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Value {
    Scalar(f64),
    Vector(Vec2),
    Color(Color),
    Vertices(Vec<Point>),
    Warp(Warp),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Scalar(_) => ValueKind::Scalar,
            Value::Vector(_) => ValueKind::Vector,
            Value::Color(_) => ValueKind::Color,
            Value::Vertices(_) => ValueKind::Vertices,
            Value::Warp(_) => ValueKind::Warp,
        }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Value::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<Vec2> {
        match self {
            Value::Vector(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            Value::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_vertices(&self) -> Option<&[Point]> {
        match self {
            Value::Vertices(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_warp(&self) -> Option<Warp> {
        match self {
            Value::Warp(w) => Some(*w),
            _ => None,
        }
    }

    /// Whether every numeric component is finite
    pub fn is_finite(&self) -> bool {
        match self {
            Value::Scalar(v) => v.is_finite(),
            Value::Vector(v) => v.is_finite(),
            Value::Color(c) => c.is_finite(),
            Value::Vertices(pts) => pts.iter().all(|p| p.is_finite()),
            Value::Warp(w) => w.is_finite(),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Scalar(v)
    }
}

impl From<Vec2> for Value {
    fn from(v: Vec2) -> Self {
        Value::Vector(v)
    }
}

impl From<Color> for Value {
    fn from(c: Color) -> Self {
        Value::Color(c)
    }
}

impl From<Vec<Point>> for Value {
    fn from(v: Vec<Point>) -> Self {
        Value::Vertices(v)
    }
}

impl From<Warp> for Value {
    fn from(w: Warp) -> Self {
        Value::Warp(w)
    }
}
