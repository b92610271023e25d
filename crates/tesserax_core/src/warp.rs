//! Parametric warps
//!
//! A warp is a parameter set describing a deformation of a shape's vertex
//! list. Warp tracks interpolate the parameters; the deformation itself is
//! applied to the already-sampled vertices, never blended between shapes.

use crate::geometry::{Point, Vec2};

/// A deformation applied to vertex lists at sample time
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Warp {
    /// Sine displacement perpendicular to `axis`
    Wave {
        amplitude: f64,
        wavelength: f64,
        phase: f64,
        axis: Vec2,
    },
    /// Rotation around `center` that falls off linearly to zero at `radius`
    Twist { center: Point, angle: f64, radius: f64 },
    /// Linear shear: `x += shear.x * y`, `y += shear.y * x`
    Shear { x: f64, y: f64 },
}

impl Warp {
    /// Identity warp, useful as a starting keyframe
    pub const NONE: Warp = Warp::Shear { x: 0.0, y: 0.0 };

    /// Whether two warps belong to the same parameter family
    pub fn same_family(&self, other: &Warp) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    pub fn family_name(&self) -> &'static str {
        match self {
            Warp::Wave { .. } => "wave",
            Warp::Twist { .. } => "twist",
            Warp::Shear { .. } => "shear",
        }
    }

    /// Interpolate parameters between two warps of the same family.
    ///
    /// Returns `None` when the families differ.
    pub fn lerp(&self, other: &Warp, t: f64) -> Option<Warp> {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        match (self, other) {
            (
                Warp::Wave {
                    amplitude: a0,
                    wavelength: w0,
                    phase: p0,
                    axis: x0,
                },
                Warp::Wave {
                    amplitude: a1,
                    wavelength: w1,
                    phase: p1,
                    axis: x1,
                },
            ) => Some(Warp::Wave {
                amplitude: mix(*a0, *a1),
                wavelength: mix(*w0, *w1),
                phase: mix(*p0, *p1),
                axis: x0.lerp(*x1, t),
            }),
            (
                Warp::Twist {
                    center: c0,
                    angle: g0,
                    radius: r0,
                },
                Warp::Twist {
                    center: c1,
                    angle: g1,
                    radius: r1,
                },
            ) => Some(Warp::Twist {
                center: c0.lerp(*c1, t),
                angle: mix(*g0, *g1),
                radius: mix(*r0, *r1),
            }),
            (Warp::Shear { x: x0, y: y0 }, Warp::Shear { x: x1, y: y1 }) => Some(Warp::Shear {
                x: mix(*x0, *x1),
                y: mix(*y0, *y1),
            }),
            _ => None,
        }
    }

    /// Deform a single point
    pub fn apply_point(&self, p: Point) -> Point {
        match *self {
            Warp::Wave {
                amplitude,
                wavelength,
                phase,
                axis,
            } => {
                let axis = axis.normalize();
                if wavelength == 0.0 || axis == Vec2::ZERO {
                    return p;
                }
                let along = p.dot(axis);
                let normal = Vec2::new(-axis.y, axis.x);
                let offset =
                    amplitude * (std::f64::consts::TAU * along / wavelength + phase).sin();
                p + normal * offset
            }
            Warp::Twist {
                center,
                angle,
                radius,
            } => {
                let rel = p - center;
                let dist = rel.length();
                if radius <= 0.0 || dist >= radius {
                    return p;
                }
                let falloff = 1.0 - dist / radius;
                center + rel.rotate(angle * falloff)
            }
            Warp::Shear { x, y } => Vec2::new(p.x + x * p.y, p.y + y * p.x),
        }
    }

    /// Deform every vertex of a polyline
    pub fn apply(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|p| self.apply_point(*p)).collect()
    }

    pub fn is_finite(&self) -> bool {
        match self {
            Warp::Wave {
                amplitude,
                wavelength,
                phase,
                axis,
            } => {
                amplitude.is_finite()
                    && wavelength.is_finite()
                    && phase.is_finite()
                    && axis.is_finite()
            }
            Warp::Twist {
                center,
                angle,
                radius,
            } => center.is_finite() && angle.is_finite() && radius.is_finite(),
            Warp::Shear { x, y } => x.is_finite() && y.is_finite(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shear_none_is_identity() {
        let pts = vec![Point::new(1.0, 2.0), Point::new(-3.0, 4.0)];
        assert_eq!(Warp::NONE.apply(&pts), pts);
    }

    #[test]
    fn twist_leaves_points_outside_radius() {
        let warp = Warp::Twist {
            center: Point::ZERO,
            angle: 1.0,
            radius: 5.0,
        };
        let far = Point::new(10.0, 0.0);
        assert_eq!(warp.apply_point(far), far);
        let near = warp.apply_point(Point::new(1.0, 0.0));
        assert!((near.length() - 1.0).abs() < 1e-12);
        assert!(near.y > 0.0);
    }

    #[test]
    fn wave_displaces_perpendicular_to_axis() {
        let warp = Warp::Wave {
            amplitude: 2.0,
            wavelength: 4.0,
            phase: 0.0,
            axis: Vec2::X,
        };
        let p = warp.apply_point(Point::new(1.0, 0.0));
        assert!((p.x - 1.0).abs() < 1e-12);
        assert!((p.y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn lerp_requires_same_family() {
        let a = Warp::Shear { x: 0.0, y: 0.0 };
        let b = Warp::Shear { x: 1.0, y: 2.0 };
        assert_eq!(a.lerp(&b, 0.5), Some(Warp::Shear { x: 0.5, y: 1.0 }));

        let twist = Warp::Twist {
            center: Point::ZERO,
            angle: 1.0,
            radius: 1.0,
        };
        assert!(a.lerp(&twist, 0.5).is_none());
        assert!(!a.same_family(&twist));
    }
}
