//! Keyframe tracks
//!
//! A [`KeyframeTrack`] is a strictly time-ordered list of keyframes for one
//! property value kind. Each keyframe names the interpolation of the segment
//! that arrives at it, so a track assembled from several tweens keeps every
//! segment's curve.
//!
//! Tracks are validated once, on construction: timestamps are finite,
//! non-negative and strictly increasing, values share one kind, every
//! interpolation supports that kind, and morph/warp segments join compatible
//! shapes. Sampling afterwards cannot fail.
//!
//! Timestamps are snapped to a nanosecond grid ([`snap_time`]), so shifting
//! and concatenating tracks gives the same times whatever the grouping.

use std::fmt;

use tesserax_core::{wrap_angle, Value, ValueKind};

use crate::easing::Easing;
use crate::error::{AnimationError, Result};

/// Resolution of keyframe timestamps and clip durations
pub const TICKS_PER_SECOND: f64 = 1e9;

/// Round `seconds` to the nearest tick.
///
/// Snapping is idempotent, and a sum of snapped values snaps to the same tick
/// whatever the grouping of the additions.
pub fn snap_time(seconds: f64) -> f64 {
    (seconds * TICKS_PER_SECOND).round() / TICKS_PER_SECOND
}

/// How a segment moves from its left keyframe to its right keyframe
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Interpolation {
    /// Straight interpolation (scalar, vector, color)
    #[default]
    Linear,
    /// Hold the left value until the right keyframe's timestamp (any kind)
    Step,
    /// Interpolation along an easing curve (scalar, vector, color)
    Eased(Easing),
    /// Shortest-arc interpolation of radians, wrapping at ±π (scalar)
    Angular,
    /// Per-vertex linear interpolation of equal-length polylines (vertices)
    Morph,
    /// Parameter-wise interpolation of same-family warps (warp)
    Warp,
}

impl Interpolation {
    pub fn name(&self) -> &'static str {
        match self {
            Interpolation::Linear => "linear",
            Interpolation::Step => "step",
            Interpolation::Eased(_) => "eased",
            Interpolation::Angular => "angular",
            Interpolation::Morph => "morph",
            Interpolation::Warp => "warp",
        }
    }

    /// Whether this interpolation can produce values of `kind`
    pub fn supports(&self, kind: ValueKind) -> bool {
        match self {
            Interpolation::Step => true,
            Interpolation::Linear | Interpolation::Eased(_) => {
                matches!(kind, ValueKind::Scalar | ValueKind::Vector | ValueKind::Color)
            }
            Interpolation::Angular => kind == ValueKind::Scalar,
            Interpolation::Morph => kind == ValueKind::Vertices,
            Interpolation::Warp => kind == ValueKind::Warp,
        }
    }

    /// The natural interpolation for a value kind.
    ///
    /// Vertices morph, warps interpolate parameters, everything else follows
    /// `easing` (plain linear for [`Easing::Linear`]).
    pub fn for_kind(kind: ValueKind, easing: Easing) -> Self {
        match kind {
            ValueKind::Vertices => Interpolation::Morph,
            ValueKind::Warp => Interpolation::Warp,
            _ if easing.is_linear() => Interpolation::Linear,
            _ => Interpolation::Eased(easing),
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single keyframe
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Keyframe {
    /// Time in seconds from the start of the clip
    pub time: f64,
    /// Value from this timestamp onward
    pub value: Value,
    /// Left-hand limit of the segment ending here, when it differs from
    /// `value`. Marks the instant one composed clip hands over to the next.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub arrive: Option<Value>,
    /// Interpolation of the segment arriving at this keyframe
    pub interpolation: Interpolation,
}

impl Keyframe {
    pub fn new(time: f64, value: impl Into<Value>, interpolation: Interpolation) -> Self {
        Self {
            time,
            value: value.into(),
            arrive: None,
            interpolation,
        }
    }

    pub fn linear(time: f64, value: impl Into<Value>) -> Self {
        Self::new(time, value, Interpolation::Linear)
    }

    pub fn with_arrive(mut self, arrive: impl Into<Value>) -> Self {
        self.arrive = Some(arrive.into());
        self
    }

    /// The value the arriving segment interpolates toward
    pub fn arrive_value(&self) -> &Value {
        self.arrive.as_ref().unwrap_or(&self.value)
    }
}

/// A validated, time-ordered keyframe sequence for one property
#[derive(Clone, Debug, PartialEq)]
pub struct KeyframeTrack {
    kind: ValueKind,
    keyframes: Vec<Keyframe>,
}

impl KeyframeTrack {
    /// Validate and build a track from keyframes in time order.
    ///
    /// Timestamps are snapped to [`TICKS_PER_SECOND`]. Values on either side
    /// of an angular segment are wrapped to `(-π, π]`.
    pub fn new(mut keyframes: Vec<Keyframe>) -> Result<Self> {
        let first = keyframes.first().ok_or(AnimationError::EmptyTrack)?;
        let kind = first.value.kind();

        for kf in &mut keyframes {
            validate_keyframe(kf, kind)?;
            kf.time = snap_time(kf.time);
        }

        let mut previous: Option<&Keyframe> = None;
        for kf in &keyframes {
            if let Some(prev) = previous {
                if kf.time == prev.time {
                    return Err(AnimationError::DuplicateTimestamp(kf.time));
                }
                if kf.time < prev.time {
                    return Err(AnimationError::UnorderedTimestamps {
                        previous: prev.time,
                        time: kf.time,
                    });
                }
                validate_segment(prev, kf)?;
            }
            previous = Some(kf);
        }

        // Nothing arrives at the first keyframe
        keyframes[0].arrive = None;

        for i in 0..keyframes.len() {
            let angular = keyframes[i].interpolation == Interpolation::Angular
                || keyframes
                    .get(i + 1)
                    .is_some_and(|next| next.interpolation == Interpolation::Angular);
            if angular {
                let kf = &mut keyframes[i];
                wrap_scalar(&mut kf.value);
                if let Some(arrive) = kf.arrive.as_mut() {
                    wrap_scalar(arrive);
                }
            }
        }

        Ok(Self { kind, keyframes })
    }

    /// A single-keyframe track holding `value`
    pub fn constant(value: impl Into<Value>) -> Result<Self> {
        Self::new(vec![Keyframe::new(0.0, value, Interpolation::Step)])
    }

    pub fn builder() -> KeyframeTrackBuilder {
        KeyframeTrackBuilder::new()
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    pub fn start_time(&self) -> f64 {
        self.first().time
    }

    pub fn end_time(&self) -> f64 {
        self.last().time
    }

    pub fn first_value(&self) -> &Value {
        &self.first().value
    }

    pub fn last_value(&self) -> &Value {
        &self.last().value
    }

    fn first(&self) -> &Keyframe {
        &self.keyframes[0]
    }

    fn last(&self) -> &Keyframe {
        &self.keyframes[self.keyframes.len() - 1]
    }

    /// Evaluate the track at `t`.
    ///
    /// Before the first keyframe the first value holds, after the last the
    /// last value holds. At a keyframe's timestamp its `value` applies.
    pub fn sample(&self, t: f64) -> Value {
        let keyframes = &self.keyframes;
        if t.is_nan() || t <= keyframes[0].time {
            return keyframes[0].value.clone();
        }

        let i = keyframes.partition_point(|kf| kf.time <= t);
        if i >= keyframes.len() {
            return self.last().value.clone();
        }

        let from = &keyframes[i - 1];
        let to = &keyframes[i];
        let u = (t - from.time) / (to.time - from.time);
        interpolate(&from.value, to.arrive_value(), to.interpolation, u)
    }

    /// The same track with every timestamp moved by `offset`
    pub(crate) fn shifted(&self, offset: f64) -> Result<Self> {
        if offset == 0.0 {
            return Ok(self.clone());
        }
        let keyframes = self
            .keyframes
            .iter()
            .map(|kf| Keyframe {
                time: kf.time + offset,
                ..kf.clone()
            })
            .collect();
        Self::new(keyframes)
    }

    /// Append `next`, which must start at or after this track's end.
    ///
    /// This track's last value holds until `next` begins; at that instant a
    /// seam keyframe switches to `next`'s first value.
    pub(crate) fn joined(&self, next: &KeyframeTrack) -> Result<Self> {
        let mut keyframes = self.keyframes.clone();
        let head = next.first();

        let seam = match keyframes.pop() {
            // The left track is a single keyframe after time zero: hold it
            // from zero so the merged seam does not become the first keyframe
            Some(last) if last.time == head.time && keyframes.is_empty() && last.time > 0.0 => {
                let held = last.arrive.unwrap_or(last.value);
                keyframes.push(Keyframe::new(0.0, held.clone(), Interpolation::Step));
                Keyframe {
                    time: head.time,
                    value: head.value.clone(),
                    arrive: (held != head.value).then_some(held),
                    interpolation: Interpolation::Step,
                }
            }
            Some(last) if last.time == head.time => {
                let arrive = last.arrive.unwrap_or(last.value);
                Keyframe {
                    time: head.time,
                    value: head.value.clone(),
                    arrive: (arrive != head.value).then_some(arrive),
                    interpolation: last.interpolation,
                }
            }
            Some(last) => {
                keyframes.push(last);
                Keyframe::new(head.time, head.value.clone(), Interpolation::Step)
            }
            None => return Err(AnimationError::EmptyTrack),
        };

        keyframes.push(seam);
        keyframes.extend(next.keyframes[1..].iter().cloned());
        Self::new(keyframes)
    }
}

fn validate_keyframe(kf: &Keyframe, kind: ValueKind) -> Result<()> {
    if !kf.time.is_finite() || kf.time < 0.0 {
        return Err(AnimationError::InvalidTime(kf.time));
    }
    for value in std::iter::once(&kf.value).chain(kf.arrive.as_ref()) {
        if value.kind() != kind {
            return Err(AnimationError::MixedValueKinds {
                time: kf.time,
                expected: kind,
                found: value.kind(),
            });
        }
        if !value.is_finite() {
            return Err(AnimationError::NonFiniteValue { time: kf.time });
        }
    }
    if let Interpolation::Eased(easing) = kf.interpolation {
        if !easing.is_finite() {
            return Err(AnimationError::NonFiniteEasing { time: kf.time });
        }
    }
    if !kf.interpolation.supports(kind) {
        return Err(AnimationError::UnsupportedInterpolation {
            interpolation: kf.interpolation.name(),
            kind,
        });
    }
    Ok(())
}

fn validate_segment(from: &Keyframe, to: &Keyframe) -> Result<()> {
    match (to.interpolation, &from.value, to.arrive_value()) {
        (Interpolation::Morph, Value::Vertices(left), Value::Vertices(right))
            if left.len() != right.len() =>
        {
            Err(AnimationError::VertexCountMismatch {
                time: to.time,
                left: left.len(),
                right: right.len(),
            })
        }
        (Interpolation::Warp, Value::Warp(left), Value::Warp(right))
            if !left.same_family(right) =>
        {
            Err(AnimationError::WarpFamilyMismatch {
                time: to.time,
                left: left.family_name(),
                right: right.family_name(),
            })
        }
        _ => Ok(()),
    }
}

/// Interpolate between two values of the same kind at progress `u`
pub(crate) fn interpolate(from: &Value, to: &Value, interpolation: Interpolation, u: f64) -> Value {
    match interpolation {
        Interpolation::Step => from.clone(),
        Interpolation::Linear | Interpolation::Morph | Interpolation::Warp => lerp(from, to, u),
        Interpolation::Eased(easing) => lerp(from, to, easing.apply(u)),
        Interpolation::Angular => match (from, to) {
            (Value::Scalar(a), Value::Scalar(b)) => {
                Value::Scalar(wrap_angle(a + wrap_angle(b - a) * u))
            }
            _ => from.clone(),
        },
    }
}

fn wrap_scalar(value: &mut Value) {
    if let Value::Scalar(angle) = value {
        *angle = wrap_angle(*angle);
    }
}

fn lerp(from: &Value, to: &Value, u: f64) -> Value {
    match (from, to) {
        (Value::Scalar(a), Value::Scalar(b)) => Value::Scalar(a + (b - a) * u),
        (Value::Vector(a), Value::Vector(b)) => Value::Vector(a.lerp(*b, u)),
        (Value::Color(a), Value::Color(b)) => Value::Color(a.lerp(*b, u)),
        (Value::Vertices(a), Value::Vertices(b)) if a.len() == b.len() => {
            Value::Vertices(a.iter().zip(b).map(|(p, q)| p.lerp(*q, u)).collect())
        }
        (Value::Warp(a), Value::Warp(b)) => a
            .lerp(b, u)
            .map(Value::Warp)
            .unwrap_or_else(|| from.clone()),
        // Kinds were checked on construction
        _ => from.clone(),
    }
}

// ============================================================================
// Keyframe Track Builder
// ============================================================================

/// Builder for keyframe tracks with a fluent API
///
/// # Example
///
/// ```
/// use tesserax_animation::{Easing, KeyframeTrack};
///
/// let track = KeyframeTrack::builder()
///     .at(0.0, 0.0)
///     .at(0.5, 80.0)
///     .at(1.0, 100.0)
///     .ease(Easing::EaseOut)
///     .build()
///     .unwrap();
/// assert_eq!(track.len(), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct KeyframeTrackBuilder {
    /// Keyframes, with whether their interpolation was set explicitly
    points: Vec<(Keyframe, bool)>,
    default_interpolation: Option<Interpolation>,
}

impl KeyframeTrackBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a keyframe using the default interpolation
    pub fn at(mut self, time: f64, value: impl Into<Value>) -> Self {
        let value = value.into();
        let interpolation = self
            .default_interpolation
            .unwrap_or_else(|| Interpolation::for_kind(value.kind(), Easing::Linear));
        self.points
            .push((Keyframe::new(time, value, interpolation), false));
        self
    }

    /// Add a keyframe with a specific interpolation for its arriving segment
    pub fn at_with(
        mut self,
        time: f64,
        value: impl Into<Value>,
        interpolation: Interpolation,
    ) -> Self {
        self.points
            .push((Keyframe::new(time, value, interpolation), true));
        self
    }

    /// Set the interpolation for every keyframe not given one explicitly
    pub fn interpolation(mut self, interpolation: Interpolation) -> Self {
        self.default_interpolation = Some(interpolation);
        for (kf, explicit) in &mut self.points {
            if !*explicit {
                kf.interpolation = interpolation;
            }
        }
        self
    }

    /// Shorthand for `interpolation(Interpolation::Eased(easing))`
    pub fn ease(self, easing: Easing) -> Self {
        self.interpolation(Interpolation::Eased(easing))
    }

    /// Shorthand for `interpolation(Interpolation::Angular)`
    pub fn angular(self) -> Self {
        self.interpolation(Interpolation::Angular)
    }

    /// Sort keyframes by time and validate
    pub fn build(self) -> Result<KeyframeTrack> {
        let mut keyframes: Vec<Keyframe> = self.points.into_iter().map(|(kf, _)| kf).collect();
        keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));
        KeyframeTrack::new(keyframes)
    }
}
