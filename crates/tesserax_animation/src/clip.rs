//! Clips: immutable bundles of keyframe tracks
//!
//! A [`Clip`] maps `(target, property)` pairs to [`KeyframeTrack`]s and
//! carries a duration. Baked physics and hand-authored tweens produce the same
//! type, and the timeline operators combine clips into new clips.

use std::collections::BTreeMap;
use std::fmt;

use tesserax_core::{Point, Property, TargetId, Value, Warp};

use crate::easing::Easing;
use crate::error::{AnimationError, Result};
use crate::keyframe::{snap_time, Interpolation, Keyframe, KeyframeTrack};

/// Address of one animated property of one target
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackKey {
    pub target: TargetId,
    pub property: Property,
}

impl TrackKey {
    pub const fn new(target: TargetId, property: Property) -> Self {
        Self { target, property }
    }
}

impl fmt::Display for TrackKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.target, self.property)
    }
}

/// A named, immutable set of keyframe tracks with a duration
#[derive(Clone, Debug, PartialEq)]
pub struct Clip {
    name: String,
    duration: f64,
    tracks: BTreeMap<TrackKey, KeyframeTrack>,
}

impl Clip {
    /// Build a clip, validating every track against its key and the duration
    pub fn new(
        name: impl Into<String>,
        duration: f64,
        tracks: impl IntoIterator<Item = (TrackKey, KeyframeTrack)>,
    ) -> Result<Self> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(AnimationError::InvalidDuration(duration));
        }
        let duration = snap_time(duration);

        let mut map = BTreeMap::new();
        for (key, track) in tracks {
            let expected = key.property.value_kind();
            if track.kind() != expected {
                return Err(AnimationError::PropertyKindMismatch {
                    key,
                    expected,
                    found: track.kind(),
                });
            }
            if track.end_time() > duration {
                return Err(AnimationError::TrackExceedsDuration {
                    key,
                    end: track.end_time(),
                    duration,
                });
            }
            if map.insert(key, track).is_some() {
                return Err(AnimationError::DuplicateTrack(key));
            }
        }

        Ok(Self {
            name: name.into(),
            duration,
            tracks: map,
        })
    }

    /// A clip with no tracks and zero duration, the identity of both operators
    pub fn empty() -> Self {
        Self {
            name: String::new(),
            duration: 0.0,
            tracks: BTreeMap::new(),
        }
    }

    /// A clip with no tracks that only takes time
    pub fn wait(duration: f64) -> Result<Self> {
        Self::new(format!("wait {duration}"), duration, [])
    }

    pub fn builder(name: impl Into<String>) -> ClipBuilder {
        ClipBuilder::new(name)
    }

    /// A single-track clip lasting until the track's last keyframe
    pub fn keyframes(target: TargetId, property: Property, track: KeyframeTrack) -> Result<Self> {
        let key = TrackKey::new(target, property);
        let duration = track.end_time();
        Self::new(key.to_string(), duration, [(key, track)])
    }

    /// Tween one property from `from` to `to` over `duration`.
    ///
    /// Vertex lists morph and warps interpolate their parameters; every other
    /// kind follows `easing`.
    pub fn tween(
        target: TargetId,
        property: Property,
        from: impl Into<Value>,
        to: impl Into<Value>,
        duration: f64,
        easing: Easing,
    ) -> Result<Self> {
        let from = from.into();
        let to = to.into();
        let interpolation = Interpolation::for_kind(from.kind(), easing);

        // A zero-length tween jumps straight to its end value
        let keyframes = if snap_time(duration) == 0.0 {
            vec![Keyframe::new(0.0, to, Interpolation::Step)]
        } else {
            vec![
                Keyframe::new(0.0, from, interpolation),
                Keyframe::new(duration, to, interpolation),
            ]
        };

        let key = TrackKey::new(target, property);
        let track = KeyframeTrack::new(keyframes)?;
        Self::new(format!("tween {key}"), duration, [(key, track)])
    }

    /// Morph a target's vertex list between two equal-length polylines
    pub fn morph(target: TargetId, from: Vec<Point>, to: Vec<Point>, duration: f64) -> Result<Self> {
        Self::tween(target, Property::Vertices, from, to, duration, Easing::Linear)
            .map(|clip| clip.renamed(format!("morph {target}")))
    }

    /// Animate the warp applied to a target's shape
    pub fn warp(target: TargetId, from: Warp, to: Warp, duration: f64) -> Result<Self> {
        Self::tween(target, Property::Warp, from, to, duration, Easing::Linear)
            .map(|clip| clip.renamed(format!("warp {target}")))
    }

    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn tracks(&self) -> &BTreeMap<TrackKey, KeyframeTrack> {
        &self.tracks
    }

    pub fn track(&self, target: TargetId, property: Property) -> Option<&KeyframeTrack> {
        self.tracks.get(&TrackKey::new(target, property))
    }

    pub fn keys(&self) -> impl Iterator<Item = TrackKey> + '_ {
        self.tracks.keys().copied()
    }

    /// Distinct targets animated by this clip, in id order
    pub fn targets(&self) -> Vec<TargetId> {
        let mut targets: Vec<TargetId> = self.tracks.keys().map(|k| k.target).collect();
        targets.dedup();
        targets
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

impl Default for Clip {
    fn default() -> Self {
        Self::empty()
    }
}

// ============================================================================
// Clip Builder
// ============================================================================

/// Builder for multi-track clips
///
/// # Example
///
/// ```
/// use tesserax_animation::{Clip, KeyframeTrack};
/// use tesserax_core::{Color, Property, TargetId};
///
/// let dot = TargetId(1);
/// let clip = Clip::builder("fade-in")
///     .track(dot, Property::Opacity, KeyframeTrack::builder().at(0.0, 0.0).at(0.5, 1.0).build()?)
///     .track(dot, Property::Fill, KeyframeTrack::constant(Color::RED)?)
///     .duration(1.0)
///     .build()?;
/// assert_eq!(clip.duration(), 1.0);
/// # Ok::<(), tesserax_animation::AnimationError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ClipBuilder {
    name: String,
    duration: Option<f64>,
    tracks: Vec<(TrackKey, KeyframeTrack)>,
}

impl ClipBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            duration: None,
            tracks: Vec::new(),
        }
    }

    /// Set the clip duration. Defaults to the latest track end.
    pub fn duration(mut self, duration: f64) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn track(mut self, target: TargetId, property: Property, track: KeyframeTrack) -> Self {
        self.tracks.push((TrackKey::new(target, property), track));
        self
    }

    pub fn build(self) -> Result<Clip> {
        let duration = self.duration.unwrap_or_else(|| {
            self.tracks
                .iter()
                .map(|(_, track)| track.end_time())
                .fold(0.0, f64::max)
        });
        Clip::new(self.name, duration, self.tracks)
    }
}
