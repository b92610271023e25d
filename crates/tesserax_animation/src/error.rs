//! Error types for track construction and clip composition

use tesserax_core::ValueKind;
use thiserror::Error;

use crate::clip::TrackKey;

/// Animation authoring errors
///
/// Construction errors are raised when a track or clip is built, composition
/// errors when two clips are combined. Sampling never fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnimationError {
    /// A track needs at least one keyframe
    #[error("keyframe track has no keyframes")]
    EmptyTrack,

    /// Keyframe time is negative, NaN or infinite
    #[error("keyframe time {0} is not a finite, non-negative number")]
    InvalidTime(f64),

    /// Two keyframes share a timestamp
    #[error("duplicate keyframe timestamp {0}")]
    DuplicateTimestamp(f64),

    /// Keyframes are not in increasing time order
    #[error("keyframe at {time} precedes the previous keyframe at {previous}")]
    UnorderedTimestamps { previous: f64, time: f64 },

    /// A keyframe value does not match the track's value kind
    #[error("keyframe at {time} holds a {found} value in a {expected} track")]
    MixedValueKinds {
        time: f64,
        expected: ValueKind,
        found: ValueKind,
    },

    /// The interpolation cannot produce values of this kind
    #[error("{interpolation} interpolation cannot animate {kind} values")]
    UnsupportedInterpolation {
        interpolation: &'static str,
        kind: ValueKind,
    },

    /// A morph segment joins polylines with different vertex counts
    #[error("morph segment ending at {time} joins {left} vertices to {right}")]
    VertexCountMismatch {
        time: f64,
        left: usize,
        right: usize,
    },

    /// A warp segment joins two different warp families
    #[error("warp segment ending at {time} joins a {left} warp to a {right} warp")]
    WarpFamilyMismatch {
        time: f64,
        left: &'static str,
        right: &'static str,
    },

    /// A keyframe value contains NaN or infinity
    #[error("keyframe at {time} holds a non-finite value")]
    NonFiniteValue { time: f64 },

    /// An eased segment's curve has a NaN or infinite control point
    #[error("keyframe at {time} uses an easing curve with non-finite control points")]
    NonFiniteEasing { time: f64 },

    /// Clip duration is negative, NaN or infinite
    #[error("clip duration {0} is not a finite, non-negative number")]
    InvalidDuration(f64),

    /// A track runs past the end of its clip
    #[error("track {key} ends at {end}, past the clip duration {duration}")]
    TrackExceedsDuration {
        key: TrackKey,
        end: f64,
        duration: f64,
    },

    /// A track's values do not match its property
    #[error("track {key} holds {found} values, its property requires {expected}")]
    PropertyKindMismatch {
        key: TrackKey,
        expected: ValueKind,
        found: ValueKind,
    },

    /// The same (target, property) pair was given two tracks
    #[error("clip defines track {0} more than once")]
    DuplicateTrack(TrackKey),

    /// Two composed clips animate the same property with different value kinds.
    ///
    /// Every [`Property`](tesserax_core::Property) fixes its value kind and
    /// [`Clip::new`](crate::Clip::new) enforces it, so clips that passed
    /// construction never raise this.
    #[error("cannot compose track {key}: {left} values on the left, {right} values on the right")]
    IncompatibleTracks {
        key: TrackKey,
        left: ValueKind,
        right: ValueKind,
    },

    /// Output frame rate must be finite and positive
    #[error("frame rate {0} must be finite and positive")]
    InvalidFrameRate(f64),
}

/// Result type for animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;
