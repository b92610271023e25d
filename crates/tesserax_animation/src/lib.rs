//! Tesserax Animation System
//!
//! Keyframe tracks, clips, timeline composition and frame sampling.
//!
//! # Features
//!
//! - **Keyframe Tracks**: Validated, time-ordered values with per-segment
//!   interpolation (linear, step, eased, angular, morph, warp)
//! - **Clips**: Immutable bundles of tracks, authored by hand or baked from
//!   a simulation
//! - **Timeline Algebra**: Sequential and parallel composition, closed over
//!   clips
//! - **Sampling**: Pure, framerate-independent evaluation of a clip at any time
//!
//! # Example
//!
//! ```
//! use tesserax_animation::{sample, sequential, Clip, Easing};
//! use tesserax_core::{Color, Property, TargetId, Vec2};
//!
//! let ball = TargetId(1);
//! let slide = Clip::tween(ball, Property::Position, Vec2::ZERO, Vec2::new(100.0, 0.0), 1.0, Easing::EaseInOut)?;
//! let blush = Clip::tween(ball, Property::Fill, Color::WHITE, Color::RED, 0.5, Easing::Linear)?;
//!
//! let clip = sequential(&slide, &blush)?;
//! let frame = sample(&clip, 1.5);
//! assert_eq!(frame.get(ball, Property::Fill).and_then(|v| v.as_color()), Some(Color::RED));
//! # Ok::<(), tesserax_animation::AnimationError>(())
//! ```

pub mod clip;
pub mod easing;
pub mod error;
pub mod keyframe;
#[cfg(feature = "serde")]
mod persist;
pub mod sampler;
pub mod timeline;

pub use clip::{Clip, ClipBuilder, TrackKey};
pub use easing::Easing;
pub use error::{AnimationError, Result};
pub use keyframe::{
    snap_time, Interpolation, Keyframe, KeyframeTrack, KeyframeTrackBuilder, TICKS_PER_SECOND,
};
pub use sampler::{sample, Frame, Sampler};
pub use timeline::{parallel, sequence, sequential, stack};
