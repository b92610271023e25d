//! Timeline algebra: sequential and parallel composition of clips
//!
//! Both operators return a new [`Clip`], so expressions nest freely:
//! `parallel(&sequential(&a, &b)?, &c)?`.
//!
//! - [`sequential`] plays `b` after `a`. Tracks of `b` are shifted by
//!   `a.duration()`. A property animated on one side only holds its last
//!   value across the other side. When both sides animate it, `a`'s last value
//!   holds until `b`'s first keyframe, where `b` takes over.
//! - [`parallel`] starts both at time zero and lasts as long as the longer
//!   one. When both animate the same property the right operand wins for the
//!   whole clip. This is the one asymmetry of `parallel`.

use std::collections::BTreeMap;

use tracing::debug;

use crate::clip::{Clip, TrackKey};
use crate::error::{AnimationError, Result};
use crate::keyframe::KeyframeTrack;

/// Play `b` after `a`
pub fn sequential(a: &Clip, b: &Clip) -> Result<Clip> {
    let offset = a.duration();
    let mut tracks: BTreeMap<TrackKey, KeyframeTrack> = a.tracks().clone();

    for (key, right) in b.tracks() {
        let shifted = right.shifted(offset)?;
        let track = match tracks.remove(key) {
            Some(left) => {
                check_compatible(*key, &left, right)?;
                left.joined(&shifted)?
            }
            None => shifted,
        };
        tracks.insert(*key, track);
    }

    let duration = offset + b.duration();
    debug!(
        left = a.name(),
        right = b.name(),
        duration,
        tracks = tracks.len(),
        "sequential composition"
    );
    Clip::new(compose_name(a, b, "+"), duration, tracks)
}

/// Play `a` and `b` together; `b` wins on shared tracks
pub fn parallel(a: &Clip, b: &Clip) -> Result<Clip> {
    let mut tracks: BTreeMap<TrackKey, KeyframeTrack> = a.tracks().clone();

    for (key, right) in b.tracks() {
        if let Some(left) = tracks.get(key) {
            check_compatible(*key, left, right)?;
            debug!(track = %key, left = a.name(), right = b.name(), "parallel track overridden");
        }
        tracks.insert(*key, right.clone());
    }

    let duration = a.duration().max(b.duration());
    debug!(
        left = a.name(),
        right = b.name(),
        duration,
        tracks = tracks.len(),
        "parallel composition"
    );
    Clip::new(compose_name(a, b, "|"), duration, tracks)
}

/// Play every clip in order; an empty iterator gives an empty clip
pub fn sequence<'a>(clips: impl IntoIterator<Item = &'a Clip>) -> Result<Clip> {
    clips
        .into_iter()
        .try_fold(Clip::empty(), |acc, clip| sequential(&acc, clip))
}

/// Play every clip together; later clips win on shared tracks
pub fn stack<'a>(clips: impl IntoIterator<Item = &'a Clip>) -> Result<Clip> {
    clips
        .into_iter()
        .try_fold(Clip::empty(), |acc, clip| parallel(&acc, clip))
}

fn check_compatible(key: TrackKey, left: &KeyframeTrack, right: &KeyframeTrack) -> Result<()> {
    if left.kind() != right.kind() {
        return Err(AnimationError::IncompatibleTracks {
            key,
            left: left.kind(),
            right: right.kind(),
        });
    }
    Ok(())
}

fn compose_name(a: &Clip, b: &Clip, op: &str) -> String {
    match (a.name().is_empty(), b.name().is_empty()) {
        (true, _) => b.name().to_string(),
        (_, true) => a.name().to_string(),
        _ => format!("{} {op} {}", a.name(), b.name()),
    }
}

impl Clip {
    /// `sequential(self, next)`
    pub fn then(&self, next: &Clip) -> Result<Clip> {
        sequential(self, next)
    }

    /// `parallel(self, other)`
    pub fn with(&self, other: &Clip) -> Result<Clip> {
        parallel(self, other)
    }

    /// Start this clip after `delay` seconds
    pub fn delayed(&self, delay: f64) -> Result<Clip> {
        sequential(&Clip::wait(delay)?, self)
    }

    /// Surround this clip with idle time
    pub fn padded(&self, before: f64, after: f64) -> Result<Clip> {
        let head = sequential(&Clip::wait(before)?, self)?;
        sequential(&head, &Clip::wait(after)?)
    }

    /// Play this clip `count` times back to back
    pub fn repeated(&self, count: usize) -> Result<Clip> {
        let mut result = Clip::empty();
        for _ in 0..count {
            result = sequential(&result, self)?;
        }
        Ok(result.renamed(format!("{} x{count}", self.name())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use crate::keyframe::Interpolation;
    use pretty_assertions::assert_eq;
    use tesserax_core::{Color, Property, TargetId, Value, Vec2};

    const DOT: TargetId = TargetId(1);
    const BOX: TargetId = TargetId(2);

    fn opacity(clip: &Clip, t: f64) -> f64 {
        clip.track(DOT, Property::Opacity)
            .unwrap()
            .sample(t)
            .as_scalar()
            .unwrap()
    }

    fn fade(from: f64, to: f64, duration: f64) -> Clip {
        Clip::tween(DOT, Property::Opacity, from, to, duration, Easing::Linear).unwrap()
    }

    #[test]
    fn sequential_shifts_right_tracks() {
        let a = fade(0.0, 1.0, 1.0);
        let b = Clip::tween(BOX, Property::Scale, 1.0, 2.0, 2.0, Easing::Linear).unwrap();
        let ab = sequential(&a, &b).unwrap();

        assert_eq!(ab.duration(), 3.0);
        let scale = ab.track(BOX, Property::Scale).unwrap();
        assert_eq!(scale.start_time(), 1.0);
        assert_eq!(scale.end_time(), 3.0);
        assert_eq!(scale.sample(0.5), Value::Scalar(1.0));
        assert_eq!(scale.sample(2.0), Value::Scalar(1.5));
        assert_eq!(ab.name(), "tween #1.opacity + tween #2.scale");
    }

    #[test]
    fn sequential_holds_property_animated_on_left_only() {
        let a = fade(0.0, 0.8, 1.0);
        let b = Clip::wait(2.0).unwrap();
        let ab = sequential(&a, &b).unwrap();
        assert_eq!(opacity(&ab, 1.0), 0.8);
        assert_eq!(opacity(&ab, 2.5), 0.8);
    }

    #[test]
    fn sequential_joins_shared_property_at_seam() {
        let a = fade(0.0, 1.0, 1.0);
        let b = fade(1.0, 0.0, 1.0);
        let ab = sequential(&a, &b).unwrap();

        let track = ab.track(DOT, Property::Opacity).unwrap();
        assert_eq!(track.len(), 3);
        assert_eq!(opacity(&ab, 0.5), 0.5);
        assert_eq!(opacity(&ab, 1.0), 1.0);
        assert_eq!(opacity(&ab, 1.5), 0.5);
    }

    #[test]
    fn sequential_seam_keeps_both_segment_curves() {
        let a = Clip::tween(DOT, Property::Opacity, 0.0, 1.0, 1.0, Easing::EaseIn).unwrap();
        let b = fade(0.5, 0.0, 1.0);
        let ab = sequential(&a, &b).unwrap();

        // EaseIn at u = 0.5 is 0.125
        assert!((opacity(&ab, 0.5) - 0.125).abs() < 1e-12);
        assert!((opacity(&ab, 1.0 - 1e-9) - 1.0).abs() < 1e-6);
        assert_eq!(opacity(&ab, 1.0), 0.5);
        assert_eq!(opacity(&ab, 1.5), 0.25);

        let seam = &ab.track(DOT, Property::Opacity).unwrap().keyframes()[1];
        assert_eq!(seam.interpolation, Interpolation::Eased(Easing::EaseIn));
        assert_eq!(seam.arrive, Some(Value::Scalar(1.0)));
    }

    #[test]
    fn sequential_holds_left_value_until_delayed_right_starts() {
        let a = fade(0.0, 1.0, 1.0);
        let b = fade(0.0, 0.5, 1.0).delayed(0.5).unwrap();
        let ab = sequential(&a, &b).unwrap();
        assert_eq!(ab.duration(), 2.5);
        assert_eq!(opacity(&ab, 1.25), 1.0);
        assert_eq!(opacity(&ab, 1.5), 0.0);
        assert_eq!(opacity(&ab, 2.0), 0.25);
    }

    #[test]
    fn sequential_is_associative() {
        let a = fade(0.0, 1.0, 0.5);
        let b = Clip::tween(BOX, Property::Position, Vec2::ZERO, Vec2::new(4.0, 0.0), 1.0, Easing::Linear)
            .unwrap();
        let c = fade(0.25, 0.75, 0.25).delayed(0.25).unwrap();

        let left = sequential(&sequential(&a, &b).unwrap(), &c).unwrap();
        let right = sequential(&a, &sequential(&b, &c).unwrap()).unwrap();

        assert_eq!(left.duration(), right.duration());
        for i in 0..=80 {
            let t = i as f64 / 40.0;
            for key in left.keys() {
                let l = left.tracks()[&key].sample(t);
                let r = right.tracks()[&key].sample(t);
                assert_eq!(l, r, "{key} at {t}");
            }
        }
        assert_eq!(left.keys().collect::<Vec<_>>(), right.keys().collect::<Vec<_>>());
    }

    #[test]
    fn parallel_duration_is_max() {
        let a = fade(0.0, 1.0, 1.0);
        let b = Clip::tween(BOX, Property::Fill, Color::RED, Color::BLUE, 3.0, Easing::Linear).unwrap();
        assert_eq!(parallel(&a, &b).unwrap().duration(), 3.0);
        assert_eq!(parallel(&b, &a).unwrap().duration(), 3.0);
        assert_eq!(parallel(&b, &a).unwrap().name(), "tween #2.fill | tween #1.opacity");
    }

    #[test]
    fn parallel_right_operand_wins() {
        let a = Clip::keyframes(DOT, Property::Opacity, KeyframeTrack::constant(0.0).unwrap())
            .unwrap()
            .padded(0.0, 1.0)
            .unwrap();
        let b = fade(0.0, 10.0, 1.0);
        let ab = parallel(&a, &b).unwrap();
        assert_eq!(opacity(&ab, 0.5), 5.0);

        let ba = parallel(&b, &a).unwrap();
        assert_eq!(opacity(&ba, 0.5), 0.0);
    }

    #[test]
    fn parallel_keeps_disjoint_tracks() {
        let a = fade(0.0, 1.0, 1.0);
        let b = Clip::tween(BOX, Property::Rotation, 0.0, 1.0, 2.0, Easing::Linear).unwrap();
        let ab = parallel(&a, &b).unwrap();
        assert_eq!(ab.tracks().len(), 2);
        assert_eq!(opacity(&ab, 1.5), 1.0);
    }

    #[test]
    fn sequence_and_stack_fold() {
        let clips = [fade(0.0, 1.0, 1.0), Clip::wait(0.5).unwrap(), fade(1.0, 0.0, 1.0)];
        let seq = sequence(&clips).unwrap();
        assert_eq!(seq.duration(), 2.5);
        assert_eq!(opacity(&seq, 1.25), 1.0);

        let stacked = stack(&clips).unwrap();
        assert_eq!(stacked.duration(), 1.0);
        assert_eq!(opacity(&stacked, 0.25), 0.75);

        assert_eq!(sequence([]).unwrap(), Clip::empty());
    }

    #[test]
    fn empty_clip_is_identity() {
        let a = fade(0.0, 1.0, 1.0);
        assert_eq!(sequential(&Clip::empty(), &a).unwrap(), a);
        assert_eq!(sequential(&a, &Clip::empty()).unwrap(), a);
        assert_eq!(parallel(&Clip::empty(), &a).unwrap(), a);
    }

    #[test]
    fn padded_and_repeated() {
        let a = fade(0.0, 1.0, 1.0);
        let padded = a.padded(0.5, 0.25).unwrap();
        assert_eq!(padded.duration(), 1.75);
        assert_eq!(opacity(&padded, 0.25), 0.0);
        assert_eq!(opacity(&padded, 1.0), 0.5);

        let thrice = a.repeated(3).unwrap();
        assert_eq!(thrice.duration(), 3.0);
        assert_eq!(opacity(&thrice, 1.5), 0.5);
        assert_eq!(opacity(&thrice, 2.25), 0.25);
        assert_eq!(thrice.name(), "tween #1.opacity x3");

        assert_eq!(a.repeated(0).unwrap().duration(), 0.0);
    }

    #[test]
    fn then_and_with_match_free_functions() {
        let a = fade(0.0, 1.0, 1.0);
        let b = fade(1.0, 0.0, 0.5);
        assert_eq!(a.then(&b).unwrap(), sequential(&a, &b).unwrap());
        assert_eq!(a.with(&b).unwrap(), parallel(&a, &b).unwrap());
    }

    #[test]
    fn sequential_keeps_single_late_left_keyframe() {
        let late = KeyframeTrack::builder().at(0.5, 7.0).build().unwrap();
        let a = Clip::keyframes(DOT, Property::Opacity, late).unwrap();
        let ab = sequential(&a, &fade(0.0, 1.0, 1.0)).unwrap();
        assert_eq!(ab.duration(), 1.5);
        assert_eq!(opacity(&ab, 0.2), 7.0);
        assert_eq!(opacity(&ab, 0.5), 0.0);
        assert_eq!(opacity(&ab, 1.0), 0.5);

        let jump = fade(0.0, 0.4, 0.0).delayed(1.0).unwrap();
        let jb = sequential(&jump, &fade(0.9, 1.0, 1.0)).unwrap();
        assert_eq!(opacity(&jb, 0.5), 0.4);
        assert_eq!(opacity(&jb, 1.0), 0.9);
        assert!((opacity(&jb, 1.5) - 0.95).abs() < 1e-12);
    }

    #[test]
    fn sequential_is_associative_for_decimal_durations() {
        let a = fade(0.0, 1.0, 0.1);
        let b = Clip::wait(0.2).unwrap();
        let c = fade(1.0, 0.0, 0.3);

        let left = sequential(&sequential(&a, &b).unwrap(), &c).unwrap();
        let right = sequential(&a, &sequential(&b, &c).unwrap()).unwrap();

        assert_eq!(left.duration(), 0.6);
        assert_eq!(right.duration(), 0.6);
        assert_eq!(left.tracks(), right.tracks());
        assert_eq!(opacity(&left, 0.2), 1.0);
        assert!((opacity(&left, 0.45) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn mismatched_track_kinds_are_incompatible() {
        let key = TrackKey::new(DOT, Property::Opacity);
        let scalar = KeyframeTrack::constant(0.0).unwrap();
        let vector = KeyframeTrack::constant(Vec2::ZERO).unwrap();
        assert!(check_compatible(key, &scalar, &scalar).is_ok());
        assert!(matches!(
            check_compatible(key, &scalar, &vector),
            Err(AnimationError::IncompatibleTracks { .. })
        ));
    }
}
