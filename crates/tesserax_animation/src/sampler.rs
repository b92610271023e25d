//! Sampling clips into frames
//!
//! [`sample`] is a pure function of `(clip, t)`: the same query always yields
//! the same [`Frame`]. Queries outside `[0, duration]` clamp to the nearest
//! end. [`Sampler`] walks a clip at a fixed output frame rate, independent of
//! how the clip was produced.

use std::collections::btree_map;
use std::collections::BTreeMap;

use tesserax_core::{Animatable, Point, Property, TargetId, Value};

use crate::clip::{Clip, TrackKey};
use crate::error::{AnimationError, Result};

/// Resolved property values at one instant
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub time: f64,
    pub values: BTreeMap<TrackKey, Value>,
}

impl Frame {
    pub fn get(&self, target: TargetId, property: Property) -> Option<&Value> {
        self.values.get(&TrackKey::new(target, property))
    }

    /// The target's vertex list with its warp applied, if it has vertices
    pub fn shape(&self, target: TargetId) -> Option<Vec<Point>> {
        let vertices = self.get(target, Property::Vertices)?.as_vertices()?;
        match self.get(target, Property::Warp).and_then(Value::as_warp) {
            Some(warp) => Some(warp.apply(vertices)),
            None => Some(vertices.to_vec()),
        }
    }

    /// Push this frame's values for `entity` into it.
    ///
    /// Vertices are sent already warped. The warp itself is only forwarded
    /// when the frame has no vertices for the entity.
    pub fn apply_to(&self, entity: &mut impl Animatable) {
        let target = entity.target_id();
        let shape = self.shape(target);

        for (key, value) in self.values.range(target_range(target)) {
            match (key.property, &shape) {
                (Property::Vertices, Some(shape)) => {
                    entity.set_property(Property::Vertices, &Value::Vertices(shape.clone()));
                }
                (Property::Warp, Some(_)) => {}
                (property, _) => entity.set_property(property, value),
            }
        }
    }

    pub fn iter(&self) -> btree_map::Iter<'_, TrackKey, Value> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn target_range(target: TargetId) -> std::ops::RangeInclusive<TrackKey> {
    let first = Property::ALL[0];
    let last = Property::ALL[Property::ALL.len() - 1];
    TrackKey::new(target, first)..=TrackKey::new(target, last)
}

/// Evaluate every track of `clip` at `t`, clamped to `[0, duration]`
pub fn sample(clip: &Clip, t: f64) -> Frame {
    let time = if t.is_nan() {
        0.0
    } else {
        t.clamp(0.0, clip.duration())
    };

    let values = clip
        .tracks()
        .iter()
        .map(|(key, track)| (*key, track.sample(time)))
        .collect();

    Frame { time, values }
}

/// Iterator over a clip's frames at a fixed output frame rate
///
/// Yields `(index, time, frame)` with `time = index / fps`; the final frame is
/// clamped to the clip's duration so the end state is always produced.
#[derive(Clone, Debug)]
pub struct Sampler<'a> {
    clip: &'a Clip,
    fps: f64,
    index: usize,
    count: usize,
}

impl<'a> Sampler<'a> {
    pub fn frames(clip: &'a Clip, fps: f64) -> Result<Self> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(AnimationError::InvalidFrameRate(fps));
        }
        // Absorb rounding so an exact multiple of the frame period does not
        // produce an extra frame
        let count = (clip.duration() * fps - 1e-9).ceil().max(0.0) as usize + 1;
        Ok(Self {
            clip,
            fps,
            index: 0,
            count,
        })
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn frame_count(&self) -> usize {
        self.count
    }
}

impl Iterator for Sampler<'_> {
    type Item = (usize, f64, Frame);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.count {
            return None;
        }
        let index = self.index;
        self.index += 1;

        let time = (index as f64 / self.fps).min(self.clip.duration());
        Some((index, time, sample(self.clip, time)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Sampler<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use crate::timeline::parallel;
    use tesserax_core::{Color, Vec2, Warp};

    const DOT: TargetId = TargetId(1);

    #[derive(Default)]
    struct Shape {
        position: Vec2,
        vertices: Vec<Point>,
        warp: Option<Warp>,
        fill: Color,
    }

    impl Animatable for Shape {
        fn target_id(&self) -> TargetId {
            DOT
        }

        fn set_property(&mut self, property: Property, value: &Value) {
            match (property, value) {
                (Property::Position, Value::Vector(v)) => self.position = *v,
                (Property::Vertices, Value::Vertices(v)) => self.vertices = v.clone(),
                (Property::Warp, Value::Warp(w)) => self.warp = Some(*w),
                (Property::Fill, Value::Color(c)) => self.fill = *c,
                _ => {}
            }
        }
    }

    fn slide() -> Clip {
        Clip::tween(DOT, Property::Position, Vec2::ZERO, Vec2::new(10.0, 0.0), 1.0, Easing::Linear)
            .unwrap()
    }

    #[test]
    fn sample_clamps_out_of_range() {
        let clip = slide();
        assert_eq!(sample(&clip, -5.0), sample(&clip, 0.0));
        assert_eq!(sample(&clip, 5.0), sample(&clip, 1.0));
        assert_eq!(sample(&clip, f64::NAN).time, 0.0);
        assert_eq!(
            sample(&clip, 2.0).get(DOT, Property::Position),
            Some(&Value::Vector(Vec2::new(10.0, 0.0)))
        );
    }

    #[test]
    fn sampling_is_idempotent() {
        let clip = slide();
        let first = sample(&clip, 0.37);
        let second = sample(&clip, 0.37);
        assert_eq!(first, second);
    }

    #[test]
    fn frame_count_and_last_frame_time() {
        let clip = slide();
        let frames: Vec<_> = Sampler::frames(&clip, 30.0).unwrap().collect();
        assert_eq!(frames.len(), 31);
        assert_eq!(frames[0].1, 0.0);
        assert_eq!(frames[30].1, 1.0);

        let clip = Clip::wait(0.25).unwrap();
        let frames: Vec<_> = Sampler::frames(&clip, 10.0).unwrap().collect();
        assert_eq!(frames.len(), 4);
        assert_eq!(frames[3].1, 0.25);
    }

    #[test]
    fn zero_duration_clip_has_one_frame() {
        let clip = Clip::empty();
        let sampler = Sampler::frames(&clip, 60.0).unwrap();
        assert_eq!(sampler.len(), 1);
    }

    #[test]
    fn invalid_frame_rate_is_rejected() {
        let clip = slide();
        assert_eq!(
            Sampler::frames(&clip, 0.0).err(),
            Some(AnimationError::InvalidFrameRate(0.0))
        );
        assert!(Sampler::frames(&clip, f64::INFINITY).is_err());
    }

    #[test]
    fn shape_applies_warp_to_sampled_vertices() {
        let square = vec![Point::new(0.0, 0.0), Point::new(0.0, 1.0)];
        let morph = Clip::morph(DOT, square.clone(), square.clone(), 1.0).unwrap();
        let shear = Clip::warp(DOT, Warp::NONE, Warp::Shear { x: 2.0, y: 0.0 }, 1.0).unwrap();
        let clip = parallel(&morph, &shear).unwrap();

        let frame = sample(&clip, 0.5);
        let shape = frame.shape(DOT).unwrap();
        assert_eq!(shape, Warp::Shear { x: 1.0, y: 0.0 }.apply(&square));
        // The stored vertex track is not modified by the warp
        assert_eq!(frame.get(DOT, Property::Vertices).unwrap().as_vertices().unwrap(), &square[..]);
    }

    #[test]
    fn apply_to_pushes_values_for_matching_target() {
        let square = vec![Point::new(0.0, 0.0), Point::new(0.0, 1.0)];
        let clip = parallel(
            &slide(),
            &parallel(
                &Clip::morph(DOT, square.clone(), square.clone(), 1.0).unwrap(),
                &Clip::warp(DOT, Warp::NONE, Warp::Shear { x: 2.0, y: 0.0 }, 1.0).unwrap(),
            )
            .unwrap(),
        )
        .unwrap();
        let other = Clip::tween(TargetId(9), Property::Fill, Color::RED, Color::BLUE, 1.0, Easing::Linear)
            .unwrap();
        let clip = parallel(&clip, &other).unwrap();

        let mut shape = Shape::default();
        sample(&clip, 1.0).apply_to(&mut shape);

        assert_eq!(shape.position, Vec2::new(10.0, 0.0));
        assert_eq!(shape.vertices, Warp::Shear { x: 2.0, y: 0.0 }.apply(&square));
        assert_eq!(shape.warp, None);
        assert_eq!(shape.fill, Color::default());
    }

    #[test]
    fn apply_to_forwards_warp_without_vertices() {
        let clip = Clip::warp(DOT, Warp::NONE, Warp::Shear { x: 2.0, y: 0.0 }, 1.0).unwrap();
        let mut shape = Shape::default();
        sample(&clip, 1.0).apply_to(&mut shape);
        assert_eq!(shape.warp, Some(Warp::Shear { x: 2.0, y: 0.0 }));
    }
}
