//! Full pipeline: simulate, bake, compose with authored tweens, sample

use pretty_assertions::assert_eq;
use tesserax_animation::{sample, sequential, Clip, Easing, Sampler};
use tesserax_core::{Animatable, Color, Property, TargetId, Value, Vec2};
use tesserax_physics::prelude::*;

const BALL: TargetId = TargetId(7);
const G: f64 = 9.8;

fn dropped_ball(strategy: BakeStrategy) -> Clip {
    let config = SimulationConfig::default()
        .with_timestep(1.0 / 1000.0)
        .with_bake_rate(30.0)
        .with_bake_strategy(strategy);
    let mut world = World::from_config(&config).unwrap();
    world.add_body(BodyDesc::new(BALL)).unwrap();
    world.add_field(Gravity::down(G)).unwrap();

    let trajectory = world.run(1.0).unwrap();
    Baker::from_config(&config).unwrap().bake(&trajectory).unwrap()
}

fn fade_to_red() -> Clip {
    Clip::tween(BALL, Property::Fill, Color::WHITE, Color::RED, 1.0, Easing::EaseInOut).unwrap()
}

fn position(clip: &Clip, t: f64) -> Vec2 {
    sample(clip, t)
        .get(BALL, Property::Position)
        .and_then(Value::as_vector)
        .unwrap()
}

fn fill(clip: &Clip, t: f64) -> Color {
    sample(clip, t)
        .get(BALL, Property::Fill)
        .and_then(Value::as_color)
        .unwrap()
}

#[test]
fn falling_ball_then_color_tween() {
    for strategy in [BakeStrategy::Resample, BakeStrategy::Decimate] {
        let clip = sequential(&dropped_ball(strategy), &fade_to_red()).unwrap();
        assert_eq!(clip.duration(), 2.0);

        // Closed form ½·g·t², within the integrator's first-order error g·dt·t
        let closed_form = 0.5 * G * 1.0 * 1.0;
        let tolerance = G * (1.0 / 1000.0) + 1e-6;

        let at_seam = position(&clip, 1.0);
        assert!(
            (at_seam.y - closed_form).abs() < tolerance,
            "{strategy}: y = {}, expected {closed_form}",
            at_seam.y
        );
        assert_eq!(at_seam.x, 0.0);

        // The ball holds its landing position while the tween plays
        assert_eq!(position(&clip, 2.0), at_seam);
        assert_eq!(fill(&clip, 2.0), Color::RED);
        assert_eq!(fill(&clip, 1.0), Color::WHITE);
    }
}

#[test]
fn intermediate_positions_track_the_parabola() {
    let clip = dropped_ball(BakeStrategy::Resample);
    for i in 0..=30 {
        let t = i as f64 / 30.0;
        let y = position(&clip, t).y;
        let expected = 0.5 * G * t * t;
        assert!((y - expected).abs() < G * 0.001 * t + 1e-6, "t = {t}: {y} vs {expected}");
    }
}

#[derive(Default)]
struct Ball {
    position: Vec2,
    rotation: f64,
    fill: Color,
}

impl Animatable for Ball {
    fn target_id(&self) -> TargetId {
        BALL
    }

    fn set_property(&mut self, property: Property, value: &Value) {
        match (property, value) {
            (Property::Position, Value::Vector(v)) => self.position = *v,
            (Property::Rotation, Value::Scalar(r)) => self.rotation = *r,
            (Property::Fill, Value::Color(c)) => self.fill = *c,
            _ => {}
        }
    }
}

#[test]
fn renders_at_any_frame_rate() {
    let clip = sequential(&dropped_ball(BakeStrategy::Resample), &fade_to_red()).unwrap();

    for fps in [24.0, 60.0, 144.0] {
        let mut ball = Ball::default();
        let mut last_time = 0.0;
        let frames = Sampler::frames(&clip, fps).unwrap();
        let count = frames.len();
        for (index, time, frame) in frames {
            if index + 1 < count {
                assert_eq!(time, index as f64 / fps);
            }
            frame.apply_to(&mut ball);
            last_time = time;
        }
        assert_eq!(count, (2.0 * fps) as usize + 1);
        assert_eq!(last_time, 2.0);
        assert_eq!(ball.fill, Color::RED);
        assert_eq!(ball.position, position(&clip, 2.0));
        assert_eq!(ball.rotation, 0.0);
    }
}

#[test]
fn stopped_run_bakes_what_completed() {
    let mut world = World::new(1.0 / 1000.0).unwrap();
    world.add_body(BodyDesc::new(BALL)).unwrap();
    world.add_field(Gravity::down(G)).unwrap();

    let stop = world.stop_handle();
    world
        .add_field(FieldFn::new("stopwatch", move |_, t| {
            if t >= 0.5 {
                stop.stop();
            }
            Force::ZERO
        }))
        .unwrap();

    let trajectory = world.run(2.0).unwrap();
    assert!(trajectory.is_truncated());
    assert_eq!(trajectory.steps, 501);
    assert_eq!(trajectory.duration(), trajectory.completed());

    let clip = bake(&trajectory, 30.0).unwrap();
    assert!((clip.duration() - trajectory.completed()).abs() < 1e-9);
    assert!(clip.duration() < 2.0);
}

#[test]
fn baked_clip_composes_like_any_clip() {
    let clip = dropped_ball(BakeStrategy::Decimate);
    let twice = clip.repeated(2).unwrap();
    assert_eq!(twice.duration(), 2.0);
    assert_eq!(position(&twice, 1.0), position(&clip, 0.0));
    assert_eq!(position(&twice, 2.0), position(&clip, 1.0));
}
