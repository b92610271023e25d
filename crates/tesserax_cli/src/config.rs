//! Scene file handling
//!
//! A scene file describes a world in TOML:
//!
//! ```toml
//! [simulation]
//! name = "drop"
//! duration = 1.0
//! timestep = 0.001
//! bake_rate = 30
//!
//! [[fields]]
//! kind = "gravity"
//! acceleration = [0.0, 9.8]
//!
//! [[bodies]]
//! target = 1
//! position = [0.0, 0.0]
//! velocity = [2.0, -5.0]
//! ```
//!
//! `[[springs]]` and `[[rods]]` link two bodies by target id.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tesserax_core::TargetId;
use tesserax_physics::{
    Attractor, BodyDesc, BodyId, Drag, Gravity, Rod, SimulationConfig, Spring, World,
};

/// Top-level scene description
#[derive(Debug, Deserialize, Serialize)]
pub struct SceneConfig {
    pub simulation: SimulationSection,
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
    #[serde(default)]
    pub springs: Vec<SpringConfig>,
    #[serde(default)]
    pub rods: Vec<RodConfig>,
}

/// Run length plus timestep and baking options
#[derive(Debug, Deserialize, Serialize)]
pub struct SimulationSection {
    #[serde(default = "default_name")]
    pub name: String,
    /// Seconds to simulate
    pub duration: f64,
    #[serde(flatten)]
    pub config: SimulationConfig,
}

fn default_name() -> String {
    "baked".to_string()
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldConfig {
    Gravity {
        #[serde(default = "default_gravity")]
        acceleration: [f64; 2],
    },
    Drag {
        #[serde(default)]
        model: DragKind,
        coefficient: f64,
        #[serde(default)]
        angular: f64,
    },
    Attractor {
        center: [f64; 2],
        strength: f64,
        #[serde(default = "default_min_distance")]
        min_distance: f64,
    },
}

fn default_gravity() -> [f64; 2] {
    [0.0, 9.8]
}

fn default_min_distance() -> f64 {
    1.0
}

#[derive(Debug, Default, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DragKind {
    #[default]
    Linear,
    Quadratic,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct BodyConfig {
    pub target: u64,
    #[serde(default = "default_one")]
    pub mass: f64,
    #[serde(default = "default_one")]
    pub inertia: f64,
    #[serde(default)]
    pub position: [f64; 2],
    #[serde(default)]
    pub velocity: [f64; 2],
    #[serde(default)]
    pub orientation: f64,
    #[serde(default)]
    pub angular_velocity: f64,
    #[serde(default)]
    pub fixed: bool,
}

fn default_one() -> f64 {
    1.0
}

/// Spring between two bodies, addressed by target id
#[derive(Debug, Deserialize, Serialize)]
pub struct SpringConfig {
    pub a: u64,
    pub b: u64,
    pub rest_length: f64,
    pub stiffness: f64,
    #[serde(default)]
    pub damping: f64,
}

/// Fixed-length rod between two bodies
#[derive(Debug, Deserialize, Serialize)]
pub struct RodConfig {
    pub a: u64,
    pub b: u64,
    pub length: f64,
}

impl SceneConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Build a world with every field, body, spring and rod of the scene
    pub fn build_world(&self) -> Result<World> {
        let mut world = World::from_config(&self.simulation.config)?;

        for field in &self.fields {
            match *field {
                FieldConfig::Gravity { acceleration } => world.add_field(Gravity::new(acceleration))?,
                FieldConfig::Drag {
                    model,
                    coefficient,
                    angular,
                } => {
                    let drag = match model {
                        DragKind::Linear => Drag::linear(coefficient),
                        DragKind::Quadratic => Drag::quadratic(coefficient),
                    };
                    world.add_field(drag.with_angular(angular))?
                }
                FieldConfig::Attractor {
                    center,
                    strength,
                    min_distance,
                } => world.add_field(Attractor::new(center, strength).with_min_distance(min_distance))?,
            }
        }

        let mut ids: Vec<(u64, BodyId)> = Vec::with_capacity(self.bodies.len());
        for body in &self.bodies {
            let mut desc = BodyDesc::new(TargetId(body.target))
                .with_mass(body.mass)
                .with_inertia(body.inertia)
                .at(body.position)
                .with_velocity(body.velocity)
                .with_orientation(body.orientation)
                .with_angular_velocity(body.angular_velocity);
            desc.fixed = body.fixed;
            let id = world
                .add_body(desc)
                .with_context(|| format!("Invalid body for target {}", body.target))?;
            ids.push((body.target, id));
        }

        let lookup = |target: u64| {
            ids.iter()
                .find(|(t, _)| *t == target)
                .map(|(_, id)| *id)
                .with_context(|| format!("Link references unknown target {target}"))
        };
        for spring in &self.springs {
            let a = lookup(spring.a)?;
            let b = lookup(spring.b)?;
            world.add_spring(
                Spring::new(a, b, spring.rest_length, spring.stiffness).with_damping(spring.damping),
            )?;
        }
        for rod in &self.rods {
            let a = lookup(rod.a)?;
            let b = lookup(rod.b)?;
            world.add_rod(Rod::new(a, b, rod.length))?;
        }

        Ok(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tesserax_core::Vec2;
    use tesserax_physics::BakeStrategy;

    const SCENE: &str = r#"
        [simulation]
        name = "pendulum"
        duration = 0.5
        timestep = 0.01
        bake_strategy = "decimate"

        [[fields]]
        kind = "gravity"

        [[fields]]
        kind = "drag"
        model = "quadratic"
        coefficient = 0.05

        [[bodies]]
        target = 1
        fixed = true

        [[bodies]]
        target = 2
        position = [0.0, 2.0]
        mass = 0.5

        [[springs]]
        a = 1
        b = 2
        rest_length = 1.0
        stiffness = 20.0
        damping = 0.5
    "#;

    #[test]
    fn parses_scene_with_defaults() {
        let scene = SceneConfig::parse(SCENE).unwrap();
        assert_eq!(scene.simulation.name, "pendulum");
        assert_eq!(scene.simulation.config.timestep, 0.01);
        assert_eq!(scene.simulation.config.bake_rate, 30.0);
        assert_eq!(scene.simulation.config.bake_strategy, BakeStrategy::Decimate);
        assert_eq!(scene.fields.len(), 2);
        assert!(matches!(
            scene.fields[0],
            FieldConfig::Gravity { acceleration } if acceleration == [0.0, 9.8]
        ));
        assert_eq!(scene.bodies[1].inertia, 1.0);
    }

    #[test]
    fn builds_world_from_scene() {
        let scene = SceneConfig::parse(SCENE).unwrap();
        let mut world = scene.build_world().unwrap();
        assert_eq!(world.bodies().len(), 2);
        assert!(world.bodies()[0].is_fixed());

        world.run(scene.simulation.duration).unwrap();
        assert_eq!(world.bodies()[0].position(), Vec2::ZERO);
    }

    #[test]
    fn unknown_spring_target_is_reported() {
        let scene = SceneConfig::parse(
            r#"
            [simulation]
            duration = 1.0

            [[bodies]]
            target = 1

            [[springs]]
            a = 1
            b = 9
            rest_length = 1.0
            stiffness = 1.0
            "#,
        )
        .unwrap();
        let err = scene.build_world().unwrap_err();
        assert!(err.to_string().contains("unknown target 9"), "{err}");
    }

    #[test]
    fn rods_link_bodies_by_target() {
        let scene = SceneConfig::parse(
            r#"
            [simulation]
            duration = 0.5
            timestep = 0.01

            [[fields]]
            kind = "gravity"

            [[bodies]]
            target = 1
            fixed = true

            [[bodies]]
            target = 2
            position = [2.0, 0.0]

            [[rods]]
            a = 1
            b = 2
            length = 2.0
            "#,
        )
        .unwrap();
        assert_eq!(scene.rods.len(), 1);

        let mut world = scene.build_world().unwrap();
        world.run(scene.simulation.duration).unwrap();
        let bob = world.bodies()[1].position();
        assert!((bob.length() - 2.0).abs() < 1e-9);
        assert!(bob.y > 0.0);
    }

    #[test]
    fn invalid_rod_is_reported() {
        let scene = SceneConfig::parse(
            r#"
            [simulation]
            duration = 1.0

            [[bodies]]
            target = 1

            [[bodies]]
            target = 2

            [[rods]]
            a = 1
            b = 2
            length = -1.0
            "#,
        )
        .unwrap();
        let err = scene.build_world().unwrap_err();
        assert!(err.to_string().contains("invalid rod"), "{err}");

        let mut dangling = scene;
        dangling.rods[0] = RodConfig { a: 1, b: 4, length: 1.0 };
        let err = dangling.build_world().unwrap_err();
        assert!(err.to_string().contains("unknown target 4"), "{err}");
    }

    #[test]
    fn missing_duration_fails_to_parse() {
        assert!(SceneConfig::parse("[simulation]\ntimestep = 0.01").is_err());
    }
}
