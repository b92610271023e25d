//! `tesserax bake`

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tesserax_physics::{BakeStrategy, Baker};
use tracing::info;

use crate::config::SceneConfig;

pub fn execute(
    scene_path: &Path,
    output: Option<&Path>,
    rate: Option<f64>,
    strategy: Option<BakeStrategy>,
) -> Result<()> {
    let scene = SceneConfig::load(scene_path)?;

    let mut config = scene.simulation.config;
    if let Some(rate) = rate {
        config = config.with_bake_rate(rate);
    }
    if let Some(strategy) = strategy {
        config = config.with_bake_strategy(strategy);
    }
    let baker = Baker::from_config(&config).context("Invalid bake settings")?;

    let mut world = scene.build_world()?;
    info!(
        bodies = world.bodies().len(),
        duration = scene.simulation.duration,
        timestep = config.timestep,
        "simulating {}",
        scene_path.display()
    );
    let trajectory = world.run(scene.simulation.duration)?;

    let clip = baker
        .bake(&trajectory)
        .with_context(|| format!("Failed to bake {}", scene_path.display()))?
        .renamed(scene.simulation.name.as_str());
    info!(
        tracks = clip.tracks().len(),
        duration = clip.duration(),
        rate = baker.rate(),
        strategy = %baker.strategy(),
        "baked clip"
    );

    let json = serde_json::to_string_pretty(&clip).context("Failed to serialize clip")?;
    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
            info!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
