//! Command implementations

pub mod bake;
pub mod info;
pub mod sample;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{json, Map};
use tesserax_animation::{Clip, Frame};

/// Read and validate a clip written by `tesserax bake`
pub fn load_clip(path: &Path) -> Result<Clip> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse clip {}", path.display()))
}

/// One frame as a JSON object keyed by `"#target.property"`
pub fn frame_json(index: Option<usize>, frame: &Frame) -> Result<serde_json::Value> {
    let mut values = Map::new();
    for (key, value) in frame.iter() {
        values.insert(key.to_string(), serde_json::to_value(value)?);
    }
    let mut line = json!({
        "time": frame.time,
        "values": values,
    });
    if let Some(index) = index {
        line["frame"] = json!(index);
    }
    Ok(line)
}
