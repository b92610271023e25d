//! `tesserax sample`

use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::Result;
use tesserax_animation::{sample, Sampler};
use tracing::debug;

use super::{frame_json, load_clip};

const DEFAULT_FPS: f64 = 30.0;

pub fn execute(clip_path: &Path, fps: Option<f64>, at: Option<f64>) -> Result<()> {
    let clip = load_clip(clip_path)?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if let Some(t) = at {
        let line = frame_json(None, &sample(&clip, t))?;
        writeln!(out, "{line}")?;
        out.flush()?;
        return Ok(());
    }

    let sampler = Sampler::frames(&clip, fps.unwrap_or(DEFAULT_FPS))?;
    debug!(frames = sampler.len(), fps = sampler.fps(), "sampling {}", clip.name());
    for (index, _, frame) in sampler {
        writeln!(out, "{}", frame_json(Some(index), &frame)?)?;
    }
    out.flush()?;
    Ok(())
}
