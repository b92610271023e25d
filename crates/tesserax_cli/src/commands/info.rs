//! `tesserax info`

use std::path::Path;

use anyhow::Result;

use super::load_clip;

pub fn execute(clip_path: &Path) -> Result<()> {
    let clip = load_clip(clip_path)?;

    println!("name:     {}", clip.name());
    println!("duration: {:.4}s", clip.duration());
    println!("targets:  {}", clip.targets().len());
    println!("tracks:");
    for (key, track) in clip.tracks() {
        println!(
            "  {:<20} {:>6} keyframes  {:>8}  {:.4}s..{:.4}s",
            key.to_string(),
            track.len(),
            track.kind().to_string(),
            track.start_time(),
            track.end_time()
        );
    }
    Ok(())
}
