//! Root CLI structure for tesserax

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tesserax_physics::BakeStrategy;

#[derive(Parser)]
#[command(name = "tesserax")]
#[command(about = "Bake physics scenes into animation clips and sample them", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Simulate a scene file and write the baked clip as JSON
    Bake {
        /// Scene description (TOML)
        scene: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keyframe rate, overriding the scene's bake_rate
        #[arg(long)]
        rate: Option<f64>,

        /// Keyframe strategy, overriding the scene's bake_strategy
        #[arg(long, value_parser = clap::value_parser!(BakeStrategy))]
        strategy: Option<BakeStrategy>,
    },

    /// Print sampled frames of a clip as JSON lines
    Sample {
        /// Clip file (JSON)
        clip: PathBuf,

        /// Output frame rate
        #[arg(long, conflicts_with = "at")]
        fps: Option<f64>,

        /// Sample a single time instead of every frame
        #[arg(long)]
        at: Option<f64>,
    },

    /// Show a clip's name, duration and tracks
    Info {
        /// Clip file (JSON)
        clip: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_bake_overrides() {
        let cli = Cli::try_parse_from([
            "tesserax", "-vv", "bake", "scene.toml", "--rate", "60", "--strategy", "decimate",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Bake { rate, strategy, .. } => {
                assert_eq!(rate, Some(60.0));
                assert_eq!(strategy, Some(BakeStrategy::Decimate));
            }
            _ => panic!("expected bake"),
        }
    }

    #[test]
    fn fps_and_at_conflict() {
        let result = Cli::try_parse_from(["tesserax", "sample", "clip.json", "--fps", "30", "--at", "1"]);
        assert!(result.is_err());
    }
}
