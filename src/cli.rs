// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

use crate::scenes::SceneKind;

#[derive(Parser, Debug, Clone)]
#[command(name = "box-scenes")]
#[command(about = "Swaying boxes and car-on-a-track demo scenes", long_about = None)]
pub struct Cli {
    /// Scene to open
    #[arg(long, value_enum, env = "SCENE", default_value_t = SceneKind::SwayingBoxes)]
    pub scene: SceneKind,

    /// Disable the control panel overlay
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// JSON file overriding window, camera and light settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seed for the box colors, overrides the config file
    #[arg(long)]
    pub seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["box-scenes"]).unwrap();
        assert!(!cli.no_ui);
        assert!(cli.config.is_none());
        assert!(cli.seed.is_none());
    }

    #[test]
    fn test_scene_and_flags() {
        let cli = Cli::try_parse_from([
            "box-scenes",
            "--scene",
            "car-track",
            "--no-ui",
            "--seed",
            "42",
            "--config",
            "scenes.json",
        ])
        .unwrap();
        assert_eq!(cli.scene, SceneKind::CarTrack);
        assert!(cli.no_ui);
        assert_eq!(cli.seed, Some(42));
        assert_eq!(cli.config, Some(PathBuf::from("scenes.json")));
    }

    #[test]
    fn test_unknown_scene_rejected() {
        assert!(Cli::try_parse_from(["box-scenes", "--scene", "teapot"]).is_err());
    }
}
