use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything tunable without recompiling. Missing JSON fields take the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub light: LightConfig,
    /// Fraction of the remaining distance the chase camera covers each frame
    pub camera_blend: f32,
    /// Seed for the box colors; random when absent
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub position: [f32; 4],
    pub color: [f32; 4],
    pub size: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            light: LightConfig::default(),
            camera_blend: 0.1,
            seed: None,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Box Scenes".to_string(),
            width: 1080,
            height: 600,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 1.0,
            far: 100.0,
        }
    }
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 5.0, 5.0, 1.0],
            color: [1.0, 1.0, 1.0, 1.0],
            size: 1000.0,
        }
    }
}

impl AppConfig {
    /// Defaults, overlaid with the JSON file at `path` when one is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {:?}", path))?;
                Self::from_json(&text).with_context(|| format!("Invalid config file {:?}", path))?
            }
            None => Self::default(),
        };
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("Failed to parse config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.window.width > 0 && self.window.height > 0,
            "window size must be non-zero"
        );
        ensure!(
            self.camera.fov_degrees > 0.0 && self.camera.fov_degrees < 180.0,
            "fov_degrees must lie in (0, 180), got {}",
            self.camera.fov_degrees
        );
        ensure!(self.camera.near > 0.0, "near plane must be positive, got {}", self.camera.near);
        ensure!(
            self.camera.far > self.camera.near,
            "far plane {} must lie beyond near plane {}",
            self.camera.far,
            self.camera.near
        );
        ensure!(
            self.camera_blend > 0.0 && self.camera_blend <= 1.0,
            "camera_blend must lie in (0, 1], got {}",
            self.camera_blend
        );
        Ok(())
    }

    pub fn fov_radians(&self) -> f32 {
        self.camera.fov_degrees.to_radians()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.fov_radians() - std::f32::consts::FRAC_PI_4).abs() < 1e-6);
        assert_eq!(config.camera_blend, 0.1);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = AppConfig::from_json(r#"{ "camera": { "far": 250.0 }, "seed": 9 }"#).unwrap();
        assert_eq!(config.camera.far, 250.0);
        assert_eq!(config.camera.near, 1.0);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn test_rejects_inverted_planes() {
        let err = AppConfig::from_json(r#"{ "camera": { "near": 5.0, "far": 2.0 } }"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_rejects_blend_out_of_range() {
        assert!(AppConfig::from_json(r#"{ "camera_blend": 0.0 }"#).is_err());
        assert!(AppConfig::from_json(r#"{ "camera_blend": 1.5 }"#).is_err());
        assert!(AppConfig::from_json(r#"{ "camera_blend": 1.0 }"#).is_ok());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(AppConfig::from_json("{ not json").is_err());
    }

    #[test]
    fn test_load_without_path_is_default() {
        assert_eq!(AppConfig::load(None).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/box-scenes.json"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
