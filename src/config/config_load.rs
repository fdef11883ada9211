// src/config/config_load.rs
//
// loading of config.toml

use nannou::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::config_types::*;
use crate::render::RenderConfig;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub window: WindowConfig,
    pub canvas: CanvasConfig,
    pub render: RenderDefaults,
    pub backend: BackendConfig,
    pub osc: OscConfig,
    pub export: ExportConfig,
}

impl Config {
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        // First try to load from the executable's directory
        if let Some(exe_config) = Self::load_from_exe_dir() {
            return Ok(exe_config);
        }

        // Fallback to loading from the current working directory
        Self::load_from_working_dir()
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn load_from_exe_dir() -> Option<Self> {
        let config_path = Self::exe_dir()?.join("config.toml");

        if config_path.exists() {
            let content = fs::read_to_string(&config_path).ok()?;
            match Self::from_toml_str(&content) {
                Ok(config) => Some(config),
                Err(e) => {
                    log::warn!("Ignoring {}: {}", config_path.display(), e);
                    None
                }
            }
        } else {
            None
        }
    }

    fn load_from_working_dir() -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string("config.toml")?;
        Ok(Self::from_toml_str(&content)?)
    }

    fn exe_dir() -> Option<PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn resolve_output_dir(&self) -> PathBuf {
        let output = Path::new(&self.export.output_directory);
        if output.is_absolute() {
            return output.to_path_buf();
        }
        // If path is relative, resolve it relative to the executable or working directory
        Self::exe_dir()
            .map(|exe_dir| exe_dir.join(output))
            .unwrap_or_else(|| output.to_path_buf())
    }

    /// Render settings the session starts with.
    pub fn render_config(&self) -> RenderConfig {
        let [r, g, b] = self.render.stroke_color;
        RenderConfig {
            scale: self.render.scale,
            stroke_width_px: self.render.stroke_width,
            gradient_enabled: self.render.gradient,
            stroke_color: rgb(r, g, b),
            anchor: vec2(self.canvas.anchor_x, self.canvas.anchor_y),
        }
    }

    pub fn window_background(&self) -> Rgb<f32> {
        let [r, g, b] = self.window.background;
        rgb(r, g, b)
    }

    pub fn canvas_background(&self) -> Rgb<f32> {
        let [r, g, b] = self.canvas.background;
        rgb(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TagPolicy;

    const SAMPLE: &str = r#"
        [window]
        width = 1280
        height = 720
        background = [0.93, 0.93, 0.93]

        [canvas]
        width = 200
        height = 200
        anchor_x = 20.0
        anchor_y = 180.0
        gap = 10.0
        background = [1.0, 1.0, 1.0]

        [render]
        scale = 0.1
        stroke_width = 1.5
        gradient = true
        stroke_color = [0.0, 0.0, 0.0]
        tag_policy = "strict"
        scale_step = 0.01
        stroke_width_step = 0.5

        [backend]
        url = "http://127.0.0.1:8008/get_trajectories"
        timeout_secs = 30
        default_text = "山居秋暝"

        [osc]
        rx_port = 9000

        [export]
        output_directory = "/tmp/strokeview"
    "#;

    #[test]
    fn test_parse_sample() {
        let config = Config::from_toml_str(SAMPLE).unwrap();

        assert_eq!(config.window.width, 1280);
        assert_eq!(config.canvas.height, 200);
        assert_eq!(config.render.tag_policy, TagPolicy::Strict);
        assert_eq!(config.backend.default_text, "山居秋暝");
        assert_eq!(config.osc.rx_port, 9000);
    }

    #[test]
    fn test_render_config() {
        let config = Config::from_toml_str(SAMPLE).unwrap();
        let render = config.render_config();

        assert_eq!(render.scale, 0.1);
        assert_eq!(render.stroke_width_px, 1.5);
        assert!(render.gradient_enabled);
        assert_eq!(render.anchor, vec2(20.0, 180.0));
    }

    #[test]
    fn test_tag_policy_defaults_to_lenient() {
        let sample = SAMPLE.replace("tag_policy = \"strict\"", "");
        let config = Config::from_toml_str(&sample).unwrap();
        assert_eq!(config.render.tag_policy, TagPolicy::Lenient);
    }

    #[test]
    fn test_absolute_output_dir() {
        let config = Config::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.resolve_output_dir(), PathBuf::from("/tmp/strokeview"));
    }

    #[test]
    fn test_missing_section() {
        assert!(Config::from_toml_str("[window]\nwidth = 1\nheight = 1\nbackground = [0.0, 0.0, 0.0]\n").is_err());
    }
}
