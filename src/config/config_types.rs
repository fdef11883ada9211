// src/config/config_types.rs
//
// Config types for the app

use serde::Deserialize;

use crate::models::TagPolicy;

#[derive(Debug, Deserialize)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub background: [f32; 3],
}

#[derive(Debug, Deserialize, Clone)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    pub anchor_x: f32,
    pub anchor_y: f32,
    pub gap: f32,         // Space between canvases and rows
    pub background: [f32; 3],
}

#[derive(Debug, Deserialize, Clone)]
pub struct RenderDefaults {
    pub scale: f32,
    pub stroke_width: f32,
    pub gradient: bool,
    pub stroke_color: [f32; 3],
    #[serde(default)]
    pub tag_policy: TagPolicy,
    pub scale_step: f32,        // Up/Down nudge
    pub stroke_width_step: f32, // Left/Right nudge
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    pub url: String,
    pub timeout_secs: u64,
    #[serde(default)]
    pub default_text: String,
}

#[derive(Debug, Deserialize)]
pub struct OscConfig {
    pub rx_port: u16,
}

#[derive(Debug, Deserialize)]
pub struct ExportConfig {
    pub output_directory: String,
}
