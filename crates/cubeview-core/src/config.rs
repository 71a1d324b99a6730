//! Viewer configuration loading and validation

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::geometry::CubeSize;
use crate::marker::{DEFAULT_MARKER_LENGTH, DEFAULT_MARKER_LIFETIME};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub cube: CubeConfig,
    #[serde(default)]
    pub rotation: RotationConfig,
    #[serde(default)]
    pub markers: MarkerConfig,
    #[serde(default)]
    pub window: WindowConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    #[serde(default = "default_fov")]
    pub fov_degrees: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
    /// Distance from the origin along +Z
    #[serde(default = "default_distance")]
    pub distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: default_fov(),
            near: default_near(),
            far: default_far(),
            distance: default_distance(),
        }
    }
}

fn default_fov() -> f32 {
    75.0
}

fn default_near() -> f32 {
    0.1
}

fn default_far() -> f32 {
    100.0
}

fn default_distance() -> f32 {
    5.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CubeConfig {
    /// Width of the cube built at startup
    #[serde(default = "default_extent")]
    pub width: f32,
    /// Height of the cube built at startup
    #[serde(default = "default_extent")]
    pub height: f32,
    /// Flat color as #rrggbb
    #[serde(default = "default_cube_color")]
    pub color: String,
}

impl Default for CubeConfig {
    fn default() -> Self {
        Self {
            width: default_extent(),
            height: default_extent(),
            color: default_cube_color(),
        }
    }
}

fn default_extent() -> f32 {
    1.0
}

fn default_cube_color() -> String {
    "#00ff00".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationConfig {
    /// Radians added to the X and Y angles on every frame
    #[serde(default = "default_step")]
    pub step_radians: f32,
    /// Whether the cube spins right after startup
    #[serde(default)]
    pub start_enabled: bool,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            step_radians: default_step(),
            start_enabled: false,
        }
    }
}

fn default_step() -> f32 {
    0.01
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerConfig {
    /// How long a marker stays in the scene, in milliseconds
    #[serde(default = "default_lifetime_ms")]
    pub lifetime_ms: u64,
    /// Arrow length in world units
    #[serde(default = "default_marker_length")]
    pub length: f32,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            lifetime_ms: default_lifetime_ms(),
            length: default_marker_length(),
        }
    }
}

fn default_lifetime_ms() -> u64 {
    DEFAULT_MARKER_LIFETIME.as_millis() as u64
}

fn default_marker_length() -> f32 {
    DEFAULT_MARKER_LENGTH
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_title")]
    pub title: String,
    /// CSS selector of the canvas to render into (web only)
    #[serde(default = "default_canvas")]
    pub canvas: String,
    /// Clear color as #rrggbb
    #[serde(default = "default_background")]
    pub background: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            canvas: default_canvas(),
            background: default_background(),
        }
    }
}

fn default_title() -> String {
    "Cubeview".to_string()
}

fn default_canvas() -> String {
    "#cube-canvas".to_string()
}

fn default_background() -> String {
    "#000000".to_string()
}

impl ViewerConfig {
    /// URL query keys understood by [`ViewerConfig::apply_query_param`]
    pub const QUERY_KEYS: [&'static str; 4] = ["rotate", "width", "height", "marker_ms"];

    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: ViewerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file, falling back to defaults if it is missing
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config = Self::from_toml(&content)?;
            info!(path = %path.display(), "Loaded configuration");
            Ok(config)
        } else {
            info!(
                path = %path.display(),
                "Configuration file not found, using defaults"
            );
            Ok(Self::default())
        }
    }

    /// Write the default configuration to a file
    pub fn save_default(path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(&Self::default())?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let camera = &self.camera;
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid {
                field: "camera.fov_degrees",
                reason: format!("{} is outside (0, 180)", camera.fov_degrees),
            });
        }
        if !(camera.near > 0.0 && camera.near < camera.far) {
            return Err(ConfigError::Invalid {
                field: "camera.near",
                reason: format!("near {} must be positive and below far {}", camera.near, camera.far),
            });
        }
        if !(camera.distance.is_finite() && camera.distance > 0.0) {
            return Err(ConfigError::Invalid {
                field: "camera.distance",
                reason: format!("{} is not a positive distance", camera.distance),
            });
        }
        if !self.rotation.step_radians.is_finite() {
            return Err(ConfigError::Invalid {
                field: "rotation.step_radians",
                reason: format!("{} is not finite", self.rotation.step_radians),
            });
        }
        if self.markers.lifetime_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "markers.lifetime_ms",
                reason: "markers must live for at least 1 ms".to_string(),
            });
        }
        if CubeSize::from_request(self.cube.width, self.cube.height).is_none() {
            return Err(ConfigError::Invalid {
                field: "cube",
                reason: format!("{}x{} is not a positive size", self.cube.width, self.cube.height),
            });
        }
        if parse_hex_color(&self.cube.color).is_none() {
            return Err(ConfigError::Invalid {
                field: "cube.color",
                reason: format!("{:?} is not #rrggbb", self.cube.color),
            });
        }
        if parse_hex_color(&self.window.background).is_none() {
            return Err(ConfigError::Invalid {
                field: "window.background",
                reason: format!("{:?} is not #rrggbb", self.window.background),
            });
        }
        if !(self.markers.length > 0.0) {
            return Err(ConfigError::Invalid {
                field: "markers.length",
                reason: format!("{} is not positive", self.markers.length),
            });
        }
        Ok(())
    }

    /// Apply a single URL query override. Returns whether it was applied.
    ///
    /// Unknown keys and unparsable values leave the config untouched.
    pub fn apply_query_param(&mut self, key: &str, value: &str) -> bool {
        let applied = match key {
            "rotate" => match value {
                "1" | "true" | "on" => {
                    self.rotation.start_enabled = true;
                    true
                }
                "0" | "false" | "off" => {
                    self.rotation.start_enabled = false;
                    true
                }
                _ => false,
            },
            "width" => match value.parse::<f32>().ok().filter(|w| CubeSize::from_request(*w, 1.0).is_some()) {
                Some(width) => {
                    self.cube.width = width;
                    true
                }
                None => false,
            },
            "height" => match value.parse::<f32>().ok().filter(|h| CubeSize::from_request(1.0, *h).is_some()) {
                Some(height) => {
                    self.cube.height = height;
                    true
                }
                None => false,
            },
            "marker_ms" => match value.parse::<u64>() {
                Ok(ms) if ms > 0 => {
                    self.markers.lifetime_ms = ms;
                    true
                }
                _ => false,
            },
            _ => false,
        };

        if !applied {
            debug!(key, value, "Ignoring query override");
        }
        applied
    }

    /// Cube size used at startup
    pub fn initial_cube_size(&self) -> CubeSize {
        CubeSize::from_request(self.cube.width, self.cube.height).unwrap_or(CubeSize::UNIT)
    }

    pub fn marker_lifetime(&self) -> Duration {
        Duration::from_millis(self.markers.lifetime_ms)
    }

    pub fn fov_radians(&self) -> f32 {
        self.camera.fov_degrees.to_radians()
    }

    pub fn cube_color(&self) -> [f32; 3] {
        parse_hex_color(&self.cube.color).unwrap_or([0.0, 1.0, 0.0])
    }

    pub fn background_color(&self) -> [f32; 3] {
        parse_hex_color(&self.window.background).unwrap_or([0.0, 0.0, 0.0])
    }
}

/// Parse a "#rrggbb" (or "rrggbb") string into sRGB components
pub fn parse_hex_color(s: &str) -> Option<[f32; 3]> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(hex, 16).ok()?;
    Some(crate::dimension::hex_to_rgb(value))
}
