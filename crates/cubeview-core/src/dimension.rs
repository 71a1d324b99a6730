//! Cube dimensions that can be highlighted with a marker arrow

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DimensionError {
    #[error("Unknown dimension tag: {0}")]
    UnknownTag(String),
}

/// One of the three measurable extents of the cube
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    /// Vertical extent, shown along +Y
    Height,
    /// Horizontal extent, shown along +X
    Width,
    /// Extent towards the viewer, shown along +Z
    Depth,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::Height, Dimension::Width, Dimension::Depth];

    /// Parse a tag coming from outside the viewer.
    ///
    /// Unknown tags yield `None`; callers treat that as "do nothing".
    pub fn from_tag(tag: &str) -> Option<Self> {
        tag.parse().ok()
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Dimension::Height => "height",
            Dimension::Width => "width",
            Dimension::Depth => "depth",
        }
    }

    /// Unit vector the marker arrow points along
    pub fn direction(&self) -> [f32; 3] {
        match self {
            Dimension::Height => [0.0, 1.0, 0.0],
            Dimension::Width => [1.0, 0.0, 0.0],
            Dimension::Depth => [0.0, 0.0, 1.0],
        }
    }

    /// Marker color as 0xRRGGBB
    pub fn color_hex(&self) -> u32 {
        match self {
            Dimension::Height => 0xff0000,
            Dimension::Width => 0x00ff00,
            Dimension::Depth => 0x0000ff,
        }
    }

    /// Marker color as sRGB components (0.0-1.0)
    pub fn color_rgb(&self) -> [f32; 3] {
        hex_to_rgb(self.color_hex())
    }

    /// Human-readable label for buttons
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Height => "Height",
            Dimension::Width => "Width",
            Dimension::Depth => "Depth",
        }
    }
}

impl FromStr for Dimension {
    type Err = DimensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "height" => Ok(Dimension::Height),
            "width" => Ok(Dimension::Width),
            "depth" => Ok(Dimension::Depth),
            other => Err(DimensionError::UnknownTag(other.to_string())),
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Split 0xRRGGBB into sRGB components
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}
