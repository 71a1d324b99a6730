//! Serializable view of the viewer state for host pages

use serde::{Deserialize, Serialize};

use crate::geometry::CubeSize;

/// Point-in-time summary of the viewer, exported as JSON on the web
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerSnapshot {
    pub rotating: bool,
    pub cube: CubeSize,
    pub live_markers: usize,
}

impl ViewerSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
