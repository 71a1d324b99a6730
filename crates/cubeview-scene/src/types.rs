//! Shared resources and messages for the viewer scene

use bevy::prelude::*;
use cubeview_core::{CubeSize, Dimension, ViewerConfig};

/// Viewer configuration, available to every system
#[derive(Debug, Clone, Resource, Default)]
pub struct ViewerSettings(pub ViewerConfig);

/// Whether the render loop spins the cube, and by how much per frame
#[derive(Debug, Clone, Resource)]
pub struct RotationState {
    pub enabled: bool,
    /// Radians added to the X and Y angles each frame
    pub step: f32,
}

impl Default for RotationState {
    fn default() -> Self {
        Self {
            enabled: false,
            step: 0.01,
        }
    }
}

impl RotationState {
    /// Flip the flag, returning the new value
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }
}

/// User-facing viewer operations.
///
/// Every input path (control panel, keyboard, host page bridge) funnels
/// into this message. Invalid payloads are dropped by the systems that
/// consume them.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum ViewerCommand {
    ToggleRotation,
    ShowMarker(Dimension),
    ResizeCube {
        width: f32,
        height: f32,
        /// Clear the width/height input fields once the resize is applied
        clear_inputs: bool,
    },
    ResetCube,
}

impl ViewerCommand {
    /// Build a marker command from a string tag ("height", "width", "depth")
    pub fn show_marker_tag(tag: &str) -> Option<Self> {
        Dimension::from_tag(tag).map(ViewerCommand::ShowMarker)
    }

    pub fn resize(width: f32, height: f32) -> Self {
        ViewerCommand::ResizeCube {
            width,
            height,
            clear_inputs: false,
        }
    }

    /// Requested (width, height, clear_inputs) for commands that rebuild the cube
    pub fn resize_request(&self) -> Option<(f32, f32, bool)> {
        match self {
            ViewerCommand::ResizeCube {
                width,
                height,
                clear_inputs,
            } => Some((*width, *height, *clear_inputs)),
            ViewerCommand::ResetCube => {
                let unit = CubeSize::UNIT;
                Some((unit.width, unit.height, false))
            }
            _ => None,
        }
    }
}

/// Written after the cube has been replaced with a new size
#[derive(Message, Debug, Clone, PartialEq)]
pub struct CubeResized {
    pub size: CubeSize,
    pub clear_inputs: bool,
}

/// Ordering of the per-frame viewer systems
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ViewerSet {
    /// Geometry swap and marker churn driven by [`ViewerCommand`]s
    Commands,
    /// Timed marker removal
    Expire,
    /// Rotation update ahead of rendering
    Animate,
}
