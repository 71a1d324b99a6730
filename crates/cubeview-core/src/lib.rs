//! Cubeview Core - Engine-independent viewer model
//!
//! This crate provides the pieces of the cube viewer that do not depend on
//! the 3D engine:
//! - Dimension tags and their marker direction/color mapping
//! - Cube size validation for resize requests
//! - Marker arrow proportions and the timed removal schedule
//! - Viewport aspect math
//! - TOML configuration with URL query overrides

pub mod config;
pub mod dimension;
pub mod geometry;
pub mod marker;
pub mod snapshot;
pub mod viewport;

pub use config::{ConfigError, ViewerConfig};
pub use dimension::{Dimension, DimensionError};
pub use geometry::{CubeSize, FIXED_DEPTH};
pub use marker::{ArrowProportions, MarkerSchedule, MarkerSpec};
pub use snapshot::ViewerSnapshot;
pub use viewport::Viewport;
