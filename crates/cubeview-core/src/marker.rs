//! Transient dimension markers
//!
//! A marker is an arrow anchored at the cube's position that lives for a
//! fixed wall-clock duration. This module holds the engine-independent
//! parts: the arrow description and the removal schedule keyed by marker
//! identity.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use crate::dimension::Dimension;

/// Default lifetime of a marker (2 seconds)
pub const DEFAULT_MARKER_LIFETIME: Duration = Duration::from_millis(2000);

/// Default arrow length in world units
pub const DEFAULT_MARKER_LENGTH: f32 = 1.0;

/// Everything needed to build one marker arrow
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerSpec {
    pub dimension: Dimension,
    /// Unit direction vector
    pub direction: [f32; 3],
    /// Tail of the arrow, snapshotted from the cube at creation time
    pub anchor: [f32; 3],
    pub length: f32,
    /// sRGB color (0.0-1.0)
    pub color: [f32; 3],
}

impl MarkerSpec {
    pub fn new(dimension: Dimension, anchor: [f32; 3], length: f32) -> Self {
        Self {
            dimension,
            direction: dimension.direction(),
            anchor,
            length,
            color: dimension.color_rgb(),
        }
    }
}

/// Shaft and head measurements of an arrow of a given length.
///
/// Head length is 20% of the arrow, head width 20% of the head length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowProportions {
    pub shaft_length: f32,
    pub shaft_radius: f32,
    pub head_length: f32,
    pub head_radius: f32,
}

impl ArrowProportions {
    pub fn for_length(length: f32) -> Self {
        let head_length = 0.2 * length;
        let head_width = 0.2 * head_length;
        Self {
            shaft_length: length - head_length,
            shaft_radius: head_width * 0.25,
            head_length,
            head_radius: head_width * 0.5,
        }
    }
}

/// One-shot removal deadlines for live markers.
///
/// Keys are marker identities. Membership is the source of truth for
/// "is this marker still live": removing an absent key is a no-op.
#[derive(Debug, Clone)]
pub struct MarkerSchedule<K> {
    lifetime: Duration,
    deadlines: HashMap<K, Duration>,
}

impl<K: Copy + Eq + Hash> MarkerSchedule<K> {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            lifetime,
            deadlines: HashMap::new(),
        }
    }

    /// Register a marker created at `now` (elapsed clock time)
    pub fn insert(&mut self, key: K, now: Duration) {
        self.deadlines.insert(key, now + self.lifetime);
    }

    /// Drop a marker from the live set. Returns whether it was live.
    pub fn remove(&mut self, key: K) -> bool {
        self.deadlines.remove(&key).is_some()
    }

    pub fn len(&self) -> usize {
        self.deadlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }

    /// Markers whose deadline is at or before `now`.
    ///
    /// They stay in the live set until [`MarkerSchedule::remove`] is called.
    pub fn expired(&self, now: Duration) -> Vec<K> {
        self.deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(key, _)| *key)
            .collect()
    }

    /// Cancel every pending removal, returning the markers that were live
    pub fn cancel_all(&mut self) -> Vec<K> {
        self.deadlines.drain().map(|(key, _)| key).collect()
    }
}

impl<K: Copy + Eq + Hash> Default for MarkerSchedule<K> {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER_LIFETIME)
    }
}
