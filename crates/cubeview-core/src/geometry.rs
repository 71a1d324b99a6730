//! Cube sizing rules

use serde::{Deserialize, Serialize};

/// Depth used for every cube built from a width/height request.
///
/// Resize requests only carry two extents; depth stays at one unit even
/// for non-unit requests.
pub const FIXED_DEPTH: f32 = 1.0;

/// Box dimensions of the viewer cube, in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubeSize {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl CubeSize {
    pub const UNIT: CubeSize = CubeSize {
        width: 1.0,
        height: 1.0,
        depth: 1.0,
    };

    /// Validate a width/height request.
    ///
    /// Returns `None` unless both extents are finite and strictly positive.
    pub fn from_request(width: f32, height: f32) -> Option<Self> {
        if is_valid_extent(width) && is_valid_extent(height) {
            Some(Self {
                width,
                height,
                depth: FIXED_DEPTH,
            })
        } else {
            None
        }
    }

    /// Parse the two text fields of the resize form
    pub fn from_text(width: &str, height: &str) -> Option<Self> {
        let width = width.trim().parse::<f32>().ok()?;
        let height = height.trim().parse::<f32>().ok()?;
        Self::from_request(width, height)
    }

    pub fn as_array(&self) -> [f32; 3] {
        [self.width, self.height, self.depth]
    }
}

impl Default for CubeSize {
    fn default() -> Self {
        Self::UNIT
    }
}

impl std::fmt::Display for CubeSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}×{}×{}", self.width, self.height, self.depth)
    }
}

fn is_valid_extent(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_request_keeps_unit_depth() {
        let size = CubeSize::from_request(2.0, 3.0).unwrap();
        assert_eq!(size.as_array(), [2.0, 3.0, 1.0]);

        let size = CubeSize::from_request(0.25, 10.0).unwrap();
        assert_eq!(size.depth, FIXED_DEPTH);
    }

    #[test]
    fn test_non_positive_request_rejected() {
        assert!(CubeSize::from_request(-1.0, 5.0).is_none());
        assert!(CubeSize::from_request(5.0, -1.0).is_none());
        assert!(CubeSize::from_request(0.0, 1.0).is_none());
        assert!(CubeSize::from_request(1.0, 0.0).is_none());
        assert!(CubeSize::from_request(-0.0, 1.0).is_none());
    }

    #[test]
    fn test_non_finite_request_rejected() {
        assert!(CubeSize::from_request(f32::NAN, 1.0).is_none());
        assert!(CubeSize::from_request(1.0, f32::INFINITY).is_none());
    }

    #[test]
    fn test_reset_request_is_unit_cube() {
        assert_eq!(CubeSize::from_request(1.0, 1.0), Some(CubeSize::UNIT));
        assert_eq!(CubeSize::default(), CubeSize::UNIT);
    }

    #[test]
    fn test_from_text() {
        assert_eq!(
            CubeSize::from_text(" 2 ", "3.5"),
            Some(CubeSize { width: 2.0, height: 3.5, depth: 1.0 })
        );
        assert!(CubeSize::from_text("", "3").is_none());
        assert!(CubeSize::from_text("abc", "3").is_none());
        assert!(CubeSize::from_text("-2", "3").is_none());
    }
}
