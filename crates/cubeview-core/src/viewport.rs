//! Viewport dimensions and projection math

/// Drawable area in logical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width over height, or `None` for a degenerate (e.g. minimized) viewport
    pub fn aspect_ratio(&self) -> Option<f32> {
        if self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite() {
            Some(self.width / self.height)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio() {
        assert_eq!(Viewport::new(1920.0, 1080.0).aspect_ratio(), Some(1920.0 / 1080.0));
        assert_eq!(Viewport::new(600.0, 800.0).aspect_ratio(), Some(0.75));
    }

    #[test]
    fn test_degenerate_viewport() {
        assert_eq!(Viewport::new(0.0, 1080.0).aspect_ratio(), None);
        assert_eq!(Viewport::new(1920.0, 0.0).aspect_ratio(), None);
        assert_eq!(Viewport::new(f32::NAN, 10.0).aspect_ratio(), None);
    }
}
