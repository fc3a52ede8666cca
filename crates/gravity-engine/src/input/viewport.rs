use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Window size in pixels. The simulation works in a space whose origin is
/// the window center, y growing downward like pixel rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Half the window size; the visible area is `[-half, half]` per axis.
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Convert a pixel coordinate (origin top-left) into centered space.
    pub fn to_centered(&self, px: f32, py: f32) -> Vec2 {
        Vec2::new(px, py) - self.half_extents()
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(500.0, 500.0)
    }
}
