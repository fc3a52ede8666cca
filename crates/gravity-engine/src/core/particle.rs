use glam::Vec2;
use serde::{Deserialize, Serialize};

/// RGB display color, each channel in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl ParticleColor {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    pub const YELLOW: Self = Self::new(1.0, 1.0, 0.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
}

impl Default for ParticleColor {
    fn default() -> Self {
        Self::WHITE
    }
}

/// A massive disc. Every field is set at construction; the spawn controller
/// guarantees `mass > 0` and `radius > 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Center in the window-centered coordinate space.
    pub pos: Vec2,
    /// Displacement applied per tick.
    pub vel: Vec2,
    pub radius: f32,
    pub mass: f32,
    pub color: ParticleColor,
}

impl Particle {
    /// A particle at rest at `pos`.
    pub fn new(pos: Vec2, mass: f32, radius: f32, color: ParticleColor) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            mass,
            color,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    /// Speed magnitude, sqrt(vx² + vy²).
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Anchors meet the immovable mass threshold and never integrate.
    pub fn is_anchor(&self, anchor_mass: f32) -> bool {
        self.mass >= anchor_mass
    }
}
