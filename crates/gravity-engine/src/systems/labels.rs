//! Text overlay: per-particle speed readouts and the fixed mass legend.
//!
//! Labels are laid out here and drawn by the host; the engine ships the
//! strings and a flat `[x, y, r, g, b]` array per label.

use glam::Vec2;

use crate::core::particle::{Particle, ParticleColor};
use crate::core::spawn::SpawnTable;

/// Floats per label in the position/color buffer: x, y, r, g, b.
pub const LABEL_FLOATS: usize = 5;

/// Legend panel background.
pub const INFO_BOX_COLOR: ParticleColor = ParticleColor::new(0.529, 0.808, 0.922);
/// Legend panel corners (min, max) in window-centered space.
pub const INFO_BOX_MIN: Vec2 = Vec2::new(150.0, 165.0);
pub const INFO_BOX_MAX: Vec2 = Vec2::new(250.0, 210.0);

const INFO_TEXT_COLOR: ParticleColor = ParticleColor::new(0.0, 0.0, 0.0);
const BIG_MASS_AT: Vec2 = Vec2::new(155.0, 200.0);
const TINY_MASS_AT: Vec2 = Vec2::new(155.0, 180.0);

#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub pos: Vec2,
    pub color: ParticleColor,
}

impl TextLabel {
    pub fn new(text: impl Into<String>, pos: Vec2, color: ParticleColor) -> Self {
        Self {
            text: text.into(),
            pos,
            color,
        }
    }
}

/// "v: 0.10" at the particle's lower-right edge.
pub fn velocity_label(particle: &Particle) -> TextLabel {
    TextLabel::new(
        format!("v: {:.2}", particle.speed()),
        particle.pos + Vec2::splat(particle.radius),
        ParticleColor::WHITE,
    )
}

/// The two legend lines, with masses taken from the spawn table.
pub fn info_labels(table: &SpawnTable) -> [TextLabel; 2] {
    [
        TextLabel::new(format!("Big Mass: {}", table.huge.mass), BIG_MASS_AT, INFO_TEXT_COLOR),
        TextLabel::new(format!("Tiny Mass: {}", table.tiny.mass), TINY_MASS_AT, INFO_TEXT_COLOR),
    ]
}

/// Labels for one frame.
#[derive(Debug, Default)]
pub struct LabelSet {
    labels: Vec<TextLabel>,
    layout: Vec<f32>,
}

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.labels.clear();
        self.layout.clear();
    }

    pub fn push(&mut self, label: TextLabel) {
        let c = label.color;
        self.layout
            .extend_from_slice(&[label.pos.x, label.pos.y, c.r, c.g, c.b]);
        self.labels.push(label);
    }

    /// Rebuild the frame's labels: the legend, then one speed readout per
    /// particle when `show_velocity` is on.
    pub fn rebuild(&mut self, particles: &[Particle], table: &SpawnTable, show_velocity: bool) {
        self.clear();
        for label in info_labels(table) {
            self.push(label);
        }
        if show_velocity {
            for p in particles {
                self.push(velocity_label(p));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[TextLabel] {
        &self.labels
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|l| l.text.as_str())
    }

    /// Raw pointer to the `[x, y, r, g, b]` layout array.
    pub fn layout_ptr(&self) -> *const f32 {
        self.layout.as_ptr()
    }

    pub fn layout(&self) -> &[f32] {
        &self.layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn velocity_label_formats_two_decimals() {
        let p = Particle::new(Vec2::new(30.0, 0.0), 100.0, 5.0, ParticleColor::RED)
            .with_velocity(Vec2::new(-0.1, 0.0));
        let label = velocity_label(&p);
        assert_eq!(label.text, "v: 0.10");
        assert_eq!(label.pos, Vec2::new(35.0, 5.0));
        assert_eq!(label.color, ParticleColor::WHITE);
    }

    #[test]
    fn info_labels_use_table_masses() {
        let [big, tiny] = info_labels(&SpawnTable::default());
        assert_eq!(big.text, "Big Mass: 10000");
        assert_eq!(big.pos, Vec2::new(155.0, 200.0));
        assert_eq!(tiny.text, "Tiny Mass: 10");
        assert_eq!(tiny.pos, Vec2::new(155.0, 180.0));
    }

    #[test]
    fn rebuild_adds_speed_labels_only_when_enabled() {
        let particles = [
            Particle::new(Vec2::ZERO, 10.0, 3.0, ParticleColor::WHITE),
            Particle::new(Vec2::ONE, 10.0, 3.0, ParticleColor::WHITE),
        ];
        let table = SpawnTable::default();
        let mut set = LabelSet::new();

        set.rebuild(&particles, &table, false);
        assert_eq!(set.len(), 2);

        set.rebuild(&particles, &table, true);
        assert_eq!(set.len(), 4);
        assert_eq!(set.layout().len(), 4 * LABEL_FLOATS);
        assert_eq!(set.texts().nth(2), Some("v: 0.00"));
    }
}
