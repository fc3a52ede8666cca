//! Spawn kinds, their parameter table, and the controller that turns a
//! spawn request into a particle in the store.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::particle::{Particle, ParticleColor};
use crate::core::rng::Rng;
use crate::core::store::ParticleStore;

/// What kind of particle an input gesture creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnKind {
    /// Left click with drag-launch off.
    Tiny,
    /// Right click. Heavy enough to be an anchor by default.
    Huge,
    /// Left drag-and-release with drag-launch on.
    Launched,
}

/// How a spawned particle gets its display color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorPolicy {
    /// Each channel drawn from the session RNG.
    Random,
    Fixed(ParticleColor),
}

/// Mass, radius and color policy for one spawn kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnSpec {
    pub mass: f32,
    pub radius: f32,
    pub color: ColorPolicy,
}

/// Per-kind spawn parameters plus the launch damping divisor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTable {
    pub tiny: SpawnSpec,
    /// Fixed red. The seeded starting anchor is the yellow one.
    pub huge: SpawnSpec,
    pub launched: SpawnSpec,
    /// Launch vectors are divided by this to get the initial velocity.
    pub velocity_divisor: f32,
    /// Quantization levels per random color channel.
    pub color_steps: u32,
}

impl Default for SpawnTable {
    fn default() -> Self {
        Self {
            tiny: SpawnSpec {
                mass: 10.0,
                radius: 3.0,
                color: ColorPolicy::Random,
            },
            huge: SpawnSpec {
                mass: 10000.0,
                radius: 10.0,
                color: ColorPolicy::Fixed(ParticleColor::RED),
            },
            launched: SpawnSpec {
                mass: 100.0,
                radius: 5.0,
                color: ColorPolicy::Random,
            },
            velocity_divisor: 300.0,
            color_steps: 200,
        }
    }
}

impl SpawnTable {
    pub fn spec(&self, kind: SpawnKind) -> &SpawnSpec {
        match kind {
            SpawnKind::Tiny => &self.tiny,
            SpawnKind::Huge => &self.huge,
            SpawnKind::Launched => &self.launched,
        }
    }
}

/// A pending spawn: kind, where, and the raw (undamped) launch vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    pub kind: SpawnKind,
    pub pos: Vec2,
    pub launch: Vec2,
}

impl SpawnRequest {
    pub fn tiny(pos: Vec2) -> Self {
        Self { kind: SpawnKind::Tiny, pos, launch: Vec2::ZERO }
    }

    pub fn huge(pos: Vec2) -> Self {
        Self { kind: SpawnKind::Huge, pos, launch: Vec2::ZERO }
    }

    pub fn launched(pos: Vec2, launch: Vec2) -> Self {
        Self { kind: SpawnKind::Launched, pos, launch }
    }
}

/// Builds particles from requests and appends them to a store.
pub struct SpawnController {
    table: SpawnTable,
    rng: Rng,
}

impl SpawnController {
    pub fn new(table: SpawnTable, seed: u64) -> Self {
        Self {
            table,
            rng: Rng::new(seed),
        }
    }

    pub fn table(&self) -> &SpawnTable {
        &self.table
    }

    fn resolve_color(&mut self, policy: ColorPolicy) -> ParticleColor {
        match policy {
            ColorPolicy::Fixed(color) => color,
            ColorPolicy::Random => {
                let steps = self.table.color_steps;
                ParticleColor::new(
                    self.rng.next_channel(steps),
                    self.rng.next_channel(steps),
                    self.rng.next_channel(steps),
                )
            }
        }
    }

    fn make(
        &mut self,
        pos: Vec2,
        mass: f32,
        radius: f32,
        color: ColorPolicy,
        launch: Vec2,
    ) -> Particle {
        let color = self.resolve_color(color);
        let vel = if self.table.velocity_divisor != 0.0 {
            launch / self.table.velocity_divisor
        } else {
            Vec2::ZERO
        };
        Particle::new(pos, mass, radius, color).with_velocity(vel)
    }

    /// Build the particle a request describes without storing it.
    pub fn build(&mut self, request: &SpawnRequest) -> Particle {
        let spec = *self.table.spec(request.kind);
        self.make(request.pos, spec.mass, spec.radius, spec.color, request.launch)
    }

    /// Append the requested particle to the store.
    pub fn spawn(&mut self, store: &mut ParticleStore, request: &SpawnRequest) {
        let particle = self.build(request);
        push_logged(store, particle);
    }

    /// Append a particle from raw parameters instead of a spawn kind.
    /// The launch vector is damped like any other; without
    /// `randomize_color` the particle is red.
    pub fn spawn_custom(
        &mut self,
        store: &mut ParticleStore,
        pos: Vec2,
        mass: f32,
        radius: f32,
        randomize_color: bool,
        launch: Vec2,
    ) {
        let color = if randomize_color {
            ColorPolicy::Random
        } else {
            ColorPolicy::Fixed(ParticleColor::RED)
        };
        let particle = self.make(pos, mass, radius, color, launch);
        push_logged(store, particle);
    }

    /// A huge particle at `pos` with an explicit color, used to seed a session.
    pub fn anchor(&self, pos: Vec2, color: ParticleColor) -> Particle {
        let spec = self.table.huge;
        Particle::new(pos, spec.mass, spec.radius, color)
    }

    /// Remove every particle. Clearing an empty store is a no-op.
    pub fn clear_all(&self, store: &mut ParticleStore) {
        if !store.is_empty() {
            log::debug!("clearing {} particle(s)", store.len());
        }
        store.clear();
    }
}

fn push_logged(store: &mut ParticleStore, particle: Particle) {
    log::debug!(
        "spawn m={} r={} at ({:.1}, {:.1}) vel ({:.3}, {:.3})",
        particle.mass,
        particle.radius,
        particle.pos.x,
        particle.pos.y,
        particle.vel.x,
        particle.vel.y,
    );
    store.push(particle);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> SpawnController {
        SpawnController::new(SpawnTable::default(), 42)
    }

    #[test]
    fn tiny_spawn_uses_table_values() {
        let mut store = ParticleStore::new();
        controller().spawn(&mut store, &SpawnRequest::tiny(Vec2::new(50.0, 50.0)));

        let p = store.get(0).unwrap();
        assert_eq!(p.mass, 10.0);
        assert_eq!(p.radius, 3.0);
        assert_eq!(p.vel, Vec2::ZERO);
        assert_eq!(p.pos, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn huge_spawn_is_red_with_zero_velocity() {
        let mut store = ParticleStore::new();
        controller().spawn(&mut store, &SpawnRequest::huge(Vec2::new(-20.0, 30.0)));

        let p = store.get(0).unwrap();
        assert_eq!(p.mass, 10000.0);
        assert_eq!(p.radius, 10.0);
        assert_eq!(p.color, ParticleColor::RED);
        assert_eq!(p.vel, Vec2::ZERO);
    }

    #[test]
    fn launch_velocity_is_damped_by_divisor() {
        // Drag from (0,0) to (30,0): start - end = (-30, 0).
        let mut store = ParticleStore::new();
        let request = SpawnRequest::launched(Vec2::new(30.0, 0.0), Vec2::new(-30.0, 0.0));
        controller().spawn(&mut store, &request);

        let p = store.get(0).unwrap();
        assert_eq!(p.mass, 100.0);
        assert_eq!(p.radius, 5.0);
        assert!((p.vel.x - (-0.1)).abs() < 1e-6, "vx was {}", p.vel.x);
        assert_eq!(p.vel.y, 0.0);
    }

    #[test]
    fn random_colors_are_in_unit_range() {
        let mut c = controller();
        for _ in 0..50 {
            let p = c.build(&SpawnRequest::tiny(Vec2::ZERO));
            for ch in [p.color.r, p.color.g, p.color.b] {
                assert!((0.0..1.0).contains(&ch), "channel was {}", ch);
            }
        }
    }

    #[test]
    fn same_seed_gives_same_colors() {
        let mut a = controller();
        let mut b = controller();
        let pa = a.build(&SpawnRequest::tiny(Vec2::ZERO));
        let pb = b.build(&SpawnRequest::tiny(Vec2::ZERO));
        assert_eq!(pa.color, pb.color);
    }

    #[test]
    fn custom_spawn_is_red_and_damped() {
        let mut c = controller();
        let mut store = ParticleStore::new();
        c.spawn_custom(&mut store, Vec2::new(1.0, 2.0), 10000.0, 10.0, false, Vec2::new(-30.0, 0.0));

        let p = store.get(0).unwrap();
        assert_eq!(p.pos, Vec2::new(1.0, 2.0));
        assert_eq!(p.mass, 10000.0);
        assert_eq!(p.radius, 10.0);
        assert_eq!(p.color, ParticleColor::RED);
        assert!((p.vel.x - (-0.1)).abs() < 1e-6, "vx was {}", p.vel.x);
        assert_eq!(p.vel.y, 0.0);
    }

    #[test]
    fn custom_spawn_matches_kind_spawn() {
        // Same seed, same draws: a launched spawn is a custom random one.
        let mut a = controller();
        let mut b = controller();
        let mut from_kind = ParticleStore::new();
        let mut from_raw = ParticleStore::new();
        let launch = Vec2::new(-30.0, 15.0);
        a.spawn(&mut from_kind, &SpawnRequest::launched(Vec2::new(30.0, 0.0), launch));
        b.spawn_custom(&mut from_raw, Vec2::new(30.0, 0.0), 100.0, 5.0, true, launch);
        assert_eq!(from_kind.get(0), from_raw.get(0));
    }

    #[test]
    fn clear_all_is_idempotent() {
        let c = controller();
        let mut store = ParticleStore::new();
        store.push(c.anchor(Vec2::ZERO, ParticleColor::YELLOW));
        store.push(c.anchor(Vec2::ONE, ParticleColor::YELLOW));
        c.clear_all(&mut store);
        assert!(store.is_empty());
        c.clear_all(&mut store);
        assert!(store.is_empty());
    }

    #[test]
    fn table_parses_from_json_with_defaults() {
        let json = r#"{ "velocity_divisor": 150.0, "tiny": { "mass": 5.0, "radius": 2.0, "color": "random" } }"#;
        let table: SpawnTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.velocity_divisor, 150.0);
        assert_eq!(table.tiny.mass, 5.0);
        assert_eq!(table.huge.color, ColorPolicy::Fixed(ParticleColor::RED));
    }
}
