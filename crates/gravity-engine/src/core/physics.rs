//! Pairwise gravity and the absorb-on-contact rule.
//!
//! One call to [`step`] is one simulation tick. The pass is a naive O(n²)
//! scan over the store:
//!
//! - anchors (mass at or above [`GravityParams::anchor_mass`]) are skipped
//!   and never move, never absorb;
//! - every other particle sums `G * m1 / d²` toward each neighbour whose
//!   radius it is outside of, straight into its velocity;
//! - a particle at or inside any neighbour's radius is absorbed instead of
//!   moving; otherwise it moves by its updated velocity.
//!
//! Updates happen in place in store order, so a particle sees the already
//! moved positions of the particles before it. Absorbed particles are
//! marked, ignored by the rest of the pass, and compacted out at the end.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::particle::Particle;
use crate::core::store::ParticleStore;

/// Tuning constants for the force pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GravityParams {
    /// Gravitational constant. Arbitrary, not physical.
    pub g: f32,
    /// Mass at or above which a particle is an immovable anchor.
    pub anchor_mass: f32,
}

impl GravityParams {
    pub const DEFAULT_G: f32 = 0.003;
    pub const DEFAULT_ANCHOR_MASS: f32 = 10000.0;
}

impl Default for GravityParams {
    fn default() -> Self {
        Self {
            g: Self::DEFAULT_G,
            anchor_mass: Self::DEFAULT_ANCHOR_MASS,
        }
    }
}

/// Outcome of one force pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Particles removed by contact this tick.
    pub absorbed: usize,
    /// Particles left in the store.
    pub survivors: usize,
}

/// Velocity increment on a body at `pos` pulled by `other`.
///
/// Returns `None` on contact: when the distance is not strictly greater
/// than `other.radius`. That covers `d == 0`, so the normalisation never
/// divides by zero, and a non-finite distance is treated the same way.
pub fn attraction(pos: Vec2, other: &Particle, g: f32) -> Option<Vec2> {
    let delta = other.pos - pos;
    let d = delta.length();
    if d.is_finite() && d > other.radius {
        Some(delta * (g * other.mass / (d * d) / d))
    } else {
        None
    }
}

/// Run one tick of the force/integration pass over the whole store.
pub fn step(store: &mut ParticleStore, params: &GravityParams) -> StepReport {
    let count = store.len();
    let mut doomed = vec![false; count];
    let particles = store.as_mut_slice();

    for i in 0..count {
        if particles[i].is_anchor(params.anchor_mass) {
            continue;
        }

        let pos = particles[i].pos;
        let mut vel = particles[i].vel;
        let mut collided = false;

        for (j, other) in particles.iter().enumerate() {
            if j == i || doomed[j] {
                continue;
            }
            match attraction(pos, other, params.g) {
                Some(dv) => vel += dv,
                None => collided = true,
            }
        }

        if collided {
            doomed[i] = true;
        } else {
            let p = &mut particles[i];
            p.vel = vel;
            p.pos += vel;
        }
    }

    let absorbed = store.retain_marked(&doomed);
    if absorbed > 0 {
        log::debug!("absorbed {} particle(s), {} remain", absorbed, store.len());
    }

    StepReport {
        absorbed,
        survivors: store.len(),
    }
}
