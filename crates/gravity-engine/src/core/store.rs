use crate::core::particle::Particle;

/// Ordered particle storage using a flat Vec.
/// Order is insertion order; it only makes iteration deterministic.
#[derive(Debug, Clone, Default)]
pub struct ParticleStore {
    particles: Vec<Particle>,
}

impl ParticleStore {
    pub fn new() -> Self {
        Self {
            particles: Vec::with_capacity(256),
        }
    }

    /// Create a store with a specific particle capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
        }
    }

    /// Append a particle at the end.
    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Particle> {
        self.particles.get_mut(index)
    }

    /// Remove by index, shifting later particles down. Preserves order.
    pub fn remove(&mut self, index: usize) -> Option<Particle> {
        if index < self.particles.len() {
            Some(self.particles.remove(index))
        } else {
            None
        }
    }

    /// Drop every particle whose flag in `doomed` is set, keeping the order
    /// of survivors. Flags past the end of `doomed` count as survivors.
    /// Returns the number of removed particles.
    pub fn retain_marked(&mut self, doomed: &[bool]) -> usize {
        let before = self.particles.len();
        let mut index = 0;
        self.particles.retain(|_| {
            let keep = !doomed.get(index).copied().unwrap_or(false);
            index += 1;
            keep
        });
        before - self.particles.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.particles.iter_mut()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Remove every particle.
    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
