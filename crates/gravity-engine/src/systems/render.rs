use crate::core::particle::Particle;
use crate::renderer::instance::{CircleBuffer, CircleInstance};

/// Build the circle instance buffer from the particle store, in store order.
/// Returns how many particles did not fit.
pub fn build_circle_buffer<'a>(
    particles: impl Iterator<Item = &'a Particle>,
    buffer: &mut CircleBuffer,
) -> usize {
    buffer.clear();
    let mut dropped = 0;
    for p in particles {
        let written = buffer.push(CircleInstance {
            x: p.pos.x,
            y: p.pos.y,
            radius: p.radius,
            r: p.color.r,
            g: p.color.g,
            b: p.color.b,
            speed: p.speed(),
            _pad: 0.0,
        });
        if !written {
            dropped += 1;
        }
    }
    if dropped > 0 {
        log::warn!("circle buffer full, {} particle(s) not drawn", dropped);
    }
    dropped
}
