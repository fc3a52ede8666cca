use bytemuck::{Pod, Zeroable};

/// Per-particle render data written to the shared buffer for the host renderer.
/// Must match the host's circle stride: 8 floats = 32 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct CircleInstance {
    /// X position in window-centered space.
    pub x: f32,
    /// Y position, growing downward.
    pub y: f32,
    pub radius: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Velocity magnitude, for hosts that color or label by speed.
    pub speed: f32,
    pub _pad: f32,
}

impl CircleInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Circle instances for one frame, capped at the protocol capacity.
pub struct CircleBuffer {
    instances: Vec<CircleInstance>,
    max: usize,
}

impl CircleBuffer {
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    pub fn with_capacity(max: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max),
            max,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Append an instance. Returns false once the buffer is full.
    pub fn push(&mut self, instance: CircleInstance) -> bool {
        if self.instances.len() >= self.max {
            return false;
        }
        self.instances.push(instance);
        true
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn capacity(&self) -> usize {
        self.max
    }

    pub fn instances(&self) -> &[CircleInstance] {
        &self.instances
    }

    /// Flat float view of the instances.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Raw pointer to instance data for shared-buffer reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for CircleBuffer {
    fn default() -> Self {
        Self::new()
    }
}
