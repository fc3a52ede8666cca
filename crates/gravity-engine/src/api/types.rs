use bytemuck::{Pod, Zeroable};

/// Event kinds written into [`SimEvent::kind`].
pub mod event_kind {
    /// a = particles in the store, b = anchors among them.
    pub const PARTICLE_COUNT: f32 = 1.0;
    /// a = absorbed this frame, b = absorbed since start.
    pub const ABSORBED: f32 = 2.0;
    /// a = drag-launch mode (0/1), b = velocity labels (0/1), c = dragging (0/1).
    pub const MODES: f32 = 3.0;
    /// a = process exit code. The host tears down the canvas.
    pub const EXIT: f32 = 4.0;
}

/// A per-frame event from the simulation to the host page.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SimEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl SimEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }
}
