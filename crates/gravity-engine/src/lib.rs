pub mod api;
pub mod core;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::config::SimConfig;
pub use api::sim::SimContext;
pub use api::types::{event_kind, SimEvent};
pub use core::particle::{Particle, ParticleColor};
pub use core::physics::{GravityParams, StepReport};
pub use core::spawn::{ColorPolicy, SpawnController, SpawnKind, SpawnRequest, SpawnSpec, SpawnTable};
pub use core::store::ParticleStore;
pub use core::time::FixedTimestep;
pub use renderer::instance::{CircleBuffer, CircleInstance};
pub use input::interaction::{DragLine, DragPhase, Interaction, KeyAction, KeyBindings, Modes};
pub use input::queue::{InputEvent, InputQueue, PointerButton};
pub use input::viewport::Viewport;
pub use bridge::protocol::{FrameHeader, ProtocolLayout};
pub use systems::labels::{LabelSet, TextLabel};
pub use systems::render::build_circle_buffer;

#[cfg(feature = "vectors")]
pub use systems::vector::{VectorState, VectorVertex, VectorColor};
