pub mod particle;
pub mod physics;
pub mod rng;
pub mod spawn;
pub mod store;
pub mod time;

pub use particle::{Particle, ParticleColor};
pub use physics::{GravityParams, StepReport};
pub use spawn::{ColorPolicy, SpawnController, SpawnKind, SpawnRequest, SpawnSpec, SpawnTable};
pub use store::ParticleStore;
pub use time::FixedTimestep;
