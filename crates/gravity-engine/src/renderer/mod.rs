pub mod instance;

pub use instance::{CircleBuffer, CircleInstance};
