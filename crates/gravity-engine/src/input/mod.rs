pub mod interaction;
pub mod queue;
pub mod viewport;

pub use interaction::{ButtonState, DragLine, DragPhase, Interaction, KeyAction, KeyBindings, Modes};
pub use queue::{InputEvent, InputQueue, PointerButton};
pub use viewport::Viewport;
