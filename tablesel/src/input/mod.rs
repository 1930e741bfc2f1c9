//! Keyboard input: key combinations and the gestures they map to.

mod gesture;
mod keys;

pub use gesture::{Action, GestureContext, GestureInterpreter};
pub use keys::{Key, KeyCombo, Modifiers};
