pub mod editor;
pub mod gesture;
pub mod input;
pub mod mode;
pub mod shortcuts;

pub use editor::{CommandSink, Commands, Editor, Viewport};
pub use gesture::{GestureTracker, Phase, PointerState};
pub use mode::{ListenerId, ModeChange, ModeController, translate};
