pub mod command;
pub mod config;
pub mod constraint;
pub mod error;
pub mod event;
pub mod mode;
pub mod scene;

pub use command::{Command, GestureCommand};
pub use config::{DEFAULT_DRAG_THRESHOLD, EditorConfig};
pub use constraint::LengthConstraint;
pub use error::EditorError;
pub use event::{HostEvent, KeyPress, PointerButton, PointerEvent, PointerKind};
pub use mode::Mode;
pub use scene::SceneId;

// Re-export kurbo geometry so downstream crates don't need a direct dependency
pub use kurbo::{Point, Vec2};
