//! The per-canvas editor: gesture tracker + mode controller + settings.
//!
//! One `Editor` is constructed per canvas; nothing here is global, so any
//! number of canvases can run side by side. Every host event is handled
//! synchronously: the tracker computes the gesture phases, the mode
//! controller resolves them into engine commands, and `NoOp`s are dropped
//! before anything reaches the [`CommandSink`].

use crate::gesture::{GestureTracker, Gestures, Phase, PointerState};
use crate::mode::{ListenerId, ModeChange, ModeController};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use poly_core::{
    Command, EditorConfig, EditorError, HostEvent, KeyPress, LengthConstraint, Mode,
    PointerEvent, SceneId,
};
use smallvec::{SmallVec, smallvec};

/// Commands produced by one host event.
pub type Commands = SmallVec<[Command; 4]>;

/// Consumer of dispatched commands, i.e. the rendering/geometry engine.
pub trait CommandSink {
    fn dispatch(&mut self, command: &Command);
}

impl CommandSink for Vec<Command> {
    fn dispatch(&mut self, command: &Command) {
        self.push(*command);
    }
}

/// Canvas dimensions in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 700.0,
        }
    }
}

pub struct Editor {
    tracker: GestureTracker,
    modes: ModeController,
    constraint: LengthConstraint,
    viewport: Viewport,
}

impl Default for Editor {
    fn default() -> Self {
        Self::build(&EditorConfig::default())
    }
}

impl Editor {
    /// Create an editor from a configuration, validating it first.
    pub fn new(config: &EditorConfig) -> Result<Self, EditorError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Default configuration, starting in `mode`.
    pub fn with_mode(mode: Mode) -> Self {
        Self::build(&EditorConfig {
            default_mode: mode,
            ..EditorConfig::default()
        })
    }

    fn build(config: &EditorConfig) -> Self {
        Self {
            tracker: GestureTracker::new(config.drag_threshold, config.forward_hover),
            modes: ModeController::new(config.default_mode),
            constraint: config.length_constraint,
            viewport: Viewport::default(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.modes.mode()
    }

    pub fn phase(&self) -> Phase {
        self.tracker.phase()
    }

    pub fn pointer_state(&self) -> &PointerState {
        self.tracker.primary()
    }

    pub fn length_constraint(&self) -> LengthConstraint {
        self.constraint
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Register a mode-change listener (toolbar highlighting and the like).
    pub fn subscribe(&mut self, listener: impl FnMut(ModeChange) + 'static) -> ListenerId {
        self.modes.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.modes.unsubscribe(id)
    }

    /// Handle any host event.
    ///
    /// Only configuration requests can fail; pointer input never does.
    pub fn handle(&mut self, event: &HostEvent) -> Result<Commands, EditorError> {
        match event {
            HostEvent::Pointer(pointer) => Ok(self.handle_pointer(pointer)),
            HostEvent::Resize { width, height } => self.resize(*width, *height),
            HostEvent::SetMode { mode } => self.set_mode_by_name(mode),
            HostEvent::Configure { constraint } => {
                self.set_length_constraint(*constraint)?;
                Ok(Commands::new())
            }
            HostEvent::LoadScene { scene } => Ok(self.load_scene(*scene)),
            HostEvent::Key(key) => Ok(self.handle_key(key)),
        }
    }

    /// Handle an event and dispatch the resulting commands into `sink`.
    /// Returns the number of commands dispatched.
    pub fn handle_into<S: CommandSink + ?Sized>(
        &mut self,
        event: &HostEvent,
        sink: &mut S,
    ) -> Result<usize, EditorError> {
        let commands = self.handle(event)?;
        for command in &commands {
            sink.dispatch(command);
        }
        Ok(commands.len())
    }

    pub fn handle_pointer(&mut self, event: &PointerEvent) -> Commands {
        if !event.is_well_formed() {
            log::warn!("ignoring pointer event with non-finite position: {event:?}");
            return Commands::new();
        }
        let gestures = self.tracker.handle(event);
        self.resolve(gestures)
    }

    /// Switch modes. A drag in progress is cancelled first, under the mode
    /// it was started in.
    pub fn set_mode(&mut self, next: Mode) -> Commands {
        if next == self.modes.mode() {
            return Commands::new();
        }
        let cancelled = self.cancel_gesture();
        self.modes.set_mode(next);
        cancelled
    }

    /// Switch modes by name; unknown names leave the current mode in place.
    pub fn set_mode_by_name(&mut self, name: &str) -> Result<Commands, EditorError> {
        let mode = name.parse::<Mode>().inspect_err(|e| log::warn!("{e}"))?;
        Ok(self.set_mode(mode))
    }

    /// Replace the length constraint. Invalid values are rejected and the
    /// previous constraint is kept.
    pub fn set_length_constraint(
        &mut self,
        constraint: LengthConstraint,
    ) -> Result<(), EditorError> {
        constraint.validate().inspect_err(|e| log::warn!("{e}"))?;
        self.constraint = constraint;
        Ok(())
    }

    /// Record new canvas bounds and ask the engine to repaint. Gesture state
    /// is untouched.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<Commands, EditorError> {
        let valid = |v: f64| v.is_finite() && v >= 0.0;
        if !(valid(width) && valid(height)) {
            return Err(EditorError::InvalidConfig(format!(
                "canvas size must be non-negative, got {width}x{height}"
            )));
        }
        self.viewport = Viewport { width, height };
        Ok(smallvec![Command::Redraw])
    }

    /// Replace the diagram with a predefined scene. Any gesture in progress
    /// refers to geometry that is about to disappear, so it is cancelled.
    pub fn load_scene(&mut self, scene: SceneId) -> Commands {
        let mut commands = self.cancel_gesture();
        commands.push(Command::LoadScene { scene });
        commands.push(Command::Redraw);
        commands
    }

    /// Abandon the primary gesture (Escape, lost pointer capture).
    pub fn cancel_gesture(&mut self) -> Commands {
        let gestures = self.tracker.cancel();
        self.resolve(gestures)
    }

    pub fn handle_key(&mut self, key: &KeyPress) -> Commands {
        match ShortcutMap::resolve(&key.key, key.ctrl, key.meta) {
            Some(ShortcutAction::SetMode(mode)) => self.set_mode(mode),
            Some(ShortcutAction::CancelGesture) => self.cancel_gesture(),
            None => Commands::new(),
        }
    }

    fn resolve(&self, gestures: Gestures) -> Commands {
        gestures
            .into_iter()
            .map(|gesture| self.modes.translate(gesture, &self.constraint))
            .filter(|command| !command.is_noop())
            .inspect(|command| log::trace!("dispatch {}", command.name()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poly_core::Point;
    use pretty_assertions::assert_eq;

    #[test]
    fn resize_redraws_without_touching_gesture() {
        let mut editor = Editor::default();
        editor.handle_pointer(&PointerEvent::down(1.0, 1.0));
        let out = editor.resize(640.0, 480.0).unwrap();
        assert_eq!(out.to_vec(), vec![Command::Redraw]);
        assert_eq!(
            editor.viewport(),
            Viewport {
                width: 640.0,
                height: 480.0
            }
        );
        assert_eq!(editor.phase(), Phase::Pressed);
    }

    #[test]
    fn resize_rejects_bad_sizes() {
        let mut editor = Editor::default();
        assert!(editor.resize(-1.0, 10.0).is_err());
        assert!(editor.resize(10.0, f64::NAN).is_err());
        assert_eq!(editor.viewport(), Viewport::default());
    }

    #[test]
    fn invalid_constraint_keeps_previous() {
        let mut editor = Editor::default();
        let good = LengthConstraint::new(true, 20.0).unwrap();
        editor.set_length_constraint(good).unwrap();
        let bad = LengthConstraint {
            enabled: true,
            length: -3.0,
        };
        assert!(matches!(
            editor.set_length_constraint(bad),
            Err(EditorError::InvalidConfig(_))
        ));
        assert_eq!(editor.length_constraint(), good);
    }

    #[test]
    fn invalid_mode_name_keeps_mode() {
        let mut editor = Editor::default();
        assert_eq!(
            editor.set_mode_by_name("lasso").unwrap_err(),
            EditorError::InvalidMode("lasso".to_string())
        );
        assert_eq!(editor.mode(), Mode::Create);
        assert!(editor.set_mode_by_name("split").unwrap().is_empty());
        assert_eq!(editor.mode(), Mode::Split);
    }

    #[test]
    fn load_scene_cancels_drag_first() {
        let mut editor = Editor::default();
        editor.handle_pointer(&PointerEvent::down(0.0, 0.0));
        editor.handle_pointer(&PointerEvent::moved(4.0, 0.0));
        let scene = SceneId::parse("two_polygons").unwrap();
        assert_eq!(
            editor.load_scene(scene).to_vec(),
            vec![
                Command::CancelDrag,
                Command::LoadScene { scene },
                Command::Redraw
            ]
        );
        assert_eq!(editor.phase(), Phase::Idle);
    }

    #[test]
    fn escape_cancels_and_letters_switch_modes() {
        let mut editor = Editor::default();
        editor.handle_pointer(&PointerEvent::down(0.0, 0.0));
        editor.handle_pointer(&PointerEvent::moved(0.0, 9.0));
        assert_eq!(
            editor.handle_key(&KeyPress::plain("Escape")).to_vec(),
            vec![Command::CancelDrag]
        );
        assert!(editor.handle_key(&KeyPress::plain("h")).is_empty());
        assert_eq!(editor.mode(), Mode::Highlight);
    }

    #[test]
    fn read_only_modes_still_cancel_dangling_drags() {
        for mode in [Mode::Highlight, Mode::Split, Mode::Rules] {
            let mut editor = Editor::with_mode(mode);
            editor.handle_pointer(&PointerEvent::down(0.0, 0.0));
            editor.handle_pointer(&PointerEvent::moved(5.0, 5.0));
            assert_eq!(editor.phase(), Phase::Dragging, "{mode}");
            assert_eq!(
                editor.set_mode(Mode::Create).to_vec(),
                vec![Command::CancelDrag],
                "{mode}"
            );
        }
    }

    #[test]
    fn noops_never_reach_the_sink() {
        let mut editor = Editor::with_mode(Mode::Rules);
        let mut sink: Vec<Command> = Vec::new();
        for event in [
            PointerEvent::down(0.0, 0.0),
            PointerEvent::moved(5.0, 5.0),
            PointerEvent::up(5.0, 5.0),
            PointerEvent::click(1.0, 1.0),
        ] {
            editor
                .handle_into(&HostEvent::Pointer(event), &mut sink)
                .unwrap();
        }
        assert!(sink.is_empty());
        assert_eq!(editor.phase(), Phase::Idle);
    }

    #[test]
    fn nan_pointer_is_absorbed() {
        let mut editor = Editor::default();
        editor.handle_pointer(&PointerEvent::down(1.0, 1.0));
        assert!(
            editor
                .handle_pointer(&PointerEvent::moved(f64::NAN, 1.0))
                .is_empty()
        );
        assert_eq!(editor.pointer_state().current, Some(Point::new(1.0, 1.0)));
    }

    #[test]
    fn rejects_invalid_config() {
        let config = EditorConfig {
            drag_threshold: f64::NAN,
            ..EditorConfig::default()
        };
        assert!(Editor::new(&config).is_err());
    }
}
