//! Mode controller: the single active mode and the gesture → command table.
//!
//! | Gesture \ Mode  | Create        | Edit             | Highlight       | Split         | Rules      |
//! |-----------------|---------------|------------------|-----------------|---------------|------------|
//! | click           | addPoint      | selectOrMoveNear | toggleHighlight | splitEdgeNear | ·          |
//! | begin/update    | drag preview  | drag preview     | ·               | ·             | ·          |
//! | commit          | addLine       | moveSelected     | ·               | ·             | ·          |
//! | cancel          | cancelDrag    | cancelDrag       | cancelDrag      | cancelDrag    | cancelDrag |
//! | context action  | closePolygon  | deleteNear       | ·               | ·             | showRules  |
//! | hover           | ·             | ·                | hover           | ·             | ·          |
//!
//! Cells marked · resolve to `NoOp`. A drag that ends without committing
//! reaches the engine as `cancelDrag` whatever the mode, so the engine can
//! always drop its pointer state.

use poly_core::{Command, GestureCommand, LengthConstraint, Mode};

/// Identifies a registered mode-change listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeChange {
    pub from: Mode,
    pub to: Mode,
}

type Listener = Box<dyn FnMut(ModeChange)>;

/// Holds the active mode. [`ModeController::set_mode`] is the only way to
/// change it; the UI learns about changes through [`subscribe`].
///
/// [`subscribe`]: ModeController::subscribe
pub struct ModeController {
    mode: Mode,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: usize,
}

impl Default for ModeController {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}

impl ModeController {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch modes and notify listeners. Returns `None` when `next` is
    /// already active.
    ///
    /// Callers holding a gesture must cancel it *before* switching so the
    /// cancellation is still resolved under the outgoing mode.
    pub fn set_mode(&mut self, next: Mode) -> Option<ModeChange> {
        if next == self.mode {
            return None;
        }
        let change = ModeChange {
            from: self.mode,
            to: next,
        };
        self.mode = next;
        log::debug!("mode {} -> {}", change.from, change.to);
        for (_, listener) in &mut self.listeners {
            listener(change);
        }
        Some(change)
    }

    pub fn subscribe(&mut self, listener: impl FnMut(ModeChange) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Resolve a gesture under the active mode.
    pub fn translate(&self, gesture: GestureCommand, constraint: &LengthConstraint) -> Command {
        translate(self.mode, gesture, constraint)
    }
}

/// Resolve a gesture into the mode-specific engine command.
///
/// Pure and total: unmapped pairs yield [`Command::NoOp`].
pub fn translate(mode: Mode, gesture: GestureCommand, constraint: &LengthConstraint) -> Command {
    use GestureCommand as G;

    match (mode, gesture) {
        (Mode::Create, G::Click(position)) => Command::AddPoint { position },
        (Mode::Create, G::UpdateDrag { origin, current }) => Command::UpdateDrag {
            origin,
            current: constraint.apply(origin, current),
        },
        (Mode::Create, G::CommitDrag { origin, current }) => Command::AddLine {
            start: origin,
            end: constraint.apply(origin, current),
            constraint: *constraint,
        },
        (Mode::Create, G::ContextAction(position)) => Command::ClosePolygon { position },

        (Mode::Edit, G::Click(position)) => Command::SelectOrMoveNear { position },
        (Mode::Edit, G::UpdateDrag { origin, current }) => Command::UpdateDrag { origin, current },
        (Mode::Edit, G::CommitDrag { origin, current }) => Command::MoveSelected {
            delta: current - origin,
        },
        (Mode::Edit, G::ContextAction(position)) => Command::DeleteNear { position },

        (Mode::Create | Mode::Edit, G::BeginDrag { origin }) => Command::BeginDrag { origin },
        (_, G::CancelDrag) => Command::CancelDrag,

        (Mode::Highlight, G::Click(position)) => Command::ToggleHighlight { position },
        (Mode::Highlight, G::Hover(position)) => Command::Hover { position },

        (Mode::Split, G::Click(position)) => Command::SplitEdgeNear { position },

        (Mode::Rules, G::ContextAction(position)) => Command::ShowRules { position },

        _ => Command::NoOp,
    }
}
