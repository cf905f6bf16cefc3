//! Gesture tracker: folds a noisy pointer stream into well-formed phases.
//!
//! The primary button runs a three-phase machine:
//!
//! ```text
//!            down                move > threshold
//!   Idle ──────────▶ Pressed ─────────────────────▶ Dragging ──┐ move
//!    ▲                 │  up / click                  │  ▲      │ (updateDrag)
//!    │                 │  (click)                     │  └──────┘
//!    ├─────────────────┘                              │
//!    │           up (commitDrag) / leave, cancel (cancelDrag)
//!    └────────────────────────────────────────────────┘
//! ```
//!
//! The secondary button never drags: a press emits a context action at
//! once. Both buttons keep disjoint state.
//!
//! Transitions are computed by the pure [`GestureTracker::step`] and
//! committed with [`GestureTracker::apply`], so every rule can be tested
//! by inspecting the returned [`Transition`] without mutating anything.

use poly_core::{
    DEFAULT_DRAG_THRESHOLD, GestureCommand, Point, PointerButton, PointerEvent, PointerKind,
};
use smallvec::{SmallVec, smallvec};

/// Gesture commands emitted by one transition (at most two).
pub type Gestures = SmallVec<[GestureCommand; 2]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Pressed,
    Dragging,
}

/// One in-flight gesture for a single button.
///
/// `origin` and `current` are `Some` exactly when `phase != Idle`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    pub phase: Phase,
    pub origin: Option<Point>,
    pub current: Option<Point>,
    pub button: PointerButton,
}

impl PointerState {
    pub fn idle(button: PointerButton) -> Self {
        Self {
            phase: Phase::Idle,
            origin: None,
            current: None,
            button,
        }
    }

    fn pressed(button: PointerButton, at: Point) -> Self {
        Self {
            phase: Phase::Pressed,
            origin: Some(at),
            current: Some(at),
            button,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }
}

/// Per-button state cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonSlot {
    pub state: PointerState,
    /// The browser follows `mouseup` with `click` (and a right press with
    /// `contextmenu`). Set once this button's gesture resolved so that
    /// trailing event is swallowed instead of counted twice.
    pub swallow_trailing: bool,
}

impl ButtonSlot {
    fn new(button: PointerButton) -> Self {
        Self {
            state: PointerState::idle(button),
            swallow_trailing: false,
        }
    }

    fn idle(&self) -> Self {
        Self::new(self.state.button)
    }
}

/// The outcome of feeding one event to the tracker.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub button: PointerButton,
    pub next: ButtonSlot,
    pub emitted: Gestures,
}

pub struct GestureTracker {
    primary: ButtonSlot,
    secondary: ButtonSlot,
    drag_threshold: f64,
    forward_hover: bool,
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_THRESHOLD, true)
    }
}

impl GestureTracker {
    /// `drag_threshold` is the distance from the press position a move must
    /// exceed to start a drag.
    pub fn new(drag_threshold: f64, forward_hover: bool) -> Self {
        Self {
            primary: ButtonSlot::new(PointerButton::Primary),
            secondary: ButtonSlot::new(PointerButton::Secondary),
            drag_threshold,
            forward_hover,
        }
    }

    pub fn primary(&self) -> &PointerState {
        &self.primary.state
    }

    pub fn phase(&self) -> Phase {
        self.primary.state.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.phase() == Phase::Dragging
    }

    fn slot(&self, button: PointerButton) -> &ButtonSlot {
        match button {
            PointerButton::Primary => &self.primary,
            PointerButton::Secondary => &self.secondary,
        }
    }

    /// Feed one event: compute the transition and commit it.
    pub fn handle(&mut self, event: &PointerEvent) -> Gestures {
        let transition = self.step(event);
        self.apply(transition)
    }

    /// Commit a transition previously computed by [`step`](Self::step) or
    /// [`cancel_step`](Self::cancel_step), returning what it emitted.
    pub fn apply(&mut self, transition: Transition) -> Gestures {
        let slot = match transition.button {
            PointerButton::Primary => &mut self.primary,
            PointerButton::Secondary => &mut self.secondary,
        };
        if slot.state.phase != transition.next.state.phase {
            log::trace!(
                "{:?} button: {:?} -> {:?}",
                transition.button,
                slot.state.phase,
                transition.next.state.phase
            );
        }
        *slot = transition.next;
        transition.emitted
    }

    /// Force the primary gesture back to idle (mode switch, lost capture).
    pub fn cancel(&mut self) -> Gestures {
        let transition = self.cancel_step();
        self.apply(transition)
    }

    /// Compute the cancellation transition. Only an actual drag emits
    /// `CancelDrag`; a bare press has begun nothing and is dropped silently.
    pub fn cancel_step(&self) -> Transition {
        let slot = self.primary;
        let emitted = if slot.state.phase == Phase::Dragging {
            smallvec![GestureCommand::CancelDrag]
        } else {
            Gestures::new()
        };
        Transition {
            button: PointerButton::Primary,
            next: slot.idle(),
            emitted,
        }
    }

    /// Compute the transition for `event` without changing any state.
    pub fn step(&self, event: &PointerEvent) -> Transition {
        // Route by kind first: hover, leave and context-menu events carry no
        // reliable button information.
        let button = match event.kind {
            PointerKind::Move | PointerKind::Leave => PointerButton::Primary,
            PointerKind::ContextMenu => PointerButton::Secondary,
            _ => event.button,
        };
        let slot = *self.slot(button);
        let (next, emitted) = match button {
            PointerButton::Primary => self.step_primary(slot, event),
            PointerButton::Secondary => step_secondary(slot, event),
        };
        Transition {
            button,
            next,
            emitted,
        }
    }

    fn step_primary(&self, slot: ButtonSlot, event: &PointerEvent) -> (ButtonSlot, Gestures) {
        let pos = event.position;
        let state = slot.state;
        let (origin, current) = match (state.origin, state.current) {
            (Some(origin), Some(current)) => (origin, current),
            _ => (pos, pos),
        };

        match (event.kind, state.phase) {
            (PointerKind::Down, Phase::Idle) => (
                ButtonSlot {
                    state: PointerState::pressed(state.button, pos),
                    swallow_trailing: false,
                },
                Gestures::new(),
            ),
            // Repeated press while a gesture is live keeps the first origin.
            (PointerKind::Down, _) => (slot, Gestures::new()),

            (PointerKind::Move, Phase::Idle) => {
                let emitted = if self.forward_hover {
                    smallvec![GestureCommand::Hover(pos)]
                } else {
                    Gestures::new()
                };
                (
                    ButtonSlot {
                        swallow_trailing: false,
                        ..slot
                    },
                    emitted,
                )
            }
            (PointerKind::Move, Phase::Pressed) => {
                let mut next = slot;
                next.state.current = Some(pos);
                if pos.distance(origin) > self.drag_threshold {
                    next.state.phase = Phase::Dragging;
                    (
                        next,
                        smallvec![
                            GestureCommand::BeginDrag { origin },
                            GestureCommand::UpdateDrag {
                                origin,
                                current: pos,
                            },
                        ],
                    )
                } else {
                    (next, Gestures::new())
                }
            }
            (PointerKind::Move, Phase::Dragging) => {
                if pos == current {
                    return (slot, Gestures::new());
                }
                let mut next = slot;
                next.state.current = Some(pos);
                (
                    next,
                    smallvec![GestureCommand::UpdateDrag {
                        origin,
                        current: pos,
                    }],
                )
            }

            // Release with no matching press: absorbed.
            (PointerKind::Up, Phase::Idle) => (slot, Gestures::new()),
            (PointerKind::Up, Phase::Pressed) => (
                ButtonSlot {
                    swallow_trailing: true,
                    ..slot.idle()
                },
                smallvec![GestureCommand::Click(origin)],
            ),
            (PointerKind::Up, Phase::Dragging) => (
                ButtonSlot {
                    swallow_trailing: true,
                    ..slot.idle()
                },
                smallvec![GestureCommand::CommitDrag {
                    origin,
                    current: pos,
                }],
            ),

            (PointerKind::Click, Phase::Idle) => {
                if slot.swallow_trailing {
                    (slot.idle(), Gestures::new())
                } else {
                    (slot, smallvec![GestureCommand::Click(pos)])
                }
            }
            // The up-event went missing; the click itself closes the gesture.
            (PointerKind::Click, Phase::Pressed) => {
                (slot.idle(), smallvec![GestureCommand::Click(origin)])
            }
            (PointerKind::Click, Phase::Dragging) => (
                slot.idle(),
                smallvec![GestureCommand::CommitDrag {
                    origin,
                    current: pos,
                }],
            ),

            (PointerKind::Leave, Phase::Dragging) => {
                (slot.idle(), smallvec![GestureCommand::CancelDrag])
            }
            (PointerKind::Leave, _) => (slot.idle(), Gestures::new()),

            (PointerKind::ContextMenu, _) => (slot, Gestures::new()),
        }
    }
}

fn step_secondary(slot: ButtonSlot, event: &PointerEvent) -> (ButtonSlot, Gestures) {
    let pos = event.position;
    match event.kind {
        PointerKind::Down => (
            ButtonSlot {
                swallow_trailing: true,
                ..slot
            },
            smallvec![GestureCommand::ContextAction(pos)],
        ),
        PointerKind::ContextMenu if slot.swallow_trailing => (
            ButtonSlot {
                swallow_trailing: false,
                ..slot
            },
            Gestures::new(),
        ),
        PointerKind::ContextMenu => (slot, smallvec![GestureCommand::ContextAction(pos)]),
        _ => (slot, Gestures::new()),
    }
}
