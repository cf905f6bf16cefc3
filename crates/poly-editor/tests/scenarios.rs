//! Integration tests: end-to-end editing scenarios (poly-editor ↔ poly-core).
//!
//! Each test drives an `Editor` with host events exactly as a page would
//! deliver them and checks the command stream the engine receives.

use poly_core::{
    Command, EditorConfig, EditorError, HostEvent, LengthConstraint, Mode, Point, PointerEvent,
    SceneId,
};
use poly_editor::{Editor, ModeChange, Phase};
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;

fn run(editor: &mut Editor, events: &[PointerEvent]) -> Vec<Command> {
    events
        .iter()
        .flat_map(|event| editor.handle_pointer(event))
        .collect()
}

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// ─── Create mode ────────────────────────────────────────────────────────

#[test]
fn create_drag_draws_line() {
    let mut editor = Editor::with_mode(Mode::Create);
    let out = run(
        &mut editor,
        &[
            PointerEvent::down(10.0, 10.0),
            PointerEvent::moved(50.0, 10.0),
            PointerEvent::up(50.0, 10.0),
        ],
    );
    assert_eq!(
        out,
        vec![
            Command::BeginDrag {
                origin: p(10.0, 10.0)
            },
            Command::UpdateDrag {
                origin: p(10.0, 10.0),
                current: p(50.0, 10.0)
            },
            Command::AddLine {
                start: p(10.0, 10.0),
                end: p(50.0, 10.0),
                constraint: LengthConstraint::disabled(),
            },
        ]
    );
    assert_eq!(editor.phase(), Phase::Idle);
}

#[test]
fn create_drag_with_length_constraint_clamps_end() {
    let constraint = LengthConstraint::new(true, 20.0).unwrap();
    let mut editor = Editor::new(&EditorConfig {
        length_constraint: constraint,
        ..EditorConfig::default()
    })
    .unwrap();
    let out = run(
        &mut editor,
        &[
            PointerEvent::down(10.0, 10.0),
            PointerEvent::moved(50.0, 10.0),
            PointerEvent::up(50.0, 10.0),
        ],
    );
    match out.last() {
        Some(Command::AddLine { start, end, .. }) => {
            assert_eq!(*start, p(10.0, 10.0));
            assert!((end.distance(*start) - 20.0).abs() < 1e-9);
            assert!((end.y - 10.0).abs() < 1e-9, "direction must be preserved");
            assert!(end.x > start.x);
        }
        other => panic!("expected AddLine, got {other:?}"),
    }
}

#[test]
fn create_click_places_point_and_right_click_closes() {
    let mut editor = Editor::with_mode(Mode::Create);
    let out = run(
        &mut editor,
        &[
            PointerEvent::down(5.0, 5.0),
            PointerEvent::up(5.0, 5.0),
            PointerEvent::click(5.0, 5.0),
            PointerEvent::secondary_down(9.0, 9.0),
            PointerEvent::context_menu(9.0, 9.0),
        ],
    );
    assert_eq!(
        out,
        vec![
            Command::AddPoint {
                position: p(5.0, 5.0)
            },
            Command::ClosePolygon {
                position: p(9.0, 9.0)
            },
        ]
    );
}

// ─── Highlight / Split / Edit ───────────────────────────────────────────

#[test]
fn highlight_click_toggles_every_time() {
    let mut editor = Editor::with_mode(Mode::Highlight);
    let out = run(
        &mut editor,
        &[PointerEvent::click(30.0, 30.0), PointerEvent::click(30.0, 30.0)],
    );
    let toggle = Command::ToggleHighlight {
        position: p(30.0, 30.0),
    };
    assert_eq!(out, vec![toggle, toggle]);
}

#[test]
fn highlight_hover_reaches_engine() {
    let mut editor = Editor::with_mode(Mode::Highlight);
    assert_eq!(
        run(&mut editor, &[PointerEvent::moved(12.0, 3.0)]),
        vec![Command::Hover {
            position: p(12.0, 3.0)
        }]
    );
    // Other modes drop hover feedback.
    let mut editor = Editor::with_mode(Mode::Edit);
    assert!(run(&mut editor, &[PointerEvent::moved(12.0, 3.0)]).is_empty());
}

#[test]
fn highlight_click_with_wobble_still_toggles() {
    let mut editor = Editor::with_mode(Mode::Highlight);
    let out = run(
        &mut editor,
        &[
            PointerEvent::down(30.0, 30.0),
            PointerEvent::moved(30.5, 30.0),
            PointerEvent::up(30.5, 30.0),
            PointerEvent::click(30.5, 30.0),
        ],
    );
    assert_eq!(
        out,
        vec![Command::ToggleHighlight {
            position: p(30.0, 30.0)
        }]
    );
    assert_eq!(editor.phase(), Phase::Idle);
}

#[test]
fn split_drag_off_canvas_is_cancelled() {
    let mut editor = Editor::with_mode(Mode::Split);
    let out = run(
        &mut editor,
        &[
            PointerEvent::down(10.0, 10.0),
            PointerEvent::moved(40.0, 10.0),
            PointerEvent::leave(40.0, 10.0),
        ],
    );
    assert_eq!(out, vec![Command::CancelDrag]);
    assert_eq!(editor.phase(), Phase::Idle);
}

#[test]
fn split_click_splits_edge() {
    let mut editor = Editor::with_mode(Mode::Split);
    let out = run(
        &mut editor,
        &[PointerEvent::down(70.0, 80.0), PointerEvent::up(70.0, 80.0)],
    );
    assert_eq!(
        out,
        vec![Command::SplitEdgeNear {
            position: p(70.0, 80.0)
        }]
    );
}

#[test]
fn edit_drag_moves_selection_by_delta() {
    let mut editor = Editor::with_mode(Mode::Edit);
    let out = run(
        &mut editor,
        &[
            PointerEvent::down(100.0, 100.0),
            PointerEvent::moved(105.0, 98.0),
            PointerEvent::moved(130.0, 90.0),
            PointerEvent::up(130.0, 90.0),
        ],
    );
    assert_eq!(out.len(), 4);
    assert_eq!(
        out[3],
        Command::MoveSelected {
            delta: poly_core::Vec2::new(30.0, -10.0)
        }
    );
}

#[test]
fn edit_right_click_deletes_near() {
    let mut editor = Editor::with_mode(Mode::Edit);
    assert_eq!(
        run(&mut editor, &[PointerEvent::secondary_down(4.0, 4.0)]),
        vec![Command::DeleteNear {
            position: p(4.0, 4.0)
        }]
    );
}

// ─── Mode switching ─────────────────────────────────────────────────────

#[test]
fn mode_switch_mid_drag_cancels_under_old_mode() {
    let mut editor = Editor::with_mode(Mode::Create);
    let mut out = run(
        &mut editor,
        &[PointerEvent::down(0.0, 0.0), PointerEvent::moved(5.0, 5.0)],
    );
    out.extend(editor.set_mode(Mode::Edit));
    assert_eq!(
        out,
        vec![
            Command::BeginDrag {
                origin: p(0.0, 0.0)
            },
            Command::UpdateDrag {
                origin: p(0.0, 0.0),
                current: p(5.0, 5.0)
            },
            Command::CancelDrag,
        ]
    );
    assert_eq!(editor.mode(), Mode::Edit);

    // The release that follows belongs to no gesture.
    assert!(run(&mut editor, &[PointerEvent::up(5.0, 5.0)]).is_empty());
}

#[test]
fn mode_switch_drops_pending_press() {
    let mut editor = Editor::with_mode(Mode::Create);
    run(&mut editor, &[PointerEvent::down(1.0, 1.0)]);
    assert!(editor.set_mode(Mode::Split).is_empty());
    assert_eq!(editor.phase(), Phase::Idle);
    assert!(run(&mut editor, &[PointerEvent::up(1.0, 1.0)]).is_empty());
}

#[test]
fn same_mode_request_is_idempotent() {
    let mut editor = Editor::with_mode(Mode::Create);
    run(
        &mut editor,
        &[PointerEvent::down(0.0, 0.0), PointerEvent::moved(8.0, 0.0)],
    );
    assert!(editor.set_mode(Mode::Create).is_empty());
    assert_eq!(editor.phase(), Phase::Dragging);
}

#[test]
fn listeners_see_mode_changes() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut editor = Editor::with_mode(Mode::Create);
    let sink = Rc::clone(&seen);
    editor.subscribe(move |change: ModeChange| sink.borrow_mut().push(change.to));

    editor.set_mode(Mode::Rules);
    editor.set_mode(Mode::Rules);
    let _ = editor.set_mode_by_name("nope");
    editor
        .handle(&HostEvent::SetMode {
            mode: "highlight".to_string(),
        })
        .unwrap();

    assert_eq!(*seen.borrow(), vec![Mode::Rules, Mode::Highlight]);
}

// ─── Rules mode ─────────────────────────────────────────────────────────

#[test]
fn rules_right_press_shows_rules_without_touching_primary() {
    let mut editor = Editor::with_mode(Mode::Rules);
    run(&mut editor, &[PointerEvent::down(1.0, 1.0)]);
    let out = run(
        &mut editor,
        &[
            PointerEvent::secondary_down(40.0, 40.0),
            PointerEvent::context_menu(40.0, 40.0),
        ],
    );
    assert_eq!(
        out,
        vec![Command::ShowRules {
            position: p(40.0, 40.0)
        }]
    );
    assert_eq!(editor.phase(), Phase::Pressed);
    assert_eq!(editor.pointer_state().origin, Some(p(1.0, 1.0)));
}

// ─── Traces ─────────────────────────────────────────────────────────────

#[test]
fn create_drag_trace_from_fixture() {
    let events: Vec<HostEvent> =
        serde_json::from_str(include_str!("fixtures/create_drag.json")).unwrap();
    let mut editor = Editor::default();
    let mut sink: Vec<Command> = Vec::new();
    for event in &events {
        editor.handle_into(event, &mut sink).unwrap();
    }
    let ops: Vec<&str> = sink.iter().map(Command::name).collect();
    assert_eq!(ops, vec!["beginDrag", "updateDrag", "addLine"]);
}

#[test]
fn mixed_session_trace() {
    let events: Vec<HostEvent> =
        serde_json::from_str(include_str!("fixtures/mixed_session.json")).unwrap();
    let mut editor = Editor::default();
    let mut sink: Vec<Command> = Vec::new();
    let mut errors = Vec::new();
    for event in &events {
        if let Err(e) = editor.handle_into(event, &mut sink) {
            errors.push(e);
        }
    }

    let ops: Vec<&str> = sink.iter().map(Command::name).collect();
    assert_eq!(
        ops,
        vec![
            "redraw",
            "addPoint",
            "addPoint",
            "addPoint",
            "closePolygon",
            "beginDrag",
            "updateDrag",
            "cancelDrag",
            "showRules",
            "loadScene",
            "redraw",
        ]
    );
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0], EditorError::InvalidMode("pencil".to_string()));
    assert!(matches!(errors[1], EditorError::InvalidConfig(_)));
    assert_eq!(editor.mode(), Mode::Rules);
    assert!(!editor.length_constraint().enabled);
    assert_eq!(
        sink[9],
        Command::LoadScene {
            scene: SceneId::parse("two_polygons").unwrap()
        }
    );
}
