//! Input normalization layer.
//!
//! Turns raw DOM mouse/pointer event data (event type, `MouseEvent.button`,
//! page coordinates) into canvas-local [`PointerEvent`]s consumed by the
//! gesture tracker. Anything that cannot be mapped is dropped here.

use poly_core::{Point, PointerButton, PointerEvent, PointerKind};

/// Page-space position of the canvas element's content box.
///
/// Mirrors what the page computes as `offsetLeft + clientLeft` and
/// `offsetTop + clientTop`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CanvasOffset {
    pub left: f64,
    pub top: f64,
}

impl CanvasOffset {
    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }

    /// Translate a page-space position into canvas-local coordinates.
    pub fn to_canvas(&self, page_x: f64, page_y: f64) -> Point {
        Point::new(page_x - self.left, page_y - self.top)
    }
}

/// Map `MouseEvent.button` to a tracked button. Middle and extra buttons
/// are not tracked.
pub fn button_from_dom(code: i16) -> Option<PointerButton> {
    match code {
        0 => Some(PointerButton::Primary),
        2 => Some(PointerButton::Secondary),
        _ => None,
    }
}

/// Map a DOM event type to a pointer kind. Both mouse and pointer event
/// families are accepted.
pub fn kind_from_dom(event_type: &str) -> Option<PointerKind> {
    match event_type {
        "mousedown" | "pointerdown" => Some(PointerKind::Down),
        "mousemove" | "pointermove" => Some(PointerKind::Move),
        "mouseup" | "pointerup" => Some(PointerKind::Up),
        "click" => Some(PointerKind::Click),
        "contextmenu" => Some(PointerKind::ContextMenu),
        "mouseleave" | "pointerleave" | "pointercancel" | "lostpointercapture" => {
            Some(PointerKind::Leave)
        }
        _ => None,
    }
}

/// Build a canvas-local pointer event from raw DOM data.
///
/// Returns `None` for unknown event types, untracked buttons and
/// non-finite coordinates.
pub fn normalize(
    event_type: &str,
    button: i16,
    page_x: f64,
    page_y: f64,
    offset: &CanvasOffset,
) -> Option<PointerEvent> {
    let kind = kind_from_dom(event_type)?;
    let button = match kind {
        // `button` is meaningless on these; it reads 0 during a right drag too.
        PointerKind::Move | PointerKind::Leave => PointerButton::Primary,
        PointerKind::ContextMenu => PointerButton::Secondary,
        _ => button_from_dom(button)?,
    };
    let event = PointerEvent {
        kind,
        button,
        position: offset.to_canvas(page_x, page_y),
    };
    if !event.is_well_formed() {
        log::warn!("dropping {event_type} with non-finite position ({page_x}, {page_y})");
        return None;
    }
    Some(event)
}
