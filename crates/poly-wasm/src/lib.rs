//! WASM bridge for Poly Draft: exposes the gesture editor to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The page forwards raw DOM
//! pointer events (type, button, page coordinates); every resulting command
//! is handed to the engine callback as a JSON string such as
//! `{"op":"addLine","start":{...},"end":{...},"constraint":{...}}`.

mod console;

use poly_core::{
    Command, EditorConfig, EditorError, HostEvent, KeyPress, LengthConstraint, Mode, SceneId,
};
use poly_editor::input::{self, CanvasOffset};
use poly_editor::{CommandSink, Editor};
use wasm_bindgen::prelude::*;

/// Engine callback wrapper: `engine(commandJson)`.
struct JsEngine(js_sys::Function);

impl CommandSink for JsEngine {
    fn dispatch(&mut self, command: &Command) {
        let json = JsValue::from_str(&command.to_json());
        if let Err(e) = self.0.call1(&JsValue::NULL, &json) {
            log::error!("engine rejected {}: {e:?}", command.name());
        }
    }
}

/// The WASM-facing canvas controller. One per `<canvas>` element.
#[wasm_bindgen]
pub struct PolyCanvas {
    editor: Editor,
    offset: CanvasOffset,
    engine: JsEngine,
}

#[wasm_bindgen]
impl PolyCanvas {
    /// Create a controller with default settings. `engine` receives each
    /// command as a JSON string.
    #[wasm_bindgen(constructor)]
    pub fn new(engine: js_sys::Function, width: f64, height: f64) -> Result<PolyCanvas, JsValue> {
        Self::build(engine, &EditorConfig::default(), width, height)
    }

    /// Create a controller from a JSON configuration object
    /// (`{"defaultMode":"edit","dragThreshold":2,...}`).
    pub fn with_config(
        engine: js_sys::Function,
        config_json: &str,
        width: f64,
        height: f64,
    ) -> Result<PolyCanvas, JsValue> {
        let config = EditorConfig::from_json(config_json).map_err(to_js)?;
        Self::build(engine, &config, width, height)
    }

    /// Record the canvas element's page offset
    /// (`offsetLeft + clientLeft`, `offsetTop + clientTop`).
    pub fn set_offset(&mut self, left: f64, top: f64) {
        self.offset = CanvasOffset::new(left, top);
    }

    /// Forward a DOM mouse/pointer event. Returns the number of commands
    /// dispatched; unknown event types and untracked buttons dispatch none.
    pub fn handle_pointer(
        &mut self,
        event_type: &str,
        button: i16,
        page_x: f64,
        page_y: f64,
    ) -> u32 {
        match input::normalize(event_type, button, page_x, page_y, &self.offset) {
            Some(event) => self.dispatch(&HostEvent::Pointer(event)).unwrap_or(0),
            None => 0,
        }
    }

    /// Update canvas bounds and request a repaint.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<u32, JsValue> {
        self.dispatch(&HostEvent::Resize { width, height }).map_err(to_js)
    }

    /// Switch modes by name. Unknown names are rejected and the current
    /// mode stays active.
    pub fn set_mode(&mut self, name: &str) -> Result<u32, JsValue> {
        self.dispatch(&HostEvent::SetMode {
            mode: name.to_string(),
        })
        .map_err(to_js)
    }

    pub fn get_mode(&self) -> String {
        self.editor.mode().name().to_string()
    }

    /// Update the segment length rule from the constraint controls.
    pub fn set_length_constraint(&mut self, enabled: bool, length: f64) -> Result<(), JsValue> {
        let constraint = LengthConstraint { enabled, length };
        self.editor.set_length_constraint(constraint).map_err(to_js)
    }

    /// Get the current constraint as JSON: `{"enabled":bool,"length":number}`.
    pub fn get_length_constraint(&self) -> String {
        serde_json::to_string(&self.editor.length_constraint())
            .unwrap_or_else(|_| r#"{"enabled":false,"length":0}"#.to_string())
    }

    /// Replace the diagram with a predefined scene. Names must be slugs
    /// such as `two_polygons`.
    pub fn load_scene(&mut self, scene: &str) -> Result<u32, JsValue> {
        let scene = SceneId::parse(scene).map_err(to_js)?;
        self.dispatch(&HostEvent::LoadScene { scene }).map_err(to_js)
    }

    /// Handle a keyboard shortcut. Returns the number of commands dispatched.
    pub fn handle_key(&mut self, key: &str, ctrl: bool, meta: bool) -> u32 {
        self.dispatch(&HostEvent::Key(KeyPress {
            key: key.to_string(),
            ctrl,
            meta,
        }))
        .unwrap_or(0)
    }

    /// Abandon the gesture in progress (e.g. the window lost focus).
    pub fn cancel_gesture(&mut self) -> u32 {
        let commands = self.editor.cancel_gesture();
        for command in &commands {
            self.engine.dispatch(command);
        }
        commands.len() as u32
    }

    /// Register `listener(from, to)` to be told about mode changes, so the
    /// toolbar can move its active-button highlight.
    pub fn on_mode_change(&mut self, listener: js_sys::Function) {
        self.editor.subscribe(move |change| {
            let from = JsValue::from_str(change.from.name());
            let to = JsValue::from_str(change.to.name());
            if let Err(e) = listener.call2(&JsValue::NULL, &from, &to) {
                log::error!("mode listener failed: {e:?}");
            }
        });
    }

    /// Change console verbosity (`"off"`, `"warn"`, `"debug"`, `"trace"`, ...).
    pub fn set_log_level(&self, level: &str) -> bool {
        console::set_level(level)
    }
}

// ─── Private helpers ─────────────────────────────────────────────────────

impl PolyCanvas {
    fn build(
        engine: js_sys::Function,
        config: &EditorConfig,
        width: f64,
        height: f64,
    ) -> Result<PolyCanvas, JsValue> {
        console::init(log::LevelFilter::Warn);
        let mut editor = Editor::new(config).map_err(to_js)?;
        // Initial bounds; the page repaints once the engine is ready.
        editor.resize(width, height).map_err(to_js)?;
        Ok(Self {
            editor,
            offset: CanvasOffset::default(),
            engine: JsEngine(engine),
        })
    }

    fn dispatch(&mut self, event: &HostEvent) -> Result<u32, EditorError> {
        let count = self.editor.handle_into(event, &mut self.engine)?;
        Ok(count as u32)
    }
}

fn to_js(error: EditorError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

// ─── Standalone helpers (no canvas needed) ───────────────────────────────

/// All mode names as a JSON array, in toolbar order.
#[wasm_bindgen]
pub fn mode_names() -> String {
    let names: Vec<&str> = Mode::ALL.iter().map(|mode| mode.name()).collect();
    serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_string())
}

/// Validate a configuration object without creating a canvas.
/// Returns `{"ok":true}` or `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn validate_config(config_json: &str) -> String {
    match EditorConfig::from_json(config_json) {
        Ok(_) => r#"{"ok":true}"#.to_string(),
        Err(e) => serde_json::json!({ "ok": false, "error": e.to_string() }).to_string(),
    }
}
