//! WebAssembly binding: `GridView` wires three canvases to a [`Grid`].
//!
//! Event handlers are registered when the view is created, so selection,
//! resizing, editing, wheel scrolling and Ctrl+Z / Ctrl+Y work without any
//! JavaScript glue beyond constructing the view.
//!
//! Press coordinates are taken relative to the canvas that received the
//! press. Moves and releases are tracked on the window and converted to body
//! coordinates, so drags keep working outside the grid.

use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Element, FocusEvent, HtmlCanvasElement, HtmlElement, KeyboardEvent,
    MouseEvent, WheelEvent,
};

use crate::editor::InputOverlay;
use crate::error::GridError;
use crate::render::CanvasSurface;
use crate::types::GridConfig;
use crate::viewer::{CursorStyle, Grid, Key, KeyInput, ScrollAxis, SurfaceKind};

struct SharedState {
    grid: Grid<CanvasSurface>,
    body: HtmlCanvasElement,
    editor: InputOverlay,
    /// An auto-scroll frame is scheduled
    frame_pending: bool,
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Spreadsheet grid over a body canvas and two header canvases.
#[wasm_bindgen]
pub struct GridView {
    state: Rc<RefCell<SharedState>>,
    #[allow(dead_code)]
    closures: Vec<Closure<dyn FnMut(MouseEvent)>>,
    /// Move and release listeners on the window, removed on drop
    window_listeners: Vec<(&'static str, Closure<dyn FnMut(MouseEvent)>)>,
    #[allow(dead_code)]
    wheel_closure: Closure<dyn FnMut(WheelEvent)>,
    key_closure: Closure<dyn FnMut(KeyboardEvent)>,
    #[allow(dead_code)]
    frame_callback: FrameCallback,
}

/// Pointer position relative to `element`'s top-left corner.
fn local_point(element: &HtmlElement, event: &MouseEvent) -> (f64, f64) {
    let rect = element.get_bounding_client_rect();
    (
        f64::from(event.client_x()) - rect.left(),
        f64::from(event.client_y()) - rect.top(),
    )
}

/// Page position of `element`'s top-left corner.
fn page_origin(element: &HtmlElement) -> (f64, f64) {
    let rect = element.get_bounding_client_rect();
    let (scroll_x, scroll_y) = web_sys::window().map_or((0.0, 0.0), |w| {
        (w.scroll_x().unwrap_or(0.0), w.scroll_y().unwrap_or(0.0))
    });
    (rect.left() + scroll_x, rect.top() + scroll_y)
}

/// Logical size of a canvas: its CSS box, or its buffer size before layout.
fn logical_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
    let (width, height) = (canvas.client_width(), canvas.client_height());
    if width > 0 && height > 0 {
        (f64::from(width), f64::from(height))
    } else {
        (f64::from(canvas.width()), f64::from(canvas.height()))
    }
}

fn set_document_cursor(cursor: CursorStyle) {
    if let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    {
        let value = match cursor {
            CursorStyle::Default => "",
            other => other.as_css(),
        };
        let _ = body.style().set_property("cursor", value);
    }
}

/// Typing into an input, textarea, select or contenteditable element elsewhere on the page.
fn is_editable_target(event: &KeyboardEvent) -> bool {
    let Some(element) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return false;
    };
    let editable_tag = matches!(
        element.tag_name().to_ascii_uppercase().as_str(),
        "INPUT" | "TEXTAREA" | "SELECT"
    );
    editable_tag
        || element
            .dyn_ref::<HtmlElement>()
            .is_some_and(HtmlElement::is_content_editable)
}

fn parse_axis(axis: &str) -> Result<ScrollAxis, JsValue> {
    match axis {
        "horizontal" | "x" => Ok(ScrollAxis::Horizontal),
        "vertical" | "y" => Ok(ScrollAxis::Vertical),
        other => Err(JsValue::from_str(&format!("unknown scroll axis: {other}"))),
    }
}

fn request_frame(callback: &FrameCallback) {
    if let (Some(window), Some(closure)) = (web_sys::window(), callback.borrow().as_ref()) {
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    }
}

#[wasm_bindgen]
impl GridView {
    /// Create a grid of `rows` x `cols` cells and register its event handlers.
    #[wasm_bindgen(constructor)]
    pub fn new(
        body: HtmlCanvasElement,
        col_header: HtmlCanvasElement,
        row_header: HtmlCanvasElement,
        rows: usize,
        cols: usize,
        dpr: f64,
    ) -> Result<GridView, JsValue> {
        console_error_panic_hook::set_once();

        let (width, height) = logical_size(&body);
        let mut grid = Grid::new(
            CanvasSurface::new(body.clone())?,
            CanvasSurface::new(col_header.clone())?,
            CanvasSurface::new(row_header.clone())?,
            rows,
            cols,
        );
        grid.resize(width, height, dpr);

        let state = Rc::new(RefCell::new(SharedState {
            grid,
            body: body.clone(),
            editor: InputOverlay::new(),
            frame_pending: false,
        }));

        // Auto-scroll frame loop; reschedules itself while the grid asks for it
        let frame_callback: FrameCallback = Rc::new(RefCell::new(None));
        {
            let state = state.clone();
            let frame_ref = frame_callback.clone();
            *frame_callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                let again = {
                    let mut s = state.borrow_mut();
                    let again = s.grid.auto_scroll_tick();
                    s.frame_pending = again;
                    again
                };
                if again {
                    request_frame(&frame_ref);
                }
            }) as Box<dyn FnMut()>));
        }

        let mut closures: Vec<Closure<dyn FnMut(MouseEvent)>> = Vec::new();
        let mut window_listeners: Vec<(&'static str, Closure<dyn FnMut(MouseEvent)>)> = Vec::new();

        // Presses, one listener per surface
        for (canvas, kind) in [
            (&body, SurfaceKind::Body),
            (&col_header, SurfaceKind::ColumnHeader),
            (&row_header, SurfaceKind::RowHeader),
        ] {
            let state = state.clone();
            let canvas_ref = canvas.clone();
            let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
                if event.button() != 0 {
                    return;
                }
                let (x, y) = local_point(&canvas_ref, &event);
                let mut s = state.borrow_mut();
                s.grid.pointer_down(kind, x, y);
                set_document_cursor(s.grid.cursor());
            }) as Box<dyn FnMut(MouseEvent)>);
            canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())
                .ok();
            closures.push(closure);
        }

        // Hover feedback on the headers
        for (canvas, kind) in [
            (&col_header, SurfaceKind::ColumnHeader),
            (&row_header, SurfaceKind::RowHeader),
        ] {
            let state = state.clone();
            let canvas_ref = canvas.clone();
            let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
                let (x, y) = local_point(&canvas_ref, &event);
                let Ok(mut s) = state.try_borrow_mut() else {
                    return;
                };
                if s.grid.is_dragging() {
                    return;
                }
                let cursor = s.grid.hover(kind, x, y);
                let _ = canvas_ref.style().set_property("cursor", cursor.as_css());
            }) as Box<dyn FnMut(MouseEvent)>);
            canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())
                .ok();
            closures.push(closure);
        }

        let window = web_sys::window().ok_or_else(|| GridError::Dom("no window".into()))?;

        // Drag moves, anywhere on the page
        {
            let state = state.clone();
            let frame_callback = frame_callback.clone();
            let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
                let start_frames = {
                    let mut s = state.borrow_mut();
                    if !s.grid.is_dragging() {
                        return;
                    }
                    let (x, y) = local_point(&s.body, &event);
                    let scrolling = s.grid.pointer_move(x, y);
                    let start = scrolling && !s.frame_pending;
                    if start {
                        s.frame_pending = true;
                    }
                    start
                };
                if start_frames {
                    request_frame(&frame_callback);
                }
            }) as Box<dyn FnMut(MouseEvent)>);
            window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())
                .ok();
            window_listeners.push(("mousemove", closure));
        }

        // Release, anywhere on the page
        {
            let state = state.clone();
            let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
                let mut s = state.borrow_mut();
                if !s.grid.is_dragging() {
                    return;
                }
                let (x, y) = local_point(&s.body, &event);
                s.grid.pointer_up(x, y);
                set_document_cursor(CursorStyle::Default);
            }) as Box<dyn FnMut(MouseEvent)>);
            window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())
                .ok();
            window_listeners.push(("mouseup", closure));
        }

        // Double-click opens the cell editor
        {
            let state = state.clone();
            let body_ref = body.clone();
            let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
                let (x, y) = local_point(&body_ref, &event);
                Self::open_editor(&state, x, y);
            }) as Box<dyn FnMut(MouseEvent)>);
            body.add_event_listener_with_callback("dblclick", closure.as_ref().unchecked_ref())
                .ok();
            closures.push(closure);
        }

        // Wheel scrolling over any surface; not passive so the page itself does not scroll
        let wheel_closure = {
            let state = state.clone();
            let closure = Closure::wrap(Box::new(move |event: WheelEvent| {
                event.prevent_default();
                let mut s = state.borrow_mut();
                if s.grid.wheel(event.delta_x(), event.delta_y()) {
                    Self::sync_editor(&s);
                }
            }) as Box<dyn FnMut(WheelEvent)>);
            let options = AddEventListenerOptions::new();
            options.set_passive(false);
            for canvas in [&body, &col_header, &row_header] {
                canvas
                    .add_event_listener_with_callback_and_add_event_listener_options(
                        "wheel",
                        closure.as_ref().unchecked_ref(),
                        &options,
                    )
                    .ok();
            }
            closure
        };

        // Keyboard shortcuts and navigation
        let key_closure = {
            let state = state.clone();
            let closure = Closure::wrap(Box::new(move |event: KeyboardEvent| {
                if is_editable_target(&event) {
                    return;
                }
                let input = KeyInput {
                    key: Key::from_dom(&event.key()),
                    ctrl: event.ctrl_key() || event.meta_key(),
                    shift: event.shift_key(),
                };
                let Ok(mut s) = state.try_borrow_mut() else {
                    return;
                };
                if s.grid.key_down(input) {
                    event.prevent_default();
                }
            }) as Box<dyn FnMut(KeyboardEvent)>);

            if let Some(document) = window.document() {
                document
                    .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
                    .ok();
            }
            closure
        };

        log::debug!("grid view ready: {rows} x {cols}");
        Ok(GridView {
            state,
            closures,
            window_listeners,
            wheel_closure,
            key_closure,
            frame_callback,
        })
    }

    /// Load an array of records (objects or arrays) into rows from the top.
    ///
    /// Returns the number of rows written.
    pub fn load_data(&self, records: JsValue) -> Result<usize, JsValue> {
        let json: String = js_sys::JSON::stringify(&records)?.into();
        let written = self.state.borrow_mut().grid.load_json(&json)?;
        Ok(written)
    }

    /// `{count, min, max, sum, avg}` over numeric cells in the selection.
    pub fn selection_stats(&self) -> Result<JsValue, JsValue> {
        let stats = self.state.borrow().grid.compute_selection_stats();
        serde_wasm_bindgen::to_value(&stats)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    pub fn status_text(&self) -> String {
        self.state.borrow().grid.status_text()
    }

    /// Selection as `[startRow, startCol, endRow, endCol]`, or `None` when empty.
    pub fn selection(&self) -> Option<Vec<usize>> {
        let s = self.state.borrow();
        let sel = s.grid.selection();
        if sel.is_empty() {
            return None;
        }
        Some(vec![sel.start_row, sel.start_col, sel.end_row, sel.end_col])
    }

    pub fn cell_value(&self, row: usize, col: usize) -> String {
        self.state.borrow().grid.sheet().value(row, col).to_string()
    }

    /// Set a cell through the undo history.
    pub fn set_cell_value(&self, row: usize, col: usize, value: &str) -> Result<(), JsValue> {
        self.state
            .borrow_mut()
            .grid
            .set_cell_value(row, col, value)
            .map_err(JsValue::from)
    }

    pub fn undo(&self) -> bool {
        self.state.borrow_mut().grid.undo()
    }

    pub fn redo(&self) -> bool {
        self.state.borrow_mut().grid.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.state.borrow().grid.history().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.state.borrow().grid.history().can_redo()
    }

    /// The body canvas is now `width` x `height` CSS pixels.
    pub fn resize(&self, width: f64, height: f64, dpr: f64) {
        let mut s = self.state.borrow_mut();
        s.grid.resize(width, height, dpr);
        Self::sync_editor(&s);
    }

    /// Replace the configuration with a (possibly partial) config object.
    pub fn set_config(&self, config: JsValue) -> Result<(), JsValue> {
        let config: GridConfig = serde_wasm_bindgen::from_value(config)?;
        self.state.borrow_mut().grid.set_config(config);
        Ok(())
    }

    pub fn render(&self) {
        self.state.borrow_mut().grid.render_all();
    }

    pub fn scroll_to(&self, x: f64, y: f64) {
        let mut s = self.state.borrow_mut();
        if s.grid.scroll_to(x, y) {
            Self::sync_editor(&s);
        }
    }

    pub fn scroll_x(&self) -> f64 {
        self.state.borrow().grid.viewport().scroll_x
    }

    pub fn scroll_y(&self) -> f64 {
        self.state.borrow().grid.viewport().scroll_y
    }

    /// Thumb geometry for `"horizontal"` or `"vertical"`.
    pub fn scrollbar(&self, axis: &str) -> Result<JsValue, JsValue> {
        let metrics = self.state.borrow().grid.scrollbar(parse_axis(axis)?);
        serde_wasm_bindgen::to_value(&metrics)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    pub fn begin_thumb_drag(&self, axis: &str, pointer: f64) -> Result<(), JsValue> {
        let axis = parse_axis(axis)?;
        self.state.borrow_mut().grid.begin_thumb_drag(axis, pointer);
        Ok(())
    }

    pub fn drag_thumb(&self, pointer: f64) {
        let mut s = self.state.borrow_mut();
        if s.grid.drag_thumb(pointer) {
            Self::sync_editor(&s);
        }
    }

    pub fn end_thumb_drag(&self) {
        self.state.borrow_mut().grid.end_thumb_drag();
    }

    pub fn track_click(&self, axis: &str, click: f64) -> Result<(), JsValue> {
        let axis = parse_axis(axis)?;
        let mut s = self.state.borrow_mut();
        if s.grid.track_click(axis, click) {
            Self::sync_editor(&s);
        }
        Ok(())
    }
}

impl Drop for GridView {
    fn drop(&mut self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        for (event, closure) in &self.window_listeners {
            window
                .remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
                .ok();
        }
        if let Some(document) = window.document() {
            document
                .remove_event_listener_with_callback(
                    "keydown",
                    self.key_closure.as_ref().unchecked_ref(),
                )
                .ok();
        }
    }
}

impl GridView {
    fn open_editor(state: &Rc<RefCell<SharedState>>, x: f64, y: f64) {
        let mut s = state.borrow_mut();
        let Some(overlay) = s.grid.double_click(x, y) else {
            return;
        };
        let origin = page_origin(&s.body);
        let font = s.grid.config().font.clone();

        // Blur commits whatever is in the input
        let on_blur = {
            let state = state.clone();
            Closure::wrap(Box::new(move |_event: FocusEvent| {
                let mut s = state.borrow_mut();
                if let Some(value) = s.editor.value() {
                    s.grid.commit_edit(&value);
                }
                s.editor.remove();
            }) as Box<dyn FnMut(FocusEvent)>)
        };

        // Enter forces the blur, Escape abandons the edit
        let on_key = {
            let state = state.clone();
            Closure::wrap(Box::new(move |event: KeyboardEvent| {
                event.stop_propagation();
                match event.key().as_str() {
                    "Enter" => {
                        let input = state.borrow().editor.element();
                        if let Some(input) = input {
                            let _ = input.blur();
                        }
                    }
                    "Escape" => {
                        let mut s = state.borrow_mut();
                        s.grid.cancel_edit();
                        s.editor.remove();
                    }
                    _ => {}
                }
            }) as Box<dyn FnMut(KeyboardEvent)>)
        };

        s.editor.show(&overlay, origin, &font, on_blur, on_key);
    }

    /// Keep an open editor glued to its cell.
    fn sync_editor(s: &SharedState) {
        if let Some(overlay) = s.grid.editor_overlay() {
            s.editor.reposition(overlay.rect, page_origin(&s.body));
        }
    }
}

/// `log` backend writing to the browser console.
struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&line),
            log::Level::Warn => web_sys::console::warn_1(&line),
            log::Level::Info => web_sys::console::info_1(&line),
            log::Level::Debug => web_sys::console::log_1(&line),
            log::Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

static CONSOLE_LOGGER: ConsoleLogger = ConsoleLogger;

/// Route `log` output to the console at `level` ("error" .. "trace").
///
/// Unknown levels fall back to "info". Calling this again only changes the level.
#[wasm_bindgen]
pub fn init_logging(level: &str) {
    let filter = log::LevelFilter::from_str(level).unwrap_or(log::LevelFilter::Info);
    let _ = log::set_logger(&CONSOLE_LOGGER);
    log::set_max_level(filter);
}
