//! Browser tests for the exported `GridView`. Run with `wasm-pack test --headless --chrome`.

#![cfg(target_arch = "wasm32")]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

use gridcanvas::GridView;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{
    HtmlCanvasElement, HtmlInputElement, KeyboardEvent, KeyboardEventInit, WheelEvent,
    WheelEventInit,
};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn key_down(key: &str) -> KeyboardEvent {
    let init = KeyboardEventInit::new();
    init.set_key(key);
    init.set_bubbles(true);
    init.set_cancelable(true);
    KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap()
}

fn canvas(width: u32, height: u32) -> HtmlCanvasElement {
    let document = document();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    canvas.set_width(width);
    canvas.set_height(height);
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

fn view(rows: usize, cols: usize) -> GridView {
    view_with_canvases(rows, cols).0
}

fn view_with_canvases(rows: usize, cols: usize) -> (GridView, [HtmlCanvasElement; 3]) {
    let canvases = [canvas(400, 240), canvas(400, 24), canvas(50, 240)];
    let [body, col_header, row_header] = canvases.clone();
    let view = GridView::new(body, col_header, row_header, rows, cols, 1.0).unwrap();
    (view, canvases)
}

#[wasm_bindgen_test]
fn loads_records_and_reports_stats() {
    let view = view(100, 10);
    let records = js_sys::JSON::parse(r#"[{"a": 10, "b": "x"}, {"a": 20, "b": "y"}]"#).unwrap();
    assert_eq!(view.load_data(records).unwrap(), 2);
    assert_eq!(view.cell_value(1, 0), "20");
    assert_eq!(view.cell_value(1, 1), "y");
    assert!(view.status_text().starts_with("Count: 0"));
}

#[wasm_bindgen_test]
fn edits_undo_and_redo() {
    let view = view(10, 10);
    assert!(!view.can_undo());
    view.set_cell_value(2, 3, "hello").unwrap();
    assert!(view.can_undo());
    assert!(view.undo());
    assert_eq!(view.cell_value(2, 3), "");
    assert!(view.redo());
    assert_eq!(view.cell_value(2, 3), "hello");
    assert!(view.set_cell_value(20, 0, "x").is_err());
}

#[wasm_bindgen_test]
fn scrolling_is_clamped() {
    let view = view(100, 30);
    view.scroll_to(100_000.0, 100.0);
    assert_eq!(view.scroll_x(), 2600.0);
    assert_eq!(view.scroll_y(), 100.0);
    assert!(view.track_click("diagonal", 0.0).is_err());
}

#[wasm_bindgen_test]
fn wheel_over_headers_scrolls_the_body() {
    let (view, [_, col_header, row_header]) = view_with_canvases(100, 30);
    let init = WheelEventInit::new();
    init.set_delta_y(120.0);
    init.set_cancelable(true);
    let wheel = WheelEvent::new_with_wheel_event_init_dict("wheel", &init).unwrap();
    col_header.dispatch_event(&wheel).unwrap();
    assert_eq!(view.scroll_y(), 120.0);

    let init = WheelEventInit::new();
    init.set_delta_x(50.0);
    let wheel = WheelEvent::new_with_wheel_event_init_dict("wheel", &init).unwrap();
    row_header.dispatch_event(&wheel).unwrap();
    assert_eq!(view.scroll_x(), 50.0);
}

#[wasm_bindgen_test]
fn keys_typed_into_other_inputs_are_left_alone() {
    let view = view(10, 10);
    let document = document();
    let input = document
        .create_element("input")
        .unwrap()
        .dyn_into::<HtmlInputElement>()
        .unwrap();
    document.body().unwrap().append_child(&input).unwrap();

    let event = key_down("ArrowDown");
    input.dispatch_event(&event).unwrap();
    assert!(!event.default_prevented());
    assert_eq!(view.selection(), None);

    let event = key_down("ArrowDown");
    document.body().unwrap().dispatch_event(&event).unwrap();
    assert!(event.default_prevented());
    assert_eq!(view.selection(), Some(vec![0, 0, 0, 0]));
    input.remove();
}
