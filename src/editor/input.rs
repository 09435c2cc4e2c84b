//! DOM input overlay for cell editing.
//!
//! Creates an `<input>` element over the editing cell. The host supplies the
//! blur and keydown handlers; blur commits, Enter forces a blur and Escape
//! cancels. The element is removed from the document when the edit closes.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, FocusEvent, HtmlElement, HtmlInputElement, KeyboardEvent};

use super::EditorOverlay;
use crate::layout::Rect;

/// Input overlay for cell editing.
pub(crate) struct InputOverlay {
    input: Option<HtmlInputElement>,
    // Listeners stay alive until the next `show`: a handler may be the one
    // closing the overlay.
    on_blur: Option<Closure<dyn FnMut(FocusEvent)>>,
    on_key: Option<Closure<dyn FnMut(KeyboardEvent)>>,
}

impl InputOverlay {
    pub(crate) fn new() -> Self {
        InputOverlay {
            input: None,
            on_blur: None,
            on_key: None,
        }
    }

    /// Show the input over `overlay.rect` shifted by `origin`, the page
    /// position of the body surface's top-left corner.
    pub(crate) fn show(
        &mut self,
        overlay: &EditorOverlay,
        origin: (f64, f64),
        font: &str,
        on_blur: Closure<dyn FnMut(FocusEvent)>,
        on_key: Closure<dyn FnMut(KeyboardEvent)>,
    ) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        self.remove();

        let Some(input) = create_input(&document, font) else {
            return;
        };
        input
            .add_event_listener_with_callback("blur", on_blur.as_ref().unchecked_ref())
            .ok();
        input
            .add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref())
            .ok();
        let _ = input
            .style()
            .set_property("text-align", overlay.align.as_css());
        place(&input, overlay.rect, origin);
        input.set_value(&overlay.value);

        if let Some(body) = document.body() {
            let _ = body.append_child(&input);
        }

        // Focus and select all text
        let _ = input.focus();
        input.select();

        self.input = Some(input);
        self.on_blur = Some(on_blur);
        self.on_key = Some(on_key);
    }

    /// Follow the cell after a scroll or resize.
    pub(crate) fn reposition(&self, rect: Rect, origin: (f64, f64)) {
        if let Some(input) = &self.input {
            place(input, rect, origin);
        }
    }

    /// Get current input value.
    pub(crate) fn value(&self) -> Option<String> {
        self.input.as_ref().map(HtmlInputElement::value)
    }

    /// The live element, for callers that must blur it outside a borrow.
    pub(crate) fn element(&self) -> Option<HtmlInputElement> {
        self.input.clone()
    }

    /// Detach the blur handler and take the element out of the document.
    pub(crate) fn remove(&mut self) {
        let Some(input) = self.input.take() else {
            return;
        };
        if let Some(on_blur) = &self.on_blur {
            input
                .remove_event_listener_with_callback("blur", on_blur.as_ref().unchecked_ref())
                .ok();
        }
        if let Some(parent) = input.parent_node() {
            let _ = parent.remove_child(&input);
        }
    }
}

fn create_input(document: &Document, font: &str) -> Option<HtmlInputElement> {
    let input = document
        .create_element("input")
        .ok()?
        .dyn_into::<HtmlInputElement>()
        .ok()?;
    input.set_type("text");
    let style = input.style();
    let _ = style.set_property("position", "absolute");
    let _ = style.set_property("z-index", "1000");
    let _ = style.set_property("box-sizing", "border-box");
    let _ = style.set_property("border", "none");
    let _ = style.set_property("outline", "none");
    let _ = style.set_property("padding", "0 4px");
    let _ = style.set_property("font", font);
    let _ = style.set_property("background", "transparent");
    Some(input)
}

fn place(input: &HtmlElement, rect: Rect, (left, top): (f64, f64)) {
    let style = input.style();
    let _ = style.set_property("left", &format!("{}px", left + rect.x));
    let _ = style.set_property("top", &format!("{}px", top + rect.y));
    let _ = style.set_property("width", &format!("{}px", rect.width));
    let _ = style.set_property("height", &format!("{}px", rect.height));
}

impl Drop for InputOverlay {
    fn drop(&mut self) {
        self.remove();
    }
}
