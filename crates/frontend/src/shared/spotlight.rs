//! Pointer-tracking highlight for `.glass-card` elements.
//!
//! The stylesheet draws the highlight from the `--mouse-x` / `--mouse-y`
//! custom properties; this module only keeps them up to date.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, MouseEvent};

const CARD_SELECTOR: &str = ".glass-card";
const MARKER_ATTR: &str = "data-spotlight";

/// Pointer position inside a box whose top-left corner is at `(left, top)`.
pub fn relative_position(left: f64, top: f64, client_x: f64, client_y: f64) -> (f64, f64) {
    (client_x - left, client_y - top)
}

/// Starts tracking the pointer over `card`. `None` is ignored.
///
/// The listener lives as long as the card; replacing the card's markup
/// drops it together with the element.
pub fn attach_spotlight(card: Option<&HtmlElement>) {
    let Some(card) = card else {
        return;
    };
    if card.has_attribute(MARKER_ATTR) {
        return;
    }

    let on_move = Closure::wrap(Box::new(move |ev: MouseEvent| {
        let Some(target) = ev
            .current_target()
            .and_then(|t| t.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        let rect = target.get_bounding_client_rect();
        let (x, y) = relative_position(
            rect.left(),
            rect.top(),
            f64::from(ev.client_x()),
            f64::from(ev.client_y()),
        );
        let style = target.style();
        let _ = style.set_property("--mouse-x", &format!("{}px", x));
        let _ = style.set_property("--mouse-y", &format!("{}px", y));
    }) as Box<dyn FnMut(MouseEvent)>);

    if card
        .add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())
        .is_ok()
    {
        let _ = card.set_attribute(MARKER_ATTR, "");
    }
    on_move.forget();
}

/// Attaches the effect to every card already in `document`.
pub fn attach_to_existing(document: &Document) {
    let Ok(cards) = document.query_selector_all(CARD_SELECTOR) else {
        return;
    };
    for i in 0..cards.length() {
        let card = cards.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok());
        attach_spotlight(card.as_ref());
    }
}
