//! Small lookup and wiring helpers over `web_sys`. Absent elements are
//! expected per-page variation, so everything here is `Option`-shaped.

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, Element, Event, EventTarget, HtmlElement};

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

pub fn root() -> Option<Element> {
    document()?.document_element()
}

pub fn body() -> Option<HtmlElement> {
    document()?.body()
}

pub fn by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

pub fn html_by_id(id: &str) -> Option<HtmlElement> {
    by_id(id)?.dyn_into().ok()
}

pub fn query_all(selector: &str) -> Vec<Element> {
    let Some(document) = document() else {
        return Vec::new();
    };
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };

    let mut elements = Vec::with_capacity(list.length() as usize);
    for index in 0..list.length() {
        if let Some(node) = list.item(index) {
            if let Ok(element) = node.dyn_into::<Element>() {
                elements.push(element);
            }
        }
    }
    elements
}

/// Attaches a listener that lives for the rest of the page's lifetime.
pub fn listen<T>(target: &T, kind: &str, handler: impl FnMut(Event) + 'static)
where
    T: AsRef<EventTarget>,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    let _ = target
        .as_ref()
        .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
    closure.forget();
}
