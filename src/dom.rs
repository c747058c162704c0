//! Direct DOM interop that falls outside Yew's declarative rendering:
//! smooth scrolling, printing, the one-shot stylesheet injection, the
//! server-templated results payload, and the viewport intersection observer.
//!
//! Every helper treats missing DOM state as "feature off": absent elements
//! are skipped silently, never reported to the user.

use crate::config::{PRESET_STYLE_ID, RESULTS_DATA_ID, RESULTS_SECTION_ID};
use crop_advisor::{defaults, ResultsPayload};
use gloo_utils::{document, window};
use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

/// Scoped styling for the injected preset toolbar.
const PRESET_CSS: &str = r#"
.preset-btn {
    padding: 0.5rem 1rem;
    background: var(--background-light);
    border: 2px solid var(--border-color);
    border-radius: 8px;
    cursor: pointer;
    font-size: 0.85rem;
    transition: all 0.2s ease;
    color: var(--text-dark);
}
.preset-btn:hover {
    background: var(--primary-green);
    color: white;
    border-color: var(--primary-green);
    transform: translateY(-2px);
}
.preset-btn.applied {
    background: var(--primary-green);
    color: white;
}
.number-input.pulse {
    transform: scale(1.1);
    transition: transform 0.2s ease;
}
"#;

/// Insert the preset toolbar stylesheet into `<head>` exactly once.
/// Repeat calls find the id and return early.
pub fn ensure_preset_styles() {
    let doc = document();
    if doc.get_element_by_id(PRESET_STYLE_ID).is_some() {
        return;
    }
    let style = match doc.create_element("style") {
        Ok(el) => el,
        Err(_) => return,
    };
    style.set_id(PRESET_STYLE_ID);
    style.set_text_content(Some(PRESET_CSS));
    if let Some(head) = doc.head() {
        let _ = head.append_child(&style);
    }
}

/// Parse the JSON block the server templates into a post-submission render.
/// `None` when the page has no results; parse failures are logged and
/// swallowed so the form still works.
pub fn read_results_payload() -> Option<ResultsPayload> {
    let text = document().get_element_by_id(RESULTS_DATA_ID)?.text_content()?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str(trimmed) {
        Ok(payload) => Some(payload),
        Err(err) => {
            warn!("results payload did not parse: {err}");
            None
        }
    }
}

/// Smooth-scroll the results region into view, if it exists.
pub fn scroll_to_results() {
    if let Some(section) = document().get_element_by_id(RESULTS_SECTION_ID) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        section.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

/// Open the browser's print dialog for the current page.
pub fn print_page() {
    let _ = window().print();
}

/// Attribute carrying a card's reveal index for the observer.
pub const REVEAL_IDX_ATTR: &str = "data-reveal-idx";

/// Viewport watcher behind the scroll-reveal behavior: 10% visibility
/// threshold, triggering 50px before full entry. Observed elements carry
/// their reveal index in [`REVEAL_IDX_ATTR`]; the callback reports it once
/// per intersection (deduplication happens in `RevealState`).
pub struct RevealObserver {
    observer: IntersectionObserver,
    // Keeps the JS-side callback alive for the observer's lifetime.
    _callback: Closure<dyn FnMut(js_sys::Array)>,
}

impl RevealObserver {
    pub fn new(on_visible: impl Fn(usize) + 'static) -> Option<Self> {
        let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if !entry.is_intersecting() {
                    continue;
                }
                if let Some(idx) = reveal_index(&entry.target()) {
                    on_visible(idx);
                }
            }
        });

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(defaults::REVEAL_THRESHOLD));
        init.set_root_margin(&format!("0px 0px -{}px 0px", defaults::REVEAL_MARGIN_PX));

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
                .ok()?;
        Some(RevealObserver {
            observer,
            _callback: callback,
        })
    }

    pub fn observe(&self, element: &Element) {
        self.observer.observe(element);
    }

    /// Observe every element currently carrying a reveal index.
    pub fn observe_all(&self) {
        let selector = format!("[{REVEAL_IDX_ATTR}]");
        let Ok(list) = document().query_selector_all(&selector) else {
            return;
        };
        for i in 0..list.length() {
            if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                self.observe(&el);
            }
        }
    }
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn reveal_index(element: &Element) -> Option<usize> {
    element.get_attribute(REVEAL_IDX_ATTR)?.parse().ok()
}
