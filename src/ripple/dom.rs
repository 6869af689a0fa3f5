use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use leptos::leptos_dom::helpers::TimeoutHandle;
use leptos::set_timeout_with_handle;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use super::{BindError, ButtonHost, RippleBinder, RippleConfig};

thread_local! {
    static STARTED: Cell<bool> = const { Cell::new(false) };
}

/// Log a warning message to the browser console.
fn log_warning(msg: &str) {
    web_sys::console::warn_1(&msg.into());
}

fn log_debug(msg: &str) {
    web_sys::console::debug_1(&msg.into());
}

fn document() -> Option<web_sys::Document> {
    web_sys::window()?.document()
}

/// The live page, driven through `web-sys`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomHost;

impl ButtonHost for DomHost {
    type Button = Element;
    type Timer = TimeoutHandle;

    fn query_buttons(&self, selector: &str) -> Result<Vec<Element>, BindError> {
        let document = document().ok_or(BindError::DocumentUnavailable)?;
        let nodes = document
            .query_selector_all(selector)
            .map_err(|_| BindError::Selector(selector.to_string()))?;
        Ok((0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }

    fn on_click(&self, button: &Element, handler: Rc<dyn Fn()>) {
        let closure = Closure::wrap(Box::new(move |_: web_sys::Event| {
            handler();
        }) as Box<dyn Fn(web_sys::Event)>);

        let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget(); // Listener lives as long as the page
    }

    fn add_class(&self, button: &Element, class: &str) {
        let _ = button.class_list().add_1(class);
    }

    // A detached element still has a class list, so a late clear is a silent no-op
    // as far as the page is concerned.
    fn remove_class(&self, button: &Element, class: &str) {
        let _ = button.class_list().remove_1(class);
    }

    fn schedule(&self, delay: Duration, action: Box<dyn FnOnce()>) -> Option<TimeoutHandle> {
        match set_timeout_with_handle(action, delay) {
            Ok(handle) => Some(handle),
            Err(_) => {
                log_warning("btn-ripple: could not schedule clear timer");
                None
            }
        }
    }

    fn cancel(&self, timer: TimeoutHandle) {
        timer.clear();
    }
}

/// `document.readyState` values past `"loading"` mean `DOMContentLoaded` has fired.
fn is_content_ready(ready_state: &str) -> bool {
    ready_state != "loading"
}

/// Flip the once-per-page start guard. `true` only for the first caller.
fn claim_start() -> bool {
    !STARTED.with(|started| started.replace(true))
}

/// Run `f` once the document structure is ready for scripting.
///
/// Registers for `DOMContentLoaded` while the document is still loading;
/// otherwise the event is already past and `f` runs right away.
pub fn on_content_ready(f: impl FnOnce() + 'static) -> Result<(), BindError> {
    let document = document().ok_or(BindError::DocumentUnavailable)?;

    if is_content_ready(&document.ready_state()) {
        f();
        return Ok(());
    }

    let closure = Closure::once(Box::new(f) as Box<dyn FnOnce()>);
    let _ = document
        .add_event_listener_with_callback("DOMContentLoaded", closure.as_ref().unchecked_ref());
    closure.forget();
    Ok(())
}

/// Bind the ripple effect to the page's buttons on content-ready.
///
/// Only the first call does anything.
pub fn start() {
    if !claim_start() {
        log_warning("btn-ripple: start() called more than once, ignoring");
        return;
    }

    let registered = on_content_ready(|| {
        let mut binder = RippleBinder::new(DomHost, RippleConfig::default());
        match binder.initialize() {
            Ok(count) => log_debug(&format!("btn-ripple: bound {} button(s)", count)),
            Err(e) => log_warning(&format!("btn-ripple: {}", e)),
        }
    });

    if let Err(e) = registered {
        log_warning(&format!("btn-ripple: {}", e));
    }
}
