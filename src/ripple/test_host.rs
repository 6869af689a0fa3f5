//! In-memory page with a virtual millisecond clock, for driving the binder
//! without a browser.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;
use std::time::Duration;

use super::{BindError, ButtonHost};

pub type ElementId = usize;

/// Timers are keyed by (due time, scheduling order) so equal deadlines fire FIFO.
pub type TimerKey = (u64, u64);

#[derive(Default)]
struct FakeElement {
    classes: BTreeSet<String>,
    attached: bool,
    listeners: Vec<Rc<dyn Fn()>>,
}

#[derive(Default)]
struct PageInner {
    elements: Vec<FakeElement>,
    now_ms: u64,
    next_seq: u64,
    timers: BTreeMap<TimerKey, Box<dyn FnOnce()>>,
    fail_timers: bool,
}

#[derive(Clone, Default)]
pub struct FakePage {
    inner: Rc<RefCell<PageInner>>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_element(&self, classes: &[&str]) -> ElementId {
        let mut inner = self.inner.borrow_mut();
        inner.elements.push(FakeElement {
            classes: classes.iter().map(|c| c.to_string()).collect(),
            attached: true,
            listeners: Vec::new(),
        });
        inner.elements.len() - 1
    }

    pub fn add_buttons(&self, count: usize) -> Vec<ElementId> {
        (0..count).map(|_| self.add_element(&["btn"])).collect()
    }

    pub fn detach(&self, id: ElementId) {
        self.inner.borrow_mut().elements[id].attached = false;
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.inner.borrow().elements[id].classes.contains(class)
    }

    pub fn is_clicked(&self, id: ElementId) -> bool {
        self.has_class(id, "clicked")
    }

    pub fn listener_count(&self, id: ElementId) -> usize {
        self.inner.borrow().elements[id].listeners.len()
    }

    pub fn total_listeners(&self) -> usize {
        self.inner
            .borrow()
            .elements
            .iter()
            .map(|e| e.listeners.len())
            .sum()
    }

    pub fn pending_timers(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    pub fn now_ms(&self) -> u64 {
        self.inner.borrow().now_ms
    }

    pub fn fail_timers(&self, fail: bool) {
        self.inner.borrow_mut().fail_timers = fail;
    }

    /// Dispatch a click to every listener on the element.
    pub fn click(&self, id: ElementId) {
        let listeners = self.inner.borrow().elements[id].listeners.clone();
        for listener in listeners {
            listener();
        }
    }

    /// Move the clock forward, firing due timers in order.
    pub fn advance(&self, ms: u64) {
        let target = self.now_ms() + ms;
        loop {
            let due = {
                let mut inner = self.inner.borrow_mut();
                match inner.timers.first_key_value() {
                    Some((&key, _)) if key.0 <= target => {
                        inner.now_ms = key.0;
                        inner.timers.remove(&key)
                    }
                    _ => None,
                }
            };
            match due {
                Some(action) => action(),
                None => break,
            }
        }
        self.inner.borrow_mut().now_ms = target;
    }
}

impl ButtonHost for FakePage {
    type Button = ElementId;
    type Timer = TimerKey;

    fn query_buttons(&self, selector: &str) -> Result<Vec<ElementId>, BindError> {
        let class = selector
            .strip_prefix('.')
            .filter(|c| !c.is_empty())
            .ok_or_else(|| BindError::Selector(selector.to_string()))?;
        Ok(self
            .inner
            .borrow()
            .elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.attached && e.classes.contains(class))
            .map(|(id, _)| id)
            .collect())
    }

    fn on_click(&self, button: &ElementId, handler: Rc<dyn Fn()>) {
        self.inner.borrow_mut().elements[*button].listeners.push(handler);
    }

    fn add_class(&self, button: &ElementId, class: &str) {
        self.inner.borrow_mut().elements[*button]
            .classes
            .insert(class.to_string());
    }

    fn remove_class(&self, button: &ElementId, class: &str) {
        // Detached elements keep their class list, as in the DOM
        self.inner.borrow_mut().elements[*button]
            .classes
            .remove(class);
    }

    fn schedule(&self, delay: Duration, action: Box<dyn FnOnce()>) -> Option<TimerKey> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_timers {
            return None;
        }
        let key = (inner.now_ms + delay.as_millis() as u64, inner.next_seq);
        inner.next_seq += 1;
        inner.timers.insert(key, action);
        Some(key)
    }

    fn cancel(&self, timer: TimerKey) {
        self.inner.borrow_mut().timers.remove(&timer);
    }
}
