use std::cell::RefCell;
use std::rc::Rc;

use super::{BindError, ButtonHost, RippleConfig};

/// Visual phase of a single bound button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RipplePhase {
    Idle,
    Clicked,
}

/// Per-button state shared between the click handler and its clear timer.
///
/// Holds at most one pending timer; a re-click cancels it and schedules a
/// fresh one, so the flag always clears a full duration after the last click.
struct RippleState<T> {
    phase: RipplePhase,
    pending: Option<T>,
}

impl<T> RippleState<T> {
    fn new() -> Self {
        Self {
            phase: RipplePhase::Idle,
            pending: None,
        }
    }
}

/// A button the binder attached its click reaction to.
pub struct BoundButton<H: ButtonHost> {
    state: Rc<RefCell<RippleState<H::Timer>>>,
}

impl<H: ButtonHost> BoundButton<H> {
    pub fn phase(&self) -> RipplePhase {
        self.state.borrow().phase
    }

    pub fn has_pending_clear(&self) -> bool {
        self.state.borrow().pending.is_some()
    }
}

/// Binds the transient "clicked" effect to every matching button, once.
///
/// Binding is a snapshot: buttons inserted after [`RippleBinder::initialize`]
/// are left alone.
pub struct RippleBinder<H: ButtonHost> {
    host: H,
    config: RippleConfig,
    bound: Option<Vec<BoundButton<H>>>,
}

impl<H: ButtonHost> RippleBinder<H> {
    pub fn new(host: H, config: RippleConfig) -> Self {
        Self {
            host,
            config,
            bound: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.bound.is_some()
    }

    /// Buttons bound by `initialize`, in document order. Empty before it runs.
    pub fn bound(&self) -> &[BoundButton<H>] {
        self.bound.as_deref().unwrap_or(&[])
    }

    /// Attach the click reaction to every button currently in the document.
    ///
    /// Returns the number of buttons bound; zero matches is not an error.
    /// A second call binds nothing and returns `AlreadyInitialized`.
    pub fn initialize(&mut self) -> Result<usize, BindError> {
        if self.bound.is_some() {
            return Err(BindError::AlreadyInitialized);
        }

        let buttons = self.host.query_buttons(self.config.selector)?;
        let bound: Vec<BoundButton<H>> = buttons
            .into_iter()
            .map(|button| {
                let state = Rc::new(RefCell::new(RippleState::new()));
                let handler = {
                    let host = self.host.clone();
                    let config = self.config.clone();
                    let button = button.clone();
                    let state = Rc::clone(&state);
                    Rc::new(move || react_to_click(&host, &config, &button, &state))
                        as Rc<dyn Fn()>
                };
                self.host.on_click(&button, handler);
                BoundButton { state }
            })
            .collect();

        let count = bound.len();
        self.bound = Some(bound);
        Ok(count)
    }
}

/// Idle/Clicked -> Clicked: set the flag now, (re)arm the clear timer.
fn react_to_click<H: ButtonHost>(
    host: &H,
    config: &RippleConfig,
    button: &H::Button,
    state: &Rc<RefCell<RippleState<H::Timer>>>,
) {
    host.add_class(button, config.clicked_class);

    // No borrow of `state` may be held across host calls.
    let previous = {
        let mut state = state.borrow_mut();
        state.phase = RipplePhase::Clicked;
        state.pending.take()
    };
    if let Some(timer) = previous {
        host.cancel(timer);
    }

    let clear = {
        let host = host.clone();
        let button = button.clone();
        let class = config.clicked_class;
        let state = Rc::clone(state);
        Box::new(move || {
            host.remove_class(&button, class);
            let mut state = state.borrow_mut();
            state.phase = RipplePhase::Idle;
            state.pending = None;
        }) as Box<dyn FnOnce()>
    };

    let timer = host.schedule(config.duration, clear);
    state.borrow_mut().pending = timer;
}
