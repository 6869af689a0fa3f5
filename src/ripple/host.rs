use std::rc::Rc;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("ripple buttons are already bound")]
    AlreadyInitialized,
    #[error("no document to bind against (not running in a browser?)")]
    DocumentUnavailable,
    #[error("invalid button selector `{0}`")]
    Selector(String),
}

/// The page, as far as the ripple binder is concerned.
///
/// Implementations are cheap handles: the binder clones the host into every
/// click handler and timer it creates.
pub trait ButtonHost: Clone + 'static {
    type Button: Clone + 'static;
    type Timer: 'static;

    /// Snapshot of the elements matching `selector`, in document order.
    fn query_buttons(&self, selector: &str) -> Result<Vec<Self::Button>, BindError>;

    /// Attach a click listener for the lifetime of the page.
    fn on_click(&self, button: &Self::Button, handler: Rc<dyn Fn()>);

    fn add_class(&self, button: &Self::Button, class: &str);

    fn remove_class(&self, button: &Self::Button, class: &str);

    /// Run `action` once after `delay`. `None` if the timer could not be set.
    fn schedule(&self, delay: Duration, action: Box<dyn FnOnce()>) -> Option<Self::Timer>;

    /// Cancel a timer that has not fired yet.
    fn cancel(&self, timer: Self::Timer);
}
