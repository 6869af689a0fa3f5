mod binder;
mod config;
mod dom;
mod host;
#[cfg(test)]
mod test_host;

pub use binder::{BoundButton, RippleBinder, RipplePhase};
pub use config::{RippleConfig, BUTTON_SELECTOR, CLICKED_CLASS, RIPPLE_DURATION_MS};
pub use dom::{on_content_ready, start, DomHost};
pub use host::{BindError, ButtonHost};
