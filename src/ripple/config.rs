use std::time::Duration;

/// Elements carrying this class get the click effect.
pub const BUTTON_SELECTOR: &str = ".btn";
/// Class the page stylesheet renders as the pressed look.
pub const CLICKED_CLASS: &str = "clicked";
/// How long the clicked class stays on a button after the last click.
pub const RIPPLE_DURATION_MS: u64 = 160;

/// Source-level settings for the ripple binder.
///
/// There is no runtime loading: the defaults are what the page gets, and the
/// struct exists so a binder can be built explicitly (tests, embedders).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RippleConfig {
    pub selector: &'static str,
    pub clicked_class: &'static str,
    pub duration: Duration,
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            selector: BUTTON_SELECTOR,
            clicked_class: CLICKED_CLASS,
            duration: Duration::from_millis(RIPPLE_DURATION_MS),
        }
    }
}
