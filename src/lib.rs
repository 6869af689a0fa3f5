pub mod ripple;

use wasm_bindgen::prelude::*;

/// Hook the button ripple into the page once its content is ready
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    ripple::start();
}
