#![cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

mod constants;
mod diagram;
mod dom;
mod events;
mod input;
mod present;

pub use diagram::MarbleDiagram;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("marbles-web starting");
    Ok(())
}
