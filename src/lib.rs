//! Snake on a `<canvas>`, compiled to WebAssembly.
//!
//! The game itself (`session` and the modules beneath it) is plain Rust and
//! knows nothing about the browser; `web` binds it to the page.

pub mod clock;
pub mod config;
pub mod error;
pub mod food;
pub mod grid;
pub mod input;
pub mod render;
pub mod score;
pub mod session;
pub mod snake;

#[cfg(target_arch = "wasm32")]
mod logger;
#[cfg(target_arch = "wasm32")]
mod web;

pub use config::GameConfig;
pub use error::{ConfigError, GameError};
pub use session::{Controls, GameState, Session};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
  web::run().map_err(JsValue::from)
}
