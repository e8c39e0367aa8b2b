//! Heart Card core crate.
//!
//! Two independent page behaviors mounted once the document is ready: a
//! button that cycles celebratory messages with a fade, and a stream of
//! falling hearts that remove themselves after a fixed lifetime. The
//! stylesheet owns the actual transitions; this crate drives their timing.
//!
//! `cargo test` runs the native suites on a virtual clock. The DOM tests in
//! `tests/web.rs` need a browser: `wasm-pack test --headless --firefox`.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod cycler;
pub mod dom;
pub mod error;
pub mod hearts;
pub mod logging;
pub mod random;
pub mod schedule;
pub mod surface;

pub use config::{CardConfig, HeartSettings, MESSAGES};
pub use cycler::{MessageCycler, MessageList};
pub use error::{CardError, Result};
pub use hearts::{Heart, HeartSpawner};
pub use random::{EntropySource, RandomSource, SequenceSource};
pub use schedule::{BrowserScheduler, Scheduler, VirtualScheduler};
pub use surface::{HeartLayer, MemoryLayer, MemoryRegion, MessageRegion, RegionWrite};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// JS entrypoints
// -----------------------------------------------------------------------------

/// Mount the card with the built-in messages and timings.
#[wasm_bindgen]
pub fn start_card() -> std::result::Result<(), JsValue> {
    boot(CardConfig::default())
}

/// Mount the card with a JSON configuration; omitted fields keep defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_card_with_config(json: &str) -> std::result::Result<(), JsValue> {
    boot(CardConfig::from_json(json)?)
}

#[wasm_bindgen]
pub fn default_messages() -> Vec<String> {
    MESSAGES.iter().map(|m| m.to_string()).collect()
}

fn boot(config: CardConfig) -> std::result::Result<(), JsValue> {
    logging::init(config.level()?);
    dom::when_ready(config)?;
    Ok(())
}
