//! Particula Tools - editing tools for the particle sandbox, in WASM
//!
//! Stack/unstack brush, directional config tool and its overlay.
//!
//! Architecture:
//! - core/        - Geometry (cells, directions, projection)
//! - domain/      - Elements, content registry, brushes, config, errors
//! - spatial/     - Particle store, occupancy layers, world trait, stack sampling
//! - systems/     - The tools
//! - simulation/  - In-memory sandbox and the JS facade

pub mod core;
pub mod domain;
pub mod spatial;
pub mod systems;
pub mod simulation;

// Compatibility re-exports (short paths used across the crate)
pub use domain::{brush, content, elements, error, filter_modes};
pub use spatial::{occupancy, particles, sample, world};

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the tools module
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&"Particula tools initialized".into());
}

/// Get crate version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::{Direction, Point};
pub use domain::config::{BrushConfig, EditorConfig};
pub use domain::error::EditorError;
pub use simulation::{Editor, Sandbox};
pub use systems::config::{ClickOutcome, ConfigState, ConfigTool};
pub use systems::release::{ReleaseOutcome, ReleaseTool};
pub use systems::stack::{StackOutcome, StackTool};
pub use systems::BrushTool;

// Export configurable element IDs for JS
#[wasm_bindgen]
pub fn el_dray() -> u8 { domain::elements::EL_DRAY }
#[wasm_bindgen]
pub fn el_cray() -> u8 { domain::elements::EL_CRAY }
#[wasm_bindgen]
pub fn el_ldtc() -> u8 { domain::elements::EL_LDTC }
#[wasm_bindgen]
pub fn el_dtec() -> u8 { domain::elements::EL_DTEC }
#[wasm_bindgen]
pub fn el_tsns() -> u8 { domain::elements::EL_TSNS }
#[wasm_bindgen]
pub fn el_lsns() -> u8 { domain::elements::EL_LSNS }
#[wasm_bindgen]
pub fn el_conv() -> u8 { domain::elements::EL_CONV }
#[wasm_bindgen]
pub fn el_filt() -> u8 { domain::elements::EL_FILT }
