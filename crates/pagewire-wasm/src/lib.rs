//! # pagewire-wasm
//!
//! WebAssembly bindings for pagewire - documentation page interactivity in
//! the browser.
//!
//! Load the module on a documentation page and it wires up smooth anchor
//! scrolling, scroll-spy navigation highlighting, the sidebar active state,
//! the mobile navigation toggle and copy buttons on code blocks.
//!
//! ## Usage
//!
//! With the default `autostart` feature nothing beyond loading the module is
//! needed:
//!
//! ```javascript
//! import init from './pkg/pagewire_wasm.js';
//!
//! await init();
//! ```
//!
//! Built with `--no-default-features --features console_error_panic_hook`,
//! the page mounts explicitly and can pass a config:
//!
//! ```javascript
//! import init, { mount } from './pkg/pagewire_wasm.js';
//!
//! await init();
//! const summary = await mount({ scroll: { headerOffset: 90 } });
//! console.log(summary.codeBlocks);
//! ```

mod error;
pub mod logger;
mod surface;

pub use error::WasmError;
pub use surface::WebSurface;

use pagewire::{MountSummary, PageConfig, PageController, PageError};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

thread_local! {
    static MOUNTED: Cell<bool> = const { Cell::new(false) };
}

/// Set up panic reporting and logging, then mount if `autostart` is enabled.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    logger::init_logger(cfg!(debug_assertions));

    #[cfg(feature = "autostart")]
    wasm_bindgen_futures::spawn_local(async {
        if let Err(err) = mount_page(PageConfig::default()).await {
            tracing::error!(error = %err, "automatic mount failed");
        }
    });
}

/// Mount page interactivity on the current document.
///
/// Waits for `DOMContentLoaded` if the document is still loading. `config`
/// is an optional camelCase object mirroring `PageConfig`; omitted fields
/// keep their defaults.
///
/// Resolves to the mount summary (`{ anchorLinks, sections, navLinks,
/// sidebarLinks, mobileToggleCreated, codeBlocks }`). Rejects with a
/// structured error object:
///
/// ```javascript
/// try {
///   await mount({ scroll: { mobileBreakpoint: 0 } });
/// } catch (err) {
///   if (err.kind === 'configError') console.error(err.field, err.details);
///   if (err.kind === 'alreadyMounted') { /* autostart got there first */ }
/// }
/// ```
#[wasm_bindgen]
pub async fn mount(config: JsValue) -> Result<JsValue, JsValue> {
    let config = parse_config(config)?;
    let summary = mount_page(config).await.map_err(WasmError::from)?;

    serde_wasm_bindgen::to_value(&summary).map_err(|err| {
        WasmError::serialization_with_details("Failed to serialize mount summary", err.to_string())
            .into()
    })
}

/// Whether this page has been mounted, by `mount` or by autostart.
#[wasm_bindgen(js_name = isMounted)]
pub fn is_mounted() -> bool {
    MOUNTED.with(Cell::get)
}

/// Parse a JS config object. `undefined` and `null` mean all defaults.
pub fn parse_config(value: JsValue) -> Result<PageConfig, WasmError> {
    if value.is_undefined() || value.is_null() {
        return Ok(PageConfig::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|err| WasmError::config_with_details("Invalid config object", err.to_string()))
}

/// Validate `config`, claim the page, and mount once the document is ready.
///
/// An invalid config, or a selector the document rejects, is reported
/// without claiming the page, so a corrected retry can still mount.
pub async fn mount_page(config: PageConfig) -> pagewire::Result<MountSummary> {
    let surface = Rc::new(WebSurface::from_global()?);
    let controller = PageController::new(surface, config)?;

    if MOUNTED.with(|mounted| mounted.replace(true)) {
        return Err(PageError::AlreadyMounted);
    }
    let result = controller.mount_when_ready().await;
    if result.is_err() && !controller.is_mounted() {
        MOUNTED.with(|mounted| mounted.set(false));
    }
    result
}
