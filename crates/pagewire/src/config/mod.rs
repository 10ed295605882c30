//! Controller configuration.
//!
//! Every field has a default matching the documentation site's markup, so an
//! empty object (or no object at all) is a valid configuration. From
//! JavaScript the config is passed as a camelCase object:
//!
//! ```json
//! {
//!   "selectors": { "sidebarLinks": ".toc a" },
//!   "scroll": { "headerOffset": 64 },
//!   "copy": { "copiedLabel": "Done" }
//! }
//! ```

mod defaults;
mod validation;

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use defaults::*;

/// Top-level controller configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PageConfig {
    /// Where each behavior finds its elements
    #[serde(default)]
    pub selectors: SelectorConfig,

    /// Class names the behaviors toggle or create
    #[serde(default)]
    pub classes: ClassConfig,

    /// Scroll geometry thresholds
    #[serde(default)]
    pub scroll: ScrollConfig,

    /// Copy button labels and timing
    #[serde(default)]
    pub copy: CopyConfig,

    /// Mobile toggle icon markup
    #[serde(default)]
    pub icons: IconConfig,
}

/// CSS selectors for the page structure the controller wires onto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SelectorConfig {
    /// Links that smooth-scroll to an in-page anchor
    #[serde(default = "default_anchor_links")]
    pub anchor_links: String,

    /// Regions tracked by the scroll-spy
    #[serde(default = "default_sections")]
    pub sections: String,

    /// Links that receive the scroll-spy active marker
    #[serde(default = "default_nav_links")]
    pub nav_links: String,

    /// Links in the documentation sidebar
    #[serde(default = "default_sidebar_links")]
    pub sidebar_links: String,

    /// The navigation bar
    #[serde(default = "default_nav")]
    pub nav: String,

    /// Inner container of the navigation bar, scoped to `nav`
    #[serde(default = "default_nav_container")]
    pub nav_container: String,

    /// Navigation list shown/hidden by the toggle, scoped to `nav`
    #[serde(default = "default_nav_list")]
    pub nav_list: String,

    /// Preformatted blocks that get a copy button
    #[serde(default = "default_code_blocks")]
    pub code_blocks: String,

    /// Element inside a code block whose text is copied
    #[serde(default = "default_code_element")]
    pub code_element: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            anchor_links: default_anchor_links(),
            sections: default_sections(),
            nav_links: default_nav_links(),
            sidebar_links: default_sidebar_links(),
            nav: default_nav(),
            nav_container: default_nav_container(),
            nav_list: default_nav_list(),
            code_blocks: default_code_blocks(),
            code_element: default_code_element(),
        }
    }
}

impl SelectorConfig {
    /// Every selector with its camelCase config path.
    pub fn fields(&self) -> [(&'static str, &str); 9] {
        [
            ("selectors.anchorLinks", &self.anchor_links),
            ("selectors.sections", &self.sections),
            ("selectors.navLinks", &self.nav_links),
            ("selectors.sidebarLinks", &self.sidebar_links),
            ("selectors.nav", &self.nav),
            ("selectors.navContainer", &self.nav_container),
            ("selectors.navList", &self.nav_list),
            ("selectors.codeBlocks", &self.code_blocks),
            ("selectors.codeElement", &self.code_element),
        ]
    }
}

/// Class names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ClassConfig {
    #[serde(default = "default_active_class")]
    pub active: String,

    #[serde(default = "default_nav_shown_class")]
    pub nav_shown: String,

    #[serde(default = "default_mobile_toggle_class")]
    pub mobile_toggle: String,

    #[serde(default = "default_copy_button_class")]
    pub copy_button: String,
}

impl Default for ClassConfig {
    fn default() -> Self {
        Self {
            active: default_active_class(),
            nav_shown: default_nav_shown_class(),
            mobile_toggle: default_mobile_toggle_class(),
            copy_button: default_copy_button_class(),
        }
    }
}

/// Scroll geometry, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ScrollConfig {
    /// Subtracted from an anchor target's offset so the fixed header doesn't cover it
    #[serde(default = "default_header_offset")]
    pub header_offset: f64,

    /// A section becomes current once the viewport is within this distance of its top
    #[serde(default = "default_spy_lookahead")]
    pub spy_lookahead: f64,

    /// Viewport widths strictly below this count as mobile
    #[serde(default = "default_mobile_breakpoint")]
    pub mobile_breakpoint: f64,
}

impl ScrollConfig {
    /// Whether `viewport_width` is below the mobile breakpoint.
    pub fn is_narrow(&self, viewport_width: f64) -> bool {
        viewport_width < self.mobile_breakpoint
    }
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            header_offset: default_header_offset(),
            spy_lookahead: default_spy_lookahead(),
            mobile_breakpoint: default_mobile_breakpoint(),
        }
    }
}

/// Copy button labels and reset timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CopyConfig {
    #[serde(default = "default_copy_label")]
    pub label: String,

    #[serde(default = "default_copied_label")]
    pub copied_label: String,

    /// How long the copied label stays before reverting
    #[serde(default = "default_copy_reset_ms")]
    pub reset_ms: u32,
}

impl CopyConfig {
    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.reset_ms))
    }
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            label: default_copy_label(),
            copied_label: default_copied_label(),
            reset_ms: default_copy_reset_ms(),
        }
    }
}

/// Markup for the two states of the mobile toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IconConfig {
    /// Shown while the navigation list is hidden
    #[serde(default = "default_icon_closed")]
    pub closed: String,

    /// Shown while the navigation list is visible
    #[serde(default = "default_icon_open")]
    pub open: String,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            closed: default_icon_closed(),
            open: default_icon_open(),
        }
    }
}
