//! Default values for [`PageConfig`](super::PageConfig) fields.
//!
//! These match the markup and stylesheet the documentation site ships with.

pub fn default_anchor_links() -> String {
    r##"a[href^="#"]"##.to_string()
}

pub fn default_sections() -> String {
    "section".to_string()
}

pub fn default_nav_links() -> String {
    "nav ul li a".to_string()
}

pub fn default_sidebar_links() -> String {
    ".doc-sidebar a".to_string()
}

pub fn default_nav() -> String {
    "nav".to_string()
}

pub fn default_nav_container() -> String {
    ".container".to_string()
}

pub fn default_nav_list() -> String {
    "ul".to_string()
}

pub fn default_code_blocks() -> String {
    "pre".to_string()
}

pub fn default_code_element() -> String {
    "code".to_string()
}

pub fn default_active_class() -> String {
    "active".to_string()
}

pub fn default_nav_shown_class() -> String {
    "show".to_string()
}

pub fn default_mobile_toggle_class() -> String {
    "mobile-nav-toggle".to_string()
}

pub fn default_copy_button_class() -> String {
    "copy-button".to_string()
}

/// Clearance for the fixed header when jumping to an anchor.
pub fn default_header_offset() -> f64 {
    70.0
}

/// How far ahead of a section's top the scroll-spy switches to it.
pub fn default_spy_lookahead() -> f64 {
    100.0
}

/// Viewports narrower than this get the mobile toggle.
pub fn default_mobile_breakpoint() -> f64 {
    768.0
}

pub fn default_copy_label() -> String {
    "Copy".to_string()
}

pub fn default_copied_label() -> String {
    "Copied!".to_string()
}

pub fn default_copy_reset_ms() -> u32 {
    2000
}

pub fn default_icon_closed() -> String {
    r#"<i class="fas fa-bars"></i>"#.to_string()
}

pub fn default_icon_open() -> String {
    r#"<i class="fas fa-times"></i>"#.to_string()
}
