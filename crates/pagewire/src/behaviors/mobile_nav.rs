//! Collapsible navigation for narrow viewports.
//!
//! The toggle button is created lazily: at mount if the viewport is already
//! narrow, otherwise on the first resize below the breakpoint. Creation is
//! guarded by a lookup, so at most one toggle ever exists and it is never
//! removed.

use std::rc::Rc;
use tracing::{debug, warn};

use crate::config::PageConfig;
use crate::error::SurfaceResult;
use crate::surface::{DocumentSurface, EventKind, ListenTarget};

fn toggle_selector(config: &PageConfig) -> String {
    format!(".{}", config.classes.mobile_toggle)
}

/// Make sure the toggle exists. Returns the toggle if this call created it,
/// `None` if one already existed or the navigation bar is missing.
pub fn ensure_toggle<S: DocumentSurface>(
    surface: &Rc<S>,
    config: &Rc<PageConfig>,
) -> SurfaceResult<Option<S::Node>> {
    if surface.query(&toggle_selector(config))?.is_some() {
        return Ok(None);
    }

    let Some(nav) = surface.query(&config.selectors.nav)? else {
        debug!(selector = %config.selectors.nav, "no navigation bar, skipping mobile toggle");
        return Ok(None);
    };
    let Some(container) = surface.query_within(&nav, &config.selectors.nav_container)? else {
        debug!(
            selector = %config.selectors.nav_container,
            "navigation bar has no container, skipping mobile toggle"
        );
        return Ok(None);
    };

    let toggle = surface.create_element("button")?;
    surface.add_class(&toggle, &config.classes.mobile_toggle);
    surface.set_inner_html(&toggle, &config.icons.closed);
    surface.prepend_child(&container, &toggle)?;

    let weak = Rc::downgrade(surface);
    let handler_config = Rc::clone(config);
    let handler_toggle = toggle.clone();
    surface.listen(
        ListenTarget::Node(toggle.clone()),
        EventKind::Click,
        Box::new(move |_| {
            if let Some(surface) = weak.upgrade() {
                toggle_nav(&*surface, &handler_config, &nav, &handler_toggle);
            }
        }),
    )?;

    debug!("mobile navigation toggle created");
    Ok(Some(toggle))
}

/// Show or hide the navigation list and swap the toggle icon to match.
/// Returns whether the list is now shown.
pub fn toggle_nav<S: DocumentSurface>(
    surface: &S,
    config: &PageConfig,
    nav: &S::Node,
    toggle: &S::Node,
) -> bool {
    let list = match surface.query_within(nav, &config.selectors.nav_list) {
        Ok(Some(list)) => list,
        Ok(None) => {
            debug!(selector = %config.selectors.nav_list, "navigation list not found");
            return false;
        }
        Err(err) => {
            warn!(error = %err, "failed to look up navigation list");
            return false;
        }
    };

    let shown = surface.toggle_class(&list, &config.classes.nav_shown);
    let icon = if shown {
        &config.icons.open
    } else {
        &config.icons.closed
    };
    surface.set_inner_html(toggle, icon);
    shown
}

/// Create the toggle now if the viewport is narrow, and again on any resize
/// that leaves it narrow. Returns whether the toggle was created at mount.
pub fn install<S: DocumentSurface>(
    surface: &Rc<S>,
    config: &Rc<PageConfig>,
) -> SurfaceResult<bool> {
    let created = if config.scroll.is_narrow(surface.viewport_width()) {
        ensure_toggle(surface, config)?.is_some()
    } else {
        false
    };

    let weak = Rc::downgrade(surface);
    let handler_config = Rc::clone(config);
    surface.listen(
        ListenTarget::Window,
        EventKind::Resize,
        Box::new(move |_| {
            let Some(surface) = weak.upgrade() else {
                return;
            };
            if !handler_config.scroll.is_narrow(surface.viewport_width()) {
                return;
            }
            if let Err(err) = ensure_toggle(&surface, &handler_config) {
                warn!(error = %err, "failed to create mobile navigation toggle");
            }
        }),
    )?;

    Ok(created)
}
