//! Documentation sidebar active-state.

use std::rc::Rc;

use crate::config::PageConfig;
use crate::error::SurfaceResult;
use crate::surface::{DocumentSurface, EventKind, ListenTarget, ScrollAlign, ScrollMotion};

/// Make `clicked` the only active sidebar link. On narrow viewports the
/// link is also scrolled into view inside the sidebar.
pub fn activate<S: DocumentSurface>(
    surface: &S,
    config: &PageConfig,
    links: &[S::Node],
    clicked: &S::Node,
) {
    for link in links {
        surface.remove_class(link, &config.classes.active);
    }
    surface.add_class(clicked, &config.classes.active);

    if config.scroll.is_narrow(surface.viewport_width()) {
        surface.scroll_into_view(clicked, ScrollMotion::Smooth, ScrollAlign::Nearest);
    }
}

/// Wire every sidebar link. Navigation is left to the browser.
pub fn install<S: DocumentSurface>(
    surface: &Rc<S>,
    config: &Rc<PageConfig>,
) -> SurfaceResult<usize> {
    let links: Rc<[S::Node]> = surface.query_all(&config.selectors.sidebar_links)?.into();

    for link in links.iter() {
        let weak = Rc::downgrade(surface);
        let config = Rc::clone(config);
        let all = Rc::clone(&links);
        let clicked = link.clone();
        surface.listen(
            ListenTarget::Node(link.clone()),
            EventKind::Click,
            Box::new(move |_| {
                if let Some(surface) = weak.upgrade() {
                    activate(&*surface, &config, &all, &clicked);
                }
            }),
        )?;
    }

    Ok(links.len())
}
