//! Smooth scrolling for in-page anchor links.

use std::rc::Rc;
use tracing::debug;

use crate::config::PageConfig;
use crate::error::SurfaceResult;
use crate::fragment::fragment_of;
use crate::surface::{DocumentSurface, EventKind, ListenTarget, ScrollMotion};

/// Scroll to the element `href` points at, leaving `header_offset` pixels
/// above it. Returns whether a target was found.
pub fn scroll_to_fragment<S: DocumentSurface>(surface: &S, href: &str, header_offset: f64) -> bool {
    let Some(id) = fragment_of(href) else {
        debug!(href, "anchor link has no fragment");
        return false;
    };
    let Some(target) = surface.element_by_id(id) else {
        debug!(id, "anchor target not found");
        return false;
    };

    let top = surface.offset_top(&target) - header_offset;
    surface.scroll_to(top, ScrollMotion::Smooth);
    true
}

/// Intercept clicks on every anchor link. The default action is always
/// prevented, even when the target is missing.
pub fn install<S: DocumentSurface>(surface: &Rc<S>, config: &PageConfig) -> SurfaceResult<usize> {
    let links = surface.query_all(&config.selectors.anchor_links)?;
    let header_offset = config.scroll.header_offset;

    for link in &links {
        let weak = Rc::downgrade(surface);
        let node = link.clone();
        surface.listen(
            ListenTarget::Node(link.clone()),
            EventKind::Click,
            Box::new(move |event| {
                event.prevent_default();
                let Some(surface) = weak.upgrade() else {
                    return;
                };
                // Read at click time; the href may have been rewritten since mount.
                let href = surface.attribute(&node, "href").unwrap_or_default();
                scroll_to_fragment(&*surface, &href, header_offset);
            }),
        )?;
    }

    Ok(links.len())
}
