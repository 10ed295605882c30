//! Scroll-spy: highlight the navigation link for the section in view.
//!
//! Every scroll tick re-reads section geometry from the live layout and
//! re-applies the active marker to every link. Nothing is cached between
//! ticks, so the result only ever depends on the current layout and scroll
//! position.

use std::rc::Rc;
use tracing::{debug, trace};

use crate::config::PageConfig;
use crate::error::SurfaceResult;
use crate::fragment::targets;
use crate::surface::{DocumentSurface, EventKind, ListenTarget};

/// Layout of one tracked section at the moment it was measured.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionGeometry {
    pub id: Option<String>,
    pub top: f64,
    pub height: f64,
}

impl SectionGeometry {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: Some(id.into()),
            top,
            height,
        }
    }
}

/// Identifier of the deepest section scrolled past.
///
/// A section counts once `scroll_y >= top - lookahead`. Sections are taken in
/// document order and the last one that counts wins. `None` when no section
/// counts yet, or when the winning section has no identifier.
pub fn current_section(sections: &[SectionGeometry], scroll_y: f64, lookahead: f64) -> Option<&str> {
    sections
        .iter()
        .rev()
        .find(|section| scroll_y >= section.top - lookahead)
        .and_then(|section| section.id.as_deref())
}

/// The sections and links collected at mount.
pub struct ScrollSpy<S: DocumentSurface> {
    sections: Vec<S::Node>,
    links: Vec<S::Node>,
    lookahead: f64,
    active_class: String,
}

impl<S: DocumentSurface> ScrollSpy<S> {
    pub fn new(sections: Vec<S::Node>, links: Vec<S::Node>, config: &PageConfig) -> Self {
        Self {
            sections,
            links,
            lookahead: config.scroll.spy_lookahead,
            active_class: config.classes.active.clone(),
        }
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Read the current geometry of every section.
    pub fn measure(&self, surface: &S) -> Vec<SectionGeometry> {
        self.sections
            .iter()
            .map(|section| SectionGeometry {
                id: surface.attribute(section, "id"),
                top: surface.offset_top(section),
                height: surface.client_height(section),
            })
            .collect()
    }

    /// Recompute the current section and re-apply the active marker to
    /// every link. Returns the current section's identifier.
    pub fn refresh(&self, surface: &S) -> Option<String> {
        let geometry = self.measure(surface);
        let scroll_y = surface.scroll_y();
        let current = current_section(&geometry, scroll_y, self.lookahead).map(str::to_owned);
        trace!(scroll_y, current = current.as_deref(), "scroll-spy tick");

        for link in &self.links {
            let href = surface.attribute(link, "href");
            let is_current = match (&current, href) {
                (Some(id), Some(href)) => targets(&href, id),
                _ => false,
            };
            if is_current {
                surface.add_class(link, &self.active_class);
            } else {
                surface.remove_class(link, &self.active_class);
            }
        }

        current
    }
}

/// Collect sections and links, then refresh on every window scroll.
pub fn install<S: DocumentSurface>(
    surface: &Rc<S>,
    config: &PageConfig,
) -> SurfaceResult<Rc<ScrollSpy<S>>> {
    let sections = surface.query_all(&config.selectors.sections)?;
    let links = surface.query_all(&config.selectors.nav_links)?;
    if sections.is_empty() {
        debug!(selector = %config.selectors.sections, "no sections to track");
    }

    let spy = Rc::new(ScrollSpy::new(sections, links, config));
    let weak = Rc::downgrade(surface);
    let handler_spy = Rc::clone(&spy);
    surface.listen(
        ListenTarget::Window,
        EventKind::Scroll,
        Box::new(move |_| {
            if let Some(surface) = weak.upgrade() {
                handler_spy.refresh(&*surface);
            }
        }),
    )?;

    Ok(spy)
}
