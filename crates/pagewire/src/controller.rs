//! The page interactivity controller.

use futures::channel::oneshot;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, info};

use crate::behaviors::{copy_button, mobile_nav, scroll_spy, sidebar, smooth_scroll};
use crate::config::PageConfig;
use crate::error::{PageError, Result, SurfaceError, SurfaceResult};
use crate::surface::{DocumentSurface, EventKind, ListenTarget};

/// What [`PageController::mount`] found on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MountSummary {
    pub anchor_links: usize,
    pub sections: usize,
    pub nav_links: usize,
    pub sidebar_links: usize,
    pub mobile_toggle_created: bool,
    pub code_blocks: usize,
}

/// Wires the five page behaviors onto a document surface.
///
/// # Example
///
/// ```rust,ignore
/// let controller = PageController::new(Rc::new(surface), PageConfig::default())?;
/// let summary = controller.mount_when_ready().await?;
/// ```
pub struct PageController<S: DocumentSurface> {
    surface: Rc<S>,
    config: Rc<PageConfig>,
    mounted: Cell<bool>,
}

impl<S: DocumentSurface> PageController<S> {
    /// Validate `config` and bind it to `surface`. Nothing is installed yet.
    pub fn new(surface: Rc<S>, config: PageConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            surface,
            config: Rc::new(config),
            mounted: Cell::new(false),
        })
    }

    pub fn surface(&self) -> &Rc<S> {
        &self.surface
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.get()
    }

    /// Install every behavior on the page as it is now.
    ///
    /// Fails with [`PageError::AlreadyMounted`] on a second call. A selector
    /// the document rejects fails the mount with nothing installed, and the
    /// controller stays unmounted.
    pub fn mount(&self) -> Result<MountSummary> {
        if self.mounted.get() {
            return Err(PageError::AlreadyMounted);
        }
        self.check_selectors()?;
        self.mounted.set(true);

        let surface = &self.surface;
        let config = &self.config;

        let anchor_links = smooth_scroll::install(surface, config)?;
        let spy = scroll_spy::install(surface, config)?;
        let sidebar_links = sidebar::install(surface, config)?;
        let mobile_toggle_created = mobile_nav::install(surface, config)?;
        let copy_buttons = copy_button::install(surface, config)?;

        let summary = MountSummary {
            anchor_links,
            sections: spy.section_count(),
            nav_links: spy.link_count(),
            sidebar_links,
            mobile_toggle_created,
            code_blocks: copy_buttons.len(),
        };
        info!(
            anchor_links = summary.anchor_links,
            sections = summary.sections,
            nav_links = summary.nav_links,
            sidebar_links = summary.sidebar_links,
            code_blocks = summary.code_blocks,
            mobile_toggle = summary.mobile_toggle_created,
            "page controller mounted"
        );
        Ok(summary)
    }

    /// Ask the surface to parse every configured selector.
    fn check_selectors(&self) -> SurfaceResult<()> {
        for (field, selector) in self.config.selectors.fields() {
            if let Err(err) = self.surface.query(selector) {
                debug!(field, error = %err, "selector rejected by the document");
                return Err(err);
            }
        }
        Ok(())
    }

    /// Wait until the document is parsed, then [`mount`](Self::mount).
    pub async fn mount_when_ready(&self) -> Result<MountSummary> {
        document_ready(&*self.surface).await?;
        self.mount()
    }
}

/// Resolve once the document has finished parsing.
///
/// Returns immediately if it already has; otherwise waits for
/// `DOMContentLoaded`.
pub async fn document_ready<S: DocumentSurface>(surface: &S) -> SurfaceResult<()> {
    if !surface.is_loading() {
        return Ok(());
    }

    debug!("document still loading, waiting for DOMContentLoaded");
    let (tx, rx) = oneshot::channel();
    let mut tx = Some(tx);
    surface.listen(
        ListenTarget::Document,
        EventKind::DomContentLoaded,
        Box::new(move |_| {
            if let Some(tx) = tx.take() {
                let _ = tx.send(());
            }
        }),
    )?;

    rx.await.map_err(|_| SurfaceError::Unavailable("DOMContentLoaded"))
}
