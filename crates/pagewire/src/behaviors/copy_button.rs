//! "Copy" buttons on code blocks.
//!
//! Each `pre` block gets a button. Clicking it writes the text of the
//! block's `code` element to the clipboard; only once the write succeeds does
//! the label change to the copied label, and it reverts after the configured
//! delay. A failed write leaves the label untouched.
//!
//! Each button keeps one pending reset timer. A second successful copy
//! cancels the previous timer before scheduling its own, so the copied label
//! always lasts the full delay after the most recent copy.

use std::cell::Cell;
use std::rc::{Rc, Weak};
use tracing::{debug, warn};

use crate::config::PageConfig;
use crate::error::SurfaceResult;
use crate::surface::{DocumentSurface, EventKind, ListenTarget, TimerHandle};

pub struct CopyButton<S: DocumentSurface> {
    block: S::Node,
    button: S::Node,
    config: Rc<PageConfig>,
    pending_reset: Cell<Option<TimerHandle>>,
}

impl<S: DocumentSurface> CopyButton<S> {
    /// Create the button, append it to `block` and wire its click handler.
    pub fn attach(
        surface: &Rc<S>,
        config: &Rc<PageConfig>,
        block: S::Node,
    ) -> SurfaceResult<Rc<Self>> {
        let button = surface.create_element("button")?;
        surface.add_class(&button, &config.classes.copy_button);
        surface.set_text(&button, &config.copy.label);

        surface.set_style(&block, "position", "relative")?;
        surface.append_child(&block, &button)?;

        let this = Rc::new(Self {
            block,
            button: button.clone(),
            config: Rc::clone(config),
            pending_reset: Cell::new(None),
        });

        let weak = Rc::downgrade(surface);
        let handler_this = Rc::clone(&this);
        surface.listen(
            ListenTarget::Node(button),
            EventKind::Click,
            Box::new(move |_| {
                if let Some(surface) = weak.upgrade() {
                    handler_this.copy(&surface);
                }
            }),
        )?;

        Ok(this)
    }

    pub fn button(&self) -> &S::Node {
        &self.button
    }

    pub fn block(&self) -> &S::Node {
        &self.block
    }

    /// Start copying the block's code. The clipboard write completes on the
    /// surface's executor; this returns immediately.
    pub fn copy(self: &Rc<Self>, surface: &Rc<S>) {
        let code = match surface.query_within(&self.block, &self.config.selectors.code_element) {
            Ok(Some(code)) => code,
            Ok(None) => {
                debug!("code block has no code element, nothing to copy");
                return;
            }
            Err(err) => {
                warn!(error = %err, "failed to look up code element");
                return;
            }
        };
        let text = surface.inner_text(&code);

        let this = Rc::clone(self);
        let task_surface = Rc::clone(surface);
        surface.spawn_local(Box::pin(async move {
            match task_surface.write_clipboard(&text).await {
                Ok(()) => this.show_copied(&task_surface),
                Err(err) => debug!(error = %err, "clipboard write failed"),
            }
        }));
    }

    fn show_copied(self: &Rc<Self>, surface: &Rc<S>) {
        if let Some(previous) = self.pending_reset.take() {
            surface.clear_timeout(previous);
        }
        surface.set_text(&self.button, &self.config.copy.copied_label);

        let this = Rc::clone(self);
        let weak: Weak<S> = Rc::downgrade(surface);
        let scheduled = surface.set_timeout(
            self.config.copy.reset_delay(),
            Box::new(move || {
                this.pending_reset.set(None);
                if let Some(surface) = weak.upgrade() {
                    surface.set_text(&this.button, &this.config.copy.label);
                }
            }),
        );

        match scheduled {
            Ok(handle) => self.pending_reset.set(Some(handle)),
            Err(err) => {
                warn!(error = %err, "failed to schedule label reset");
                surface.set_text(&self.button, &self.config.copy.label);
            }
        }
    }
}

/// Attach a copy button to every code block.
pub fn install<S: DocumentSurface>(
    surface: &Rc<S>,
    config: &Rc<PageConfig>,
) -> SurfaceResult<Vec<Rc<CopyButton<S>>>> {
    surface
        .query_all(&config.selectors.code_blocks)?
        .into_iter()
        .map(|block| CopyButton::attach(surface, config, block))
        .collect()
}
