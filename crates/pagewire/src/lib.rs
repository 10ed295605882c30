//! # pagewire
//!
//! Client-side interactivity for static documentation sites.
//!
//! The controller wires five independent behaviors onto an existing page:
//!
//! - **Smooth scroll**: in-page anchor links scroll smoothly to their
//!   target, leaving room for the fixed header.
//! - **Scroll-spy**: the navigation link for the section in view carries the
//!   active marker.
//! - **Sidebar**: clicking a documentation sidebar link makes it the only
//!   active one.
//! - **Mobile navigation**: on narrow viewports a toggle button shows and
//!   hides the navigation list.
//! - **Copy buttons**: every code block gets a button that copies its code.
//!
//! ## Architecture
//!
//! This crate never touches a browser API directly. Everything goes through
//! the [`DocumentSurface`] trait, which `pagewire-wasm` implements over
//! `web-sys`. Tests drive the same code against
//! [`FakeSurface`](test_utils::FakeSurface), an in-memory document with a
//! virtual clock (enable the `test-utils` feature outside this crate).
//!
//! ```text
//! PageController ──mount()──▶ behaviors::* ──▶ DocumentSurface
//!                                               ├─ WebSurface  (pagewire-wasm)
//!                                               └─ FakeSurface (test-utils)
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use pagewire::{PageConfig, PageController};
//! use std::rc::Rc;
//!
//! let controller = PageController::new(Rc::new(surface), PageConfig::default())?;
//! let summary = controller.mount()?;
//! tracing::info!(code_blocks = summary.code_blocks, "ready");
//! ```

pub mod behaviors;
pub mod config;
pub mod controller;
pub mod error;
pub mod fragment;
pub mod surface;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::PageConfig;
pub use controller::{MountSummary, PageController, document_ready};
pub use error::{PageError, Result, SurfaceError, SurfaceResult};
pub use surface::{
    DocumentSurface, DomEvent, EventHandler, EventKind, ListenTarget, LocalTask, ScrollAlign,
    ScrollMotion, TimerCallback, TimerHandle,
};
