//! The five page behaviors.
//!
//! Each module exposes an `install` function that wires listeners through the
//! surface and returns how much of the page it found, plus the plain
//! functions those listeners call, so they can be exercised directly.
//! Behaviors share no state and can be installed in any order.

pub mod copy_button;
pub mod mobile_nav;
pub mod scroll_spy;
pub mod sidebar;
pub mod smooth_scroll;

pub use copy_button::CopyButton;
pub use scroll_spy::{ScrollSpy, SectionGeometry, current_section};
