//! `libewmh` implements the [Extended Window Manager Hints (EWMH) specification](https://specifications.freedesktop.org/wm-spec/latest/)
//! as a way to integrate with EWMH compatible window managers. The EWHM spec builds on the lower
//! level Inter Client Communication Conventions Manual (ICCCM) to define interactions between
//! window managers, compositing managers and applications.
//!
//! [Root Window Properties](https://specifications.freedesktop.org/wm-spec/latest/ar01s03.html)
//! The EWMH spec defines a number of properties that EWHM compliant window managers will maintain
//! and return to clients requesting information. `libewmh` reads those properties to find out
//! which windows exist, where they are and which desktop and viewport are showing, and then asks
//! the window manager to move, resize and activate them.
//!
//! `wmlayout` uses `libewmh` to arrange all windows of the current desktop into fixed layouts;
//! however `libewmh` knows nothing about layouts and could be used for a variety of reasons.
mod atoms;
mod error;
mod model;
mod wm;
pub use atoms::AtomCollection;
pub use error::*;
pub use model::*;
pub use wm::*;

/// All essential symbols in a simple consumable form
///
/// ### Examples
/// ```
/// use libewmh::prelude::*;
/// ```
pub mod prelude {
    pub use crate::*;
}
