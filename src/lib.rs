//! `wmlayout` arranges the windows of the current desktop into fixed layouts on EWMH compatible
//! window managers. It is meant to be bound to hot keys and run once per arrangement.
//!
//! ## Layouts
//! * `cascade` - diagonal staircase of equally sized windows ending on the active window
//! * `hstack` / `vstack` - side by side columns or stacked rows
//! * `tmain`, `bmain`, `lmain`, `rmain` - active window on one half, the rest tiled on the other
//! * `rowgridRC` / `colgridRC` - R x C grid filled row by row or column by column
//!
//! ## Command line examples
//!
//! ### Tile with the active window on the left
//! ```bash
//! wmlayout lmain
//! ```
//!
//! ### Show where a 2 x 3 grid would put the windows without moving them
//! ```bash
//! wmlayout --dry-run rowgrid23
//! ```
//!
//! The layout engine in [`layout`] is pure; everything touching the window system goes through
//! [`backend::WindowSystem`] and is driven by [`driver`].
pub mod backend;
pub mod config;
pub mod driver;
pub mod filter;
pub mod geometry;
pub mod layout;
pub mod report;
pub mod window;
mod error;
pub use error::*;

/// All essential symbols in a simple consumable form
///
/// ### Examples
/// ```
/// use wmlayout::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        backend::{BackendKind, WindowSystem},
        config::{Config, Mode},
        geometry::{Insets, Rect},
        layout::{Arrangement, GridSize, Layout},
        window::{Window, WindowFlags, WindowId},
        Error, Result,
    };
}
