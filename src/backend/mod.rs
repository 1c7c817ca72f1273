//! Window system backends
//!
//! The driver only talks to the window system through [`WindowSystem`]. Two implementations exist:
//! [`Ewmh`] talks EWMH directly over an X11 connection while [`Wmctrl`] shells out to the
//! `wmctrl` and `xdotool` tools for setups where a direct connection isn't wanted.
use std::{fmt, str::FromStr};

use crate::{
    geometry::{Insets, Rect},
    window::{Window, WindowId},
    Error, Result,
};

mod ewmh;
mod wmctrl;
pub use ewmh::Ewmh;
pub use wmctrl::Wmctrl;

/// Queries and requests the driver needs from the window system
pub trait WindowSystem {
    /// Client windows in bottom to top stacking order with geometry in desktop coordinates
    fn windows(&self) -> Result<Vec<Window>>;

    /// Window that currently has the input focus
    fn active_window(&self) -> Result<Option<WindowId>>;

    /// Index of the desktop being shown
    fn current_desktop(&self) -> Result<u32>;

    /// Visible part of the current desktop, in the same coordinates as the window geometry
    fn viewport(&self) -> Result<Rect>;

    /// Part of the screen available to windows, i.e. without panels and docks
    fn work_area(&self) -> Result<Rect>;

    /// Decorations the window manager draws around the given window
    fn frame_extents(&self, window: WindowId) -> Result<Insets>;

    /// Move and resize the client window, first clearing any maximized or fullscreen state that
    /// would keep the window manager from honoring the new geometry
    fn place(&self, window: &Window, rect: Rect) -> Result<()>;

    /// Raise and focus the given window
    fn activate(&self, window: WindowId) -> Result<()>;
}

/// Backend selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BackendKind {
    #[default]
    Ewmh,
    Wmctrl,
}

impl BackendKind {
    /// Names accepted on the command line
    pub const NAMES: [&'static str; 2] = ["ewmh", "wmctrl"];

    /// Connect to the window system through the selected backend
    pub fn connect(&self) -> Result<Box<dyn WindowSystem>> {
        Ok(match self {
            BackendKind::Ewmh => Box::new(Ewmh::connect()?),
            BackendKind::Wmctrl => Box::new(Wmctrl::new()),
        })
    }
}

// Implement format! support
impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", format!("{:?}", self).to_lowercase())
    }
}

// Convert from &str to BackendKind
impl FromStr for BackendKind {
    type Err = Error;

    fn from_str(val: &str) -> Result<Self> {
        match val.to_lowercase().as_ref() {
            "ewmh" => Ok(BackendKind::Ewmh),
            "wmctrl" => Ok(BackendKind::Wmctrl),
            _ => Err(Error::usage(format!("invalid backend was given: {}", val))),
        }
    }
}
