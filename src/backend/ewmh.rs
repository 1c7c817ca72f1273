use libewmh::{WinDesktop, WinState, WinType, WindowManager, WindowManagerError};
use tracing::debug;

use super::WindowSystem;
use crate::{
    geometry::{Insets, Rect},
    window::{Window, WindowFlags, WindowId},
    Result,
};

/// Backend talking EWMH to the window manager over a direct X11 connection
pub struct Ewmh {
    wm: WindowManager,
}

impl Ewmh {
    /// Connect to the X11 server named by `DISPLAY`
    pub fn connect() -> Result<Self> {
        Ok(Self { wm: WindowManager::connect()? })
    }

    fn viewport_offset(&self) -> Result<(i32, i32)> {
        let desktop = self.wm.current_desktop()?;
        Ok(self.wm.desktop_viewport(desktop)?)
    }

    fn win_name(&self, win: WindowId) -> Result<String> {
        match self.wm.win_name(win) {
            Ok(name) => Ok(name),
            Err(err) if err.is_wm(&WindowManagerError::NameNotFound(win)) => Ok(String::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn win_flags(&self, win: WindowId) -> Result<WindowFlags> {
        let mut flags = WindowFlags::empty();
        for typ in self.wm.win_type(win)? {
            match typ {
                WinType::Desktop => flags |= WindowFlags::DESKTOP,
                WinType::Dock => flags |= WindowFlags::DOCK,
                _ => {},
            }
        }
        for state in self.wm.win_state(win)? {
            match state {
                WinState::Hidden => flags |= WindowFlags::HIDDEN,
                WinState::Sticky => flags |= WindowFlags::STICKY,
                WinState::MaxHorz | WinState::MaxVert => flags |= WindowFlags::MAXIMIZED,
                WinState::Fullscreen => flags |= WindowFlags::FULLSCREEN,
                _ => {},
            }
        }
        Ok(flags)
    }
}

impl WindowSystem for Ewmh {
    fn windows(&self) -> Result<Vec<Window>> {
        let (vx, vy) = self.viewport_offset()?;
        let mut windows = vec![];
        for win in self.wm.client_windows()? {
            let (x, y, w, h) = self.wm.win_geometry(win)?;
            let desktop = match self.wm.win_desktop(win)? {
                Some(WinDesktop::Index(desktop)) => Some(desktop),
                Some(WinDesktop::All) | None => None,
            };
            let window = Window {
                id: win,
                desktop,
                name: self.win_name(win)?,
                flags: self.win_flags(win)?,
                geometry: Rect::new(x, y, w, h).translate(vx, vy),
            };
            debug!("windows: {:?}", window);
            windows.push(window);
        }
        Ok(windows)
    }

    fn active_window(&self) -> Result<Option<WindowId>> {
        Ok(self.wm.active_win()?)
    }

    fn current_desktop(&self) -> Result<u32> {
        Ok(self.wm.current_desktop()?)
    }

    fn viewport(&self) -> Result<Rect> {
        let (x, y) = self.viewport_offset()?;
        Ok(Rect::new(x, y, self.wm.width(), self.wm.height()))
    }

    fn work_area(&self) -> Result<Rect> {
        let desktop = self.wm.current_desktop()?;
        let (x, y, w, h) = self.wm.workarea(desktop)?;
        Ok(Rect::new(x, y, w, h))
    }

    fn frame_extents(&self, window: WindowId) -> Result<Insets> {
        Ok(Insets::from(self.wm.win_borders(window)?))
    }

    fn place(&self, window: &Window, rect: Rect) -> Result<()> {
        if window.flags.contains(WindowFlags::MAXIMIZED) {
            self.wm.unmaximize_win(window.id)?;
        }
        if window.flags.contains(WindowFlags::FULLSCREEN) {
            self.wm.unfullscreen_win(window.id)?;
        }
        self.wm.move_resize_win(window.id, Some(rect.x), Some(rect.y), Some(rect.w), Some(rect.h))?;
        Ok(())
    }

    fn activate(&self, window: WindowId) -> Result<()> {
        Ok(self.wm.activate_win(window)?)
    }
}
