//! `WindowManager` uses the [Extended Window Manager Hints (EWMH) specification](https://specifications.freedesktop.org/wm-spec/latest/)
//! as a way to integrate with EWMH compatible window managers. The EWHM spec builds on the lower
//! level Inter Client Communication Conventions Manual (ICCCM) to define interactions between
//! window managers, compositing managers and applications.
//!
//! [Root Window Properties](https://specifications.freedesktop.org/wm-spec/latest/ar01s03.html)
//! The EWMH spec defines a number of properties that EWHM compliant window managers will maintain
//! and return to clients requesting information. `WindowManager` reads the desktop, viewport, work
//! area and client list properties off the root window and then sends client messages to move,
//! resize and activate the managed windows.
use crate::{atoms::AtomCollection, model::*, ErrorWrapper, WindowManagerError, WindowManagerResult};
use std::str;
use tracing::debug;

use x11rb::{
    connection::Connection,
    protocol::xproto::{
        self, Atom, AtomEnum, ClientMessageEvent, ConnectionExt as _, EventMask, GetPropertyReply,
    },
    rust_connection::RustConnection,
};

// Define the second byte of the move resize flags 32bit value
// Used to indicate that the associated value has been changed and needs to be acted upon
pub type MoveResizeWindowFlags = u32;
pub const MOVE_RESIZE_WINDOW_X: MoveResizeWindowFlags = 1 << 8;
pub const MOVE_RESIZE_WINDOW_Y: MoveResizeWindowFlags = 1 << 9;
pub const MOVE_RESIZE_WINDOW_WIDTH: MoveResizeWindowFlags = 1 << 10;
pub const MOVE_RESIZE_WINDOW_HEIGHT: MoveResizeWindowFlags = 1 << 11;

pub type WindowStateAction = u32;
pub const WINDOW_STATE_ACTION_REMOVE: WindowStateAction = 0;

// Source indication for client messages, 2 means a pager or other direct user action
const SOURCE_INDICATION_PAGER: u32 = 2;

/// Window Manager control implements the EWMH protocol using x11rb to provide a simplified access
/// layer to EWHM compatible window managers.
pub struct WindowManager {
    conn: RustConnection,      // x11 connection
    pub atoms: AtomCollection, // atom cache
    root: u32,                 // root window id
    width: u32,                // screen width
    height: u32,               // screen height
}

/// Pending property lookup that can be turned into the value type the caller expects
pub struct GetPropertyResult {
    property: Atom,
    boxed: WindowManagerResult<GetPropertyReply>,
}

impl GetPropertyResult {
    /// All 32bit values of the property, erroring if the property isn't set
    pub fn values(self) -> WindowManagerResult<Vec<u32>> {
        let property = self.property;
        self.boxed?
            .value32()
            .map(|x| x.collect())
            .ok_or_else(|| WindowManagerError::PropertyNotFound(property.to_string()).into())
    }

    /// All 32bit values of the property or an empty list if the property isn't set
    pub fn values_or_empty(self) -> WindowManagerResult<Vec<u32>> {
        Ok(self.boxed?.value32().map(|x| x.collect()).unwrap_or_default())
    }
}

impl TryFrom<GetPropertyResult> for u32 {
    type Error = ErrorWrapper;
    fn try_from(result: GetPropertyResult) -> WindowManagerResult<u32> {
        let property = result.property;
        let values = result.values()?;
        values.first().copied().ok_or_else(|| WindowManagerError::PropertyNotFound(property.to_string()).into())
    }
}

impl WindowManager {
    /// Create the window manager control instance and connect to the X11 server
    pub fn connect() -> WindowManagerResult<Self> {
        let (conn, screen) = x11rb::connect(None)?;

        // Get the screen size
        let (width, height, root) = {
            let screen = &conn.setup().roots[screen];
            (screen.width_in_pixels as u32, screen.height_in_pixels as u32, screen.root)
        };

        // Cache atoms
        let atoms = AtomCollection::new(&conn)?.reply()?;

        debug!("connect: screen: {}, root: {}, w: {}, h: {}", screen, root, width, height);
        Ok(WindowManager { conn, atoms, root, width, height })
    }

    /// Get the screen full width
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get screen full height
    pub fn height(&self) -> u32 {
        self.height
    }

    fn _get_window_property<A: Into<Atom>, B: Into<Atom>>(
        &self, window_id: u32, property: A, type_: B,
    ) -> Result<GetPropertyReply, ErrorWrapper> {
        Ok(self.conn.get_property(false, window_id, property, type_, 0, u32::MAX)?.reply()?)
    }

    pub fn get_window_property<A: Into<Atom>, B: Into<Atom>>(
        &self, window_id: u32, property: A, type_: B,
    ) -> GetPropertyResult {
        let property = property.into();
        GetPropertyResult {
            property,
            boxed: self._get_window_property(window_id, property, type_),
        }
    }

    pub fn get_root_property<A: Into<Atom>, B: Into<Atom>>(&self, property: A, type_: B) -> GetPropertyResult {
        self.get_window_property(self.root, property, type_)
    }

    /// Get the active window id, `None` when no window has focus
    pub fn active_win(&self) -> WindowManagerResult<Option<u32>> {
        // Defined as: _NET_ACTIVE_WINDOW, WINDOW/32
        let values = self.get_root_property(self.atoms._NET_ACTIVE_WINDOW, AtomEnum::WINDOW).values_or_empty()?;
        let win = values.first().copied().filter(|x| *x != x11rb::NONE);
        debug!("active_win: {:?}", win);
        Ok(win)
    }

    /// Get the index of the current desktop
    pub fn current_desktop(&self) -> WindowManagerResult<u32> {
        // Defined as: _NET_CURRENT_DESKTOP desktop, CARDINAL/32
        let desktop: u32 = self.get_root_property(self.atoms._NET_CURRENT_DESKTOP, AtomEnum::CARDINAL).try_into()?;
        debug!("current_desktop: {}", desktop);
        Ok(desktop)
    }

    /// Get the top left corner of the given desktop's viewport
    ///
    /// Window managers without large desktops don't set the property so (0, 0) is returned.
    ///
    /// ### Arguments
    /// * `desktop` - index of the desktop to query
    pub fn desktop_viewport(&self, desktop: u32) -> WindowManagerResult<(i32, i32)> {
        // Defined as: _NET_DESKTOP_VIEWPORT x, y, CARDINAL[][2]/32
        let values =
            self.get_root_property(self.atoms._NET_DESKTOP_VIEWPORT, AtomEnum::CARDINAL).values_or_empty()?;
        let i = desktop as usize * 2;
        let (x, y) = match values.get(i..i + 2) {
            Some(v) => (v[0] as i32, v[1] as i32),
            None => (0, 0),
        };
        debug!("desktop_viewport: desktop: {}, x: {}, y: {}", desktop, x, y);
        Ok((x, y))
    }

    /// Get the given desktop's work area
    ///
    /// ### Arguments
    /// * `desktop` - index of the desktop to query
    ///
    /// ### Examples
    /// ```ignore
    /// use libewmh::prelude::*;
    /// let wm = WindowManager::connect().unwrap();
    /// let (x, y, w, h) = wm.workarea(0).unwrap();
    /// ```
    pub fn workarea(&self, desktop: u32) -> WindowManagerResult<(i32, i32, u32, u32)> {
        // Defined as: _NET_WORKAREA, x, y, width, height CARDINAL[][4]/32
        // which means when retrieving the value via `get_property` that we need to use a `self.atoms._NET_WORKAREA`
        // request message with a `AtomEnum::CARDINAL` type response and we can use the `reply.value32()` accessor to
        // retrieve the values of which there will be 4 for each desktop as defined (x, y, width, height).
        let values = self.get_root_property(self.atoms._NET_WORKAREA, AtomEnum::CARDINAL).values()?;
        let i = desktop as usize * 4;
        let v = values.get(i..i + 4).ok_or(WindowManagerError::WorkAreaNotFound(desktop))?;
        let (x, y, w, h) = (v[0] as i32, v[1] as i32, v[2], v[3]);
        debug!("workarea: desktop: {}, x: {}, y: {}, w: {}, h: {}", desktop, x, y, w, h);
        Ok((x, y, w, h))
    }

    /// Get the window manager's client windows in bottom to top stacking order
    ///
    /// Falls back on the mapping ordered `_NET_CLIENT_LIST` for window managers that don't
    /// maintain the stacking list.
    pub fn client_windows(&self) -> WindowManagerResult<Vec<u32>> {
        let stacking =
            self.get_root_property(self.atoms._NET_CLIENT_LIST_STACKING, AtomEnum::WINDOW).values_or_empty()?;
        if !stacking.is_empty() {
            debug!("client_windows: using _NET_CLIENT_LIST_STACKING: {:?}", stacking);
            return Ok(stacking);
        }
        let windows = self.get_root_property(self.atoms._NET_CLIENT_LIST, AtomEnum::WINDOW).values()?;
        debug!("client_windows: using _NET_CLIENT_LIST: {:?}", windows);
        Ok(windows)
    }

    /// Get window desktop, `None` when the window manager hasn't assigned one
    ///
    /// ### Arguments
    /// * `win` - id of the window to query
    pub fn win_desktop(&self, win: xproto::Window) -> WindowManagerResult<Option<WinDesktop>> {
        // Defined as: _NET_WM_DESKTOP desktop, CARDINAL/32
        let values =
            self.get_window_property(win, self.atoms._NET_WM_DESKTOP, AtomEnum::CARDINAL).values_or_empty()?;
        let desktop = values.first().map(|x| WinDesktop::from(*x));
        debug!("win_desktop: id: {}, desktop: {:?}", win, desktop);
        Ok(desktop)
    }

    /// Get window frame border values added by the window manager
    ///
    /// Undecorated windows don't carry the property and report zero borders.
    ///
    /// ### Arguments
    /// * `win` - id of the window to query
    ///
    /// ### Examples
    /// ```ignore
    /// use libewmh::prelude::*;
    /// let wm = WindowManager::connect().unwrap();
    /// let (l, r, t, b) = wm.win_borders(12345).unwrap();
    /// ```
    pub fn win_borders(&self, win: xproto::Window) -> WindowManagerResult<(u32, u32, u32, u32)> {
        // Defined as: _NET_FRAME_EXTENTS, left, right, top, bottom, CARDINAL[4]/32
        let values =
            self.get_window_property(win, self.atoms._NET_FRAME_EXTENTS, AtomEnum::CARDINAL).values_or_empty()?;
        let (l, r, t, b) = match values[..] {
            [l, r, t, b, ..] => (l, r, t, b),
            _ => (0, 0, 0, 0),
        };
        debug!("win_borders: id: {}, l: {}, r: {}, t: {}, b: {}", win, l, r, t, b);
        Ok((l, r, t, b))
    }

    /// Get window geometry
    ///
    /// ### Arguments
    /// * `win` - id of the window to query
    ///
    /// ### Examples
    /// ```ignore
    /// use libewmh::prelude::*;
    /// let wm = WindowManager::connect().unwrap();
    /// let (x, y, w, h) = wm.win_geometry(12345).unwrap();
    /// ```
    pub fn win_geometry(&self, win: xproto::Window) -> WindowManagerResult<(i32, i32, u32, u32)> {
        // The returned x, y location is relative to its parent window making the values completely
        // useless. However using `translate_coordinates` we can have the window manager map those
        // useless values into real world cordinates by passing it the root as the relative window.

        // Get width and heith and useless relative location values
        let g = self.conn.get_geometry(win)?.reply()?;

        // Translate the window origin to root coordinates
        let t = self.conn.translate_coordinates(win, self.root, 0, 0)?.reply()?;

        let (x, y, w, h) = (t.dst_x, t.dst_y, g.width, g.height);
        debug!("win_geometry: id: {}, x: {}, y: {}, w: {}, h: {}", win, x, y, w, h);
        Ok((x as i32, y as i32, w as u32, h as u32))
    }

    /// Get window name
    ///
    /// Tries `_NET_WM_VISIBLE_NAME`, then `_NET_WM_NAME` and finally falls back on `WM_NAME`.
    ///
    /// ### Arguments
    /// * `win` - id of the window to query
    pub fn win_name(&self, win: xproto::Window) -> WindowManagerResult<String> {
        let candidates: [(&str, Atom, Atom); 3] = [
            ("_NET_WM_VISIBLE_NAME", self.atoms._NET_WM_VISIBLE_NAME, self.atoms.UTF8_STRING),
            ("_NET_WM_NAME", self.atoms._NET_WM_NAME, self.atoms.UTF8_STRING),
            ("WM_NAME", AtomEnum::WM_NAME.into(), AtomEnum::STRING.into()),
        ];
        for (label, property, type_) in candidates {
            let reply = self._get_window_property(win, property, type_)?;
            if reply.type_ == x11rb::NONE {
                continue;
            }
            if let Ok(value) = str::from_utf8(&reply.value) {
                if !value.is_empty() {
                    debug!("win_name: using {} for: {}", label, value);
                    return Ok(value.to_owned());
                }
            }
        }

        // No valid name was found
        Err(WindowManagerError::NameNotFound(win).into())
    }

    /// Get window states
    ///
    /// ### Arguments
    /// * `win` - id of the window to query
    pub fn win_state(&self, win: xproto::Window) -> WindowManagerResult<Vec<WinState>> {
        // Defined as: _NET_WM_STATE, ATOM[]
        let values = self.get_window_property(win, self.atoms._NET_WM_STATE, AtomEnum::ATOM).values_or_empty()?;
        let states = values.into_iter().map(|x| WinState::from(&self.atoms, x)).collect::<Vec<_>>();
        debug!("win_state: id: {}, states: {:?}", win, states);
        Ok(states)
    }

    /// Get window types in order of preference
    ///
    /// ### Arguments
    /// * `win` - id of the window to query
    pub fn win_type(&self, win: xproto::Window) -> WindowManagerResult<Vec<WinType>> {
        // Defined as: _NET_WM_WINDOW_TYPE, ATOM[]/32
        let values =
            self.get_window_property(win, self.atoms._NET_WM_WINDOW_TYPE, AtomEnum::ATOM).values_or_empty()?;
        let types = values.into_iter().map(|x| WinType::from(&self.atoms, x)).collect::<Vec<_>>();
        debug!("win_type: id: {}, types: {:?}", win, types);
        Ok(types)
    }

    /// Add or remove up to two window states in one request
    ///
    /// ### Arguments
    /// * `win` - id of the window to manipulate
    /// * `action` - only `WINDOW_STATE_ACTION_REMOVE` is sent by this crate
    /// * `first` - first state atom
    /// * `second` - optional second state atom, 0 for none
    pub fn set_win_state(
        &self, win: xproto::Window, action: WindowStateAction, first: Atom, second: Atom,
    ) -> WindowManagerResult<()> {
        self.send_event(ClientMessageEvent::new(
            32,
            win,
            self.atoms._NET_WM_STATE,
            [action, first, second, SOURCE_INDICATION_PAGER, 0],
        ))?;
        debug!("set_win_state: id: {}, action: {}, first: {}, second: {}", win, action, first, second);
        Ok(())
    }

    /// Remove the MaxVert and MaxHorz states
    ///
    /// ### Arguments
    /// * `win` - id of the window to manipulate
    pub fn unmaximize_win(&self, win: xproto::Window) -> WindowManagerResult<()> {
        self.set_win_state(
            win,
            WINDOW_STATE_ACTION_REMOVE,
            self.atoms._NET_WM_STATE_MAXIMIZED_HORZ,
            self.atoms._NET_WM_STATE_MAXIMIZED_VERT,
        )
    }

    /// Remove the Fullscreen state
    ///
    /// ### Arguments
    /// * `win` - id of the window to manipulate
    pub fn unfullscreen_win(&self, win: xproto::Window) -> WindowManagerResult<()> {
        self.set_win_state(win, WINDOW_STATE_ACTION_REMOVE, self.atoms._NET_WM_STATE_FULLSCREEN, 0)
    }

    /// Ask the window manager to activate, i.e. raise and focus, the given window
    ///
    /// ### Arguments
    /// * `win` - id of the window to manipulate
    pub fn activate_win(&self, win: xproto::Window) -> WindowManagerResult<()> {
        self.send_event(ClientMessageEvent::new(
            32,
            win,
            self.atoms._NET_ACTIVE_WINDOW,
            [SOURCE_INDICATION_PAGER, x11rb::CURRENT_TIME, 0, 0, 0],
        ))?;
        debug!("activate_win: id: {}", win);
        Ok(())
    }

    /// Move and resize the given window using the window's own gravity
    ///
    /// ### Arguments
    /// * `win` - id of the window to manipulate
    /// * `x` - x coordinate to use for the window during positioning
    /// * `y` - y coordinate to use for the window during positioning
    /// * `w` - width to resize the window to
    /// * `h` - height to resize the window to
    ///
    /// ### Examples
    /// ```ignore
    /// use libewmh::prelude::*;
    /// let wm = WindowManager::connect().unwrap();
    /// wm.move_resize_win(12345, Some(0), Some(0), Some(500), Some(500)).unwrap();
    /// ```
    pub fn move_resize_win(
        &self, win: xproto::Window, x: Option<i32>, y: Option<i32>, w: Option<u32>, h: Option<u32>,
    ) -> WindowManagerResult<()> {
        // Gravity is defined as the lower byte of the move resize flags 32bit value and is left at
        // zero which tells the window manager to use the gravity already set on the window.
        let mut flags: MoveResizeWindowFlags = 0;

        // Define the second byte of the move resize flags 32bit value
        // Used to indicate that the associated value has been changed and needs to be acted upon
        if x.is_some() {
            flags |= MOVE_RESIZE_WINDOW_X;
        }
        if y.is_some() {
            flags |= MOVE_RESIZE_WINDOW_Y;
        }
        if w.is_some() {
            flags |= MOVE_RESIZE_WINDOW_WIDTH;
        }
        if h.is_some() {
            flags |= MOVE_RESIZE_WINDOW_HEIGHT;
        }

        // Coordinates are signed on the wire so negative values survive the cast
        self.send_event(ClientMessageEvent::new(
            32,
            win,
            self.atoms._NET_MOVERESIZE_WINDOW,
            [flags, x.unwrap_or(0) as u32, y.unwrap_or(0) as u32, w.unwrap_or(0), h.unwrap_or(0)],
        ))?;

        debug!("move_resize_win: id: {}, x: {:?}, y: {:?}, w: {:?}, h: {:?}", win, x, y, w, h);
        Ok(())
    }

    /// Send the event ensuring that a flush is called and that the message was precisely
    /// executed in the case of a resize/move.
    ///
    /// ### Arguments
    /// * `msg` - the client message event to send
    pub fn send_event(&self, msg: ClientMessageEvent) -> WindowManagerResult<()> {
        let mask = EventMask::SUBSTRUCTURE_REDIRECT | EventMask::SUBSTRUCTURE_NOTIFY;
        self.conn.send_event(false, self.root, mask, &msg)?.check()?;
        self.conn.flush()?;
        debug!("send_event: win: {}", msg.window);

        // I've found that Xfwm4 does not precisely resize a window on the first request. It may be
        // this is a function of decorating the window during a redraw. At any rate because of this
        // unfortunate shortcoming we have to send the event a second time.
        if msg.type_ == self.atoms._NET_MOVERESIZE_WINDOW {
            std::thread::sleep(std::time::Duration::from_millis(50));
            self.conn.send_event(false, self.root, mask, &msg)?.check()?;
            self.conn.flush()?;
            debug!("send_event: win: {}", msg.window);
        }
        Ok(())
    }
}
