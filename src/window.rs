use bitflags::bitflags;

use crate::geometry::Rect;

/// X11 window id as handed out by the window manager
pub type WindowId = u32;

bitflags! {
    /// Window type and state hints that matter when deciding whether a window takes part in a layout
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct WindowFlags: u32 {
        const DESKTOP    = 1 << 0;
        const DOCK       = 1 << 1;
        const HIDDEN     = 1 << 2;
        const STICKY     = 1 << 3;
        const MAXIMIZED  = 1 << 4;
        const FULLSCREEN = 1 << 5;

        /// Never laid out: desktop backgrounds, panels, minimized and sticky windows
        const UNMANAGED = Self::DESKTOP.bits() | Self::DOCK.bits() | Self::HIDDEN.bits() | Self::STICKY.bits();
    }
}

/// Snapshot of a client window populated by a backend
///
/// The layout code only ever reads these and hands back ids; windows are owned by the window
/// manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    pub id: WindowId,
    /// Desktop index, `None` for windows shown on all desktops
    pub desktop: Option<u32>,
    pub name: String,
    pub flags: WindowFlags,
    /// Frame position in desktop coordinates, i.e. including the current viewport offset
    pub geometry: Rect,
}

impl Window {
    pub fn new(id: WindowId, desktop: Option<u32>, name: impl Into<String>, geometry: Rect) -> Self {
        Self {
            id,
            desktop,
            name: name.into(),
            flags: WindowFlags::empty(),
            geometry,
        }
    }

    pub fn with_flags(mut self, flags: WindowFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// Order windows so the active one comes last
///
/// Stable partition: every other window keeps its relative order. When `active` isn't part of
/// the set the order is left untouched.
pub fn order_with_active_last(windows: &[Window], active: Option<WindowId>) -> Vec<&Window> {
    let mut ordered = Vec::with_capacity(windows.len());
    let mut last = None;
    for window in windows {
        if Some(window.id) == active && last.is_none() {
            last = Some(window);
        } else {
            ordered.push(window);
        }
    }
    ordered.extend(last);
    ordered
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Window on desktop 0 at the origin, named after its id
    pub(crate) fn win(id: WindowId) -> Window {
        Window::new(id, Some(0), format!("window {}", id), Rect::new(0, 0, 100, 100))
    }

    fn ids(windows: &[&Window]) -> Vec<WindowId> {
        windows.iter().map(|x| x.id).collect()
    }

    #[test]
    fn test_active_moves_to_the_end() {
        let windows = vec![win(1), win(2), win(3), win(4)];
        assert_eq!(ids(&order_with_active_last(&windows, Some(2))), vec![1, 3, 4, 2]);
        assert_eq!(ids(&order_with_active_last(&windows, Some(1))), vec![2, 3, 4, 1]);
        assert_eq!(ids(&order_with_active_last(&windows, Some(4))), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_missing_active_keeps_order() {
        let windows = vec![win(5), win(3), win(9)];
        assert_eq!(ids(&order_with_active_last(&windows, Some(42))), vec![5, 3, 9]);
        assert_eq!(ids(&order_with_active_last(&windows, None)), vec![5, 3, 9]);
    }

    #[test]
    fn test_empty_and_single() {
        assert!(order_with_active_last(&[], Some(1)).is_empty());
        let windows = vec![win(7)];
        assert_eq!(ids(&order_with_active_last(&windows, Some(7))), vec![7]);
    }

    #[test]
    fn test_matches_by_id_not_identity() {
        // A copy of the active window with different attributes still counts as the active one
        let windows = vec![win(1), Window::new(2, Some(3), "renamed", Rect::default()), win(3)];
        let ordered = order_with_active_last(&windows, Some(2));
        assert_eq!(ordered.last().map(|x| x.name.as_str()), Some("renamed"));
        assert_eq!(ids(&ordered), vec![1, 3, 2]);
    }

    #[test]
    fn test_unmanaged_flags() {
        assert!(WindowFlags::UNMANAGED.contains(WindowFlags::DOCK | WindowFlags::STICKY));
        assert!(!WindowFlags::UNMANAGED.intersects(WindowFlags::MAXIMIZED | WindowFlags::FULLSCREEN));
    }
}
