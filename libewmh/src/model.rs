use crate::atoms::AtomCollection;

/// WinState provides an easy way to identify the different window states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinState {
    Above,
    Below,
    DemandsAttention,
    Focused,
    Fullscreen,
    Hidden,
    MaxVert,
    MaxHorz,
    Modal,
    Shaded,
    SkipPager,
    SkipTaskbar,
    Sticky,
    Other(u32),
}

// Convert from u32 to State
impl WinState {
    pub fn from(atoms: &AtomCollection, val: u32) -> WinState {
        match val {
            _ if val == atoms._NET_WM_STATE_ABOVE => WinState::Above,
            _ if val == atoms._NET_WM_STATE_BELOW => WinState::Below,
            _ if val == atoms._NET_WM_STATE_DEMANDS_ATTENTION => WinState::DemandsAttention,
            _ if val == atoms._NET_WM_STATE_FOCUSED => WinState::Focused,
            _ if val == atoms._NET_WM_STATE_FULLSCREEN => WinState::Fullscreen,
            _ if val == atoms._NET_WM_STATE_HIDDEN => WinState::Hidden,
            _ if val == atoms._NET_WM_STATE_MAXIMIZED_VERT => WinState::MaxVert,
            _ if val == atoms._NET_WM_STATE_MAXIMIZED_HORZ => WinState::MaxHorz,
            _ if val == atoms._NET_WM_STATE_MODAL => WinState::Modal,
            _ if val == atoms._NET_WM_STATE_SHADED => WinState::Shaded,
            _ if val == atoms._NET_WM_STATE_SKIP_PAGER => WinState::SkipPager,
            _ if val == atoms._NET_WM_STATE_SKIP_TASKBAR => WinState::SkipTaskbar,
            _ if val == atoms._NET_WM_STATE_STICKY => WinState::Sticky,
            _ => WinState::Other(val),
        }
    }
}

/// WinType provides an easy way to identify the different window types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinType {
    Combo,
    Desktop,
    Dialog,
    DND,
    Dock,
    DropDownMenu,
    Menu,
    Normal,
    Notification,
    PopupMenu,
    Splash,
    Toolbar,
    ToolTip,
    Utility,
    Other(u32),
}

// Convert from u32 to Type
impl WinType {
    pub fn from(atoms: &AtomCollection, val: u32) -> WinType {
        match val {
            _ if val == atoms._NET_WM_WINDOW_TYPE_COMBO => WinType::Combo,
            _ if val == atoms._NET_WM_WINDOW_TYPE_DESKTOP => WinType::Desktop,
            _ if val == atoms._NET_WM_WINDOW_TYPE_DIALOG => WinType::Dialog,
            _ if val == atoms._NET_WM_WINDOW_TYPE_DND => WinType::DND,
            _ if val == atoms._NET_WM_WINDOW_TYPE_DOCK => WinType::Dock,
            _ if val == atoms._NET_WM_WINDOW_TYPE_DROPDOWN_MENU => WinType::DropDownMenu,
            _ if val == atoms._NET_WM_WINDOW_TYPE_MENU => WinType::Menu,
            _ if val == atoms._NET_WM_WINDOW_TYPE_NORMAL => WinType::Normal,
            _ if val == atoms._NET_WM_WINDOW_TYPE_NOTIFICATION => WinType::Notification,
            _ if val == atoms._NET_WM_WINDOW_TYPE_POPUP_MENU => WinType::PopupMenu,
            _ if val == atoms._NET_WM_WINDOW_TYPE_SPLASH => WinType::Splash,
            _ if val == atoms._NET_WM_WINDOW_TYPE_TOOLBAR => WinType::Toolbar,
            _ if val == atoms._NET_WM_WINDOW_TYPE_TOOLTIP => WinType::ToolTip,
            _ if val == atoms._NET_WM_WINDOW_TYPE_UTILITY => WinType::Utility,
            _ => WinType::Other(val),
        }
    }
}

/// Desktop a window lives on as reported by `_NET_WM_DESKTOP`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinDesktop {
    /// Window is shown on every desktop (0xFFFFFFFF)
    All,
    Index(u32),
}

impl From<u32> for WinDesktop {
    fn from(val: u32) -> Self {
        match val {
            u32::MAX => WinDesktop::All,
            _ => WinDesktop::Index(val),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desktop() {
        assert_eq!(WinDesktop::from(u32::MAX), WinDesktop::All);
        assert_eq!(WinDesktop::from(2), WinDesktop::Index(2));
    }
}
