use tracing::trace;

use crate::{
    geometry::{is_in_viewport, Rect},
    window::{Window, WindowFlags},
};

/// Check whether a window may take part in a layout at all
///
/// Desktop backgrounds, docks, minimized windows and windows shown on every desktop are never
/// arranged.
pub fn is_managed(window: &Window) -> bool {
    let managed = window.desktop.is_some() && !window.flags.intersects(WindowFlags::UNMANAGED);
    if !managed {
        trace!("is_managed: skipping id: {}, desktop: {:?}, flags: {:?}", window.id, window.desktop, window.flags);
    }
    managed
}

/// Keep the windows on the given desktop and viewport whose name contains none of the exclude
/// patterns
///
/// Patterns are plain case sensitive substrings. The input order is preserved.
///
/// ### Arguments
/// * `windows` - candidate windows
/// * `desktop` - desktop index the windows must be on
/// * `viewport` - viewport the windows must overlap
/// * `excludes` - window name patterns to leave alone
pub fn filter_windows<S: AsRef<str>>(
    windows: Vec<Window>, desktop: u32, viewport: &Rect, excludes: &[S],
) -> Vec<Window> {
    windows
        .into_iter()
        .filter(|window| {
            if window.desktop != Some(desktop) {
                trace!("filter: id: {} is on desktop {:?}", window.id, window.desktop);
                return false;
            }
            if !is_in_viewport(&window.geometry, viewport) {
                trace!("filter: id: {} at {} is outside {}", window.id, window.geometry, viewport);
                return false;
            }
            if let Some(pattern) = excludes.iter().find(|x| window.name.contains(x.as_ref())) {
                trace!("filter: id: {} name {:?} matches {:?}", window.id, window.name, pattern.as_ref());
                return false;
            }
            true
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::WindowId;

    const VIEWPORT: Rect = Rect::new(0, 0, 1920, 1080);

    fn ids(windows: &[Window]) -> Vec<WindowId> {
        windows.iter().map(|x| x.id).collect()
    }

    fn window(id: WindowId, desktop: u32, name: &str, geometry: Rect) -> Window {
        Window::new(id, Some(desktop), name, geometry)
    }

    #[test]
    fn test_keeps_matching_windows_in_order() {
        let windows = vec![
            window(3, 1, "Terminal", Rect::new(0, 0, 800, 600)),
            window(1, 1, "Firefox", Rect::new(500, 200, 800, 600)),
            window(2, 1, "Files", Rect::new(1000, 400, 800, 600)),
        ];
        let excludes: [&str; 0] = [];
        assert_eq!(ids(&filter_windows(windows, 1, &VIEWPORT, &excludes)), vec![3, 1, 2]);
    }

    #[test]
    fn test_wrong_desktop_is_excluded() {
        let windows = vec![
            window(1, 0, "Terminal", Rect::new(0, 0, 800, 600)),
            window(2, 1, "Terminal", Rect::new(0, 0, 800, 600)),
            Window::new(3, None, "Terminal", Rect::new(0, 0, 800, 600)),
        ];
        let excludes: [&str; 0] = [];
        assert_eq!(ids(&filter_windows(windows, 1, &VIEWPORT, &excludes)), vec![2]);
    }

    #[test]
    fn test_outside_viewport_is_excluded() {
        let windows = vec![
            window(1, 0, "left", Rect::new(-900, 0, 800, 600)),
            window(2, 0, "touching", Rect::new(-800, 0, 800, 600)),
            window(3, 0, "next viewport", Rect::new(2000, 0, 800, 600)),
        ];
        let excludes: [&str; 0] = [];
        assert_eq!(ids(&filter_windows(windows, 0, &VIEWPORT, &excludes)), vec![2]);
    }

    #[test]
    fn test_excluded_names() {
        let windows = vec![
            window(1, 0, "Mozilla Firefox", Rect::new(0, 0, 800, 600)),
            window(2, 0, "conky (host)", Rect::new(0, 0, 800, 600)),
            window(3, 0, "xterm", Rect::new(0, 0, 800, 600)),
            window(4, 0, "Conky", Rect::new(0, 0, 800, 600)),
        ];
        let excludes = vec!["conky".to_owned(), "Firefox".to_owned()];
        assert_eq!(ids(&filter_windows(windows, 0, &VIEWPORT, &excludes)), vec![3, 4]);
    }

    #[test]
    fn test_is_managed() {
        let normal = window(1, 0, "xterm", Rect::default());
        assert!(is_managed(&normal));
        assert!(is_managed(&normal.clone().with_flags(WindowFlags::MAXIMIZED)));
        assert!(!is_managed(&normal.clone().with_flags(WindowFlags::DOCK)));
        assert!(!is_managed(&normal.clone().with_flags(WindowFlags::HIDDEN | WindowFlags::MAXIMIZED)));
        assert!(!is_managed(&normal.clone().with_flags(WindowFlags::STICKY)));
        assert!(!is_managed(&normal.with_flags(WindowFlags::DESKTOP)));
        assert!(!is_managed(&Window::new(2, None, "panel", Rect::default())));
    }
}
