use std::fmt;

/// Rectangle in screen pixels. Used for work areas, viewports and window placements alike.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn left(&self) -> i64 {
        self.x as i64
    }

    pub fn top(&self) -> i64 {
        self.y as i64
    }

    /// Right edge, inclusive: the rectangle covers [x, x + w]
    pub fn right(&self) -> i64 {
        self.x as i64 + self.w as i64
    }

    /// Bottom edge, inclusive: the rectangle covers [y, y + h]
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.h as i64
    }

    /// Same rectangle moved by the given offset
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Shrink the size by the frame the window manager draws around a client
    ///
    /// The position is kept as the window manager places the frame's top left corner there.
    /// Sizes never drop below a single pixel.
    pub fn without_frame(&self, insets: &Insets) -> Self {
        let w = self.w.saturating_sub(insets.left + insets.right).max(1);
        let h = self.h.saturating_sub(insets.top + insets.bottom).max(1);
        Self::new(self.x, self.y, w, h)
    }
}

// Implement format! support
impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{} {}x{}", self.x, self.y, self.w, self.h)
    }
}

/// Frame extents the window manager adds around a client window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl From<(u32, u32, u32, u32)> for Insets {
    fn from((left, right, top, bottom): (u32, u32, u32, u32)) -> Self {
        Self { left, right, top, bottom }
    }
}

/// Check whether a window overlaps the viewport
///
/// Both rectangles are treated as closed intervals so a window touching the viewport edge still
/// counts as visible. Only a window strictly outside on at least one axis is rejected.
pub fn is_in_viewport(window: &Rect, viewport: &Rect) -> bool {
    !(window.right() < viewport.left()
        || window.left() > viewport.right()
        || window.bottom() < viewport.top()
        || window.top() > viewport.bottom())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Rect = Rect::new(0, 0, 1920, 1080);

    #[test]
    fn test_contained_window_is_visible() {
        assert!(is_in_viewport(&Rect::new(100, 100, 640, 480), &VIEWPORT));
        assert!(is_in_viewport(&VIEWPORT, &VIEWPORT));
    }

    #[test]
    fn test_partially_overlapping_window_is_visible() {
        assert!(is_in_viewport(&Rect::new(-300, 500, 600, 200), &VIEWPORT));
        assert!(is_in_viewport(&Rect::new(1800, 1000, 600, 200), &VIEWPORT));
    }

    #[test]
    fn test_touching_edges_is_visible() {
        // Right edge of the window touches the left edge of the viewport
        assert!(is_in_viewport(&Rect::new(-100, 0, 100, 100), &VIEWPORT));
        // Left edge of the window touches the right edge of the viewport
        assert!(is_in_viewport(&Rect::new(1920, 0, 100, 100), &VIEWPORT));
        assert!(is_in_viewport(&Rect::new(0, -50, 100, 50), &VIEWPORT));
        assert!(is_in_viewport(&Rect::new(0, 1080, 100, 50), &VIEWPORT));
    }

    #[test]
    fn test_outside_window_is_not_visible() {
        assert!(!is_in_viewport(&Rect::new(-101, 0, 100, 100), &VIEWPORT));
        assert!(!is_in_viewport(&Rect::new(1921, 0, 100, 100), &VIEWPORT));
        assert!(!is_in_viewport(&Rect::new(0, -51, 100, 50), &VIEWPORT));
        assert!(!is_in_viewport(&Rect::new(0, 1081, 100, 50), &VIEWPORT));

        // Window on the neighbouring viewport of a large desktop
        assert!(!is_in_viewport(&Rect::new(2500, 200, 800, 600), &VIEWPORT));
        assert!(is_in_viewport(&Rect::new(2500, 200, 800, 600), &Rect::new(1920, 0, 1920, 1080)));
    }

    #[test]
    fn test_without_frame() {
        let insets = Insets::from((2, 2, 24, 2));
        assert_eq!(Rect::new(10, 20, 960, 540).without_frame(&insets), Rect::new(10, 20, 956, 514));
        assert_eq!(Rect::new(0, 0, 3, 3).without_frame(&insets), Rect::new(0, 0, 1, 1));
        assert_eq!(Rect::new(0, 0, 3, 3).without_frame(&Insets::default()), Rect::new(0, 0, 3, 3));
    }

    #[test]
    fn test_display() {
        assert_eq!(Rect::new(-5, 10, 640, 480).to_string(), "-5,10 640x480");
    }
}
