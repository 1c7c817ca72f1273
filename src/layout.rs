//! Layout engine
//!
//! Each layout maps a set of windows, the work area and the active window to one target rectangle
//! per window. Layouts are pure: nothing is queried or moved here, the driver applies the result.
//!
//! The active window is treated as the main window. Windows are first ordered with the active
//! one last (see [`order_with_active_last`]) so cascades end on it and grids fill it in last.
//! All sizes use truncating integer division; leftover pixels on the right and bottom edges are
//! left unused.
use std::{fmt, str::FromStr};

use tracing::{debug, warn};

use crate::{
    geometry::Rect,
    window::{order_with_active_last, Window, WindowId},
    Error, Result,
};

// Cascade divides the work area into a virtual grid of CASCADE_GRID x CASCADE_GRID cells of
// which each window covers CASCADE_WINDOW x CASCADE_WINDOW cells.
const CASCADE_GRID: u32 = 16;
const CASCADE_WINDOW: u32 = 10;

// Grid dimensions accepted in names such as `rowgrid23`
const NAMED_GRID_MIN: u32 = 2;
const NAMED_GRID_MAX: u32 = 4;

/// Rows and columns of a grid layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    rows: u32,
    cols: u32,
}

impl GridSize {
    pub fn new(rows: u32, cols: u32) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::usage(format!("grid needs at least one row and column, got {}x{}", rows, cols)));
        }
        if rows.checked_mul(cols).is_none() {
            return Err(Error::usage(format!("grid of {}x{} has too many cells", rows, cols)));
        }
        Ok(Self { rows, cols })
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Number of cells, never zero and never overflowing
    pub fn cells(&self) -> u32 {
        self.rows * self.cols
    }
}

/// Layout patterns windows can be arranged in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Diagonal staircase of equally sized windows ending on the active window
    Cascade,
    /// Side by side columns spanning the full height
    HStack,
    /// Stacked rows spanning the full width
    VStack,
    /// Active window on the top half, the rest in columns below
    TMain,
    /// Active window on the bottom half, the rest in columns above
    BMain,
    /// Active window on the left half, the rest in rows to the right
    LMain,
    /// Active window on the right half, the rest in rows to the left
    RMain,
    /// Fixed grid filled row by row
    RowGrid(GridSize),
    /// Fixed grid filled column by column
    ColGrid(GridSize),
}

/// Target rectangle for a single window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub window: WindowId,
    pub rect: Rect,
}

/// A grid received more windows than it has cells; the extra windows share cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityWarning {
    pub windows: usize,
    pub cells: u32,
}

impl fmt::Display for CapacityWarning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "not enough space for {} windows in {} cells, windows will overlap", self.windows, self.cells)
    }
}

/// Result of a layout computation, placements are in the order they should be applied
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arrangement {
    pub placements: Vec<Placement>,
    pub overflow: Option<CapacityWarning>,
}

impl Arrangement {
    /// Target rectangle of the given window if it was placed
    pub fn rect_of(&self, window: WindowId) -> Option<Rect> {
        self.placements.iter().find(|x| x.window == window).map(|x| x.rect)
    }

    fn place(&mut self, window: &Window, rect: Rect) {
        debug!("place: id: {}, rect: {}", window.id, rect);
        self.placements.push(Placement { window: window.id, rect });
    }
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

/// Split `area` into `count` equally sized strips laid out along `axis`
fn strips(area: Rect, count: usize, axis: Axis) -> impl Iterator<Item = Rect> {
    let count = count.max(1) as u32;
    (0..count).map(move |i| match axis {
        Axis::Horizontal => {
            let w = area.w / count;
            Rect::new(area.x + (i * w) as i32, area.y, w, area.h)
        },
        Axis::Vertical => {
            let h = area.h / count;
            Rect::new(area.x, area.y + (i * h) as i32, area.w, h)
        },
    })
}

impl Layout {
    /// Compute the target rectangle of every window
    ///
    /// ### Arguments
    /// * `windows` - windows to arrange in discovery order
    /// * `active` - id of the active window, treated as the main window
    /// * `area` - work area to arrange the windows in
    pub fn arrange(&self, windows: &[Window], active: Option<WindowId>, area: &Rect) -> Arrangement {
        let mut arrangement = Arrangement::default();
        if windows.is_empty() {
            return arrangement;
        }
        let ordered = order_with_active_last(windows, active);
        debug!("arrange: layout: {}, area: {}, windows: {}", self, area, ordered.len());

        match *self {
            Layout::Cascade => cascade(&mut arrangement, &ordered, area),
            Layout::HStack => {
                for (window, rect) in ordered.iter().zip(strips(*area, ordered.len(), Axis::Horizontal)) {
                    arrangement.place(window, rect);
                }
            },
            Layout::VStack => {
                for (window, rect) in ordered.iter().zip(strips(*area, ordered.len(), Axis::Vertical)) {
                    arrangement.place(window, rect);
                }
            },
            Layout::TMain | Layout::BMain | Layout::LMain | Layout::RMain => {
                main_and_rest(&mut arrangement, &ordered, self.halves(area))
            },
            Layout::RowGrid(grid) => grid_cells(&mut arrangement, &ordered, area, grid, true),
            Layout::ColGrid(grid) => grid_cells(&mut arrangement, &ordered, area, grid, false),
        }
        arrangement
    }

    /// True when each window should be raised right after being placed
    ///
    /// Only matters for layouts where windows overlap on purpose.
    pub fn raises_each(&self) -> bool {
        matches!(self, Layout::Cascade)
    }

    // Main window half, half for the rest and the axis the rest is split along
    fn halves(&self, area: &Rect) -> (Rect, Rect, Axis) {
        let (hw, hh) = (area.w / 2, area.h / 2);
        let top = Rect::new(area.x, area.y, area.w, hh);
        let bottom = Rect::new(area.x, area.y + hh as i32, area.w, hh);
        let left = Rect::new(area.x, area.y, hw, area.h);
        let right = Rect::new(area.x + hw as i32, area.y, hw, area.h);
        match self {
            Layout::BMain => (bottom, top, Axis::Horizontal),
            Layout::LMain => (left, right, Axis::Vertical),
            Layout::RMain => (right, left, Axis::Vertical),
            _ => (top, bottom, Axis::Horizontal),
        }
    }
}

fn cascade(arrangement: &mut Arrangement, ordered: &[&Window], area: &Rect) {
    let xstep = area.w / CASCADE_GRID;
    let ystep = area.h / CASCADE_GRID;
    let (w, h) = (CASCADE_WINDOW * xstep, CASCADE_WINDOW * ystep);

    // Offsets spread the free cells evenly between the first and the last window
    let (dx, dy) = match ordered.len() {
        0 | 1 => (0, 0),
        n => {
            let free = CASCADE_GRID - 2 - CASCADE_WINDOW;
            (free * xstep / (n as u32 - 1), free * ystep / (n as u32 - 1))
        },
    };

    let (mut x, mut y) = (area.x + xstep as i32, area.y + ystep as i32);
    for window in ordered {
        arrangement.place(window, Rect::new(x, y, w, h));
        x += dx as i32;
        y += dy as i32;
    }
}

// The last ordered window takes the main half, the others share the remaining half.
fn main_and_rest(arrangement: &mut Arrangement, ordered: &[&Window], (main, rest, axis): (Rect, Rect, Axis)) {
    let Some((last, others)) = ordered.split_last() else {
        return;
    };
    arrangement.place(last, main);
    for (window, rect) in others.iter().zip(strips(rest, others.len(), axis)) {
        arrangement.place(window, rect);
    }
}

fn grid_cells(arrangement: &mut Arrangement, ordered: &[&Window], area: &Rect, grid: GridSize, row_major: bool) {
    let cells = grid.cells();
    if ordered.len() > cells as usize {
        let overflow = CapacityWarning { windows: ordered.len(), cells };
        warn!("{}", overflow);
        arrangement.overflow = Some(overflow);
    }

    let (w, h) = (area.w / grid.cols, area.h / grid.rows);
    for (i, window) in ordered.iter().enumerate() {
        let i = i as u32 % cells;
        let (row, col) = if row_major { (i / grid.cols, i % grid.cols) } else { (i % grid.rows, i / grid.rows) };
        arrangement.place(window, Rect::new(area.x + (col * w) as i32, area.y + (row * h) as i32, w, h));
    }
}

// Implement format! support
impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Layout::RowGrid(grid) => write!(f, "rowgrid{}x{}", grid.rows, grid.cols),
            Layout::ColGrid(grid) => write!(f, "colgrid{}x{}", grid.rows, grid.cols),
            _ => write!(f, "{}", format!("{:?}", self).to_lowercase()),
        }
    }
}

// Parse the dimensions off a name such as `rowgrid2x3` or the compact `rowgrid23`
//
// The compact form takes two single digits within the named range while the `RxC` form takes
// any valid grid so every displayed layout name parses back.
fn named_grid(dims: &str) -> Option<GridSize> {
    if let Some((rows, cols)) = dims.split_once('x') {
        let rows = rows.parse::<u32>().ok()?;
        let cols = cols.parse::<u32>().ok()?;
        return GridSize::new(rows, cols).ok();
    }
    let mut digits = dims.chars().map(|x| x.to_digit(10));
    let (rows, cols) = match (digits.next(), digits.next(), digits.next()) {
        (Some(Some(rows)), Some(Some(cols)), None) => (rows, cols),
        _ => return None,
    };
    let range = NAMED_GRID_MIN..=NAMED_GRID_MAX;
    if !range.contains(&rows) || !range.contains(&cols) {
        return None;
    }
    GridSize::new(rows, cols).ok()
}

// Convert from &str to Layout
impl FromStr for Layout {
    type Err = Error;

    fn from_str(val: &str) -> Result<Self> {
        let layout = match val.to_lowercase().as_ref() {
            "cascade" => Some(Layout::Cascade),
            "hstack" => Some(Layout::HStack),
            "vstack" => Some(Layout::VStack),
            "tmain" => Some(Layout::TMain),
            "bmain" => Some(Layout::BMain),
            "lmain" => Some(Layout::LMain),
            "rmain" => Some(Layout::RMain),
            name => {
                if let Some(dims) = name.strip_prefix("rowgrid") {
                    named_grid(dims).map(Layout::RowGrid)
                } else if let Some(dims) = name.strip_prefix("colgrid") {
                    named_grid(dims).map(Layout::ColGrid)
                } else {
                    None
                }
            },
        };
        layout.ok_or_else(|| Error::UnknownLayout(val.to_owned()))
    }
}
