//! Glue between the window system and the layout engine
//!
//! A run queries the window system, filters the windows, computes the layout and then places every
//! window before giving the focus back to the window that had it. Failures abort the run; windows
//! that were already moved stay where they are.
use std::io::Write;

use tracing::{debug, info, warn};

use crate::{
    backend::WindowSystem,
    config::{Config, Mode},
    filter::{filter_windows, is_managed},
    layout::{Arrangement, Layout},
    report,
    window::{Window, WindowId},
    Error, Result,
};

/// Layout computed for the current desktop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub windows: Vec<Window>,
    pub active: Option<WindowId>,
    pub arrangement: Arrangement,
}

/// Windows on the current desktop and viewport that take part in a layout
pub fn candidates<W: WindowSystem + ?Sized>(ws: &W, excludes: &[String]) -> Result<Vec<Window>> {
    let windows = ws.windows()?.into_iter().filter(is_managed).collect::<Vec<_>>();
    debug!("candidates: managed windows: {:?}", windows.iter().map(|x| x.id).collect::<Vec<_>>());

    let desktop = ws.current_desktop()?;
    let viewport = ws.viewport()?;
    debug!("candidates: desktop: {}, viewport: {}", desktop, viewport);

    let windows = filter_windows(windows, desktop, &viewport, excludes);
    debug!("candidates: filtered windows: {:?}", windows.iter().map(|x| x.id).collect::<Vec<_>>());
    Ok(windows)
}

/// Compute the layout for the current desktop without touching any window
pub fn plan<W: WindowSystem + ?Sized>(ws: &W, layout: &Layout, excludes: &[String]) -> Result<Plan> {
    let windows = candidates(ws, excludes)?;
    let active = ws.active_window()?;
    let area = ws.work_area()?;
    debug!("plan: active: {:?}, work area: {}", active, area);

    let arrangement = layout.arrange(&windows, active, &area);
    Ok(Plan { windows, active, arrangement })
}

/// Move every window to its target rectangle then restore the original focus
pub fn apply<W: WindowSystem + ?Sized>(ws: &W, layout: &Layout, plan: &Plan) -> Result<()> {
    if plan.arrangement.placements.is_empty() {
        info!("apply: no windows to arrange");
        return Ok(());
    }
    for placement in &plan.arrangement.placements {
        let Some(window) = plan.windows.iter().find(|x| x.id == placement.window) else {
            warn!("apply: skipping unknown window: {}", placement.window);
            continue;
        };

        // Targets cover the whole frame, the window manager wants the client size
        let insets = ws.frame_extents(window.id)?;
        ws.place(window, placement.rect.without_frame(&insets))?;
        if layout.raises_each() {
            ws.activate(placement.window)?;
        }
    }
    if let Some(active) = plan.active {
        ws.activate(active)?;
    }
    Ok(())
}

/// Execute a full run as configured, printing to `out` in the listing modes
pub fn run<W: WindowSystem + ?Sized, O: Write>(ws: &W, config: &Config, out: &mut O) -> Result<()> {
    if config.mode == Mode::List {
        let windows = candidates(ws, &config.excludes)?;
        return report::windows(out, &windows);
    }

    let layout = config.layout.ok_or_else(|| Error::usage("no layout was given"))?;
    let plan = plan(ws, &layout, &config.excludes)?;
    match config.mode {
        Mode::DryRun => report::arrangement(out, &plan.windows, &plan.arrangement),
        _ => apply(ws, &layout, &plan),
    }
}
