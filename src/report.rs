use std::io::Write;

use gory::*;

use crate::{layout::Arrangement, window::Window, Result};

/// Print the candidate windows, one per line
pub fn windows<W: Write>(out: &mut W, windows: &[Window]) -> Result<()> {
    writeln!(
        out,
        "{:<10} {:<3} {:<6} {:<6} {:<5} {:<5} {}",
        "ID".cyan(),
        "DSK".cyan(),
        "X".cyan(),
        "Y".cyan(),
        "W".cyan(),
        "H".cyan(),
        "NAME".cyan()
    )?;
    for window in windows {
        let desktop = window.desktop.map(|x| x.to_string()).unwrap_or_else(|| "-1".to_owned());
        let g = window.geometry;
        writeln!(
            out,
            "{:<10} {:>3} {:<6} {:<6} {:<5} {:<5} {}",
            format!("{:#010x}", window.id),
            desktop,
            g.x,
            g.y,
            g.w,
            g.h,
            window.name
        )?;
    }
    Ok(())
}

/// Print where every window would be placed without moving anything
pub fn arrangement<W: Write>(out: &mut W, windows: &[Window], arrangement: &Arrangement) -> Result<()> {
    if let Some(overflow) = &arrangement.overflow {
        writeln!(out, "{}: {}", "warning".yellow(), overflow)?;
    }
    writeln!(
        out,
        "{:<10} {:<6} {:<6} {:<5} {:<5} {}",
        "ID".cyan(),
        "X".cyan(),
        "Y".cyan(),
        "W".cyan(),
        "H".cyan(),
        "NAME".cyan()
    )?;
    for placement in &arrangement.placements {
        let name = windows.iter().find(|x| x.id == placement.window).map(|x| x.name.as_str()).unwrap_or_default();
        let r = placement.rect;
        writeln!(
            out,
            "{:<10} {:<6} {:<6} {:<5} {:<5} {}",
            format!("{:#010x}", placement.window),
            r.x,
            r.y,
            r.w,
            r.h,
            name
        )?;
    }
    Ok(())
}
