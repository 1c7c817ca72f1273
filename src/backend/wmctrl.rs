use std::process::Command;

use tracing::debug;

use super::WindowSystem;
use crate::{
    geometry::{Insets, Rect},
    window::{Window, WindowId},
    Error, Result,
};

const WMCTRL: &str = "wmctrl";
const XDOTOOL: &str = "xdotool";

/// Backend driving the window manager through the `wmctrl` and `xdotool` command line tools
///
/// Neither tool reports frame extents so windows are sized as if undecorated.
#[derive(Debug, Default)]
pub struct Wmctrl;

impl Wmctrl {
    pub fn new() -> Self {
        Self
    }

    fn current_desktop_line(&self) -> Result<DesktopLine> {
        let output = run(WMCTRL, &["-d"])?;
        let desktops = parse_desktops(&output)?;
        desktops
            .into_iter()
            .find(|x| x.current)
            .ok_or(Error::UnexpectedOutput { program: WMCTRL, output })
    }

    fn display_geometry(&self) -> Result<(u32, u32)> {
        let output = run(XDOTOOL, &["getdisplaygeometry"])?;
        let mut values = output.split_whitespace().map(|x| x.parse::<u32>());
        match (values.next(), values.next()) {
            (Some(Ok(w)), Some(Ok(h))) => Ok((w, h)),
            _ => Err(Error::UnexpectedOutput { program: XDOTOOL, output }),
        }
    }
}

impl WindowSystem for Wmctrl {
    fn windows(&self) -> Result<Vec<Window>> {
        let (vx, vy) = self.current_desktop_line()?.viewport.unwrap_or((0, 0));
        let output = run(WMCTRL, &["-lG"])?;
        let mut windows = parse_windows(&output)?;
        for window in windows.iter_mut() {
            window.geometry = window.geometry.translate(vx, vy);
            debug!("windows: {:?}", window);
        }
        Ok(windows)
    }

    fn active_window(&self) -> Result<Option<WindowId>> {
        // xdotool fails when nothing has the focus
        let output = match run(XDOTOOL, &["getactivewindow"]) {
            Ok(output) => output,
            Err(Error::CommandFailed { stderr, .. }) => {
                debug!("active_window: none: {}", stderr);
                return Ok(None);
            },
            Err(err) => return Err(err),
        };
        match output.trim().parse::<WindowId>() {
            Ok(win) => Ok(Some(win)),
            Err(_) => Err(Error::UnexpectedOutput { program: XDOTOOL, output }),
        }
    }

    fn current_desktop(&self) -> Result<u32> {
        Ok(self.current_desktop_line()?.index)
    }

    fn viewport(&self) -> Result<Rect> {
        let (x, y) = self.current_desktop_line()?.viewport.unwrap_or((0, 0));
        let (w, h) = self.display_geometry()?;
        Ok(Rect::new(x, y, w, h))
    }

    fn work_area(&self) -> Result<Rect> {
        let desktop = self.current_desktop_line()?;
        desktop.work_area.ok_or_else(|| Error::UnexpectedOutput {
            program: WMCTRL,
            output: format!("no work area for desktop {}", desktop.index),
        })
    }

    fn frame_extents(&self, _: WindowId) -> Result<Insets> {
        Ok(Insets::default())
    }

    fn place(&self, window: &Window, rect: Rect) -> Result<()> {
        // `wmctrl -lG` doesn't report window states so both are always cleared
        let id = format!("{:#010x}", window.id);
        run(WMCTRL, &["-ir", &id, "-b", "remove,maximized_vert,maximized_horz"])?;
        run(WMCTRL, &["-ir", &id, "-b", "remove,fullscreen"])?;
        let geometry = format!("0,{},{},{},{}", rect.x, rect.y, rect.w, rect.h);
        run(WMCTRL, &["-ir", &id, "-e", &geometry])?;
        debug!("place: id: {}, rect: {}", id, rect);
        Ok(())
    }

    fn activate(&self, window: WindowId) -> Result<()> {
        run(XDOTOOL, &["windowactivate", &window.to_string()])?;
        Ok(())
    }
}

/// Run the given tool and return its standard output
fn run(program: &'static str, args: &[&str]) -> Result<String> {
    debug!("run: {} {}", program, args.join(" "));
    let output = Command::new(program).args(args).output().map_err(|source| Error::Spawn { program, source })?;
    if !output.status.success() {
        return Err(Error::CommandFailed {
            program,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// One line of `wmctrl -d`
#[derive(Debug, Clone, PartialEq, Eq)]
struct DesktopLine {
    index: u32,
    current: bool,
    viewport: Option<(i32, i32)>,
    work_area: Option<Rect>,
}

// Split off the first `n` whitespace separated fields and return the remainder of the line
fn split_fields(line: &str, n: usize) -> Option<(Vec<&str>, &str)> {
    let mut fields = Vec::with_capacity(n);
    let mut rest = line.trim_start();
    while fields.len() < n {
        if rest.is_empty() {
            return None;
        }
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        fields.push(&rest[..end]);
        rest = rest[end..].trim_start();
    }
    Some((fields, rest))
}

fn parse_pair<T: std::str::FromStr>(val: &str, sep: char) -> Option<(T, T)> {
    let (a, b) = val.split_once(sep)?;
    Some((a.parse().ok()?, b.parse().ok()?))
}

// Value following the given label, e.g. `0,0` after `VP:`
fn labeled<'a>(fields: &[&'a str], label: &str) -> Option<&'a str> {
    fields.iter().position(|x| *x == label).and_then(|i| fields.get(i + 1)).copied()
}

/// Parse `wmctrl -d` output, e.g.
/// `0  * DG: 3840x1080  VP: 1920,0  WA: 0,27 1920x1053  Workspace 1`
fn parse_desktops(output: &str) -> Result<Vec<DesktopLine>> {
    let unexpected = |line: &str| Error::UnexpectedOutput { program: WMCTRL, output: line.to_owned() };
    let mut desktops = vec![];
    for line in output.lines().filter(|x| !x.trim().is_empty()) {
        let fields = line.split_whitespace().collect::<Vec<_>>();
        let index = fields.first().and_then(|x| x.parse::<u32>().ok()).ok_or_else(|| unexpected(line))?;
        let current = fields.get(1) == Some(&"*");
        let viewport = labeled(&fields, "VP:").and_then(|x| parse_pair::<i32>(x, ','));
        let work_area = labeled(&fields, "WA:").and_then(|origin| {
            let i = fields.iter().position(|x| *x == "WA:")?;
            let (x, y) = parse_pair::<i32>(origin, ',')?;
            let (w, h) = parse_pair::<u32>(fields.get(i + 2)?, 'x')?;
            Some(Rect::new(x, y, w, h))
        });
        if current && work_area.is_none() {
            return Err(unexpected(line));
        }
        desktops.push(DesktopLine { index, current, viewport, work_area });
    }
    Ok(desktops)
}

/// Parse `wmctrl -lG` output, e.g.
/// `0x03a00007  0 0    27   1920 1053 host Terminal - ~`
///
/// Desktop `-1` marks a sticky window which maps to no desktop.
fn parse_windows(output: &str) -> Result<Vec<Window>> {
    let mut windows = vec![];
    for line in output.lines().filter(|x| !x.trim().is_empty()) {
        let window = parse_window(line).ok_or_else(|| Error::UnexpectedOutput {
            program: WMCTRL,
            output: line.to_owned(),
        })?;
        windows.push(window);
    }
    Ok(windows)
}

fn parse_window(line: &str) -> Option<Window> {
    // The host column may be the last one when the title is empty
    let (fields, name) = split_fields(line, 7).or_else(|| split_fields(line, 6).map(|(x, _)| (x, "")))?;
    let id = WindowId::from_str_radix(fields[0].trim_start_matches("0x"), 16).ok()?;
    let desktop = match fields[1].parse::<i64>().ok()? {
        -1 => None,
        x => Some(u32::try_from(x).ok()?),
    };
    let geometry = Rect::new(
        fields[2].parse().ok()?,
        fields[3].parse().ok()?,
        fields[4].parse().ok()?,
        fields[5].parse().ok()?,
    );
    Some(Window::new(id, desktop, name, geometry))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const DESKTOPS: &str = "\
0  - DG: 3840x1080  VP: N/A  WA: N/A  Workspace 1
1  * DG: 3840x1080  VP: 1920,0  WA: 0,27 1920x1053  Workspace 2
";

    const WINDOWS: &str = "\
0x01e00003 -1 0    0    1920 27   host xfce4-panel
0x03a00007  1 10   60   800  600  host Terminal - ~/src
0x04200001  0 2000 100  640  480  host Mozilla Firefox
0x04400002  1 300  200  300  200  host
";

    #[test]
    fn test_parse_desktops() {
        let desktops = parse_desktops(DESKTOPS).unwrap();
        assert_eq!(
            desktops,
            vec![
                DesktopLine { index: 0, current: false, viewport: None, work_area: None },
                DesktopLine {
                    index: 1,
                    current: true,
                    viewport: Some((1920, 0)),
                    work_area: Some(Rect::new(0, 27, 1920, 1053)),
                },
            ]
        );
    }

    #[test]
    fn test_parse_desktops_rejects_garbage() {
        assert!(matches!(parse_desktops("Workspace 1\n"), Err(Error::UnexpectedOutput { .. })));
        let no_work_area = "0  * DG: 1920x1080  VP: 0,0  Workspace 1\n";
        assert!(matches!(parse_desktops(no_work_area), Err(Error::UnexpectedOutput { .. })));
        assert_eq!(parse_desktops("\n").unwrap(), vec![]);
    }

    #[test]
    fn test_parse_windows() {
        let windows = parse_windows(WINDOWS).unwrap();
        assert_eq!(
            windows,
            vec![
                Window::new(0x01e00003, None, "xfce4-panel", Rect::new(0, 0, 1920, 27)),
                Window::new(0x03a00007, Some(1), "Terminal - ~/src", Rect::new(10, 60, 800, 600)),
                Window::new(0x04200001, Some(0), "Mozilla Firefox", Rect::new(2000, 100, 640, 480)),
                Window::new(0x04400002, Some(1), "", Rect::new(300, 200, 300, 200)),
            ]
        );
    }

    #[test]
    fn test_parse_windows_rejects_garbage() {
        assert!(matches!(parse_windows("0x01 zero 0 0 1 1 host x\n"), Err(Error::UnexpectedOutput { .. })));
        assert!(matches!(parse_windows("0x01 0 0\n"), Err(Error::UnexpectedOutput { .. })));
        assert!(matches!(parse_windows("nothex 0 0 0 1 1 host x\n"), Err(Error::UnexpectedOutput { .. })));
    }

    #[test]
    fn test_split_fields() {
        assert_eq!(split_fields("  a b   c d e", 3), Some((vec!["a", "b", "c"], "d e")));
        assert_eq!(split_fields("a b", 2), Some((vec!["a", "b"], "")));
        assert_eq!(split_fields("a", 2), None);
    }
}
