//! Command line surface and the validated run configuration built from it
use clap::{builder::PossibleValuesParser, crate_description, crate_version, Arg, ArgAction, ArgMatches, Command};

use crate::{
    backend::BackendKind,
    layout::{GridSize, Layout},
    Error, Result,
};

// Layout flags as (flag, layout name) pairs
const LAYOUT_FLAGS: [(&str, &str); 9] = [
    ("cascade", "cascade"),
    ("horizontal", "hstack"),
    ("vertical", "vstack"),
    ("left", "lmain"),
    ("right", "rmain"),
    ("top", "tmain"),
    ("bottom", "bmain"),
    ("grid", "rowgrid"),
    ("colgrid", "colgrid"),
];

const LAYOUT_HELP: &str = "\
Layouts:
    cascade      Cascade windows ending on the active window
    hstack       Tile windows side by side
    vstack       Tile windows on top of each other
    tmain        Active window on the top half, the rest below
    bmain        Active window on the bottom half, the rest above
    lmain        Active window on the left half, the rest to the right
    rmain        Active window on the right half, the rest to the left
    rowgridRxC   R x C grid filled row by row, e.g. rowgrid2x3
    colgridRxC   R x C grid filled column by column, e.g. colgrid3x2
    rowgridRC    Short form of rowgridRxC, R and C between 2 and 4
    colgridRC    Short form of colgridRxC, R and C between 2 and 4
    rowgrid      Row by row grid sized by --rows and --cols, same as --grid
    colgrid      Column by column grid sized by --rows and --cols, same as --colgrid";

/// What a run should do once the layout is known
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Move and resize the windows
    Apply,
    /// Print the computed placements only
    DryRun,
    /// Print the windows that would be arranged
    List,
}

/// Validated options for a single run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Layout to apply, only absent when listing
    pub layout: Option<Layout>,
    pub excludes: Vec<String>,
    pub backend: BackendKind,
    pub mode: Mode,
    pub debug: bool,
}

/// Build the command line interface
pub fn cli() -> Command {
    let mut cmd = Command::new("wmlayout")
        .about(crate_description!())
        .version(crate_version!())
        .after_help(LAYOUT_HELP)
        .arg(Arg::new("layout").value_name("LAYOUT").help("Layout to arrange the windows in"))
        .arg(Arg::new("debug").short('d').long("debug").action(ArgAction::SetTrue).help("Enable debug logging"))
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .value_name("PATTERN")
                .action(ArgAction::Append)
                .help("Leave windows whose name contains PATTERN alone, may be repeated"),
        )
        .arg(
            Arg::new("dry-run")
                .short('n')
                .long("dry-run")
                .action(ArgAction::SetTrue)
                .help("Print the computed placements without moving any window"),
        )
        .arg(
            Arg::new("list")
                .short('l')
                .long("list")
                .action(ArgAction::SetTrue)
                .conflicts_with("dry-run")
                .help("List the windows that would be arranged and exit"),
        )
        .arg(
            Arg::new("backend")
                .long("backend")
                .value_name("BACKEND")
                .env("WMLAYOUT_BACKEND")
                .default_value("ewmh")
                .value_parser(PossibleValuesParser::new(BackendKind::NAMES))
                .help("Talk EWMH directly or go through wmctrl and xdotool"),
        )
        .arg(
            Arg::new("rows")
                .long("rows")
                .visible_alias("row")
                .value_name("N")
                .value_parser(clap::value_parser!(u32).range(1..))
                .help("Number of grid rows"),
        )
        .arg(
            Arg::new("cols")
                .long("cols")
                .visible_alias("col")
                .value_name("N")
                .value_parser(clap::value_parser!(u32).range(1..))
                .help("Number of grid columns"),
        );

    for (flag, name) in LAYOUT_FLAGS {
        cmd = cmd.arg(
            Arg::new(flag)
                .long(flag)
                .action(ArgAction::SetTrue)
                .help_heading("Layout flags")
                .help(format!("Same as the {} layout", name)),
        );
    }
    cmd
}

impl Config {
    /// Validate the parsed command line
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let mode = if matches.get_flag("list") {
            Mode::List
        } else if matches.get_flag("dry-run") {
            Mode::DryRun
        } else {
            Mode::Apply
        };

        // Exactly one layout may be selected, either by name or by flag
        let mut selected = vec![];
        if let Some(name) = matches.get_one::<String>("layout") {
            selected.push(name.as_str());
        }
        for (flag, name) in LAYOUT_FLAGS {
            if matches.get_flag(flag) {
                selected.push(name);
            }
        }
        if selected.len() > 1 {
            return Err(Error::usage(format!("layout conflict: {}", selected.join(", "))));
        }

        let rows = matches.get_one::<u32>("rows").copied();
        let cols = matches.get_one::<u32>("cols").copied();
        let layout = match selected.first() {
            Some(name) => Some(resolve_layout(name, rows, cols)?),
            None if mode == Mode::List => None,
            None => return Err(Error::usage("no layout was given")),
        };

        let backend = match matches.get_one::<String>("backend") {
            Some(name) => name.parse()?,
            None => BackendKind::default(),
        };

        Ok(Config {
            layout,
            excludes: matches.get_many::<String>("exclude").unwrap_or_default().cloned().collect(),
            backend,
            mode,
            debug: matches.get_flag("debug"),
        })
    }
}

// Turn a layout name plus the optional grid size into a layout
fn resolve_layout(name: &str, rows: Option<u32>, cols: Option<u32>) -> Result<Layout> {
    let sized = match name.to_lowercase().as_str() {
        "rowgrid" => Some(Layout::RowGrid as fn(GridSize) -> Layout),
        "colgrid" => Some(Layout::ColGrid as fn(GridSize) -> Layout),
        _ => None,
    };
    match (sized, rows, cols) {
        (Some(grid), Some(rows), Some(cols)) => Ok(grid(GridSize::new(rows, cols)?)),
        (Some(_), _, _) => Err(Error::usage(format!("{} needs both --rows and --cols", name))),
        (None, None, None) => name.parse(),
        (None, _, _) => Err(Error::usage(format!("--rows and --cols don't apply to {}", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config> {
        let mut argv = vec!["wmlayout"];
        argv.extend_from_slice(args);
        let matches = cli().try_get_matches_from(argv).map_err(|x| Error::usage(x.to_string()))?;
        Config::from_matches(&matches)
    }

    fn grid(rows: u32, cols: u32) -> GridSize {
        GridSize::new(rows, cols).unwrap()
    }

    #[test]
    fn test_cli_is_valid() {
        cli().debug_assert();
    }

    #[test]
    fn test_layout_by_name() {
        let config = parse(&["-d", "-e", "conky", "--exclude", "Firefox", "tmain"]).unwrap();
        assert_eq!(
            config,
            Config {
                layout: Some(Layout::TMain),
                excludes: vec!["conky".to_owned(), "Firefox".to_owned()],
                backend: BackendKind::Ewmh,
                mode: Mode::Apply,
                debug: true,
            }
        );
        assert_eq!(parse(&["colgrid34"]).unwrap().layout, Some(Layout::ColGrid(grid(3, 4))));
    }

    #[test]
    fn test_layout_by_flag() {
        assert_eq!(parse(&["--horizontal"]).unwrap().layout, Some(Layout::HStack));
        assert_eq!(parse(&["--left"]).unwrap().layout, Some(Layout::LMain));
        assert_eq!(parse(&["--grid", "--row", "2", "--col", "5"]).unwrap().layout, Some(Layout::RowGrid(grid(2, 5))));
    }

    #[test]
    fn test_sized_grids() {
        let config = parse(&["rowgrid", "--rows", "1", "--cols", "6"]).unwrap();
        assert_eq!(config.layout, Some(Layout::RowGrid(grid(1, 6))));
        let config = parse(&["colgrid", "--rows", "3", "--cols", "2"]).unwrap();
        assert_eq!(config.layout, Some(Layout::ColGrid(grid(3, 2))));
        assert!(matches!(parse(&["rowgrid", "--rows", "2"]), Err(Error::Usage(_))));
        assert!(matches!(parse(&["--grid"]), Err(Error::Usage(_))));
        assert!(matches!(parse(&["rowgrid", "--rows", "0", "--cols", "2"]), Err(Error::Usage(_))));
        assert!(matches!(parse(&["rowgrid", "--rows", "65536", "--cols", "65536"]), Err(Error::Usage(_))));
    }

    #[test]
    fn test_colgrid_flag() {
        let config = parse(&["--colgrid", "--rows", "2", "--cols", "3"]).unwrap();
        assert_eq!(config.layout, Some(Layout::ColGrid(grid(2, 3))));
        assert!(matches!(parse(&["--colgrid", "--grid", "--rows", "2", "--cols", "3"]), Err(Error::Usage(_))));
    }

    #[test]
    fn test_grid_names_with_separator() {
        assert_eq!(parse(&["rowgrid2x3"]).unwrap().layout, Some(Layout::RowGrid(grid(2, 3))));
        assert_eq!(parse(&["colgrid1x5"]).unwrap().layout, Some(Layout::ColGrid(grid(1, 5))));
        assert!(matches!(parse(&["rowgrid2x3", "--rows", "2", "--cols", "3"]), Err(Error::Usage(_))));
    }

    #[test]
    fn test_rows_and_cols_only_for_sized_grids() {
        assert!(matches!(parse(&["hstack", "--rows", "2"]), Err(Error::Usage(_))));
        assert!(matches!(parse(&["rowgrid22", "--rows", "2", "--cols", "2"]), Err(Error::Usage(_))));
    }

    #[test]
    fn test_conflicts() {
        let err = parse(&["--cascade", "--vertical"]).unwrap_err();
        assert_eq!(err.to_string(), "layout conflict: cascade, vstack");
        assert!(matches!(parse(&["hstack", "--top"]), Err(Error::Usage(_))));
        assert!(matches!(parse(&[]), Err(Error::Usage(x)) if x == "no layout was given"));
        assert!(matches!(parse(&["--list", "--dry-run", "hstack"]), Err(Error::Usage(_))));
    }

    #[test]
    fn test_unknown_layout() {
        assert!(matches!(parse(&["spiral"]), Err(Error::UnknownLayout(x)) if x == "spiral"));
    }

    #[test]
    fn test_modes_and_backend() {
        let config = parse(&["--list"]).unwrap();
        assert_eq!((config.mode, config.layout), (Mode::List, None));
        assert_eq!(parse(&["-n", "cascade"]).unwrap().mode, Mode::DryRun);
        assert_eq!(parse(&["--backend", "wmctrl", "cascade"]).unwrap().backend, BackendKind::Wmctrl);
        assert!(matches!(parse(&["--backend", "xcb", "cascade"]), Err(Error::Usage(_))));
    }
}
