use std::path::PathBuf;

use clap::Parser;
use indoc::indoc;
use tracing::Level;

use crate::constants::{LARGE_DESKTOP_BREAKPOINT, MEDIUM_DESKTOP_BREAKPOINT, MOBILE_BREAKPOINT};
use crate::desktop::Projection;
use crate::error::{DesktopError, Result};
use crate::layout::Breakpoints;
use crate::window::DesktopConfig;

#[derive(Parser, Debug)]
#[command(
    name = "retro-desk",
    version = env!("CARGO_PKG_VERSION"),
    about = "A retro desktop of draggable, resizable windows in the terminal",
    long_about = indoc! {"
        A retro desktop of draggable, resizable windows in the terminal.

        Keys 1-7 open the desktop icons. Drag a title bar to move a window,
        drag its border to resize it, and use the [_] [^] [X] buttons to
        minimize, maximize and close. Tab cycles focus; q or Ctrl-C quits.

        Each terminal cell counts as --cell-width x --cell-height pixels when
        window sizes and device classes are worked out.
    "}
)]
pub struct Cli {
    /// Display zoom factor; pointer positions are divided by it.
    #[arg(long, value_name = "FACTOR", default_value_t = 1.0)]
    pub zoom: f64,

    /// Narrowest viewport width, in pixels, that is no longer mobile.
    #[arg(long, value_name = "PX", default_value_t = MOBILE_BREAKPOINT)]
    pub mobile_breakpoint: f64,

    /// First viewport width treated as a medium desktop.
    #[arg(long, value_name = "PX", default_value_t = MEDIUM_DESKTOP_BREAKPOINT)]
    pub medium_breakpoint: f64,

    /// First viewport width treated as a large desktop.
    #[arg(long, value_name = "PX", default_value_t = LARGE_DESKTOP_BREAKPOINT)]
    pub large_breakpoint: f64,

    /// Pixels per terminal column.
    #[arg(long, value_name = "PX", default_value_t = 8.0)]
    pub cell_width: f64,

    /// Pixels per terminal row.
    #[arg(long, value_name = "PX", default_value_t = 16.0)]
    pub cell_height: f64,

    /// Append log output to this file. Without it, logs are discarded.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Most verbose level written to the log file.
    #[arg(long, value_name = "LEVEL", default_value_t = Level::INFO)]
    pub log_level: Level,
}

/// Validated startup settings.
#[derive(Debug, Clone)]
pub struct HostConfig {
    pub desktop: DesktopConfig,
    pub projection: Projection,
    pub log_file: Option<PathBuf>,
    pub log_level: Level,
}

impl TryFrom<&Cli> for HostConfig {
    type Error = DesktopError;

    fn try_from(cli: &Cli) -> Result<Self> {
        if !cli.zoom.is_finite() || cli.zoom <= 0.0 {
            return Err(DesktopError::InvalidZoom(cli.zoom));
        }
        let breakpoints = Breakpoints::new(
            cli.mobile_breakpoint,
            cli.medium_breakpoint,
            cli.large_breakpoint,
        )?;
        let projection = Projection::new(cli.cell_width, cli.cell_height)?;
        Ok(Self {
            desktop: DesktopConfig {
                breakpoints,
                zoom: cli.zoom,
                ..DesktopConfig::default()
            },
            projection,
            log_file: cli.log_file.clone(),
            log_level: cli.log_level,
        })
    }
}
