//! Shared crate-wide constants.
//!
//! All lengths are in viewport units (host pixels divided by the zoom
//! factor).

/// Smallest width a window can be resized to.
pub const MIN_WINDOW_WIDTH: f64 = 250.0;

/// Smallest height a window can be resized to.
pub const MIN_WINDOW_HEIGHT: f64 = 200.0;

/// Value the z-index counter starts from. The first window receives
/// `INITIAL_Z_INDEX + 1`.
pub const INITIAL_Z_INDEX: u64 = 10;

/// Height of the taskbar subtracted from the viewport when a window goes
/// fullscreen.
pub const TASKBAR_HEIGHT: f64 = 32.0;

/// Navbar allowance used when centering freshly spawned windows.
pub const NAVBAR_HEIGHT: f64 = 40.0;

/// Per-window cascade step applied to new windows on desktop classes.
pub const CASCADE_STEP: f64 = 30.0;

/// Upper bound of the cascade offset, as a fraction of the smaller of the
/// viewport width and available height.
pub const CASCADE_MAX_FRACTION: f64 = 0.15;

/// Fraction of a window's width that may hang off the left edge while
/// dragging.
pub const DRAG_LEFT_OVERHANG: f64 = 0.75;

/// Fraction of a window's width that must stay visible on the right edge
/// while dragging.
pub const DRAG_RIGHT_RESERVE: f64 = 0.25;

/// Vertical room kept below a dragged window's top edge so its title bar
/// stays reachable.
pub const DRAG_BOTTOM_RESERVE: f64 = 50.0;

/// Default viewport-width breakpoints between device classes.
pub const MOBILE_BREAKPOINT: f64 = 768.0;
pub const MEDIUM_DESKTOP_BREAKPOINT: f64 = 1100.0;
pub const LARGE_DESKTOP_BREAKPOINT: f64 = 1400.0;
