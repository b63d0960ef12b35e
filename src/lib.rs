//! Window manager core for a retro desktop, plus a terminal host for it.
//!
//! [`window::WindowManager`] owns every window's state: opening and closing,
//! minimize/maximize/restore, the z-order and active window, and the drag and
//! resize sessions driven by pointer events. Geometry is in viewport units
//! (host pixels divided by the zoom factor).

pub mod cli;
pub mod clock;
pub mod constants;
pub mod desktop;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod layout;
pub mod taskbar;
pub mod theme;
pub mod tracing_sub;
mod ui;
pub mod window;

pub use error::{DesktopError, Result};
pub use layout::floating::{ChromeLayout, ResizeEdge};
pub use layout::placement::{SizingPolicy, SizingTable};
pub use layout::{Breakpoints, DeviceClass, Point, Rect, Size, ViewportSize};
pub use window::decorator::HeaderAction;
pub use window::registry::OpenOutcome;
pub use window::{
    DesktopConfig, PointerEvent, PointerKind, PointerTarget, WindowEntity, WindowId,
    WindowManager, WindowSpec,
};
