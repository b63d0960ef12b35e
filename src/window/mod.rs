pub mod decorator;
pub mod focus;
pub mod interaction;
pub mod registry;

mod window_manager;

use std::borrow::Borrow;
use std::fmt;

use crate::layout::{Point, Rect, Size};

pub use window_manager::{DesktopConfig, PointerEvent, PointerKind, PointerTarget, WindowManager};

/// External handle of a window. Stable for the window's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(String);

impl WindowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WindowId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for WindowId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for WindowId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// What a collaborator passes to `open`.
#[derive(Debug, Clone)]
pub struct WindowSpec<C> {
    pub id: WindowId,
    pub title: String,
    pub content: C,
    pub size: Option<Size>,
    pub no_scroll: bool,
}

impl<C> WindowSpec<C> {
    pub fn new(id: impl Into<WindowId>, title: impl Into<String>, content: C) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content,
            size: None,
            no_scroll: false,
        }
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_no_scroll(mut self, no_scroll: bool) -> Self {
        self.no_scroll = no_scroll;
        self
    }
}

/// One tracked window. Read-only outside the crate; every change goes
/// through `WindowManager`.
#[derive(Debug, Clone)]
pub struct WindowEntity<C> {
    pub(crate) id: WindowId,
    pub(crate) title: String,
    pub(crate) content: C,
    pub(crate) is_open: bool,
    pub(crate) is_minimized: bool,
    pub(crate) is_fullscreen: bool,
    pub(crate) position: Point,
    pub(crate) size: Size,
    pub(crate) z_index: u64,
    pub(crate) original_position: Option<Point>,
    pub(crate) original_size: Option<Size>,
    pub(crate) no_scroll: bool,
    pub(crate) last_focused: u64,
}

impl<C> WindowEntity<C> {
    pub fn id(&self) -> &WindowId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_minimized(&self) -> bool {
        self.is_minimized
    }

    pub fn is_fullscreen(&self) -> bool {
        self.is_fullscreen
    }

    /// Open and not minimized.
    pub fn is_visible(&self) -> bool {
        self.is_open && !self.is_minimized
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn rect(&self) -> Rect {
        Rect::from_parts(self.position, self.size)
    }

    pub fn z_index(&self) -> u64 {
        self.z_index
    }

    pub fn original_position(&self) -> Option<Point> {
        self.original_position
    }

    pub fn original_size(&self) -> Option<Size> {
        self.original_size
    }

    pub fn no_scroll(&self) -> bool {
        self.no_scroll
    }

    pub fn last_focused(&self) -> u64 {
        self.last_focused
    }
}
