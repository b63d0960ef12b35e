pub mod floating;
pub mod placement;

use crate::constants::{LARGE_DESKTOP_BREAKPOINT, MEDIUM_DESKTOP_BREAKPOINT, MOBILE_BREAKPOINT};
use crate::error::{DesktopError, Result};

/// A point in viewport units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Divide host pixel coordinates by the display zoom factor.
    pub fn unzoom(self, zoom: f64) -> Self {
        let zoom = sanitize_zoom(zoom);
        Self {
            x: self.x / zoom,
            y: self.y / zoom,
        }
    }

    pub fn offset_from(self, origin: Point) -> Self {
        Self {
            x: self.x - origin.x,
            y: self.y - origin.y,
        }
    }

    pub fn translate(self, delta: Point) -> Self {
        Self {
            x: self.x + delta.x,
            y: self.y + delta.y,
        }
    }

    /// Replace non-finite coordinates with zero. Negative values are kept.
    pub fn sanitized(self) -> Self {
        let fix = |v: f64| if v.is_finite() { v } else { 0.0 };
        Self {
            x: fix(self.x),
            y: fix(self.y),
        }
    }
}

/// A width/height pair in viewport units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Clamp both dimensions to at least `min`; NaN and infinities collapse
    /// to the minimum.
    pub fn at_least(self, min: Size) -> Self {
        let clamp = |v: f64, floor: f64| if v.is_finite() { v.max(floor) } else { floor };
        Self {
            width: clamp(self.width, min.width),
            height: clamp(self.height, min.height),
        }
    }

    /// Replace only unusable dimensions (non-finite or non-positive) with
    /// the matching `fallback` dimension.
    pub fn or_fallback(self, fallback: Size) -> Self {
        let fix = |v: f64, f: f64| if v.is_finite() && v > 0.0 { v } else { f };
        Self {
            width: fix(self.width, fallback.width),
            height: fix(self.height, fallback.height),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }

    pub fn from_parts(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn left(&self) -> f64 {
        self.origin.x
    }

    pub fn top(&self) -> f64 {
        self.origin.y
    }

    pub fn right(&self) -> f64 {
        self.origin.x + self.size.width
    }

    pub fn bottom(&self) -> f64 {
        self.origin.y + self.size.height
    }
}

/// Half-open containment: the right and bottom edges are outside.
pub fn rect_contains(rect: Rect, point: Point) -> bool {
    point.x >= rect.left()
        && point.x < rect.right()
        && point.y >= rect.top()
        && point.y < rect.bottom()
}

pub(crate) fn sanitize_zoom(zoom: f64) -> f64 {
    if zoom.is_finite() && zoom > 0.0 { zoom } else { 1.0 }
}

/// Display area reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl ViewportSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn sanitized(self) -> Self {
        let fix = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self {
            width: fix(self.width),
            height: fix(self.height),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    Mobile,
    SmallDesktop,
    MediumDesktop,
    LargeDesktop,
}

impl DeviceClass {
    pub fn is_mobile(self) -> bool {
        matches!(self, DeviceClass::Mobile)
    }
}

/// Viewport widths at which the device class changes.
///
/// `mobile` is the first width that is no longer mobile, `medium` the first
/// medium desktop width and `large` the first large desktop width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoints {
    mobile: f64,
    medium: f64,
    large: f64,
}

impl Breakpoints {
    pub fn new(mobile: f64, medium: f64, large: f64) -> Result<Self> {
        let finite = mobile.is_finite() && medium.is_finite() && large.is_finite();
        if !finite || mobile <= 0.0 || mobile >= medium || medium >= large {
            return Err(DesktopError::InvalidBreakpoints {
                mobile,
                medium,
                large,
            });
        }
        Ok(Self {
            mobile,
            medium,
            large,
        })
    }

    pub fn mobile(&self) -> f64 {
        self.mobile
    }

    pub fn medium(&self) -> f64 {
        self.medium
    }

    pub fn large(&self) -> f64 {
        self.large
    }

    pub fn classify(&self, width: f64) -> DeviceClass {
        if width < self.mobile {
            DeviceClass::Mobile
        } else if width < self.medium {
            DeviceClass::SmallDesktop
        } else if width < self.large {
            DeviceClass::MediumDesktop
        } else {
            DeviceClass::LargeDesktop
        }
    }
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            mobile: MOBILE_BREAKPOINT,
            medium: MEDIUM_DESKTOP_BREAKPOINT,
            large: LARGE_DESKTOP_BREAKPOINT,
        }
    }
}
