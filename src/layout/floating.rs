use std::fmt;
use std::str::FromStr;

use super::{Point, Rect, Size};
use crate::constants::{
    DRAG_BOTTOM_RESERVE, DRAG_LEFT_OVERHANG, DRAG_RIGHT_RESERVE, MIN_WINDOW_HEIGHT,
    MIN_WINDOW_WIDTH,
};

/// Which edge or corner of a window a resize handle drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeEdge {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeEdge {
    pub const ALL: [ResizeEdge; 8] = [
        ResizeEdge::TopLeft,
        ResizeEdge::TopRight,
        ResizeEdge::BottomLeft,
        ResizeEdge::BottomRight,
        ResizeEdge::Top,
        ResizeEdge::Bottom,
        ResizeEdge::Left,
        ResizeEdge::Right,
    ];

    pub fn includes_left(self) -> bool {
        matches!(
            self,
            ResizeEdge::Left | ResizeEdge::TopLeft | ResizeEdge::BottomLeft
        )
    }

    pub fn includes_right(self) -> bool {
        matches!(
            self,
            ResizeEdge::Right | ResizeEdge::TopRight | ResizeEdge::BottomRight
        )
    }

    pub fn includes_top(self) -> bool {
        matches!(
            self,
            ResizeEdge::Top | ResizeEdge::TopLeft | ResizeEdge::TopRight
        )
    }

    pub fn includes_bottom(self) -> bool {
        matches!(
            self,
            ResizeEdge::Bottom | ResizeEdge::BottomLeft | ResizeEdge::BottomRight
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResizeEdge::Left => "left",
            ResizeEdge::Right => "right",
            ResizeEdge::Top => "top",
            ResizeEdge::Bottom => "bottom",
            ResizeEdge::TopLeft => "top-left",
            ResizeEdge::TopRight => "top-right",
            ResizeEdge::BottomLeft => "bottom-left",
            ResizeEdge::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for ResizeEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resize direction: {0:?}")]
pub struct UnknownResizeEdge(pub String);

impl FromStr for ResizeEdge {
    type Err = UnknownResizeEdge;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResizeEdge::ALL
            .into_iter()
            .find(|edge| edge.as_str() == s)
            .ok_or_else(|| UnknownResizeEdge(s.to_string()))
    }
}

/// Dimensions of the window frame used for hit testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChromeLayout {
    pub title_bar_height: f64,
    /// Thickness of the edge resize strips.
    pub edge_thickness: f64,
    /// Side length of the square corner resize zones.
    pub corner_size: f64,
    /// Width of each title bar button (minimize, maximize, close).
    pub button_width: f64,
}

impl Default for ChromeLayout {
    fn default() -> Self {
        Self {
            title_bar_height: 30.0,
            edge_thickness: 4.0,
            corner_size: 8.0,
            button_width: 22.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeHandle<R> {
    pub id: R,
    pub rect: Rect,
    pub edge: ResizeEdge,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragHandle<R> {
    pub id: R,
    pub rect: Rect,
}

/// Resize zones of a window, corners first so they win over the edge strips
/// they overlap.
pub fn resize_handles_for_region<R: Clone>(
    id: R,
    rect: Rect,
    chrome: &ChromeLayout,
) -> Vec<ResizeHandle<R>> {
    let mut handles = Vec::with_capacity(8);
    if rect.size.width <= 0.0 || rect.size.height <= 0.0 {
        return handles;
    }
    let corner = chrome.corner_size.min(rect.size.width).min(rect.size.height);
    let edge = chrome.edge_thickness.min(rect.size.width).min(rect.size.height);
    let right = rect.right();
    let bottom = rect.bottom();
    let mut push = |edge_kind: ResizeEdge, r: Rect| {
        if r.size.width > 0.0 && r.size.height > 0.0 {
            handles.push(ResizeHandle {
                id: id.clone(),
                rect: r,
                edge: edge_kind,
            });
        }
    };
    push(
        ResizeEdge::TopLeft,
        Rect::new(rect.left(), rect.top(), corner, corner),
    );
    push(
        ResizeEdge::TopRight,
        Rect::new(right - corner, rect.top(), corner, corner),
    );
    push(
        ResizeEdge::BottomLeft,
        Rect::new(rect.left(), bottom - corner, corner, corner),
    );
    push(
        ResizeEdge::BottomRight,
        Rect::new(right - corner, bottom - corner, corner, corner),
    );
    let inner_width = rect.size.width - 2.0 * corner;
    let inner_height = rect.size.height - 2.0 * corner;
    push(
        ResizeEdge::Top,
        Rect::new(rect.left() + corner, rect.top(), inner_width, edge),
    );
    push(
        ResizeEdge::Bottom,
        Rect::new(rect.left() + corner, bottom - edge, inner_width, edge),
    );
    push(
        ResizeEdge::Left,
        Rect::new(rect.left(), rect.top() + corner, edge, inner_height),
    );
    push(
        ResizeEdge::Right,
        Rect::new(right - edge, rect.top() + corner, edge, inner_height),
    );
    handles
}

/// Title bar strip of a window, the region that starts a drag.
pub fn title_bar_for_region<R>(id: R, rect: Rect, chrome: &ChromeLayout) -> Option<DragHandle<R>> {
    if rect.size.width <= 0.0 || rect.size.height <= 0.0 {
        return None;
    }
    Some(DragHandle {
        id,
        rect: Rect::new(
            rect.left(),
            rect.top(),
            rect.size.width,
            chrome.title_bar_height.min(rect.size.height),
        ),
    })
}

/// Result of a resize step: the new size, plus how far the window origin
/// must move so the edge opposite the dragged one stays put.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeOutcome {
    pub size: Size,
    pub position_delta: Point,
}

/// Compute the size for a resize session given where the pointer started and
/// where it is now.
///
/// Dimensions never drop below `min`. The returned position delta is zero on
/// axes whose right/bottom edge is dragged; on left/top drags it equals the
/// amount the size shrank so the opposite edge is anchored.
pub fn resize_dimensions(
    direction: ResizeEdge,
    start_size: Size,
    start_pos: Point,
    pointer_now: Point,
    min: Size,
) -> ResizeOutcome {
    let delta = pointer_now.offset_from(start_pos).sanitized();
    let mut width = start_size.width;
    let mut height = start_size.height;

    if direction.includes_right() {
        width = start_size.width + delta.x;
    }
    if direction.includes_left() {
        width = start_size.width - delta.x;
    }
    if direction.includes_bottom() {
        height = start_size.height + delta.y;
    }
    if direction.includes_top() {
        height = start_size.height - delta.y;
    }

    let size = clamp_axis(Size::new(width, height), direction, min);

    let mut position_delta = Point::ORIGIN;
    if direction.includes_left() {
        position_delta.x = start_size.width - size.width;
    }
    if direction.includes_top() {
        position_delta.y = start_size.height - size.height;
    }
    ResizeOutcome {
        size,
        position_delta,
    }
}

// Only the dimensions a direction touches are floored; the other one is
// carried over from the session start untouched.
fn clamp_axis(size: Size, direction: ResizeEdge, min: Size) -> Size {
    let horizontal = direction.includes_left() || direction.includes_right();
    let vertical = direction.includes_top() || direction.includes_bottom();
    let floor = |v: f64, m: f64| if v.is_finite() { v.max(m) } else { m };
    Size {
        width: if horizontal {
            floor(size.width, min.width)
        } else {
            size.width
        },
        height: if vertical {
            floor(size.height, min.height)
        } else {
            size.height
        },
    }
}

/// Minimum window size used by pointer resizes.
pub fn min_window_size() -> Size {
    Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)
}

/// Constrain a dragged window's origin to the desktop container.
///
/// Up to three quarters of the window may slide off the left edge and at
/// least a quarter must remain on the right; vertically the title bar stays
/// inside the container.
pub fn clamp_drag_position(candidate: Point, window_size: Size, container: Size) -> Point {
    let candidate = candidate.sanitized();
    let width = if window_size.width.is_finite() {
        window_size.width.max(0.0)
    } else {
        0.0
    };
    let min_x = -(width * DRAG_LEFT_OVERHANG);
    let max_x = container.width - width * DRAG_RIGHT_RESERVE;
    let max_y = container.height - DRAG_BOTTOM_RESERVE;
    Point {
        x: candidate.x.min(max_x).max(min_x),
        y: candidate.y.min(max_y).max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: Size = Size {
        width: 250.0,
        height: 200.0,
    };

    #[test]
    fn resize_right_grows_width_only() {
        let out = resize_dimensions(
            ResizeEdge::Right,
            Size::new(300.0, 200.0),
            Point::new(500.0, 400.0),
            Point::new(560.0, 400.0),
            MIN,
        );
        assert_eq!(out.size, Size::new(360.0, 200.0));
        assert_eq!(out.position_delta, Point::ORIGIN);
    }

    #[test]
    fn resize_left_shifts_origin_by_shrink() {
        let out = resize_dimensions(
            ResizeEdge::Left,
            Size::new(400.0, 300.0),
            Point::new(100.0, 100.0),
            Point::new(130.0, 140.0),
            MIN,
        );
        assert_eq!(out.size, Size::new(370.0, 300.0));
        assert_eq!(out.position_delta, Point::new(30.0, 0.0));
    }

    #[test]
    fn resize_left_clamps_at_minimum_width() {
        let out = resize_dimensions(
            ResizeEdge::Left,
            Size::new(300.0, 300.0),
            Point::new(100.0, 100.0),
            Point::new(400.0, 100.0),
            MIN,
        );
        assert_eq!(out.size.width, 250.0);
        // shifted by exactly the clamped shrink, not by the raw pointer delta
        assert_eq!(out.position_delta.x, 50.0);
    }

    #[test]
    fn resize_top_left_corner_moves_both_axes() {
        let out = resize_dimensions(
            ResizeEdge::TopLeft,
            Size::new(400.0, 300.0),
            Point::new(0.0, 0.0),
            Point::new(-20.0, -10.0),
            MIN,
        );
        assert_eq!(out.size, Size::new(420.0, 310.0));
        assert_eq!(out.position_delta, Point::new(-20.0, -10.0));
    }

    #[test]
    fn resize_bottom_keeps_width_even_when_below_minimum() {
        let out = resize_dimensions(
            ResizeEdge::Bottom,
            Size::new(180.0, 300.0),
            Point::new(0.0, 0.0),
            Point::new(50.0, -500.0),
            MIN,
        );
        assert_eq!(out.size, Size::new(180.0, 200.0));
        assert_eq!(out.position_delta, Point::ORIGIN);
    }

    #[test]
    fn resize_ignores_nan_pointer() {
        let out = resize_dimensions(
            ResizeEdge::BottomRight,
            Size::new(300.0, 250.0),
            Point::new(10.0, 10.0),
            Point::new(f64::NAN, f64::NAN),
            MIN,
        );
        assert_eq!(out.size, Size::new(300.0, 250.0));
    }

    #[test]
    fn clamp_drag_allows_partial_offscreen_left() {
        let size = Size::new(400.0, 300.0);
        let container = Size::new(1000.0, 700.0);
        let p = clamp_drag_position(Point::new(-500.0, 20.0), size, container);
        assert_eq!(p, Point::new(-300.0, 20.0));
        let p = clamp_drag_position(Point::new(2000.0, 20.0), size, container);
        assert_eq!(p, Point::new(900.0, 20.0));
    }

    #[test]
    fn clamp_drag_keeps_title_bar_reachable() {
        let size = Size::new(400.0, 300.0);
        let container = Size::new(1000.0, 700.0);
        assert_eq!(
            clamp_drag_position(Point::new(10.0, -40.0), size, container).y,
            0.0
        );
        assert_eq!(
            clamp_drag_position(Point::new(10.0, 900.0), size, container).y,
            650.0
        );
        // a container shorter than the reserve pins the window to the top
        assert_eq!(
            clamp_drag_position(Point::new(10.0, 30.0), size, Size::new(1000.0, 20.0)).y,
            0.0
        );
    }

    #[test]
    fn handles_cover_corners_and_edges() {
        let rect = Rect::new(100.0, 100.0, 300.0, 200.0);
        let handles = resize_handles_for_region(7u8, rect, &ChromeLayout::default());
        assert_eq!(handles.len(), 8);
        let find = |edge| handles.iter().find(|h| h.edge == edge).unwrap().rect;
        assert_eq!(find(ResizeEdge::TopLeft), Rect::new(100.0, 100.0, 8.0, 8.0));
        assert_eq!(
            find(ResizeEdge::BottomRight),
            Rect::new(392.0, 292.0, 8.0, 8.0)
        );
        assert_eq!(find(ResizeEdge::Right), Rect::new(396.0, 108.0, 4.0, 184.0));
        assert_eq!(find(ResizeEdge::Top), Rect::new(108.0, 100.0, 284.0, 4.0));
    }

    #[test]
    fn handles_empty_for_degenerate_rect() {
        let rect = Rect::new(0.0, 0.0, 0.0, 50.0);
        assert!(resize_handles_for_region(1u8, rect, &ChromeLayout::default()).is_empty());
        assert!(title_bar_for_region(1u8, rect, &ChromeLayout::default()).is_none());
    }

    #[test]
    fn edge_tags_round_trip_through_strings() {
        for edge in ResizeEdge::ALL {
            assert_eq!(edge.as_str().parse::<ResizeEdge>(), Ok(edge));
        }
        let err = "sideways".parse::<ResizeEdge>().unwrap_err();
        assert_eq!(err, UnknownResizeEdge("sideways".to_string()));
        assert_eq!(err.to_string(), "unknown resize direction: \"sideways\"");
    }
}
