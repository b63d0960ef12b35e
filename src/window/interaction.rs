//! Drag and resize sessions.
//!
//! A session lives outside the window entities: pointer moves rewrite one
//! window's geometry without touching anything else, and an abandoned session
//! leaves nothing half-written behind. The tracker holds at most one session;
//! a single enum makes a simultaneous drag and resize unrepresentable.

use super::WindowId;
use crate::layout::floating::{ResizeEdge, ResizeOutcome, clamp_drag_position, resize_dimensions};
use crate::layout::{Point, Size};

#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub window_id: WindowId,
    /// Pointer position minus the window origin at session start.
    pub offset: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSession {
    pub window_id: WindowId,
    pub direction: ResizeEdge,
    pub start_size: Size,
    /// Pointer position at session start.
    pub start_pos: Point,
    /// Window origin at session start; the anchor for left/top resizes.
    pub start_origin: Point,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Session {
    #[default]
    Idle,
    Drag(DragSession),
    Resize(ResizeSession),
}

impl Session {
    pub fn window_id(&self) -> Option<&WindowId> {
        match self {
            Session::Idle => None,
            Session::Drag(drag) => Some(&drag.window_id),
            Session::Resize(resize) => Some(&resize.window_id),
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, Session::Idle)
    }
}

/// Geometry a pointer move produced for the session's window.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionUpdate {
    Move {
        window_id: WindowId,
        position: Point,
    },
    Resize {
        window_id: WindowId,
        size: Size,
        position: Point,
    },
}

#[derive(Debug, Clone, Default)]
pub struct InteractionTracker {
    session: Session,
}

impl InteractionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    pub fn is_dragging(&self, id: &str) -> bool {
        matches!(&self.session, Session::Drag(drag) if drag.window_id.as_str() == id)
    }

    pub fn is_resizing(&self, id: &str) -> bool {
        matches!(&self.session, Session::Resize(resize) if resize.window_id.as_str() == id)
    }

    /// Start dragging `window_id`. `pointer` is already divided by the zoom
    /// factor. Returns the session this one replaced, if any.
    pub fn begin_drag(
        &mut self,
        window_id: WindowId,
        pointer: Point,
        window_origin: Point,
    ) -> Option<Session> {
        let offset = pointer.offset_from(window_origin).sanitized();
        tracing::debug!(window_id = %window_id, offset_x = offset.x, offset_y = offset.y, "drag started");
        self.replace(Session::Drag(DragSession { window_id, offset }))
    }

    /// Start resizing `window_id` from `direction`. Returns the session this
    /// one replaced, if any.
    pub fn begin_resize(
        &mut self,
        window_id: WindowId,
        direction: ResizeEdge,
        pointer: Point,
        window_origin: Point,
        window_size: Size,
    ) -> Option<Session> {
        tracing::debug!(window_id = %window_id, %direction, "resize started");
        self.replace(Session::Resize(ResizeSession {
            window_id,
            direction,
            start_size: window_size,
            start_pos: pointer.sanitized(),
            start_origin: window_origin,
        }))
    }

    fn replace(&mut self, next: Session) -> Option<Session> {
        let previous = std::mem::replace(&mut self.session, next);
        if previous.is_active() {
            tracing::warn!(
                previous = ?previous.window_id(),
                "interaction started while another was active; ending the old one"
            );
            Some(previous)
        } else {
            None
        }
    }

    /// Geometry for the current pointer position (already unzoomed).
    ///
    /// Drags are clamped against `container` using the window's current
    /// size; resizes never shrink below `min_size`.
    pub fn pointer_moved(
        &self,
        pointer: Point,
        window_size: Size,
        container: Size,
        min_size: Size,
    ) -> Option<SessionUpdate> {
        match &self.session {
            Session::Idle => None,
            Session::Drag(drag) => {
                let candidate = pointer.offset_from(drag.offset);
                Some(SessionUpdate::Move {
                    window_id: drag.window_id.clone(),
                    position: clamp_drag_position(candidate, window_size, container),
                })
            }
            Session::Resize(resize) => {
                let ResizeOutcome {
                    size,
                    position_delta,
                } = resize_dimensions(
                    resize.direction,
                    resize.start_size,
                    resize.start_pos,
                    pointer,
                    min_size,
                );
                Some(SessionUpdate::Resize {
                    window_id: resize.window_id.clone(),
                    size,
                    position: resize.start_origin.translate(position_delta),
                })
            }
        }
    }

    /// End whatever session is active. Safe to call when idle.
    pub fn end(&mut self) -> Option<Session> {
        let previous = std::mem::take(&mut self.session);
        if let Some(id) = previous.window_id() {
            tracing::debug!(window_id = %id, "interaction ended");
        }
        previous.is_active().then_some(previous)
    }

    /// End the session only if it belongs to `id`.
    pub fn cancel_for(&mut self, id: &str) -> bool {
        if self.session.window_id().is_some_and(|w| w.as_str() == id) {
            self.session = Session::Idle;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: Size = Size {
        width: 250.0,
        height: 200.0,
    };
    const CONTAINER: Size = Size {
        width: 1600.0,
        height: 868.0,
    };

    #[test]
    fn drag_follows_pointer_minus_offset() {
        let mut t = InteractionTracker::new();
        t.begin_drag(
            WindowId::new("a"),
            Point::new(100.0, 50.0),
            Point::new(90.0, 40.0),
        );
        assert!(t.is_dragging("a"));
        assert!(!t.is_resizing("a"));
        let update = t.pointer_moved(
            Point::new(160.0, 120.0),
            Size::new(300.0, 200.0),
            CONTAINER,
            MIN,
        );
        assert_eq!(
            update,
            Some(SessionUpdate::Move {
                window_id: WindowId::new("a"),
                position: Point::new(150.0, 110.0),
            })
        );
    }

    #[test]
    fn resize_right_widens() {
        let mut t = InteractionTracker::new();
        t.begin_resize(
            WindowId::new("a"),
            ResizeEdge::Right,
            Point::new(500.0, 400.0),
            Point::new(200.0, 200.0),
            Size::new(300.0, 200.0),
        );
        let update = t.pointer_moved(Point::new(560.0, 400.0), Size::default(), CONTAINER, MIN);
        assert_eq!(
            update,
            Some(SessionUpdate::Resize {
                window_id: WindowId::new("a"),
                size: Size::new(360.0, 200.0),
                position: Point::new(200.0, 200.0),
            })
        );
    }

    #[test]
    fn resize_left_anchors_right_edge_at_minimum() {
        let mut t = InteractionTracker::new();
        t.begin_resize(
            WindowId::new("a"),
            ResizeEdge::Left,
            Point::new(200.0, 300.0),
            Point::new(200.0, 250.0),
            Size::new(300.0, 200.0),
        );
        let Some(SessionUpdate::Resize { size, position, .. }) =
            t.pointer_moved(Point::new(600.0, 300.0), Size::default(), CONTAINER, MIN)
        else {
            panic!("expected a resize update");
        };
        assert_eq!(size.width, 250.0);
        assert_eq!(position.x, 250.0);
        assert_eq!(position.x + size.width, 500.0);
    }

    #[test]
    fn new_session_supersedes_old() {
        let mut t = InteractionTracker::new();
        assert!(
            t.begin_drag(WindowId::new("a"), Point::ORIGIN, Point::ORIGIN)
                .is_none()
        );
        let replaced = t.begin_resize(
            WindowId::new("b"),
            ResizeEdge::Bottom,
            Point::ORIGIN,
            Point::ORIGIN,
            Size::new(300.0, 300.0),
        );
        assert!(matches!(replaced, Some(Session::Drag(_))));
        assert!(!t.is_dragging("a"));
        assert!(t.is_resizing("b"));
    }

    #[test]
    fn end_is_idempotent() {
        let mut t = InteractionTracker::new();
        assert!(t.end().is_none());
        t.begin_drag(WindowId::new("a"), Point::ORIGIN, Point::ORIGIN);
        assert!(t.end().is_some());
        assert!(!t.is_active());
        assert!(t.end().is_none());
        assert_eq!(
            t.pointer_moved(Point::ORIGIN, Size::default(), CONTAINER, MIN),
            None
        );
    }

    #[test]
    fn cancel_for_only_matches_owner() {
        let mut t = InteractionTracker::new();
        t.begin_drag(WindowId::new("a"), Point::ORIGIN, Point::ORIGIN);
        assert!(!t.cancel_for("b"));
        assert!(t.is_active());
        assert!(t.cancel_for("a"));
        assert!(!t.is_active());
    }
}
