use std::collections::BTreeMap;

use super::focus::{ZCounter, pick_next_focus};
use super::{WindowEntity, WindowId, WindowSpec};
use crate::constants::TASKBAR_HEIGHT;
use crate::layout::floating::min_window_size;
use crate::layout::placement::{default_position, default_size};
use crate::layout::{DeviceClass, Point, Size, ViewportSize};

/// Display state the registry needs when it places or fills windows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub viewport: ViewportSize,
    pub class: DeviceClass,
    pub zoom: f64,
}

impl Surface {
    /// Area a fullscreen window covers: the viewport minus the taskbar.
    ///
    /// This is the raw viewport and is not divided by `zoom`, so under a
    /// zoom above 1 a maximized window is larger than the drag container
    /// (`WindowManager::container_size`). Fullscreen fills the host's
    /// display at any scale.
    pub fn fullscreen_size(&self) -> Size {
        Size::new(
            self.viewport.width,
            (self.viewport.height - TASKBAR_HEIGHT).max(0.0),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    Created,
    Reactivated,
}

/// Normalized window store: entities by id plus their opening order.
///
/// Operations on ids that are not registered do nothing and report `false`
/// (or `None`); UI callers routinely race a close against a late event.
#[derive(Debug, Clone)]
pub struct WindowRegistry<C> {
    entities: BTreeMap<WindowId, WindowEntity<C>>,
    order: Vec<WindowId>,
    active: Option<WindowId>,
    z: ZCounter,
}

impl<C> Default for WindowRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> WindowRegistry<C> {
    pub fn new() -> Self {
        Self {
            entities: BTreeMap::new(),
            order: Vec::new(),
            active: None,
            z: ZCounter::new(),
        }
    }

    pub fn open(&mut self, spec: WindowSpec<C>, surface: &Surface, now: u64) -> OpenOutcome {
        if let Some(existing) = self.entities.get_mut(&spec.id) {
            existing.is_open = true;
            existing.is_minimized = false;
            existing.z_index = self.z.next();
            existing.last_focused = now;
            tracing::debug!(window_id = %spec.id, z_index = existing.z_index, "reactivated window");
            self.active = Some(spec.id);
            return OpenOutcome::Reactivated;
        }

        let position = default_position(surface.viewport, self.order.len(), surface.class, surface.zoom);
        let size = match spec.size {
            Some(size) => size.or_fallback(min_window_size()),
            None => default_size(surface.viewport, surface.class),
        };
        let z_index = self.z.next();
        tracing::debug!(
            window_id = %spec.id,
            x = position.x,
            y = position.y,
            width = size.width,
            height = size.height,
            z_index,
            "opened window"
        );
        let entity = WindowEntity {
            id: spec.id.clone(),
            title: spec.title,
            content: spec.content,
            is_open: true,
            is_minimized: false,
            is_fullscreen: false,
            position,
            size,
            z_index,
            original_position: None,
            original_size: None,
            no_scroll: spec.no_scroll,
            last_focused: now,
        };
        self.order.push(spec.id.clone());
        self.entities.insert(spec.id.clone(), entity);
        self.active = Some(spec.id);
        OpenOutcome::Created
    }

    /// Remove a window for good, handing focus to the most recently focused
    /// visible window if the closed one was active.
    pub fn close(&mut self, id: &str) -> Option<WindowEntity<C>> {
        let Some(removed) = self.entities.remove(id) else {
            tracing::debug!(window_id = id, "close ignored: unknown window");
            return None;
        };
        self.order.retain(|other| other.as_str() != id);
        if self.active.as_ref().is_some_and(|active| active.as_str() == id) {
            self.active = pick_next_focus(self.entities.values());
        }
        tracing::debug!(window_id = id, next_active = ?self.active, "closed window");
        Some(removed)
    }

    pub fn minimize(&mut self, id: &str) -> bool {
        let Some(window) = self.entities.get_mut(id) else {
            tracing::debug!(window_id = id, "minimize ignored: unknown window");
            return false;
        };
        window.is_minimized = true;
        if self.active.as_ref().is_some_and(|active| active.as_str() == id) {
            self.active = None;
        }
        tracing::debug!(window_id = id, "minimized window");
        true
    }

    pub fn restore(&mut self, id: &str, now: u64) -> bool {
        let Some(window) = self.entities.get_mut(id) else {
            tracing::debug!(window_id = id, "restore ignored: unknown window");
            return false;
        };
        window.is_minimized = false;
        window.is_open = true;
        window.last_focused = now;
        self.active = Some(window.id.clone());
        tracing::debug!(window_id = id, "restored window");
        true
    }

    /// Toggle fullscreen. Going fullscreen snapshots the current geometry;
    /// leaving it puts the snapshot back and clears it.
    pub fn maximize(&mut self, id: &str, surface: &Surface) -> bool {
        let Some(window) = self.entities.get_mut(id) else {
            tracing::debug!(window_id = id, "maximize ignored: unknown window");
            return false;
        };
        if window.is_fullscreen {
            window.is_fullscreen = false;
            if let Some(position) = window.original_position.take() {
                window.position = position;
            }
            if let Some(size) = window.original_size.take() {
                window.size = size;
            }
            tracing::debug!(window_id = id, "left fullscreen");
        } else {
            window.is_fullscreen = true;
            window.original_position = Some(window.position);
            window.original_size = Some(window.size);
            window.position = Point::ORIGIN;
            window.size = surface.fullscreen_size();
            tracing::debug!(window_id = id, "entered fullscreen");
        }
        true
    }

    /// Stretch every fullscreen window to a new viewport. Their snapshots are
    /// left alone so un-fullscreen still returns to the pre-maximize geometry.
    pub fn refit_fullscreen(&mut self, surface: &Surface) {
        let size = surface.fullscreen_size();
        for window in self.entities.values_mut().filter(|w| w.is_fullscreen) {
            window.position = Point::ORIGIN;
            window.size = size;
            tracing::debug!(window_id = %window.id, "refit fullscreen window");
        }
    }

    /// Raise a window and make it active.
    ///
    /// Minimized windows still get the new z-index and timestamp, but stay
    /// inactive until restored.
    pub fn focus(&mut self, id: &str, now: u64) -> bool {
        let Some(window) = self.entities.get_mut(id) else {
            tracing::debug!(window_id = id, "focus ignored: unknown window");
            return false;
        };
        window.z_index = self.z.next();
        window.last_focused = now;
        if window.is_visible() {
            self.active = Some(window.id.clone());
        }
        true
    }

    /// Write a position. Non-finite coordinates become zero; negative ones
    /// are valid (windows may hang off the left edge).
    pub fn set_position(&mut self, id: &str, position: Point) -> bool {
        let Some(window) = self.entities.get_mut(id) else {
            return false;
        };
        window.position = position.sanitized();
        tracing::trace!(window_id = id, x = window.position.x, y = window.position.y, "position");
        true
    }

    /// Write a size, clamped to the minimum window size.
    pub fn set_size(&mut self, id: &str, size: Size) -> bool {
        let Some(window) = self.entities.get_mut(id) else {
            return false;
        };
        window.size = size.at_least(min_window_size());
        tracing::trace!(
            window_id = id,
            width = window.size.width,
            height = window.size.height,
            "size"
        );
        true
    }

    /// Write the geometry produced by a resize session. The session already
    /// floored the dimensions it touched, so the size is stored as given.
    pub(crate) fn apply_resize(&mut self, id: &str, size: Size, position: Point) -> bool {
        let Some(window) = self.entities.get_mut(id) else {
            return false;
        };
        window.size = size.or_fallback(min_window_size());
        window.position = position.sanitized();
        tracing::trace!(
            window_id = id,
            x = window.position.x,
            y = window.position.y,
            width = window.size.width,
            height = window.size.height,
            "resize"
        );
        true
    }

    pub fn get(&self, id: &str) -> Option<&WindowEntity<C>> {
        self.entities.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entities.contains_key(id)
    }

    pub fn active_id(&self) -> Option<&WindowId> {
        self.active.as_ref()
    }

    pub fn active(&self) -> Option<&WindowEntity<C>> {
        self.active.as_ref().and_then(|id| self.entities.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Highest z-index assigned so far.
    pub fn max_z_index(&self) -> u64 {
        self.z.current()
    }

    /// Every window in the order it was first opened.
    pub fn iter(&self) -> impl Iterator<Item = &WindowEntity<C>> {
        self.order.iter().filter_map(|id| self.entities.get(id))
    }

    /// Open, non-minimized windows in opening order. Stacking is the
    /// `z_index` field, not the list position.
    pub fn list_visible(&self) -> Vec<&WindowEntity<C>> {
        self.iter().filter(|w| w.is_visible()).collect()
    }

    /// Visible windows bottom to top.
    pub fn windows_by_z(&self) -> Vec<&WindowEntity<C>> {
        let mut windows = self.list_visible();
        windows.sort_by_key(|w| w.z_index);
        windows
    }

    pub fn minimized(&self) -> Vec<&WindowEntity<C>> {
        self.iter().filter(|w| w.is_minimized).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desktop() -> Surface {
        Surface {
            viewport: ViewportSize::new(1600.0, 900.0),
            class: DeviceClass::LargeDesktop,
            zoom: 1.0,
        }
    }

    fn spec(id: &str) -> WindowSpec<&'static str> {
        WindowSpec::new(id, id.to_uppercase(), "payload")
    }

    #[test]
    fn open_assigns_default_geometry_and_focus() {
        let mut reg = WindowRegistry::new();
        assert_eq!(reg.open(spec("a"), &desktop(), 1), OpenOutcome::Created);
        let a = reg.get("a").unwrap();
        assert_eq!(a.z_index(), 11);
        assert_eq!(a.size(), Size::new(740.0, 540.0));
        assert_eq!(a.position(), Point::new(430.0, 160.0));
        assert_eq!(reg.active_id().map(WindowId::as_str), Some("a"));
    }

    #[test]
    fn caller_size_keeps_small_but_valid_dimensions() {
        let mut reg = WindowRegistry::new();
        let s = spec("contact").with_size(Size::new(260.0, 140.0));
        reg.open(s, &desktop(), 0);
        assert_eq!(reg.get("contact").unwrap().size(), Size::new(260.0, 140.0));

        let s = spec("broken").with_size(Size::new(f64::NAN, -3.0));
        reg.open(s, &desktop(), 0);
        assert_eq!(reg.get("broken").unwrap().size(), Size::new(250.0, 200.0));
    }

    #[test]
    fn reopen_keeps_geometry_and_content() {
        let mut reg = WindowRegistry::new();
        reg.open(spec("a"), &desktop(), 1);
        reg.set_position("a", Point::new(5.0, 6.0));
        reg.set_size("a", Size::new(512.0, 384.0));
        reg.minimize("a");
        let replacement = WindowSpec::new("a", "other title", "new payload")
            .with_size(Size::new(300.0, 250.0));
        assert_eq!(reg.open(replacement, &desktop(), 9), OpenOutcome::Reactivated);
        let a = reg.get("a").unwrap();
        assert_eq!(*a.content(), "payload");
        assert_eq!(a.title(), "A");
        assert_eq!(a.position(), Point::new(5.0, 6.0));
        assert_eq!(a.size(), Size::new(512.0, 384.0));
        assert!(!a.is_minimized());
        assert_eq!(a.last_focused(), 9);
        assert_eq!(a.z_index(), 12);
    }

    #[test]
    fn cascade_counts_registered_windows() {
        let mut reg = WindowRegistry::new();
        reg.open(spec("a"), &desktop(), 0);
        reg.open(spec("b"), &desktop(), 0);
        let a = reg.get("a").unwrap().position();
        let b = reg.get("b").unwrap().position();
        assert_eq!(b.x - a.x, 30.0);
    }

    #[test]
    fn close_refocuses_most_recent_visible() {
        let mut reg = WindowRegistry::new();
        reg.open(spec("a"), &desktop(), 1);
        reg.open(spec("b"), &desktop(), 2);
        reg.open(spec("c"), &desktop(), 3);
        reg.minimize("b");
        reg.focus("c", 4);
        assert!(reg.close("c").is_some());
        assert_eq!(reg.active_id().map(WindowId::as_str), Some("a"));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn closing_inactive_window_keeps_focus() {
        let mut reg = WindowRegistry::new();
        reg.open(spec("a"), &desktop(), 1);
        reg.open(spec("b"), &desktop(), 2);
        reg.close("a");
        assert_eq!(reg.active_id().map(WindowId::as_str), Some("b"));
    }

    #[test]
    fn minimize_clears_active_without_reassigning() {
        let mut reg = WindowRegistry::new();
        reg.open(spec("a"), &desktop(), 1);
        reg.open(spec("b"), &desktop(), 2);
        reg.minimize("b");
        assert_eq!(reg.active_id(), None);
        assert_eq!(reg.minimized().len(), 1);
        assert!(reg.restore("b", 3));
        assert_eq!(reg.active_id().map(WindowId::as_str), Some("b"));
    }

    #[test]
    fn focusing_minimized_window_leaves_it_inactive() {
        let mut reg = WindowRegistry::new();
        reg.open(spec("a"), &desktop(), 1);
        reg.minimize("a");
        assert!(reg.focus("a", 2));
        assert_eq!(reg.active_id(), None);
        assert_eq!(reg.get("a").unwrap().z_index(), 12);
    }

    #[test]
    fn maximize_round_trip_restores_geometry() {
        let mut reg = WindowRegistry::new();
        reg.open(spec("a"), &desktop(), 1);
        reg.set_position("a", Point::new(33.5, 71.25));
        reg.set_size("a", Size::new(412.0, 318.0));

        reg.maximize("a", &desktop());
        let a = reg.get("a").unwrap();
        assert!(a.is_fullscreen());
        assert_eq!(a.position(), Point::ORIGIN);
        assert_eq!(a.size(), Size::new(1600.0, 868.0));
        assert_eq!(a.original_position(), Some(Point::new(33.5, 71.25)));

        reg.maximize("a", &desktop());
        let a = reg.get("a").unwrap();
        assert!(!a.is_fullscreen());
        assert_eq!(a.position(), Point::new(33.5, 71.25));
        assert_eq!(a.size(), Size::new(412.0, 318.0));
        assert_eq!(a.original_position(), None);
        assert_eq!(a.original_size(), None);
    }

    #[test]
    fn refit_only_touches_fullscreen_windows() {
        let mut reg = WindowRegistry::new();
        reg.open(spec("a"), &desktop(), 1);
        reg.open(spec("b"), &desktop(), 2);
        reg.maximize("a", &desktop());
        let before_b = reg.get("b").unwrap().rect();
        let smaller = Surface {
            viewport: ViewportSize::new(1000.0, 700.0),
            class: DeviceClass::SmallDesktop,
            zoom: 1.0,
        };
        reg.refit_fullscreen(&smaller);
        assert_eq!(reg.get("a").unwrap().size(), Size::new(1000.0, 668.0));
        assert_eq!(reg.get("b").unwrap().rect(), before_b);
        reg.maximize("a", &smaller);
        assert_eq!(reg.get("a").unwrap().size(), Size::new(740.0, 540.0));
    }

    #[test]
    fn unknown_ids_are_no_ops() {
        let mut reg: WindowRegistry<()> = WindowRegistry::new();
        assert!(reg.close("ghost").is_none());
        assert!(!reg.minimize("ghost"));
        assert!(!reg.restore("ghost", 1));
        assert!(!reg.maximize("ghost", &desktop()));
        assert!(!reg.focus("ghost", 1));
        assert!(!reg.set_position("ghost", Point::ORIGIN));
        assert!(!reg.set_size("ghost", Size::new(1.0, 1.0)));
        assert_eq!(reg.max_z_index(), 10);
        assert!(reg.is_empty());
    }

    #[test]
    fn set_size_clamps_to_minimum() {
        let mut reg = WindowRegistry::new();
        reg.open(spec("a"), &desktop(), 1);
        reg.set_size("a", Size::new(-40.0, f64::NAN));
        assert_eq!(reg.get("a").unwrap().size(), Size::new(250.0, 200.0));
        reg.set_position("a", Point::new(f64::NAN, -20.0));
        assert_eq!(reg.get("a").unwrap().position(), Point::new(0.0, -20.0));
    }

    #[test]
    fn windows_by_z_sorts_ascending() {
        let mut reg = WindowRegistry::new();
        reg.open(spec("a"), &desktop(), 1);
        reg.open(spec("b"), &desktop(), 2);
        reg.focus("a", 3);
        let ids: Vec<&str> = reg.windows_by_z().iter().map(|w| w.id().as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        let listed: Vec<&str> = reg.list_visible().iter().map(|w| w.id().as_str()).collect();
        assert_eq!(listed, vec!["a", "b"]);
    }
}
