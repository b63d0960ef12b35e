use super::decorator::{HeaderAction, hit_test_header};
use super::interaction::{InteractionTracker, Session, SessionUpdate};
use super::registry::{OpenOutcome, Surface, WindowRegistry};
use super::{WindowEntity, WindowId, WindowSpec};
use crate::clock::{Clock, MonotonicClock};
use crate::layout::floating::{ChromeLayout, ResizeEdge, min_window_size, resize_handles_for_region};
use crate::layout::placement::SizingTable;
use crate::layout::{
    Breakpoints, DeviceClass, Point, Size, ViewportSize, rect_contains, sanitize_zoom,
};

/// Knobs a host sets once when it creates the manager.
#[derive(Debug, Clone)]
pub struct DesktopConfig {
    pub viewport: ViewportSize,
    pub breakpoints: Breakpoints,
    pub chrome: ChromeLayout,
    pub zoom: f64,
    pub sizing: SizingTable,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            viewport: ViewportSize::new(1600.0, 900.0),
            breakpoints: Breakpoints::default(),
            chrome: ChromeLayout::default(),
            zoom: 1.0,
            sizing: SizingTable::builtin(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// Mouse button press or touch start.
    Down,
    /// Mouse or touch movement.
    Move,
    /// Mouse button release or touch end, wherever it happens.
    Up,
}

/// What a pointer-down landed on.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerTarget {
    Desktop,
    Body(WindowId),
    TitleBar(WindowId, HeaderAction),
    ResizeHandle(WindowId, ResizeEdge),
}

/// A pointer or touch event in host pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Point,
    /// Zoom the position was measured at. `None` uses the manager's zoom;
    /// either way the manager's own zoom is left alone.
    pub zoom: Option<f64>,
    /// Target resolved by the host. When absent the manager hit-tests the
    /// position against its own window geometry.
    pub target: Option<PointerTarget>,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            position: Point::new(x, y),
            zoom: None,
            target: None,
        }
    }

    pub fn down(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Down, x, y)
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Move, x, y)
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Up, x, y)
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = Some(zoom);
        self
    }

    pub fn with_target(mut self, target: PointerTarget) -> Self {
        self.target = Some(target);
        self
    }
}

/// The window manager: registry, interaction sessions, focus and the
/// display state they depend on, behind one owned value.
pub struct WindowManager<C> {
    registry: WindowRegistry<C>,
    tracker: InteractionTracker,
    clock: Box<dyn Clock>,
    viewport: ViewportSize,
    device_class: DeviceClass,
    breakpoints: Breakpoints,
    chrome: ChromeLayout,
    zoom: f64,
    sizing: SizingTable,
    // ids closed through the title bar; hosts drain via `take_closed_windows`
    closed_windows: Vec<WindowId>,
}

impl<C> std::fmt::Debug for WindowManager<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowManager")
            .field("windows", &self.registry.len())
            .field("active", &self.registry.active_id())
            .field("session", self.tracker.session())
            .field("viewport", &self.viewport)
            .field("device_class", &self.device_class)
            .field("zoom", &self.zoom)
            .finish()
    }
}

impl<C> Default for WindowManager<C> {
    fn default() -> Self {
        Self::new(DesktopConfig::default())
    }
}

impl<C> WindowManager<C> {
    pub fn new(config: DesktopConfig) -> Self {
        Self::with_clock(config, Box::new(MonotonicClock::new()))
    }

    pub fn with_clock(config: DesktopConfig, clock: Box<dyn Clock>) -> Self {
        let viewport = config.viewport.sanitized();
        Self {
            registry: WindowRegistry::new(),
            tracker: InteractionTracker::new(),
            clock,
            viewport,
            device_class: config.breakpoints.classify(viewport.width),
            breakpoints: config.breakpoints,
            chrome: config.chrome,
            zoom: sanitize_zoom(config.zoom),
            sizing: config.sizing,
            closed_windows: Vec::new(),
        }
    }

    fn now(&self) -> u64 {
        self.clock.now_millis()
    }

    fn surface(&self) -> Surface {
        Surface {
            viewport: self.viewport,
            class: self.device_class,
            zoom: self.zoom,
        }
    }

    // ----- lifecycle -------------------------------------------------------

    /// Open a window, or bring back an existing one with the same id. An
    /// existing window keeps its geometry and content.
    pub fn open(&mut self, spec: WindowSpec<C>) -> OpenOutcome {
        let now = self.now();
        let surface = self.surface();
        self.registry.open(spec, &surface, now)
    }

    /// Open a window sized by the sizing table entry for `kind`. An explicit
    /// size on `spec` wins over the table.
    pub fn open_kind(&mut self, mut spec: WindowSpec<C>, kind: &str) -> OpenOutcome {
        if let Some(entry) = self.sizing.entry_or_default(kind) {
            if spec.size.is_none() {
                spec.size = Some(entry.policy.resolve(self.viewport, self.device_class));
            }
            spec.no_scroll |= entry.no_scroll;
        }
        self.open(spec)
    }

    pub fn close(&mut self, id: &str) -> bool {
        self.tracker.cancel_for(id);
        self.registry.close(id).is_some()
    }

    pub fn minimize(&mut self, id: &str) -> bool {
        if self.registry.contains(id) {
            self.tracker.cancel_for(id);
        }
        self.registry.minimize(id)
    }

    pub fn restore(&mut self, id: &str) -> bool {
        let now = self.now();
        self.registry.restore(id, now)
    }

    /// Toggle fullscreen for `id`.
    pub fn maximize(&mut self, id: &str) -> bool {
        let surface = self.surface();
        self.registry.maximize(id, &surface)
    }

    pub fn focus(&mut self, id: &str) -> bool {
        let now = self.now();
        self.registry.focus(id, now)
    }

    pub fn set_position(&mut self, id: &str, position: Point) -> bool {
        self.registry.set_position(id, position)
    }

    pub fn set_size(&mut self, id: &str, size: Size) -> bool {
        self.registry.set_size(id, size)
    }

    /// Ids closed by pointer interaction since the last call.
    pub fn take_closed_windows(&mut self) -> Vec<WindowId> {
        std::mem::take(&mut self.closed_windows)
    }

    // ----- reads -----------------------------------------------------------

    pub fn get(&self, id: &str) -> Option<&WindowEntity<C>> {
        self.registry.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.registry.contains(id)
    }

    pub fn active_id(&self) -> Option<&WindowId> {
        self.registry.active_id()
    }

    pub fn active(&self) -> Option<&WindowEntity<C>> {
        self.registry.active()
    }

    pub fn list_visible(&self) -> Vec<&WindowEntity<C>> {
        self.registry.list_visible()
    }

    pub fn windows_by_z(&self) -> Vec<&WindowEntity<C>> {
        self.registry.windows_by_z()
    }

    pub fn minimized(&self) -> Vec<&WindowEntity<C>> {
        self.registry.minimized()
    }

    /// All windows, minimized ones included, in opening order.
    pub fn windows(&self) -> impl Iterator<Item = &WindowEntity<C>> {
        self.registry.iter()
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn max_z_index(&self) -> u64 {
        self.registry.max_z_index()
    }

    // ----- display state ---------------------------------------------------

    /// Record a new display area. Fullscreen windows are stretched to it
    /// right away; everything else keeps its geometry.
    pub fn update_viewport(&mut self, viewport: ViewportSize) {
        self.viewport = viewport.sanitized();
        let class = self.breakpoints.classify(self.viewport.width);
        if class != self.device_class {
            tracing::debug!(from = ?self.device_class, to = ?class, "device class changed");
        }
        self.device_class = class;
        let surface = self.surface();
        self.registry.refit_fullscreen(&surface);
    }

    pub fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    pub fn device_class(&self) -> DeviceClass {
        self.device_class
    }

    pub fn breakpoints(&self) -> Breakpoints {
        self.breakpoints
    }

    pub fn set_breakpoints(&mut self, breakpoints: Breakpoints) {
        self.breakpoints = breakpoints;
        self.device_class = breakpoints.classify(self.viewport.width);
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = sanitize_zoom(zoom);
    }

    pub fn chrome(&self) -> &ChromeLayout {
        &self.chrome
    }

    pub fn sizing_table(&self) -> &SizingTable {
        &self.sizing
    }

    pub fn set_sizing_table(&mut self, sizing: SizingTable) {
        self.sizing = sizing;
    }

    /// Size the sizing table picks for `kind` on the current viewport.
    pub fn size_for_kind(&self, kind: &str) -> Option<Size> {
        self.sizing.resolve(kind, self.viewport, self.device_class)
    }

    /// Area a dragged window is constrained to: the fullscreen area divided
    /// by the zoom. Maximized windows are not divided, so at zoom 2 they are
    /// twice this size.
    pub fn container_size(&self) -> Size {
        let full = self.surface().fullscreen_size();
        Size::new(full.width / self.zoom, full.height / self.zoom)
    }

    // ----- interaction -----------------------------------------------------

    pub fn session(&self) -> &Session {
        self.tracker.session()
    }

    pub fn is_interacting(&self) -> bool {
        self.tracker.is_active()
    }

    pub fn is_dragging(&self, id: &str) -> bool {
        self.tracker.is_dragging(id)
    }

    pub fn is_resizing(&self, id: &str) -> bool {
        self.tracker.is_resizing(id)
    }

    /// Focus `id` and start dragging it. `pointer` is in host pixels.
    pub fn begin_drag(&mut self, id: &str, pointer: Point, zoom: f64) -> bool {
        let Some(origin) = self.visible_window(id).map(|w| w.position) else {
            return false;
        };
        self.focus(id);
        self.tracker
            .begin_drag(WindowId::new(id), pointer.unzoom(zoom), origin);
        true
    }

    /// Focus `id` and start resizing it from `edge`. `pointer` is in host
    /// pixels.
    pub fn begin_resize(&mut self, id: &str, edge: ResizeEdge, pointer: Point, zoom: f64) -> bool {
        let Some((origin, size)) = self.visible_window(id).map(|w| (w.position, w.size)) else {
            return false;
        };
        self.focus(id);
        self.tracker
            .begin_resize(WindowId::new(id), edge, pointer.unzoom(zoom), origin, size);
        true
    }

    /// Apply a pointer move to the active session. Returns false when there
    /// is no session, or when its window disappeared (the session is then
    /// dropped).
    pub fn pointer_moved(&mut self, pointer: Point, zoom: f64) -> bool {
        let Some(window_id) = self.tracker.session().window_id() else {
            return false;
        };
        let Some(window_size) = self.registry.get(window_id.as_str()).map(|w| w.size) else {
            tracing::debug!(window_id = %window_id, "session window is gone; ending session");
            self.tracker.end();
            return false;
        };
        let update = self.tracker.pointer_moved(
            pointer.unzoom(zoom),
            window_size,
            self.container_size(),
            min_window_size(),
        );
        match update {
            Some(SessionUpdate::Move {
                window_id,
                position,
            }) => self.registry.set_position(window_id.as_str(), position),
            Some(SessionUpdate::Resize {
                window_id,
                size,
                position,
            }) => self.registry.apply_resize(window_id.as_str(), size, position),
            None => false,
        }
    }

    /// End any drag or resize. Safe to call at any time.
    pub fn end_interaction(&mut self) -> bool {
        self.tracker.end().is_some()
    }

    fn visible_window(&self, id: &str) -> Option<&WindowEntity<C>> {
        self.registry.get(id).filter(|w| w.is_visible())
    }

    /// Resolve what sits under `point` (host pixels), topmost window first.
    /// Resize handles win over the title bar, which wins over the body.
    pub fn hit_test(&self, point: Point, zoom: f64) -> PointerTarget {
        let point = point.unzoom(zoom);
        for window in self.registry.windows_by_z().into_iter().rev() {
            let rect = window.rect();
            if !rect_contains(rect, point) {
                continue;
            }
            if let Some(handle) = resize_handles_for_region(window.id.clone(), rect, &self.chrome)
                .into_iter()
                .find(|handle| rect_contains(handle.rect, point))
            {
                return PointerTarget::ResizeHandle(handle.id, handle.edge);
            }
            return match hit_test_header(&self.chrome, rect, point) {
                HeaderAction::None => PointerTarget::Body(window.id.clone()),
                action => PointerTarget::TitleBar(window.id.clone(), action),
            };
        }
        PointerTarget::Desktop
    }

    /// Feed one pointer or touch event through the interaction protocol.
    /// Returns true when the event was consumed by the window manager.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> bool {
        let zoom = event.zoom.map_or(self.zoom, sanitize_zoom);
        match event.kind {
            PointerKind::Down => {
                if self.tracker.is_active() {
                    // the matching up was lost (e.g. released outside the host)
                    tracing::warn!(session = ?self.tracker.session(), "pointer down during session");
                    self.tracker.end();
                }
                let target = event
                    .target
                    .clone()
                    .unwrap_or_else(|| self.hit_test(event.position, zoom));
                self.handle_pointer_down(target, event.position, zoom)
            }
            PointerKind::Move => self.pointer_moved(event.position, zoom),
            PointerKind::Up => self.end_interaction(),
        }
    }

    fn handle_pointer_down(&mut self, target: PointerTarget, pointer: Point, zoom: f64) -> bool {
        match target {
            PointerTarget::Desktop => false,
            PointerTarget::Body(id) => self.focus(id.as_str()),
            PointerTarget::ResizeHandle(id, edge) => {
                self.begin_resize(id.as_str(), edge, pointer, zoom)
            }
            PointerTarget::TitleBar(id, action) => match action {
                HeaderAction::Minimize => {
                    self.focus(id.as_str());
                    self.minimize(id.as_str())
                }
                HeaderAction::Maximize => {
                    self.focus(id.as_str());
                    self.maximize(id.as_str())
                }
                HeaderAction::Close => {
                    let closed = self.close(id.as_str());
                    if closed {
                        self.closed_windows.push(id);
                    }
                    closed
                }
                HeaderAction::Drag | HeaderAction::None => {
                    self.begin_drag(id.as_str(), pointer, zoom)
                }
            },
        }
    }
}
