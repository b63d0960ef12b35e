//! Terminal rendition of the retro desktop.
//!
//! Each terminal cell stands for a `cell_width` x `cell_height` block of host
//! pixels. Pointer positions are reported at the centre of the cell under
//! the mouse, and a window covers every cell whose centre lies inside its
//! rectangle. The host resolves what a click landed on at cell granularity
//! and passes that target along with the event, so the manager never has to
//! guess at sub-cell chrome.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect as CellRect;
use ratatui::style::{Modifier, Style};

use crate::constants::TASKBAR_HEIGHT;
use crate::error::{DesktopError, Result};
use crate::layout::floating::ResizeEdge;
use crate::layout::placement::slugify;
use crate::layout::{Point, Rect, ViewportSize, sanitize_zoom};
use crate::taskbar::Taskbar;
use crate::theme;
use crate::ui::{cell_contains, fill_rect, safe_set_string, truncate_to_width};
use crate::window::decorator::HeaderAction;
use crate::window::registry::OpenOutcome;
use crate::window::{
    DesktopConfig, PointerEvent, PointerTarget, WindowEntity, WindowId, WindowManager, WindowSpec,
};

/// Title bar buttons, left to right.
const BUTTONS: [(&str, HeaderAction); 3] = [
    ("[_]", HeaderAction::Minimize),
    ("[^]", HeaderAction::Maximize),
    ("[X]", HeaderAction::Close),
];
const BUTTON_CELLS: u16 = 3;

/// A desktop icon: the key that opens it and what it opens.
#[derive(Debug, Clone, Copy)]
pub struct Launcher {
    pub key: char,
    pub title: &'static str,
    pub kind: &'static str,
    pub body: &'static str,
}

pub const LAUNCHERS: [Launcher; 7] = [
    Launcher {
        key: '1',
        title: "Album Covers",
        kind: "gallery",
        body: "12 images\nDouble-click to preview.",
    },
    Launcher {
        key: '2',
        title: "Paint",
        kind: "paint",
        body: "untitled.bmp",
    },
    Launcher {
        key: '3',
        title: "Pix",
        kind: "pix",
        body: "pix.png",
    },
    Launcher {
        key: '4',
        title: "Error",
        kind: "error",
        body: "A fatal exception has occurred.\nPress any key to continue.",
    },
    Launcher {
        key: '5',
        title: "Contact",
        kind: "contact",
        body: "mail: hello@example.com",
    },
    Launcher {
        key: '6',
        title: "Computer",
        kind: "computer",
        body: "C:\\>dir\n  AUTOEXEC.BAT\n  CONFIG.SYS",
    },
    Launcher {
        key: '7',
        title: "Read Me",
        kind: "notes",
        body: "Keys 1-7 open windows.\nTab cycles focus, m/x/w act on the\nactive window, q quits.\nDrag title bars and edges with the mouse.",
    },
];

/// Maps terminal cells to host pixels and back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    cell_width: f64,
    cell_height: f64,
}

impl Projection {
    pub fn new(cell_width: f64, cell_height: f64) -> Result<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(cell_width) || !valid(cell_height) {
            return Err(DesktopError::InvalidCellSize {
                width: cell_width,
                height: cell_height,
            });
        }
        Ok(Self {
            cell_width,
            cell_height,
        })
    }

    pub fn cell_width(&self) -> f64 {
        self.cell_width
    }

    pub fn cell_height(&self) -> f64 {
        self.cell_height
    }

    /// Host pixel size of a terminal of `columns` x `rows` cells.
    pub fn viewport(&self, columns: u16, rows: u16) -> ViewportSize {
        ViewportSize::new(
            f64::from(columns) * self.cell_width,
            f64::from(rows) * self.cell_height,
        )
    }

    /// Host pixel position of a cell's centre.
    pub fn pointer(&self, column: u16, row: u16) -> Point {
        Point::new(
            (f64::from(column) + 0.5) * self.cell_width,
            (f64::from(row) + 0.5) * self.cell_height,
        )
    }

    /// Rows the taskbar occupies at the bottom of the screen.
    pub fn taskbar_rows(&self) -> u16 {
        ((TASKBAR_HEIGHT / self.cell_height).ceil() as u16).max(1)
    }

    /// Cells whose centres fall inside `rect` (viewport units). `None` when
    /// the rectangle covers no cell at all.
    pub fn to_cells(&self, rect: Rect, zoom: f64) -> Option<CellRect> {
        let zoom = sanitize_zoom(zoom);
        let (x, end_x) = cell_span(rect.left() * zoom, rect.right() * zoom, self.cell_width)?;
        let (y, end_y) = cell_span(rect.top() * zoom, rect.bottom() * zoom, self.cell_height)?;
        Some(CellRect {
            x,
            y,
            width: end_x - x,
            height: end_y - y,
        })
    }
}

// Cell `c` is covered when its centre `(c + 0.5) * cell` lies in `[start, end)`.
fn cell_span(start: f64, end: f64, cell: f64) -> Option<(u16, u16)> {
    let half = cell / 2.0;
    let max = f64::from(u16::MAX);
    let first = ((start - half) / cell).ceil().clamp(0.0, max);
    let last = ((end - half) / cell).ceil().clamp(0.0, max);
    if !first.is_finite() || !last.is_finite() || last <= first {
        return None;
    }
    Some((first as u16, last as u16))
}

/// Column where the title bar buttons start, if the window is wide enough
/// to show them between its two corner cells.
fn button_start(cells: CellRect) -> Option<u16> {
    let needed = BUTTON_CELLS * BUTTONS.len() as u16 + 3;
    if cells.width < needed {
        return None;
    }
    let right = cells.x + cells.width - 1;
    Some(right - BUTTON_CELLS * BUTTONS.len() as u16)
}

/// What a click on `(column, row)` means for a window drawn over `cells`.
///
/// The outer ring of cells resizes, except along the top where only the two
/// corners do; the rest of the top row is the title bar.
pub fn classify_cell(id: WindowId, cells: CellRect, column: u16, row: u16) -> PointerTarget {
    let right = cells.x + cells.width.saturating_sub(1);
    let bottom = cells.y + cells.height.saturating_sub(1);
    let on_left = column == cells.x;
    let on_right = column == right && cells.width > 1;

    let edge = if row == cells.y {
        if on_left {
            Some(ResizeEdge::TopLeft)
        } else if on_right {
            Some(ResizeEdge::TopRight)
        } else {
            None
        }
    } else if row == bottom {
        Some(if on_left {
            ResizeEdge::BottomLeft
        } else if on_right {
            ResizeEdge::BottomRight
        } else {
            ResizeEdge::Bottom
        })
    } else if on_left {
        Some(ResizeEdge::Left)
    } else if on_right {
        Some(ResizeEdge::Right)
    } else {
        None
    };
    if let Some(edge) = edge {
        return PointerTarget::ResizeHandle(id, edge);
    }
    if row != cells.y {
        return PointerTarget::Body(id);
    }
    let action = button_start(cells)
        .filter(|start| column >= *start)
        .and_then(|start| BUTTONS.get(usize::from((column - start) / BUTTON_CELLS)))
        .map(|(_, action)| *action)
        .unwrap_or(HeaderAction::Drag);
    PointerTarget::TitleBar(id, action)
}

/// The desktop host: window manager, taskbar and terminal geometry.
pub struct Desktop {
    windows: WindowManager<&'static str>,
    projection: Projection,
    taskbar: Taskbar,
    should_quit: bool,
}

impl Desktop {
    pub fn new(config: DesktopConfig, projection: Projection, columns: u16, rows: u16) -> Self {
        let config = DesktopConfig {
            viewport: projection.viewport(columns, rows),
            ..config
        };
        Self::with_manager(WindowManager::new(config), projection)
    }

    pub fn with_manager(windows: WindowManager<&'static str>, projection: Projection) -> Self {
        Self {
            windows,
            projection,
            taskbar: Taskbar::new(),
            should_quit: false,
        }
    }

    pub fn windows(&self) -> &WindowManager<&'static str> {
        &self.windows
    }

    pub fn windows_mut(&mut self) -> &mut WindowManager<&'static str> {
        &mut self.windows
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Open (or bring back) the window behind a desktop icon.
    pub fn launch(&mut self, launcher: &Launcher) -> OpenOutcome {
        let spec = WindowSpec::new(slugify(launcher.title), launcher.title, launcher.body);
        let outcome = self.windows.open_kind(spec, launcher.kind);
        tracing::info!(title = launcher.title, kind = launcher.kind, ?outcome, "launch");
        outcome
    }

    /// Route one terminal event. Returns true when the screen needs a redraw.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(columns, rows) => {
                self.resize(*columns, *rows);
                true
            }
            _ => false,
        }
    }

    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.windows
            .update_viewport(self.projection.viewport(columns, rows));
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return true;
        }
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                true
            }
            KeyCode::Tab => self.cycle_focus(),
            KeyCode::Esc => self.windows.end_interaction(),
            KeyCode::Char('m') => self.with_active(|wm, id| wm.minimize(id)),
            KeyCode::Char('x') => self.with_active(|wm, id| wm.maximize(id)),
            KeyCode::Char('w') => self.with_active(|wm, id| wm.close(id)),
            KeyCode::Char(c) => match LAUNCHERS.iter().find(|l| l.key == c) {
                Some(launcher) => {
                    self.launch(launcher);
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    fn with_active<F>(&mut self, f: F) -> bool
    where
        F: FnOnce(&mut WindowManager<&'static str>, &str) -> bool,
    {
        let Some(id) = self.windows.active_id().cloned() else {
            return false;
        };
        f(&mut self.windows, id.as_str())
    }

    /// Raise the bottom-most visible window, classic alt-tab style.
    fn cycle_focus(&mut self) -> bool {
        let next = self.windows.windows_by_z().first().map(|w| w.id().clone());
        match next {
            Some(id) => self.windows.focus(id.as_str()),
            None => false,
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) -> bool {
        let pointer = self.projection.pointer(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(id) = self.taskbar.hit(mouse.column, mouse.row).cloned() {
                    self.windows.end_interaction();
                    return self.taskbar_click(&id);
                }
                let target = self.target_at(mouse.column, mouse.row);
                let event = PointerEvent::down(pointer.x, pointer.y).with_target(target);
                let handled = self.windows.handle_pointer(&event);
                for id in self.windows.take_closed_windows() {
                    tracing::info!(window_id = %id, "window closed from title bar");
                }
                handled
            }
            MouseEventKind::Drag(MouseButton::Left) => self
                .windows
                .handle_pointer(&PointerEvent::moved(pointer.x, pointer.y)),
            MouseEventKind::Up(MouseButton::Left) => self
                .windows
                .handle_pointer(&PointerEvent::up(pointer.x, pointer.y)),
            _ => false,
        }
    }

    /// Taskbar entry semantics: bring back a minimized window, minimize the
    /// active one, raise anything else.
    fn taskbar_click(&mut self, id: &WindowId) -> bool {
        let Some(window) = self.windows.get(id.as_str()) else {
            return false;
        };
        if window.is_minimized() {
            self.windows.restore(id.as_str()) && self.windows.focus(id.as_str())
        } else if self.windows.active_id() == Some(id) {
            self.windows.minimize(id.as_str())
        } else {
            self.windows.focus(id.as_str())
        }
    }

    /// What sits under a cell, topmost window first.
    pub fn target_at(&self, column: u16, row: u16) -> PointerTarget {
        let zoom = self.windows.zoom();
        self.windows
            .windows_by_z()
            .into_iter()
            .rev()
            .find_map(|window| {
                let cells = self.projection.to_cells(window.rect(), zoom)?;
                cell_contains(cells, column, row)
                    .then(|| classify_cell(window.id().clone(), cells, column, row))
            })
            .unwrap_or(PointerTarget::Desktop)
    }

    pub fn render(&mut self, frame: &mut Frame<'_>) {
        self.render_buffer(frame.buffer_mut());
    }

    pub fn render_buffer(&mut self, buffer: &mut Buffer) {
        let area = buffer.area;
        let (desk, _) = self
            .taskbar
            .split_area(area, self.projection.taskbar_rows());
        fill_rect(buffer, desk, Style::default().bg(theme::desktop_bg()));

        let zoom = self.windows.zoom();
        let active = self.windows.active_id();
        for window in self.windows.windows_by_z() {
            let Some(cells) = self.projection.to_cells(window.rect(), zoom) else {
                continue;
            };
            draw_window(buffer, desk, cells, window, active == Some(window.id()));
        }
        self.taskbar.render(buffer, &self.windows);
    }
}

fn draw_window(
    buffer: &mut Buffer,
    bounds: CellRect,
    cells: CellRect,
    window: &WindowEntity<&'static str>,
    focused: bool,
) {
    let visible = cells.intersection(bounds);
    if visible.is_empty() {
        return;
    }
    let face = Style::default()
        .bg(theme::window_bg())
        .fg(theme::window_fg());
    fill_rect(buffer, visible, face);

    let title_style = Style::default()
        .bg(theme::title_bg(focused))
        .fg(theme::title_fg(focused));
    let title_row = CellRect {
        height: 1,
        ..cells
    };
    fill_rect(buffer, title_row.intersection(bounds), title_style);

    let buttons = button_start(cells);
    let title_end = buttons.unwrap_or(cells.x + cells.width.saturating_sub(1));
    let title_room = usize::from(title_end.saturating_sub(cells.x + 1));
    safe_set_string(
        buffer,
        bounds,
        cells.x.saturating_add(1),
        cells.y,
        &truncate_to_width(window.title(), title_room),
        title_style.add_modifier(Modifier::BOLD),
    );
    if let Some(start) = buttons {
        let button_style = Style::default()
            .bg(theme::button_bg())
            .fg(theme::button_fg());
        for (i, (label, _)) in BUTTONS.iter().enumerate() {
            let x = start + BUTTON_CELLS * i as u16;
            safe_set_string(buffer, bounds, x, cells.y, label, button_style);
        }
    }

    let inner_width = usize::from(cells.width.saturating_sub(2));
    let body_rows = cells.height.saturating_sub(2);
    for (offset, line) in window.content().lines().take(usize::from(body_rows)).enumerate() {
        safe_set_string(
            buffer,
            bounds,
            cells.x.saturating_add(1),
            cells.y + 1 + offset as u16,
            &truncate_to_width(line, inner_width),
            face,
        );
    }

    if cells.height > 1 && cells.width > 1 {
        safe_set_string(
            buffer,
            bounds,
            cells.x + cells.width - 1,
            cells.y + cells.height - 1,
            "+",
            face.fg(theme::window_border()),
        );
    }
}
