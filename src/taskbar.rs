use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::theme;
use crate::ui::{cell_contains, fill_rect, safe_set_string, truncate_to_width};
use crate::window::{WindowId, WindowManager};

const START_LABEL: &str = " Start ";
const MAX_LABEL: usize = 18;

#[derive(Debug, Clone)]
struct TaskbarHit {
    id: WindowId,
    rect: Rect,
}

/// Bottom bar listing every open window, minimized ones included.
#[derive(Debug, Default)]
pub struct Taskbar {
    area: Rect,
    hits: Vec<TaskbarHit>,
}

impl Taskbar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Split `area` into the desktop above and a taskbar of `rows` rows at
    /// the bottom.
    pub fn split_area(&mut self, area: Rect, rows: u16) -> (Rect, Rect) {
        let rows = rows.min(area.height);
        let desktop = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: area.height - rows,
        };
        let bar = Rect {
            x: area.x,
            y: area.y.saturating_add(area.height - rows),
            width: area.width,
            height: rows,
        };
        self.area = bar;
        (desktop, bar)
    }

    pub fn render<C>(&mut self, buffer: &mut Buffer, windows: &WindowManager<C>) {
        self.hits.clear();
        let area = self.area;
        let bounds = area.intersection(buffer.area);
        if bounds.width == 0 || bounds.height == 0 {
            return;
        }
        let base = Style::default()
            .bg(theme::taskbar_bg())
            .fg(theme::taskbar_fg());
        fill_rect(buffer, bounds, base);

        let y = area.y;
        let max_x = area.x.saturating_add(area.width);
        let mut x = area.x;
        safe_set_string(
            buffer,
            bounds,
            x,
            y,
            START_LABEL,
            base.add_modifier(Modifier::BOLD),
        );
        x = x.saturating_add(START_LABEL.chars().count() as u16);

        let active = windows.active_id();
        for window in windows.windows() {
            let label = format!(" {} ", truncate_to_width(window.title(), MAX_LABEL));
            let width = label.chars().count() as u16;
            if x.saturating_add(width) > max_x {
                break;
            }
            let style = if active == Some(window.id()) {
                Style::default()
                    .bg(theme::taskbar_active_bg())
                    .fg(theme::taskbar_fg())
                    .add_modifier(Modifier::BOLD)
            } else if window.is_minimized() {
                base.fg(theme::taskbar_minimized_fg())
            } else {
                base
            };
            safe_set_string(buffer, bounds, x, y, &label, style);
            self.hits.push(TaskbarHit {
                id: window.id().clone(),
                rect: Rect {
                    x,
                    y: area.y,
                    width,
                    height: area.height,
                },
            });
            x = x.saturating_add(width + 1);
        }
    }

    /// Window whose taskbar entry covers the cell, as of the last render.
    pub fn hit(&self, column: u16, row: u16) -> Option<&WindowId> {
        self.hits
            .iter()
            .find(|hit| cell_contains(hit.rect, column, row))
            .map(|hit| &hit.id)
    }
}
