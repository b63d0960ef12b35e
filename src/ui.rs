//! Clipped drawing helpers for the terminal host.
//!
//! Window geometry comes from the manager in viewport units and routinely
//! hangs off the screen (windows may be dragged three quarters past the left
//! edge). Every write goes through these helpers so a rectangle that drifts
//! outside the buffer is clipped instead of panicking inside `Buffer`.
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

pub(crate) fn safe_set_string(
    buffer: &mut Buffer,
    bounds: Rect,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
) {
    if bounds.width == 0 || bounds.height == 0 {
        return;
    }
    let max_x = bounds.x.saturating_add(bounds.width);
    let max_y = bounds.y.saturating_add(bounds.height);
    if x < bounds.x || x >= max_x || y < bounds.y || y >= max_y {
        return;
    }
    let available = max_x.saturating_sub(x);
    if available == 0 {
        return;
    }
    let text = truncate_to_width(text, available as usize);
    buffer.set_string(x, y, text, style);
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    value.chars().take(width).collect()
}

/// Half-open cell containment.
pub(crate) fn cell_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

/// Paint `style` over every cell of `rect` that lies inside the buffer,
/// replacing the symbol with a blank.
pub(crate) fn fill_rect(buffer: &mut Buffer, rect: Rect, style: Style) {
    let bounds = rect.intersection(buffer.area);
    if bounds.width == 0 || bounds.height == 0 {
        return;
    }
    for y in bounds.y..bounds.y.saturating_add(bounds.height) {
        for x in bounds.x..bounds.x.saturating_add(bounds.width) {
            if let Some(cell) = buffer.cell_mut((x, y)) {
                cell.set_symbol(" ");
                cell.set_style(style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_string_clips_to_bounds() {
        let area = Rect::new(0, 0, 6, 2);
        let mut buffer = Buffer::empty(area);
        safe_set_string(&mut buffer, area, 3, 0, "abcdef", Style::default());
        assert_eq!(buffer.cell((3, 0)).unwrap().symbol(), "a");
        assert_eq!(buffer.cell((5, 0)).unwrap().symbol(), "c");
        // out of bounds row is ignored
        safe_set_string(&mut buffer, area, 0, 5, "zz", Style::default());
        assert_eq!(buffer.cell((0, 1)).unwrap().symbol(), " ");
    }

    #[test]
    fn fill_rect_ignores_offscreen_part() {
        let area = Rect::new(0, 0, 4, 3);
        let mut buffer = Buffer::empty(area);
        for y in 0..3 {
            for x in 0..4 {
                buffer.cell_mut((x, y)).unwrap().set_symbol(".");
            }
        }
        fill_rect(&mut buffer, Rect::new(2, 1, 10, 10), Style::default());
        assert_eq!(buffer.cell((1, 1)).unwrap().symbol(), ".");
        assert_eq!(buffer.cell((2, 1)).unwrap().symbol(), " ");
        assert_eq!(buffer.cell((3, 2)).unwrap().symbol(), " ");
    }

    #[test]
    fn cell_contains_excludes_far_edges() {
        let r = Rect::new(2, 3, 4, 2);
        assert!(cell_contains(r, 2, 3));
        assert!(cell_contains(r, 5, 4));
        assert!(!cell_contains(r, 6, 4));
        assert!(!cell_contains(r, 2, 5));
    }

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate_to_width("héllo", 3), "hél");
        assert_eq!(truncate_to_width("ok", 9), "ok");
    }
}
