use crate::layout::floating::{ChromeLayout, title_bar_for_region};
use crate::layout::{Point, Rect, rect_contains};

/// What a press on a window's title bar means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    Minimize,
    Maximize,
    Close,
    Drag,
    None,
}

/// The three title bar buttons, left to right. Close sits at the far right.
pub fn header_buttons(chrome: &ChromeLayout, rect: Rect) -> [(HeaderAction, Rect); 3] {
    let height = chrome.title_bar_height.min(rect.size.height).max(0.0);
    let width = chrome.button_width.min(rect.size.width / 3.0).max(0.0);
    let right = rect.right();
    let top = rect.top();
    [
        (
            HeaderAction::Minimize,
            Rect::new(right - 3.0 * width, top, width, height),
        ),
        (
            HeaderAction::Maximize,
            Rect::new(right - 2.0 * width, top, width, height),
        ),
        (HeaderAction::Close, Rect::new(right - width, top, width, height)),
    ]
}

/// Classify a point against the title bar of a window occupying `rect`.
pub fn hit_test_header(chrome: &ChromeLayout, rect: Rect, point: Point) -> HeaderAction {
    let Some(title_bar) = title_bar_for_region((), rect, chrome) else {
        return HeaderAction::None;
    };
    if !rect_contains(title_bar.rect, point) {
        return HeaderAction::None;
    }
    header_buttons(chrome, rect)
        .into_iter()
        .find(|(_, button)| rect_contains(*button, point))
        .map(|(action, _)| action)
        .unwrap_or(HeaderAction::Drag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_sit_on_the_right_of_the_title_bar() {
        let chrome = ChromeLayout::default();
        let rect = Rect::new(100.0, 50.0, 400.0, 300.0);
        assert_eq!(
            hit_test_header(&chrome, rect, Point::new(490.0, 60.0)),
            HeaderAction::Close
        );
        assert_eq!(
            hit_test_header(&chrome, rect, Point::new(470.0, 60.0)),
            HeaderAction::Maximize
        );
        assert_eq!(
            hit_test_header(&chrome, rect, Point::new(440.0, 60.0)),
            HeaderAction::Minimize
        );
        assert_eq!(
            hit_test_header(&chrome, rect, Point::new(200.0, 60.0)),
            HeaderAction::Drag
        );
    }

    #[test]
    fn body_is_not_header() {
        let chrome = ChromeLayout::default();
        let rect = Rect::new(100.0, 50.0, 400.0, 300.0);
        assert_eq!(
            hit_test_header(&chrome, rect, Point::new(200.0, 80.0)),
            HeaderAction::None
        );
        assert_eq!(
            hit_test_header(&chrome, rect, Point::new(50.0, 60.0)),
            HeaderAction::None
        );
    }

    #[test]
    fn narrow_windows_shrink_buttons() {
        let chrome = ChromeLayout::default();
        let rect = Rect::new(0.0, 0.0, 30.0, 100.0);
        let buttons = header_buttons(&chrome, rect);
        assert_eq!(buttons[0].1, Rect::new(0.0, 0.0, 10.0, 30.0));
        assert_eq!(buttons[2].1, Rect::new(20.0, 0.0, 10.0, 30.0));
    }
}
