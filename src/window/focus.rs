use super::{WindowEntity, WindowId};
use crate::constants::INITIAL_Z_INDEX;

/// Single source of z-index values. Every assignment takes the next value,
/// so no two windows ever share one and the counter never goes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZCounter {
    current: u64,
}

impl ZCounter {
    pub fn new() -> Self {
        Self::starting_at(INITIAL_Z_INDEX)
    }

    pub fn starting_at(current: u64) -> Self {
        Self { current }
    }

    /// Highest value handed out so far (or the starting value).
    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn next(&mut self) -> u64 {
        self.current = self.current.saturating_add(1);
        self.current
    }
}

impl Default for ZCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// The window that should receive focus after the active one goes away:
/// the visible window focused most recently, ties going to the one stacked
/// higher.
pub fn pick_next_focus<'a, C: 'a>(
    windows: impl IntoIterator<Item = &'a WindowEntity<C>>,
) -> Option<WindowId> {
    windows
        .into_iter()
        .filter(|w| w.is_visible())
        .max_by_key(|w| (w.last_focused, w.z_index))
        .map(|w| w.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Point, Size};

    fn entity(id: &str, last_focused: u64, z_index: u64) -> WindowEntity<()> {
        WindowEntity {
            id: WindowId::new(id),
            title: id.to_string(),
            content: (),
            is_open: true,
            is_minimized: false,
            is_fullscreen: false,
            position: Point::ORIGIN,
            size: Size::new(300.0, 200.0),
            z_index,
            original_position: None,
            original_size: None,
            no_scroll: false,
            last_focused,
        }
    }

    #[test]
    fn counter_starts_above_ten() {
        let mut z = ZCounter::new();
        assert_eq!(z.current(), 10);
        assert_eq!(z.next(), 11);
        assert_eq!(z.next(), 12);
        assert_eq!(z.current(), 12);
    }

    #[test]
    fn picks_most_recent_visible() {
        let mut minimized = entity("c", 99, 30);
        minimized.is_minimized = true;
        let windows = [entity("a", 5, 11), entity("b", 7, 12), minimized];
        assert_eq!(pick_next_focus(&windows), Some(WindowId::new("b")));
    }

    #[test]
    fn equal_timestamps_prefer_higher_z_index() {
        let windows = [entity("low", 40, 13), entity("high", 40, 21)];
        assert_eq!(pick_next_focus(&windows), Some(WindowId::new("high")));
        let reversed = [entity("high", 40, 21), entity("low", 40, 13)];
        assert_eq!(pick_next_focus(&reversed), Some(WindowId::new("high")));
    }

    #[test]
    fn nothing_visible_means_no_focus() {
        let mut hidden = entity("a", 1, 11);
        hidden.is_minimized = true;
        assert_eq!(pick_next_focus(&[hidden]), None);
        let empty: [WindowEntity<()>; 0] = [];
        assert_eq!(pick_next_focus(&empty), None);
    }
}
