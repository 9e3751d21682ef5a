// ABOUTME: Scroll window over the element list with a padded band around the cursor

use std::ops::Range;

/// Keeps a persistent scroll offset and only moves it once the cursor leaves
/// the band `padding` rows inside the window edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    offset: usize,
    padding: usize,
}

impl Viewport {
    pub fn new(padding: usize) -> Self {
        Self { offset: 0, padding }
    }

    /// Rows `[top, bottom)` to display. With no cursor row only the clamp is
    /// applied.
    pub fn window(&mut self, total: usize, cursor: Option<usize>, height: usize) -> Range<usize> {
        if height == 0 {
            return 0..0;
        }
        if total <= height {
            self.offset = 0;
            return 0..total;
        }

        // A band wider than half the window would push the cursor out of it.
        let padding = self.padding.min((height - 1) / 2);
        if let Some(row) = cursor {
            if row < self.offset + padding {
                self.offset = row.saturating_sub(padding);
            } else if row + padding >= self.offset + height {
                self.offset = row + padding + 1 - height;
            }
        }
        self.offset = self.offset.min(total - height);

        self.offset..(self.offset + height).min(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_list_is_shown_whole() {
        let mut viewport = Viewport::new(2);
        assert_eq!(viewport.window(5, Some(4), 10), 0..5);
        assert_eq!(viewport.window(10, Some(9), 10), 0..10);
    }

    #[test]
    fn test_zero_height_is_empty() {
        let mut viewport = Viewport::new(2);
        assert_eq!(viewport.window(50, Some(10), 0), 0..0);
    }

    #[test]
    fn test_no_scroll_inside_band() {
        let mut viewport = Viewport::new(2);
        for row in 0..8 {
            assert_eq!(viewport.window(30, Some(row), 10), 0..10, "row {row}");
        }
    }

    #[test]
    fn test_scrolls_one_row_at_a_time_past_band() {
        let mut viewport = Viewport::new(2);
        assert_eq!(viewport.window(30, Some(8), 10), 1..11);
        assert_eq!(viewport.window(30, Some(9), 10), 2..12);
        // Moving back up inside the band does not scroll.
        assert_eq!(viewport.window(30, Some(6), 10), 2..12);
        assert_eq!(viewport.window(30, Some(3), 10), 1..11);
    }

    #[test]
    fn test_clamps_to_end_of_list() {
        let mut viewport = Viewport::new(2);
        assert_eq!(viewport.window(30, Some(29), 10), 20..30);
        // List shrinks underneath the offset.
        assert_eq!(viewport.window(25, Some(24), 10), 15..25);
    }

    #[test]
    fn test_window_bounds_and_cursor_containment() {
        for padding in 0..6 {
            let mut viewport = Viewport::new(padding);
            for height in 1..12 {
                for total in height..40 {
                    for row in (0..total).chain((0..total).rev()) {
                        let window = viewport.window(total, Some(row), height);
                        assert!(window.end - window.start <= height);
                        assert!(
                            window.contains(&row),
                            "padding {padding} height {height} total {total} row {row} window {window:?}"
                        );
                    }
                }
            }
        }
    }
}
