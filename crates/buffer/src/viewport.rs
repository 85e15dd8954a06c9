/// Viewport for wrap-aware scrolling.
///
/// Rows are display-line indices, not logical lines: one long logical
/// line may occupy several rows.
#[derive(Debug, Clone)]
pub struct Viewport {
    /// First visible display row (0-based)
    pub top_row: usize,
    /// Number of visible rows
    pub height: usize,
}

impl Viewport {
    /// Create a new viewport
    pub fn new(height: usize) -> Self {
        Self { top_row: 0, height }
    }

    /// Update viewport height
    pub fn resize(&mut self, height: usize) {
        self.height = height;
    }

    /// Index of the last visible row (exclusive)
    pub fn bottom_row(&self) -> usize {
        self.top_row + self.height
    }

    /// Check if row is visible
    pub fn is_row_visible(&self, row: usize) -> bool {
        row >= self.top_row && row < self.bottom_row()
    }

    /// Scroll so `row` is visible, then clamp to `[0, total_rows - height]`.
    /// Returns true if viewport was changed
    pub fn ensure_row_visible(&mut self, row: usize, total_rows: usize) -> bool {
        let before = self.top_row;

        if row < self.top_row {
            self.top_row = row;
        } else if row >= self.bottom_row() {
            self.top_row = row + 1 - self.height.max(1);
        }

        let max_top = total_rows.saturating_sub(self.height);
        if self.top_row > max_top {
            self.top_row = max_top;
        }

        self.top_row != before
    }

    /// Screen row for a display row, if visible
    pub fn row_to_screen(&self, row: usize) -> Option<usize> {
        self.is_row_visible(row).then(|| row - self.top_row)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(23)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_visibility() {
        let vp = Viewport::new(24);
        assert!(vp.is_row_visible(0));
        assert!(vp.is_row_visible(23));
        assert!(!vp.is_row_visible(24));
    }

    #[test]
    fn test_ensure_row_visible_below() {
        let mut vp = Viewport::new(24);

        let changed = vp.ensure_row_visible(30, 100);
        assert!(changed);
        assert!(vp.is_row_visible(30));
        assert_eq!(vp.top_row, 7); // 30 - 23
    }

    #[test]
    fn test_ensure_row_visible_above() {
        let mut vp = Viewport::new(24);
        vp.top_row = 10;

        let changed = vp.ensure_row_visible(5, 100);
        assert!(changed);
        assert_eq!(vp.top_row, 5);
    }

    #[test]
    fn test_ensure_row_visible_noop() {
        let mut vp = Viewport::new(24);
        vp.top_row = 10;
        assert!(!vp.ensure_row_visible(20, 100));
        assert_eq!(vp.top_row, 10);
    }

    #[test]
    fn test_offset_clamped_after_shrink() {
        // Content shorter than the window pins the offset at zero
        let mut vp = Viewport::new(24);
        vp.top_row = 40;
        vp.ensure_row_visible(3, 10);
        assert_eq!(vp.top_row, 0);
    }

    #[test]
    fn test_zero_height_does_not_underflow() {
        let mut vp = Viewport::new(0);
        vp.ensure_row_visible(5, 10);
        assert!(vp.top_row <= 10);
    }

    #[test]
    fn test_row_to_screen() {
        let mut vp = Viewport::new(5);
        vp.top_row = 10;
        assert_eq!(vp.row_to_screen(12), Some(2));
        assert_eq!(vp.row_to_screen(9), None);
        assert_eq!(vp.row_to_screen(15), None);
    }
}
