//! Two-pane split state: charts on the left, insights on the right.

use std::collections::HashMap;

/// Narrowest share either pane may get, in percent.
pub const MIN_PERCENT: f32 = 20.0;
pub const MAX_PERCENT: f32 = 80.0;

/// Width split between the left and right pane, driven by dragging the handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitPane {
    left_percent: f32,
    dragging: bool,
}

impl Default for SplitPane {
    fn default() -> Self {
        Self {
            left_percent: 60.0,
            dragging: false,
        }
    }
}

impl SplitPane {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn left_percent(&self) -> f32 {
        self.left_percent
    }

    pub fn right_percent(&self) -> f32 {
        100.0 - self.left_percent
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    /// Move the split to the pointer. Ignored unless a drag is in progress or
    /// the pane has no width.
    pub fn drag_to(&mut self, pointer_x: f32, pane_left: f32, pane_width: f32) {
        if !self.dragging || pane_width <= 0.0 || !pointer_x.is_finite() {
            return;
        }
        let pct = (pointer_x - pane_left) / pane_width * 100.0;
        self.left_percent = pct.clamp(MIN_PERCENT, MAX_PERCENT);
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Left pane width in pixels for a total of `total_px`.
    pub fn left_width(&self, total_px: f32) -> f32 {
        total_px * self.left_percent / 100.0
    }
}

/// Per-chart drawings for the chart pane, one per chart index.
///
/// Each entry remembers the width it was drawn at; asking for another width
/// replaces it, so resizing never accumulates stale drawings.
#[derive(Debug)]
pub struct ChartCache<T> {
    entries: HashMap<usize, (u32, T)>,
}

impl<T> Default for ChartCache<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T> ChartCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The drawing of chart `idx` at `width_px`, made with `draw` if missing
    /// or drawn at another width.
    pub fn get_or_draw(&mut self, idx: usize, width_px: u32, draw: impl FnOnce() -> T) -> &T {
        if self.entries.get(&idx).is_some_and(|(w, _)| *w != width_px) {
            self.entries.remove(&idx);
        }
        &self.entries.entry(idx).or_insert_with(|| (width_px, draw())).1
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_sixty_forty() {
        let pane = SplitPane::new();
        assert_eq!(pane.left_percent(), 60.0);
        assert_eq!(pane.right_percent(), 40.0);
        assert!(!pane.is_dragging());
        assert_eq!(pane.left_width(1000.0), 600.0);
    }

    #[test]
    fn drag_moves_and_clamps() {
        let mut pane = SplitPane::new();
        pane.begin_drag();
        pane.drag_to(550.0, 100.0, 1000.0);
        assert!((pane.left_percent() - 45.0).abs() < 1e-4);

        pane.drag_to(120.0, 100.0, 1000.0);
        assert_eq!(pane.left_percent(), MIN_PERCENT);
        pane.drag_to(5000.0, 100.0, 1000.0);
        assert_eq!(pane.left_percent(), MAX_PERCENT);
        pane.end_drag();
        assert!(!pane.is_dragging());
    }

    #[test]
    fn pointer_moves_without_drag_are_ignored() {
        let mut pane = SplitPane::new();
        pane.drag_to(300.0, 0.0, 1000.0);
        assert_eq!(pane.left_percent(), 60.0);

        pane.begin_drag();
        pane.drag_to(300.0, 0.0, 0.0);
        assert_eq!(pane.left_percent(), 60.0);
    }

    #[test]
    fn chart_cache_keeps_one_drawing_per_chart() {
        let mut cache = ChartCache::new();
        let mut draws = 0;
        for width in [400, 410, 420, 410] {
            for idx in 0..3 {
                cache.get_or_draw(idx, width, || {
                    draws += 1;
                    width
                });
            }
        }
        assert_eq!(cache.len(), 3);
        assert_eq!(draws, 12);

        // same width again is served from the cache
        assert_eq!(*cache.get_or_draw(1, 410, || unreachable!()), 410);
        cache.clear();
        assert!(cache.is_empty());
    }
}
