//! Windowed rendering: only rows intersecting the viewport (plus overscan)
//! are materialized.
//!
//! Units are whatever the host measures in (terminal lines in the TUI).
//! Row heights start at an estimate and are replaced by measurements when
//! the host can provide them.

use std::ops::Range;

pub const DEFAULT_OVERSCAN: usize = 5;
/// Distance from the end of content, in height units, below which more rows are wanted.
pub const DEFAULT_FETCH_THRESHOLD: u64 = 500;

/// Row heights with prefix sums for offset lookups.
#[derive(Debug, Clone)]
pub struct RowHeights {
    estimate: u32,
    measured: Vec<Option<u32>>,
    // prefix[i] is the start offset of row i; prefix[len] is the total size.
    prefix: Vec<u64>,
}

impl RowHeights {
    pub fn new(estimate: u32) -> Self {
        Self {
            estimate: estimate.max(1),
            measured: Vec::new(),
            prefix: vec![0],
        }
    }

    pub fn estimate(&self) -> u32 {
        self.estimate
    }

    pub fn len(&self) -> usize {
        self.measured.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measured.is_empty()
    }

    /// Grow or shrink to `len` rows. New rows use the estimate.
    pub fn set_len(&mut self, len: usize) {
        if len == self.len() {
            return;
        }
        self.measured.resize(len, None);
        self.rebuild();
    }

    /// Record a measured height. `None` reverts the row to the estimate.
    pub fn set(&mut self, index: usize, height: Option<u32>) -> bool {
        match self.measured.get_mut(index) {
            Some(slot) if *slot != height => {
                *slot = height;
                self.rebuild_from(index);
                true
            }
            _ => false,
        }
    }

    pub fn height(&self, index: usize) -> u32 {
        self.measured
            .get(index)
            .copied()
            .flatten()
            .unwrap_or(self.estimate)
    }

    pub fn start_of(&self, index: usize) -> u64 {
        self.prefix[index.min(self.len())]
    }

    pub fn total(&self) -> u64 {
        self.prefix[self.len()]
    }

    /// Index of the row containing `offset`, clamped to the last row.
    pub fn index_at(&self, offset: u64) -> usize {
        let index = self.prefix[1..].partition_point(|&end| end <= offset);
        index.min(self.len().saturating_sub(1))
    }

    fn rebuild(&mut self) {
        self.prefix.truncate(1);
        self.rebuild_from(0);
    }

    fn rebuild_from(&mut self, index: usize) {
        self.prefix.truncate(index + 1);
        for i in index..self.len() {
            let end = self.prefix[i] + u64::from(self.height(i));
            self.prefix.push(end);
        }
    }
}

/// Visible-range computation, pluggable per table.
pub trait RangeStrategy: Send {
    fn compute_visible_range(
        &self,
        scroll_offset: u64,
        viewport_size: u32,
        heights: &RowHeights,
    ) -> Range<usize>;

    /// Whether measured heights are taken into account.
    fn uses_measurements(&self) -> bool {
        true
    }
}

/// Uniform rows of the estimated height. Constant time, ignores measurements.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedRange;

impl RangeStrategy for FixedRange {
    fn compute_visible_range(
        &self,
        scroll_offset: u64,
        viewport_size: u32,
        heights: &RowHeights,
    ) -> Range<usize> {
        let len = heights.len();
        if len == 0 || viewport_size == 0 {
            return 0..0;
        }
        let row = u64::from(heights.estimate());
        let start = ((scroll_offset / row) as usize).min(len - 1);
        let end = (scroll_offset + u64::from(viewport_size)).div_ceil(row) as usize;
        start..end.min(len)
    }

    fn uses_measurements(&self) -> bool {
        false
    }
}

/// Measured-or-estimated heights, located by binary search over prefix sums.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeasuredRange;

impl RangeStrategy for MeasuredRange {
    fn compute_visible_range(
        &self,
        scroll_offset: u64,
        viewport_size: u32,
        heights: &RowHeights,
    ) -> Range<usize> {
        if heights.is_empty() || viewport_size == 0 {
            return 0..0;
        }
        let start = heights.index_at(scroll_offset);
        let last = heights.index_at(scroll_offset + u64::from(viewport_size) - 1);
        start..last + 1
    }
}

/// A row to draw at an absolute position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualItem {
    pub index: usize,
    pub start: u64,
    pub size: u32,
}

pub struct Virtualizer {
    strategy: Box<dyn RangeStrategy>,
    heights: RowHeights,
    scroll_offset: u64,
    viewport: u32,
    overscan: usize,
}

impl std::fmt::Debug for Virtualizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Virtualizer")
            .field("rows", &self.heights.len())
            .field("scroll_offset", &self.scroll_offset)
            .field("viewport", &self.viewport)
            .field("overscan", &self.overscan)
            .finish()
    }
}

impl Virtualizer {
    pub fn new(estimated_row_height: u32, strategy: impl RangeStrategy + 'static) -> Self {
        Self {
            strategy: Box::new(strategy),
            heights: RowHeights::new(estimated_row_height),
            scroll_offset: 0,
            viewport: 0,
            overscan: DEFAULT_OVERSCAN,
        }
    }

    pub fn fixed(estimated_row_height: u32) -> Self {
        Self::new(estimated_row_height, FixedRange)
    }

    pub fn measured(estimated_row_height: u32) -> Self {
        Self::new(estimated_row_height, MeasuredRange)
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn row_count(&self) -> usize {
        self.heights.len()
    }

    pub fn set_row_count(&mut self, count: usize) {
        self.heights.set_len(count);
        self.clamp_scroll();
    }

    pub fn viewport(&self) -> u32 {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: u32) {
        self.viewport = viewport;
        self.clamp_scroll();
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn scroll_to_offset(&mut self, offset: u64) {
        self.scroll_offset = offset;
        self.clamp_scroll();
    }

    pub fn scroll_to_index(&mut self, index: usize) {
        self.scroll_to_offset(self.heights.start_of(index));
    }

    /// Scroll the least amount that brings row `index` fully into view.
    pub fn ensure_visible(&mut self, index: usize) {
        let start = self.heights.start_of(index);
        let end = start + u64::from(self.heights.height(index));
        if start < self.scroll_offset {
            self.scroll_to_offset(start);
        } else if end > self.scroll_offset + u64::from(self.viewport) {
            self.scroll_to_offset(end.saturating_sub(u64::from(self.viewport)));
        }
    }

    pub fn reset_scroll(&mut self) {
        self.scroll_to_index(0);
    }

    /// Record a row measurement; `None` when the host cannot measure.
    pub fn measure(&mut self, index: usize, height: Option<u32>) -> bool {
        if !self.strategy.uses_measurements() {
            return false;
        }
        let changed = self.heights.set(index, height);
        if changed {
            self.clamp_scroll();
        }
        changed
    }

    pub fn visible_range(&self) -> Range<usize> {
        self.strategy
            .compute_visible_range(self.scroll_offset, self.viewport, &self.heights)
    }

    /// Visible range extended by the overscan on both sides.
    pub fn render_range(&self) -> Range<usize> {
        let visible = self.visible_range();
        if visible.is_empty() {
            return visible;
        }
        let start = visible.start.saturating_sub(self.overscan);
        let end = (visible.end + self.overscan).min(self.row_count());
        start..end
    }

    pub fn virtual_items(&self) -> Vec<VirtualItem> {
        let fixed = !self.strategy.uses_measurements();
        self.render_range()
            .map(|index| {
                if fixed {
                    let size = self.heights.estimate();
                    VirtualItem {
                        index,
                        start: index as u64 * u64::from(size),
                        size,
                    }
                } else {
                    VirtualItem {
                        index,
                        start: self.heights.start_of(index),
                        size: self.heights.height(index),
                    }
                }
            })
            .collect()
    }

    pub fn total_size(&self) -> u64 {
        if self.strategy.uses_measurements() {
            self.heights.total()
        } else {
            self.row_count() as u64 * u64::from(self.heights.estimate())
        }
    }

    /// Content left below the viewport.
    pub fn remaining(&self) -> u64 {
        self.total_size()
            .saturating_sub(self.scroll_offset + u64::from(self.viewport))
    }

    pub fn should_fetch_more(&self, threshold: u64) -> bool {
        self.remaining() < threshold
    }

    fn clamp_scroll(&mut self) {
        let max = self.total_size().saturating_sub(u64::from(self.viewport));
        self.scroll_offset = self.scroll_offset.min(max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measured(rows: usize, viewport: u32) -> Virtualizer {
        let mut v = Virtualizer::measured(10).with_overscan(2);
        v.set_row_count(rows);
        v.set_viewport(viewport);
        v
    }

    #[test]
    fn test_empty_has_no_items() {
        let v = measured(0, 100);
        assert_eq!(v.visible_range(), 0..0);
        assert!(v.virtual_items().is_empty());
        assert_eq!(v.total_size(), 0);
        assert!(v.should_fetch_more(DEFAULT_FETCH_THRESHOLD));
    }

    #[test]
    fn test_visible_and_render_range() {
        let mut v = measured(100, 50);
        v.scroll_to_offset(200);
        assert_eq!(v.visible_range(), 20..25);
        assert_eq!(v.render_range(), 18..27);

        let items = v.virtual_items();
        assert_eq!(items.first(), Some(&VirtualItem { index: 18, start: 180, size: 10 }));
        assert_eq!(items.len(), 9);
    }

    #[test]
    fn test_partial_rows_are_visible() {
        let mut v = measured(100, 50);
        v.scroll_to_offset(205);
        assert_eq!(v.visible_range(), 20..26);
    }

    #[test]
    fn test_fixed_and_measured_agree_without_measurements() {
        let mut fixed = Virtualizer::fixed(10);
        let mut measured = Virtualizer::measured(10);
        for v in [&mut fixed, &mut measured] {
            v.set_row_count(40);
            v.set_viewport(35);
            v.scroll_to_offset(123);
        }
        assert_eq!(fixed.visible_range(), measured.visible_range());
        assert_eq!(fixed.total_size(), measured.total_size());
    }

    #[test]
    fn test_measurement_shifts_offsets() {
        let mut v = measured(10, 30);
        assert!(v.measure(0, Some(25)));
        assert_eq!(v.total_size(), 115);
        assert_eq!(v.visible_range(), 0..2);
        let items = v.virtual_items();
        assert_eq!(items[1].start, 25);

        // Unmeasurable host falls back to the estimate.
        assert!(v.measure(0, None));
        assert_eq!(v.total_size(), 100);
        assert!(!v.measure(0, None));
        assert!(!v.measure(99, Some(5)));
    }

    #[test]
    fn test_fixed_strategy_ignores_measurements() {
        let mut v = Virtualizer::fixed(10);
        v.set_row_count(5);
        assert!(!v.measure(0, Some(40)));
        assert_eq!(v.total_size(), 50);
    }

    #[test]
    fn test_scroll_clamps_to_content() {
        let mut v = measured(10, 30);
        v.scroll_to_offset(1_000);
        assert_eq!(v.scroll_offset(), 70);
        v.scroll_to_index(2);
        assert_eq!(v.scroll_offset(), 20);
        v.set_row_count(4);
        assert_eq!(v.scroll_offset(), 10);
    }

    #[test]
    fn test_ensure_visible() {
        let mut v = measured(100, 50);
        v.ensure_visible(10);
        assert_eq!(v.scroll_offset(), 60);
        v.ensure_visible(3);
        assert_eq!(v.scroll_offset(), 30);
        v.reset_scroll();
        assert_eq!(v.scroll_offset(), 0);
    }

    #[test]
    fn test_should_fetch_more_near_end() {
        let mut v = measured(100, 100);
        assert!(!v.should_fetch_more(500));
        v.scroll_to_offset(450);
        assert!(v.should_fetch_more(500));
        assert_eq!(v.remaining(), 450);
    }
}
