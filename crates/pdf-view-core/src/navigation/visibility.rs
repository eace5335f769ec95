//! Page extents and scroll-position polling
//!
//! [`ScrollObserver`] plays both injected roles the page tracker needs: it
//! scrolls the viewing container to a page, and it reports which page is
//! current. A page is current while the container's vertical centre line
//! lies inside its extent; gaps between pages keep the previous report.
//!
//! A page the observer scrolled to itself (navigation or a zoom relayout)
//! stays reported until the next user scroll, even when the scroll range
//! could not bring its top edge to the origin.

use crate::types::PageNumber;

/// Scrolls the viewing container so a page's top edge sits at the scroll origin
pub trait PageScroller {
    /// Returns `false` when the page has no container to scroll to
    fn scroll_to_page(&mut self, page: PageNumber) -> bool;
}

/// Reports a page when its extent starts covering the container's centre line
pub trait VisibilityReporter {
    fn poll_visible_page(&mut self) -> Option<PageNumber>;
}

/// Vertical extents of the page containers, stacked with a fixed gap
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    tops: Vec<f64>,
    heights: Vec<f64>,
    gap: f64,
}

impl PageLayout {
    pub fn new(gap: f64) -> Self {
        Self {
            tops: Vec::new(),
            heights: Vec::new(),
            gap,
        }
    }

    pub fn from_heights(heights: impl IntoIterator<Item = f64>, gap: f64) -> Self {
        let mut layout = Self::new(gap);
        for height in heights {
            layout.push(height);
        }
        layout
    }

    pub fn push(&mut self, height: f64) {
        let top = match (self.tops.last(), self.heights.last()) {
            (Some(top), Some(last_height)) => top + last_height + self.gap,
            _ => 0.0,
        };
        self.tops.push(top);
        self.heights.push(height);
    }

    /// Change one page's height and shift every page below it
    pub fn set_height(&mut self, page: PageNumber, height: f64) -> bool {
        let Some(index) = Self::index(page).filter(|i| *i < self.heights.len()) else {
            return false;
        };
        self.heights[index] = height;
        for i in index + 1..self.tops.len() {
            self.tops[i] = self.tops[i - 1] + self.heights[i - 1] + self.gap;
        }
        true
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    pub fn top(&self, page: PageNumber) -> Option<f64> {
        Self::index(page).and_then(|i| self.tops.get(i).copied())
    }

    pub fn height(&self, page: PageNumber) -> Option<f64> {
        Self::index(page).and_then(|i| self.heights.get(i).copied())
    }

    pub fn total_height(&self) -> f64 {
        match (self.tops.last(), self.heights.last()) {
            (Some(top), Some(height)) => top + height,
            _ => 0.0,
        }
    }

    /// Page whose extent `[top, top + height)` contains `y`
    pub fn page_at(&self, y: f64) -> Option<PageNumber> {
        // First page starting strictly after y, minus one
        let index = self.tops.partition_point(|top| *top <= y).checked_sub(1)?;
        (y < self.tops[index] + self.heights[index]).then_some(index + 1)
    }

    fn index(page: PageNumber) -> Option<usize> {
        page.checked_sub(1)
    }
}

/// Polling visibility reporter over a [`PageLayout`]
#[derive(Debug, Clone)]
pub struct ScrollObserver {
    layout: PageLayout,
    scroll_top: f64,
    viewport_height: f64,
    last_reported: Option<PageNumber>,
    /// Set by programmatic scrolls; cleared by the next user scroll
    held: bool,
}

impl ScrollObserver {
    pub fn new(layout: PageLayout, viewport_height: f64) -> Self {
        Self {
            layout,
            scroll_top: 0.0,
            viewport_height,
            last_reported: None,
            held: false,
        }
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    pub fn max_scroll(&self) -> f64 {
        (self.layout.total_height() - self.viewport_height).max(0.0)
    }

    /// User scroll; the offset is clamped to the scrollable range
    pub fn set_scroll_top(&mut self, scroll_top: f64) {
        self.held = false;
        self.clamp_scroll(scroll_top);
    }

    pub fn set_viewport_height(&mut self, viewport_height: f64) {
        self.viewport_height = viewport_height;
        self.clamp_scroll(self.scroll_top);
    }

    /// Swap in a new layout (after a zoom change) and keep `anchor` at the
    /// scroll origin. `anchor` stays the reported page until the user scrolls.
    pub fn relayout(&mut self, layout: PageLayout, anchor: PageNumber) {
        self.layout = layout;
        match self.layout.top(anchor) {
            Some(top) => {
                self.clamp_scroll(top);
                self.hold(anchor);
            }
            None => self.clamp_scroll(self.scroll_top),
        }
    }

    /// Whether the last programmatic scroll still pins the reported page
    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn center_line(&self) -> f64 {
        self.scroll_top + self.viewport_height / 2.0
    }

    fn clamp_scroll(&mut self, scroll_top: f64) {
        self.scroll_top = scroll_top.clamp(0.0, self.max_scroll());
    }

    fn hold(&mut self, page: PageNumber) {
        self.last_reported = Some(page);
        self.held = true;
    }
}

impl PageScroller for ScrollObserver {
    fn scroll_to_page(&mut self, page: PageNumber) -> bool {
        match self.layout.top(page) {
            Some(top) => {
                self.clamp_scroll(top);
                self.hold(page);
                true
            }
            None => false,
        }
    }
}

impl VisibilityReporter for ScrollObserver {
    fn poll_visible_page(&mut self) -> Option<PageNumber> {
        if self.held {
            return None;
        }
        let page = self.layout.page_at(self.center_line())?;
        if self.last_reported == Some(page) {
            return None;
        }
        self.last_reported = Some(page);
        Some(page)
    }
}
