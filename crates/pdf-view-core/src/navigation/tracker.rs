use super::PageScroller;
use crate::constants::MIN_PAGE;
use crate::events::Subscriber;
use crate::types::PageNumber;

/// Enabled state of the previous/next page buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavControls {
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

/// Owns the "current page" state.
///
/// Exactly one page is current at any time. The state only changes through
/// visibility reports ([`PageTracker::activate_page`]) or explicit
/// navigation ([`PageTracker::go_to`]), and each change emits `pageChanged`.
#[derive(Debug)]
pub struct PageTracker<S> {
    scroller: S,
    num_pages: usize,
    current: PageNumber,
    display: String,
    controls: NavControls,
    on_change: Subscriber<PageNumber>,
}

impl<S: PageScroller> PageTracker<S> {
    /// Page 1 is seeded as current right away: visibility reports may arrive
    /// later than the first render
    pub fn new(scroller: S, num_pages: usize) -> Self {
        let mut tracker = Self {
            scroller,
            num_pages,
            current: MIN_PAGE,
            display: MIN_PAGE.to_string(),
            controls: NavControls {
                prev_enabled: false,
                next_enabled: false,
            },
            on_change: Subscriber::new(),
        };
        tracker.update_controls();
        tracker
    }

    /// Register the `pageChanged` handler, replacing any previous one
    pub fn on_change(&mut self, handler: impl FnMut(PageNumber) + Send + 'static) {
        self.on_change.set(handler);
    }

    pub fn current_page(&self) -> PageNumber {
        self.current
    }

    /// Text of the page number field
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn controls(&self) -> NavControls {
        self.controls
    }

    pub fn num_pages(&self) -> usize {
        self.num_pages
    }

    pub fn min_page(&self) -> PageNumber {
        MIN_PAGE
    }

    pub fn max_page(&self) -> PageNumber {
        self.num_pages.max(MIN_PAGE)
    }

    pub fn scroller(&self) -> &S {
        &self.scroller
    }

    pub fn scroller_mut(&mut self) -> &mut S {
        &mut self.scroller
    }

    /// Make `page` current: update the field and buttons, then emit
    /// `pageChanged`. Used for visibility reports and after navigation.
    /// Page numbers outside the document are ignored.
    pub fn activate_page(&mut self, page: PageNumber) -> Option<PageNumber> {
        if page < MIN_PAGE || page > self.num_pages {
            log::debug!("Ignoring activation of page {} (of {})", page, self.num_pages);
            return None;
        }
        self.current = page;
        self.display = page.to_string();
        self.update_controls();
        self.on_change.emit(page);
        Some(page)
    }

    /// Scroll `page` to the top of the viewing container and make it current.
    /// Callers clamp first; a page without a container is a silent no-op.
    pub fn go_to(&mut self, page: PageNumber) -> Option<PageNumber> {
        if !self.scroller.scroll_to_page(page) {
            log::debug!("No container for page {}", page);
            return None;
        }
        self.activate_page(page)
    }

    /// Commit text typed into the page field. Invalid input restores the
    /// field to the current page and emits nothing.
    pub fn enter_manual_page(&mut self, raw: &str) -> Option<PageNumber> {
        match raw.trim().parse::<i64>() {
            Ok(value) => {
                let page = self.clamp(value);
                self.go_to(page)
            }
            Err(_) => {
                log::debug!("Ignoring page input {:?}", raw);
                self.display = self.current.to_string();
                None
            }
        }
    }

    pub fn prev(&mut self) -> Option<PageNumber> {
        let shown = self.displayed_page();
        self.go_to(self.clamp(shown - 1))
    }

    pub fn next(&mut self) -> Option<PageNumber> {
        let shown = self.displayed_page();
        self.go_to(self.clamp(shown + 1))
    }

    fn displayed_page(&self) -> i64 {
        self.display
            .trim()
            .parse::<i64>()
            .unwrap_or(self.current as i64)
    }

    fn clamp(&self, value: i64) -> PageNumber {
        value.clamp(self.min_page() as i64, self.max_page() as i64) as PageNumber
    }

    fn update_controls(&mut self) {
        self.controls = NavControls {
            prev_enabled: self.current > self.min_page(),
            next_enabled: self.current < self.max_page(),
        };
    }
}
