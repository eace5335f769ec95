//! Thumbnail panel
//!
//! One thumbnail per page at a fixed scale. After rendering, exactly one
//! thumbnail is active, and it mirrors the tracker's current page once the
//! host has forwarded `pageChanged`.

use crate::constants::MIN_PAGE;
use crate::events::Subscriber;
use crate::options::ViewerOptions;
use crate::render::{DocumentSource, DrawSurface, PageSource, RenderContext};
use crate::types::{PageNumber, RenderError, Size, Transform};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub page_number: PageNumber,
    /// Offset of the thumbnail's top edge inside the panel content
    pub top: f64,
    pub size: Size,
    pub surface: Arc<DrawSurface>,
    pub active: bool,
}

#[derive(Debug)]
pub struct ThumbnailPanel {
    scale: f64,
    gap: f64,
    thumbnails: Vec<Thumbnail>,
    active: Option<PageNumber>,
    scroll_top: f64,
    panel_height: f64,
    open: bool,
    on_select: Subscriber<PageNumber>,
}

impl ThumbnailPanel {
    pub fn new(options: &ViewerOptions) -> Self {
        Self {
            scale: options.thumbnail_scale,
            gap: options.thumbnail_gap,
            thumbnails: Vec::new(),
            active: None,
            scroll_top: 0.0,
            panel_height: 0.0,
            open: false,
            on_select: Subscriber::new(),
        }
    }

    /// Register the `thumbnailSelected` handler, replacing any previous one
    pub fn on_select(&mut self, handler: impl FnMut(PageNumber) + Send + 'static) {
        self.on_select.set(handler);
    }

    /// Build and draw one thumbnail per page, in order, then mark page 1
    /// active. Thumbnails appear as they finish, so a failed render leaves
    /// the earlier ones in place.
    pub async fn render_all<D: DocumentSource>(&mut self, document: &D) -> Result<usize, RenderError> {
        self.thumbnails.clear();
        self.active = None;

        for page_number in 1..=document.page_count() {
            let page = document.page(page_number).await?;
            let viewport = page.viewport(self.scale);
            let surface = Arc::new(DrawSurface::new(
                viewport.width.floor().max(0.0) as u32,
                viewport.height.floor().max(0.0) as u32,
            ));

            let top = self.content_height() + if self.thumbnails.is_empty() { 0.0 } else { self.gap };
            self.thumbnails.push(Thumbnail {
                page_number,
                top,
                size: viewport.size(),
                surface: surface.clone(),
                active: false,
            });

            page.render(RenderContext {
                surface,
                transform: Transform::IDENTITY,
                viewport,
            })
            .await?;
        }

        self.activate_page(MIN_PAGE);
        log::debug!("Rendered {} thumbnails", self.thumbnails.len());
        Ok(self.thumbnails.len())
    }

    pub fn thumbnails(&self) -> &[Thumbnail] {
        &self.thumbnails
    }

    pub fn active_page(&self) -> Option<PageNumber> {
        self.active
    }

    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    pub fn set_scroll_top(&mut self, scroll_top: f64) {
        self.scroll_top = scroll_top.clamp(0.0, self.max_scroll());
    }

    pub fn panel_height(&self) -> f64 {
        self.panel_height
    }

    pub fn set_panel_height(&mut self, panel_height: f64) {
        self.panel_height = panel_height.max(0.0);
        self.set_scroll_top(self.scroll_top);
    }

    pub fn content_height(&self) -> f64 {
        self.thumbnails
            .last()
            .map(|thumb| thumb.top + thumb.size.height)
            .unwrap_or(0.0)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Show or hide the panel; activation state is untouched
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Mark `page` active and scroll it into view if its top edge is outside
    /// the visible part of the panel.
    ///
    /// Activating the page that is already active changes nothing. A page
    /// without a thumbnail is ignored. Returns whether anything changed.
    pub fn activate_page(&mut self, page: PageNumber) -> bool {
        if self.active == Some(page) {
            return false;
        }
        let Some(index) = self.index_of(page) else {
            log::debug!("No thumbnail for page {}", page);
            return false;
        };

        self.mark_active(index);

        let offset = self.thumbnails[index].top - self.scroll_top;
        if offset < 0.0 || offset > self.panel_height {
            self.set_scroll_top(self.scroll_top + offset);
        }
        true
    }

    /// User click on a thumbnail: move the highlight and emit
    /// `thumbnailSelected`. The panel is not scrolled; the clicked thumbnail
    /// is on screen already.
    pub fn click_thumbnail(&mut self, page: PageNumber) -> Option<PageNumber> {
        let index = self.index_of(page)?;
        self.mark_active(index);
        self.on_select.emit(page);
        Some(page)
    }

    /// Page whose thumbnail lies under `y`, measured from the panel's top edge
    pub fn hit_test(&self, y: f64) -> Option<PageNumber> {
        let content_y = self.scroll_top + y;
        self.thumbnails
            .iter()
            .find(|thumb| content_y >= thumb.top && content_y < thumb.top + thumb.size.height)
            .map(|thumb| thumb.page_number)
    }

    fn mark_active(&mut self, index: usize) {
        if let Some(previous) = self.active.and_then(|page| self.index_of(page)) {
            self.thumbnails[previous].active = false;
        }
        self.thumbnails[index].active = true;
        self.active = Some(self.thumbnails[index].page_number);
    }

    fn index_of(&self, page: PageNumber) -> Option<usize> {
        page.checked_sub(1)
            .filter(|index| *index < self.thumbnails.len())
    }

    fn max_scroll(&self) -> f64 {
        (self.content_height() - self.panel_height).max(0.0)
    }
}
