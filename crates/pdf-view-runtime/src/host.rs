//! Host controller
//!
//! Owns every component for one open document and wires their events
//! together: `zoomChanged` drives the render sequencer and the page layout,
//! `pageChanged` drives the thumbnail highlight, and `thumbnailSelected`
//! drives navigation. Components never call each other directly.

use crate::ViewerUpdate;
use pdf_view_core::*;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

/// On-screen geometry supplied by the UI shell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerGeometry {
    /// Size of the viewing container
    pub container: Size,
    /// Bounding box of the zoom menu toggle
    pub zoom_anchor: Rect,
    pub thumbnail_panel_height: f64,
}

impl Default for ViewerGeometry {
    fn default() -> Self {
        Self {
            container: Size::new(1024.0, 768.0),
            zoom_anchor: Rect::default(),
            thumbnail_panel_height: 768.0,
        }
    }
}

/// Observable state of the whole viewer at one point in time
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerSnapshot {
    pub page_count: usize,
    pub current_page: PageNumber,
    pub page_display: String,
    pub nav: NavControls,
    pub zoom_factor: f64,
    pub zoom_display: String,
    pub zoom_active: ZoomSpec,
    pub zoom_controls: ZoomControls,
    pub menu_state: MenuState,
    pub active_thumbnail: Option<PageNumber>,
    pub thumbnails_open: bool,
    pub scroll_top: f64,
}

#[derive(Debug, Clone, Copy)]
enum HostEvent {
    ZoomChanged(f64),
    PageChanged(PageNumber),
    ThumbnailSelected(PageNumber),
}

type ResizeResult = std::result::Result<ResizeOutcome, RenderError>;

pub struct ViewerHost<D: DocumentSource> {
    /// Page sizes at the base scale and zoom 1
    natural_sizes: Vec<Size>,
    page_gap: f64,
    zoom: ZoomController,
    tracker: PageTracker<ScrollObserver>,
    thumbnails: ThumbnailPanel,
    sequencer: RenderSequencer<D::Page>,
    events: mpsc::UnboundedReceiver<HostEvent>,
    resizes: JoinSet<ResizeResult>,
}

impl<D: DocumentSource> ViewerHost<D> {
    /// Measure and render `document`, then seed page 1 as current.
    ///
    /// Pages render first, thumbnails second. Nothing is emitted while the
    /// document opens.
    pub async fn open(document: D, options: ViewerOptions, geometry: ViewerGeometry) -> Result<Self> {
        options.validate()?;

        let page_count = document.page_count();
        if page_count == 0 {
            return Err(ViewerError::NoPages);
        }

        let mut natural_sizes = Vec::with_capacity(page_count);
        for page_number in 1..=page_count {
            let page = document.page(page_number).await?;
            natural_sizes.push(page.viewport(options.base_scale).size());
        }

        let mut zoom = ZoomController::new(&options)?;
        zoom.menu_mut().set_anchor(geometry.zoom_anchor);
        let factor = zoom.set_geometry(geometry.container, natural_sizes[0]);

        let sequencer = RenderSequencer::new(&options);
        sequencer.render_all(&document, factor).await?;

        let mut thumbnails = ThumbnailPanel::new(&options);
        thumbnails.render_all(&document).await?;
        thumbnails.set_panel_height(geometry.thumbnail_panel_height);

        let layout = Self::layout(&natural_sizes, factor, options.page_gap);
        let mut tracker = PageTracker::new(
            ScrollObserver::new(layout, geometry.container.height),
            page_count,
        );

        let (event_tx, events) = mpsc::unbounded_channel();
        let tx = event_tx.clone();
        zoom.on_change(move |factor| {
            let _ = tx.send(HostEvent::ZoomChanged(factor));
        });
        let tx = event_tx.clone();
        tracker.on_change(move |page| {
            let _ = tx.send(HostEvent::PageChanged(page));
        });
        thumbnails.on_select(move |page| {
            let _ = event_tx.send(HostEvent::ThumbnailSelected(page));
        });

        log::info!("Opened document: {} pages at zoom {:.3}", page_count, factor);

        Ok(Self {
            natural_sizes,
            page_gap: options.page_gap,
            zoom,
            tracker,
            thumbnails,
            sequencer,
            events,
            resizes: JoinSet::new(),
        })
    }

    pub fn page_count(&self) -> usize {
        self.natural_sizes.len()
    }

    pub fn zoom(&self) -> &ZoomController {
        &self.zoom
    }

    pub fn tracker(&self) -> &PageTracker<ScrollObserver> {
        &self.tracker
    }

    pub fn thumbnails(&self) -> &ThumbnailPanel {
        &self.thumbnails
    }

    pub fn sequencer(&self) -> &RenderSequencer<D::Page> {
        &self.sequencer
    }

    /// Apply one command and return the updates it produced
    pub fn apply(&mut self, command: crate::ViewerCommand) -> Vec<ViewerUpdate> {
        use crate::ViewerCommand as Cmd;

        let mut updates = Vec::new();
        let wants_snapshot = matches!(command, Cmd::Snapshot);
        match command {
            Cmd::SelectZoom(spec) => {
                self.zoom.select_catalog_entry(spec);
            }
            Cmd::StepZoom(direction) => {
                self.zoom.step_zoom(direction);
            }
            Cmd::Wheel { delta_y, ctrl } => {
                if let WheelOutcome::PassThrough = self.zoom.wheel_zoom(delta_y, ctrl) {
                    // Native scroll
                    let top = self.tracker.scroller().scroll_top() + delta_y;
                    self.tracker.scroller_mut().set_scroll_top(top);
                }
            }
            Cmd::ManualZoom(text) => {
                self.zoom.enter_manual_zoom(&text);
            }
            Cmd::ToggleZoomMenu => {
                self.zoom.toggle_menu();
            }
            Cmd::PointerDown(point) => {
                self.zoom.pointer_down(point);
            }
            Cmd::WindowResized(geometry) => self.window_resized(geometry),
            Cmd::Scroll { top } => self.tracker.scroller_mut().set_scroll_top(top),
            Cmd::GoTo(page) => {
                self.tracker.go_to(page);
            }
            Cmd::ManualPage(text) => {
                self.tracker.enter_manual_page(&text);
            }
            Cmd::PrevPage => {
                self.tracker.prev();
            }
            Cmd::NextPage => {
                self.tracker.next();
            }
            Cmd::ClickThumbnail(page) => {
                self.thumbnails.click_thumbnail(page);
            }
            Cmd::ToggleThumbnails => {
                self.thumbnails.toggle();
            }
            Cmd::Snapshot => {}
        }

        self.settle(&mut updates);
        if wants_snapshot {
            updates.push(ViewerUpdate::Snapshot(self.snapshot()));
        }
        updates
    }

    pub fn snapshot(&self) -> ViewerSnapshot {
        let nav = self.tracker.controls();
        ViewerSnapshot {
            page_count: self.page_count(),
            current_page: self.tracker.current_page(),
            page_display: self.tracker.display().to_string(),
            nav,
            zoom_factor: self.zoom.zoom_factor(),
            zoom_display: self.zoom.display().to_string(),
            zoom_active: self.zoom.active(),
            zoom_controls: self.zoom.controls(),
            menu_state: self.zoom.menu().state(),
            active_thumbnail: self.thumbnails.active_page(),
            thumbnails_open: self.thumbnails.is_open(),
            scroll_top: self.tracker.scroller().scroll_top(),
        }
    }

    /// Whether any resize pass is still drawing
    pub fn has_pending_resizes(&self) -> bool {
        !self.resizes.is_empty()
    }

    /// Wait for the next resize pass to end. Returns `None` when none is in
    /// flight.
    pub async fn next_resize(&mut self) -> Option<ViewerUpdate> {
        let joined = self.resizes.join_next().await?;
        Some(match joined {
            Ok(Ok(outcome)) => ViewerUpdate::ResizeFinished { outcome },
            Ok(Err(e)) => {
                log::warn!("Resize failed: {}", e);
                ViewerUpdate::Error {
                    message: format!("Render failed: {}", e),
                }
            }
            Err(e) => ViewerUpdate::Error {
                message: format!("Resize task failed: {}", e),
            },
        })
    }

    /// Wait for every in-flight resize pass
    pub async fn finish_resizes(&mut self) -> Vec<ViewerUpdate> {
        let mut updates = Vec::new();
        while let Some(update) = self.next_resize().await {
            updates.push(update);
        }
        updates
    }

    // =========================================================================
    // Event routing
    // =========================================================================

    /// Deliver queued component events and visibility reports until neither
    /// produces anything new
    fn settle(&mut self, updates: &mut Vec<ViewerUpdate>) {
        loop {
            while let Ok(event) = self.events.try_recv() {
                self.route(event, updates);
            }

            match self.tracker.scroller_mut().poll_visible_page() {
                Some(page) if page != self.tracker.current_page() => {
                    self.tracker.activate_page(page);
                }
                Some(_) => {}
                None => break,
            }
        }
    }

    fn route(&mut self, event: HostEvent, updates: &mut Vec<ViewerUpdate>) {
        match event {
            HostEvent::ZoomChanged(factor) => {
                self.resizes.spawn(self.sequencer.resize_all(factor));

                let anchor = self.tracker.current_page();
                let layout = Self::layout(&self.natural_sizes, factor, self.page_gap);
                self.tracker.scroller_mut().relayout(layout, anchor);

                updates.push(ViewerUpdate::ZoomChanged {
                    factor,
                    display: self.zoom.display().to_string(),
                });
            }
            HostEvent::PageChanged(page) => {
                self.thumbnails.activate_page(page);
                updates.push(ViewerUpdate::PageChanged { page });
            }
            HostEvent::ThumbnailSelected(page) => {
                self.tracker.go_to(page);
            }
        }
    }

    fn window_resized(&mut self, geometry: ViewerGeometry) {
        self.tracker
            .scroller_mut()
            .set_viewport_height(geometry.container.height);
        self.thumbnails
            .set_panel_height(geometry.thumbnail_panel_height);
        self.zoom.window_resized(geometry.container, geometry.zoom_anchor);
    }

    fn layout(natural_sizes: &[Size], factor: f64, gap: f64) -> PageLayout {
        PageLayout::from_heights(natural_sizes.iter().map(|size| size.height * factor), gap)
    }
}
