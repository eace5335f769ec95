//! Initial render and cancellation-safe re-render of every page
//!
//! Pages are always drawn one at a time, in document order, awaiting each
//! render before starting the next. A resize captures the draw sequence
//! number it was issued with and checks it again before every page: once a
//! newer resize has been requested, the older one stops at the next page
//! boundary instead of drawing stale content.

use super::{DocumentSource, NodeMode, PageCanvasLifecycle, PageRecord, PageRegistry, PageSource};
use crate::options::ViewerOptions;
use crate::types::{PageNumber, RenderError};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// How a resize pass ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// Every page was redrawn
    Completed { pages: usize },
    /// A newer resize took over before `stopped_at` was drawn
    Superseded { drawn: usize, stopped_at: PageNumber },
}

/// Drives page rendering for one document.
///
/// Clones share the page registry and the draw sequence, so a clone can be
/// moved into a spawned task. Create a fresh sequencer per document.
pub struct RenderSequencer<P> {
    lifecycle: PageCanvasLifecycle,
    pages: Arc<Mutex<PageRegistry<P>>>,
    draw_sequence: Arc<AtomicU64>,
}

impl<P> Clone for RenderSequencer<P> {
    fn clone(&self) -> Self {
        Self {
            lifecycle: self.lifecycle,
            pages: self.pages.clone(),
            draw_sequence: self.draw_sequence.clone(),
        }
    }
}

impl<P: PageSource> RenderSequencer<P> {
    pub fn new(options: &ViewerOptions) -> Self {
        Self {
            lifecycle: PageCanvasLifecycle::new(options),
            pages: Arc::new(Mutex::new(PageRegistry::new())),
            draw_sequence: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Number of the most recently requested resize
    pub fn draw_sequence(&self) -> u64 {
        self.draw_sequence.load(Ordering::SeqCst)
    }

    pub fn page_count(&self) -> usize {
        self.lock_pages().len()
    }

    /// Snapshot of one page's current record
    pub fn record(&self, page_number: PageNumber) -> Option<PageRecord<P>> {
        self.lock_pages().get(page_number).cloned()
    }

    /// Snapshot of every record, in document order
    pub fn records(&self) -> Vec<PageRecord<P>> {
        self.lock_pages().records().cloned().collect()
    }

    /// Create and draw every page of `document` at `zoom_factor`.
    ///
    /// Replaces whatever the sequencer held before and invalidates resizes
    /// still in flight. Render failures propagate to the caller.
    pub async fn render_all<D>(&self, document: &D, zoom_factor: f64) -> Result<usize, RenderError>
    where
        D: DocumentSource<Page = P>,
    {
        self.draw_sequence.fetch_add(1, Ordering::SeqCst);
        self.lock_pages().clear();

        let page_count = document.page_count();
        for page_number in 1..=page_count {
            let page = document.page(page_number).await?;
            let node = {
                let mut pages = self.lock_pages();
                self.lifecycle.create_or_resize_page_node(
                    NodeMode::Create,
                    &page,
                    page_number,
                    zoom_factor,
                    &mut pages,
                )
            };
            if let Some(node) = node {
                page.render(node.render_context()).await?;
                log::debug!("Rendered page {}/{}", page_number, page_count);
            }
        }

        log::info!("Rendered {} pages at zoom {:.3}", page_count, zoom_factor);
        Ok(page_count)
    }

    /// Request a redraw of every page at `zoom_factor`.
    ///
    /// The draw sequence advances as soon as this is called, which
    /// supersedes any earlier resize; the returned future does the drawing.
    pub fn resize_all(
        &self,
        zoom_factor: f64,
    ) -> impl Future<Output = Result<ResizeOutcome, RenderError>> + Send + use<P> {
        let current_draw = self.draw_sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let sequencer = self.clone();
        async move { sequencer.run_resize(current_draw, zoom_factor).await }
    }

    async fn run_resize(self, current_draw: u64, zoom_factor: f64) -> Result<ResizeOutcome, RenderError> {
        let page_numbers = self.lock_pages().page_numbers();
        let mut drawn = 0;

        for page_number in page_numbers {
            let step = {
                let mut pages = self.lock_pages();
                // The check and the surface swap happen under one lock, so a
                // newer resize can never be overwritten by this one.
                if self.draw_sequence.load(Ordering::SeqCst) != current_draw {
                    log::debug!(
                        "Resize #{} superseded before page {} ({} drawn)",
                        current_draw,
                        page_number,
                        drawn
                    );
                    return Ok(ResizeOutcome::Superseded {
                        drawn,
                        stopped_at: page_number,
                    });
                }
                pages.handle(page_number).and_then(|handle| {
                    self.lifecycle
                        .create_or_resize_page_node(
                            NodeMode::Resize,
                            &handle,
                            page_number,
                            zoom_factor,
                            &mut pages,
                        )
                        .map(|node| (handle, node))
                })
            };

            if let Some((handle, node)) = step {
                handle.render(node.render_context()).await?;
                drawn += 1;
            }
        }

        log::debug!("Resize #{} finished: {} pages at {:.3}", current_draw, drawn, zoom_factor);
        Ok(ResizeOutcome::Completed { pages: drawn })
    }

    fn lock_pages(&self) -> MutexGuard<'_, PageRegistry<P>> {
        self.pages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
