//! Contract with the external page rendering library
//!
//! The engine never mutates a page: it asks for viewport geometry and hands
//! a surface to `render`. Render futures are not preemptible; the engine
//! cancels cooperatively between pages.

use super::DrawSurface;
use crate::types::{PageNumber, RenderError, Transform, Viewport};
use std::future::Future;
use std::sync::Arc;

/// Everything a page needs to draw itself once
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub surface: Arc<DrawSurface>,
    pub transform: Transform,
    pub viewport: Viewport,
}

/// One page of a loaded document
pub trait PageSource: Send + Sync + 'static {
    /// Page geometry at `scale`
    fn viewport(&self, scale: f64) -> Viewport;

    /// Draw the page into `context.surface`; completes when drawing is done
    fn render(&self, context: RenderContext)
    -> impl Future<Output = Result<(), RenderError>> + Send;
}

/// A loaded document
pub trait DocumentSource: Send + Sync {
    type Page: PageSource;

    fn page_count(&self) -> usize;

    /// Fetch a page handle; `page_number` is 1-based
    fn page(
        &self,
        page_number: PageNumber,
    ) -> impl Future<Output = Result<Arc<Self::Page>, RenderError>> + Send;
}
