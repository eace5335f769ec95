//! Page container and drawing surface lifecycle

use super::{DrawSurface, PageContainer, PageSource, RenderContext};
use crate::options::ViewerOptions;
use crate::types::{PageNumber, Transform, Viewport};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeMode {
    /// First render of a page: build a new container
    Create,
    /// Zoom change: reuse the container, replace its surface
    Resize,
}

/// Output of [`PageCanvasLifecycle::create_or_resize_page_node`]
#[derive(Debug, Clone)]
pub struct PageNode {
    pub container: PageContainer,
    pub surface: Arc<DrawSurface>,
    pub viewport: Viewport,
    /// Device pixel ratio after the surface area cap was applied
    pub pixel_ratio: f64,
}

impl PageNode {
    pub fn transform(&self) -> Transform {
        Transform::scale(self.pixel_ratio)
    }

    pub fn render_context(&self) -> RenderContext {
        RenderContext {
            surface: self.surface.clone(),
            transform: self.transform(),
            viewport: self.viewport,
        }
    }
}

/// One page as the viewer holds it
#[derive(Debug)]
pub struct PageRecord<P> {
    pub page_number: PageNumber,
    pub container: PageContainer,
    pub surface: Arc<DrawSurface>,
    pub handle: Arc<P>,
    pub zoom_factor: f64,
    pub pixel_ratio: f64,
}

impl<P> Clone for PageRecord<P> {
    fn clone(&self) -> Self {
        Self {
            page_number: self.page_number,
            container: self.container,
            surface: self.surface.clone(),
            handle: self.handle.clone(),
            zoom_factor: self.zoom_factor,
            pixel_ratio: self.pixel_ratio,
        }
    }
}

/// Page number → record map, in document order
#[derive(Debug)]
pub struct PageRegistry<P> {
    records: BTreeMap<PageNumber, PageRecord<P>>,
}

impl<P> PageRegistry<P> {
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }

    pub fn get(&self, page_number: PageNumber) -> Option<&PageRecord<P>> {
        self.records.get(&page_number)
    }

    pub fn handle(&self, page_number: PageNumber) -> Option<Arc<P>> {
        self.records
            .get(&page_number)
            .map(|record| record.handle.clone())
    }

    pub fn page_numbers(&self) -> Vec<PageNumber> {
        self.records.keys().copied().collect()
    }

    pub fn records(&self) -> impl Iterator<Item = &PageRecord<P>> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl<P> Default for PageRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sizing policy for page containers and their surfaces
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageCanvasLifecycle {
    pub base_scale: f64,
    pub device_pixel_ratio: f64,
    pub max_canvas_area: f64,
}

impl PageCanvasLifecycle {
    pub fn new(options: &ViewerOptions) -> Self {
        Self {
            base_scale: options.base_scale,
            device_pixel_ratio: options.device_pixel_ratio,
            max_canvas_area: options.max_canvas_area,
        }
    }

    /// Build a container and a fresh surface for `page` at `zoom_factor`,
    /// without touching any registry
    pub fn build_node<P: PageSource>(
        &self,
        page: &P,
        page_number: PageNumber,
        zoom_factor: f64,
    ) -> PageNode {
        let viewport = page.viewport(self.base_scale * zoom_factor);
        let (width, height, pixel_ratio) =
            surface_dimensions(viewport, self.device_pixel_ratio, self.max_canvas_area);

        PageNode {
            container: PageContainer {
                page_number,
                width: viewport.width,
                height: viewport.height,
            },
            surface: Arc::new(DrawSurface::new(width, height)),
            viewport,
            pixel_ratio,
        }
    }

    /// Create a page's record, or give an existing record a new surface.
    ///
    /// In [`NodeMode::Resize`] the old surface is dropped from the record and
    /// replaced, never resized in place. Resizing a page that has no record
    /// returns `None`.
    pub fn create_or_resize_page_node<P: PageSource>(
        &self,
        mode: NodeMode,
        page: &Arc<P>,
        page_number: PageNumber,
        zoom_factor: f64,
        registry: &mut PageRegistry<P>,
    ) -> Option<PageNode> {
        let node = self.build_node(page.as_ref(), page_number, zoom_factor);

        match mode {
            NodeMode::Create => {
                registry.records.insert(
                    page_number,
                    PageRecord {
                        page_number,
                        container: node.container,
                        surface: node.surface.clone(),
                        handle: page.clone(),
                        zoom_factor,
                        pixel_ratio: node.pixel_ratio,
                    },
                );
            }
            NodeMode::Resize => {
                let record = registry.records.get_mut(&page_number)?;
                record.container = node.container;
                record.surface = node.surface.clone();
                record.zoom_factor = zoom_factor;
                record.pixel_ratio = node.pixel_ratio;
            }
        }

        Some(node)
    }
}

/// Surface pixel size for `viewport` at `device_pixel_ratio`.
///
/// When the area would exceed `max_area`, both sides shrink by
/// `sqrt(max_area / area)` so the aspect ratio survives. Returns the width,
/// height and the effective pixel ratio.
pub fn surface_dimensions(viewport: Viewport, device_pixel_ratio: f64, max_area: f64) -> (u32, u32, f64) {
    let mut ratio = device_pixel_ratio;
    let area = viewport.width * ratio * viewport.height * ratio;
    if area > max_area {
        ratio *= (max_area / area).sqrt();
    }

    let width = (viewport.width * ratio).floor().max(0.0) as u32;
    let height = (viewport.height * ratio).floor().max(0.0) as u32;
    (width, height, ratio)
}
