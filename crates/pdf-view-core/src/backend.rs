//! lopdf-backed document source
//!
//! Reads page geometry (MediaBox, Rotate) with lopdf. lopdf does not
//! rasterize, so a render paints blank paper of the right size: enough to
//! drive the viewer headlessly.

use crate::constants::{DEFAULT_PAGE_HEIGHT_PT, DEFAULT_PAGE_WIDTH_PT, PAPER_RGBA};
use crate::render::{DocumentSource, PageSource, RenderContext};
use crate::types::*;
use lopdf::{Dictionary, Document, Object};
use std::path::Path;
use std::sync::Arc;

/// Page tree depth limit when following inherited attributes
const MAX_INHERITANCE_DEPTH: usize = 32;

#[derive(Debug, Clone)]
pub struct LopdfPage {
    page_number: PageNumber,
    size: Size,
}

impl LopdfPage {
    pub fn page_number(&self) -> PageNumber {
        self.page_number
    }

    /// Size in points at scale 1, rotation applied
    pub fn size(&self) -> Size {
        self.size
    }
}

impl PageSource for LopdfPage {
    fn viewport(&self, scale: f64) -> Viewport {
        Viewport {
            width: self.size.width * scale,
            height: self.size.height * scale,
            scale,
        }
    }

    async fn render(&self, context: RenderContext) -> std::result::Result<(), RenderError> {
        context.surface.fill(PAPER_RGBA);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct LopdfDocument {
    pages: Vec<Arc<LopdfPage>>,
}

impl LopdfDocument {
    /// Load and measure a PDF file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_owned();
        let bytes = tokio::fs::read(&path).await?;
        let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes)).await??;
        let document = Self::from_document(&doc);
        if document.pages.is_empty() {
            return Err(ViewerError::NoPages);
        }
        log::info!("Loaded {} ({} pages)", path.display(), document.pages.len());
        Ok(document)
    }

    /// Measure every page of an already parsed document
    pub fn from_document(doc: &Document) -> Self {
        let pages = doc
            .get_pages()
            .into_values()
            .enumerate()
            .map(|(index, page_id)| {
                let size = doc
                    .get_dictionary(page_id)
                    .map(|dict| page_size(doc, dict))
                    .unwrap_or(Size::new(DEFAULT_PAGE_WIDTH_PT, DEFAULT_PAGE_HEIGHT_PT));
                Arc::new(LopdfPage {
                    page_number: index + 1,
                    size,
                })
            })
            .collect();
        Self { pages }
    }

    pub fn pages(&self) -> &[Arc<LopdfPage>] {
        &self.pages
    }
}

impl DocumentSource for LopdfDocument {
    type Page = LopdfPage;

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    async fn page(&self, page_number: PageNumber) -> std::result::Result<Arc<LopdfPage>, RenderError> {
        page_number
            .checked_sub(1)
            .and_then(|index| self.pages.get(index))
            .cloned()
            .ok_or(RenderError::PageOutOfRange(page_number))
    }
}

// =============================================================================
// Page geometry
// =============================================================================

fn page_size(doc: &Document, page: &Dictionary) -> Size {
    let media_box = inherited(doc, page, b"MediaBox")
        .and_then(|obj| obj.as_array().ok())
        .and_then(|values| rect_size(values));
    let size = media_box.unwrap_or(Size::new(DEFAULT_PAGE_WIDTH_PT, DEFAULT_PAGE_HEIGHT_PT));

    let rotation = inherited(doc, page, b"Rotate")
        .and_then(|obj| obj.as_i64().ok())
        .unwrap_or(0);

    if rotation.rem_euclid(180) == 90 {
        Size::new(size.height, size.width)
    } else {
        size
    }
}

/// Look up a page attribute, walking up the page tree for inherited ones
fn inherited<'a>(doc: &'a Document, page: &'a Dictionary, key: &[u8]) -> Option<&'a Object> {
    let mut dict = page;
    for _ in 0..MAX_INHERITANCE_DEPTH {
        if let Ok(value) = dict.get(key) {
            return Some(resolve(doc, value));
        }
        let parent = dict.get(b"Parent").and_then(|obj| obj.as_reference()).ok()?;
        dict = doc.get_dictionary(parent).ok()?;
    }
    None
}

fn resolve<'a>(doc: &'a Document, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(object),
        _ => object,
    }
}

fn rect_size(values: &[Object]) -> Option<Size> {
    let numbers: Vec<f64> = values.iter().filter_map(number).collect();
    if numbers.len() != 4 {
        return None;
    }
    let width = (numbers[2] - numbers[0]).abs();
    let height = (numbers[3] - numbers[1]).abs();
    (width > 0.0 && height > 0.0).then_some(Size::new(width, height))
}

fn number(object: &Object) -> Option<f64> {
    match object {
        Object::Integer(value) => Some(*value as f64),
        Object::Real(value) => Some(f64::from(*value)),
        _ => None,
    }
}
