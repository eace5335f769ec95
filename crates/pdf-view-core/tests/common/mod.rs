#![allow(dead_code)]

use pdf_view_core::*;
use std::result::Result;
use std::sync::{Arc, Mutex};
use tokio::sync::{Semaphore, mpsc};

pub const LETTER: Size = Size {
    width: 612.0,
    height: 792.0,
};

/// A render that has started, reported before the page waits on its gate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStart {
    pub page_number: PageNumber,
    pub surface_id: u64,
    pub scale: f64,
    pub transform: Transform,
}

pub struct FakePage {
    page_number: PageNumber,
    size: Size,
    gate: Option<Arc<Semaphore>>,
    starts: Option<mpsc::UnboundedSender<RenderStart>>,
    fail: bool,
}

impl PageSource for FakePage {
    fn viewport(&self, scale: f64) -> Viewport {
        Viewport {
            width: self.size.width * scale,
            height: self.size.height * scale,
            scale,
        }
    }

    async fn render(&self, context: RenderContext) -> Result<(), RenderError> {
        if let Some(starts) = &self.starts {
            let _ = starts.send(RenderStart {
                page_number: self.page_number,
                surface_id: context.surface.id(),
                scale: context.viewport.scale,
                transform: context.transform,
            });
        }
        if let Some(gate) = &self.gate {
            gate.acquire()
                .await
                .map_err(|e| RenderError::Failed(e.to_string()))?
                .forget();
        }
        if self.fail {
            return Err(RenderError::Failed(format!("page {} is broken", self.page_number)));
        }
        context.surface.fill([self.page_number as u8, 0, 0, 255]);
        Ok(())
    }
}

pub struct FakeDocument {
    pages: Vec<Arc<FakePage>>,
}

impl FakeDocument {
    /// `num_pages` letter-sized pages that render immediately
    pub fn new(num_pages: usize) -> Self {
        Self::builder(num_pages).build()
    }

    pub fn builder(num_pages: usize) -> FakeDocumentBuilder {
        FakeDocumentBuilder {
            sizes: vec![LETTER; num_pages],
            gate: None,
            starts: None,
            failing: None,
        }
    }
}

impl DocumentSource for FakeDocument {
    type Page = FakePage;

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    async fn page(&self, page_number: PageNumber) -> Result<Arc<FakePage>, RenderError> {
        page_number
            .checked_sub(1)
            .and_then(|index| self.pages.get(index))
            .cloned()
            .ok_or(RenderError::PageOutOfRange(page_number))
    }
}

pub struct FakeDocumentBuilder {
    sizes: Vec<Size>,
    gate: Option<Arc<Semaphore>>,
    starts: Option<mpsc::UnboundedSender<RenderStart>>,
    failing: Option<PageNumber>,
}

impl FakeDocumentBuilder {
    pub fn sizes(mut self, sizes: Vec<Size>) -> Self {
        self.sizes = sizes;
        self
    }

    /// Every render waits for one permit of `gate`
    pub fn gate(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn report_starts(mut self, starts: mpsc::UnboundedSender<RenderStart>) -> Self {
        self.starts = Some(starts);
        self
    }

    pub fn failing(mut self, page_number: PageNumber) -> Self {
        self.failing = Some(page_number);
        self
    }

    pub fn build(self) -> FakeDocument {
        let pages = self
            .sizes
            .into_iter()
            .enumerate()
            .map(|(index, size)| {
                Arc::new(FakePage {
                    page_number: index + 1,
                    size,
                    gate: self.gate.clone(),
                    starts: self.starts.clone(),
                    fail: self.failing == Some(index + 1),
                })
            })
            .collect();
        FakeDocument { pages }
    }
}

/// Collects every value a subscriber emits
pub fn recorder<T: Send + 'static>() -> (Arc<Mutex<Vec<T>>>, impl FnMut(T) + Send + 'static) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    (seen, move |value| sink.lock().unwrap().push(value))
}

pub fn options() -> ViewerOptions {
    ViewerOptions::default()
}
