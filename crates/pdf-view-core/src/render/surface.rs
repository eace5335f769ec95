//! Drawing surfaces and page containers

use crate::types::{PageNumber, RenderError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

static NEXT_SURFACE_ID: AtomicU64 = AtomicU64::new(1);

/// An RGBA drawing surface.
///
/// Surfaces are never resized: a new zoom level gets a new surface, so a
/// render still holding the old one can finish without touching the new.
#[derive(Debug)]
pub struct DrawSurface {
    id: u64,
    width: u32,
    height: u32,
    frame: Mutex<Option<Vec<u8>>>,
}

impl DrawSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            id: NEXT_SURFACE_ID.fetch_add(1, Ordering::Relaxed),
            width,
            height,
            frame: Mutex::new(None),
        }
    }

    /// Unique for the life of the process
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Size in bytes of a full RGBA frame for this surface
    pub fn frame_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }

    /// Replace the surface content with a full RGBA frame
    pub fn put_frame(&self, rgba: Vec<u8>) -> Result<(), RenderError> {
        let expected = self.frame_len();
        if rgba.len() != expected {
            return Err(RenderError::FrameSize {
                expected,
                actual: rgba.len(),
            });
        }
        *self.lock_frame() = Some(rgba);
        Ok(())
    }

    /// Paint the whole surface with one colour
    pub fn fill(&self, rgba: [u8; 4]) {
        let frame = rgba
            .iter()
            .copied()
            .cycle()
            .take(self.frame_len())
            .collect();
        *self.lock_frame() = Some(frame);
    }

    pub fn is_drawn(&self) -> bool {
        self.lock_frame().is_some()
    }

    /// Copy of the current content, if anything has been drawn
    pub fn frame(&self) -> Option<Vec<u8>> {
        self.lock_frame().clone()
    }

    fn lock_frame(&self) -> MutexGuard<'_, Option<Vec<u8>>> {
        self.frame.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// On-screen box holding one page's surface, sized in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageContainer {
    pub page_number: PageNumber,
    pub width: f64,
    pub height: f64,
}
