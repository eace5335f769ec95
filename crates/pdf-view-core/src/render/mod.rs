//! Page rendering pipeline: surfaces, the backend contract, per-page
//! lifecycle and the render/resize sequencer

mod page;
mod sequencer;
mod source;
mod surface;

pub use page::{
    NodeMode, PageCanvasLifecycle, PageNode, PageRecord, PageRegistry, surface_dimensions,
};
pub use sequencer::{RenderSequencer, ResizeOutcome};
pub use source::{DocumentSource, PageSource, RenderContext};
pub use surface::{DrawSurface, PageContainer};
