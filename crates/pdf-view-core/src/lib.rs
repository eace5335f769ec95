#[cfg(feature = "lopdf")]
pub mod backend;
pub mod constants;
mod debounce;
mod events;
pub mod navigation;
mod options;
pub mod render;
mod thumbnails;
mod types;
pub mod viewport_math;
pub mod zoom;

#[cfg(feature = "lopdf")]
pub use backend::{LopdfDocument, LopdfPage};
pub use debounce::Debouncer;
pub use events::Subscriber;
pub use navigation::{NavControls, PageLayout, PageScroller, PageTracker, ScrollObserver, VisibilityReporter};
pub use options::*;
pub use render::{DocumentSource, DrawSurface, PageSource, RenderContext, RenderSequencer, ResizeOutcome};
pub use thumbnails::{Thumbnail, ThumbnailPanel};
pub use types::*;
pub use zoom::{WheelOutcome, ZoomController, ZoomControls};
