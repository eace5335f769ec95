//! Current-page tracking and the scroll/visibility capabilities it relies on

mod tracker;
mod visibility;

pub use tracker::{NavControls, PageTracker};
pub use visibility::{PageLayout, PageScroller, ScrollObserver, VisibilityReporter};
