mod host;
mod worker;

pub use host::{ViewerGeometry, ViewerHost, ViewerSnapshot};
pub use worker::worker_task;

// Re-export the engine types that appear in commands and updates
pub use pdf_view_core::{
    NavControls, PageNumber, Point, Rect, ResizeOutcome, Size, ViewerOptions, ZoomControls,
    ZoomDirection, ZoomSpec,
};

/// Commands sent from the UI shell to the worker
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerCommand {
    /// Pick a zoom menu entry
    SelectZoom(ZoomSpec),
    StepZoom(ZoomDirection),
    /// Wheel over the viewing container; with ctrl held it zooms
    Wheel {
        delta_y: f64,
        ctrl: bool,
    },
    /// Text committed in the numeric zoom field
    ManualZoom(String),
    ToggleZoomMenu,
    /// Pointer press anywhere in the window
    PointerDown(Point),
    /// Window resize; bursts are coalesced by the worker
    WindowResized(ViewerGeometry),
    /// User scroll of the viewing container
    Scroll {
        top: f64,
    },
    GoTo(PageNumber),
    /// Text committed in the page number field
    ManualPage(String),
    PrevPage,
    NextPage,
    ClickThumbnail(PageNumber),
    ToggleThumbnails,
    Snapshot,
}

/// Updates sent from the worker to the UI shell
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerUpdate {
    Loaded {
        page_count: usize,
        zoom_factor: f64,
    },
    ZoomChanged {
        factor: f64,
        display: String,
    },
    PageChanged {
        page: PageNumber,
    },
    /// A resize pass ended, either fully drawn or superseded
    ResizeFinished {
        outcome: ResizeOutcome,
    },
    Snapshot(ViewerSnapshot),
    Error {
        message: String,
    },
}
