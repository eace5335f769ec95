//! Zoom catalog, menu and controller

mod catalog;
mod controller;
mod menu;

pub use catalog::ZoomCatalog;
pub use controller::{WheelOutcome, ZoomController, ZoomControls};
pub use menu::{ZoomMenu, ZoomMenuEntry};
