//! Shared constants for the viewer engine
//!
//! This module centralizes magic numbers used by zoom, layout and the
//! page rendering pipeline.

// =============================================================================
// Rendering
// =============================================================================

/// Fixed oversampling applied on top of the zoom factor for every page render
pub const BASE_SCALE: f64 = 1.5;

/// Upper bound on the pixel area of a single drawing surface (4096 × 4096).
/// Larger surfaces are shrunk proportionally, keeping the aspect ratio.
pub const MAX_CANVAS_AREA: f64 = 16_777_216.0;

/// Default device pixel ratio when the host does not supply one
pub const DEFAULT_DEVICE_PIXEL_RATIO: f64 = 1.0;

/// Colour painted by backends that do not rasterize page content (opaque white)
pub const PAPER_RGBA: [u8; 4] = [255, 255, 255, 255];

// =============================================================================
// Zoom
// =============================================================================

/// Factor used whenever a zoom specifier cannot be turned into a real factor
pub const DEFAULT_ZOOM_FACTOR: f64 = 1.0;

/// Multiplier applied to the current zoom for a ctrl+wheel zoom-in gesture
pub const WHEEL_ZOOM_IN_MULTIPLIER: f64 = 1.25;

/// Multiplier applied to the current zoom for a ctrl+wheel zoom-out gesture
pub const WHEEL_ZOOM_OUT_MULTIPLIER: f64 = 0.8;

/// Numeric zoom percentages offered by the default zoom menu
pub const DEFAULT_ZOOM_LEVELS: [u32; 6] = [50, 75, 100, 125, 150, 200];

/// Initial zoom percentage
pub const DEFAULT_ZOOM_PERCENT: u32 = 100;

// =============================================================================
// Layout
// =============================================================================

/// Vertical gap between page containers in the viewing container (pixels)
pub const PAGE_GAP: f64 = 10.0;

/// Fixed presentation scale for thumbnails, independent of the viewer zoom
pub const THUMBNAIL_SCALE: f64 = 0.25;

/// Vertical gap between thumbnails in the panel (pixels)
pub const THUMBNAIL_GAP: f64 = 8.0;

/// Debounce delay for window resize bursts (milliseconds)
pub const RESIZE_DEBOUNCE_MS: u64 = 150;

// =============================================================================
// Pages
// =============================================================================

/// First page number; page numbers are 1-based throughout the engine
pub const MIN_PAGE: usize = 1;

/// Default page width in points (US Letter: 8.5" × 11")
pub const DEFAULT_PAGE_WIDTH_PT: f64 = 612.0;

/// Default page height in points (US Letter)
pub const DEFAULT_PAGE_HEIGHT_PT: f64 = 792.0;
