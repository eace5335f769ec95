use crate::constants::*;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Viewer configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ViewerOptions {
    // Zoom menu, in display order
    pub zoom_menu: Vec<ZoomSpec>,
    pub initial_zoom: ZoomSpec,

    // Rendering
    pub device_pixel_ratio: f64,
    pub base_scale: f64,
    pub max_canvas_area: f64,

    // Layout
    pub page_gap: f64,
    pub thumbnail_scale: f64,
    pub thumbnail_gap: f64,

    // Window resize coalescing
    pub resize_debounce_ms: u64,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        let mut zoom_menu = vec![ZoomSpec::PageFit, ZoomSpec::PageWidth];
        zoom_menu.extend(DEFAULT_ZOOM_LEVELS.iter().copied().map(ZoomSpec::Percent));

        Self {
            zoom_menu,
            initial_zoom: ZoomSpec::Percent(DEFAULT_ZOOM_PERCENT),
            device_pixel_ratio: DEFAULT_DEVICE_PIXEL_RATIO,
            base_scale: BASE_SCALE,
            max_canvas_area: MAX_CANVAS_AREA,
            page_gap: PAGE_GAP,
            thumbnail_scale: THUMBNAIL_SCALE,
            thumbnail_gap: THUMBNAIL_GAP,
            resize_debounce_ms: RESIZE_DEBOUNCE_MS,
        }
    }
}

impl ViewerOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options: ViewerOptions = serde_json::from_slice(&bytes)
            .map_err(|e| ViewerError::Config(format!("Failed to parse config: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ViewerError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if !self.zoom_menu.iter().any(|spec| spec.percent().is_some()) {
            return Err(ViewerError::Config(
                "Zoom menu needs at least one numeric entry".to_string(),
            ));
        }

        let positive = [
            ("device_pixel_ratio", self.device_pixel_ratio),
            ("base_scale", self.base_scale),
            ("max_canvas_area", self.max_canvas_area),
            ("thumbnail_scale", self.thumbnail_scale),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ViewerError::Config(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }

        if self.page_gap < 0.0 || self.thumbnail_gap < 0.0 {
            return Err(ViewerError::Config("Gaps cannot be negative".to_string()));
        }

        Ok(())
    }

    pub fn resize_debounce(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.resize_debounce_ms)
    }
}
