//! Zoom state machine
//!
//! Owns the zoom menu, the numeric zoom field, the step buttons and the
//! ctrl+wheel gesture. Every change of the effective zoom goes through a
//! single emission of `zoomChanged(factor)`.

use super::{ZoomCatalog, ZoomMenu};
use crate::constants::{WHEEL_ZOOM_IN_MULTIPLIER, WHEEL_ZOOM_OUT_MULTIPLIER};
use crate::events::Subscriber;
use crate::options::ViewerOptions;
use crate::types::*;
use crate::viewport_math;

/// Enabled state of the zoom-in / zoom-out buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomControls {
    pub zoom_in_enabled: bool,
    pub zoom_out_enabled: bool,
}

/// Result of feeding a wheel event to the controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelOutcome {
    /// Not a zoom gesture; the host scrolls normally
    PassThrough,
    /// Zoom gesture consumed; the host must suppress native scroll/zoom.
    /// Carries the new factor when the zoom actually changed.
    Handled(Option<f64>),
}

impl WheelOutcome {
    pub fn prevents_default(&self) -> bool {
        matches!(self, WheelOutcome::Handled(_))
    }
}

#[derive(Debug)]
pub struct ZoomController {
    catalog: ZoomCatalog,
    menu: ZoomMenu,
    active: ZoomSpec,
    last_zoom: u32,
    factor: f64,
    display: String,
    controls: ZoomControls,
    container: Size,
    page_size: Size,
    on_change: Subscriber<f64>,
}

impl ZoomController {
    pub fn new(options: &ViewerOptions) -> Result<Self> {
        Self::with_menu(&options.zoom_menu, options.initial_zoom)
    }

    /// Build a controller from menu entries and an initial zoom. The initial
    /// zoom is applied silently; no `zoomChanged` fires for it.
    pub fn with_menu(entries: &[ZoomSpec], initial: ZoomSpec) -> Result<Self> {
        let catalog = ZoomCatalog::from_menu(entries)?;
        let mut controller = Self {
            controls: ZoomControls {
                zoom_in_enabled: true,
                zoom_out_enabled: true,
            },
            catalog,
            menu: ZoomMenu::new(entries),
            active: initial,
            last_zoom: 0,
            factor: 0.0,
            display: String::new(),
            container: Size::default(),
            page_size: Size::default(),
            on_change: Subscriber::new(),
        };
        controller.apply_spec(initial);
        Ok(controller)
    }

    /// Register the `zoomChanged` handler, replacing any previous one
    pub fn on_change(&mut self, handler: impl FnMut(f64) + Send + 'static) {
        self.on_change.set(handler);
    }

    pub fn zoom_factor(&self) -> f64 {
        self.factor
    }

    pub fn last_zoom(&self) -> u32 {
        self.last_zoom
    }

    pub fn active(&self) -> ZoomSpec {
        self.active
    }

    /// Text of the numeric zoom field
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn controls(&self) -> ZoomControls {
        self.controls
    }

    pub fn catalog(&self) -> &ZoomCatalog {
        &self.catalog
    }

    pub fn menu(&self) -> &ZoomMenu {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut ZoomMenu {
        &mut self.menu
    }

    /// Set the container and reference page sizes once a document is loaded.
    /// Re-evaluates the active zoom silently and returns the factor.
    pub fn set_geometry(&mut self, container: Size, page_size: Size) -> f64 {
        self.container = container;
        self.page_size = page_size;
        self.apply_spec(self.active);
        self.factor
    }

    // =========================================================================
    // Menu
    // =========================================================================

    pub fn toggle_menu(&mut self) -> MenuState {
        self.menu.toggle()
    }

    /// Pointer press anywhere in the window; closes an open menu when the
    /// press lands outside it
    pub fn pointer_down(&mut self, point: Point) -> bool {
        self.menu.dismiss_if_outside(point)
    }

    /// Pick a menu entry: closes the menu, moves the highlight, recomputes
    /// the factor and emits it
    pub fn select_catalog_entry(&mut self, spec: ZoomSpec) -> f64 {
        self.menu.close();
        self.apply_spec(spec);
        log::debug!("Zoom set to {} ({:.3})", spec, self.factor);
        self.emit()
    }

    // =========================================================================
    // Buttons, wheel and manual entry
    // =========================================================================

    /// Move to the neighbouring catalog level in `direction`
    pub fn step_zoom(&mut self, direction: ZoomDirection) -> f64 {
        let next = match direction {
            ZoomDirection::In => self.catalog.next_above(self.last_zoom),
            ZoomDirection::Out => self.catalog.next_below(self.last_zoom),
        };
        self.apply_percent(next);
        self.emit()
    }

    /// Ctrl+wheel zoom. Without ctrl the event passes through untouched.
    pub fn wheel_zoom(&mut self, delta_y: f64, ctrl_pressed: bool) -> WheelOutcome {
        if !ctrl_pressed {
            return WheelOutcome::PassThrough;
        }

        let multiplier = if delta_y < 0.0 {
            WHEEL_ZOOM_IN_MULTIPLIER
        } else if delta_y > 0.0 {
            WHEEL_ZOOM_OUT_MULTIPLIER
        } else {
            return WheelOutcome::Handled(None);
        };

        let scaled = (f64::from(self.last_zoom) * multiplier).floor() as i64;
        self.apply_percent(self.catalog.clamp(scaled));
        WheelOutcome::Handled(Some(self.emit()))
    }

    /// Commit text typed into the zoom field. Non-numeric input restores the
    /// field to the last good zoom and emits nothing.
    pub fn enter_manual_zoom(&mut self, raw: &str) -> Option<f64> {
        let trimmed = raw.trim();
        let digits = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
        match digits.parse::<i64>() {
            Ok(value) => {
                self.apply_percent(self.catalog.clamp(value));
                Some(self.emit())
            }
            Err(_) => {
                log::debug!("Ignoring zoom input {:?}", raw);
                self.display = self.last_zoom.to_string();
                None
            }
        }
    }

    /// Window resize: the menu follows its anchor, and a fit mode is
    /// re-evaluated against the new container size and re-emitted
    pub fn window_resized(&mut self, container: Size, anchor: Rect) -> Option<f64> {
        self.menu.set_anchor(anchor);
        self.container = container;

        if !self.active.is_symbolic() {
            return None;
        }

        self.apply_spec(self.active);
        Some(self.emit())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn apply_spec(&mut self, spec: ZoomSpec) {
        let spec = match spec {
            ZoomSpec::Percent(percent) => ZoomSpec::Percent(self.catalog.clamp(i64::from(percent))),
            symbolic => symbolic,
        };
        self.active = spec;
        self.factor = viewport_math::factor_for(spec, self.container, self.page_size);
        self.last_zoom = viewport_math::display_percent(self.factor);
        self.display = self.last_zoom.to_string();
        self.menu.select(spec);
        self.update_controls();
    }

    fn apply_percent(&mut self, percent: u32) {
        self.active = ZoomSpec::Percent(percent);
        self.last_zoom = percent;
        self.factor = viewport_math::factor_for(self.active, self.container, self.page_size);
        self.display = percent.to_string();
        if self.catalog.contains(percent) {
            self.menu.select(self.active);
        } else {
            self.menu.clear_selection();
        }
        self.update_controls();
    }

    fn update_controls(&mut self) {
        self.controls = ZoomControls {
            zoom_in_enabled: self.last_zoom < self.catalog.max(),
            zoom_out_enabled: self.last_zoom > self.catalog.min(),
        };
    }

    fn emit(&mut self) -> f64 {
        let factor = self.factor;
        self.on_change.emit(factor);
        factor
    }
}
