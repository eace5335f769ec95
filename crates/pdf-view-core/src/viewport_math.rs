//! Zoom factor computation
//!
//! Pure functions turning a zoom specifier plus the viewing container's
//! on-screen size and a page's natural size into a scale factor. They run
//! inside input handlers, so they never fail: anything that cannot produce a
//! usable factor falls back to [`DEFAULT_ZOOM_FACTOR`].

use crate::constants::DEFAULT_ZOOM_FACTOR;
use crate::types::{Size, ZoomSpec};

/// Compute the zoom factor for `spec`.
///
/// # Arguments
/// * `spec` - Numeric percentage or fit mode
/// * `container` - On-screen size of the viewing container
/// * `page` - Natural size of the reference page
pub fn factor_for(spec: ZoomSpec, container: Size, page: Size) -> f64 {
    let factor = match spec {
        ZoomSpec::Percent(percent) => f64::from(percent) / 100.0,
        ZoomSpec::PageFit => container.height / page.height,
        ZoomSpec::PageWidth => container.width / page.width,
    };

    sanitize(factor)
}

/// Compute the zoom factor for a raw menu value; unrecognized values map to
/// the default factor.
pub fn factor_for_value(value: &str, container: Size, page: Size) -> f64 {
    match ZoomSpec::parse(value) {
        Some(spec) => factor_for(spec, container, page),
        None => DEFAULT_ZOOM_FACTOR,
    }
}

/// Zoom percentage shown in the numeric field for a factor
pub fn display_percent(factor: f64) -> u32 {
    (factor * 100.0).floor().max(0.0) as u32
}

fn sanitize(factor: f64) -> f64 {
    if factor.is_finite() && factor > 0.0 {
        factor
    } else {
        DEFAULT_ZOOM_FACTOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTAINER: Size = Size {
        width: 800.0,
        height: 600.0,
    };
    const PAGE: Size = Size {
        width: 400.0,
        height: 1200.0,
    };

    #[test]
    fn test_numeric_factor() {
        for percent in [50, 75, 100, 125, 150, 200] {
            let factor = factor_for(ZoomSpec::Percent(percent), CONTAINER, PAGE);
            assert_eq!(factor, f64::from(percent) / 100.0);
        }
    }

    #[test]
    fn test_fit_modes() {
        assert_eq!(factor_for(ZoomSpec::PageFit, CONTAINER, PAGE), 0.5);
        assert_eq!(factor_for(ZoomSpec::PageWidth, CONTAINER, PAGE), 2.0);
    }

    #[test]
    fn test_unrecognized_value_defaults() {
        assert_eq!(factor_for_value("auto", CONTAINER, PAGE), 1.0);
        assert_eq!(factor_for_value("", CONTAINER, PAGE), 1.0);
        assert_eq!(factor_for_value("pageWidth", CONTAINER, PAGE), 2.0);
        assert_eq!(factor_for_value("150", CONTAINER, PAGE), 1.5);
    }

    #[test]
    fn test_degenerate_page_defaults() {
        let empty = Size::default();
        assert_eq!(factor_for(ZoomSpec::PageFit, CONTAINER, empty), 1.0);
        assert_eq!(factor_for(ZoomSpec::PageWidth, CONTAINER, empty), 1.0);
    }

    #[test]
    fn test_display_percent_floors() {
        assert_eq!(display_percent(0.5), 50);
        assert_eq!(display_percent(1.2399), 123);
        assert_eq!(display_percent(2.0), 200);
    }
}
