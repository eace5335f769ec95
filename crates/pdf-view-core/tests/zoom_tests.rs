mod common;

use common::*;
use pdf_view_core::zoom::ZoomCatalog;
use pdf_view_core::*;

fn controller() -> ZoomController {
    let mut zoom = ZoomController::new(&options()).unwrap();
    zoom.set_geometry(Size::new(800.0, 600.0), LETTER);
    zoom
}

#[test]
fn test_initial_state_is_silent() {
    let zoom = controller();
    assert_eq!(zoom.zoom_factor(), 1.0);
    assert_eq!(zoom.last_zoom(), 100);
    assert_eq!(zoom.display(), "100");
    assert_eq!(zoom.menu().selected(), Some(ZoomSpec::Percent(100)));
    assert!(zoom.controls().zoom_in_enabled);
    assert!(zoom.controls().zoom_out_enabled);
}

#[test]
fn test_step_in_then_out() {
    let (seen, sink) = recorder();
    let mut zoom = controller();
    zoom.on_change(sink);

    assert_eq!(zoom.step_zoom(ZoomDirection::In), 1.25);
    assert_eq!(zoom.display(), "125");
    assert_eq!(zoom.step_zoom(ZoomDirection::Out), 1.0);
    assert_eq!(zoom.display(), "100");

    assert_eq!(*seen.lock().unwrap(), vec![1.25, 1.0]);
}

#[test]
fn test_repeated_zoom_in_is_bounded() {
    let mut zoom = controller();
    let mut previous = zoom.zoom_factor();

    for _ in 0..10 {
        let factor = zoom.step_zoom(ZoomDirection::In);
        assert!(factor >= previous);
        assert!(factor <= 2.0);
        previous = factor;
    }

    assert_eq!(zoom.last_zoom(), 200);
    assert!(!zoom.controls().zoom_in_enabled);
    assert!(zoom.controls().zoom_out_enabled);
}

#[test]
fn test_repeated_zoom_out_is_bounded() {
    let mut zoom = controller();
    for _ in 0..10 {
        zoom.step_zoom(ZoomDirection::Out);
    }
    assert_eq!(zoom.last_zoom(), 50);
    assert!(zoom.controls().zoom_in_enabled);
    assert!(!zoom.controls().zoom_out_enabled);
}

#[test]
fn test_manual_zoom_clamps_to_catalog() {
    let (seen, sink) = recorder();
    let mut zoom = controller();
    zoom.on_change(sink);

    assert_eq!(zoom.enter_manual_zoom("9999"), Some(2.0));
    assert_eq!(zoom.display(), "200");
    assert!(!zoom.controls().zoom_in_enabled);

    assert_eq!(zoom.enter_manual_zoom("10"), Some(0.5));
    assert_eq!(zoom.display(), "50");
    assert!(!zoom.controls().zoom_out_enabled);

    assert_eq!(*seen.lock().unwrap(), vec![2.0, 0.5]);
}

#[test]
fn test_manual_zoom_accepts_percent_sign() {
    let mut zoom = controller();
    assert_eq!(zoom.enter_manual_zoom(" 150% "), Some(1.5));
    assert_eq!(zoom.menu().selected(), Some(ZoomSpec::Percent(150)));
}

#[test]
fn test_manual_zoom_off_catalog_clears_highlight() {
    let mut zoom = controller();
    assert_eq!(zoom.enter_manual_zoom("110"), Some(1.1));
    assert_eq!(zoom.menu().selected(), None);
    assert_eq!(zoom.active(), ZoomSpec::Percent(110));
}

#[test]
fn test_invalid_manual_zoom_restores_field() {
    let (seen, sink) = recorder();
    let mut zoom = controller();
    zoom.step_zoom(ZoomDirection::In);
    zoom.on_change(sink);

    assert_eq!(zoom.enter_manual_zoom("abc"), None);
    assert_eq!(zoom.enter_manual_zoom(""), None);
    assert_eq!(zoom.display(), "125");
    assert_eq!(zoom.zoom_factor(), 1.25);
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn test_wheel_without_ctrl_passes_through() {
    let (seen, sink) = recorder();
    let mut zoom = controller();
    zoom.on_change(sink);

    let outcome = zoom.wheel_zoom(-120.0, false);
    assert_eq!(outcome, WheelOutcome::PassThrough);
    assert!(!outcome.prevents_default());
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn test_wheel_zoom_multiplies_and_clamps() {
    let mut zoom = controller();

    assert_eq!(zoom.wheel_zoom(-1.0, true), WheelOutcome::Handled(Some(1.25)));
    // 125 * 1.25 = 156.25, floored and not a catalog level
    assert_eq!(zoom.wheel_zoom(-1.0, true), WheelOutcome::Handled(Some(1.56)));
    assert_eq!(zoom.menu().selected(), None);

    assert_eq!(zoom.wheel_zoom(-1.0, true), WheelOutcome::Handled(Some(1.95)));
    assert_eq!(zoom.wheel_zoom(-1.0, true), WheelOutcome::Handled(Some(2.0)));

    // 200 * 0.8 = 160
    assert_eq!(zoom.wheel_zoom(3.0, true), WheelOutcome::Handled(Some(1.6)));
}

#[test]
fn test_wheel_zero_delta_is_consumed() {
    let (seen, sink) = recorder();
    let mut zoom = controller();
    zoom.on_change(sink);

    let outcome = zoom.wheel_zoom(0.0, true);
    assert_eq!(outcome, WheelOutcome::Handled(None));
    assert!(outcome.prevents_default());
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn test_select_fit_modes() {
    let mut zoom = controller();
    zoom.toggle_menu();
    assert!(zoom.menu().is_open());

    let fit = zoom.select_catalog_entry(ZoomSpec::PageFit);
    assert_eq!(fit, 600.0 / 792.0);
    assert_eq!(zoom.last_zoom(), 75);
    assert!(!zoom.menu().is_open());
    assert_eq!(zoom.menu().selected(), Some(ZoomSpec::PageFit));

    let width = zoom.select_catalog_entry(ZoomSpec::PageWidth);
    assert_eq!(width, 800.0 / 612.0);
    assert_eq!(zoom.display(), "130");
}

#[test]
fn test_step_from_fit_mode_goes_to_next_level() {
    let mut zoom = controller();
    zoom.select_catalog_entry(ZoomSpec::PageFit);
    // 75% exactly is the current level, so the next one up is 100
    assert_eq!(zoom.step_zoom(ZoomDirection::In), 1.0);
}

#[test]
fn test_window_resize_reemits_fit_modes_only() {
    let (seen, sink) = recorder();
    let mut zoom = controller();
    zoom.on_change(sink);
    let anchor = Rect::new(10.0, 5.0, 60.0, 20.0);

    assert_eq!(zoom.window_resized(Size::new(1000.0, 900.0), anchor), None);

    zoom.select_catalog_entry(ZoomSpec::PageFit);
    let refit = zoom.window_resized(Size::new(1000.0, 1584.0), anchor);
    assert_eq!(refit, Some(2.0));
    assert_eq!(zoom.active(), ZoomSpec::PageFit);

    assert_eq!(*seen.lock().unwrap(), vec![900.0 / 792.0, 2.0]);
}

#[test]
fn test_menu_dismissed_by_outside_press() {
    let mut zoom = controller();
    zoom.menu_mut().set_anchor(Rect::new(100.0, 10.0, 80.0, 24.0));
    zoom.menu_mut().set_size(Size::new(120.0, 200.0));
    zoom.toggle_menu();
    assert_eq!(zoom.menu().position(), Point::new(100.0, 34.0));

    // Inside the menu and on the anchor: stays open
    assert!(!zoom.pointer_down(Point::new(150.0, 100.0)));
    assert!(!zoom.pointer_down(Point::new(110.0, 15.0)));
    assert!(zoom.menu().is_open());

    assert!(zoom.pointer_down(Point::new(500.0, 500.0)));
    assert!(!zoom.menu().is_open());
}

#[test]
fn test_menu_follows_anchor_while_open() {
    let mut zoom = controller();
    zoom.toggle_menu();
    zoom.window_resized(Size::new(800.0, 600.0), Rect::new(300.0, 40.0, 80.0, 20.0));
    assert_eq!(zoom.menu().position(), Point::new(300.0, 60.0));
}

#[test]
fn test_catalog_requires_numeric_level() {
    assert!(ZoomCatalog::from_menu(&[ZoomSpec::PageFit, ZoomSpec::PageWidth]).is_err());
    assert!(ZoomController::with_menu(&[ZoomSpec::PageFit], ZoomSpec::PageFit).is_err());
}

#[test]
fn test_custom_menu() {
    let menu = [ZoomSpec::Percent(300), ZoomSpec::Percent(25), ZoomSpec::Percent(100)];
    let mut zoom = ZoomController::with_menu(&menu, ZoomSpec::Percent(100)).unwrap();
    assert_eq!(zoom.catalog().levels(), &[25, 100, 300]);
    assert_eq!(zoom.step_zoom(ZoomDirection::In), 3.0);
    assert_eq!(zoom.step_zoom(ZoomDirection::In), 3.0);
}

#[test]
fn test_selected_percent_is_clamped_to_catalog() {
    let (seen, sink) = recorder();
    let mut zoom = controller();
    zoom.on_change(sink);

    assert_eq!(zoom.select_catalog_entry(ZoomSpec::Percent(9999)), 2.0);
    assert_eq!(zoom.last_zoom(), 200);
    assert_eq!(zoom.active(), ZoomSpec::Percent(200));
    assert_eq!(zoom.menu().selected(), Some(ZoomSpec::Percent(200)));
    assert!(!zoom.controls().zoom_in_enabled);

    assert_eq!(zoom.select_catalog_entry(ZoomSpec::Percent(5)), 0.5);
    assert_eq!(zoom.display(), "50");
    assert!(!zoom.controls().zoom_out_enabled);

    assert_eq!(*seen.lock().unwrap(), vec![2.0, 0.5]);
}

#[test]
fn test_initial_zoom_is_clamped_to_catalog() {
    let mut options = options();
    options.initial_zoom = ZoomSpec::Percent(5);
    let mut zoom = ZoomController::new(&options).unwrap();
    zoom.set_geometry(Size::new(800.0, 600.0), LETTER);

    assert_eq!(zoom.zoom_factor(), 0.5);
    assert_eq!(zoom.last_zoom(), 50);
    assert_eq!(zoom.active(), ZoomSpec::Percent(50));
}
