mod common;

use common::*;
use pdf_view_core::*;
use std::sync::Arc;
use tokio::sync::{Semaphore, mpsc};

#[tokio::test]
async fn test_render_all_in_document_order() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let document = FakeDocument::builder(4).report_starts(tx).build();
    let sequencer = RenderSequencer::new(&options());

    assert_eq!(sequencer.render_all(&document, 1.0).await.unwrap(), 4);

    let mut order = Vec::new();
    while let Ok(start) = rx.try_recv() {
        assert!(start.transform.is_identity());
        order.push(start.page_number);
    }
    assert_eq!(order, vec![1, 2, 3, 4]);

    let records = sequencer.records();
    assert_eq!(records.len(), 4);
    for record in &records {
        assert_eq!(record.zoom_factor, 1.0);
        assert_eq!(record.container.width, 612.0 * 1.5);
        assert_eq!(record.container.height, 792.0 * 1.5);
        assert!(record.surface.is_drawn());
    }
}

#[tokio::test]
async fn test_pixel_ratio_scales_surface_not_container() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut opts = options();
    opts.device_pixel_ratio = 2.0;
    let sequencer = RenderSequencer::new(&opts);
    let document = FakeDocument::builder(1).report_starts(tx).build();
    sequencer.render_all(&document, 1.0).await.unwrap();

    let record = sequencer.record(1).unwrap();
    assert_eq!(record.container.width, 918.0);
    assert_eq!(record.surface.width(), 1836);
    assert_eq!(record.surface.height(), 2376);
    assert_eq!(record.pixel_ratio, 2.0);

    // The renderer draws through a 2x scale; the viewport stays in CSS pixels
    let start = rx.try_recv().unwrap();
    assert_eq!(start.transform, Transform([2.0, 0.0, 0.0, 2.0, 0.0, 0.0]));
    assert_eq!(start.scale, 1.5);
}

#[tokio::test]
async fn test_surface_area_is_capped() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut opts = options();
    opts.max_canvas_area = 250_000.0;
    let sequencer = RenderSequencer::new(&opts);
    let document = FakeDocument::builder(1).report_starts(tx).build();
    sequencer.render_all(&document, 2.0).await.unwrap();

    let record = sequencer.record(1).unwrap();
    let area = u64::from(record.surface.width()) * u64::from(record.surface.height());
    assert!(area <= 250_000);
    assert!(record.pixel_ratio < 1.0);
    // The container keeps its CSS size
    assert_eq!(record.container.width, 612.0 * 3.0);

    // Drawing uses the reduced ratio, not the device ratio
    let start = rx.try_recv().unwrap();
    assert!(!start.transform.is_identity());
    assert_eq!(start.transform, Transform::scale(record.pixel_ratio));
    assert!(start.transform.0[0] < 1.0);
}

#[tokio::test]
async fn test_render_failure_propagates() {
    let document = FakeDocument::builder(3).failing(2).build();
    let sequencer = RenderSequencer::new(&options());

    let result = sequencer.render_all(&document, 1.0).await;
    assert_eq!(result, Err(RenderError::Failed("page 2 is broken".to_string())));
    assert!(sequencer.record(3).is_none());
}

#[tokio::test]
async fn test_resize_replaces_surfaces() {
    let sequencer = RenderSequencer::new(&options());
    sequencer.render_all(&FakeDocument::new(2), 1.0).await.unwrap();
    let before: Vec<u64> = sequencer.records().iter().map(|r| r.surface.id()).collect();

    let outcome = sequencer.resize_all(0.5).await.unwrap();
    assert_eq!(outcome, ResizeOutcome::Completed { pages: 2 });

    for (record, old_id) in sequencer.records().iter().zip(before) {
        assert_ne!(record.surface.id(), old_id);
        assert_eq!(record.zoom_factor, 0.5);
        assert_eq!(record.container.width, 612.0 * 0.75);
        assert!(record.surface.is_drawn());
    }
}

#[tokio::test]
async fn test_latest_resize_wins() {
    let sequencer = RenderSequencer::new(&options());
    sequencer.render_all(&FakeDocument::new(3), 1.0).await.unwrap();

    assert_eq!(sequencer.draw_sequence(), 1);
    let first = sequencer.resize_all(1.0);
    let second = sequencer.resize_all(1.5);
    // Requesting a resize advances the sequence before any drawing
    assert_eq!(sequencer.draw_sequence(), 3);
    let (first, second) = tokio::join!(first, second);

    assert_eq!(
        first.unwrap(),
        ResizeOutcome::Superseded {
            drawn: 0,
            stopped_at: 1
        }
    );
    assert_eq!(second.unwrap(), ResizeOutcome::Completed { pages: 3 });
    assert!(sequencer.records().iter().all(|r| r.zoom_factor == 1.5));
}

#[tokio::test]
async fn test_superseded_resize_stops_at_page_boundary() {
    let gate = Arc::new(Semaphore::new(0));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let document = FakeDocument::builder(3)
        .gate(gate.clone())
        .report_starts(tx)
        .build();
    let sequencer = RenderSequencer::new(&options());

    gate.add_permits(3);
    sequencer.render_all(&document, 1.0).await.unwrap();
    for _ in 0..3 {
        rx.recv().await.unwrap();
    }

    // First resize starts page 1 and blocks on the gate
    let first = tokio::spawn(sequencer.resize_all(1.25));
    let started = rx.recv().await.unwrap();
    assert_eq!(started.page_number, 1);
    assert_eq!(started.scale, 1.5 * 1.25);

    // A newer resize arrives while page 1 is still drawing
    let second = tokio::spawn(sequencer.resize_all(2.0));
    gate.add_permits(1);

    assert_eq!(
        first.await.unwrap().unwrap(),
        ResizeOutcome::Superseded {
            drawn: 1,
            stopped_at: 2
        }
    );

    gate.add_permits(3);
    assert_eq!(second.await.unwrap().unwrap(), ResizeOutcome::Completed { pages: 3 });

    // The surface the stale resize drew into is no longer attached
    let record = sequencer.record(1).unwrap();
    assert_ne!(record.surface.id(), started.surface_id);
    assert!(sequencer.records().iter().all(|r| r.zoom_factor == 2.0));

    // Only the newer resize drew pages 2 and 3
    let mut rest = Vec::new();
    while let Ok(start) = rx.try_recv() {
        rest.push((start.page_number, start.scale));
    }
    assert_eq!(rest, vec![(1, 3.0), (2, 3.0), (3, 3.0)]);
}

#[tokio::test]
async fn test_render_all_invalidates_pending_resize() {
    let sequencer = RenderSequencer::new(&options());
    let document = FakeDocument::new(2);
    sequencer.render_all(&document, 1.0).await.unwrap();

    let stale = sequencer.resize_all(2.0);
    sequencer.render_all(&document, 0.5).await.unwrap();

    assert!(matches!(
        stale.await.unwrap(),
        ResizeOutcome::Superseded { drawn: 0, .. }
    ));
    assert!(sequencer.records().iter().all(|r| r.zoom_factor == 0.5));
}
