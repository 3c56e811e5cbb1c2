// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use test_log::test;

use crate::testing::{DetectRequest, ScriptedBackend};

use super::*;

fn render(report: &DuplicateReport) -> Vec<String> {
    report.lines().iter().map(ToString::to_string).collect()
}

#[test(tokio::test)]
async fn send_flattened_photos_in_one_request() {
    let collections = [
        CollectionRecord::new("first").with_photos(["a", "b"]),
        CollectionRecord::new("second").with_photos(["c"]),
    ];
    let backend = ScriptedBackend::default().with_scan(DuplicateScan::default());
    let params = ScanParams {
        threshold: 0.95,
        max_results: 5,
    };

    let report = scan_duplicates(&backend, &collections, params).await.unwrap();

    assert_eq!(3, report.scanned);
    assert_eq!(
        vec![DetectRequest {
            paths: vec!["a".into(), "b".into(), "c".into()],
            threshold: 0.95,
            max_results: 5,
        }],
        backend.detect_requests()
    );
}

#[test(tokio::test)]
async fn render_duplicates_before_near_duplicates_in_backend_order() {
    let backend = ScriptedBackend::default().with_scan(DuplicateScan {
        duplicates: vec![
            DuplicatePair::new(0.987_654, "x.jpg", "y.jpg"),
            DuplicatePair::new(1.0, "b.jpg", "a.jpg"),
        ],
        near_duplicates: vec![DuplicatePair::new(0.9912, "n.jpg", "m.jpg")],
    });
    let collections = [CollectionRecord::new("all").with_photos(["x.jpg", "y.jpg"])];

    let report = scan_duplicates(&backend, &collections, ScanParams::default())
        .await
        .unwrap();

    assert_eq!(
        vec![
            "Duplicate (score 0.988): x.jpg & y.jpg",
            "Duplicate (score 1.000): b.jpg & a.jpg",
            "Near Duplicate (score 0.991): n.jpg & m.jpg",
        ],
        render(&report)
    );
}

#[test(tokio::test)]
async fn empty_results_render_single_notice() {
    let backend = ScriptedBackend::default().with_scan(DuplicateScan::default());
    let collections = [CollectionRecord::new("all").with_photos(["x.jpg"])];

    let report = scan_duplicates(&backend, &collections, ScanParams::default())
        .await
        .unwrap();

    assert_eq!(vec![ReportLine::NoDuplicates], report.lines());
    assert_eq!(vec![NO_DUPLICATES_NOTICE], render(&report));
}

#[test(tokio::test)]
async fn failed_detection_is_returned() {
    // Without a scripted scan the backend rejects the request.
    let backend = ScriptedBackend::default();
    let collections = [CollectionRecord::new("all").with_photos(["x.jpg"])];

    let result = scan_duplicates(&backend, &collections, ScanParams::default()).await;

    assert!(matches!(result, Err(ScanError::Detect(_))));
    assert_eq!(1, backend.detect_requests().len());
}

#[test(tokio::test)]
async fn batch_is_rebuilt_for_every_scan() {
    let backend = ScriptedBackend::default().with_scan(DuplicateScan::default());
    let before = [CollectionRecord::new("all").with_photos(["a"])];
    let after = [CollectionRecord::new("all").with_photos(["a", "b"])];

    scan_duplicates(&backend, &before, ScanParams::default())
        .await
        .unwrap();
    scan_duplicates(&backend, &after, ScanParams::default())
        .await
        .unwrap();

    let requests = backend.detect_requests();
    assert_eq!(vec!["a"], requests[0].paths);
    assert_eq!(vec!["a", "b"], requests[1].paths);
}
