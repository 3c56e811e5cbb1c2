// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! In-process backend with scripted responses and latencies.

use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use autocull_client::{Backend, Error, Result};
use autocull_core::{
    CameraCreated, CameraRecord, CollectionRecord, DuplicateScan, NewCamera, NewCollection,
};

#[derive(Debug, Clone)]
pub(crate) enum ImageOutcome {
    Resolved(String),
    Unavailable,
    Rejected,
}

#[derive(Debug, Clone)]
pub(crate) struct ImageScript {
    outcome: ImageOutcome,
    delay: Duration,
}

impl ImageScript {
    pub(crate) fn resolved(data_url: impl Into<String>) -> Self {
        Self {
            outcome: ImageOutcome::Resolved(data_url.into()),
            delay: Duration::ZERO,
        }
    }

    pub(crate) fn unavailable() -> Self {
        Self {
            outcome: ImageOutcome::Unavailable,
            delay: Duration::ZERO,
        }
    }

    pub(crate) fn rejected() -> Self {
        Self {
            outcome: ImageOutcome::Rejected,
            delay: Duration::ZERO,
        }
    }

    pub(crate) fn delayed(self, delay: Duration) -> Self {
        Self { delay, ..self }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DetectRequest {
    pub(crate) paths: Vec<String>,
    pub(crate) threshold: f64,
    pub(crate) max_results: usize,
}

#[derive(Debug, Default)]
pub(crate) struct ScriptedBackend {
    collections: Vec<CollectionRecord>,
    cameras: Vec<CameraRecord>,
    images: HashMap<String, ImageScript>,
    scan: Option<DuplicateScan>,
    reject_listing: bool,
    reject_creation: bool,
    camera_creation_succeeds: bool,
    rejected_starts: AtomicUsize,
    on_start_count: AtomicUsize,
    list_collections_count: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    resolved_paths: Mutex<Vec<String>>,
    detect_requests: Mutex<Vec<DetectRequest>>,
    created_collections: Mutex<Vec<NewCollection>>,
    created_cameras: Mutex<Vec<NewCamera>>,
}

impl ScriptedBackend {
    pub(crate) fn with_collections(
        mut self,
        collections: impl IntoIterator<Item = CollectionRecord>,
    ) -> Self {
        self.collections = collections.into_iter().collect();
        self
    }

    pub(crate) fn with_cameras(mut self, cameras: impl IntoIterator<Item = CameraRecord>) -> Self {
        self.cameras = cameras.into_iter().collect();
        self
    }

    pub(crate) fn with_image(mut self, path: impl Into<String>, script: ImageScript) -> Self {
        self.images.insert(path.into(), script);
        self
    }

    /// Responds to duplicate detection requests; rejects them if unset.
    pub(crate) fn with_scan(mut self, scan: DuplicateScan) -> Self {
        self.scan = Some(scan);
        self
    }

    pub(crate) fn with_rejected_listing(mut self) -> Self {
        self.reject_listing = true;
        self
    }

    pub(crate) fn with_rejected_creation(mut self) -> Self {
        self.reject_creation = true;
        self
    }

    pub(crate) fn with_successful_camera_creation(mut self) -> Self {
        self.camera_creation_succeeds = true;
        self
    }

    /// Rejects the given number of start notifications before accepting one.
    pub(crate) fn with_rejected_start(self, count: usize) -> Self {
        self.rejected_starts.store(count, Ordering::Relaxed);
        self
    }

    pub(crate) fn on_start_count(&self) -> usize {
        self.on_start_count.load(Ordering::Relaxed)
    }

    pub(crate) fn list_collections_count(&self) -> usize {
        self.list_collections_count.load(Ordering::Relaxed)
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::Relaxed)
    }

    /// Paths of all image resolution requests in invocation order.
    pub(crate) fn resolved_paths(&self) -> Vec<String> {
        self.resolved_paths.lock().unwrap().clone()
    }

    pub(crate) fn detect_requests(&self) -> Vec<DetectRequest> {
        self.detect_requests.lock().unwrap().clone()
    }

    pub(crate) fn created_collections(&self) -> Vec<NewCollection> {
        self.created_collections.lock().unwrap().clone()
    }

    pub(crate) fn created_cameras(&self) -> Vec<NewCamera> {
        self.created_cameras.lock().unwrap().clone()
    }
}

impl Backend for ScriptedBackend {
    async fn list_collections(&self) -> Result<Vec<CollectionRecord>> {
        self.list_collections_count.fetch_add(1, Ordering::Relaxed);
        if self.reject_listing {
            return Err(Error::Rejected("collections unavailable".to_owned()));
        }
        Ok(self.collections.clone())
    }

    async fn list_cameras(&self) -> Result<Vec<CameraRecord>> {
        if self.reject_listing {
            return Err(Error::Rejected("cameras unavailable".to_owned()));
        }
        Ok(self.cameras.clone())
    }

    async fn resolve_image(&self, path: &str) -> Result<Option<String>> {
        self.resolved_paths.lock().unwrap().push(path.to_owned());
        let in_flight = self.in_flight.fetch_add(1, Ordering::AcqRel) + 1;
        self.max_in_flight.fetch_max(in_flight, Ordering::AcqRel);
        let script = self
            .images
            .get(path)
            .cloned()
            .unwrap_or_else(ImageScript::unavailable);
        if !script.delay.is_zero() {
            tokio::time::sleep(script.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::AcqRel);
        match script.outcome {
            ImageOutcome::Resolved(data_url) => Ok(Some(data_url)),
            ImageOutcome::Unavailable => Ok(None),
            ImageOutcome::Rejected => Err(Error::Rejected(format!("cannot read {path}"))),
        }
    }

    async fn detect_duplicates(
        &self,
        paths: &[String],
        threshold: f64,
        max_results: usize,
    ) -> Result<DuplicateScan> {
        self.detect_requests.lock().unwrap().push(DetectRequest {
            paths: paths.to_vec(),
            threshold,
            max_results,
        });
        self.scan
            .clone()
            .ok_or_else(|| Error::Rejected("detection failed".to_owned()))
    }

    async fn create_collection(&self, new_collection: &NewCollection) -> Result<()> {
        if self.reject_creation {
            return Err(Error::Rejected("source directory not found".to_owned()));
        }
        self.created_collections
            .lock()
            .unwrap()
            .push(new_collection.clone());
        Ok(())
    }

    async fn create_camera(&self, new_camera: &NewCamera) -> Result<CameraCreated> {
        if self.reject_creation {
            return Err(Error::Rejected("camera registry unavailable".to_owned()));
        }
        if !self.camera_creation_succeeds {
            return Ok(CameraCreated::default());
        }
        self.created_cameras.lock().unwrap().push(new_camera.clone());
        Ok(CameraCreated {
            success: true,
            camera: Some(new_camera.clone()),
        })
    }

    async fn on_start(&self) -> Result<()> {
        self.on_start_count.fetch_add(1, Ordering::Relaxed);
        if self
            .rejected_starts
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |count| {
                count.checked_sub(1)
            })
            .is_ok()
        {
            return Err(Error::Rejected("not ready".to_owned()));
        }
        Ok(())
    }
}

/// Deterministic pseudo-random latencies in the range `0..max_millis`.
pub(crate) fn scrambled_delays(seed: u64, count: usize, max_millis: u64) -> Vec<Duration> {
    let mut state = seed.max(1);
    (0..count)
        .map(|_| {
            // xorshift64
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            Duration::from_millis(state % max_millis)
        })
        .collect()
}
