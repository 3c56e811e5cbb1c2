// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Wiring of the pages on load and on user actions.
//!
//! Failures of explicit user actions are reported once through the
//! [`Notifications`](crate::notification::Notifications) of the environment.

use autocull_client::Backend;
use autocull_core::{CameraRecord, CollectionRecord, NewCamera, NewCollection};

use crate::{
    Handle, Observable, ObservableRef,
    creation::{self, Navigation},
    duplicates::{DuplicateReport, ScanError, scan_duplicates},
    gallery::{Gallery, RenderSummary},
};

pub const STARTED_NOTICE: &str = "Application started successfully!";

async fn notify_started<B: Backend>(handle: &Handle<B>) {
    match handle.session().notify_started(handle.backend()).await {
        Ok(true) => {
            handle.notifications().info(STARTED_NOTICE);
        }
        Ok(false) => (),
        Err(err) => {
            log::warn!("Failed to send start notification: {err}");
        }
    }
}

/// The dashboard page with the grid of collections.
#[allow(missing_debug_implementations)]
pub struct Dashboard<B> {
    handle: Handle<B>,
    gallery: Gallery,
    collections: Observable<Vec<CollectionRecord>>,
    duplicate_report: Observable<Option<DuplicateReport>>,
}

impl<B> Dashboard<B>
where
    B: Backend,
{
    #[must_use]
    pub fn new(handle: Handle<B>) -> Self {
        Self {
            handle,
            gallery: Gallery::default(),
            collections: Default::default(),
            duplicate_report: Default::default(),
        }
    }

    #[must_use]
    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    /// Collections of the last page load.
    #[must_use]
    pub fn collections(&self) -> ObservableRef<'_, Vec<CollectionRecord>> {
        self.collections.read()
    }

    #[must_use]
    pub fn duplicate_report(&self) -> ObservableRef<'_, Option<DuplicateReport>> {
        self.duplicate_report.read()
    }

    /// Load the page: notify the backend and render all collections.
    ///
    /// Returns `None` if the collections could not be loaded or if the
    /// grid has already been rendered.
    pub async fn load(&self) -> Option<RenderSummary> {
        notify_started(&self.handle).await;
        let collections = match self.handle.backend().list_collections().await {
            Ok(collections) => collections,
            Err(err) => {
                self.handle
                    .notifications()
                    .error(format!("Failed to load collections: {err}"));
                return None;
            }
        };
        self.collections.modify(|loaded| {
            *loaded = collections.clone();
            true
        });
        match self.gallery.render(self.handle.backend(), &collections).await {
            Ok(summary) => Some(summary),
            Err(err) => {
                log::info!("Skipped rendering of collections: {err}");
                None
            }
        }
    }

    /// Scan the photos of all collections for duplicates.
    ///
    /// The collections are reloaded before the scan to include all photos
    /// that have been imported in the meantime.
    pub async fn find_duplicates(&self) -> Result<DuplicateReport, ScanError> {
        let result = self.try_find_duplicates().await;
        match &result {
            Ok(report) => {
                self.duplicate_report.modify(|last_report| {
                    *last_report = Some(report.clone());
                    true
                });
            }
            Err(err) => {
                self.handle.notifications().error(err.to_string());
            }
        }
        result
    }

    async fn try_find_duplicates(&self) -> Result<DuplicateReport, ScanError> {
        let collections = self
            .handle
            .backend()
            .list_collections()
            .await
            .map_err(ScanError::LoadCollections)?;
        scan_duplicates(self.handle.backend(), &collections, self.handle.scan_params()).await
    }

    /// Create a new collection.
    ///
    /// Returns the page to navigate to on success.
    pub async fn create_collection(&self, new_collection: &NewCollection) -> Option<Navigation> {
        match creation::create_collection(self.handle.backend(), new_collection).await {
            Ok(navigation) => Some(navigation),
            Err(err) => {
                self.handle
                    .notifications()
                    .error(format!("Failed to create collection: {err}"));
                None
            }
        }
    }
}

/// The page with the grid of cameras.
#[allow(missing_debug_implementations)]
pub struct CameraPage<B> {
    handle: Handle<B>,
    gallery: Gallery,
}

impl<B> CameraPage<B>
where
    B: Backend,
{
    #[must_use]
    pub fn new(handle: Handle<B>) -> Self {
        Self {
            handle,
            gallery: Gallery::default(),
        }
    }

    #[must_use]
    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    /// Load the page: notify the backend and render all cameras.
    pub async fn load(&self) -> Option<RenderSummary> {
        notify_started(&self.handle).await;
        let cameras = match self.handle.backend().list_cameras().await {
            Ok(cameras) => cameras,
            Err(err) => {
                self.handle
                    .notifications()
                    .error(format!("Failed to load cameras: {err}"));
                return None;
            }
        };
        match self.gallery.render(self.handle.backend(), &cameras).await {
            Ok(summary) => Some(summary),
            Err(err) => {
                log::info!("Skipped rendering of cameras: {err}");
                None
            }
        }
    }

    /// Register a new camera.
    ///
    /// Returns the page to navigate to together with the created camera.
    pub async fn create_camera(
        &self,
        new_camera: &NewCamera,
    ) -> Option<(Navigation, Option<CameraRecord>)> {
        match creation::create_camera(self.handle.backend(), new_camera).await {
            Ok(created) => Some(created),
            Err(err) => {
                self.handle
                    .notifications()
                    .error(format!("Failed to create camera: {err}"));
                None
            }
        }
    }
}
