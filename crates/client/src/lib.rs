// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Asynchronous request/response client of the backend process.
//!
//! Every remote operation returns a future. Operations are never retried,
//! timed out, or cancelled by the client itself. Failures surface either
//! as an empty result (e.g. an image that is unavailable) or as an [`Error`].

use std::{future::Future, sync::Arc};

use autocull_core::{
    CameraCreated, CameraRecord, CollectionRecord, DuplicateScan, NewCamera, NewCollection,
};

#[cfg(feature = "webapi-backend")]
pub mod webapi;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    #[cfg(feature = "webapi-backend")]
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {status}")]
    Status {
        status: u16,
        body: Option<serde_json::Value>,
    },

    #[error("unexpected payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("rejected by backend: {0}")]
    Rejected(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Operations provided by the backend process.
pub trait Backend: Send + Sync {
    fn list_collections(&self) -> impl Future<Output = Result<Vec<CollectionRecord>>> + Send;

    fn list_cameras(&self) -> impl Future<Output = Result<Vec<CameraRecord>>> + Send;

    /// Load an image as a data URL.
    ///
    /// Resolves to `None` if the image is unavailable.
    fn resolve_image(&self, path: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Detect exact and near duplicates among the given images.
    ///
    /// The result lists are ranked and truncated by the backend.
    fn detect_duplicates(
        &self,
        paths: &[String],
        threshold: f64,
        max_results: usize,
    ) -> impl Future<Output = Result<DuplicateScan>> + Send;

    fn create_collection(
        &self,
        new_collection: &NewCollection,
    ) -> impl Future<Output = Result<()>> + Send;

    fn create_camera(
        &self,
        new_camera: &NewCamera,
    ) -> impl Future<Output = Result<CameraCreated>> + Send;

    /// Notify the backend that the front end is ready.
    fn on_start(&self) -> impl Future<Output = Result<()>> + Send;
}

impl<B> Backend for Arc<B>
where
    B: Backend,
{
    fn list_collections(&self) -> impl Future<Output = Result<Vec<CollectionRecord>>> + Send {
        (**self).list_collections()
    }

    fn list_cameras(&self) -> impl Future<Output = Result<Vec<CameraRecord>>> + Send {
        (**self).list_cameras()
    }

    fn resolve_image(&self, path: &str) -> impl Future<Output = Result<Option<String>>> + Send {
        (**self).resolve_image(path)
    }

    fn detect_duplicates(
        &self,
        paths: &[String],
        threshold: f64,
        max_results: usize,
    ) -> impl Future<Output = Result<DuplicateScan>> + Send {
        (**self).detect_duplicates(paths, threshold, max_results)
    }

    fn create_collection(
        &self,
        new_collection: &NewCollection,
    ) -> impl Future<Output = Result<()>> + Send {
        (**self).create_collection(new_collection)
    }

    fn create_camera(
        &self,
        new_camera: &NewCamera,
    ) -> impl Future<Output = Result<CameraCreated>> + Send {
        (**self).create_camera(new_camera)
    }

    fn on_start(&self) -> impl Future<Output = Result<()>> + Send {
        (**self).on_start()
    }
}
