// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use semval::prelude::*;

use autocull_client::Backend;
use autocull_core::{CameraCreated, CameraRecord, NewCamera, NewCollection};

/// Page to display after an action has completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Dashboard,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateError {
    #[error("invalid input: {0}")]
    Invalid(String),

    #[error("camera has not been created")]
    NotCreated,

    #[error(transparent)]
    Backend(#[from] autocull_client::Error),
}

/// Create a new collection from a source directory.
///
/// Navigates back to the dashboard on success.
pub async fn create_collection<B>(
    backend: &B,
    new_collection: &NewCollection,
) -> Result<Navigation, CreateError>
where
    B: Backend,
{
    if let Err(err) = new_collection.validate() {
        return Err(CreateError::Invalid(format!("{err:?}")));
    }
    backend.create_collection(new_collection).await?;
    log::info!(
        "Created collection \"{name}\" from {source_path}",
        name = new_collection.name,
        source_path = new_collection.source_path,
    );
    Ok(Navigation::Dashboard)
}

/// Register a new camera.
///
/// Navigates back to the dashboard only if the backend reports success.
pub async fn create_camera<B>(
    backend: &B,
    new_camera: &NewCamera,
) -> Result<(Navigation, Option<CameraRecord>), CreateError>
where
    B: Backend,
{
    if let Err(err) = new_camera.validate() {
        return Err(CreateError::Invalid(format!("{err:?}")));
    }
    let CameraCreated { success, camera } = backend.create_camera(new_camera).await?;
    if !success {
        return Err(CreateError::NotCreated);
    }
    log::info!("Created camera \"{name}\"", name = new_camera.name);
    Ok((Navigation::Dashboard, camera))
}
