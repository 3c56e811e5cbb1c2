// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Records exchanged with the backend process.
//!
//! All records are immutable snapshots that are owned by the backend.
//! The front end only projects them into visual cards and never
//! writes them back.

pub mod camera;
pub use self::camera::{CameraCreated, CameraRecord, NewCamera};

pub mod collection;
pub use self::collection::{CollectionRecord, NewCollection};

pub mod duplicate;
pub use self::duplicate::{DetectionBatch, DuplicatePair, DuplicateScan, ScanParams};

/// Raw, backend-specific reference of a stored image, usually a file path.
pub type ImageRef = String;
