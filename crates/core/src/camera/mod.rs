// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use semval::prelude::*;

use crate::ImageRef;

/// Camera body and lens settings as stored by the backend.
///
/// Exposure values are kept verbatim as entered by the user, e.g.
/// `"f/2.8"` or `"1/250"`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CameraRecord {
    pub name: String,

    pub make: String,

    pub model: String,

    pub lens_make: String,

    pub lens_model: String,

    pub aperture: String,

    pub shutter_speed: String,

    pub iso: String,

    /// Photo of the camera, used as its thumbnail.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub photo: Option<ImageRef>,
}

impl CameraRecord {
    /// Make and model for display, omitting empty parts.
    #[must_use]
    pub fn make_and_model(&self) -> String {
        [self.make.trim(), self.model.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Request for registering a new camera.
///
/// Shares all fields with [`CameraRecord`].
pub type NewCamera = CameraRecord;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NewCameraInvalidity {
    NameEmpty,
}

impl Validate for CameraRecord {
    type Invalidity = NewCameraInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        ValidationContext::new()
            .invalidate_if(self.name.trim().is_empty(), Self::Invalidity::NameEmpty)
            .into()
    }
}

/// Response of the backend after registering a camera.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CameraCreated {
    pub success: bool,

    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub camera: Option<CameraRecord>,
}
