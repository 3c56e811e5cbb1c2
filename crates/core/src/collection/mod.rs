// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use semval::prelude::*;

use crate::ImageRef;

/// A named set of photos as listed by the backend.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollectionRecord {
    /// Unique within a single listing.
    pub name: String,

    /// Image used as the thumbnail of the collection.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "thumbnail_path", default, skip_serializing_if = "Option::is_none")
    )]
    pub preview_path: Option<ImageRef>,

    /// Creation time, preformatted for display.
    #[cfg_attr(feature = "serde", serde(rename = "date_created", default))]
    pub created_on: String,

    #[cfg_attr(feature = "serde", serde(default))]
    pub photos: Vec<ImageRef>,

    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub description: Option<String>,

    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub source_path: Option<String>,
}

impl CollectionRecord {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_preview_path(mut self, preview_path: impl Into<ImageRef>) -> Self {
        self.preview_path = Some(preview_path.into());
        self
    }

    #[must_use]
    pub fn with_photos<I>(mut self, photos: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ImageRef>,
    {
        self.photos = photos.into_iter().map(Into::into).collect();
        self
    }
}

/// Request for creating a new collection from a source directory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewCollection {
    pub name: String,

    pub description: String,

    /// Directory from which the backend imports the photos.
    pub source_path: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NewCollectionInvalidity {
    NameEmpty,
    SourcePathEmpty,
}

impl Validate for NewCollection {
    type Invalidity = NewCollectionInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        let Self {
            name,
            source_path,
            description: _,
        } = self;
        ValidationContext::new()
            .invalidate_if(name.trim().is_empty(), Self::Invalidity::NameEmpty)
            .invalidate_if(
                source_path.trim().is_empty(),
                Self::Invalidity::SourcePathEmpty,
            )
            .into()
    }
}
