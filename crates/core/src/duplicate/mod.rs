// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt;

use crate::{CollectionRecord, ImageRef};

/// Two images that the backend considers similar.
///
/// Serialized as the 3-tuple `[score, first, second]`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "(f64, ImageRef, ImageRef)", into = "(f64, ImageRef, ImageRef)")
)]
pub struct DuplicatePair {
    /// Similarity, conventionally in the range [0, 1].
    pub score: f64,

    pub first: ImageRef,

    pub second: ImageRef,
}

impl DuplicatePair {
    #[must_use]
    pub fn new(score: f64, first: impl Into<ImageRef>, second: impl Into<ImageRef>) -> Self {
        Self {
            score,
            first: first.into(),
            second: second.into(),
        }
    }

    /// The score rounded half away from zero to three decimal places.
    #[must_use]
    pub fn display_score(&self) -> impl fmt::Display {
        DisplayScore(self.score)
    }
}

struct DisplayScore(f64);

impl fmt::Display for DisplayScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `{:.3}` alone would round ties to even.
        let rounded = (self.0 * 1000.0).round() / 1000.0;
        write!(f, "{rounded:.3}")
    }
}

impl From<(f64, ImageRef, ImageRef)> for DuplicatePair {
    fn from((score, first, second): (f64, ImageRef, ImageRef)) -> Self {
        Self {
            score,
            first,
            second,
        }
    }
}

impl From<DuplicatePair> for (f64, ImageRef, ImageRef) {
    fn from(from: DuplicatePair) -> Self {
        let DuplicatePair {
            score,
            first,
            second,
        } = from;
        (score, first, second)
    }
}

/// Outcome of a single duplicate detection request.
///
/// Both lists are ordered by the backend.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DuplicateScan {
    pub duplicates: Vec<DuplicatePair>,

    pub near_duplicates: Vec<DuplicatePair>,
}

impl DuplicateScan {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.duplicates.is_empty() && self.near_duplicates.is_empty()
    }
}

pub const DEFAULT_SCAN_THRESHOLD: f64 = 0.99;

pub const DEFAULT_SCAN_MAX_RESULTS: usize = 10;

/// Parameters of a duplicate detection request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScanParams {
    /// Minimum similarity score of reported pairs.
    pub threshold: f64,

    /// Maximum number of pairs per result list.
    pub max_results: usize,
}

impl Default for ScanParams {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SCAN_THRESHOLD,
            max_results: DEFAULT_SCAN_MAX_RESULTS,
        }
    }
}

/// All photos of all collections, flattened in listing order.
///
/// Built from scratch for every scan.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DetectionBatch {
    paths: Vec<ImageRef>,
}

impl DetectionBatch {
    #[must_use]
    pub fn from_collections<'a>(
        collections: impl IntoIterator<Item = &'a CollectionRecord>,
    ) -> Self {
        let paths = collections
            .into_iter()
            .flat_map(|collection| collection.photos.iter().cloned())
            .collect();
        Self { paths }
    }

    #[must_use]
    pub fn paths(&self) -> &[ImageRef] {
        &self.paths
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    #[must_use]
    pub fn into_paths(self) -> Vec<ImageRef> {
        self.paths
    }
}
