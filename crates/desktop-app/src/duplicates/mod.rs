// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt;

use autocull_client::Backend;
use autocull_core::{CollectionRecord, DetectionBatch, DuplicatePair, DuplicateScan, ScanParams};

pub const NO_DUPLICATES_NOTICE: &str = "No duplicates found!";

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("failed to load collections: {0}")]
    LoadCollections(#[source] autocull_client::Error),

    #[error("duplicate detection failed: {0}")]
    Detect(#[source] autocull_client::Error),
}

/// Result of a duplicate scan, ready for display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DuplicateReport {
    /// Number of images that have been compared.
    pub scanned: usize,

    pub scan: DuplicateScan,
}

/// A single line of a [`DuplicateReport`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReportLine<'a> {
    Duplicate(&'a DuplicatePair),
    NearDuplicate(&'a DuplicatePair),
    NoDuplicates,
}

impl fmt::Display for ReportLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (label, pair) = match self {
            Self::Duplicate(pair) => ("Duplicate", pair),
            Self::NearDuplicate(pair) => ("Near Duplicate", pair),
            Self::NoDuplicates => return f.write_str(NO_DUPLICATES_NOTICE),
        };
        write!(
            f,
            "{label} (score {score}): {first} & {second}",
            score = pair.display_score(),
            first = pair.first,
            second = pair.second,
        )
    }
}

impl DuplicateReport {
    /// All duplicates followed by all near duplicates, in backend order.
    ///
    /// A report without any pairs consists of a single notice.
    #[must_use]
    pub fn lines(&self) -> Vec<ReportLine<'_>> {
        let DuplicateScan {
            duplicates,
            near_duplicates,
        } = &self.scan;
        if self.scan.is_empty() {
            return vec![ReportLine::NoDuplicates];
        }
        duplicates
            .iter()
            .map(ReportLine::Duplicate)
            .chain(near_duplicates.iter().map(ReportLine::NearDuplicate))
            .collect()
    }
}

/// Scan the photos of all given collections for duplicates.
///
/// Sends exactly one detection request with all photos. Ranking and
/// truncation of the results are up to the backend.
pub async fn scan_duplicates<B>(
    backend: &B,
    collections: &[CollectionRecord],
    params: ScanParams,
) -> Result<DuplicateReport, ScanError>
where
    B: Backend,
{
    let batch = DetectionBatch::from_collections(collections);
    let ScanParams {
        threshold,
        max_results,
    } = params;
    log::info!(
        "Scanning {count} photo(s) of {collections} collection(s) for duplicates",
        count = batch.len(),
        collections = collections.len(),
    );
    let scan = backend
        .detect_duplicates(batch.paths(), threshold, max_results)
        .await
        .map_err(ScanError::Detect)?;
    log::info!(
        "Found {duplicates} duplicate(s) and {near_duplicates} near duplicate(s)",
        duplicates = scan.duplicates.len(),
        near_duplicates = scan.near_duplicates.len(),
    );
    Ok(DuplicateReport {
        scanned: batch.len(),
        scan,
    })
}

#[cfg(test)]
mod tests;
