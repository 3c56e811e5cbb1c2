// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{borrow::Cow, slice, time::Instant};

use discro::Subscriber;

use autocull_client::Backend;
use autocull_core::{CameraRecord, CollectionRecord};

use crate::{
    Observable, ObservableRef,
    thumbnail::{Thumbnail, resolve_thumbnail},
};

/// A record that is displayed as a card in a grid.
pub trait CardSource {
    fn title(&self) -> &str;

    fn subtitle(&self) -> Cow<'_, str>;

    /// Image reference of the thumbnail, if any.
    fn preview_path(&self) -> Option<&str>;
}

impl CardSource for CollectionRecord {
    fn title(&self) -> &str {
        &self.name
    }

    fn subtitle(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.created_on)
    }

    fn preview_path(&self) -> Option<&str> {
        self.preview_path.as_deref()
    }
}

impl CardSource for CameraRecord {
    fn title(&self) -> &str {
        &self.name
    }

    fn subtitle(&self) -> Cow<'_, str> {
        Cow::Owned(self.make_and_model())
    }

    fn preview_path(&self) -> Option<&str> {
        self.photo.as_deref()
    }
}

/// Visual projection of a single record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCard {
    pub title: String,
    pub subtitle: String,
    thumbnail: Thumbnail,
}

impl RenderedCard {
    /// A new card that displays the placeholder image.
    #[must_use]
    pub fn new(source: &impl CardSource) -> Self {
        Self {
            title: source.title().to_owned(),
            subtitle: source.subtitle().into_owned(),
            thumbnail: Thumbnail::Placeholder,
        }
    }

    #[must_use]
    pub const fn thumbnail(&self) -> &Thumbnail {
        &self.thumbnail
    }

    /// Replace the placeholder with the resolved image.
    ///
    /// The thumbnail is swapped at most once. Returns `false` if it has
    /// already been resolved before.
    pub fn swap_thumbnail(&mut self, data_url: String) -> bool {
        if self.thumbnail.is_resolved() {
            return false;
        }
        self.thumbnail = Thumbnail::Resolved(data_url);
        true
    }
}

/// Container that receives rendered cards.
pub trait CardSink {
    fn append_card(&self, card: RenderedCard);
}

/// Observable grid of cards in display order.
#[derive(Debug, Default)]
pub struct Grid {
    cards: Observable<Vec<RenderedCard>>,
}

impl Grid {
    #[must_use]
    pub fn read(&self) -> ObservableRef<'_, Vec<RenderedCard>> {
        self.cards.read()
    }

    #[must_use]
    pub fn subscribe_changed(&self) -> Subscriber<Vec<RenderedCard>> {
        self.cards.subscribe_changed()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.read().is_empty()
    }

    fn clear(&self) -> bool {
        self.cards.modify(|cards| {
            if cards.is_empty() {
                return false;
            }
            cards.clear();
            true
        })
    }
}

impl CardSink for Grid {
    fn append_card(&self, card: RenderedCard) {
        self.cards.modify(|cards| {
            cards.push(card);
            true
        });
    }
}

/// Yields one card per record, in record order.
///
/// The thumbnail of each card is resolved before the card is yielded, and
/// the next resolution only starts when the next card is requested.
#[allow(missing_debug_implementations)]
pub struct CardStream<'a, B, R> {
    backend: &'a B,
    records: slice::Iter<'a, R>,
}

impl<'a, B, R> CardStream<'a, B, R>
where
    B: Backend,
    R: CardSource,
{
    #[must_use]
    pub fn new(backend: &'a B, records: &'a [R]) -> Self {
        Self {
            backend,
            records: records.iter(),
        }
    }

    /// Number of records that have not been rendered yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.records.len()
    }

    pub async fn next(&mut self) -> Option<RenderedCard> {
        let record = self.records.next()?;
        let mut card = RenderedCard::new(record);
        if let Thumbnail::Resolved(data_url) =
            resolve_thumbnail(self.backend, record.preview_path()).await
        {
            card.swap_thumbnail(data_url);
        }
        Some(card)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    /// Number of cards that have been appended.
    pub appended: usize,

    /// Number of appended cards with a resolved thumbnail.
    pub resolved: usize,
}

impl RenderSummary {
    /// Number of appended cards that display the placeholder.
    #[must_use]
    pub const fn placeholders(&self) -> usize {
        self.appended - self.resolved
    }
}

/// Render all records one after another.
///
/// Each card is appended to the sink as soon as its thumbnail has been
/// resolved or given up. Cards appear in record order, independent of the
/// latency of each resolution, and at most one resolution is in flight.
pub async fn render_sequentially<B, R, S>(backend: &B, records: &[R], sink: &S) -> RenderSummary
where
    B: Backend,
    R: CardSource,
    S: CardSink + ?Sized,
{
    let mut summary = RenderSummary::default();
    let mut cards = CardStream::new(backend, records);
    while let Some(card) = cards.next().await {
        summary.appended += 1;
        if card.thumbnail().is_resolved() {
            summary.resolved += 1;
        }
        sink.append_card(card);
    }
    debug_assert_eq!(records.len(), summary.appended);
    log::debug!(
        "Rendered {appended} card(s) with {placeholders} placeholder(s)",
        appended = summary.appended,
        placeholders = summary.placeholders(),
    );
    summary
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum State {
    #[default]
    Idle,
    Rendering {
        total: usize,
        pending_since: Instant,
    },
    Rendered(RenderSummary),
}

impl State {
    #[must_use]
    pub const fn pending_since(&self) -> Option<Instant> {
        match self {
            Self::Idle | Self::Rendered(_) => None,
            Self::Rendering { pending_since, .. } => Some(*pending_since),
        }
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending_since().is_some()
    }

    fn try_start_rendering(&mut self, total: usize) -> Result<(), GalleryError> {
        match self {
            Self::Idle => {
                *self = Self::Rendering {
                    total,
                    pending_since: Instant::now(),
                };
                Ok(())
            }
            Self::Rendering { .. } => Err(GalleryError::RenderPending),
            Self::Rendered(_) => Err(GalleryError::AlreadyRendered),
        }
    }

    /// Returns `Ok(false)` if the state is already idle.
    fn try_reset(&mut self) -> Result<bool, GalleryError> {
        match self {
            Self::Idle => Ok(false),
            Self::Rendering { .. } => Err(GalleryError::RenderPending),
            Self::Rendered(_) => {
                log::debug!("Resetting state: {self:?}");
                *self = Self::Idle;
                Ok(true)
            }
        }
    }

    fn finish_rendering(&mut self, summary: RenderSummary) -> bool {
        debug_assert!(self.is_pending());
        if !self.is_pending() {
            return false;
        }
        *self = Self::Rendered(summary);
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GalleryError {
    #[error("rendering is still pending")]
    RenderPending,

    #[error("gallery has already been rendered")]
    AlreadyRendered,
}

/// A grid that is rendered once per page load.
#[derive(Debug, Default)]
pub struct Gallery {
    grid: Grid,
    state: Observable<State>,
}

impl Gallery {
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn state(&self) -> State {
        *self.state.read()
    }

    #[must_use]
    pub fn subscribe_state_changed(&self) -> Subscriber<State> {
        self.state.subscribe_changed()
    }

    /// Render the records into the grid.
    ///
    /// Rejected while another render is pending or after the grid has
    /// been rendered. Use [`Self::reset()`] for rendering again.
    pub async fn render<B, R>(
        &self,
        backend: &B,
        records: &[R],
    ) -> Result<RenderSummary, GalleryError>
    where
        B: Backend,
        R: CardSource,
    {
        let mut started = Ok(());
        self.state.modify(|state| {
            started = state.try_start_rendering(records.len());
            started.is_ok()
        });
        started?;
        log::info!("Rendering {count} card(s)", count = records.len());
        let summary = render_sequentially(backend, records, &self.grid).await;
        self.state.modify(|state| state.finish_rendering(summary));
        Ok(summary)
    }

    /// Discard all cards, e.g. when reloading the page.
    ///
    /// Rejected while rendering is pending.
    pub fn reset(&self) -> Result<(), GalleryError> {
        let mut reset = Ok(false);
        self.state.modify(|state| {
            reset = state.try_reset();
            matches!(reset, Ok(true))
        });
        if reset? {
            self.grid.clear();
        }
        Ok(())
    }
}
