// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use discro::{Publisher, Ref, Subscriber};

mod environment;
pub use self::environment::{Environment, Handle};

/// Page bootstrap
pub mod bootstrap;

/// Creation of collections and cameras
pub mod creation;

/// Duplicate scans
pub mod duplicates;

/// Sequential rendering of cards
pub mod gallery;

/// User-visible notifications
pub mod notification;

/// Once-only session state
pub mod session;

/// Settings management
pub mod settings;

/// Thumbnail resolution
pub mod thumbnail;

#[cfg(test)]
mod testing;

pub type ObservableRef<'a, T> = Ref<'a, T>;

/// Manages the mutable, observable state
#[derive(Debug)]
pub struct Observable<T> {
    publisher: Publisher<T>,
}

impl<T> Observable<T> {
    #[must_use]
    pub fn new(initial_value: T) -> Self {
        let publisher = Publisher::new(initial_value);
        Self { publisher }
    }

    /// Read the current value.
    ///
    /// Holds a read lock until the returned reference is dropped.
    #[must_use]
    pub fn read(&self) -> ObservableRef<'_, T> {
        self.publisher.read()
    }

    #[must_use]
    pub fn subscribe_changed(&self) -> Subscriber<T> {
        self.publisher.subscribe_changed()
    }

    #[allow(clippy::must_use_candidate)]
    pub fn modify(&self, modify: impl FnOnce(&mut T) -> bool) -> bool {
        self.publisher.modify(modify)
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(Default::default())
    }
}
