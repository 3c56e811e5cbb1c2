// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{ops::Deref, sync::Arc};

use autocull_core::ScanParams;

use crate::{notification::Notifications, session::Session};

/// Shared runtime environment of all pages.
///
/// Lives as long as the application process. Dropping it ends the session.
#[allow(missing_debug_implementations)]
pub struct Environment<B> {
    backend: B,
    session: Session,
    notifications: Notifications,
    scan_params: ScanParams,
    placeholder_image: String,
}

impl<B> Environment<B> {
    /// Set up the runtime environment.
    #[must_use]
    pub fn commission(backend: B, settings: &crate::settings::State) -> Self {
        log::info!("Commissioning runtime environment");
        Self {
            backend,
            session: Session::new(),
            notifications: Notifications::default(),
            scan_params: settings.scan_params(),
            placeholder_image: settings.placeholder_image().to_owned(),
        }
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    /// Parameters for all duplicate scans.
    #[must_use]
    pub fn scan_params(&self) -> ScanParams {
        self.scan_params
    }

    /// Image that is displayed until a thumbnail has been resolved.
    #[must_use]
    pub fn placeholder_image(&self) -> &str {
        &self.placeholder_image
    }
}

/// Shared runtime environment handle
///
/// A cheaply `Clone`able and `Send`able handle to a shared runtime environment
/// for invoking operations.
#[allow(missing_debug_implementations)]
pub struct Handle<B>(Arc<Environment<B>>);

impl<B> Handle<B> {
    /// Set up a shared runtime environment
    ///
    /// See also: [`Environment::commission()`]
    #[must_use]
    pub fn commission(backend: B, settings: &crate::settings::State) -> Self {
        Self(Arc::new(Environment::commission(backend, settings)))
    }
}

impl<B> Clone for Handle<B> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<B> Deref for Handle<B> {
    type Target = Environment<B>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
