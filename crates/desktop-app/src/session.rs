// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::atomic::{AtomicBool, Ordering};

use autocull_client::Backend;

/// State that is shared by all pages of a single application run.
///
/// The start notification is sent at most once per session. The flag is
/// only cleared by creating a new session, i.e. by restarting the process.
#[derive(Debug, Default)]
pub struct Session {
    started: AtomicBool,
}

impl Session {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            started: AtomicBool::new(false),
        }
    }

    /// Whether the backend has already been notified.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::Acquire)
    }

    /// Send the start notification unless it has already been sent.
    ///
    /// Returns `true` if the notification has been sent by this invocation.
    /// The flag is claimed before sending and released again if sending
    /// fails.
    pub async fn notify_started<B>(&self, backend: &B) -> autocull_client::Result<bool>
    where
        B: Backend,
    {
        if self
            .started
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            log::debug!("Start notification has already been sent");
            return Ok(false);
        }
        if let Err(err) = backend.on_start().await {
            self.started.store(false, Ordering::Release);
            return Err(err);
        }
        log::info!("Sent start notification");
        Ok(true)
    }
}
