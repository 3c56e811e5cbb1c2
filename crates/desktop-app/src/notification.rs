// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt;

use discro::Subscriber;

use crate::{Observable, ObservableRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { severity, message } = self;
        match severity {
            Severity::Info => f.write_str(message),
            Severity::Error => write!(f, "Error: {message}"),
        }
    }
}

/// Messages that are pending for display to the user.
#[derive(Debug, Default)]
pub struct Notifications {
    pending: Observable<Vec<Notification>>,
}

impl Notifications {
    pub fn info(&self, message: impl Into<String>) {
        self.push(Severity::Info, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("Notifying user about error: {message}");
        self.push(Severity::Error, message);
    }

    fn push(&self, severity: Severity, message: String) {
        self.pending.modify(|pending| {
            pending.push(Notification { severity, message });
            true
        });
    }

    #[must_use]
    pub fn read(&self) -> ObservableRef<'_, Vec<Notification>> {
        self.pending.read()
    }

    #[must_use]
    pub fn subscribe_changed(&self) -> Subscriber<Vec<Notification>> {
        self.pending.subscribe_changed()
    }

    /// Remove all pending notifications after they have been displayed.
    pub fn take_all(&self) -> Vec<Notification> {
        let mut taken = Vec::new();
        self.pending.modify(|pending| {
            if pending.is_empty() {
                return false;
            }
            std::mem::swap(pending, &mut taken);
            true
        });
        taken
    }
}
