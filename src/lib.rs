// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! autocull - Photo collection gallery with duplicate detection
//!
//! Facade of all sub-crates that are enabled by features.

pub use autocull_core::*;

#[cfg(feature = "client")]
pub use autocull_client as client;

#[cfg(feature = "desktop-app")]
pub use autocull_desktop_app as desktop_app;
