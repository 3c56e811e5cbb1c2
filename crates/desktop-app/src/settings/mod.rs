// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use url::Url;

use autocull_core::{
    ScanParams,
    duplicate::{DEFAULT_SCAN_MAX_RESULTS, DEFAULT_SCAN_THRESHOLD},
};

pub const FILE_NAME: &str = "autocull_settings";

pub const FILE_SUFFIX: &str = "ron";

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api/";

pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "images/Icons/General Icons/photo.png";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct State {
    /// Base URL of the backend web API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<Url>,

    /// Minimum similarity of reported duplicates.
    pub scan_threshold: f64,

    /// Maximum number of reported duplicates per result list.
    pub scan_max_results: usize,

    /// Displayed until a thumbnail has been resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder_image: Option<String>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            api_url: None,
            scan_threshold: DEFAULT_SCAN_THRESHOLD,
            scan_max_results: DEFAULT_SCAN_MAX_RESULTS,
            placeholder_image: None,
        }
    }
}

impl State {
    /// Restore the saved settings, falling back to the defaults.
    #[must_use]
    pub fn restore(config_dir: &Path) -> Self {
        log::info!("Loading saved settings from: {}", config_dir.display());
        Self::load(config_dir)
            .map_err(|err| {
                log::warn!("Failed to load saved settings: {err}");
            })
            .unwrap_or_default()
    }

    pub fn load(config_dir: &Path) -> anyhow::Result<Self> {
        let file_path = new_settings_file_path(config_dir.to_path_buf());
        log::info!("Loading settings from file: {}", file_path.display());
        match fs::read_to_string(&file_path) {
            Ok(text) => ron::from_str(&text).map_err(Into::into),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Default::default()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn save(&self, config_dir: &Path) -> anyhow::Result<()> {
        let file_path = new_settings_file_path(config_dir.to_path_buf());
        log::info!("Saving current settings into file: {}", file_path.display());
        let text = ron::ser::to_string_pretty(self, Default::default())?;
        if let Some(parent_path) = file_path.parent() {
            fs::create_dir_all(parent_path)?;
        }
        fs::write(&file_path, text)?;
        Ok(())
    }

    pub async fn save_spawn_blocking(self, config_dir: PathBuf) -> anyhow::Result<()> {
        match tokio::runtime::Handle::current()
            .spawn_blocking(move || self.save(&config_dir))
            .await
        {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => {
                anyhow::bail!("failed to save: {err}");
            }
            Err(err) => {
                anyhow::bail!("failed to join blocking task after saving: {err}");
            }
        }
    }

    /// The configured or the default backend URL.
    pub fn api_url(&self) -> anyhow::Result<Url> {
        if let Some(api_url) = &self.api_url {
            return Ok(api_url.clone());
        }
        DEFAULT_API_URL.parse().map_err(Into::into)
    }

    #[must_use]
    pub fn scan_params(&self) -> ScanParams {
        ScanParams {
            threshold: self.scan_threshold,
            max_results: self.scan_max_results,
        }
    }

    #[must_use]
    pub fn placeholder_image(&self) -> &str {
        self.placeholder_image
            .as_deref()
            .unwrap_or(DEFAULT_PLACEHOLDER_IMAGE)
    }
}

#[must_use]
fn new_settings_file_path(config_dir: PathBuf) -> PathBuf {
    let mut file_path = config_dir;
    file_path.push(FILE_NAME);
    file_path.set_extension(FILE_SUFFIX);
    file_path
}

#[cfg(test)]
mod tests;
