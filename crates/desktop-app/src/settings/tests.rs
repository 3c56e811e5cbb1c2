// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use test_log::test;

use super::*;

type TestResult<T> = anyhow::Result<T>;

#[test]
fn load_defaults_if_missing() -> TestResult<()> {
    let config_dir = tempfile::tempdir()?;
    let settings = State::load(config_dir.path())?;
    assert_eq!(State::default(), settings);
    assert_eq!(DEFAULT_API_URL, settings.api_url()?.as_str());
    assert_eq!(DEFAULT_PLACEHOLDER_IMAGE, settings.placeholder_image());
    assert_eq!(ScanParams::default(), settings.scan_params());
    Ok(())
}

#[test]
fn save_and_load() -> TestResult<()> {
    let config_dir = tempfile::tempdir()?;
    let nested_dir = config_dir.path().join("nested");
    let settings = State {
        api_url: Some("http://localhost:9000/".parse()?),
        scan_threshold: 0.9,
        scan_max_results: 25,
        placeholder_image: Some("placeholder.png".into()),
    };
    settings.save(&nested_dir)?;
    assert_eq!(settings, State::load(&nested_dir)?);
    Ok(())
}

#[test]
fn restore_defaults_if_unreadable() -> TestResult<()> {
    let config_dir = tempfile::tempdir()?;
    fs::write(
        new_settings_file_path(config_dir.path().to_path_buf()),
        "not ron at all (",
    )?;
    assert!(State::load(config_dir.path()).is_err());
    assert_eq!(State::default(), State::restore(config_dir.path()));
    Ok(())
}

#[test]
fn missing_fields_keep_defaults() -> TestResult<()> {
    let settings: State = ron::from_str("(scan_max_results: 3)")?;
    assert_eq!(3, settings.scan_max_results);
    assert_eq!(ScanParams::default().threshold, settings.scan_threshold);
    Ok(())
}
