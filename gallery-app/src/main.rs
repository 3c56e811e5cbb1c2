// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::path::{Path, PathBuf};

use anyhow::{Context as _, bail};
use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use discro::Subscriber;
use log::LevelFilter;
use url::Url;

use autocull::{
    CameraRecord, NewCollection,
    client::webapi::WebApiBackend,
    desktop_app::{
        Handle,
        bootstrap::{CameraPage, Dashboard},
        gallery::{Gallery, RenderedCard},
        notification::Severity,
        settings,
    },
};

/// Default log level for debug builds.
#[cfg(debug_assertions)]
const DEFAULT_LOG_FILTER_LEVEL: LevelFilter = LevelFilter::Info;

/// Reduce log verbosity for release builds.
#[cfg(not(debug_assertions))]
const DEFAULT_LOG_FILTER_LEVEL: LevelFilter = LevelFilter::Warn;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Base URL of the backend web API.
    #[arg(long)]
    api_url: Option<Url>,

    /// Directory of the settings file.
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// Persist the settings after applying the command line overrides.
    #[arg(long)]
    save_settings: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render the grid of all collections.
    Collections,

    /// Render the grid of all cameras.
    Cameras,

    /// Scan the photos of all collections for duplicates.
    Duplicates {
        #[arg(long)]
        threshold: Option<f64>,

        #[arg(long)]
        max_results: Option<usize>,
    },

    /// Create a new collection from a directory.
    CreateCollection {
        name: String,

        source_path: String,

        #[arg(long, default_value = "")]
        description: String,
    },

    /// Register a new camera.
    CreateCamera {
        name: String,

        #[arg(long, default_value = "")]
        make: String,

        #[arg(long, default_value = "")]
        model: String,

        #[arg(long, default_value = "")]
        lens_make: String,

        #[arg(long, default_value = "")]
        lens_model: String,

        #[arg(long, default_value = "")]
        aperture: String,

        #[arg(long, default_value = "")]
        shutter_speed: String,

        #[arg(long, default_value = "")]
        iso: String,

        #[arg(long)]
        photo: Option<String>,
    },
}

#[must_use]
const fn app_name() -> &'static str {
    env!("CARGO_PKG_NAME")
}

fn default_config_dir() -> anyhow::Result<PathBuf> {
    let Some(app_dirs) = ProjectDirs::from("", "", app_name()) else {
        bail!("default config directory is unavailable");
    };
    Ok(app_dirs.config_dir().to_path_buf())
}

fn init_config_dir(config_dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(config_dir).with_context(|| {
        format!(
            "failed to create config directory '{dir}'",
            dir = config_dir.display()
        )
    })?;
    let readonly = config_dir
        .metadata()
        .map(|metadata| metadata.permissions().readonly())
        .context("metadata")?;
    if readonly {
        log::warn!(
            "Config directory (read-only): {dir_path}",
            dir_path = config_dir.display()
        );
    } else {
        log::info!(
            "Config directory: {dir_path}",
            dir_path = config_dir.display()
        );
    }
    Ok(())
}

#[derive(Debug, Default)]
struct CardPrinter {
    printed: usize,
}

impl CardPrinter {
    fn print_new(&mut self, cards: &[RenderedCard], placeholder_image: &str) {
        for card in cards.iter().skip(self.printed) {
            let thumbnail = card.thumbnail();
            let thumbnail = if thumbnail.is_resolved() {
                format!("thumbnail ({len} bytes)", len = thumbnail.src("").len())
            } else {
                placeholder_image.to_owned()
            };
            self.printed += 1;
            println!(
                "{index:>4}. {title} | {subtitle} | {thumbnail}",
                index = self.printed,
                title = card.title,
                subtitle = card.subtitle,
            );
        }
    }
}

/// Print each card as soon as it has been appended to the grid.
async fn watch_grid(
    mut subscriber: Subscriber<Vec<RenderedCard>>,
    printer: &mut CardPrinter,
    placeholder_image: &str,
) {
    loop {
        printer.print_new(&subscriber.read_ack(), placeholder_image);
        if subscriber.changed().await.is_err() {
            break;
        }
    }
}

async fn render_while_printing<F>(gallery: &Gallery, load: F, placeholder_image: &str)
where
    F: Future,
{
    let mut printer = CardPrinter::default();
    tokio::select! {
        biased;
        _ = load => (),
        () = watch_grid(gallery.grid().subscribe_changed(), &mut printer, placeholder_image) => (),
    }
    // Cards that have been appended after the last change notification.
    printer.print_new(&gallery.grid().read(), placeholder_image);
}

async fn run(args: Args) -> anyhow::Result<()> {
    let Args {
        api_url,
        config_dir,
        save_settings,
        command,
    } = args;
    let config_dir = match config_dir {
        Some(config_dir) => config_dir,
        None => default_config_dir()?,
    };
    init_config_dir(&config_dir)?;
    let mut settings = settings::State::restore(&config_dir);
    if api_url.is_some() {
        settings.api_url = api_url;
    }
    if let Command::Duplicates {
        threshold,
        max_results,
    } = &command
    {
        settings.scan_threshold = threshold.unwrap_or(settings.scan_threshold);
        settings.scan_max_results = max_results.unwrap_or(settings.scan_max_results);
    }
    if save_settings {
        settings.clone().save_spawn_blocking(config_dir).await?;
    }
    let api_url = settings.api_url()?;
    log::info!("Connecting to backend: {api_url}");
    let handle = Handle::commission(WebApiBackend::new(api_url), &settings);

    match command {
        Command::Collections => {
            let dashboard = Dashboard::new(handle.clone());
            render_while_printing(
                dashboard.gallery(),
                dashboard.load(),
                handle.placeholder_image(),
            )
            .await;
        }
        Command::Cameras => {
            let camera_page = CameraPage::new(handle.clone());
            render_while_printing(
                camera_page.gallery(),
                camera_page.load(),
                handle.placeholder_image(),
            )
            .await;
        }
        Command::Duplicates { .. } => {
            let dashboard = Dashboard::new(handle.clone());
            if let Ok(report) = dashboard.find_duplicates().await {
                println!("Scanned {count} photo(s)", count = report.scanned);
                for line in report.lines() {
                    println!("{line}");
                }
            }
        }
        Command::CreateCollection {
            name,
            source_path,
            description,
        } => {
            let dashboard = Dashboard::new(handle.clone());
            let new_collection = NewCollection {
                name,
                description,
                source_path,
            };
            if let Some(navigation) = dashboard.create_collection(&new_collection).await {
                log::info!("Navigating to {navigation:?}");
            }
        }
        Command::CreateCamera {
            name,
            make,
            model,
            lens_make,
            lens_model,
            aperture,
            shutter_speed,
            iso,
            photo,
        } => {
            let camera_page = CameraPage::new(handle.clone());
            let new_camera = CameraRecord {
                name,
                make,
                model,
                lens_make,
                lens_model,
                aperture,
                shutter_speed,
                iso,
                photo,
            };
            if let Some((navigation, _)) = camera_page.create_camera(&new_camera).await {
                log::info!("Navigating to {navigation:?}");
            }
        }
    }

    let notifications = handle.notifications().take_all();
    let failed = notifications
        .iter()
        .any(|notification| notification.severity == Severity::Error);
    for notification in notifications {
        eprintln!("{notification}");
    }
    if failed {
        bail!("command failed");
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::Builder::new()
        .filter_level(DEFAULT_LOG_FILTER_LEVEL)
        // Parse environment variables after configuring all default option(s).
        .parse_default_env()
        .init();

    if let Err(err) = run(Args::parse()).await {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}
