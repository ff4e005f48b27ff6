use chrono::{DateTime, FixedOffset};

use crate::config::Settings;
use crate::consts::{DATE_FORMAT, MARKETS, TIMESTAMP_FORMAT};
use crate::core::{HistoryStore, WallpaperRecord};
use crate::error::{AppError, FetchError, RenderError};
use crate::output::{Rendered, render, write_output};
use crate::source::{Downloader, WallpaperSource};

/// Full pipeline: fetch, download, persist, render.
///
/// Only a fetch failure is returned, and it happens before anything is
/// written. Later steps log their failures and the run carries on with
/// whatever state the earlier steps left behind.
pub(crate) fn run(
    settings: &Settings,
    source: &dyn WallpaperSource,
) -> Result<WallpaperRecord, FetchError> {
    let now = settings.timezone.now();

    tracing::info!(
        "Fetching {} wallpaper for market {}",
        source.name(),
        settings.market
    );
    let record = source.fetch(&settings.market, now)?;
    tracing::info!(
        "Fetched \"{}\" for {}",
        record.title,
        record.date.format(DATE_FORMAT)
    );

    let record = if settings.download {
        Downloader::new(settings).download(record)
    } else {
        tracing::info!("Download disabled, linking to {}", record.image_url);
        record
    };

    let store = HistoryStore::new(&settings.data_dir, settings.max_records);
    persist(&store, &record);
    publish(settings, &store, now);

    Ok(record)
}

fn persist(store: &HistoryStore, record: &WallpaperRecord) {
    match store.write_latest(record) {
        Ok(()) => tracing::debug!("Wrote {}", store.latest_path().display()),
        Err(e) => tracing::error!("{e}"),
    }
    match store.record(record.clone()) {
        Ok(history) => tracing::info!(
            "History saved: {} record(s) in {}",
            history.len(),
            store.history_path().display()
        ),
        Err(e) => tracing::error!("{e}"),
    }
}

/// Regenerate the page and API documents from the stored history.
/// Returns false if any enabled output failed.
pub(crate) fn publish(
    settings: &Settings,
    store: &HistoryStore,
    now: DateTime<FixedOffset>,
) -> bool {
    if !settings.generate_html && !settings.generate_api {
        tracing::debug!("HTML and API generation disabled");
        return true;
    }

    let history = match store.load() {
        Ok(history) => history,
        Err(e) => {
            tracing::error!("{}", RenderError::from(e));
            return false;
        }
    };

    let updated_at = now.format(TIMESTAMP_FORMAT).to_string();
    let rendered = match render(&history, &settings.page, &updated_at) {
        Ok(rendered) => rendered,
        Err(e) => {
            tracing::error!("{e}");
            return false;
        }
    };

    let mut ok = true;
    if settings.generate_html {
        let path = settings.index_path();
        match write_output(&path, &rendered.html) {
            Ok(()) => tracing::info!("Gallery written to {}", path.display()),
            Err(e) => {
                tracing::error!("{e}");
                ok = false;
            }
        }
    }
    if settings.generate_api {
        match write_api(settings, &rendered) {
            Ok(()) => tracing::info!("API written to {}", settings.api_path().display()),
            Err(e) => {
                tracing::error!("{e}");
                ok = false;
            }
        }
    }
    ok
}

fn write_api(settings: &Settings, rendered: &Rendered) -> Result<(), RenderError> {
    let dir = settings.api_path();
    write_output(&dir.join("latest.json"), &rendered.latest_api)?;
    write_output(&dir.join("all.json"), &rendered.all_api)
}

/// `render` command: rebuild the site without touching the network
pub(crate) fn handle_render(settings: &Settings) -> bool {
    let store = HistoryStore::new(&settings.data_dir, settings.max_records);
    publish(settings, &store, settings.timezone.now())
}

/// `probe` command: fetch and print the normalized record
pub(crate) fn handle_probe(
    settings: &Settings,
    source: &dyn WallpaperSource,
) -> Result<(), AppError> {
    let record = source.fetch(&settings.market, settings.timezone.now())?;
    let json = serde_json::to_string_pretty(&record).map_err(RenderError::Serialize)?;
    println!("{json}");
    Ok(())
}

pub(crate) fn handle_markets() {
    for (code, name) in MARKETS {
        println!("{code:<8}{name}");
    }
}
