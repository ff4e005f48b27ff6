//! Presentation: static gallery page and JSON API documents

mod api;
mod html;

use std::path::Path;

use crate::config::PageOptions;
use crate::core::WallpaperRecord;
use crate::error::RenderError;
use crate::utils::write_atomic;

use api::{render_all_api, render_latest_api};
use html::render_html;

/// Everything generated from one history snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Rendered {
    pub(crate) html: String,
    pub(crate) latest_api: String,
    pub(crate) all_api: String,
}

/// Render the page and both API documents from `history`
pub(crate) fn render(
    history: &[WallpaperRecord],
    page: &PageOptions,
    updated_at: &str,
) -> Result<Rendered, RenderError> {
    Ok(Rendered {
        html: render_html(history, page, updated_at),
        latest_api: render_latest_api(history)?,
        all_api: render_all_api(history)?,
    })
}

pub(crate) fn write_output(path: &Path, contents: &str) -> Result<(), RenderError> {
    write_atomic(path, contents.as_bytes()).map_err(|source| RenderError::Write {
        path: path.to_path_buf(),
        source,
    })
}
