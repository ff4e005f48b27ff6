//! Local copies of wallpaper images

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::Settings;
use crate::consts::DATE_FORMAT;
use crate::core::WallpaperRecord;
use crate::error::DownloadError;
use crate::utils::temp_path;

/// `<date>_<title with every non-alphanumeric char replaced by '_'>.jpg`
pub(crate) fn wallpaper_filename(record: &WallpaperRecord) -> String {
    let title: String = record
        .title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{}_{}.jpg", record.date.format(DATE_FORMAT), title)
}

pub(crate) struct Downloader {
    dir: PathBuf,
    /// Directory name as seen from the site root, used for `localPath`
    public_dir_name: String,
    timeout: Duration,
    user_agent: String,
}

impl Downloader {
    pub(crate) fn new(settings: &Settings) -> Self {
        Self {
            dir: settings.wallpapers_path(),
            public_dir_name: settings.wallpapers_dir.clone(),
            timeout: settings.download_timeout,
            user_agent: settings.user_agent.clone(),
        }
    }

    /// Save the record's image locally and set `local_path`.
    ///
    /// Never fails: on error the record comes back unchanged, so pages keep
    /// pointing at the remote image.
    pub(crate) fn download(&self, mut record: WallpaperRecord) -> WallpaperRecord {
        match self.try_download(&record) {
            Ok(path) => {
                tracing::info!("Wallpaper saved to {}", path.display());
                record.local_path = Some(format!(
                    "/{}/{}",
                    self.public_dir_name,
                    wallpaper_filename(&record)
                ));
            }
            Err(e) => tracing::warn!("{e}"),
        }
        record
    }

    fn try_download(&self, record: &WallpaperRecord) -> Result<PathBuf, DownloadError> {
        if record.image_url.is_empty() {
            return Err(DownloadError::MissingUrl);
        }

        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(self.timeout))
            .build()
            .into();
        let response = agent
            .get(&record.image_url)
            .header("User-Agent", self.user_agent.as_str())
            .call()
            .map_err(|e| DownloadError::Http {
                url: record.image_url.clone(),
                source: Box::new(e),
            })?;

        fs::create_dir_all(&self.dir).map_err(|source| DownloadError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let target = self.dir.join(wallpaper_filename(record));
        let part = temp_path(&target, "part");
        let mut body = response.into_body();
        let written = stream_to(&part, &mut body.as_reader()).and_then(|bytes| {
            fs::rename(&part, &target)?;
            Ok(bytes)
        });

        match written {
            Ok(bytes) => {
                tracing::debug!(bytes, "Image stream complete");
                Ok(target)
            }
            Err(source) => {
                let _ = fs::remove_file(&part);
                Err(DownloadError::Io {
                    path: target,
                    source,
                })
            }
        }
    }
}

fn stream_to(path: &Path, reader: &mut impl io::Read) -> io::Result<u64> {
    let mut file = File::create(path)?;
    let bytes = io::copy(reader, &mut file)?;
    file.flush()?;
    Ok(bytes)
}
