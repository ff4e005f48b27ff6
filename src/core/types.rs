//! Wallpaper record: one normalized entry per calendar day

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day's wallpaper metadata.
///
/// Serialized with camelCase keys. The provider-style aliases let histories
/// written with raw provider field names keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WallpaperRecord {
    pub(crate) id: String,
    /// Upsert key; unique within a history
    pub(crate) date: NaiveDate,
    #[serde(default)]
    pub(crate) timestamp: String,
    #[serde(default)]
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) description: String,
    #[serde(default)]
    pub(crate) copyright: String,
    #[serde(default, alias = "copyrightlink")]
    pub(crate) copyright_link: String,
    #[serde(default, alias = "urlbase")]
    pub(crate) image_url_base: String,
    #[serde(default)]
    pub(crate) image_url: String,
    #[serde(default, alias = "mkt")]
    pub(crate) market: String,
    #[serde(default, alias = "startdate")]
    pub(crate) start_date: String,
    #[serde(default, alias = "enddate")]
    pub(crate) end_date: String,
    #[serde(default, alias = "fullstartdate")]
    pub(crate) full_start_date: String,
    #[serde(default, alias = "hsh")]
    pub(crate) hash: String,
    /// Public-relative path of the downloaded copy; `None` until a download succeeds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) local_path: Option<String>,
}

impl WallpaperRecord {
    /// Image URL for `urlbase` at the given resolution: `<host><urlbase>_<resolution>.jpg`
    pub(crate) fn image_url_for(host: &str, url_base: &str, resolution: &str) -> String {
        format!("{}{}_{}.jpg", host.trim_end_matches('/'), url_base, resolution)
    }

    /// Source for `<img>`: the local copy when present, the remote image otherwise
    pub(crate) fn display_src(&self) -> Option<&str> {
        self.local_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .or_else(|| Some(self.image_url.as_str()).filter(|u| !u.is_empty()))
    }

    /// Target of the download link: the full-size remote image, else the local copy
    pub(crate) fn download_href(&self) -> Option<&str> {
        Some(self.image_url.as_str())
            .filter(|u| !u.is_empty())
            .or_else(|| self.local_path.as_deref().filter(|p| !p.is_empty()))
    }
}

#[cfg(test)]
pub(crate) fn sample_record(date: &str, title: &str) -> WallpaperRecord {
    let date = NaiveDate::parse_from_str(date, crate::consts::DATE_FORMAT).unwrap();
    let url_base = format!("/th?id=OHR.{}", title.replace(' ', ""));
    WallpaperRecord {
        id: format!("{}_abc123xyz", date.format(crate::consts::ID_DATE_FORMAT)),
        date,
        timestamp: format!("{} 08:00:00", date.format(crate::consts::DATE_FORMAT)),
        title: title.to_string(),
        description: format!("About {title}"),
        copyright: format!("{title} (c) Someone"),
        copyright_link: "https://www.bing.com/search?q=wallpaper".to_string(),
        image_url: WallpaperRecord::image_url_for("https://www.bing.com", &url_base, "1920x1080"),
        image_url_base: url_base,
        market: "en-US".to_string(),
        start_date: date.format("%Y%m%d").to_string(),
        end_date: date.succ_opt().unwrap().format("%Y%m%d").to_string(),
        full_start_date: format!("{}1600", date.format("%Y%m%d")),
        hash: "0123456789abcdef".to_string(),
        local_path: None,
    }
}
