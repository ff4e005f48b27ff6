//! Wallpaper providers and image download
//!
//! A provider implements the WallpaperSource trait to turn "today" into a
//! normalized record; the downloader then fetches the referenced image.

pub(crate) mod bing;
pub(crate) mod download;

use chrono::{DateTime, FixedOffset};

use crate::core::WallpaperRecord;
use crate::error::FetchError;

/// Image-of-the-day provider
pub(crate) trait WallpaperSource {
    /// Short name for log output
    fn name(&self) -> &'static str;

    /// Fetch the current image for `market`, stamped with `now`
    fn fetch(&self, market: &str, now: DateTime<FixedOffset>)
    -> Result<WallpaperRecord, FetchError>;
}

pub(crate) use bing::BingSource;
pub(crate) use download::Downloader;
