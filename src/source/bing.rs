//! Bing image-of-the-day provider
//!
//! Queries `HPImageArchive.aspx` for the most recent image and normalizes it
//! into a [`WallpaperRecord`].

use std::time::Duration;

use chrono::{DateTime, FixedOffset};
use rand::Rng;
use serde::Deserialize;

use crate::config::Settings;
use crate::consts::{DATE_FORMAT, ID_DATE_FORMAT, TIMESTAMP_FORMAT};
use crate::core::WallpaperRecord;
use crate::error::FetchError;

use super::WallpaperSource;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
const ID_SUFFIX_LEN: usize = 9;
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// One entry of the provider's `images` array
#[derive(Debug, Deserialize)]
struct BingImage {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    copyright: Option<String>,
    #[serde(default)]
    copyrightlink: Option<String>,
    urlbase: String,
    #[serde(default)]
    mkt: Option<String>,
    #[serde(default)]
    startdate: String,
    #[serde(default)]
    enddate: String,
    #[serde(default)]
    fullstartdate: String,
    #[serde(default)]
    hsh: String,
}

#[derive(Debug, Deserialize)]
struct BingResponse {
    #[serde(default)]
    images: Vec<BingImage>,
}

pub(crate) struct BingSource {
    url: String,
    image_host: String,
    resolution: String,
    user_agent: String,
}

impl BingSource {
    pub(crate) fn new(settings: &Settings) -> Self {
        Self {
            url: settings.provider_url.clone(),
            image_host: settings.image_host.clone(),
            resolution: settings.resolution.clone(),
            user_agent: settings.user_agent.clone(),
        }
    }

    fn request(&self, market: &str) -> Result<BingResponse, FetchError> {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(FETCH_TIMEOUT))
            .build()
            .into();

        let response = agent
            .get(&self.url)
            .query("format", "js")
            .query("idx", "0")
            .query("n", "1")
            .query("mkt", market)
            .header("User-Agent", self.user_agent.as_str())
            .call()
            .map_err(|e| FetchError::Http {
                url: self.url.clone(),
                source: Box::new(e),
            })?;

        let mut body = response.into_body();
        serde_json::from_reader(body.as_reader()).map_err(|source| FetchError::Decode {
            url: self.url.clone(),
            source,
        })
    }

    fn to_record(
        &self,
        response: BingResponse,
        market: &str,
        now: DateTime<FixedOffset>,
    ) -> Result<WallpaperRecord, FetchError> {
        let image = response
            .images
            .into_iter()
            .next()
            .ok_or(FetchError::NoImages)?;

        let date = now.date_naive();
        Ok(WallpaperRecord {
            id: generate_id(now),
            date,
            timestamp: now.format(TIMESTAMP_FORMAT).to_string(),
            title: image.title,
            description: image.description.unwrap_or_default(),
            copyright: image.copyright.unwrap_or_default(),
            copyright_link: image.copyrightlink.unwrap_or_default(),
            image_url: WallpaperRecord::image_url_for(
                &self.image_host,
                &image.urlbase,
                &self.resolution,
            ),
            image_url_base: image.urlbase,
            market: image
                .mkt
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| market.to_string()),
            start_date: image.startdate,
            end_date: image.enddate,
            full_start_date: image.fullstartdate,
            hash: image.hsh,
            local_path: None,
        })
    }
}

impl WallpaperSource for BingSource {
    fn name(&self) -> &'static str {
        "bing"
    }

    fn fetch(
        &self,
        market: &str,
        now: DateTime<FixedOffset>,
    ) -> Result<WallpaperRecord, FetchError> {
        tracing::debug!(url = %self.url, market, "Requesting image of the day");
        let response = self.request(market)?;
        let record = self.to_record(response, market, now)?;
        tracing::debug!(
            date = %record.date.format(DATE_FORMAT),
            url = %record.image_url,
            "Normalized provider response"
        );
        Ok(record)
    }
}

/// `YYYYMMDD_` followed by a random base-36 suffix. Unique in practice, not guaranteed.
fn generate_id(now: DateTime<FixedOffset>) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect();
    format!("{}_{}", now.format(ID_DATE_FORMAT), suffix)
}
