use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::consts::{
    DEFAULT_DOWNLOAD_TIMEOUT_MS, DEFAULT_IMAGE_HOST, DEFAULT_MARKET, DEFAULT_MAX_RECORDS,
    DEFAULT_PROVIDER_URL, DEFAULT_RESOLUTION, DEFAULT_USER_AGENT, SUPPORTED_RESOLUTIONS,
};
use crate::error::AppError;
use crate::utils::Timezone;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct BingConfig {
    #[serde(default)]
    pub(crate) url: Option<String>,
    #[serde(default)]
    pub(crate) image_host: Option<String>,
    #[serde(default)]
    pub(crate) market: Option<String>,
    #[serde(default)]
    pub(crate) user_agent: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct StorageConfig {
    #[serde(default)]
    pub(crate) data_dir: Option<PathBuf>,
    #[serde(default)]
    pub(crate) public_dir: Option<PathBuf>,
    #[serde(default)]
    pub(crate) wallpapers_dir: Option<String>,
    #[serde(default)]
    pub(crate) api_dir: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ImageConfig {
    #[serde(default)]
    pub(crate) resolution: Option<String>,
    #[serde(default)]
    pub(crate) download: Option<bool>,
    #[serde(default)]
    pub(crate) download_timeout_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct HistoryConfig {
    #[serde(default)]
    pub(crate) max_records: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ThemeConfig {
    #[serde(default)]
    pub(crate) primary: Option<String>,
    #[serde(default)]
    pub(crate) secondary: Option<String>,
    #[serde(default)]
    pub(crate) background: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct HtmlConfig {
    #[serde(default)]
    pub(crate) generate: Option<bool>,
    #[serde(default)]
    pub(crate) title: Option<String>,
    #[serde(default)]
    pub(crate) description: Option<String>,
    #[serde(default)]
    pub(crate) theme: ThemeConfig,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiConfig {
    #[serde(default)]
    pub(crate) generate: Option<bool>,
}

/// Contents of a `bingwall.toml` file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) timezone: Option<String>,
    #[serde(default)]
    pub(crate) bing: BingConfig,
    #[serde(default)]
    pub(crate) storage: StorageConfig,
    #[serde(default)]
    pub(crate) image: ImageConfig,
    #[serde(default)]
    pub(crate) history: HistoryConfig,
    #[serde(default)]
    pub(crate) html: HtmlConfig,
    #[serde(default)]
    pub(crate) api: ApiConfig,
}

impl Config {
    /// Load an explicitly requested file. Unlike the search below, failure here is fatal.
    pub(crate) fn load_from(path: &Path) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str::<Config>(&content).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// First parseable file from the default locations, or built-in defaults
    pub(crate) fn load() -> Self {
        for path in Self::get_config_paths() {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match toml::from_str::<Config>(&content) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse {}: {}", path.display(), e);
                    }
                }
            }
        }

        Self::default()
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("bingwall.toml")];

        // XDG config: ~/.config/bingwall/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("bingwall").join("config.toml"));
        }

        // Platform config dir, e.g. ~/Library/Application Support/bingwall/config.toml
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("bingwall").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".bingwall.toml"));
        }

        paths
    }
}

/// Colors injected into the generated stylesheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Theme {
    pub(crate) primary: String,
    pub(crate) secondary: String,
    pub(crate) background: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: "#2a9d8f".to_string(),
            secondary: "#88d8c0".to_string(),
            background: "linear-gradient(135deg, #f7fbf9 0%, #ffffff 100%)".to_string(),
        }
    }
}

/// Page-level strings and colors for the gallery
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PageOptions {
    pub(crate) title: String,
    pub(crate) description: String,
    /// Value of the `lang` attribute; the market code
    pub(crate) lang: String,
    pub(crate) theme: Theme,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            title: "Bing Daily Wallpaper".to_string(),
            description: "A fresh Bing wallpaper, collected every day".to_string(),
            lang: DEFAULT_MARKET.to_string(),
            theme: Theme::default(),
        }
    }
}

/// Resolved settings for one run. Built once at startup and passed down by reference.
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) provider_url: String,
    pub(crate) image_host: String,
    pub(crate) market: String,
    pub(crate) user_agent: String,
    pub(crate) timezone: Timezone,
    pub(crate) data_dir: PathBuf,
    pub(crate) public_dir: PathBuf,
    pub(crate) wallpapers_dir: String,
    pub(crate) api_dir: String,
    pub(crate) resolution: String,
    pub(crate) download: bool,
    pub(crate) download_timeout: Duration,
    pub(crate) max_records: usize,
    pub(crate) generate_html: bool,
    pub(crate) generate_api: bool,
    pub(crate) page: PageOptions,
}

/// Command-line values that take precedence over the config file
#[derive(Debug, Default)]
pub(crate) struct Overrides {
    pub(crate) market: Option<String>,
    pub(crate) data_dir: Option<PathBuf>,
    pub(crate) public_dir: Option<PathBuf>,
    pub(crate) max_records: Option<usize>,
    pub(crate) resolution: Option<String>,
    pub(crate) timezone: Option<String>,
    pub(crate) provider_url: Option<String>,
    pub(crate) image_host: Option<String>,
    pub(crate) no_download: bool,
}

impl Settings {
    /// Merge CLI overrides over file values over defaults, then validate
    pub(crate) fn resolve(config: Config, overrides: Overrides) -> Result<Self, AppError> {
        let Config {
            timezone,
            bing,
            storage,
            image,
            history,
            html,
            api,
        } = config;

        let resolution = overrides
            .resolution
            .or(image.resolution)
            .unwrap_or_else(|| DEFAULT_RESOLUTION.to_string());
        if !SUPPORTED_RESOLUTIONS.contains(&resolution.as_str()) {
            return Err(AppError::UnsupportedResolution {
                input: resolution,
                expected: SUPPORTED_RESOLUTIONS.join(", "),
            });
        }

        let max_records = overrides
            .max_records
            .or(history.max_records)
            .unwrap_or(DEFAULT_MAX_RECORDS);
        if max_records == 0 {
            return Err(AppError::ZeroMaxRecords);
        }

        let timezone = Timezone::parse(overrides.timezone.or(timezone).as_deref())?;
        let market = overrides
            .market
            .or(bing.market)
            .unwrap_or_else(|| DEFAULT_MARKET.to_string());

        let defaults = PageOptions::default();
        let page = PageOptions {
            title: html.title.unwrap_or(defaults.title),
            description: html.description.unwrap_or(defaults.description),
            lang: market.clone(),
            theme: Theme {
                primary: html.theme.primary.unwrap_or(defaults.theme.primary),
                secondary: html.theme.secondary.unwrap_or(defaults.theme.secondary),
                background: html.theme.background.unwrap_or(defaults.theme.background),
            },
        };

        Ok(Self {
            provider_url: overrides
                .provider_url
                .or(bing.url)
                .unwrap_or_else(|| DEFAULT_PROVIDER_URL.to_string()),
            image_host: overrides
                .image_host
                .or(bing.image_host)
                .unwrap_or_else(|| DEFAULT_IMAGE_HOST.to_string()),
            market,
            user_agent: bing
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            timezone,
            data_dir: overrides
                .data_dir
                .or(storage.data_dir)
                .unwrap_or_else(|| PathBuf::from("data")),
            public_dir: overrides
                .public_dir
                .or(storage.public_dir)
                .unwrap_or_else(|| PathBuf::from("public")),
            wallpapers_dir: trim_dir(storage.wallpapers_dir, "wallpapers"),
            api_dir: trim_dir(storage.api_dir, "api"),
            resolution,
            download: !overrides.no_download && image.download.unwrap_or(true),
            download_timeout: Duration::from_millis(
                image
                    .download_timeout_ms
                    .unwrap_or(DEFAULT_DOWNLOAD_TIMEOUT_MS),
            ),
            max_records,
            generate_html: html.generate.unwrap_or(true),
            generate_api: api.generate.unwrap_or(true),
            page,
        })
    }

    pub(crate) fn wallpapers_path(&self) -> PathBuf {
        self.public_dir.join(&self.wallpapers_dir)
    }

    pub(crate) fn api_path(&self) -> PathBuf {
        self.public_dir.join(&self.api_dir)
    }

    pub(crate) fn index_path(&self) -> PathBuf {
        self.public_dir.join("index.html")
    }
}

/// Subdirectory names are joined under the public dir and into URLs, so strip slashes
fn trim_dir(value: Option<String>, default: &str) -> String {
    let trimmed = value
        .as_deref()
        .map(|v| v.trim().trim_matches('/'))
        .unwrap_or_default();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}
