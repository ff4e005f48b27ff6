/// Calendar date format used for record dates and file names: "2025-01-15"
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Capture time format stored in `WallpaperRecord::timestamp`
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date prefix of generated record ids: "20250115"
pub(crate) const ID_DATE_FORMAT: &str = "%Y%m%d";

pub(crate) const DEFAULT_PROVIDER_URL: &str = "https://www4.bing.com/HPImageArchive.aspx";
pub(crate) const DEFAULT_IMAGE_HOST: &str = "https://www.bing.com";
pub(crate) const DEFAULT_MARKET: &str = "zh-CN";
pub(crate) const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/95.0.4638.69 Safari/537.36 Edg/95.0.1020.44";

pub(crate) const DEFAULT_RESOLUTION: &str = "1920x1080";
pub(crate) const SUPPORTED_RESOLUTIONS: &[&str] = &["400x240", "800x480", "1366x768", "1920x1080"];

pub(crate) const DEFAULT_MAX_RECORDS: usize = 30;
pub(crate) const DEFAULT_DOWNLOAD_TIMEOUT_MS: u64 = 30_000;

/// Value of the `status` field in every API envelope
pub(crate) const API_STATUS_SUCCESS: &str = "success";

/// Markets the provider is known to serve, with display names
pub(crate) const MARKETS: &[(&str, &str)] = &[
    ("en-US", "English (United States)"),
    ("en-GB", "English (United Kingdom)"),
    ("zh-CN", "Chinese (Simplified)"),
    ("zh-TW", "Chinese (Traditional)"),
    ("ja-JP", "Japanese"),
    ("ko-KR", "Korean"),
    ("ru-RU", "Russian"),
    ("fr-FR", "French"),
    ("de-DE", "German"),
    ("es-ES", "Spanish"),
    ("it-IT", "Italian"),
    ("pt-BR", "Portuguese (Brazil)"),
    ("pt-PT", "Portuguese (Portugal)"),
    ("nl-NL", "Dutch"),
    ("sv-SE", "Swedish"),
    ("pl-PL", "Polish"),
    ("tr-TR", "Turkish"),
    ("ar-SA", "Arabic"),
];

pub(crate) fn is_known_market(code: &str) -> bool {
    MARKETS.iter().any(|(known, _)| known.eq_ignore_ascii_case(code))
}
