//! CLI argument definitions
//!
//! Global CLI options and their mapping onto config overrides.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Overrides;

use super::commands::Commands;

#[derive(Parser)]
#[command(name = "bingwall")]
#[command(about = "Collect the Bing image of the day into a static gallery", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Config file (default: ./bingwall.toml, then ~/.config/bingwall/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,

    /// Market code selecting the regional image (e.g., "en-US", "zh-CN")
    #[arg(short, long, global = true)]
    pub(crate) market: Option<String>,

    /// Directory for history.json and latest.json
    #[arg(long, global = true, value_name = "DIR")]
    pub(crate) data_dir: Option<PathBuf>,

    /// Directory for the generated site
    #[arg(long, global = true, value_name = "DIR")]
    pub(crate) public_dir: Option<PathBuf>,

    /// Number of days kept in the history
    #[arg(long, global = true, value_name = "N")]
    pub(crate) max_records: Option<usize>,

    /// Image resolution (400x240, 800x480, 1366x768, 1920x1080)
    #[arg(long, global = true)]
    pub(crate) resolution: Option<String>,

    /// Timezone deciding the record date (e.g., "Asia/Shanghai", "UTC", "local")
    #[arg(long, global = true, value_name = "TZ")]
    pub(crate) timezone: Option<String>,

    /// Image-of-the-day endpoint
    #[arg(long, global = true, value_name = "URL")]
    pub(crate) provider_url: Option<String>,

    /// Host prepended to the provider's image paths
    #[arg(long, global = true, value_name = "URL")]
    pub(crate) image_host: Option<String>,

    /// Skip downloading the image; pages link to the remote copy
    #[arg(long, global = true)]
    pub(crate) no_download: bool,

    /// Enable debug output
    #[arg(long, global = true)]
    pub(crate) debug: bool,

    /// Only print warnings and errors
    #[arg(short, long, global = true, conflicts_with = "debug")]
    pub(crate) quiet: bool,
}

impl Cli {
    pub(crate) fn command(&self) -> Commands {
        self.command.unwrap_or_default()
    }

    /// Values given on the command line; these win over the config file
    pub(crate) fn overrides(&self) -> Overrides {
        Overrides {
            market: self.market.clone(),
            data_dir: self.data_dir.clone(),
            public_dir: self.public_dir.clone(),
            max_records: self.max_records,
            resolution: self.resolution.clone(),
            timezone: self.timezone.clone(),
            provider_url: self.provider_url.clone(),
            image_host: self.image_host.clone(),
            no_download: self.no_download,
        }
    }

    /// Directive for the tracing subscriber; `None` defers to `BINGWALL_LOG`
    pub(crate) fn log_directive(&self) -> Option<&'static str> {
        if self.debug {
            Some("info,bingwall=debug")
        } else if self.quiet {
            Some("warn")
        } else {
            None
        }
    }
}
