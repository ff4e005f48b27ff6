//! CLI subcommand definitions

use clap::Subcommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Subcommand)]
pub(crate) enum Commands {
    /// Fetch today's wallpaper, update the history and regenerate the site (default)
    #[default]
    Run,
    /// Regenerate index.html and the API files from the stored history
    Render,
    /// Fetch today's wallpaper and print it as JSON without writing anything
    Probe,
    /// List known market codes
    Markets,
}

impl Commands {
    /// Whether the command needs resolved settings (config file, validation)
    pub(crate) fn needs_settings(self) -> bool {
        !matches!(self, Commands::Markets)
    }
}
