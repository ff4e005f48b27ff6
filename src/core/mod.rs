//! Core module - the wallpaper record and its history store

mod history;
mod types;

pub(crate) use history::HistoryStore;
#[cfg(test)]
pub(crate) use types::sample_record;
pub(crate) use types::WallpaperRecord;
