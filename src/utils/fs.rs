use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Sibling path used while a file is being written: `history.json` -> `history.json.tmp`
pub(crate) fn temp_path(target: &Path, suffix: &str) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!("{name}.{suffix}"))
}

/// Write `contents` to `target` via a temp file and rename, creating parent
/// directories first. Readers see either the old file or the new one.
pub(crate) fn write_atomic(target: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = target.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let tmp = temp_path(target, "tmp");
    fs::write(&tmp, contents)?;
    if let Err(e) = fs::rename(&tmp, target) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(())
}
