//! Filesystem helpers for chatdock: data directory layout, logo loading and
//! embed snippet export.

use std::path::{Path, PathBuf};

use chatdock_types::company::LogoUpload;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "CHATDOCK_DATA_DIR";

/// Resolve the chatdock data directory.
///
/// `CHATDOCK_DATA_DIR` wins; otherwise `~/.chatdock`, falling back to a
/// relative `.chatdock` when no home directory is known.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".chatdock");
    }

    PathBuf::from(".chatdock")
}

/// Read a logo image from disk for the company upsert.
pub async fn read_logo(path: &Path) -> Result<LogoUpload, std::io::Error> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "logo".to_string());
    Ok(LogoUpload::new(file_name, bytes))
}

/// Write an embed snippet to `path`, creating parent directories.
pub async fn write_snippet(path: &Path, snippet: &str) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tokio::fs::write(path, format!("{snippet}\n")).await
}
