use anyhow::{Context, Result};
use std::path::PathBuf;

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) db_path: PathBuf,
}

impl Config {
    /// `db_override` comes from `--db` or `FINCHART_DB`; otherwise the
    /// platform data directory is used and created if missing.
    pub(crate) fn resolve(db_override: Option<PathBuf>) -> Result<Self> {
        let db_path = match db_override {
            Some(path) => path,
            None => default_db_path()?,
        };
        Ok(Self { db_path })
    }
}

fn default_db_path() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "finchart", "finchart")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join("finchart.db"))
}
