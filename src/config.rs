use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".student-registry";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "alunos.db";
/// Log file written next to the database while the TUI owns the terminal.
const LOG_FILE_NAME: &str = "registry.log";

/// Filesystem locations used by a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub database_path: PathBuf,
    pub log_path: PathBuf,
}

impl Settings {
    /// Resolve the default layout inside the user's home directory.
    pub fn resolve() -> Result<Self> {
        let base_dirs =
            BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
        Ok(Self::in_dir(base_dirs.home_dir().join(DATA_DIR_NAME)))
    }

    /// Same file names, rooted at an arbitrary directory.
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            database_path: data_dir.join(DB_FILE_NAME),
            log_path: data_dir.join(LOG_FILE_NAME),
            data_dir,
        }
    }

    /// Create the data directory if it is missing.
    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir).with_context(|| {
            format!("failed to create data directory {}", self.data_dir.display())
        })
    }

    pub fn database_path(&self) -> &Path {
        &self.database_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn in_dir_uses_fixed_file_names() {
        let settings = Settings::in_dir("/tmp/registry");
        assert_eq!(
            settings.database_path,
            PathBuf::from("/tmp/registry/alunos.db")
        );
        assert_eq!(settings.log_path, PathBuf::from("/tmp/registry/registry.log"));
    }

    #[test]
    fn ensure_dirs_creates_nested_directory() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::in_dir(temp_dir.path().join("a").join("b"));

        settings.ensure_dirs().unwrap();
        settings.ensure_dirs().unwrap();
        assert!(settings.data_dir.is_dir());
    }
}
