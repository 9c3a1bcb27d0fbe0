use crate::data::app_settings::CONFIG_FILENAME;
use crate::data::AppSettings;
use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use tracing::info;

pub fn run(dir: &Path, force: bool) -> Result<()> {
    let path = run_in_dir(dir, force)?;
    println!("Wrote default settings to {}", path.display());
    Ok(())
}

/// Writes a default config.yaml into `dir`. Refuses to overwrite an existing
/// file unless `force` is set.
pub(crate) fn run_in_dir(dir: &Path, force: bool) -> Result<PathBuf> {
    let path = dir.join(CONFIG_FILENAME);
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    let path = AppSettings::default().save_to(dir)?;
    info!(path = %path.display(), "wrote default settings");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_run_in_dir_writes_default_settings() {
        let tmp = TempDir::new().unwrap();
        let path = run_in_dir(tmp.path(), false).unwrap();
        assert!(path.exists());
        let loaded = AppSettings::load_from(tmp.path()).unwrap();
        assert_eq!(loaded, AppSettings::default());
    }

    #[test]
    fn test_run_in_dir_creates_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("config");
        run_in_dir(&dir, false).unwrap();
        assert!(dir.join(CONFIG_FILENAME).exists());
    }

    #[test]
    fn test_run_in_dir_refuses_to_overwrite() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILENAME), "settings:\n  show_help: false\n").unwrap();
        let err = run_in_dir(tmp.path(), false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        let loaded = AppSettings::load_from(tmp.path()).unwrap();
        assert!(!loaded.show_help);
    }

    #[test]
    fn test_run_in_dir_force_overwrites() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILENAME), "settings:\n  show_help: false\n").unwrap();
        run_in_dir(tmp.path(), true).unwrap();
        let loaded = AppSettings::load_from(tmp.path()).unwrap();
        assert!(loaded.show_help);
    }
}
