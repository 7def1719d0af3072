mod schema;

pub use schema::Settings;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Project id used when neither the settings file nor `--project` names one.
pub const DEFAULT_PROJECT: &str = "default";

/// Get the config directory path (~/.config/fibbo/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("fibbo"))
}

/// Get the default settings file path (~/.config/fibbo/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load settings from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to the settings file. If None, uses the default
///   path and falls back to empty settings when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicit path does not exist
/// - The file cannot be read
/// - The YAML cannot be parsed
pub fn load_settings(path: Option<PathBuf>) -> Result<Settings> {
    let explicit = path.is_some();
    let settings_path = match path {
        Some(p) => p,
        None => get_config_path()?,
    };

    if !settings_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", settings_path.display());
        }
        debug!(path = %settings_path.display(), "no settings file, using defaults");
        return Ok(Settings::default());
    }

    read_settings(&settings_path)
}

fn read_settings(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    let settings: Settings = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", path.display()))?;

    debug!(path = %path.display(), "loaded settings");
    Ok(settings)
}

impl Settings {
    /// `--project` beats the settings file, which beats `DEFAULT_PROJECT`.
    pub fn resolve_project(&self, cli_project: Option<&str>) -> String {
        cli_project
            .or(self.project.as_deref())
            .unwrap_or(DEFAULT_PROJECT)
            .to_string()
    }

    /// Store directory from settings, or ~/.config/fibbo/projects.
    pub fn resolve_store_dir(&self) -> Result<PathBuf> {
        match &self.store_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(get_config_dir()?.join("projects")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_explicit_missing_path_fails() {
        let temp_path = env::temp_dir().join("fibbo_test_settings_missing.yaml");
        let _ = fs::remove_file(&temp_path);
        let err = load_settings(Some(temp_path)).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_settings_file() {
        let temp_path = env::temp_dir().join("fibbo_test_settings.yaml");
        fs::write(&temp_path, "project: acme\n").unwrap();

        let settings = load_settings(Some(temp_path.clone())).unwrap();
        assert_eq!(settings.project.as_deref(), Some("acme"));

        let _ = fs::remove_file(&temp_path);
    }

    #[test]
    fn test_invalid_yaml_fails() {
        let temp_path = env::temp_dir().join("fibbo_test_settings_invalid.yaml");
        fs::write(&temp_path, "project: [unclosed\n").unwrap();

        let err = load_settings(Some(temp_path.clone())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));

        let _ = fs::remove_file(&temp_path);
    }

    #[test]
    fn test_resolve_project_precedence() {
        let settings = Settings {
            project: Some("from-file".to_string()),
            store_dir: None,
        };
        assert_eq!(settings.resolve_project(Some("from-cli")), "from-cli");
        assert_eq!(settings.resolve_project(None), "from-file");
        assert_eq!(Settings::default().resolve_project(None), DEFAULT_PROJECT);
    }

    #[test]
    fn test_resolve_store_dir_override() {
        let settings = Settings {
            project: None,
            store_dir: Some(PathBuf::from("/srv/fibbo")),
        };
        assert_eq!(settings.resolve_store_dir().unwrap(), PathBuf::from("/srv/fibbo"));
    }
}
