use anyhow::{bail, Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::scoring::FibboScoreConfig;

pub const CONFIG_DOC_VERSION: u32 = 1;

/// Load/save boundary for per-project FibboScore configs.
pub trait ConfigRepository {
    fn load(&self, project_id: &str) -> Result<Option<FibboScoreConfig>>;
    fn save(&mut self, project_id: &str, config: &FibboScoreConfig) -> Result<()>;
}

/// Stored config, or the catalog defaults if the project has none yet.
pub fn load_or_default<R: ConfigRepository + ?Sized>(
    repo: &R,
    project_id: &str,
) -> Result<FibboScoreConfig> {
    Ok(repo.load(project_id)?.unwrap_or_default())
}

#[derive(Debug, Serialize, Deserialize)]
struct ConfigDocument {
    version: u32,
    config: FibboScoreConfig,
}

/// One JSON document per project under `dir`, written atomically.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    dir: PathBuf,
}

impl JsonFileRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn document_path(&self, project_id: &str) -> Result<PathBuf> {
        validate_project_id(project_id)?;
        Ok(self.dir.join(format!("{}.json", project_id)))
    }
}

fn validate_project_id(project_id: &str) -> Result<()> {
    let valid = !project_id.is_empty()
        && project_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        bail!(
            "Invalid project id '{}': use letters, digits, '-' or '_'",
            project_id
        );
    }
    Ok(())
}

impl ConfigRepository for JsonFileRepository {
    /// Returns `None` when the project has no document yet.
    /// A document with an unsupported version is an error.
    fn load(&self, project_id: &str) -> Result<Option<FibboScoreConfig>> {
        let path = self.document_path(project_id)?;
        if !path.exists() {
            debug!(project = project_id, path = %path.display(), "no stored config");
            return Ok(None);
        }

        let file = File::open(&path)
            .with_context(|| format!("Failed to open config document at {}", path.display()))?;
        let doc: ConfigDocument = serde_json::from_reader(file)
            .with_context(|| format!("Failed to parse config document at {}", path.display()))?;

        if doc.version != CONFIG_DOC_VERSION {
            bail!("Unsupported config document version: {}", doc.version);
        }

        debug!(project = project_id, path = %path.display(), "loaded config");
        Ok(Some(doc.config))
    }

    fn save(&mut self, project_id: &str, config: &FibboScoreConfig) -> Result<()> {
        let path = self.document_path(project_id)?;

        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).with_context(|| {
                format!("Failed to create store directory at {}", self.dir.display())
            })?;
        }

        let mut file = AtomicWriteFile::open(&path)
            .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

        let doc = ConfigDocument {
            version: CONFIG_DOC_VERSION,
            config: config.clone(),
        };
        serde_json::to_writer_pretty(&mut file, &doc).context("Failed to serialize config")?;
        file.commit().context("Failed to save config")?;

        debug!(project = project_id, path = %path.display(), "saved config");
        Ok(())
    }
}

/// Repository kept in memory; nothing touches disk.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRepository {
    configs: HashMap<String, FibboScoreConfig>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigRepository for InMemoryRepository {
    fn load(&self, project_id: &str) -> Result<Option<FibboScoreConfig>> {
        Ok(self.configs.get(project_id).cloned())
    }

    fn save(&mut self, project_id: &str, config: &FibboScoreConfig) -> Result<()> {
        self.configs.insert(project_id.to_string(), config.clone());
        Ok(())
    }
}
