use anyhow::{bail, Result};
use tracing::debug;

use crate::scoring::{
    sensitivity_level, validate_config, Channel, FibboScoreConfig, DEFAULT_WEIGHT,
};
use crate::store::ConfigRepository;

/// Highest value the weight slider can take, in percent.
pub const MAX_WEIGHT_PERCENT: f64 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Idle,
    Editing,
    Previewing,
    Saved,
    Discarded,
}

/// In-memory edit session over a project's config.
///
/// Every edit rebuilds a pending config from the last saved one. Nothing is
/// written until `save`; `discard` drops the pending config. Last write wins.
#[derive(Debug, Clone)]
pub struct ConfigEditor {
    saved: FibboScoreConfig,
    pending: FibboScoreConfig,
    state: EditorState,
}

impl ConfigEditor {
    pub fn new(saved: FibboScoreConfig) -> Self {
        Self {
            pending: saved.clone(),
            saved,
            state: EditorState::Idle,
        }
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn saved(&self) -> &FibboScoreConfig {
        &self.saved
    }

    pub fn is_dirty(&self) -> bool {
        self.pending != self.saved
    }

    fn edit(&mut self, next: FibboScoreConfig) {
        self.pending = next;
        self.state = EditorState::Editing;
    }

    /// Move `channel` to one of the five catalog sensitivity levels.
    pub fn set_sensitivity(&mut self, channel: Channel, level: u8) -> Result<()> {
        let Some(level) = sensitivity_level(level) else {
            bail!("Sensitivity level must be between 1 and 5, got {}", level);
        };
        debug!(%channel, level = level.value, multiplier = level.multiplier, "set sensitivity");
        self.set_multiplier(channel, level.multiplier);
        Ok(())
    }

    /// Scale `channel` from its catalog defaults by an arbitrary multiplier.
    pub fn set_multiplier(&mut self, channel: Channel, multiplier: f64) {
        let next = self.pending.with_sensitivity(channel, multiplier);
        self.edit(next);
    }

    pub fn set_weight_percent(&mut self, channel: Channel, percent: f64) -> Result<()> {
        if !(0.0..=MAX_WEIGHT_PERCENT).contains(&percent) {
            bail!(
                "Weight for {} must be between 0 and {}%, got {}",
                channel,
                MAX_WEIGHT_PERCENT,
                percent
            );
        }
        debug!(%channel, percent, "set weight");
        let mut next = self.pending.clone();
        next.weights.insert(channel, percent / 100.0);
        self.edit(next);
        Ok(())
    }

    /// Drop any custom weight so `channel` reads as full weight again.
    pub fn reset_weight(&mut self, channel: Channel) {
        let mut next = self.pending.clone();
        next.weights.remove(&channel);
        self.edit(next);
        debug!(%channel, weight = DEFAULT_WEIGHT, "reset weight");
    }

    /// Layer a partial override document (e.g. a preset) over pending edits.
    pub fn apply_overrides(&mut self, overrides: &serde_json::Value) -> Result<()> {
        let next = self.pending.merged_with(overrides)?;
        self.edit(next);
        Ok(())
    }

    /// Return every channel to catalog defaults and full weight.
    pub fn reset_to_defaults(&mut self) {
        self.edit(FibboScoreConfig::default());
    }

    /// The config as it would be saved right now.
    pub fn preview(&mut self) -> &FibboScoreConfig {
        if self.state == EditorState::Editing {
            self.state = EditorState::Previewing;
        }
        &self.pending
    }

    /// Validate and persist pending edits, making them the new saved config.
    pub fn save<R: ConfigRepository + ?Sized>(
        &mut self,
        repo: &mut R,
        project_id: &str,
    ) -> Result<()> {
        if let Err(errors) = validate_config(&self.pending) {
            bail!("Config is invalid:\n  - {}", errors.join("\n  - "));
        }
        repo.save(project_id, &self.pending)?;
        self.saved = self.pending.clone();
        self.state = EditorState::Saved;
        debug!(project = project_id, "config saved");
        Ok(())
    }

    /// Throw away pending edits and return to the last saved config.
    pub fn discard(&mut self) {
        self.pending = self.saved.clone();
        self.state = EditorState::Discarded;
        debug!("pending edits discarded");
    }
}
