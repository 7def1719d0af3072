use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::channel::{Channel, ALL_CHANNELS};
use super::merge::deep_merge_config;
use super::sensitivity::apply_sensitivity;
use super::thresholds::{channel_defaults, defaults_for, ChannelThresholds};

/// Weight a channel carries when the administrator never touched its slider.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Full FibboScore configuration for one project.
///
/// Example YAML:
/// ```yaml
/// channels:
///   instagram:
///     presenca: { followerGrowthMaxPct: 5, postsPerWeekMax: 7, ... }
///     ...
/// weights:
///   tiktok: 1.5
///   facebook: 0.5
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FibboScoreConfig {
    /// Thresholds per channel (possibly sensitivity-adjusted)
    #[serde(default)]
    pub channels: BTreeMap<Channel, ChannelThresholds>,

    /// Sparse relative weights; a missing entry reads as 1.0
    #[serde(default)]
    pub weights: BTreeMap<Channel, f64>,
}

impl Default for FibboScoreConfig {
    fn default() -> Self {
        Self {
            channels: channel_defaults(),
            weights: BTreeMap::new(),
        }
    }
}

impl FibboScoreConfig {
    pub fn weight_for(&self, channel: Channel) -> f64 {
        self.weights.get(&channel).copied().unwrap_or(DEFAULT_WEIGHT)
    }

    /// Thresholds in effect for `channel`, falling back to the catalog when
    /// a sparse document omits it.
    pub fn thresholds_for(&self, channel: Channel) -> ChannelThresholds {
        self.channels
            .get(&channel)
            .cloned()
            .unwrap_or_else(|| defaults_for(channel))
    }

    /// Channels the document does not carry thresholds for.
    pub fn missing_channels(&self) -> Vec<Channel> {
        ALL_CHANNELS
            .iter()
            .filter(|c| !self.channels.contains_key(*c))
            .copied()
            .collect()
    }

    /// Rebuild `channel` from its catalog defaults scaled by `multiplier`.
    pub fn with_sensitivity(&self, channel: Channel, multiplier: f64) -> Self {
        let mut next = self.clone();
        next.channels
            .insert(channel, apply_sensitivity(&defaults_for(channel), multiplier));
        next
    }

    /// Replace the weights of every channel from slider percentages (0-200).
    pub fn with_weights_percent(&self, raw: &BTreeMap<Channel, f64>) -> Self {
        let mut next = self.clone();
        next.weights = weights_from_percent(&ALL_CHANNELS, raw);
        next
    }

    /// Deep-merge a partial override document over this config.
    pub fn merged_with(&self, overrides: &serde_json::Value) -> Result<Self> {
        let base = serde_json::to_value(self).context("Failed to serialize config for merge")?;
        let merged = deep_merge_config(&base, overrides);
        serde_json::from_value(merged).context("Merged config is not a valid FibboScore config")
    }
}

/// Convert slider percentages into relative weights for `channels`.
/// A channel without a slider value gets full weight.
pub fn weights_from_percent(
    channels: &[Channel],
    raw: &BTreeMap<Channel, f64>,
) -> BTreeMap<Channel, f64> {
    channels
        .iter()
        .map(|c| {
            let weight = raw.get(c).map(|pct| pct / 100.0).unwrap_or(DEFAULT_WEIGHT);
            (*c, weight)
        })
        .collect()
}
