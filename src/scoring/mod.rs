pub mod channel;
pub mod classify;
pub mod config;
pub mod engine;
pub mod merge;
pub mod sensitivity;
pub mod thresholds;
pub mod validation;

pub use channel::{channel_icon, channel_label, Channel, ALL_CHANNELS};
pub use classify::{classify_score, classify_score_label, ScoreLabel};
pub use config::*;
pub use engine::{aggregate, AggregateResult, ChannelContribution, ChannelScore, DimensionScores};
pub use merge::deep_merge_config;
pub use sensitivity::{
    apply_sensitivity, sensitivity_level, SensitivityLevel, DEFAULT_SENSITIVITY, SENSITIVITY_LEVELS,
};
pub use thresholds::{channel_defaults, defaults_for, ChannelThresholds};
pub use validation::validate_config;
