use tracing::warn;

use super::config::FibboScoreConfig;

/// Highest weight the slider allows (200%).
pub const MAX_WEIGHT: f64 = 2.0;

/// Validate a FibboScore config before it is saved or used.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &FibboScoreConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for (channel, thresholds) in &config.channels {
        for (path, value) in thresholds.numeric_leaves() {
            if !value.is_finite() {
                errors.push(format!("channels.{}.{}: must be a finite number", channel, path));
            } else if value < 0.0 {
                errors.push(format!("channels.{}.{}: must be non-negative", channel, path));
            }
        }

        let ratios = thresholds.content.consistency_ratio_thresholds;
        if ratios.windows(2).any(|w| w[0] > w[1]) {
            errors.push(format!(
                "channels.{}.conteudo.consistencyRatioThresholds: must be non-decreasing, got {:?}",
                channel, ratios
            ));
        }
    }

    for (channel, weight) in &config.weights {
        if !weight.is_finite() || *weight < 0.0 || *weight > MAX_WEIGHT {
            errors.push(format!(
                "weights.{}: must be between 0 and {}, got {}",
                channel, MAX_WEIGHT, weight
            ));
        }
    }

    let missing = config.missing_channels();
    if !missing.is_empty() {
        let keys: Vec<String> = missing.iter().map(|c| c.to_string()).collect();
        warn!(
            channels = %keys.join(", "),
            "config has no thresholds for some channels, using defaults"
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{defaults_for, Channel};
    use std::collections::BTreeMap;

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&FibboScoreConfig::default()).is_ok());
    }

    #[test]
    fn test_sparse_config_is_valid() {
        let config = FibboScoreConfig {
            channels: BTreeMap::new(),
            weights: BTreeMap::new(),
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_negative_threshold() {
        let mut config = FibboScoreConfig::default();
        let mut ig = defaults_for(Channel::Instagram);
        ig.presence.posts_per_week_max = -1.0;
        config.channels.insert(Channel::Instagram, ig);

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("channels.instagram.presenca.postsPerWeekMax"));
    }

    #[test]
    fn test_breakpoints_out_of_order() {
        let mut config = FibboScoreConfig::default();
        let mut yt = defaults_for(Channel::Youtube);
        yt.content.consistency_ratio_thresholds = [0.8, 0.6, 0.9];
        config.channels.insert(Channel::Youtube, yt);

        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("consistencyRatioThresholds"));
    }

    #[test]
    fn test_weight_out_of_range() {
        let mut config = FibboScoreConfig::default();
        config.weights.insert(Channel::Tiktok, 2.5);
        config.weights.insert(Channel::Twitter, -0.1);
        config.weights.insert(Channel::Facebook, 2.0);

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.starts_with("weights.tiktok")));
        assert!(errors.iter().any(|e| e.starts_with("weights.twitter")));
    }

    #[test]
    fn test_non_finite_value() {
        let mut config = FibboScoreConfig::default();
        let mut li = defaults_for(Channel::Linkedin);
        li.engagement.sentiment_score_max = f64::NAN;
        config.channels.insert(Channel::Linkedin, li);

        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("finite"));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = FibboScoreConfig::default();
        let mut fb = defaults_for(Channel::Facebook);
        fb.engagement.save_rate_max_pct = -2.0; // Error 1
        config.channels.insert(Channel::Facebook, fb);
        config.weights.insert(Channel::Instagram, 3.0); // Error 2

        assert_eq!(validate_config(&config).unwrap_err().len(), 2);
    }
}
